//! Scoring policy for candidate resolution.

use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;

/// Weights for each resolution signal and the acceptance threshold.
///
/// The default policy is part of the compatibility contract for shared links;
/// other values exist for tuning experiments and diagnostics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoringPolicy {
    /// Awarded when the candidate's same-tag rank equals the descriptor index.
    #[serde(default = "ScoringPolicy::default_index_weight")]
    pub index_weight: u32,
    /// Awarded when the candidate's text hash equals the descriptor hash.
    #[serde(default = "ScoringPolicy::default_hash_weight")]
    pub hash_weight: u32,
    /// Awarded when the candidate's text starts with the descriptor snippet.
    #[serde(default = "ScoringPolicy::default_snippet_weight")]
    pub snippet_weight: u32,
    /// A candidate is accepted only if its total is strictly greater.
    #[serde(default = "ScoringPolicy::default_min_score")]
    pub min_score: u32,
}

impl ScoringPolicy {
    pub(crate) fn default_index_weight() -> u32 {
        10
    }

    pub(crate) fn default_hash_weight() -> u32 {
        50
    }

    pub(crate) fn default_snippet_weight() -> u32 {
        30
    }

    pub(crate) fn default_min_score() -> u32 {
        30
    }

    /// Highest total a candidate can reach.
    pub fn max_score(&self) -> u32 {
        self.index_weight
            .saturating_add(self.hash_weight)
            .saturating_add(self.snippet_weight)
    }

    /// Check that the policy can accept something and that positional
    /// agreement alone can never carry a match.
    pub fn validate(&self) -> Result<(), FingerprintError> {
        let max_score = self
            .index_weight
            .checked_add(self.hash_weight)
            .and_then(|sum| sum.checked_add(self.snippet_weight))
            .ok_or_else(|| FingerprintError::InvalidPolicy("weights overflow u32".into()))?;
        if self.min_score >= max_score {
            return Err(FingerprintError::InvalidPolicy(format!(
                "min_score {} is unreachable (max score {max_score})",
                self.min_score
            )));
        }
        if self.index_weight > self.min_score {
            return Err(FingerprintError::InvalidPolicy(
                "index_weight must not exceed min_score; index agreement alone cannot resolve"
                    .into(),
            ));
        }
        if self.hash_weight.saturating_add(self.snippet_weight) <= self.min_score {
            return Err(FingerprintError::InvalidPolicy(
                "text signals cannot clear min_score".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            index_weight: Self::default_index_weight(),
            hash_weight: Self::default_hash_weight(),
            snippet_weight: Self::default_snippet_weight(),
            min_score: Self::default_min_score(),
        }
    }
}
