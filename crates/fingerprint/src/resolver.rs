use canonical::fingerprint_text;
use tracing::{debug, trace};
use tree::DocumentTree;

use crate::codec::deserialize;
use crate::descriptor::AnchorDescriptor;
use crate::error::FingerprintError;
use crate::policy::ScoringPolicy;


/// Per-signal breakdown for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateScore<N> {
    pub node: N,
    pub index_score: u32,
    pub hash_score: u32,
    pub snippet_score: u32,
}

impl<N> CandidateScore<N> {
    pub fn total(&self) -> u32 {
        self.index_score
            .saturating_add(self.hash_score)
            .saturating_add(self.snippet_score)
    }
}

/// Scored candidate search over a document tree.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    policy: ScoringPolicy,
}

impl Resolver {
    /// Build a resolver after validating `policy`.
    pub fn new(policy: ScoringPolicy) -> Result<Self, FingerprintError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score every candidate for `descriptor`, in document order.
    pub fn explain<T: DocumentTree>(
        &self,
        tree: &T,
        root: T::Node,
        descriptor: &AnchorDescriptor,
    ) -> Vec<CandidateScore<T::Node>> {
        let scope = self.scope(tree, root, descriptor);
        tree.descendants(scope)
            .into_iter()
            .filter(|node| {
                !tree.is_marker(*node)
                    && tree
                        .tag(*node)
                        .is_some_and(|tag| tag.eq_ignore_ascii_case(&descriptor.tag))
            })
            .map(|node| self.score(tree, node, descriptor))
            .collect()
    }

    /// Best surviving node for `descriptor`, or `None` when nothing clears
    /// the policy threshold.
    pub fn resolve<T: DocumentTree>(
        &self,
        tree: &T,
        root: T::Node,
        descriptor: &AnchorDescriptor,
    ) -> Option<T::Node> {
        let mut best: Option<CandidateScore<T::Node>> = None;
        let mut candidates = 0usize;
        for candidate in self.explain(tree, root, descriptor) {
            candidates += 1;
            trace!(
                node = ?candidate.node,
                index_score = candidate.index_score,
                hash_score = candidate.hash_score,
                snippet_score = candidate.snippet_score,
                "anchor_candidate"
            );
            // Strictly greater keeps the earliest candidate on ties.
            if best.map_or(true, |b| candidate.total() > b.total()) {
                best = Some(candidate);
            }
        }

        match best {
            Some(hit) if hit.total() > self.policy.min_score => {
                debug!(
                    tag = %descriptor.tag,
                    parent_id = %descriptor.parent_id,
                    score = hit.total(),
                    candidates,
                    "anchor_resolved"
                );
                Some(hit.node)
            }
            other => {
                debug!(
                    tag = %descriptor.tag,
                    parent_id = %descriptor.parent_id,
                    best_score = ?other.map(|b| b.total()),
                    candidates,
                    "anchor_miss"
                );
                None
            }
        }
    }

    /// Resolve each descriptor independently; positions line up with input.
    pub fn resolve_all<T: DocumentTree>(
        &self,
        tree: &T,
        root: T::Node,
        descriptors: &[AnchorDescriptor],
    ) -> Vec<Option<T::Node>> {
        descriptors
            .iter()
            .map(|descriptor| self.resolve(tree, root, descriptor))
            .collect()
    }

    /// Decode `token` and return the nodes that resolved, misses dropped.
    pub fn resolve_token<T: DocumentTree>(&self, tree: &T, root: T::Node, token: &str) -> Vec<T::Node> {
        self.resolve_all(tree, root, &deserialize(token))
            .into_iter()
            .flatten()
            .collect()
    }

    fn scope<T: DocumentTree>(&self, tree: &T, root: T::Node, descriptor: &AnchorDescriptor) -> T::Node {
        if descriptor.is_unscoped() {
            return root;
        }
        tree.find_element_by_id(root, &descriptor.parent_id)
            .unwrap_or(root)
    }

    fn score<T: DocumentTree>(
        &self,
        tree: &T,
        node: T::Node,
        descriptor: &AnchorDescriptor,
    ) -> CandidateScore<T::Node> {
        let text = fingerprint_text(&tree.text_content(node));
        let index_matches = tree.same_tag_rank(node) == descriptor.index as usize;
        CandidateScore {
            node,
            index_score: if index_matches { self.policy.index_weight } else { 0 },
            hash_score: if text.hash == descriptor.text_hash {
                self.policy.hash_weight
            } else {
                0
            },
            snippet_score: if text.normalized.starts_with(&descriptor.text_snippet) {
                self.policy.snippet_weight
            } else {
                0
            },
        }
    }
}

/// Resolve with the default policy.
pub fn resolve<T: DocumentTree>(tree: &T, root: T::Node, descriptor: &AnchorDescriptor) -> Option<T::Node> {
    Resolver::default().resolve(tree, root, descriptor)
}

/// Batch form of [`resolve`].
pub fn resolve_all<T: DocumentTree>(
    tree: &T,
    root: T::Node,
    descriptors: &[AnchorDescriptor],
) -> Vec<Option<T::Node>> {
    Resolver::default().resolve_all(tree, root, descriptors)
}

/// Decode and resolve a serialized token with the default policy.
pub fn resolve_token<T: DocumentTree>(tree: &T, root: T::Node, token: &str) -> Vec<T::Node> {
    Resolver::default().resolve_token(tree, root, token)
}
