//! YAML configuration for anchorfp hosts.
//!
//! One file carries the resolver's scoring policy, the focus-mode
//! presentation and exclusions, and the name of the query parameter that
//! holds shared view state. Every section is optional.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "docs-site"
//!
//! scoring:
//!   index_weight: 10
//!   hash_weight: 50
//!   snippet_weight: 30
//!   min_score: 30
//!
//! focus:
//!   excluded_tags: ["HEADER", "NAV"]
//!   excluded_ids: ["cookie-banner"]
//!   hidden_class: "focus-hidden"
//!   divider_tag: "div"
//!
//! state:
//!   param_name: "view"
//! ```

use std::fs;
use std::path::Path;

use fingerprint::ScoringPolicy;
use focus::FocusConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use viewstate::{StateCodec, DEFAULT_PARAM};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub scoring: ScoringPolicy,

    #[serde(default)]
    pub focus: FocusConfig,

    #[serde(default)]
    pub state: StateYamlConfig,
}

impl AnchorConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AnchorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.scoring
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("scoring: {e}")))?;
        self.focus
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("focus: {e}")))?;
        self.state.validate()?;
        Ok(())
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        self.scoring
    }

    pub fn focus_config(&self) -> FocusConfig {
        self.focus.clone()
    }

    pub fn state_codec(&self) -> Result<StateCodec, ConfigLoadError> {
        StateCodec::new(self.state.param_name.clone())
            .map_err(|e| ConfigLoadError::Validation(format!("state: {e}")))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            scoring: ScoringPolicy::default(),
            focus: FocusConfig::default(),
            state: StateYamlConfig::default(),
        }
    }
}

/// State codec YAML configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateYamlConfig {
    #[serde(default = "default_param_name")]
    pub param_name: String,
}

impl StateYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        StateCodec::new(self.param_name.clone())
            .map(|_| ())
            .map_err(|e| ConfigLoadError::Validation(format!("state: {e}")))
    }
}

impl Default for StateYamlConfig {
    fn default() -> Self {
        Self {
            param_name: default_param_name(),
        }
    }
}

fn default_param_name() -> String {
    DEFAULT_PARAM.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_config() {
        let config = AnchorConfig::from_yaml(r#"version: "1.0""#).unwrap();
        assert_eq!(config, AnchorConfig::default());
        assert_eq!(config.state_codec().unwrap().param_name(), "view");
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
version: "1"
name: "docs"
scoring:
  min_score: 35
focus:
  excluded_tags: ["HEADER", "NAV"]
  excluded_ids: ["cookie-banner"]
  divider_tag: "aside"
state:
  param_name: "v"
"#;
        let config = AnchorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name.as_deref(), Some("docs"));
        assert_eq!(config.scoring_policy().min_score, 35);
        assert_eq!(config.scoring_policy().hash_weight, 50);
        assert_eq!(config.focus_config().excluded_tags, vec!["HEADER", "NAV"]);
        assert_eq!(config.focus_config().divider_tag, "aside");
        assert_eq!(config.focus_config().hidden_class, "focus-hidden");
        assert_eq!(config.state_codec().unwrap().param_name(), "v");
    }

    #[test]
    fn test_unsupported_version() {
        let err = AnchorConfig::from_yaml(r#"version: "2.0""#).unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn test_invalid_sections() {
        let scoring = "version: \"1\"\nscoring:\n  index_weight: 40\n";
        assert!(matches!(
            AnchorConfig::from_yaml(scoring),
            Err(ConfigLoadError::Validation(msg)) if msg.starts_with("scoring")
        ));

        let focus = "version: \"1\"\nfocus:\n  hidden_class: \"two words\"\n";
        assert!(matches!(
            AnchorConfig::from_yaml(focus),
            Err(ConfigLoadError::Validation(msg)) if msg.starts_with("focus")
        ));

        let state = "version: \"1\"\nstate:\n  param_name: \"a&b\"\n";
        assert!(matches!(
            AnchorConfig::from_yaml(state),
            Err(ConfigLoadError::Validation(msg)) if msg.starts_with("state")
        ));
    }

    #[test]
    fn test_overflowing_scoring_weights() {
        let yaml = "version: \"1\"\nscoring:\n  hash_weight: 4294967295\n  snippet_weight: 4294967295\n";
        assert!(matches!(
            AnchorConfig::from_yaml(yaml),
            Err(ConfigLoadError::Validation(msg)) if msg.contains("overflow")
        ));
    }

    #[test]
    fn test_missing_version_is_a_parse_error() {
        assert!(matches!(
            AnchorConfig::from_yaml("name: x"),
            Err(ConfigLoadError::YamlParse(_))
        ));
    }

    #[test]
    fn test_from_file_and_yaml_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let original = AnchorConfig {
            name: Some("round-trip".into()),
            ..AnchorConfig::default()
        };
        file.write_all(original.to_yaml().unwrap().as_bytes()).unwrap();

        let loaded = AnchorConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            AnchorConfig::from_file("/definitely/not/here.yaml"),
            Err(ConfigLoadError::FileRead(_))
        ));
    }
}
