use serde::{Deserialize, Serialize};

use crate::error::FocusError;

/// Presentation and exclusion settings for focus mode.
///
/// The config names classes and tags only; the root node is supplied to
/// [`FocusEngine::new`](crate::FocusEngine::new) by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Tag names that are never hidden and never walked into (site chrome).
    #[serde(default)]
    pub excluded_tags: Vec<String>,
    /// Element ids that are never hidden and never walked into.
    #[serde(default)]
    pub excluded_ids: Vec<String>,
    #[serde(default = "FocusConfig::default_target_class")]
    pub target_class: String,
    #[serde(default = "FocusConfig::default_hidden_class")]
    pub hidden_class: String,
    /// Class set on the root while focus mode is active.
    #[serde(default = "FocusConfig::default_root_class")]
    pub root_class: String,
    #[serde(default = "FocusConfig::default_divider_class")]
    pub divider_class: String,
    #[serde(default = "FocusConfig::default_divider_tag")]
    pub divider_tag: String,
}

impl FocusConfig {
    pub(crate) fn default_target_class() -> String {
        "focus-target".into()
    }

    pub(crate) fn default_hidden_class() -> String {
        "focus-hidden".into()
    }

    pub(crate) fn default_root_class() -> String {
        "focus-mode".into()
    }

    pub(crate) fn default_divider_class() -> String {
        "focus-divider".into()
    }

    pub(crate) fn default_divider_tag() -> String {
        "div".into()
    }

    /// Builder-style helper for the common "never hide these tags" case.
    pub fn with_excluded_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_excluded_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub(crate) fn excludes(&self, tag: Option<&str>, id: Option<&str>) -> bool {
        let tag_hit = tag.is_some_and(|tag| {
            self.excluded_tags
                .iter()
                .any(|excluded| excluded.eq_ignore_ascii_case(tag))
        });
        let id_hit = id.is_some_and(|id| self.excluded_ids.iter().any(|excluded| excluded == id));
        tag_hit || id_hit
    }

    /// Validate class names, divider tag and exclusion entries.
    pub fn validate(&self) -> Result<(), FocusError> {
        let classes = [
            ("target_class", &self.target_class),
            ("hidden_class", &self.hidden_class),
            ("root_class", &self.root_class),
            ("divider_class", &self.divider_class),
        ];
        for (field, class) in classes {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(FocusError::InvalidConfig(format!(
                    "{field} must be a single non-empty class name, got {class:?}"
                )));
            }
        }
        for (i, (field_a, a)) in classes.iter().enumerate() {
            if let Some((field_b, _)) = classes[i + 1..].iter().find(|(_, b)| b == a) {
                return Err(FocusError::InvalidConfig(format!(
                    "{field_a} and {field_b} share the class {a:?}"
                )));
            }
        }

        if self.divider_tag.is_empty()
            || !self
                .divider_tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(FocusError::InvalidConfig(format!(
                "divider_tag {:?} is not a valid tag name",
                self.divider_tag
            )));
        }

        if self.excluded_tags.iter().any(|t| t.trim().is_empty()) {
            return Err(FocusError::InvalidConfig(
                "excluded_tags must not contain empty entries".into(),
            ));
        }
        if self.excluded_ids.iter().any(|id| id.is_empty()) {
            return Err(FocusError::InvalidConfig(
                "excluded_ids must not contain empty entries".into(),
            ));
        }
        Ok(())
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            excluded_tags: Vec::new(),
            excluded_ids: Vec::new(),
            target_class: Self::default_target_class(),
            hidden_class: Self::default_hidden_class(),
            root_class: Self::default_root_class(),
            divider_class: Self::default_divider_class(),
            divider_tag: Self::default_divider_tag(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(FocusConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_blank_and_spaced_classes() {
        let cfg = FocusConfig {
            hidden_class: String::new(),
            ..FocusConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = FocusConfig {
            target_class: "focus target".into(),
            ..FocusConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(FocusError::InvalidConfig(msg)) if msg.contains("target_class")));
    }

    #[test]
    fn rejects_shared_classes() {
        let cfg = FocusConfig {
            divider_class: "focus-hidden".into(),
            ..FocusConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("hidden_class and divider_class"));
    }

    #[test]
    fn rejects_bad_divider_tag_and_empty_exclusions() {
        let cfg = FocusConfig {
            divider_tag: "<div>".into(),
            ..FocusConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = FocusConfig::default().with_excluded_ids([""]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn exclusions_match_tag_case_insensitively() {
        let cfg = FocusConfig::default()
            .with_excluded_tags(["nav"])
            .with_excluded_ids(["site-header"]);
        assert!(cfg.excludes(Some("NAV"), None));
        assert!(cfg.excludes(Some("DIV"), Some("site-header")));
        assert!(!cfg.excludes(Some("DIV"), Some("Site-Header")));
        assert!(!cfg.excludes(None, None));
    }

    #[test]
    fn missing_yaml_fields_take_defaults() {
        let cfg: FocusConfig = serde_json::from_str(r#"{"excluded_tags":["HEADER"]}"#).unwrap();
        assert_eq!(cfg.hidden_class, "focus-hidden");
        assert_eq!(cfg.divider_tag, "div");
        assert_eq!(cfg.excluded_tags, vec!["HEADER".to_string()]);
    }
}
