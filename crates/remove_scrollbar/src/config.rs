//! Caller options for a scroll lock.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::gap::GapMode;
use crate::styles::Importance;

/// Caller options for one activation. Field names follow the camelCase props the component is
/// usually configured with, so a JSON prop object deserializes directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct BodyScrollConfig {
    /// Skip `position: relative` on the body.
    pub no_relative: bool,
    /// Emit compensation without `!important`.
    pub no_important: bool,
    pub gap_mode: GapMode,
    /// Class toggled on the body while active; empty for none.
    pub body_class_name: String,
}

impl BodyScrollConfig {
    /// Decode a prop object such as `{"gapMode": "padding", "bodyClassName": "locked"}`.
    /// Missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns an error if `text` is not JSON, names an unknown field, or carries a value of the
    /// wrong type such as an unknown `gapMode`.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid body scroll configuration")
    }

    #[must_use]
    pub fn with_gap_mode(mut self, gap_mode: GapMode) -> Self {
        self.gap_mode = gap_mode;
        self
    }

    #[must_use]
    pub fn with_body_class(mut self, class: impl Into<String>) -> Self {
        self.body_class_name = class.into();
        self
    }

    #[must_use]
    pub fn without_important(mut self) -> Self {
        self.no_important = true;
        self
    }

    #[must_use]
    pub fn without_relative(mut self) -> Self {
        self.no_relative = true;
        self
    }

    pub const fn allow_relative(&self) -> bool {
        !self.no_relative
    }

    pub const fn importance(&self) -> Importance {
        if self.no_important {
            Importance::Normal
        } else {
            Importance::Important
        }
    }

    /// The body marker class, if one is configured.
    pub fn body_class(&self) -> Option<&str> {
        (!self.body_class_name.is_empty()).then_some(self.body_class_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_component_props() {
        let config = BodyScrollConfig::from_json("{}").unwrap();
        assert_eq!(config, BodyScrollConfig::default());
        assert_eq!(config.gap_mode, GapMode::Margin);
        assert!(config.allow_relative());
        assert_eq!(config.importance(), Importance::Important);
        assert_eq!(config.body_class(), None);
    }

    #[test]
    fn camel_case_props_decode() {
        let config = BodyScrollConfig::from_json(
            r#"{"noRelative": true, "noImportant": true, "gapMode": "padding", "bodyClassName": "scroll-lock"}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            BodyScrollConfig::default()
                .without_relative()
                .without_important()
                .with_gap_mode(GapMode::Padding)
                .with_body_class("scroll-lock")
        );
        assert_eq!(config.body_class(), Some("scroll-lock"));
    }

    #[test]
    fn unknown_gap_mode_is_rejected() {
        let error = BodyScrollConfig::from_json(r#"{"gapMode": "border"}"#).unwrap_err();
        assert!(format!("{error:#}").contains("invalid body scroll configuration"));
    }

    #[test]
    fn unknown_fields_and_bad_json_are_rejected() {
        assert!(BodyScrollConfig::from_json(r#"{"gapSize": 3}"#).is_err());
        assert!(BodyScrollConfig::from_json(r#"{"noRelative": "yes"}"#).is_err());
        assert!(BodyScrollConfig::from_json("gapMode=padding").is_err());
    }
}
