//! Builder configuration supplied by the embedding host.

use fb_core::locale::{DEFAULT_LOCALE, Localizer, Messages};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid builder config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("history depth must be at least 1")]
    ZeroHistoryDepth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    pub locale: String,
    pub fallback_locale: String,
    /// Maximum number of undo steps kept.
    pub history_depth: usize,
    /// Extra catalogs, locale → key → text. Each replaces the built-in
    /// catalog of its locale.
    pub custom_messages: HashMap<String, Messages>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: DEFAULT_LOCALE.to_string(),
            history_depth: 200,
            custom_messages: HashMap::new(),
        }
    }
}

impl BuilderConfig {
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        if config.history_depth == 0 {
            return Err(ConfigError::ZeroHistoryDepth);
        }
        Ok(config)
    }

    pub fn localizer(&self) -> Localizer {
        let mut localizer = Localizer::new(&self.locale);
        localizer.set_fallback(&self.fallback_locale);
        for (locale, messages) in &self.custom_messages {
            localizer.register_messages(locale, messages.clone());
        }
        localizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_uses_defaults() {
        assert_eq!(BuilderConfig::from_json("{}").unwrap(), BuilderConfig::default());
    }

    #[test]
    fn custom_messages_reach_the_localizer() {
        let config = BuilderConfig::from_json(
            r#"{ "locale": "fa", "historyDepth": 10, "customMessages": { "fa": { "step": "مرحله" } } }"#,
        )
        .unwrap();
        assert_eq!(config.history_depth, 10);
        let locale = config.localizer();
        assert_eq!(locale.t("step"), "مرحله");
        assert_eq!(locale.t("quote"), "Quote");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(BuilderConfig::from_json("42"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            BuilderConfig::from_json(r#"{ "historyDepth": 0 }"#),
            Err(ConfigError::ZeroHistoryDepth)
        ));
    }
}
