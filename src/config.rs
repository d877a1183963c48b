//! Interceptor configuration
//!
//! Per-channel ignore lists and stack options can be kept in a JSON file so a
//! test suite shares one definition of "expected noise":
//!
//! ```json
//! {
//!   "error": { "ignore": ["deprecated", { "pattern": "^Warning: .* prop" }] },
//!   "warn": { "ignore": [], "full_stack_trace": true },
//!   "assert": null
//! }
//! ```
//!
//! A channel set to `null` is left alone; a missing channel is intercepted
//! with an empty ignore list.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::console::{Channel, Console};
use crate::error::ConfigError;
use crate::interceptor::{IgnoreRule, InterceptOptions};

/// Environment variable naming the configuration file used by [`InterceptConfig::load`].
pub const CONFIG_ENV_VAR: &str = "DIAGNOSTIC_INTERCEPTOR_CONFIG";

/// Ignore rule as written in configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum IgnoreRuleConfig {
    /// Bare string: substring rule
    Substring(String),
    /// `{ "pattern": "..." }`: regex rule
    Pattern { pattern: String },
}

impl IgnoreRuleConfig {
    pub fn to_rule(&self) -> Result<IgnoreRule, ConfigError> {
        match self {
            IgnoreRuleConfig::Substring(text) => Ok(IgnoreRule::Substring(text.clone())),
            IgnoreRuleConfig::Pattern { pattern } => IgnoreRule::pattern(pattern),
        }
    }
}

/// Options for one channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelConfig {
    #[serde(default)]
    pub ignore: Vec<IgnoreRuleConfig>,
    /// Keep interception frames in raised failures
    #[serde(default, alias = "fullStackTrace")]
    pub full_stack_trace: bool,
}

impl ChannelConfig {
    pub fn to_options(&self) -> Result<InterceptOptions, ConfigError> {
        let ignore = self
            .ignore
            .iter()
            .map(IgnoreRuleConfig::to_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(InterceptOptions {
            ignore,
            full_stack_trace: self.full_stack_trace,
        })
    }
}

/// Complete interceptor configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InterceptConfig {
    pub assert: Option<ChannelConfig>,
    pub error: Option<ChannelConfig>,
    pub warn: Option<ChannelConfig>,
}

impl Default for InterceptConfig {
    /// Every channel intercepted, nothing ignored
    fn default() -> Self {
        Self {
            assert: Some(ChannelConfig::default()),
            error: Some(ChannelConfig::default()),
            warn: Some(ChannelConfig::default()),
        }
    }
}

impl InterceptConfig {
    pub fn channel(&self, channel: Channel) -> Option<&ChannelConfig> {
        match channel {
            Channel::Assert => self.assert.as_ref(),
            Channel::Error => self.error.as_ref(),
            Channel::Warn => self.warn.as_ref(),
        }
    }

    /// Compiled options for every configured channel.
    pub fn channel_options(&self) -> Result<Vec<(Channel, InterceptOptions)>, ConfigError> {
        Channel::ALL
            .into_iter()
            .filter_map(|channel| {
                self.channel(channel)
                    .map(|config| config.to_options().map(|options| (channel, options)))
            })
            .collect()
    }

    /// Install every configured channel on `console`.
    ///
    /// Nothing is installed when any ignore pattern fails to compile.
    pub fn install(&self, console: &Console) -> Result<(), ConfigError> {
        for (channel, options) in self.channel_options()? {
            console.install(channel, options);
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file, failing on unreadable or
    /// malformed input.
    pub fn try_load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        let config = Self::from_json_str(&contents)
            .with_context(|| format!("Failed to parse interceptor config {}", path.display()))?;
        // Compile patterns early so a bad rule is reported at load time.
        config
            .channel_options()
            .with_context(|| format!("Invalid ignore rule in {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    ///
    /// # Returns
    /// * Loaded configuration, or the default configuration when the file
    ///   is missing or invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_file(&path) {
            Ok(config) => {
                log::info!(
                    "[Config] Loaded interceptor configuration from {:?}",
                    path.as_ref()
                );
                config
            }
            Err(err) => {
                log::warn!(
                    "[Config] Failed to load {:?}: {:#}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load the file named by `DIAGNOSTIC_INTERCEPTOR_CONFIG`, or defaults.
    pub fn load() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from_file(path),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{catch_unexpected, Recorder};
    use std::io::Write;

    #[test]
    fn test_default_config_intercepts_everything() {
        let config = InterceptConfig::default();
        let options = config.channel_options().unwrap();
        assert_eq!(options.len(), 3);
        assert!(options
            .iter()
            .all(|(_, o)| o.ignore.is_empty() && !o.full_stack_trace));
    }

    #[test]
    fn test_parse_mixed_rules() {
        let config = InterceptConfig::from_json_str(
            r#"{
                "error": { "ignore": ["deprecated", { "pattern": "^Warning" }] },
                "warn": { "fullStackTrace": true },
                "assert": null
            }"#,
        )
        .unwrap();

        assert_eq!(config.assert, None);
        let error = config.error.as_ref().unwrap();
        assert_eq!(
            error.ignore,
            vec![
                IgnoreRuleConfig::Substring("deprecated".to_string()),
                IgnoreRuleConfig::Pattern {
                    pattern: "^Warning".to_string()
                },
            ]
        );
        assert!(config.warn.as_ref().unwrap().full_stack_trace);
    }

    #[test]
    fn test_missing_channels_use_defaults() {
        let config = InterceptConfig::from_json_str("{}").unwrap();
        assert_eq!(config, InterceptConfig::default());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config =
            InterceptConfig::from_json_str(r#"{ "warn": { "ignore": [{ "pattern": "(" }] } }"#)
                .unwrap();
        assert!(matches!(
            config.channel_options(),
            Err(ConfigError::InvalidPattern { .. })
        ));
        let console = Recorder::new().console();
        assert!(config.install(&console).is_err());
    }

    #[test]
    fn test_install_applies_rules() {
        let recorder = Recorder::new();
        let console = recorder.console();
        let config = InterceptConfig::from_json_str(
            r#"{ "error": { "ignore": ["known"] }, "assert": null }"#,
        )
        .unwrap();
        config.install(&console).unwrap();

        catch_unexpected(|| console.error(&["known thing".into()])).unwrap();
        assert!(catch_unexpected(|| console.warn(&["anything".into()])).is_err());
        catch_unexpected(|| console.assert(&[false.into(), "left alone".into()])).unwrap();
        assert_eq!(recorder.messages(Channel::Error), vec!["known thing"]);
        assert_eq!(recorder.messages(Channel::Assert), vec!["left alone"]);
    }

    #[test]
    fn test_load_from_file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "diagnostic_interceptor_config_{}.json",
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{ "warn": {{ "ignore": ["noise"] }} }}"#).unwrap();
        drop(file);

        let config = InterceptConfig::try_load_from_file(&path).unwrap();
        assert_eq!(
            config.warn.unwrap().ignore,
            vec![IgnoreRuleConfig::Substring("noise".to_string())]
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("diagnostic_interceptor_missing_config.json");
        assert!(InterceptConfig::try_load_from_file(&path).is_err());
        assert_eq!(
            InterceptConfig::load_from_file(&path),
            InterceptConfig::default()
        );
    }
}
