// Configuration error types and constants

use crate::error::ErrorCode;
use std::fmt;

/// Configuration error code constants
///
/// Error code range: 3001-3003
pub struct ConfigErrorCodes {}

impl ConfigErrorCodes {
    /// An ignore pattern failed to compile
    pub const INVALID_PATTERN: i32 = 3001;

    /// Configuration document could not be parsed
    pub const PARSE: i32 = 3002;

    /// Configuration file could not be read
    pub const IO: i32 = 3003;
}

/// Errors raised while turning configuration into interceptor options
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Regex ignore rule is not a valid pattern
    InvalidPattern { pattern: String, reason: String },

    /// JSON document is malformed or has the wrong shape
    Parse { reason: String },

    /// Reading the configuration file failed
    Io { path: String, reason: String },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::InvalidPattern { .. } => ConfigErrorCodes::INVALID_PATTERN,
            ConfigError::Parse { .. } => ConfigErrorCodes::PARSE,
            ConfigError::Io { .. } => ConfigErrorCodes::IO,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::InvalidPattern { pattern, reason } => {
                format!("Invalid ignore pattern {:?}: {}", pattern, reason)
            }
            ConfigError::Parse { reason } => format!("Invalid configuration: {}", reason),
            ConfigError::Io { path, reason } => {
                format!("Failed to read configuration {}: {}", path, reason)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse {
            reason: err.to_string(),
        }
    }
}
