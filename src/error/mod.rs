// Error types for the diagnostic interceptor
//
// This module defines the failure raised for unexpected diagnostic calls and
// the errors produced while building interceptor options from configuration.

mod config;
mod diagnostic;

pub use config::{ConfigError, ConfigErrorCodes};
pub use diagnostic::{UnexpectedDiagnostic, UNEXPECTED_DIAGNOSTIC_CODE};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
