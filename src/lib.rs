// Diagnostic Interceptor
// Turns unexpected error, warning and assertion output into test failures

//! Fail tests loudly on unexpected diagnostic output.
//!
//! Each diagnostic channel (assert, error, warn) can be intercepted: calls are
//! formatted, checked against an ignore list and either let through or turned
//! into an [`UnexpectedDiagnostic`] panic at the call site.
//!
//! ```ignore
//! use diagnostic_interceptor::{console_error, install_error, restore_error, InterceptOptions};
//!
//! install_error(InterceptOptions::new().ignore("deprecated"));
//! console_error!("this API is deprecated"); // forwarded to stderr
//! console_error!("x=%d", 5);                // panics with "x=5"
//! restore_error();
//! ```

// Module declarations
pub mod bridge;
pub mod config;
pub mod console;
pub mod error;
pub mod format;
pub mod interceptor;
pub mod testing;

// Re-exports for convenience
pub use config::InterceptConfig;
pub use console::{console, Arg, Channel, ChannelState, Console, Handler, OriginalHandlers};
pub use error::{ConfigError, ErrorCode, UnexpectedDiagnostic};
pub use interceptor::{format_message, FormattedMessage, IgnoreRule, InterceptOptions};
pub use testing::{catch_unexpected, InterceptGuard};

/// Intercept `console.assert` on the process-wide console.
pub fn install_assert(options: InterceptOptions) {
    console().install(Channel::Assert, options);
}

pub fn restore_assert() {
    console().restore(Channel::Assert);
}

/// Intercept `console.error` on the process-wide console.
pub fn install_error(options: InterceptOptions) {
    console().install(Channel::Error, options);
}

pub fn restore_error() {
    console().restore(Channel::Error);
}

/// Intercept `console.warn` on the process-wide console.
pub fn install_warn(options: InterceptOptions) {
    console().install(Channel::Warn, options);
}

pub fn restore_warn() {
    console().restore(Channel::Warn);
}

/// Intercept all three channels with the same options.
pub fn install_all(options: InterceptOptions) {
    for channel in Channel::ALL {
        console().install(channel, options.clone());
    }
}

pub fn restore_all() {
    for channel in Channel::ALL {
        console().restore(channel);
    }
}
