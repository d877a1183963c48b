//! Interceptors that turn diagnostic calls into failures.
//!
//! An interceptor formats the arguments of a diagnostic call, checks the
//! message against the configured ignore rules and either lets the call
//! through or raises an [`UnexpectedDiagnostic`].

use std::sync::Arc;

use log::{debug, trace};
use regex::Regex;

use crate::console::{Arg, Channel, Handler};
use crate::error::{ConfigError, UnexpectedDiagnostic};
use crate::format::format_args_list;

pub mod stack;

pub use stack::{mark_annotator_frames, StackFrame, StackTrace};

/// A rule that suppresses interception for matching messages.
#[derive(Debug, Clone)]
pub enum IgnoreRule {
    /// Matches when the message contains this text.
    Substring(String),
    /// Matches when the pattern is found anywhere in the message.
    Pattern(Regex),
}

impl IgnoreRule {
    pub fn matches(&self, message: &str) -> bool {
        match self {
            IgnoreRule::Substring(needle) => message.contains(needle.as_str()),
            IgnoreRule::Pattern(pattern) => pattern.is_match(message),
        }
    }

    /// Compile a pattern rule.
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(IgnoreRule::Pattern)
            .map_err(|err| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: err.to_string(),
            })
    }
}

impl From<&str> for IgnoreRule {
    fn from(value: &str) -> Self {
        IgnoreRule::Substring(value.to_string())
    }
}

impl From<String> for IgnoreRule {
    fn from(value: String) -> Self {
        IgnoreRule::Substring(value)
    }
}

impl From<Regex> for IgnoreRule {
    fn from(value: Regex) -> Self {
        IgnoreRule::Pattern(value)
    }
}

/// Per-installation interceptor configuration.
#[derive(Debug, Clone, Default)]
pub struct InterceptOptions {
    pub ignore: Vec<IgnoreRule>,
    /// Keep the interception machinery in the raised failure's stack.
    pub full_stack_trace: bool,
}

impl InterceptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, rule: impl Into<IgnoreRule>) -> Self {
        self.ignore.push(rule.into());
        self
    }

    pub fn ignore_pattern(self, pattern: &str) -> Result<Self, ConfigError> {
        Ok(self.ignore(IgnoreRule::pattern(pattern)?))
    }

    pub fn with_full_stack_trace(mut self, full_stack_trace: bool) -> Self {
        self.full_stack_trace = full_stack_trace;
        self
    }

    fn is_ignored(&self, message: &str) -> bool {
        self.ignore.iter().any(|rule| rule.matches(message))
    }
}

/// Result of formatting one diagnostic call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    pub should_not_throw: bool,
    pub message: String,
}

/// Format `args` and decide whether the call is suppressed.
pub fn format_message(options: &InterceptOptions, args: &[Arg]) -> FormattedMessage {
    let message = format_args_list(args);
    FormattedMessage {
        should_not_throw: options.is_ignored(&message),
        message,
    }
}

/// Unwind the current call with an [`UnexpectedDiagnostic`].
///
/// Frames at or above `exclude` are left out of the captured stack unless
/// `full_stack_trace` is set.
#[inline(never)]
pub fn raise(channel: Channel, message: &str, exclude: &str, full_stack_trace: bool) -> ! {
    let stack = StackTrace::capture(exclude, full_stack_trace);
    let failure = UnexpectedDiagnostic::new(channel, mark_annotator_frames(message), stack);
    debug!("raising unexpected console.{} call", channel.name());
    std::panic::panic_any(failure)
}

/// Build the interceptor for `channel`, forwarding suppressed calls to
/// `original` where the channel does so.
pub fn interceptor(channel: Channel, options: InterceptOptions, original: Handler) -> Handler {
    match channel {
        Channel::Assert => assert_interceptor(options),
        Channel::Error | Channel::Warn => forwarding_interceptor(channel, options, original),
    }
}

// Suppressed assertions are dropped rather than forwarded: a holding
// assertion never logs, so neither does an ignored failing one.
fn assert_interceptor(options: InterceptOptions) -> Handler {
    Arc::new(move |args: &[Arg]| {
        let holds = args.first().map(Arg::is_truthy).unwrap_or(false);
        if holds {
            return;
        }
        let rest = args.get(1..).unwrap_or_default();
        let formatted = format_message(&options, rest);
        if formatted.should_not_throw {
            trace!("ignored console.assert: {}", formatted.message);
            return;
        }
        raise(
            Channel::Assert,
            &formatted.message,
            Channel::Assert.entry_point(),
            options.full_stack_trace,
        );
    })
}

fn forwarding_interceptor(
    channel: Channel,
    options: InterceptOptions,
    original: Handler,
) -> Handler {
    Arc::new(move |args: &[Arg]| {
        let formatted = format_message(&options, args);
        if formatted.should_not_throw {
            trace!("ignored console.{}: {}", channel.name(), formatted.message);
            original(args);
            return;
        }
        raise(
            channel,
            &formatted.message,
            channel.entry_point(),
            options.full_stack_trace,
        );
    })
}

#[cfg(test)]
mod tests;
