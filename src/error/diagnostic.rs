// Failure raised in place of an unexpected diagnostic call

use crate::console::Channel;
use crate::error::ErrorCode;
use crate::interceptor::StackTrace;
use std::fmt;

/// Error code reported by [`UnexpectedDiagnostic`]
pub const UNEXPECTED_DIAGNOSTIC_CODE: i32 = 4001;

/// An intercepted diagnostic call that no ignore rule matched
///
/// Raised as a panic payload so the failure surfaces at the call site of the
/// diagnostic and fails the surrounding test.
#[derive(Debug, Clone)]
pub struct UnexpectedDiagnostic {
    channel: Channel,
    message: String,
    stack: StackTrace,
}

impl UnexpectedDiagnostic {
    pub fn new(channel: Channel, message: String, stack: StackTrace) -> Self {
        Self {
            channel,
            message,
            stack,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Formatted diagnostic text, with annotator frames marked.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> &StackTrace {
        &self.stack
    }

    /// Message followed by the captured stack.
    pub fn render(&self) -> String {
        if self.stack.is_empty() {
            format!(
                "Unexpected console.{}: {}",
                self.channel.name(),
                self.message
            )
        } else {
            format!(
                "Unexpected console.{}: {}\nstack backtrace:\n{}",
                self.channel.name(),
                self.message,
                self.stack
            )
        }
    }
}

impl ErrorCode for UnexpectedDiagnostic {
    fn code(&self) -> i32 {
        UNEXPECTED_DIAGNOSTIC_CODE
    }

    fn message(&self) -> String {
        self.message.clone()
    }
}

impl fmt::Display for UnexpectedDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for UnexpectedDiagnostic {}
