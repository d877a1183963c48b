//! Stack capture and message cosmetics for raised failures.

use std::backtrace::Backtrace;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Lines that look like frames injected by UI-library stack annotators.
///
/// CRLF mode: `$` also matches before `\r\n`, so the `.` lands before it.
static ANNOTATOR_FRAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mR)^ {4}at .* \(.*:\d+:\d+\)$").expect("annotator frame pattern is valid")
});

static FRAME_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+: (.*)$").expect("frame header pattern is valid"));

/// Append a `.` to every embedded annotator frame so test runners do not
/// mistake it for a real stack frame.
pub fn mark_annotator_frames(message: &str) -> String {
    ANNOTATOR_FRAME.replace_all(message, "$0.").into_owned()
}

/// One resolved frame of a captured stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub symbol: String,
    pub location: Option<String>,
}

impl StackFrame {
    /// True when this frame is `entry_point` itself or a closure nested in it.
    pub fn belongs_to(&self, entry_point: &str) -> bool {
        self.symbol == entry_point
            || self
                .symbol
                .strip_prefix(entry_point)
                .map(|rest| rest.starts_with("::"))
                .unwrap_or(false)
    }
}

/// Ordered frames, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    frames: Vec<StackFrame>,
}

impl StackTrace {
    /// Capture the current stack.
    ///
    /// Unless `full` is set, every frame up to and including the last frame
    /// of `exclude` is dropped, leaving the trace starting at its caller.
    pub fn capture(exclude: &str, full: bool) -> Self {
        let mut trace = Self::parse(&Backtrace::force_capture().to_string());
        if !full {
            trace.truncate_through(exclude);
        }
        trace
    }

    /// Parse the textual form of a `std::backtrace::Backtrace`.
    pub fn parse(text: &str) -> Self {
        let mut frames: Vec<StackFrame> = Vec::new();
        for line in text.lines() {
            let trimmed = line.trim_start();
            if let Some(location) = trimmed.strip_prefix("at ") {
                if let Some(frame) = frames.last_mut() {
                    frame.location = Some(location.trim().to_string());
                }
            } else if let Some(caps) = FRAME_HEADER.captures(line) {
                frames.push(StackFrame {
                    symbol: caps[1].trim().to_string(),
                    location: None,
                });
            } else if !trimmed.is_empty() && !frames.is_empty() {
                // Inlined symbol sharing the previous frame index.
                frames.push(StackFrame {
                    symbol: trimmed.to_string(),
                    location: None,
                });
            }
        }
        Self { frames }
    }

    /// Drop frames up to and including the outermost frame of `entry_point`.
    /// A trace without such a frame is left untouched.
    pub fn truncate_through(&mut self, entry_point: &str) {
        if let Some(idx) = self.frames.iter().rposition(|f| f.belongs_to(entry_point)) {
            self.frames.drain(..=idx);
        }
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn contains(&self, entry_point: &str) -> bool {
        self.frames.iter().any(|f| f.belongs_to(entry_point))
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, frame) in self.frames.iter().enumerate() {
            writeln!(f, "{:>4}: {}", idx, frame.symbol)?;
            if let Some(location) = &frame.location {
                writeln!(f, "             at {}", location)?;
            }
        }
        Ok(())
    }
}
