//! `tracing` layer bridge

use std::fmt::{self, Write as _};
use std::io::Write as _;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::console::{console, Arg, Channel, Console};

/// Layer dispatching `ERROR` events to the error channel and `WARN` events to
/// the warn channel. Other levels are ignored.
///
/// Events from this crate are written to stderr instead of a channel.
pub struct TracingBridge {
    console: &'static Console,
}

impl TracingBridge {
    pub fn new() -> Self {
        Self::with_console(console())
    }

    pub fn with_console(console: &'static Console) -> Self {
        Self { console }
    }
}

impl Default for TracingBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Subscriber> Layer<S> for TracingBridge {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let channel = match *metadata.level() {
            Level::ERROR => Channel::Error,
            Level::WARN => Channel::Warn,
            _ => return,
        };
        let mut visitor = EventText::default();
        event.record(&mut visitor);
        let text = visitor.finish();

        if super::is_own_target(metadata.target()) {
            let _ = writeln!(
                std::io::stderr().lock(),
                "[{}] {}: {}",
                metadata.level(),
                metadata.target(),
                text
            );
            return;
        }
        self.console.dispatch(channel, &[Arg::from(text)]);
    }
}

/// Message first, then `key=value` for each other field.
#[derive(Default)]
struct EventText {
    message: String,
    fields: String,
}

impl EventText {
    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", field.name(), value);
    }

    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for EventText {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field, format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field, format_args!("{:?}", value));
        }
    }
}
