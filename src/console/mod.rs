//! Diagnostic console with swappable per-channel handlers.
//!
//! Each channel owns a fixed slot: the handler captured when the console was
//! built (`original`) and the handler currently receiving calls (`active`).
//! `install` and `restore` are the only operations that change a slot.

use std::io::Write;
use std::sync::{Arc, RwLock};

use log::debug;
use once_cell::sync::Lazy;

use crate::format::format_args_list;
use crate::interceptor::{interceptor, InterceptOptions};
use crate::testing::install_panic_hook;

mod arg;

pub use arg::Arg;

/// Handler receiving the positional arguments of one diagnostic call.
pub type Handler = Arc<dyn Fn(&[Arg]) + Send + Sync>;

/// Process-wide console used by the `console_*!` macros.
static CONSOLE: Lazy<Console> = Lazy::new(Console::new);

/// Access the process-wide console.
pub fn console() -> &'static Console {
    &CONSOLE
}

/// The diagnostic channels subject to interception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Assert,
    Error,
    Warn,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Assert, Channel::Error, Channel::Warn];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Assert => "assert",
            Channel::Error => "error",
            Channel::Warn => "warn",
        }
    }

    /// Symbol path of the console method that dispatches this channel.
    pub fn entry_point(self) -> &'static str {
        match self {
            Channel::Assert => std::any::type_name_of_val(&Console::assert),
            Channel::Error => std::any::type_name_of_val(&Console::error),
            Channel::Warn => std::any::type_name_of_val(&Console::warn),
        }
    }
}

/// Lifecycle state of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Original,
    Intercepted,
}

/// Handlers a console starts out with.
#[derive(Clone)]
pub struct OriginalHandlers {
    pub assert: Handler,
    pub error: Handler,
    pub warn: Handler,
}

impl Default for OriginalHandlers {
    fn default() -> Self {
        Self {
            assert: Arc::new(default_assert),
            error: Arc::new(default_print),
            warn: Arc::new(default_print),
        }
    }
}

fn default_print(args: &[Arg]) {
    let line = format_args_list(args);
    let _ = writeln!(std::io::stderr().lock(), "{}", line);
}

fn default_assert(args: &[Arg]) {
    if args.first().map(Arg::is_truthy).unwrap_or(false) {
        return;
    }
    let message = format_args_list(args.get(1..).unwrap_or_default());
    let mut stderr = std::io::stderr().lock();
    let _ = if message.is_empty() {
        writeln!(stderr, "Assertion failed")
    } else {
        writeln!(stderr, "Assertion failed: {}", message)
    };
}

struct Slot {
    original: Handler,
    active: RwLock<Handler>,
}

impl Slot {
    fn new(original: Handler) -> Self {
        Self {
            active: RwLock::new(original.clone()),
            original,
        }
    }

    fn current(&self) -> Handler {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn replace(&self, handler: Handler) {
        *self
            .active
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = handler;
    }
}

/// Registry of the three channel slots.
pub struct Console {
    assert: Slot,
    error: Slot,
    warn: Slot,
}

impl Console {
    /// Console whose originals print to stderr.
    pub fn new() -> Self {
        Self::with_originals(OriginalHandlers::default())
    }

    pub fn with_originals(originals: OriginalHandlers) -> Self {
        Self {
            assert: Slot::new(originals.assert),
            error: Slot::new(originals.error),
            warn: Slot::new(originals.warn),
        }
    }

    fn slot(&self, channel: Channel) -> &Slot {
        match channel {
            Channel::Assert => &self.assert,
            Channel::Error => &self.error,
            Channel::Warn => &self.warn,
        }
    }

    /// Replace the channel's handler with an interceptor, discarding any
    /// interceptor installed before.
    pub fn install(&self, channel: Channel, options: InterceptOptions) {
        let slot = self.slot(channel);
        debug!(
            "intercepting console.{} ({} ignore rules, full_stack_trace={})",
            channel.name(),
            options.ignore.len(),
            options.full_stack_trace
        );
        install_panic_hook();
        slot.replace(interceptor(channel, options, slot.original.clone()));
    }

    /// Put the originally captured handler back. Safe to call repeatedly.
    pub fn restore(&self, channel: Channel) {
        let slot = self.slot(channel);
        debug!("restoring console.{}", channel.name());
        slot.replace(slot.original.clone());
    }

    pub fn state(&self, channel: Channel) -> ChannelState {
        let slot = self.slot(channel);
        if Arc::ptr_eq(&slot.current(), &slot.original) {
            ChannelState::Original
        } else {
            ChannelState::Intercepted
        }
    }

    /// Dispatch an assertion; the first argument is the condition.
    #[inline(never)]
    pub fn assert(&self, args: &[Arg]) {
        let handler = self.assert.current();
        handler(args);
    }

    #[inline(never)]
    pub fn error(&self, args: &[Arg]) {
        let handler = self.error.current();
        handler(args);
    }

    #[inline(never)]
    pub fn warn(&self, args: &[Arg]) {
        let handler = self.warn.current();
        handler(args);
    }

    /// Dispatch to `channel` by value.
    pub fn dispatch(&self, channel: Channel, args: &[Arg]) {
        match channel {
            Channel::Assert => self.assert(args),
            Channel::Error => self.error(args),
            Channel::Warn => self.warn(args),
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert through the process-wide console.
///
/// ```ignore
/// console_assert!(items.is_empty(), "leftover items: %d", items.len());
/// ```
#[macro_export]
macro_rules! console_assert {
    ($cond:expr $(, $arg:expr)* $(,)?) => {
        $crate::console::console().assert(&[
            $crate::console::Arg::from($cond)
            $(, $crate::console::Arg::from($arg))*
        ])
    };
}

/// Report an error through the process-wide console.
#[macro_export]
macro_rules! console_error {
    ($($arg:expr),* $(,)?) => {
        $crate::console::console().error(&[$($crate::console::Arg::from($arg)),*])
    };
}

/// Report a warning through the process-wide console.
#[macro_export]
macro_rules! console_warn {
    ($($arg:expr),* $(,)?) => {
        $crate::console::console().warn(&[$($crate::console::Arg::from($arg)),*])
    };
}
