//! Recording originals for observing forwarded diagnostic calls.

use std::sync::{Arc, Mutex};

use crate::console::{Arg, Channel, Console, Handler, OriginalHandlers};
use crate::format::format_args_list;

/// A call that reached an original handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub channel: Channel,
    pub message: String,
}

/// Shared log of calls received by recording originals.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Originals that record instead of printing. The assert original only
    /// records failing assertions.
    pub fn originals(&self) -> OriginalHandlers {
        OriginalHandlers {
            assert: self.handler(Channel::Assert),
            error: self.handler(Channel::Error),
            warn: self.handler(Channel::Warn),
        }
    }

    /// Fresh console wired to this recorder.
    pub fn console(&self) -> Console {
        Console::with_originals(self.originals())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("recorder poisoned").clone()
    }

    /// Messages recorded on `channel`, oldest first.
    pub fn messages(&self, channel: Channel) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.channel == channel)
            .map(|call| call.message)
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().expect("recorder poisoned").clear();
    }

    fn handler(&self, channel: Channel) -> Handler {
        let calls = Arc::clone(&self.calls);
        Arc::new(move |args: &[Arg]| {
            let message = match channel {
                Channel::Assert => {
                    if args.first().map(Arg::is_truthy).unwrap_or(false) {
                        return;
                    }
                    format_args_list(args.get(1..).unwrap_or_default())
                }
                Channel::Error | Channel::Warn => format_args_list(args),
            };
            calls
                .lock()
                .expect("recorder poisoned")
                .push(RecordedCall { channel, message });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_per_channel_in_order() {
        let recorder = Recorder::new();
        let console = recorder.console();

        console.error(&["one".into()]);
        console.warn(&["two %d".into(), 2.into()]);
        console.error(&["three".into()]);

        assert_eq!(recorder.messages(Channel::Error), vec!["one", "three"]);
        assert_eq!(recorder.messages(Channel::Warn), vec!["two 2"]);
        assert_eq!(recorder.calls().len(), 3);

        recorder.clear();
        assert!(recorder.calls().is_empty());
    }
}
