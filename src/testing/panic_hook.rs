//! Panic hook rendering unexpected diagnostics

use std::cell::Cell;
use std::sync::Once;

use crate::error::UnexpectedDiagnostic;

static PANIC_HOOK_INIT: Once = Once::new();

thread_local! {
    static QUIET_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Suppresses rendering while a failure is expected to be caught.
pub(super) struct QuietScope;

impl QuietScope {
    pub(super) fn enter() -> Self {
        QUIET_DEPTH.with(|depth| depth.set(depth.get() + 1));
        QuietScope
    }
}

impl Drop for QuietScope {
    fn drop(&mut self) {
        QUIET_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Install a panic hook that prints unexpected diagnostics with their chosen
/// stack instead of the generic panic report. Other panics go to the
/// previously installed hook.
pub fn install_panic_hook() {
    PANIC_HOOK_INIT.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            if let Some(failure) = panic_info.payload().downcast_ref::<UnexpectedDiagnostic>() {
                if QUIET_DEPTH.with(Cell::get) == 0 {
                    eprintln!("\n{}", failure.render());
                }
                return;
            }
            default_hook(panic_info);
        }));
    });
}
