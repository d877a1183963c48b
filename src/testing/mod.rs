//! Test-support helpers built on the interceptor.
//!
//! `InterceptGuard` ties interception to a scope (setup on construction,
//! teardown on drop), `Recorder` stands in for the stderr originals so tests
//! can observe forwarded calls, and `catch_unexpected` turns a raised
//! failure back into a value.

use std::panic::{self, AssertUnwindSafe};

use crate::error::UnexpectedDiagnostic;

mod guard;
mod panic_hook;
mod recorder;

pub use guard::InterceptGuard;
pub use panic_hook::install_panic_hook;
pub use recorder::{RecordedCall, Recorder};

/// Run `f`, returning the [`UnexpectedDiagnostic`] it raised, if any.
///
/// Panics that are not unexpected diagnostics continue unwinding.
pub fn catch_unexpected<F, R>(f: F) -> Result<R, UnexpectedDiagnostic>
where
    F: FnOnce() -> R,
{
    install_panic_hook();
    let result = {
        let _quiet = panic_hook::QuietScope::enter();
        panic::catch_unwind(AssertUnwindSafe(f))
    };
    match result {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<UnexpectedDiagnostic>() {
            Ok(failure) => Err(*failure),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

/// Install a `tracing` fmt subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call takes effect.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
