//! Routes `log` and `tracing` output into the console channels.
//!
//! Rust code rarely calls a console directly; it reports problems through
//! `log::error!`/`tracing::warn!` and friends. The bridges forward error and
//! warning level output to the matching channel so interception applies to it.

mod log_bridge;
mod tracing_layer;

pub use log_bridge::{install_log_bridge, LogBridge};
pub use tracing_layer::TracingBridge;

/// Records emitted by this crate never re-enter the channels.
fn is_own_target(target: &str) -> bool {
    target == env!("CARGO_CRATE_NAME")
        || target
            .strip_prefix(env!("CARGO_CRATE_NAME"))
            .map(|rest| rest.starts_with("::"))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_targets() {
        assert!(is_own_target("diagnostic_interceptor"));
        assert!(is_own_target("diagnostic_interceptor::console"));
        assert!(!is_own_target("diagnostic_interceptor_ext"));
        assert!(!is_own_target("my_app"));
    }
}
