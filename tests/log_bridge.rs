//! Integration tests for the `log` bridge
//!
//! The bridge is registered once for this test binary; tests serialize on
//! `CONSOLE_LOCK` because they share the process-wide console.

use std::sync::{Mutex, MutexGuard, Once};

use diagnostic_interceptor::bridge::install_log_bridge;
use diagnostic_interceptor::{
    catch_unexpected, install_error, install_warn, restore_error, restore_warn, Channel,
    InterceptOptions,
};
use log::LevelFilter;

static CONSOLE_LOCK: Mutex<()> = Mutex::new(());
static BRIDGE: Once = Once::new();

fn setup() -> MutexGuard<'static, ()> {
    BRIDGE.call_once(|| install_log_bridge(LevelFilter::Info).expect("logger already set"));
    CONSOLE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[test]
fn test_log_error_raises_when_intercepted() {
    let _lock = setup();
    install_error(InterceptOptions::default());

    let failure = catch_unexpected(|| log::error!("failed to open {}", "db.sqlite")).unwrap_err();
    assert_eq!(failure.channel(), Channel::Error);
    assert_eq!(failure.message(), "failed to open db.sqlite");

    restore_error();
    catch_unexpected(|| log::error!("printed only")).unwrap();
}

#[test]
fn test_log_warn_respects_ignore_list() {
    let _lock = setup();
    install_warn(InterceptOptions::new().ignore("retrying"));

    catch_unexpected(|| log::warn!("retrying request 1/3")).unwrap();
    assert!(catch_unexpected(|| log::warn!("giving up")).is_err());

    restore_warn();
}

#[test]
fn test_info_never_intercepted() {
    let _lock = setup();
    install_error(InterceptOptions::default());
    install_warn(InterceptOptions::default());

    catch_unexpected(|| log::info!("starting")).unwrap();

    restore_error();
    restore_warn();
}

#[test]
fn test_tracing_without_subscriber_reaches_bridge() {
    let _lock = setup();
    install_warn(InterceptOptions::default());

    let failure = catch_unexpected(|| tracing::warn!("queue almost full")).unwrap_err();
    assert!(failure.message().contains("queue almost full"));

    restore_warn();
}
