use super::*;
use crate::console::ChannelState;
use crate::testing::{catch_unexpected, Recorder};
use pretty_assertions::assert_eq;

#[test]
fn format_message_without_rules_never_suppresses() {
    let formatted = format_message(&InterceptOptions::default(), &["x=%d".into(), 5.into()]);
    assert_eq!(
        formatted,
        FormattedMessage {
            should_not_throw: false,
            message: "x=5".to_string(),
        }
    );
}

#[test]
fn substring_and_pattern_rules() {
    let options = InterceptOptions::new()
        .ignore("deprecated")
        .ignore_pattern(r"^Warning: \w+ prop")
        .unwrap();

    assert!(format_message(&options, &["this API is deprecated".into()]).should_not_throw);
    assert!(format_message(&options, &["Warning: unknown prop `x`".into()]).should_not_throw);
    assert!(!format_message(&options, &["prefix Warning: unknown prop".into()]).should_not_throw);
    assert!(!format_message(&options, &["something else".into()]).should_not_throw);
}

#[test]
fn pattern_rule_matches_anywhere() {
    let options = InterceptOptions::new().ignore_pattern("act\\(").unwrap();
    assert!(
        format_message(&options, &["update was not wrapped in act(...)".into()]).should_not_throw
    );
}

#[test]
fn invalid_pattern_is_config_error() {
    let err = InterceptOptions::new().ignore_pattern("(").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "("));
}

#[test]
fn error_channel_raises_formatted_message() {
    let console = Recorder::new().console();
    console.install(Channel::Error, InterceptOptions::default());

    let failure = catch_unexpected(|| console.error(&["x=%d".into(), 5.into()])).unwrap_err();
    assert_eq!(failure.channel(), Channel::Error);
    assert_eq!(failure.message(), "x=5");
}

#[test]
fn suppressed_error_is_forwarded_to_original() {
    let recorder = Recorder::new();
    let console = recorder.console();
    console.install(Channel::Error, InterceptOptions::new().ignore("x="));

    catch_unexpected(|| console.error(&["x=%d".into(), 5.into()])).unwrap();
    assert_eq!(recorder.messages(Channel::Error), vec!["x=5"]);
}

#[test]
fn warn_channel_mirrors_error_channel() {
    let recorder = Recorder::new();
    let console = recorder.console();
    console.install(Channel::Warn, InterceptOptions::new().ignore("known"));

    catch_unexpected(|| console.warn(&["known issue".into()])).unwrap();
    let failure = catch_unexpected(|| console.warn(&["new issue".into()])).unwrap_err();

    assert_eq!(failure.channel(), Channel::Warn);
    assert_eq!(failure.message(), "new issue");
    assert_eq!(recorder.messages(Channel::Warn), vec!["known issue"]);
}

#[test]
fn passing_assertion_never_raises_or_logs() {
    let recorder = Recorder::new();
    let console = recorder.console();
    console.install(Channel::Assert, InterceptOptions::default());

    catch_unexpected(|| console.assert(&[true.into(), "msg".into()])).unwrap();
    assert!(recorder.messages(Channel::Assert).is_empty());
}

#[test]
fn failing_assertion_raises_message() {
    let console = Recorder::new().console();
    console.install(Channel::Assert, InterceptOptions::default());

    let failure = catch_unexpected(|| console.assert(&[false.into(), "boom".into()])).unwrap_err();
    assert_eq!(failure.channel(), Channel::Assert);
    assert_eq!(failure.message(), "boom");
}

#[test]
fn suppressed_assertion_is_dropped_not_forwarded() {
    let recorder = Recorder::new();
    let console = recorder.console();
    console.install(Channel::Assert, InterceptOptions::new().ignore("boom"));

    catch_unexpected(|| console.assert(&[false.into(), "boom".into()])).unwrap();
    assert!(recorder.messages(Channel::Assert).is_empty());
    assert_eq!(console.state(Channel::Assert), ChannelState::Intercepted);
}

#[test]
fn assertion_without_condition_fails() {
    let console = Recorder::new().console();
    console.install(Channel::Assert, InterceptOptions::default());

    let failure = catch_unexpected(|| console.assert(&[])).unwrap_err();
    assert_eq!(failure.message(), "");
}

#[test]
fn raised_message_marks_annotator_frames() {
    let console = Recorder::new().console();
    console.install(Channel::Error, InterceptOptions::default());

    let text = "Warning: Each child needs a key\n    at Foo (/path/file.ts:10:5)\n    in Bar";
    let failure = catch_unexpected(|| console.error(&[text.into()])).unwrap_err();
    assert_eq!(
        failure.message(),
        "Warning: Each child needs a key\n    at Foo (/path/file.ts:10:5).\n    in Bar"
    );
}

#[test]
fn ignore_rules_see_unmarked_message() {
    let options = InterceptOptions::new()
        .ignore_pattern(r"\(/path/file\.ts:10:5\)$")
        .unwrap();
    let console = Recorder::new().console();
    console.install(Channel::Error, options);

    let text = "oops\n    at Foo (/path/file.ts:10:5)";
    assert!(catch_unexpected(|| console.error(&[text.into()])).is_ok());
}

#[test]
fn truncated_stack_omits_interception_frames() {
    let console = Recorder::new().console();
    console.install(Channel::Error, InterceptOptions::default());

    let failure = catch_unexpected(|| console.error(&["boom".into()])).unwrap_err();
    assert!(!failure.stack().contains(Channel::Error.entry_point()));
    assert!(!failure
        .stack()
        .contains("diagnostic_interceptor::interceptor::raise"));
}

#[test]
fn full_stack_keeps_interception_frames() {
    let console = Recorder::new().console();
    console.install(
        Channel::Error,
        InterceptOptions::default().with_full_stack_trace(true),
    );

    let failure = catch_unexpected(|| console.error(&["boom".into()])).unwrap_err();
    assert!(failure.stack().contains(Channel::Error.entry_point()));
}
