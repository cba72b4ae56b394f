use ctrlsched::cli::LogLevel;
use ctrlsched::logging::resolve_level;

#[test]
fn cli_flag_beats_environment() {
    assert_eq!(
        resolve_level(Some(LogLevel::Debug), Some("error")),
        tracing::Level::DEBUG
    );
}

#[test]
fn environment_is_used_when_flag_missing() {
    assert_eq!(resolve_level(None, Some("warning")), tracing::Level::WARN);
    assert_eq!(resolve_level(None, Some(" TRACE ")), tracing::Level::TRACE);
}

#[test]
fn defaults_to_info() {
    assert_eq!(resolve_level(None, None), tracing::Level::INFO);
    assert_eq!(resolve_level(None, Some("loud")), tracing::Level::INFO);
}
