//! Integration tests for logging system

use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use tracing::Level;

#[test]
fn test_logging_initializes_once_per_process() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(Level::DEBUG);

    init_logging(config.clone()).expect("first initialization succeeds");
    tracing::info!("logging initialized");

    // A second initialization must be rejected, not silently replace
    // the active subscriber.
    assert!(init_logging(config).is_err());
}

#[test]
fn test_format_selection() {
    // Debug builds should default to Pretty
    #[cfg(debug_assertions)]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
    }

    // Release builds should default to JSON
    #[cfg(not(debug_assertions))]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
    }
}

#[test]
fn test_filter_configuration() {
    let config = LoggingConfig::default().with_filter("core_rest=debug,core_catalog=trace");

    assert_eq!(
        config.filter,
        Some("core_rest=debug,core_catalog=trace".to_string())
    );
}

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(Level::WARN)
        .with_target(false);

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, Level::WARN);
    assert!(!config.display_target);
}
