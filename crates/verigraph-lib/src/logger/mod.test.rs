use super::*;

#[test]
fn test_log_context_creation() {
    let context = LogContext::new("flatten");
    assert_eq!(context.operation, "flatten");
    assert_eq!(context.items, None);
}

#[test]
fn test_log_context_with_items() {
    let context = LogContext::new("tag").with_items(10);
    assert_eq!(context.items, Some(10));
}

#[test]
fn test_logging_with_context() {
    crate::log_info!("tagged", LogContext::new("tag").with_items(2));
    crate::log_error!("failed", LogContext::new("flatten"));
}

#[test]
fn test_filter_directives_scope_verigraph_targets() {
    assert_eq!(Logger::filter_directives(LogLevel::Debug), "warn,verigraph=debug");
    assert_eq!(Logger::filter_directives(LogLevel::Error), "warn,verigraph=error");
}

#[test]
fn test_second_init_is_rejected() {
    let config = || LoggerConfig {
        level: LogLevel::Error,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        color: false,
    };
    let first = Logger::init(config());
    assert_eq!(first.is_ok(), Logger::is_initialized());
    assert!(Logger::init(config()).is_err());
}
