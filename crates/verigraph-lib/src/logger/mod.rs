use crate::primitives::*;
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global logger instance - ensures single initialization
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Logger implementation using tracing
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Self::filter_directives(config.level)));

        let fmt_layer = match (config.output, config.format) {
            (LogOutput::Stderr, LogFormat::Text) => fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.color)
                .compact()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Json) => fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Yaml) => fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.color)
                .pretty()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Text) => fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(config.color)
                .compact()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Json) => fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Yaml) => fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(config.color)
                .pretty()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        let logger = GLOBAL_LOGGER.get_or_init(|| Logger {
            level: config.level,
        });

        tracing::debug!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            color = config.color,
            "Logger initialized"
        );

        Ok(logger)
    }

    /// Filter used when `RUST_LOG` is not set: verigraph at the configured
    /// level, everything else at warn
    pub fn filter_directives(level: LogLevel) -> String {
        format!("warn,verigraph={}", level.as_filter_directive())
    }

    /// Get reference to the global logger instance
    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Log an error message with optional context
    pub fn error(&self, message: &str, context: Option<LogContext>) {
        if let Some(ctx) = context {
            tracing::error!(
                operation = %ctx.operation,
                items = ctx.items,
                "{}", message
            );
        } else {
            tracing::error!("{}", message);
        }
    }

    /// Log an info message with optional context
    pub fn info(&self, message: &str, context: Option<LogContext>) {
        if let Some(ctx) = context {
            tracing::info!(
                operation = %ctx.operation,
                items = ctx.items,
                "{}", message
            );
        } else {
            tracing::info!("{}", message);
        }
    }
}

/// Log through the global logger if available, fall back to tracing
#[macro_export]
macro_rules! log_error {
    ($msg:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.error($msg, None);
        } else {
            tracing::error!("{}", $msg);
        }
    };
    ($msg:expr, $ctx:expr) => {{
        let ctx: $crate::primitives::LogContext = $ctx;
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.error($msg, Some(ctx));
        } else {
            tracing::error!(operation = %ctx.operation, items = ctx.items, "{}", $msg);
        }
    }};
}

#[macro_export]
macro_rules! log_info {
    ($msg:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.info($msg, None);
        } else {
            tracing::info!("{}", $msg);
        }
    };
    ($msg:expr, $ctx:expr) => {{
        let ctx: $crate::primitives::LogContext = $ctx;
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.info($msg, Some(ctx));
        } else {
            tracing::info!(operation = %ctx.operation, items = ctx.items, "{}", $msg);
        }
    }};
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
