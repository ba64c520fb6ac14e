//! # verigraph Library
//!
//! Integrity checks and dependency graphs for versioned components.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Shared types and ambient errors
//! - [`logger`] - Structured logging setup
//! - [`component`] - Component ids, dependencies and the Version object
//! - [`validation`] - Checks a Version must pass before it is persisted
//! - [`graph`] - Transitive flattening with cycle detection
//! - [`manifest`] - Hoisting package dependencies to the workspace root
//! - [`resolver`] - Latest-version resolution
//! - [`tagging`] - Building validated Versions for a batch of components
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! verigraph_lib::main().unwrap();
//! ```

pub mod application;
pub mod component;
pub mod graph;
pub mod logger;
pub mod manifest;
pub mod primitives;
pub mod resolver;
pub mod tagging;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use component::{ComponentId, ComponentIdList, Version};
pub use graph::{DependencyGraph, IssueKind, IssueSuppressions};
pub use logger::Logger;
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};
pub use validation::{ValidationError, validate};

// Private imports for the main function
use anyhow::Result;
use application::{CliConfig, load_env_files};
use primitives::LogContext;

pub fn main() -> Result<()> {
    // 1. Env files first, clap reads VERIGRAPH_* while parsing
    load_env_files(&std::env::current_dir()?)?;
    let cli = CliConfig::load()?;

    // 2. Layer defaults, standard env vars and CLI
    let app_config = AppConfig::load(cli.app_config)?;

    // 3. Logging before anything else talks
    Logger::init(app_config.to_logger_config())?;
    let app_config = AppConfig::init_global(app_config)?.clone();

    let operation = cli.command.as_ref().map_or("help", Commands::name);
    let config = CliConfig {
        app_config,
        command: cli.command,
    };
    let mut stdout = std::io::stdout().lock();
    let result = execute_command(config, &mut stdout);
    if let Err(e) = &result {
        crate::log_error!(&format!("{:#}", e), LogContext::new(operation));
    }
    result
}
