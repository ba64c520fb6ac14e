//! Configuration loading and global state management
//!
//! Coordinates loading configuration from various sources and provides
//! global application configuration access.

use crate::primitives::ConfigError;
use std::path::Path;
use std::sync::OnceLock;

use super::{config::AppConfig, env::EnvironmentConfig};

// Global configuration available throughout the application
static GLOBAL_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Env files read before the environment, most specific first
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Read env files in `dir` into the process environment. Missing files are
/// skipped; variables that are already set are kept.
pub fn load_env_files(dir: &Path) -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        let path = dir.join(env_file);
        if let Err(e) = dotenvy::from_path(&path) {
            if !e.not_found() {
                return Err(ConfigError::EnvFileError {
                    file: path.display().to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

impl AppConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    ///
    /// `cli` is the already parsed command line; clap reads the
    /// `VERIGRAPH_*` variables itself, so env files must be loaded before
    /// the command line is parsed.
    pub fn load(cli: AppConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let env_config = EnvironmentConfig::load()?;
        config.color = env_config.apply_color_config(config.color);

        config = config.merge_with(cli);
        config.validate()?;

        Ok(config)
    }

    /// Initialize global configuration (call once in main)
    pub fn init_global(config: AppConfig) -> Result<&'static AppConfig, ConfigError> {
        GLOBAL_CONFIG
            .set(config)
            .map_err(|_| ConfigError::AlreadyInitialized)?;
        GLOBAL_CONFIG.get().ok_or(ConfigError::AlreadyInitialized)
    }

    /// Get global configuration reference, if initialized
    pub fn global() -> Option<&'static AppConfig> {
        GLOBAL_CONFIG.get()
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
