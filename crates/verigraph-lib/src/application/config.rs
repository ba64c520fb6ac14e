//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::graph::{IssueKind, IssueSuppressions};
use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Directory relative input paths are resolved against
    #[arg(short, long, global = true, env = "VERIGRAPH_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, global = true, env = "VERIGRAPH_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, global = true, env = "VERIGRAPH_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, global = true, env = "VERIGRAPH_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, global = true, env = "VERIGRAPH_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,

    /// Issue kinds that do not block flatten and tag
    #[arg(
        long,
        global = true,
        env = "VERIGRAPH_IGNORE_ISSUES",
        value_enum,
        value_delimiter = ','
    )]
    #[serde(default)]
    pub ignore_issues: Vec<IssueKind>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
            ignore_issues: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig, resolving color against the chosen stream
    pub fn to_logger_config(&self) -> LoggerConfig {
        let is_terminal = match self.log_output {
            LogOutput::Stderr => std::io::stderr().is_terminal(),
            LogOutput::Stdout => std::io::stdout().is_terminal(),
        };
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color.resolve(is_terminal),
        }
    }

    pub fn issue_suppressions(&self) -> IssueSuppressions {
        self.ignore_issues.iter().copied().collect()
    }

    /// Resolve `path` against the working directory
    pub fn resolve_path(&self, path: &std::path::Path) -> PathBuf {
        match &self.workdir {
            Some(workdir) if path.is_relative() => workdir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.workdir.is_some() {
            self.workdir = other.workdir;
        }

        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        if !other.ignore_issues.is_empty() {
            self.ignore_issues = other.ignore_issues;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        match &self.workdir {
            None => {
                self.workdir = Some(std::env::current_dir()?);
            }
            Some(workdir) if !workdir.is_dir() => {
                return Err(ConfigError::InvalidWorkDir {
                    path: workdir.display().to_string(),
                });
            }
            Some(_) => {}
        }

        self.ignore_issues.sort();
        self.ignore_issues.dedup();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
