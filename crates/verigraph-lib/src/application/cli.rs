use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::AppConfig;

/// verigraph CLI - component version integrity and dependency graphs
#[derive(Debug, Clone, Parser)]
#[command(name = "verigraph")]
#[command(about = "Validate component versions and flatten their dependency graphs")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// verigraph commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        let cli = Cli::parse();
        Ok(Self {
            app_config: cli.config,
            command: cli.command,
        })
    }
}

/// Available verigraph commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a Version object before it is persisted
    Validate {
        #[arg(value_name = "VERSION_JSON", help = "Path to the Version JSON")]
        version_json: PathBuf,

        #[arg(long, help = "Id the Version is saved under, e.g. scope/name@1.0.0")]
        owner: Option<String>,
    },

    /// Flatten a component graph and report its issues
    Flatten {
        #[arg(help = "Path to the graph JSON (a list of components with their dependencies)")]
        graph: PathBuf,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Only flatten these component ids"
        )]
        components: Vec<String>,
    },

    /// Hoist shared package dependencies to the workspace root
    Dedupe {
        #[arg(help = "Path to the component manifests JSON")]
        manifests: PathBuf,

        #[arg(long, help = "Path to the root manifest JSON merged into the result")]
        root: Option<PathBuf>,
    },

    /// Resolve a versionless id to its latest known version
    Latest {
        #[arg(help = "Path to the known ids JSON")]
        ids: PathBuf,

        #[arg(help = "Component id to resolve")]
        id: String,
    },

    /// Build, flatten and validate the Versions of a batch of components
    Tag {
        #[arg(help = "Path to the tag request JSON")]
        request: PathBuf,
    },

    /// Show version information
    Version,
}

impl Commands {
    /// Whether flattening issues can block the command
    pub fn checks_issues(&self) -> bool {
        matches!(self, Commands::Flatten { .. } | Commands::Tag { .. })
    }

    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Validate { .. } => "validate",
            Commands::Flatten { .. } => "flatten",
            Commands::Dedupe { .. } => "dedupe",
            Commands::Latest { .. } => "latest",
            Commands::Tag { .. } => "tag",
            Commands::Version => "version",
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
