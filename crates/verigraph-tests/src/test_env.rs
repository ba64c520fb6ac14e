//! Isolated workspace for running commands end to end

use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;
use verigraph_lib::application::Commands;
use verigraph_lib::application::commands::execute_command_with_config;
use verigraph_lib::application::config::AppConfig;
use verigraph_lib::graph::IssueKind;
use verigraph_lib::testing::TempDirFixture;

/// A temporary working directory plus the config commands run with
pub struct TestEnvironment {
    pub fixture: TempDirFixture,
    pub config: AppConfig,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let fixture = TempDirFixture::new().map_err(|e| anyhow::anyhow!("{}", e))?;
        let mut config = AppConfig {
            workdir: Some(fixture.path().to_path_buf()),
            ..AppConfig::default()
        };
        config.validate()?;
        Ok(Self { fixture, config })
    }

    pub fn ignoring(mut self, kind: IssueKind) -> Self {
        self.config.ignore_issues.push(kind);
        self
    }

    /// Write a JSON input and return its path relative to the workdir
    pub fn input(&self, name: &str, value: &Value) -> Result<PathBuf> {
        self.fixture
            .write_json(name, value)
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(PathBuf::from(name))
    }

    /// Run a command and capture its raw output
    pub fn run_raw(&self, command: Commands) -> Result<String> {
        let mut out = Vec::new();
        execute_command_with_config(command, &self.config, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    /// Run a command and parse its JSON output
    pub fn run(&self, command: Commands) -> Result<Value> {
        Ok(serde_json::from_str(&self.run_raw(command)?)?)
    }
}
