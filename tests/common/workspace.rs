//! Isolated config, cache and region table for running the binary

#![allow(dead_code)]

use super::fixtures::REGION_CSV;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Nothing listens on the discard port, so every catalog call fails fast
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

pub struct TestWorkspace {
    pub dir: TempDir,
    pub region_table: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let region_table = dir.path().join("region_codes.csv");
        fs::write(&region_table, REGION_CSV)?;
        Ok(Self { dir, region_table })
    }

    /// Command for the binary with XDG directories inside the workspace
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("forecast-navigator")?;
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_CACHE_HOME", self.dir.path().join("cache"))
            .env("HOME", self.dir.path())
            .env("NO_COLOR", "1")
            .env("FORECAST_API_BASE_URL", UNREACHABLE_API)
            .env("FORECAST_REGION_TABLE", &self.region_table)
            .env_remove("RUST_LOG");
        Ok(cmd)
    }

    /// Run a subcommand that must succeed
    pub fn run_ok(&self, args: &[&str]) -> anyhow::Result<()> {
        self.command()?.args(args).assert().success();
        Ok(())
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.dir.path().join("cache").join("forecast-navigator")
    }
}
