use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::models::{AppError, AppResult, ToolConfig};

/// Samples per benchmark; matches what the suite needs for stable means.
const BENCHMARK_SAMPLES: &str = "40";

/// True when the report must be (re)produced before plotting.
pub fn needs_run(report: &Path, rerun: bool) -> bool {
    rerun || !report.exists()
}

pub struct BenchmarkRunner {
    config: ToolConfig,
}

impl BenchmarkRunner {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Builds the benchmark suite, then runs the named benchmark, leaving
    /// its XML report at `report`. Any non-success exit is fatal.
    pub fn ensure_report(&self, name: &str, report: &Path) -> AppResult<()> {
        self.build()?;
        self.run(name, report)
    }

    fn build(&self) -> AppResult<()> {
        info!(preset = %self.config.preset, "building benchmark suite");
        let status = Command::new("cmake")
            .args(["--workflow", "--preset"])
            .arg(&self.config.preset)
            .status()?;
        if !status.success() {
            return Err(AppError::CommandFailed {
                program: "cmake".to_string(),
                status,
            });
        }
        Ok(())
    }

    fn run(&self, name: &str, report: &Path) -> AppResult<()> {
        if let Some(parent) = report.parent() {
            fs::create_dir_all(parent)?;
        }
        info!(
            executable = %self.config.executable.display(),
            benchmark = name,
            report = %report.display(),
            "running benchmark"
        );
        let status = Command::new(&self.config.executable)
            .arg(name)
            .args(["--reporter", "xml", "--benchmark-samples", BENCHMARK_SAMPLES])
            .arg("--out")
            .arg(report)
            .status()?;
        if !status.success() {
            return Err(AppError::CommandFailed {
                program: self.config.executable.display().to_string(),
                status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_report_needs_run() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("missing.xml");
        assert!(needs_run(&report, false));
    }

    #[test]
    fn test_cached_report_skips_run() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("cached.xml");
        fs::write(&report, "<Catch2TestRun/>").unwrap();
        assert!(!needs_run(&report, false));
    }

    #[test]
    fn test_rerun_flag_overrides_cache() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("cached.xml");
        fs::write(&report, "<Catch2TestRun/>").unwrap();
        assert!(needs_run(&report, true));
    }
}
