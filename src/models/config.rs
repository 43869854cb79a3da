use std::path::PathBuf;

use crate::utils::report_file_name;

/// Locations of the external benchmark suite, scoped to one invocation.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// CMake binary directory the benchmark preset builds into.
    pub build_dir: PathBuf,
    /// Compiled benchmark executable.
    pub executable: PathBuf,
    /// CMake workflow preset that builds the suite.
    pub preset: String,
    /// Directory XML reports are written to.
    pub reports_dir: PathBuf,
}

impl Default for ToolConfig {
    fn default() -> Self {
        let build_dir = PathBuf::from("build/benchmark");
        Self {
            executable: build_dir.join("benchmark_tests"),
            reports_dir: build_dir.join("reports"),
            preset: "benchmark".to_string(),
            build_dir,
        }
    }
}

impl ToolConfig {
    /// Report destination for a benchmark name.
    pub fn report_path(&self, name: &str) -> PathBuf {
        self.reports_dir.join(report_file_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_share_build_dir() {
        let config = ToolConfig::default();
        assert_eq!(config.executable, config.build_dir.join("benchmark_tests"));
        assert_eq!(config.reports_dir, config.build_dir.join("reports"));
        assert_eq!(config.preset, "benchmark");
    }

    #[test]
    fn test_report_path_derives_from_name() {
        let config = ToolConfig::default();
        let path = config.report_path("integral: to_chars benchmark");
        assert_eq!(
            path,
            config.reports_dir.join("integral_to_chars_benchmark.xml")
        );
    }
}
