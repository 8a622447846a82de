//! Command line assembled for the test application.

use std::process::Command;

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::fs_helpers::absolute;
use crate::locate::AppLocation;

/// Execution model used when none is configured.
pub const DEFAULT_EXECUTION_MODEL: &str = "SingleThreaded";

/// Pattern used when none is configured; selects unit test groups only.
pub const DEFAULT_PATTERN: &str = "*Test::*";

/// Report directory name under the CMake directory.
pub const DEFAULT_REPORT_DIR: &str = "unitTestReports";

/// Everything needed to start the test application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    /// Executable to launch.
    pub program: Utf8PathBuf,
    /// Arguments passed after the program name.
    pub args: Vec<String>,
    /// Working directory of the child process.
    pub working_dir: Utf8PathBuf,
    /// Value for `LD_LIBRARY_PATH`, when one should be set.
    pub ld_library_path: Option<String>,
}

impl RunPlan {
    /// Builds the plan for `location` from the merged configuration.
    ///
    /// The arguments are `-e <model> -r <report-dir>` followed by each
    /// trimmed pattern, or `*Test::*` when no patterns are configured.
    ///
    /// # Errors
    ///
    /// Returns an error when the report directory cannot be made absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use cargo_balau::config::RunnerConfig;
    /// use cargo_balau::locate::AppLocation;
    /// use cargo_balau::plan::RunPlan;
    ///
    /// let location = AppLocation {
    ///     directory: "/build/cmake/bin".into(),
    ///     name: "Tests".to_owned(),
    /// };
    /// let plan = RunPlan::new(&RunnerConfig::default(), camino::Utf8Path::new("/build/cmake"), &location)?;
    /// assert_eq!(
    ///     plan.args,
    ///     ["-e", "SingleThreaded", "-r", "/build/cmake/unitTestReports", "*Test::*"]
    /// );
    /// # Ok::<(), cargo_balau::error::RunnerError>(())
    /// ```
    pub fn new(
        config: &RunnerConfig,
        cmake_dir: &Utf8Path,
        location: &AppLocation,
    ) -> Result<Self, RunnerError> {
        let report_dir = match &config.report_dir {
            Some(dir) => absolute(dir)?,
            None => absolute(&cmake_dir.join(DEFAULT_REPORT_DIR))?,
        };

        let mut args = vec![
            String::from("-e"),
            execution_model(config).to_owned(),
            String::from("-r"),
            report_dir.into_string(),
        ];
        let patterns: Vec<String> = config
            .patterns
            .iter()
            .map(|pattern| pattern.trim().to_owned())
            .collect();
        if patterns.is_empty() {
            args.push(DEFAULT_PATTERN.to_owned());
        } else {
            args.extend(patterns);
        }

        Ok(Self {
            program: location.executable(),
            args,
            working_dir: location.directory.clone(),
            ld_library_path: config
                .ld_library_path
                .as_ref()
                .filter(|paths| !paths.is_empty())
                .cloned(),
        })
    }

    /// Creates the [`Command`] described by this plan.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.program.as_std_path());
        command
            .args(&self.args)
            .current_dir(self.working_dir.as_std_path());
        if let Some(paths) = &self.ld_library_path {
            command.env("LD_LIBRARY_PATH", paths);
        }
        command
    }
}

/// Returns the trimmed configured execution model, or `SingleThreaded`.
#[must_use]
pub fn execution_model(config: &RunnerConfig) -> &str {
    config
        .execution_model
        .as_deref()
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .unwrap_or(DEFAULT_EXECUTION_MODEL)
}
