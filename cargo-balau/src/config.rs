//! Layered launcher configuration.
//!
//! Precedence, lowest first: built-in defaults, a TOML file, `BALAU_*`
//! environment variables, then command-line flags. The TOML file is the one
//! passed with `--config`, or `balau.toml` in the working directory when that
//! exists.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::env::{ENV_PREFIX, ListEnv};
use crate::error::RunnerError;

/// File consulted when no `--config` path is given.
pub const DEFAULT_CONFIG_FILE: &str = "balau.toml";

const LIST_KEYS: &[&str] = &["patterns"];

/// Settings controlling how the test application is found and run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Project build directory; defaults to Cargo's target directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<Utf8PathBuf>,
    /// CMake binary directory; defaults to `<build_dir>/cmake`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmake_dir: Option<Utf8PathBuf>,
    /// Report directory; defaults to `<cmake_dir>/unitTestReports`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<Utf8PathBuf>,
    /// Test application path relative to the CMake directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_path: Option<String>,
    /// Execution model passed to the application with `-e`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_model: Option<String>,
    /// Test name patterns; `*Test::*` when empty.
    pub patterns: Vec<String>,
    /// `LD_LIBRARY_PATH` for the application process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ld_library_path: Option<String>,
}

#[derive(Serialize)]
struct Overrides<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    build_dir: Option<&'a Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cmake_dir: Option<&'a Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_dir: Option<&'a Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    app_path: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    execution_model: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    patterns: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ld_library_path: Option<&'a String>,
}

impl<'a> From<&'a Args> for Overrides<'a> {
    fn from(args: &'a Args) -> Self {
        Self {
            build_dir: args.build_dir.as_ref(),
            cmake_dir: args.cmake_dir.as_ref(),
            report_dir: args.report_dir.as_ref(),
            app_path: args.app_path.as_ref(),
            execution_model: args.execution_model.as_ref(),
            patterns: (!args.patterns.is_empty()).then_some(args.patterns.as_slice()),
            ld_library_path: args.ld_library_path.as_ref(),
        }
    }
}

/// Merges every configuration layer for `args`.
///
/// # Errors
///
/// Returns [`RunnerError::ConfigNotFound`] when `--config` names a missing
/// file, or [`RunnerError::Config`] when a layer cannot be parsed.
pub fn load(args: &Args) -> Result<RunnerConfig, RunnerError> {
    let file = match &args.config_path {
        Some(path) if path.is_file() => Some(path.clone()),
        Some(path) => return Err(RunnerError::ConfigNotFound(path.clone())),
        None => {
            let fallback = Utf8PathBuf::from(DEFAULT_CONFIG_FILE);
            fallback.is_file().then_some(fallback)
        }
    };
    if let Some(path) = &file {
        tracing::debug!(config = %path, "reading configuration file");
    }
    merge(file.as_deref(), args)
}

fn merge(file: Option<&Utf8Path>, args: &Args) -> Result<RunnerConfig, RunnerError> {
    let mut figment = Figment::from(Serialized::defaults(RunnerConfig::default()));
    if let Some(path) = file {
        figment = figment.merge(Toml::file_exact(path.as_std_path()));
    }
    let config = figment
        .merge(ListEnv::prefixed(ENV_PREFIX, LIST_KEYS))
        .merge(Serialized::defaults(Overrides::from(args)))
        .extract::<RunnerConfig>()?;
    Ok(config)
}
