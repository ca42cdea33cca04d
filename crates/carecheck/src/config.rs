//! Fixed file locations and the one environment override.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{CarecheckError, Result};

/// Environment variable overriding the file the validation step reads.
pub const CLEAN_PATH_ENV: &str = "CLEAN_PATH";

/// Raw extract, relative to the project root.
pub const RAW_FILE: &str = "data/raw/raw_hospital_data.csv";
/// Canonical output, relative to the project root.
pub const CLEAN_FILE: &str = "data/processed/hospital_clean.csv";
/// Validation report, relative to the project root.
pub const VALIDATION_REPORT_FILE: &str = "reports/validation_report.txt";
/// Profile summary, relative to the project root.
pub const PROFILE_REPORT_FILE: &str = "reports/profile_summary.txt";
/// Change report, relative to the project root.
pub const CHANGE_REPORT_FILE: &str = "reports/change_report.txt";

/// Where every pipeline step reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Project root the fixed paths hang off.
    pub root: PathBuf,
    /// Raw extract.
    pub raw_path: PathBuf,
    /// Where the cleaner writes the canonical table.
    pub clean_path: PathBuf,
    /// What the validator reads. Equals `clean_path` unless overridden.
    pub validation_input: PathBuf,
    pub validation_report_path: PathBuf,
    pub profile_report_path: PathBuf,
    pub change_report_path: PathBuf,
}

impl PipelineConfig {
    /// Fixed layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let clean_path = root.join(CLEAN_FILE);
        Self {
            raw_path: root.join(RAW_FILE),
            validation_input: clean_path.clone(),
            clean_path,
            validation_report_path: root.join(VALIDATION_REPORT_FILE),
            profile_report_path: root.join(PROFILE_REPORT_FILE),
            change_report_path: root.join(CHANGE_REPORT_FILE),
            root,
        }
    }

    /// Fixed layout plus the `CLEAN_PATH` override from the process environment.
    pub fn from_env(root: impl Into<PathBuf>) -> Result<Self> {
        Self::from_lookup(root, |key| std::env::var_os(key))
    }

    /// Fixed layout plus overrides from an arbitrary variable lookup.
    pub fn from_lookup(
        root: impl Into<PathBuf>,
        lookup: impl Fn(&str) -> Option<OsString>,
    ) -> Result<Self> {
        let config = Self::new(root);
        match lookup(CLEAN_PATH_ENV) {
            None => Ok(config),
            Some(value) if value.is_empty() => Err(CarecheckError::Config(format!(
                "{CLEAN_PATH_ENV} is set but empty"
            ))),
            Some(value) => Ok(config.with_validation_input(PathBuf::from(value))),
        }
    }

    /// Point the validator at a different file.
    pub fn with_validation_input(mut self, path: impl AsRef<Path>) -> Self {
        self.validation_input = path.as_ref().to_path_buf();
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_layout() {
        let config = PipelineConfig::new("/srv/etl");
        assert_eq!(config.raw_path, Path::new("/srv/etl/data/raw/raw_hospital_data.csv"));
        assert_eq!(config.validation_input, config.clean_path);
        assert_eq!(
            config.validation_report_path,
            Path::new("/srv/etl/reports/validation_report.txt")
        );
    }

    #[test]
    fn test_override_only_moves_validation_input() {
        let config = PipelineConfig::from_lookup("/srv/etl", |key| {
            (key == CLEAN_PATH_ENV).then(|| OsString::from("/tmp/other.csv"))
        })
        .unwrap();

        assert_eq!(config.validation_input, Path::new("/tmp/other.csv"));
        assert_eq!(
            config.clean_path,
            Path::new("/srv/etl/data/processed/hospital_clean.csv")
        );
    }

    #[test]
    fn test_empty_override_is_rejected() {
        let result = PipelineConfig::from_lookup(".", |_| Some(OsString::new()));
        assert!(matches!(result, Err(CarecheckError::Config(_))));
    }
}
