#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use std::path::PathBuf;

use crate::core::ConfigProvider;
use crate::domain::model::{ParseErrorPolicy, RowNumbering};
use crate::domain::services::timestamp::DEFAULT_SHIFT_HOURS;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_PIPELINE_NAME: &str = "csv-normalizer";
pub const MAX_SHIFT_HOURS: i64 = 48;

/// Effective settings for one run: defaults, then the TOML file, then CLI
/// flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub name: String,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub shift_hours: i64,
    pub on_parse_error: ParseErrorPolicy,
    pub row_numbering: RowNumbering,
    pub monitor: bool,
    pub log_format: LogFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PIPELINE_NAME.to_string(),
            input: None,
            output: None,
            shift_hours: DEFAULT_SHIFT_HOURS,
            on_parse_error: ParseErrorPolicy::default(),
            row_numbering: RowNumbering::default(),
            monitor: false,
            log_format: LogFormat::default(),
        }
    }
}

impl RunConfig {
    /// Applies the values present in `file` on top of the defaults.
    pub fn from_toml(file: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            name: file
                .pipeline
                .as_ref()
                .and_then(|p| p.name.clone())
                .unwrap_or(defaults.name),
            input: file.io.as_ref().and_then(|io| io.input.clone()),
            output: file.io.as_ref().and_then(|io| io.output.clone()),
            shift_hours: file.shift_hours(),
            on_parse_error: file.parse_error_policy(),
            row_numbering: file.row_numbering(),
            monitor: file.monitoring_enabled(),
            log_format: file.log_format(),
        }
    }
}

impl ConfigProvider for RunConfig {
    fn shift_hours(&self) -> i64 {
        self.shift_hours
    }

    fn parse_error_policy(&self) -> ParseErrorPolicy {
        self.on_parse_error
    }

    fn row_numbering(&self) -> RowNumbering {
        self.row_numbering
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.name)?;
        validation::validate_range(
            "transform.shift_hours",
            self.shift_hours,
            -MAX_SHIFT_HOURS,
            MAX_SHIFT_HOURS,
        )?;
        if let Some(input) = &self.input {
            validation::validate_path("io.input", &input.to_string_lossy())?;
        }
        if let Some(output) = &self.output {
            validation::validate_path("io.output", &output.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stream_behaviour() {
        let config = RunConfig::default();
        assert_eq!(config.shift_hours(), 3);
        assert_eq!(config.parse_error_policy(), ParseErrorPolicy::Abort);
        assert_eq!(config.row_numbering(), RowNumbering::Line);
        assert!(config.input.is_none() && config.output.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pipeline_name_comes_from_file() {
        let file = TomlConfig::from_toml_str("[pipeline]\nname = \"nightly-clean\"\n").unwrap();
        assert_eq!(RunConfig::from_toml(&file).name, "nightly-clean");
    }

    #[test]
    fn test_shift_out_of_range_is_rejected() {
        let config = RunConfig {
            shift_hours: 100,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_overrides_defaults() {
        let file = TomlConfig::from_toml_str(
            r#"
[transform]
shift_hours = -5

[errors]
on_parse_error = "skip"
"#,
        )
        .unwrap();
        let config = RunConfig::from_toml(&file);
        assert_eq!(config.shift_hours, -5);
        assert_eq!(config.on_parse_error, ParseErrorPolicy::Skip);
        assert_eq!(config.row_numbering, RowNumbering::Line);
        assert_eq!(config.name, DEFAULT_PIPELINE_NAME);
    }
}
