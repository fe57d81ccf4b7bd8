use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::core::ConfigProvider;
use crate::domain::model::{ParseErrorPolicy, RowNumbering};
use crate::domain::services::timestamp::DEFAULT_SHIFT_HOURS;
use crate::utils::error::{EtlError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};

lazy_static! {
    static ref ENV_VAR_RE: Regex = Regex::new(r"\$\{([^}]+)\}").unwrap();
}

/// Optional configuration file. Every section may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub pipeline: Option<PipelineConfig>,
    pub io: Option<IoConfig>,
    pub transform: Option<TransformConfig>,
    pub errors: Option<ErrorHandlingConfig>,
    pub diagnostics: Option<DiagnosticsConfig>,
    pub monitoring: Option<MonitoringConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransformConfig {
    pub shift_hours: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_parse_error: Option<ParseErrorPolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagnosticsConfig {
    pub row_numbering: Option<RowNumbering>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn shift_hours(&self) -> i64 {
        self.transform
            .as_ref()
            .and_then(|t| t.shift_hours)
            .unwrap_or(DEFAULT_SHIFT_HOURS)
    }

    fn parse_error_policy(&self) -> ParseErrorPolicy {
        self.errors
            .as_ref()
            .and_then(|e| e.on_parse_error)
            .unwrap_or_default()
    }

    fn row_numbering(&self) -> RowNumbering {
        self.diagnostics
            .as_ref()
            .and_then(|d| d.row_numbering)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(name) = self.pipeline.as_ref().and_then(|p| p.name.as_deref()) {
            validation::validate_non_empty_string("pipeline.name", name)?;
        }
        validation::validate_range(
            "transform.shift_hours",
            self.shift_hours(),
            -super::MAX_SHIFT_HOURS,
            super::MAX_SHIFT_HOURS,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.shift_hours(), 3);
        assert_eq!(config.parse_error_policy(), ParseErrorPolicy::Abort);
        assert_eq!(config.row_numbering(), RowNumbering::Line);
        assert!(!config.monitoring_enabled());
        assert_eq!(config.log_format(), LogFormat::Compact);
    }

    #[test]
    fn test_full_file() {
        let config = TomlConfig::from_toml_str(
            r#"
[pipeline]
name = "nightly-clean"

[io]
input = "in/export.csv"
output = "out/clean.csv"

[transform]
shift_hours = 0

[errors]
on_parse_error = "skip"

[diagnostics]
row_numbering = "legacy"

[monitoring]
enabled = true

[logging]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.shift_hours(), 0);
        assert_eq!(config.parse_error_policy(), ParseErrorPolicy::Skip);
        assert_eq!(config.row_numbering(), RowNumbering::Legacy);
        assert!(config.monitoring_enabled());
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(
            config.io.unwrap().output.unwrap(),
            PathBuf::from("out/clean.csv")
        );
    }

    #[test]
    fn test_unknown_enum_value_is_config_error() {
        let err = TomlConfig::from_toml_str("[errors]\non_parse_error = \"ignore\"\n").unwrap_err();
        assert!(matches!(err, EtlError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CSV_NORMALIZER_TEST_OUT", "/tmp/normalized.csv");
        let config =
            TomlConfig::from_toml_str("[io]\noutput = \"${CSV_NORMALIZER_TEST_OUT}\"\n").unwrap();
        assert_eq!(
            config.io.unwrap().output.unwrap(),
            PathBuf::from("/tmp/normalized.csv")
        );
    }

    #[test]
    fn test_undefined_env_var_is_left_alone() {
        let config =
            TomlConfig::from_toml_str("[pipeline]\nname = \"${CSV_NORMALIZER_UNSET_VAR}\"\n")
                .unwrap();
        assert_eq!(
            config.pipeline.unwrap().name.unwrap(),
            "${CSV_NORMALIZER_UNSET_VAR}"
        );
    }

    #[test]
    fn test_validate_rejects_large_shift() {
        let config = TomlConfig::from_toml_str("[transform]\nshift_hours = 72\n").unwrap();
        assert!(config.validate().is_err());
    }
}
