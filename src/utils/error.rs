use thiserror::Error;

use crate::domain::services::ConversionError;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed string: please double check that the header contains only valid UTF-8 characters")]
    MalformedHeaderError,

    #[error("Unable to convert row {row}: {source}")]
    ConversionFailed {
        row: usize,
        #[source]
        source: ConversionError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Conversion,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::CsvError(_) | EtlError::MalformedHeaderError => ErrorCategory::Input,
            EtlError::ConversionFailed { .. } => ErrorCategory::Conversion,
            EtlError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input | ErrorCategory::Conversion => {
                ErrorSeverity::High
            }
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ConfigValidationError { .. } => {
                "Check the TOML configuration file for syntax errors and unknown keys".to_string()
            }
            EtlError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and run again", field)
            }
            EtlError::MalformedHeaderError => {
                "Re-export the input as UTF-8 before normalizing it".to_string()
            }
            EtlError::ConversionFailed { .. } => {
                "Fix the offending row, or rerun with --on-parse-error skip to drop it".to_string()
            }
            EtlError::CsvError(_) => "Check the input for unbalanced quotes".to_string(),
            EtlError::IoError(_) => {
                "Check that the input exists and the output location is writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::MalformedHeaderError => self.to_string(),
            EtlError::ConversionFailed { row, source } => {
                format!("Row {} could not be converted: {}", row, source)
            }
            EtlError::IoError(e) => format!("Input/output failure: {}", e),
            EtlError::CsvError(e) => format!("Input is not a readable CSV stream: {}", e),
            other => other.to_string(),
        }
    }

    /// 依嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
