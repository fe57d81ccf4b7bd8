//! Field-level conversions applied to each data row.

pub mod duration;
pub mod name;
pub mod number;
pub mod postal;
pub mod row_validator;
pub mod timestamp;

use thiserror::Error;

pub use duration::{calculate_duration, convert_duration};
pub use name::normalize_name;
pub use number::format_compact;
pub use postal::validate_zip;
pub use row_validator::{parse_row, split_records, validate_fields, validate_header};
pub use timestamp::convert_timestamp;

use crate::domain::model::DropReason;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unable to parse time '{value}'")]
    Timestamp { value: String },

    #[error("Unable to convert duration '{value}': {reason}")]
    Duration { value: String, reason: String },

    #[error("Unable to calculate duration from '{value}'")]
    Total { value: String },
}

impl ConversionError {
    pub fn drop_reason(&self) -> DropReason {
        match self {
            ConversionError::Timestamp { .. } => DropReason::UnparseableTimestamp,
            ConversionError::Duration { .. } | ConversionError::Total { .. } => {
                DropReason::UnparseableDuration
            }
        }
    }

    /// The input value that failed to convert.
    pub fn value(&self) -> &str {
        match self {
            ConversionError::Timestamp { value }
            | ConversionError::Duration { value, .. }
            | ConversionError::Total { value } => value,
        }
    }
}
