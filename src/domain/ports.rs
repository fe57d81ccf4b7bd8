use std::io::BufRead;

use crate::domain::model::{
    DropReason, Extracted, ParseErrorPolicy, RowNumbering, RunSummary, TransformResult,
};
use crate::utils::error::Result;

/// Where the stream comes from and where the cleaned stream goes.
pub trait Storage {
    fn open_input(&self) -> Result<Box<dyn BufRead>>;
    fn write_output(&self, data: &[u8]) -> Result<()>;

    /// Human readable destination, for logs.
    fn describe_output(&self) -> String;
}

/// Receives one warning per dropped row.
pub trait DiagnosticSink {
    fn row_dropped(&self, row: usize, reason: DropReason, value: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn shift_hours(&self) -> i64;
    fn parse_error_policy(&self) -> ParseErrorPolicy;
    fn row_numbering(&self) -> RowNumbering;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Extracted>;
    fn transform(&self, input: Extracted) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<RunSummary>;
}
