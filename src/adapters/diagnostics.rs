use std::io::Write;

use crate::domain::model::DropReason;
use crate::domain::ports::DiagnosticSink;
use crate::utils::error::Result;

/// Writes `Warning: <reason>, dropping row <N>: <value>` lines to stderr.
///
/// The offending value is written as raw bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn row_dropped(&self, row: usize, reason: DropReason, value: &[u8]) -> Result<()> {
        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        write_warning(&mut out, row, reason, value)?;
        out.flush()?;
        Ok(())
    }
}

pub fn write_warning<W: Write>(
    out: &mut W,
    row: usize,
    reason: DropReason,
    value: &[u8],
) -> std::io::Result<()> {
    write!(out, "Warning: {}, dropping row {}: ", reason.label(), row)?;
    out.write_all(value)?;
    out.write_all(b"\n")
}
