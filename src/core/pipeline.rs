use csv::ByteRecord;

use crate::adapters::LineReader;
use crate::core::{ConfigProvider, DiagnosticSink, Pipeline, Storage};
use crate::domain::model::{
    DropReason, Extracted, ParseErrorPolicy, Row, RowNumbering, RunSummary, TransformResult,
};
use crate::domain::services::{
    calculate_duration, convert_duration, convert_timestamp, normalize_name, parse_row,
    split_records, validate_header, validate_zip, ConversionError,
};
use crate::utils::error::{EtlError, Result};

/// Rewrites the converted columns of a validated row in place.
///
/// Order matters: the total is computed from the already converted
/// duration columns.
pub fn convert_row(row: &mut Row, shift_hours: i64) -> std::result::Result<(), ConversionError> {
    row.full_name = normalize_name(&row.full_name);
    row.timestamp = convert_timestamp(&row.timestamp, shift_hours)?;
    row.zip = validate_zip(&row.zip);
    row.foo_duration = convert_duration(&row.foo_duration)?;
    row.bar_duration = convert_duration(&row.bar_duration)?;
    row.total_duration = calculate_duration(&row.foo_duration, &row.bar_duration)?;
    Ok(())
}

/// Header-plus-rows normalization: validate, convert, re-encode.
pub struct NormalizePipeline<S: Storage, C: ConfigProvider, D: DiagnosticSink> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) diagnostics: D,
}

impl<S: Storage, C: ConfigProvider, D: DiagnosticSink> NormalizePipeline<S, C, D> {
    pub fn new(storage: S, config: C, diagnostics: D) -> Self {
        Self {
            storage,
            config,
            diagnostics,
        }
    }

    fn drop_row(
        &self,
        summary: &mut RunSummary,
        row_number: usize,
        reason: DropReason,
        value: &[u8],
    ) -> Result<()> {
        tracing::debug!("Dropping row {} ({})", row_number, reason.label());
        summary.record_drop(reason);
        self.diagnostics.row_dropped(row_number, reason, value)
    }

    /// Returns the encoded line, or `None` when the row was dropped.
    fn transform_record(
        &self,
        record: &ByteRecord,
        row_number: usize,
        summary: &mut RunSummary,
    ) -> Result<Option<Vec<u8>>> {
        let mut row = match parse_row(record) {
            Ok(row) => row,
            Err(rejection) => {
                self.drop_row(summary, row_number, rejection.reason, &rejection.value)?;
                return Ok(None);
            }
        };

        match convert_row(&mut row, self.config.shift_hours()) {
            Ok(()) => Ok(Some(row.to_csv_line())),
            Err(e) => match self.config.parse_error_policy() {
                ParseErrorPolicy::Abort => Err(EtlError::ConversionFailed {
                    row: row_number,
                    source: e,
                }),
                ParseErrorPolicy::Skip => {
                    self.drop_row(summary, row_number, e.drop_reason(), e.value().as_bytes())?;
                    Ok(None)
                }
            },
        }
    }
}

impl<S: Storage, C: ConfigProvider, D: DiagnosticSink> Pipeline for NormalizePipeline<S, C, D> {
    fn extract(&self) -> Result<Extracted> {
        let mut lines = LineReader::new(self.storage.open_input()?);

        // 空輸入時標頭為空字串
        let header = lines.read_line()?.map(|line| line.bytes).unwrap_or_default();
        tracing::debug!("Header: {}", String::from_utf8_lossy(&header));

        Ok(Extracted {
            header,
            lines: Box::new(lines),
        })
    }

    fn transform(&self, input: Extracted) -> Result<TransformResult> {
        validate_header(&input.header)?;

        let numbering = self.config.row_numbering();
        let mut result = TransformResult::default();
        result.lines.push(input.header);

        for line in input.lines {
            let line = line?;

            // 舊版計數器：每行從 1 開始，每讀一筆記錄加一
            let mut legacy_counter = 1;
            for record in split_records(&line.bytes)? {
                legacy_counter += 1;
                let row_number = match numbering {
                    RowNumbering::Line => line.number,
                    RowNumbering::Legacy => legacy_counter,
                };

                result.summary.rows_read += 1;
                if let Some(encoded) =
                    self.transform_record(&record, row_number, &mut result.summary)?
                {
                    result.lines.push(encoded);
                    result.summary.rows_written += 1;
                }
            }
        }

        Ok(result)
    }

    fn load(&self, result: TransformResult) -> Result<RunSummary> {
        let data = result.to_bytes();
        tracing::debug!(
            "Writing {} lines ({} bytes) to {}",
            result.lines.len(),
            data.len(),
            self.storage.describe_output()
        );
        self.storage.write_output(&data)?;
        Ok(result.summary)
    }
}
