//! Record splitting and UTF-8 gating for data rows and the header.

use csv::ByteRecord;

use crate::domain::model::{Column, DropReason, Row};
use crate::utils::error::{EtlError, Result};

/// First field, in column order, that is not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField<'a> {
    pub index: usize,
    pub value: &'a [u8],
}

/// Why a record was rejected, and the bytes to quote in the warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    pub reason: DropReason,
    pub value: Vec<u8>,
}

/// Checks every field except `exempt` for valid UTF-8.
pub fn validate_fields<'a, I>(fields: I, exempt: usize) -> std::result::Result<(), InvalidField<'a>>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    for (index, value) in fields.into_iter().enumerate() {
        if index != exempt && std::str::from_utf8(value).is_err() {
            return Err(InvalidField { index, value });
        }
    }
    Ok(())
}

/// The header passes through untouched, but a non-UTF-8 header is fatal.
pub fn validate_header(header: &[u8]) -> Result<&str> {
    std::str::from_utf8(header).map_err(|_| EtlError::MalformedHeaderError)
}

/// Splits one input line into CSV records.
///
/// A line normally holds a single record; an empty line holds none.
/// Only `\n` ends a record, so a lone `\r` inside a field stays in it.
pub fn split_records(line: &[u8]) -> Result<Vec<ByteRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(line);

    let mut records = Vec::new();
    let mut record = ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        records.push(record.clone());
    }
    Ok(records)
}

/// Builds a [`Row`] from a record, rejecting wrong field counts and
/// non-UTF-8 fields outside the free-text column.
pub fn parse_row(record: &ByteRecord) -> std::result::Result<Row, RowRejection> {
    if record.len() != Column::COUNT {
        return Err(RowRejection {
            reason: DropReason::MalformedRecord,
            value: join_record(record),
        });
    }

    validate_fields(record.iter(), Column::FREE_TEXT.index()).map_err(|invalid| RowRejection {
        reason: DropReason::MalformedString,
        value: invalid.value.to_vec(),
    })?;

    // 上面已驗證過，這裡只會在 Notes 以外的欄位呼叫
    let text = |column: Column| String::from_utf8_lossy(&record[column.index()]).into_owned();

    Ok(Row {
        timestamp: text(Column::Timestamp),
        address: text(Column::Address),
        zip: text(Column::Zip),
        full_name: text(Column::FullName),
        foo_duration: text(Column::FooDuration),
        bar_duration: text(Column::BarDuration),
        total_duration: text(Column::TotalDuration),
        notes: record[Column::Notes.index()].to_vec(),
    })
}

fn join_record(record: &ByteRecord) -> Vec<u8> {
    let fields: Vec<&[u8]> = record.iter().collect();
    fields.join(&b',')
}
