use serde::Deserialize;

/// Named positions of the eight input columns, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Timestamp,
    Address,
    Zip,
    FullName,
    FooDuration,
    BarDuration,
    TotalDuration,
    Notes,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Timestamp,
        Column::Address,
        Column::Zip,
        Column::FullName,
        Column::FooDuration,
        Column::BarDuration,
        Column::TotalDuration,
        Column::Notes,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Column excluded from UTF-8 validation.
    pub const FREE_TEXT: Column = Column::Notes;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One data record. Every slot except `notes` has passed UTF-8 validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub timestamp: String,
    pub address: String,
    pub zip: String,
    pub full_name: String,
    pub foo_duration: String,
    pub bar_duration: String,
    pub total_duration: String,
    /// Free text, kept as raw bytes.
    pub notes: Vec<u8>,
}

impl Row {
    pub fn field(&self, column: Column) -> &[u8] {
        match column {
            Column::Timestamp => self.timestamp.as_bytes(),
            Column::Address => self.address.as_bytes(),
            Column::Zip => self.zip.as_bytes(),
            Column::FullName => self.full_name.as_bytes(),
            Column::FooDuration => self.foo_duration.as_bytes(),
            Column::BarDuration => self.bar_duration.as_bytes(),
            Column::TotalDuration => self.total_duration.as_bytes(),
            Column::Notes => &self.notes,
        }
    }

    /// Fields in wire order.
    pub fn fields(&self) -> impl Iterator<Item = &[u8]> + '_ {
        Column::ALL.into_iter().map(move |c| self.field(c))
    }

    /// Encodes the row as one CSV line without a terminator.
    ///
    /// Fields go out byte for byte. Only a field holding a delimiter is
    /// quoted (with inner quotes doubled), since it could only have arrived
    /// quoted; bare quotes and lone `\r` pass through as they came in.
    pub fn to_csv_line(&self) -> Vec<u8> {
        let mut line = Vec::new();
        for (i, field) in self.fields().enumerate() {
            if i > 0 {
                line.push(DELIMITER);
            }
            if field.contains(&DELIMITER) {
                line.push(b'"');
                for &b in field {
                    if b == b'"' {
                        line.push(b'"');
                    }
                    line.push(b);
                }
                line.push(b'"');
            } else {
                line.extend_from_slice(field);
            }
        }
        line
    }
}

const DELIMITER: u8 = b',';

/// One input line after the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number; the header is line 1.
    pub number: usize,
    pub bytes: Vec<u8>,
}

/// What happens when a timestamp or duration cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ParseErrorPolicy {
    /// Stop the run; nothing is written.
    #[default]
    Abort,
    /// Drop the row with a warning and keep going.
    Skip,
}

/// How the row number in drop warnings is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RowNumbering {
    /// Input line number, header is line 1.
    #[default]
    Line,
    /// Per-line record counter starting at 2, as older tooling expects.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MalformedString,
    MalformedRecord,
    UnparseableTimestamp,
    UnparseableDuration,
}

impl DropReason {
    pub fn label(self) -> &'static str {
        match self {
            DropReason::MalformedString => "Malformed string",
            DropReason::MalformedRecord => "Malformed record",
            DropReason::UnparseableTimestamp => "Unparseable timestamp",
            DropReason::UnparseableDuration => "Unparseable duration",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    pub dropped_malformed_string: usize,
    pub dropped_malformed_record: usize,
    pub dropped_unparseable: usize,
}

impl RunSummary {
    pub fn rows_dropped(&self) -> usize {
        self.dropped_malformed_string + self.dropped_malformed_record + self.dropped_unparseable
    }

    pub fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::MalformedString => self.dropped_malformed_string += 1,
            DropReason::MalformedRecord => self.dropped_malformed_record += 1,
            DropReason::UnparseableTimestamp | DropReason::UnparseableDuration => {
                self.dropped_unparseable += 1
            }
        }
    }
}

/// Output of the extract phase: the raw header and the remaining lines.
pub struct Extracted {
    pub header: Vec<u8>,
    pub lines: Box<dyn Iterator<Item = crate::utils::error::Result<RawLine>>>,
}

/// Buffered output of the transform phase, written once by load.
#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    /// Header first, then each transformed row.
    pub lines: Vec<Vec<u8>>,
    pub summary: RunSummary,
}

impl TransformResult {
    /// Lines joined by `\n`, no trailing newline.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.join(&b'\n')
    }
}
