use std::io::BufRead;

use crate::domain::model::RawLine;
use crate::utils::error::Result;

/// Splits a byte stream into lines without decoding it.
///
/// Lines end at `\n`; one trailing `\r` is dropped. The final line does not
/// need a terminator.
pub struct LineReader {
    inner: Box<dyn BufRead>,
    /// 1-based number of the next line.
    next_number: usize,
    finished: bool,
}

impl LineReader {
    pub fn new(inner: Box<dyn BufRead>) -> Self {
        Self {
            inner,
            next_number: 1,
            finished: false,
        }
    }

    /// Reads the next line, `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<RawLine>> {
        if self.finished {
            return Ok(None);
        }

        let mut bytes = Vec::new();
        let read = match self.inner.read_until(b'\n', &mut bytes) {
            Ok(read) => read,
            Err(e) => {
                self.finished = true;
                return Err(e.into());
            }
        };
        if read == 0 {
            self.finished = true;
            return Ok(None);
        }

        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }

        let number = self.next_number;
        self.next_number += 1;
        Ok(Some(RawLine { number, bytes }))
    }
}

impl Iterator for LineReader {
    type Item = Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}
