use crate::modules::error::SplitError;
use crate::modules::file_splitter::types::Record;
use anyhow::Result;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::info;

/// Reads records one at a time from a named file or standard input.
///
/// The first row is not treated as a header: header rows are ordinary
/// records here. Rows must all have the same number of fields as the
/// first one, and quotes must follow the usual CSV rules (see
/// [`QuoteCheck`]). Anything else aborts the read.
pub struct RecordSource {
    reader: csv::Reader<Box<dyn Read>>,
    records_read: usize,
}

impl RecordSource {
    /// Open `path`, or standard input when no path is given
    pub fn open(path: Option<&Path>, delimiter: u8) -> Result<Self> {
        match path {
            Some(path) => {
                let file = File::open(path).map_err(|source| SplitError::OpenInput {
                    path: path.to_path_buf(),
                    source,
                })?;
                info!("Reading records from {}", path.display());
                Ok(Self::from_reader(file, delimiter))
            }
            None => {
                info!("Reading records from stdin");
                Ok(Self::from_reader(io::stdin(), delimiter))
            }
        }
    }

    pub fn from_reader<R: Read + 'static>(reader: R, delimiter: u8) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .delimiter(delimiter)
            .from_reader(Box::new(QuoteCheck::new(reader, delimiter)) as Box<dyn Read>);
        Self {
            reader,
            records_read: 0,
        }
    }

    /// Next record, or `None` once the input is exhausted
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        let mut record = Record::new();
        let more = self
            .reader
            .read_byte_record(&mut record)
            .map_err(|source| SplitError::ReadRecord { source })?;
        if !more {
            return Ok(None);
        }
        self.records_read += 1;
        Ok(Some(record))
    }

    pub fn records_read(&self) -> usize {
        self.records_read
    }
}

impl Iterator for RecordSource {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    /// Just saw a `"` inside a quoted field: either an escape or the closing quote
    QuoteInQuoted,
}

/// Rejects quoting the `csv` parser would silently accept.
///
/// A `"` inside an unquoted field, anything but a delimiter or line break
/// after a closing quote, and a quoted field left open at end of input all
/// fail with `InvalidData`. The check runs on raw bytes as they are read, so
/// the error can surface a few records ahead of the parser.
struct QuoteCheck<R> {
    inner: R,
    delimiter: u8,
    state: QuoteState,
    line: usize,
}

impl<R: Read> QuoteCheck<R> {
    fn new(inner: R, delimiter: u8) -> Self {
        Self {
            inner,
            delimiter,
            state: QuoteState::FieldStart,
            line: 1,
        }
    }

    fn step(&mut self, byte: u8) -> io::Result<()> {
        let boundary = byte == self.delimiter || byte == b'\n' || byte == b'\r';
        self.state = match (self.state, byte) {
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::FieldStart, b'"') => QuoteState::Quoted,
            (QuoteState::Unquoted, b'"') => {
                return Err(self.malformed("bare \" in non-quoted field"));
            }
            (_, _) if boundary => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted, _) => {
                return Err(self.malformed("extraneous or missing \" in quoted field"));
            }
            (_, _) => QuoteState::Unquoted,
        };
        if byte == b'\n' {
            self.line += 1;
        }
        Ok(())
    }

    fn malformed(&self, what: &str) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, format!("line {}: {}", self.line, what))
    }
}

impl<R: Read> Read for QuoteCheck<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() && self.state == QuoteState::Quoted {
            return Err(self.malformed("unterminated quoted field"));
        }
        for &byte in &buf[..n] {
            self.step(byte)?;
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(data: &'static str) -> RecordSource {
        RecordSource::from_reader(Cursor::new(data), b',')
    }

    #[test]
    fn test_reads_until_end_of_input() {
        let mut src = source("a,b\n1,2\n");
        assert_eq!(src.next_record().unwrap(), Some(Record::from(vec!["a", "b"])));
        assert_eq!(src.next_record().unwrap(), Some(Record::from(vec!["1", "2"])));
        assert_eq!(src.next_record().unwrap(), None);
        assert_eq!(src.records_read(), 2);
    }

    #[test]
    fn test_quoted_fields_keep_delimiters_and_newlines() {
        let mut src = source("\"x, y\",\"line\nbreak\",\"say \"\"hi\"\"\"\n");
        let record = src.next_record().unwrap().unwrap();
        assert_eq!(record, Record::from(vec!["x, y", "line\nbreak", "say \"hi\""]));
    }

    #[test]
    fn test_inconsistent_field_count_is_fatal() {
        let mut src = source("a,b,c\n1,2\n");
        assert!(src.next_record().unwrap().is_some());
        let err = src.next_record().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SplitError>(),
            Some(SplitError::ReadRecord { .. })
        ));
    }

    fn read_all(data: &'static str) -> Result<Vec<Record>> {
        source(data).collect()
    }

    fn assert_read_error(data: &'static str) {
        let err = read_all(data).unwrap_err();
        assert!(
            matches!(err.downcast_ref::<SplitError>(), Some(SplitError::ReadRecord { .. })),
            "expected ReadRecord for {:?}, got {}",
            data,
            err
        );
    }

    #[test]
    fn test_unterminated_quoted_field_is_fatal() {
        assert_read_error("a,b\n1,\"unterminated\n");
        assert_read_error("\"");
    }

    #[test]
    fn test_bare_quote_in_unquoted_field_is_fatal() {
        assert_read_error("a,b\n1,x\"y\n");
    }

    #[test]
    fn test_text_after_closing_quote_is_fatal() {
        assert_read_error("a,b\n\"x\"y,z\n");
    }

    #[test]
    fn test_well_formed_quoting_accepted() {
        let records = read_all("\"\",\"a\"\"b\"\r\n\"c\nd\",e\n").unwrap();
        assert_eq!(
            records,
            vec![Record::from(vec!["", "a\"b"]), Record::from(vec!["c\nd", "e"])]
        );
    }

    #[test]
    fn test_iterates_records() {
        let records: Vec<Record> = source("x\ny\n\nz\n").collect::<Result<_>>().unwrap();
        // Blank lines are skipped
        assert_eq!(records.len(), 3);
        assert_eq!(records[2], Record::from(vec!["z"]));
    }

    #[test]
    fn test_empty_input() {
        let mut src = source("");
        assert_eq!(src.next_record().unwrap(), None);
        assert_eq!(src.records_read(), 0);
    }

    #[test]
    fn test_missing_file() {
        let err = RecordSource::open(Some(Path::new("/definitely/not/here.csv")), b',')
            .err()
            .expect("open should fail");
        assert!(matches!(
            err.downcast_ref::<SplitError>(),
            Some(SplitError::OpenInput { .. })
        ));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let mut src = RecordSource::from_reader(Cursor::new("a;b,c\n"), b';');
        assert_eq!(src.next_record().unwrap(), Some(Record::from(vec!["a", "b,c"])));
    }
}
