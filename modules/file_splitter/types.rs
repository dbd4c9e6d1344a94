use std::path::PathBuf;
use anyhow::Result;
use crate::modules::error::SplitError;

/// One parsed row of delimited fields, kept as raw bytes
pub type Record = csv::ByteRecord;

/// Extension appended to every output file name
pub const OUTPUT_EXTENSION: &str = ".csv";

/// Configuration for a split run, fixed once parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// Records per output file (N), header rows included
    pub records_per_file: usize,
    /// Leading input rows repeated at the top of every output file (H)
    pub header_count: usize,
    /// Prefix or path the numbered file names are appended to
    pub output: String,
    /// Field delimiter used for both reading and writing
    pub delimiter: u8,
}

impl SplitConfig {
    /// Build a validated configuration with comma delimiter and empty output prefix
    pub fn new(records_per_file: i64, header_count: i64) -> Result<Self, SplitError> {
        let records_per_file = usize::try_from(records_per_file)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or(SplitError::InvalidRecords)?;
        let header_count = usize::try_from(header_count).map_err(|_| SplitError::NegativeHeaders)?;

        let config = Self {
            records_per_file,
            header_count,
            output: String::new(),
            delimiter: b',',
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Check the invariants `N >= 1` and `H < N`
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.records_per_file < 1 {
            return Err(SplitError::InvalidRecords);
        }
        if self.header_count >= self.records_per_file {
            return Err(SplitError::HeadersNotBelowRecords {
                headers: self.header_count,
                records: self.records_per_file,
            });
        }
        if matches!(self.delimiter, b'"' | b'\n' | b'\r') || !self.delimiter.is_ascii() {
            return Err(SplitError::InvalidDelimiter(
                String::from_utf8_lossy(&[self.delimiter]).into_owned(),
            ));
        }
        Ok(())
    }
}

/// Metadata about one flushed chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Sequence number used to name the output, starting at 1
    pub sequence: usize,
    /// Where the chunk was written
    pub path: PathBuf,
    /// Rows in the chunk, carried headers included
    pub record_count: usize,
    /// Header rows copied over from the previous chunk
    pub carried_headers: usize,
}

impl ChunkMetadata {
    /// Rows that came from the input for the first time
    pub fn data_rows(&self) -> usize {
        self.record_count - self.carried_headers
    }
}

/// Outcome of a complete split run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSummary {
    pub records_read: usize,
    pub files_written: usize,
    pub data_rows_written: usize,
    pub outputs: Vec<ChunkMetadata>,
}

/// Destination for completed chunks
pub trait ChunkSink {
    /// Persist a chunk under the given sequence number and report where it went
    fn write_chunk(&mut self, sequence: usize, records: &[Record]) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_bounds() {
        assert!(matches!(SplitConfig::new(0, 0), Err(SplitError::InvalidRecords)));
        assert!(matches!(SplitConfig::new(-5, 0), Err(SplitError::InvalidRecords)));
        assert!(matches!(SplitConfig::new(3, -1), Err(SplitError::NegativeHeaders)));
        assert!(matches!(
            SplitConfig::new(3, 3),
            Err(SplitError::HeadersNotBelowRecords { headers: 3, records: 3 })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_config_accepts_largest_record_count() {
        let config = SplitConfig::new(i64::MAX, 1).unwrap();
        assert_eq!(config.records_per_file as u64, i64::MAX as u64);
        assert_eq!(config.header_count, 1);
    }
}
