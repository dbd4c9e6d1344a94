//! Error taxonomy for a split run.
//!
//! Every variant is fatal: the driver stops at the first one and the binary
//! exits non-zero. Configuration variants are reported together with the
//! usage message, everything else as a single diagnostic line.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("-records must be >= 1")]
    InvalidRecords,

    #[error("-headers must be >= 0")]
    NegativeHeaders,

    #[error("-headers must be < -records (headers={headers}, records={records})")]
    HeadersNotBelowRecords { headers: usize, records: usize },

    #[error("-delimiter must be a single ASCII character other than a quote or line break, got {0:?}")]
    InvalidDelimiter(String),

    #[error("no such directory: {target}")]
    NoSuchDirectory { target: String },

    #[error("file exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("cannot open input {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read input: {source}")]
    ReadRecord {
        #[source]
        source: csv::Error,
    },

    #[error("cannot create {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl SplitError {
    /// Configuration errors are reported with the usage message.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SplitError::InvalidRecords
                | SplitError::NegativeHeaders
                | SplitError::HeadersNotBelowRecords { .. }
                | SplitError::InvalidDelimiter(_)
        )
    }
}
