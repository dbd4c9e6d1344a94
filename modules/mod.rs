//! Modules of the csvsplit tool
//!
//! - Record source reading CSV rows from a file or stdin
//! - File splitter turning those rows into numbered output files
//! - Command line flags and the error taxonomy shared by both

pub mod cli;
pub mod error;
pub mod file_splitter;
pub mod record_source;

// Re-export commonly used types and structs
pub use cli::{normalize_args, usage, Cli};
pub use error::SplitError;
pub use file_splitter::{ChunkMetadata, ChunkSink, ChunkWriter, FileSplitter, OutputNamer, Record, SplitConfig, SplitSummary};
pub use record_source::RecordSource;
