//! File Splitter
//!
//! Cuts a stream of CSV records into numbered files holding a fixed number of
//! records each, optionally repeating the leading header rows in every file.

pub mod types;
pub mod accumulator;
pub mod namer;
pub mod writer;
pub mod splitter;

// Re-export main types and the FileSplitter
pub use types::*;
pub use accumulator::ChunkAccumulator;
pub use namer::OutputNamer;
pub use writer::ChunkWriter;
pub use splitter::FileSplitter;
