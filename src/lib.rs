//! # csvsplit
//!
//! Splits a CSV file (or standard input) into smaller files of a fixed number
//! of records, named `1.csv`, `2.csv`, ... after an optional prefix or path.
//! The first `H` rows of the input can be repeated at the top of every file.
//!
//! ## Example Usage
//!
//! ```no_run
//! use csvsplit::{FileSplitter, RecordSource, SplitConfig};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = SplitConfig::new(40, 2)?.with_output("stuff/");
//!     let splitter = FileSplitter::with_config(config)?;
//!
//!     let mut sink = splitter.file_writer()?;
//!     let mut source = RecordSource::open(Some(Path::new("file.csv")), b',')?;
//!     let summary = splitter.split(&mut source, &mut sink)?;
//!
//!     println!("Wrote {} files", summary.files_written);
//!     Ok(())
//! }
//! ```

// Include the modules from the modules directory
#[path = "../modules/mod.rs"]
pub mod modules;

// Re-export everything from modules for easy access
pub use modules::*;

pub use anyhow::{Context, Result};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library information
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
