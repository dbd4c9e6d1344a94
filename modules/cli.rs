//! Command line surface of the `csvsplit` binary.
//!
//! Flags are written Go-style with a single dash (`-records 300`), which clap
//! does not accept for long names. [`normalize_args`] rewrites them to the
//! double-dash form before parsing, so both spellings work.

use crate::modules::error::SplitError;
use crate::modules::file_splitter::SplitConfig;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

const USAGE: &str = "csvsplit [options] -records <number of records> <file>";

/// Long flags that may be given with a single leading dash
const LONG_FLAGS: &[&str] = &["records", "headers", "output", "delimiter", "verbose", "help", "version"];

/// Split a .csv into multiple, smaller files named 1.csv, 2.csv, ...
#[derive(Debug, Parser)]
#[command(name = "csvsplit", version, about, override_usage = USAGE)]
pub struct Cli {
    /// Number of records per output file
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, value_name = "N")]
    pub records: i64,

    /// Number of header lines in the input to repeat in every output file
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, value_name = "H")]
    pub headers: i64,

    /// Output filename prefix / path (leave blank for the current directory)
    #[arg(long, default_value = "", value_name = "PATH")]
    pub output: String,

    /// Field delimiter for input and output ("\t" for tab)
    #[arg(long, default_value = ",", value_name = "CHAR")]
    pub delimiter: String,

    /// Log every file written
    #[arg(long)]
    pub verbose: bool,

    /// Input file, standard input when omitted
    pub input: Option<PathBuf>,
}

impl Cli {
    /// Validate the flags and turn them into a run configuration
    pub fn split_config(&self) -> Result<SplitConfig, SplitError> {
        let delimiter = parse_delimiter(&self.delimiter)?;
        let config = SplitConfig::new(self.records, self.headers)?
            .with_output(self.output.clone())
            .with_delimiter(delimiter);
        config.validate()?;
        Ok(config)
    }
}

/// Usage text printed after a configuration error
pub fn usage() -> String {
    format!("usage: {}\n\n{}", USAGE, Cli::command().render_help())
}

/// Rewrite `-flag` and `-flag=value` into their `--flag` forms.
///
/// Everything after a bare `--` is left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for arg in args {
        let arg: OsString = arg.into();
        if passthrough {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }
        match arg.to_str() {
            Some(s) if is_single_dash_flag(s) => normalized.push(format!("-{}", s).into()),
            _ => normalized.push(arg),
        }
    }

    normalized
}

fn is_single_dash_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}

fn parse_delimiter(value: &str) -> Result<u8, SplitError> {
    match value {
        "\\t" | "\t" => Ok(b'\t'),
        v if v.len() == 1 && v.is_ascii() => Ok(v.as_bytes()[0]),
        v => Err(SplitError::InvalidDelimiter(v.to_string())),
    }
}
