//! csvsplit binary

use anyhow::Result;
use csvsplit::{normalize_args, usage, Cli, FileSplitter, RecordSource, SplitError};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, Level};

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<SplitError>() {
                Some(err) if err.is_config_error() => {
                    eprintln!("{}", err);
                    eprintln!("{}", usage());
                }
                _ => error!("{}", e),
            }
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.split_config()?;
    let splitter = FileSplitter::with_config(config)?;

    // Output directory is checked before any input is consumed
    let mut sink = splitter.file_writer()?;
    let mut source = RecordSource::open(cli.input.as_deref(), splitter.config().delimiter)?;

    let summary = splitter.split(&mut source, &mut sink)?;
    if let Some(last) = summary.outputs.last() {
        info!("Last file: {}", last.path.display());
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}
