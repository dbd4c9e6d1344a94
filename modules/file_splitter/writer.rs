use super::namer::OutputNamer;
use super::types::{ChunkSink, Record};
use crate::modules::error::SplitError;
use anyhow::Result;
use std::fs::File;
use std::path::PathBuf;

/// Writes each chunk to a new numbered CSV file, never overwriting.
pub struct ChunkWriter {
    namer: OutputNamer,
    delimiter: u8,
}

impl ChunkWriter {
    pub fn new(namer: OutputNamer, delimiter: u8) -> Self {
        Self { namer, delimiter }
    }
}

impl ChunkSink for ChunkWriter {
    fn write_chunk(&mut self, sequence: usize, records: &[Record]) -> Result<PathBuf> {
        let path = self.namer.name_for(sequence);

        // Best-effort: the file could still appear between this check and create
        if path.exists() {
            return Err(SplitError::FileExists { path }.into());
        }

        let file = File::create(&path).map_err(|source| SplitError::CreateOutput {
            path: path.clone(),
            source,
        })?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(file);

        for record in records {
            writer
                .write_byte_record(record)
                .map_err(|source| SplitError::WriteOutput { path: path.clone(), source })?;
        }
        writer.flush().map_err(|e| SplitError::WriteOutput {
            path: path.clone(),
            source: e.into(),
        })?;

        Ok(path)
    }
}
