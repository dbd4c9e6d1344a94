use super::accumulator::ChunkAccumulator;
use super::namer::OutputNamer;
use super::types::*;
use super::writer::ChunkWriter;
use crate::modules::record_source::RecordSource;
use anyhow::Result;
use tracing::{debug, info};

/// Drives one pass over the input, flushing a chunk every `records_per_file` rows
pub struct FileSplitter {
    config: SplitConfig,
}

impl FileSplitter {
    /// Create a splitter from a configuration, validating it first
    pub fn with_config(config: SplitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// File-backed sink honouring the configured output target.
    ///
    /// Fails with "no such directory" before any input is read when the
    /// target's directory is missing.
    pub fn file_writer(&self) -> Result<ChunkWriter> {
        let namer = OutputNamer::new(self.config.output.clone())?;
        Ok(ChunkWriter::new(namer, self.config.delimiter))
    }

    /// Split everything `source` yields into chunks handed to `sink`.
    ///
    /// The last chunk is flushed even when it holds nothing but the carried
    /// header rows. A completely empty remainder is only written when no file
    /// has been produced yet, so empty input still yields one empty file.
    pub fn split<S: ChunkSink>(&self, source: &mut RecordSource, sink: &mut S) -> Result<SplitSummary> {
        info!(
            "Splitting into files of {} records ({} header rows) with output target '{}'",
            self.config.records_per_file, self.config.header_count, self.config.output
        );

        let mut accumulator = ChunkAccumulator::new(self.config.records_per_file, self.config.header_count);
        let mut summary = SplitSummary::default();
        let mut sequence = 1;

        while let Some(record) = source.next_record()? {
            if accumulator.push(record) {
                self.flush(&accumulator, sequence, sink, &mut summary)?;
                accumulator.reset();
                sequence += 1;
            }
        }
        if !accumulator.records().is_empty() || summary.files_written == 0 {
            self.flush(&accumulator, sequence, sink, &mut summary)?;
        }

        summary.records_read = source.records_read();
        info!(
            "Split {} records into {} files",
            summary.records_read, summary.files_written
        );
        Ok(summary)
    }

    fn flush<S: ChunkSink>(
        &self,
        accumulator: &ChunkAccumulator,
        sequence: usize,
        sink: &mut S,
        summary: &mut SplitSummary,
    ) -> Result<()> {
        let records = accumulator.records();
        let path = sink.write_chunk(sequence, records)?;

        let metadata = ChunkMetadata {
            sequence,
            path,
            record_count: records.len(),
            carried_headers: accumulator.carried_headers(),
        };
        debug!(
            "Wrote {} ({} rows, {} carried headers)",
            metadata.path.display(),
            metadata.record_count,
            metadata.carried_headers
        );

        summary.files_written += 1;
        summary.data_rows_written += metadata.data_rows();
        summary.outputs.push(metadata);
        Ok(())
    }
}
