use super::types::Record;

/// Buffers records for the output file currently being filled.
///
/// Once the buffer reaches `records_per_file` it is flushed by the caller and
/// then cut back to its first `header_count` rows, so the header rows of the
/// first chunk are repeated at the top of every later chunk.
#[derive(Debug)]
pub struct ChunkAccumulator {
    records_per_file: usize,
    header_count: usize,
    chunk: Vec<Record>,
    carried: usize,
}

impl ChunkAccumulator {
    pub fn new(records_per_file: usize, header_count: usize) -> Self {
        debug_assert!(header_count < records_per_file);
        Self {
            records_per_file,
            header_count,
            chunk: Vec::new(),
            carried: 0,
        }
    }

    /// Append a record and report whether the chunk is now full
    pub fn push(&mut self, record: Record) -> bool {
        self.chunk.push(record);
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.chunk.len() == self.records_per_file
    }

    /// Rows buffered for the next flush
    pub fn records(&self) -> &[Record] {
        &self.chunk
    }

    /// Header rows at the front of the buffer that were carried from the previous chunk
    pub fn carried_headers(&self) -> usize {
        self.carried
    }

    /// Drop everything but the header rows to start the next chunk
    pub fn reset(&mut self) {
        self.chunk.truncate(self.header_count);
        self.carried = self.chunk.len();
    }
}
