// Output sinks
// The pipeline writes through RecordSink: one header, then labeled batches
// (positives of a block, then its negatives) in the order they are produced.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::NegSetError;
use crate::table::{Record, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Positive,
    Negative,
}

pub trait RecordSink {
    fn write_header(&mut self, schema: &Schema) -> Result<(), NegSetError>;

    fn append_batch(&mut self, kind: BatchKind, records: &[Record]) -> Result<(), NegSetError>;

    fn finish(&mut self) -> Result<(), NegSetError> {
        Ok(())
    }
}

/// Tab-delimited sink over any writer.
pub struct TsvSink<W: Write> {
    writer: W,
}

impl<W: Write> TsvSink<W> {
    pub fn new(writer: W) -> Self {
        TsvSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TsvSink<BufWriter<File>> {
    /// Truncates any existing file at `path`.
    pub fn create(path: &Path) -> Result<Self, NegSetError> {
        Ok(TsvSink::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> RecordSink for TsvSink<W> {
    fn write_header(&mut self, schema: &Schema) -> Result<(), NegSetError> {
        writeln!(self.writer, "{}", schema.header_line())?;
        Ok(())
    }

    fn append_batch(&mut self, _kind: BatchKind, records: &[Record]) -> Result<(), NegSetError> {
        for record in records {
            writeln!(self.writer, "{}", record.to_line())?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), NegSetError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every batch in memory, tagged with its kind.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub header: Option<Vec<String>>,
    pub batches: Vec<(BatchKind, Vec<Record>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self, kind: BatchKind) -> impl Iterator<Item = &Record> + '_ {
        self.batches
            .iter()
            .filter(move |(k, _)| *k == kind)
            .flat_map(|(_, records)| records.iter())
    }
}

impl RecordSink for MemorySink {
    fn write_header(&mut self, schema: &Schema) -> Result<(), NegSetError> {
        self.header = Some(schema.columns().to_vec());
        Ok(())
    }

    fn append_batch(&mut self, kind: BatchKind, records: &[Record]) -> Result<(), NegSetError> {
        self.batches.push((kind, records.to_vec()));
        Ok(())
    }
}
