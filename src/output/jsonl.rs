use crate::crawler::ListingRecord;
use crate::output::traits::{OutputHandler, OutputResult};
use std::io::Write;

/// Writes one JSON object per line
///
/// No enclosing array and nothing after the final newline.
pub struct JsonLinesOutput<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputHandler for JsonLinesOutput<W> {
    fn emit(&mut self, record: &ListingRecord) -> OutputResult<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
