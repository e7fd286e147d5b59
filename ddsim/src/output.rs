//! CSV output of evaluation rows.

use crate::error::PipelineError;
use crate::row::EvaluationRow;
use std::io::Write;

/// Writes rows to the data channel, one record per row, flushing after every
/// batch so nothing sits buffered between batches.
pub struct RowSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RowSink<W> {
    /// Wrap `out`, writing the header line first when `header` is set.
    pub fn new(out: W, header: bool) -> Result<Self, PipelineError> {
        // header is written by hand so an empty run still gets one
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        if header {
            writer.write_record(EvaluationRow::HEADER)?;
            writer.flush()?;
        }
        Ok(Self { writer })
    }

    pub fn write_batch(&mut self, rows: &[EvaluationRow]) -> Result<(), PipelineError> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W, PipelineError> {
        self.writer
            .into_inner()
            .map_err(|e| PipelineError::Output(e.into_error()))
    }
}
