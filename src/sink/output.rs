use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::record::{PrimeRecord, format_timestamp};

/// How a prime record is rendered as a line of output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// `[Worker N] [timestamp] Found prime: V`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl RecordFormat {
    /// Render a record as a single line, newline included
    pub fn render(&self, record: &PrimeRecord) -> io::Result<String> {
        let mut line = match self {
            RecordFormat::Text => format!(
                "[Worker {}] [{}] Found prime: {}",
                record.worker_id(),
                format_timestamp(&record.discovered_at()),
                record.value()
            ),
            RecordFormat::Json => serde_json::to_string(record)?,
        };
        line.push('\n');
        Ok(line)
    }
}

struct OutputState {
    writer: Box<dyn Write + Send>,
    records_written: u64,
}

/// The single lock-guarded output stream every sink publishes through.
///
/// Cloning shares the same stream and lock. Lines are rendered before the lock
/// is taken so the critical section is only the write itself.
#[derive(Clone)]
pub struct SharedOutput {
    state: Arc<Mutex<OutputState>>,
    format: RecordFormat,
}

impl SharedOutput {
    pub fn new<W: Write + Send + 'static>(writer: W, format: RecordFormat) -> Self {
        Self {
            state: Arc::new(Mutex::new(OutputState {
                writer: Box::new(writer),
                records_written: 0,
            })),
            format,
        }
    }

    pub fn stdout(format: RecordFormat) -> Self {
        Self::new(io::stdout(), format)
    }

    /// Publish one record under the lock
    pub fn write_record(&self, record: &PrimeRecord) -> io::Result<()> {
        let line = self.format.render(record)?;

        let mut state = self.state.lock();
        state.writer.write_all(line.as_bytes())?;
        state.records_written += 1;
        Ok(())
    }

    /// Publish a batch of records with a single lock acquisition.
    ///
    /// The batch lands as one contiguous block; no other writer can interleave.
    pub fn write_batch(&self, records: &[PrimeRecord]) -> io::Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut block = String::new();
        for record in records {
            block.push_str(&self.format.render(record)?);
        }

        let mut state = self.state.lock();
        state.writer.write_all(block.as_bytes())?;
        state.writer.flush()?;
        state.records_written += records.len() as u64;
        Ok(())
    }

    pub fn flush(&self) -> io::Result<()> {
        self.state.lock().writer.flush()
    }

    /// Total records published so far across every clone
    pub fn records_written(&self) -> u64 {
        self.state.lock().records_written
    }
}
