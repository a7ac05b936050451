//! Status sinks
//!
//! The runtime reports per-tick status and failures through a sink handed to
//! it at construction instead of writing to a global logger.

use parking_lot::Mutex;

use crate::config::Equipment;

/// Receiver for the runtime's per-tick output
pub trait StatusSink: Send + Sync + 'static {
    /// One summary line per successful tick
    fn status(&self, equipment: Equipment, tick: u64, line: &str);

    /// A tick failed; the loop carries on at the next tick
    fn tick_failed(&self, equipment: Equipment, tick: u64, error: &str);
}

/// Forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn status(&self, equipment: Equipment, tick: u64, line: &str) {
        tracing::info!(%equipment, tick, "{}", line);
    }

    fn tick_failed(&self, equipment: Equipment, tick: u64, error: &str) {
        tracing::error!(%equipment, tick, "Error in update loop: {}", error);
    }
}

/// A record captured by [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkRecord {
    Status { tick: u64, line: String },
    Failed { tick: u64, error: String },
}

/// Keeps every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<SinkRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().clone()
    }

    pub fn status_lines(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter_map(|r| match r {
                SinkRecord::Status { line, .. } => Some(line.clone()),
                SinkRecord::Failed { .. } => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter_map(|r| match r {
                SinkRecord::Failed { error, .. } => Some(error.clone()),
                SinkRecord::Status { .. } => None,
            })
            .collect()
    }
}

impl StatusSink for MemorySink {
    fn status(&self, _equipment: Equipment, tick: u64, line: &str) {
        self.records.lock().push(SinkRecord::Status {
            tick,
            line: line.to_string(),
        });
    }

    fn tick_failed(&self, _equipment: Equipment, tick: u64, error: &str) {
        self.records.lock().push(SinkRecord::Failed {
            tick,
            error: error.to_string(),
        });
    }
}
