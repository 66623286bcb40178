use crate::core::state::StateUpdate;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// A single entry in the execution trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub run_id: String,
    pub timestamp: u64,
    pub step: String,
    pub action: String,
    pub update: StateUpdate,
}

impl TraceEntry {
    pub fn new(run_id: &str, step: &str, action: &str, update: StateUpdate) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            run_id: run_id.to_string(),
            timestamp,
            step: step.to_string(),
            action: action.to_string(),
            update,
        }
    }
}

/// Trait for recording execution traces.
pub trait Telemetry: Send + Sync {
    fn record(&self, entry: TraceEntry);
    fn flush(&self);
}

/// Simple in-memory collector for traces.
#[derive(Default)]
pub struct MemoryTelemetry {
    traces: Mutex<Vec<TraceEntry>>,
}

impl MemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traces(&self) -> Vec<TraceEntry> {
        self.traces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Telemetry for MemoryTelemetry {
    fn record(&self, entry: TraceEntry) {
        self.traces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    fn flush(&self) {
        // nothing buffered
    }
}
