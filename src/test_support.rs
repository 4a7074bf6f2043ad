//! Shared test support utilities.
//!
//! Provides `RecordingSink`, a sink double that answers the gate from a
//! configurable rank threshold and captures every dispatched record, for use
//! in unit and integration tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::error::SinkError;
use crate::domain::{Marker, ResolvedMessage};
use crate::port::{LogRecord, Sink, SinkHandle};

/// Owned copy of one dispatched record.
#[derive(Debug, Clone)]
pub struct CapturedRecord {
    pub attribution: &'static str,
    pub level_name: String,
    pub rank: u32,
    pub marker: Option<String>,
    pub message: ResolvedMessage,
    pub cause: Option<String>,
    /// Address of the cause the record carried, for identity assertions.
    pub cause_addr: Option<usize>,
}

#[derive(Default)]
struct Shared {
    threshold: AtomicU32,
    denied_markers: Mutex<HashSet<String>>,
    records: Mutex<Vec<CapturedRecord>>,
    fail_dispatch: AtomicBool,
    gate_checks: AtomicUsize,
    dispatches: AtomicUsize,
}

/// Sink double: threshold-based gate plus record capture.
///
/// A rank is enabled iff `rank <= threshold` and its marker (if any) has not
/// been denied, mirroring the lower-rank-is-more-severe contract.
pub struct RecordingSink {
    shared: Arc<Shared>,
}

impl RecordingSink {
    /// Everything enabled.
    pub fn new() -> Self {
        Self::with_threshold(u32::MAX)
    }

    /// Enabled iff `rank <= threshold`.
    pub fn with_threshold(threshold: u32) -> Self {
        let shared = Shared {
            threshold: AtomicU32::new(threshold),
            ..Shared::default()
        };
        Self {
            shared: Arc::new(shared),
        }
    }

    pub fn set_threshold(&self, threshold: u32) {
        self.shared.threshold.store(threshold, Ordering::SeqCst);
    }

    /// Deny every emission carrying this marker, whatever its rank.
    pub fn deny_marker(&self, name: &str) {
        self.shared
            .denied_markers
            .lock()
            .unwrap()
            .insert(name.to_string());
    }

    pub fn set_fail_dispatch(&self, fail: bool) {
        self.shared.fail_dispatch.store(fail, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<CapturedRecord> {
        self.shared.records.lock().unwrap().clone()
    }

    pub fn dispatch_count(&self) -> usize {
        self.shared.dispatches.load(Ordering::SeqCst)
    }

    pub fn gate_checks(&self) -> usize {
        self.shared.gate_checks.load(Ordering::SeqCst)
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for RecordingSink {
    fn logger(&self, name: &str) -> Arc<dyn SinkHandle> {
        Arc::new(RecordingHandle {
            _name: name.to_string(),
            shared: self.shared.clone(),
        })
    }
}

struct RecordingHandle {
    _name: String,
    shared: Arc<Shared>,
}

impl SinkHandle for RecordingHandle {
    fn enabled(&self, rank: u32, marker: Option<&Marker>) -> bool {
        self.shared.gate_checks.fetch_add(1, Ordering::SeqCst);
        if rank > self.shared.threshold.load(Ordering::SeqCst) {
            return false;
        }
        if let Some(marker) = marker {
            if self
                .shared
                .denied_markers
                .lock()
                .unwrap()
                .contains(marker.name())
            {
                return false;
            }
        }
        true
    }

    fn dispatch(&self, record: LogRecord<'_>) -> Result<(), SinkError> {
        if self.shared.fail_dispatch.load(Ordering::SeqCst) {
            return Err(SinkError::dispatch("recording sink told to fail"));
        }
        self.shared.dispatches.fetch_add(1, Ordering::SeqCst);
        self.shared.records.lock().unwrap().push(CapturedRecord {
            attribution: record.attribution,
            level_name: record.level.name.to_string(),
            rank: record.level.rank,
            marker: record.marker.map(|marker| marker.name().to_string()),
            message: record.message,
            cause: record.cause.map(|cause| cause.to_string()),
            cause_addr: record
                .cause
                .map(|cause| std::ptr::from_ref(cause) as *const () as usize),
        });
        Ok(())
    }
}
