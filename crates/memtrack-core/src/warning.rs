//! Bounded, append-only log of tracking anomalies.
//!
//! Warnings are the only propagation channel for tracking errors: they are
//! recorded here and surface in the generated report, never as exceptional
//! control flow to the caller.

use thiserror::Error;

use crate::site::CallSite;

/// Anomaly classes observed by the tracking operations.
///
/// The `Display` text is what the report prints for each warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WarningKind {
    /// The underlying allocator returned null.
    #[error("Memory allocation failed")]
    AllocationFailed,
    /// The allocation table has no free slot; the allocation succeeded but
    /// is invisible to the report from here on.
    #[error("Max allocations reached")]
    CapacityExceeded,
    /// `free` was called with a null address.
    #[error("Tried to free a null ptr")]
    NullFree,
    /// `free` (or the free side of `realloc`) was called with an address
    /// that has no live record.
    #[error("Double free detected")]
    DoubleFree,
}

/// One recorded anomaly. Append-only; never mutated or removed within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningRecord {
    /// What went wrong.
    pub kind: WarningKind,
    /// Where the offending call came from.
    pub site: CallSite,
}

/// Fixed-capacity warning log. Recording order is preserved; records beyond
/// capacity are dropped but counted so the report can note the truncation.
#[derive(Debug)]
pub struct WarningLog {
    records: Vec<WarningRecord>,
    capacity: usize,
    dropped: u64,
}

impl WarningLog {
    /// Create an empty log holding at most `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Record a warning.
    pub fn push(&mut self, kind: WarningKind, site: CallSite) {
        if self.records.len() < self.capacity {
            self.records.push(WarningRecord { kind, site });
        } else {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of retained records.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Warnings discarded because the log was full.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Records in recording order.
    pub fn iter(&self) -> impl Iterator<Item = &WarningRecord> {
        self.records.iter()
    }
}
