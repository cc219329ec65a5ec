//! Process-lifetime tracking state: allocation table, warning log and the
//! running byte totals.
//!
//! Errors here are local: every anomaly becomes a warning in the log and the
//! operation returns normally. `total_allocated - total_freed` equals the sum
//! of live record sizes for as long as the table never runs out of slots;
//! once an allocation is dropped for capacity the totals under-report live
//! bytes for the rest of the run.

use crate::config::TrackerConfig;
use crate::site::CallSite;
use crate::table::{AllocationRecord, AllocationTable};
use crate::warning::{WarningKind, WarningLog};

/// Mutable tracking state shared by all wrapping operations.
///
/// Not internally synchronized; [`TrackedAllocator`](crate::TrackedAllocator)
/// keeps one instance behind a mutex.
#[derive(Debug)]
pub struct TrackerState {
    table: AllocationTable,
    warnings: WarningLog,
    total_allocated: usize,
    total_freed: usize,
}

impl TrackerState {
    /// Fresh, zeroed state with the given capacities.
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            table: AllocationTable::with_capacity(config.max_allocations),
            warnings: WarningLog::with_capacity(config.max_warnings),
            total_allocated: 0,
            total_freed: 0,
        }
    }

    /// Record a completed raw allocation.
    ///
    /// A zero address means the raw allocator failed; that is recorded as an
    /// [`AllocationFailed`](WarningKind::AllocationFailed) warning. A full
    /// table records [`CapacityExceeded`](WarningKind::CapacityExceeded) and
    /// leaves the allocation untracked.
    pub fn record_alloc(&mut self, address: usize, size: usize, site: CallSite) {
        if address == 0 {
            self.warnings.push(WarningKind::AllocationFailed, site);
            return;
        }
        let record = AllocationRecord {
            address,
            size,
            site,
        };
        if self.table.insert(record).is_err() {
            self.warnings.push(WarningKind::CapacityExceeded, site);
            return;
        }
        self.total_allocated = self.total_allocated.saturating_add(size);
    }

    /// Record a free. Returns true if a live record was erased, meaning the
    /// raw free may proceed.
    pub fn record_free(&mut self, address: usize, site: CallSite) -> bool {
        if address == 0 {
            self.warnings.push(WarningKind::NullFree, site);
            return false;
        }
        match self.table.remove(address) {
            Some(record) => {
                self.total_freed = self.total_freed.saturating_add(record.size);
                true
            }
            None => {
                // Also fires for addresses freed while tracking was paused;
                // an accepted false-positive risk.
                self.warnings.push(WarningKind::DoubleFree, site);
                false
            }
        }
    }

    /// Live record at `address`, if tracked.
    #[must_use]
    pub fn find(&self, address: usize) -> Option<&AllocationRecord> {
        self.table.find(address)
    }

    /// Total bytes handed out through tracked allocations.
    #[must_use]
    pub fn total_allocated(&self) -> usize {
        self.total_allocated
    }

    /// Total bytes returned through tracked frees.
    #[must_use]
    pub fn total_freed(&self) -> usize {
        self.total_freed
    }

    /// Outstanding bytes according to the totals.
    #[must_use]
    pub fn leaked_bytes(&self) -> usize {
        self.total_allocated.saturating_sub(self.total_freed)
    }

    /// Live records in slot order.
    pub fn live_records(&self) -> impl Iterator<Item = &AllocationRecord> {
        self.table.live_records()
    }

    /// Number of live records.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.table.live_count()
    }

    /// The warning log.
    #[must_use]
    pub fn warnings(&self) -> &WarningLog {
        &self.warnings
    }

    /// Number of retained warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}
