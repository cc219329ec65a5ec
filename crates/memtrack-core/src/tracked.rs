//! Wrapping operations: the four allocator entry points plus report
//! generation, gated by the per-thread suppression flag.
//!
//! Tracking never changes allocator behavior. Every operation performs the
//! raw call and returns its result unconditionally; bookkeeping happens on
//! the side, under a mutex, unless the calling thread paused tracking or the
//! `tracking` feature is compiled out.

use parking_lot::Mutex;

use crate::config::TrackerConfig;
use crate::raw::RawAllocator;
use crate::report::{self, Report, ReportError, ReportSummary};
use crate::site::CallSite;
use crate::suppress;
use crate::table::AllocationRecord;
use crate::tracker::TrackerState;

/// Whether tracking is compiled in. With the `tracking` feature disabled
/// every entry point is a pure pass-through with no tracking side effects.
#[must_use]
pub const fn tracking_enabled() -> bool {
    cfg!(feature = "tracking")
}

/// A raw allocator instrumented with leak and error tracking.
///
/// Entry points are `#[track_caller]`; use the `*_at` variants to supply an
/// explicit [`CallSite`] when forwarding locations from another layer.
pub struct TrackedAllocator<A> {
    raw: A,
    state: Mutex<TrackerState>,
}

impl<A: RawAllocator> TrackedAllocator<A> {
    /// Wrap `raw` with default capacities.
    pub fn new(raw: A) -> Self {
        Self::with_config(raw, TrackerConfig::default())
    }

    /// Wrap `raw` with explicit capacities.
    pub fn with_config(raw: A, config: TrackerConfig) -> Self {
        Self {
            raw,
            state: Mutex::new(TrackerState::new(config)),
        }
    }

    /// The wrapped raw allocator.
    pub fn raw(&self) -> &A {
        &self.raw
    }

    fn bypass() -> bool {
        !tracking_enabled() || suppress::is_paused()
    }

    /// Tracked `malloc`.
    #[track_caller]
    pub fn allocate(&self, size: usize) -> usize {
        self.allocate_at(size, CallSite::caller())
    }

    /// Tracked `malloc` with an explicit call site.
    pub fn allocate_at(&self, size: usize, site: CallSite) -> usize {
        let address = self.raw.alloc(size);
        if !Self::bypass() {
            // A null result is recorded as a failed allocation.
            self.state.lock().record_alloc(address, size, site);
        }
        address
    }

    /// Tracked `calloc`. The recorded size is `count * size`.
    #[track_caller]
    pub fn allocate_zeroed(&self, count: usize, size: usize) -> usize {
        self.allocate_zeroed_at(count, size, CallSite::caller())
    }

    /// Tracked `calloc` with an explicit call site.
    pub fn allocate_zeroed_at(&self, count: usize, size: usize, site: CallSite) -> usize {
        let address = self.raw.calloc(count, size);
        if address != 0 && !Self::bypass() {
            self.state
                .lock()
                .record_alloc(address, count.saturating_mul(size), site);
        }
        address
    }

    /// Tracked `free`.
    #[track_caller]
    pub fn free(&self, address: usize) {
        self.free_at(address, CallSite::caller());
    }

    /// Tracked `free` with an explicit call site.
    ///
    /// A failed erase (null or double free) masks the raw free, so a
    /// detected double free cannot crash the host process; the cost is that
    /// the block stays allocated.
    pub fn free_at(&self, address: usize, site: CallSite) {
        if Self::bypass() {
            // Paused means "I know this is untracked": the raw call still
            // runs, with no bookkeeping and no later warning about it.
            self.raw.free(address);
            return;
        }
        if self.state.lock().record_free(address, site) {
            self.raw.free(address);
        }
    }

    /// Tracked `realloc`.
    #[track_caller]
    pub fn reallocate(&self, address: usize, size: usize) -> usize {
        self.reallocate_at(address, size, CallSite::caller())
    }

    /// Tracked `realloc` with an explicit call site.
    ///
    /// A null address behaves as an allocation; a zero size behaves as a
    /// free and returns 0; otherwise the old record is erased and the new
    /// address/size pair inserted once the raw call succeeds.
    pub fn reallocate_at(&self, address: usize, size: usize, site: CallSite) -> usize {
        if address == 0 {
            return self.allocate_at(size, site);
        }
        if size == 0 {
            self.free_at(address, site);
            return 0;
        }
        let new_address = self.raw.realloc(address, size);
        if new_address != 0 && !Self::bypass() {
            let mut state = self.state.lock();
            // The old record may legitimately be absent (e.g. the block was
            // created while tracking was paused); the erase still warns.
            state.record_free(address, site);
            state.record_alloc(new_address, size, site);
        }
        new_address
    }

    /// Render the leak/warning report from the current state.
    ///
    /// Read-only: generating a report twice in a row yields identical text.
    pub fn generate_report(&self) -> Result<Report, ReportError> {
        if !tracking_enabled() {
            return Err(ReportError::Disabled);
        }
        report::render(&self.state.lock())
    }

    /// Machine-readable summary of the current state.
    pub fn summary(&self) -> ReportSummary {
        report::summary(&self.state.lock())
    }

    /// Live record at `address`, if tracked.
    pub fn find(&self, address: usize) -> Option<AllocationRecord> {
        self.state.lock().find(address).copied()
    }

    /// Bytes handed out through tracked allocations.
    pub fn total_allocated(&self) -> usize {
        self.state.lock().total_allocated()
    }

    /// Bytes returned through tracked frees.
    pub fn total_freed(&self) -> usize {
        self.state.lock().total_freed()
    }

    /// `total_allocated - total_freed`.
    pub fn leaked_bytes(&self) -> usize {
        self.state.lock().leaked_bytes()
    }

    /// Number of live records.
    pub fn live_count(&self) -> usize {
        self.state.lock().live_count()
    }

    /// Number of retained warnings.
    pub fn warning_count(&self) -> usize {
        self.state.lock().warning_count()
    }
}
