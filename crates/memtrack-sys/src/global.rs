//! Process-wide tracker instance and pointer-typed entry points.
//!
//! The tracker is an explicitly owned singleton behind a `OnceLock`,
//! initialized from the environment on first use. The free functions below
//! mirror the classic allocator surface (`malloc`, `calloc`, `realloc`,
//! `free`) so a host program can route its allocations through the tracker
//! with a one-line change per call site; `#[track_caller]` tags each call
//! with the caller's file and line.
//!
//! The returned [`Report`] owns its buffer: dropping it releases it, and
//! since the report string is allocated by Rust's own allocator it never
//! shows up in this tracker's table.

use std::ffi::c_void;
use std::sync::OnceLock;

use memtrack_core::{Report, ReportError, TrackedAllocator, TrackerConfig};

use crate::system::SystemAllocator;

static GLOBAL_TRACKER: OnceLock<TrackedAllocator<SystemAllocator>> = OnceLock::new();

/// The process-wide tracker, created on first use with capacities read from
/// `MEMTRACK_MAX_ALLOCATIONS` / `MEMTRACK_MAX_WARNINGS`.
#[must_use]
pub fn global_tracker() -> &'static TrackedAllocator<SystemAllocator> {
    GLOBAL_TRACKER
        .get_or_init(|| TrackedAllocator::with_config(SystemAllocator::new(), TrackerConfig::from_env()))
}

/// Tracked `malloc` against the process-wide tracker.
#[track_caller]
#[must_use]
pub fn malloc(size: usize) -> *mut c_void {
    global_tracker().allocate(size) as *mut c_void
}

/// Tracked `calloc` against the process-wide tracker.
#[track_caller]
#[must_use]
pub fn calloc(count: usize, size: usize) -> *mut c_void {
    global_tracker().allocate_zeroed(count, size) as *mut c_void
}

/// Tracked `realloc` against the process-wide tracker.
#[track_caller]
#[must_use]
pub fn realloc(ptr: *mut c_void, size: usize) -> *mut c_void {
    global_tracker().reallocate(ptr as usize, size) as *mut c_void
}

/// Tracked `free` against the process-wide tracker.
#[track_caller]
pub fn free(ptr: *mut c_void) {
    global_tracker().free(ptr as usize);
}

/// Leak/warning report for the process-wide tracker.
pub fn report() -> Result<Report, ReportError> {
    global_tracker().generate_report()
}
