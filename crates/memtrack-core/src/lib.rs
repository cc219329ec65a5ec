//! # memtrack-core
//!
//! Allocation tracking engine. Intercepted allocator calls are recorded in a
//! fixed-capacity table of live allocations, anomalies (null frees, double
//! frees, allocation failures, capacity exhaustion) land in a bounded warning
//! log, and a human-readable leak report can be synthesized at any time.
//!
//! The engine is allocator-agnostic: it wraps anything implementing
//! [`raw::RawAllocator`] and never changes the wrapped allocator's behavior.
//! Addresses are plain integers so this crate needs no `unsafe` code at all;
//! the pointer-typed system backend lives in `memtrack-sys`.

#![deny(unsafe_code)]

pub mod config;
pub mod raw;
pub mod report;
pub mod site;
pub mod suppress;
pub mod table;
pub mod tracked;
pub mod tracker;
pub mod warning;

pub use config::TrackerConfig;
pub use raw::{LogicalAllocator, RawAllocator};
pub use report::{Report, ReportError, ReportSummary};
pub use site::CallSite;
pub use table::AllocationRecord;
pub use tracked::TrackedAllocator;
pub use tracker::TrackerState;
pub use warning::{WarningKind, WarningRecord};
