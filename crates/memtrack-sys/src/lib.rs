//! # memtrack-sys
//!
//! System-allocator backend for the memtrack engine: a [`RawAllocator`]
//! implementation over the real libc `malloc`/`calloc`/`realloc`/`free`,
//! plus the process-wide tracker instance and its pointer-typed entry
//! points. The per-thread pause/resume switches are re-exported here so a
//! host program needs only this crate.
//!
//! [`RawAllocator`]: memtrack_core::RawAllocator

pub mod global;
pub mod system;

pub use global::{calloc, free, global_tracker, malloc, realloc, report};
pub use memtrack_core::suppress::{PauseGuard, pause, pause_scope, resume};
pub use system::SystemAllocator;
