//! `RawAllocator` over the real libc allocator.
//!
//! Addresses cross the trait boundary as integers; this module is the only
//! place they are cast back to pointers. The tracker guarantees it never
//! forwards a free for an address it could not erase, so every pointer
//! handed to `libc::free`/`libc::realloc` here came out of a matching libc
//! allocation call.

use std::ffi::c_void;

use memtrack_core::RawAllocator;

/// The process allocator, unchanged: every call forwards straight to libc.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl SystemAllocator {
    /// A new handle; the allocator itself is process-global state.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RawAllocator for SystemAllocator {
    fn alloc(&self, size: usize) -> usize {
        // SAFETY: direct call to the libc allocator.
        (unsafe { libc::malloc(size) }) as usize
    }

    fn calloc(&self, count: usize, size: usize) -> usize {
        // SAFETY: direct call to the libc allocator; libc checks the
        // count * size overflow itself.
        (unsafe { libc::calloc(count, size) }) as usize
    }

    fn realloc(&self, address: usize, size: usize) -> usize {
        // SAFETY: `address` is either 0 or a live libc allocation (the
        // tracker masks frees it could not erase).
        (unsafe { libc::realloc(address as *mut c_void, size) }) as usize
    }

    fn free(&self, address: usize) {
        // SAFETY: as for realloc; freeing null is a no-op in libc.
        unsafe { libc::free(address as *mut c_void) }
    }
}
