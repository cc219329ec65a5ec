//! Backing allocator seam.
//!
//! The tracker wraps a raw allocator through [`RawAllocator`]. Addresses are
//! plain integers with 0 standing for null, which keeps this crate free of
//! unsafe code; the libc-backed implementation lives in `memtrack-sys`.
//!
//! [`LogicalAllocator`] is an address-only model of a real allocator: it
//! hands out monotonically increasing addresses without touching memory.
//! Tests, benchmarks and the harness stress driver run against it.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Raw allocation primitives the tracker builds on.
///
/// Implementations take `&self` and supply their own interior mutability so
/// one instance can serve multiple threads.
pub trait RawAllocator {
    /// Allocate `size` bytes. Returns 0 on failure.
    fn alloc(&self, size: usize) -> usize;

    /// Allocate a zeroed array of `count` elements of `size` bytes each.
    /// Returns 0 on failure (including multiplication overflow).
    fn calloc(&self, count: usize, size: usize) -> usize;

    /// Resize the allocation at `address` to `size` bytes, possibly moving
    /// it. Returns the new address, or 0 on failure with the original
    /// allocation untouched.
    fn realloc(&self, address: usize, size: usize) -> usize;

    /// Release the allocation at `address`.
    fn free(&self, address: usize);
}

/// Logical-address allocator for tests and simulation.
#[derive(Debug, Default)]
pub struct LogicalAllocator {
    inner: Mutex<LogicalState>,
}

#[derive(Debug)]
struct LogicalState {
    next_address: usize,
    /// address -> size of everything the backend considers live.
    live: HashMap<usize, usize>,
    fail_next: bool,
}

impl Default for LogicalState {
    fn default() -> Self {
        Self {
            // Start above the zero page so no valid address is ever 0.
            next_address: 0x1000,
            live: HashMap::new(),
            fail_next: false,
        }
    }
}

impl LogicalState {
    fn take_fail(&mut self) -> bool {
        std::mem::take(&mut self.fail_next)
    }

    fn hand_out(&mut self, size: usize) -> usize {
        let address = self.next_address;
        // Keep addresses 16-byte aligned like a real allocator would.
        let span = size.max(1).next_multiple_of(16);
        self.next_address = self.next_address.saturating_add(span);
        self.live.insert(address, size);
        address
    }
}

impl LogicalAllocator {
    /// Fresh allocator with nothing live.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next alloc/calloc/realloc return 0, for failure-path tests.
    pub fn fail_next_alloc(&self) {
        self.inner.lock().fail_next = true;
    }

    /// Bytes the backend itself considers live.
    #[must_use]
    pub fn live_bytes(&self) -> usize {
        self.inner.lock().live.values().sum()
    }

    /// Allocations the backend itself considers live.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.inner.lock().live.len()
    }
}

impl RawAllocator for LogicalAllocator {
    fn alloc(&self, size: usize) -> usize {
        let mut state = self.inner.lock();
        if state.take_fail() {
            return 0;
        }
        state.hand_out(size)
    }

    fn calloc(&self, count: usize, size: usize) -> usize {
        let Some(total) = count.checked_mul(size) else {
            return 0;
        };
        let mut state = self.inner.lock();
        if state.take_fail() {
            return 0;
        }
        state.hand_out(total)
    }

    fn realloc(&self, address: usize, size: usize) -> usize {
        let mut state = self.inner.lock();
        if state.take_fail() {
            return 0;
        }
        // The logical model always moves; good enough for tracking purposes.
        state.live.remove(&address);
        state.hand_out(size)
    }

    fn free(&self, address: usize) {
        self.inner.lock().live.remove(&address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_unique_and_nonzero() {
        let raw = LogicalAllocator::new();
        let a = raw.alloc(10);
        let b = raw.alloc(10);
        assert_ne!(a, 0);
        assert_ne!(b, 0);
        assert_ne!(a, b);
        assert_eq!(raw.live_count(), 2);
    }

    #[test]
    fn free_releases_live_bytes() {
        let raw = LogicalAllocator::new();
        let a = raw.alloc(100);
        assert_eq!(raw.live_bytes(), 100);
        raw.free(a);
        assert_eq!(raw.live_bytes(), 0);
    }

    #[test]
    fn calloc_checks_overflow() {
        let raw = LogicalAllocator::new();
        assert_eq!(raw.calloc(usize::MAX, 2), 0);
        assert_ne!(raw.calloc(10, 8), 0);
        assert_eq!(raw.live_bytes(), 80);
    }

    #[test]
    fn realloc_moves_the_allocation() {
        let raw = LogicalAllocator::new();
        let a = raw.alloc(16);
        let b = raw.realloc(a, 64);
        assert_ne!(b, 0);
        assert_ne!(a, b);
        assert_eq!(raw.live_bytes(), 64);
        assert_eq!(raw.live_count(), 1);
    }

    #[test]
    fn fail_next_alloc_fails_exactly_once() {
        let raw = LogicalAllocator::new();
        raw.fail_next_alloc();
        assert_eq!(raw.alloc(8), 0);
        assert_ne!(raw.alloc(8), 0);
    }
}
