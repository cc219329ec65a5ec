//! Per-thread tracking suppression.
//!
//! Pausing affects only the calling thread: allocator calls made while
//! paused pass straight through to the raw allocator and are invisible to
//! later error detection. Pausing one thread never affects tracking on
//! another, which supports patterns like "ignore allocations inside this
//! specific worker's teardown path".

use std::cell::Cell;

thread_local! {
    static SUPPRESSED: Cell<bool> = const { Cell::new(false) };
}

/// Pause tracking on the calling thread. Idempotent.
pub fn pause() {
    SUPPRESSED.with(|flag| flag.set(true));
}

/// Resume tracking on the calling thread. Idempotent.
pub fn resume() {
    SUPPRESSED.with(|flag| flag.set(false));
}

/// Whether tracking is paused on the calling thread.
#[must_use]
pub fn is_paused() -> bool {
    SUPPRESSED.with(Cell::get)
}

/// Pause tracking until the returned guard is dropped. The guard restores
/// whatever state the flag had before, so scopes nest correctly.
#[must_use]
pub fn pause_scope() -> PauseGuard {
    let prev = is_paused();
    pause();
    PauseGuard { prev }
}

/// Restores the previous suppression state on drop.
#[derive(Debug)]
pub struct PauseGuard {
    prev: bool,
}

impl Drop for PauseGuard {
    fn drop(&mut self) {
        SUPPRESSED.with(|flag| flag.set(self.prev));
    }
}
