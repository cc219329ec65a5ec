//! Fixed-capacity table of live allocations keyed by address.
//!
//! Slots are scanned linearly both to insert (first free slot wins) and to
//! look up or erase (first matching address wins). O(N) per operation with
//! N bounded at debugging scale; the linear scan keeps every slot observable
//! in the report, which lists leaks in slot order.

use thiserror::Error;

use crate::site::CallSite;

/// One live allocation: address, size and the call site that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationRecord {
    /// Address handed out by the raw allocator. Never 0 for a live record.
    pub address: usize,
    /// Requested size in bytes.
    pub size: usize,
    /// Where the allocation was made.
    pub site: CallSite,
}

/// No free slot left in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("allocation table is full")]
pub struct TableFull;

/// Fixed-capacity collection of live allocations. An empty slot is `None`.
///
/// Address 0 denotes "no allocation" throughout the tracker, so callers must
/// guard against a zero address before calling [`find`](Self::find) or
/// [`remove`](Self::remove); a zero address never matches a live record.
#[derive(Debug)]
pub struct AllocationTable {
    slots: Box<[Option<AllocationRecord>]>,
    live: usize,
}

impl AllocationTable {
    /// Create a table with `capacity` slots, all free.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            live: 0,
        }
    }

    /// Fill the first free slot with `record`.
    pub fn insert(&mut self, record: AllocationRecord) -> Result<(), TableFull> {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(record);
                self.live += 1;
                Ok(())
            }
            None => Err(TableFull),
        }
    }

    /// First live record whose address matches, if any.
    #[must_use]
    pub fn find(&self, address: usize) -> Option<&AllocationRecord> {
        self.slots
            .iter()
            .flatten()
            .find(|record| record.address == address)
    }

    /// Erase the live record at `address`, returning the slot to the free
    /// pool.
    pub fn remove(&mut self, address: usize) -> Option<AllocationRecord> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|r| r.address == address))?;
        self.live -= 1;
        slot.take()
    }

    /// Live records in slot order. Slots are reused, so this order is an
    /// implementation artifact, not allocation order.
    pub fn live_records(&self) -> impl Iterator<Item = &AllocationRecord> {
        self.slots.iter().flatten()
    }

    /// Number of live records.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Total number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// True if no free slot remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.live == self.slots.len()
    }
}
