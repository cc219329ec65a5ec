//! Integration test: tracking invariants under operation sequences.
//!
//! Drives a `TrackedAllocator<LogicalAllocator>` through scripted and
//! deterministic pseudo-random traces and checks the accounting invariants
//! and report output.
//!
//! Run: cargo test -p memtrack-core --test tracker_invariants_sequences_test

#![cfg(feature = "tracking")]

use std::sync::Arc;
use std::thread;

use memtrack_core::{LogicalAllocator, TrackedAllocator, TrackerConfig, suppress};

fn tracker() -> TrackedAllocator<LogicalAllocator> {
    TrackedAllocator::new(LogicalAllocator::new())
}

// ---------------------------------------------------------------------------
// 1. Paired allocations balance out
// ---------------------------------------------------------------------------

#[test]
fn paired_alloc_free_balances_and_reports_zero_leak() {
    let tracker = tracker();
    let addresses: Vec<usize> = [16usize, 50, 100, 4096]
        .iter()
        .map(|&size| tracker.allocate(size))
        .collect();
    for address in addresses {
        tracker.free(address);
    }
    assert_eq!(tracker.total_allocated(), tracker.total_freed());
    let report = tracker.generate_report().unwrap();
    assert!(report.as_str().contains("Memory Leaked          0 bytes"));
    assert!(!report.as_str().contains("Detailed Report:"));
}

// ---------------------------------------------------------------------------
// 2. The canonical double-free-plus-leak scenario
// ---------------------------------------------------------------------------

#[test]
fn double_free_and_leak_scenario_reports_exact_totals() {
    let tracker = tracker();

    let a = tracker.allocate(100);
    tracker.free(a);
    tracker.free(a); // double free, warned once
    let _leaked = tracker.allocate(50); // never freed

    let report = tracker.generate_report().unwrap();
    let text = report.as_str();
    assert!(text.contains("Total Memory allocated 150 bytes"));
    assert!(text.contains("Total Memory freed     100 bytes"));
    assert!(text.contains("Memory Leaked          50 bytes"));
    assert_eq!(text.matches("Memory leak at").count(), 1);
    assert_eq!(text.matches("Double free detected").count(), 1);
    assert!(text.contains("(50 bytes)"));
}

// ---------------------------------------------------------------------------
// 3. Suppression is scoped to the pausing thread
// ---------------------------------------------------------------------------

#[test]
fn pausing_one_thread_does_not_affect_another() {
    let tracker = Arc::new(tracker());

    suppress::pause();
    let hidden = tracker.allocate(999); // invisible to the report

    let worker = {
        let tracker = Arc::clone(&tracker);
        thread::spawn(move || tracker.allocate(32))
    };
    let visible = worker.join().unwrap();
    suppress::resume();

    assert_ne!(hidden, 0);
    assert_ne!(visible, 0);
    assert_eq!(tracker.total_allocated(), 32);
    assert_eq!(tracker.live_count(), 1);
    assert_eq!(tracker.find(visible).map(|r| r.size), Some(32));
    assert!(tracker.find(hidden).is_none());
    assert_eq!(tracker.warning_count(), 0);
}

// ---------------------------------------------------------------------------
// 4. Concurrent tracked traffic keeps the table consistent
// ---------------------------------------------------------------------------

#[test]
fn concurrent_alloc_free_keeps_totals_consistent() {
    let tracker = Arc::new(tracker());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                for _ in 0..200 {
                    let address = tracker.allocate(24);
                    tracker.free(address);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(tracker.total_allocated(), 4 * 200 * 24);
    assert_eq!(tracker.total_freed(), 4 * 200 * 24);
    assert_eq!(tracker.live_count(), 0);
    assert_eq!(tracker.warning_count(), 0);
}

// ---------------------------------------------------------------------------
// 5. Deterministic pseudo-random trace holds the accounting invariant
// ---------------------------------------------------------------------------

#[test]
fn accounting_invariant_under_deterministic_trace() {
    fn lcg(state: &mut u64) -> u64 {
        *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        *state
    }

    let tracker = TrackedAllocator::with_config(
        LogicalAllocator::new(),
        TrackerConfig {
            max_allocations: 4096,
            max_warnings: 16,
        },
    );
    let mut live: Vec<usize> = Vec::new();
    let mut rng = 0xA5A5_5A5A_DEAD_BEEFu64;

    for _ in 0..1500 {
        let r = lcg(&mut rng);
        match r % 3 {
            0 => {
                let size = ((r >> 8) as usize % 512).max(1);
                let address = tracker.allocate(size);
                assert_ne!(address, 0);
                live.push(address);
            }
            1 if !live.is_empty() => {
                let idx = (r as usize) % live.len();
                tracker.free(live.swap_remove(idx));
            }
            2 if !live.is_empty() => {
                let idx = (r as usize) % live.len();
                let new_size = ((r >> 16) as usize) % 512;
                let next = tracker.reallocate(live[idx], new_size);
                if new_size == 0 {
                    // realloc(ptr, 0) behaves like free(ptr)
                    live.swap_remove(idx);
                    assert_eq!(next, 0);
                } else {
                    assert_ne!(next, 0);
                    live[idx] = next;
                }
            }
            _ => {}
        }

        let tracked_sum: usize = live
            .iter()
            .map(|&address| {
                tracker
                    .find(address)
                    .expect("all live addresses must stay tracked")
                    .size
            })
            .sum();
        assert_eq!(tracker.live_count(), live.len());
        assert_eq!(tracker.leaked_bytes(), tracked_sum);
        // The tracker and the backend agree on what is outstanding.
        assert_eq!(tracker.raw().live_bytes(), tracked_sum);
    }
    assert_eq!(tracker.warning_count(), 0);
}

// ---------------------------------------------------------------------------
// 6. Capacity exhaustion under-reports but never lies about warnings
// ---------------------------------------------------------------------------

#[test]
fn table_overflow_yields_one_warning_per_untracked_allocation() {
    let tracker = TrackedAllocator::with_config(
        LogicalAllocator::new(),
        TrackerConfig {
            max_allocations: 8,
            max_warnings: 64,
        },
    );
    let addresses: Vec<usize> = (0..12).map(|_| tracker.allocate(10)).collect();
    assert!(addresses.iter().all(|&a| a != 0));
    assert_eq!(tracker.live_count(), 8);
    assert_eq!(tracker.total_allocated(), 80);
    assert_eq!(tracker.warning_count(), 4);
    // The raw allocator saw every allocation regardless.
    assert_eq!(tracker.raw().live_bytes(), 120);
}
