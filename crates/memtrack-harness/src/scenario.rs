//! Scripted allocator scenarios, runnable against any tracked allocator.

use memtrack_core::{RawAllocator, Report, ReportError, TrackedAllocator, suppress};

/// Everything a scenario produces: the rendered report plus the summary the
/// JSON output is built from.
#[derive(Debug)]
pub struct ScenarioOutcome {
    /// Human-readable report text.
    pub report: Report,
    /// Machine-readable counterpart.
    pub summary: memtrack_core::ReportSummary,
}

/// The classic demo: a clean alloc/free pair, a double free, untracked
/// traffic under a pause scope, and one leaked allocation.
///
/// Expected report: 300 bytes allocated, 100 freed, 200 leaked, one leak
/// entry and one double-free warning.
pub fn run_demo<A: RawAllocator>(
    tracker: &TrackedAllocator<A>,
) -> Result<ScenarioOutcome, ReportError> {
    let data = tracker.allocate(100);
    tracker.free(data);
    tracker.free(data); // double free; detected, masked from the allocator

    {
        // Untracked scratch traffic: invisible to the report.
        let _pause = suppress::pause_scope();
        let scratch = tracker.allocate(512);
        tracker.free(scratch);
    }

    leak_some_memory(tracker);

    let report = tracker.generate_report()?;
    let summary = tracker.summary();
    Ok(ScenarioOutcome { report, summary })
}

/// The bad function of the demo: allocates and forgets.
fn leak_some_memory<A: RawAllocator>(tracker: &TrackedAllocator<A>) {
    let _leaked = tracker.allocate(200);
}

/// Drive `ops` pseudo-random alloc/free/realloc operations through the
/// tracker, then report. The trace is fully determined by `seed`, so two
/// runs with the same arguments produce the same report.
///
/// Whatever is still live when the trace ends is left leaked on purpose;
/// that is what the report is for.
pub fn run_stress<A: RawAllocator>(
    tracker: &TrackedAllocator<A>,
    ops: u64,
    seed: u64,
) -> Result<ScenarioOutcome, ReportError> {
    fn lcg(state: &mut u64) -> u64 {
        *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        *state
    }

    let mut live: Vec<usize> = Vec::new();
    let mut rng = seed;

    for _ in 0..ops {
        let r = lcg(&mut rng);
        match r % 4 {
            // Allocation is twice as likely as each of free/realloc, so the
            // trace ends with a healthy crop of leaks.
            0 | 1 => {
                let size = ((r >> 8) as usize % 2048).max(1);
                let address = tracker.allocate(size);
                if address != 0 {
                    live.push(address);
                }
            }
            2 if !live.is_empty() => {
                let idx = (r as usize) % live.len();
                tracker.free(live.swap_remove(idx));
            }
            3 if !live.is_empty() => {
                let idx = (r as usize) % live.len();
                let new_size = ((r >> 16) as usize) % 2048;
                let next = tracker.reallocate(live[idx], new_size);
                if new_size == 0 {
                    live.swap_remove(idx);
                } else if next != 0 {
                    live[idx] = next;
                }
            }
            _ => {}
        }
    }

    let report = tracker.generate_report()?;
    let summary = tracker.summary();
    Ok(ScenarioOutcome { report, summary })
}
