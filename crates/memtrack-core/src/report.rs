//! Leak/warning report synthesis.
//!
//! Generation only reads tracker state, so it can run repeatedly and at any
//! point in the program. The buffer starts at 10 KiB and doubles whenever
//! the next section would overflow it; if growth ever fails the whole report
//! fails rather than emitting a truncated one.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::tracker::TrackerState;

/// Initial report buffer reservation in bytes.
const INITIAL_CAPACITY: usize = 10 * 1024;

const BANNER: &str = "----------------------------------\n";

/// Why report generation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Buffer growth failed; the partial buffer is released.
    #[error("out of memory while building report")]
    OutOfMemory,
    /// Tracking is compiled out; there is nothing to report.
    #[error("tracking is disabled, nothing to report")]
    Disabled,
}

/// An owned, rendered report. The caller holds the only copy; dropping it
/// releases the buffer.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report(String);

impl Report {
    /// Report text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the report, keeping the buffer.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Machine-readable counterpart of the rendered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Bytes handed out through tracked allocations.
    pub total_allocated: usize,
    /// Bytes returned through tracked frees.
    pub total_freed: usize,
    /// `total_allocated - total_freed`.
    pub leaked: usize,
    /// One entry per still-live record, in slot order.
    pub leaks: Vec<LeakEntry>,
    /// Retained warnings in recording order.
    pub warnings: Vec<WarningEntry>,
    /// Warnings discarded because the log was full.
    pub warnings_dropped: u64,
}

/// One leaked allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeakEntry {
    pub file: String,
    pub line: u32,
    pub size: usize,
}

/// One recorded warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningEntry {
    pub file: String,
    pub line: u32,
    pub message: String,
}

/// Append `text`, doubling the reservation when the section would overflow
/// it. Growth failure aborts the whole report.
fn append(buf: &mut String, text: &str) -> Result<(), ReportError> {
    let free = buf.capacity() - buf.len();
    if free < text.len() {
        let mut target = buf.capacity().max(INITIAL_CAPACITY);
        while target - buf.len() < text.len() {
            target = target.saturating_mul(2);
        }
        buf.try_reserve_exact(target - buf.len())
            .map_err(|_| ReportError::OutOfMemory)?;
    }
    buf.push_str(text);
    Ok(())
}

/// Render the human-readable report from a snapshot of tracker state.
///
/// Sections in fixed order: banner, totals, detailed leak listing (only when
/// freed != allocated), warnings (only when any were recorded), banner.
pub fn render(state: &TrackerState) -> Result<Report, ReportError> {
    let mut buf = String::new();
    buf.try_reserve_exact(INITIAL_CAPACITY)
        .map_err(|_| ReportError::OutOfMemory)?;

    append(&mut buf, "\n")?;
    append(&mut buf, BANNER)?;
    append(&mut buf, "memtrack Leak Summary:\n")?;
    append(&mut buf, BANNER)?;
    append(&mut buf, "\n")?;
    append(
        &mut buf,
        &format!(
            "   Total Memory allocated {} bytes\n",
            state.total_allocated()
        ),
    )?;
    append(
        &mut buf,
        &format!("   Total Memory freed     {} bytes\n", state.total_freed()),
    )?;
    append(
        &mut buf,
        &format!("   Memory Leaked          {} bytes\n", state.leaked_bytes()),
    )?;

    if state.total_freed() != state.total_allocated() {
        append(&mut buf, "\n   Detailed Report:\n")?;
        for record in state.live_records() {
            append(
                &mut buf,
                &format!(
                    "     Memory leak at {}: ({} bytes)\n",
                    record.site, record.size
                ),
            )?;
        }
    }

    if !state.warnings().is_empty() || state.warnings().dropped() > 0 {
        append(&mut buf, "\n   Warnings:\n")?;
        for warning in state.warnings().iter() {
            append(
                &mut buf,
                &format!("    - {}: {}\n", warning.site, warning.kind),
            )?;
        }
        if state.warnings().dropped() > 0 {
            append(
                &mut buf,
                &format!(
                    "    ({} more warnings were dropped)\n",
                    state.warnings().dropped()
                ),
            )?;
        }
    }

    append(&mut buf, "\n")?;
    append(&mut buf, BANNER)?;
    append(&mut buf, "\n")?;
    Ok(Report(buf))
}

/// Build the machine-readable summary from a snapshot of tracker state.
#[must_use]
pub fn summary(state: &TrackerState) -> ReportSummary {
    ReportSummary {
        total_allocated: state.total_allocated(),
        total_freed: state.total_freed(),
        leaked: state.leaked_bytes(),
        leaks: state
            .live_records()
            .map(|record| LeakEntry {
                file: record.site.file.to_owned(),
                line: record.site.line,
                size: record.size,
            })
            .collect(),
        warnings: state
            .warnings()
            .iter()
            .map(|warning| WarningEntry {
                file: warning.site.file.to_owned(),
                line: warning.site.line,
                message: warning.kind.to_string(),
            })
            .collect(),
        warnings_dropped: state.warnings().dropped(),
    }
}
