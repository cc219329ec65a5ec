//! Capacity configuration for the tracker's fixed-size structures.
//!
//! Defaults match the debugging-scale bound of 1000 tracked allocations and
//! 1000 retained warnings. Both can be overridden via environment variables:
//! - `MEMTRACK_MAX_ALLOCATIONS`
//! - `MEMTRACK_MAX_WARNINGS`
//!
//! Invalid or missing values fall back to the defaults.

/// Default capacity of the allocation table (N).
pub const DEFAULT_MAX_ALLOCATIONS: usize = 1000;

/// Default capacity of the warning log (M).
pub const DEFAULT_MAX_WARNINGS: usize = 1000;

/// Capacity limits for one tracker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Maximum number of simultaneously tracked live allocations.
    pub max_allocations: usize,
    /// Maximum number of retained warnings.
    pub max_warnings: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_allocations: DEFAULT_MAX_ALLOCATIONS,
            max_warnings: DEFAULT_MAX_WARNINGS,
        }
    }
}

impl TrackerConfig {
    /// Read capacities from the environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_allocations: env_capacity("MEMTRACK_MAX_ALLOCATIONS", DEFAULT_MAX_ALLOCATIONS),
            max_warnings: env_capacity("MEMTRACK_MAX_WARNINGS", DEFAULT_MAX_WARNINGS),
        }
    }
}

fn env_capacity(var: &str, default: usize) -> usize {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(default),
        Err(_) => default,
    }
}
