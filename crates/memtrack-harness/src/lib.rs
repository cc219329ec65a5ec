//! Demo and stress driver for the memtrack allocation tracker.
//!
//! This crate provides:
//! - Scripted scenarios that drive a tracked allocator through known-bad
//!   allocation patterns (leak, double free, paused traffic)
//! - A deterministic pseudo-random stress trace for shaking out accounting
//!   drift at volume
//! - JSON output of the report summary for machine consumption

#![forbid(unsafe_code)]

pub mod scenario;

pub use scenario::{ScenarioOutcome, run_demo, run_stress};
