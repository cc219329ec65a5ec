//! Call-site tagging for tracked allocator operations.
//!
//! The original design tagged call sites through textual macro substitution
//! of `__LINE__`/`__FILE__`. Here every wrapping entry point is
//! `#[track_caller]` instead, so the location is captured implicitly while
//! the wrappers stay ordinary functions.

use std::fmt;
use std::panic::Location;

/// Source location that issued an allocator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// Source file of the call.
    pub file: &'static str,
    /// Source line of the call.
    pub line: u32,
}

impl CallSite {
    /// Build a call site from explicit coordinates.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Capture the location of the caller.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_points_into_this_file() {
        let site = CallSite::caller();
        assert!(site.file.ends_with("site.rs"));
        assert!(site.line > 0);
    }

    #[test]
    fn track_caller_propagates_through_helpers() {
        #[track_caller]
        fn capture() -> CallSite {
            CallSite::caller()
        }
        let here = line!();
        let site = capture();
        assert_eq!(site.line, here + 1);
    }

    #[test]
    fn display_is_file_colon_line() {
        let site = CallSite::new("demo.rs", 42);
        assert_eq!(site.to_string(), "demo.rs:42");
    }
}
