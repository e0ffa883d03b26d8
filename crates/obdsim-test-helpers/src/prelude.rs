//! Convenience re-exports for common test utilities.

pub use crate::assertions::{assert_in_range, assert_rounded, has_two_decimals};
pub use crate::must::{must, must_parse, must_some, must_with};
pub use crate::sources::{Extreme, ExtremeSource, ScriptedSource};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
