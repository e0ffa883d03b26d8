//! Shared test utilities for the OBD-II telemetry simulator.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with `#[track_caller]`
//! - [`assertions`] - Range and precision assertions for sensor values
//! - [`sources`] - Scripted and adversarial random sources
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! obdsim-test-helpers = { workspace = true }
//! ```
//!
//! ```rust,ignore
//! use obdsim_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod assertions;
pub mod must;
pub mod prelude;
pub mod sources;

pub use must::*;
