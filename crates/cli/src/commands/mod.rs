//! Command implementations for the obdsim CLI

pub mod inspect;
pub mod interactive;
pub mod run;

pub use run::RunArgs;
