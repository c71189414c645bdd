//! Solver configuration.

pub mod options;
pub use options::{Diagnostics, GmresOptions, ToleranceMode};
