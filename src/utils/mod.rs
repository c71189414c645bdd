//! Convergence criteria and solve statistics.

pub mod convergence;
pub use convergence::{Convergence, SolveStats};
