//! Convergence tracking & tolerance checks for iterative solvers.

use crate::config::options::ToleranceMode;

/// Stopping criteria.
#[derive(Clone, Debug, PartialEq)]
pub struct Convergence {
    pub tol: f64,
    pub max_iters: usize,
    pub mode: ToleranceMode,
}

impl Convergence {
    /// Residual norm below which a run counts as converged.
    pub fn threshold(&self, b_norm: f64) -> f64 {
        match self.mode {
            ToleranceMode::Absolute => self.tol,
            ToleranceMode::Relative if b_norm > 0.0 => self.tol * b_norm,
            ToleranceMode::Relative => self.tol,
        }
    }

    /// True once `res_norm` is below `threshold`.
    pub fn is_converged(&self, res_norm: f64, threshold: f64) -> bool {
        res_norm < threshold
    }

    /// True once `i` Arnoldi steps have been spent.
    pub fn exhausted(&self, i: usize) -> bool {
        i >= self.max_iters
    }
}

/// Compact summary of a solve.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolveStats {
    pub iterations: usize,
    pub final_residual: f64,
    pub converged: bool,
}
