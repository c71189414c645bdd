//! Outcome of a Krylov solve: iterate, residual history and termination status.

use crate::error::{HelmError, Result};
use crate::load::Field;
use crate::utils::convergence::SolveStats;
use num_complex::Complex64;
use std::fmt;

/// Why the iteration stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SolveStatus {
    /// Residual fell below the threshold.
    Converged,
    /// Iteration budget spent; the last iterate is still returned.
    MaxIterations,
    /// Krylov subspace exhausted without meeting the tolerance.
    Breakdown,
    /// A residual norm became NaN or infinite.
    NonFiniteResidual,
}

impl SolveStatus {
    /// Numeric code: 0 converged, 1 iteration cap, 2 breakdown, -1 non-finite.
    pub fn code(self) -> i32 {
        match self {
            SolveStatus::Converged => 0,
            SolveStatus::MaxIterations => 1,
            SolveStatus::Breakdown => 2,
            SolveStatus::NonFiniteResidual => -1,
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Converged => "converged",
            SolveStatus::MaxIterations => "max_iterations",
            SolveStatus::Breakdown => "breakdown",
            SolveStatus::NonFiniteResidual => "non_finite_residual",
        };
        f.write_str(s)
    }
}

/// Result of [`LinearSolver::solve`](crate::solver::LinearSolver::solve).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolverResult<T> {
    /// Final iterate.
    pub solution: Vec<T>,
    /// `residuals[0] = ‖r₀‖`, then one entry per Arnoldi step.
    pub residuals: Vec<f64>,
    pub converged: bool,
    pub status: SolveStatus,
    /// rₖ for every recorded entry of `residuals`, when requested.
    pub residual_vectors: Option<Vec<Vec<T>>>,
}

impl<T> SolverResult<T> {
    /// Arnoldi steps taken.
    pub fn iterations(&self) -> usize {
        self.residuals.len().saturating_sub(1)
    }

    pub fn final_residual(&self) -> f64 {
        self.residuals.last().copied().unwrap_or(0.0)
    }

    /// History scaled by `norm` (typically ‖b‖); unchanged when `norm` is zero.
    pub fn relative_residuals(&self, norm: f64) -> Vec<f64> {
        if norm > 0.0 {
            self.residuals.iter().map(|r| r / norm).collect()
        } else {
            self.residuals.clone()
        }
    }

    pub fn stats(&self) -> SolveStats {
        SolveStats {
            iterations: self.iterations(),
            final_residual: self.final_residual(),
            converged: self.converged,
        }
    }

    /// Turn a non-finite status into [`HelmError::NonFiniteResidual`].
    pub fn check(self) -> Result<Self> {
        if self.status == SolveStatus::NonFiniteResidual {
            return Err(HelmError::NonFiniteResidual { iteration: self.iterations() });
        }
        Ok(self)
    }
}

/// Solve result for either a real or a complex right-hand side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldResult {
    Real(SolverResult<f64>),
    Complex(SolverResult<Complex64>),
}

impl FieldResult {
    pub fn residuals(&self) -> &[f64] {
        match self {
            FieldResult::Real(r) => &r.residuals,
            FieldResult::Complex(r) => &r.residuals,
        }
    }

    pub fn status(&self) -> SolveStatus {
        match self {
            FieldResult::Real(r) => r.status,
            FieldResult::Complex(r) => r.status,
        }
    }

    pub fn converged(&self) -> bool {
        self.status() == SolveStatus::Converged
    }

    pub fn stats(&self) -> SolveStats {
        match self {
            FieldResult::Real(r) => r.stats(),
            FieldResult::Complex(r) => r.stats(),
        }
    }

    pub fn solution(&self) -> Field {
        match self {
            FieldResult::Real(r) => Field::Real(r.solution.clone()),
            FieldResult::Complex(r) => Field::Complex(r.solution.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: SolveStatus, residuals: Vec<f64>) -> SolverResult<f64> {
        SolverResult {
            solution: vec![0.0; 2],
            converged: status == SolveStatus::Converged,
            residuals,
            status,
            residual_vectors: None,
        }
    }

    #[test]
    fn stats_follow_history() {
        let r = result(SolveStatus::MaxIterations, vec![4.0, 2.0, 1.0]);
        let s = r.stats();
        assert_eq!(s.iterations, 2);
        assert_eq!(s.final_residual, 1.0);
        assert!(!s.converged);
        assert_eq!(r.relative_residuals(4.0), vec![1.0, 0.5, 0.25]);
        assert_eq!(r.status.code(), 1);
    }

    #[test]
    fn check_rejects_non_finite_status_only() {
        let bad = result(SolveStatus::NonFiniteResidual, vec![1.0, f64::NAN]);
        assert_eq!(bad.check().unwrap_err(), HelmError::NonFiniteResidual { iteration: 1 });
        let ok = result(SolveStatus::Breakdown, vec![1.0, 0.5]);
        assert!(ok.check().is_ok());
    }
}
