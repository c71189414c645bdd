//! Krylov solver interfaces.

use crate::core::scalar::KrylovScalar;
use crate::error::Result;

/// Common interface for iterative solvers of `A x = b`.
///
/// `M` is the operator and `T` the scalar field of the vectors; a
/// preconditioned solver would plug in here as another implementation.
pub trait LinearSolver<M: ?Sized, T: KrylovScalar> {
    /// Solve A·x = b starting from `x0` (zero when `None`).
    ///
    /// Numerical failures are reported through [`SolverResult::status`];
    /// `Err` is reserved for calls that cannot start.
    fn solve(&mut self, a: &M, b: &[T], x0: Option<&[T]>) -> Result<SolverResult<T>>;
}

pub mod arnoldi;
pub use arnoldi::{ArnoldiStep, KrylovState};

pub mod gmres;
pub use gmres::GmresSolver;

pub mod result;
pub use result::{FieldResult, SolveStatus, SolverResult};
