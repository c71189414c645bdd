//! Core linear-algebra traits for helmkrylov.

use crate::core::scalar::KrylovScalar;

/// Uniform shape queries for operators.
pub trait Indexing {
    /// Number of rows.
    fn nrows(&self) -> usize;
    /// Number of columns.
    fn ncols(&self) -> usize;
}

/// Matrix–vector product: y ← A x.
///
/// The operator's own entries need not live in `T`: a real sparse operator
/// also acts on complex vectors.
pub trait MatVec<T>: Indexing {
    /// Compute y = A · x. `x.len() == ncols()`, `y.len() == nrows()`.
    fn matvec(&self, x: &[T], y: &mut [T]);
}

/// Inner products & norms.
pub trait InnerProduct<T: KrylovScalar> {
    /// Compute ⟨x, y⟩ = Σ conj(xᵢ) yᵢ (conjugate-linear in the left argument).
    fn dot(&self, x: &[T], y: &[T]) -> T;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &[T]) -> f64;
}
