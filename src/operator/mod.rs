//! Helmholtz operator assembly.
//!
//! This module defines the [`Discretisation`] trait and the finite-difference
//! implementation. Every discretisation produces the same sign convention,
//! `A = -Δ_h + k² I`, so operators from different discretisations can be
//! compared directly.
//!
//! # References
//! - LeVeque, R. J. (2007). Finite Difference Methods for Ordinary and Partial
//!   Differential Equations. SIAM. §3 (Kronecker-sum Laplacians).

use crate::error::Result;
use crate::grid::Grid;
use crate::matrix::CsrMatrix;
use std::fmt::Debug;

/// Turns a grid and a wavenumber into a sparse Helmholtz operator.
pub trait Discretisation: Debug + Send + Sync {
    /// Stable label, also used as the operator-cache key.
    fn name(&self) -> String;
    /// Assemble `-Δ_h + k² I` including the boundary closure.
    fn assemble(&self, grid: &Grid, wavenumber: f64) -> Result<CsrMatrix<f64>>;
}

pub mod boundary;
pub mod finite_difference;
pub mod stencil;

pub use boundary::BoundaryCondition;
pub use finite_difference::{FiniteDifference, assemble_helmholtz};
pub use stencil::{laplacian, second_derivative};

/// Dispatch helper for trait objects.
pub fn assemble_operator(
    discretisation: &dyn Discretisation,
    grid: &Grid,
    wavenumber: f64,
) -> Result<CsrMatrix<f64>> {
    discretisation.assemble(grid, wavenumber)
}
