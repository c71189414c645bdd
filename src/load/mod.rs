//! Right-hand sides for the Helmholtz system.
//!
//! Loads are laid out in the grid's row-major node order (see
//! [`Grid::flatten`]), the same order the assembler uses for operator rows.
//! Real loads come back as [`Field::Real`]; the plane wave is genuinely
//! complex and comes back as [`Field::Complex`].

use crate::error::Result;
use crate::grid::Grid;
use num_complex::Complex64;
use std::fmt::Debug;

/// A dense nodal field in either scalar field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Field {
    Real(Vec<f64>),
    Complex(Vec<Complex64>),
}

impl Field {
    pub fn len(&self) -> usize {
        match self {
            Field::Real(v) => v.len(),
            Field::Complex(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Field::Complex(_))
    }

    pub fn as_real(&self) -> Option<&[f64]> {
        match self {
            Field::Real(v) => Some(v),
            Field::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Option<&[Complex64]> {
        match self {
            Field::Complex(v) => Some(v),
            Field::Real(_) => None,
        }
    }

    /// Promote to complex values (real fields get zero imaginary parts).
    pub fn into_complex(self) -> Vec<Complex64> {
        match self {
            Field::Real(v) => v.into_iter().map(|x| Complex64::new(x, 0.0)).collect(),
            Field::Complex(v) => v,
        }
    }

    /// ‖f‖₂
    pub fn norm(&self) -> f64 {
        match self {
            Field::Real(v) => v.iter().map(|x| x * x).sum::<f64>().sqrt(),
            Field::Complex(v) => v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt(),
        }
    }
}

impl From<Vec<f64>> for Field {
    fn from(v: Vec<f64>) -> Self {
        Field::Real(v)
    }
}

impl From<Vec<Complex64>> for Field {
    fn from(v: Vec<Complex64>) -> Self {
        Field::Complex(v)
    }
}

/// Builds a right-hand side for a grid.
pub trait Load: Debug + Send + Sync {
    /// Short label used in sweep records and logs.
    fn name(&self) -> String;
    /// Field of length `grid.size()` in row-major node order.
    fn build(&self, grid: &Grid) -> Result<Field>;
}

pub mod gaussian;
pub mod plane_wave;
pub mod point;
pub mod random;

pub use gaussian::GaussianSource;
pub use plane_wave::PlaneWave;
pub use point::{Location, PointSource};
pub use random::RandomLoad;

/// Dispatch helper for trait objects.
pub fn build_load(load: &dyn Load, grid: &Grid) -> Result<Field> {
    load.build(grid)
}
