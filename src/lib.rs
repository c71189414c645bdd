//! helmkrylov: finite-difference Helmholtz operators solved with GMRES
//!
//! This crate assembles the discrete Helmholtz operator `A = -Δ_h + k² I` on
//! 1-, 2- and 3-D structured grids (Kronecker-sum stencils with Dirichlet,
//! Neumann or periodic closure) and solves `A u = f` with a restarted GMRES
//! that records its residual history. Loads, sweeps over parameter products
//! and an operator cache round it out for discretisation and wavenumber studies.
//!
//! ```rust
//! use helmkrylov::prelude::*;
//!
//! let grid = Grid::new(2, &[12, 12], &[1.0, 1.0]).unwrap();
//! let a = assemble_helmholtz(&grid, 3.0, BoundaryCondition::Dirichlet).unwrap();
//! let f = PointSource::centre().build(&grid).unwrap();
//! let b = f.as_real().unwrap();
//! let res = GmresSolver::<f64>::new(1e-8, 200).solve(&a, b, None).unwrap();
//! assert!(res.converged);
//! ```

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod grid;
pub mod load;
pub mod matrix;
pub mod operator;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::{Diagnostics, GmresOptions, ToleranceMode};
pub use context::{HelmholtzProblem, OperatorCache, SweepConfig, SweepRecord};
pub use core::{Indexing, InnerProduct, KrylovScalar, MatVec};
pub use error::{HelmError, Result};
pub use grid::Grid;
pub use load::{Field, GaussianSource, Load, Location, PlaneWave, PointSource, RandomLoad};
pub use matrix::{CsrMatrix, TripletBuilder};
pub use operator::{BoundaryCondition, Discretisation, FiniteDifference, assemble_helmholtz};
pub use solver::{FieldResult, GmresSolver, LinearSolver, SolveStatus, SolverResult};

// Re-export SolveStats at the crate root for convenience
pub use utils::convergence::SolveStats;

/// Everything needed to assemble, load, solve and sweep.
pub mod prelude {
    pub use crate::config::{Diagnostics, GmresOptions, ToleranceMode};
    pub use crate::context::{HelmholtzProblem, OperatorCache, SweepConfig, SweepRecord, solve_field};
    pub use crate::core::{Indexing, InnerProduct, KrylovScalar, MatVec};
    pub use crate::error::HelmError;
    pub use crate::grid::Grid;
    pub use crate::load::{Field, GaussianSource, Load, Location, PlaneWave, PointSource, RandomLoad};
    pub use crate::matrix::{CsrMatrix, TripletBuilder};
    pub use crate::operator::{BoundaryCondition, Discretisation, FiniteDifference, assemble_helmholtz};
    pub use crate::solver::{FieldResult, GmresSolver, LinearSolver, SolveStatus, SolverResult};
    pub use crate::utils::convergence::SolveStats;
}
