//! Experiment orchestration for helmkrylov.
//!
//! This module strings the assembler, the load builders and GMRES together.
//! A [`HelmholtzProblem`] is one fully specified case; a [`SweepConfig`]
//! enumerates the Cartesian product of grids, wavenumbers, loads and
//! discretisations and collects a [`SweepRecord`] per case.
//!
//! Modules:
//! - [`problem`]: single-case assembly and solve, real or complex.
//! - [`cache`]: build-once operator cache shared between cases.
//! - [`sweep`]: the sweep driver, sequential or rayon-parallel.
//!
//! # Example
//! ```rust
//! use helmkrylov::prelude::*;
//!
//! let records = SweepConfig::new(GmresOptions::new(1e-8, 100))
//!     .with_grid(Grid::new(1, &[16], &[1.0]).unwrap())
//!     .with_wavenumbers([1.0, 4.0])
//!     .with_load(PointSource::centre())
//!     .with_discretisation(FiniteDifference::new(BoundaryCondition::Dirichlet))
//!     .run()
//!     .unwrap();
//! assert_eq!(records.len(), 2);
//! ```

pub mod cache;
pub use cache::{OperatorCache, OperatorKey};
pub mod problem;
pub use problem::{HelmholtzProblem, Solution, solve_field};
pub mod sweep;
pub use sweep::{CaseHook, SweepConfig, SweepRecord};
