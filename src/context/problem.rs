//! A single Helmholtz case: grid, wavenumber, discretisation and load.
//!
//! `HelmholtzProblem` ties the assembler, the load builders and GMRES
//! together for one combination. Real loads are solved in `f64`; the complex
//! plane wave is solved in `Complex64` against the same real operator.

use crate::config::options::GmresOptions;
use crate::error::Result;
use crate::grid::Grid;
use crate::load::{Field, Load};
use crate::matrix::CsrMatrix;
use crate::operator::Discretisation;
use crate::solver::{FieldResult, GmresSolver, LinearSolver};
use num_complex::Complex64;
use std::fmt;
use std::sync::Arc;

/// One fully specified run.
#[derive(Clone, Debug)]
pub struct HelmholtzProblem {
    pub grid: Grid,
    pub wavenumber: f64,
    pub discretisation: Arc<dyn Discretisation>,
    pub load: Arc<dyn Load>,
}

/// Everything produced by [`HelmholtzProblem::solve`].
#[derive(Clone, Debug)]
pub struct Solution {
    pub operator: Arc<CsrMatrix<f64>>,
    pub rhs: Field,
    pub result: FieldResult,
}

impl HelmholtzProblem {
    pub fn new(
        grid: Grid,
        wavenumber: f64,
        discretisation: impl Discretisation + 'static,
        load: impl Load + 'static,
    ) -> Self {
        Self { grid, wavenumber, discretisation: Arc::new(discretisation), load: Arc::new(load) }
    }

    /// Assemble the operator for this case.
    pub fn assemble(&self) -> Result<CsrMatrix<f64>> {
        self.discretisation.assemble(&self.grid, self.wavenumber)
    }

    /// Build the right-hand side for this case.
    pub fn rhs(&self) -> Result<Field> {
        self.load.build(&self.grid)
    }

    /// Assemble, build the load and run GMRES.
    pub fn solve(&self, options: &GmresOptions) -> Result<Solution> {
        let operator = Arc::new(self.assemble()?);
        self.solve_with(operator, options)
    }

    /// Like [`HelmholtzProblem::solve`] with an already assembled operator.
    pub fn solve_with(&self, operator: Arc<CsrMatrix<f64>>, options: &GmresOptions) -> Result<Solution> {
        let rhs = self.rhs()?;
        let result = solve_field(&operator, &rhs, options)?;
        Ok(Solution { operator, rhs, result })
    }
}

impl fmt::Display for HelmholtzProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shape={:?} k={} {} {}",
            self.grid.shape(),
            self.wavenumber,
            self.discretisation.name(),
            self.load.name()
        )
    }
}

/// Run GMRES in whichever scalar field `rhs` lives in.
pub fn solve_field(a: &CsrMatrix<f64>, rhs: &Field, options: &GmresOptions) -> Result<FieldResult> {
    match rhs {
        Field::Real(b) => {
            let mut solver = GmresSolver::<f64>::with_options(options.clone());
            solver.solve(a, b, None).map(FieldResult::Real)
        }
        Field::Complex(b) => {
            let mut solver = GmresSolver::<Complex64>::with_options(options.clone());
            solver.solve(a, b, None).map(FieldResult::Complex)
        }
    }
}
