//! Second-order central finite-difference Helmholtz operator.
//!
//! Assembles `A = -Δ_h + k² I` in three steps:
//! 1. per-axis `[1, -2, 1]/h²` stencils combined by a Kronecker sum,
//! 2. the mass shift `k² I`,
//! 3. one pass over the rows that closes the boundary.
//!
//! Interior rows leave step 3 untouched. The boundary pass never converts the
//! matrix to another format; it rewrites rows while copying CSR once.

use crate::core::traits::Indexing;
use crate::error::{HelmError, Result};
use crate::grid::{Grid, MAX_DIMS};
use crate::matrix::{CsrMatrix, linear_combination};
use crate::operator::Discretisation;
use crate::operator::boundary::BoundaryCondition;
use crate::operator::stencil::laplacian;

/// Five/seven-point (1-D: three-point) finite-difference discretisation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FiniteDifference {
    pub boundary: BoundaryCondition,
}

impl FiniteDifference {
    pub fn new(boundary: BoundaryCondition) -> Self {
        Self { boundary }
    }
}

impl Discretisation for FiniteDifference {
    fn name(&self) -> String {
        format!("finite_difference/{}", self.boundary)
    }

    fn assemble(&self, grid: &Grid, wavenumber: f64) -> Result<CsrMatrix<f64>> {
        assemble_helmholtz(grid, wavenumber, self.boundary)
    }
}

/// Build `-Δ_h + k² I` with the requested boundary closure.
pub fn assemble_helmholtz(
    grid: &Grid,
    wavenumber: f64,
    boundary: BoundaryCondition,
) -> Result<CsrMatrix<f64>> {
    if !(1..=MAX_DIMS).contains(&grid.dims()) {
        return Err(HelmError::UnsupportedDimension(grid.dims()));
    }
    if !wavenumber.is_finite() {
        return Err(HelmError::InvalidWavenumber(wavenumber));
    }
    let n = grid.size();
    let lap = laplacian(grid, boundary);
    let shifted = linear_combination(-1.0, &lap, wavenumber * wavenumber, &CsrMatrix::identity(n));
    let operator = apply_boundary(grid, shifted, boundary);
    log::debug!(
        "assembled helmholtz operator: shape={:?}, k={}, boundary={}, n={}, nnz={}",
        grid.shape(),
        wavenumber,
        boundary,
        operator.nrows(),
        operator.nnz()
    );
    Ok(operator)
}

fn apply_boundary(grid: &Grid, a: CsrMatrix<f64>, boundary: BoundaryCondition) -> CsrMatrix<f64> {
    match boundary {
        // the wrap-around is already in the Laplacian
        BoundaryCondition::Periodic => a,
        BoundaryCondition::Dirichlet => a.map_rows(|row, entries| {
            if grid.is_boundary(&grid.unflatten(row)) {
                entries.clear();
                entries.push((row, 1.0));
            }
        }),
        BoundaryCondition::Neumann => {
            let inv_h2: Vec<f64> = grid.spacing().iter().map(|h| 1.0 / (h * h)).collect();
            a.map_rows(|row, entries| {
                let idx = grid.unflatten(row);
                // one 1/h² per face the node sits on; Δ_h gains it, so A loses it
                let shift: f64 = idx
                    .iter()
                    .zip(grid.shape())
                    .zip(&inv_h2)
                    .filter(|((i, n), _)| **i == 0 || **i == **n - 1)
                    .map(|(_, w)| *w)
                    .sum();
                if shift != 0.0 {
                    if let Some(diag) = entries.iter_mut().find(|(c, _)| *c == row) {
                        diag.1 -= shift;
                    }
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_dimensional_dirichlet_matches_closed_form() {
        let grid = Grid::new(1, &[5], &[1.0]).unwrap();
        let a = assemble_helmholtz(&grid, 2.0, BoundaryCondition::Dirichlet).unwrap();
        // h = 0.25, 1/h² = 16
        assert_relative_eq!(a.get(2, 2), 32.0 + 4.0);
        assert_relative_eq!(a.get(2, 1), -16.0);
        assert_relative_eq!(a.get(2, 3), -16.0);
        assert_eq!(a.row(0).collect::<Vec<_>>(), vec![(0, 1.0)]);
        assert_eq!(a.row(4).collect::<Vec<_>>(), vec![(4, 1.0)]);
    }

    #[test]
    fn neumann_corner_gets_both_faces() {
        let grid = Grid::new(2, &[3, 3], &[2.0, 1.0]).unwrap();
        // hx = 1, hy = 0.5 → 1/hx² = 1, 1/hy² = 4
        let a = assemble_helmholtz(&grid, 0.0, BoundaryCondition::Neumann).unwrap();
        let corner = grid.flatten(&[0, 0]);
        assert_relative_eq!(a.get(corner, corner), (2.0 + 8.0) - 1.0 - 4.0);
        let edge = grid.flatten(&[1, 0]);
        assert_relative_eq!(a.get(edge, edge), (2.0 + 8.0) - 4.0);
        let centre = grid.flatten(&[1, 1]);
        assert_relative_eq!(a.get(centre, centre), 10.0);
    }

    #[test]
    fn non_finite_wavenumber_is_rejected() {
        let grid = Grid::new(1, &[4], &[1.0]).unwrap();
        assert!(matches!(
            assemble_helmholtz(&grid, f64::INFINITY, BoundaryCondition::Dirichlet),
            Err(HelmError::InvalidWavenumber(_))
        ));
    }

    #[test]
    fn name_includes_boundary() {
        assert_eq!(FiniteDifference::new(BoundaryCondition::Periodic).name(), "finite_difference/periodic");
    }
}
