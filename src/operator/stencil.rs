//! Per-axis second-derivative stencils and their tensor-product Laplacian.

use crate::grid::Grid;
use crate::matrix::{CsrMatrix, TripletBuilder, kron_sum};
use crate::operator::boundary::BoundaryCondition;

/// 1-D `d²/dx²` on `n` nodes of spacing `h`: tridiagonal `[1, -2, 1] / h²`.
///
/// With `periodic`, nodes `0` and `n - 1` are also coupled by `1/h²`.
pub fn second_derivative(n: usize, h: f64, periodic: bool) -> CsrMatrix<f64> {
    let inv_h2 = 1.0 / (h * h);
    let mut b = TripletBuilder::with_capacity(n, n, 3 * n + 2);
    for i in 0..n {
        if i > 0 {
            b.push(i, i - 1, inv_h2);
        }
        b.push(i, i, -2.0 * inv_h2);
        if i + 1 < n {
            b.push(i, i + 1, inv_h2);
        }
    }
    if periodic {
        b.push(0, n - 1, inv_h2);
        b.push(n - 1, 0, inv_h2);
    }
    b.build()
}

/// Discrete Laplacian `Δ_h = Σₐ I ⊗ … ⊗ Dₐ ⊗ … ⊗ I` on the grid.
///
/// Only the periodic wrap is part of this matrix; Dirichlet and Neumann
/// closures are row post-processing in the assembler.
pub fn laplacian(grid: &Grid, boundary: BoundaryCondition) -> CsrMatrix<f64> {
    let periodic = boundary == BoundaryCondition::Periodic;
    let factors: Vec<CsrMatrix<f64>> = grid
        .shape()
        .iter()
        .zip(grid.spacing())
        .map(|(&n, h)| second_derivative(n, h, periodic))
        .collect();
    kron_sum(&factors)
}
