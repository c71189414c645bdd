//! Structural checks on assembled Helmholtz operators.
//!
//! Every boundary closure is assembled on 1-, 2- and 3-D grids and checked
//! against properties that hold independently of the stencil code: unit rows,
//! row sums, cyclic symmetry and the `k² I` shift.

use approx::assert_abs_diff_eq;
use helmkrylov::matrix::linear_combination;
use helmkrylov::operator::laplacian;
use helmkrylov::prelude::*;

fn grids() -> Vec<Grid> {
    vec![
        Grid::new(1, &[9], &[1.0]).unwrap(),
        Grid::new(2, &[5, 7], &[1.0, 2.0]).unwrap(),
        Grid::new(3, &[4, 3, 5], &[1.0, 0.5, 2.0]).unwrap(),
    ]
}

#[test]
fn operator_is_square_with_grid_size() {
    for grid in grids() {
        for bc in BoundaryCondition::ALL {
            let a = assemble_helmholtz(&grid, 1.5, bc).unwrap();
            assert_eq!(a.nrows(), grid.size());
            assert_eq!(a.ncols(), grid.size());
        }
    }
}

#[test]
fn dirichlet_boundary_rows_are_unit_rows() {
    for grid in grids() {
        let a = assemble_helmholtz(&grid, 3.0, BoundaryCondition::Dirichlet).unwrap();
        for idx in grid.nodes() {
            let row = grid.flatten(&idx);
            let entries: Vec<(usize, f64)> = a.row(row).collect();
            if grid.is_boundary(&idx) {
                assert_eq!(entries, vec![(row, 1.0)], "row {row} ({idx:?})");
            } else {
                assert_eq!(entries.len(), 2 * grid.dims() + 1);
            }
        }
    }
}

/// A(k) - A(0) is k² I on interior rows; A(k) + L is k² I there as well.
#[test]
fn wavenumber_shift_is_k_squared_identity_on_interior_rows() {
    let k = 2.5;
    for grid in grids() {
        let a0 = assemble_helmholtz(&grid, 0.0, BoundaryCondition::Dirichlet).unwrap();
        let ak = assemble_helmholtz(&grid, k, BoundaryCondition::Dirichlet).unwrap();
        let lap = laplacian(&grid, BoundaryCondition::Dirichlet);
        let diff = linear_combination(1.0, &ak, -1.0, &a0);
        let plus_lap = linear_combination(1.0, &ak, 1.0, &lap);
        for idx in grid.nodes().filter(|idx| !grid.is_boundary(idx)) {
            let row = grid.flatten(&idx);
            for m in [&diff, &plus_lap] {
                for (col, v) in m.row(row) {
                    let expected = if col == row { k * k } else { 0.0 };
                    assert_abs_diff_eq!(v, expected, epsilon = 1e-9);
                }
            }
        }
    }
}

#[test]
fn periodic_1d_operator_is_circulant() {
    let n = 8;
    let grid = Grid::new(1, &[n], &[1.0]).unwrap();
    let a = assemble_helmholtz(&grid, 4.0, BoundaryCondition::Periodic).unwrap();
    for i in 0..n {
        for j in 0..n {
            assert_abs_diff_eq!(a.get(i, j), a.get((i + 1) % n, (j + 1) % n), epsilon = 1e-12);
        }
    }
    // wrap-around entries exist
    assert!(a.get(0, n - 1) != 0.0);
    assert!(a.get(n - 1, 0) != 0.0);
}

#[test]
fn periodic_and_neumann_operators_are_symmetric() {
    for grid in grids() {
        for bc in [BoundaryCondition::Periodic, BoundaryCondition::Neumann] {
            let a = assemble_helmholtz(&grid, 1.0, bc).unwrap();
            for i in 0..a.nrows() {
                for (j, v) in a.row(i) {
                    assert_abs_diff_eq!(v, a.get(j, i), epsilon = 1e-9);
                }
            }
        }
    }
}

/// The Neumann mirror closure keeps constants in the kernel of -Δ_h.
#[test]
fn neumann_rows_sum_to_k_squared() {
    let k = 1.75;
    for grid in grids() {
        let a = assemble_helmholtz(&grid, k, BoundaryCondition::Neumann).unwrap();
        let ones = vec![1.0; grid.size()];
        let mut y = vec![0.0; grid.size()];
        a.matvec(&ones, &mut y);
        for yi in y {
            assert_abs_diff_eq!(yi, k * k, epsilon = 1e-9);
        }
    }
}

#[test]
fn three_dimensional_seven_point_weights() {
    let grid = Grid::new(3, &[3, 3, 3], &[2.0, 1.0, 0.5]).unwrap();
    // h = (1, 0.5, 0.25) → 1/h² = (1, 4, 16)
    let a = assemble_helmholtz(&grid, 0.0, BoundaryCondition::Dirichlet).unwrap();
    let c = grid.flatten(&[1, 1, 1]);
    assert_abs_diff_eq!(a.get(c, c), 2.0 * (1.0 + 4.0 + 16.0), epsilon = 1e-12);
    assert_abs_diff_eq!(a.get(c, grid.flatten(&[0, 1, 1])), -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(a.get(c, grid.flatten(&[1, 2, 1])), -4.0, epsilon = 1e-12);
    assert_abs_diff_eq!(a.get(c, grid.flatten(&[1, 1, 0])), -16.0, epsilon = 1e-12);
}

#[test]
fn discretisation_trait_object_dispatch() {
    let grid = Grid::new(2, &[4, 4], &[1.0, 1.0]).unwrap();
    let d: Box<dyn Discretisation> = Box::new(FiniteDifference::new(BoundaryCondition::Neumann));
    let a = helmkrylov::operator::assemble_operator(d.as_ref(), &grid, 2.0).unwrap();
    let b = assemble_helmholtz(&grid, 2.0, BoundaryCondition::Neumann).unwrap();
    assert_eq!(a.values(), b.values());
    assert_eq!(d.name(), "finite_difference/neumann");
}

#[test]
fn configuration_errors_fail_fast() {
    assert!(matches!("robin".parse::<BoundaryCondition>(), Err(HelmError::UnsupportedBoundary(_))));
    assert_eq!(" Periodic ".parse::<BoundaryCondition>().unwrap(), BoundaryCondition::Periodic);
    assert!(matches!(Grid::new(4, &[3; 4], &[1.0; 4]), Err(HelmError::InvalidGrid(_))));
    assert!(matches!(Grid::new(2, &[3, 1], &[1.0, 1.0]), Err(HelmError::InvalidGrid(_))));
    assert!(matches!(Grid::new(2, &[3, 3], &[1.0, -1.0]), Err(HelmError::InvalidGrid(_))));
}
