//! Structured tensor-product grids.
//!
//! A [`Grid`] fixes the node ordering every other module relies on: the
//! multi-index `(i₀, …, i_{d-1})` flattens row-major, last axis fastest, so
//! `row = Σ iₐ · strideₐ` with `stride_{d-1} = 1`. The Kronecker products in
//! the assembler (`D₀ ⊗ I ⊗ …`) produce exactly this ordering.

use crate::error::{HelmError, Result};

/// Highest supported dimensionality.
pub const MAX_DIMS: usize = 3;

/// Immutable description of a 1-, 2- or 3-D structured grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    shape: Vec<usize>,
    lengths: Vec<f64>,
}

impl Grid {
    /// Validate and build a grid.
    ///
    /// Fails with [`HelmError::InvalidGrid`] when `dims` is outside `1..=3`,
    /// when `shape`/`lengths` do not have `dims` entries, when any axis has
    /// fewer than two nodes, or when any length is not a positive finite number.
    pub fn new(dims: usize, shape: &[usize], lengths: &[f64]) -> Result<Self> {
        if !(1..=MAX_DIMS).contains(&dims) {
            return Err(HelmError::InvalidGrid(format!(
                "only 1D, 2D or 3D grids are supported, got dims = {dims}"
            )));
        }
        if shape.len() != dims {
            return Err(HelmError::InvalidGrid(format!(
                "shape has {} entries but dims = {dims}",
                shape.len()
            )));
        }
        if lengths.len() != dims {
            return Err(HelmError::InvalidGrid(format!(
                "lengths has {} entries but dims = {dims}",
                lengths.len()
            )));
        }
        if let Some(&n) = shape.iter().find(|&&n| n <= 1) {
            return Err(HelmError::InvalidGrid(format!(
                "each axis needs at least two nodes, got {n}"
            )));
        }
        if let Some(&l) = lengths.iter().find(|&&l| !(l > 0.0 && l.is_finite())) {
            return Err(HelmError::InvalidGrid(format!(
                "domain lengths must be positive and finite, got {l}"
            )));
        }
        Ok(Self { shape: shape.to_vec(), lengths: lengths.to_vec() })
    }

    /// Same number of nodes and the same length on every axis.
    pub fn uniform(dims: usize, nodes: usize, length: f64) -> Result<Self> {
        Self::new(dims, &vec![nodes; dims], &vec![length; dims])
    }

    pub fn dims(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// `lengths[a] / (shape[a] - 1)` per axis.
    pub fn spacing(&self) -> Vec<f64> {
        self.shape
            .iter()
            .zip(&self.lengths)
            .map(|(&n, &l)| l / (n - 1) as f64)
            .collect()
    }

    /// Total number of nodes.
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// Row-major strides, last axis fastest.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.dims()];
        for a in (0..self.dims().saturating_sub(1)).rev() {
            strides[a] = strides[a + 1] * self.shape[a + 1];
        }
        strides
    }

    /// Linear row index of a multi-index.
    pub fn flatten(&self, idx: &[usize]) -> usize {
        debug_assert_eq!(idx.len(), self.dims());
        let mut linear = 0;
        let mut stride = 1;
        for (&i, &n) in idx.iter().rev().zip(self.shape.iter().rev()) {
            debug_assert!(i < n, "index {i} out of range for axis of {n} nodes");
            linear += i * stride;
            stride *= n;
        }
        linear
    }

    /// Inverse of [`Grid::flatten`].
    pub fn unflatten(&self, mut row: usize) -> Vec<usize> {
        let mut idx = vec![0; self.dims()];
        for (slot, &n) in idx.iter_mut().zip(&self.shape).rev() {
            *slot = row % n;
            row /= n;
        }
        idx
    }

    /// True when the node lies on the first or last plane of any axis.
    pub fn is_boundary(&self, idx: &[usize]) -> bool {
        idx.iter().zip(&self.shape).any(|(&i, &n)| i == 0 || i == n - 1)
    }

    /// Physical coordinates of a node (axes start at 0).
    pub fn coordinate(&self, idx: &[usize]) -> Vec<f64> {
        idx.iter().zip(self.spacing()).map(|(&i, h)| i as f64 * h).collect()
    }

    /// Nearest node to a physical point, clamped into the grid.
    pub fn nearest_node(&self, point: &[f64]) -> Vec<usize> {
        point
            .iter()
            .zip(self.spacing())
            .zip(&self.shape)
            .map(|((&x, h), &n)| {
                let lattice = (x / h).clamp(0.0, (n - 1) as f64);
                // NaN clamps to NaN; send it to the origin rather than panic
                if lattice.is_nan() { 0 } else { lattice.round() as usize }
            })
            .collect()
    }

    /// Multi-indices of every node in row order.
    pub fn nodes(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        (0..self.size()).map(move |row| self.unflatten(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn derived_quantities() {
        let g = Grid::new(2, &[5, 3], &[1.0, 4.0]).unwrap();
        assert_eq!(g.size(), 15);
        let h = g.spacing();
        assert_relative_eq!(h[0], 0.25);
        assert_relative_eq!(h[1], 2.0);
        assert_eq!(g.strides(), vec![3, 1]);
    }

    #[test]
    fn flatten_round_trips_last_axis_fastest() {
        let g = Grid::new(3, &[2, 3, 4], &[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(g.flatten(&[0, 0, 1]), 1);
        assert_eq!(g.flatten(&[0, 1, 0]), 4);
        assert_eq!(g.flatten(&[1, 0, 0]), 12);
        for row in 0..g.size() {
            assert_eq!(g.flatten(&g.unflatten(row)), row);
        }
    }

    #[test]
    fn invalid_grids_are_rejected() {
        assert!(matches!(Grid::new(0, &[], &[]), Err(HelmError::InvalidGrid(_))));
        assert!(matches!(Grid::new(4, &[2; 4], &[1.0; 4]), Err(HelmError::InvalidGrid(_))));
        assert!(matches!(Grid::new(2, &[3], &[1.0, 1.0]), Err(HelmError::InvalidGrid(_))));
        assert!(matches!(Grid::new(1, &[3], &[1.0, 1.0]), Err(HelmError::InvalidGrid(_))));
        assert!(matches!(Grid::new(1, &[1], &[1.0]), Err(HelmError::InvalidGrid(_))));
        assert!(matches!(Grid::new(1, &[4], &[0.0]), Err(HelmError::InvalidGrid(_))));
        assert!(matches!(Grid::new(1, &[4], &[-2.0]), Err(HelmError::InvalidGrid(_))));
        assert!(matches!(Grid::new(1, &[4], &[f64::NAN]), Err(HelmError::InvalidGrid(_))));
    }

    #[test]
    fn boundary_and_nearest_node() {
        let g = Grid::new(2, &[4, 4], &[3.0, 3.0]).unwrap();
        assert!(g.is_boundary(&[0, 2]));
        assert!(g.is_boundary(&[2, 3]));
        assert!(!g.is_boundary(&[1, 2]));
        assert_eq!(g.nearest_node(&[1.4, 1.6]), vec![1, 2]);
        assert_eq!(g.nearest_node(&[-5.0, 10.0]), vec![0, 3]);
    }
}
