//! Dense reference matrices on top of Faer.
//!
//! Assembled operators are sparse; the dense view exists for validation
//! against faer's direct solvers on small grids.

use crate::core::traits::{Indexing, MatVec};
use crate::matrix::sparse::CsrMatrix;
use faer::Mat;

impl CsrMatrix<f64> {
    /// Materialise as a dense faer matrix. Only sensible for small operators.
    pub fn to_dense(&self) -> Mat<f64> {
        let mut dense = Mat::<f64>::zeros(self.nrows(), self.ncols());
        for i in 0..self.nrows() {
            for (j, v) in self.row(i) {
                dense[(i, j)] = v;
            }
        }
        dense
    }
}

impl Indexing for Mat<f64> {
    fn nrows(&self) -> usize {
        Mat::nrows(self)
    }
    fn ncols(&self) -> usize {
        Mat::ncols(self)
    }
}

/// Computes `y = A * x` for a dense faer matrix.
impl MatVec<f64> for Mat<f64> {
    fn matvec(&self, x: &[f64], y: &mut [f64]) {
        assert_eq!(Mat::nrows(self), y.len(), "Output vector y has incorrect length");
        assert_eq!(Mat::ncols(self), x.len(), "Input vector x has incorrect length");
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = (0..x.len()).map(|j| self[(i, j)] * x[j]).sum();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_view_matches_sparse_product() {
        let m = CsrMatrix::from_csr(2, 3, vec![0, 2, 4], vec![0, 1, 1, 2], vec![1.0, 2.0, 3.0, 4.0]);
        let d = m.to_dense();
        assert_eq!(d[(0, 1)], 2.0);
        assert_eq!(d[(1, 0)], 0.0);
        let x = vec![1.0, -1.0, 2.0];
        let (mut ys, mut yd) = (vec![0.0; 2], vec![0.0; 2]);
        m.spmv(&x, &mut ys);
        d.matvec(&x, &mut yd);
        assert_eq!(ys, yd);
    }
}
