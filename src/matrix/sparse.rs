// Compressed sparse row storage on top of faer.

use crate::core::scalar::KrylovScalar;
use crate::core::traits::{Indexing, MatVec};
use faer::sparse::{
    SparseRowMat,         // owning numeric CSR
    SymbolicSparseRowMat, // owning symbolic CSR
};
use num_complex::Complex64;
use std::fmt;

/// Square or rectangular CSR matrix with sorted, duplicate-free rows.
#[derive(Clone)]
pub struct CsrMatrix<T> {
    inner: SparseRowMat<usize, T>,
}

impl<T: KrylovScalar> CsrMatrix<T> {
    /// Build a CSR from raw row‐ptr, col‐idx, and values.
    ///
    /// Column indices within each row must be strictly increasing.
    pub fn from_csr(
        nrows: usize,
        ncols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_ptr.len(), nrows + 1, "row_ptr must have nrows + 1 entries");
        assert_eq!(col_idx.len(), values.len(), "col_idx and values lengths differ");
        // `None`: rows are contiguous, no separate row_nnz
        let symbolic = SymbolicSparseRowMat::new_checked(nrows, ncols, row_ptr, None, col_idx);
        let inner = SparseRowMat::new(symbolic, values);
        Self { inner }
    }

    /// n×n identity.
    pub fn identity(n: usize) -> Self {
        Self::from_csr(n, n, (0..=n).collect(), (0..n).collect(), vec![T::one(); n])
    }

    pub fn nnz(&self) -> usize {
        self.col_idx().len()
    }

    pub fn row_ptr(&self) -> &[usize] {
        self.inner.as_ref().symbolic().row_ptr()
    }

    pub fn col_idx(&self) -> &[usize] {
        self.inner.as_ref().symbolic().col_idx()
    }

    pub fn values(&self) -> &[T] {
        self.inner.as_ref().val()
    }

    /// Stored entries of row `i` as `(col, value)` in column order.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let rp = self.row_ptr();
        let range = rp[i]..rp[i + 1];
        self.col_idx()[range.clone()]
            .iter()
            .copied()
            .zip(self.values()[range].iter().copied())
    }

    /// Entry (i, j), zero when not stored.
    pub fn get(&self, i: usize, j: usize) -> T {
        let rp = self.row_ptr();
        let cols = &self.col_idx()[rp[i]..rp[i + 1]];
        match cols.binary_search(&j) {
            Ok(k) => self.values()[rp[i] + k],
            Err(_) => T::zero(),
        }
    }

    pub fn diagonal(&self) -> Vec<T> {
        (0..self.nrows().min(self.ncols())).map(|i| self.get(i, i)).collect()
    }

    /// Rebuild the matrix row by row in a single pass.
    ///
    /// `f` receives the row index and that row's entries and may rewrite them;
    /// columns must stay within bounds. Rows `f` leaves alone are copied as is.
    pub fn map_rows<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, &mut Vec<(usize, T)>),
    {
        let (nrows, ncols) = (self.nrows(), self.ncols());
        let mut row_ptr = Vec::with_capacity(nrows + 1);
        let mut col_idx = Vec::with_capacity(self.nnz());
        let mut values = Vec::with_capacity(self.nnz());
        let mut scratch: Vec<(usize, T)> = Vec::new();
        row_ptr.push(0);
        for i in 0..nrows {
            scratch.clear();
            scratch.extend(self.row(i));
            f(i, &mut scratch);
            scratch.sort_unstable_by_key(|&(c, _)| c);
            let mut last = None;
            for &(c, v) in scratch.iter() {
                assert!(c < ncols, "column {c} out of range in row {i}");
                if last == Some(c) {
                    if let Some(tail) = values.last_mut() {
                        *tail += v;
                    }
                    continue;
                }
                col_idx.push(c);
                values.push(v);
                last = Some(c);
            }
            row_ptr.push(col_idx.len());
        }
        Self::from_csr(nrows, ncols, row_ptr, col_idx, values)
    }

    /// y = A x where the entries of `x` may live in a wider field than `T`.
    fn spmv_with<V, F>(&self, x: &[V], y: &mut [V], mul: F)
    where
        V: KrylovScalar,
        F: Fn(T, V) -> V,
    {
        assert_eq!(x.len(), self.ncols(), "Input vector x has incorrect length");
        assert_eq!(y.len(), self.nrows(), "Output vector y has incorrect length");
        let rp = self.row_ptr();
        let cols = self.col_idx();
        let vals = self.values();
        for (i, yi) in y.iter_mut().enumerate() {
            let mut sum = V::zero();
            for k in rp[i]..rp[i + 1] {
                sum += mul(vals[k], x[cols[k]]);
            }
            *yi = sum;
        }
    }

    /// Compute y = A * x.
    pub fn spmv(&self, x: &[T], y: &mut [T]) {
        self.spmv_with(x, y, |a, xi| a * xi);
    }
}

impl CsrMatrix<f64> {
    /// Copy of this real matrix with complex entries.
    pub fn to_complex(&self) -> CsrMatrix<Complex64> {
        CsrMatrix::from_csr(
            self.nrows(),
            self.ncols(),
            self.row_ptr().to_vec(),
            self.col_idx().to_vec(),
            self.values().iter().map(|&v| Complex64::new(v, 0.0)).collect(),
        )
    }
}

impl<T> Indexing for CsrMatrix<T> {
    fn nrows(&self) -> usize {
        self.inner.nrows()
    }
    fn ncols(&self) -> usize {
        self.inner.ncols()
    }
}

impl<T: KrylovScalar> MatVec<T> for CsrMatrix<T> {
    fn matvec(&self, x: &[T], y: &mut [T]) {
        self.spmv(x, y);
    }
}

/// A real operator applied to a complex field (plane-wave loads).
impl MatVec<Complex64> for CsrMatrix<f64> {
    fn matvec(&self, x: &[Complex64], y: &mut [Complex64]) {
        self.spmv_with(x, y, |a, xi| xi.scale(a));
    }
}

impl<T> fmt::Debug for CsrMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrMatrix")
            .field("nrows", &self.inner.nrows())
            .field("ncols", &self.inner.ncols())
            .field("nnz", &self.inner.as_ref().symbolic().col_idx().len())
            .finish()
    }
}
