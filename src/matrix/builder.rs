//! Triplet (COO) accumulation compressed once into CSR.

use crate::core::scalar::KrylovScalar;
use crate::matrix::sparse::CsrMatrix;

/// Collects `(row, col, value)` entries; duplicates are summed on `build`.
#[derive(Clone, Debug)]
pub struct TripletBuilder<T> {
    nrows: usize,
    ncols: usize,
    triplets: Vec<(usize, usize, T)>,
}

impl<T: KrylovScalar> TripletBuilder<T> {
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self { nrows, ncols, triplets: Vec::new() }
    }

    pub fn with_capacity(nrows: usize, ncols: usize, capacity: usize) -> Self {
        Self { nrows, ncols, triplets: Vec::with_capacity(capacity) }
    }

    /// Append one entry. Panics if the position is out of bounds.
    pub fn push(&mut self, row: usize, col: usize, value: T) {
        assert!(
            row < self.nrows && col < self.ncols,
            "entry ({row}, {col}) outside {}x{}",
            self.nrows,
            self.ncols
        );
        self.triplets.push((row, col, value));
    }

    pub fn len(&self) -> usize {
        self.triplets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triplets.is_empty()
    }

    /// Sort by (row, col), merge duplicates, and compress into CSR.
    pub fn build(mut self) -> CsrMatrix<T> {
        self.triplets.sort_unstable_by_key(|&(r, c, _)| (r, c));
        let mut row_ptr = vec![0usize; self.nrows + 1];
        let mut col_idx = Vec::with_capacity(self.triplets.len());
        let mut values: Vec<T> = Vec::with_capacity(self.triplets.len());
        let mut last: Option<(usize, usize)> = None;
        for (r, c, v) in self.triplets {
            if last == Some((r, c)) {
                if let Some(tail) = values.last_mut() {
                    *tail += v;
                }
                continue;
            }
            row_ptr[r + 1] += 1;
            col_idx.push(c);
            values.push(v);
            last = Some((r, c));
        }
        for i in 0..self.nrows {
            row_ptr[i + 1] += row_ptr[i];
        }
        CsrMatrix::from_csr(self.nrows, self.ncols, row_ptr, col_idx, values)
    }
}
