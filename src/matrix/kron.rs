//! Sparse Kronecker products and sums.
//!
//! Both operations emit CSR rows in order, so no sort is needed: for
//! `A ⊗ B`, row `i·m_B + k` is row `i` of `A` expanded by row `k` of `B`, and
//! columns `j·n_B + l` come out increasing because both input rows are sorted.

use crate::core::scalar::KrylovScalar;
use crate::core::traits::Indexing;
use crate::matrix::sparse::CsrMatrix;

/// A ⊗ B
pub fn kron<T: KrylovScalar>(a: &CsrMatrix<T>, b: &CsrMatrix<T>) -> CsrMatrix<T> {
    let (am, an) = (a.nrows(), a.ncols());
    let (bm, bn) = (b.nrows(), b.ncols());
    let nnz = a.nnz() * b.nnz();
    let mut row_ptr = Vec::with_capacity(am * bm + 1);
    let mut col_idx = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);
    row_ptr.push(0);
    for i in 0..am {
        for k in 0..bm {
            for (j, av) in a.row(i) {
                for (l, bv) in b.row(k) {
                    col_idx.push(j * bn + l);
                    values.push(av * bv);
                }
            }
            row_ptr.push(col_idx.len());
        }
    }
    CsrMatrix::from_csr(am * bm, an * bn, row_ptr, col_idx, values)
}

/// F₀ ⊗ F₁ ⊗ … ⊗ Fₙ₋₁ (left fold). Panics on an empty factor list.
pub fn kron_all<T: KrylovScalar>(factors: &[CsrMatrix<T>]) -> CsrMatrix<T> {
    let (first, rest) = factors.split_first().expect("kron_all needs at least one factor");
    rest.iter().fold(first.clone(), |acc, f| kron(&acc, f))
}

/// α A + β B, merging sorted rows.
pub fn linear_combination<T: KrylovScalar>(
    alpha: T,
    a: &CsrMatrix<T>,
    beta: T,
    b: &CsrMatrix<T>,
) -> CsrMatrix<T> {
    assert_eq!(a.nrows(), b.nrows(), "row counts differ");
    assert_eq!(a.ncols(), b.ncols(), "column counts differ");
    let mut row_ptr = Vec::with_capacity(a.nrows() + 1);
    let mut col_idx = Vec::with_capacity(a.nnz() + b.nnz());
    let mut values = Vec::with_capacity(a.nnz() + b.nnz());
    row_ptr.push(0);
    for i in 0..a.nrows() {
        let mut ra = a.row(i).peekable();
        let mut rb = b.row(i).peekable();
        loop {
            let next = match (ra.peek(), rb.peek()) {
                (Some(&(ja, va)), Some(&(jb, vb))) => {
                    if ja == jb {
                        ra.next();
                        rb.next();
                        (ja, alpha * va + beta * vb)
                    } else if ja < jb {
                        ra.next();
                        (ja, alpha * va)
                    } else {
                        rb.next();
                        (jb, beta * vb)
                    }
                }
                (Some(&(ja, va)), None) => {
                    ra.next();
                    (ja, alpha * va)
                }
                (None, Some(&(jb, vb))) => {
                    rb.next();
                    (jb, beta * vb)
                }
                (None, None) => break,
            };
            col_idx.push(next.0);
            values.push(next.1);
        }
        row_ptr.push(col_idx.len());
    }
    CsrMatrix::from_csr(a.nrows(), a.ncols(), row_ptr, col_idx, values)
}

/// Σ Iₙ₀ ⊗ … ⊗ Dₐ ⊗ … ⊗ Iₙ₋₁ over all axes `a`, for square per-axis factors.
pub fn kron_sum<T: KrylovScalar>(factors: &[CsrMatrix<T>]) -> CsrMatrix<T> {
    assert!(!factors.is_empty(), "kron_sum needs at least one factor");
    let identities: Vec<CsrMatrix<T>> = factors.iter().map(|f| CsrMatrix::identity(f.nrows())).collect();
    let mut total: Option<CsrMatrix<T>> = None;
    for (axis, factor) in factors.iter().enumerate() {
        let mut chain = identities.clone();
        chain[axis] = factor.clone();
        let term = kron_all(&chain);
        total = Some(match total {
            None => term,
            Some(acc) => linear_combination(T::one(), &acc, T::one(), &term),
        });
    }
    total.expect("non-empty factor list")
}
