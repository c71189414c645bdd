//! Arnoldi process with incremental Givens least squares (Saad §6.3–6.5).
//!
//! A [`KrylovState`] owns everything one GMRES cycle needs: the orthonormal
//! basis `v₀ … v_k`, the Hessenberg columns, the Givens rotations that reduce
//! them to upper-triangular form, and the rotated right-hand side `g = Qᵀ β e₁`.
//! Each column is rotated as soon as it is produced, so after `k` steps
//! `|g_k|` is the minimal residual norm over the current Krylov subspace
//! without ever solving the least-squares problem.
//!
//! Inner products are conjugate-linear in the left argument, which keeps the
//! basis orthonormal for complex fields too.

use crate::core::scalar::KrylovScalar;
use crate::core::traits::{InnerProduct, MatVec};
use crate::core::wrappers::{axpy, scale};

/// `h_{k+1,k} ≤ BREAKDOWN_TOL · ‖A v_k‖` is treated as an invariant subspace.
pub const BREAKDOWN_TOL: f64 = 1e-12;

/// Outcome of one Arnoldi step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArnoldiStep {
    /// The Krylov subspace stopped growing (lucky breakdown).
    pub breakdown: bool,
    /// |g_{k+1}|: residual norm of the current least-squares iterate.
    pub residual_estimate: f64,
}

/// Per-cycle Arnoldi/Givens state.
#[derive(Clone, Debug)]
pub struct KrylovState<T> {
    basis: Vec<Vec<T>>,
    // column j holds j + 2 entries, rotated in place into R's column j
    hessenberg: Vec<Vec<T>>,
    cs: Vec<f64>,
    sn: Vec<T>,
    g: Vec<T>,
    reorthogonalize: bool,
}

/// Complex Givens rotation zeroing `b` in `[a; b]`.
///
/// Returns `(c, s, r)` with real `c`, `c² + |s|² = 1` and
/// `[c  s; -s̄  c] [a; b] = [r; 0]`.
pub fn givens<T: KrylovScalar>(a: T, b: T) -> (f64, T, T) {
    let abs_a = a.modulus();
    let abs_b = b.modulus();
    if abs_b == 0.0 {
        return (1.0, T::zero(), a);
    }
    if abs_a == 0.0 {
        return (0.0, b.conj().scale(1.0 / abs_b), T::from_real(abs_b));
    }
    let rho = abs_a.hypot(abs_b);
    let phase = a.scale(1.0 / abs_a);
    (abs_a / rho, phase * b.conj().scale(1.0 / rho), phase.scale(rho))
}

impl<T: KrylovScalar> KrylovState<T> {
    /// Start a cycle from residual `r0` with `‖r0‖ = beta > 0`.
    ///
    /// `capacity` is the expected number of steps; it only sizes allocations.
    pub fn new(r0: &[T], beta: f64, capacity: usize, reorthogonalize: bool) -> Self {
        let mut v0 = r0.to_vec();
        scale(1.0 / beta, &mut v0);
        let mut basis = Vec::with_capacity(capacity + 1);
        basis.push(v0);
        let mut g = Vec::with_capacity(capacity + 1);
        g.push(T::from_real(beta));
        Self {
            basis,
            hessenberg: Vec::with_capacity(capacity),
            cs: Vec::with_capacity(capacity),
            sn: Vec::with_capacity(capacity),
            g,
            reorthogonalize,
        }
    }

    /// Number of completed Arnoldi steps.
    pub fn steps(&self) -> usize {
        self.hessenberg.len()
    }

    /// Orthonormal basis vectors produced so far.
    pub fn basis(&self) -> &[Vec<T>] {
        &self.basis
    }

    /// Current residual-norm estimate |g_k|.
    pub fn residual_estimate(&self) -> f64 {
        self.g.last().map_or(0.0, |g| g.modulus())
    }

    /// Extend the Krylov subspace by one vector.
    ///
    /// Panics if called again after a step that reported breakdown.
    pub fn step<M: MatVec<T> + ?Sized>(&mut self, a: &M) -> ArnoldiStep {
        let j = self.steps();
        assert!(j < self.basis.len(), "Arnoldi step requested after breakdown");
        let ip = ();
        let n = self.basis[j].len();

        let mut w = vec![T::zero(); n];
        a.matvec(&self.basis[j], &mut w);
        let w_norm = ip.norm(&w);

        // Modified Gram-Schmidt
        let mut h = vec![T::zero(); j + 2];
        for (hi, v) in h.iter_mut().zip(&self.basis) {
            *hi = ip.dot(v, &w);
            axpy(-*hi, v, &mut w);
        }
        if self.reorthogonalize {
            for (hi, v) in h.iter_mut().zip(&self.basis) {
                let tmp = ip.dot(v, &w);
                *hi += tmp;
                axpy(-tmp, v, &mut w);
            }
        }
        let h_next = ip.norm(&w);
        h[j + 1] = T::from_real(h_next);

        let breakdown = !(h_next > BREAKDOWN_TOL * w_norm);
        if !breakdown {
            scale(1.0 / h_next, &mut w);
            self.basis.push(w);
        }

        // Bring the new column up to date with earlier rotations
        for i in 0..j {
            let (c, s) = (self.cs[i], self.sn[i]);
            let temp = h[i].scale(c) + s * h[i + 1];
            h[i + 1] = -(s.conj() * h[i]) + h[i + 1].scale(c);
            h[i] = temp;
        }
        let (c, s, r) = givens(h[j], h[j + 1]);
        h[j] = r;
        h[j + 1] = T::zero();

        let gj = self.g[j];
        self.g[j] = gj.scale(c);
        self.g.push(-(s.conj() * gj));

        self.hessenberg.push(h);
        self.cs.push(c);
        self.sn.push(s);

        ArnoldiStep { breakdown, residual_estimate: self.g[j + 1].modulus() }
    }

    /// Minimiser `y` of ‖β e₁ - H y‖ by back-substitution on the rotated factor.
    ///
    /// A zero pivot (only possible for a singular operator) leaves that
    /// component of `y` at zero.
    pub fn least_squares(&self) -> Vec<T> {
        let k = self.steps();
        let mut y = vec![T::zero(); k];
        for i in (0..k).rev() {
            let mut sum = self.g[i];
            for jj in (i + 1)..k {
                sum -= self.hessenberg[jj][i] * y[jj];
            }
            let rii = self.hessenberg[i][i];
            y[i] = if rii.modulus() > f64::MIN_POSITIVE { sum / rii } else { T::zero() };
        }
        y
    }

    /// x ← x + V_k y with `y` from [`KrylovState::least_squares`].
    pub fn update(&self, x: &mut [T]) {
        let y = self.least_squares();
        for (&yj, vj) in y.iter().zip(&self.basis) {
            axpy(yj, vj, x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::CsrMatrix;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex64;

    fn nonsymmetric() -> CsrMatrix<f64> {
        // [[4,1,0,0],[2,3,1,0],[0,1,2,1],[0,0,3,3]]
        CsrMatrix::from_csr(
            4,
            4,
            vec![0, 2, 5, 8, 10],
            vec![0, 1, 0, 1, 2, 1, 2, 3, 2, 3],
            vec![4.0, 1.0, 2.0, 3.0, 1.0, 1.0, 2.0, 1.0, 3.0, 3.0],
        )
    }

    fn assert_orthonormal<T: KrylovScalar>(basis: &[Vec<T>]) {
        let ip = ();
        for (i, vi) in basis.iter().enumerate() {
            for (j, vj) in basis.iter().enumerate() {
                let d = ip.dot(vi, vj);
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!((d - T::from_real(expected)).modulus(), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn givens_zeroes_second_component() {
        let (c, s, r) = givens(3.0, 4.0);
        assert_abs_diff_eq!(c, 0.6);
        assert_abs_diff_eq!(s, 0.8);
        assert_abs_diff_eq!(r, 5.0);

        let a = Complex64::new(1.0, 2.0);
        let b = Complex64::new(-0.5, 1.5);
        let (c, s, r) = givens(a, b);
        assert_abs_diff_eq!(c * c + s.norm_sqr(), 1.0, epsilon = 1e-14);
        let zero = -(s.conj() * a) + b * c;
        assert_abs_diff_eq!(zero.norm(), 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(r.norm(), (a.norm_sqr() + b.norm_sqr()).sqrt(), epsilon = 1e-14);
    }

    #[test]
    fn real_basis_stays_orthonormal_and_estimate_matches_true_residual() {
        let a = nonsymmetric();
        let b = vec![1.0, 0.0, -1.0, 2.0];
        let beta = ().norm(&b);
        let mut state = KrylovState::new(&b, beta, 4, false);
        let mut last = beta;
        for _ in 0..3 {
            let step = state.step(&a);
            assert!(!step.breakdown);
            assert!(step.residual_estimate <= last + 1e-12);
            last = step.residual_estimate;
        }
        assert_orthonormal(state.basis());

        let mut x = vec![0.0; 4];
        state.update(&mut x);
        let r = crate::core::wrappers::residual(&a, &b, &x);
        assert_abs_diff_eq!(().norm(&r), state.residual_estimate(), epsilon = 1e-10);
    }

    #[test]
    fn complex_basis_stays_orthonormal() {
        let a = nonsymmetric().to_complex();
        let b: Vec<Complex64> = (0..4).map(|i| Complex64::new(1.0, i as f64)).collect();
        let beta = ().norm(&b);
        let mut state = KrylovState::new(&b, beta, 3, true);
        for _ in 0..3 {
            state.step(&a);
        }
        assert_orthonormal(state.basis());
    }

    #[test]
    fn invariant_subspace_reports_breakdown() {
        let a = CsrMatrix::<f64>::identity(3);
        let b = vec![1.0, 2.0, 2.0];
        let mut state = KrylovState::new(&b, 3.0, 3, false);
        let step = state.step(&a);
        assert!(step.breakdown);
        assert_abs_diff_eq!(step.residual_estimate, 0.0, epsilon = 1e-14);
        let mut x = vec![0.0; 3];
        state.update(&mut x);
        for (xi, bi) in x.iter().zip(&b) {
            assert_abs_diff_eq!(xi, bi, epsilon = 1e-14);
        }
    }
}
