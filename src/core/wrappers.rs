//! Vector kernels and the Euclidean inner product.
//!
//! The unit type `()` carries the standard ℓ² inner product so solvers can
//! write `let ip = (); ip.dot(&x, &y)` without threading a context through.
//! The remaining free functions are the BLAS-1 style updates GMRES needs.
//!
//! # References
//! - [num-complex crate documentation](https://docs.rs/num-complex)

use crate::core::scalar::KrylovScalar;
use crate::core::traits::InnerProduct;

/// Euclidean inner product and norm for slices of any Krylov scalar.
impl<T: KrylovScalar> InnerProduct<T> for () {
    /// Computes `Σ conj(xᵢ) yᵢ`.
    fn dot(&self, x: &[T], y: &[T]) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        x.iter()
            .zip(y.iter())
            .fold(T::zero(), |acc, (&xi, &yi)| acc + xi.conj() * yi)
    }
    /// Computes `‖x‖₂` without forming a complex intermediate.
    fn norm(&self, x: &[T]) -> f64 {
        x.iter().map(|xi| xi.modulus_sqr()).sum::<f64>().sqrt()
    }
}

/// y ← y + α x
pub fn axpy<T: KrylovScalar>(alpha: T, x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
}

/// x ← s x for a real factor `s`.
pub fn scale<T: KrylovScalar>(s: f64, x: &mut [T]) {
    for xi in x.iter_mut() {
        *xi = xi.scale(s);
    }
}

/// r = b - A x
pub fn residual<M, T>(a: &M, b: &[T], x: &[T]) -> Vec<T>
where
    M: crate::core::traits::MatVec<T> + ?Sized,
    T: KrylovScalar,
{
    let mut r = vec![T::zero(); b.len()];
    a.matvec(x, &mut r);
    for (ri, &bi) in r.iter_mut().zip(b) {
        *ri = bi - *ri;
    }
    r
}
