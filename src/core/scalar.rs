//! Scalar field abstraction for the Krylov kernels.
//!
//! GMRES runs over either `f64` or `Complex64`. Norms, Givens cosines and
//! tolerances are always real (`f64`); everything that lives inside a Krylov
//! vector or the Hessenberg matrix is a `KrylovScalar`.

use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Field of scalars GMRES can iterate over.
pub trait KrylovScalar:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Embed a real number.
    fn from_real(re: f64) -> Self;
    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;
    /// |z|
    fn modulus(self) -> f64;
    /// |z|²
    fn modulus_sqr(self) -> f64;
    /// Multiply by a real factor.
    fn scale(self, s: f64) -> Self;
    /// True when no component is NaN or infinite.
    fn is_finite(self) -> bool;
}

impl KrylovScalar for f64 {
    #[inline]
    fn from_real(re: f64) -> Self {
        re
    }
    #[inline]
    fn conj(self) -> Self {
        self
    }
    #[inline]
    fn modulus(self) -> f64 {
        self.abs()
    }
    #[inline]
    fn modulus_sqr(self) -> f64 {
        self * self
    }
    #[inline]
    fn scale(self, s: f64) -> Self {
        self * s
    }
    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl KrylovScalar for Complex64 {
    #[inline]
    fn from_real(re: f64) -> Self {
        Complex64::new(re, 0.0)
    }
    #[inline]
    fn conj(self) -> Self {
        Complex64::new(self.re, -self.im)
    }
    #[inline]
    fn modulus(self) -> f64 {
        self.re.hypot(self.im)
    }
    #[inline]
    fn modulus_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }
    #[inline]
    fn scale(self, s: f64) -> Self {
        Complex64::new(self.re * s, self.im * s)
    }
    #[inline]
    fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}
