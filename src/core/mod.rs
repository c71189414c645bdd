//! Scalar field, operator traits and vector kernels.

pub mod scalar;
pub mod traits;
pub mod wrappers;

pub use scalar::KrylovScalar;
pub use traits::{Indexing, InnerProduct, MatVec};
