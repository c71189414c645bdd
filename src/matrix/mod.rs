//! Matrix module: CSR storage, triplet assembly, Kronecker kernels and dense views.

pub mod builder;
pub use builder::TripletBuilder;
pub mod dense;
pub mod kron;
pub use kron::{kron, kron_all, kron_sum, linear_combination};
pub mod sparse;
pub use sparse::CsrMatrix;
