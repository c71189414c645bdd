use thiserror::Error;

// Unified error type for helmkrylov

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HelmError {
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("unsupported dimension {0} (expected 1, 2 or 3)")]
    UnsupportedDimension(usize),
    #[error("wavenumber must be finite, got {0}")]
    InvalidWavenumber(f64),
    #[error("unsupported boundary condition: {0:?}")]
    UnsupportedBoundary(String),
    #[error("invalid plane-wave direction: {0}")]
    InvalidDirection(String),
    #[error("invalid source location: {0}")]
    InvalidLocation(String),
    #[error("invalid load: {0}")]
    InvalidLoad(String),
    #[error("dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("non-finite residual norm at iteration {iteration}")]
    NonFiniteResidual { iteration: usize },
    #[error("invalid solver options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, HelmError>;
