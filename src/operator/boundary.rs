//! Boundary-condition selector.

use crate::error::HelmError;
use std::fmt;
use std::str::FromStr;

/// How rows touching the first or last node of an axis are closed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BoundaryCondition {
    /// `u = 0`: boundary rows become unit rows.
    #[default]
    Dirichlet,
    /// `∂u/∂n = 0`: mirror closure folded into the boundary diagonal.
    Neumann,
    /// Wrap-around: first and last node of each axis are neighbours.
    Periodic,
}

impl BoundaryCondition {
    pub const ALL: [BoundaryCondition; 3] = [Self::Dirichlet, Self::Neumann, Self::Periodic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dirichlet => "dirichlet",
            Self::Neumann => "neumann",
            Self::Periodic => "periodic",
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryCondition {
    type Err = HelmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dirichlet" => Ok(Self::Dirichlet),
            "neumann" => Ok(Self::Neumann),
            "periodic" => Ok(Self::Periodic),
            _ => Err(HelmError::UnsupportedBoundary(s.to_string())),
        }
    }
}
