// Point impulse at the grid node nearest to a location.

use crate::error::{HelmError, Result};
use crate::grid::Grid;
use crate::load::random::seeded_rng;
use crate::load::{Field, Load};
use rand::Rng;
use std::str::FromStr;

/// Where a localized source sits.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    /// Middle of the domain.
    Centre,
    /// The corner at coordinates zero.
    Origin,
    /// Uniformly drawn inside the domain; reproducible when seeded.
    Random { seed: Option<u64> },
    /// Physical coordinates, one per axis (extra entries are ignored).
    Point(Vec<f64>),
}

impl Location {
    /// Physical coordinates on `grid`.
    pub fn resolve(&self, grid: &Grid) -> Result<Vec<f64>> {
        match self {
            Location::Centre => Ok(grid.lengths().iter().map(|l| 0.5 * l).collect()),
            Location::Origin => Ok(vec![0.0; grid.dims()]),
            Location::Random { seed } => {
                let mut rng = seeded_rng(*seed);
                Ok(grid.lengths().iter().map(|&l| rng.gen_range(0.0..l)).collect())
            }
            Location::Point(coords) => {
                if coords.len() < grid.dims() {
                    return Err(HelmError::InvalidLocation(format!(
                        "expected {} coordinates, got {}",
                        grid.dims(),
                        coords.len()
                    )));
                }
                Ok(coords[..grid.dims()].to_vec())
            }
        }
    }
}

impl FromStr for Location {
    type Err = HelmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "centre" | "center" | "middle" => Ok(Location::Centre),
            "origin" | "zero" => Ok(Location::Origin),
            "random" => Ok(Location::Random { seed: None }),
            _ => Err(HelmError::InvalidLocation(format!("unknown location keyword {s:?}"))),
        }
    }
}

impl From<Vec<f64>> for Location {
    fn from(coords: Vec<f64>) -> Self {
        Location::Point(coords)
    }
}

/// Unit impulse (scaled by `amplitude`) on a single node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointSource {
    pub location: Location,
    pub amplitude: f64,
}

impl PointSource {
    pub fn new(location: impl Into<Location>) -> Self {
        Self { location: location.into(), amplitude: 1.0 }
    }

    pub fn centre() -> Self {
        Self::new(Location::Centre)
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Node the impulse lands on. Out-of-domain points are clamped, never rejected.
    pub fn node(&self, grid: &Grid) -> Result<Vec<usize>> {
        let physical = self.location.resolve(grid)?;
        Ok(grid.nearest_node(&physical))
    }
}

impl Load for PointSource {
    fn name(&self) -> String {
        "point_source".into()
    }

    fn build(&self, grid: &Grid) -> Result<Field> {
        let idx = self.node(grid)?;
        let mut rhs = vec![0.0; grid.size()];
        rhs[grid.flatten(&idx)] = self.amplitude;
        Ok(Field::Real(rhs))
    }
}
