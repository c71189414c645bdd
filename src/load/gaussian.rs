// Smoothed point source: amplitude · exp(-|x - c|² / (2σ²)).

use crate::error::{HelmError, Result};
use crate::grid::Grid;
use crate::load::{Field, Load, Location};

/// Gaussian bump centred at `centre` with standard deviation `width`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussianSource {
    pub centre: Location,
    pub width: f64,
    pub amplitude: f64,
}

impl GaussianSource {
    pub fn new(centre: impl Into<Location>, width: f64) -> Self {
        Self { centre: centre.into(), width, amplitude: 1.0 }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }
}

impl Load for GaussianSource {
    fn name(&self) -> String {
        "gaussian".into()
    }

    fn build(&self, grid: &Grid) -> Result<Field> {
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(HelmError::InvalidLoad(format!(
                "gaussian width must be positive, got {}",
                self.width
            )));
        }
        let c = self.centre.resolve(grid)?;
        let two_s2 = 2.0 * self.width * self.width;
        let values = grid
            .nodes()
            .map(|idx| {
                let r2: f64 = grid.coordinate(&idx).iter().zip(&c).map(|(x, ci)| (x - ci).powi(2)).sum();
                self.amplitude * (-r2 / two_s2).exp()
            })
            .collect();
        Ok(Field::Real(values))
    }
}
