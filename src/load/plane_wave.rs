// Complex plane-wave forcing exp(i(k̂·x + φ)).

use crate::error::{HelmError, Result};
use crate::grid::Grid;
use crate::load::{Field, Load};
use num_complex::Complex64;

/// Unit-modulus plane wave travelling along `direction` (normalised on build).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneWave {
    pub direction: Vec<f64>,
    pub phase: f64,
}

impl PlaneWave {
    pub fn new(direction: Vec<f64>) -> Self {
        Self { direction, phase: 0.0 }
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// k̂ restricted to the grid's axes.
    pub fn unit_direction(&self, dims: usize) -> Result<Vec<f64>> {
        if self.direction.len() < dims {
            return Err(HelmError::InvalidDirection(format!(
                "expected {dims} components, got {}",
                self.direction.len()
            )));
        }
        let d = &self.direction[..dims];
        let norm = d.iter().map(|c| c * c).sum::<f64>().sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return Err(HelmError::InvalidDirection(format!("direction {d:?} has no usable norm")));
        }
        Ok(d.iter().map(|c| c / norm).collect())
    }
}

impl Load for PlaneWave {
    fn name(&self) -> String {
        "plane_wave".into()
    }

    fn build(&self, grid: &Grid) -> Result<Field> {
        let khat = self.unit_direction(grid.dims())?;
        let values = grid
            .nodes()
            .map(|idx| {
                let x = grid.coordinate(&idx);
                let theta = khat.iter().zip(&x).map(|(k, xi)| k * xi).sum::<f64>() + self.phase;
                Complex64::new(theta.cos(), theta.sin())
            })
            .collect();
        Ok(Field::Complex(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn values_have_unit_modulus_and_follow_direction() {
        let grid = Grid::new(2, &[3, 4], &[2.0, 3.0]).unwrap();
        let field = PlaneWave::new(vec![3.0, 0.0]).with_phase(0.25).build(&grid).unwrap();
        let v = field.as_complex().unwrap();
        assert_eq!(v.len(), 12);
        for z in v {
            assert_relative_eq!(z.norm(), 1.0, epsilon = 1e-12);
        }
        // node (2, 1): x = 2.0 along k̂ = (1, 0)
        let z = v[grid.flatten(&[2, 1])];
        assert_relative_eq!(z.arg(), 2.25, epsilon = 1e-12);
    }

    #[test]
    fn zero_direction_is_an_error() {
        let grid = Grid::new(2, &[3, 3], &[1.0, 1.0]).unwrap();
        let err = PlaneWave::new(vec![0.0, 0.0]).build(&grid).unwrap_err();
        assert!(matches!(err, HelmError::InvalidDirection(_)));
    }
}
