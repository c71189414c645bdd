// Gaussian white-noise forcing for stress-testing the solver.

use crate::error::Result;
use crate::grid::Grid;
use crate::load::{Field, Load};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Seeded generator, or entropy-seeded when no seed is given.
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(value) => StdRng::seed_from_u64(value),
        None => StdRng::from_entropy(),
    }
}

/// Independent standard-normal value on every node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomLoad {
    pub seed: Option<u64>,
}

impl RandomLoad {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl Load for RandomLoad {
    fn name(&self) -> String {
        "random".into()
    }

    fn build(&self, grid: &Grid) -> Result<Field> {
        let mut rng = seeded_rng(self.seed);
        let values = (0..grid.size()).map(|_| rng.sample::<f64, _>(StandardNormal)).collect();
        Ok(Field::Real(values))
    }
}
