//! Parameter sweeps over grids × wavenumbers × loads × discretisations.
//!
//! Cases are enumerated in that order with the last factor varying fastest.
//! Operators are shared between cases that differ only in their load via an
//! [`OperatorCache`]. With the `rayon` feature, [`SweepConfig::run_parallel`]
//! solves independent cases on the global thread pool; every case owns its
//! vectors and Krylov state, so only the cache is shared.

use crate::config::options::GmresOptions;
use crate::context::cache::OperatorCache;
use crate::context::problem::HelmholtzProblem;
use crate::error::Result;
use crate::grid::Grid;
use crate::load::{Field, Load};
use crate::operator::Discretisation;
use crate::solver::{FieldResult, SolveStatus};
use crate::utils::convergence::SolveStats;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Callback invoked once per finished case.
pub type CaseHook = Arc<dyn Fn(&SweepRecord) + Send + Sync>;

/// Outcome of one sweep case.
#[derive(Clone, Debug)]
pub struct SweepRecord {
    /// Position in the case enumeration
    pub index: usize,
    pub shape: Vec<usize>,
    pub wavenumber: f64,
    pub load: String,
    pub discretisation: String,
    /// Copy of the sweep's metadata
    pub metadata: BTreeMap<String, String>,
    pub result: FieldResult,
}

impl SweepRecord {
    pub fn residuals(&self) -> &[f64] {
        self.result.residuals()
    }

    pub fn status(&self) -> SolveStatus {
        self.result.status()
    }

    pub fn stats(&self) -> SolveStats {
        self.result.stats()
    }

    pub fn solution(&self) -> Field {
        self.result.solution()
    }
}

/// Cartesian-product experiment description.
#[derive(Clone, Default)]
pub struct SweepConfig {
    pub grids: Vec<Grid>,
    pub wavenumbers: Vec<f64>,
    pub loads: Vec<Arc<dyn Load>>,
    pub discretisations: Vec<Arc<dyn Discretisation>>,
    pub options: GmresOptions,
    /// Free-form annotations copied into every record.
    pub metadata: BTreeMap<String, String>,
    hook: Option<CaseHook>,
}

impl fmt::Debug for SweepConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SweepConfig")
            .field("grids", &self.grids)
            .field("wavenumbers", &self.wavenumbers)
            .field("loads", &self.loads)
            .field("discretisations", &self.discretisations)
            .field("options", &self.options)
            .field("metadata", &self.metadata)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl SweepConfig {
    pub fn new(options: GmresOptions) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grids.push(grid);
        self
    }

    pub fn with_wavenumbers(mut self, ks: impl IntoIterator<Item = f64>) -> Self {
        self.wavenumbers.extend(ks);
        self
    }

    pub fn with_load(mut self, load: impl Load + 'static) -> Self {
        self.loads.push(Arc::new(load));
        self
    }

    pub fn with_discretisation(mut self, d: impl Discretisation + 'static) -> Self {
        self.discretisations.push(Arc::new(d));
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Call `hook` with every finished case (from worker threads when parallel).
    pub fn with_hook(mut self, hook: impl Fn(&SweepRecord) + Send + Sync + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Number of cases in the product.
    pub fn case_count(&self) -> usize {
        self.grids.len() * self.wavenumbers.len() * self.loads.len() * self.discretisations.len()
    }

    /// Enumerate the cases, discretisation varying fastest.
    pub fn cases(&self) -> impl Iterator<Item = HelmholtzProblem> + '_ {
        self.grids.iter().flat_map(move |grid| {
            self.wavenumbers.iter().flat_map(move |&k| {
                self.loads.iter().flat_map(move |load| {
                    self.discretisations.iter().map(move |d| HelmholtzProblem {
                        grid: grid.clone(),
                        wavenumber: k,
                        discretisation: Arc::clone(d),
                        load: Arc::clone(load),
                    })
                })
            })
        })
    }

    /// Solve every case in order; the first configuration error aborts the sweep.
    pub fn run(&self) -> Result<Vec<SweepRecord>> {
        let cache = OperatorCache::new();
        self.cases().enumerate().map(|(i, case)| self.run_case(&cache, i, &case)).collect()
    }

    /// Parallel [`SweepConfig::run`]; records keep enumeration order.
    #[cfg(feature = "rayon")]
    pub fn run_parallel(&self) -> Result<Vec<SweepRecord>> {
        use rayon::prelude::*;

        let cache = OperatorCache::new();
        let cases: Vec<HelmholtzProblem> = self.cases().collect();
        cases
            .par_iter()
            .enumerate()
            .map(|(i, case)| self.run_case(&cache, i, case))
            .collect()
    }

    fn run_case(&self, cache: &OperatorCache, index: usize, case: &HelmholtzProblem) -> Result<SweepRecord> {
        let operator = cache.get_or_assemble(case.discretisation.as_ref(), &case.grid, case.wavenumber)?;
        let solution = case.solve_with(operator, &self.options)?;
        let stats = solution.result.stats();
        log::info!(
            "case {index} [{case}]: {} in {} iterations, ‖r‖ = {:e}",
            solution.result.status(),
            stats.iterations,
            stats.final_residual
        );
        let record = SweepRecord {
            index,
            shape: case.grid.shape().to_vec(),
            wavenumber: case.wavenumber,
            load: case.load.name(),
            discretisation: case.discretisation.name(),
            metadata: self.metadata.clone(),
            result: solution.result,
        };
        if let Some(hook) = &self.hook {
            hook(&record);
        }
        Ok(record)
    }
}
