//! Shared cache of assembled operators.
//!
//! Sweeps often revisit the same (grid, wavenumber, discretisation) with
//! several loads. Operators are assembled once per key and then handed out
//! as `Arc`s; concurrent solves only read them.

use crate::error::Result;
use crate::grid::Grid;
use crate::matrix::CsrMatrix;
use crate::operator::Discretisation;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Identifies an operator: grid shape and lengths, wavenumber, discretisation name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OperatorKey {
    shape: Vec<usize>,
    lengths: Vec<u64>,
    wavenumber: u64,
    discretisation: String,
}

impl OperatorKey {
    pub fn new(grid: &Grid, wavenumber: f64, discretisation: &dyn Discretisation) -> Self {
        Self {
            shape: grid.shape().to_vec(),
            lengths: grid.lengths().iter().map(|l| l.to_bits()).collect(),
            wavenumber: wavenumber.to_bits(),
            discretisation: discretisation.name(),
        }
    }
}

/// Build-once, read-many operator store.
#[derive(Debug, Default)]
pub struct OperatorCache {
    entries: RwLock<HashMap<OperatorKey, Arc<CsrMatrix<f64>>>>,
}

impl OperatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached operator for this key, assembling it on first use.
    ///
    /// Assembly runs outside the lock; if two threads race on the same key
    /// the first insert wins and both receive that operator.
    pub fn get_or_assemble(
        &self,
        discretisation: &dyn Discretisation,
        grid: &Grid,
        wavenumber: f64,
    ) -> Result<Arc<CsrMatrix<f64>>> {
        let key = OperatorKey::new(grid, wavenumber, discretisation);
        if let Some(op) = self.entries.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
            return Ok(Arc::clone(op));
        }
        let op = Arc::new(discretisation.assemble(grid, wavenumber)?);
        log::debug!("operator cache: assembled {} (n = {})", key.discretisation, grid.size());
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(entries.entry(key).or_insert(op)))
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
