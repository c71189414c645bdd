//! API options for the GMRES solver.
//!
//! This module provides `GmresOptions`, the knobs exposed for a GMRES run:
//! tolerance and how it is interpreted, the iteration cap, the optional
//! restart length, reorthogonalisation, and opt-in diagnostics that trade
//! memory or matvecs for more detailed histories.

use crate::error::{HelmError, Result};
use bitflags::bitflags;

bitflags! {
    /// Extra per-iteration work GMRES can be asked to do.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Diagnostics: u32 {
        /// Record ‖b - A xₖ‖ computed explicitly instead of the Givens estimate.
        const TRUE_RESIDUAL    = 0b0001;
        /// Keep every residual vector rₖ (memory O(size × iterations)).
        const RESIDUAL_VECTORS = 0b0010;
    }
}

/// How the stopping tolerance is measured.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ToleranceMode {
    /// Stop when ‖r‖ < tol · ‖b‖ (absolute when ‖b‖ = 0).
    #[default]
    Relative,
    /// Stop when ‖r‖ < tol.
    Absolute,
}

/// GMRES configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GmresOptions {
    /// Stopping tolerance
    pub tol: f64,
    /// Maximum number of Arnoldi steps over all restart cycles
    pub maxiter: usize,
    /// Arnoldi steps per cycle; `None` runs unrestarted
    pub restart: Option<usize>,
    /// Interpretation of `tol`
    pub tolerance: ToleranceMode,
    /// Second modified Gram-Schmidt sweep per step
    pub reorthogonalize: bool,
    /// Opt-in diagnostics
    pub diagnostics: Diagnostics,
}

impl Default for GmresOptions {
    fn default() -> Self {
        Self {
            tol: 1e-8,
            maxiter: 200,
            restart: None,
            tolerance: ToleranceMode::Relative,
            reorthogonalize: false,
            diagnostics: Diagnostics::empty(),
        }
    }
}

impl GmresOptions {
    pub fn new(tol: f64, maxiter: usize) -> Self {
        Self { tol, maxiter, ..Self::default() }
    }

    pub fn with_restart(mut self, restart: usize) -> Self {
        self.restart = Some(restart);
        self
    }

    pub fn with_tolerance_mode(mut self, mode: ToleranceMode) -> Self {
        self.tolerance = mode;
        self
    }

    pub fn with_reorthogonalization(mut self, on: bool) -> Self {
        self.reorthogonalize = on;
        self
    }

    pub fn with_diagnostics(mut self, flags: Diagnostics) -> Self {
        self.diagnostics = flags;
        self
    }

    /// Steps per cycle: the restart length, or `maxiter` when unrestarted.
    pub fn cycle_length(&self) -> usize {
        self.restart.unwrap_or(self.maxiter).min(self.maxiter).max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tol >= 0.0 && self.tol.is_finite()) {
            return Err(HelmError::InvalidOptions(format!("tol must be a non-negative number, got {}", self.tol)));
        }
        if self.restart == Some(0) {
            return Err(HelmError::InvalidOptions("restart length must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_length_respects_restart_and_maxiter() {
        assert_eq!(GmresOptions::new(1e-8, 50).cycle_length(), 50);
        assert_eq!(GmresOptions::new(1e-8, 50).with_restart(10).cycle_length(), 10);
        assert_eq!(GmresOptions::new(1e-8, 5).with_restart(10).cycle_length(), 5);
    }

    #[test]
    fn invalid_options_are_rejected() {
        assert!(GmresOptions::new(-1.0, 10).validate().is_err());
        assert!(GmresOptions::new(f64::NAN, 10).validate().is_err());
        assert!(GmresOptions::new(1e-6, 10).with_restart(0).validate().is_err());
        assert!(GmresOptions::default().validate().is_ok());
    }
}
