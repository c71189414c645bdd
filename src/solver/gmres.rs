//! Generalized Minimal Residual (GMRES) solver with optional restart (Saad §6.4–6.5)
//!
//! This module implements GMRES for the Helmholtz systems assembled by
//! [`crate::operator`], which are nonsymmetric once boundary rows are
//! imposed. The solver runs over `f64` or `Complex64` vectors, so a real
//! operator can be driven by a complex plane-wave load without promoting
//! the matrix.
//!
//! # Features
//! - Modified Gram-Schmidt Arnoldi with an optional second orthogonalisation sweep
//! - Givens rotations updated per step, giving the residual norm for free
//! - Optional restart length; otherwise a single cycle of up to `maxiter` steps
//! - Lucky breakdown detection for early termination
//! - Residual history with the exact residual recorded at the end of each cycle
//! - Opt-in diagnostics: true residual every step and stored residual vectors
//!
//! # References
//! - Saad, Y. (2003). Iterative Methods for Sparse Linear Systems, 2nd Edition. SIAM. §6.4
//! - Saad, Y. & Schultz, M. (1986). GMRES: A generalized minimal residual algorithm
//!   for solving nonsymmetric linear systems. SIAM J. Sci. Stat. Comput. 7(3).

use crate::config::options::{Diagnostics, GmresOptions};
use crate::core::scalar::KrylovScalar;
use crate::core::traits::{InnerProduct, MatVec};
use crate::core::wrappers::residual;
use crate::error::{HelmError, Result};
use crate::solver::LinearSolver;
use crate::solver::arnoldi::KrylovState;
use crate::solver::result::{SolveStatus, SolverResult};
use crate::utils::convergence::Convergence;
use std::marker::PhantomData;

/// GMRES solver over scalar field `T`.
///
/// # Type Parameters
/// * `T` - Krylov scalar (`f64` or `Complex64`)
#[derive(Clone, Debug)]
pub struct GmresSolver<T> {
    /// Run configuration
    pub options: GmresOptions,
    /// Stopping criteria derived from `options`
    pub conv: Convergence,
    _scalar: PhantomData<T>,
}

impl<T: KrylovScalar> GmresSolver<T> {
    /// Create a solver with the given tolerance and iteration cap (unrestarted).
    pub fn new(tol: f64, maxiter: usize) -> Self {
        Self::with_options(GmresOptions::new(tol, maxiter))
    }

    pub fn with_options(options: GmresOptions) -> Self {
        let conv = Convergence { tol: options.tol, max_iters: options.maxiter, mode: options.tolerance };
        Self { options, conv, _scalar: PhantomData }
    }

    /// Set the restart length `m`.
    pub fn with_restart(self, restart: usize) -> Self {
        Self::with_options(self.options.with_restart(restart))
    }

    fn check_dims<M: MatVec<T> + ?Sized>(a: &M, b: &[T], x0: Option<&[T]>) -> Result<()> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(HelmError::DimensionMismatch { what: "operator columns", expected: n, found: a.ncols() });
        }
        if b.len() != n {
            return Err(HelmError::DimensionMismatch { what: "right-hand side", expected: n, found: b.len() });
        }
        if let Some(x0) = x0 {
            if x0.len() != n {
                return Err(HelmError::DimensionMismatch { what: "initial guess", expected: n, found: x0.len() });
            }
        }
        Ok(())
    }
}

impl<M, T> LinearSolver<M, T> for GmresSolver<T>
where
    M: MatVec<T> + ?Sized,
    T: KrylovScalar,
{
    /// Solve `A x = b` with restarted GMRES.
    ///
    /// # Arguments
    /// * `a` - Square operator implementing `MatVec<T>`
    /// * `b` - Right-hand side
    /// * `x0` - Initial guess (zero when `None`)
    ///
    /// # Returns
    /// * `Ok(SolverResult)` for every run that started, whatever its status
    /// * `Err(HelmError)` for invalid options or mismatched dimensions
    fn solve(&mut self, a: &M, b: &[T], x0: Option<&[T]>) -> Result<SolverResult<T>> {
        self.options.validate()?;
        Self::check_dims(a, b, x0)?;

        let ip = ();
        let n = b.len();
        let diagnostics = self.options.diagnostics;
        let track_true = diagnostics.contains(Diagnostics::TRUE_RESIDUAL);
        let cycle = self.options.cycle_length();
        let threshold = self.conv.threshold(ip.norm(b));

        // a zero guess needs no matvec: r₀ = b
        let (mut x, mut r) = match x0 {
            Some(x0) => (x0.to_vec(), residual(a, b, x0)),
            None => (vec![T::zero(); n], b.to_vec()),
        };
        let mut beta = ip.norm(&r);
        let mut history = vec![beta];
        let mut vectors = diagnostics.contains(Diagnostics::RESIDUAL_VECTORS).then(|| vec![r.clone()]);
        let mut iterations = 0;

        let status = 'outer: loop {
            if !beta.is_finite() {
                break SolveStatus::NonFiniteResidual;
            }
            if beta == 0.0 || self.conv.is_converged(beta, threshold) {
                break SolveStatus::Converged;
            }
            if self.conv.exhausted(iterations) {
                break SolveStatus::MaxIterations;
            }

            let mut state = KrylovState::new(&r, beta, cycle, self.options.reorthogonalize);
            let mut breakdown = false;
            while state.steps() < cycle && !self.conv.exhausted(iterations) {
                let step = state.step(a);
                iterations += 1;

                let mut res = step.residual_estimate;
                if !diagnostics.is_empty() {
                    let mut xk = x.clone();
                    state.update(&mut xk);
                    let rk = residual(a, b, &xk);
                    if track_true {
                        res = ip.norm(&rk);
                    }
                    if let Some(v) = vectors.as_mut() {
                        v.push(rk);
                    }
                }
                history.push(res);

                if !res.is_finite() {
                    log::warn!("gmres: non-finite residual at iteration {iterations}");
                    break 'outer SolveStatus::NonFiniteResidual;
                }
                breakdown = step.breakdown;
                if self.conv.is_converged(res, threshold) || breakdown {
                    break;
                }
            }

            state.update(&mut x);
            r = residual(a, b, &x);
            beta = ip.norm(&r);
            // the cycle's last entry becomes the exact residual
            if let Some(last) = history.last_mut() {
                *last = beta;
            }
            if let Some(last) = vectors.as_mut().and_then(|v| v.last_mut()) {
                last.clone_from(&r);
            }
            log::debug!("gmres: cycle finished after {} steps, ‖r‖ = {beta:e}", state.steps());

            if breakdown && beta.is_finite() && beta > 0.0 && !self.conv.is_converged(beta, threshold) {
                log::warn!("gmres: Krylov subspace exhausted at iteration {iterations} with ‖r‖ = {beta:e}");
                break SolveStatus::Breakdown;
            }
        };

        log::info!("gmres: {status} after {iterations} iterations, ‖r‖ = {:e}", history.last().copied().unwrap_or(beta));
        Ok(SolverResult {
            solution: x,
            residuals: history,
            converged: status == SolveStatus::Converged,
            status,
            residual_vectors: vectors,
        })
    }
}
