//! Sweep driver: case product, hooks, operator reuse and parallel runs.

use helmkrylov::prelude::*;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn config() -> SweepConfig {
    SweepConfig::new(GmresOptions::new(1e-8, 300))
        .with_grid(Grid::new(1, &[16], &[1.0]).unwrap())
        .with_grid(Grid::new(2, &[8, 8], &[1.0, 1.0]).unwrap())
        .with_wavenumbers([0.5, 3.0])
        .with_load(PointSource::centre())
        .with_load(PlaneWave::new(vec![1.0, 1.0]))
        .with_discretisation(FiniteDifference::new(BoundaryCondition::Dirichlet))
        .with_discretisation(FiniteDifference::new(BoundaryCondition::Periodic))
}

#[test]
fn every_case_runs_once_in_order() {
    let cfg = config();
    assert_eq!(cfg.case_count(), 2 * 2 * 2 * 2);
    let records = cfg.run().unwrap();
    assert_eq!(records.len(), cfg.case_count());
    for (i, r) in records.iter().enumerate() {
        assert_eq!(r.index, i);
        assert_eq!(r.residuals().len(), r.stats().iterations + 1);
    }
    // grid outermost, discretisation innermost
    assert_eq!(records[0].shape, vec![16]);
    assert_eq!(records[8].shape, vec![8, 8]);
    assert_eq!(records[0].discretisation, "finite_difference/dirichlet");
    assert_eq!(records[1].discretisation, "finite_difference/periodic");
    assert_eq!(records[2].load, "plane_wave");
    assert_eq!(records[4].wavenumber, 3.0);
}

#[test]
fn dirichlet_cases_converge_and_complex_loads_give_complex_solutions() {
    let records = config().run().unwrap();
    for r in records.iter().filter(|r| r.discretisation.ends_with("dirichlet")) {
        assert_eq!(r.status(), SolveStatus::Converged, "{} k={} {}", r.discretisation, r.wavenumber, r.load);
    }
    for r in &records {
        assert_eq!(r.solution().is_complex(), r.load == "plane_wave");
    }
}

#[test]
fn hook_sees_every_record() {
    let seen = Arc::new(AtomicUsize::new(0));
    let labels = Arc::new(Mutex::new(Vec::new()));
    let (s, l) = (Arc::clone(&seen), Arc::clone(&labels));
    let cfg = config().with_hook(move |r: &SweepRecord| {
        s.fetch_add(1, Ordering::SeqCst);
        l.lock().unwrap().push(r.index);
    });
    let records = cfg.run().unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), records.len());
    assert_eq!(*labels.lock().unwrap(), (0..records.len()).collect::<Vec<_>>());
}

#[test]
fn invalid_case_aborts_the_sweep() {
    let cfg = SweepConfig::new(GmresOptions::default())
        .with_grid(Grid::new(2, &[4, 4], &[1.0, 1.0]).unwrap())
        .with_wavenumbers([1.0])
        .with_load(PlaneWave::new(vec![0.0, 0.0]))
        .with_discretisation(FiniteDifference::default());
    assert!(matches!(cfg.run(), Err(HelmError::InvalidDirection(_))));
}

#[test]
fn shared_operator_is_assembled_once_per_key() {
    let cache = OperatorCache::new();
    let grid = Grid::new(2, &[6, 6], &[1.0, 1.0]).unwrap();
    let fd = FiniteDifference::new(BoundaryCondition::Dirichlet);
    let problems = [
        HelmholtzProblem::new(grid.clone(), 2.0, fd, PointSource::centre()),
        HelmholtzProblem::new(grid.clone(), 2.0, fd, RandomLoad::seeded(3)),
        HelmholtzProblem::new(grid, 2.0, fd, PlaneWave::new(vec![0.0, 1.0])),
    ];
    let mut ops = Vec::new();
    for p in &problems {
        let op = cache.get_or_assemble(p.discretisation.as_ref(), &p.grid, p.wavenumber).unwrap();
        let sol = p.solve_with(Arc::clone(&op), &GmresOptions::new(1e-8, 200)).unwrap();
        assert!(sol.result.converged());
        ops.push(op);
    }
    assert_eq!(cache.len(), 1);
    assert!(ops.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_run_matches_sequential() {
    let cfg = config();
    let seq = cfg.run().unwrap();
    let par = cfg.run_parallel().unwrap();
    assert_eq!(seq.len(), par.len());
    for (a, b) in seq.iter().zip(&par) {
        assert_eq!(a.index, b.index);
        assert_eq!(a.status(), b.status());
        assert_eq!(a.residuals(), b.residuals());
    }
}
