//! Wavenumber sweep on a 2-D grid with every boundary closure.
//!
//! Run with `cargo run --example sweep`. Prints one line per case and the
//! residual history of the hardest one.

use helmkrylov::prelude::*;

fn main() -> helmkrylov::Result<()> {
    let mut cfg = SweepConfig::new(GmresOptions::new(1e-8, 400).with_restart(60))
        .with_grid(Grid::new(2, &[32, 32], &[1.0, 1.0])?)
        .with_wavenumbers([0.0, 5.0, 20.0])
        .with_load(PointSource::centre())
        .with_load(PlaneWave::new(vec![1.0, 0.5]))
        .with_load(GaussianSource::new(Location::Centre, 0.05));
    for bc in BoundaryCondition::ALL {
        cfg = cfg.with_discretisation(FiniteDifference::new(bc));
    }

    #[cfg(feature = "rayon")]
    let records = cfg.run_parallel()?;
    #[cfg(not(feature = "rayon"))]
    let records = cfg.run()?;

    println!("{:>4} {:>6} {:<30} {:<13} {:>6} {:>12}", "case", "k", "discretisation", "load", "iters", "residual");
    for r in &records {
        let s = r.stats();
        println!(
            "{:>4} {:>6.1} {:<30} {:<13} {:>6} {:>12.3e}  {}",
            r.index, r.wavenumber, r.discretisation, r.load, s.iterations, s.final_residual, r.status()
        );
    }

    if let Some(worst) = records.iter().max_by_key(|r| r.stats().iterations) {
        println!("\nresidual history of case {} ({} steps):", worst.index, worst.stats().iterations);
        for (i, res) in worst.residuals().iter().enumerate().step_by(10) {
            println!("  {i:>4}  {res:.3e}");
        }
    }
    Ok(())
}
