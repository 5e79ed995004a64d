//! Family sweep: run every family with its default parameters.
//!
//! Prints the resolved domain of each family and how closely the empirical
//! cumulative fraction follows the analytic CDF at the bin edges.
//!
//! Run with: `cargo run --example family_sweep`

use distcheck::prelude::*;

fn main() -> distcheck::Result<()> {
    println!("{:<36} {:>10} {:>10} {:>12}", "distribution", "xmin", "xmax", "max |dF|");

    for kind in FamilyKind::ALL {
        let spec = DistributionSpec::default_for(kind);
        let dataset = Harness::builder()
            .distribution(spec)
            .num_trials(50_000)
            .seed(7)
            .build()?
            .run()?;

        let mut worst = 0.0_f64;
        for point in &dataset.cumulative {
            worst = worst.max((point.value - spec.cdf(point.x)?).abs());
        }

        println!(
            "{:<36} {:>10.4} {:>10.4} {:>12.5}",
            spec.to_string(),
            dataset.domain.xmin(),
            dataset.domain.xmax(),
            worst
        );
    }

    Ok(())
}
