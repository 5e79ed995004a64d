//! Parallel histogram: split the trials across tokio blocking tasks.
//!
//! Each worker draws its share with a private RNG derived from the run seed,
//! so the result is identical to the sequential partitioned run.
//!
//! Run with: `cargo run --example parallel_histogram --features async`

use std::time::Instant;

use distcheck::prelude::*;

#[tokio::main]
async fn main() -> distcheck::Result<()> {
    let harness = Harness::builder()
        .distribution(DistributionSpec::NakagamiM { m: 4.5, omega: 1.0 })
        .num_trials(2_000_000)
        .num_bins(40)
        .seed(42)
        .build()?;

    let workers = 8;
    println!(
        "Drawing {} samples with {workers} workers...",
        harness.config().num_trials
    );

    let start = Instant::now();
    let parallel = harness.run_parallel(workers).await?;
    let parallel_time = start.elapsed();

    let start = Instant::now();
    let sequential = harness.run_partitioned(workers)?;
    let sequential_time = start.elapsed();

    println!("{parallel}");
    println!("parallel:   {parallel_time:?}");
    println!("sequential: {sequential_time:?}");
    println!("identical:  {}", parallel == sequential);

    Ok(())
}
