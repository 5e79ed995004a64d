//! Histogram comparison: sample one family and write plot-ready files.
//!
//! Draws samples from the family named on the command line (default:
//! `rice`), bins them, and writes the empirical and analytic curves as an
//! Octave script, a CSV file, and an HTML report.
//!
//! Run with: `cargo run --example histogram_comparison -- nak`

use distcheck::prelude::*;

fn main() -> distcheck::Result<()> {
    let tag = std::env::args().nth(1).unwrap_or_else(|| "rice".to_owned());
    let spec = DistributionSpec::from_tag(&tag)?;

    let harness = Harness::builder()
        .distribution(spec)
        .num_trials(100_000)
        .num_bins(20)
        .num_steps(100)
        .seed(42)
        .build()?;

    let dataset = harness.run()?;
    println!("{dataset}");

    let stem = spec.kind().tag();
    let octave = format!("{stem}_histogram.m");
    let csv = format!("{stem}_histogram.csv");
    let html = format!("{stem}_histogram.html");

    for (path, written) in [
        (&octave, dataset.export_octave(&octave)),
        (&csv, dataset.export_csv(&csv)),
        (&html, dataset.export_html(&html)),
    ] {
        match written {
            Ok(()) => println!("Wrote {path}"),
            Err(e) => eprintln!("Could not write {path}: {e}"),
        }
    }

    Ok(())
}
