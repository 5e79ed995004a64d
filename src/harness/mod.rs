//! Monte Carlo trial loop producing a [`ComparisonDataset`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution as _;

use crate::config::HarnessConfig;
use crate::curve::ComparisonCurve;
use crate::dataset::ComparisonDataset;
use crate::distribution::DistributionSpec;
use crate::domain::Domain;
use crate::error::Result;
use crate::histogram::Histogram;
use crate::variate::Variate;

mod builder;
mod partition;

#[cfg(feature = "async")]
mod async_impl;

pub use builder::HarnessBuilder;

/// Draws samples from one distribution, bins them, and pairs the result with
/// the analytic PDF and CDF.
///
/// All validation happens on construction: a `Harness` always holds a valid
/// distribution, a resolved [`Domain`], and an accepted configuration.
///
/// # Examples
///
/// ```
/// use distcheck::{DistributionSpec, Harness, HarnessConfig};
///
/// let config = HarnessConfig {
///     num_trials: 20_000,
///     seed: Some(42),
///     ..HarnessConfig::default()
/// };
/// let harness = Harness::with_config(DistributionSpec::Uniform, config).unwrap();
/// let dataset = harness.run().unwrap();
///
/// assert_eq!(dataset.counts.iter().sum::<u64>(), 20_000);
/// assert_eq!(dataset.cumulative.last().unwrap().value, 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct Harness {
    spec: DistributionSpec,
    config: HarnessConfig,
    domain: Domain,
}

impl Harness {
    /// Create a harness with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the distribution parameters are
    /// invalid.
    pub fn new(spec: DistributionSpec) -> Result<Self> {
        Self::with_config(spec, HarnessConfig::default())
    }

    /// Create a harness with an explicit configuration.
    ///
    /// The domain is resolved first, so parameter errors take precedence over
    /// configuration errors.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the distribution parameters are
    /// invalid, or `Error::InvalidConfiguration` if a count is out of range.
    pub fn with_config(spec: DistributionSpec, config: HarnessConfig) -> Result<Self> {
        let domain = Domain::resolve(&spec)?;
        config.validate()?;
        Ok(Self {
            spec,
            config,
            domain,
        })
    }

    /// Return a builder for configuring a harness.
    #[must_use]
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::new()
    }

    /// The distribution being sampled.
    #[must_use]
    pub const fn spec(&self) -> &DistributionSpec {
        &self.spec
    }

    /// The run configuration.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The resolved sampling domain.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// Run the trial loop with an RNG seeded from the configured seed, or from
    /// the OS when no seed is set.
    ///
    /// # Errors
    ///
    /// Returns an error only if the sampler or analytic functions reject the
    /// distribution parameters.
    pub fn run(&self) -> Result<ComparisonDataset> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Run the trial loop drawing from a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ComparisonDataset> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "run",
            family = %self.spec.kind(),
            num_trials = self.config.num_trials,
            num_bins = self.config.num_bins
        )
        .entered();
        trace_debug!(xmin = self.domain.xmin(), xmax = self.domain.xmax(), "domain resolved");

        let variate = Variate::new(&self.spec)?;
        let mut histogram = self.empty_histogram()?;
        accumulate(&variate, rng, self.config.num_trials, &mut histogram);

        trace_info!(total = histogram.total(), "sampling complete");
        self.finish(&histogram)
    }

    /// Run the trial loop split across `workers` independent shares.
    ///
    /// Worker `i` draws its share with a private RNG derived from the run seed
    /// and `i`, into a private histogram; the histograms are then summed. The
    /// result depends only on the seed and `workers`, and equals what
    /// `run_parallel` produces with the `async` feature.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if `workers` is zero or exceeds
    /// the number of trials.
    pub fn run_partitioned(&self, workers: usize) -> Result<ComparisonDataset> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "run_partitioned",
            family = %self.spec.kind(),
            num_trials = self.config.num_trials,
            workers
        )
        .entered();

        let shares = self.plan(workers)?;
        let variate = Variate::new(&self.spec)?;
        let mut histogram = self.empty_histogram()?;
        for share in &shares {
            let partial = share.accumulate(&variate, self.domain, self.config.num_bins)?;
            histogram.merge(&partial)?;
        }

        trace_info!(total = histogram.total(), "sampling complete");
        self.finish(&histogram)
    }

    fn empty_histogram(&self) -> Result<Histogram> {
        Histogram::new(self.domain, self.config.num_bins)
    }

    fn finish(&self, histogram: &Histogram) -> Result<ComparisonDataset> {
        let curve = ComparisonCurve::evaluate(&self.spec, self.domain, self.config.num_steps)?;
        Ok(ComparisonDataset::assemble(self.spec, histogram, curve))
    }
}

fn accumulate<R: Rng + ?Sized>(
    variate: &Variate,
    rng: &mut R,
    trials: usize,
    histogram: &mut Histogram,
) {
    for _ in 0..trials {
        histogram.accumulate(variate.sample(rng));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn seeded(spec: DistributionSpec, num_trials: usize, seed: u64) -> Harness {
        Harness::builder()
            .distribution(spec)
            .num_trials(num_trials)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_parameter_errors_come_first() {
        let config = HarnessConfig {
            num_bins: 0,
            ..HarnessConfig::default()
        };
        let err =
            Harness::with_config(DistributionSpec::Normal { eta: 0.0, sigma: 0.0 }, config)
                .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "sigma", .. }));
    }

    #[test]
    fn test_config_errors() {
        let err = Harness::builder().num_bins(0).build().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration {
                field: "num_bins",
                ..
            }
        ));
        let err = Harness::builder().num_trials(0).build().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration {
                field: "num_trials",
                ..
            }
        ));
        let err = Harness::builder().num_steps(1).build().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration {
                field: "num_steps",
                ..
            }
        ));
    }

    #[test]
    fn test_counts_sum_to_trials() {
        let h = seeded(DistributionSpec::Normal { eta: 0.0, sigma: 1.0 }, 12_345, 1);
        let ds = h.run().unwrap();
        assert_eq!(ds.counts.iter().sum::<u64>(), 12_345);
        assert_eq!(ds.num_trials, 12_345);
        assert_eq!(ds.counts.len(), 20);
        assert_eq!(ds.curve.len(), 100);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let h = seeded(DistributionSpec::default_for(crate::FamilyKind::RiceK), 5_000, 9);
        assert_eq!(h.run().unwrap(), h.run().unwrap());
    }

    #[test]
    fn test_run_with_rng_matches_seeded_run() {
        let h = seeded(DistributionSpec::Uniform, 1_000, 3);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(h.run().unwrap(), h.run_with_rng(&mut rng).unwrap());
    }

    #[test]
    fn test_partitioned_counts_and_repeatability() {
        let h = seeded(DistributionSpec::Exponential { lambda: 3.0 }, 10_001, 5);
        let a = h.run_partitioned(4).unwrap();
        let b = h.run_partitioned(4).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.counts.iter().sum::<u64>(), 10_001);

        let single = h.run_partitioned(1).unwrap();
        assert_eq!(single.counts.iter().sum::<u64>(), 10_001);
    }

    #[test]
    fn test_partitioned_rejects_bad_worker_counts() {
        let h = seeded(DistributionSpec::Uniform, 10, 0);
        assert!(matches!(
            h.run_partitioned(0),
            Err(Error::InvalidConfiguration {
                field: "workers",
                ..
            })
        ));
        assert!(matches!(
            h.run_partitioned(11),
            Err(Error::InvalidConfiguration {
                field: "workers",
                ..
            })
        ));
        assert!(h.run_partitioned(10).is_ok());
    }
}
