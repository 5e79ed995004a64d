use crate::config::HarnessConfig;
use crate::distribution::DistributionSpec;
use crate::error::Result;

use super::Harness;

/// A builder for constructing [`Harness`] instances with a fluent API.
///
/// Created via [`Harness::builder()`].
///
/// # Defaults
///
/// - Distribution: [`Uniform`](DistributionSpec::Uniform)
/// - Trials: 100 000
/// - Bins: 20
/// - Curve steps: 100
/// - Seed: none (seeded from the OS)
///
/// # Examples
///
/// ```
/// use distcheck::{DistributionSpec, Harness};
///
/// let harness = Harness::builder()
///     .distribution(DistributionSpec::Exponential { lambda: 3.0 })
///     .num_trials(10_000)
///     .num_bins(25)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(harness.config().num_bins, 25);
/// ```
#[derive(Clone, Debug, Default)]
pub struct HarnessBuilder {
    spec: DistributionSpec,
    config: HarnessConfig,
}

impl HarnessBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Set the distribution to sample.
    #[must_use]
    pub fn distribution(mut self, spec: DistributionSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of samples drawn.
    #[must_use]
    pub fn num_trials(mut self, num_trials: usize) -> Self {
        self.config.num_trials = num_trials;
        self
    }

    /// Set the number of histogram bins.
    #[must_use]
    pub fn num_bins(mut self, num_bins: usize) -> Self {
        self.config.num_bins = num_bins;
        self
    }

    /// Set the number of analytic curve grid points.
    #[must_use]
    pub fn num_steps(mut self, num_steps: usize) -> Self {
        self.config.num_steps = num_steps;
        self
    }

    /// Fix the random seed so runs are reproducible.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the [`Harness`].
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the distribution parameters are
    /// invalid, or `Error::InvalidConfiguration` if a count is out of range.
    pub fn build(self) -> Result<Harness> {
        Harness::with_config(self.spec, self.config)
    }
}
