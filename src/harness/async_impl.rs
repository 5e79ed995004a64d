use crate::dataset::ComparisonDataset;
use crate::error::{Error, Result};
use crate::histogram::Histogram;
use crate::variate::Variate;

use super::Harness;

impl Harness {
    /// Run the partitioned trial loop on tokio blocking tasks.
    ///
    /// Each worker share from [`run_partitioned`](Self::run_partitioned) is
    /// drawn inside [`spawn_blocking`](tokio::task::spawn_blocking) and the
    /// per-worker histograms are summed as they arrive through a
    /// [`JoinSet`](tokio::task::JoinSet). Summation is order-independent, so
    /// the dataset is bit-identical to `run_partitioned(workers)` for the same
    /// seed.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if `workers` is zero or exceeds
    /// the number of trials, and `Error::TaskError` if a worker task panics.
    ///
    /// # Examples
    ///
    /// ```
    /// use distcheck::{DistributionSpec, Harness};
    ///
    /// # async fn example() -> distcheck::Result<()> {
    /// let harness = Harness::builder()
    ///     .distribution(DistributionSpec::Gamma { alpha: 4.5, beta: 1.0 })
    ///     .seed(42)
    ///     .build()?;
    ///
    /// let dataset = harness.run_parallel(4).await?;
    /// assert_eq!(dataset, harness.run_partitioned(4)?);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_parallel(&self, workers: usize) -> Result<ComparisonDataset> {
        trace_info!(
            family = %self.spec.kind(),
            num_trials = self.config.num_trials,
            workers,
            "parallel run started"
        );

        let shares = self.plan(workers)?;
        let variate = Variate::new(&self.spec)?;
        let domain = self.domain;
        let num_bins = self.config.num_bins;

        let mut tasks = tokio::task::JoinSet::new();
        for share in shares {
            let variate = variate.clone();
            tasks.spawn_blocking(move || share.accumulate(&variate, domain, num_bins));
        }

        let mut histogram = Histogram::new(domain, num_bins)?;
        while let Some(joined) = tasks.join_next().await {
            let partial = joined.map_err(|e| Error::TaskError(e.to_string()))??;
            histogram.merge(&partial)?;
        }

        trace_info!(total = histogram.total(), "sampling complete");
        self.finish(&histogram)
    }
}
