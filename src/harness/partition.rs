use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::histogram::Histogram;
use crate::variate::Variate;

use super::{Harness, accumulate};

/// The trials one worker draws, and the seed of its private RNG.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WorkerShare {
    pub(crate) index: usize,
    pub(crate) trials: usize,
    pub(crate) seed: u64,
}

impl WorkerShare {
    /// Draw this share into a fresh histogram.
    pub(crate) fn accumulate(
        &self,
        variate: &Variate,
        domain: Domain,
        num_bins: usize,
    ) -> Result<Histogram> {
        trace_debug!(worker = self.index, trials = self.trials, "worker started");
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut histogram = Histogram::new(domain, num_bins)?;
        accumulate(variate, &mut rng, self.trials, &mut histogram);
        Ok(histogram)
    }
}

impl Harness {
    /// Split the trials into `workers` contiguous shares; the first
    /// `num_trials % workers` shares take one extra trial.
    pub(crate) fn plan(&self, workers: usize) -> Result<Vec<WorkerShare>> {
        let num_trials = self.config.num_trials;
        if workers < 1 {
            return Err(Error::config("workers", "must be at least 1"));
        }
        if workers > num_trials {
            return Err(Error::config(
                "workers",
                format!("{workers} exceeds the number of trials ({num_trials})"),
            ));
        }

        let base_seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::rng().random::<u64>());
        let per_worker = num_trials / workers;
        let remainder = num_trials % workers;

        Ok((0..workers)
            .map(|index| WorkerShare {
                index,
                trials: per_worker + usize::from(index < remainder),
                seed: derive_seed(base_seed, index),
            })
            .collect())
    }
}

/// SplitMix64 step over the base seed offset by the worker index, giving
/// well-separated seeds for neighbouring workers.
fn derive_seed(base: u64, index: usize) -> u64 {
    let mut z = base.wrapping_add((index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
