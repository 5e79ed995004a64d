//! Run configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Trial, bin, and grid counts for one harness run.
///
/// # Examples
///
/// ```
/// use distcheck::HarnessConfig;
///
/// let config = HarnessConfig {
///     num_bins: 40,
///     seed: Some(7),
///     ..HarnessConfig::default()
/// };
/// assert_eq!(config.num_trials, 100_000);
/// config.validate().unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HarnessConfig {
    /// Number of samples drawn (default: 100 000).
    pub num_trials: usize,
    /// Number of histogram bins (default: 20).
    pub num_bins: usize,
    /// Number of analytic curve grid points (default: 100).
    pub num_steps: usize,
    /// Random seed for reproducible runs (default: `None`, seeded from the OS).
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            num_trials: 100_000,
            num_bins: 20,
            num_steps: 100,
            seed: None,
        }
    }
}

impl HarnessConfig {
    /// Check the counts.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if `num_trials < 1`,
    /// `num_bins < 1`, or `num_steps < 2`.
    pub fn validate(&self) -> Result<()> {
        if self.num_trials < 1 {
            return Err(Error::config("num_trials", "must be at least 1"));
        }
        if self.num_bins < 1 {
            return Err(Error::config("num_bins", "must be at least 1"));
        }
        if self.num_steps < 2 {
            return Err(Error::config("num_steps", "must be at least 2"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = HarnessConfig::default();
        assert_eq!(c.num_trials, 100_000);
        assert_eq!(c.num_bins, 20);
        assert_eq!(c.num_steps, 100);
        assert_eq!(c.seed, None);
        c.validate().unwrap();
    }

    #[test]
    fn test_validate_names_field() {
        let cases = [
            (
                HarnessConfig {
                    num_trials: 0,
                    ..HarnessConfig::default()
                },
                "num_trials",
            ),
            (
                HarnessConfig {
                    num_bins: 0,
                    ..HarnessConfig::default()
                },
                "num_bins",
            ),
            (
                HarnessConfig {
                    num_steps: 1,
                    ..HarnessConfig::default()
                },
                "num_steps",
            ),
        ];
        for (config, expected) in cases {
            match config.validate() {
                Err(Error::InvalidConfiguration { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidConfiguration for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_minimal_counts_are_valid() {
        HarnessConfig {
            num_trials: 1,
            num_bins: 1,
            num_steps: 2,
            seed: Some(0),
        }
        .validate()
        .unwrap();
    }
}
