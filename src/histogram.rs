//! Fixed-width histogram with saturating boundary bins.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::{Error, Result};

/// One point of an empirical curve: a bin position and its value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinPoint {
    /// Bin centre for densities, bin right edge for cumulative fractions.
    pub x: f64,
    /// Empirical density or cumulative fraction.
    pub value: f64,
}

/// Equal-width bin counts over a [`Domain`].
///
/// Samples outside the domain are never dropped: anything left of `xmin`
/// (and NaN) lands in bin 0, anything at or right of `xmax` in the last bin.
///
/// # Examples
///
/// ```
/// use distcheck::{Domain, Histogram};
///
/// let mut hist = Histogram::new(Domain::new(0.0, 1.0).unwrap(), 4).unwrap();
/// for x in [-0.5, 0.1, 0.3, 1.0, 7.0] {
///     hist.accumulate(x);
/// }
/// assert_eq!(hist.counts(), &[2, 1, 0, 2]);
/// assert_eq!(hist.total(), 5);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Histogram {
    domain: Domain,
    bin_width: f64,
    counts: Vec<u64>,
}

impl Histogram {
    /// Create an empty histogram with `num_bins` bins over `domain`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if `num_bins` is zero or the
    /// resulting bin width underflows to zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(domain: Domain, num_bins: usize) -> Result<Self> {
        if num_bins < 1 {
            return Err(Error::config("num_bins", "must be at least 1"));
        }
        let bin_width = domain.width() / num_bins as f64;
        if bin_width.partial_cmp(&0.0) != Some(core::cmp::Ordering::Greater) {
            return Err(Error::config(
                "num_bins",
                format!("{num_bins} bins leave no width over the domain"),
            ));
        }
        Ok(Self {
            domain,
            bin_width,
            counts: vec![0; num_bins],
        })
    }

    /// The bin a sample falls into.
    ///
    /// `ihat = num_bins * (x - xmin) / (xmax - xmin)`; negative positions map
    /// to 0, others are truncated and clamped to `num_bins - 1`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn bin_index(&self, x: f64) -> usize {
        let num_bins = self.counts.len();
        let ihat = num_bins as f64 * (x - self.domain.xmin()) / self.domain.width();
        let index = if ihat < 0.0 { 0 } else { ihat as usize };
        index.min(num_bins - 1)
    }

    /// Count one sample.
    pub fn accumulate(&mut self, x: f64) {
        let index = self.bin_index(x);
        self.counts[index] += 1;
    }

    /// Count every sample of an iterator.
    pub fn extend<I: IntoIterator<Item = f64>>(&mut self, samples: I) {
        for x in samples {
            self.accumulate(x);
        }
    }

    /// Add another histogram's counts bin by bin.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if the two histograms do not
    /// share the same domain and bin count.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        if self.domain != other.domain || self.counts.len() != other.counts.len() {
            return Err(Error::config(
                "histogram",
                format!(
                    "cannot merge {} bins over [{}, {}] into {} bins over [{}, {}]",
                    other.counts.len(),
                    other.domain.xmin(),
                    other.domain.xmax(),
                    self.counts.len(),
                    self.domain.xmin(),
                    self.domain.xmax(),
                ),
            ));
        }
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
        Ok(())
    }

    /// The domain the bins cover.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// Width of every bin.
    #[must_use]
    pub const fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Number of bins.
    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    /// Raw per-bin counts.
    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Total number of samples counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Centre of bin `i`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bin_center(&self, i: usize) -> f64 {
        self.domain.xmin() + (i as f64 + 0.5) * self.bin_width
    }

    /// Right edge of bin `i`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bin_right_edge(&self, i: usize) -> f64 {
        self.domain.xmin() + (i as f64 + 1.0) * self.bin_width
    }

    /// Empirical density at each bin centre: `count / (N * bin_width)`.
    ///
    /// Not renormalized; mass folded into the boundary bins stays there.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn density(&self) -> Vec<BinPoint> {
        let total = self.total();
        let scale = if total == 0 {
            0.0
        } else {
            1.0 / (total as f64 * self.bin_width)
        };
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| BinPoint {
                x: self.bin_center(i),
                value: count as f64 * scale,
            })
            .collect()
    }

    /// Empirical cumulative fraction at each bin's right edge.
    ///
    /// The running count is divided by `N` and the whole curve is then divided
    /// by its last value, so the final point is exactly 1 whenever `N > 0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cumulative(&self) -> Vec<BinPoint> {
        let total = self.total();
        let mut running = 0u64;
        let mut points: Vec<BinPoint> = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                running += count;
                BinPoint {
                    x: self.bin_right_edge(i),
                    value: if total == 0 {
                        0.0
                    } else {
                        running as f64 / total as f64
                    },
                }
            })
            .collect();

        let last = points.last().map_or(0.0, |p| p.value);
        if last > 0.0 {
            for p in &mut points {
                p.value /= last;
            }
        }
        points
    }
}
