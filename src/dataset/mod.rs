//! The comparison dataset handed to plotting tools.

use crate::curve::{ComparisonCurve, CurvePoint};
use crate::distribution::DistributionSpec;
use crate::domain::Domain;
use crate::histogram::{BinPoint, Histogram};

mod export;
mod persistence;

/// Result of one harness run: the empirical histogram curves next to the
/// analytic PDF and CDF over the same domain.
///
/// The empirical density is left as computed, while the empirical cumulative
/// curve is renormalized to end at exactly 1.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonDataset {
    /// The sampled distribution.
    pub spec: DistributionSpec,
    /// The domain the histogram and curve cover.
    pub domain: Domain,
    /// Number of samples drawn.
    pub num_trials: u64,
    /// Width of each histogram bin.
    pub bin_width: f64,
    /// Raw per-bin counts.
    pub counts: Vec<u64>,
    /// `(bin centre, empirical density)` per bin.
    pub density: Vec<BinPoint>,
    /// `(bin right edge, empirical cumulative fraction)` per bin.
    pub cumulative: Vec<BinPoint>,
    /// `(x, pdf, cdf)` on the uniform analytic grid.
    pub curve: Vec<CurvePoint>,
}

impl ComparisonDataset {
    pub(crate) fn assemble(
        spec: DistributionSpec,
        histogram: &Histogram,
        curve: ComparisonCurve,
    ) -> Self {
        Self {
            spec,
            domain: histogram.domain(),
            num_trials: histogram.total(),
            bin_width: histogram.bin_width(),
            counts: histogram.counts().to_vec(),
            density: histogram.density(),
            cumulative: histogram.cumulative(),
            curve: curve.into_points(),
        }
    }

    /// Number of histogram bins.
    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }
}
