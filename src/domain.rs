//! Sampling domains covering the effective support of each family.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distribution::DistributionSpec;
use crate::error::{Error, Result};

/// A finite interval `[xmin, xmax]` with `xmin < xmax`.
///
/// Histograms are binned and analytic curves evaluated over this interval.
///
/// # Examples
///
/// ```
/// use distcheck::{DistributionSpec, Domain};
///
/// let domain = Domain::resolve(&DistributionSpec::Normal { eta: 2.0, sigma: 1.5 }).unwrap();
/// assert_eq!((domain.xmin(), domain.xmax()), (-4.0, 8.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Domain {
    xmin: f64,
    xmax: f64,
}

impl Domain {
    /// Create an explicit domain.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` unless both bounds are finite and
    /// `xmin < xmax`.
    pub fn new(xmin: f64, xmax: f64) -> Result<Self> {
        if !(xmin.is_finite() && xmax.is_finite() && (xmax - xmin).is_finite()) {
            return Err(Error::config(
                "domain",
                format!("bounds and width must be finite, got [{xmin}, {xmax}]"),
            ));
        }
        if xmin >= xmax {
            return Err(Error::config(
                "domain",
                format!("xmin ({xmin}) must be less than xmax ({xmax})"),
            ));
        }
        Ok(Self { xmin, xmax })
    }

    /// Derive the sampling domain for a distribution.
    ///
    /// | Family | xmin | xmax |
    /// |---|---|---|
    /// | Uniform | 0 | 1 |
    /// | Normal | eta − 4σ | eta + 4σ |
    /// | Exponential | 0 | 7 / λ |
    /// | Weibull | γ | γ + 6 |
    /// | Gamma | 0 | 14 |
    /// | Nakagami-m | 0 | 2√ω |
    /// | Rice-K | 0 | 2.3√ω |
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if a parameter violates its
    /// constraint, or if the parameters are so extreme that the interval
    /// is not finite and ordered.
    pub fn resolve(spec: &DistributionSpec) -> Result<Self> {
        spec.validate()?;

        let (xmin, xmax, driver) = match *spec {
            DistributionSpec::Uniform => (0.0, 1.0, None),
            DistributionSpec::Normal { eta, sigma } => {
                (eta - 4.0 * sigma, eta + 4.0 * sigma, Some(("sigma", sigma)))
            }
            DistributionSpec::Exponential { lambda } => (0.0, 7.0 / lambda, Some(("lambda", lambda))),
            DistributionSpec::Weibull { gamma, .. } => (gamma, gamma + 6.0, Some(("gamma", gamma))),
            DistributionSpec::Gamma { .. } => (0.0, 14.0, None),
            DistributionSpec::NakagamiM { omega, .. } => {
                (0.0, 2.0 * omega.sqrt(), Some(("omega", omega)))
            }
            DistributionSpec::RiceK { omega, .. } => (0.0, 2.3 * omega.sqrt(), Some(("omega", omega))),
        };

        if xmin.is_finite() && xmax.is_finite() && (xmax - xmin).is_finite() && xmin < xmax {
            return Ok(Self { xmin, xmax });
        }
        let (name, value) = driver.unwrap_or(("parameters", f64::NAN));
        Err(Error::InvalidParameter {
            family: spec.kind().tag(),
            name,
            value,
            constraint: "small enough to give a finite, non-empty domain",
        })
    }

    /// Lower bound.
    #[must_use]
    pub const fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Upper bound.
    #[must_use]
    pub const fn xmax(&self) -> f64 {
        self.xmax
    }

    /// `xmax - xmin`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }
}
