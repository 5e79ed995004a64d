//! Analytic PDF/CDF sampled on a uniform grid.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distribution::DistributionSpec;
use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::variate::Analytic;

/// One grid point of the analytic curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurvePoint {
    /// Grid position.
    pub x: f64,
    /// Analytic density at `x`. May be `+inf` where the density has a pole.
    #[cfg_attr(feature = "serde", serde(with = "float_repr"))]
    pub pdf: f64,
    /// Analytic cumulative probability at `x`.
    #[cfg_attr(feature = "serde", serde(with = "float_repr"))]
    pub cdf: f64,
}

/// JSON has no literal for infinities or NaN, so non-finite values are
/// written as the strings `"inf"`, `"-inf"` and `"NaN"`.
#[cfg(feature = "serde")]
mod float_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(serde::de::Error::custom(format!(
                    "expected a number, \"inf\", \"-inf\" or \"NaN\", got \"{other}\""
                ))),
            },
        }
    }
}

/// The analytic PDF and CDF evaluated at `num_steps` evenly spaced points
/// from `xmin` to `xmax` inclusive.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComparisonCurve {
    points: Vec<CurvePoint>,
}

impl ComparisonCurve {
    /// Evaluate the curve for `spec` over `domain`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if `num_steps < 2`, or
    /// `Error::InvalidParameter` if the spec is invalid.
    #[allow(clippy::cast_precision_loss)]
    pub fn evaluate(spec: &DistributionSpec, domain: Domain, num_steps: usize) -> Result<Self> {
        if num_steps < 2 {
            return Err(Error::config("num_steps", "must be at least 2"));
        }
        let analytic = Analytic::new(spec)?;
        let step = domain.width() / (num_steps - 1) as f64;
        let last = num_steps - 1;

        let points = (0..num_steps)
            .map(|i| {
                let x = if i == last {
                    domain.xmax()
                } else {
                    domain.xmin() + i as f64 * step
                };
                CurvePoint {
                    x,
                    pdf: analytic.pdf(x),
                    cdf: analytic.cdf(x),
                }
            })
            .collect();
        Ok(Self { points })
    }

    /// The grid points in increasing `x`.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for an evaluated curve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn into_points(self) -> Vec<CurvePoint> {
        self.points
    }
}
