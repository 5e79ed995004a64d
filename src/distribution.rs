//! Distribution families and their parameter sets.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::variate::Analytic;

/// Tag naming one of the supported distribution families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FamilyKind {
    /// Uniform on `[0, 1)`.
    Uniform,
    /// Gaussian.
    Normal,
    /// Exponential with a rate parameter.
    Exponential,
    /// Three-parameter Weibull.
    Weibull,
    /// Gamma with shape and scale.
    Gamma,
    /// Nakagami-m fading envelope.
    NakagamiM,
    /// Rice-K fading envelope.
    RiceK,
}

impl FamilyKind {
    /// All families, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Uniform,
        Self::Normal,
        Self::Exponential,
        Self::Weibull,
        Self::Gamma,
        Self::NakagamiM,
        Self::RiceK,
    ];

    /// The short tag accepted by [`FromStr`] and used in reports.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Normal => "normal",
            Self::Exponential => "exp",
            Self::Weibull => "weib",
            Self::Gamma => "gamma",
            Self::NakagamiM => "nak",
            Self::RiceK => "rice",
        }
    }
}

impl fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FamilyKind {
    type Err = Error;

    /// Parse a family tag. Both the short tags (`exp`, `weib`, `nak`, …) and
    /// the long names are accepted, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Self::Uniform,
            "normal" | "gauss" | "gaussian" => Self::Normal,
            "exp" | "exponential" => Self::Exponential,
            "weib" | "weibull" => Self::Weibull,
            "gamma" => Self::Gamma,
            "nak" | "nakagami" | "nakagami-m" | "nakagamim" => Self::NakagamiM,
            "rice" | "ricek" | "rice-k" | "rician" => Self::RiceK,
            _ => return Err(Error::UnknownDistribution(s.to_owned())),
        };
        Ok(kind)
    }
}

/// A parametric distribution family together with its parameters.
///
/// Values are plain data; use [`validate`](Self::validate) (or let
/// [`Domain::resolve`](crate::Domain::resolve) do it) before sampling.
///
/// # Examples
///
/// ```
/// use distcheck::{DistributionSpec, FamilyKind};
///
/// let spec: DistributionSpec = "exp".parse().unwrap();
/// assert_eq!(spec, DistributionSpec::Exponential { lambda: 3.0 });
/// assert_eq!(spec.kind(), FamilyKind::Exponential);
///
/// let bad = DistributionSpec::Normal { eta: 0.0, sigma: 0.0 };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "family", rename_all = "snake_case"))]
pub enum DistributionSpec {
    /// Uniform on `[0, 1)`.
    #[default]
    Uniform,
    /// Gaussian with mean `eta` and standard deviation `sigma > 0`.
    Normal {
        /// Mean.
        eta: f64,
        /// Standard deviation.
        sigma: f64,
    },
    /// Exponential with rate `lambda > 0`.
    Exponential {
        /// Decay rate.
        lambda: f64,
    },
    /// Weibull with shape `alpha > 0`, spread `beta > 0` and threshold `gamma`.
    Weibull {
        /// Shape.
        alpha: f64,
        /// Spread (scale).
        beta: f64,
        /// Threshold (location).
        gamma: f64,
    },
    /// Gamma with shape `alpha > 0` and spread `beta > 0`.
    Gamma {
        /// Shape.
        alpha: f64,
        /// Spread (scale).
        beta: f64,
    },
    /// Nakagami-m with shape `m > 0` and spread `omega > 0`.
    NakagamiM {
        /// Shape factor.
        m: f64,
        /// Spread factor (mean power).
        omega: f64,
    },
    /// Rice-K with factor `k >= 0` and spread `omega > 0`.
    RiceK {
        /// Ratio of line-of-sight to scattered power.
        k: f64,
        /// Spread factor (mean power).
        omega: f64,
    },
}

impl DistributionSpec {
    /// The documented default parameters for a family.
    #[must_use]
    pub const fn default_for(kind: FamilyKind) -> Self {
        match kind {
            FamilyKind::Uniform => Self::Uniform,
            FamilyKind::Normal => Self::Normal {
                eta: 0.0,
                sigma: 1.0,
            },
            FamilyKind::Exponential => Self::Exponential { lambda: 3.0 },
            FamilyKind::Weibull => Self::Weibull {
                alpha: 1.0,
                beta: 1.0,
                gamma: 1.0,
            },
            FamilyKind::Gamma => Self::Gamma {
                alpha: 4.5,
                beta: 1.0,
            },
            FamilyKind::NakagamiM => Self::NakagamiM { m: 4.5, omega: 1.0 },
            FamilyKind::RiceK => Self::RiceK { k: 4.0, omega: 1.0 },
        }
    }

    /// Parse a family tag and return that family with its default parameters.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownDistribution` if the tag names no known family.
    pub fn from_tag(tag: &str) -> Result<Self> {
        tag.parse::<FamilyKind>().map(Self::default_for)
    }

    /// The family this spec belongs to.
    #[must_use]
    pub const fn kind(&self) -> FamilyKind {
        match self {
            Self::Uniform => FamilyKind::Uniform,
            Self::Normal { .. } => FamilyKind::Normal,
            Self::Exponential { .. } => FamilyKind::Exponential,
            Self::Weibull { .. } => FamilyKind::Weibull,
            Self::Gamma { .. } => FamilyKind::Gamma,
            Self::NakagamiM { .. } => FamilyKind::NakagamiM,
            Self::RiceK { .. } => FamilyKind::RiceK,
        }
    }

    /// Check every parameter against its domain constraint.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` naming the first parameter that is
    /// non-finite or violates its positivity constraint.
    pub fn validate(&self) -> Result<()> {
        let family = self.kind().tag();
        match *self {
            Self::Uniform => Ok(()),
            Self::Normal { eta, sigma } => {
                finite(family, "eta", eta)?;
                positive(family, "sigma", sigma)
            }
            Self::Exponential { lambda } => positive(family, "lambda", lambda),
            Self::Weibull { alpha, beta, gamma } => {
                positive(family, "alpha", alpha)?;
                positive(family, "beta", beta)?;
                finite(family, "gamma", gamma)
            }
            Self::Gamma { alpha, beta } => {
                positive(family, "alpha", alpha)?;
                positive(family, "beta", beta)
            }
            Self::NakagamiM { m, omega } => {
                positive(family, "m", m)?;
                positive(family, "omega", omega)
            }
            Self::RiceK { k, omega } => {
                if !(k.is_finite() && k >= 0.0) {
                    return Err(Error::InvalidParameter {
                        family,
                        name: "K",
                        value: k,
                        constraint: ">= 0 and finite",
                    });
                }
                positive(family, "omega", omega)
            }
        }
    }

    /// Analytic probability density at `x`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the parameters are invalid.
    pub fn pdf(&self, x: f64) -> Result<f64> {
        Ok(Analytic::new(self)?.pdf(x))
    }

    /// Analytic cumulative distribution at `x`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the parameters are invalid.
    pub fn cdf(&self, x: f64) -> Result<f64> {
        Ok(Analytic::new(self)?.cdf(x))
    }
}

impl FromStr for DistributionSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
    }
}

impl fmt::Display for DistributionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Normal { eta, sigma } => write!(f, "normal(eta={eta}, sigma={sigma})"),
            Self::Exponential { lambda } => write!(f, "exp(lambda={lambda})"),
            Self::Weibull { alpha, beta, gamma } => {
                write!(f, "weib(alpha={alpha}, beta={beta}, gamma={gamma})")
            }
            Self::Gamma { alpha, beta } => write!(f, "gamma(alpha={alpha}, beta={beta})"),
            Self::NakagamiM { m, omega } => write!(f, "nak(m={m}, omega={omega})"),
            Self::RiceK { k, omega } => write!(f, "rice(K={k}, omega={omega})"),
        }
    }
}

fn finite(family: &'static str, name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            family,
            name,
            value,
            constraint: "finite",
        })
    }
}

fn positive(family: &'static str, name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            family,
            name,
            value,
            constraint: "> 0 and finite",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long_tags() {
        assert_eq!("uniform".parse::<FamilyKind>().unwrap(), FamilyKind::Uniform);
        assert_eq!("exp".parse::<FamilyKind>().unwrap(), FamilyKind::Exponential);
        assert_eq!("Weibull".parse::<FamilyKind>().unwrap(), FamilyKind::Weibull);
        assert_eq!(" NAK ".parse::<FamilyKind>().unwrap(), FamilyKind::NakagamiM);
        assert_eq!("rice-k".parse::<FamilyKind>().unwrap(), FamilyKind::RiceK);
        for kind in FamilyKind::ALL {
            assert_eq!(kind.tag().parse::<FamilyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_tag() {
        let err = "cauchy".parse::<FamilyKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownDistribution(ref t) if t == "cauchy"));
        assert!(matches!(
            DistributionSpec::from_tag(""),
            Err(Error::UnknownDistribution(_))
        ));
    }

    #[test]
    fn test_defaults_are_valid_and_documented() {
        for kind in FamilyKind::ALL {
            let spec = DistributionSpec::default_for(kind);
            assert_eq!(spec.kind(), kind);
            spec.validate().unwrap();
        }
        assert_eq!(
            DistributionSpec::from_tag("gamma").unwrap(),
            DistributionSpec::Gamma {
                alpha: 4.5,
                beta: 1.0
            }
        );
        assert_eq!(
            DistributionSpec::from_tag("rice").unwrap(),
            DistributionSpec::RiceK { k: 4.0, omega: 1.0 }
        );
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let cases = [
            (DistributionSpec::Normal { eta: 0.0, sigma: 0.0 }, "sigma"),
            (DistributionSpec::Normal { eta: 0.0, sigma: -1.0 }, "sigma"),
            (DistributionSpec::Exponential { lambda: 0.0 }, "lambda"),
            (
                DistributionSpec::Weibull {
                    alpha: 1.0,
                    beta: -2.0,
                    gamma: 0.0,
                },
                "beta",
            ),
            (
                DistributionSpec::Gamma {
                    alpha: 0.0,
                    beta: 1.0,
                },
                "alpha",
            ),
            (DistributionSpec::NakagamiM { m: 1.0, omega: 0.0 }, "omega"),
            (DistributionSpec::RiceK { k: -0.5, omega: 1.0 }, "K"),
            (DistributionSpec::Normal { eta: f64::NAN, sigma: 1.0 }, "eta"),
        ];
        for (spec, field) in cases {
            match spec.validate() {
                Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, field, "{spec}"),
                other => panic!("expected InvalidParameter for {spec}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rice_zero_k_is_valid() {
        DistributionSpec::RiceK { k: 0.0, omega: 1.0 }
            .validate()
            .unwrap();
    }

    #[test]
    fn test_weibull_threshold_may_be_negative() {
        DistributionSpec::Weibull {
            alpha: 2.0,
            beta: 1.0,
            gamma: -3.0,
        }
        .validate()
        .unwrap();
    }
}
