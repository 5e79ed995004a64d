//! Random-variate samplers and analytic density functions per family.
//!
//! Sampling is delegated to [`rand_distr`] and the closed-form PDF/CDF to
//! [`statrs`]. Nakagami-m is the square root of a Gamma(m, ω/m) variate.
//! Rice-K is evaluated as a Poisson(K) mixture of Gamma(j + 1) envelopes,
//! which needs only the regularized incomplete gamma function. Above
//! `RICE_GAUSSIAN_K` the envelope is replaced by its Gaussian limit.

use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::{Continuous, ContinuousCDF};
use statrs::function::gamma::{gamma_lr, ln_gamma};

use crate::distribution::DistributionSpec;
use crate::error::{Error, Result};

/// A ready-to-draw sampler for one [`DistributionSpec`].
#[derive(Clone, Debug)]
pub(crate) enum Variate {
    Uniform,
    Normal(rand_distr::Normal<f64>),
    Exponential(rand_distr::Exp<f64>),
    Weibull {
        dist: rand_distr::Weibull<f64>,
        threshold: f64,
    },
    Gamma(rand_distr::Gamma<f64>),
    /// Square root of the Gamma-distributed power.
    NakagamiM(rand_distr::Gamma<f64>),
    RiceK {
        los: f64,
        scatter: rand_distr::Normal<f64>,
    },
}

impl Variate {
    /// Build the sampler, validating the parameters first.
    pub(crate) fn new(spec: &DistributionSpec) -> Result<Self> {
        spec.validate()?;
        let family = spec.kind().tag();
        let variate = match *spec {
            DistributionSpec::Uniform => Self::Uniform,
            DistributionSpec::Normal { eta, sigma } => Self::Normal(
                rand_distr::Normal::new(eta, sigma)
                    .map_err(|_| rejected(family, "sigma", sigma))?,
            ),
            DistributionSpec::Exponential { lambda } => Self::Exponential(
                rand_distr::Exp::new(lambda).map_err(|_| rejected(family, "lambda", lambda))?,
            ),
            DistributionSpec::Weibull { alpha, beta, gamma } => Self::Weibull {
                dist: rand_distr::Weibull::new(beta, alpha)
                    .map_err(|_| rejected(family, "alpha", alpha))?,
                threshold: gamma,
            },
            DistributionSpec::Gamma { alpha, beta } => Self::Gamma(
                rand_distr::Gamma::new(alpha, beta)
                    .map_err(|_| rejected(family, "alpha", alpha))?,
            ),
            DistributionSpec::NakagamiM { m, omega } => Self::NakagamiM(
                rand_distr::Gamma::new(m, omega / m).map_err(|_| rejected(family, "m", m))?,
            ),
            DistributionSpec::RiceK { k, omega } => {
                let los = (omega * k / (k + 1.0)).sqrt();
                let sigma = (0.5 * omega / (k + 1.0)).sqrt();
                Self::RiceK {
                    los,
                    scatter: rand_distr::Normal::new(0.0, sigma)
                        .map_err(|_| rejected(family, "omega", omega))?,
                }
            }
        };
        Ok(variate)
    }
}

impl Distribution<f64> for Variate {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Uniform => rand::distr::StandardUniform.sample(rng),
            Self::Normal(d) => d.sample(rng),
            Self::Exponential(d) => d.sample(rng),
            Self::Weibull { dist, threshold } => threshold + dist.sample(rng),
            Self::Gamma(d) => d.sample(rng),
            Self::NakagamiM(power) => power.sample(rng).sqrt(),
            Self::RiceK { los, scatter } => {
                let i = los + scatter.sample(rng);
                let q = scatter.sample(rng);
                i.hypot(q)
            }
        }
    }
}

/// Closed-form PDF and CDF for one [`DistributionSpec`].
#[derive(Clone, Debug)]
pub(crate) enum Analytic {
    Uniform(statrs::distribution::Uniform),
    Normal(statrs::distribution::Normal),
    Exponential(statrs::distribution::Exp),
    Weibull {
        dist: statrs::distribution::Weibull,
        threshold: f64,
    },
    Gamma(statrs::distribution::Gamma),
    NakagamiM {
        m: f64,
        omega: f64,
    },
    RiceK {
        k: f64,
        omega: f64,
    },
    /// Rice-K with a large K factor, approximated by a normal envelope.
    RiceGaussian(statrs::distribution::Normal),
}

/// Rice-K factors above this use the Gaussian limit
/// `N(sqrt(ν² + σ²), σ²)`, whose error shrinks like `1/K`.
const RICE_GAUSSIAN_K: f64 = 1e4;

impl Analytic {
    pub(crate) fn new(spec: &DistributionSpec) -> Result<Self> {
        spec.validate()?;
        let family = spec.kind().tag();
        let analytic = match *spec {
            DistributionSpec::Uniform => Self::Uniform(
                statrs::distribution::Uniform::new(0.0, 1.0)
                    .map_err(|_| rejected(family, "bounds", 1.0))?,
            ),
            DistributionSpec::Normal { eta, sigma } => Self::Normal(
                statrs::distribution::Normal::new(eta, sigma)
                    .map_err(|_| rejected(family, "sigma", sigma))?,
            ),
            DistributionSpec::Exponential { lambda } => Self::Exponential(
                statrs::distribution::Exp::new(lambda)
                    .map_err(|_| rejected(family, "lambda", lambda))?,
            ),
            DistributionSpec::Weibull { alpha, beta, gamma } => Self::Weibull {
                dist: statrs::distribution::Weibull::new(alpha, beta)
                    .map_err(|_| rejected(family, "alpha", alpha))?,
                threshold: gamma,
            },
            // statrs parameterizes Gamma by rate.
            DistributionSpec::Gamma { alpha, beta } => Self::Gamma(
                statrs::distribution::Gamma::new(alpha, 1.0 / beta)
                    .map_err(|_| rejected(family, "beta", beta))?,
            ),
            DistributionSpec::NakagamiM { m, omega } => Self::NakagamiM { m, omega },
            DistributionSpec::RiceK { k, omega } if k > RICE_GAUSSIAN_K => {
                let los_power = omega * k / (k + 1.0);
                let scatter = 0.5 * omega / (k + 1.0);
                Self::RiceGaussian(
                    statrs::distribution::Normal::new((los_power + scatter).sqrt(), scatter.sqrt())
                        .map_err(|_| rejected(family, "K", k))?,
                )
            }
            DistributionSpec::RiceK { k, omega } => Self::RiceK { k, omega },
        };
        Ok(analytic)
    }

    pub(crate) fn pdf(&self, x: f64) -> f64 {
        match self {
            Self::Uniform(d) => d.pdf(x),
            Self::Normal(d) => d.pdf(x),
            Self::Exponential(d) => d.pdf(x),
            Self::Weibull { dist, threshold } => {
                let t = x - threshold;
                if t < 0.0 { 0.0 } else { dist.pdf(t) }
            }
            Self::Gamma(d) => d.pdf(x),
            Self::NakagamiM { m, omega } => nakagami_pdf(*m, *omega, x),
            Self::RiceK { k, omega } => rice_pdf(*k, *omega, x),
            Self::RiceGaussian(d) => {
                if x <= 0.0 { 0.0 } else { d.pdf(x) }
            }
        }
    }

    pub(crate) fn cdf(&self, x: f64) -> f64 {
        match self {
            Self::Uniform(d) => d.cdf(x),
            Self::Normal(d) => d.cdf(x),
            Self::Exponential(d) => d.cdf(x),
            Self::Weibull { dist, threshold } => {
                let t = x - threshold;
                if t <= 0.0 { 0.0 } else { dist.cdf(t) }
            }
            Self::Gamma(d) => d.cdf(x),
            Self::NakagamiM { m, omega } => {
                if x <= 0.0 {
                    0.0
                } else {
                    gamma_lr(*m, m * x * x / omega)
                }
            }
            Self::RiceK { k, omega } => rice_cdf(*k, *omega, x),
            Self::RiceGaussian(d) => {
                if x <= 0.0 { 0.0 } else { d.cdf(x) }
            }
        }
    }
}

fn rejected(family: &'static str, name: &'static str, value: f64) -> Error {
    Error::InvalidParameter {
        family,
        name,
        value,
        constraint: "accepted by the sampler",
    }
}

fn nakagami_pdf(m: f64, omega: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let ln_f = core::f64::consts::LN_2 + m * (m / omega).ln() - ln_gamma(m)
        + (2.0 * m - 1.0) * x.ln()
        - m * x * x / omega;
    ln_f.exp()
}

/// Poisson(K) mixture terms kept: a window of twelve standard deviations
/// around the mode. The neglected mass is far below `f64` resolution.
/// Only called with `K <= RICE_GAUSSIAN_K`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rice_terms(k: f64) -> core::ops::RangeInclusive<usize> {
    let spread = 12.0 * k.sqrt();
    let low = (k - spread).max(0.0).floor() as usize;
    let high = (k + spread + 30.0).ceil() as usize;
    low..=high
}

#[allow(clippy::cast_precision_loss)]
fn ln_poisson_weight(k: f64, j: usize) -> f64 {
    if k <= 0.0 {
        return if j == 0 { 0.0 } else { f64::NEG_INFINITY };
    }
    let j = j as f64;
    -k + j * k.ln() - ln_gamma(j + 1.0)
}

#[allow(clippy::cast_precision_loss)]
fn rice_pdf(k: f64, omega: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let c = (k + 1.0) / omega;
    let t = c * x * x;
    let ln_t = t.ln();
    let ln_jacobian = (2.0 * c * x).ln();
    rice_terms(k)
        .map(|j| {
            let ln_w = ln_poisson_weight(k, j);
            let j = j as f64;
            (ln_w + ln_jacobian + j * ln_t - t - ln_gamma(j + 1.0)).exp()
        })
        .sum()
}

#[allow(clippy::cast_precision_loss)]
fn rice_cdf(k: f64, omega: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let t = (k + 1.0) / omega * x * x;
    let total: f64 = rice_terms(k)
        .map(|j| ln_poisson_weight(k, j).exp() * gamma_lr(j as f64 + 1.0, t))
        .sum();
    total.min(1.0)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn analytic(spec: DistributionSpec) -> Analytic {
        Analytic::new(&spec).unwrap()
    }

    /// Midpoint-rule integral of the PDF over `[low, high]`.
    #[allow(clippy::cast_precision_loss)]
    fn integrate(a: &Analytic, low: f64, high: f64) -> f64 {
        let n = 20_000;
        let dx = (high - low) / n as f64;
        (0..n)
            .map(|i| a.pdf(low + (i as f64 + 0.5) * dx) * dx)
            .sum()
    }

    #[test]
    fn test_uniform_and_exponential_closed_forms() {
        let u = analytic(DistributionSpec::Uniform);
        assert!((u.pdf(0.5) - 1.0).abs() < 1e-12);
        assert!((u.cdf(0.25) - 0.25).abs() < 1e-12);

        let e = analytic(DistributionSpec::Exponential { lambda: 3.0 });
        assert!((e.pdf(0.0) - 3.0).abs() < 1e-12);
        assert!((e.cdf(1.0) - (1.0 - (-3.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_weibull_threshold_shifts_support() {
        let w = analytic(DistributionSpec::Weibull {
            alpha: 1.0,
            beta: 1.0,
            gamma: 1.0,
        });
        assert_eq!(w.pdf(0.5), 0.0);
        assert_eq!(w.cdf(0.5), 0.0);
        // alpha = beta = 1 reduces to a unit exponential starting at 1.
        assert!((w.pdf(2.0) - (-1.0f64).exp()).abs() < 1e-12);
        assert!((w.cdf(2.0) - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_gamma_uses_scale() {
        let g = analytic(DistributionSpec::Gamma {
            alpha: 1.0,
            beta: 2.0,
        });
        // Gamma(1, scale 2) is Exp(rate 1/2).
        assert!((g.pdf(1.0) - 0.5 * (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_nakagami_m_one_is_rayleigh() {
        let n = analytic(DistributionSpec::NakagamiM { m: 1.0, omega: 2.0 });
        let x: f64 = 0.8;
        let rayleigh_pdf = 2.0 * x / 2.0 * (-x * x / 2.0).exp();
        let rayleigh_cdf = 1.0 - (-x * x / 2.0).exp();
        assert!((n.pdf(x) - rayleigh_pdf).abs() < 1e-10);
        assert!((n.cdf(x) - rayleigh_cdf).abs() < 1e-10);
    }

    #[test]
    fn test_rice_k_zero_is_rayleigh() {
        let r = analytic(DistributionSpec::RiceK { k: 0.0, omega: 1.0 });
        for x in [0.1f64, 0.7, 1.5] {
            let pdf = 2.0 * x * (-x * x).exp();
            let cdf = 1.0 - (-x * x).exp();
            assert!((r.pdf(x) - pdf).abs() < 1e-10, "pdf at {x}");
            assert!((r.cdf(x) - cdf).abs() < 1e-10, "cdf at {x}");
        }
    }

    #[test]
    fn test_densities_integrate_to_cdf() {
        let specs = [
            DistributionSpec::Gamma {
                alpha: 4.5,
                beta: 1.0,
            },
            DistributionSpec::NakagamiM { m: 4.5, omega: 1.0 },
            DistributionSpec::RiceK { k: 4.0, omega: 1.0 },
        ];
        for spec in specs {
            let a = analytic(spec);
            let upper = 1.2;
            let integral = integrate(&a, 0.0, upper);
            assert!(
                (integral - a.cdf(upper)).abs() < 1e-4,
                "{spec}: integral {integral} vs cdf {}",
                a.cdf(upper)
            );
        }
    }

    #[test]
    fn test_rice_cdf_saturates() {
        let r = analytic(DistributionSpec::RiceK { k: 4.0, omega: 1.0 });
        assert!(r.cdf(5.0) > 0.999_999);
        assert!(r.cdf(5.0) <= 1.0);
        assert_eq!(r.cdf(0.0), 0.0);
    }

    #[test]
    fn test_rice_window_skips_negligible_terms() {
        assert_eq!(rice_terms(0.0), 0..=30);
        let window = rice_terms(RICE_GAUSSIAN_K);
        assert_eq!(*window.start(), 8_800);
        assert_eq!(*window.end(), 11_230);
    }

    #[test]
    fn test_rice_gaussian_limit_joins_mixture() {
        let mixture = analytic(DistributionSpec::RiceK {
            k: RICE_GAUSSIAN_K,
            omega: 1.0,
        });
        let limit = analytic(DistributionSpec::RiceK {
            k: RICE_GAUSSIAN_K * 1.000_001,
            omega: 1.0,
        });
        assert!(matches!(mixture, Analytic::RiceK { .. }));
        assert!(matches!(limit, Analytic::RiceGaussian(_)));
        let sigma = (0.5 / (RICE_GAUSSIAN_K + 1.0)).sqrt();
        for offset in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let x = 1.0 + offset * sigma;
            assert!(
                (mixture.cdf(x) - limit.cdf(x)).abs() < 5e-3,
                "cdf at {x}: {} vs {}",
                mixture.cdf(x),
                limit.cdf(x)
            );
        }
    }

    #[test]
    fn test_rice_huge_k_stays_monotone() {
        for k in [1e12, 1e300] {
            let r = analytic(DistributionSpec::RiceK { k, omega: 1.0 });
            let mut previous = 0.0;
            for i in 0..=230 {
                let x = f64::from(i) * 0.01;
                let cdf = r.cdf(x);
                assert!(cdf >= previous, "K = {k}: cdf dropped at {x}");
                assert!(r.pdf(x).is_finite());
                previous = cdf;
            }
            assert!(r.cdf(0.9) < 1e-6);
            assert!(r.cdf(1.1) > 1.0 - 1e-6);
        }
    }

    #[test]
    fn test_sample_means_match_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let cases = [
            (DistributionSpec::Normal { eta: 2.0, sigma: 0.5 }, 2.0),
            (DistributionSpec::Exponential { lambda: 3.0 }, 1.0 / 3.0),
            (
                DistributionSpec::Weibull {
                    alpha: 1.0,
                    beta: 1.0,
                    gamma: 1.0,
                },
                2.0,
            ),
            (
                DistributionSpec::Gamma {
                    alpha: 4.5,
                    beta: 1.0,
                },
                4.5,
            ),
        ];
        for (spec, mean) in cases {
            let v = Variate::new(&spec).unwrap();
            let n = 50_000;
            let sum: f64 = (0..n).map(|_| v.sample(&mut rng)).sum();
            let got = sum / f64::from(n);
            assert!((got - mean).abs() < 0.05 * mean.abs().max(1.0), "{spec}: {got}");
        }
    }

    #[test]
    fn test_fading_envelopes_have_unit_power() {
        let mut rng = StdRng::seed_from_u64(11);
        for spec in [
            DistributionSpec::NakagamiM { m: 4.5, omega: 1.0 },
            DistributionSpec::RiceK { k: 4.0, omega: 1.0 },
        ] {
            let v = Variate::new(&spec).unwrap();
            let n = 50_000;
            let power: f64 = (0..n).map(|_| v.sample(&mut rng).powi(2)).sum::<f64>() / f64::from(n);
            assert!((power - 1.0).abs() < 0.03, "{spec}: E[x^2] = {power}");
        }
    }

    #[test]
    fn test_invalid_spec_rejected_before_construction() {
        let spec = DistributionSpec::Exponential { lambda: -1.0 };
        assert!(matches!(
            Variate::new(&spec),
            Err(Error::InvalidParameter { name: "lambda", .. })
        ));
        assert!(matches!(
            Analytic::new(&spec),
            Err(Error::InvalidParameter { name: "lambda", .. })
        ));
    }
}
