#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Monte Carlo validation of parametric distributions: draw samples from a
//! family, bin them into a histogram, and lay the empirical density and
//! cumulative fraction next to the closed-form PDF and CDF, ready for
//! plotting.
//!
//! # Getting Started
//!
//! ```
//! use distcheck::prelude::*;
//!
//! let dataset = Harness::builder()
//!     .distribution(DistributionSpec::Exponential { lambda: 3.0 })
//!     .num_trials(50_000)
//!     .seed(42)
//!     .build()
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! // The first bin averages 3·e^(-3x) over [0, 7/60], roughly 2.53.
//! let head = dataset.density[0];
//! assert!((head.value - 2.53).abs() < 0.15);
//! assert_eq!(dataset.cumulative.last().unwrap().value, 1.0);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`DistributionSpec`] | One of seven families with its parameters. |
//! | [`Domain`] | The `[xmin, xmax]` interval derived from a spec. |
//! | [`Histogram`] | Equal-width bins that fold out-of-range samples into the boundary bins. |
//! | [`ComparisonCurve`] | Analytic PDF/CDF on a uniform grid over the domain. |
//! | [`Harness`] | Runs the trial loop and produces a [`ComparisonDataset`]. |
//!
//! # Families
//!
//! | Tag | Family | Parameters (defaults) | Domain |
//! |-----|--------|-----------------------|--------|
//! | `uniform` | Uniform | — | `[0, 1]` |
//! | `normal` | Normal | eta = 0, sigma = 1 | `eta ± 4·sigma` |
//! | `exp` | Exponential | lambda = 3 | `[0, 7/lambda]` |
//! | `weib` | Weibull | alpha = 1, beta = 1, gamma = 1 | `[gamma, gamma + 6]` |
//! | `gamma` | Gamma | alpha = 4.5, beta = 1 | `[0, 14]` |
//! | `nak` | Nakagami-m | m = 4.5, omega = 1 | `[0, 2·√omega]` |
//! | `rice` | Rice-K | K = 4, omega = 1 | `[0, 2.3·√omega]` |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `async` | `Harness::run_parallel` on tokio blocking tasks | off |
//! | `serde` | `Serialize`/`Deserialize` on public types, `ComparisonDataset::save`/`load` | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) around each run | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod config;
mod curve;
mod dataset;
mod distribution;
mod domain;
mod error;
mod harness;
mod histogram;
mod variate;
mod visualization;

pub use config::HarnessConfig;
pub use curve::{ComparisonCurve, CurvePoint};
pub use dataset::ComparisonDataset;
pub use distribution::{DistributionSpec, FamilyKind};
pub use domain::Domain;
pub use error::{Error, Result};
pub use harness::{Harness, HarnessBuilder};
pub use histogram::{BinPoint, Histogram};
pub use visualization::generate_html_report;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use distcheck::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::HarnessConfig;
    pub use crate::curve::{ComparisonCurve, CurvePoint};
    pub use crate::dataset::ComparisonDataset;
    pub use crate::distribution::{DistributionSpec, FamilyKind};
    pub use crate::domain::Domain;
    pub use crate::error::{Error, Result};
    pub use crate::harness::{Harness, HarnessBuilder};
    pub use crate::histogram::{BinPoint, Histogram};
    pub use crate::visualization::generate_html_report;
}
