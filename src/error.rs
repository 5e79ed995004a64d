/// Errors reported by the harness.
///
/// Every variant describes a deterministic configuration problem that is
/// detected before any sample is drawn, so none of them is worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a distribution parameter violates its domain constraint.
    #[error("invalid parameter for {family}: {name} = {value} (must be {constraint})")]
    InvalidParameter {
        /// The distribution family the parameter belongs to.
        family: &'static str,
        /// The offending parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// The constraint the value had to satisfy.
        constraint: &'static str,
    },

    /// Returned when a family tag matches none of the known families.
    #[error("unknown distribution '{0}'")]
    UnknownDistribution(String),

    /// Returned when a bin, step, trial, or worker count is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// The configuration field at fault.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Returned when a parallel worker task fails.
    #[cfg(feature = "async")]
    #[error("async task error: {0}")]
    TaskError(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}
