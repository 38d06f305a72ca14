//! Error types for dual arithmetic and the gradient evaluator.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error variants raised while differentiating a function.
pub enum Error {
    #[error("{0}")]
    /// The call was malformed, e.g. `wrt` omitted for a multivariate function.
    InvalidArgument(&'static str),
    #[error("'{0}' is not a valid argument name")]
    /// The requested name is not a declared parameter of the function.
    UnknownParameter(String),
    #[error("domain error: {0}")]
    /// An arithmetic operation divided by a zero real part.
    Domain(&'static str),
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) const MISSING_WRT: &str = "wrt must be provided for multivariate functions";
pub(crate) const DIVISION_BY_ZERO: &str = "division by zero";
pub(crate) const ZERO_TO_LOW_POWER: &str = "zero raised to a power below one";
