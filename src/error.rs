//! Errors for integration methods

use thiserror::Error;

use crate::Float;

/// Validation errors returned by the driver and harness entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Step size is zero, non-finite, or points away from the integration end.
    #[error("step size h has invalid sign (got {0})")]
    InvalidStepSize(Float),
    /// Divergence horizon must be non-negative.
    #[error("divergence horizon must be non-negative (got {0})")]
    InvalidHorizon(Float),
}
