use thiserror::Error;

use crate::support::constraint::{ConstraintError, StrictlyPositive};

use super::{BreakdownError, ParamsError};

/// Errors that can occur while producing a cost estimate.
///
/// Estimation is deterministic, so retrying with the same input always
/// reproduces the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    /// The project description failed validation.
    #[error("invalid project parameters")]
    InvalidProjectParameters(#[from] ParamsError),

    /// The computed breakdown violated a structural invariant.
    #[error("invalid cost breakdown")]
    InvalidCostBreakdown(#[from] BreakdownError),

    /// A preset value is outside its allowed range.
    #[error("invalid model configuration: {field}")]
    InvalidConfig {
        /// Name of the offending preset field.
        field: &'static str,

        #[source]
        source: ConstraintError,
    },
}

impl EstimateError {
    /// Requires a preset value to be finite and strictly positive.
    pub(crate) fn positive_config(field: &'static str, value: f64) -> Result<f64, Self> {
        let checked = if value.is_finite() {
            StrictlyPositive::new(value).map(|v| v.get())
        } else if value.is_nan() {
            Err(ConstraintError::NotANumber)
        } else {
            Err(ConstraintError::NotFinite)
        };
        checked.map_err(|source| Self::InvalidConfig { field, source })
    }
}
