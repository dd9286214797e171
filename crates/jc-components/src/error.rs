//! Error types for stage calculations.

use jc_core::error::JcError;
use jc_props::PropsError;
use thiserror::Error;

/// Errors that can occur during stage calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Infeasible {stage} operating point: {reason}")]
    Infeasible { stage: &'static str, reason: String },

    #[error("Property lookup failed: {0}")]
    Property(#[from] PropsError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<JcError> for ComponentError {
    fn from(e: JcError) -> Self {
        match e {
            JcError::NonFinite { what, .. } => ComponentError::NonPhysical { what },
            JcError::InvalidArg { what } => ComponentError::InvalidArg { what },
            JcError::OutOfBounds { what, .. } => ComponentError::InvalidArg { what },
            JcError::Invariant { what } => ComponentError::NonPhysical { what },
        }
    }
}
