//! Error types for solver operations.

use crate::bisection::BisectionError;
use jc_components::ComponentError;
use thiserror::Error;

/// Errors that can occur while resolving the shaft power balance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// No turbine operating point inside the admissible expansion range
    /// delivers the required work.
    #[error("Power balance diverged: {what}")]
    PowerBalanceDivergence { what: String },

    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Root finding failed: {0}")]
    Bisection(#[from] BisectionError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),
}

pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divergence_display() {
        let err = SolverError::PowerBalanceDivergence {
            what: "turbine cannot deliver 200 kJ/kg".into(),
        };
        assert!(err.to_string().contains("200 kJ/kg"));
    }
}
