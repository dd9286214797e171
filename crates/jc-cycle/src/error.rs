//! Error types for cycle evaluation.

use jc_components::ComponentError;
use jc_config::ValidationError;
use jc_props::PropsError;
use jc_solver::{BisectionError, SolverError};
use std::fmt;
use thiserror::Error;

/// Errors that end a cycle evaluation.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ValidationError),

    #[error("Property table error: {0}")]
    Props(#[from] PropsError),

    #[error("Stage error: {0}")]
    Component(#[from] ComponentError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    /// Output validation failed under [`crate::ValidationMode::Reject`].
    #[error("Output validation failed: {}", violations.join("; "))]
    Validation { violations: Vec<String> },

    #[error("Thrust target {target_n} N unreachable: {reason}")]
    TargetUnreachable { target_n: f64, reason: String },
}

pub type CycleEvalResult<T> = Result<T, CycleError>;

impl From<BisectionError> for CycleError {
    fn from(err: BisectionError) -> Self {
        CycleError::Solver(SolverError::Bisection(err))
    }
}

/// Coarse classification of a failed evaluation, used by batch drivers to
/// tally failures without inspecting error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FailureKind {
    /// A property lookup fell outside the tabulated domain.
    OutOfRangeInput,
    /// A property table failed to load.
    MalformedTable,
    /// No turbine operating point balances the shaft.
    PowerBalanceDivergence,
    /// A stage or the output validation reached a physically impossible state.
    PhysicalInfeasibility,
    /// A parameter was rejected before any computation.
    InvalidInput,
}

impl FailureKind {
    pub const ALL: [FailureKind; 5] = [
        FailureKind::OutOfRangeInput,
        FailureKind::MalformedTable,
        FailureKind::PowerBalanceDivergence,
        FailureKind::PhysicalInfeasibility,
        FailureKind::InvalidInput,
    ];
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::OutOfRangeInput => "out-of-range input",
            FailureKind::MalformedTable => "malformed table",
            FailureKind::PowerBalanceDivergence => "power-balance divergence",
            FailureKind::PhysicalInfeasibility => "physical infeasibility",
            FailureKind::InvalidInput => "invalid input",
        };
        f.write_str(name)
    }
}

impl CycleError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CycleError::InvalidInput { .. } | CycleError::Config(_) => FailureKind::InvalidInput,
            CycleError::Props(err) => props_kind(err),
            CycleError::Component(err) => component_kind(err),
            CycleError::Solver(err) => match err {
                SolverError::PowerBalanceDivergence { .. } | SolverError::Bisection(_) => {
                    FailureKind::PowerBalanceDivergence
                }
                SolverError::InvalidConfig { .. } => FailureKind::InvalidInput,
                SolverError::Component(err) => component_kind(err),
            },
            CycleError::Validation { .. } | CycleError::TargetUnreachable { .. } => {
                FailureKind::PhysicalInfeasibility
            }
        }
    }
}

fn props_kind(err: &PropsError) -> FailureKind {
    if err.is_load_error() {
        FailureKind::MalformedTable
    } else {
        FailureKind::OutOfRangeInput
    }
}

fn component_kind(err: &ComponentError) -> FailureKind {
    match err {
        ComponentError::NonPhysical { .. } | ComponentError::InvalidArg { .. } => {
            FailureKind::InvalidInput
        }
        ComponentError::Infeasible { .. } => FailureKind::PhysicalInfeasibility,
        ComponentError::Property(err) => props_kind(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_error_chain() {
        let out_of_range = PropsError::OutOfRange {
            property: "temperature",
            value: 100.0,
            min: 200.0,
            max: 2200.0,
        };
        assert_eq!(
            CycleError::from(out_of_range.clone()).kind(),
            FailureKind::OutOfRangeInput
        );
        assert_eq!(
            CycleError::from(ComponentError::Property(out_of_range)).kind(),
            FailureKind::OutOfRangeInput
        );
        assert_eq!(
            CycleError::from(PropsError::MalformedTable {
                reason: "one row".into()
            })
            .kind(),
            FailureKind::MalformedTable
        );
        assert_eq!(
            CycleError::from(ComponentError::Infeasible {
                stage: "combustor",
                reason: "too hot".into()
            })
            .kind(),
            FailureKind::PhysicalInfeasibility
        );
        assert_eq!(
            CycleError::from(SolverError::PowerBalanceDivergence {
                what: "no ratio".into()
            })
            .kind(),
            FailureKind::PowerBalanceDivergence
        );
        assert_eq!(
            CycleError::from(ComponentError::InvalidArg { what: "efficiency" }).kind(),
            FailureKind::InvalidInput
        );
    }

    #[test]
    fn validation_message_lists_violations() {
        let err = CycleError::Validation {
            violations: vec!["exhaust too hot".into(), "shaft short".into()],
        };
        assert_eq!(
            err.to_string(),
            "Output validation failed: exhaust too hot; shaft short"
        );
    }
}
