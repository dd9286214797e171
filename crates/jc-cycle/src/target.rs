//! Fuel flow needed for a target thrust.

use crate::error::{CycleError, CycleEvalResult};
use crate::evaluator::CycleEvaluator;
use crate::inputs::CycleInputs;
use crate::result::CycleResult;
use jc_core::units::{Force, VolumeRate, ml_per_min};
use jc_solver::{BisectionConfig, BisectionError, SolverError, bisect};
use tracing::debug;

/// Operating point that meets a thrust target.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrustTarget {
    pub fuel_flow: VolumeRate,
    pub result: CycleResult,
    pub iterations: usize,
}

/// Bisect the fuel flow (ml/min, inside `bracket_ml_per_min`) until `base`
/// produces `target` thrust.
///
/// Both bracket ends must evaluate successfully; a bracket reaching into the
/// region where the shaft cannot be balanced fails with that evaluation's
/// error.
pub fn solve_fuel_flow_for_thrust(
    evaluator: &CycleEvaluator,
    base: &CycleInputs,
    target: Force,
    bracket_ml_per_min: [f64; 2],
    config: &BisectionConfig,
) -> CycleEvalResult<ThrustTarget> {
    let target_n = target.value;
    if !target_n.is_finite() || target_n <= 0.0 {
        return Err(CycleError::InvalidInput {
            what: format!("thrust target {target_n} N must be positive"),
        });
    }

    let residual = |q: f64| -> CycleEvalResult<f64> {
        let result = evaluator.evaluate(&base.with_fuel_flow(ml_per_min(q)))?;
        Ok((result.thrust.value - target_n) / target_n)
    };

    let solution = match bisect(residual, bracket_ml_per_min, config) {
        Ok(solution) => solution,
        Err(CycleError::Solver(SolverError::Bisection(BisectionError::NoBracket {
            left,
            right,
            left_residual,
            right_residual,
        }))) => {
            return Err(CycleError::TargetUnreachable {
                target_n,
                reason: format!(
                    "thrust is {:.2} N at {left} ml/min and {:.2} N at {right} ml/min",
                    target_n * (1.0 + left_residual),
                    target_n * (1.0 + right_residual)
                ),
            });
        }
        Err(err) => return Err(err),
    };

    let fuel_flow = ml_per_min(solution.x);
    let result = evaluator.evaluate(&base.with_fuel_flow(fuel_flow))?;
    debug!(
        fuel_ml_per_min = solution.x,
        thrust_n = result.thrust.value,
        iterations = solution.iterations,
        "thrust target met"
    );

    Ok(ThrustTarget {
        fuel_flow,
        result,
        iterations: solution.iterations,
    })
}
