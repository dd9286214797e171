//! Fuel-flow sweeps (thrust line of an engine).

use crate::error::{CycleError, CycleEvalResult, FailureKind};
use crate::evaluator::CycleEvaluator;
use crate::inputs::CycleInputs;
use crate::result::CycleResult;
use jc_core::units::ml_per_min;
use rayon::prelude::*;
use std::fmt;
use uom::si::force::newton;
use uom::si::thermodynamic_temperature::kelvin;
use uom::si::velocity::meter_per_second;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SweepType {
    #[default]
    Linear,
    Logarithmic,
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

/// Fuel volumetric flow range [ml/min] to sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelFlowSweep {
    start_ml_per_min: f64,
    end_ml_per_min: f64,
    num_points: usize,
    sweep_type: SweepType,
}

impl FuelFlowSweep {
    pub fn new(
        start_ml_per_min: f64,
        end_ml_per_min: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> CycleEvalResult<Self> {
        let invalid = |what: &str| CycleError::InvalidInput {
            what: format!("fuel sweep: {what}"),
        };
        if !start_ml_per_min.is_finite() || !end_ml_per_min.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if start_ml_per_min < 0.0 || end_ml_per_min < 0.0 {
            return Err(invalid("bounds must be non-negative"));
        }
        if num_points < 2 {
            return Err(invalid("at least 2 points required"));
        }
        if (start_ml_per_min - end_ml_per_min).abs() < 1e-12 {
            return Err(invalid("start and end must differ"));
        }
        if sweep_type == SweepType::Logarithmic && start_ml_per_min.min(end_ml_per_min) <= 0.0 {
            return Err(invalid("logarithmic sweep needs positive bounds"));
        }
        Ok(Self {
            start_ml_per_min,
            end_ml_per_min,
            num_points,
            sweep_type,
        })
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Fuel flows [ml/min], endpoints exact.
    pub fn generate_points(&self) -> Vec<f64> {
        let n = self.num_points;
        let mut points: Vec<f64> = match self.sweep_type {
            SweepType::Linear => {
                let delta = (self.end_ml_per_min - self.start_ml_per_min) / (n - 1) as f64;
                (0..n)
                    .map(|i| self.start_ml_per_min + i as f64 * delta)
                    .collect()
            }
            SweepType::Logarithmic => {
                let log_start = self.start_ml_per_min.ln();
                let log_delta = (self.end_ml_per_min.ln() - log_start) / (n - 1) as f64;
                (0..n)
                    .map(|i| (log_start + i as f64 * log_delta).exp())
                    .collect()
            }
        };
        points[0] = self.start_ml_per_min;
        points[n - 1] = self.end_ml_per_min;
        points
    }
}

impl fmt::Display for FuelFlowSweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fuel sweep from {} to {} ml/min ({} points, {})",
            self.start_ml_per_min, self.end_ml_per_min, self.num_points, self.sweep_type
        )
    }
}

/// Result of a fuel-flow sweep.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Swept fuel flows [ml/min].
    pub fuel_flow_ml_per_min: Vec<f64>,
    /// Evaluated cycles (None for failed points).
    pub results: Vec<Option<CycleResult>>,
    /// Why each failed point failed, by point index.
    pub failures: Vec<(usize, FailureKind)>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    /// (fuel flow, thrust [N]) pairs of successful points.
    pub fn thrust_n(&self) -> Vec<(f64, f64)> {
        self.successful(|r| r.thrust.get::<newton>())
    }

    /// (fuel flow, exit velocity [m/s]) pairs of successful points.
    pub fn exit_velocity_mps(&self) -> Vec<(f64, f64)> {
        self.successful(|r| r.exit_velocity.get::<meter_per_second>())
    }

    /// (fuel flow, exhaust temperature [K]) pairs of successful points.
    pub fn exhaust_temperature_k(&self) -> Vec<(f64, f64)> {
        self.successful(|r| r.exhaust_temperature().get::<kelvin>())
    }

    fn successful(&self, value: impl Fn(&CycleResult) -> f64) -> Vec<(f64, f64)> {
        self.fuel_flow_ml_per_min
            .iter()
            .zip(&self.results)
            .filter_map(|(q, r)| r.as_ref().map(|r| (*q, value(r))))
            .collect()
    }
}

/// Evaluate `base` at every fuel flow of `sweep`.
pub fn run_fuel_sweep(
    evaluator: &CycleEvaluator,
    base: &CycleInputs,
    sweep: &FuelFlowSweep,
) -> SweepResult {
    let points = sweep.generate_points();
    let outcomes: Vec<_> = points
        .par_iter()
        .map(|&q| evaluator.evaluate(&base.with_fuel_flow(ml_per_min(q))))
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(result) => results.push(Some(result)),
            Err(err) => {
                failures.push((index, err.kind()));
                results.push(None);
            }
        }
    }

    SweepResult {
        num_successful: points.len() - failures.len(),
        num_failed: failures.len(),
        fuel_flow_ml_per_min: points,
        results,
        failures,
    }
}
