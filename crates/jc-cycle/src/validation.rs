//! Output validation of an evaluated cycle.

use crate::error::{CycleError, CycleEvalResult};
use jc_config::{ExhaustBandDef, ValidationModeDef};
use jc_core::numeric::{Tolerances, nearly_equal};
use jc_core::units::{Temperature, k};
use std::fmt;

/// Slack allowed when comparing required and delivered shaft work [kJ/kg].
const POWER_BALANCE_TOL: Tolerances = Tolerances {
    abs: 1e-9,
    rel: 1e-6,
};

/// Admissible exhaust temperature range, inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureBand {
    min: Temperature,
    max: Temperature,
}

impl TemperatureBand {
    pub fn new(min: Temperature, max: Temperature) -> CycleEvalResult<Self> {
        if !min.value.is_finite() || !max.value.is_finite() || min.value <= 0.0 || min >= max {
            return Err(CycleError::InvalidInput {
                what: format!(
                    "temperature band [{} K, {} K] must be positive and increasing",
                    min.value, max.value
                ),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Temperature {
        self.min
    }

    pub fn max(&self) -> Temperature {
        self.max
    }

    pub fn contains(&self, t: Temperature) -> bool {
        t >= self.min && t <= self.max
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Record violations on the result.
    #[default]
    Warn,
    /// Fail the evaluation with [`CycleError::Validation`].
    Reject,
}

/// Which checks run after a successful evaluation, and what a violation does.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValidationPolicy {
    pub exhaust_band: Option<TemperatureBand>,
    pub mode: ValidationMode,
}

impl ValidationPolicy {
    pub fn from_config(
        band: Option<&ExhaustBandDef>,
        mode: ValidationModeDef,
    ) -> CycleEvalResult<Self> {
        let exhaust_band = band
            .map(|band| TemperatureBand::new(k(band.min_k), k(band.max_k)))
            .transpose()?;
        let mode = match mode {
            ValidationModeDef::Warn => ValidationMode::Warn,
            ValidationModeDef::Reject => ValidationMode::Reject,
        };
        Ok(Self { exhaust_band, mode })
    }

    /// Run every check; an empty list means the cycle passed.
    ///
    /// `work_tolerance` is the relative work error the power-balance resolver
    /// was allowed; the deficit check never holds the cycle to less.
    pub fn check(
        &self,
        exhaust_temperature: Temperature,
        required_work: f64,
        delivered_work: f64,
        work_tolerance: f64,
    ) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if let Some(band) = &self.exhaust_band {
            if !band.contains(exhaust_temperature) {
                warnings.push(ValidationWarning::ExhaustTemperature {
                    temperature_k: exhaust_temperature.value,
                    min_k: band.min.value,
                    max_k: band.max.value,
                });
            }
        }

        // Doubled to cover rounding of the air-basis conversion.
        let tol = Tolerances {
            rel: POWER_BALANCE_TOL.rel.max(2.0 * work_tolerance),
            ..POWER_BALANCE_TOL
        };
        if delivered_work < required_work && !nearly_equal(delivered_work, required_work, tol) {
            warnings.push(ValidationWarning::ShaftPowerDeficit {
                required: required_work,
                delivered: delivered_work,
            });
        }

        warnings
    }
}

/// A validation check the evaluated cycle did not pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    ExhaustTemperature {
        temperature_k: f64,
        min_k: f64,
        max_k: f64,
    },
    /// Turbine work (per kg air) short of the compressor and shaft-load demand.
    ShaftPowerDeficit { required: f64, delivered: f64 },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::ExhaustTemperature {
                temperature_k,
                min_k,
                max_k,
            } => write!(
                f,
                "exhaust temperature {temperature_k:.1} K outside [{min_k:.1}, {max_k:.1}] K"
            ),
            ValidationWarning::ShaftPowerDeficit {
                required,
                delivered,
            } => write!(
                f,
                "turbine delivers {delivered:.3} kJ/kg air, {required:.3} kJ/kg air required"
            ),
        }
    }
}
