//! Compressor model.

use crate::common::{check_efficiency, check_finite, exit_state, ideal_exit_state};
use crate::error::{ComponentError, ComponentResult};
use crate::state::GasState;
use crate::traits::Stage;
use jc_core::units::{Power, SpecWork, kw};
use jc_props::GasModel;
use tracing::debug;

/// Compressor with a fixed total pressure ratio.
///
/// ## Model
///
/// ```text
/// pr_out,s  = PR * pr_in                 (isentropic, via relative pressure)
/// w_s       = h_out,s - h_in
/// w         = w_s / eta
/// h_out     = h_in + w
/// p_out     = PR * p_in
/// ```
///
/// A low efficiency raises the actual exit enthalpy; if it leaves the
/// property table the operating point is reported as infeasible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compressor {
    pressure_ratio: f64,
    efficiency: f64,
}

/// Compressor exit: isentropic and efficiency-corrected branches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorOutlet {
    pub ideal: GasState,
    pub actual: GasState,
    /// Isentropic specific work [kJ/kg air].
    pub ideal_work: SpecWork,
    /// Actual specific work [kJ/kg air].
    pub actual_work: SpecWork,
}

impl CompressorOutlet {
    /// Shaft power absorbed by the compressor.
    pub fn power(&self) -> Power {
        kw(self.actual_work * self.actual.mass_flow().value)
    }
}

impl Compressor {
    /// Create a compressor.
    ///
    /// # Errors
    /// Pressure ratio below 1 or efficiency outside (0, 1].
    pub fn new(pressure_ratio: f64, efficiency: f64) -> ComponentResult<Self> {
        check_finite(pressure_ratio, "compressor pressure ratio")?;
        if pressure_ratio < 1.0 {
            return Err(ComponentError::InvalidArg {
                what: "compressor pressure ratio must be >= 1",
            });
        }
        let efficiency = check_efficiency(efficiency, "compressor efficiency")?;
        Ok(Self {
            pressure_ratio,
            efficiency,
        })
    }

    pub fn pressure_ratio(&self) -> f64 {
        self.pressure_ratio
    }

    pub fn compress(
        &self,
        model: &dyn GasModel,
        inlet: &GasState,
    ) -> ComponentResult<CompressorOutlet> {
        let p_out = inlet.pressure() * self.pressure_ratio;
        let mdot = inlet.mass_flow();

        let ideal = ideal_exit_state(
            model,
            inlet.relative_pressure() * self.pressure_ratio,
            p_out,
            mdot,
            self.name(),
        )?;
        let ideal_work = ideal.enthalpy() - inlet.enthalpy();
        let actual_work = ideal_work / self.efficiency;
        let actual = exit_state(model, inlet.enthalpy() + actual_work, p_out, mdot, self.name())?;

        debug!(
            t_ideal = ideal.temperature_k(),
            t_actual = actual.temperature_k(),
            ideal_work,
            actual_work,
            "compressor"
        );

        Ok(CompressorOutlet {
            ideal,
            actual,
            ideal_work,
            actual_work,
        })
    }
}

impl Stage for Compressor {
    fn name(&self) -> &'static str {
        "compressor"
    }

    fn efficiency(&self) -> Option<f64> {
        Some(self.efficiency)
    }
}
