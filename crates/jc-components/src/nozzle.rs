//! Exhaust nozzle model.

use crate::common::{check_efficiency, check_finite, exit_state, ideal_exit_state};
use crate::error::{ComponentError, ComponentResult};
use crate::state::GasState;
use crate::traits::Stage;
use jc_core::units::constants::KINETIC_ENERGY_FACTOR;
use jc_core::units::{Force, Pressure, SpecEnthalpy, Velocity, mps, newtons};
use jc_props::GasModel;
use tracing::debug;

/// How the isentropic enthalpy drop across the nozzle is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NozzleModel {
    /// Relative-pressure expansion through the gas property table.
    #[default]
    Tabulated,
    /// Closed form `cp T (1 - (p0/p)^((γ-1)/γ))` with cp and γ taken from the
    /// specific-heat table at nozzle inlet temperature.
    SpecificHeat,
}

/// Convergent nozzle fully expanding to ambient static pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nozzle {
    efficiency: f64,
    model: NozzleModel,
}

/// Nozzle exit state, jet velocity and net thrust.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NozzleOutlet {
    pub ideal: GasState,
    pub actual: GasState,
    pub exit_velocity: Velocity,
    /// `mdot * (v_exit - v_flight)`.
    pub thrust: Force,
}

impl Default for Nozzle {
    fn default() -> Self {
        Self {
            efficiency: 1.0,
            model: NozzleModel::Tabulated,
        }
    }
}

impl Nozzle {
    pub fn new(efficiency: f64, model: NozzleModel) -> ComponentResult<Self> {
        Ok(Self {
            efficiency: check_efficiency(efficiency, "nozzle efficiency")?,
            model,
        })
    }

    pub fn model(&self) -> NozzleModel {
        self.model
    }

    pub fn expand(
        &self,
        model: &dyn GasModel,
        inlet: &GasState,
        ambient_pressure: Pressure,
        flight_velocity: Velocity,
    ) -> ComponentResult<NozzleOutlet> {
        check_finite(ambient_pressure.value, "ambient pressure")?;
        check_finite(flight_velocity.value, "flight velocity")?;
        if ambient_pressure.value <= 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "ambient pressure must be positive",
            });
        }
        if inlet.pressure() < ambient_pressure {
            return Err(ComponentError::Infeasible {
                stage: self.name(),
                reason: format!(
                    "nozzle inlet pressure {:.3} kPa below ambient {:.3} kPa",
                    inlet.pressure_kpa(),
                    jc_core::units::to_kpa(ambient_pressure)
                ),
            });
        }

        let mdot = inlet.mass_flow();
        let pressure_ratio = ambient_pressure.value / inlet.pressure().value;
        let ideal = match self.model {
            NozzleModel::Tabulated => ideal_exit_state(
                model,
                inlet.relative_pressure() * pressure_ratio,
                ambient_pressure,
                mdot,
                self.name(),
            )?,
            NozzleModel::SpecificHeat => {
                let drop = specific_heat_drop(model, inlet, pressure_ratio)?;
                GasState::from_enthalpy(model, inlet.enthalpy() - drop, ambient_pressure, mdot)?
            }
        };

        let actual_drop = self.efficiency * (inlet.enthalpy() - ideal.enthalpy());
        let actual = exit_state(
            model,
            inlet.enthalpy() - actual_drop,
            ambient_pressure,
            mdot,
            self.name(),
        )?;

        let exit_velocity = mps((KINETIC_ENERGY_FACTOR * actual_drop.max(0.0)).sqrt());
        let thrust = newtons(mdot.value * (exit_velocity.value - flight_velocity.value));

        debug!(
            v_exit = exit_velocity.value,
            thrust = thrust.value,
            t_exit = actual.temperature_k(),
            "nozzle"
        );

        Ok(NozzleOutlet {
            ideal,
            actual,
            exit_velocity,
            thrust,
        })
    }
}

/// Isentropic enthalpy drop [kJ/kg] for a calorically perfect gas at inlet conditions.
fn specific_heat_drop(
    model: &dyn GasModel,
    inlet: &GasState,
    pressure_ratio: f64,
) -> ComponentResult<SpecEnthalpy> {
    let t = inlet.temperature_k();
    let cp = model.cp(t)?;
    let gamma = model.gamma(t)?;
    Ok(cp * t * (1.0 - pressure_ratio.powf((gamma - 1.0) / gamma)))
}

impl Stage for Nozzle {
    fn name(&self) -> &'static str {
        "nozzle"
    }

    fn efficiency(&self) -> Option<f64> {
        Some(self.efficiency)
    }
}
