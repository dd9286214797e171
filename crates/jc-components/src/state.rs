//! Gas state at one engine station.

use crate::common::check_finite;
use crate::error::{ComponentError, ComponentResult};
use jc_core::units::{MassRate, Pressure, SpecEnthalpy, Temperature, k, to_kpa};
use jc_props::GasModel;
use uom::si::thermodynamic_temperature::kelvin;

/// Working-fluid state at one station of the flow path.
///
/// Temperature, enthalpy and relative pressure always refer to the same
/// tabulated point; pressure and mass flow are carried alongside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasState {
    temperature: Temperature,
    enthalpy: SpecEnthalpy,
    pressure: Pressure,
    relative_pressure: f64,
    mass_flow: MassRate,
}

impl GasState {
    /// State at a known temperature.
    pub fn from_temperature(
        model: &dyn GasModel,
        t: Temperature,
        p: Pressure,
        mass_flow: MassRate,
    ) -> ComponentResult<Self> {
        validate_pressure_and_flow(p, mass_flow)?;
        let t_k = t.get::<kelvin>();
        check_finite(t_k, "temperature")?;
        if t_k <= 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "temperature must be positive",
            });
        }

        Ok(Self {
            temperature: t,
            enthalpy: model.enthalpy_at(t_k)?,
            pressure: p,
            relative_pressure: model.relative_pressure_at(t_k)?,
            mass_flow,
        })
    }

    /// State at a known specific enthalpy [kJ/kg].
    pub fn from_enthalpy(
        model: &dyn GasModel,
        h: SpecEnthalpy,
        p: Pressure,
        mass_flow: MassRate,
    ) -> ComponentResult<Self> {
        validate_pressure_and_flow(p, mass_flow)?;
        check_finite(h, "enthalpy")?;

        Ok(Self {
            temperature: k(model.temperature_at_enthalpy(h)?),
            enthalpy: h,
            pressure: p,
            relative_pressure: model.relative_pressure_at_enthalpy(h)?,
            mass_flow,
        })
    }

    /// State at a known relative pressure (the endpoint of an isentropic process).
    pub fn from_relative_pressure(
        model: &dyn GasModel,
        relative_pressure: f64,
        p: Pressure,
        mass_flow: MassRate,
    ) -> ComponentResult<Self> {
        validate_pressure_and_flow(p, mass_flow)?;
        check_finite(relative_pressure, "relative pressure")?;

        Ok(Self {
            temperature: k(model.temperature_at_relative_pressure(relative_pressure)?),
            enthalpy: model.enthalpy_at_relative_pressure(relative_pressure)?,
            pressure: p,
            relative_pressure,
            mass_flow,
        })
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Temperature [K].
    pub fn temperature_k(&self) -> f64 {
        self.temperature.get::<kelvin>()
    }

    /// Specific enthalpy [kJ/kg].
    pub fn enthalpy(&self) -> SpecEnthalpy {
        self.enthalpy
    }

    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    /// Pressure [kPa].
    pub fn pressure_kpa(&self) -> f64 {
        to_kpa(self.pressure)
    }

    pub fn relative_pressure(&self) -> f64 {
        self.relative_pressure
    }

    pub fn mass_flow(&self) -> MassRate {
        self.mass_flow
    }

    /// Same thermodynamic point carried by a different mass flow.
    pub fn with_mass_flow(self, mass_flow: MassRate) -> Self {
        Self { mass_flow, ..self }
    }

    /// Same thermodynamic point at a different static pressure.
    pub fn with_pressure(self, pressure: Pressure) -> ComponentResult<Self> {
        validate_pressure_and_flow(pressure, self.mass_flow)?;
        Ok(Self { pressure, ..self })
    }
}

fn validate_pressure_and_flow(p: Pressure, mass_flow: MassRate) -> ComponentResult<()> {
    check_finite(p.value, "pressure")?;
    if p.value <= 0.0 {
        return Err(ComponentError::NonPhysical {
            what: "pressure must be positive",
        });
    }
    check_finite(mass_flow.value, "mass flow")?;
    if mass_flow.value <= 0.0 {
        return Err(ComponentError::NonPhysical {
            what: "mass flow must be positive",
        });
    }
    Ok(())
}
