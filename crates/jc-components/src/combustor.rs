//! Combustor model.

use crate::common::{check_efficiency, check_finite, exit_state};
use crate::error::{ComponentError, ComponentResult};
use crate::state::GasState;
use crate::traits::Stage;
use jc_core::numeric::ensure_positive;
use jc_core::units::{Density, MassRate, Power, VolumeRate, kg_per_m3, kgps, kw};
use jc_props::GasModel;
use tracing::debug;

/// Liquid fuel burned in the combustor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fuel {
    density: Density,
    /// Lower heating value [kJ/kg].
    lower_heating_value: f64,
}

impl Fuel {
    pub fn new(density: Density, lower_heating_value: f64) -> ComponentResult<Self> {
        ensure_positive(density.value, "fuel density must be positive")?;
        ensure_positive(lower_heating_value, "fuel lower heating value must be positive")?;
        Ok(Self {
            density,
            lower_heating_value,
        })
    }

    /// Jet-A / kerosene: 821 kg/m³, 43 000 kJ/kg.
    pub fn kerosene() -> Self {
        Self {
            density: kg_per_m3(821.0),
            lower_heating_value: 43_000.0,
        }
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn lower_heating_value(&self) -> f64 {
        self.lower_heating_value
    }

    /// Mass flow delivered by a volumetric pump setting.
    pub fn mass_flow(&self, volume_flow: VolumeRate) -> MassRate {
        kgps(self.density.value * volume_flow.value)
    }
}

/// Burner with a fixed pressure-loss ratio and combustion efficiency.
///
/// ```text
/// mdot_f  = rho_f * Q_f
/// Q_use   = eta_b * mdot_f * LHV
/// h_out   = h_in + Q_use / (mdot_air + mdot_f)
/// p_out   = pi_b * p_in
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Combustor {
    pressure_ratio: f64,
    efficiency: f64,
    fuel: Fuel,
}

/// Combustor exit state and heat bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombustorOutlet {
    /// Exit state carrying the total (air + fuel) mass flow.
    pub state: GasState,
    pub fuel_mass_flow: MassRate,
    pub heat_released: Power,
    pub heat_usable: Power,
    pub fuel_air_ratio: f64,
}

impl Combustor {
    /// # Errors
    /// Pressure ratio outside (0, 1] or efficiency outside (0, 1].
    pub fn new(pressure_ratio: f64, efficiency: f64, fuel: Fuel) -> ComponentResult<Self> {
        check_finite(pressure_ratio, "combustor pressure ratio")?;
        if pressure_ratio <= 0.0 || pressure_ratio > 1.0 {
            return Err(ComponentError::InvalidArg {
                what: "combustor pressure ratio must be in (0,1]",
            });
        }
        let efficiency = check_efficiency(efficiency, "combustion efficiency")?;
        Ok(Self {
            pressure_ratio,
            efficiency,
            fuel,
        })
    }

    pub fn fuel(&self) -> &Fuel {
        &self.fuel
    }

    pub fn pressure_ratio(&self) -> f64 {
        self.pressure_ratio
    }

    /// Burn `fuel_flow` in the air stream leaving the compressor.
    pub fn burn(
        &self,
        model: &dyn GasModel,
        inlet: &GasState,
        fuel_flow: VolumeRate,
    ) -> ComponentResult<CombustorOutlet> {
        check_finite(fuel_flow.value, "fuel flow")?;
        if fuel_flow.value < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "fuel flow must be non-negative",
            });
        }

        let air_flow = inlet.mass_flow();
        let fuel_mass_flow = self.fuel.mass_flow(fuel_flow);
        let total_flow = air_flow + fuel_mass_flow;

        let released_kw = fuel_mass_flow.value * self.fuel.lower_heating_value;
        let usable_kw = released_kw * self.efficiency;
        let h_out = inlet.enthalpy() + usable_kw / total_flow.value;

        let state = exit_state(
            model,
            h_out,
            inlet.pressure() * self.pressure_ratio,
            total_flow,
            self.name(),
        )?;

        debug!(
            fuel_kgps = fuel_mass_flow.value,
            usable_kw,
            t_out = state.temperature_k(),
            "combustor"
        );

        Ok(CombustorOutlet {
            state,
            fuel_mass_flow,
            heat_released: kw(released_kw),
            heat_usable: kw(usable_kw),
            fuel_air_ratio: fuel_mass_flow.value / air_flow.value,
        })
    }
}

impl Stage for Combustor {
    fn name(&self) -> &'static str {
        "combustor"
    }

    fn efficiency(&self) -> Option<f64> {
        Some(self.efficiency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jc_core::units::{k, kpa, ml_per_min, to_kw};
    use jc_props::TabulatedAir;

    fn compressor_exit(air: &TabulatedAir) -> GasState {
        GasState::from_enthalpy(air, 448.3, kpa(293.77), kgps(0.23)).unwrap()
    }

    #[test]
    fn fuel_validation() {
        assert!(Fuel::new(kg_per_m3(0.0), 43_000.0).is_err());
        assert!(Fuel::new(kg_per_m3(821.0), -1.0).is_err());
        assert_eq!(Fuel::new(kg_per_m3(821.0), 43_000.0).unwrap(), Fuel::kerosene());
    }

    #[test]
    fn rejects_pressure_gain() {
        assert!(Combustor::new(1.05, 0.9, Fuel::kerosene()).is_err());
        assert!(Combustor::new(0.0, 0.9, Fuel::kerosene()).is_err());
    }

    #[test]
    fn reference_burn() {
        let air = TabulatedAir::standard().unwrap();
        let inlet = compressor_exit(&air);
        let out = Combustor::new(0.97, 0.925, Fuel::kerosene())
            .unwrap()
            .burn(&air, &inlet, ml_per_min(390.0))
            .unwrap();

        assert!((out.fuel_mass_flow.value - 0.0053365).abs() < 1e-9);
        assert!((out.state.mass_flow().value - 0.2353365).abs() < 1e-9);
        assert!((to_kw(out.heat_usable) - 212.26).abs() < 0.01);
        assert!((to_kw(out.heat_usable) / to_kw(out.heat_released) - 0.925).abs() < 1e-12);
        assert!((out.state.pressure_kpa() - 293.77 * 0.97).abs() < 1e-9);
        assert!(out.state.temperature_k() > 1200.0 && out.state.temperature_k() < 1320.0);
        assert!(out.fuel_air_ratio > 0.02 && out.fuel_air_ratio < 0.03);
    }

    #[test]
    fn zero_fuel_only_drops_pressure() {
        let air = TabulatedAir::standard().unwrap();
        let inlet = GasState::from_temperature(&air, k(400.0), kpa(290.0), kgps(0.23)).unwrap();
        let out = Combustor::new(0.97, 0.925, Fuel::kerosene())
            .unwrap()
            .burn(&air, &inlet, ml_per_min(0.0))
            .unwrap();
        assert!((out.state.temperature_k() - 400.0).abs() < 1e-9);
        assert!(out.state.pressure_kpa() < 290.0);
    }

    #[test]
    fn negative_fuel_flow_rejected() {
        let air = TabulatedAir::standard().unwrap();
        let inlet = compressor_exit(&air);
        let result = Combustor::new(0.97, 0.925, Fuel::kerosene())
            .unwrap()
            .burn(&air, &inlet, ml_per_min(-10.0));
        assert!(matches!(result, Err(ComponentError::InvalidArg { .. })));
    }

    #[test]
    fn excessive_heat_is_infeasible() {
        let air = TabulatedAir::standard().unwrap();
        let inlet = compressor_exit(&air);
        let err = Combustor::new(0.97, 1.0, Fuel::kerosene())
            .unwrap()
            .burn(&air, &inlet, ml_per_min(2_000.0))
            .unwrap_err();
        assert!(matches!(err, ComponentError::Infeasible { stage: "combustor", .. }));
    }
}
