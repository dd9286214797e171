//! Turbine model.

use crate::common::{check_efficiency, check_finite, exit_state, ideal_exit_state};
use crate::error::{ComponentError, ComponentResult};
use crate::state::GasState;
use crate::traits::Stage;
use jc_core::units::SpecWork;
use jc_props::GasModel;
use tracing::debug;

/// Turbine driving the compressor shaft.
///
/// The operating point is expressed as the expansion ratio
/// `ER = p_in / p_out > 1`, which divides the inlet relative pressure:
///
/// ```text
/// pr_out,s = pr_in / ER
/// h_out    = h_in - eta * (h_in - h_out,s)
/// w        = h_in - h_out            [kJ/kg of turbine flow]
/// ```
///
/// [`Turbine::expand`] runs this forward from a given ratio;
/// [`Turbine::expand_for_work`] inverts it for a required specific work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turbine {
    efficiency: f64,
}

/// Turbine exit: isentropic and efficiency-corrected branches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurbineOutlet {
    pub ideal: GasState,
    pub actual: GasState,
    /// p_in / p_out.
    pub expansion_ratio: f64,
    /// Isentropic specific work [kJ/kg of turbine flow].
    pub ideal_work: SpecWork,
    /// Actual specific work [kJ/kg of turbine flow].
    pub actual_work: SpecWork,
}

impl Turbine {
    pub fn new(efficiency: f64) -> ComponentResult<Self> {
        Ok(Self {
            efficiency: check_efficiency(efficiency, "turbine efficiency")?,
        })
    }

    /// Expand through a given expansion ratio.
    pub fn expand(
        &self,
        model: &dyn GasModel,
        inlet: &GasState,
        expansion_ratio: f64,
    ) -> ComponentResult<TurbineOutlet> {
        check_finite(expansion_ratio, "turbine expansion ratio")?;
        if expansion_ratio < 1.0 {
            return Err(ComponentError::InvalidArg {
                what: "turbine expansion ratio must be >= 1",
            });
        }

        let p_out = inlet.pressure() / expansion_ratio;
        let mdot = inlet.mass_flow();
        let ideal = ideal_exit_state(
            model,
            inlet.relative_pressure() / expansion_ratio,
            p_out,
            mdot,
            self.name(),
        )?;
        let ideal_work = inlet.enthalpy() - ideal.enthalpy();
        let actual_work = self.efficiency * ideal_work;
        let actual = exit_state(model, inlet.enthalpy() - actual_work, p_out, mdot, self.name())?;

        Ok(TurbineOutlet {
            ideal,
            actual,
            expansion_ratio,
            ideal_work,
            actual_work,
        })
    }

    /// Expand just far enough to deliver `actual_work` [kJ/kg of turbine flow].
    ///
    /// Closed-form inverse of [`Turbine::expand`]: the ideal exit enthalpy is
    /// `h_in - w / eta`, its relative pressure fixes the expansion ratio.
    pub fn expand_for_work(
        &self,
        model: &dyn GasModel,
        inlet: &GasState,
        actual_work: SpecWork,
    ) -> ComponentResult<TurbineOutlet> {
        check_finite(actual_work, "turbine work")?;
        if actual_work < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "turbine work must be non-negative",
            });
        }

        let ideal_work = actual_work / self.efficiency;
        let h_ideal = inlet.enthalpy() - ideal_work;
        let pr_ideal = model.relative_pressure_at_enthalpy(h_ideal)?;
        let expansion_ratio = inlet.relative_pressure() / pr_ideal;

        let p_out = inlet.pressure() / expansion_ratio;
        let mdot = inlet.mass_flow();
        let ideal = GasState::from_enthalpy(model, h_ideal, p_out, mdot)?;
        let actual = exit_state(model, inlet.enthalpy() - actual_work, p_out, mdot, self.name())?;

        debug!(expansion_ratio, actual_work, t_out = actual.temperature_k(), "turbine");

        Ok(TurbineOutlet {
            ideal,
            actual,
            expansion_ratio,
            ideal_work,
            actual_work,
        })
    }
}

impl Stage for Turbine {
    fn name(&self) -> &'static str {
        "turbine"
    }

    fn efficiency(&self) -> Option<f64> {
        Some(self.efficiency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jc_core::units::{k, kgps, kpa};
    use jc_props::TabulatedAir;

    fn combustor_exit(air: &TabulatedAir) -> GasState {
        GasState::from_enthalpy(air, 1350.2, kpa(284.96), kgps(0.2353365)).unwrap()
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(Turbine::new(0.0).is_err());
        let air = TabulatedAir::standard().unwrap();
        let inlet = combustor_exit(&air);
        let turbine = Turbine::new(0.725).unwrap();
        assert!(turbine.expand(&air, &inlet, 0.5).is_err());
        assert!(turbine.expand_for_work(&air, &inlet, -1.0).is_err());
    }

    #[test]
    fn forward_expansion_extracts_work() {
        let air = TabulatedAir::standard().unwrap();
        let inlet = combustor_exit(&air);
        let out = Turbine::new(0.725).unwrap().expand(&air, &inlet, 1.86).unwrap();

        assert!((out.actual_work - 0.725 * out.ideal_work).abs() < 1e-9);
        assert!(out.actual.temperature_k() < inlet.temperature_k());
        assert!(out.actual.temperature_k() > out.ideal.temperature_k());
        assert!((out.actual.pressure_kpa() - 284.96 / 1.86).abs() < 1e-9);
        assert!(out.actual_work > 130.0 && out.actual_work < 170.0);
    }

    #[test]
    fn inverse_matches_forward() {
        let air = TabulatedAir::standard().unwrap();
        let inlet = combustor_exit(&air);
        let turbine = Turbine::new(0.725).unwrap();

        let inverse = turbine.expand_for_work(&air, &inlet, 151.5).unwrap();
        let forward = turbine.expand(&air, &inlet, inverse.expansion_ratio).unwrap();

        assert!((forward.actual_work - 151.5).abs() < 1e-6);
        assert!((forward.actual.temperature_k() - inverse.actual.temperature_k()).abs() < 1e-6);
        assert!(inverse.expansion_ratio > 1.5 && inverse.expansion_ratio < 2.3);
    }

    #[test]
    fn zero_work_means_no_expansion() {
        let air = TabulatedAir::standard().unwrap();
        let inlet = GasState::from_temperature(&air, k(1200.0), kpa(280.0), kgps(0.235)).unwrap();
        let out = Turbine::new(0.8).unwrap().expand_for_work(&air, &inlet, 0.0).unwrap();
        assert!((out.expansion_ratio - 1.0).abs() < 1e-9);
        assert_eq!(out.actual.enthalpy(), inlet.enthalpy());
    }

    #[test]
    fn work_beyond_table_is_a_lookup_error() {
        let air = TabulatedAir::standard().unwrap();
        let inlet = combustor_exit(&air);
        let result = Turbine::new(0.5).unwrap().expand_for_work(&air, &inlet, 1_000.0);
        assert!(matches!(result, Err(ComponentError::Property(_))));
    }
}
