//! Compressor/turbine shaft power balance.
//!
//! The turbine must deliver, per kilogram of the flow passing through it,
//!
//! ```text
//! w_t = (w_c + P_load / (eta_gen * mdot_air)) * mdot_air / mdot_total
//! ```
//!
//! where `w_c` is the compressor's actual specific work per kilogram of air.
//! The admissible expansion ratios are `(1, p_in / p_ambient]`: the turbine
//! cannot expand below ambient pressure and still leave the nozzle something
//! to work with.

use crate::bisection::{BisectionConfig, BisectionError, bisect};
use crate::error::{SolverError, SolverResult};
use jc_components::{ComponentError, GasState, Turbine, TurbineOutlet};
use jc_core::numeric::ensure_efficiency;
use jc_core::units::{MassRate, Power, Pressure, SpecWork, to_kw};
use jc_props::{GasModel, GasProperty};
use tracing::{debug, warn};
use uom::si::mass_rate::kilogram_per_second;

/// Relative slack on the expansion bounds (ambient limit and table floor).
const EXPANSION_BOUND_SLACK: f64 = 1e-12;

/// Relative work tolerance when a bisection config sets neither
/// `residual_tol` nor `rel_tol`.
const FALLBACK_WORK_TOL: f64 = 1e-9;

/// External load drawn off the engine shaft (e.g. an electrical generator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaftLoad {
    power: Power,
    generator_efficiency: f64,
}

impl ShaftLoad {
    pub fn new(power: Power, generator_efficiency: f64) -> SolverResult<Self> {
        if !power.value.is_finite() || power.value < 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "shaft load power must be finite and non-negative",
            });
        }
        let generator_efficiency = ensure_efficiency(generator_efficiency, "generator efficiency")
            .map_err(|_| SolverError::InvalidConfig {
                what: "generator efficiency must be in (0,1]",
            })?;
        Ok(Self {
            power,
            generator_efficiency,
        })
    }

    pub fn power(&self) -> Power {
        self.power
    }

    pub fn generator_efficiency(&self) -> f64 {
        self.generator_efficiency
    }

    /// Shaft power the turbine must supply to drive the load.
    pub fn shaft_power(&self) -> Power {
        self.power / self.generator_efficiency
    }
}

/// Work the turbine has to supply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerDemand {
    /// Compressor actual specific work [kJ/kg air].
    pub compressor_work: SpecWork,
    pub air_mass_flow: MassRate,
    pub shaft_load: Option<ShaftLoad>,
}

impl PowerDemand {
    /// Total shaft work per kilogram of air [kJ/kg air].
    pub fn required_work(&self) -> SpecWork {
        let load = self
            .shaft_load
            .map_or(0.0, |load| to_kw(load.shaft_power()) / self.air_mass_flow.get::<kilogram_per_second>());
        self.compressor_work + load
    }

    /// Required work referred to the turbine mass flow [kJ/kg of turbine flow].
    pub fn turbine_work(&self, turbine_flow: MassRate) -> SpecWork {
        self.required_work() * self.air_mass_flow.get::<kilogram_per_second>() / turbine_flow.get::<kilogram_per_second>()
    }
}

/// How the turbine expansion ratio is found.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PowerBalanceMethod {
    /// Invert the property table for the ideal exit implied by the work.
    #[default]
    Direct,
    /// Root-find the expansion ratio with bracketed bisection.
    ///
    /// The residual is the relative work error `(w - w_target) / w_target`.
    /// Iteration stops once it is within `residual_tol`, or `rel_tol` when
    /// `residual_tol` is zero; the bracket itself is narrowed down to
    /// rounding level if need be.
    Bisection(BisectionConfig),
}

impl PowerBalanceMethod {
    /// Relative work error a resolved balance may carry (0 for the closed form).
    pub fn work_tolerance(&self) -> f64 {
        match self {
            PowerBalanceMethod::Direct => 0.0,
            PowerBalanceMethod::Bisection(config) => bisection_work_tolerance(config),
        }
    }
}

fn bisection_work_tolerance(config: &BisectionConfig) -> f64 {
    if config.residual_tol > 0.0 {
        config.residual_tol
    } else if config.rel_tol > 0.0 {
        config.rel_tol
    } else {
        FALLBACK_WORK_TOL
    }
}

/// Resolved turbine operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerBalance {
    pub turbine: TurbineOutlet,
    /// Work demanded per kilogram of air [kJ/kg air].
    pub required_work: SpecWork,
    /// Work demanded per kilogram of turbine flow [kJ/kg].
    pub target_work: SpecWork,
    /// Largest admissible expansion ratio `p_in / p_ambient`.
    pub max_expansion_ratio: f64,
    /// Residual evaluations used (0 for the closed form).
    pub iterations: usize,
}

impl PowerBalance {
    /// Turbine work referred back to the air flow [kJ/kg air].
    pub fn delivered_work(&self, air_mass_flow: MassRate) -> SpecWork {
        self.turbine.actual_work * self.turbine.actual.mass_flow().get::<kilogram_per_second>()
            / air_mass_flow.get::<kilogram_per_second>()
    }
}

/// Chooses the turbine expansion ratio that closes the shaft power balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerBalanceResolver {
    turbine: Turbine,
    method: PowerBalanceMethod,
}

impl PowerBalanceResolver {
    pub fn new(turbine: Turbine, method: PowerBalanceMethod) -> SolverResult<Self> {
        if let PowerBalanceMethod::Bisection(config) = &method {
            config.validate()?;
        }
        Ok(Self { turbine, method })
    }

    pub fn turbine(&self) -> &Turbine {
        &self.turbine
    }

    pub fn method(&self) -> PowerBalanceMethod {
        self.method
    }

    /// Resolve the turbine exit for combustor exit state `inlet`.
    pub fn resolve(
        &self,
        model: &dyn GasModel,
        inlet: &GasState,
        demand: &PowerDemand,
        ambient_pressure: Pressure,
    ) -> SolverResult<PowerBalance> {
        let required_work = demand.required_work();
        let target_work = demand.turbine_work(inlet.mass_flow());
        if !target_work.is_finite() || target_work < 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "required shaft work must be finite and non-negative",
            });
        }

        let max_expansion_ratio = inlet.pressure().value / ambient_pressure.value;
        if max_expansion_ratio.is_nan() || max_expansion_ratio <= 1.0 {
            return Err(self.diverged(format!(
                "combustor exit pressure {:.3} kPa does not exceed ambient",
                inlet.pressure_kpa()
            )));
        }

        let (outlet, iterations) = match self.method {
            PowerBalanceMethod::Direct => (
                self.resolve_direct(model, inlet, target_work, max_expansion_ratio)?,
                0,
            ),
            PowerBalanceMethod::Bisection(config) => {
                self.resolve_bisection(model, inlet, target_work, max_expansion_ratio, &config)?
            }
        };
        let turbine = floor_at_ambient(outlet, ambient_pressure, max_expansion_ratio)?;

        debug!(
            expansion_ratio = turbine.expansion_ratio,
            max_expansion_ratio,
            target_work,
            iterations,
            "power balance resolved"
        );

        Ok(PowerBalance {
            turbine,
            required_work,
            target_work,
            max_expansion_ratio,
            iterations,
        })
    }

    fn resolve_direct(
        &self,
        model: &dyn GasModel,
        inlet: &GasState,
        target_work: SpecWork,
        max_expansion_ratio: f64,
    ) -> SolverResult<TurbineOutlet> {
        let outlet = match self.turbine.expand_for_work(model, inlet, target_work) {
            Ok(outlet) => outlet,
            // Ideal exit below the bottom of the table: no finite expansion supplies it.
            Err(ComponentError::Property(err)) if !err.is_load_error() => {
                return Err(self.diverged(format!(
                    "turbine cannot deliver {target_work:.3} kJ/kg from {:.1} K ({err})",
                    inlet.temperature_k()
                )));
            }
            Err(err) => return Err(err.into()),
        };

        if outlet.expansion_ratio > max_expansion_ratio * (1.0 + EXPANSION_BOUND_SLACK) {
            return Err(self.diverged(format!(
                "turbine needs expansion ratio {:.4} to deliver {target_work:.3} kJ/kg, \
                 only {max_expansion_ratio:.4} available",
                outlet.expansion_ratio
            )));
        }
        Ok(outlet)
    }

    fn resolve_bisection(
        &self,
        model: &dyn GasModel,
        inlet: &GasState,
        target_work: SpecWork,
        max_expansion_ratio: f64,
        config: &BisectionConfig,
    ) -> SolverResult<(TurbineOutlet, usize)> {
        if target_work == 0.0 {
            return Ok((self.turbine.expand(model, inlet, 1.0)?, 0));
        }

        let residual = |expansion_ratio: f64| -> SolverResult<f64> {
            let outlet = self.turbine.expand(model, inlet, expansion_ratio)?;
            Ok((outlet.actual_work - target_work) / target_work)
        };

        let work_tol = bisection_work_tolerance(config);
        let search = BisectionConfig {
            max_iterations: config.max_iterations,
            abs_tol: 0.0,
            rel_tol: f64::EPSILON,
            residual_tol: work_tol,
        };

        // The ideal exit may not drop below the bottom of the table.
        let (pr_min, _) = model.domain(GasProperty::RelativePressure);
        let table_limit = inlet.relative_pressure() / pr_min * (1.0 - EXPANSION_BOUND_SLACK);
        let upper = max_expansion_ratio.min(table_limit);
        if upper <= 1.0 {
            return Err(self.diverged(format!(
                "turbine inlet at {:.1} K is already at the bottom of the property table",
                inlet.temperature_k()
            )));
        }

        let solution = match bisect(residual, [1.0, upper], &search) {
            Ok(solution) => solution,
            Err(SolverError::Bisection(BisectionError::NoBracket { right_residual, .. })) => {
                let available = target_work * (1.0 + right_residual);
                return Err(self.diverged(format!(
                    "turbine delivers at most {available:.3} kJ/kg at expansion ratio \
                     {upper:.4}, {target_work:.3} kJ/kg required"
                )));
            }
            Err(SolverError::Bisection(err @ BisectionError::MaxIterations { .. })) => {
                return Err(self.diverged(err.to_string()));
            }
            Err(err) => return Err(err),
        };
        if solution.residual.abs() > work_tol {
            return Err(self.diverged(format!(
                "relative work error {:.3e} at expansion ratio {:.6} exceeds {work_tol:.1e}",
                solution.residual, solution.x
            )));
        }

        let outlet = self.turbine.expand(model, inlet, solution.x)?;
        Ok((outlet, solution.iterations))
    }

    fn diverged(&self, what: String) -> SolverError {
        warn!(method = ?self.method, "{what}");
        SolverError::PowerBalanceDivergence { what }
    }
}

/// Keep the turbine exit at or above ambient.
///
/// An expansion ratio at (or rounding past) the admissible maximum can leave
/// `p_in / ER` a few ulps below ambient, which the nozzle would reject.
fn floor_at_ambient(
    outlet: TurbineOutlet,
    ambient_pressure: Pressure,
    max_expansion_ratio: f64,
) -> SolverResult<TurbineOutlet> {
    if outlet.actual.pressure() >= ambient_pressure {
        return Ok(outlet);
    }
    Ok(TurbineOutlet {
        ideal: outlet.ideal.with_pressure(ambient_pressure)?,
        actual: outlet.actual.with_pressure(ambient_pressure)?,
        expansion_ratio: outlet.expansion_ratio.min(max_expansion_ratio),
        ..outlet
    })
}
