//! jc-cycle: steady-state turbojet cycle evaluation.
//!
//! Chains Intake → Compressor → Combustor → Turbine → Nozzle over a shared,
//! read-only gas model, closing the compressor/turbine power balance once per
//! evaluation and deriving exit velocity and thrust from the nozzle.
//!
//! Drivers built on the evaluator:
//! - [`evaluate_batch`]: independent samples on the rayon pool
//! - [`run_fuel_sweep`]: thrust line over a fuel-flow range
//! - [`solve_fuel_flow_for_thrust`]: fuel flow for a thrust target
//!
//! # Example
//!
//! ```no_run
//! use jc_cycle::{CycleEvaluator, CycleInputs};
//!
//! let evaluator = CycleEvaluator::standard()?;
//! let result = evaluator.evaluate(&CycleInputs::reference()?)?;
//! println!("thrust: {:.1} N", result.thrust.value);
//! # Ok::<(), jc_cycle::CycleError>(())
//! ```

pub mod batch;
pub mod error;
pub mod evaluator;
pub mod inputs;
pub mod result;
pub mod sweep;
pub mod target;
pub mod validation;

pub use batch::{BatchReport, evaluate_batch};
pub use error::{CycleError, CycleEvalResult, FailureKind};
pub use evaluator::{CycleEvaluator, load_gas_model};
pub use inputs::CycleInputs;
pub use result::{CycleResult, Station, StationState};
pub use sweep::{FuelFlowSweep, SweepResult, SweepType, run_fuel_sweep};
pub use target::{ThrustTarget, solve_fuel_flow_for_thrust};
pub use validation::{TemperatureBand, ValidationMode, ValidationPolicy, ValidationWarning};
