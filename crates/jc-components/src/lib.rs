//! jc-components: stage solvers for the turbojet station chain.
//!
//! Provides one model per flow-path element:
//! - Intake (pass-through)
//! - Compressor (isentropic compression + efficiency correction)
//! - Combustor (fuel heat release + pressure loss)
//! - Turbine (isentropic expansion + efficiency correction, forward and inverse)
//! - Nozzle (full expansion to ambient, exit velocity and thrust)
//!
//! Every stage is a deterministic function of its inlet `GasState`, its own
//! parameters and a shared read-only `GasModel`, so stages can run on any
//! thread without synchronization.
//!
//! # Example
//!
//! ```no_run
//! use jc_components::{Compressor, GasState};
//! use jc_core::units::{k, kgps, kpa};
//! use jc_props::TabulatedAir;
//!
//! let air = TabulatedAir::standard().unwrap();
//! let inlet = GasState::from_temperature(&air, k(293.15), kpa(101.3), kgps(0.23)).unwrap();
//! let compressor = Compressor::new(2.9, 0.675).unwrap();
//! let out = compressor.compress(&air, &inlet).unwrap();
//! println!("compressor work: {:.1} kJ/kg", out.actual_work);
//! ```

pub mod combustor;
pub mod common;
pub mod compressor;
pub mod error;
pub mod intake;
pub mod nozzle;
pub mod state;
pub mod traits;
pub mod turbine;

// Re-exports
pub use combustor::{Combustor, CombustorOutlet, Fuel};
pub use compressor::{Compressor, CompressorOutlet};
pub use error::{ComponentError, ComponentResult};
pub use intake::Intake;
pub use nozzle::{Nozzle, NozzleModel, NozzleOutlet};
pub use state::GasState;
pub use traits::Stage;
pub use turbine::{Turbine, TurbineOutlet};
