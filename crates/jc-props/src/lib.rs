//! jc-props: tabulated gas properties for jetcycle.
//!
//! Provides:
//! - `PropertyTable`: (temperature, enthalpy, relative pressure) rows of dry air
//! - `SpecificHeatTable`: (temperature, cp, cv) rows
//! - Linear interpolation between any two columns with explicit range rejection
//! - Whitespace-delimited table parsing
//! - `GasModel` trait: the read-only lookup interface the stage solvers consume
//!
//! # Architecture
//!
//! Tables are loaded once and shared read-only (`Arc<dyn GasModel>`) by every
//! cycle evaluation. Nothing in this crate mutates a table after construction,
//! so lookups are safe from any number of threads.
//!
//! # Example
//!
//! ```no_run
//! use jc_props::{GasModel, TabulatedAir};
//!
//! let air = TabulatedAir::standard().unwrap();
//! let h = air.enthalpy_at(293.15).unwrap();
//! let t = air.temperature_at_enthalpy(h).unwrap();
//! println!("h = {h:.2} kJ/kg at T = {t:.2} K");
//! ```

pub mod error;
pub mod model;
pub mod parse;
pub mod specific_heat;
pub mod table;

// Re-exports for ergonomics
pub use error::{PropsError, PropsResult};
pub use model::{GasModel, TabulatedAir};
pub use parse::{
    load_specific_heat_table, load_specific_heat_table_from_path, load_table,
    load_table_from_path, read_specific_heat_table, read_table,
};
pub use specific_heat::{SpecificHeatOutput, SpecificHeatRow, SpecificHeatTable};
pub use table::{GasProperty, GasRow, PropertyTable};
