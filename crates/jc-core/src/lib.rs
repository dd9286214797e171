//! jc-core: stable foundation for jetcycle.
//!
//! Contains:
//! - units (uom SI types + constructors for cycle quantities)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{JcError, JcResult};
pub use numeric::*;
pub use units::*;
