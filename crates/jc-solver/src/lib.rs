//! Shaft power-balance resolution for the turbojet cycle.
//!
//! The turbine operating point is not a free input: its expansion ratio must
//! be chosen so that the turbine delivers exactly the work the compressor
//! (and any auxiliary shaft load) absorbs. This crate provides
//!
//! - a bracketed bisection root finder with bounded iteration count, and
//! - the power-balance resolver, solving either in closed form by inverting
//!   the property table or iteratively over the expansion ratio.

pub mod bisection;
pub mod error;
pub mod power_balance;

pub use bisection::{
    BisectionConfig, BisectionError, BisectionSolution, Bracket, BracketError, Sign, bisect,
};
pub use error::{SolverError, SolverResult};
pub use power_balance::{
    PowerBalance, PowerBalanceMethod, PowerBalanceResolver, PowerDemand, ShaftLoad,
};
