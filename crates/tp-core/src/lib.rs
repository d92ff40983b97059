//! tp-core: stable foundation for thermoplant.
//!
//! Contains:
//! - units (uom SI types + constructors, atm/pascal conversion)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact handles for chambers, machines, couplings)
//! - constants (the explicit `SimConstants` value passed into every physics step)
//! - error (shared error types)

pub mod constants;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use constants::SimConstants;
pub use error::{TpError, TpResult};
pub use ids::*;
pub use numeric::*;
