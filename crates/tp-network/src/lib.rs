//! tp-network: the bounded-capacity chamber network of thermoplant.
//!
//! Provides:
//! - `Chamber`: a vessel holding at most one `Material`, with derived
//!   Empty/Contains/Full state and up to two downstream routes
//! - `gate`: capacity-checked `pull`/`push` between a chamber and a
//!   machine's working-fluid slot
//! - `ChamberNetwork`: arena of chambers addressed by `ChamberId`, with
//!   route validation and the per-tick chamber flush
//!
//! Every transfer is a move. A failed transfer leaves both sides untouched so
//! the caller can retry on a later tick.
//!
//! # Example
//!
//! ```
//! use tp_core::SimConstants;
//! use tp_materials::{Material, MaterialLibrary};
//! use tp_network::{gate, ChamberNetwork, ChamberState};
//!
//! let c = SimConstants::default();
//! let lib = MaterialLibrary::standard(&c).unwrap();
//! let n2 = lib.require("nitrogen").unwrap();
//!
//! let mut net = ChamberNetwork::new();
//! let tank = net.add_chamber("tank", 10.0).unwrap();
//! net.charge(tank, Material::new(n2, 1.0, 294.0, 1.0), &c).unwrap();
//!
//! let pulled = gate::pull(net.chamber_mut(tank).unwrap(), 0.02).unwrap();
//! assert!((pulled.mass_kg() - 0.02 * 1.165).abs() < 1e-9);
//! assert_eq!(net.chamber(tank).unwrap().state(), ChamberState::Contains);
//! ```

pub mod chamber;
pub mod error;
pub mod gate;
pub mod network;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use chamber::{Chamber, ChamberState, Routes, ALTERNATE_ROUTE_PRESSURE_ATM};
pub use error::{NetworkError, NetworkResult};
pub use network::ChamberNetwork;
