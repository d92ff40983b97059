//! tp-components: structural parts of the thermoplant machines.
//!
//! Provides the static geometry that machines are assembled from:
//! - `Wire` and `Coil` for motor windings
//! - `Rotor`, `Magnet` and `Battery` for the motor's mechanics and supply
//! - `Pipe` for the heat exchanger
//! - `Vessel` for the expander
//!
//! Parts are built once, validate their geometry on construction and expose
//! derived quantities (mass, resistance, surface areas, capacities). Parts
//! that exchange heat (`Pipe`, `Vessel`) own their wall as a `Material`.
//!
//! # Example
//!
//! ```
//! use tp_components::Pipe;
//! use tp_core::{units::m, SimConstants};
//! use tp_materials::MaterialLibrary;
//!
//! let c = SimConstants::default();
//! let lib = MaterialLibrary::standard(&c).unwrap();
//! let pipe = Pipe::new(lib.require("copper").unwrap(), m(0.01), m(0.003), m(100.0), &c).unwrap();
//! assert!(pipe.capacity_m3() > 0.0);
//! ```

pub mod common;
pub mod electrical;
pub mod error;
pub mod pipe;
pub mod rotor;
pub mod vessel;
pub mod wire;

// Re-exports
pub use electrical::{Battery, Magnet};
pub use error::{ComponentError, ComponentResult};
pub use pipe::Pipe;
pub use rotor::Rotor;
pub use vessel::Vessel;
pub use wire::{Coil, Wire};
