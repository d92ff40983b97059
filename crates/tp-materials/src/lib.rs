//! tp-materials: substances and thermodynamics for thermoplant.
//!
//! Provides:
//! - `MaterialProperties`: the property schema of a named substance
//! - `MaterialType`: shared, immutable substance record with a derived gas constant
//! - `Material`: a mutable quantity of one substance whose phase and density
//!   always follow its temperature
//! - `thermo`: volume, merge, split, heat exchange and adiabatic helpers
//! - `catalog`: the standard substances and a name-keyed library
//!
//! # Units
//!
//! Plant quantities are plain `f64` in kg, K, atm and m³. The gas constant is
//! therefore expressed in m³·atm/(kg·K).
//!
//! # Example
//!
//! ```
//! use tp_core::SimConstants;
//! use tp_materials::{catalog, thermo, Material, Phase};
//!
//! let c = SimConstants::default();
//! let lib = catalog::MaterialLibrary::standard(&c).unwrap();
//! let n2 = lib.require("nitrogen").unwrap();
//!
//! let gas = Material::new(n2, 1.0, 294.0, 1.0);
//! assert_eq!(gas.phase(), Phase::Gas);
//! let v = thermo::volume(&gas);
//! assert!((v - 1.0 / 1.165).abs() < 1e-9);
//! ```

pub mod catalog;
pub mod error;
pub mod material;
pub mod material_type;
pub mod thermo;

// Re-exports for ergonomics
pub use catalog::MaterialLibrary;
pub use error::{MaterialError, MaterialResult};
pub use material::{Material, Phase};
pub use material_type::{MaterialProperties, MaterialType};
