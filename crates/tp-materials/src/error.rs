//! Material errors.

use thiserror::Error;
use tp_core::TpError;

/// Result type for material operations.
pub type MaterialResult<T> = Result<T, MaterialError>;

/// Errors raised while defining substances.
///
/// Quantity-level helpers never fail; these only surface when a property
/// table is built or looked up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    /// Non-physical property value (zero gas density, negative heat capacity...).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Lookup of a substance that is not in the library.
    #[error("Unknown material: {name}")]
    UnknownMaterial { name: String },

    /// A second substance registered under an existing name.
    #[error("Duplicate material: {name}")]
    DuplicateMaterial { name: String },

    #[error(transparent)]
    Core(#[from] TpError),
}
