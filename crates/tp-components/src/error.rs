//! Error types for part construction.

use thiserror::Error;
use tp_core::error::TpError;
use tp_materials::MaterialError;

/// Errors raised while building structural parts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Material error: {0}")]
    Material(#[from] MaterialError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for TpError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => TpError::InvalidArg { what },
            ComponentError::InvalidArg { what } => TpError::InvalidArg { what },
            ComponentError::Material(_) => TpError::InvalidArg {
                what: "material error",
            },
        }
    }
}
