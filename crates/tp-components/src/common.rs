//! Common helpers for part construction.

use std::sync::Arc;

use crate::error::{ComponentError, ComponentResult};
use tp_core::numeric::ensure_finite;
use tp_core::SimConstants;
use tp_materials::{Material, MaterialType};

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })
}

/// Ensure a geometric quantity is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<f64> {
    let v = check_finite(value, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(ComponentError::InvalidArg { what })
    }
}

/// Ensure a value is finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> ComponentResult<f64> {
    let v = check_finite(value, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(ComponentError::InvalidArg { what })
    }
}

/// Structural body of `volume_m3` of `kind` at ambient conditions.
///
/// The density is the one of the phase the substance has at ambient
/// temperature, which is solid for every metal in the catalog.
pub fn ambient_body(kind: Arc<MaterialType>, volume_m3: f64, constants: &SimConstants) -> Material {
    let mut body = Material::new(
        kind,
        0.0,
        constants.ambient_temperature_k,
        constants.ambient_pressure_atm,
    );
    body.set_mass(volume_m3 * body.density());
    body
}
