//! Solid cylindrical rotor.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::common::{ambient_body, check_positive};
use crate::error::ComponentResult;
use tp_core::units::Length;
use tp_core::SimConstants;
use tp_materials::{Material, MaterialType};
use uom::si::length::meter;

/// Solid cylinder spinning about its axis: `m = π r² l ρ`, `J = m r² / 2`.
#[derive(Debug)]
pub struct Rotor {
    body: Material,
    radius_m: f64,
    length_m: f64,
    moment_kg_m2: f64,
}

impl Rotor {
    pub fn new(
        kind: Arc<MaterialType>,
        radius: Length,
        length: Length,
        constants: &SimConstants,
    ) -> ComponentResult<Self> {
        let radius_m = check_positive(radius.get::<meter>(), "rotor radius")?;
        let length_m = check_positive(length.get::<meter>(), "rotor length")?;
        let body = ambient_body(kind, PI * radius_m * radius_m * length_m, constants);
        let moment_kg_m2 = body.mass_kg() / 2.0 * radius_m * radius_m;
        Ok(Self {
            body,
            radius_m,
            length_m,
            moment_kg_m2,
        })
    }

    pub fn material(&self) -> &Material {
        &self.body
    }

    pub fn mass_kg(&self) -> f64 {
        self.body.mass_kg()
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    /// Moment of inertia [kg·m²].
    pub fn moment_kg_m2(&self) -> f64 {
        self.moment_kg_m2
    }
}
