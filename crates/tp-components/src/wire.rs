//! Motor windings.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::common::{ambient_body, check_positive};
use crate::error::{ComponentError, ComponentResult};
use tp_core::units::Length;
use tp_core::SimConstants;
use tp_materials::{Material, MaterialType};
use uom::si::length::meter;

/// Round conductor.
///
/// ```text
/// A = π r²        R = ρ_e L / A        m = L A ρ
/// ```
#[derive(Debug)]
pub struct Wire {
    body: Material,
    radius_m: f64,
    length_m: f64,
    cross_area_m2: f64,
    resistance_ohm: f64,
}

impl Wire {
    pub fn new(
        kind: Arc<MaterialType>,
        radius: Length,
        length: Length,
        constants: &SimConstants,
    ) -> ComponentResult<Self> {
        let radius_m = check_positive(radius.get::<meter>(), "wire radius")?;
        let length_m = check_positive(length.get::<meter>(), "wire length")?;
        let cross_area_m2 = PI * radius_m * radius_m;
        let resistance_ohm = kind.resistivity() / cross_area_m2 * length_m;
        let body = ambient_body(kind, length_m * cross_area_m2, constants);
        Ok(Self {
            body,
            radius_m,
            length_m,
            cross_area_m2,
            resistance_ohm,
        })
    }

    pub fn material(&self) -> &Material {
        &self.body
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    pub fn cross_area_m2(&self) -> f64 {
        self.cross_area_m2
    }

    pub fn resistance_ohm(&self) -> f64 {
        self.resistance_ohm
    }

    pub fn mass_kg(&self) -> f64 {
        self.body.mass_kg()
    }

    pub fn specific_heat(&self) -> f64 {
        self.body.kind().specific_heat()
    }

    /// Lateral surface exposed to air [m²].
    pub fn surface_area_m2(&self) -> f64 {
        2.0 * PI * self.radius_m * self.length_m
    }
}

/// Square coil wound from a wire.
///
/// Either the number of turns or the loop area may be left out; the missing
/// one follows from the wire length with a square loop of perimeter `4·√A`.
#[derive(Debug)]
pub struct Coil {
    wire: Wire,
    turns: f64,
    area_m2: f64,
}

impl Coil {
    pub fn new(wire: Wire, turns: Option<f64>, area_m2: Option<f64>) -> ComponentResult<Self> {
        let (turns, area_m2) = match (turns, area_m2) {
            (Some(n), Some(a)) => (n, a),
            (None, Some(a)) => {
                let a = check_positive(a, "coil area")?;
                (wire.length_m() / (4.0 * a.sqrt()), a)
            }
            (Some(n), None) => {
                let n = check_positive(n, "coil turns")?;
                let side = wire.length_m() / n / 4.0;
                (n, side * side)
            }
            (None, None) => {
                return Err(ComponentError::InvalidArg {
                    what: "coil needs turns or area",
                })
            }
        };
        let turns = check_positive(turns, "coil turns")?;
        let area_m2 = check_positive(area_m2, "coil area")?;
        Ok(Self {
            wire,
            turns,
            area_m2,
        })
    }

    pub fn wire(&self) -> &Wire {
        &self.wire
    }

    pub fn turns(&self) -> f64 {
        self.turns
    }

    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }
}
