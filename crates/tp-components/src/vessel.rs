//! Expander vessel.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::common::{ambient_body, check_positive};
use crate::error::ComponentResult;
use tp_core::units::{Length, Volume};
use tp_core::SimConstants;
use tp_materials::{Material, MaterialType};
use uom::si::length::meter;
use uom::si::volume::cubic_meter;

/// Expansion vessel of fixed inner capacity, starting at ambient temperature.
///
/// ```text
/// r = (V/π)^(1/3)     R = r + t
/// m = (π R³ − V) ρ    A_contact = 2π r²
/// ```
#[derive(Debug)]
pub struct Vessel {
    wall: Material,
    thickness_m: f64,
    capacity_m3: f64,
    inner_radius_m: f64,
    contact_area_m2: f64,
}

impl Vessel {
    pub fn new(
        kind: Arc<MaterialType>,
        thickness: Length,
        capacity: Volume,
        constants: &SimConstants,
    ) -> ComponentResult<Self> {
        let thickness_m = check_positive(thickness.get::<meter>(), "vessel thickness")?;
        let capacity_m3 = check_positive(capacity.get::<cubic_meter>(), "vessel capacity")?;
        let inner_radius_m = (capacity_m3 / PI).cbrt();
        let outer = inner_radius_m + thickness_m;
        let wall = ambient_body(kind, PI * outer * outer * outer - capacity_m3, constants);
        Ok(Self {
            wall,
            thickness_m,
            capacity_m3,
            inner_radius_m,
            contact_area_m2: 2.0 * PI * inner_radius_m * inner_radius_m,
        })
    }

    pub fn wall(&self) -> &Material {
        &self.wall
    }

    pub fn wall_mut(&mut self) -> &mut Material {
        &mut self.wall
    }

    pub fn temperature_k(&self) -> f64 {
        self.wall.temperature_k()
    }

    pub fn capacity_m3(&self) -> f64 {
        self.capacity_m3
    }

    pub fn thickness_m(&self) -> f64 {
        self.thickness_m
    }

    pub fn inner_radius_m(&self) -> f64 {
        self.inner_radius_m
    }

    /// Outer height of the vessel, for presentation.
    pub fn height_m(&self) -> f64 {
        2.0 * (self.inner_radius_m + self.thickness_m)
    }

    pub fn contact_area_m2(&self) -> f64 {
        self.contact_area_m2
    }
}
