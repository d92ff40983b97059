//! Heat exchanger pipe.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::common::{ambient_body, check_positive};
use crate::error::{ComponentError, ComponentResult};
use tp_core::units::Length;
use tp_core::SimConstants;
use tp_materials::{Material, MaterialType};
use uom::si::length::meter;

/// Thick-walled straight pipe.
///
/// `diameter` is the outer diameter. The wall is carried as a `Material`
/// so the heat exchanger can move heat through it.
///
/// ```text
/// r_i = d/2 − t
/// V   = π r_i² L
/// S_i = 2π r_i L      S_o = π d L
/// m   = (π (d/2)² − π r_i²) L ρ
/// P_rated = strength · t / d
/// ```
#[derive(Debug)]
pub struct Pipe {
    wall: Material,
    diameter_m: f64,
    thickness_m: f64,
    length_m: f64,
    capacity_m3: f64,
    inner_surface_m2: f64,
    outer_surface_m2: f64,
    rated_pressure_atm: f64,
}

impl Pipe {
    pub fn new(
        kind: Arc<MaterialType>,
        diameter: Length,
        thickness: Length,
        length: Length,
        constants: &SimConstants,
    ) -> ComponentResult<Self> {
        let diameter_m = check_positive(diameter.get::<meter>(), "pipe diameter")?;
        let thickness_m = check_positive(thickness.get::<meter>(), "pipe thickness")?;
        let length_m = check_positive(length.get::<meter>(), "pipe length")?;
        let outer_r = diameter_m / 2.0;
        let inner_r = outer_r - thickness_m;
        if inner_r <= 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "pipe wall thicker than its radius",
            });
        }

        let inner_cross = PI * inner_r * inner_r;
        let capacity_m3 = inner_cross * length_m;
        let wall_volume = (PI * outer_r * outer_r - inner_cross) * length_m;
        let rated_pressure_atm = kind.strength() * thickness_m / diameter_m;
        let wall = ambient_body(kind, wall_volume, constants);

        Ok(Self {
            wall,
            diameter_m,
            thickness_m,
            length_m,
            capacity_m3,
            inner_surface_m2: 2.0 * PI * inner_r * length_m,
            outer_surface_m2: PI * diameter_m * length_m,
            rated_pressure_atm,
        })
    }

    pub fn wall(&self) -> &Material {
        &self.wall
    }

    pub fn wall_mut(&mut self) -> &mut Material {
        &mut self.wall
    }

    pub fn wall_temperature_k(&self) -> f64 {
        self.wall.temperature_k()
    }

    pub fn wall_mass_kg(&self) -> f64 {
        self.wall.mass_kg()
    }

    pub fn diameter_m(&self) -> f64 {
        self.diameter_m
    }

    pub fn thickness_m(&self) -> f64 {
        self.thickness_m
    }

    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    /// Inner volume [m³].
    pub fn capacity_m3(&self) -> f64 {
        self.capacity_m3
    }

    pub fn inner_surface_m2(&self) -> f64 {
        self.inner_surface_m2
    }

    pub fn outer_surface_m2(&self) -> f64 {
        self.outer_surface_m2
    }

    /// Internal pressure the wall is rated for [atm].
    pub fn rated_pressure_atm(&self) -> f64 {
        self.rated_pressure_atm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_core::units::m;
    use tp_materials::catalog;

    fn copper() -> Arc<MaterialType> {
        MaterialType::shared(catalog::copper(), &SimConstants::default()).unwrap()
    }

    #[test]
    fn reference_pipe_geometry() {
        let c = SimConstants::default();
        let pipe = Pipe::new(copper(), m(0.01), m(0.003), m(100.0), &c).unwrap();
        let ri = 0.002;
        assert!((pipe.capacity_m3() - PI * ri * ri * 100.0).abs() < 1e-15);
        assert!((pipe.inner_surface_m2() - 2.0 * PI * ri * 100.0).abs() < 1e-12);
        assert!((pipe.outer_surface_m2() - PI * 0.01 * 100.0).abs() < 1e-12);
        let wall = (PI * 0.005 * 0.005 - PI * ri * ri) * 100.0 * 8290.0;
        assert!((pipe.wall_mass_kg() - wall).abs() < 1e-9);
        assert!((pipe.rated_pressure_atm() - 576.0).abs() < 1e-9);
        assert_eq!(pipe.wall_temperature_k(), 294.0);
    }

    #[test]
    fn rejects_wall_thicker_than_radius() {
        let c = SimConstants::default();
        assert!(matches!(
            Pipe::new(copper(), m(0.01), m(0.005), m(1.0), &c),
            Err(ComponentError::InvalidArg { .. })
        ));
    }
}
