//! Mutable quantities of a substance.

use std::sync::Arc;

use crate::material_type::MaterialType;

/// Aggregate phase, derived from temperature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
}

/// A quantity of one substance.
///
/// Phase and density are private and recomputed by every mutator before it
/// returns, so a reader can never observe a phase that disagrees with the
/// current temperature. Not `Clone`: moving a `Material` moves the mass.
#[derive(Debug)]
pub struct Material {
    kind: Arc<MaterialType>,
    mass_kg: f64,
    temperature_k: f64,
    pressure_atm: f64,
    phase: Phase,
    density: f64,
}

impl Material {
    pub fn new(kind: Arc<MaterialType>, mass_kg: f64, temperature_k: f64, pressure_atm: f64) -> Self {
        let phase = kind.phase_at(temperature_k);
        let density = kind.density_of(phase);
        Self {
            kind,
            mass_kg,
            temperature_k,
            pressure_atm,
            phase,
            density,
        }
    }

    pub fn kind(&self) -> &Arc<MaterialType> {
        &self.kind
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    pub fn temperature_k(&self) -> f64 {
        self.temperature_k
    }

    /// Pressure [atm]. Only meaningful for gas.
    pub fn pressure_atm(&self) -> f64 {
        self.pressure_atm
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Density of the current phase [kg/m³].
    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn is_gas(&self) -> bool {
        self.phase == Phase::Gas
    }

    /// Same substance: the type records are the same allocation.
    pub fn same_substance(&self, other: &Material) -> bool {
        Arc::ptr_eq(&self.kind, &other.kind)
    }

    pub fn set_mass(&mut self, mass_kg: f64) {
        self.mass_kg = mass_kg;
        self.refresh();
    }

    pub fn set_temperature(&mut self, temperature_k: f64) {
        self.temperature_k = temperature_k;
        self.refresh();
    }

    pub fn set_pressure(&mut self, pressure_atm: f64) {
        self.pressure_atm = pressure_atm;
    }

    pub fn set_kind(&mut self, kind: Arc<MaterialType>) {
        self.kind = kind;
        self.refresh();
    }

    /// Recompute phase and density from temperature and type.
    pub fn refresh(&mut self) {
        self.phase = self.kind.phase_at(self.temperature_k);
        self.density = self.kind.density_of(self.phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn water() -> Arc<MaterialType> {
        Arc::new(MaterialType::new(catalog::water(), 294.0).unwrap())
    }

    #[test]
    fn phase_follows_temperature_on_every_mutation() {
        let mut m = Material::new(water(), 2.0, 294.0, 1.0);
        assert_eq!(m.phase(), Phase::Liquid);
        assert_eq!(m.density(), 1000.0);

        m.set_temperature(400.0);
        assert_eq!(m.phase(), Phase::Gas);
        assert_eq!(m.density(), 1.3);

        m.set_temperature(200.0);
        assert_eq!(m.phase(), Phase::Solid);
        assert_eq!(m.density(), 970.0);
    }

    #[test]
    fn changing_kind_recomputes_phase() {
        let mut m = Material::new(water(), 1.0, 100.0, 1.0);
        assert_eq!(m.phase(), Phase::Solid);
        let n2 = Arc::new(MaterialType::new(catalog::nitrogen(), 294.0).unwrap());
        m.set_kind(n2);
        assert_eq!(m.phase(), Phase::Gas);
    }

    #[test]
    fn identity_is_pointer_equality() {
        let a = water();
        let b = water();
        let m1 = Material::new(a.clone(), 1.0, 294.0, 1.0);
        let m2 = Material::new(a, 1.0, 294.0, 1.0);
        let m3 = Material::new(b, 1.0, 294.0, 1.0);
        assert!(m1.same_substance(&m2));
        assert!(!m1.same_substance(&m3));
    }
}
