//! Standard substances and a name-keyed library of shared types.

use std::sync::Arc;

use tp_core::SimConstants;

use crate::error::{MaterialError, MaterialResult};
use crate::material_type::{MaterialProperties, MaterialType};

/// Nitrogen, the plant's working gas.
pub fn nitrogen() -> MaterialProperties {
    MaterialProperties {
        name: "Nitrogen".into(),
        strength: 0.0,
        resistivity: 100.0,
        specific_heat: 1200.0,
        gas_density: 1.165,
        liquid_density: 807.0,
        solid_density: 1000.0,
        thermal_conductivity: 1.0,
        boiling_point_k: 94.0,
        melting_point_k: 30.0,
        magnetism: 0.0,
        expansion_ratio: 696.0,
        latent_heat_fusion: 25_300.0,
        latent_heat_vaporization: 199_000.0,
    }
}

/// Copper, for motor windings and heat exchanger pipes.
pub fn copper() -> MaterialProperties {
    MaterialProperties {
        name: "Copper".into(),
        strength: 1920.0,
        resistivity: 1.68e-8,
        specific_heat: 385.0,
        gas_density: 1.3,
        liquid_density: 7000.0,
        solid_density: 8290.0,
        thermal_conductivity: 400.0,
        boiling_point_k: 2862.0,
        melting_point_k: 1538.0,
        magnetism: 0.0,
        expansion_ratio: 800.0,
        latent_heat_fusion: 400_000.0,
        latent_heat_vaporization: 1_000_000.0,
    }
}

/// Iron, for magnets, rotors and vessels.
pub fn iron() -> MaterialProperties {
    MaterialProperties {
        name: "Iron".into(),
        strength: 1920.0,
        resistivity: 1.68e-7,
        specific_heat: 385.0,
        gas_density: 1.2,
        liquid_density: 6500.0,
        solid_density: 7874.0,
        thermal_conductivity: 400.0,
        boiling_point_k: 2562.0,
        melting_point_k: 1085.0,
        magnetism: 0.2,
        expansion_ratio: 800.0,
        latent_heat_fusion: 300_000.0,
        latent_heat_vaporization: 1_000_000.0,
    }
}

/// Water, the heat exchanger coolant.
pub fn water() -> MaterialProperties {
    MaterialProperties {
        name: "Water".into(),
        strength: 0.0,
        resistivity: 1.0,
        specific_heat: 4.1,
        gas_density: 1.3,
        liquid_density: 1000.0,
        solid_density: 970.0,
        thermal_conductivity: 200.0,
        boiling_point_k: 372.0,
        melting_point_k: 273.0,
        magnetism: 0.0,
        expansion_ratio: 800.0,
        latent_heat_fusion: 330_000.0,
        latent_heat_vaporization: 2_260_000.0,
    }
}

/// Set of shared substances, looked up by case-insensitive name.
///
/// Every lookup of a name returns the same `Arc`, so materials created from
/// one library compare as the same substance.
#[derive(Debug, Default)]
pub struct MaterialLibrary {
    types: Vec<Arc<MaterialType>>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding nitrogen, copper, iron and water.
    pub fn standard(constants: &SimConstants) -> MaterialResult<Self> {
        let mut lib = Self::new();
        for props in [nitrogen(), copper(), iron(), water()] {
            lib.insert(props, constants)?;
        }
        Ok(lib)
    }

    /// Register a substance. Names must be unique ignoring case.
    pub fn insert(
        &mut self,
        props: MaterialProperties,
        constants: &SimConstants,
    ) -> MaterialResult<Arc<MaterialType>> {
        if self.get(&props.name).is_some() {
            return Err(MaterialError::DuplicateMaterial { name: props.name });
        }
        let kind = MaterialType::shared(props, constants)?;
        self.types.push(kind.clone());
        Ok(kind)
    }

    pub fn get(&self, name: &str) -> Option<Arc<MaterialType>> {
        let name = name.trim();
        self.types
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn require(&self, name: &str) -> MaterialResult<Arc<MaterialType>> {
        self.get(name).ok_or_else(|| MaterialError::UnknownMaterial {
            name: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<MaterialType>> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
