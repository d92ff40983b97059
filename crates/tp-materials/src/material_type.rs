//! Substance property records.

use std::fmt;
use std::sync::Arc;

use tp_core::numeric::{ensure_finite, ensure_positive};
use tp_core::SimConstants;

use crate::error::{MaterialError, MaterialResult};
use crate::material::Phase;

/// Property table of a named substance.
///
/// Plain data. Densities in kg/m³, temperatures in K, specific heat in
/// J/(kg·K), latent heats in J/kg, resistivity in Ω·m.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialProperties {
    pub name: String,
    /// Tensile strength, used for pipe pressure ratings.
    pub strength: f64,
    pub resistivity: f64,
    pub specific_heat: f64,
    pub gas_density: f64,
    pub liquid_density: f64,
    pub solid_density: f64,
    pub thermal_conductivity: f64,
    pub boiling_point_k: f64,
    pub melting_point_k: f64,
    /// Field strength a magnet made of this substance produces [T].
    pub magnetism: f64,
    pub expansion_ratio: f64,
    pub latent_heat_fusion: f64,
    pub latent_heat_vaporization: f64,
}

impl MaterialProperties {
    fn validate(&self) -> MaterialResult<()> {
        if self.name.trim().is_empty() {
            return Err(MaterialError::InvalidArg {
                what: "material name",
            });
        }
        for (v, what) in [
            (self.gas_density, "gas density"),
            (self.liquid_density, "liquid density"),
            (self.solid_density, "solid density"),
        ] {
            if ensure_positive(v, what).is_err() {
                return Err(MaterialError::NonPhysical { what });
            }
        }
        for (v, what) in [
            (self.strength, "strength"),
            (self.resistivity, "resistivity"),
            (self.specific_heat, "specific heat"),
            (self.thermal_conductivity, "thermal conductivity"),
            (self.boiling_point_k, "boiling point"),
            (self.melting_point_k, "melting point"),
            (self.magnetism, "magnetism"),
            (self.expansion_ratio, "expansion ratio"),
            (self.latent_heat_fusion, "latent heat of fusion"),
            (self.latent_heat_vaporization, "latent heat of vaporization"),
        ] {
            ensure_finite(v, what)?;
            if v < 0.0 {
                return Err(MaterialError::NonPhysical { what });
            }
        }
        Ok(())
    }
}

/// Immutable substance shared by every quantity of it.
///
/// Always handled as `Arc<MaterialType>`; two materials are the same
/// substance only when they point at the same allocation.
pub struct MaterialType {
    props: MaterialProperties,
    gas_constant: f64,
}

impl MaterialType {
    /// Build a substance, deriving its gas constant from the gas density at
    /// `reference_temperature_k` (R = 1 / (ρ_gas · T_ref), m³·atm/(kg·K)).
    pub fn new(props: MaterialProperties, reference_temperature_k: f64) -> MaterialResult<Self> {
        props.validate()?;
        let t_ref = ensure_positive(reference_temperature_k, "reference temperature")?;
        let gas_constant = 1.0 / (props.gas_density * t_ref);
        Ok(Self {
            props,
            gas_constant,
        })
    }

    /// Build a shared substance using the ambient temperature as reference.
    pub fn shared(props: MaterialProperties, constants: &SimConstants) -> MaterialResult<Arc<Self>> {
        Self::new(props, constants.ambient_temperature_k).map(Arc::new)
    }

    pub fn name(&self) -> &str {
        &self.props.name
    }

    pub fn properties(&self) -> &MaterialProperties {
        &self.props
    }

    pub fn gas_constant(&self) -> f64 {
        self.gas_constant
    }

    pub fn strength(&self) -> f64 {
        self.props.strength
    }

    pub fn resistivity(&self) -> f64 {
        self.props.resistivity
    }

    pub fn specific_heat(&self) -> f64 {
        self.props.specific_heat
    }

    pub fn thermal_conductivity(&self) -> f64 {
        self.props.thermal_conductivity
    }

    pub fn boiling_point_k(&self) -> f64 {
        self.props.boiling_point_k
    }

    pub fn melting_point_k(&self) -> f64 {
        self.props.melting_point_k
    }

    pub fn magnetism(&self) -> f64 {
        self.props.magnetism
    }

    pub fn latent_heat_fusion(&self) -> f64 {
        self.props.latent_heat_fusion
    }

    pub fn latent_heat_vaporization(&self) -> f64 {
        self.props.latent_heat_vaporization
    }

    pub fn solid_density(&self) -> f64 {
        self.props.solid_density
    }

    pub fn liquid_density(&self) -> f64 {
        self.props.liquid_density
    }

    pub fn gas_density(&self) -> f64 {
        self.props.gas_density
    }

    /// Phase of this substance at temperature `t_k`.
    pub fn phase_at(&self, t_k: f64) -> Phase {
        if t_k < self.props.melting_point_k {
            Phase::Solid
        } else if t_k < self.props.boiling_point_k {
            Phase::Liquid
        } else {
            Phase::Gas
        }
    }

    pub fn density_of(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Solid => self.props.solid_density,
            Phase::Liquid => self.props.liquid_density,
            Phase::Gas => self.props.gas_density,
        }
    }
}

impl fmt::Debug for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialType")
            .field("name", &self.props.name)
            .field("gas_constant", &self.gas_constant)
            .finish()
    }
}
