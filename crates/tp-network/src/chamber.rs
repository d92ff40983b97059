//! Bounded-volume chambers.

use tp_core::numeric::{le_within, nearly_equal, Tolerances};
use tp_core::{ChamberId, SimConstants};
use tp_materials::{thermo, Material};

/// Pressure above which a chamber flushes to its alternate route [atm].
pub const ALTERNATE_ROUTE_PRESSURE_ATM: f64 = 50.0;

/// Fill state, derived from occupied volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChamberState {
    Empty,
    Contains,
    Full,
}

/// Downstream chambers a chamber flushes into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Routes {
    pub primary: Option<ChamberId>,
    pub alternate: Option<ChamberId>,
}

/// Vessel of fixed capacity holding at most one material.
#[derive(Debug)]
pub struct Chamber {
    id: ChamberId,
    name: String,
    max_volume_m3: f64,
    pub(crate) contents: Option<Material>,
    pub(crate) routes: Routes,
    tol: Tolerances,
}

impl Chamber {
    pub(crate) fn new(id: ChamberId, name: String, max_volume_m3: f64) -> Self {
        Self {
            id,
            name,
            max_volume_m3,
            contents: None,
            routes: Routes::default(),
            tol: Tolerances::default(),
        }
    }

    pub fn tolerances(&self) -> Tolerances {
        self.tol
    }

    pub fn id(&self) -> ChamberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_volume_m3(&self) -> f64 {
        self.max_volume_m3
    }

    pub fn contents(&self) -> Option<&Material> {
        self.contents.as_ref()
    }

    pub fn routes(&self) -> Routes {
        self.routes
    }

    pub fn occupied_volume_m3(&self) -> f64 {
        self.contents.as_ref().map_or(0.0, thermo::volume)
    }

    pub fn free_volume_m3(&self) -> f64 {
        self.max_volume_m3 - self.occupied_volume_m3()
    }

    pub fn state(&self) -> ChamberState {
        let Some(contents) = &self.contents else {
            return ChamberState::Empty;
        };
        let occupied = thermo::volume(contents);
        if contents.mass_kg() <= 0.0 || occupied <= 0.0 {
            ChamberState::Empty
        } else if nearly_equal(occupied, self.max_volume_m3, self.tol)
            || occupied > self.max_volume_m3
        {
            ChamberState::Full
        } else {
            ChamberState::Contains
        }
    }

    pub fn pressure_atm(&self) -> Option<f64> {
        self.contents.as_ref().map(Material::pressure_atm)
    }

    pub fn temperature_k(&self) -> Option<f64> {
        self.contents.as_ref().map(Material::temperature_k)
    }

    pub fn mass_kg(&self) -> f64 {
        self.contents.as_ref().map_or(0.0, Material::mass_kg)
    }

    /// Why `material` would be refused, if it would be.
    pub(crate) fn rejection(&self, material: &Material) -> Option<&'static str> {
        if self.state() == ChamberState::Full {
            return Some("chamber is full");
        }
        if let Some(contents) = &self.contents {
            if !thermo::is_compatible(contents, material) {
                return Some("incompatible material");
            }
        }
        if !le_within(thermo::volume(material), self.free_volume_m3(), self.tol) {
            return Some("exceeds free volume");
        }
        None
    }

    /// Store or merge `material`.
    ///
    /// Refused when the chamber is full, when the material does not fit in
    /// the free volume, or when it is a different substance or phase than
    /// the current contents. A refused material is handed back unchanged.
    pub fn add(&mut self, material: Material, constants: &SimConstants) -> Result<(), Material> {
        if self.rejection(&material).is_some() {
            return Err(material);
        }
        match &mut self.contents {
            Some(contents) => thermo::merge(contents, material, constants),
            None => {
                self.contents = Some(material);
                Ok(())
            }
        }
    }

    /// Split `mass_kg` off the contents.
    ///
    /// `None` when the chamber is empty or holds less. A request within
    /// tolerance of the resident mass drains the chamber.
    pub fn remove(&mut self, mass_kg: f64) -> Option<Material> {
        let resident = self.contents.as_ref()?.mass_kg();
        if !mass_kg.is_finite() || mass_kg < 0.0 {
            return None;
        }
        if nearly_equal(mass_kg, resident, self.tol) {
            return self.contents.take();
        }
        if mass_kg > resident {
            return None;
        }
        let contents = self.contents.as_mut()?;
        Some(thermo::split_off(contents, mass_kg))
    }

    /// Route for the next flush: the alternate when configured and the
    /// contents exceed [`ALTERNATE_ROUTE_PRESSURE_ATM`], else the primary.
    pub fn flush_target(&self) -> Option<ChamberId> {
        let primary = self.routes.primary?;
        let pressure = self.pressure_atm()?;
        match self.routes.alternate {
            Some(alt) if pressure > ALTERNATE_ROUTE_PRESSURE_ATM => Some(alt),
            _ => Some(primary),
        }
    }
}
