//! Arena of chambers and the per-tick chamber flush.

use tp_core::numeric::ensure_positive;
use tp_core::{ChamberId, SimConstants};
use tp_materials::{thermo, Material};
use tracing::{debug, trace};

use crate::chamber::{Chamber, Routes};
use crate::error::{NetworkError, NetworkResult};
use crate::gate;
use crate::validate;

/// All chambers of a plant, addressed by stable `ChamberId`s.
///
/// Chambers may route into each other in cycles; routes are handles, never
/// references, so the network owns every chamber outright.
#[derive(Debug, Default)]
pub struct ChamberNetwork {
    chambers: Vec<Chamber>,
}

impl ChamberNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chamber(&mut self, name: impl Into<String>, max_volume_m3: f64) -> NetworkResult<ChamberId> {
        ensure_positive(max_volume_m3, "chamber volume")?;
        let id = ChamberId::from_index(self.chambers.len() as u32);
        self.chambers.push(Chamber::new(id, name.into(), max_volume_m3));
        Ok(id)
    }

    /// Set both downstream routes of `from`.
    pub fn set_routes(
        &mut self,
        from: ChamberId,
        primary: Option<ChamberId>,
        alternate: Option<ChamberId>,
    ) -> NetworkResult<()> {
        let routes = Routes { primary, alternate };
        validate::check_routes(&self.chambers, from, routes)?;
        self.chambers[from.slot()].routes = routes;
        Ok(())
    }

    /// Place an initial charge, failing instead of handing it back.
    pub fn charge(&mut self, id: ChamberId, material: Material, constants: &SimConstants) -> NetworkResult<()> {
        let chamber = self.chamber_mut(id)?;
        if let Some(reason) = chamber.rejection(&material) {
            return Err(NetworkError::ChargeRejected { id, reason });
        }
        chamber
            .add(material, constants)
            .map_err(|_| NetworkError::ChargeRejected {
                id,
                reason: "refused",
            })
    }

    pub fn validate(&self) -> NetworkResult<()> {
        validate::validate_all(&self.chambers)
    }

    pub fn contains(&self, id: ChamberId) -> bool {
        id.slot() < self.chambers.len()
    }

    pub fn len(&self) -> usize {
        self.chambers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chambers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chamber> {
        self.chambers.iter()
    }

    pub fn get(&self, id: ChamberId) -> Option<&Chamber> {
        self.chambers.get(id.slot())
    }

    pub fn get_mut(&mut self, id: ChamberId) -> Option<&mut Chamber> {
        self.chambers.get_mut(id.slot())
    }

    pub fn chamber(&self, id: ChamberId) -> NetworkResult<&Chamber> {
        self.get(id).ok_or(NetworkError::UnknownChamber { id })
    }

    pub fn chamber_mut(&mut self, id: ChamberId) -> NetworkResult<&mut Chamber> {
        self.get_mut(id).ok_or(NetworkError::UnknownChamber { id })
    }

    /// Two distinct chambers, mutably.
    pub fn get_pair_mut(&mut self, a: ChamberId, b: ChamberId) -> Option<(&mut Chamber, &mut Chamber)> {
        let (ia, ib) = (a.slot(), b.slot());
        if ia == ib || ia >= self.chambers.len() || ib >= self.chambers.len() {
            return None;
        }
        if ia < ib {
            let (lo, hi) = self.chambers.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.chambers.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }

    /// Pull through the flow gate from chamber `id`. Unknown ids pull nothing.
    pub fn pull(&mut self, id: ChamberId, volume_m3: f64) -> Option<Material> {
        gate::pull(self.get_mut(id)?, volume_m3)
    }

    /// Push through the flow gate into chamber `id`. Unknown ids refuse.
    pub fn push(
        &mut self,
        id: ChamberId,
        volume_m3: f64,
        slot: &mut Option<Material>,
        constants: &SimConstants,
    ) -> bool {
        match self.get_mut(id) {
            Some(chamber) => gate::push(chamber, volume_m3, slot, constants),
            None => false,
        }
    }

    /// One chamber tick: push the whole contents of `id` downstream.
    ///
    /// Does nothing without a primary route or without contents. Returns
    /// `true` when the contents moved.
    pub fn flush(&mut self, id: ChamberId, constants: &SimConstants) -> bool {
        let Some(source) = self.get(id) else {
            return false;
        };
        let Some(target) = source.flush_target() else {
            return false;
        };
        if source.routes().alternate == Some(target) {
            debug!(
                chamber = source.name(),
                pressure_atm = source.pressure_atm(),
                "routing to alternate output"
            );
        }
        let Some((src, dst)) = self.get_pair_mut(id, target) else {
            return false;
        };
        let mut slot = src.contents.take();
        let volume = slot.as_ref().map_or(0.0, thermo::volume);
        let moved = gate::push(dst, volume, &mut slot, constants);
        src.contents = slot;
        if !moved {
            trace!(from = src.name(), to = dst.name(), "flush blocked");
        }
        moved
    }
}
