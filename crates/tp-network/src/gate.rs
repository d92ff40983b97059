//! Flow gate: capacity-checked transfer between a chamber and a machine.
//!
//! Both directions are all-or-nothing. A refused pull leaves the chamber
//! untouched; a refused push leaves the material in the caller's slot.

use tp_core::numeric::le_within;
use tp_core::SimConstants;
use tp_materials::{thermo, Material};
use tracing::trace;

use crate::chamber::Chamber;

/// Take `volume_m3` worth of the chamber's contents.
///
/// Succeeds only when the volume is positive, fits the chamber's capacity
/// and does not exceed what the chamber currently holds.
pub fn pull(chamber: &mut Chamber, volume_m3: f64) -> Option<Material> {
    let tol = chamber.tolerances();
    let contents = chamber.contents()?;
    if !volume_m3.is_finite() || volume_m3 <= 0.0 {
        return None;
    }
    if !le_within(volume_m3, chamber.max_volume_m3(), tol)
        || !le_within(volume_m3, thermo::volume(contents), tol)
    {
        trace!(
            chamber = chamber.name(),
            volume_m3,
            occupied_m3 = chamber.occupied_volume_m3(),
            "pull refused"
        );
        return None;
    }
    let mass = thermo::mass_from_volume(contents, volume_m3);
    chamber.remove(mass)
}

/// Move the material in `slot` into the chamber if `volume_m3` fits.
///
/// Returns `true` and empties the slot on success. On failure the slot is
/// left exactly as it was.
pub fn push(
    chamber: &mut Chamber,
    volume_m3: f64,
    slot: &mut Option<Material>,
    constants: &SimConstants,
) -> bool {
    let Some(material) = slot.take() else {
        return false;
    };
    if !le_within(volume_m3, chamber.free_volume_m3(), chamber.tolerances()) {
        trace!(
            chamber = chamber.name(),
            volume_m3,
            free_m3 = chamber.free_volume_m3(),
            "push refused: no room"
        );
        *slot = Some(material);
        return false;
    }
    match chamber.add(material, constants) {
        Ok(()) => true,
        Err(material) => {
            trace!(chamber = chamber.name(), "push refused by chamber");
            *slot = Some(material);
            false
        }
    }
}
