//! Route validation.

use tp_core::ChamberId;

use crate::chamber::{Chamber, Routes};
use crate::error::{NetworkError, NetworkResult};

pub(crate) fn check_id(chambers: &[Chamber], id: ChamberId) -> NetworkResult<()> {
    if id.slot() < chambers.len() {
        Ok(())
    } else {
        Err(NetworkError::UnknownChamber { id })
    }
}

/// Validate routes for `from`: targets exist, no self-routes, and an
/// alternate only alongside a primary.
pub(crate) fn check_routes(chambers: &[Chamber], from: ChamberId, routes: Routes) -> NetworkResult<()> {
    check_id(chambers, from)?;
    if routes.alternate.is_some() && routes.primary.is_none() {
        return Err(NetworkError::AlternateWithoutPrimary { id: from });
    }
    for target in [routes.primary, routes.alternate].into_iter().flatten() {
        check_id(chambers, target)?;
        if target == from {
            return Err(NetworkError::SelfRoute { id: from });
        }
    }
    Ok(())
}

/// Validate every chamber's routes.
pub(crate) fn validate_all(chambers: &[Chamber]) -> NetworkResult<()> {
    for (i, ch) in chambers.iter().enumerate() {
        if ch.id().slot() != i {
            return Err(NetworkError::UnknownChamber { id: ch.id() });
        }
        check_routes(chambers, ch.id(), ch.routes())?;
    }
    Ok(())
}
