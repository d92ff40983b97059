//! Network construction errors.

use thiserror::Error;
use tp_core::{ChamberId, TpError};

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors raised while wiring or charging the chamber network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A handle that does not name a chamber of this network.
    #[error("Unknown chamber {id}")]
    UnknownChamber { id: ChamberId },

    /// A chamber routed to itself.
    #[error("Chamber {id} routes to itself")]
    SelfRoute { id: ChamberId },

    /// An alternate route on a chamber with no primary route.
    #[error("Chamber {id} has an alternate route but no primary route")]
    AlternateWithoutPrimary { id: ChamberId },

    /// An initial charge the chamber refused (over capacity or incompatible).
    #[error("Chamber {id} rejected initial charge: {reason}")]
    ChargeRejected { id: ChamberId, reason: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Core(#[from] TpError),
}

impl From<NetworkError> for TpError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::UnknownChamber { id } => TpError::UnknownId {
                what: "chamber",
                index: id.slot(),
                len: 0,
            },
            NetworkError::InvalidArg { what } => TpError::InvalidArg { what },
            NetworkError::Core(e) => e,
            NetworkError::SelfRoute { .. } => TpError::Invariant {
                what: "chamber routes to itself",
            },
            NetworkError::AlternateWithoutPrimary { .. } => TpError::Invariant {
                what: "alternate route without primary",
            },
            NetworkError::ChargeRejected { reason, .. } => TpError::InvalidArg { what: reason },
        }
    }
}
