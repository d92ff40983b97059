//! Error types for plant construction.
//!
//! Only building a plant can fail. Once built, stepping never returns an
//! error: a transfer that cannot happen is retried on the next tick.

use thiserror::Error;
use tp_core::{ChamberId, CouplingId, MachineId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Machine {machine} references unknown chamber {chamber}")]
    UnknownChamber {
        machine: MachineId,
        chamber: ChamberId,
    },

    #[error("Unknown coupling {coupling}")]
    UnknownCoupling { coupling: CouplingId },

    #[error("Coupling {coupling} is miswired: {what}")]
    CouplingWiring {
        coupling: CouplingId,
        what: &'static str,
    },

    #[error("Material error: {0}")]
    Material(#[from] tp_materials::MaterialError),

    #[error("Component error: {0}")]
    Component(#[from] tp_components::ComponentError),

    #[error("Network error: {0}")]
    Network(#[from] tp_network::NetworkError),

    #[error("Core error: {0}")]
    Core(#[from] tp_core::TpError),
}

pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SimError::CouplingWiring {
            coupling: CouplingId::from_index(0),
            what: "no driver",
        };
        assert!(err.to_string().contains("no driver"));
    }

    #[test]
    fn network_error_converts() {
        let err: SimError = tp_network::NetworkError::SelfRoute {
            id: ChamberId::from_index(1),
        }
        .into();
        assert!(matches!(err, SimError::Network(_)));
    }
}
