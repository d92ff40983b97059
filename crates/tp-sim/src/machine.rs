//! Closed set of machines the simulator steps.

use tp_core::{ChamberId, CouplingId, SimConstants};
use tp_network::ChamberNetwork;

use crate::compressor::Compressor;
use crate::coupling::RotationalForce;
use crate::expander::Expander;
use crate::heat_exchanger::HeatExchanger;
use crate::motor::Motor;

/// Everything a machine may touch during one tick.
pub struct StepContext<'a> {
    pub constants: &'a SimConstants,
    pub chambers: &'a mut ChamberNetwork,
    pub couplings: &'a mut [RotationalForce],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MachineKind {
    Chamber,
    Motor,
    Compressor,
    HeatExchanger,
    Expander,
}

/// A registered machine. A `Chamber` entry flushes that chamber downstream.
#[derive(Debug)]
pub enum Machine {
    Chamber(ChamberId),
    Motor(Motor),
    Compressor(Compressor),
    HeatExchanger(HeatExchanger),
    Expander(Expander),
}

impl Machine {
    pub fn step(&mut self, ctx: &mut StepContext<'_>) {
        match self {
            Machine::Chamber(id) => {
                ctx.chambers.flush(*id, ctx.constants);
            }
            Machine::Motor(m) => m.step(ctx),
            Machine::Compressor(c) => c.step(ctx),
            Machine::HeatExchanger(h) => h.step(ctx),
            Machine::Expander(e) => e.step(ctx),
        }
    }

    pub fn kind(&self) -> MachineKind {
        match self {
            Machine::Chamber(_) => MachineKind::Chamber,
            Machine::Motor(_) => MachineKind::Motor,
            Machine::Compressor(_) => MachineKind::Compressor,
            Machine::HeatExchanger(_) => MachineKind::HeatExchanger,
            Machine::Expander(_) => MachineKind::Expander,
        }
    }

    /// Chambers this machine reads from or writes to.
    pub fn chamber_refs(&self) -> Vec<ChamberId> {
        match self {
            Machine::Chamber(id) => vec![*id],
            Machine::Motor(_) => Vec::new(),
            Machine::Compressor(c) => vec![c.input(), c.output()],
            Machine::HeatExchanger(h) => {
                let p = h.ports();
                vec![p.content_in, p.content_out, p.coolant_in, p.coolant_out]
            }
            Machine::Expander(e) => {
                let p = e.ports();
                vec![p.input, p.gas_out, p.liquid_out]
            }
        }
    }

    /// Coupling this machine drives or is driven by.
    pub fn coupling_ref(&self) -> Option<CouplingId> {
        match self {
            Machine::Motor(m) => Some(m.coupling()),
            Machine::Compressor(c) => Some(c.coupling()),
            _ => None,
        }
    }
}

impl From<Motor> for Machine {
    fn from(m: Motor) -> Self {
        Machine::Motor(m)
    }
}

impl From<Compressor> for Machine {
    fn from(c: Compressor) -> Self {
        Machine::Compressor(c)
    }
}

impl From<HeatExchanger> for Machine {
    fn from(h: HeatExchanger) -> Self {
        Machine::HeatExchanger(h)
    }
}

impl From<Expander> for Machine {
    fn from(e: Expander) -> Self {
        Machine::Expander(e)
    }
}
