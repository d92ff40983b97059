//! Fixed-step plant simulator.

use tp_core::units;
use tp_core::{CouplingId, MachineId, SimConstants};
use tp_network::ChamberNetwork;
use tracing::info;

use crate::compressor::Compressor;
use crate::coupling::RotationalForce;
use crate::expander::Expander;
use crate::heat_exchanger::HeatExchanger;
use crate::machine::{Machine, StepContext};
use crate::motor::Motor;
use crate::snapshot::{ChamberSnapshot, MachineDetail, MachineSnapshot, PlantSnapshot};

/// Owns the whole plant and advances it one tick at a time.
///
/// Every tick steps each registered machine exactly once, in registration
/// order. Built by [`crate::PlantBuilder`]; stepping never fails.
#[derive(Debug)]
pub struct Simulator {
    constants: SimConstants,
    chambers: ChamberNetwork,
    couplings: Vec<RotationalForce>,
    machines: Vec<Machine>,
    tick: u64,
}

impl Simulator {
    pub(crate) fn from_parts(
        constants: SimConstants,
        chambers: ChamberNetwork,
        couplings: Vec<RotationalForce>,
        machines: Vec<Machine>,
    ) -> Self {
        Self {
            constants,
            chambers,
            couplings,
            machines,
            tick: 0,
        }
    }

    /// Run one tick.
    pub fn step(&mut self) {
        let mut ctx = StepContext {
            constants: &self.constants,
            chambers: &mut self.chambers,
            couplings: &mut self.couplings,
        };
        for machine in &mut self.machines {
            machine.step(&mut ctx);
        }
        self.tick += 1;
    }

    /// Run as many whole ticks as fit in `duration_s`; returns the count.
    ///
    /// Negative or non-finite durations run nothing.
    pub fn advance(&mut self, duration_s: f64) -> u64 {
        let ticks = self.constants.ticks_in(duration_s);
        self.run_ticks(ticks);
        ticks
    }

    /// Run exactly `ticks` ticks.
    pub fn run_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
        info!(ticks, elapsed_s = self.elapsed_s(), "advanced");
    }

    pub fn constants(&self) -> &SimConstants {
        &self.constants
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Simulated time since construction [s].
    pub fn elapsed_s(&self) -> f64 {
        self.tick as f64 * self.constants.tick_s
    }

    pub fn chambers(&self) -> &ChamberNetwork {
        &self.chambers
    }

    /// For operations outside the plant, such as draining a chamber by hand.
    pub fn chambers_mut(&mut self) -> &mut ChamberNetwork {
        &mut self.chambers
    }

    pub fn couplings(&self) -> &[RotationalForce] {
        &self.couplings
    }

    pub fn coupling(&self, id: CouplingId) -> Option<&RotationalForce> {
        self.couplings.get(id.slot())
    }

    /// Machines with their handles, in step order.
    pub fn machines(&self) -> impl Iterator<Item = (MachineId, &Machine)> {
        self.machines
            .iter()
            .enumerate()
            .map(|(i, m)| (MachineId::from_index(i as u32), m))
    }

    pub fn machine(&self, id: MachineId) -> Option<&Machine> {
        self.machines.get(id.slot())
    }

    pub fn motor(&self, id: MachineId) -> Option<&Motor> {
        match self.machine(id)? {
            Machine::Motor(m) => Some(m),
            _ => None,
        }
    }

    /// Mutable motor access, for external stop and restart.
    pub fn motor_mut(&mut self, id: MachineId) -> Option<&mut Motor> {
        match self.machines.get_mut(id.slot())? {
            Machine::Motor(m) => Some(m),
            _ => None,
        }
    }

    pub fn compressor(&self, id: MachineId) -> Option<&Compressor> {
        match self.machine(id)? {
            Machine::Compressor(c) => Some(c),
            _ => None,
        }
    }

    pub fn heat_exchanger(&self, id: MachineId) -> Option<&HeatExchanger> {
        match self.machine(id)? {
            Machine::HeatExchanger(h) => Some(h),
            _ => None,
        }
    }

    pub fn expander(&self, id: MachineId) -> Option<&Expander> {
        match self.machine(id)? {
            Machine::Expander(e) => Some(e),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> PlantSnapshot {
        PlantSnapshot {
            tick: self.tick,
            elapsed: units::s(self.elapsed_s()),
            chambers: self.chambers.iter().map(ChamberSnapshot::of).collect(),
            machines: self
                .machines()
                .map(|(id, m)| MachineSnapshot {
                    id,
                    detail: MachineDetail::of(m),
                })
                .collect(),
        }
    }
}
