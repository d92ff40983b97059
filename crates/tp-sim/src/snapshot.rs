//! Read-only plant snapshots for presentation layers.
//!
//! Snapshots are plain data taken between ticks. They carry `uom` quantities
//! so a consumer can pick its own display units.

use serde::{Deserialize, Serialize};
use tp_core::units::{
    self, AngularVelocity, ElectricPotential, Length, Mass, Pressure, Temperature, Time, Torque,
    Volume,
};
use tp_core::{ChamberId, MachineId};
use tp_materials::Material;
use tp_network::{Chamber, ChamberState};

use crate::compressor::{Compressor, CompressorState};
use crate::expander::{Expander, ExpanderState};
use crate::heat_exchanger::{HeatExchanger, StreamState};
use crate::machine::Machine;
use crate::motor::{Motor, MotorState};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantSnapshot {
    pub tick: u64,
    pub elapsed: Time,
    pub chambers: Vec<ChamberSnapshot>,
    pub machines: Vec<MachineSnapshot>,
}

/// One material quantity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialSnapshot {
    pub substance: String,
    pub mass: Mass,
    pub temperature: Temperature,
    pub pressure: Pressure,
}

impl MaterialSnapshot {
    pub fn of(material: &Material) -> Self {
        Self {
            substance: material.kind().name().to_string(),
            mass: units::kg(material.mass_kg()),
            temperature: units::k(material.temperature_k()),
            pressure: units::atm(material.pressure_atm()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChamberSnapshot {
    pub id: ChamberId,
    pub name: String,
    pub state: ChamberState,
    pub max_volume: Volume,
    pub occupied_volume: Volume,
    pub contents: Option<MaterialSnapshot>,
}

impl ChamberSnapshot {
    pub fn of(chamber: &Chamber) -> Self {
        Self {
            id: chamber.id(),
            name: chamber.name().to_string(),
            state: chamber.state(),
            max_volume: units::m3(chamber.max_volume_m3()),
            occupied_volume: units::m3(chamber.occupied_volume_m3()),
            contents: chamber.contents().map(MaterialSnapshot::of),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub id: MachineId,
    pub detail: MachineDetail,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MachineDetail {
    Chamber { chamber: ChamberId },
    Motor(MotorSnapshot),
    Compressor(CompressorSnapshot),
    HeatExchanger(HeatExchangerSnapshot),
    Expander(ExpanderSnapshot),
}

impl MachineDetail {
    pub fn of(machine: &Machine) -> Self {
        match machine {
            Machine::Chamber(id) => MachineDetail::Chamber { chamber: *id },
            Machine::Motor(m) => MachineDetail::Motor(MotorSnapshot::of(m)),
            Machine::Compressor(c) => MachineDetail::Compressor(CompressorSnapshot::of(c)),
            Machine::HeatExchanger(h) => {
                MachineDetail::HeatExchanger(HeatExchangerSnapshot::of(h))
            }
            Machine::Expander(e) => MachineDetail::Expander(ExpanderSnapshot::of(e)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotorSnapshot {
    pub state: MotorState,
    pub current_a: f64,
    pub back_emf: ElectricPotential,
    pub input_voltage: ElectricPotential,
    pub torque: Torque,
    pub max_torque: Torque,
    pub angular_velocity: AngularVelocity,
    pub rpm: f64,
    pub angle_rad: f64,
    pub wire_temperature: Temperature,
}

impl MotorSnapshot {
    pub fn of(m: &Motor) -> Self {
        Self {
            state: m.state(),
            current_a: m.current_a(),
            back_emf: units::volts(m.back_emf_v()),
            input_voltage: units::volts(m.input_voltage_v()),
            torque: units::nm(m.torque_nm()),
            max_torque: units::nm(m.max_torque_nm()),
            angular_velocity: units::rad_per_s(m.angular_velocity_rad_s()),
            rpm: m.rpm(),
            angle_rad: m.angle_rad(),
            wire_temperature: units::k(m.wire_temperature_k()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressorSnapshot {
    pub state: CompressorState,
    pub pressure: Pressure,
    pub volume: Volume,
    pub temperature: Temperature,
    pub piston_displacement: Length,
    pub completed_cycles: u64,
    pub gas: Option<MaterialSnapshot>,
}

impl CompressorSnapshot {
    pub fn of(c: &Compressor) -> Self {
        Self {
            state: c.state(),
            pressure: units::atm(c.pressure_atm()),
            volume: units::m3(c.volume_m3()),
            temperature: units::k(c.temperature_k()),
            piston_displacement: units::m(c.piston_displacement_m()),
            completed_cycles: c.completed_cycles(),
            gas: c.gas().map(MaterialSnapshot::of),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeatExchangerSnapshot {
    pub content_state: StreamState,
    pub coolant_state: StreamState,
    pub content: Option<MaterialSnapshot>,
    pub coolant: Option<MaterialSnapshot>,
    pub wall_temperature: Temperature,
    pub rated_pressure: Pressure,
}

impl HeatExchangerSnapshot {
    pub fn of(h: &HeatExchanger) -> Self {
        Self {
            content_state: h.content_state(),
            coolant_state: h.coolant_state(),
            content: h.content().map(MaterialSnapshot::of),
            coolant: h.coolant().map(MaterialSnapshot::of),
            wall_temperature: units::k(h.pipe().wall_temperature_k()),
            rated_pressure: units::atm(h.pipe().rated_pressure_atm()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpanderSnapshot {
    pub state: ExpanderState,
    pub vessel_temperature: Temperature,
    pub gas: Option<MaterialSnapshot>,
    pub liquid: Option<MaterialSnapshot>,
    pub liquid_volume: Volume,
}

impl ExpanderSnapshot {
    pub fn of(e: &Expander) -> Self {
        Self {
            state: e.state(),
            vessel_temperature: units::k(e.vessel().temperature_k()),
            gas: e.gas().map(MaterialSnapshot::of),
            liquid: e.liquid().map(MaterialSnapshot::of),
            liquid_volume: units::m3(e.liquid_volume_m3()),
        }
    }
}
