//! The reference plant: motor-driven compressor, heat exchanger, gate and
//! expander in a closed nitrogen loop.

use serde::{Deserialize, Serialize};
use tp_components::{Battery, Coil, Magnet, Pipe, Rotor, Vessel, Wire};
use tp_core::units::{m, m3, ohms, volts};
use tp_core::{ChamberId, CouplingId, MachineId, SimConstants};
use tp_materials::{Material, MaterialLibrary};

use crate::builder::PlantBuilder;
use crate::compressor::{Compressor, CompressorSpec};
use crate::error::SimResult;
use crate::expander::{Expander, ExpanderPorts};
use crate::heat_exchanger::{HeatExchanger, HeatExchangerPorts};
use crate::motor::Motor;
use crate::simulator::Simulator;

/// Initial contents of a chamber.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargeParams {
    pub material: String,
    pub mass_kg: f64,
    pub temperature_k: f64,
    pub pressure_atm: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorParams {
    pub battery_voltage_v: f64,
    pub battery_resistance_ohm: f64,
    pub wire_material: String,
    pub wire_radius_m: f64,
    pub wire_length_m: f64,
    /// Derived from the wire length when absent.
    pub coil_turns: Option<f64>,
    /// Derived from the wire length when absent.
    pub coil_area_m2: Option<f64>,
    pub magnet_material: String,
    pub rotor_material: String,
    pub rotor_radius_m: f64,
    pub rotor_length_m: f64,
}

impl Default for MotorParams {
    fn default() -> Self {
        Self {
            battery_voltage_v: 8.0,
            battery_resistance_ohm: 0.04,
            wire_material: "copper".into(),
            wire_radius_m: 0.001,
            wire_length_m: 60.0,
            coil_turns: None,
            coil_area_m2: Some(0.004),
            magnet_material: "iron".into(),
            rotor_material: "iron".into(),
            rotor_radius_m: 0.02,
            rotor_length_m: 0.05,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatExchangerParams {
    pub pipe_material: String,
    /// Outer diameter [m].
    pub pipe_diameter_m: f64,
    pub pipe_thickness_m: f64,
    pub pipe_length_m: f64,
    pub coolant_batch_m3: f64,
    pub coolant_tank_m3: f64,
    pub coolant: ChargeParams,
}

impl Default for HeatExchangerParams {
    fn default() -> Self {
        Self {
            pipe_material: "copper".into(),
            pipe_diameter_m: 0.01,
            pipe_thickness_m: 0.003,
            pipe_length_m: 100.0,
            coolant_batch_m3: 1.0,
            coolant_tank_m3: 1000.0,
            coolant: ChargeParams {
                material: "water".into(),
                mass_kg: 820_000.0,
                temperature_k: 294.0,
                pressure_atm: 1.0,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpanderParams {
    pub vessel_material: String,
    pub vessel_thickness_m: f64,
    pub vessel_capacity_m3: f64,
    pub input_m3: f64,
    pub gas_out_m3: f64,
    pub liquid_out_m3: f64,
}

impl Default for ExpanderParams {
    fn default() -> Self {
        Self {
            vessel_material: "iron".into(),
            vessel_thickness_m: 0.001,
            vessel_capacity_m3: 0.02,
            input_m3: 0.1,
            gas_out_m3: 1.0,
            liquid_out_m3: 0.02,
        }
    }
}

/// Every tunable of the reference plant. `Default` is the stock plant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferencePlantParams {
    pub intake_m3: f64,
    pub intake_charge: ChargeParams,
    pub lever_arm_m: f64,
    pub motor: MotorParams,
    pub compressor: CompressorSpec,
    pub compressor_output_m3: f64,
    pub heat_exchanger: HeatExchangerParams,
    pub gate_m3: f64,
    pub expander: ExpanderParams,
}

impl Default for ReferencePlantParams {
    fn default() -> Self {
        Self {
            intake_m3: 10.0,
            intake_charge: ChargeParams {
                material: "nitrogen".into(),
                mass_kg: 1.0,
                temperature_k: 294.0,
                pressure_atm: 1.0,
            },
            lever_arm_m: 1e-5,
            motor: MotorParams::default(),
            compressor: CompressorSpec::default(),
            compressor_output_m3: 0.1,
            heat_exchanger: HeatExchangerParams::default(),
            gate_m3: 0.1,
            expander: ExpanderParams::default(),
        }
    }
}

/// Handles into a built reference plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlantHandles {
    pub intake: ChamberId,
    pub compressor_output: ChamberId,
    pub gate: ChamberId,
    pub coolant_in: ChamberId,
    pub coolant_out: ChamberId,
    pub expander_input: ChamberId,
    pub expander_gas_out: ChamberId,
    pub expander_liquid_out: ChamberId,
    pub coupling: CouplingId,
    pub motor: MachineId,
    pub compressor: MachineId,
    pub heat_exchanger: MachineId,
    pub expander: MachineId,
}

#[derive(Debug)]
pub struct ReferencePlant {
    pub sim: Simulator,
    pub handles: PlantHandles,
}

fn charge_material(lib: &MaterialLibrary, charge: &ChargeParams) -> SimResult<Material> {
    Ok(Material::new(
        lib.require(&charge.material)?,
        charge.mass_kg,
        charge.temperature_k,
        charge.pressure_atm,
    ))
}

fn build_motor(
    lib: &MaterialLibrary,
    p: &MotorParams,
    coupling: CouplingId,
    c: &SimConstants,
) -> SimResult<Motor> {
    let wire = Wire::new(
        lib.require(&p.wire_material)?,
        m(p.wire_radius_m),
        m(p.wire_length_m),
        c,
    )?;
    let coil = Coil::new(wire, p.coil_turns, p.coil_area_m2)?;
    let magnet = Magnet::new(lib.require(&p.magnet_material)?);
    let rotor = Rotor::new(
        lib.require(&p.rotor_material)?,
        m(p.rotor_radius_m),
        m(p.rotor_length_m),
        c,
    )?;
    let battery = Battery::new(volts(p.battery_voltage_v), ohms(p.battery_resistance_ohm))?;
    Motor::new(coil, magnet, rotor, battery, coupling, c.ambient_temperature_k)
}

/// Build the reference plant.
///
/// ```text
/// intake ─▶ compressor ─▶ compressor output ─▶ heat exchanger ─▶ gate
///   ▲          ▲ coupling                         ▲ coolant        │ ≤ 50 atm: intake
///   │        motor                                                 │ > 50 atm: expander input
///   └──────────────── expander gas out ◀─ expander ◀───────────────┘
///                                            └─▶ liquid out
/// ```
///
/// Registration order: intake, motor, compressor, compressor output, heat
/// exchanger, coolant in, expander input, coolant out, expander, expander
/// gas out, expander liquid out, gate.
///
/// # Errors
/// Returns error if a material name is unknown or any part is non-physical.
pub fn reference_plant(
    constants: &SimConstants,
    params: &ReferencePlantParams,
) -> SimResult<ReferencePlant> {
    let c = constants;
    let lib = MaterialLibrary::standard(c)?;
    let mut b = PlantBuilder::new(c.clone());

    let intake = b.add_chamber("intake", params.intake_m3)?;
    let compressor_output = b.add_chamber("compressor output", params.compressor_output_m3)?;
    let gate = b.add_chamber("heat exchanger gate", params.gate_m3)?;
    let hx = &params.heat_exchanger;
    let coolant_in = b.add_chamber("coolant in", hx.coolant_tank_m3)?;
    let coolant_out = b.add_chamber("coolant out", hx.coolant_tank_m3)?;
    let ex = &params.expander;
    let expander_input = b.add_chamber("expander input", ex.input_m3)?;
    let expander_gas_out = b.add_chamber("expander gas out", ex.gas_out_m3)?;
    let expander_liquid_out = b.add_chamber("expander liquid out", ex.liquid_out_m3)?;

    b.route(gate, intake, Some(expander_input))?;
    b.route(expander_gas_out, intake, None)?;

    b.charge(intake, charge_material(&lib, &params.intake_charge)?)?;
    b.charge(coolant_in, charge_material(&lib, &hx.coolant)?)?;

    let coupling = b.add_coupling(params.lever_arm_m)?;
    let motor = build_motor(&lib, &params.motor, coupling, c)?;
    let compressor = Compressor::new(
        params.compressor.clone(),
        intake,
        compressor_output,
        coupling,
    )?;
    let pipe = Pipe::new(
        lib.require(&hx.pipe_material)?,
        m(hx.pipe_diameter_m),
        m(hx.pipe_thickness_m),
        m(hx.pipe_length_m),
        c,
    )?;
    let heat_exchanger = HeatExchanger::new(
        pipe,
        hx.coolant_batch_m3,
        HeatExchangerPorts {
            content_in: compressor_output,
            content_out: gate,
            coolant_in,
            coolant_out,
        },
    )?;
    let vessel = Vessel::new(
        lib.require(&ex.vessel_material)?,
        m(ex.vessel_thickness_m),
        m3(ex.vessel_capacity_m3),
        c,
    )?;
    let expander = Expander::new(
        vessel,
        ExpanderPorts {
            input: expander_input,
            gas_out: expander_gas_out,
            liquid_out: expander_liquid_out,
        },
    );

    b.register_chamber(intake);
    let motor = b.register(motor);
    let compressor = b.register(compressor);
    b.register_chamber(compressor_output);
    let heat_exchanger = b.register(heat_exchanger);
    b.register_chamber(coolant_in);
    b.register_chamber(expander_input);
    b.register_chamber(coolant_out);
    let expander = b.register(expander);
    b.register_chamber(expander_gas_out);
    b.register_chamber(expander_liquid_out);
    b.register_chamber(gate);

    Ok(ReferencePlant {
        sim: b.build()?,
        handles: PlantHandles {
            intake,
            compressor_output,
            gate,
            coolant_in,
            coolant_out,
            expander_input,
            expander_gas_out,
            expander_liquid_out,
            coupling,
            motor,
            compressor,
            heat_exchanger,
            expander,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::MachineKind;

    #[test]
    fn registration_order() {
        let plant = reference_plant(&SimConstants::default(), &ReferencePlantParams::default())
            .unwrap();
        let kinds: Vec<MachineKind> = plant.sim.machines().map(|(_, m)| m.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                MachineKind::Chamber,
                MachineKind::Motor,
                MachineKind::Compressor,
                MachineKind::Chamber,
                MachineKind::HeatExchanger,
                MachineKind::Chamber,
                MachineKind::Chamber,
                MachineKind::Chamber,
                MachineKind::Expander,
                MachineKind::Chamber,
                MachineKind::Chamber,
                MachineKind::Chamber,
            ]
        );
        assert_eq!(plant.handles.motor, MachineId::from_index(1));
        assert_eq!(plant.handles.expander, MachineId::from_index(8));
    }

    #[test]
    fn reference_geometry() {
        let plant = reference_plant(&SimConstants::default(), &ReferencePlantParams::default())
            .unwrap();
        let sim = &plant.sim;
        let motor = sim.motor(plant.handles.motor).unwrap();
        // 60 m of wire on a 0.004 m² square loop.
        assert!((motor.coil().turns() - 60.0 / (4.0 * 0.004_f64.sqrt())).abs() < 1e-9);
        let hx = sim.heat_exchanger(plant.handles.heat_exchanger).unwrap();
        assert!((hx.pipe().rated_pressure_atm() - 576.0).abs() < 1e-9);
        let intake = sim.chambers().chamber(plant.handles.intake).unwrap();
        assert!((intake.mass_kg() - 1.0).abs() < 1e-12);
        let routes = sim.chambers().chamber(plant.handles.gate).unwrap().routes();
        assert_eq!(routes.primary, Some(plant.handles.intake));
        assert_eq!(routes.alternate, Some(plant.handles.expander_input));
    }

    #[test]
    fn unknown_material_is_an_error() {
        let mut params = ReferencePlantParams::default();
        params.motor.wire_material = "unobtainium".into();
        assert!(matches!(
            reference_plant(&SimConstants::default(), &params),
            Err(crate::SimError::Material(_))
        ));
    }
}
