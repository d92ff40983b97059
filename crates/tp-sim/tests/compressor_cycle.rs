//! Motor-driven compression cycles through the public builder API.

use tp_components::{Battery, Coil, Magnet, Rotor, Wire};
use tp_core::units::{m, ohms, volts, ATM_TO_PA};
use tp_core::{ChamberId, CouplingId, MachineId, SimConstants};
use tp_materials::{Material, MaterialLibrary};
use tp_sim::{
    Compressor, CompressorSpec, CompressorState, Motor, PlantBuilder, Simulator,
};

const LEVER_M: f64 = 1e-3;
const CYCLE_TICK_LIMIT: usize = 2_000_000;

struct Rig {
    sim: Simulator,
    intake: ChamberId,
    output: ChamberId,
    motor: MachineId,
    compressor: MachineId,
}

fn reference_motor(lib: &MaterialLibrary, coupling: CouplingId, c: &SimConstants) -> Motor {
    let wire = Wire::new(lib.require("copper").unwrap(), m(0.001), m(60.0), c).unwrap();
    let coil = Coil::new(wire, None, Some(0.004)).unwrap();
    let magnet = Magnet::new(lib.require("iron").unwrap());
    let rotor = Rotor::new(lib.require("iron").unwrap(), m(0.02), m(0.05), c).unwrap();
    let battery = Battery::new(volts(8.0), ohms(0.04)).unwrap();
    Motor::new(coil, magnet, rotor, battery, coupling, c.ambient_temperature_k).unwrap()
}

fn rig(output_m3: f64) -> Rig {
    let c = SimConstants::default();
    let lib = MaterialLibrary::standard(&c).unwrap();
    let mut b = PlantBuilder::new(c.clone());
    let intake = b.add_chamber("intake", 10.0).unwrap();
    let output = b.add_chamber("output", output_m3).unwrap();
    b.charge(
        intake,
        Material::new(lib.require("nitrogen").unwrap(), 1.0, 294.0, 1.0),
    )
    .unwrap();
    let coupling = b.add_coupling(LEVER_M).unwrap();
    let motor = b.register(reference_motor(&lib, coupling, &c));
    let compressor = b.register(
        Compressor::new(CompressorSpec::default(), intake, output, coupling).unwrap(),
    );
    Rig {
        sim: b.build().unwrap(),
        intake,
        output,
        motor,
        compressor,
    }
}

impl Rig {
    fn compressor(&self) -> &Compressor {
        self.sim.compressor(self.compressor).unwrap()
    }

    fn run_until(&mut self, mut done: impl FnMut(&Rig) -> bool) {
        for _ in 0..CYCLE_TICK_LIMIT {
            self.sim.step();
            if done(self) {
                return;
            }
        }
        panic!("condition not reached in {CYCLE_TICK_LIMIT} ticks");
    }

    fn total_nitrogen(&self) -> f64 {
        let held = self.compressor().gas().map_or(0.0, Material::mass_kg);
        self.sim.chambers().iter().map(|c| c.mass_kg()).sum::<f64>() + held
    }
}

#[test]
fn stroke_ends_at_torque_limited_stall_pressure() {
    let mut rig = rig(0.1);
    rig.run_until(|r| r.compressor().state() == CompressorState::Done);

    let max_torque = rig.sim.motor(rig.motor).unwrap().max_torque_nm();
    let spec = CompressorSpec::default();
    let stall_p = 1.0 + 0.995 * max_torque / (ATM_TO_PA * spec.piston_area_m2 * LEVER_M);

    let comp = rig.compressor();
    let p = comp.pressure_atm();
    assert!(p >= stall_p, "done below stall pressure: {p} < {stall_p}");
    assert!((p - stall_p) / stall_p < 0.01, "done far past stall: {p} vs {stall_p}");
    assert!((p - 3.07).abs() < 0.05, "p = {p}");

    let v = comp.volume_m3();
    let closed_form = (spec.initial_volume_m3 / v).powf(1.66);
    assert!((p - closed_form).abs() < 1e-9);
    assert!((comp.temperature_k() - p * v / spec.initial_volume_m3 * 294.0).abs() < 1e-9);
}

#[test]
fn each_cycle_pushes_exactly_once() {
    let mut rig = rig(0.1);
    let batch = 0.02 * 1.165;
    let start = rig.total_nitrogen();

    rig.run_until(|r| r.compressor().state() == CompressorState::Done);
    let (p_done, v_done) = (rig.compressor().pressure_atm(), rig.compressor().volume_m3());
    rig.run_until(|r| r.compressor().completed_cycles() == 1);

    let out = rig.sim.chambers().chamber(rig.output).unwrap();
    assert!((out.mass_kg() - batch).abs() < 1e-12);
    assert_eq!(out.pressure_atm(), Some(p_done));
    assert!((out.occupied_volume_m3() - v_done).abs() < 1e-12);
    assert_eq!(rig.compressor().state(), CompressorState::Ready);

    rig.run_until(|r| r.compressor().completed_cycles() == 2);
    let out = rig.sim.chambers().chamber(rig.output).unwrap();
    assert!((out.mass_kg() - 2.0 * batch).abs() < 1e-12);
    assert!((rig.total_nitrogen() - start).abs() < 1e-12);

    let intake = rig.sim.chambers().chamber(rig.intake).unwrap();
    assert!((intake.mass_kg() - (1.0 - 2.0 * batch)).abs() < 1e-12);
}

#[test]
fn full_output_backpressures_without_losing_gas() {
    // Room for one compressed batch only.
    let mut rig = rig(0.015);
    let start = rig.total_nitrogen();
    rig.run_until(|r| r.compressor().completed_cycles() == 1);
    rig.run_until(|r| r.compressor().state() == CompressorState::Done);

    let held = rig.compressor().gas().map(Material::mass_kg);
    let out_mass = rig.sim.chambers().chamber(rig.output).unwrap().mass_kg();
    for _ in 0..1_000 {
        rig.sim.step();
        assert_eq!(rig.compressor().state(), CompressorState::Done);
        assert_eq!(rig.compressor().gas().map(Material::mass_kg), held);
        assert_eq!(rig.sim.chambers().chamber(rig.output).unwrap().mass_kg(), out_mass);
        assert!((rig.total_nitrogen() - start).abs() < 1e-12);
    }
    assert_eq!(rig.compressor().completed_cycles(), 1);

    // Drain by hand; the waiting batch goes through on the next tick.
    let output = rig.output;
    let occupied = rig.sim.chambers().chamber(output).unwrap().occupied_volume_m3();
    let drained = rig.sim.chambers_mut().pull(output, occupied).unwrap();
    rig.sim.step();
    assert_eq!(rig.compressor().completed_cycles(), 2);
    assert_eq!(rig.compressor().state(), CompressorState::Ready);
    let total = rig.total_nitrogen() + drained.mass_kg();
    assert!((total - start).abs() < 1e-12);
}
