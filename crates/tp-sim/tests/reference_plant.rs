//! Whole-plant behaviour of the reference topology.

use tp_core::numeric::{le_within, Tolerances};
use tp_core::SimConstants;
use tp_sim::snapshot::MaterialSnapshot;
use tp_sim::{
    reference_plant, CompressorState, MachineDetail, MotorState, PlantSnapshot, ReferencePlant,
    ReferencePlantParams,
};
use uom::si::mass::kilogram;

fn plant() -> ReferencePlant {
    reference_plant(&SimConstants::default(), &ReferencePlantParams::default()).unwrap()
}

fn nitrogen_kg(snap: &PlantSnapshot) -> f64 {
    let n2 = |m: &Option<MaterialSnapshot>| {
        m.as_ref()
            .filter(|m| m.substance == "Nitrogen")
            .map_or(0.0, |m| m.mass.get::<kilogram>())
    };
    let in_chambers: f64 = snap.chambers.iter().map(|c| n2(&c.contents)).sum();
    let in_machines: f64 = snap
        .machines
        .iter()
        .map(|m| match &m.detail {
            MachineDetail::Compressor(c) => n2(&c.gas),
            MachineDetail::HeatExchanger(h) => n2(&h.content),
            MachineDetail::Expander(e) => n2(&e.gas) + n2(&e.liquid),
            _ => 0.0,
        })
        .sum();
    in_chambers + in_machines
}

#[test]
fn advance_runs_whole_ticks() {
    let mut p = plant();
    assert_eq!(p.sim.advance(0.01), 100);
    assert_eq!(p.sim.tick_count(), 100);
    assert!((p.sim.elapsed_s() - 0.01).abs() < 1e-12);

    assert_eq!(p.sim.advance(-1.0), 0);
    assert_eq!(p.sim.advance(f64::NAN), 0);
    assert_eq!(p.sim.advance(f64::INFINITY), 0);
    assert_eq!(p.sim.advance(0.5e-4), 0);
    assert_eq!(p.sim.tick_count(), 100);

    // Truncated, not rounded: 0.0003 s is just short of three ticks in f64.
    assert_eq!(p.sim.advance(0.0003), 2);
    p.sim.run_ticks(3);
    assert_eq!(p.sim.tick_count(), 105);
}

#[test]
fn plant_starts_compressing() {
    let mut p = plant();
    p.sim.advance(0.1);
    let comp = p.sim.compressor(p.handles.compressor).unwrap();
    assert_eq!(comp.state(), CompressorState::Running);
    assert!(comp.piston_displacement_m() > 0.0);
    assert!(comp.pressure_atm() >= 1.0);

    let motor = p.sim.motor(p.handles.motor).unwrap();
    assert_eq!(motor.state(), MotorState::Running);
    assert!(motor.angular_velocity_rad_s() > 0.0);
    let coupling = p.sim.coupling(p.handles.coupling).unwrap();
    assert_eq!(coupling.angular_velocity_rad_s(), motor.angular_velocity_rad_s());
    assert_eq!(coupling.driver_max_torque_nm(), Some(motor.max_torque_nm()));
}

#[test]
fn capacity_and_mass_hold_every_tick() {
    let mut p = plant();
    let tol = Tolerances::default();
    let start = nitrogen_kg(&p.sim.snapshot());
    assert!((start - 1.0).abs() < 1e-12);
    for _ in 0..20 {
        p.sim.advance(0.01);
        for ch in p.sim.chambers().iter() {
            assert!(
                le_within(ch.occupied_volume_m3(), ch.max_volume_m3(), tol),
                "{} over capacity",
                ch.name()
            );
        }
        let now = nitrogen_kg(&p.sim.snapshot());
        assert!((now - start).abs() < 1e-12, "nitrogen drifted to {now}");
    }
}

#[test]
fn identical_plants_stay_identical() {
    let mut a = plant();
    let mut b = plant();
    a.sim.advance(0.25);
    b.sim.advance(0.25);
    assert_eq!(a.sim.snapshot(), b.sim.snapshot());
}

#[test]
fn external_stop_holds_until_cleared() {
    let mut p = plant();
    p.sim.advance(0.05);
    p.sim.motor_mut(p.handles.motor).unwrap().stop_external();
    p.sim.advance(0.2);

    let motor = p.sim.motor(p.handles.motor).unwrap();
    assert_eq!(motor.state(), MotorState::StoppedExternal);
    assert_eq!(motor.input_voltage_v(), 0.0);
    assert!(motor.angular_velocity_rad_s().abs() < 1e-3);

    p.sim.motor_mut(p.handles.motor).unwrap().clear_external_stop();
    p.sim.advance(0.05);
    let motor = p.sim.motor(p.handles.motor).unwrap();
    assert_eq!(motor.state(), MotorState::Running);
    assert!(motor.angular_velocity_rad_s() > 1.0);
}

#[test]
fn snapshot_serializes_to_json() {
    let mut p = plant();
    p.sim.advance(0.01);
    let snap = p.sim.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"kind\":\"Motor\""));
    assert!(json.contains("intake"));
    let back: PlantSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.tick, snap.tick);
    assert_eq!(back.chambers.len(), snap.chambers.len());
}
