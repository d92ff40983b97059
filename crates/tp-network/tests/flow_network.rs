//! Integration tests for tp-network.

use tp_core::numeric::{le_within, Tolerances};
use tp_core::SimConstants;
use tp_materials::{Material, MaterialLibrary};
use tp_network::{gate, ChamberNetwork, ChamberState};

#[test]
fn ring_of_chambers_conserves_mass() {
    // Build: a -> b -> c -> a
    let c = SimConstants::default();
    let lib = MaterialLibrary::standard(&c).unwrap();
    let n2 = lib.require("nitrogen").unwrap();

    let mut net = ChamberNetwork::new();
    let a = net.add_chamber("a", 2.0).unwrap();
    let b = net.add_chamber("b", 1.0).unwrap();
    let d = net.add_chamber("c", 0.5).unwrap();
    net.set_routes(a, Some(b), None).unwrap();
    net.set_routes(b, Some(d), None).unwrap();
    net.set_routes(d, Some(a), None).unwrap();
    net.validate().unwrap();

    net.charge(a, Material::new(n2.clone(), 0.4, 294.0, 1.0), &c)
        .unwrap();
    net.charge(b, Material::new(n2, 0.2, 294.0, 1.0), &c).unwrap();

    let tol = Tolerances::default();
    for _ in 0..50 {
        for id in [a, b, d] {
            net.flush(id, &c);
        }
        let total: f64 = net.iter().map(|ch| ch.mass_kg()).sum();
        assert!((total - 0.6).abs() < 1e-12, "mass drifted: {total}");
        for ch in net.iter() {
            assert!(le_within(ch.occupied_volume_m3(), ch.max_volume_m3(), tol));
        }
    }
}

#[test]
fn backpressure_then_drain() {
    let c = SimConstants::default();
    let lib = MaterialLibrary::standard(&c).unwrap();
    let n2 = lib.require("nitrogen").unwrap();

    let mut net = ChamberNetwork::new();
    let tank = net.add_chamber("tank", 10.0).unwrap();
    let small = net.add_chamber("small", 0.1).unwrap();

    // Fill the small chamber to the brim: 0.1 m³ at ambient.
    net.charge(small, Material::new(n2.clone(), 0.1165, 294.0, 1.0), &c)
        .unwrap();
    assert_eq!(net.chamber(small).unwrap().state(), ChamberState::Full);

    let mut slot = Some(Material::new(n2, 0.01, 294.0, 1.0));
    for _ in 0..10 {
        assert!(!net.push(small, 0.01 / 1.165, &mut slot, &c));
        assert!(slot.is_some());
    }
    assert!((net.chamber(small).unwrap().mass_kg() - 0.1165).abs() < 1e-12);

    // External drain.
    let drained = gate::pull(net.chamber_mut(small).unwrap(), 0.05).unwrap();
    net.charge(tank, drained, &c).unwrap();

    assert!(net.push(small, 0.01 / 1.165, &mut slot, &c));
    assert!(slot.is_none());
    let total = net.chamber(small).unwrap().mass_kg() + net.chamber(tank).unwrap().mass_kg();
    assert!((total - 0.1265).abs() < 1e-12);
}
