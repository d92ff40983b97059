//! Incremental plant builder.

use tp_core::{ChamberId, CouplingId, MachineId, SimConstants};
use tp_materials::Material;
use tp_network::ChamberNetwork;

use crate::coupling::RotationalForce;
use crate::error::{SimError, SimResult};
use crate::machine::{Machine, MachineKind};
use crate::simulator::Simulator;

/// Builder for assembling a plant.
///
/// Add chambers, routes, initial charges, couplings and machines, then call
/// `build()` to validate the wiring and freeze it into a [`Simulator`].
/// Machines step in the order they were registered.
#[derive(Debug)]
pub struct PlantBuilder {
    constants: SimConstants,
    chambers: ChamberNetwork,
    couplings: Vec<RotationalForce>,
    machines: Vec<Machine>,
}

impl PlantBuilder {
    pub fn new(constants: SimConstants) -> Self {
        Self {
            constants,
            chambers: ChamberNetwork::new(),
            couplings: Vec::new(),
            machines: Vec::new(),
        }
    }

    pub fn constants(&self) -> &SimConstants {
        &self.constants
    }

    /// Add an empty chamber and return its handle.
    pub fn add_chamber(&mut self, name: impl Into<String>, max_volume_m3: f64) -> SimResult<ChamberId> {
        Ok(self.chambers.add_chamber(name, max_volume_m3)?)
    }

    /// Set where `from` flushes to. The alternate is taken above 50 atm.
    pub fn route(
        &mut self,
        from: ChamberId,
        primary: ChamberId,
        alternate: Option<ChamberId>,
    ) -> SimResult<()> {
        Ok(self.chambers.set_routes(from, Some(primary), alternate)?)
    }

    /// Place an initial charge. A charge the chamber refuses is an error.
    pub fn charge(&mut self, id: ChamberId, material: Material) -> SimResult<()> {
        Ok(self.chambers.charge(id, material, &self.constants)?)
    }

    /// Add a coupling at rest and return its handle.
    pub fn add_coupling(&mut self, lever_arm_m: f64) -> SimResult<CouplingId> {
        let id = CouplingId::from_index(self.couplings.len() as u32);
        self.couplings.push(RotationalForce::new(lever_arm_m)?);
        Ok(id)
    }

    /// Append a machine to the step order.
    pub fn register(&mut self, machine: impl Into<Machine>) -> MachineId {
        let id = MachineId::from_index(self.machines.len() as u32);
        self.machines.push(machine.into());
        id
    }

    /// Append a chamber flush to the step order.
    pub fn register_chamber(&mut self, chamber: ChamberId) -> MachineId {
        self.register(Machine::Chamber(chamber))
    }

    /// Validate the wiring and build the simulator.
    ///
    /// Checks that every chamber and coupling a machine references exists,
    /// that routes are sound, and that each coupling joins exactly one motor
    /// to exactly one compressor. Each motor's stall torque is published on
    /// its coupling before the first tick.
    pub fn build(self) -> SimResult<Simulator> {
        let Self {
            constants,
            chambers,
            mut couplings,
            machines,
        } = self;

        chambers.validate()?;

        let mut drivers = vec![0_usize; couplings.len()];
        let mut driven = vec![0_usize; couplings.len()];
        for (i, machine) in machines.iter().enumerate() {
            let id = MachineId::from_index(i as u32);
            for chamber in machine.chamber_refs() {
                if !chambers.contains(chamber) {
                    return Err(SimError::UnknownChamber { machine: id, chamber });
                }
            }
            if let Some(coupling) = machine.coupling_ref() {
                let slot = coupling.slot();
                if slot >= couplings.len() {
                    return Err(SimError::UnknownCoupling { coupling });
                }
                match machine.kind() {
                    MachineKind::Motor => drivers[slot] += 1,
                    MachineKind::Compressor => driven[slot] += 1,
                    _ => {}
                }
            }
        }

        for (slot, (&d, &n)) in drivers.iter().zip(&driven).enumerate() {
            let coupling = CouplingId::from_index(slot as u32);
            let what = match (d, n) {
                (1, 1) => continue,
                (0, _) => "no driving motor",
                (_, 0) => "no driven compressor",
                (d, _) if d > 1 => "more than one driving motor",
                _ => "more than one driven compressor",
            };
            return Err(SimError::CouplingWiring { coupling, what });
        }

        for machine in &machines {
            if let Machine::Motor(motor) = machine {
                if let Some(coupling) = couplings.get_mut(motor.coupling().slot()) {
                    coupling.publish_driver_max_torque(motor.max_torque_nm());
                }
            }
        }

        Ok(Simulator::from_parts(constants, chambers, couplings, machines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compressor::{Compressor, CompressorSpec};
    use crate::motor::tests::motor;

    fn constants() -> SimConstants {
        SimConstants::default()
    }

    fn compressor(input: ChamberId, output: ChamberId, coupling: CouplingId) -> Compressor {
        Compressor::new(CompressorSpec::default(), input, output, coupling).unwrap()
    }

    #[test]
    fn empty_builder_builds() {
        let sim = PlantBuilder::new(constants()).build().unwrap();
        assert_eq!(sim.machines().count(), 0);
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn unknown_chamber_rejected() {
        let mut b = PlantBuilder::new(constants());
        let a = b.add_chamber("a", 1.0).unwrap();
        let ghost = ChamberId::from_index(9);
        let coupling = b.add_coupling(1e-3).unwrap();
        b.register(motor(&constants(), 0.001, 60.0, (None, Some(0.004)), 8.0));
        let id = b.register(compressor(a, ghost, coupling));
        assert_eq!(
            b.build().unwrap_err(),
            SimError::UnknownChamber {
                machine: id,
                chamber: ghost
            }
        );
    }

    #[test]
    fn unknown_coupling_rejected() {
        let mut b = PlantBuilder::new(constants());
        let ghost = CouplingId::from_index(3);
        b.register(motor(&constants(), 0.001, 60.0, (None, Some(0.004)), 8.0).with_coupling(ghost));
        assert_eq!(
            b.build().unwrap_err(),
            SimError::UnknownCoupling { coupling: ghost }
        );
    }

    #[test]
    fn coupling_needs_motor_and_compressor() {
        let mut b = PlantBuilder::new(constants());
        let a = b.add_chamber("a", 1.0).unwrap();
        let out = b.add_chamber("out", 1.0).unwrap();
        let coupling = b.add_coupling(1e-3).unwrap();
        b.register(compressor(a, out, coupling));
        assert!(matches!(
            b.build(),
            Err(SimError::CouplingWiring {
                what: "no driving motor",
                ..
            })
        ));

        let mut b = PlantBuilder::new(constants());
        let coupling = b.add_coupling(1e-3).unwrap();
        b.register(motor(&constants(), 0.001, 60.0, (None, Some(0.004)), 8.0).with_coupling(coupling));
        assert!(matches!(
            b.build(),
            Err(SimError::CouplingWiring {
                what: "no driven compressor",
                ..
            })
        ));
    }

    #[test]
    fn two_motors_on_one_coupling_rejected() {
        let mut b = PlantBuilder::new(constants());
        let a = b.add_chamber("a", 1.0).unwrap();
        let out = b.add_chamber("out", 1.0).unwrap();
        let coupling = b.add_coupling(1e-3).unwrap();
        for _ in 0..2 {
            b.register(motor(&constants(), 0.001, 60.0, (None, Some(0.004)), 8.0));
        }
        b.register(compressor(a, out, coupling));
        assert!(matches!(
            b.build(),
            Err(SimError::CouplingWiring {
                what: "more than one driving motor",
                ..
            })
        ));
    }

    #[test]
    fn self_route_rejected() {
        let mut b = PlantBuilder::new(constants());
        let a = b.add_chamber("a", 1.0).unwrap();
        assert!(matches!(b.route(a, a, None), Err(SimError::Network(_))));
    }

    #[test]
    fn build_publishes_stall_torque() {
        let mut b = PlantBuilder::new(constants());
        let a = b.add_chamber("a", 1.0).unwrap();
        let out = b.add_chamber("out", 1.0).unwrap();
        let coupling = b.add_coupling(1e-3).unwrap();
        let m = motor(&constants(), 0.001, 60.0, (None, Some(0.004)), 8.0);
        let expected = m.max_torque_nm();
        b.register(m);
        b.register(compressor(a, out, coupling));
        let sim = b.build().unwrap();
        assert_eq!(
            sim.coupling(coupling).unwrap().driver_max_torque_nm(),
            Some(expected)
        );
    }
}
