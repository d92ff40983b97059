//! Counter-flow heat exchanger: hot content inside a pipe, coolant outside.

use tp_components::Pipe;
use tp_core::ChamberId;
use tp_materials::{thermo, Material};
use tracing::{debug, warn};

use crate::error::SimResult;
use crate::machine::StepContext;

/// Content leaves once within this many kelvin of the coolant's intake temperature.
pub const FINAL_TEMPERATURE_DIFFERENCE_K: f64 = 10.0;
/// Coolant leaves once it has warmed to this temperature [K].
pub const CRITICAL_COOLANT_TEMPERATURE_K: f64 = 303.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StreamState {
    Empty,
    TransferringHeat,
}

/// Chambers a heat exchanger is plumbed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeatExchangerPorts {
    pub content_in: ChamberId,
    pub content_out: ChamberId,
    pub coolant_in: ChamberId,
    pub coolant_out: ChamberId,
}

/// One batch of content (the pipe's capacity) and one batch of coolant
/// exchange heat through the pipe wall until each is ready to leave.
///
/// The two streams pull and push independently. Heat only flows while both
/// are present.
#[derive(Debug)]
pub struct HeatExchanger {
    pipe: Pipe,
    ports: HeatExchangerPorts,
    content_volume_m3: f64,
    coolant_volume_m3: f64,

    content_state: StreamState,
    coolant_state: StreamState,
    content: Option<Material>,
    coolant: Option<Material>,
    coolant_intake_temperature_k: f64,
    overpressure_reported: bool,
}

impl HeatExchanger {
    /// # Errors
    /// Returns error if the coolant batch volume is not positive.
    pub fn new(pipe: Pipe, coolant_volume_m3: f64, ports: HeatExchangerPorts) -> SimResult<Self> {
        tp_core::numeric::ensure_positive(coolant_volume_m3, "coolant batch volume")?;
        Ok(Self {
            content_volume_m3: pipe.capacity_m3(),
            pipe,
            ports,
            coolant_volume_m3,
            content_state: StreamState::Empty,
            coolant_state: StreamState::Empty,
            content: None,
            coolant: None,
            coolant_intake_temperature_k: 0.0,
            overpressure_reported: false,
        })
    }

    pub fn step(&mut self, ctx: &mut StepContext<'_>) {
        if self.content_state == StreamState::Empty {
            self.pull_content(ctx);
        }
        if self.coolant_state == StreamState::Empty {
            self.pull_coolant(ctx);
        }
        let both = self.content_state == StreamState::TransferringHeat
            && self.coolant_state == StreamState::TransferringHeat;
        if both {
            self.exchange(ctx.constants.tick_s);
        }

        // Content only leaves against a coolant batch; warm coolant leaves on its own.
        let release_content = both
            && self.content.as_ref().is_some_and(|m| {
                m.temperature_k()
                    <= self.coolant_intake_temperature_k + FINAL_TEMPERATURE_DIFFERENCE_K
            });
        if release_content
            && ctx.chambers.push(
                self.ports.content_out,
                self.content_volume_m3,
                &mut self.content,
                ctx.constants,
            )
        {
            self.content_state = StreamState::Empty;
            debug!("heat exchanger content released");
        }

        let release_coolant = self
            .coolant
            .as_ref()
            .is_some_and(|m| m.temperature_k() >= CRITICAL_COOLANT_TEMPERATURE_K);
        if release_coolant
            && ctx.chambers.push(
                self.ports.coolant_out,
                self.coolant_volume_m3,
                &mut self.coolant,
                ctx.constants,
            )
        {
            self.coolant_state = StreamState::Empty;
            debug!("heat exchanger coolant released");
        }
    }

    fn pull_content(&mut self, ctx: &mut StepContext<'_>) {
        if let Some(content) = ctx.chambers.pull(self.ports.content_in, self.content_volume_m3) {
            debug!(
                pressure_atm = content.pressure_atm(),
                temperature_k = content.temperature_k(),
                "heat exchanger content pulled"
            );
            self.content = Some(content);
            self.content_state = StreamState::TransferringHeat;
            self.overpressure_reported = false;
        }
    }

    fn pull_coolant(&mut self, ctx: &mut StepContext<'_>) {
        if let Some(coolant) = ctx.chambers.pull(self.ports.coolant_in, self.coolant_volume_m3) {
            self.coolant_intake_temperature_k = coolant.temperature_k();
            debug!(temperature_k = self.coolant_intake_temperature_k, "heat exchanger coolant pulled");
            self.coolant = Some(coolant);
            self.coolant_state = StreamState::TransferringHeat;
        }
    }

    fn exchange(&mut self, dt: f64) {
        let (Some(content), Some(coolant)) = (self.content.as_mut(), self.coolant.as_mut()) else {
            return;
        };
        let inner = self.pipe.inner_surface_m2();
        let outer = self.pipe.outer_surface_m2();

        thermo::exchange_heat(self.pipe.wall_mut(), content, inner, dt);
        thermo::pressure_from_temperature(content, self.content_volume_m3);
        thermo::exchange_heat(coolant, self.pipe.wall_mut(), outer, dt);

        let rated = self.pipe.rated_pressure_atm();
        if !self.overpressure_reported && content.pressure_atm() > rated {
            self.overpressure_reported = true;
            warn!(
                pressure_atm = content.pressure_atm(),
                rated_atm = rated,
                "heat exchanger content above pipe rating"
            );
        }
    }

    pub fn ports(&self) -> HeatExchangerPorts {
        self.ports
    }

    pub fn pipe(&self) -> &Pipe {
        &self.pipe
    }

    pub fn content_state(&self) -> StreamState {
        self.content_state
    }

    pub fn coolant_state(&self) -> StreamState {
        self.coolant_state
    }

    pub fn content(&self) -> Option<&Material> {
        self.content.as_ref()
    }

    pub fn coolant(&self) -> Option<&Material> {
        self.coolant.as_ref()
    }

    /// Content pressure while a batch is in the pipe.
    pub fn content_pressure_atm(&self) -> Option<f64> {
        self.content.as_ref().map(Material::pressure_atm)
    }

    pub fn content_volume_m3(&self) -> f64 {
        self.content_volume_m3
    }

    pub fn coolant_volume_m3(&self) -> f64 {
        self.coolant_volume_m3
    }

    pub fn coolant_intake_temperature_k(&self) -> f64 {
        self.coolant_intake_temperature_k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupling::RotationalForce;
    use tp_core::units::m;
    use tp_core::SimConstants;
    use tp_materials::MaterialLibrary;
    use tp_network::ChamberNetwork;

    struct Rig {
        c: SimConstants,
        lib: MaterialLibrary,
        chambers: ChamberNetwork,
        hx: HeatExchanger,
    }

    struct Setup {
        content_t: f64,
        content_p: f64,
        coolant_t: f64,
        coolant_batch_m3: f64,
        wall_t: Option<f64>,
    }

    impl Default for Setup {
        fn default() -> Self {
            Self {
                content_t: 400.0,
                content_p: 3.0,
                coolant_t: 294.0,
                coolant_batch_m3: 1.0,
                wall_t: None,
            }
        }
    }

    impl Rig {
        fn new(content_t: f64, content_p: f64) -> Self {
            Self::with(Setup {
                content_t,
                content_p,
                ..Setup::default()
            })
        }

        fn with(setup: Setup) -> Self {
            let c = SimConstants::default();
            let lib = MaterialLibrary::standard(&c).unwrap();
            let mut chambers = ChamberNetwork::new();
            let content_in = chambers.add_chamber("hot", 0.1).unwrap();
            let content_out = chambers.add_chamber("cooled", 0.1).unwrap();
            let coolant_in = chambers.add_chamber("coolant", 1000.0).unwrap();
            let coolant_out = chambers.add_chamber("warm coolant", 1000.0).unwrap();

            let n2 = lib.require("nitrogen").unwrap();
            let mut hot = Material::new(n2, 1.0, setup.content_t, setup.content_p);
            let hot_mass = thermo::mass_from_volume(&hot, 0.05);
            hot.set_mass(hot_mass);
            chambers.charge(content_in, hot, &c).unwrap();
            chambers
                .charge(
                    coolant_in,
                    Material::new(lib.require("water").unwrap(), 820_000.0, setup.coolant_t, 1.0),
                    &c,
                )
                .unwrap();

            let mut pipe =
                Pipe::new(lib.require("copper").unwrap(), m(0.01), m(0.003), m(100.0), &c)
                    .unwrap();
            if let Some(t) = setup.wall_t {
                pipe.wall_mut().set_temperature(t);
            }
            let hx = HeatExchanger::new(
                pipe,
                setup.coolant_batch_m3,
                HeatExchangerPorts {
                    content_in,
                    content_out,
                    coolant_in,
                    coolant_out,
                },
            )
            .unwrap();
            Self {
                c,
                lib,
                chambers,
                hx,
            }
        }

        fn step(&mut self) {
            let mut couplings: Vec<RotationalForce> = Vec::new();
            let mut ctx = StepContext {
                constants: &self.c,
                chambers: &mut self.chambers,
                couplings: &mut couplings,
            };
            self.hx.step(&mut ctx);
        }

        /// Fill `id` with `volume_m3` of `substance` at ambient conditions.
        fn occupy(&mut self, id: ChamberId, substance: &str, volume_m3: f64) {
            let mut filler = Material::new(self.lib.require(substance).unwrap(), 1.0, 294.0, 1.0);
            let mass = thermo::mass_from_volume(&filler, volume_m3);
            filler.set_mass(mass);
            self.chambers.charge(id, filler, &self.c).unwrap();
        }

        fn drain(&mut self, id: ChamberId) {
            let occupied = self.chambers.chamber(id).unwrap().occupied_volume_m3();
            self.chambers.pull(id, occupied).unwrap();
        }

        fn mass_in(&self, id: ChamberId) -> f64 {
            self.chambers.chamber(id).unwrap().mass_kg()
        }
    }

    #[test]
    fn pulls_both_streams() {
        let mut rig = Rig::new(400.0, 3.0);
        rig.step();
        assert_eq!(rig.hx.content_state(), StreamState::TransferringHeat);
        assert_eq!(rig.hx.coolant_state(), StreamState::TransferringHeat);
        let content = rig.hx.content().unwrap();
        let expected = 3.0 * rig.hx.content_volume_m3() / (content.kind().gas_constant() * 400.0);
        assert!((content.mass_kg() - expected).abs() < 1e-12);
        assert!((rig.hx.coolant().unwrap().mass_kg() - 1000.0).abs() < 1e-9);
        assert_eq!(rig.hx.coolant_intake_temperature_k(), 294.0);
    }

    #[test]
    fn hot_content_cools_and_is_released() {
        let mut rig = Rig::new(400.0, 3.0);
        let mut released = false;
        for _ in 0..200_000 {
            rig.step();
            if rig.hx.content_state() == StreamState::Empty {
                released = true;
                break;
            }
        }
        assert!(released);
        let out = rig.chambers.chamber(rig.hx.ports().content_out).unwrap();
        let t = out.temperature_k().unwrap();
        assert!(t <= 294.0 + FINAL_TEMPERATURE_DIFFERENCE_K);
        assert!(out.mass_kg() > 0.0);
    }

    #[test]
    fn cool_content_released_on_first_tick() {
        let mut rig = Rig::new(294.0, 3.0);
        rig.step();
        assert_eq!(rig.hx.content_state(), StreamState::Empty);
        assert!(rig.hx.content().is_none());
    }

    #[test]
    fn content_waits_for_coolant() {
        let mut rig = Rig::new(400.0, 3.0);
        let coolant_in = rig.hx.ports().coolant_in;
        let all = rig.chambers.chamber(coolant_in).unwrap().occupied_volume_m3();
        rig.chambers.pull(coolant_in, all).unwrap();
        for _ in 0..100 {
            rig.step();
        }
        assert_eq!(rig.hx.content_state(), StreamState::TransferringHeat);
        assert_eq!(rig.hx.coolant_state(), StreamState::Empty);
        assert_eq!(rig.hx.content().unwrap().temperature_k(), 400.0);
    }

    #[test]
    fn energy_is_conserved_across_wall() {
        let mut rig = Rig::new(400.0, 3.0);
        rig.step();
        let energy = |hx: &HeatExchanger| {
            let e = |m: &Material| m.mass_kg() * m.kind().specific_heat() * m.temperature_k();
            e(hx.content().unwrap()) + e(hx.coolant().unwrap()) + e(hx.pipe().wall())
        };
        let before = energy(&rig.hx);
        for _ in 0..50 {
            rig.step();
        }
        let after = energy(&rig.hx);
        assert!((before - after).abs() / before < 1e-9);
    }

    #[test]
    fn warm_coolant_leaves_while_content_stays() {
        let mut rig = Rig::with(Setup {
            content_t: 600.0,
            coolant_batch_m3: 1e-3,
            wall_t: Some(400.0),
            ..Setup::default()
        });
        let coolant_out = rig.hx.ports().coolant_out;
        let mut ticks = 0;
        while rig.mass_in(coolant_out) == 0.0 {
            rig.step();
            ticks += 1;
            assert!(ticks < 1_000, "coolant never released");
        }
        assert!(ticks > 1);

        let out = rig.chambers.chamber(coolant_out).unwrap();
        assert!(out.temperature_k().unwrap() >= CRITICAL_COOLANT_TEMPERATURE_K);
        assert!((out.mass_kg() - 1.0).abs() < 1e-9);
        assert_eq!(rig.hx.coolant_state(), StreamState::Empty);
        assert_eq!(rig.hx.content_state(), StreamState::TransferringHeat);

        rig.step();
        assert_eq!(rig.hx.coolant_state(), StreamState::TransferringHeat);
        assert_eq!(rig.hx.coolant_intake_temperature_k(), 294.0);
        assert!(rig.hx.coolant().unwrap().temperature_k() < CRITICAL_COOLANT_TEMPERATURE_K);
        assert_eq!(rig.hx.content_state(), StreamState::TransferringHeat);
    }

    #[test]
    fn blocked_content_is_held_until_room() {
        let mut rig = Rig::new(294.0, 3.0);
        let content_out = rig.hx.ports().content_out;
        let room = rig.hx.content_volume_m3() / 2.0;
        rig.occupy(content_out, "nitrogen", 0.1 - room);
        let resident = rig.mass_in(content_out);

        rig.step();
        let held = rig.hx.content().unwrap().mass_kg();
        for _ in 0..20 {
            rig.step();
            assert_eq!(rig.hx.content_state(), StreamState::TransferringHeat);
            assert_eq!(rig.hx.content().unwrap().mass_kg(), held);
            assert_eq!(rig.mass_in(content_out), resident);
        }

        rig.drain(content_out);
        rig.step();
        assert_eq!(rig.hx.content_state(), StreamState::Empty);
        assert!(rig.hx.content().is_none());
        assert_eq!(rig.mass_in(content_out), held);
    }

    #[test]
    fn warm_coolant_retries_without_content() {
        let mut rig = Rig::with(Setup {
            coolant_t: 310.0,
            ..Setup::default()
        });
        let content_in = rig.hx.ports().content_in;
        let coolant_out = rig.hx.ports().coolant_out;
        rig.drain(content_in);
        rig.occupy(coolant_out, "water", 999.5);
        let resident = rig.mass_in(coolant_out);

        for _ in 0..20 {
            rig.step();
            assert_eq!(rig.hx.content_state(), StreamState::Empty);
            assert_eq!(rig.hx.coolant_state(), StreamState::TransferringHeat);
            let coolant = rig.hx.coolant().unwrap();
            assert!((coolant.mass_kg() - 1000.0).abs() < 1e-9);
            assert_eq!(coolant.temperature_k(), 310.0);
            assert_eq!(rig.mass_in(coolant_out), resident);
        }

        rig.drain(coolant_out);
        rig.step();
        assert_eq!(rig.hx.coolant_state(), StreamState::Empty);
        assert!((rig.mass_in(coolant_out) - 1000.0).abs() < 1e-9);
    }
}
