//! Piston compressor loaded through a rotational coupling.

use tp_core::numeric::ensure_positive;
use tp_core::units::ATM_TO_PA;
use tp_core::{ChamberId, CouplingId};
use tp_materials::{thermo, Material};
use tracing::debug;

use crate::error::SimResult;
use crate::machine::StepContext;

/// Fraction of the driver's maximum torque at which a stroke is complete.
pub const MAX_LOAD_TORQUE_RATIO: f64 = 0.995;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CompressorState {
    Ready,
    Running,
    Done,
}

/// Cylinder and piston geometry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompressorSpec {
    /// Cylinder volume at the start of a stroke [m³].
    pub initial_volume_m3: f64,
    pub initial_pressure_atm: f64,
    pub initial_temperature_k: f64,
    pub piston_area_m2: f64,
    pub piston_mass_kg: f64,
    /// Pressure on the back of the piston [atm].
    pub external_pressure_atm: f64,
}

impl Default for CompressorSpec {
    fn default() -> Self {
        Self {
            initial_volume_m3: 0.02,
            initial_pressure_atm: 1.0,
            initial_temperature_k: 294.0,
            piston_area_m2: 0.02,
            piston_mass_kg: 1.0,
            external_pressure_atm: 1.0,
        }
    }
}

/// Single-acting piston compressor.
///
/// Each cycle pulls one cylinder of gas, compresses it adiabatically while
/// the piston is driven through the coupling, and pushes it out once the
/// reaction torque reaches the driver's stall limit.
///
/// ```text
/// x  += ω·lever·dt            V = V0 − x·A
/// τ   = (P_prev − P_ext)·101325·A·lever
/// P   = P0·(V0/V)^γ           T = (P·V)/(P0·V0)·T0
/// ```
#[derive(Debug)]
pub struct Compressor {
    spec: CompressorSpec,
    input: ChamberId,
    output: ChamberId,
    coupling: CouplingId,
    state: CompressorState,
    gas: Option<Material>,

    p0_atm: f64,
    t0_k: f64,
    pressure_atm: f64,
    volume_m3: f64,
    temperature_k: f64,
    piston_velocity_m_s: f64,
    piston_displacement_m: f64,
    force_n: f64,
    cycles: u64,
}

impl Compressor {
    /// # Errors
    /// Returns error if any geometry or initial condition is not positive.
    pub fn new(
        spec: CompressorSpec,
        input: ChamberId,
        output: ChamberId,
        coupling: CouplingId,
    ) -> SimResult<Self> {
        ensure_positive(spec.initial_volume_m3, "compressor initial volume")?;
        ensure_positive(spec.initial_pressure_atm, "compressor initial pressure")?;
        ensure_positive(spec.initial_temperature_k, "compressor initial temperature")?;
        ensure_positive(spec.piston_area_m2, "piston area")?;
        ensure_positive(spec.piston_mass_kg, "piston mass")?;
        ensure_positive(spec.external_pressure_atm, "external pressure")?;
        Ok(Self {
            input,
            output,
            coupling,
            state: CompressorState::Ready,
            gas: None,
            p0_atm: spec.initial_pressure_atm,
            t0_k: spec.initial_temperature_k,
            pressure_atm: spec.external_pressure_atm,
            volume_m3: spec.initial_volume_m3,
            temperature_k: spec.initial_temperature_k,
            piston_velocity_m_s: 0.0,
            piston_displacement_m: 0.0,
            force_n: 0.0,
            cycles: 0,
            spec,
        })
    }

    pub fn step(&mut self, ctx: &mut StepContext<'_>) {
        match self.state {
            CompressorState::Ready => self.pull(ctx),
            CompressorState::Running => {
                self.compress(ctx);
                if self.stroke_complete(ctx) {
                    self.state = CompressorState::Done;
                    debug!(
                        pressure_atm = self.pressure_atm,
                        volume_m3 = self.volume_m3,
                        "compression stroke done"
                    );
                }
            }
            CompressorState::Done => self.push(ctx),
        }
    }

    fn pull(&mut self, ctx: &mut StepContext<'_>) {
        let Some(gas) = ctx.chambers.pull(self.input, self.spec.initial_volume_m3) else {
            return;
        };
        self.t0_k = gas.temperature_k();
        self.p0_atm = gas.pressure_atm();
        self.temperature_k = self.t0_k;
        self.gas = Some(gas);
        self.state = CompressorState::Running;
        debug!(p0_atm = self.p0_atm, t0_k = self.t0_k, "compression cycle started");
    }

    fn compress(&mut self, ctx: &mut StepContext<'_>) {
        let Some(coupling) = ctx.couplings.get_mut(self.coupling.slot()) else {
            return;
        };
        let dt = ctx.constants.tick_s;
        let area = self.spec.piston_area_m2;

        self.piston_velocity_m_s = coupling.linear_velocity_m_s();
        self.piston_displacement_m += self.piston_velocity_m_s * dt;
        self.volume_m3 = self.spec.initial_volume_m3 - self.piston_displacement_m * area;

        // Load from the pressure reached on the previous tick.
        self.force_n = (self.pressure_atm - self.spec.external_pressure_atm) * ATM_TO_PA * area;
        coupling.set_torque_nm(self.force_n * coupling.lever_arm_m());

        self.pressure_atm = thermo::adiabatic_pressure(
            self.p0_atm,
            self.spec.initial_volume_m3,
            self.volume_m3,
            ctx.constants,
        );
        self.temperature_k = thermo::adiabatic_temperature(
            self.t0_k,
            self.p0_atm,
            self.spec.initial_volume_m3,
            self.pressure_atm,
            self.volume_m3,
        );
    }

    fn stroke_complete(&self, ctx: &StepContext<'_>) -> bool {
        let Some(coupling) = ctx.couplings.get(self.coupling.slot()) else {
            return false;
        };
        match coupling.driver_max_torque_nm() {
            Some(max) => coupling.torque_nm() >= max * MAX_LOAD_TORQUE_RATIO,
            None => false,
        }
    }

    fn push(&mut self, ctx: &mut StepContext<'_>) {
        if let Some(gas) = self.gas.as_mut() {
            gas.set_temperature(self.temperature_k);
            gas.set_pressure(self.pressure_atm);
        }
        if !ctx
            .chambers
            .push(self.output, self.volume_m3, &mut self.gas, ctx.constants)
        {
            return;
        }
        self.cycles += 1;
        debug!(cycles = self.cycles, "compressed gas delivered");
        self.reset(ctx);
    }

    fn reset(&mut self, ctx: &mut StepContext<'_>) {
        self.piston_displacement_m = 0.0;
        self.piston_velocity_m_s = 0.0;
        self.force_n = 0.0;
        if let Some(coupling) = ctx.couplings.get_mut(self.coupling.slot()) {
            coupling.set_torque_nm(0.0);
        }
        self.pressure_atm = self.spec.external_pressure_atm;
        self.volume_m3 = self.spec.initial_volume_m3;
        self.temperature_k = self.t0_k;
        self.gas = None;
        self.state = CompressorState::Ready;
    }

    pub fn spec(&self) -> &CompressorSpec {
        &self.spec
    }

    pub fn input(&self) -> ChamberId {
        self.input
    }

    pub fn output(&self) -> ChamberId {
        self.output
    }

    pub fn coupling(&self) -> CouplingId {
        self.coupling
    }

    pub fn state(&self) -> CompressorState {
        self.state
    }

    pub fn pressure_atm(&self) -> f64 {
        self.pressure_atm
    }

    pub fn volume_m3(&self) -> f64 {
        self.volume_m3
    }

    pub fn temperature_k(&self) -> f64 {
        self.temperature_k
    }

    pub fn piston_displacement_m(&self) -> f64 {
        self.piston_displacement_m
    }

    pub fn piston_velocity_m_s(&self) -> f64 {
        self.piston_velocity_m_s
    }

    /// Net pressure force on the piston [N].
    pub fn force_n(&self) -> f64 {
        self.force_n
    }

    pub fn completed_cycles(&self) -> u64 {
        self.cycles
    }

    pub fn gas(&self) -> Option<&Material> {
        self.gas.as_ref()
    }
}
