//! Expansion chamber that condenses part of a gas batch to liquid.

use tp_components::Vessel;
use tp_core::ChamberId;
use tp_materials::{thermo, Material, Phase};
use tracing::debug;

use crate::machine::StepContext;

/// Equalization ends once the temperature gap shrinks to this share of where it started.
pub const EQUALIZATION_THRESHOLD_RATIO: f64 = 0.2;
/// Condensate is created this far below the boiling point [K].
pub const LIQUID_THRESHOLD_K: f64 = 1e-5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ExpanderState {
    Ready,
    ExpandingGas,
    EqualizingBefore,
    Condensing,
    EqualizingAfter,
    Done,
}

/// Chambers an expander is plumbed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpanderPorts {
    pub input: ChamberId,
    pub gas_out: ChamberId,
    pub liquid_out: ChamberId,
}

/// Expands a pressurized gas batch to ambient pressure inside a vessel,
/// lets it equalize with the vessel wall, and condenses what the wall can
/// hold below the boiling point.
///
/// ```text
/// V_pull = V_cap / (P_in/P_amb)^(1/γ)
/// T      = (P_amb·V_cap)/(P_in·V_pull) · T_in
/// m_liq  = c·m·(T_bp − T) / L_v
/// ```
#[derive(Debug)]
pub struct Expander {
    vessel: Vessel,
    ports: ExpanderPorts,
    state: ExpanderState,
    gas: Option<Material>,
    liquid: Option<Material>,

    volume_to_pull_m3: f64,
    gas_temperature_k: f64,
    gas_temperature_at_pull_k: f64,
    vessel_temperature_at_pull_k: f64,
    vessel_temperature_at_condense_k: f64,
}

impl Expander {
    /// The vessel's current wall temperature seeds the temperature history.
    pub fn new(vessel: Vessel, ports: ExpanderPorts) -> Self {
        let ambient = vessel.temperature_k();
        Self {
            vessel,
            ports,
            state: ExpanderState::Ready,
            gas: None,
            liquid: None,
            volume_to_pull_m3: 0.0,
            gas_temperature_k: ambient,
            gas_temperature_at_pull_k: ambient,
            vessel_temperature_at_pull_k: ambient,
            vessel_temperature_at_condense_k: ambient,
        }
    }

    pub fn step(&mut self, ctx: &mut StepContext<'_>) {
        if matches!(
            self.state,
            ExpanderState::Ready | ExpanderState::EqualizingAfter | ExpanderState::Done
        ) {
            self.push_gas(ctx);
        }

        match self.state {
            ExpanderState::Ready => self.pull(ctx),
            ExpanderState::ExpandingGas => self.expand(ctx),
            ExpanderState::EqualizingBefore => self.equalize_before(ctx),
            ExpanderState::Condensing => self.condense(ctx),
            ExpanderState::EqualizingAfter => self.equalize_after(ctx),
            ExpanderState::Done => {
                let pushed = match self.liquid.as_ref().map(thermo::volume) {
                    Some(volume) => ctx.chambers.push(
                        self.ports.liquid_out,
                        volume,
                        &mut self.liquid,
                        ctx.constants,
                    ),
                    None => true,
                };
                if pushed {
                    self.liquid = None;
                    self.transition(ExpanderState::Ready);
                }
            }
        }
    }

    fn transition(&mut self, next: ExpanderState) {
        debug!(from = ?self.state, to = ?next, "expander state change");
        self.state = next;
    }

    fn pull(&mut self, ctx: &mut StepContext<'_>) {
        if self.gas.is_some() {
            return;
        }
        let Some(input_pressure) = ctx
            .chambers
            .get(self.ports.input)
            .and_then(|c| c.pressure_atm())
        else {
            return;
        };
        self.volume_to_pull_m3 = thermo::adiabatic_volume(
            self.vessel.capacity_m3(),
            ctx.constants.ambient_pressure_atm,
            input_pressure,
            ctx.constants,
        );
        if let Some(gas) = ctx.chambers.pull(self.ports.input, self.volume_to_pull_m3) {
            self.gas = Some(gas);
            self.transition(ExpanderState::ExpandingGas);
        }
    }

    fn expand(&mut self, ctx: &mut StepContext<'_>) {
        let Some(gas) = self.gas.as_mut() else {
            self.transition(ExpanderState::Ready);
            return;
        };
        let ambient_p = ctx.constants.ambient_pressure_atm;
        self.gas_temperature_k = thermo::adiabatic_temperature(
            gas.temperature_k(),
            gas.pressure_atm(),
            self.volume_to_pull_m3,
            ambient_p,
            self.vessel.capacity_m3(),
        );
        gas.set_pressure(ambient_p);
        gas.set_temperature(self.gas_temperature_k);
        self.gas_temperature_at_pull_k = self.gas_temperature_k;
        self.vessel_temperature_at_pull_k = self.vessel.temperature_k();
        self.transition(ExpanderState::EqualizingBefore);
    }

    fn equalize_before(&mut self, ctx: &mut StepContext<'_>) {
        let Some(gas) = self.gas.as_mut() else {
            self.transition(ExpanderState::Ready);
            return;
        };
        let area = self.vessel.contact_area_m2();
        thermo::exchange_heat(self.vessel.wall_mut(), gas, area, ctx.constants.tick_s);
        self.gas_temperature_k = gas.temperature_k();

        let bp = gas.kind().boiling_point_k();
        let t_v = self.vessel.temperature_k();
        let gap = (t_v - self.gas_temperature_k).abs();
        let threshold = EQUALIZATION_THRESHOLD_RATIO
            * (self.vessel_temperature_at_pull_k - self.gas_temperature_at_pull_k).abs();
        if gap <= threshold && (self.gas_temperature_k > bp || t_v < bp) {
            self.transition(ExpanderState::Condensing);
        }
    }

    fn condense(&mut self, ctx: &mut StepContext<'_>) {
        let Some(gas) = self.gas.as_mut() else {
            self.transition(ExpanderState::Done);
            return;
        };
        let kind = gas.kind().clone();
        let bp = kind.boiling_point_k();

        let mut next = ExpanderState::Done;
        if self.vessel.temperature_k() < bp {
            let latent = kind.specific_heat() * gas.mass_kg() * (bp - self.gas_temperature_k);
            let liquid_mass = (latent / kind.latent_heat_vaporization()).min(gas.mass_kg());
            if liquid_mass > 0.0 {
                let mut liquid = thermo::split_off(gas, liquid_mass);
                liquid.set_temperature(bp - LIQUID_THRESHOLD_K);
                liquid.set_pressure(ctx.constants.ambient_pressure_atm);
                gas.set_temperature(bp);
                self.gas_temperature_k = bp;
                self.vessel_temperature_at_condense_k = self.vessel.temperature_k();
                debug!(liquid_kg = liquid.mass_kg(), "gas condensed");
                self.liquid = Some(liquid);
                next = ExpanderState::EqualizingAfter;
            }
        }
        if self.gas.as_ref().is_some_and(|g| g.mass_kg() <= 0.0) {
            self.gas = None;
        }
        self.transition(next);
        self.push_gas(ctx);
    }

    fn equalize_after(&mut self, ctx: &mut StepContext<'_>) {
        let Some(liquid) = self.liquid.as_mut() else {
            self.transition(ExpanderState::Done);
            return;
        };
        let area = self.vessel.contact_area_m2();
        thermo::exchange_heat(self.vessel.wall_mut(), liquid, area, ctx.constants.tick_s);

        let gap = (liquid.temperature_k() - self.vessel.temperature_k()).abs();
        let threshold = EQUALIZATION_THRESHOLD_RATIO
            * (liquid.kind().boiling_point_k() - self.vessel_temperature_at_condense_k).abs();
        if gap <= threshold {
            self.transition(ExpanderState::Done);
        }
    }

    /// Move residual gas downstream; kept for a later tick if it does not fit.
    fn push_gas(&mut self, ctx: &mut StepContext<'_>) {
        if let Some(volume) = self.gas.as_ref().map(thermo::volume) {
            ctx.chambers
                .push(self.ports.gas_out, volume, &mut self.gas, ctx.constants);
        }
    }

    pub fn ports(&self) -> ExpanderPorts {
        self.ports
    }

    pub fn vessel(&self) -> &Vessel {
        &self.vessel
    }

    pub fn state(&self) -> ExpanderState {
        self.state
    }

    pub fn gas(&self) -> Option<&Material> {
        self.gas.as_ref()
    }

    pub fn liquid(&self) -> Option<&Material> {
        self.liquid.as_ref()
    }

    /// Liquid volume currently held [m³].
    pub fn liquid_volume_m3(&self) -> f64 {
        self.liquid
            .as_ref()
            .filter(|l| l.phase() != Phase::Gas)
            .map_or(0.0, thermo::volume)
    }

    pub fn volume_to_pull_m3(&self) -> f64 {
        self.volume_to_pull_m3
    }

    pub fn gas_temperature_k(&self) -> f64 {
        self.gas_temperature_k
    }
}
