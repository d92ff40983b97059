//! DC motor driving a rotational coupling.

use tp_components::{Battery, Coil, Magnet, Rotor};
use tp_core::units::RADS_TO_RPM;
use tp_core::CouplingId;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::machine::StepContext;

/// Winding temperature above which a running motor cuts out [K].
pub const WIRE_TEMPERATURE_RATING_K: f64 = 1000.0;
/// Winding temperature at or below which a tripped motor restarts [K].
pub const RESTART_TEMPERATURE_K: f64 = 303.0;
/// Fraction of angular velocity kept each tick after bearing friction.
pub const ROTOR_FRICTION: f64 = 0.995;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MotorState {
    Running,
    /// Tripped on winding temperature; restarts by itself once cool.
    Stopped,
    /// Stopped from outside; only `clear_external_stop` restarts it.
    StoppedExternal,
}

/// Permanent-magnet DC motor.
///
/// Per tick, with B the magnet field, A the coil area and N the turns:
///
/// ```text
/// I   = (V − emf) / R
/// T_w += (I²R·dt − h·S·(T_w − T_amb)·dt) / (m_w·c_w)
/// τ   = N·I·A·B
/// ω   = min(ω + (τ − τ_load)/J·dt, ω_max) · 0.995
/// emf = B·A·N·ω
/// ```
#[derive(Debug)]
pub struct Motor {
    coil: Coil,
    rotor: Rotor,
    magnet: Magnet,
    coupling: CouplingId,
    state: MotorState,

    resistance_ohm: f64,
    max_voltage_v: f64,
    input_voltage_v: f64,
    max_omega_rad_s: f64,

    current_a: f64,
    back_emf_v: f64,
    torque_nm: f64,
    omega_rad_s: f64,
    angle_rad: f64,
    wire_temperature_k: f64,
}

impl Motor {
    /// Assemble a motor. The winding starts at `ambient_temperature_k`.
    ///
    /// # Errors
    /// Returns error if the magnet has no field or the rotor has no inertia.
    pub fn new(
        coil: Coil,
        magnet: Magnet,
        rotor: Rotor,
        battery: Battery,
        coupling: CouplingId,
        ambient_temperature_k: f64,
    ) -> SimResult<Self> {
        if !(magnet.field_t() > 0.0) {
            return Err(SimError::NonPhysical {
                what: "motor magnet has no field",
            });
        }
        if !(rotor.moment_kg_m2() > 0.0) {
            return Err(SimError::NonPhysical {
                what: "rotor moment must be positive",
            });
        }
        let resistance_ohm = coil.wire().resistance_ohm() + battery.internal_resistance_ohm();
        if !(resistance_ohm > 0.0) {
            return Err(SimError::NonPhysical {
                what: "motor circuit has no resistance",
            });
        }
        let flux = magnet.field_t() * coil.area_m2() * coil.turns();
        let max_voltage_v = battery.voltage_v();
        Ok(Self {
            coil,
            rotor,
            magnet,
            coupling,
            state: MotorState::Running,
            resistance_ohm,
            max_voltage_v,
            input_voltage_v: max_voltage_v,
            max_omega_rad_s: max_voltage_v / flux,
            current_a: max_voltage_v / resistance_ohm,
            back_emf_v: 0.0,
            torque_nm: 0.0,
            omega_rad_s: 0.0,
            angle_rad: 0.0,
            wire_temperature_k: ambient_temperature_k,
        })
    }

    pub fn step(&mut self, ctx: &mut StepContext<'_>) {
        match self.state {
            MotorState::Running if self.wire_temperature_k > WIRE_TEMPERATURE_RATING_K => {
                self.state = MotorState::Stopped;
                self.input_voltage_v = 0.0;
                debug!(wire_k = self.wire_temperature_k, "motor overheated, stopping");
            }
            MotorState::Stopped if self.wire_temperature_k <= RESTART_TEMPERATURE_K => {
                self.state = MotorState::Running;
                self.input_voltage_v = self.max_voltage_v;
                debug!(wire_k = self.wire_temperature_k, "motor cooled, restarting");
            }
            _ => {}
        }

        let dt = ctx.constants.tick_s;
        let flux = self.flux();

        self.current_a = (self.input_voltage_v - self.back_emf_v) / self.resistance_ohm;

        let wire = self.coil.wire();
        let heat = self.current_a * self.current_a * self.resistance_ohm * dt;
        let loss = ctx.constants.air_thermal_conductivity
            * wire.surface_area_m2()
            * (self.wire_temperature_k - ctx.constants.ambient_temperature_k)
            * dt;
        self.wire_temperature_k += (heat - loss) / (wire.mass_kg() * wire.specific_heat());

        self.torque_nm = self.current_a * flux;

        let max_torque = self.max_torque_nm();
        let Some(coupling) = ctx.couplings.get_mut(self.coupling.slot()) else {
            return;
        };
        let accel = (self.torque_nm - coupling.torque_nm()) / self.rotor.moment_kg_m2();
        self.omega_rad_s += accel * dt;
        if self.omega_rad_s > self.max_omega_rad_s {
            self.omega_rad_s = self.max_omega_rad_s;
        }
        self.omega_rad_s *= ROTOR_FRICTION;
        self.angle_rad += self.omega_rad_s * dt;
        coupling.set_angular_velocity_rad_s(self.omega_rad_s);
        coupling.publish_driver_max_torque(max_torque);

        self.back_emf_v = flux * self.omega_rad_s;
    }

    /// Cut the supply until `clear_external_stop` is called.
    pub fn stop_external(&mut self) {
        if self.state != MotorState::StoppedExternal {
            debug!("motor stopped externally");
        }
        self.state = MotorState::StoppedExternal;
        self.input_voltage_v = 0.0;
    }

    /// Undo `stop_external`. A motor that is not externally stopped is unaffected.
    pub fn clear_external_stop(&mut self) {
        if self.state == MotorState::StoppedExternal {
            self.state = MotorState::Running;
            self.input_voltage_v = self.max_voltage_v;
            debug!("external stop cleared");
        }
    }

    /// B·A·N.
    fn flux(&self) -> f64 {
        self.magnet.field_t() * self.coil.area_m2() * self.coil.turns()
    }

    /// Stall torque at full supply voltage: `N·(V_max/R)·A·B`.
    pub fn max_torque_nm(&self) -> f64 {
        self.max_voltage_v / self.resistance_ohm * self.flux()
    }

    pub fn coupling(&self) -> CouplingId {
        self.coupling
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn current_a(&self) -> f64 {
        self.current_a
    }

    pub fn back_emf_v(&self) -> f64 {
        self.back_emf_v
    }

    pub fn torque_nm(&self) -> f64 {
        self.torque_nm
    }

    pub fn angular_velocity_rad_s(&self) -> f64 {
        self.omega_rad_s
    }

    pub fn rpm(&self) -> f64 {
        self.omega_rad_s * RADS_TO_RPM
    }

    pub fn angle_rad(&self) -> f64 {
        self.angle_rad
    }

    pub fn max_angular_velocity_rad_s(&self) -> f64 {
        self.max_omega_rad_s
    }

    pub fn wire_temperature_k(&self) -> f64 {
        self.wire_temperature_k
    }

    pub fn input_voltage_v(&self) -> f64 {
        self.input_voltage_v
    }

    pub fn resistance_ohm(&self) -> f64 {
        self.resistance_ohm
    }

    pub fn coil(&self) -> &Coil {
        &self.coil
    }

    pub fn rotor(&self) -> &Rotor {
        &self.rotor
    }
}
