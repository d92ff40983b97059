//! Mechanical coupling between a driving and a driven machine.

use crate::error::{SimError, SimResult};

/// Rotational link between exactly one driver (a motor) and one driven
/// machine (a compressor).
///
/// The driver writes angular velocity and publishes its maximum torque; the
/// driven machine writes the reaction torque it loads the driver with. Both
/// sides see the other's writes within the same tick.
///
/// ```text
/// v_piston = ω · lever
/// τ_load   = F_piston · lever
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RotationalForce {
    lever_arm_m: f64,
    torque_nm: f64,
    angular_velocity_rad_s: f64,
    driver_max_torque_nm: Option<f64>,
}

impl RotationalForce {
    /// Create a coupling at rest.
    ///
    /// # Errors
    /// Returns error if the lever arm is not finite and positive.
    pub fn new(lever_arm_m: f64) -> SimResult<Self> {
        if !lever_arm_m.is_finite() || lever_arm_m <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "lever arm must be positive",
            });
        }
        Ok(Self {
            lever_arm_m,
            torque_nm: 0.0,
            angular_velocity_rad_s: 0.0,
            driver_max_torque_nm: None,
        })
    }

    pub fn lever_arm_m(&self) -> f64 {
        self.lever_arm_m
    }

    /// Load torque written by the driven machine (N·m).
    pub fn torque_nm(&self) -> f64 {
        self.torque_nm
    }

    pub fn set_torque_nm(&mut self, torque_nm: f64) {
        self.torque_nm = torque_nm;
    }

    pub fn angular_velocity_rad_s(&self) -> f64 {
        self.angular_velocity_rad_s
    }

    pub fn set_angular_velocity_rad_s(&mut self, omega: f64) {
        self.angular_velocity_rad_s = omega;
    }

    /// Maximum torque of the driver, absent unless the driver is a motor.
    pub fn driver_max_torque_nm(&self) -> Option<f64> {
        self.driver_max_torque_nm
    }

    pub fn publish_driver_max_torque(&mut self, max_torque_nm: f64) {
        self.driver_max_torque_nm = Some(max_torque_nm);
    }

    /// Linear speed at the end of the lever (m/s).
    pub fn linear_velocity_m_s(&self) -> f64 {
        self.angular_velocity_rad_s * self.lever_arm_m
    }
}
