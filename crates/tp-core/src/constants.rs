use crate::numeric::Real;

/// Physical constants shared by every machine step.
///
/// Passed by reference into each physics function instead of living in
/// globals, so two simulators with different constants can coexist.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConstants {
    /// Fixed tick length [s].
    pub tick_s: Real,
    /// Ambient temperature [K]. Also the reference temperature for gas constants.
    pub ambient_temperature_k: Real,
    /// Ambient pressure [atm].
    pub ambient_pressure_atm: Real,
    /// Adiabatic exponent used by every polytropic transform.
    pub gamma: Real,
    /// Heat transfer coefficient of still air around a hot wire [W/(m²·K)].
    pub air_thermal_conductivity: Real,
}

impl Default for SimConstants {
    fn default() -> Self {
        Self {
            tick_s: 1e-4,
            ambient_temperature_k: 294.0,
            ambient_pressure_atm: 1.0,
            gamma: 1.66,
            air_thermal_conductivity: 13.1,
        }
    }
}

impl SimConstants {
    /// Number of whole ticks in `duration_s`: the quotient truncated toward
    /// zero, with no correction for representation error.
    ///
    /// Negative, zero or non-finite durations yield 0.
    pub fn ticks_in(&self, duration_s: Real) -> u64 {
        if !duration_s.is_finite() || duration_s <= 0.0 || !(self.tick_s > 0.0) {
            return 0;
        }
        (duration_s / self.tick_s) as u64
    }
}
