//! Thermodynamic helpers over `Material` values.
//!
//! None of these validate their inputs: a zero mass, volume or pressure
//! produces non-finite numbers rather than an error.

use tp_core::SimConstants;

use crate::material::{Material, Phase};

/// Occupied volume [m³]: `m/ρ` for condensed phases, `m·R·T/P` for gas.
pub fn volume(material: &Material) -> f64 {
    match material.phase() {
        Phase::Gas => {
            material.mass_kg() * material.kind().gas_constant() * material.temperature_k()
                / material.pressure_atm()
        }
        _ => material.mass_kg() / material.density(),
    }
}

/// Mass of `volume_m3` of this material at its current state.
pub fn mass_from_volume(material: &Material, volume_m3: f64) -> f64 {
    match material.phase() {
        Phase::Gas => {
            material.pressure_atm() * volume_m3
                / (material.kind().gas_constant() * material.temperature_k())
        }
        _ => volume_m3 * material.density(),
    }
}

/// Same substance in the same phase.
pub fn is_compatible(a: &Material, b: &Material) -> bool {
    a.same_substance(b) && a.phase() == b.phase()
}

/// Merge `other` into `into`.
///
/// Temperature is the mass-weighted mean. Gas pressure is recomputed at the
/// summed volume of both parts; condensed phases settle at ambient pressure.
/// Incompatible materials leave `into` unchanged and hand `other` back.
pub fn merge(into: &mut Material, other: Material, constants: &SimConstants) -> Result<(), Material> {
    if !is_compatible(into, &other) {
        return Err(other);
    }
    let total_volume = volume(into) + volume(&other);
    let total_mass = into.mass_kg() + other.mass_kg();
    let temperature = (into.temperature_k() * into.mass_kg()
        + other.temperature_k() * other.mass_kg())
        / total_mass;

    let pressure = if into.is_gas() {
        total_mass * into.kind().gas_constant() * temperature / total_volume
    } else {
        constants.ambient_pressure_atm
    };
    into.set_mass(total_mass);
    into.set_temperature(temperature);
    into.set_pressure(pressure);
    Ok(())
}

/// Split `mass_kg` off `source` at the same temperature and pressure.
pub fn split_off(source: &mut Material, mass_kg: f64) -> Material {
    source.set_mass(source.mass_kg() - mass_kg);
    Material::new(
        source.kind().clone(),
        mass_kg,
        source.temperature_k(),
        source.pressure_atm(),
    )
}

/// Conduct heat between `a` and `b` across `area_m2` for `dt_s`.
///
/// `q = min(k_a, k_b)·A·(T_b − T_a)·dt` flows into `a` and out of `b` in the
/// same call. Returns `q` [J], positive when `a` warms.
pub fn exchange_heat(a: &mut Material, b: &mut Material, area_m2: f64, dt_s: f64) -> f64 {
    let k = a
        .kind()
        .thermal_conductivity()
        .min(b.kind().thermal_conductivity());
    let q = k * area_m2 * (b.temperature_k() - a.temperature_k()) * dt_s;
    let t_a = a.temperature_k() + q / (a.mass_kg() * a.kind().specific_heat());
    let t_b = b.temperature_k() - q / (b.mass_kg() * b.kind().specific_heat());
    a.set_temperature(t_a);
    b.set_temperature(t_b);
    q
}

/// Polytropic pressure after a volume change: `P1·(V1/V2)^γ`.
pub fn adiabatic_pressure(p1: f64, v1: f64, v2: f64, constants: &SimConstants) -> f64 {
    p1 * (v1 / v2).powf(constants.gamma)
}

/// Volume reached when pressure goes from `p1` to `p2`: `V1 / (P2/P1)^(1/γ)`.
pub fn adiabatic_volume(v1: f64, p1: f64, p2: f64, constants: &SimConstants) -> f64 {
    v1 / (p2 / p1).powf(1.0 / constants.gamma)
}

/// Ideal-gas consistent temperature: `((P2·V2)/(P1·V1))·T1`.
pub fn adiabatic_temperature(t1: f64, p1: f64, v1: f64, p2: f64, v2: f64) -> f64 {
    (p2 * v2) / (p1 * v1) * t1
}

/// Recompute gas pressure at a fixed `volume_m3`: `P = m·R·T/V`.
pub fn pressure_from_temperature(material: &mut Material, volume_m3: f64) {
    let p = material.mass_kg() * material.kind().gas_constant() * material.temperature_k()
        / volume_m3;
    material.set_pressure(p);
}
