// tp-core/src/units.rs

use uom::si::f64::{
    AngularVelocity as UomAngularVelocity, Area as UomArea,
    ElectricPotential as UomElectricPotential, ElectricalResistance as UomElectricalResistance,
    Length as UomLength, Mass as UomMass, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
    Torque as UomTorque, Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type AngularVelocity = UomAngularVelocity;
pub type Area = UomArea;
pub type ElectricPotential = UomElectricPotential;
pub type ElectricalResistance = UomElectricalResistance;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Torque = UomTorque;
pub type Volume = UomVolume;

/// Pascals per standard atmosphere. Plant pressures are carried in atm.
pub const ATM_TO_PA: f64 = 101_325.0;

/// rad/s to revolutions per minute.
pub const RADS_TO_RPM: f64 = 60.0 / (2.0 * std::f64::consts::PI);

#[inline]
pub fn atm(v: f64) -> Pressure {
    use uom::si::pressure::atmosphere;
    Pressure::new::<atmosphere>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn rad_per_s(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

#[inline]
pub fn nm(v: f64) -> Torque {
    use uom::si::torque::newton_meter;
    Torque::new::<newton_meter>(v)
}

#[inline]
pub fn volts(v: f64) -> ElectricPotential {
    use uom::si::electric_potential::volt;
    ElectricPotential::new::<volt>(v)
}

#[inline]
pub fn ohms(v: f64) -> ElectricalResistance {
    use uom::si::electrical_resistance::ohm;
    ElectricalResistance::new::<ohm>(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = atm(2.0);
        let _t = k(300.0);
        let _m = kg(1.2);
        let _l = m(2.0);
        let _v = m3(0.02);
        let _dt = s(1e-4);
        let _w = rad_per_s(40.0);
        let _tau = nm(4.2);
        let _u = volts(8.0);
        let _r = ohms(0.04);
    }

    #[test]
    fn atm_matches_pascal_constant() {
        assert!((atm(1.0).value - ATM_TO_PA).abs() < 1e-6);
    }

    #[test]
    fn rpm_conversion() {
        let one_rev_per_s = 2.0 * std::f64::consts::PI;
        assert!((one_rev_per_s * RADS_TO_RPM - 60.0).abs() < 1e-9);
    }
}
