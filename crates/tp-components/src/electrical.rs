//! Motor supply and field parts.

use std::sync::Arc;

use crate::common::check_non_negative;
use crate::error::ComponentResult;
use tp_core::units::{ElectricPotential, ElectricalResistance};
use tp_materials::MaterialType;
use uom::si::electric_potential::volt;
use uom::si::electrical_resistance::ohm;

/// Permanent magnet. Its field is the magnetism of the substance [T].
#[derive(Clone, Debug)]
pub struct Magnet {
    kind: Arc<MaterialType>,
}

impl Magnet {
    pub fn new(kind: Arc<MaterialType>) -> Self {
        Self { kind }
    }

    pub fn field_t(&self) -> f64 {
        self.kind.magnetism()
    }

    pub fn kind(&self) -> &Arc<MaterialType> {
        &self.kind
    }
}

/// Ideal voltage source behind an internal resistance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Battery {
    voltage_v: f64,
    internal_resistance_ohm: f64,
}

impl Battery {
    /// A zero-volt battery is allowed and models a dead supply.
    pub fn new(
        voltage: ElectricPotential,
        internal_resistance: ElectricalResistance,
    ) -> ComponentResult<Self> {
        let voltage_v = check_non_negative(voltage.get::<volt>(), "battery voltage")?;
        let internal_resistance_ohm = check_non_negative(
            internal_resistance.get::<ohm>(),
            "battery internal resistance",
        )?;
        Ok(Self {
            voltage_v,
            internal_resistance_ohm,
        })
    }

    pub fn voltage_v(&self) -> f64 {
        self.voltage_v
    }

    pub fn internal_resistance_ohm(&self) -> f64 {
        self.internal_resistance_ohm
    }
}
