//! Tick-based simulation of the thermoplant machines.
//!
//! Provides:
//! - `RotationalForce`: torque/speed link between a motor and a compressor
//! - machines: `Motor`, `Compressor`, `HeatExchanger`, `Expander`, dispatched
//!   through the closed `Machine` enum
//! - `Simulator`: steps every machine once per tick in registration order
//! - `PlantBuilder` and `reference_plant` for assembling plants
//! - serializable `PlantSnapshot`s for presentation layers
//!
//! Machines exchange material only through chambers and force only through
//! couplings. A transfer that cannot happen this tick leaves everything as it
//! was and is retried on the next one.
//!
//! # Example
//!
//! ```
//! use tp_core::SimConstants;
//! use tp_sim::{reference_plant, ReferencePlantParams};
//!
//! let c = SimConstants::default();
//! let mut plant = reference_plant(&c, &ReferencePlantParams::default()).unwrap();
//! let ticks = plant.sim.advance(0.01);
//! assert_eq!(ticks, 100);
//! assert_eq!(plant.sim.snapshot().tick, 100);
//! ```

pub mod builder;
pub mod compressor;
pub mod coupling;
pub mod error;
pub mod expander;
pub mod heat_exchanger;
pub mod machine;
pub mod motor;
pub mod plant;
pub mod simulator;
pub mod snapshot;

// Re-exports for public API
pub use builder::PlantBuilder;
pub use compressor::{Compressor, CompressorSpec, CompressorState};
pub use coupling::RotationalForce;
pub use error::{SimError, SimResult};
pub use expander::{Expander, ExpanderPorts, ExpanderState};
pub use heat_exchanger::{HeatExchanger, HeatExchangerPorts, StreamState};
pub use machine::{Machine, MachineKind, StepContext};
pub use motor::{Motor, MotorState};
pub use plant::{
    reference_plant, ChargeParams, ExpanderParams, HeatExchangerParams, MotorParams, PlantHandles,
    ReferencePlant, ReferencePlantParams,
};
pub use simulator::Simulator;
pub use snapshot::{MachineDetail, PlantSnapshot};
