//! Radiative exchange engine for a line of thermal participants.
//!
//! Provides:
//! - Participant variants (mirror, void, blackbody, heat source, two-sided blackbody)
//! - Positional topology with a validating builder
//! - Energy ledger for losses to space and conservation checks
//! - Three-phase exchange engine (emit, conduct, absorb)
//! - Read-only snapshots for renderers and loggers
//! - Fixed-step simulation runner

pub mod engine;
pub mod error;
pub mod ledger;
pub mod participant;
pub mod reflection;
pub mod sim;
pub mod snapshot;
pub mod spec;
pub mod thermal;
pub mod topology;

// Re-exports for public API
pub use engine::{EmitOrder, EngineConfig, ExchangeEngine};
pub use error::{SimError, SimResult};
pub use ledger::Ledger;
pub use participant::{
    Blackbody, Capabilities, HeatSource, Participant, ParticipantKind, TwoSidedBlackbody, Void,
};
pub use reflection::ReflectionConvention;
pub use sim::{SimOptions, SimRecord, Simulation, run_sim};
pub use snapshot::{LedgerSnapshot, ParticipantSnapshot, SystemSnapshot, Temperatures};
pub use spec::{BlackbodySpec, HeatSourceSpec, ParticipantSpec, TwoSidedSpec};
pub use thermal::{Side, SideEnergy, ThermalBody};
pub use topology::{Topology, TopologyBuilder};
