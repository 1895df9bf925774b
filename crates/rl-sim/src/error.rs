//! Error types for topology construction and simulation runs.

use thiserror::Error;

use crate::participant::ParticipantKind;

/// Errors raised before any tick runs. A built topology never fails to step.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid {kind} at slot {index}: {what} (value={value})")]
    InvalidParticipant {
        index: usize,
        kind: ParticipantKind,
        what: &'static str,
        value: f64,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Topology has no participants")]
    EmptyTopology,

    #[error("Core error: {0}")]
    Core(#[from] rl_core::RlError),
}

pub type SimResult<T> = Result<T, SimError>;
