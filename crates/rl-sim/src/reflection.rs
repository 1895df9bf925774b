//! Mirror reflection rule table.
//!
//! When a participant radiates toward a neighboring mirror, the energy comes
//! straight back into the emitter's own incoming buffer. Which buffer it lands
//! in is decided here, per emitting variant.
//!
//! The historical behavior is not uniform: blackbodies and two-sided bodies
//! refill the buffer on the side they emitted from, while heat sources refill
//! the opposite buffer. For single-temperature bodies both buffers are summed,
//! so the choice only changes physics for two-sided bodies. The historical
//! table is kept as the default and the uniform conventions are opt-in.

use crate::participant::ParticipantKind;
use crate::thermal::Side;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReflectionConvention {
    /// Per-variant table: heat sources use the opposite buffer, everything else the same side.
    #[default]
    Observed,
    /// Energy aimed left arrives back as if from the left.
    SameSide,
    /// Energy aimed left arrives back in the right buffer.
    OppositeSide,
}

impl ReflectionConvention {
    /// Buffer side that receives energy `emitter` aimed `toward` a mirror.
    pub fn return_side(self, emitter: ParticipantKind, toward: Side) -> Side {
        match self {
            ReflectionConvention::Observed => match emitter {
                ParticipantKind::HeatSource => toward.opposite(),
                ParticipantKind::Blackbody | ParticipantKind::TwoSidedBlackbody => toward,
                // Non-emitters never reach a mirror.
                ParticipantKind::Mirror | ParticipantKind::Void => toward,
            },
            ReflectionConvention::SameSide => toward,
            ReflectionConvention::OppositeSide => toward.opposite(),
        }
    }
}
