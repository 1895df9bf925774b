//! Fixed, ordered line of participants.
//!
//! Participants live in an arena addressed by [`SlotId`]. Neighbors are
//! derived from position alone; there are no stored links.

use rl_core::SlotId;

use crate::error::{SimError, SimResult};
use crate::ledger::Ledger;
use crate::participant::{Participant, ParticipantKind};
use crate::snapshot::{ParticipantSnapshot, SystemSnapshot};
use crate::spec::{BlackbodySpec, HeatSourceSpec, ParticipantSpec, TwoSidedSpec};
use crate::thermal::Side;

/// Builder for constructing a topology left to right.
///
/// Push participants in order, then call `build()` to validate every slot
/// and freeze the order.
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    specs: Vec<ParticipantSpec>,
}

impl TopologyBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a participant to the right end and return its slot.
    pub fn push(&mut self, spec: ParticipantSpec) -> SlotId {
        let id = SlotId::from_index(self.specs.len());
        self.specs.push(spec);
        id
    }

    pub fn mirror(&mut self) -> SlotId {
        self.push(ParticipantSpec::Mirror)
    }

    pub fn void(&mut self) -> SlotId {
        self.push(ParticipantSpec::Void)
    }

    pub fn blackbody(&mut self, spec: BlackbodySpec) -> SlotId {
        self.push(ParticipantSpec::Blackbody(spec))
    }

    pub fn heat_source(&mut self, spec: HeatSourceSpec) -> SlotId {
        self.push(ParticipantSpec::HeatSource(spec))
    }

    pub fn two_sided(&mut self, spec: TwoSidedSpec) -> SlotId {
        self.push(ParticipantSpec::TwoSidedBlackbody(spec))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Validate all participants and freeze the topology.
    pub fn build(self) -> SimResult<Topology> {
        if self.specs.is_empty() {
            return Err(SimError::EmptyTopology);
        }
        let participants = self
            .specs
            .iter()
            .enumerate()
            .map(|(index, spec)| spec.build(index))
            .collect::<SimResult<Vec<_>>>()?;
        Ok(Topology { participants })
    }
}

impl FromIterator<ParticipantSpec> for TopologyBuilder {
    fn from_iter<I: IntoIterator<Item = ParticipantSpec>>(iter: I) -> Self {
        Self {
            specs: iter.into_iter().collect(),
        }
    }
}

/// Immutable-order arena of participants. Thermal state is mutable in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    participants: Vec<Participant>,
}

impl Topology {
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn slots(&self) -> impl DoubleEndedIterator<Item = SlotId> + ExactSizeIterator + use<> {
        (0..self.participants.len()).map(SlotId::from_index)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn get(&self, slot: SlotId) -> Option<&Participant> {
        self.participants.get(slot.index())
    }

    pub(crate) fn get_mut(&mut self, slot: SlotId) -> Option<&mut Participant> {
        self.participants.get_mut(slot.index())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut Participant)> {
        self.participants
            .iter_mut()
            .enumerate()
            .map(|(i, p)| (SlotId::from_index(i), p))
    }

    pub fn kind(&self, slot: SlotId) -> Option<ParticipantKind> {
        self.get(slot).map(Participant::kind)
    }

    /// Adjacent slot in direction `side`, or `None` at an open boundary.
    pub fn neighbor(&self, slot: SlotId, side: Side) -> Option<SlotId> {
        match side {
            Side::Left => slot.left(),
            Side::Right => slot.right(self.len()),
        }
    }

    /// Σ m·c·T over all participants (per face for two-sided bodies).
    pub fn total_system_energy(&self) -> f64 {
        self.participants.iter().map(Participant::thermal_energy_j).sum()
    }

    /// Combined constant power input of all heat sources (W).
    pub fn total_power_input_w(&self) -> f64 {
        self.participants.iter().map(Participant::power_input_w).sum()
    }

    /// Read-only view for renderers, loggers and tests.
    pub fn snapshot(&self, ledger: &Ledger) -> SystemSnapshot {
        let dt_s = ledger.last_timestep_s();
        let participants = self
            .slots()
            .zip(&self.participants)
            .map(|(slot, p)| ParticipantSnapshot::capture(slot, p, dt_s))
            .collect();
        SystemSnapshot {
            tick: ledger.ticks(),
            elapsed_s: ledger.elapsed_s(),
            participants,
            ledger: ledger.snapshot(),
            total_system_energy_j: self.total_system_energy(),
            total_power_input_w: self.total_power_input_w(),
        }
    }
}
