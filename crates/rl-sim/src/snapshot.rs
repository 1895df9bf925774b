//! Read-only views of simulation state for external collaborators.

use rl_core::SlotId;

use crate::participant::{Participant, ParticipantKind};

/// Temperatures of a participant, shaped by its kind.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Temperatures {
    None,
    Single(f64),
    Split { left_k: f64, right_k: f64 },
}

impl Temperatures {
    /// Mean of the available temperatures, if any.
    pub fn mean_k(&self) -> Option<f64> {
        match *self {
            Temperatures::None => None,
            Temperatures::Single(t) => Some(t),
            Temperatures::Split { left_k, right_k } => Some(0.5 * (left_k + right_k)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantSnapshot {
    pub slot: SlotId,
    pub kind: ParticipantKind,
    pub temperatures: Temperatures,
    /// Power radiated from the left face during the last tick (W).
    pub emitted_left_w: f64,
    /// Power radiated from the right face during the last tick (W).
    pub emitted_right_w: f64,
    pub power_input_w: f64,
}

impl ParticipantSnapshot {
    pub(crate) fn capture(slot: SlotId, participant: &Participant, dt_s: f64) -> Self {
        let emission = participant.last_emission();
        let to_power = |j: f64| if dt_s > 0.0 { j / dt_s } else { 0.0 };
        Self {
            slot,
            kind: participant.kind(),
            temperatures: participant.temperatures(),
            emitted_left_w: to_power(emission.left_j),
            emitted_right_w: to_power(emission.right_j),
            power_input_w: participant.power_input_w(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerSnapshot {
    pub lost_to_space_j: f64,
    pub injected_j: f64,
    pub clamp_adjustment_j: f64,
    pub last_tick_lost_j: f64,
    /// Power radiated to space during the last tick (W).
    pub loss_rate_w: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemSnapshot {
    pub tick: u64,
    pub elapsed_s: f64,
    pub participants: Vec<ParticipantSnapshot>,
    pub ledger: LedgerSnapshot,
    pub total_system_energy_j: f64,
    pub total_power_input_w: f64,
}

impl SystemSnapshot {
    /// Stored energy plus everything lost so far (J).
    pub fn total_accounted_j(&self) -> f64 {
        self.total_system_energy_j + self.ledger.lost_to_space_j
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ExchangeEngine;
    use crate::ledger::Ledger;
    use crate::spec::{BlackbodySpec, HeatSourceSpec};
    use crate::topology::TopologyBuilder;

    #[test]
    fn mean_temperature() {
        assert_eq!(Temperatures::None.mean_k(), None);
        assert_eq!(Temperatures::Single(3.0).mean_k(), Some(3.0));
        let split = Temperatures::Split {
            left_k: 100.0,
            right_k: 300.0,
        };
        assert_eq!(split.mean_k(), Some(200.0));
    }

    #[test]
    fn snapshot_reports_emitted_power_and_ledger() {
        let mut b = TopologyBuilder::new();
        b.void();
        b.blackbody(BlackbodySpec {
            temperature_k: 500.0,
            ..BlackbodySpec::default()
        });
        b.heat_source(HeatSourceSpec::default());
        let mut topo = b.build().unwrap();
        let mut ledger = Ledger::new();

        let before = topo.snapshot(&ledger);
        assert_eq!(before.tick, 0);
        assert_eq!(before.participants[1].emitted_left_w, 0.0);

        ExchangeEngine::default().step(&mut topo, &mut ledger);
        let snap = topo.snapshot(&ledger);
        assert_eq!(snap.tick, 1);
        assert_eq!(snap.participants.len(), 3);
        assert_eq!(snap.participants[0].kind, ParticipantKind::Void);
        assert_eq!(snap.participants[0].temperatures, Temperatures::None);

        let expected_w = rl_core::emissive_power(500.0);
        let body = &snap.participants[1];
        assert!((body.emitted_left_w - expected_w).abs() < 1e-9 * expected_w);
        assert!((body.emitted_right_w - expected_w).abs() < 1e-9 * expected_w);
        assert_eq!(snap.participants[2].power_input_w, 400.0);
        assert_eq!(snap.total_power_input_w, 400.0);
        assert!(snap.ledger.lost_to_space_j > 0.0);
        assert!(snap.total_accounted_j() > 0.0);
    }
}
