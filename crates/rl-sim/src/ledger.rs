//! Global energy bookkeeping.
//!
//! Only the exchange engine writes to the ledger. Losses are monotonically
//! non-decreasing; nothing ever flows back out.

use crate::snapshot::LedgerSnapshot;
use crate::topology::Topology;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    lost_to_space_j: f64,
    injected_j: f64,
    clamp_adjustment_j: f64,
    clamp_events: u64,
    tick_lost_j: f64,
    tick_injected_j: f64,
    last_tick_lost_j: f64,
    last_tick_injected_j: f64,
    last_timestep_s: f64,
    ticks: u64,
    elapsed_s: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Energy leaving the system through an open boundary or a void.
    pub(crate) fn record_loss(&mut self, energy_j: f64) {
        if energy_j > 0.0 {
            self.lost_to_space_j += energy_j;
            self.tick_lost_j += energy_j;
        }
    }

    /// Energy entering the system from a heat source.
    pub(crate) fn record_injection(&mut self, energy_j: f64) {
        if energy_j > 0.0 {
            self.injected_j += energy_j;
            self.tick_injected_j += energy_j;
        }
    }

    /// Energy created by clamping a temperature at 0 K.
    pub(crate) fn record_clamp(&mut self, energy_j: f64) {
        if energy_j > 0.0 {
            self.clamp_adjustment_j += energy_j;
            self.clamp_events += 1;
        }
    }

    pub(crate) fn finish_tick(&mut self, dt_s: f64) {
        self.last_tick_lost_j = std::mem::take(&mut self.tick_lost_j);
        self.last_tick_injected_j = std::mem::take(&mut self.tick_injected_j);
        self.last_timestep_s = dt_s;
        self.ticks += 1;
        self.elapsed_s += dt_s;
    }

    pub fn total_lost_to_space_j(&self) -> f64 {
        self.lost_to_space_j
    }

    pub fn total_injected_j(&self) -> f64 {
        self.injected_j
    }

    pub fn clamp_adjustment_j(&self) -> f64 {
        self.clamp_adjustment_j
    }

    pub fn clamp_events(&self) -> u64 {
        self.clamp_events
    }

    /// Loss accumulated so far in the tick currently running (J).
    pub fn pending_tick_loss_j(&self) -> f64 {
        self.tick_lost_j
    }

    pub fn last_tick_lost_j(&self) -> f64 {
        self.last_tick_lost_j
    }

    pub fn last_tick_injected_j(&self) -> f64 {
        self.last_tick_injected_j
    }

    /// Average power radiated to space during the last tick (W).
    pub fn last_tick_loss_rate_w(&self) -> f64 {
        if self.last_timestep_s > 0.0 {
            self.last_tick_lost_j / self.last_timestep_s
        } else {
            0.0
        }
    }

    pub fn last_timestep_s(&self) -> f64 {
        self.last_timestep_s
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    /// Σ m·c·T over the topology.
    pub fn total_system_energy(&self, topology: &Topology) -> f64 {
        topology.total_system_energy()
    }

    /// Stored energy plus everything that has left the system.
    pub fn accounted_energy_j(&self, topology: &Topology) -> f64 {
        self.total_system_energy(topology) + self.lost_to_space_j
    }

    /// Deviation from conservation relative to `initial_energy_j`.
    ///
    /// Zero up to rounding: `system + lost - initial - injected - clamp`.
    pub fn conservation_residual(&self, topology: &Topology, initial_energy_j: f64) -> f64 {
        self.accounted_energy_j(topology)
            - initial_energy_j
            - self.injected_j
            - self.clamp_adjustment_j
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            lost_to_space_j: self.lost_to_space_j,
            injected_j: self.injected_j,
            clamp_adjustment_j: self.clamp_adjustment_j,
            last_tick_lost_j: self.last_tick_lost_j,
            loss_rate_w: self.last_tick_loss_rate_w(),
        }
    }
}
