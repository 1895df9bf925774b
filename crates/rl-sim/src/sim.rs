//! Simulation runner and result recording.

use tracing::info;

use crate::engine::{EngineConfig, ExchangeEngine};
use crate::error::{SimError, SimResult};
use crate::ledger::Ledger;
use crate::snapshot::SystemSnapshot;
use crate::topology::Topology;

/// Topology, ledger and engine bundled as one explicit context.
#[derive(Clone, Debug)]
pub struct Simulation {
    engine: ExchangeEngine,
    topology: Topology,
    ledger: Ledger,
    initial_energy_j: f64,
}

impl Simulation {
    pub fn new(topology: Topology, config: EngineConfig) -> Self {
        let initial_energy_j = topology.total_system_energy();
        Self {
            engine: ExchangeEngine::new(config),
            topology,
            ledger: Ledger::new(),
            initial_energy_j,
        }
    }

    /// Advance one fixed timestep.
    pub fn step(&mut self) {
        self.engine.step(&mut self.topology, &mut self.ledger);
    }

    /// Advance `ticks` timesteps.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    pub fn engine(&self) -> &ExchangeEngine {
        &self.engine
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Σ m·c·T at construction time.
    pub fn initial_energy_j(&self) -> f64 {
        self.initial_energy_j
    }

    pub fn total_system_energy(&self) -> f64 {
        self.ledger.total_system_energy(&self.topology)
    }

    pub fn conservation_residual(&self) -> f64 {
        self.ledger
            .conservation_residual(&self.topology, self.initial_energy_j)
    }

    pub fn snapshot(&self) -> SystemSnapshot {
        self.topology.snapshot(&self.ledger)
    }
}

/// Options for batch runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Number of ticks to run
    pub ticks: u64,
    /// Record every N-th tick (decimation)
    pub record_every: u64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            ticks: 1_000,
            record_every: 100,
        }
    }
}

/// Snapshots captured during a run, starting with the initial state.
#[derive(Clone, Debug)]
pub struct SimRecord {
    pub snapshots: Vec<SystemSnapshot>,
}

impl SimRecord {
    pub fn last(&self) -> Option<&SystemSnapshot> {
        self.snapshots.last()
    }
}

/// Run `opts.ticks` ticks, recording every `opts.record_every`-th state.
pub fn run_sim(sim: &mut Simulation, opts: &SimOptions) -> SimResult<SimRecord> {
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    info!(
        ticks = opts.ticks,
        participants = sim.topology().len(),
        dt_s = sim.engine().config().timestep_s(),
        "run starting"
    );

    let mut snapshots = vec![sim.snapshot()];
    for tick in 1..=opts.ticks {
        sim.step();
        if tick % opts.record_every == 0 {
            snapshots.push(sim.snapshot());
        }
    }

    // Always record final state
    if opts.ticks % opts.record_every != 0 {
        snapshots.push(sim.snapshot());
    }

    info!(
        lost_to_space_j = sim.ledger().total_lost_to_space_j(),
        system_energy_j = sim.total_system_energy(),
        residual_j = sim.conservation_residual(),
        "run complete"
    );

    Ok(SimRecord { snapshots })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::BlackbodySpec;
    use crate::topology::TopologyBuilder;

    fn single_body() -> Simulation {
        let mut b = TopologyBuilder::new();
        b.blackbody(BlackbodySpec {
            temperature_k: 300.0,
            ..BlackbodySpec::default()
        });
        Simulation::new(b.build().unwrap(), EngineConfig::default())
    }

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.ticks, 1_000);
        assert_eq!(opts.record_every, 100);
    }

    #[test]
    fn zero_record_every_is_rejected() {
        let mut sim = single_body();
        let opts = SimOptions {
            ticks: 10,
            record_every: 0,
        };
        assert!(run_sim(&mut sim, &opts).is_err());
    }

    #[test]
    fn records_initial_decimated_and_final_states() {
        let mut sim = single_body();
        let opts = SimOptions {
            ticks: 25,
            record_every: 10,
        };
        let record = run_sim(&mut sim, &opts).unwrap();
        let ticks: Vec<u64> = record.snapshots.iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![0, 10, 20, 25]);
        assert_eq!(record.last().map(|s| s.tick), Some(25));
    }

    #[test]
    fn residual_stays_small_for_open_body() {
        let mut sim = single_body();
        sim.run(500);
        assert!(sim.ledger().total_lost_to_space_j() > 0.0);
        assert!(sim.conservation_residual().abs() < 1e-9 * sim.initial_energy_j());
    }
}
