//! Three-phase exchange engine.
//!
//! One call to [`ExchangeEngine::step`] runs emit, conduct and absorb over the
//! whole topology with a hard barrier between phases. Emission only ever
//! writes the emitter's own temperature and some buffer additively, so the
//! iteration order inside a phase does not matter.

use rl_core::SlotId;
use rl_core::constants::DEFAULT_TIMESTEP_S;
use rl_core::units::Time;
use tracing::{debug, instrument, trace, warn};

use crate::error::SimResult;
use crate::ledger::Ledger;
use crate::participant::ParticipantKind;
use crate::reflection::ReflectionConvention;
use crate::thermal::Side;
use crate::topology::Topology;

/// Iteration order of the emit phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmitOrder {
    #[default]
    Forward,
    Reverse,
}

/// Engine configuration. Validated on construction.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    timestep_s: f64,
    reflection: ReflectionConvention,
    emit_order: EmitOrder,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timestep_s: DEFAULT_TIMESTEP_S,
            reflection: ReflectionConvention::default(),
            emit_order: EmitOrder::default(),
        }
    }
}

impl EngineConfig {
    pub fn new(timestep: Time) -> SimResult<Self> {
        use uom::si::time::second;
        Self::from_seconds(timestep.get::<second>())
    }

    pub fn from_seconds(timestep_s: f64) -> SimResult<Self> {
        let timestep_s = rl_core::ensure_positive(timestep_s, "timestep_s")?;
        Ok(Self {
            timestep_s,
            ..Self::default()
        })
    }

    pub fn with_reflection(mut self, reflection: ReflectionConvention) -> Self {
        self.reflection = reflection;
        self
    }

    pub fn with_emit_order(mut self, emit_order: EmitOrder) -> Self {
        self.emit_order = emit_order;
        self
    }

    pub fn timestep_s(&self) -> f64 {
        self.timestep_s
    }

    pub fn reflection(&self) -> ReflectionConvention {
        self.reflection
    }

    pub fn emit_order(&self) -> EmitOrder {
        self.emit_order
    }
}

/// Stateless driver; all state lives in the topology and the ledger.
#[derive(Clone, Debug, Default)]
pub struct ExchangeEngine {
    config: EngineConfig,
}

impl ExchangeEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Advance by exactly one timestep.
    #[instrument(skip_all, fields(tick = ledger.ticks()))]
    pub fn step(&self, topology: &mut Topology, ledger: &mut Ledger) {
        trace!("tick start");

        self.emit_phase(topology, ledger);
        self.conduct_phase(topology, ledger);
        self.absorb_phase(topology, ledger);

        ledger.finish_tick(self.config.timestep_s);
        debug!(
            lost_j = ledger.last_tick_lost_j(),
            injected_j = ledger.last_tick_injected_j(),
            "tick complete"
        );
    }

    /// Every participant radiates and routes its emission.
    pub fn emit_phase(&self, topology: &mut Topology, ledger: &mut Ledger) {
        let slots: Vec<SlotId> = match self.config.emit_order {
            EmitOrder::Forward => topology.slots().collect(),
            EmitOrder::Reverse => topology.slots().rev().collect(),
        };
        for slot in slots {
            self.emit_one(topology, ledger, slot);
        }
    }

    fn emit_one(&self, topology: &mut Topology, ledger: &mut Ledger, slot: SlotId) {
        let dt_s = self.config.timestep_s;
        let Some(emitter) = topology.get_mut(slot) else {
            return;
        };
        let kind = emitter.kind();
        if !kind.capabilities().emits {
            return;
        }
        let outcome = emitter.emit(dt_s);
        note_clamp(ledger, slot, "emit", outcome.clamp_j);

        for toward in Side::BOTH {
            let energy_j = outcome.emission.get(toward);
            self.route(topology, ledger, slot, kind, toward, energy_j);
        }
    }

    fn route(
        &self,
        topology: &mut Topology,
        ledger: &mut Ledger,
        from: SlotId,
        emitter: ParticipantKind,
        toward: Side,
        energy_j: f64,
    ) {
        let Some(neighbor) = topology.neighbor(from, toward) else {
            ledger.record_loss(energy_j);
            return;
        };
        let (target, side) = if topology.kind(neighbor) == Some(ParticipantKind::Mirror) {
            (from, self.config.reflection.return_side(emitter, toward))
        } else {
            (neighbor, toward.opposite())
        };
        if let Some(receiver) = topology.get_mut(target) {
            receiver.receive(side, energy_j);
        }
    }

    /// Two-sided bodies equalize their faces. Runs on pre-absorb temperatures.
    pub fn conduct_phase(&self, topology: &mut Topology, ledger: &mut Ledger) {
        let dt_s = self.config.timestep_s;
        for (slot, participant) in topology.iter_mut() {
            if participant.capabilities().conducts {
                note_clamp(ledger, slot, "conduct", participant.conduct(dt_s));
            }
        }
    }

    /// Buffered radiation is folded into temperatures and buffers are reset.
    pub fn absorb_phase(&self, topology: &mut Topology, ledger: &mut Ledger) {
        let dt_s = self.config.timestep_s;
        for (slot, participant) in topology.iter_mut() {
            if !participant.capabilities().absorbs {
                continue;
            }
            let outcome = participant.absorb(dt_s);
            ledger.record_loss(outcome.sunk_j);
            ledger.record_injection(outcome.injected_j);
            note_clamp(ledger, slot, "absorb", outcome.clamp_j);
        }
    }
}

fn note_clamp(ledger: &mut Ledger, slot: SlotId, phase: &'static str, created_j: f64) {
    if created_j > 0.0 {
        warn!(%slot, phase, created_j, "temperature clamped at 0 K");
        ledger.record_clamp(created_j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::snapshot::Temperatures;
    use crate::spec::{BlackbodySpec, HeatSourceSpec, TwoSidedSpec};
    use crate::thermal::SideEnergy;
    use crate::topology::TopologyBuilder;
    use rl_core::units::ms;
    use rl_core::{RlError, Tolerances, radiant_energy};

    const DT: f64 = 1e-3;

    fn hot(t: f64) -> BlackbodySpec {
        BlackbodySpec {
            temperature_k: t,
            ..BlackbodySpec::default()
        }
    }

    #[test]
    fn config_rejects_bad_timestep() {
        assert!(matches!(
            EngineConfig::from_seconds(0.0),
            Err(SimError::Core(RlError::InvalidArg { what: "timestep_s" }))
        ));
        assert!(matches!(
            EngineConfig::from_seconds(-1e-3),
            Err(SimError::Core(RlError::InvalidArg { .. }))
        ));
        assert!(matches!(
            EngineConfig::from_seconds(f64::NAN),
            Err(SimError::Core(RlError::NonFinite { what: "timestep_s", .. }))
        ));
        let cfg = EngineConfig::new(ms(1.0)).unwrap();
        assert!((cfg.timestep_s() - DT).abs() < 1e-15);
        assert_eq!(EngineConfig::default().timestep_s(), DT);
    }

    #[test]
    fn emission_routes_to_neighbor_facing_buffer() {
        let mut b = TopologyBuilder::new();
        b.mirror();
        b.blackbody(hot(400.0));
        b.blackbody(hot(0.0));
        b.mirror();
        let mut topo = b.build().unwrap();
        let mut ledger = Ledger::new();
        let engine = ExchangeEngine::default();

        engine.emit_phase(&mut topo, &mut ledger);
        let e = radiant_energy(400.0, DT);
        let hot_slot = topo.get(SlotId::from_index(1)).unwrap();
        let cold_slot = topo.get(SlotId::from_index(2)).unwrap();
        // Leftward emission bounced off the mirror, rightward went to the neighbor.
        assert_eq!(hot_slot.incoming(), SideEnergy::new(e, 0.0));
        assert_eq!(cold_slot.incoming(), SideEnergy::new(e, 0.0));
        assert_eq!(ledger.total_lost_to_space_j(), 0.0);
    }

    #[test]
    fn heat_source_reflection_uses_opposite_buffer_by_default() {
        let mut b = TopologyBuilder::new();
        b.mirror();
        b.heat_source(HeatSourceSpec::default().with_body(hot(300.0)));
        let mut topo = b.build().unwrap();
        let mut ledger = Ledger::new();

        ExchangeEngine::default().emit_phase(&mut topo, &mut ledger);
        let e = radiant_energy(300.0, DT);
        let source = topo.get(SlotId::from_index(1)).unwrap();
        assert_eq!(source.incoming(), SideEnergy::new(0.0, e));
        assert_eq!(ledger.pending_tick_loss_j(), e);
    }

    #[test]
    fn same_side_convention_reflects_into_emitting_face() {
        let mut b = TopologyBuilder::new();
        b.mirror();
        b.heat_source(HeatSourceSpec::default().with_body(hot(300.0)));
        b.mirror();
        let mut topo = b.build().unwrap();
        let mut ledger = Ledger::new();
        let engine = ExchangeEngine::new(
            EngineConfig::default().with_reflection(ReflectionConvention::SameSide),
        );

        engine.emit_phase(&mut topo, &mut ledger);
        let e = radiant_energy(300.0, DT);
        let source = topo.get(SlotId::from_index(1)).unwrap();
        assert_eq!(source.incoming(), SideEnergy::new(e, e));
    }

    fn boxed_slab_faces(reflection: ReflectionConvention) -> (f64, f64) {
        let mut b = TopologyBuilder::new();
        b.mirror();
        b.two_sided(
            TwoSidedSpec::default()
                .with_conductivity(0.0)
                .with_temperatures(400.0, 0.0),
        );
        b.mirror();
        let mut topo = b.build().unwrap();
        let mut ledger = Ledger::new();
        let engine = ExchangeEngine::new(EngineConfig::default().with_reflection(reflection));
        engine.step(&mut topo, &mut ledger);

        assert_eq!(ledger.total_lost_to_space_j(), 0.0);
        match topo.get(SlotId::from_index(1)).unwrap().temperatures() {
            Temperatures::Split { left_k, right_k } => (left_k, right_k),
            other => panic!("unexpected temperatures: {other:?}"),
        }
    }

    #[test]
    fn reflection_convention_decides_which_slab_face_is_heated() {
        // Half-kilogram faces with unit specific heat.
        let delta_k = radiant_energy(400.0, DT) / 0.5;
        let tol = Tolerances::default();

        for reflection in [ReflectionConvention::Observed, ReflectionConvention::SameSide] {
            let (left_k, right_k) = boxed_slab_faces(reflection);
            assert!(rl_core::nearly_equal(left_k, 400.0, tol), "{reflection:?}: {left_k}");
            assert_eq!(right_k, 0.0, "{reflection:?}");
        }

        let (left_k, right_k) = boxed_slab_faces(ReflectionConvention::OppositeSide);
        assert!(rl_core::nearly_equal(left_k, 400.0 - delta_k, tol));
        assert!(rl_core::nearly_equal(right_k, delta_k, tol));
    }

    #[test]
    fn conduction_sees_pre_absorb_temperatures() {
        let mut b = TopologyBuilder::new();
        b.mirror();
        b.two_sided(TwoSidedSpec::default().with_temperatures(0.0, 0.0));
        b.heat_source(HeatSourceSpec::default());
        let mut topo = b.build().unwrap();
        let mut ledger = Ledger::new();
        ExchangeEngine::default().step(&mut topo, &mut ledger);

        // Everything started at 0 K, so nothing radiated and nothing conducted;
        // only the heat source warmed up during absorb.
        let slab = topo.get(SlotId::from_index(1)).unwrap();
        assert_eq!(slab.thermal_energy_j(), 0.0);
        let source = topo.get(SlotId::from_index(2)).unwrap();
        assert!(source.thermal_energy_j() > 0.0);
        assert!(rl_core::nearly_equal(
            ledger.total_injected_j(),
            400.0 * DT,
            Tolerances::default()
        ));
    }

    #[test]
    fn huge_timestep_triggers_clamp_and_is_accounted() {
        let mut b = TopologyBuilder::new();
        b.blackbody(hot(1000.0));
        let mut topo = b.build().unwrap();
        let mut ledger = Ledger::new();
        let initial = topo.total_system_energy();
        let engine = ExchangeEngine::new(EngineConfig::from_seconds(10.0).unwrap());

        engine.step(&mut topo, &mut ledger);
        assert_eq!(topo.total_system_energy(), 0.0);
        assert_eq!(ledger.clamp_events(), 1);
        let residual = ledger.conservation_residual(&topo, initial);
        assert!(residual.abs() < 1e-6 * ledger.total_lost_to_space_j());
    }

    #[test]
    fn step_advances_clock() {
        let mut b = TopologyBuilder::new();
        b.mirror();
        let mut topo = b.build().unwrap();
        let mut ledger = Ledger::new();
        let engine = ExchangeEngine::default();
        for _ in 0..5 {
            engine.step(&mut topo, &mut ledger);
        }
        assert_eq!(ledger.ticks(), 5);
        assert!((ledger.elapsed_s() - 5.0 * DT).abs() < 1e-12);
    }
}
