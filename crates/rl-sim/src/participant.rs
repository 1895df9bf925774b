//! Participant variants and their emit / conduct / absorb rules.
//!
//! Each variant owns only its own state. Routing of emitted energy to
//! neighbors and to the ledger is done by the engine, which knows positions.

use core::fmt;

use rl_core::radiant_energy;

use crate::snapshot::Temperatures;
use crate::thermal::{Side, SideEnergy, ThermalBody};

/// Tag for each participant variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParticipantKind {
    Mirror,
    Void,
    Blackbody,
    HeatSource,
    TwoSidedBlackbody,
}

/// Capability table entry for a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub emits: bool,
    pub absorbs: bool,
    pub conducts: bool,
    pub reflects: bool,
}

impl ParticipantKind {
    pub const ALL: [ParticipantKind; 5] = [
        ParticipantKind::Mirror,
        ParticipantKind::Void,
        ParticipantKind::Blackbody,
        ParticipantKind::HeatSource,
        ParticipantKind::TwoSidedBlackbody,
    ];

    pub const fn capabilities(self) -> Capabilities {
        match self {
            ParticipantKind::Mirror => Capabilities {
                emits: false,
                absorbs: false,
                conducts: false,
                reflects: true,
            },
            ParticipantKind::Void => Capabilities {
                emits: false,
                absorbs: true,
                conducts: false,
                reflects: false,
            },
            ParticipantKind::Blackbody | ParticipantKind::HeatSource => Capabilities {
                emits: true,
                absorbs: true,
                conducts: false,
                reflects: false,
            },
            ParticipantKind::TwoSidedBlackbody => Capabilities {
                emits: true,
                absorbs: true,
                conducts: true,
                reflects: false,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParticipantKind::Mirror => "mirror",
            ParticipantKind::Void => "void",
            ParticipantKind::Blackbody => "blackbody",
            ParticipantKind::HeatSource => "heat_source",
            ParticipantKind::TwoSidedBlackbody => "two_sided_blackbody",
        }
    }
}

impl fmt::Display for ParticipantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one participant's emit step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EmitOutcome {
    /// Energy leaving each face this tick (J).
    pub emission: SideEnergy,
    /// Energy created by the non-negative temperature guard (J).
    pub clamp_j: f64,
}

/// Result of one participant's absorb step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AbsorbOutcome {
    /// Energy forwarded to the ledger as permanently lost (J).
    pub sunk_j: f64,
    /// Energy added from a constant power input (J).
    pub injected_j: f64,
    pub clamp_j: f64,
}

/// Absorbs everything and keeps nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Void {
    incoming: SideEnergy,
}

impl Void {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn absorb(&mut self) -> AbsorbOutcome {
        AbsorbOutcome {
            sunk_j: self.incoming.take().total(),
            ..AbsorbOutcome::default()
        }
    }
}

/// Single-temperature body radiating from both faces.
#[derive(Clone, Debug, PartialEq)]
pub struct Blackbody {
    body: ThermalBody,
    incoming: SideEnergy,
    last_emission: SideEnergy,
}

impl Blackbody {
    pub(crate) fn new(body: ThermalBody) -> Self {
        Self {
            body,
            incoming: SideEnergy::default(),
            last_emission: SideEnergy::default(),
        }
    }

    pub fn body(&self) -> &ThermalBody {
        &self.body
    }
}

/// Blackbody with a constant power input.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatSource {
    body: ThermalBody,
    power_w: f64,
    incoming: SideEnergy,
    last_emission: SideEnergy,
}

impl HeatSource {
    pub(crate) fn new(body: ThermalBody, power_w: f64) -> Self {
        Self {
            body,
            power_w,
            incoming: SideEnergy::default(),
            last_emission: SideEnergy::default(),
        }
    }

    pub fn body(&self) -> &ThermalBody {
        &self.body
    }

    pub fn power_w(&self) -> f64 {
        self.power_w
    }
}

/// Slab with independently radiating faces joined by conduction.
#[derive(Clone, Debug, PartialEq)]
pub struct TwoSidedBlackbody {
    left: ThermalBody,
    right: ThermalBody,
    conductivity_w_per_m_k: f64,
    area_m2: f64,
    width_m: f64,
    incoming: SideEnergy,
    last_emission: SideEnergy,
}

impl TwoSidedBlackbody {
    pub(crate) fn new(
        left: ThermalBody,
        right: ThermalBody,
        conductivity_w_per_m_k: f64,
        area_m2: f64,
        width_m: f64,
    ) -> Self {
        Self {
            left,
            right,
            conductivity_w_per_m_k,
            area_m2,
            width_m,
            incoming: SideEnergy::default(),
            last_emission: SideEnergy::default(),
        }
    }

    pub fn side(&self, side: Side) -> &ThermalBody {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut ThermalBody {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn conductivity_w_per_m_k(&self) -> f64 {
        self.conductivity_w_per_m_k
    }

    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    pub fn width_m(&self) -> f64 {
        self.width_m
    }

    /// Heat moved from the right face into the left face over `dt_s` (J).
    /// Negative when the left face is hotter.
    pub fn conducted_heat_j(&self, dt_s: f64) -> f64 {
        self.conductivity_w_per_m_k
            * self.area_m2
            * (self.right.temperature_k() - self.left.temperature_k())
            / self.width_m
            * dt_s
    }

    fn emit(&mut self, dt_s: f64) -> EmitOutcome {
        let mut outcome = EmitOutcome::default();
        for side in Side::BOTH {
            let energy_j = radiant_energy(self.side(side).temperature_k(), dt_s);
            outcome.emission.add(side, energy_j);
            outcome.clamp_j += self.side_mut(side).remove_energy(energy_j);
        }
        self.last_emission = outcome.emission;
        outcome
    }

    fn conduct(&mut self, dt_s: f64) -> f64 {
        let heat_j = self.conducted_heat_j(dt_s);
        if heat_j == 0.0 {
            return 0.0;
        }
        self.left.add_energy(heat_j) + self.right.remove_energy(heat_j)
    }

    fn absorb(&mut self) -> AbsorbOutcome {
        let incoming = self.incoming.take();
        let mut clamp_j = 0.0;
        for side in Side::BOTH {
            clamp_j += self.side_mut(side).add_energy(incoming.get(side));
        }
        AbsorbOutcome {
            clamp_j,
            ..AbsorbOutcome::default()
        }
    }
}

/// Emit from both faces of a single-temperature body, paying for both.
fn emit_single(body: &mut ThermalBody, last_emission: &mut SideEnergy, dt_s: f64) -> EmitOutcome {
    let energy_j = radiant_energy(body.temperature_k(), dt_s);
    let emission = SideEnergy::new(energy_j, energy_j);
    let clamp_j = body.remove_energy(emission.total());
    *last_emission = emission;
    EmitOutcome { emission, clamp_j }
}

/// A participant occupying one slot of the topology.
#[derive(Clone, Debug, PartialEq)]
pub enum Participant {
    Mirror,
    Void(Void),
    Blackbody(Blackbody),
    HeatSource(HeatSource),
    TwoSidedBlackbody(TwoSidedBlackbody),
}

impl Participant {
    pub fn kind(&self) -> ParticipantKind {
        match self {
            Participant::Mirror => ParticipantKind::Mirror,
            Participant::Void(_) => ParticipantKind::Void,
            Participant::Blackbody(_) => ParticipantKind::Blackbody,
            Participant::HeatSource(_) => ParticipantKind::HeatSource,
            Participant::TwoSidedBlackbody(_) => ParticipantKind::TwoSidedBlackbody,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind().capabilities()
    }

    /// Radiate for one timestep and lower own temperature accordingly.
    ///
    /// The returned emission still has to be routed by the caller.
    pub fn emit(&mut self, dt_s: f64) -> EmitOutcome {
        match self {
            Participant::Mirror | Participant::Void(_) => EmitOutcome::default(),
            Participant::Blackbody(b) => emit_single(&mut b.body, &mut b.last_emission, dt_s),
            Participant::HeatSource(h) => emit_single(&mut h.body, &mut h.last_emission, dt_s),
            Participant::TwoSidedBlackbody(t) => t.emit(dt_s),
        }
    }

    /// Internal conduction; returns clamp-created energy. No-op except for two-sided bodies.
    pub fn conduct(&mut self, dt_s: f64) -> f64 {
        match self {
            Participant::TwoSidedBlackbody(t) => t.conduct(dt_s),
            _ => 0.0,
        }
    }

    /// Fold buffered radiation into temperature and reset the buffers.
    pub fn absorb(&mut self, dt_s: f64) -> AbsorbOutcome {
        match self {
            Participant::Mirror => AbsorbOutcome::default(),
            Participant::Void(v) => v.absorb(),
            Participant::Blackbody(b) => AbsorbOutcome {
                clamp_j: b.body.add_energy(b.incoming.take().total()),
                ..AbsorbOutcome::default()
            },
            Participant::HeatSource(h) => {
                let injected_j = h.power_w * dt_s;
                let clamp_j = h.body.add_energy(h.incoming.take().total() + injected_j);
                AbsorbOutcome {
                    sunk_j: 0.0,
                    injected_j,
                    clamp_j,
                }
            }
            Participant::TwoSidedBlackbody(t) => t.absorb(),
        }
    }

    /// Add radiation arriving on `side` to the pending buffer.
    ///
    /// Mirrors have no buffer; energy aimed at them is reflected by the
    /// engine before it gets here, so this is a no-op for them.
    pub fn receive(&mut self, side: Side, energy_j: f64) {
        if let Some(buffer) = self.incoming_mut() {
            buffer.add(side, energy_j);
        }
    }

    fn incoming_mut(&mut self) -> Option<&mut SideEnergy> {
        match self {
            Participant::Mirror => None,
            Participant::Void(v) => Some(&mut v.incoming),
            Participant::Blackbody(b) => Some(&mut b.incoming),
            Participant::HeatSource(h) => Some(&mut h.incoming),
            Participant::TwoSidedBlackbody(t) => Some(&mut t.incoming),
        }
    }

    /// Pending (not yet absorbed) incoming radiation.
    pub fn incoming(&self) -> SideEnergy {
        match self {
            Participant::Mirror => SideEnergy::default(),
            Participant::Void(v) => v.incoming,
            Participant::Blackbody(b) => b.incoming,
            Participant::HeatSource(h) => h.incoming,
            Participant::TwoSidedBlackbody(t) => t.incoming,
        }
    }

    /// Energy radiated during the most recent emit phase.
    pub fn last_emission(&self) -> SideEnergy {
        match self {
            Participant::Mirror | Participant::Void(_) => SideEnergy::default(),
            Participant::Blackbody(b) => b.last_emission,
            Participant::HeatSource(h) => h.last_emission,
            Participant::TwoSidedBlackbody(t) => t.last_emission,
        }
    }

    pub fn temperatures(&self) -> Temperatures {
        match self {
            Participant::Mirror | Participant::Void(_) => Temperatures::None,
            Participant::Blackbody(b) => Temperatures::Single(b.body.temperature_k()),
            Participant::HeatSource(h) => Temperatures::Single(h.body.temperature_k()),
            Participant::TwoSidedBlackbody(t) => Temperatures::Split {
                left_k: t.left.temperature_k(),
                right_k: t.right.temperature_k(),
            },
        }
    }

    /// Stored thermal energy m·c·T, summed per side for two-sided bodies.
    pub fn thermal_energy_j(&self) -> f64 {
        match self {
            Participant::Mirror | Participant::Void(_) => 0.0,
            Participant::Blackbody(b) => b.body.energy_j(),
            Participant::HeatSource(h) => h.body.energy_j(),
            Participant::TwoSidedBlackbody(t) => t.left.energy_j() + t.right.energy_j(),
        }
    }

    pub fn power_input_w(&self) -> f64 {
        match self {
            Participant::HeatSource(h) => h.power_w,
            _ => 0.0,
        }
    }
}
