//! Scenario → runnable simulation.

use rl_sim::{
    BlackbodySpec, EngineConfig, HeatSourceSpec, ParticipantSpec, ReflectionConvention,
    SimResult, Simulation, Topology, TopologyBuilder, TwoSidedSpec,
};

use crate::schema::{ParticipantDef, ReflectionDef, Scenario};
use crate::validate::validate_scenario;
use crate::ScenarioResult;

impl From<ReflectionDef> for ReflectionConvention {
    fn from(def: ReflectionDef) -> Self {
        match def {
            ReflectionDef::Observed => ReflectionConvention::Observed,
            ReflectionDef::SameSide => ReflectionConvention::SameSide,
            ReflectionDef::OppositeSide => ReflectionConvention::OppositeSide,
        }
    }
}

impl From<&ParticipantDef> for ParticipantSpec {
    fn from(def: &ParticipantDef) -> Self {
        match *def {
            ParticipantDef::Mirror => ParticipantSpec::Mirror,
            ParticipantDef::Void => ParticipantSpec::Void,
            ParticipantDef::Blackbody {
                temperature_k,
                mass_kg,
                specific_heat,
            } => ParticipantSpec::Blackbody(body(temperature_k, mass_kg, specific_heat)),
            ParticipantDef::HeatSource {
                watts,
                temperature_k,
                mass_kg,
                specific_heat,
            } => ParticipantSpec::HeatSource(HeatSourceSpec {
                power_w: watts,
                body: body(temperature_k, mass_kg, specific_heat),
            }),
            ParticipantDef::TwoSidedBlackbody {
                temperature_left_k,
                temperature_right_k,
                specific_heat_left,
                specific_heat_right,
                mass_left_kg,
                mass_right_kg,
                width_m,
                conductivity,
                area_m2,
            } => ParticipantSpec::TwoSidedBlackbody(TwoSidedSpec {
                left: body(temperature_left_k, mass_left_kg, specific_heat_left),
                right: body(temperature_right_k, mass_right_kg, specific_heat_right),
                conductivity_w_per_m_k: conductivity,
                area_m2,
                width_m,
            }),
        }
    }
}

fn body(temperature_k: f64, mass_kg: f64, specific_heat_j_per_kg_k: f64) -> BlackbodySpec {
    BlackbodySpec {
        temperature_k,
        mass_kg,
        specific_heat_j_per_kg_k,
    }
}

impl Scenario {
    pub fn topology(&self) -> SimResult<Topology> {
        self.participants
            .iter()
            .map(ParticipantSpec::from)
            .collect::<TopologyBuilder>()
            .build()
    }

    pub fn engine_config(&self) -> SimResult<EngineConfig> {
        Ok(EngineConfig::from_seconds(self.timestep_s)?.with_reflection(self.reflection.into()))
    }

    /// Validate, build the topology and wrap it in a fresh simulation.
    pub fn into_simulation(&self) -> ScenarioResult<Simulation> {
        validate_scenario(self)?;
        Ok(Simulation::new(self.topology()?, self.engine_config()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LATEST_VERSION;
    use rl_sim::ParticipantKind;

    #[test]
    fn compiles_participants_in_order() {
        let scenario = Scenario {
            version: LATEST_VERSION,
            name: "order".to_string(),
            description: None,
            timestep_s: 5e-4,
            reflection: ReflectionDef::SameSide,
            participants: vec![
                ParticipantDef::Mirror,
                ParticipantDef::blackbody(500.0),
                ParticipantDef::two_sided(1.5),
                ParticipantDef::Void,
            ],
        };
        let sim = scenario.into_simulation().unwrap();
        let kinds: Vec<ParticipantKind> =
            sim.topology().participants().iter().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ParticipantKind::Mirror,
                ParticipantKind::Blackbody,
                ParticipantKind::TwoSidedBlackbody,
                ParticipantKind::Void,
            ]
        );
        let cfg = sim.engine().config();
        assert_eq!(cfg.timestep_s(), 5e-4);
        assert_eq!(cfg.reflection(), ReflectionConvention::SameSide);
        assert_eq!(sim.initial_energy_j(), 500.0);
    }

    #[test]
    fn invalid_scenario_does_not_compile() {
        let scenario = Scenario {
            version: LATEST_VERSION,
            name: "bad".to_string(),
            description: None,
            timestep_s: 1e-3,
            reflection: ReflectionDef::Observed,
            participants: vec![ParticipantDef::Blackbody {
                temperature_k: 10.0,
                mass_kg: 1.0,
                specific_heat: 0.0,
            }],
        };
        assert!(scenario.into_simulation().is_err());
        assert!(scenario.topology().is_err());
    }
}
