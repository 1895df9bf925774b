//! Built-in thought-experiment setups.

use crate::schema::{LATEST_VERSION, ParticipantDef, ReflectionDef, Scenario};

/// Room temperature for the Pictet setups, K.
const ROOM_K: f64 = 243.7;
/// Reservoir mass large enough to pin its temperature, kg.
const RESERVOIR_KG: f64 = 1_000_000.0;

pub const PRESET_NAMES: [&str; 8] = [
    "eli_rabett",
    "mirror_six_plates",
    "isolated_pair",
    "room_temperature_mirror",
    "pictet_room",
    "pictet_hot",
    "pictet_cold",
    "side_by_side",
];

pub fn preset(name: &str) -> Option<Scenario> {
    use ParticipantDef as P;

    let (description, participants) = match name {
        "eli_rabett" => (
            "Single plate (left) next to the two-plate setup (right), separated by a void",
            vec![
                P::heat_source(400.0, 0.0, 1.0),
                P::Void,
                P::heat_source(400.0, 0.0, 1.0),
                P::blackbody(0.0),
            ],
        ),
        "mirror_six_plates" => (
            "A mirror backing six plates at 500 K",
            std::iter::once(P::Mirror)
                .chain(std::iter::repeat_n(P::blackbody(500.0), 6))
                .collect(),
        ),
        "isolated_pair" => (
            "Two plates sealed between mirrors: nothing is lost",
            vec![P::Mirror, P::blackbody(500.0), P::blackbody(500.0), P::Mirror],
        ),
        "room_temperature_mirror" => (
            "Hot and cold plates relax toward the heat source's equilibrium",
            vec![
                P::Mirror,
                P::blackbody(500.0),
                P::blackbody(0.0),
                P::heat_source(400.0, 0.0, 1.0),
            ],
        ),
        "pictet_room" => (
            "Two plates between room-temperature reservoirs",
            pictet(ROOM_K),
        ),
        "pictet_hot" => ("A hot object next to a thermometer plate", pictet(500.0)),
        "pictet_cold" => ("A cold object next to a thermometer plate", pictet(0.0)),
        "side_by_side" => (
            "Two-sided slabs next to single-sided plates, split by a mirror",
            vec![
                P::two_sided(1.5),
                P::two_sided(1.5),
                P::heat_source(400.0, 0.0, 1.0),
                P::Mirror,
                P::heat_source(400.0, 0.0, 1.0),
                P::blackbody(0.0),
                P::blackbody(0.0),
            ],
        ),
        _ => return None,
    };

    Some(Scenario {
        version: LATEST_VERSION,
        name: name.to_string(),
        description: Some(description.to_string()),
        timestep_s: rl_core::constants::DEFAULT_TIMESTEP_S,
        reflection: ReflectionDef::Observed,
        participants,
    })
}

/// Reservoir, object at `object_k`, thermometer plate, reservoir.
fn pictet(object_k: f64) -> Vec<ParticipantDef> {
    vec![
        ParticipantDef::heat_source(200.0, ROOM_K, RESERVOIR_KG),
        ParticipantDef::blackbody(object_k),
        ParticipantDef::blackbody(ROOM_K),
        ParticipantDef::heat_source(200.0, ROOM_K, RESERVOIR_KG),
    ]
}

pub fn all_presets() -> Vec<Scenario> {
    PRESET_NAMES.iter().filter_map(|name| preset(name)).collect()
}
