//! Scenario schema definitions.

use rl_core::constants::DEFAULT_TIMESTEP_S;
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_timestep_s")]
    pub timestep_s: f64,
    #[serde(default)]
    pub reflection: ReflectionDef,
    /// Left to right.
    #[serde(default)]
    pub participants: Vec<ParticipantDef>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReflectionDef {
    #[default]
    Observed,
    SameSide,
    OppositeSide,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParticipantDef {
    Mirror,
    Void,
    Blackbody {
        #[serde(default)]
        temperature_k: f64,
        #[serde(default = "default_mass_kg")]
        mass_kg: f64,
        #[serde(default = "default_specific_heat")]
        specific_heat: f64,
    },
    HeatSource {
        #[serde(default = "default_watts")]
        watts: f64,
        #[serde(default)]
        temperature_k: f64,
        #[serde(default = "default_mass_kg")]
        mass_kg: f64,
        #[serde(default = "default_specific_heat")]
        specific_heat: f64,
    },
    TwoSidedBlackbody {
        #[serde(default)]
        temperature_left_k: f64,
        #[serde(default)]
        temperature_right_k: f64,
        #[serde(default = "default_specific_heat")]
        specific_heat_left: f64,
        #[serde(default = "default_specific_heat")]
        specific_heat_right: f64,
        #[serde(default = "default_face_mass_kg")]
        mass_left_kg: f64,
        #[serde(default = "default_face_mass_kg")]
        mass_right_kg: f64,
        #[serde(default = "default_width_m")]
        width_m: f64,
        #[serde(default = "default_conductivity")]
        conductivity: f64,
        #[serde(default = "default_area_m2")]
        area_m2: f64,
    },
}

impl ParticipantDef {
    pub fn blackbody(temperature_k: f64) -> Self {
        ParticipantDef::Blackbody {
            temperature_k,
            mass_kg: default_mass_kg(),
            specific_heat: default_specific_heat(),
        }
    }

    pub fn heat_source(watts: f64, temperature_k: f64, mass_kg: f64) -> Self {
        ParticipantDef::HeatSource {
            watts,
            temperature_k,
            mass_kg,
            specific_heat: default_specific_heat(),
        }
    }

    pub fn two_sided(conductivity: f64) -> Self {
        ParticipantDef::TwoSidedBlackbody {
            temperature_left_k: 0.0,
            temperature_right_k: 0.0,
            specific_heat_left: default_specific_heat(),
            specific_heat_right: default_specific_heat(),
            mass_left_kg: default_face_mass_kg(),
            mass_right_kg: default_face_mass_kg(),
            width_m: default_width_m(),
            conductivity,
            area_m2: default_area_m2(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ParticipantDef::Mirror => "mirror",
            ParticipantDef::Void => "void",
            ParticipantDef::Blackbody { .. } => "blackbody",
            ParticipantDef::HeatSource { .. } => "heat_source",
            ParticipantDef::TwoSidedBlackbody { .. } => "two_sided_blackbody",
        }
    }
}

fn default_timestep_s() -> f64 {
    DEFAULT_TIMESTEP_S
}

fn default_mass_kg() -> f64 {
    1.0
}

fn default_face_mass_kg() -> f64 {
    0.5
}

fn default_specific_heat() -> f64 {
    1.0
}

fn default_watts() -> f64 {
    400.0
}

fn default_width_m() -> f64 {
    1.0
}

fn default_conductivity() -> f64 {
    5.0
}

fn default_area_m2() -> f64 {
    1.0
}
