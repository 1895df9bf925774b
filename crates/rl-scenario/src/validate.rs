//! Scenario validation logic.
//!
//! Field-level checks with paths into the file. The topology builder repeats
//! the physical checks, so a scenario that passes here always builds.

use rl_core::units::emissive_power;

use crate::schema::{LATEST_VERSION, ParticipantDef, Scenario};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Scenario has no participants")]
    Empty,

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: format!("{:?}", scenario.name),
            reason: "must not be empty".to_string(),
        });
    }

    if !scenario.timestep_s.is_finite() || scenario.timestep_s <= 0.0 {
        return Err(invalid("timestep_s", scenario.timestep_s, "must be positive"));
    }

    if scenario.participants.is_empty() {
        return Err(ValidationError::Empty);
    }

    for (index, participant) in scenario.participants.iter().enumerate() {
        validate_participant(index, participant)?;
    }

    Ok(())
}

fn validate_participant(index: usize, participant: &ParticipantDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("participants[{index}].{name}");
    let positive = |name: &str, v: f64| {
        if v.is_finite() && v > 0.0 {
            Ok(())
        } else {
            Err(invalid(&field(name), v, "must be positive"))
        }
    };
    let non_negative = |name: &str, v: f64| {
        if v.is_finite() && v >= 0.0 {
            Ok(())
        } else {
            Err(invalid(&field(name), v, "must be non-negative"))
        }
    };
    let temperature = |name: &str, v: f64| {
        non_negative(name, v)?;
        if emissive_power(v).is_finite() {
            Ok(())
        } else {
            Err(invalid(&field(name), v, "emission overflows"))
        }
    };
    let heat_capacity = |mass_name: &str, mass: f64, specific_heat_name: &str, specific_heat: f64| {
        positive(mass_name, mass)?;
        positive(specific_heat_name, specific_heat)?;
        if mass * specific_heat > 0.0 {
            Ok(())
        } else {
            Err(invalid(&field(mass_name), mass, "heat capacity underflows"))
        }
    };

    match participant {
        ParticipantDef::Mirror | ParticipantDef::Void => Ok(()),
        ParticipantDef::Blackbody {
            temperature_k,
            mass_kg,
            specific_heat,
        } => {
            temperature("temperature_k", *temperature_k)?;
            heat_capacity("mass_kg", *mass_kg, "specific_heat", *specific_heat)
        }
        ParticipantDef::HeatSource {
            watts,
            temperature_k,
            mass_kg,
            specific_heat,
        } => {
            non_negative("watts", *watts)?;
            temperature("temperature_k", *temperature_k)?;
            heat_capacity("mass_kg", *mass_kg, "specific_heat", *specific_heat)
        }
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
        } => {
            temperature("temperature_left_k", *temperature_left_k)?;
            temperature("temperature_right_k", *temperature_right_k)?;
            heat_capacity(
                "mass_left_kg",
                *mass_left_kg,
                "specific_heat_left",
                *specific_heat_left,
            )?;
            heat_capacity(
                "mass_right_kg",
                *mass_right_kg,
                "specific_heat_right",
                *specific_heat_right,
            )?;
            positive("width_m", *width_m)?;
            non_negative("conductivity", *conductivity)?;
            non_negative("area_m2", *area_m2)
        }
    }
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
