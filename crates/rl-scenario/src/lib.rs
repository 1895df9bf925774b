//! rl-scenario: scenario file format, validation and built-in presets.

pub mod compile;
pub mod presets;
pub mod schema;
pub mod validate;

pub use presets::{PRESET_NAMES, all_presets, preset};
pub use schema::*;
pub use validate::{ValidationError, validate_scenario};

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(thiserror::Error, Debug)]
pub enum ScenarioError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Build error: {0}")]
    Build(#[from] rl_sim::SimError),

    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ScenarioResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    let scenario: Scenario = serde_yaml::from_str(&content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_yaml(path: &std::path::Path, scenario: &Scenario) -> ScenarioResult<()> {
    validate_scenario(scenario)?;
    let content = serde_yaml::to_string(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ScenarioResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_json(path: &std::path::Path, scenario: &Scenario) -> ScenarioResult<()> {
    validate_scenario(scenario)?;
    let content = serde_json::to_string_pretty(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` is JSON, anything else is YAML.
pub fn load(path: &std::path::Path) -> ScenarioResult<Scenario> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

/// Resolve a preset by name.
pub fn load_preset(name: &str) -> ScenarioResult<Scenario> {
    preset(name).ok_or_else(|| ScenarioError::UnknownPreset {
        name: name.to_string(),
    })
}
