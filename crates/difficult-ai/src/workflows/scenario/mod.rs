//! Scenario context supplied by the caller: persona, stakes, goals, and difficulty.

mod domain;
mod scale;
mod validator;

pub use domain::{PersonaType, Scenario, ScenarioError};
pub use scale::{DifficultyScale, NormalizedDifficulty};
pub use validator::{is_scenario_complete, missing_fields, validate_scenario};
