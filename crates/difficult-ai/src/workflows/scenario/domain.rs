use super::scale::{DifficultyScale, NormalizedDifficulty};
use super::validator::{self, RawScenario};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Counterparts the adversary can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonaType {
    AngryCustomer,
    EliteInterviewer,
    ToughNegotiator,
    SkepticalInvestor,
    DemandingClient,
}

impl PersonaType {
    pub const fn ordered() -> [PersonaType; 5] {
        [
            PersonaType::AngryCustomer,
            PersonaType::EliteInterviewer,
            PersonaType::ToughNegotiator,
            PersonaType::SkepticalInvestor,
            PersonaType::DemandingClient,
        ]
    }

    /// Wire code, e.g. `ANGRY_CUSTOMER`.
    pub const fn code(self) -> &'static str {
        match self {
            PersonaType::AngryCustomer => "ANGRY_CUSTOMER",
            PersonaType::EliteInterviewer => "ELITE_INTERVIEWER",
            PersonaType::ToughNegotiator => "TOUGH_NEGOTIATOR",
            PersonaType::SkepticalInvestor => "SKEPTICAL_INVESTOR",
            PersonaType::DemandingClient => "DEMANDING_CLIENT",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PersonaType::AngryCustomer => "angry customer",
            PersonaType::EliteInterviewer => "elite interviewer",
            PersonaType::ToughNegotiator => "tough negotiator",
            PersonaType::SkepticalInvestor => "skeptical investor",
            PersonaType::DemandingClient => "demanding client",
        }
    }

    /// Exact (case-sensitive) match against the wire code.
    pub fn from_code(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|persona| persona.code() == value)
    }

    /// Lenient parse used by the CLI: trims, uppercases, and accepts spaces or dashes.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        Self::from_code(&normalized)
    }

    pub fn codes() -> Vec<&'static str> {
        Self::ordered().into_iter().map(PersonaType::code).collect()
    }
}

impl fmt::Display for PersonaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Validated scenario context. Difficulty is always stored on the normalized scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(alias = "persona")]
    pub persona_type: PersonaType,
    pub company: String,
    pub role: String,
    pub stakes: String,
    #[serde(alias = "goals")]
    pub user_goal: String,
    pub difficulty: NormalizedDifficulty,
    #[serde(default)]
    pub source_docs: Vec<String>,
}

impl Scenario {
    /// Validates a raw scenario mapping and converts its difficulty from `scale` once.
    pub fn from_value(raw: &Value, scale: DifficultyScale) -> Result<Self, ScenarioError> {
        let errors = validator::validate_scenario(raw, scale);
        if !errors.is_empty() {
            return Err(ScenarioError::Invalid(errors));
        }

        let fields = RawScenario::new(raw);
        let persona_code = fields.persona().unwrap_or_default();
        let persona_type = PersonaType::from_code(&persona_code)
            .ok_or_else(|| ScenarioError::UnknownPersona(persona_code.clone()))?;
        let difficulty = fields
            .difficulty()
            .and_then(|value| value.ok())
            .map(|raw| scale.normalize(raw))
            .ok_or_else(|| ScenarioError::Invalid(vec!["missing required field: difficulty".to_string()]))?;

        Ok(Self {
            persona_type,
            company: fields.text("company").unwrap_or_default(),
            role: fields.text("role").unwrap_or_default(),
            stakes: fields.text("stakes").unwrap_or_default(),
            user_goal: fields.goal().unwrap_or_default(),
            difficulty,
            source_docs: fields.source_docs(),
        })
    }
}

/// Raised when a scenario mapping cannot be turned into a [`Scenario`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScenarioError {
    #[error("invalid scenario: {}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("unknown persona type '{0}'")]
    UnknownPersona(String),
}

impl ScenarioError {
    pub fn messages(&self) -> Vec<String> {
        match self {
            ScenarioError::Invalid(errors) => errors.clone(),
            ScenarioError::UnknownPersona(_) => vec![self.to_string()],
        }
    }
}
