use super::domain::PersonaType;
use super::scale::DifficultyScale;
use serde_json::{Map, Value};

const REQUIRED_TEXT_FIELDS: [&str; 3] = ["company", "role", "stakes"];

/// Read-only view over a raw scenario mapping that understands the field aliases
/// (`persona` for `persona_type`, `goals` for `user_goal`).
pub(crate) struct RawScenario<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> RawScenario<'a> {
    pub(crate) fn new(raw: &'a Value) -> Self {
        Self {
            fields: raw.as_object(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|fields| fields.get(key))
    }

    fn first_present(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|value| is_present(value))
    }

    pub(crate) fn persona(&self) -> Option<String> {
        self.first_present(&["persona_type", "persona"])
            .map(value_to_text)
    }

    pub(crate) fn goal(&self) -> Option<String> {
        self.first_present(&["user_goal", "goals"]).map(value_to_text)
    }

    pub(crate) fn text(&self, key: &str) -> Option<String> {
        self.get(key).filter(|value| is_present(value)).map(value_to_text)
    }

    /// `None` when absent or null, otherwise the parsed number (numeric strings accepted).
    pub(crate) fn difficulty(&self) -> Option<Result<f64, ()>> {
        match self.get("difficulty") {
            None | Some(Value::Null) => None,
            Some(Value::Number(number)) => Some(number.as_f64().ok_or(())),
            Some(Value::String(text)) => Some(text.trim().parse::<f64>().map_err(|_| ())),
            Some(_) => Some(Err(())),
        }
    }

    pub(crate) fn source_docs(&self) -> Vec<String> {
        match self.get("source_docs") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Validates a raw scenario mapping, returning every problem found (empty when valid).
/// Difficulty bounds follow the declared `scale`.
pub fn validate_scenario(raw: &Value, scale: DifficultyScale) -> Vec<String> {
    let fields = RawScenario::new(raw);
    let mut errors = Vec::new();

    let persona = fields.persona();
    if persona.is_none() {
        errors.push("missing required field: persona_type (or persona)".to_string());
    }

    if fields.goal().is_none() {
        errors.push("missing required field: user_goal (or goals)".to_string());
    }

    let difficulty = fields.difficulty();
    if difficulty.is_none() {
        errors.push("missing required field: difficulty".to_string());
    }

    for field in REQUIRED_TEXT_FIELDS {
        if fields.text(field).is_none() {
            errors.push(format!("missing required field: {field}"));
        }
    }

    if let Some(persona) = persona {
        if PersonaType::from_code(&persona).is_none() {
            errors.push(format!(
                "invalid persona_type: {persona}. Must be one of: {}",
                PersonaType::codes().join(", ")
            ));
        }
    }

    match difficulty {
        Some(Ok(value)) if !scale.contains(value) => {
            errors.push(range_message(scale));
        }
        Some(Err(())) => {
            let (min, max) = scale.bounds();
            errors.push(format!("difficulty must be a number between {min} and {max}"));
        }
        _ => {}
    }

    errors
}

fn range_message(scale: DifficultyScale) -> String {
    match scale {
        DifficultyScale::Normalized => {
            "difficulty must be between 0 and 1 (0 = easy, 1 = maximum pressure)".to_string()
        }
        DifficultyScale::Legacy => {
            "difficulty must be between 1 and 5 (1 = mild, 5 = maximum pressure)".to_string()
        }
    }
}

/// Names of the required fields that are absent or empty, in collection order.
pub fn missing_fields(raw: &Value) -> Vec<&'static str> {
    let fields = RawScenario::new(raw);
    let mut missing = Vec::new();

    if fields.persona().is_none() {
        missing.push("persona_type");
    }
    if fields.goal().is_none() {
        missing.push("user_goal");
    }
    if fields.difficulty().is_none() {
        missing.push("difficulty");
    }
    for field in REQUIRED_TEXT_FIELDS {
        if fields.text(field).is_none() {
            missing.push(field);
        }
    }

    missing
}

pub fn is_scenario_complete(raw: &Value, scale: DifficultyScale) -> bool {
    validate_scenario(raw, scale).is_empty()
}
