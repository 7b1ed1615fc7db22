use std::collections::BTreeMap;

use rh_core::RehostError;

// Answers the client's named-parameter protocol. Built once at adapter
// construction, immutable afterwards.
pub trait ParameterSource {
    fn resolve(&self, name: &str) -> Option<String>;
}

// The embedding environment's own parameter lookup (the browser container
// the client used to live in). Lookups may fail; an unresolved parameter
// is a normal outcome the client tolerates.
pub trait EnvironmentParameters {
    fn lookup(&self, name: &str) -> Result<Option<String>, RehostError>;
}

const FIXED_ANSWERS: &[(&str, &str)] = &[
    // shows the quit button
    ("stand-alone", "true"),
    // lets the player save their progress
    ("haspaid", "true"),
    ("demo", "false"),
    ("fullscreen", "false"),
];

fn fixed_answer(name: &str) -> Option<String> {
    FIXED_ANSWERS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| (*value).to_string())
}

// Fixed table first, then the embedding environment when one is attached.
// Environment failures are swallowed, the only place in the system where a
// failure is.
#[derive(Default)]
pub struct FixedAnswers {
    environment: Option<Box<dyn EnvironmentParameters>>,
}

impl FixedAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(environment: Box<dyn EnvironmentParameters>) -> Self {
        Self {
            environment: Some(environment),
        }
    }
}

impl ParameterSource for FixedAnswers {
    fn resolve(&self, name: &str) -> Option<String> {
        if let Some(value) = fixed_answer(name) {
            return Some(value);
        }
        let environment = self.environment.as_ref()?;
        environment.lookup(name).unwrap_or(None)
    }
}

// The caller's table wins outright, then the fixed table. There is no
// embedding environment to fall back to.
pub struct OverrideTable {
    overrides: BTreeMap<String, String>,
}

impl OverrideTable {
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Self { overrides }
    }
}

impl ParameterSource for OverrideTable {
    fn resolve(&self, name: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(name) {
            return Some(value.clone());
        }
        fixed_answer(name)
    }
}
