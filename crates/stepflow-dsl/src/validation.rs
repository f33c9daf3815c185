use crate::document::{ScenarioDefinition, ScenarioDocument};
use crate::error::DslError;
use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use stepflow_core::ProcessBuilder;

/// A validation error found in a scenario document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code (a constant identifier)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Optional path to the location of the error (e.g., "scenarios[0].steps")
    pub path: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl Error for ValidationError {}

/// Validation error codes
pub mod error_codes {
    /// Duplicate scenario alias or step name
    pub const DUPLICATE_ID: &str = "ERR_DSL_VALIDATION_DUPLICATE_ID";

    /// Missing required field
    pub const MISSING_REQUIRED_FIELD: &str = "ERR_DSL_VALIDATION_MISSING_REQUIRED_FIELD";

    /// Scenario without steps
    pub const EMPTY_SCENARIO: &str = "ERR_DSL_VALIDATION_EMPTY_SCENARIO";

    /// Step alias not known to the process builder
    pub const INVALID_REFERENCE: &str = "ERR_DSL_VALIDATION_INVALID_REFERENCE";
}

fn error(code: &'static str, message: String, path: String) -> ValidationError {
    ValidationError {
        code,
        message,
        path: Some(path),
    }
}

/// Validate the structure of a scenario document
///
/// Every problem is reported, not just the first one.
pub fn validate_document(document: &ScenarioDocument) -> Result<(), DslError> {
    let mut errors = Vec::new();
    let mut aliases = HashSet::with_capacity(document.scenarios.len());

    for (index, scenario) in document.scenarios.iter().enumerate() {
        let path = format!("scenarios[{}]", index);

        if scenario.alias.trim().is_empty() {
            errors.push(error(
                error_codes::MISSING_REQUIRED_FIELD,
                "Scenario alias must not be empty".to_string(),
                format!("{}.alias", path),
            ));
        } else if !aliases.insert(scenario.alias.as_str()) {
            errors.push(error(
                error_codes::DUPLICATE_ID,
                format!("Duplicate scenario alias: '{}'", scenario.alias),
                format!("{}.alias", path),
            ));
        }

        errors.extend(validate_scenario(scenario, &path));
    }

    match DslError::from_validation_errors(errors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn validate_scenario(scenario: &ScenarioDefinition, path: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if scenario.steps.is_empty() {
        errors.push(error(
            error_codes::EMPTY_SCENARIO,
            format!("Scenario '{}' declares no steps", scenario.alias),
            format!("{}.steps", path),
        ));
    }

    let mut names = HashSet::with_capacity(scenario.steps.len());
    for (index, entry) in scenario.steps.iter().enumerate() {
        if entry.name.trim().is_empty() || entry.step.trim().is_empty() {
            errors.push(error(
                error_codes::MISSING_REQUIRED_FIELD,
                "Step name and step alias must not be empty".to_string(),
                format!("{}.steps[{}]", path, index),
            ));
        } else if !names.insert(entry.name.as_str()) {
            errors.push(error(
                error_codes::DUPLICATE_ID,
                format!(
                    "Duplicate step name: '{}' - step names must be unique within a scenario",
                    entry.name
                ),
                format!("{}.steps[{}]", path, index),
            ));
        }
    }

    match &scenario.redirect {
        Some(redirect) if !redirect.route.trim().is_empty() => {}
        _ => errors.push(error(
            error_codes::MISSING_REQUIRED_FIELD,
            format!("Scenario '{}' declares no completion redirect", scenario.alias),
            format!("{}.redirect", path),
        )),
    }

    if let Some(display) = &scenario.display {
        if display.route.trim().is_empty() {
            errors.push(error(
                error_codes::MISSING_REQUIRED_FIELD,
                "Display route must not be empty".to_string(),
                format!("{}.display.route", path),
            ));
        }
    }

    errors
}

/// Check that every step alias in the document is registered with the builder
pub fn validate_step_references(
    document: &ScenarioDocument,
    builder: &ProcessBuilder,
) -> Result<(), DslError> {
    let errors: Vec<ValidationError> = document
        .scenarios
        .iter()
        .enumerate()
        .flat_map(|(scenario_index, scenario)| {
            scenario
                .steps
                .iter()
                .enumerate()
                .filter(move |(_, entry)| !builder.has_registered_step(&entry.step))
                .map(move |(step_index, entry)| {
                    error(
                        error_codes::INVALID_REFERENCE,
                        format!(
                            "Step '{}' of scenario '{}' refers to unregistered step alias '{}'",
                            entry.name, scenario.alias, entry.step
                        ),
                        format!("scenarios[{}].steps[{}].step", scenario_index, step_index),
                    )
                })
        })
        .collect();

    match DslError::from_validation_errors(errors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
