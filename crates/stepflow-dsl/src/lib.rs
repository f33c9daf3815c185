//! # Stepflow DSL
//!
//! Scenarios can be declared in YAML instead of code. A document lists
//! scenarios with their ordered steps (each naming a step implementation
//! registered with the [`ProcessBuilder`]), an optional custom display route
//! and the completion redirect. This crate parses, validates and registers
//! such documents.
//!
//! ## Example
//!
//! ```
//! use stepflow_dsl::parse_and_validate_scenarios;
//!
//! let yaml = r#"
//! dsl_version: "1.0"
//! scenarios:
//!   - alias: checkout
//!     steps:
//!       - name: info
//!         step: customer_info
//!       - name: payment
//!         step: payment
//!     redirect:
//!       route: checkout_thankyou
//! "#;
//!
//! let document = parse_and_validate_scenarios(yaml).unwrap();
//! assert_eq!(document.scenarios[0].steps.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod error;
mod parser;

/// Document validation rules and error codes
pub mod validation;

pub use document::{RouteDefinition, ScenarioDefinition, ScenarioDocument, StepEntry};
pub use error::DslError;
pub use parser::{parse_scenario_document, SUPPORTED_VERSION};
pub use validation::ValidationError;

use std::sync::Arc;
use stepflow_core::{FlowError, ProcessBuilder, ScenarioRegistry};
use tracing::info;

/// Parse and validate a scenario document
///
/// # Errors
///
/// * Invalid YAML syntax
/// * Unsupported DSL version
/// * Validation errors (duplicate aliases or step names, scenarios without
///   steps or without a completion redirect)
pub fn parse_and_validate_scenarios(yaml_str: &str) -> Result<ScenarioDocument, DslError> {
    let document = parse_scenario_document(yaml_str)?;
    validation::validate_document(&document)?;
    Ok(document)
}

/// Register every scenario of a validated document
///
/// Step aliases are checked against the builder first. Nothing is registered
/// when any step alias is unknown or any scenario alias is already taken.
/// Returns the registered aliases in document order.
pub fn register_scenarios(
    document: ScenarioDocument,
    registry: &mut ScenarioRegistry,
    builder: &ProcessBuilder,
) -> Result<Vec<String>, DslError> {
    validation::validate_step_references(&document, builder)?;

    if let Some(taken) = document
        .scenarios
        .iter()
        .find(|scenario| registry.contains(&scenario.alias))
    {
        return Err(FlowError::DuplicateScenario(taken.alias.clone()).into());
    }

    let mut registered = Vec::with_capacity(document.scenarios.len());
    for scenario in document.scenarios {
        let alias = scenario.alias.clone();
        let steps = scenario.steps.len();
        registry.register(alias.clone(), Arc::new(scenario))?;
        info!(scenario = %alias, steps, "Scenario loaded from document");
        registered.push(alias);
    }
    Ok(registered)
}

/// Parse, validate and register a YAML scenario document
pub fn load_scenarios(
    yaml_str: &str,
    registry: &mut ScenarioRegistry,
    builder: &ProcessBuilder,
) -> Result<Vec<String>, DslError> {
    let document = parse_and_validate_scenarios(yaml_str)?;
    register_scenarios(document, registry, builder)
}
