use crate::document::ScenarioDocument;
use crate::error::DslError;

/// DSL versions this crate understands
pub const SUPPORTED_VERSION: &str = "1.0";

/// Parse a YAML string into a ScenarioDocument.
///
/// Only the document shape and version are checked here; structural rules
/// are enforced by the validation module.
pub fn parse_scenario_document(yaml_str: &str) -> Result<ScenarioDocument, DslError> {
    let document: ScenarioDocument = serde_yaml::from_str(yaml_str)?;

    if document.dsl_version != SUPPORTED_VERSION {
        return Err(DslError::UnsupportedVersion(document.dsl_version));
    }

    Ok(document)
}
