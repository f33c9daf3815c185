use serde::{Deserialize, Serialize};
use stepflow_core::{FlowError, ProcessDraft, ProcessScenario, RouteParams};

/// A scenario document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDocument {
    /// The DSL version (e.g., "1.0")
    pub dsl_version: String,

    /// Scenarios defined by the document
    #[serde(default)]
    pub scenarios: Vec<ScenarioDefinition>,
}

/// A named route with parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Route name
    pub route: String,

    /// Route parameters
    #[serde(default)]
    pub params: RouteParams,
}

/// One step of a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEntry {
    /// Step name, unique within the scenario
    pub name: String,

    /// Alias of the registered step implementation
    pub step: String,
}

/// A scenario defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Unique alias the scenario is registered under
    pub alias: String,

    /// Optional human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Steps in traversal order
    #[serde(default)]
    pub steps: Vec<StepEntry>,

    /// Custom display route
    #[serde(default)]
    pub display: Option<RouteDefinition>,

    /// Completion redirect
    #[serde(default)]
    pub redirect: Option<RouteDefinition>,
}

impl ProcessScenario for ScenarioDefinition {
    fn build(&self, draft: &mut ProcessDraft<'_>) -> Result<(), FlowError> {
        for entry in &self.steps {
            draft.add_registered(&entry.name, &entry.step)?;
        }

        if let Some(display) = &self.display {
            draft
                .set_display_route(display.route.clone())
                .set_display_route_params(display.params.clone());
        }

        if let Some(redirect) = &self.redirect {
            draft
                .set_redirect(redirect.route.clone())
                .set_redirect_params(redirect.params.clone());
        }

        Ok(())
    }
}
