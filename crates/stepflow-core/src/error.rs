use thiserror::Error;

/// Error type for scenario navigation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// No scenario is registered under the alias
    #[error("Process scenario with alias \"{0}\" is not registered")]
    ScenarioNotFound(String),

    /// The built process has no step with the requested name
    #[error("Step \"{step}\" not found in scenario \"{scenario}\"")]
    StepNotFound {
        /// Scenario alias
        scenario: String,
        /// Requested step name
        step: String,
    },

    /// A scenario alias was registered twice
    #[error("Process scenario with alias \"{0}\" is already registered")]
    DuplicateScenario(String),

    /// Two steps of one process share a name
    #[error("Step \"{step}\" is already defined in scenario \"{scenario}\"")]
    DuplicateStep {
        /// Scenario alias
        scenario: String,
        /// Duplicated step name
        step: String,
    },

    /// The requested step is absent from the recorded history
    #[error("Step \"{step}\" is not part of the recorded history")]
    HistoryLookupFailed {
        /// Step the context tried to rewind to
        step: String,
    },

    /// A step produced neither a response nor an action result
    #[error("Wrong action result from step \"{step}\", expected a response or an action result")]
    InvalidStepOutcome {
        /// Step that produced the outcome
        step: String,
    },

    /// Context was used before `initialize`
    #[error("Process context has not been initialized")]
    ContextNotInitialized,

    /// Context is invalid and no validator can answer for it
    #[error("Process context is invalid for step \"{step}\" and the process has no validator")]
    InvalidContext {
        /// Step that was requested
        step: String,
    },

    /// URL generation was asked for an unknown route
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// A route pattern placeholder had no value
    #[error("Route \"{route}\" requires parameter \"{parameter}\"")]
    MissingRouteParameter {
        /// Route name
        route: String,
        /// Missing placeholder
        parameter: String,
    },

    /// Session storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Scenario or settings configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FlowError {
    /// Whether the error should reach the end user as a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FlowError::ScenarioNotFound(_) | FlowError::StepNotFound { .. }
        )
    }

    pub(crate) fn step_not_found(scenario: &str, step: &str) -> Self {
        FlowError::StepNotFound {
            scenario: scenario.to_string(),
            step: step.to_string(),
        }
    }
}

impl From<serde_json::Error> for FlowError {
    fn from(err: serde_json::Error) -> Self {
        FlowError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for FlowError {
    fn from(err: serde_yaml::Error) -> Self {
        FlowError::Configuration(err.to_string())
    }
}

/// Result alias used across the crate
pub type FlowResult<T> = Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors = vec![
            (
                FlowError::ScenarioNotFound("checkout".to_string()),
                "Process scenario with alias \"checkout\" is not registered",
            ),
            (
                FlowError::DuplicateScenario("checkout".to_string()),
                "Process scenario with alias \"checkout\" is already registered",
            ),
            (
                FlowError::step_not_found("checkout", "payment"),
                "Step \"payment\" not found in scenario \"checkout\"",
            ),
            (
                FlowError::HistoryLookupFailed { step: "review".to_string() },
                "Step \"review\" is not part of the recorded history",
            ),
            (
                FlowError::RouteNotFound("nowhere".to_string()),
                "Route not found: nowhere",
            ),
        ];

        for (error, expected_msg) in errors {
            assert_eq!(error.to_string(), expected_msg);
        }
    }

    #[test]
    fn test_not_found_classification() {
        assert!(FlowError::ScenarioNotFound("a".into()).is_not_found());
        assert!(FlowError::step_not_found("a", "b").is_not_found());
        assert!(!FlowError::DuplicateScenario("a".into()).is_not_found());
        assert!(!FlowError::InvalidStepOutcome { step: "b".into() }.is_not_found());
        assert!(!FlowError::HistoryLookupFailed { step: "b".into() }.is_not_found());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error: FlowError = json_error.into();

        match error {
            FlowError::Serialization(msg) => assert!(msg.contains("expected value")),
            _ => panic!("Expected Serialization variant"),
        }
    }
}
