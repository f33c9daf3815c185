use crate::application::builder::ProcessDraft;
use crate::FlowError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Declarative definition of a process
///
/// A scenario describes its steps and routing to a [`ProcessDraft`]; the
/// builder turns that into a [`crate::Process`]. Building must be cheap and
/// free of side effects since it happens on every coordinator call.
pub trait ProcessScenario: Send + Sync {
    /// Describe the process
    fn build(&self, draft: &mut ProcessDraft<'_>) -> Result<(), FlowError>;
}

impl<F> ProcessScenario for F
where
    F: Fn(&mut ProcessDraft<'_>) -> Result<(), FlowError> + Send + Sync,
{
    fn build(&self, draft: &mut ProcessDraft<'_>) -> Result<(), FlowError> {
        self(draft)
    }
}

/// Scenarios by alias
///
/// Populated at startup; read-only while requests are served.
#[derive(Default, Clone)]
pub struct ScenarioRegistry {
    scenarios: HashMap<String, Arc<dyn ProcessScenario>>,
}

impl ScenarioRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scenario under a unique alias
    ///
    /// An alias that is already taken keeps its first scenario.
    pub fn register(
        &mut self,
        alias: impl Into<String>,
        scenario: Arc<dyn ProcessScenario>,
    ) -> Result<(), FlowError> {
        let alias = alias.into();
        if self.scenarios.contains_key(&alias) {
            return Err(FlowError::DuplicateScenario(alias));
        }

        info!(scenario = %alias, "Scenario registered");
        self.scenarios.insert(alias, scenario);
        Ok(())
    }

    /// Look up a scenario
    pub fn load(&self, alias: &str) -> Result<Arc<dyn ProcessScenario>, FlowError> {
        self.scenarios
            .get(alias)
            .cloned()
            .ok_or_else(|| FlowError::ScenarioNotFound(alias.to_string()))
    }

    /// Whether an alias is registered
    #[inline]
    pub fn contains(&self, alias: &str) -> bool {
        self.scenarios.contains_key(alias)
    }

    /// Registered aliases, sorted
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.scenarios.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }

    /// Number of registered scenarios
    #[inline]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether nothing is registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl fmt::Debug for ScenarioRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioRegistry")
            .field("aliases", &self.aliases())
            .finish()
    }
}
