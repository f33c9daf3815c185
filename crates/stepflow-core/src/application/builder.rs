use crate::domain::process::{Process, ProcessValidator};
use crate::domain::scenario::ProcessScenario;
use crate::domain::step::{ProcessStep, Step};
use crate::types::RouteParams;
use crate::FlowError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Creates a fresh step instance for each built process
pub type StepFactory = Arc<dyn Fn() -> Box<dyn Step> + Send + Sync>;

/// Translates scenarios into processes
///
/// Holds the steps scenarios may refer to by alias. Each build creates new
/// step instances, so no step is ever shared between two processes.
#[derive(Default, Clone)]
pub struct ProcessBuilder {
    factories: HashMap<String, StepFactory>,
}

impl ProcessBuilder {
    /// Create a builder without registered steps
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a step available to scenarios under an alias
    pub fn register_step<F>(&mut self, alias: impl Into<String>, factory: F) -> Result<(), FlowError>
    where
        F: Fn() -> Box<dyn Step> + Send + Sync + 'static,
    {
        let alias = alias.into();
        if self.factories.contains_key(&alias) {
            return Err(FlowError::Configuration(format!(
                "Step with alias \"{}\" is already registered",
                alias
            )));
        }
        self.factories.insert(alias, Arc::new(factory));
        Ok(())
    }

    /// Whether a step alias is registered
    #[inline]
    pub fn has_registered_step(&self, alias: &str) -> bool {
        self.factories.contains_key(alias)
    }

    /// Build the process described by a scenario
    pub fn build(&self, alias: &str, scenario: &dyn ProcessScenario) -> Result<Process, FlowError> {
        let mut draft = ProcessDraft {
            process: Process::new(alias),
            factories: &self.factories,
        };
        scenario.build(&mut draft)?;
        draft.finish()
    }
}

impl fmt::Debug for ProcessBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut aliases: Vec<&String> = self.factories.keys().collect();
        aliases.sort();
        f.debug_struct("ProcessBuilder")
            .field("registered_steps", &aliases)
            .finish()
    }
}

/// A process being described by a scenario
pub struct ProcessDraft<'a> {
    process: Process,
    factories: &'a HashMap<String, StepFactory>,
}

impl ProcessDraft<'_> {
    /// Alias of the scenario being built
    pub fn scenario_alias(&self) -> &str {
        self.process.scenario_alias()
    }

    /// Append a step under a name. Inactive steps are skipped.
    pub fn add(&mut self, name: &str, step: Box<dyn Step>) -> Result<&mut Self, FlowError> {
        if !step.is_active() {
            debug!(
                scenario = %self.process.scenario_alias(),
                step = %name,
                "Skipping inactive step"
            );
            return Ok(self);
        }
        self.process.add_step(ProcessStep::new(name, step))?;
        Ok(self)
    }

    /// Append a registered step under a name
    pub fn add_registered(&mut self, name: &str, alias: &str) -> Result<&mut Self, FlowError> {
        let factory = self.factories.get(alias).ok_or_else(|| {
            FlowError::Configuration(format!("Step with alias \"{}\" is not registered", alias))
        })?;
        let step = factory();
        self.add(name, step)
    }

    /// Drop a previously added step
    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.process.remove_step(name);
        self
    }

    /// Whether a step was added under this name
    pub fn has(&self, name: &str) -> bool {
        self.process.has_step(name)
    }

    /// Use a custom display route
    pub fn set_display_route(&mut self, route: impl Into<String>) -> &mut Self {
        self.process.set_display_route(route);
        self
    }

    /// Parameters for the custom display route
    pub fn set_display_route_params(&mut self, params: RouteParams) -> &mut Self {
        self.process.set_display_route_params(params);
        self
    }

    /// Route the client lands on after the last step
    pub fn set_redirect(&mut self, route: impl Into<String>) -> &mut Self {
        self.process.set_redirect(route);
        self
    }

    /// Parameters for the completion route
    pub fn set_redirect_params(&mut self, params: RouteParams) -> &mut Self {
        self.process.set_redirect_params(params);
        self
    }

    /// Guard the process with a validator
    pub fn validate(&mut self, validator: impl ProcessValidator + 'static) -> &mut Self {
        self.process.set_validator(Box::new(validator));
        self
    }

    fn finish(self) -> Result<Process, FlowError> {
        self.process.first_step()?;
        if self.process.redirect().is_none() {
            return Err(FlowError::Configuration(format!(
                "Scenario \"{}\" declares no completion redirect",
                self.process.scenario_alias()
            )));
        }
        Ok(self.process)
    }
}
