use crate::domain::context::ProcessContext;
use crate::domain::step::{ProcessStep, StepOutcome};
use crate::types::{Rendered, RouteParams};
use crate::FlowError;
use std::fmt;

/// Decides whether a context may run step logic and what to answer otherwise
pub trait ProcessValidator: Send + Sync {
    /// Whether the context is consistent enough to run the step
    fn is_valid(&self, context: &ProcessContext) -> bool;

    /// Outcome used in place of the step's own behavior when invalid
    fn response(&self, step: &ProcessStep) -> StepOutcome;
}

type Predicate = Box<dyn Fn(&ProcessContext) -> bool + Send + Sync>;

/// Validator built from a predicate
///
/// When invalid, it sends the client to `step_name` if one is set, otherwise
/// it renders a 400 carrying `message`.
pub struct GuardValidator {
    message: String,
    step_name: Option<String>,
    predicate: Predicate,
}

impl GuardValidator {
    /// Create a validator from a predicate and an error message
    pub fn new<F>(message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&ProcessContext) -> bool + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            step_name: None,
            predicate: Box::new(predicate),
        }
    }

    /// Redirect to a step instead of rendering an error
    pub fn redirect_to(mut self, step_name: impl Into<String>) -> Self {
        self.step_name = Some(step_name.into());
        self
    }

    /// Message rendered when no redirect step is set
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ProcessValidator for GuardValidator {
    fn is_valid(&self, context: &ProcessContext) -> bool {
        (self.predicate)(context)
    }

    fn response(&self, step: &ProcessStep) -> StepOutcome {
        match &self.step_name {
            Some(name) => step.proceed(name).into(),
            None => Rendered::error(400, self.message.clone()).into(),
        }
    }
}

impl fmt::Debug for GuardValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardValidator")
            .field("message", &self.message)
            .field("step_name", &self.step_name)
            .finish_non_exhaustive()
    }
}

/// The traversable form of a scenario
///
/// Built fresh for every coordinator call, so nothing here is mutated while a
/// request is served.
pub struct Process {
    scenario_alias: String,
    steps: Vec<ProcessStep>,
    display_route: Option<String>,
    display_route_params: RouteParams,
    redirect: Option<String>,
    redirect_params: RouteParams,
    validator: Option<Box<dyn ProcessValidator>>,
}

impl Process {
    /// Create an empty process for a scenario alias
    pub fn new(scenario_alias: impl Into<String>) -> Self {
        Self {
            scenario_alias: scenario_alias.into(),
            steps: Vec::new(),
            display_route: None,
            display_route_params: RouteParams::new(),
            redirect: None,
            redirect_params: RouteParams::new(),
            validator: None,
        }
    }

    /// Alias the process was built for
    #[inline]
    pub fn scenario_alias(&self) -> &str {
        &self.scenario_alias
    }

    /// Set the alias the process was built for
    pub fn set_scenario_alias(&mut self, alias: impl Into<String>) {
        self.scenario_alias = alias.into();
    }

    /// Append a step; names must be unique
    pub fn add_step(&mut self, step: ProcessStep) -> Result<(), FlowError> {
        if self.has_step(step.name()) {
            return Err(FlowError::DuplicateStep {
                scenario: self.scenario_alias.clone(),
                step: step.name().to_string(),
            });
        }
        self.steps.push(step);
        Ok(())
    }

    /// Remove a step by name
    pub fn remove_step(&mut self, name: &str) -> Option<ProcessStep> {
        let index = self.step_index(name)?;
        Some(self.steps.remove(index))
    }

    /// Whether a step with this name exists
    #[inline]
    pub fn has_step(&self, name: &str) -> bool {
        self.step_index(name).is_some()
    }

    /// Steps in traversal order
    #[inline]
    pub fn steps(&self) -> &[ProcessStep] {
        &self.steps
    }

    /// Step names in traversal order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(ProcessStep::name).collect()
    }

    /// Number of steps
    #[inline]
    pub fn count_steps(&self) -> usize {
        self.steps.len()
    }

    /// Position of a step in traversal order
    pub fn step_index(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.name() == name)
    }

    /// Step at a position
    #[inline]
    pub fn step_at(&self, index: usize) -> Option<&ProcessStep> {
        self.steps.get(index)
    }

    /// Resolve a step by name
    pub fn step_by_name(&self, name: &str) -> Result<&ProcessStep, FlowError> {
        self.steps
            .iter()
            .find(|step| step.name() == name)
            .ok_or_else(|| FlowError::step_not_found(&self.scenario_alias, name))
    }

    /// First step in traversal order
    pub fn first_step(&self) -> Result<&ProcessStep, FlowError> {
        self.steps.first().ok_or_else(|| {
            FlowError::Configuration(format!(
                "Scenario \"{}\" has no active steps",
                self.scenario_alias
            ))
        })
    }

    /// Last step in traversal order
    pub fn last_step(&self) -> Result<&ProcessStep, FlowError> {
        self.steps.last().ok_or_else(|| {
            FlowError::Configuration(format!(
                "Scenario \"{}\" has no active steps",
                self.scenario_alias
            ))
        })
    }

    /// Custom display route, if declared
    #[inline]
    pub fn display_route(&self) -> Option<&str> {
        self.display_route.as_deref()
    }

    /// Parameters merged into the custom display route
    #[inline]
    pub fn display_route_params(&self) -> &RouteParams {
        &self.display_route_params
    }

    /// Declare a custom display route
    pub fn set_display_route(&mut self, route: impl Into<String>) {
        self.display_route = Some(route.into());
    }

    /// Set the custom display route parameters
    pub fn set_display_route_params(&mut self, params: RouteParams) {
        self.display_route_params = params;
    }

    /// Route the client is sent to once the last step completes
    #[inline]
    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    /// Parameters for the completion route
    #[inline]
    pub fn redirect_params(&self) -> &RouteParams {
        &self.redirect_params
    }

    /// Set the completion route
    pub fn set_redirect(&mut self, route: impl Into<String>) {
        self.redirect = Some(route.into());
    }

    /// Set the completion route parameters
    pub fn set_redirect_params(&mut self, params: RouteParams) {
        self.redirect_params = params;
    }

    /// Process validator, if declared
    pub fn validator(&self) -> Option<&dyn ProcessValidator> {
        self.validator.as_deref()
    }

    /// Declare a process validator
    pub fn set_validator(&mut self, validator: Box<dyn ProcessValidator>) {
        self.validator = Some(validator);
    }
}

impl fmt::Debug for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process")
            .field("scenario_alias", &self.scenario_alias)
            .field("steps", &self.step_names())
            .field("display_route", &self.display_route)
            .field("redirect", &self.redirect)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}
