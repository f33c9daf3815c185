//! Request-level navigation through scenarios
//!
//! Every entry point builds the process afresh, binds it to the session
//! context, decides whether step logic may run, and turns the step outcome
//! into either a terminal response or a redirect naming the next step.

use crate::application::builder::ProcessBuilder;
use crate::config::{FlowSettings, ParameterPrecedence};
use crate::domain::context::ProcessContext;
use crate::domain::process::Process;
use crate::domain::router::UrlGenerator;
use crate::domain::scenario::{ProcessScenario, ScenarioRegistry};
use crate::domain::step::{ProcessStep, StepOutcome};
use crate::types::{FlowResponse, Redirect, RouteParams, SCENARIO_ALIAS_PARAM, STEP_NAME_PARAM};
use crate::FlowError;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepAction {
    Display,
    Forward,
}

/// Drives scenarios for incoming requests
///
/// Constructed once at startup. Request handling only needs `&self`, the
/// per-session state travels in the [`ProcessContext`] passed to each call.
pub struct Coordinator {
    router: Arc<dyn UrlGenerator>,
    builder: ProcessBuilder,
    registry: ScenarioRegistry,
    settings: FlowSettings,
}

impl Coordinator {
    /// Create a coordinator with default settings
    pub fn new(
        router: Arc<dyn UrlGenerator>,
        builder: ProcessBuilder,
        registry: ScenarioRegistry,
    ) -> Self {
        Self {
            router,
            builder,
            registry,
            settings: FlowSettings::default(),
        }
    }

    /// Replace the settings
    pub fn with_settings(mut self, settings: FlowSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Active settings
    #[inline]
    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Registered scenarios
    #[inline]
    pub fn registry(&self) -> &ScenarioRegistry {
        &self.registry
    }

    /// Start a scenario from its first step
    ///
    /// Resets the stored flow state and redirects to the first step's display
    /// endpoint, forwarding `query` parameters.
    pub fn start(
        &self,
        context: &mut ProcessContext,
        scenario_alias: &str,
        query: Option<&RouteParams>,
    ) -> Result<FlowResponse, FlowError> {
        let process = self.build_process(scenario_alias)?;
        let step = process.first_step()?;

        context.initialize(Arc::clone(&process), step.name())?;
        context.close()?;

        if !context.is_valid()? {
            debug!(scenario = %scenario_alias, step = %step.name(), "Context invalid at start");
            let outcome = Self::validation_outcome(&process, step)?;
            return self.process_step_result(context, &process, step.name(), Some(outcome), query);
        }

        info!(scenario = %scenario_alias, step = %step.name(), "Scenario started");
        self.redirect_to_step_display(context, &process, step.name(), query)
    }

    /// Display a step
    pub fn display(
        &self,
        context: &mut ProcessContext,
        scenario_alias: &str,
        step_name: &str,
        query: Option<&RouteParams>,
    ) -> Result<FlowResponse, FlowError> {
        self.handle_step(context, scenario_alias, step_name, StepAction::Display, query)
    }

    /// Submit a step
    pub fn forward(
        &self,
        context: &mut ProcessContext,
        scenario_alias: &str,
        step_name: &str,
    ) -> Result<FlowResponse, FlowError> {
        self.handle_step(context, scenario_alias, step_name, StepAction::Forward, None)
    }

    /// Register a scenario under a unique alias
    pub fn register_scenario(
        &mut self,
        alias: impl Into<String>,
        scenario: Arc<dyn ProcessScenario>,
    ) -> Result<(), FlowError> {
        self.registry.register(alias, scenario)
    }

    /// Look up a registered scenario
    pub fn load_scenario(&self, alias: &str) -> Result<Arc<dyn ProcessScenario>, FlowError> {
        self.registry.load(alias)
    }

    /// Turn a step outcome into the response for the caller
    ///
    /// `None` means the step produced nothing usable, which is a defect in
    /// the step rather than a navigation problem.
    pub fn process_step_result(
        &self,
        context: &mut ProcessContext,
        process: &Process,
        step_name: &str,
        outcome: Option<StepOutcome>,
        query: Option<&RouteParams>,
    ) -> Result<FlowResponse, FlowError> {
        let result = match outcome {
            Some(StepOutcome::Response(response)) => return Ok(response),
            Some(StepOutcome::Action(result)) => result,
            None => {
                return Err(FlowError::InvalidStepOutcome {
                    step: step_name.to_string(),
                })
            }
        };

        // Explicit jump
        if let Some(next) = result.next_step_name() {
            context.set_next_step_by_name(next)?;
            debug!(scenario = %process.scenario_alias(), from = %step_name, to = %next, "Jumping to step");
            return self.redirect_to_step_display(context, process, next, query);
        }

        // Last step
        if context.is_last_step() {
            context.close()?;
            return self.redirect_to_completion(process);
        }

        // Linear order
        let next = context
            .next_step()
            .map(|step| step.name().to_string())
            .ok_or_else(|| FlowError::InvalidStepOutcome {
                step: step_name.to_string(),
            })?;
        self.redirect_to_step_display(context, process, &next, query)
    }

    fn handle_step(
        &self,
        context: &mut ProcessContext,
        scenario_alias: &str,
        step_name: &str,
        action: StepAction,
        query: Option<&RouteParams>,
    ) -> Result<FlowResponse, FlowError> {
        let process = self.build_process(scenario_alias)?;
        let step = process.step_by_name(step_name)?;

        context.initialize(Arc::clone(&process), step_name)?;

        match context.rewind_history() {
            Ok(()) => {}
            Err(FlowError::HistoryLookupFailed { step }) => {
                warn!(
                    scenario = %scenario_alias,
                    step = %step,
                    action = ?action,
                    "Step not reached yet, falling back"
                );
                return self.go_to_last_valid_step(context, &process, scenario_alias, query);
            }
            Err(err) => return Err(err),
        }

        let outcome = if context.is_valid()? {
            debug!(scenario = %scenario_alias, step = %step_name, action = ?action, "Running step");
            match action {
                StepAction::Display => Some(step.display_action(context)),
                StepAction::Forward => step.forward_action(context),
            }
        } else {
            debug!(scenario = %scenario_alias, step = %step_name, "Context invalid, asking validator");
            Some(Self::validation_outcome(&process, step)?)
        };

        self.process_step_result(context, &process, step_name, outcome, query)
    }

    /// Repair navigation to a step that was never reached: the previous step
    /// when it was recorded, else the last recorded step, else a fresh start.
    fn go_to_last_valid_step(
        &self,
        context: &mut ProcessContext,
        process: &Arc<Process>,
        scenario_alias: &str,
        query: Option<&RouteParams>,
    ) -> Result<FlowResponse, FlowError> {
        let history = context.step_history()?;

        let previous = context
            .previous_step()
            .map(|step| step.name().to_string())
            .filter(|name| history.contains(name));
        if let Some(previous) = previous {
            debug!(scenario = %scenario_alias, step = %previous, "Falling back to previous step");
            return self.resume_at(context, process, history, &previous, query);
        }

        match history.last().cloned() {
            Some(last) => {
                debug!(scenario = %scenario_alias, step = %last, "Falling back to last recorded step");
                self.resume_at(context, process, history, &last, query)
            }
            None => {
                info!(scenario = %scenario_alias, "No recorded history, restarting scenario");
                self.start(context, scenario_alias, query)
            }
        }
    }

    /// Make a recorded step current again and redirect to it
    ///
    /// The history is cut below the step's last entry so the redirect
    /// records it exactly once.
    fn resume_at(
        &self,
        context: &mut ProcessContext,
        process: &Arc<Process>,
        mut history: Vec<String>,
        step_name: &str,
        query: Option<&RouteParams>,
    ) -> Result<FlowResponse, FlowError> {
        if let Some(index) = history.iter().rposition(|name| name == step_name) {
            history.truncate(index);
        }
        context.initialize(Arc::clone(process), step_name)?;
        context.set_step_history(history)?;
        self.redirect_to_step_display(context, process, step_name, query)
    }

    /// Record the target step and redirect to its display endpoint
    fn redirect_to_step_display(
        &self,
        context: &mut ProcessContext,
        process: &Process,
        step_name: &str,
        query: Option<&RouteParams>,
    ) -> Result<FlowResponse, FlowError> {
        context.add_step_to_history(step_name)?;

        let (route, params) = match process.display_route() {
            Some(route) => {
                let mut params = process.display_route_params().clone();
                match self.settings.parameter_precedence {
                    ParameterPrecedence::RouteWins => {
                        params.extend(query.into_iter().flatten().map(|(k, v)| (k.clone(), v.clone())));
                        params.insert(STEP_NAME_PARAM.to_string(), step_name.to_string());
                    }
                    ParameterPrecedence::Legacy => {
                        params.insert(STEP_NAME_PARAM.to_string(), step_name.to_string());
                        params.extend(query.into_iter().flatten().map(|(k, v)| (k.clone(), v.clone())));
                    }
                }
                (route.to_string(), params)
            }
            None => {
                let mut params: RouteParams = query.cloned().unwrap_or_default();
                params.insert(
                    SCENARIO_ALIAS_PARAM.to_string(),
                    process.scenario_alias().to_string(),
                );
                params.insert(STEP_NAME_PARAM.to_string(), step_name.to_string());
                (self.settings.default_display_route.clone(), params)
            }
        };

        let url = self.router.generate(&route, &params)?;
        debug!(step = %step_name, route = %route, url = %url, "Redirecting to step display");
        Ok(FlowResponse::Redirect(Redirect { route, params, url }))
    }

    fn redirect_to_completion(&self, process: &Process) -> Result<FlowResponse, FlowError> {
        let route = process.redirect().ok_or_else(|| {
            FlowError::Configuration(format!(
                "Scenario \"{}\" declares no completion redirect",
                process.scenario_alias()
            ))
        })?;
        let params = process.redirect_params().clone();
        let url = self.router.generate(route, &params)?;

        info!(scenario = %process.scenario_alias(), route = %route, "Scenario completed");
        Ok(FlowResponse::Redirect(Redirect {
            route: route.to_string(),
            params,
            url,
        }))
    }

    fn validation_outcome(process: &Process, step: &ProcessStep) -> Result<StepOutcome, FlowError> {
        process
            .validator()
            .map(|validator| validator.response(step))
            .ok_or_else(|| FlowError::InvalidContext {
                step: step.name().to_string(),
            })
    }

    fn build_process(&self, scenario_alias: &str) -> Result<Arc<Process>, FlowError> {
        let scenario = self.load_scenario(scenario_alias)?;
        let mut process = self.builder.build(scenario_alias, scenario.as_ref())?;
        process.set_scenario_alias(scenario_alias);
        Ok(Arc::new(process))
    }
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("builder", &self.builder)
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::builder::ProcessDraft;
    use crate::domain::context::ContextState;
    use crate::domain::process::GuardValidator;
    use crate::domain::router::PatternRouter;
    use crate::domain::step::Step;
    use crate::domain::storage::memory::MemoryFlowStorage;
    use crate::types::{route_params, Rendered};
    use mockall::mock;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Renders on display; forward is configurable
    struct TestStep {
        forward: fn(&TestStep) -> Option<StepOutcome>,
    }

    impl TestStep {
        fn completing() -> Box<dyn Step> {
            Box::new(TestStep {
                forward: |step| Some(step.complete().into()),
            })
        }

        fn jumping_to_review() -> Box<dyn Step> {
            Box::new(TestStep {
                forward: |step| Some(step.proceed("review").into()),
            })
        }

        fn silent() -> Box<dyn Step> {
            Box::new(TestStep { forward: |_| None })
        }
    }

    impl Step for TestStep {
        fn display_action(&self, context: &mut ProcessContext) -> StepOutcome {
            let step = context.current_step_name().unwrap_or_default().to_string();
            Rendered::ok(format!("{}.html", step), json!({ "progress": context.progress() })).into()
        }

        fn forward_action(&self, _context: &mut ProcessContext) -> Option<StepOutcome> {
            (self.forward)(self)
        }
    }

    fn checkout(draft: &mut ProcessDraft<'_>) -> Result<(), FlowError> {
        draft
            .add("info", TestStep::completing())?
            .add("payment", TestStep::jumping_to_review())?
            .add("shipping", TestStep::completing())?
            .add("review", TestStep::completing())?;
        draft
            .set_redirect("checkout_thankyou")
            .set_redirect_params(route_params([("order", "42")]));
        Ok(())
    }

    fn broken(draft: &mut ProcessDraft<'_>) -> Result<(), FlowError> {
        draft.add("only", TestStep::silent())?;
        draft.set_redirect("done");
        Ok(())
    }

    fn guarded(draft: &mut ProcessDraft<'_>) -> Result<(), FlowError> {
        draft.add("info", TestStep::completing())?.add("payment", TestStep::completing())?;
        draft
            .set_redirect("done")
            .validate(GuardValidator::new("Cart is empty", |_| false));
        Ok(())
    }

    fn custom_route(draft: &mut ProcessDraft<'_>) -> Result<(), FlowError> {
        draft.add("info", TestStep::completing())?;
        draft
            .set_display_route("wizard")
            .set_display_route_params(route_params([("locale", "fr"), ("stepName", "ignored")]))
            .set_redirect("done");
        Ok(())
    }

    fn router() -> Arc<dyn UrlGenerator> {
        Arc::new(
            PatternRouter::new()
                .with_route("stepflow_display", "/flow/{scenarioAlias}/{stepName}")
                .with_route("wizard", "/{locale}/wizard/{stepName}")
                .with_route("checkout_thankyou", "/thank-you/{order}")
                .with_route("done", "/done"),
        )
    }

    fn coordinator() -> Coordinator {
        let mut registry = ScenarioRegistry::new();
        registry.register("checkout", Arc::new(checkout)).unwrap();
        registry.register("broken", Arc::new(broken)).unwrap();
        registry.register("guarded", Arc::new(guarded)).unwrap();
        registry.register("custom", Arc::new(custom_route)).unwrap();
        Coordinator::new(router(), ProcessBuilder::new(), registry)
    }

    fn context() -> ProcessContext {
        ProcessContext::new(Box::new(MemoryFlowStorage::new()))
    }

    fn url(response: &FlowResponse) -> &str {
        &response.as_redirect().expect("expected a redirect").url
    }

    #[test]
    fn test_start_redirects_to_first_step() {
        let coordinator = coordinator();
        let mut ctx = context();

        let response = coordinator.start(&mut ctx, "checkout", None).unwrap();

        assert_eq!(url(&response), "/flow/checkout/info");
        assert_eq!(response.redirect_step(), Some("info"));
        assert_eq!(ctx.step_history().unwrap(), vec!["info"]);
    }

    #[test]
    fn test_start_resets_previous_history() {
        let coordinator = coordinator();
        let mut ctx = context();
        coordinator.start(&mut ctx, "checkout", None).unwrap();
        coordinator.forward(&mut ctx, "checkout", "info").unwrap();

        coordinator.start(&mut ctx, "checkout", None).unwrap();
        assert_eq!(ctx.step_history().unwrap(), vec!["info"]);
    }

    #[test]
    fn test_start_forwards_query_parameters() {
        let coordinator = coordinator();
        let mut ctx = context();
        let query = route_params([("utm", "mail"), ("stepName", "review")]);

        let response = coordinator.start(&mut ctx, "checkout", Some(&query)).unwrap();

        assert_eq!(url(&response), "/flow/checkout/info?utm=mail");
    }

    #[test]
    fn test_query_values_cannot_inject_parameters() {
        let coordinator = coordinator();
        let mut ctx = context();
        let query = route_params([("utm", "x&stepName=review")]);

        let response = coordinator.start(&mut ctx, "checkout", Some(&query)).unwrap();

        assert_eq!(url(&response), "/flow/checkout/info?utm=x%26stepName%3Dreview");
        assert_eq!(response.redirect_step(), Some("info"));
    }

    #[test]
    fn test_unknown_scenario_and_step() {
        let coordinator = coordinator();
        let mut ctx = context();

        let err = coordinator.start(&mut ctx, "missing", None).unwrap_err();
        assert_eq!(err, FlowError::ScenarioNotFound("missing".to_string()));

        let err = coordinator
            .display(&mut ctx, "checkout", "gift-wrap", None)
            .unwrap_err();
        assert!(matches!(err, FlowError::StepNotFound { ref step, .. } if step == "gift-wrap"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_display_renders_step_in_history() {
        let coordinator = coordinator();
        let mut ctx = context();
        coordinator.start(&mut ctx, "checkout", None).unwrap();

        let first = coordinator.display(&mut ctx, "checkout", "info", None).unwrap();
        let second = coordinator.display(&mut ctx, "checkout", "info", None).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.as_rendered().unwrap().view.as_deref(), Some("info.html"));
        assert_eq!(ctx.step_history().unwrap(), vec!["info"]);
    }

    #[test]
    fn test_display_rewinds_history() {
        let coordinator = coordinator();
        let mut ctx = context();
        coordinator.start(&mut ctx, "checkout", None).unwrap();
        coordinator.forward(&mut ctx, "checkout", "info").unwrap();
        assert_eq!(ctx.step_history().unwrap(), vec!["info", "payment"]);

        // back button
        coordinator.display(&mut ctx, "checkout", "info", None).unwrap();
        assert_eq!(ctx.step_history().unwrap(), vec!["info"]);
    }

    #[test]
    fn test_forward_follows_linear_order() {
        let coordinator = coordinator();
        let mut ctx = context();
        coordinator.start(&mut ctx, "checkout", None).unwrap();

        let response = coordinator.forward(&mut ctx, "checkout", "info").unwrap();

        assert_eq!(response.redirect_step(), Some("payment"));
        assert_eq!(ctx.step_history().unwrap(), vec!["info", "payment"]);
    }

    #[test]
    fn test_forward_jump_skips_linear_order() {
        let coordinator = coordinator();
        let mut ctx = context();
        coordinator.start(&mut ctx, "checkout", None).unwrap();
        coordinator.forward(&mut ctx, "checkout", "info").unwrap();

        let response = coordinator.forward(&mut ctx, "checkout", "payment").unwrap();

        // review is the last step, yet the jump must not complete the scenario
        assert_eq!(response.redirect_step(), Some("review"));
        assert_eq!(ctx.state(), ContextState::Initialized);
        assert_eq!(ctx.step_history().unwrap(), vec!["info", "payment", "review"]);
    }

    #[test]
    fn test_forward_on_last_step_completes() {
        let coordinator = coordinator();
        let mut ctx = context();
        coordinator.start(&mut ctx, "checkout", None).unwrap();
        coordinator.forward(&mut ctx, "checkout", "info").unwrap();
        coordinator.forward(&mut ctx, "checkout", "payment").unwrap();

        let response = coordinator.forward(&mut ctx, "checkout", "review").unwrap();

        let redirect = response.as_redirect().unwrap();
        assert_eq!(redirect.route, "checkout_thankyou");
        assert_eq!(redirect.params, route_params([("order", "42")]));
        assert_eq!(redirect.url, "/thank-you/42");
        assert_eq!(ctx.state(), ContextState::Closed);
        assert!(ctx.current_step().is_none());
        assert!(ctx.step_history().unwrap().is_empty());
    }

    #[test]
    fn test_forward_without_outcome_is_a_defect() {
        let coordinator = coordinator();
        let mut ctx = context();
        coordinator.start(&mut ctx, "broken", None).unwrap();

        let err = coordinator.forward(&mut ctx, "broken", "only").unwrap_err();
        assert_eq!(err, FlowError::InvalidStepOutcome { step: "only".to_string() });
    }

    #[test]
    fn test_fallback_to_previous_step() {
        let coordinator = coordinator();
        let mut ctx = context();
        coordinator.start(&mut ctx, "checkout", None).unwrap();
        coordinator.forward(&mut ctx, "checkout", "info").unwrap();

        // stale bookmark to a step that was never reached
        let response = coordinator.display(&mut ctx, "checkout", "shipping", None).unwrap();

        assert_eq!(response.redirect_step(), Some("payment"));
        assert_eq!(ctx.step_history().unwrap(), vec!["info", "payment"]);
    }

    #[test]
    fn test_fallback_skips_unrecorded_previous_step() {
        let coordinator = coordinator();
        let mut ctx = context();
        coordinator.start(&mut ctx, "checkout", None).unwrap();

        // "payment" precedes "shipping" but was never reached
        let response = coordinator.display(&mut ctx, "checkout", "shipping", None).unwrap();
        assert_eq!(response.redirect_step(), Some("info"));
        assert_eq!(ctx.step_history().unwrap(), vec!["info"]);

        let response = coordinator.display(&mut ctx, "checkout", "payment", None).unwrap();
        assert_eq!(response.redirect_step(), Some("info"));
        assert_eq!(ctx.step_history().unwrap(), vec!["info"]);
    }

    #[test]
    fn test_fallback_to_last_history_entry() {
        let coordinator = coordinator();
        let mut ctx = context();
        coordinator.start(&mut ctx, "checkout", None).unwrap();
        coordinator.forward(&mut ctx, "checkout", "info").unwrap();

        // "info" has no previous step; history is cut below it
        ctx.set_step_history(vec!["payment".to_string()]).unwrap();
        let response = coordinator.display(&mut ctx, "checkout", "info", None).unwrap();

        assert_eq!(response.redirect_step(), Some("payment"));
        assert_eq!(ctx.step_history().unwrap(), vec!["payment"]);
    }

    #[test]
    fn test_fallback_restarts_without_history() {
        let coordinator = coordinator();
        let mut ctx = context();

        let response = coordinator.forward(&mut ctx, "checkout", "info").unwrap();

        assert_eq!(response.redirect_step(), Some("info"));
        assert_eq!(ctx.step_history().unwrap(), vec!["info"]);
    }

    #[test]
    fn test_invalid_context_renders_validator_response() {
        let coordinator = coordinator();
        let mut ctx = context();

        let response = coordinator.start(&mut ctx, "guarded", None).unwrap();

        let rendered = response.as_rendered().expect("validator response");
        assert_eq!(rendered.status, 400);
        assert_eq!(rendered.body, json!({"error": "Cart is empty"}));
    }

    #[test]
    fn test_custom_display_route_precedence() {
        let query = route_params([("stepName", "hijack"), ("locale", "de")]);

        let coordinator = coordinator();
        let mut ctx = context();
        let response = coordinator.start(&mut ctx, "custom", Some(&query)).unwrap();
        assert_eq!(url(&response), "/de/wizard/info");

        let mut settings = FlowSettings::default();
        settings.parameter_precedence = ParameterPrecedence::Legacy;
        let legacy = self::coordinator().with_settings(settings);
        let mut ctx = context();
        let response = legacy.start(&mut ctx, "custom", Some(&query)).unwrap();
        assert_eq!(url(&response), "/de/wizard/hijack");
    }

    #[test]
    fn test_register_duplicate_scenario() {
        let mut coordinator = coordinator();
        let err = coordinator
            .register_scenario("checkout", Arc::new(broken))
            .unwrap_err();
        assert_eq!(err, FlowError::DuplicateScenario("checkout".to_string()));
        assert!(coordinator.load_scenario("checkout").is_ok());
        assert!(coordinator.load_scenario("nope").is_err());
    }

    mock! {
        Router {}

        impl UrlGenerator for Router {
            fn generate(&self, route: &str, params: &RouteParams) -> Result<String, FlowError>;
        }
    }

    #[test]
    fn test_default_route_parameters_reach_router() {
        let mut router = MockRouter::new();
        router
            .expect_generate()
            .withf(|route, params| {
                route == "stepflow_display"
                    && *params
                        == route_params([
                            ("scenarioAlias", "checkout"),
                            ("stepName", "info"),
                            ("utm", "mail"),
                        ])
            })
            .times(1)
            .returning(|_, _| Ok("/generated".to_string()));

        let mut registry = ScenarioRegistry::new();
        registry.register("checkout", Arc::new(checkout)).unwrap();
        let coordinator = Coordinator::new(Arc::new(router), ProcessBuilder::new(), registry);

        let query = route_params([("utm", "mail"), ("scenarioAlias", "other")]);
        let response = coordinator.start(&mut context(), "checkout", Some(&query)).unwrap();
        assert_eq!(url(&response), "/generated");
    }
}
