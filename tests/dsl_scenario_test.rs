//! Scenarios declared in YAML, driven end to end.

use anyhow::Result;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use stepflow_core::{
    Coordinator, FlowSettings, ParameterPrecedence, ProcessBuilder, RouteParams, ScenarioRegistry,
};
use stepflow_dsl::{load_scenarios, DslError};
use stepflow_test_utils::assertions::{assert_history, assert_redirect_to_route};
use stepflow_test_utils::fixtures::memory_context;
use stepflow_test_utils::{ForwardScript, RecordingRouter, ScriptedStep};

const SIGNUP: &str = r#"
dsl_version: "1.0"
scenarios:
  - alias: signup
    description: Account creation wizard
    steps:
      - name: account
        step: form
      - name: newsletter
        step: optional
      - name: profile
        step: form
      - name: confirm
        step: confirm
    display:
      route: wizard_display
      params:
        locale: en
    redirect:
      route: welcome
      params:
        source: signup
"#;

struct Wizard {
    coordinator: Coordinator,
    router: RecordingRouter,
    confirm: ScriptedStep,
}

fn wizard(settings: FlowSettings) -> Result<Wizard> {
    let confirm = ScriptedStep::new("confirm");

    let mut builder = ProcessBuilder::new();
    builder.register_step("form", || ScriptedStep::new("form").boxed())?;
    builder.register_step("optional", || ScriptedStep::new("optional").inactive().boxed())?;
    let handle = confirm.clone();
    builder.register_step("confirm", move || handle.boxed())?;

    let mut registry = ScenarioRegistry::new();
    let aliases = load_scenarios(SIGNUP, &mut registry, &builder)?;
    assert_eq!(aliases, vec!["signup"]);

    let router = RecordingRouter::new()
        .with_route("wizard_display", "/{locale}/signup/{stepName}")
        .with_route("welcome", "/welcome");
    let coordinator = Coordinator::new(Arc::new(router.clone()), builder, registry)
        .with_settings(settings);

    Ok(Wizard {
        coordinator,
        router,
        confirm,
    })
}

#[test]
fn test_yaml_scenario_walkthrough() -> Result<()> {
    let wizard = wizard(FlowSettings::default())?;
    let coordinator = &wizard.coordinator;
    let mut ctx = memory_context();

    let response = coordinator.start(&mut ctx, "signup", None)?;
    assert_eq!(response.as_redirect().unwrap().url, "/en/signup/account");

    // inactive steps are left out of the built process
    let response = coordinator.forward(&mut ctx, "signup", "account")?;
    assert_eq!(response.as_redirect().unwrap().url, "/en/signup/profile");

    coordinator.forward(&mut ctx, "signup", "profile")?;
    assert_history(&ctx, &["account", "profile", "confirm"])?;

    let response = coordinator.forward(&mut ctx, "signup", "confirm")?;
    assert_redirect_to_route(&response, "welcome")?;
    assert_eq!(response.as_redirect().unwrap().url, "/welcome?source=signup");
    assert_eq!(wizard.confirm.forwards(), 1);
    Ok(())
}

#[test]
fn test_step_factories_build_fresh_instances() -> Result<()> {
    let wizard = wizard(FlowSettings::default())?;
    let mut ctx = memory_context();
    wizard.coordinator.start(&mut ctx, "signup", None)?;
    wizard.coordinator.forward(&mut ctx, "signup", "account")?;
    wizard.coordinator.forward(&mut ctx, "signup", "profile")?;

    // the handle shares its script with every built instance
    wizard.confirm.script(ForwardScript::Proceed("account".to_string()));
    let response = wizard.coordinator.forward(&mut ctx, "signup", "confirm")?;

    assert_eq!(response.redirect_step(), Some("account"));
    Ok(())
}

#[test]
fn test_precedence_on_custom_display_route() -> Result<()> {
    let query: RouteParams = [("locale", "de"), ("stepName", "confirm")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let unified = wizard(FlowSettings::default())?;
    let response = unified
        .coordinator
        .start(&mut memory_context(), "signup", Some(&query))?;
    assert_eq!(response.as_redirect().unwrap().url, "/de/signup/account");

    let mut settings = FlowSettings::default();
    settings.parameter_precedence = ParameterPrecedence::Legacy;
    let legacy = wizard(settings)?;
    let response = legacy
        .coordinator
        .start(&mut memory_context(), "signup", Some(&query))?;
    assert_eq!(response.as_redirect().unwrap().url, "/de/signup/confirm");

    let call = legacy.router.last_call().unwrap();
    assert_eq!(call.route, "wizard_display");
    Ok(())
}

#[test]
fn test_unknown_step_alias_is_rejected() {
    let builder = ProcessBuilder::new();
    let mut registry = ScenarioRegistry::new();

    let err = load_scenarios(SIGNUP, &mut registry, &builder).unwrap_err();

    assert!(matches!(err, DslError::MultipleValidationErrors(_)));
    assert_eq!(err.validation_errors().len(), 4);
    assert!(registry.is_empty());
}
