//! Navigation with flow state kept in a session, one context per request.

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use stepflow_core::{storage_domain, FlowSettings};
use stepflow_session::SessionStore;
use stepflow_test_utils::assertions::{assert_redirect_to_route, assert_redirect_to_step};
use stepflow_test_utils::fixtures::{
    checkout_harness, session_context, CheckoutScenario, CheckoutSteps, CHECKOUT,
    CHECKOUT_THANKYOU,
};

#[test]
fn test_history_survives_between_requests() -> Result<()> {
    let harness = checkout_harness();
    let store = SessionStore::new(FlowSettings::default());
    let session = store.create_session();

    let response = harness
        .coordinator
        .start(&mut session_context(&store, &session)?, CHECKOUT, None)?;
    assert_redirect_to_step(&response, "info")?;

    let response = harness
        .coordinator
        .forward(&mut session_context(&store, &session)?, CHECKOUT, "info")?;
    assert_redirect_to_step(&response, "payment")?;

    let history = store.read_bag(&session, store.flows_bag_name(), |bag| {
        bag.get(&format!("{}/history", storage_domain(CHECKOUT)))
    })?;
    assert_eq!(history, Some(json!(["info", "payment"])));

    let response = harness
        .coordinator
        .display(&mut session_context(&store, &session)?, CHECKOUT, "payment", None)?;
    assert!(response.as_rendered().is_some());
    Ok(())
}

#[test]
fn test_completion_clears_only_its_scenario() -> Result<()> {
    let mut harness = checkout_harness();
    harness
        .coordinator
        .register_scenario("express", Arc::new(CheckoutScenario::new(CheckoutSteps::new())))?;
    let store = SessionStore::default();
    let session = store.create_session();
    let coordinator = &harness.coordinator;

    coordinator.start(&mut session_context(&store, &session)?, "express", None)?;
    coordinator.start(&mut session_context(&store, &session)?, CHECKOUT, None)?;
    for step in ["info", "payment"] {
        coordinator.forward(&mut session_context(&store, &session)?, CHECKOUT, step)?;
    }
    let response =
        coordinator.forward(&mut session_context(&store, &session)?, CHECKOUT, "review")?;
    assert_redirect_to_route(&response, CHECKOUT_THANKYOU)?;

    let (checkout, express) = store.read_bag(&session, store.flows_bag_name(), |bag| {
        (
            bag.has(&storage_domain(CHECKOUT)),
            bag.get(&format!("{}/history", storage_domain("express"))),
        )
    })?;
    assert!(!checkout);
    assert_eq!(express, Some(json!(["info"])));
    Ok(())
}

#[test]
fn test_sessions_do_not_share_flow_state() -> Result<()> {
    let harness = checkout_harness();
    let store = SessionStore::default();
    let alice = store.create_session();
    let bob = store.create_session();

    harness
        .coordinator
        .start(&mut session_context(&store, &alice)?, CHECKOUT, None)?;
    harness
        .coordinator
        .forward(&mut session_context(&store, &alice)?, CHECKOUT, "info")?;

    // bob never started, his bookmark is repaired by a restart
    let response = harness
        .coordinator
        .display(&mut session_context(&store, &bob)?, CHECKOUT, "info", None)?;
    assert_redirect_to_step(&response, "info")?;

    let response = harness
        .coordinator
        .display(&mut session_context(&store, &alice)?, CHECKOUT, "payment", None)?;
    assert!(response.as_rendered().is_some());
    Ok(())
}

#[test]
fn test_custom_storage_key_and_separator() -> Result<()> {
    let settings = FlowSettings::from_yaml(
        r#"
        storage_key: _wizard
        namespace_character: "."
        "#,
    )?;
    let harness = checkout_harness();
    let store = SessionStore::new(settings);
    let session = store.create_session();

    harness
        .coordinator
        .start(&mut session_context(&store, &session)?, CHECKOUT, None)?;

    let history = store.read_bag(&session, "_wizard", |bag| {
        bag.get(&format!("{}.history", storage_domain(CHECKOUT)))
    })?;
    assert_eq!(history, Some(json!(["info"])));
    Ok(())
}
