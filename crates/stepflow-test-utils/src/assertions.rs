//! Assertion utilities for navigation responses and contexts.

use stepflow_core::{ContextState, FlowError, FlowResponse, ProcessContext};
use thiserror::Error;

/// Error type for navigation assertion failures
#[derive(Debug, Error)]
pub enum FlowAssertionError {
    #[error("Expected a redirect, got {0}")]
    NotARedirect(String),

    #[error("Expected a rendered response, got {0}")]
    NotRendered(String),

    #[error("Redirect mismatch: expected {expected}, got {actual}")]
    RedirectMismatch { expected: String, actual: String },

    #[error("Status mismatch: expected {expected}, got {actual}")]
    StatusMismatch { expected: u16, actual: u16 },

    #[error("History mismatch: expected {expected:?}, got {actual:?}")]
    HistoryMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Context state mismatch: expected {expected:?}, got {actual:?}")]
    StateMismatch {
        expected: ContextState,
        actual: ContextState,
    },

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),
}

/// Asserts that a response redirects to the display endpoint of a step.
pub fn assert_redirect_to_step(response: &FlowResponse, step: &str) -> Result<(), FlowAssertionError> {
    let redirect = response
        .as_redirect()
        .ok_or_else(|| FlowAssertionError::NotARedirect(format!("{:?}", response)))?;

    match response.redirect_step() {
        Some(actual) if actual == step => Ok(()),
        actual => Err(FlowAssertionError::RedirectMismatch {
            expected: format!("step {}", step),
            actual: format!("{} (step {:?})", redirect.route, actual),
        }),
    }
}

/// Asserts that a response redirects to a named route.
pub fn assert_redirect_to_route(response: &FlowResponse, route: &str) -> Result<(), FlowAssertionError> {
    let redirect = response
        .as_redirect()
        .ok_or_else(|| FlowAssertionError::NotARedirect(format!("{:?}", response)))?;

    if redirect.route != route {
        return Err(FlowAssertionError::RedirectMismatch {
            expected: route.to_string(),
            actual: redirect.route.clone(),
        });
    }
    Ok(())
}

/// Asserts that a response is rendered with a status code.
pub fn assert_rendered(response: &FlowResponse, status: u16) -> Result<(), FlowAssertionError> {
    let rendered = response
        .as_rendered()
        .ok_or_else(|| FlowAssertionError::NotRendered(format!("{:?}", response)))?;

    if rendered.status != status {
        return Err(FlowAssertionError::StatusMismatch {
            expected: status,
            actual: rendered.status,
        });
    }
    Ok(())
}

/// Asserts the recorded step history of a context.
pub fn assert_history(context: &ProcessContext, expected: &[&str]) -> Result<(), FlowAssertionError> {
    let actual = context.step_history()?;
    if actual != expected {
        return Err(FlowAssertionError::HistoryMismatch {
            expected: expected.iter().map(|s| s.to_string()).collect(),
            actual,
        });
    }
    Ok(())
}

/// Asserts the lifecycle state of a context.
pub fn assert_state(context: &ProcessContext, expected: ContextState) -> Result<(), FlowAssertionError> {
    let actual = context.state();
    if actual != expected {
        return Err(FlowAssertionError::StateMismatch { expected, actual });
    }
    Ok(())
}
