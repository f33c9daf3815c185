//! Testing utilities for Stepflow.
//!
//! This crate provides mocks of the core collaborator traits, fakes (a
//! recording router and scripted steps), scenario fixtures, assertion helpers
//! and tracing setup for tests.

pub mod assertions;
pub mod fixtures;
pub mod mocks;
pub mod router;
pub mod steps;

/// Re-export commonly used types for convenience
pub use mockall;

pub use assertions::FlowAssertionError;
pub use router::RecordingRouter;
pub use steps::{ForwardScript, ScriptedStep};

/// Initialize tracing for tests with a default configuration
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stepflow_core=debug,stepflow_session=debug,stepflow_dsl=debug"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
