/// Scenario to process translation
pub mod builder;

/// Request-level navigation
pub mod coordinator;
