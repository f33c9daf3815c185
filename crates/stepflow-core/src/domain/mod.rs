/// Steps and their outcomes
pub mod step;

/// Built processes and validators
pub mod process;

/// Per-session navigation state
pub mod context;

/// Scenario definitions and their registry
pub mod scenario;

/// Flow storage interface
pub mod storage;

/// URL generation
pub mod router;
