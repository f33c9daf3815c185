//!
//! Stepflow Core - navigation engine for multi-step web flows
//!
//! Scenarios describe ordered steps; the coordinator walks a session through
//! them, keeping per-session history in pluggable flow storage and answering
//! every request with either a rendered step or a redirect.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - steps, processes, contexts and their interfaces
pub mod domain;

/// Application services - building and coordinating processes
pub mod application;

/// Response and route parameter types
pub mod types;

/// Error types
pub mod error;

/// Navigation settings
pub mod config;

// Re-export key types
pub use config::{FlowSettings, ParameterPrecedence};
pub use error::{FlowError, FlowResult};
pub use types::{FlowResponse, Redirect, Rendered, RouteParams};

pub use application::builder::{ProcessBuilder, ProcessDraft, StepFactory};
pub use application::coordinator::Coordinator;
pub use domain::context::{storage_domain, ContextState, ProcessContext};
pub use domain::process::{GuardValidator, Process, ProcessValidator};
pub use domain::router::{PatternRouter, UrlGenerator};
pub use domain::scenario::{ProcessScenario, ScenarioRegistry};
pub use domain::step::{ActionResult, ProcessStep, Step, StepOutcome};
pub use domain::storage::memory::MemoryFlowStorage;
pub use domain::storage::FlowStorage;
