//! A URL generator that remembers what it was asked for.

use parking_lot::Mutex;
use std::sync::Arc;
use stepflow_core::{FlowError, PatternRouter, RouteParams, UrlGenerator};

/// A generated route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRoute {
    /// Route name
    pub route: String,
    /// Parameters passed to the generator
    pub params: RouteParams,
}

/// Fake router for tests
///
/// Delegates to a [`PatternRouter`] with the routes tests commonly need, and
/// records every call. Clones share the recorded calls.
#[derive(Debug, Clone)]
pub struct RecordingRouter {
    inner: PatternRouter,
    calls: Arc<Mutex<Vec<GeneratedRoute>>>,
}

impl RecordingRouter {
    /// Router knowing the default display route and the checkout routes
    pub fn new() -> Self {
        Self::with_router(
            PatternRouter::new()
                .with_route("stepflow_display", "/flow/{scenarioAlias}/{stepName}")
                .with_route("checkout_display", "/{locale}/checkout/{stepName}")
                .with_route("checkout_thankyou", "/checkout/thank-you"),
        )
    }

    /// Record calls made to an existing router
    pub fn with_router(inner: PatternRouter) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a route to the underlying router
    pub fn with_route(mut self, name: &str, pattern: &str) -> Self {
        self.inner.add_route(name, pattern);
        self
    }

    /// All generated routes, oldest first
    pub fn calls(&self) -> Vec<GeneratedRoute> {
        self.calls.lock().clone()
    }

    /// The most recent generated route
    pub fn last_call(&self) -> Option<GeneratedRoute> {
        self.calls.lock().last().cloned()
    }

    /// Forget the recorded calls
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

impl Default for RecordingRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlGenerator for RecordingRouter {
    fn generate(&self, route: &str, params: &RouteParams) -> Result<String, FlowError> {
        self.calls.lock().push(GeneratedRoute {
            route: route.to_string(),
            params: params.clone(),
        });
        self.inner.generate(route, params)
    }
}
