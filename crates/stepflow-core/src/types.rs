use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Route and query parameters, keyed by name
///
/// A `BTreeMap` keeps generated URLs stable across calls.
pub type RouteParams = BTreeMap<String, String>;

/// Name of the parameter carrying the step name in display routes
pub const STEP_NAME_PARAM: &str = "stepName";

/// Name of the parameter carrying the scenario alias in the default display route
pub const SCENARIO_ALIAS_PARAM: &str = "scenarioAlias";

/// A redirect instruction for the transport layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    /// Route name the URL was generated from
    pub route: String,

    /// Resolved parameters passed to the URL generator
    pub params: RouteParams,

    /// Generated URL
    pub url: String,
}

/// A rendered response, opaque to the navigation core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    /// Status code the transport layer should use
    pub status: u16,

    /// Template or view identifier, if any
    pub view: Option<String>,

    /// Payload handed to the view
    pub body: serde_json::Value,
}

impl Rendered {
    /// A 200 response for the given view
    pub fn ok(view: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            status: 200,
            view: Some(view.into()),
            body,
        }
    }

    /// A bare error response carrying a message
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            view: None,
            body: serde_json::json!({ "error": message.into() }),
        }
    }
}

/// What the coordinator hands back to the transport layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowResponse {
    /// Send the client elsewhere
    Redirect(Redirect),

    /// Write this response back as is
    Render(Rendered),
}

impl FlowResponse {
    /// The redirect, if this response is one
    #[inline]
    pub fn as_redirect(&self) -> Option<&Redirect> {
        match self {
            FlowResponse::Redirect(redirect) => Some(redirect),
            FlowResponse::Render(_) => None,
        }
    }

    /// The rendered response, if this response is one
    #[inline]
    pub fn as_rendered(&self) -> Option<&Rendered> {
        match self {
            FlowResponse::Render(rendered) => Some(rendered),
            FlowResponse::Redirect(_) => None,
        }
    }

    /// Step name carried by a redirect, if any
    pub fn redirect_step(&self) -> Option<&str> {
        self.as_redirect()
            .and_then(|r| r.params.get(STEP_NAME_PARAM))
            .map(String::as_str)
    }
}

impl From<Redirect> for FlowResponse {
    fn from(redirect: Redirect) -> Self {
        FlowResponse::Redirect(redirect)
    }
}

impl From<Rendered> for FlowResponse {
    fn from(rendered: Rendered) -> Self {
        FlowResponse::Render(rendered)
    }
}

/// Build a `RouteParams` map from pairs
pub fn route_params<K, V, I>(pairs: I) -> RouteParams
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
