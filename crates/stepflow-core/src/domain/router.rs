use crate::types::RouteParams;
use crate::FlowError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;

/// Everything but the unreserved characters of RFC 3986
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Turns a named route and its parameters into a URL
pub trait UrlGenerator: Send + Sync {
    /// Generate the URL for a route
    fn generate(&self, route: &str, params: &RouteParams) -> Result<String, FlowError>;
}

/// URL generator over path patterns such as `/flow/{scenarioAlias}/{stepName}`
///
/// Parameters consumed by placeholders go into the path; the rest become the
/// query string in key order. Path values are percent-encoded as single
/// segments, query pairs are form-encoded.
#[derive(Debug, Clone, Default)]
pub struct PatternRouter {
    routes: HashMap<String, String>,
}

impl PatternRouter {
    /// Create a router without routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a route
    pub fn with_route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.add_route(name, pattern);
        self
    }

    /// Add or replace a route
    pub fn add_route(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
        self.routes.insert(name.into(), pattern.into());
    }

    fn placeholders(pattern: &str) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = pattern;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    names.push(&after[..end]);
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }
        names
    }
}

impl UrlGenerator for PatternRouter {
    fn generate(&self, route: &str, params: &RouteParams) -> Result<String, FlowError> {
        let pattern = self
            .routes
            .get(route)
            .ok_or_else(|| FlowError::RouteNotFound(route.to_string()))?;

        let mut url = pattern.clone();
        let placeholders = Self::placeholders(pattern);
        for name in &placeholders {
            let value = params
                .get(*name)
                .ok_or_else(|| FlowError::MissingRouteParameter {
                    route: route.to_string(),
                    parameter: name.to_string(),
                })?;
            let encoded = utf8_percent_encode(value, PATH_SEGMENT).to_string();
            url = url.replace(&format!("{{{}}}", name), &encoded);
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        for (key, value) in params
            .iter()
            .filter(|(key, _)| !placeholders.contains(&key.as_str()))
        {
            query.append_pair(key, value);
            has_query = true;
        }
        if has_query {
            url.push('?');
            url.push_str(&query.finish());
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::route_params;

    fn router() -> PatternRouter {
        PatternRouter::new()
            .with_route("stepflow_display", "/flow/{scenarioAlias}/{stepName}")
            .with_route("checkout_thankyou", "/checkout/thank-you")
    }

    #[test]
    fn test_placeholders_and_query() {
        let url = router()
            .generate(
                "stepflow_display",
                &route_params([
                    ("scenarioAlias", "checkout"),
                    ("stepName", "info"),
                    ("utm", "mail"),
                    ("coupon", "X1"),
                ]),
            )
            .unwrap();
        assert_eq!(url, "/flow/checkout/info?coupon=X1&utm=mail");
    }

    #[test]
    fn test_values_are_encoded() {
        let url = router()
            .generate(
                "stepflow_display",
                &route_params([
                    ("scenarioAlias", "check out"),
                    ("stepName", "a/b"),
                    ("utm", "x&stepName=review"),
                    ("note", "1/2 off"),
                ]),
            )
            .unwrap();
        assert_eq!(
            url,
            "/flow/check%20out/a%2Fb?note=1%2F2+off&utm=x%26stepName%3Dreview"
        );
    }

    #[test]
    fn test_static_route() {
        let url = router()
            .generate("checkout_thankyou", &RouteParams::new())
            .unwrap();
        assert_eq!(url, "/checkout/thank-you");
    }

    #[test]
    fn test_unknown_route_and_missing_parameter() {
        assert_eq!(
            router().generate("nowhere", &RouteParams::new()).unwrap_err(),
            FlowError::RouteNotFound("nowhere".to_string())
        );
        assert_eq!(
            router()
                .generate("stepflow_display", &route_params([("stepName", "info")]))
                .unwrap_err(),
            FlowError::MissingRouteParameter {
                route: "stepflow_display".to_string(),
                parameter: "scenarioAlias".to_string(),
            }
        );
    }
}
