//! Dashboard domain types
//!
//! Grafana returns loosely shaped JSON from both the search and the dashboard
//! endpoints, so these helpers work on `serde_json::Value` and only pull out the
//! few fields the backup needs. Everything else is carried through untouched.

use serde_json::{Map, Value as JsonValue};

/// Title used when a dashboard has no usable title
pub const UNTITLED_DASHBOARD: &str = "dashboard_sem_nome";

/// A dashboard discovered through the search endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRef {
    pub uid: String,
}

impl DashboardRef {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }

    /// Builds a reference from one element of a search response
    ///
    /// Returns `None` when the element has no `uid` or an empty one. Elements
    /// that are not objects, or whose `uid` is not a string, are skipped the
    /// same way.
    pub fn from_search_hit(hit: &JsonValue) -> Option<Self> {
        hit.get("uid")
            .and_then(JsonValue::as_str)
            .filter(|uid| !uid.is_empty())
            .map(Self::new)
    }
}

/// Full response of `GET /api/dashboards/uid/{uid}`
///
/// Only the `dashboard` member is kept; `meta` and anything else Grafana adds
/// around it is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPayload {
    dashboard: Map<String, JsonValue>,
}

impl DashboardPayload {
    /// Extracts the `dashboard` object from a response body
    ///
    /// Returns `None` when the member is missing or is not an object.
    pub fn from_response(mut response: JsonValue) -> Option<Self> {
        match response.get_mut("dashboard").map(JsonValue::take) {
            Some(JsonValue::Object(dashboard)) => Some(Self { dashboard }),
            _ => None,
        }
    }

    /// The dashboard definition, without the wrapping metadata
    pub fn dashboard(&self) -> &Map<String, JsonValue> {
        &self.dashboard
    }

    /// Human readable title, falling back to [`UNTITLED_DASHBOARD`]
    ///
    /// Strings are used as-is, other scalars (numbers, booleans) use their
    /// JSON text. Missing, `null` and empty titles fall back.
    pub fn title(&self) -> String {
        let title = match self.dashboard.get("title") {
            Some(JsonValue::String(s)) => s.clone(),
            Some(JsonValue::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        if title.is_empty() {
            UNTITLED_DASHBOARD.to_string()
        } else {
            title
        }
    }

    /// Pretty printed JSON of the dashboard object, keys in received order
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.dashboard)
    }
}
