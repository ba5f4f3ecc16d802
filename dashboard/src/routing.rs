//! Routing slice (`routing`).
//!
//! Mirrors the browser history integration: the slice records the location
//! delivered by the most recent `@@router/LOCATION_CHANGE` action and nothing
//! else.

use crate::action_types::LOCATION_CHANGE;
use figures_state_core::{Action, ActionError, Reducer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the history entry was reached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryAction {
    /// New entry pushed
    Push,
    /// Current entry replaced
    Replace,
    /// Back/forward navigation
    Pop,
}

/// A browser location
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Path component, always starting with `/`
    pub pathname: String,
    /// Query string including the leading `?`, or empty
    #[serde(default)]
    pub search: String,
    /// Fragment including the leading `#`, or empty
    #[serde(default)]
    pub hash: String,
    /// History state attached to the entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    /// Navigation that produced this location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<HistoryAction>,
    /// History entry key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Location {
    /// Split a path such as `/figures/course/abc?tab=1#top` into its parts
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let (rest, hash) = match path.find('#') {
            Some(at) => path.split_at(at),
            None => (path, ""),
        };
        let (pathname, search) = match rest.find('?') {
            Some(at) => rest.split_at(at),
            None => (rest, ""),
        };

        let pathname = if pathname.starts_with('/') {
            pathname.to_string()
        } else {
            format!("/{pathname}")
        };

        Self {
            pathname,
            search: search.to_string(),
            hash: hash.to_string(),
            state: None,
            action: None,
            key: None,
        }
    }

    /// Set the navigation kind
    #[must_use]
    pub const fn with_action(mut self, action: HistoryAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the history entry key
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Pathname, search and hash joined back together
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// State of the routing slice
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingState {
    /// Location from the latest location change; serialized as `null` until
    /// the first one
    pub location_before_transitions: Option<Location>,
}

/// Reducer owning the routing slice
#[derive(Clone, Copy, Debug, Default)]
pub struct RoutingReducer;

impl RoutingReducer {
    /// Creates a new `RoutingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for RoutingReducer {
    type State = RoutingState;
    type Action = Action;

    fn reduce(&self, state: Option<&RoutingState>, action: &Action) -> RoutingState {
        let current = state.cloned().unwrap_or_default();
        if !action.is(LOCATION_CHANGE) {
            return current;
        }

        match action.decode::<Location>() {
            Ok(location) => {
                tracing::debug!(pathname = %location.pathname, "Location changed");
                RoutingState {
                    location_before_transitions: Some(location),
                }
            },
            Err(error) => {
                tracing::warn!(slice = "routing", error = %error, "Ignoring action with malformed payload");
                current
            },
        }
    }
}

/// Action announcing a new location
///
/// # Errors
///
/// Returns [`ActionError::InvalidPayload`] if the location's history state
/// cannot be serialized.
pub fn location_change(location: &Location) -> Result<Action, ActionError> {
    Action::with_payload(LOCATION_CHANGE, location)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use figures_state_testing::{assertions, ReducerTest};
    use serde_json::json;

    #[test]
    fn test_default_state_wire_format() {
        let state = RoutingReducer::new().reduce(None, &Action::init());
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({"locationBeforeTransitions": null})
        );
    }

    #[test]
    fn test_location_change() {
        let location = Location::from_path("/figures/course/course-v1:AlphaOrg+A001+RUN?tab=learners")
            .with_action(HistoryAction::Push)
            .with_key("k1");
        let expected = location.clone();

        ReducerTest::new(RoutingReducer::new())
            .given_no_state()
            .when_action(location_change(&location).unwrap())
            .then_state(move |state| {
                assert_eq!(state.location_before_transitions, Some(expected));
            })
            .run();
    }

    #[test]
    fn test_latest_location_wins() {
        let reducer = RoutingReducer::new();
        let first = reducer.reduce(
            None,
            &location_change(&Location::from_path("/figures/")).unwrap(),
        );
        let second = reducer.reduce(
            Some(&first),
            &location_change(&Location::from_path("/figures/reports").with_action(HistoryAction::Pop)).unwrap(),
        );

        let location = second.location_before_transitions.unwrap();
        assert_eq!(location.pathname, "/figures/reports");
        assert_eq!(location.action, Some(HistoryAction::Pop));
    }

    #[test]
    fn test_other_actions_ignored() {
        let reducer = RoutingReducer::new();
        let state = reducer.reduce(
            None,
            &location_change(&Location::from_path("/figures/")).unwrap(),
        );

        assertions::assert_unchanged(&reducer, &state, &Action::new("LOAD_REPORT"));
    }

    #[test]
    fn test_malformed_location_ignored() {
        let reducer = RoutingReducer::new();
        let state = RoutingState::default();

        assertions::assert_unchanged(&reducer, &state, &Action::new(LOCATION_CHANGE));
        assertions::assert_unchanged(
            &reducer,
            &state,
            &Action::from_value(LOCATION_CHANGE, json!({"search": "?q=1"})),
        );
    }

    #[test]
    fn test_location_wire_format() {
        let decoded: Location = serde_json::from_value(json!({
            "pathname": "/figures/users",
            "search": "?page=2",
            "hash": "",
            "action": "REPLACE",
            "key": "ab12"
        }))
        .unwrap();

        assert_eq!(decoded.action, Some(HistoryAction::Replace));
        assert_eq!(decoded.path(), "/figures/users?page=2");
    }

    #[test]
    fn test_from_path() {
        let location = Location::from_path("figures/users?page=2#top");
        assert_eq!(location.pathname, "/figures/users");
        assert_eq!(location.search, "?page=2");
        assert_eq!(location.hash, "#top");
        assert_eq!(location.path(), "/figures/users?page=2#top");

        let bare = Location::from_path("/figures/");
        assert_eq!(bare.search, "");
        assert_eq!(bare.hash, "");
    }
}
