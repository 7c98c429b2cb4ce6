//! States of an automaton.
//!
//! A state is little more than an identity. Whether it is initial or final is
//! recorded by the owning [`Automaton`](super::Automaton), never on the state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a state, unique within one automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub usize);

impl StateId {
    /// The raw numeric identity.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for StateId {
    fn from(id: usize) -> Self {
        StateId(id)
    }
}

/// A state owned by an automaton.
///
/// States are only created through the automaton's factory methods
/// (`create_state`, `create_state_with_id`), so a state never outlives or
/// escapes its owner.
///
/// # Example
///
/// ```rust
/// use statelim::core::{FiniteAutomaton, StateId};
///
/// let mut automaton = FiniteAutomaton::new();
/// let id = automaton.create_state();
/// automaton.set_state_name(id, "start").unwrap();
///
/// let state = automaton.state(id).unwrap();
/// assert_eq!(state.id(), StateId(0));
/// assert_eq!(state.name(), Some("start"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    id: StateId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

impl State {
    pub(crate) fn new(id: StateId) -> Self {
        Self {
            id,
            name: None,
            label: None,
        }
    }

    /// The state's identity.
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Optional free-form label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub(crate) fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", self.id, name),
            None => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_id_displays_with_prefix() {
        assert_eq!(StateId(7).to_string(), "q7");
        assert_eq!(StateId::from(3).index(), 3);
    }

    #[test]
    fn state_display_includes_name() {
        let mut state = State::new(StateId(2));
        assert_eq!(state.to_string(), "q2");

        state.set_name(Some("accept".to_string()));
        assert_eq!(state.to_string(), "q2 (accept)");
    }

    #[test]
    fn state_ids_order_numerically() {
        let mut ids = vec![StateId(10), StateId(2), StateId(5)];
        ids.sort();
        assert_eq!(ids, vec![StateId(2), StateId(5), StateId(10)]);
    }

    #[test]
    fn state_serializes_with_null_optionals() {
        let state = State::new(StateId(4));
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"id":4,"name":null,"label":null}"#);

        let deserialized: State = serde_json::from_str(r#"{"id":4}"#).unwrap();
        assert_eq!(state, deserialized);
    }
}
