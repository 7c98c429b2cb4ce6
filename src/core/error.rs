//! Graph store errors.

use super::state::StateId;
use thiserror::Error;

/// Errors raised by invalid mutation requests on an automaton.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("State {id} does not exist in this automaton")]
    UnknownState { id: StateId },

    #[error("State {id} already exists in this automaton")]
    DuplicateState { id: StateId },

    #[error("Transition {from} -> {to} labeled \"{label}\" is not in the automaton")]
    TransitionNotFound {
        from: StateId,
        to: StateId,
        label: String,
    },

    #[error("Transition {from} -> {to} references a state missing from the automaton")]
    MissingEndpoint { from: StateId, to: StateId },
}
