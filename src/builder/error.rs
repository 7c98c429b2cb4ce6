//! Build errors for the automaton builder.

use thiserror::Error;

/// Errors that can occur when building an automaton.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(id) before .build()")]
    MissingInitialState,

    #[error("State {id} declared twice")]
    DuplicateState { id: usize },

    #[error("State {id} is not declared. Call .state(id) or .states(range) first")]
    UnknownState { id: usize },

    #[error("Transition {from} -> {to} labeled \"{label}\" added twice")]
    DuplicateTransition {
        from: usize,
        to: usize,
        label: String,
    },

    #[error("Transition {from} -> {to} has an invalid probability: {reason}")]
    InvalidProbability {
        from: usize,
        to: usize,
        reason: String,
    },
}
