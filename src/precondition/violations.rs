//! Structural precondition violations.

use crate::core::StateId;
use thiserror::Error;

/// A reason an automaton cannot be converted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreconditionViolation {
    #[error("Initial state not specified. Call set_initial_state() before converting")]
    MissingInitialState,

    #[error("Automaton has no final states. Call add_final_state() before converting")]
    NoFinalStates,

    #[error("No final state {finals:?} is reachable from initial state {initial}")]
    UnreachableFinalStates {
        initial: StateId,
        finals: Vec<StateId>,
    },
}
