//! Conversion errors.

use crate::core::{GraphError, StateId};
use crate::precondition::PreconditionViolation;
use std::fmt;
use thiserror::Error;

/// Step of the conversion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Normalize,
    Weight,
    Eliminate,
    Close,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Normalize => "normalize",
            Phase::Weight => "weight",
            Phase::Eliminate => "eliminate",
            Phase::Close => "close",
        };
        f.write_str(name)
    }
}

/// Errors that abort a conversion.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConversionError {
    #[error("Automaton cannot be converted: {}", list(.0))]
    Preconditions(Vec<PreconditionViolation>),

    #[error("Graph update failed during {phase}: {source}")]
    Graph {
        phase: Phase,
        #[source]
        source: GraphError,
    },

    #[error("No transition {from} -> {to} during {phase}; the graph is not saturated")]
    IncompleteGraph {
        phase: Phase,
        from: StateId,
        to: StateId,
    },

    #[error("State {state} is initial or final and cannot be eliminated")]
    ProtectedState { state: StateId },
}

impl ConversionError {
    pub(crate) fn graph(phase: Phase) -> impl FnOnce(GraphError) -> Self {
        move |source| ConversionError::Graph { phase, source }
    }
}

fn list(violations: &[PreconditionViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
