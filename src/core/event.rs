//! Structural change notifications emitted by an automaton.

use super::state::StateId;
use super::transition::Transition;

/// A single structural mutation of an automaton.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent<W> {
    StateAdded(StateId),
    StateRemoved(StateId),
    TransitionAdded(Transition<W>),
    TransitionRemoved(Transition<W>),
    TransitionReplaced {
        old: Transition<W>,
        new: Transition<W>,
    },
    InitialStateChanged {
        old: Option<StateId>,
        new: Option<StateId>,
    },
    FinalStateAdded(StateId),
    FinalStateRemoved(StateId),
}

impl<W> GraphEvent<W> {
    /// Short name used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StateAdded(_) => "state_added",
            Self::StateRemoved(_) => "state_removed",
            Self::TransitionAdded(_) => "transition_added",
            Self::TransitionRemoved(_) => "transition_removed",
            Self::TransitionReplaced { .. } => "transition_replaced",
            Self::InitialStateChanged { .. } => "initial_state_changed",
            Self::FinalStateAdded(_) => "final_state_added",
            Self::FinalStateRemoved(_) => "final_state_removed",
        }
    }
}
