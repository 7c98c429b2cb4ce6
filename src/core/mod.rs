//! Graph store: states, transitions and the mutable automaton.
//!
//! This module contains the data model every other part of the crate works
//! on:
//! - `State` / `StateId` for state identity
//! - `Transition<W>` for labeled, optionally weighted edges
//! - `Automaton<W>` owning both, with cached adjacency snapshots
//! - `GraphEvent` / `Observer` for change notification

mod automaton;
mod error;
mod event;
mod observer;
mod state;
mod transition;

pub use automaton::{Automaton, FiniteAutomaton, MarkovChain};
pub use error::GraphError;
pub use event::GraphEvent;
pub use observer::{Observer, ObserverId};
pub use state::{State, StateId};
pub use transition::Transition;
