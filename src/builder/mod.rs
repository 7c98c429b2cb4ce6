//! Builder API for ergonomic automaton construction.
//!
//! This module provides a fluent builder and the `fsa!`/`dtmc!` macros for
//! creating automata in one expression, with every structural mistake
//! reported as a [`BuildError`].

pub mod automaton;
pub mod error;
pub mod macros;

pub use automaton::{AutomatonBuilder, FiniteAutomatonBuilder, MarkovChainBuilder};
pub use error::BuildError;
