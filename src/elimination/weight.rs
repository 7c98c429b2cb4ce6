//! The seam between plain automata and Markov chains.
//!
//! The engine is written once over `W: Weight`. Plain automata use `()`,
//! which makes every weight operation a no-op and renders unions with the
//! plain algebra; chains use [`Probability`], which tracks path mass and
//! renders weighted unions.

use super::normalize;
use crate::algebra::{self, weighted};
use crate::core::{Automaton, GraphError, StateId};
use crate::probability::{self, Probability};
use std::fmt;
use std::hash::Hash;

/// A value carried on every transition alongside its label.
pub trait Weight: Clone + Eq + Hash + fmt::Debug + Sized {
    /// Weight of a saturating empty-language transition.
    fn zero() -> Self;

    /// Weight of an epsilon link added during normalization.
    fn one() -> Self;

    /// Weight of a path that follows `self` and then `next`.
    fn series(&self, next: &Self) -> Self;

    /// Weight of a choice between `self` and `other`.
    fn parallel(&self, other: &Self) -> Self;

    /// Render the label of a choice between `r1` and `r2`.
    fn alternate(r1: &str, w1: &Self, r2: &str, w2: &Self) -> String;

    /// Rewrite the automaton so it has exactly one final state, distinct from
    /// the initial one, and return that state.
    fn normalize(automaton: &mut Automaton<Self>) -> Result<StateId, GraphError> {
        normalize::link_final_states(automaton)
    }

    /// Adjust weights once saturation is complete.
    fn prepare(_automaton: &mut Automaton<Self>) -> Result<(), GraphError> {
        Ok(())
    }
}

impl Weight for () {
    fn zero() -> Self {}

    fn one() -> Self {}

    fn series(&self, _next: &Self) -> Self {}

    fn parallel(&self, _other: &Self) -> Self {}

    fn alternate(r1: &str, _w1: &Self, r2: &str, _w2: &Self) -> String {
        algebra::union(r1, r2)
    }
}

impl Weight for Probability {
    fn zero() -> Self {
        Probability::zero()
    }

    fn one() -> Self {
        Probability::one()
    }

    fn series(&self, next: &Self) -> Self {
        self * next
    }

    fn parallel(&self, other: &Self) -> Self {
        self + other
    }

    fn alternate(r1: &str, w1: &Self, r2: &str, w2: &Self) -> String {
        weighted::union_label(r1, w1, r2, w2)
    }

    fn normalize(automaton: &mut Automaton<Self>) -> Result<StateId, GraphError> {
        normalize::redirect_final_loops(automaton)
    }

    fn prepare(automaton: &mut Automaton<Self>) -> Result<(), GraphError> {
        probability::weight_chain(automaton)
    }
}
