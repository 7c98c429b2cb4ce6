//! Builder for constructing automata.

use crate::builder::error::BuildError;
use crate::core::{Automaton, StateId, Transition};
use crate::probability::Probability;
use std::hash::Hash;

/// Builder for plain automata.
pub type FiniteAutomatonBuilder = AutomatonBuilder<()>;

/// Builder for Markov chains.
pub type MarkovChainBuilder = AutomatonBuilder<Probability>;

/// Builder for constructing automata with a fluent API.
///
/// Unlike the automaton's own mutators, which silently ignore duplicate or
/// dangling transitions, the builder reports them from [`build`](Self::build).
///
/// # Example
///
/// ```rust
/// use statelim::builder::FiniteAutomatonBuilder;
///
/// let fsa = FiniteAutomatonBuilder::new()
///     .states(0..3)
///     .initial(0)
///     .final_state(2)
///     .transition(0, 1, "a")
///     .transition(1, 2, "b")
///     .build()
///     .unwrap();
///
/// assert_eq!(fsa.state_count(), 3);
/// assert_eq!(fsa.transition_count(), 2);
/// ```
pub struct AutomatonBuilder<W> {
    states: Vec<usize>,
    names: Vec<(usize, String)>,
    initial: Option<usize>,
    finals: Vec<usize>,
    transitions: Vec<Transition<W>>,
    deferred: Option<BuildError>,
}

impl<W: Clone + Eq + Hash> AutomatonBuilder<W> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            names: Vec::new(),
            initial: None,
            finals: Vec::new(),
            transitions: Vec::new(),
            deferred: None,
        }
    }

    /// Declare one state.
    pub fn state(mut self, id: usize) -> Self {
        self.states.push(id);
        self
    }

    /// Declare several states at once.
    pub fn states(mut self, ids: impl IntoIterator<Item = usize>) -> Self {
        self.states.extend(ids);
        self
    }

    /// Give a declared state a display name.
    pub fn named(mut self, id: usize, name: impl Into<String>) -> Self {
        self.names.push((id, name.into()));
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, id: usize) -> Self {
        self.initial = Some(id);
        self
    }

    /// Mark a state final.
    pub fn final_state(mut self, id: usize) -> Self {
        self.finals.push(id);
        self
    }

    /// Mark several states final.
    pub fn final_states(mut self, ids: impl IntoIterator<Item = usize>) -> Self {
        self.finals.extend(ids);
        self
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<W>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Build the automaton.
    /// Returns the first problem found, in declaration order.
    pub fn build(self) -> Result<Automaton<W>, BuildError> {
        if let Some(err) = self.deferred {
            return Err(err);
        }
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut automaton = Automaton::new();
        for id in self.states {
            automaton
                .create_state_with_id(id)
                .map_err(|_| BuildError::DuplicateState { id })?;
        }
        for (id, name) in self.names {
            automaton
                .set_state_name(StateId(id), name)
                .map_err(|_| BuildError::UnknownState { id })?;
        }
        automaton
            .set_initial_state(StateId(initial))
            .map_err(|_| BuildError::UnknownState { id: initial })?;
        for id in self.finals {
            automaton
                .add_final_state(StateId(id))
                .map_err(|_| BuildError::UnknownState { id })?;
        }

        for transition in self.transitions {
            for endpoint in [transition.from, transition.to] {
                if !automaton.contains_state(endpoint) {
                    return Err(BuildError::UnknownState {
                        id: endpoint.index(),
                    });
                }
            }
            let (from, to, label) = (transition.from, transition.to, transition.label.clone());
            if !automaton.add_transition(transition) {
                return Err(BuildError::DuplicateTransition {
                    from: from.index(),
                    to: to.index(),
                    label,
                });
            }
        }

        Ok(automaton)
    }
}

impl AutomatonBuilder<()> {
    /// Add a labeled transition.
    pub fn transition(self, from: usize, to: usize, label: impl Into<String>) -> Self {
        self.add_transition(Transition::plain(StateId(from), StateId(to), label))
    }
}

impl AutomatonBuilder<Probability> {
    /// Add a labeled transition with a decimal probability such as `"0.25"`.
    /// A malformed probability is reported by [`build`](Self::build).
    pub fn transition(
        mut self,
        from: usize,
        to: usize,
        label: impl Into<String>,
        probability: &str,
    ) -> Self {
        match probability.parse::<Probability>() {
            Ok(p) => self.add_transition(Transition::new(StateId(from), StateId(to), label, p)),
            Err(err) => {
                self.deferred.get_or_insert(BuildError::InvalidProbability {
                    from,
                    to,
                    reason: err.to_string(),
                });
                self
            }
        }
    }
}

impl<W: Clone + Eq + Hash> Default for AutomatonBuilder<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates_required_fields() {
        let result = FiniteAutomatonBuilder::new().states(0..2).build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_rejects_undeclared_states() {
        let result = FiniteAutomatonBuilder::new()
            .states(0..2)
            .initial(0)
            .transition(0, 5, "a")
            .build();

        assert_eq!(result.unwrap_err(), BuildError::UnknownState { id: 5 });
    }

    #[test]
    fn builder_rejects_duplicates() {
        let states = FiniteAutomatonBuilder::new().states([0, 1, 0]).initial(0).build();
        assert_eq!(states.unwrap_err(), BuildError::DuplicateState { id: 0 });

        let transitions = FiniteAutomatonBuilder::new()
            .states(0..2)
            .initial(0)
            .transition(0, 1, "a")
            .transition(0, 1, "a")
            .build();
        assert!(matches!(
            transitions,
            Err(BuildError::DuplicateTransition { from: 0, to: 1, .. })
        ));
    }

    #[test]
    fn fluent_api_builds_chain() {
        let chain = MarkovChainBuilder::new()
            .states(0..2)
            .named(0, "start")
            .initial(0)
            .final_states([1])
            .transition(0, 1, "a", "0.4")
            .transition(0, 0, "b", "0.6")
            .build()
            .unwrap();

        assert_eq!(chain.initial_state(), Some(StateId(0)));
        assert_eq!(chain.final_states(), vec![StateId(1)]);
        assert_eq!(chain.state(StateId(0)).unwrap().name(), Some("start"));
        let weights: Vec<_> = chain
            .transitions_from(StateId(0))
            .iter()
            .map(|t| t.weight.compact())
            .collect();
        assert_eq!(weights, vec!["0.4", "0.6"]);
    }

    #[test]
    fn malformed_probability_surfaces_at_build() {
        let result = MarkovChainBuilder::new()
            .states(0..2)
            .initial(0)
            .transition(0, 1, "a", "forty percent")
            .transition(1, 0, "b", "also bad")
            .build();

        assert!(matches!(
            result,
            Err(BuildError::InvalidProbability { from: 0, to: 1, .. })
        ));
    }
}
