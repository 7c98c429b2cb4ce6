//! The conversion pipeline.
//!
//! ```text
//! check -> normalize -> weight (chains) -> saturate -> eliminate -> close
//! ```
//!
//! `check` runs before anything is mutated. Every later step rewrites the
//! automaton in place, which is why [`Converter::convert`] takes it by value.

use super::config::{ConversionConfig, ConverterBuilder, EliminationOrder};
use super::error::{ConversionError, Phase};
use super::normalize::needs_normalization;
use super::weight::Weight;
use crate::algebra::weighted::WeightedExpression;
use crate::algebra::{concat, star, to_pattern, EMPTY};
use crate::core::{Automaton, GraphError, StateId, Transition};
use crate::precondition::{self, PreconditionViolation};
use crate::probability::Probability;
use stillwater::validation::Validation;
use tracing::{debug, info, warn};

/// Outcome of a conversion.
#[derive(Debug, Clone)]
pub struct Conversion<W> {
    /// The closed-form expression.
    pub expression: String,
    /// Weight of the direct initial-to-final term of the reduced graph.
    pub weight: W,
    pub initial: StateId,
    pub final_state: StateId,
    /// Intermediate states, in the order they were removed.
    pub eliminated: Vec<StateId>,
    /// What is left of the input: the initial and final states with their
    /// four transitions.
    pub reduced: Automaton<W>,
}

impl<W> Conversion<W> {
    /// The expression in conventional regex syntax. See
    /// [`to_pattern`](crate::algebra::to_pattern).
    pub fn pattern(&self) -> Option<String> {
        to_pattern(&self.expression)
    }
}

impl Conversion<Probability> {
    pub fn into_weighted(self) -> WeightedExpression {
        WeightedExpression::new(self.expression, self.weight)
    }
}

/// Converts automata to expressions by state elimination.
///
/// # Example
///
/// ```rust
/// use statelim::core::{FiniteAutomaton, Transition};
/// use statelim::elimination::Converter;
///
/// let mut fsa = FiniteAutomaton::new();
/// let q0 = fsa.create_state();
/// let q1 = fsa.create_state();
/// let q2 = fsa.create_state();
/// fsa.set_initial_state(q0).unwrap();
/// fsa.add_final_state(q2).unwrap();
/// fsa.add_transition(Transition::plain(q0, q1, "a"));
/// fsa.add_transition(Transition::plain(q1, q1, "b"));
/// fsa.add_transition(Transition::plain(q1, q2, "c"));
///
/// let conversion = Converter::new().convert(fsa).unwrap();
/// assert_eq!(conversion.expression, "a:b*:c");
/// assert_eq!(conversion.reduced.state_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    /// A converter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Run the whole pipeline.
    ///
    /// The automaton is consumed: elimination destroys it. Clone it first if
    /// the original is still needed.
    pub fn convert<W: Weight>(
        &self,
        mut automaton: Automaton<W>,
    ) -> Result<Conversion<W>, ConversionError> {
        info!(
            states = automaton.state_count(),
            transitions = automaton.transition_count(),
            "conversion_started"
        );

        self.check(&automaton)?;
        let (initial, final_state) = self.normalize(&mut automaton)?;
        if self.config.weight_transitions {
            W::prepare(&mut automaton).map_err(ConversionError::graph(Phase::Weight))?;
        }
        self.saturate(&mut automaton);
        let eliminated = self.eliminate(&mut automaton, initial, final_state)?;
        let (expression, weight) = self.close(&automaton, initial, final_state)?;

        info!(
            eliminated = eliminated.len(),
            length = expression.chars().count(),
            "conversion_finished"
        );
        Ok(Conversion {
            expression,
            weight,
            initial,
            final_state,
            eliminated,
            reduced: automaton,
        })
    }

    /// Verify the structural preconditions without touching the automaton.
    pub fn check<W: Weight>(&self, automaton: &Automaton<W>) -> Result<(), ConversionError> {
        match precondition::check(automaton, self.config.require_reachable_final) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => {
                let violations: Vec<_> = errors.iter().cloned().collect();
                warn!(count = violations.len(), "preconditions_failed");
                Err(ConversionError::Preconditions(violations))
            }
        }
    }

    /// Ensure exactly one final state, distinct from the initial state.
    /// Returns `(initial, final)`.
    pub fn normalize<W: Weight>(
        &self,
        automaton: &mut Automaton<W>,
    ) -> Result<(StateId, StateId), ConversionError> {
        let initial = automaton.initial_state().ok_or_else(|| {
            ConversionError::Preconditions(vec![PreconditionViolation::MissingInitialState])
        })?;
        let finals = automaton.final_states();
        if finals.is_empty() {
            return Err(ConversionError::Preconditions(vec![
                PreconditionViolation::NoFinalStates,
            ]));
        }

        if !needs_normalization(automaton) {
            return Ok((initial, finals[0]));
        }
        let final_state = W::normalize(automaton).map_err(ConversionError::graph(Phase::Normalize))?;
        Ok((initial, final_state))
    }

    /// Give every ordered pair of states exactly one transition.
    ///
    /// Missing pairs get an empty-language transition of zero weight;
    /// parallel transitions are folded into one union.
    pub fn saturate<W: Weight>(&self, automaton: &mut Automaton<W>) {
        let ids = automaton.state_ids();
        let mut filled = 0usize;
        let mut folded = 0usize;

        for &from in &ids {
            for &to in &ids {
                let parallel = automaton.transitions_between(from, to);
                match parallel.len() {
                    0 => {
                        automaton.add_transition(Transition::new(from, to, EMPTY, W::zero()));
                        filled += 1;
                    }
                    1 => {}
                    _ => {
                        for t in &parallel {
                            automaton.remove_transition(t);
                        }
                        automaton.add_transition(fold_parallel(from, to, &parallel));
                        folded += 1;
                    }
                }
            }
        }
        debug!(states = ids.len(), filled, folded, "graph_saturated");
    }

    /// Remove every state other than `initial` and `final_state`, in the
    /// configured order. Returns the removed states.
    pub fn eliminate<W: Weight>(
        &self,
        automaton: &mut Automaton<W>,
        initial: StateId,
        final_state: StateId,
    ) -> Result<Vec<StateId>, ConversionError> {
        let mut order: Vec<_> = automaton
            .state_ids()
            .into_iter()
            .filter(|&s| s != initial && s != final_state)
            .collect();
        if self.config.elimination_order == EliminationOrder::DescendingId {
            order.reverse();
        }

        for &state in &order {
            self.eliminate_state(automaton, state)?;
        }
        Ok(order)
    }

    /// Remove one intermediate state from a saturated graph, rewriting every
    /// remaining pair as `pq + pk kk* kq`.
    pub fn eliminate_state<W: Weight>(
        &self,
        automaton: &mut Automaton<W>,
        state: StateId,
    ) -> Result<(), ConversionError> {
        if !automaton.contains_state(state) {
            return Err(ConversionError::Graph {
                phase: Phase::Eliminate,
                source: GraphError::UnknownState { id: state },
            });
        }
        if automaton.is_initial_state(state) || automaton.is_final_state(state) {
            return Err(ConversionError::ProtectedState { state });
        }

        let others: Vec<_> = automaton
            .state_ids()
            .into_iter()
            .filter(|&s| s != state)
            .collect();
        let looped = star(&edge(automaton, state, state, Phase::Eliminate)?.label);

        let mut rewritten = Vec::with_capacity(others.len() * others.len());
        for &p in &others {
            let pk = edge(automaton, p, state, Phase::Eliminate)?;
            for &q in &others {
                let pq = edge(automaton, p, q, Phase::Eliminate)?;
                let kq = edge(automaton, state, q, Phase::Eliminate)?;

                let through = concat(&pk.label, &concat(&looped, &kq.label));
                let through_weight = pk.weight.series(&kq.weight);
                let label = W::alternate(&pq.label, &pq.weight, &through, &through_weight);
                let weight = pq.weight.parallel(&through_weight);
                rewritten.push(Transition::new(p, q, label, weight));
            }
        }

        automaton.clear_transitions();
        automaton
            .remove_state(state)
            .map_err(ConversionError::graph(Phase::Eliminate))?;
        for t in rewritten {
            automaton.add_transition(t);
        }
        debug!(state = %state, remaining = automaton.state_count(), "state_eliminated");
        Ok(())
    }

    /// Fold the two-state graph into its closed form
    /// `(ii* ij jj* ji)* ii* ij jj*`.
    pub fn close<W: Weight>(
        &self,
        automaton: &Automaton<W>,
        initial: StateId,
        final_state: StateId,
    ) -> Result<(String, W), ConversionError> {
        let ii = edge(automaton, initial, initial, Phase::Close)?;
        let ij = edge(automaton, initial, final_state, Phase::Close)?;
        let jj = edge(automaton, final_state, final_state, Phase::Close)?;
        let ji = edge(automaton, final_state, initial, Phase::Close)?;

        let ii_star = star(&ii.label);
        let jj_star = star(&jj.label);
        let round_trip = concat(&ii_star, &concat(&ij.label, &concat(&jj_star, &ji.label)));
        let to_final = concat(&ii_star, &concat(&ij.label, &jj_star));
        let expression = concat(&star(&round_trip), &to_final);

        debug!(initial = %initial, final_state = %final_state, "graph_closed");
        Ok((expression, ij.weight))
    }
}

fn edge<W: Weight>(
    automaton: &Automaton<W>,
    from: StateId,
    to: StateId,
    phase: Phase,
) -> Result<Transition<W>, ConversionError> {
    automaton
        .transitions_between(from, to)
        .into_iter()
        .next()
        .ok_or(ConversionError::IncompleteGraph { phase, from, to })
}

fn fold_parallel<W: Weight>(from: StateId, to: StateId, parallel: &[Transition<W>]) -> Transition<W> {
    let (label, weight) = parallel.iter().fold(
        (EMPTY.to_string(), W::zero()),
        |(label, weight), t| {
            (
                W::alternate(&label, &weight, &t.label, &t.weight),
                weight.parallel(&t.weight),
            )
        },
    );
    Transition::new(from, to, label, weight)
}
