//! Structural checks run before any destructive step of a conversion.
//!
//! Checks are combined with Stillwater's `Validation`, so a caller gets
//! every violation in one pass instead of fixing them one at a time.
//!
//! # Example
//!
//! ```rust
//! use statelim::core::FiniteAutomaton;
//! use statelim::precondition::{check, PreconditionViolation};
//! use stillwater::validation::Validation;
//!
//! let mut fsa = FiniteAutomaton::new();
//! fsa.create_state();
//!
//! match check(&fsa, true) {
//!     Validation::Failure(violations) => {
//!         assert_eq!(violations.len(), 2);
//!         assert!(violations
//!             .iter()
//!             .any(|v| *v == PreconditionViolation::MissingInitialState));
//!     }
//!     Validation::Success(_) => panic!("expected violations"),
//! }
//! ```

pub mod violations;

pub use violations::PreconditionViolation;

use crate::algebra::is_empty_set;
use crate::core::Automaton;
use std::hash::Hash;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of one or more precondition checks.
pub type Checked = Validation<(), NonEmptyVec<PreconditionViolation>>;

/// The automaton designates an initial state.
pub fn has_initial_state<W>(automaton: &Automaton<W>) -> Checked {
    if automaton.initial_state().is_some() {
        Validation::success(())
    } else {
        Validation::fail(PreconditionViolation::MissingInitialState)
    }
}

/// The automaton designates at least one final state.
pub fn has_final_states<W>(automaton: &Automaton<W>) -> Checked {
    if automaton.final_states().is_empty() {
        Validation::fail(PreconditionViolation::NoFinalStates)
    } else {
        Validation::success(())
    }
}

/// Some final state is reachable from the initial state over transitions not
/// labeled with the empty language. Vacuously true when either designation
/// is missing; those cases are reported by the other checks.
pub fn final_state_reachable<W: Clone + Eq + Hash>(automaton: &Automaton<W>) -> Checked {
    let Some(initial) = automaton.initial_state() else {
        return Validation::success(());
    };
    let finals = automaton.final_states();
    if finals.is_empty() {
        return Validation::success(());
    }

    let reachable = automaton.reachable_from(initial, |t| !is_empty_set(&t.label));
    if finals.iter().any(|f| reachable.contains(f)) {
        Validation::success(())
    } else {
        Validation::fail(PreconditionViolation::UnreachableFinalStates { initial, finals })
    }
}

/// Run every check, accumulating all violations.
pub fn check<W: Clone + Eq + Hash>(automaton: &Automaton<W>, require_reachable_final: bool) -> Checked {
    let mut checks = vec![has_initial_state(automaton), has_final_states(automaton)];
    if require_reachable_final {
        checks.push(final_state_reachable(automaton));
    }
    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::EMPTY;
    use crate::core::{FiniteAutomaton, StateId, Transition};

    fn violations(result: Checked) -> Vec<PreconditionViolation> {
        match result {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    fn line(labels: &[&str]) -> FiniteAutomaton {
        let mut fsa = FiniteAutomaton::new();
        let mut prev = fsa.create_state();
        fsa.set_initial_state(prev).unwrap();
        for label in labels {
            let next = fsa.create_state();
            fsa.add_transition(Transition::plain(prev, next, *label));
            prev = next;
        }
        fsa.add_final_state(prev).unwrap();
        fsa
    }

    #[test]
    fn well_formed_automaton_passes() {
        assert!(violations(check(&line(&["a", "b"]), true)).is_empty());
    }

    #[test]
    fn empty_automaton_reports_both_designations() {
        let fsa = FiniteAutomaton::new();
        assert_eq!(
            violations(check(&fsa, true)),
            vec![
                PreconditionViolation::MissingInitialState,
                PreconditionViolation::NoFinalStates,
            ]
        );
    }

    #[test]
    fn empty_language_edges_do_not_connect() {
        let fsa = line(&["a", EMPTY]);
        assert_eq!(
            violations(check(&fsa, true)),
            vec![PreconditionViolation::UnreachableFinalStates {
                initial: StateId(0),
                finals: vec![StateId(2)],
            }]
        );
    }

    #[test]
    fn reachability_can_be_waived() {
        let fsa = line(&["a", EMPTY]);
        assert!(violations(check(&fsa, false)).is_empty());
    }

    #[test]
    fn initial_final_state_is_reachable_from_itself() {
        let mut fsa = FiniteAutomaton::new();
        let only = fsa.create_state();
        fsa.set_initial_state(only).unwrap();
        fsa.add_final_state(only).unwrap();

        assert!(violations(check(&fsa, true)).is_empty());
    }

    #[test]
    fn violation_messages_name_the_fix() {
        assert!(PreconditionViolation::MissingInitialState
            .to_string()
            .contains("set_initial_state()"));
    }
}
