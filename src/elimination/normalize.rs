//! Reduction to a single final state.

use super::weight::Weight;
use crate::algebra::EPSILON;
use crate::core::{Automaton, GraphError, MarkovChain, StateId, Transition};
use crate::probability::Probability;
use tracing::debug;

/// True unless the automaton already has one final state that is not the
/// initial state.
pub fn needs_normalization<W>(automaton: &Automaton<W>) -> bool {
    match automaton.final_states().as_slice() {
        [only] => automaton.is_initial_state(*only),
        _ => true,
    }
}

/// Add a fresh final state and link every old final state to it with an
/// epsilon transition.
pub fn link_final_states<W: Weight>(automaton: &mut Automaton<W>) -> Result<StateId, GraphError> {
    let finals = automaton.final_states();
    let target = automaton.create_state();
    for old in &finals {
        automaton.add_transition(Transition::new(*old, target, EPSILON, W::one()));
        automaton.remove_final_state(*old);
    }
    automaton.add_final_state(target)?;
    debug!(final_state = %target, merged = finals.len(), "final_states_linked");
    Ok(target)
}

/// Add a fresh final state and move every old final state's self-loops onto
/// it. An old final state without a self-loop gets an epsilon link of
/// probability one instead. The fresh state loops on epsilon.
pub fn redirect_final_loops(chain: &mut MarkovChain) -> Result<StateId, GraphError> {
    let finals = chain.final_states();
    let target = chain.create_state();
    for old in &finals {
        let loops = chain.transitions_between(*old, *old);
        if loops.is_empty() {
            chain.add_transition(Transition::new(*old, target, EPSILON, Probability::one()));
        }
        for looped in loops {
            let redirected =
                Transition::new(*old, target, looped.label.clone(), looped.weight.clone());
            chain.replace_transition(&looped, redirected)?;
        }
        chain.remove_final_state(*old);
    }
    chain.add_transition(Transition::new(target, target, EPSILON, Probability::one()));
    chain.add_final_state(target)?;
    debug!(final_state = %target, merged = finals.len(), "final_loops_redirected");
    Ok(target)
}
