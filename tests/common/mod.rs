//! Helpers shared by the integration tests.

#![allow(dead_code)]

use regex::Regex;
use statelim::algebra::to_pattern;
use statelim::core::{FiniteAutomaton, StateId};
use std::collections::BTreeSet;

/// Every word over `alphabet` of length at most `max_len`, shortest first.
pub fn words(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|prefix| {
                alphabet.iter().map(move |c| {
                    let mut word = prefix.clone();
                    word.push(*c);
                    word
                })
            })
            .collect();
        all.extend(frontier.iter().cloned());
    }
    all
}

/// Anchored matcher for an expression; `None` for the empty language.
pub fn matcher(expression: &str) -> Option<Regex> {
    to_pattern(expression)
        .map(|pattern| Regex::new(&format!("^(?:{pattern})$")).expect("pattern compiles"))
}

/// Does `expression` match `word`?
pub fn matches(expression: &str, word: &str) -> bool {
    matcher(expression).is_some_and(|re| re.is_match(word))
}

/// Run `automaton` on `word`, treating every label as one symbol.
pub fn accepts(automaton: &FiniteAutomaton, word: &str) -> bool {
    let Some(initial) = automaton.initial_state() else {
        return false;
    };
    let mut current: BTreeSet<StateId> = BTreeSet::from([initial]);
    for symbol in word.chars() {
        let symbol = symbol.to_string();
        current = current
            .iter()
            .flat_map(|&state| {
                automaton
                    .transitions_from(state)
                    .iter()
                    .filter(|t| t.label == symbol)
                    .map(|t| t.to)
                    .collect::<Vec<_>>()
            })
            .collect();
    }
    current.iter().any(|&state| automaton.is_final_state(state))
}
