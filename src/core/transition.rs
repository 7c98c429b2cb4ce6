//! Transitions between states.

use super::state::StateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A labeled transition between two states.
///
/// `W` is the weight carried alongside the label: `()` for plain automata,
/// [`Probability`](crate::Probability) for Markov chains. A transition is
/// identified by all four fields; an automaton never holds two transitions
/// that compare equal.
///
/// # Example
///
/// ```rust
/// use statelim::core::{StateId, Transition};
///
/// let t = Transition::plain(StateId(0), StateId(1), "a");
/// assert_eq!(t.from, StateId(0));
/// assert_eq!(t.label, "a");
/// assert!(!t.is_loop());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound(
    serialize = "W: Serialize",
    deserialize = "W: Deserialize<'de>"
))]
pub struct Transition<W> {
    /// Source state
    pub from: StateId,
    /// Target state
    pub to: StateId,
    /// Expression labeling the transition
    pub label: String,
    /// Weight paired with the label
    pub weight: W,
}

impl<W> Transition<W> {
    pub fn new(from: StateId, to: StateId, label: impl Into<String>, weight: W) -> Self {
        Self {
            from,
            to,
            label: label.into(),
            weight,
        }
    }

    /// True for self-loops.
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }
}

impl Transition<()> {
    /// Unweighted transition for plain automata.
    pub fn plain(from: StateId, to: StateId, label: impl Into<String>) -> Self {
        Self::new(from, to, label, ())
    }
}

impl<W: fmt::Debug> fmt::Display for Transition<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: \"{}\" {:?}", self.from, self.to, self.label, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_includes_label_and_weight() {
        let a = Transition::new(StateId(0), StateId(1), "a", 1u8);
        let b = Transition::new(StateId(0), StateId(1), "a", 2u8);
        let c = Transition::new(StateId(0), StateId(1), "b", 1u8);

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn loops_are_detected() {
        assert!(Transition::plain(StateId(3), StateId(3), "x").is_loop());
        assert!(!Transition::plain(StateId(3), StateId(1), "x").is_loop());
    }

    #[test]
    fn transition_round_trips_through_json() {
        let t = Transition::plain(StateId(2), StateId(5), "s5");
        let json = serde_json::to_string(&t).unwrap();
        let back: Transition<()> = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
