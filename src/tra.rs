//! Plain-text adjacency format (`.tra`).
//!
//! ```text
//! 4 5          <states> [<transitions>]
//! 0 1 0.5      <from> <to> <weight>
//! 0 3 0.5
//! 1 2 1
//! 2 3 1
//! 3 3 1
//! 3            optional final ids (chains, after a counted list)
//! ```
//!
//! States are `0..states`, state 0 is initial, and by default the highest id
//! is the only final state. Each transition is labeled `s<to>`. A plain
//! automaton ignores the weight column beyond checking it is a number; a
//! chain takes it as the transition probability.
//!
//! When the header gives a transition count, exactly that many transition
//! lines follow, and a chain may add one last line listing its final states.

use crate::core::{Automaton, FiniteAutomaton, GraphError, MarkovChain, StateId, Transition};
use crate::probability::Probability;
use std::fmt::Write as _;
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Largest chain the importer accepts.
pub const MAX_CHAIN_STATES: usize = 500;

/// Errors from reading or writing `.tra` data.
#[derive(Debug, Error)]
pub enum TraError {
    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input is empty; expected a header line")]
    MissingHeader,

    #[error("Line {line}: expected {expected}, found {found} fields")]
    FieldCount {
        line: usize,
        expected: &'static str,
        found: usize,
    },

    #[error("Line {line}: '{value}' is not a non-negative integer")]
    InvalidInteger { line: usize, value: String },

    #[error("Line {line}: '{value}' is not a number")]
    InvalidWeight { line: usize, value: String },

    #[error("Line {line}: state {id} is outside 0..{states}")]
    UnknownState { line: usize, id: usize, states: usize },

    #[error("An automaton needs at least one state")]
    NoStates,

    #[error("{count} states exceed the limit of {limit}")]
    TooManyStates { count: usize, limit: usize },

    #[error("Header announces {expected} transitions, found {found}")]
    TransitionCount { expected: usize, found: usize },

    #[error("Line {line}: unexpected content after the transition list")]
    TrailingLine { line: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Weights the format can carry.
pub trait TraWeight: Clone + Eq + Hash {
    /// Parse the weight column of line `line`.
    fn parse_weight(value: &str, line: usize) -> Result<Self, TraError>;

    /// Render for the weight column.
    fn render(&self) -> String;

    /// Whether a trailing final-state line is understood.
    fn explicit_finals() -> bool;
}

impl TraWeight for () {
    fn parse_weight(value: &str, line: usize) -> Result<Self, TraError> {
        value
            .parse::<f64>()
            .map(|_| ())
            .map_err(|_| TraError::InvalidWeight {
                line,
                value: value.to_string(),
            })
    }

    fn render(&self) -> String {
        "1".to_string()
    }

    fn explicit_finals() -> bool {
        false
    }
}

impl TraWeight for Probability {
    fn parse_weight(value: &str, line: usize) -> Result<Self, TraError> {
        value.parse().map_err(|_| TraError::InvalidWeight {
            line,
            value: value.to_string(),
        })
    }

    fn render(&self) -> String {
        self.compact()
    }

    fn explicit_finals() -> bool {
        true
    }
}

struct Line<'a> {
    number: usize,
    fields: Vec<&'a str>,
}

fn integer(value: &str, line: usize) -> Result<usize, TraError> {
    value.parse().map_err(|_| TraError::InvalidInteger {
        line,
        value: value.to_string(),
    })
}

fn state(value: &str, line: usize, states: usize) -> Result<StateId, TraError> {
    let id = integer(value, line)?;
    if id >= states {
        return Err(TraError::UnknownState { line, id, states });
    }
    Ok(StateId(id))
}

fn parse<W: TraWeight>(input: &str, limit: Option<usize>) -> Result<Automaton<W>, TraError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, text)| Line {
            number: i + 1,
            fields: text.split_whitespace().collect(),
        })
        .filter(|line| !line.fields.is_empty());

    let header = lines.next().ok_or(TraError::MissingHeader)?;
    let (states, announced) = match header.fields.as_slice() {
        [n] => (integer(n, header.number)?, None),
        [n, m] => (integer(n, header.number)?, Some(integer(m, header.number)?)),
        other => {
            return Err(TraError::FieldCount {
                line: header.number,
                expected: "1 or 2",
                found: other.len(),
            })
        }
    };
    if states == 0 {
        return Err(TraError::NoStates);
    }
    if let Some(limit) = limit.filter(|&limit| states > limit) {
        return Err(TraError::TooManyStates {
            count: states,
            limit,
        });
    }

    let body: Vec<Line<'_>> = lines.collect();
    let (edges, rest) = match announced {
        Some(expected) if body.len() < expected => {
            return Err(TraError::TransitionCount {
                expected,
                found: body.len(),
            })
        }
        Some(expected) => body.split_at(expected),
        None => (body.as_slice(), &[][..]),
    };

    let mut automaton = Automaton::new();
    for id in 0..states {
        automaton.create_state_with_id(id)?;
    }
    automaton.set_initial_state(StateId(0))?;

    for line in edges {
        let [from, to, weight] = line.fields.as_slice() else {
            return Err(TraError::FieldCount {
                line: line.number,
                expected: "3",
                found: line.fields.len(),
            });
        };
        let from = state(from, line.number, states)?;
        let to = state(to, line.number, states)?;
        let weight = W::parse_weight(weight, line.number)?;
        if !automaton.add_transition(Transition::new(from, to, format!("s{}", to.index()), weight)) {
            debug!(line = line.number, "duplicate_tra_transition_skipped");
        }
    }

    let finals = match rest {
        [] => vec![StateId(states - 1)],
        [line] if W::explicit_finals() => line
            .fields
            .iter()
            .map(|id| state(id, line.number, states))
            .collect::<Result<Vec<_>, _>>()?,
        [line, ..] => return Err(TraError::TrailingLine { line: line.number }),
    };
    for id in finals {
        automaton.add_final_state(id)?;
    }

    debug!(
        states,
        transitions = automaton.transition_count(),
        "tra_parsed"
    );
    Ok(automaton)
}

/// Parse a plain automaton.
pub fn parse_fsa(input: &str) -> Result<FiniteAutomaton, TraError> {
    parse(input, None)
}

/// Parse a Markov chain of at most [`MAX_CHAIN_STATES`] states.
pub fn parse_dtmc(input: &str) -> Result<MarkovChain, TraError> {
    parse(input, Some(MAX_CHAIN_STATES))
}

fn read(path: &Path) -> Result<String, TraError> {
    fs::read_to_string(path).map_err(|source| TraError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_fsa(path: impl AsRef<Path>) -> Result<FiniteAutomaton, TraError> {
    parse_fsa(&read(path.as_ref())?)
}

pub fn read_dtmc(path: impl AsRef<Path>) -> Result<MarkovChain, TraError> {
    parse_dtmc(&read(path.as_ref())?)
}

/// Render an automaton: a `<states> <transitions>` header, then each state's
/// outgoing transitions in state order.
///
/// Chains whose final states differ from the default get a trailing final
/// line. Labels are not part of the format and are lost.
pub fn to_tra<W: TraWeight>(automaton: &Automaton<W>) -> String {
    let mut out = format!(
        "{} {}\n",
        automaton.state_count(),
        automaton.transition_count()
    );
    for id in automaton.state_ids() {
        for t in automaton.transitions_from(id).iter() {
            let _ = writeln!(out, "{} {} {}", t.from.index(), t.to.index(), t.weight.render());
        }
    }

    let finals = automaton.final_states();
    let default = automaton.state_ids().last().copied().into_iter().collect::<Vec<_>>();
    if W::explicit_finals() && finals != default {
        let ids: Vec<_> = finals.iter().map(|id| id.index().to_string()).collect();
        let _ = writeln!(out, "{}", ids.join(" "));
    }
    out
}

/// Write [`to_tra`] output to `path`.
pub fn write_tra<W: TraWeight>(automaton: &Automaton<W>, path: impl AsRef<Path>) -> Result<(), TraError> {
    let path = path.as_ref();
    fs::write(path, to_tra(automaton)).map_err(|source| TraError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_import_labels_by_target_and_finalizes_highest_id() {
        let fsa = parse_fsa("3\n0 1 0.5\n1 2 1\n\n2 2 1\n").unwrap();

        assert_eq!(fsa.state_count(), 3);
        assert_eq!(fsa.initial_state(), Some(StateId(0)));
        assert_eq!(fsa.final_states(), vec![StateId(2)]);
        assert!(fsa.contains_transition(&Transition::plain(StateId(1), StateId(2), "s2")));
        assert_eq!(fsa.transition_count(), 3);
    }

    #[test]
    fn chain_import_reads_probabilities_and_final_line() {
        let chain = parse_dtmc("3 2\n0 1 0.25\n1 2 0.75\n1 2\n").unwrap();

        assert_eq!(chain.final_states(), vec![StateId(1), StateId(2)]);
        let t = &chain.transitions_from(StateId(0))[0];
        assert_eq!(t.label, "s1");
        assert_eq!(t.weight, "0.25".parse().unwrap());
    }

    #[test]
    fn plain_import_rejects_final_line() {
        assert!(matches!(
            parse_fsa("3 1\n0 1 1\n2\n"),
            Err(TraError::TrailingLine { line: 3 })
        ));
    }

    #[test]
    fn malformed_input_is_reported_with_line_numbers() {
        assert!(matches!(parse_fsa(""), Err(TraError::MissingHeader)));
        assert!(matches!(parse_fsa("0"), Err(TraError::NoStates)));
        assert!(matches!(
            parse_fsa("2\n0 x 1"),
            Err(TraError::InvalidInteger { line: 2, .. })
        ));
        assert!(matches!(
            parse_fsa("2\n0 5 1"),
            Err(TraError::UnknownState { line: 2, id: 5, states: 2 })
        ));
        assert!(matches!(
            parse_fsa("2\n0 1"),
            Err(TraError::FieldCount { line: 2, found: 2, .. })
        ));
        assert!(matches!(
            parse_dtmc("2\n0 1 half"),
            Err(TraError::InvalidWeight { line: 2, .. })
        ));
        assert!(matches!(
            parse_fsa("2 3\n0 1 1"),
            Err(TraError::TransitionCount { expected: 3, found: 1 })
        ));
    }

    #[test]
    fn oversized_chains_are_rejected() {
        let input = format!("{}\n0 1 1\n", MAX_CHAIN_STATES + 1);
        assert!(matches!(
            parse_dtmc(&input),
            Err(TraError::TooManyStates { count: 501, limit: 500 })
        ));
        assert!(parse_fsa(&input).is_ok());
    }

    #[test]
    fn export_writes_header_and_unit_weights() {
        let fsa = parse_fsa("3\n0 1 0.5\n1 2 0.5\n").unwrap();
        assert_eq!(to_tra(&fsa), "3 2\n0 1 1\n1 2 1\n");
    }

    #[test]
    fn chain_export_round_trips() {
        let input = "3 3\n0 0 0.7\n0 1 0.3\n1 2 1\n0\n";
        let chain = parse_dtmc(input).unwrap();

        assert_eq!(to_tra(&chain), input);
        let again = parse_dtmc(&to_tra(&chain)).unwrap();
        assert_eq!(&*again.transitions(), &*chain.transitions());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            read_fsa("/nonexistent/input.tra"),
            Err(TraError::Io { .. })
        ));
    }
}
