//! Exact decimal probabilities and the transition weighting step.
//!
//! Every probability is held at a fixed scale of ten fractional digits with
//! banker's rounding, so products and sums of chain weights compare exactly.

use crate::algebra::{is_empty_set, is_epsilon};
use crate::core::{GraphError, MarkovChain, StateId, Transition};
use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Fractional digits kept on every probability.
pub const SCALE: i64 = 10;

/// Fractional digits kept on percentage sums and renormalized shares.
pub const PERCENT_SCALE: i64 = 2;

/// Errors from parsing a probability.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProbabilityError {
    #[error("'{value}' is not a decimal number: {reason}")]
    Malformed { value: String, reason: String },

    #[error("{value} is not a finite number")]
    NotFinite { value: f64 },
}

/// A transition probability.
///
/// # Example
///
/// ```rust
/// use statelim::Probability;
///
/// let p: Probability = "0.7".parse().unwrap();
/// let q: Probability = "0.3".parse().unwrap();
///
/// assert_eq!(&p + &q, Probability::one());
/// assert_eq!((&p * &q).to_string(), "0.2100000000");
/// assert_eq!(p.permille().to_string(), "700");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Probability(BigDecimal);

impl Probability {
    /// Wrap a decimal, rounding it to [`SCALE`] digits.
    pub fn new(value: BigDecimal) -> Self {
        Self(value.with_scale_round(SCALE, RoundingMode::HalfEven))
    }

    pub fn zero() -> Self {
        Self::new(BigDecimal::from(0i64))
    }

    pub fn one() -> Self {
        Self::new(BigDecimal::from(1i64))
    }

    /// Convert a float through its shortest decimal representation, so
    /// `0.7` becomes exactly `0.7`.
    pub fn from_f64(value: f64) -> Result<Self, ProbabilityError> {
        if !value.is_finite() {
            return Err(ProbabilityError::NotFinite { value });
        }
        value.to_string().parse()
    }

    /// The underlying decimal.
    pub fn value(&self) -> &BigDecimal {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigDecimal::from(0i64)
    }

    /// The value rounded to `scale` fractional digits.
    pub fn rounded(&self, scale: i64) -> BigDecimal {
        self.0.with_scale_round(scale, RoundingMode::HalfEven)
    }

    /// The probability in thousandths, rounded half-even. Used as the
    /// bracketed weight on union operands.
    pub fn permille(&self) -> BigDecimal {
        (&self.0 * BigDecimal::from(1000i64)).with_scale_round(0, RoundingMode::HalfEven)
    }

    /// The value without trailing zeros, in plain notation (`0.7`, `1`).
    pub fn compact(&self) -> String {
        self.0.normalized().to_plain_string()
    }
}

impl Default for Probability {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_plain_string())
    }
}

impl FromStr for Probability {
    type Err = ProbabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigDecimal::from_str(s.trim())
            .map(Self::new)
            .map_err(|err| ProbabilityError::Malformed {
                value: s.to_string(),
                reason: err.to_string(),
            })
    }
}

impl TryFrom<String> for Probability {
    type Error = ProbabilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Probability> for String {
    fn from(p: Probability) -> Self {
        p.to_string()
    }
}

impl From<BigDecimal> for Probability {
    fn from(value: BigDecimal) -> Self {
        Self::new(value)
    }
}

impl Add for &Probability {
    type Output = Probability;

    fn add(self, rhs: &Probability) -> Probability {
        Probability::new(&self.0 + &rhs.0)
    }
}

impl Mul for &Probability {
    type Output = Probability;

    fn mul(self, rhs: &Probability) -> Probability {
        Probability::new(&self.0 * &rhs.0)
    }
}

/// Transitions that take part in renormalization: everything except
/// self-loops and epsilon or empty-language links.
fn is_weighted_exit(t: &Transition<Probability>) -> bool {
    !t.is_loop() && !is_epsilon(&t.label) && !is_empty_set(&t.label)
}

/// Renormalize the exits of `state` so they sum to one.
///
/// Each qualifying probability `p` is scaled to percent, summed to two
/// digits, and replaced by `(100 p) / sum` at two digits, half-even.
/// Self-loops and epsilon/empty links keep their probability. A state whose
/// qualifying exits sum to zero is left alone.
pub fn weight_transitions(chain: &mut MarkovChain, state: StateId) -> Result<(), GraphError> {
    if !chain.contains_state(state) {
        return Err(GraphError::UnknownState { id: state });
    }

    let exits: Vec<_> = chain
        .transitions_from(state)
        .iter()
        .filter(|t| is_weighted_exit(t))
        .cloned()
        .collect();
    if exits.is_empty() {
        return Ok(());
    }

    let hundred = BigDecimal::from(100i64);
    let total = exits
        .iter()
        .fold(BigDecimal::from(0i64), |acc, t| acc + t.weight.value() * &hundred)
        .with_scale_round(PERCENT_SCALE, RoundingMode::HalfEven);
    if total == BigDecimal::from(0i64) {
        warn!(state = %state, exits = exits.len(), "zero_probability_exits_skipped");
        return Ok(());
    }

    let mut reweighted: Vec<Transition<Probability>> = Vec::with_capacity(exits.len());
    for exit in &exits {
        let share = (exit.weight.value() * &hundred / &total)
            .with_scale_round(PERCENT_SCALE, RoundingMode::HalfEven);
        let mut next = Transition::new(exit.from, exit.to, exit.label.clone(), share.into());
        // Parallel exits that round to the same share would be one transition
        // in the store; fold them so their mass is kept.
        while let Some(pos) = reweighted.iter().position(|t| *t == next) {
            let twin = reweighted.remove(pos);
            next.weight = &twin.weight + &next.weight;
        }
        reweighted.push(next);
    }

    for exit in &exits {
        chain.remove_transition(exit);
    }
    let merged = exits.len() - reweighted.len();
    for t in reweighted {
        chain.add_transition(t);
    }
    debug!(state = %state, total = %total, merged, "transitions_weighted");
    Ok(())
}

/// Apply [`weight_transitions`] to every non-initial state, in ascending id
/// order.
pub fn weight_chain(chain: &mut MarkovChain) -> Result<(), GraphError> {
    for state in chain.state_ids() {
        if !chain.is_initial_state(state) {
            weight_transitions(chain, state)?;
        }
    }
    Ok(())
}
