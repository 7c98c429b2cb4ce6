//! State elimination: automaton in, expression out.
//!
//! The engine normalizes the automaton to a single final state, saturates it
//! so every ordered pair of states has exactly one transition, removes the
//! intermediate states one at a time, and folds the remaining two-state graph
//! into a closed form.
//!
//! The same engine serves plain automata and Markov chains; the difference
//! lives behind the [`Weight`] trait.
//!
//! # Example
//!
//! ```rust
//! use statelim::builder::{FiniteAutomatonBuilder, MarkovChainBuilder};
//! use statelim::elimination::{dtmc_to_sre, fsa_to_regex};
//!
//! let fsa = FiniteAutomatonBuilder::new()
//!     .states(0..2)
//!     .initial(0)
//!     .final_state(1)
//!     .transition(0, 1, "a")
//!     .transition(1, 1, "b")
//!     .build()
//!     .unwrap();
//! assert_eq!(fsa_to_regex(fsa).unwrap(), "a:b*");
//!
//! let chain = MarkovChainBuilder::new()
//!     .states(0..3)
//!     .initial(0)
//!     .final_state(2)
//!     .transition(0, 1, "x", "0.5")
//!     .transition(0, 2, "y", "0.5")
//!     .transition(1, 2, "z", "0.9")
//!     .build()
//!     .unwrap();
//! let sre = dtmc_to_sre(chain).unwrap();
//! assert_eq!(sre.expression, "y[500]+(x:z)[500]");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod weight;

pub use config::{ConversionConfig, ConverterBuilder, EliminationOrder};
pub use engine::{Conversion, Converter};
pub use error::{ConversionError, Phase};
pub use weight::Weight;

use crate::algebra::weighted::WeightedExpression;
use crate::core::{FiniteAutomaton, MarkovChain};

/// Convert a plain automaton to a regular expression with default settings.
pub fn fsa_to_regex(automaton: FiniteAutomaton) -> Result<String, ConversionError> {
    Converter::new()
        .convert(automaton)
        .map(|conversion| conversion.expression)
}

/// Convert a Markov chain to a stochastic regular expression with default
/// settings.
pub fn dtmc_to_sre(chain: MarkovChain) -> Result<WeightedExpression, ConversionError> {
    Converter::new()
        .convert(chain)
        .map(|conversion| conversion.into_weighted())
}
