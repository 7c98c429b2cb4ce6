//! Statelim: automata to regular expressions by state elimination
//!
//! Statelim converts a finite automaton into an equivalent regular
//! expression, and a discrete-time Markov chain into a stochastic regular
//! expression whose alternatives carry their probabilities.
//!
//! # Core Concepts
//!
//! - **Automaton**: a mutable graph of states and labeled transitions,
//!   generic over the weight each transition carries
//! - **Expression algebra**: union (`+`), concatenation (`:`) and star (`*`)
//!   over string labels, with the empty language `ø` and the empty word `λ`
//! - **Converter**: normalizes, saturates and reduces an automaton to two
//!   states, then reads off the closed-form expression
//!
//! # Example
//!
//! ```rust
//! use statelim::{fsa, fsa_to_regex};
//!
//! let automaton = fsa! {
//!     states: 3,
//!     initial: 0,
//!     finals: [2],
//!     transitions: [
//!         (0, 1, "a"),
//!         (1, 1, "b"),
//!         (1, 2, "c"),
//!     ],
//! }
//! .unwrap();
//!
//! assert_eq!(fsa_to_regex(automaton).unwrap(), "a:b*:c");
//! ```

pub mod algebra;
pub mod builder;
pub mod core;
pub mod elimination;
pub mod precondition;
pub mod probability;
pub mod snapshot;
pub mod tra;

// Re-export commonly used types
pub use algebra::weighted::WeightedExpression;
pub use builder::{BuildError, FiniteAutomatonBuilder, MarkovChainBuilder};
pub use self::core::{Automaton, FiniteAutomaton, GraphError, MarkovChain, StateId, Transition};
pub use elimination::{
    dtmc_to_sre, fsa_to_regex, Conversion, ConversionConfig, ConversionError, Converter,
    ConverterBuilder, EliminationOrder, Weight,
};
pub use probability::Probability;
