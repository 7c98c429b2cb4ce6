//! Macros for ergonomic automaton construction.

/// Build a plain automaton over states `0..states`.
///
/// Expands to a [`FiniteAutomatonBuilder`](crate::builder::FiniteAutomatonBuilder)
/// chain and evaluates to its `build()` result.
///
/// # Example
///
/// ```
/// use statelim::fsa;
///
/// let automaton = fsa! {
///     states: 3,
///     initial: 0,
///     finals: [2],
///     transitions: [
///         (0, 1, "a"),
///         (1, 2, "b"),
///     ],
/// }
/// .unwrap();
///
/// assert_eq!(automaton.transition_count(), 2);
/// ```
#[macro_export]
macro_rules! fsa {
    (
        states: $states:expr,
        initial: $initial:expr,
        finals: [$($final:expr),* $(,)?],
        transitions: [$(($from:expr, $to:expr, $label:expr)),* $(,)?] $(,)?
    ) => {
        $crate::builder::FiniteAutomatonBuilder::new()
            .states(0..$states)
            .initial($initial)
            $(.final_state($final))*
            $(.transition($from, $to, $label))*
            .build()
    };
}

/// Build a Markov chain over states `0..states`. Probabilities are decimal
/// strings.
///
/// # Example
///
/// ```
/// use statelim::dtmc;
///
/// let chain = dtmc! {
///     states: 2,
///     initial: 0,
///     finals: [1],
///     transitions: [
///         (0, 0, "a", "0.7"),
///         (0, 1, "b", "0.3"),
///     ],
/// }
/// .unwrap();
///
/// assert_eq!(chain.transition_count(), 2);
/// ```
#[macro_export]
macro_rules! dtmc {
    (
        states: $states:expr,
        initial: $initial:expr,
        finals: [$($final:expr),* $(,)?],
        transitions: [$(($from:expr, $to:expr, $label:expr, $prob:expr)),* $(,)?] $(,)?
    ) => {
        $crate::builder::MarkovChainBuilder::new()
            .states(0..$states)
            .initial($initial)
            $(.final_state($final))*
            $(.transition($from, $to, $label, $prob))*
            .build()
    };
}
