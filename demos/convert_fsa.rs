//! Finite Automaton to Regular Expression
//!
//! This example converts a small automaton with the default converter and
//! then again eliminating states in descending order.
//!
//! Key concepts:
//! - Building automata with the `fsa!` macro or from a `.tra` file
//! - Inspecting the reduced two-state graph
//! - Rendering the result as a conventional regex pattern
//!
//! Run with: cargo run --example convert_fsa [path/to/automaton.tra]
//!
//! Set `RUST_LOG=statelim=debug` to see each pipeline step.

use statelim::elimination::{Converter, EliminationOrder};
use statelim::snapshot::AutomatonSnapshot;
use statelim::{fsa, tra, FiniteAutomaton};
use tracing_subscriber::EnvFilter;

fn load() -> FiniteAutomaton {
    if let Some(path) = std::env::args().nth(1) {
        return tra::read_fsa(&path).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        });
    }

    fsa! {
        states: 4,
        initial: 0,
        finals: [3],
        transitions: [
            (0, 1, "a"),
            (0, 2, "b"),
            (2, 2, "a"),
            (2, 3, "b"),
            (1, 0, "a"),
            (1, 3, "b"),
        ],
    }
    .unwrap()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    println!("=== FSA to Regex Example ===\n");

    let automaton = load();
    println!("Input automaton:\n{automaton}");

    // Conversion consumes the automaton; keep a snapshot for the second run.
    let snapshot = AutomatonSnapshot::capture(&automaton);

    let conversion = Converter::new().convert(automaton).unwrap();
    println!("Expression:  {}", conversion.expression);
    match conversion.pattern() {
        Some(pattern) => println!("Pattern:     {pattern}"),
        None => println!("Pattern:     (empty language)"),
    }
    println!("Eliminated:  {:?}", conversion.eliminated);
    println!("\nReduced graph:\n{}", conversion.reduced);

    let descending = Converter::builder()
        .elimination_order(EliminationOrder::DescendingId)
        .build()
        .convert(snapshot.restore().unwrap())
        .unwrap();
    println!("Descending order: {}", descending.expression);

    println!("\n=== Example Complete ===");
}
