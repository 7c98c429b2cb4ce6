//! Markov Chain to Stochastic Regular Expression
//!
//! This example imports a chain in `.tra` format, shows the renormalized
//! transition weights, and converts it.
//!
//! Key concepts:
//! - Importing chains from the plain-text adjacency format
//! - Renormalizing the exits of non-initial states
//! - Reading the weighted union tags of the result
//!
//! Run with: cargo run --example convert_chain [path/to/chain.tra]

use statelim::probability::weight_chain;
use statelim::snapshot::AutomatonSnapshot;
use statelim::{dtmc_to_sre, tra, MarkovChain};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "\
4 9
0 0 0.7
0 1 0.2
0 2 0.1
1 1 0.3
1 0 0.5
1 3 0.2
2 2 0.4
2 1 0.2
2 3 0.4
";

fn load() -> Result<MarkovChain, tra::TraError> {
    match std::env::args().nth(1) {
        Some(path) => tra::read_dtmc(path),
        None => tra::parse_dtmc(SAMPLE),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    println!("=== DTMC to SRE Example ===\n");

    let chain = match load() {
        Ok(chain) => chain,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    println!("Input chain:\n{chain}");

    let mut weighted = chain.clone();
    weight_chain(&mut weighted).unwrap();
    println!("After weighting:\n{}", tra::to_tra(&weighted));

    let json = AutomatonSnapshot::capture(&chain).to_json().unwrap();
    println!("Snapshot: {} bytes of JSON", json.len());

    let sre = dtmc_to_sre(chain).unwrap();
    println!("Stochastic expression: {sre}");

    println!("\n=== Example Complete ===");
}
