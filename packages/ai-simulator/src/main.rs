//! AI Simulator CLI - fast in-memory Preferans round simulation.
//!
//! Runs policy-vs-policy rounds entirely in memory without transport or
//! persistence overhead, for engine smoke testing and policy evaluation.

mod simulator;

use clap::Parser;
use preferans_engine::ai::RandomPolicy;
use preferans_engine::Policy;
use serde::Serialize;
use simulator::{RoundReport, Simulator};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "Fast in-memory Preferans round simulator")]
struct Args {
    /// Number of rounds to play (all-pass redeals do not count)
    #[arg(short, long, default_value = "1")]
    rounds: u32,

    /// Game seed (for deterministic games); random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    rounds_played: u32,
    redeals: u32,
    final_scores: [i16; 3],
    rounds: Vec<RoundReport>,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    info!(seed, rounds = args.rounds, "Starting simulation");

    let policies: [Box<dyn Policy>; 3] = [
        Box::new(RandomPolicy::new(seed ^ 0x01)),
        Box::new(RandomPolicy::new(seed ^ 0x02)),
        Box::new(RandomPolicy::new(seed ^ 0x03)),
    ];
    let mut sim = Simulator::new(seed, policies);

    let mut rounds = Vec::new();
    let mut redeals = 0u32;
    while (rounds.len() as u32) < args.rounds {
        match sim.play_round() {
            Ok(report) => {
                if report.outcome == preferans_engine::RoundOutcome::AllPassed {
                    redeals += 1;
                    info!(round_no = report.round_no, "All passed; redealing");
                    continue;
                }
                info!(
                    round_no = report.round_no,
                    declarer = report.declarer,
                    made = report.declarer_made,
                    deltas = ?report.deltas,
                    "Round finished"
                );
                rounds.push(report);
            }
            Err(e) => {
                warn!(error = %e, "Simulation aborted");
                std::process::exit(1);
            }
        }
    }

    let summary = Summary {
        seed,
        rounds_played: rounds.len() as u32,
        redeals,
        final_scores: sim.scores_total(),
        rounds,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            warn!(error = %e, "Failed to serialize summary");
            std::process::exit(1);
        }
    }
}
