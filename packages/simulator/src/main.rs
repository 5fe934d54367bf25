//! Casino simulator CLI - random self-play through the rules engine.
//!
//! Games run in memory through the same service layer a client would use,
//! so every action is determined, validated and versioned like a real one.

mod metrics;
mod output;
mod simulator;
mod types;

use casino_backend::{init_tracing, AppState, EngineConfig};
use clap::Parser;
use metrics::{build_game_metrics, RunConfig};
use output::OutputWriter;
use simulator::{GameResult, Simulator};
use std::time::Instant;
use tracing::{info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "casino-simulator")]
#[command(about = "Random self-play simulator for the casino rules engine")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; game N is dealt from seed + N and the policy is seeded from it too
    #[arg(long)]
    seed: Option<u64>,

    /// Cards dealt to each player per round
    #[arg(long)]
    hand_size: Option<u8>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = EngineConfig::from_env()?;
    if let Some(hand_size) = args.hand_size {
        config.hand_size = hand_size;
        config.validate()?;
    }
    init_tracing(config.log_format, log_directive(args.verbose, args.show_output));

    let run_config = RunConfig {
        hand_size: config.hand_size,
        total_games: args.games,
    };
    if args.show_output {
        info!(games = args.games, hand_size = config.hand_size, "Starting simulator");
    }

    let app = AppState::new(config);
    let base_seed = args.seed.unwrap_or_else(rand::random::<u64>);
    let mut simulator = Simulator::new(&app, base_seed);

    let mut output_writer = OutputWriter::new(&args.output_dir, args.output_format, args.compress)?;
    if args.show_output {
        info!("Output directory: {}", args.output_dir);
    }

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let game_seed = base_seed.wrapping_add(game_num as u64);

        match simulator.simulate_game(game_num as i64, game_seed) {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(run_config.clone(), &result, duration_ms);
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(
                        "Game {} completed: scores={:?}",
                        game_num, metrics.result.final_scores
                    );
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} (seed {}) failed: {}", game_num, game_seed, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (detail_path, csv_path) = output_writer.output_paths();
    let (detail_path, csv_path) = (detail_path.to_path_buf(), csv_path.to_path_buf());
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", detail_path.display());
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, errors, elapsed, args.games);
    }

    Ok(())
}

/// Silent by default, only warnings and errors.
fn log_directive(verbose: bool, show_output: bool) -> &'static str {
    if verbose {
        "debug"
    } else if show_output {
        "info"
    } else {
        "warn"
    }
}

fn print_summary(results: &[GameResult], errors: u32, elapsed: std::time::Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let mut wins = [0u32; 2];
    let mut ties = 0u32;
    let mut total_scores = [0u64; 2];
    let mut total_actions = 0usize;

    for result in results {
        for (player, score) in result.summary.scores.iter().enumerate() {
            total_scores[player] += score.total() as u64;
        }
        match result.summary.winner {
            Some(p) => wins[p as usize] += 1,
            None => ties += 1,
        }
        total_actions += result.actions;
    }

    println!("\n=== Results by Player ===");
    for player in 0..2 {
        let avg_score = total_scores[player] as f64 / results.len() as f64;
        let win_rate = (wins[player] as f64 / results.len() as f64) * 100.0;
        println!(
            "Player {}: avg={:.2}, wins={} ({:.1}%)",
            player, avg_score, wins[player], win_rate
        );
    }
    println!("Ties: {}", ties);
    println!(
        "Average actions per game: {:.1}",
        total_actions as f64 / results.len() as f64
    );
}
