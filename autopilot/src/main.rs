use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use neon_autopilot::benchmark::{resolve_bots, run_benchmark, BenchmarkConfig};
use neon_autopilot::bots::{bot_ids, create_bot, describe_bots};
use neon_autopilot::config::{DriverConfig, DEFAULT_MAX_FRAMES};
use neon_autopilot::runner::{run_bot, write_report, RunOptions};
use neon_autopilot::util::{parse_seed, parse_seed_csv, seed_range, seed_to_hex};

#[derive(Parser, Debug)]
#[command(name = "neon-autopilot")]
#[command(about = "Headless driver for the Neon Asteroids simulation: scripted bots and benchmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available bots
    ListBots,
    /// Play one session with a bot and print its metrics
    Run {
        #[arg(long)]
        bot: String,
        #[arg(long)]
        seed: String,
        #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
        max_frames: u32,
        /// Simulated frame rate; defaults to NEON_FPS or 60
        #[arg(long)]
        fps: Option<u32>,
        /// JSON file holding best scores; defaults to NEON_BEST_SCORE_FILE
        #[arg(long)]
        best_score_file: Option<PathBuf>,
        /// Write metrics and the input log as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run every bot against every seed in parallel
    Benchmark {
        #[arg(long)]
        bots: Option<String>,
        #[arg(long, conflicts_with = "seed_start")]
        seeds: Option<String>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
        max_frames: u32,
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let Cli { command } = Cli::parse();
    let defaults = DriverConfig::from_env();

    match command {
        Commands::ListBots => {
            for (id, description) in describe_bots() {
                println!("{id:12} {description}");
            }
        }
        Commands::Run {
            bot,
            seed,
            max_frames,
            fps,
            best_score_file,
            output,
        } => {
            if create_bot(&bot).is_none() {
                let available = bot_ids().join(", ");
                return Err(anyhow!("unknown bot '{bot}'. available: {available}"));
            }
            let seed = parse_seed(&seed)?;
            let options = RunOptions {
                arena: defaults.arena,
                max_frames,
                fps: fps.unwrap_or(defaults.fps),
                best_score_file: best_score_file.or(defaults.best_score_file),
            };
            let artifact = run_bot(&bot, seed, &options)?;
            let metrics = &artifact.metrics;

            println!("bot={}", metrics.bot_id);
            println!("seed={}", seed_to_hex(seed));
            println!("frames={}", metrics.frame_count);
            println!("score={}", metrics.final_score);
            println!("best_score={}", metrics.best_score);
            println!("lives={}", metrics.final_lives);
            println!("level={}", metrics.final_level);
            println!("game_over={}", metrics.game_over);
            println!("asteroids_destroyed={}", metrics.events.asteroids_destroyed);
            println!("ship_hits={}", metrics.events.ship_hits);
            println!("rng={:#010x}", metrics.final_rng_state);

            if let Some(path) = output {
                write_report(&path, &artifact)?;
                println!("output={}", path.display());
            }
        }
        Commands::Benchmark {
            bots,
            seeds,
            seed_start,
            seed_count,
            max_frames,
            jobs,
            out,
        } => {
            let bots = resolve_bots(bots.as_deref())?;
            for bot in &bots {
                if create_bot(bot).is_none() {
                    return Err(anyhow!("unknown bot '{bot}'"));
                }
            }
            let seeds = match (seeds, seed_start) {
                (Some(csv), _) => parse_seed_csv(&csv)?,
                (None, Some(start)) => seed_range(parse_seed(&start)?, seed_count)?,
                (None, None) => seed_range(0, seed_count)?,
            };

            let report = run_benchmark(BenchmarkConfig {
                bots,
                seeds,
                arena: defaults.arena,
                max_frames,
                fps: defaults.fps,
                jobs,
                out: out.clone(),
            })?;

            println!(
                "{:>4} {:12} {:>10} {:>9} {:>10} {:>9} {:>8}",
                "rank", "bot", "avg_score", "max", "avg_frames", "avg_level", "survive"
            );
            for (idx, row) in report.bot_rankings.iter().enumerate() {
                println!(
                    "{:>4} {:12} {:>10.1} {:>9} {:>10.1} {:>9.2} {:>8.2}",
                    idx + 1,
                    row.bot_id,
                    row.avg_score,
                    row.max_score,
                    row.avg_frames,
                    row.avg_level,
                    row.survival_rate
                );
            }
            println!("runs={}", report.run_count);
            if let Some(path) = out {
                println!("report={}", path.display());
            }
        }
    }

    Ok(())
}
