use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use neon_asteroids_core::GameConfig;
use rayon::prelude::*;
use serde::Serialize;

use crate::bots::bot_ids;
use crate::runner::{run_bot, RunMetrics, RunOptions};

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub bots: Vec<String>,
    pub seeds: Vec<u32>,
    pub arena: GameConfig,
    pub max_frames: u32,
    pub fps: u32,
    pub jobs: Option<usize>,
    pub out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BotAggregate {
    pub bot_id: String,
    pub runs: usize,
    pub avg_score: f64,
    pub max_score: u32,
    pub avg_frames: f64,
    pub avg_level: f64,
    pub survival_rate: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub max_frames: u32,
    pub fps: u32,
    pub jobs: Option<usize>,
    pub bots: Vec<String>,
    pub seeds: Vec<u32>,
    pub run_count: usize,
    pub bot_rankings: Vec<BotAggregate>,
    pub runs: Vec<RunMetrics>,
}

pub fn resolve_bots(input: Option<&str>) -> Result<Vec<String>> {
    match input {
        None => Ok(bot_ids().iter().map(|id| (*id).to_string()).collect()),
        Some(raw) => {
            let mut bots = Vec::new();
            for token in raw.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                bots.push(token.to_string());
            }
            if bots.is_empty() {
                return Err(anyhow!("--bots resolved to empty list"));
            }
            Ok(bots)
        }
    }
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.bots.is_empty() {
        return Err(anyhow!("benchmark requires at least one bot"));
    }
    if config.jobs == Some(0) {
        return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
    }

    let options = RunOptions {
        arena: config.arena,
        max_frames: config.max_frames,
        fps: config.fps,
        best_score_file: None,
    };

    let run_jobs: Vec<(String, u32)> = config
        .bots
        .iter()
        .flat_map(|bot| config.seeds.iter().map(move |seed| (bot.clone(), *seed)))
        .collect();
    tracing::info!(
        runs = run_jobs.len(),
        jobs = ?config.jobs,
        "benchmark started"
    );

    let run_one = |(bot_id, seed): &(String, u32)| -> Result<RunMetrics> {
        let artifact = run_bot(bot_id, *seed, &options)
            .with_context(|| format!("benchmark run failed for bot={bot_id} seed={seed:#x}"))?;
        Ok(artifact.metrics)
    };

    let run_results: Vec<Result<RunMetrics>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| run_jobs.par_iter().map(run_one).collect())
    } else {
        run_jobs.par_iter().map(run_one).collect()
    };

    let runs = run_results.into_iter().collect::<Result<Vec<_>>>()?;
    let bot_rankings = rank_bots(&runs);

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        max_frames: config.max_frames,
        fps: config.fps,
        jobs: config.jobs,
        bots: config.bots,
        seeds: config.seeds,
        run_count: runs.len(),
        bot_rankings,
        runs,
    };

    if let Some(path) = &config.out {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed creating {}", parent.display()))?;
            }
        }
        fs::write(
            path,
            serde_json::to_vec_pretty(&report).context("failed to serialize benchmark report")?,
        )
        .with_context(|| format!("failed writing {}", path.display()))?;
    }

    Ok(report)
}

/// Per-bot averages, best average score first.
pub fn rank_bots(runs: &[RunMetrics]) -> Vec<BotAggregate> {
    let mut grouped: HashMap<&str, Vec<&RunMetrics>> = HashMap::new();
    for run in runs {
        grouped.entry(run.bot_id.as_str()).or_default().push(run);
    }

    let mut rankings: Vec<BotAggregate> = grouped
        .into_iter()
        .map(|(bot_id, bot_runs)| {
            let count = bot_runs.len() as f64;
            let sum_score: u64 = bot_runs.iter().map(|r| r.final_score as u64).sum();
            let sum_frames: u64 = bot_runs.iter().map(|r| r.frame_count as u64).sum();
            let sum_level: u64 = bot_runs.iter().map(|r| r.final_level as u64).sum();
            let survived = bot_runs.iter().filter(|r| !r.game_over).count();

            BotAggregate {
                bot_id: bot_id.to_string(),
                runs: bot_runs.len(),
                avg_score: sum_score as f64 / count,
                max_score: bot_runs
                    .iter()
                    .map(|r| r.final_score)
                    .max()
                    .unwrap_or_default(),
                avg_frames: sum_frames as f64 / count,
                avg_level: sum_level as f64 / count,
                survival_rate: survived as f64 / count,
            }
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.avg_score
            .total_cmp(&a.avg_score)
            .then_with(|| b.avg_frames.total_cmp(&a.avg_frames))
            .then_with(|| a.bot_id.cmp(&b.bot_id))
    });
    rankings
}
