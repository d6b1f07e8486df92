#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that regenerates and rebalances level schedules.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use raid_pulse_core::{LevelId, RaidAdjuster, RebalanceReport, WaveGenerator};
use raid_pulse_engine::PulseEngine;
use raid_pulse_world::{query, LevelRecord};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod manifest;

/// Regenerates spawn schedules for the levels in a manifest and prints them as JSON.
#[derive(Debug, Parser)]
#[command(name = "raid-pulse", author, version, about, long_about = None)]
struct Args {
    /// Path to the level manifest TOML file.
    #[arg(long)]
    levels: PathBuf,

    /// Path to the scheduling configuration TOML file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed from which every level's random stream is derived.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Regenerates one level, or every level when none is named.
    Generate {
        /// Identifier or display name of the level.
        #[arg(long)]
        level: Option<String>,
    },
    /// Regenerates a level and applies a raid adjustment to it.
    Adjust {
        /// Identifier or display name of the level.
        #[arg(long)]
        level: String,

        /// Path to the adjustment TOML file.
        #[arg(long)]
        adjustment: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct Output<'a> {
    levels: Vec<&'a LevelRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failed: Vec<Failure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rebalance: Option<RebalanceReport>,
}

#[derive(Debug, Serialize)]
struct Failure {
    level: LevelId,
    error: String,
}

/// Entry point for the Raid Pulse command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = manifest::load_config(args.config.as_deref())?;
    init_tracing(config.debug);

    let world = manifest::load_world(&args.levels)?;
    let mut engine =
        PulseEngine::new(world, config, args.seed).context("invalid scheduling configuration")?;

    let (selected, failed, rebalance) = match &args.mode {
        Mode::Generate { level: None } => {
            let summary = engine.regenerate_all_levels();
            let failed = summary
                .failed
                .into_iter()
                .map(|(level, error)| Failure {
                    level,
                    error: error.to_string(),
                })
                .collect();
            (summary.regenerated, failed, None)
        }
        Mode::Generate { level: Some(name) } => {
            let level = resolve(&engine, name)?;
            engine
                .regenerate_level(&level)
                .with_context(|| format!("failed to regenerate level `{name}`"))?;
            (vec![level], Vec::new(), None)
        }
        Mode::Adjust { level: name, adjustment } => {
            let adjustment = manifest::load_adjustment(adjustment)?;
            let level = resolve(&engine, name)?;
            engine
                .regenerate_level(&level)
                .with_context(|| format!("failed to regenerate level `{name}`"))?;
            let report = engine
                .apply_adjustment(&level, &adjustment)
                .with_context(|| format!("failed to adjust level `{name}`"))?;
            (vec![level], Vec::new(), Some(report))
        }
    };

    let output = Output {
        levels: selected
            .iter()
            .filter_map(|level| query::level(engine.world(), level))
            .collect(),
        failed,
        rebalance,
    };
    let json = serde_json::to_string_pretty(&output).context("failed to serialize schedules")?;
    println!("{json}");
    Ok(())
}

fn resolve(engine: &PulseEngine, name: &str) -> Result<LevelId> {
    query::find_by_name(engine.world(), name)
        .map(|record| record.id().clone())
        .with_context(|| format!("unknown level `{name}`"))
}

fn init_tracing(debug: bool) {
    let default_level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .with_writer(std::io::stderr)
        .init();
}
