use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{bail, Context, Result};
use raid_pulse_core::{LevelId, PulseConfig, RaidAdjustment};
use raid_pulse_world::{CustomWaves, LevelRecord, LootMultipliers, World};
use serde::Deserialize;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct Manifest {
    version: u32,
    #[serde(default)]
    levels: Vec<LevelEntry>,
    #[serde(default)]
    loot: LootMultipliers,
    #[serde(default)]
    custom_waves: BTreeMap<LevelId, CustomWaves>,
}

#[derive(Debug, Deserialize)]
struct LevelEntry {
    #[serde(default)]
    capacity_cap: Option<u32>,
    #[serde(flatten)]
    record: LevelRecord,
}

/// Loads the level database described by the manifest at `path`.
pub(crate) fn load_world(path: &Path) -> Result<World> {
    let contents = read(path, "level manifest")?;
    parse_world(&contents)
        .with_context(|| format!("failed to load level manifest at {}", path.display()))
}

/// Loads the configuration at `path`, or the defaults when no path is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<PulseConfig> {
    let Some(path) = path else {
        return Ok(PulseConfig::default());
    };
    let contents = read(path, "configuration")?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse configuration at {}", path.display()))
}

/// Loads a raid adjustment from `path`.
pub(crate) fn load_adjustment(path: &Path) -> Result<RaidAdjustment> {
    let contents = read(path, "adjustment")?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse adjustment at {}", path.display()))
}

fn read(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {what} at {}", path.display()))
}

fn parse_world(contents: &str) -> Result<World> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse level manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported level manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut world = World::new();
    for entry in manifest.levels {
        let id = entry.record.id().clone();
        if let Some(cap) = entry.capacity_cap {
            world.insert_capacity_cap(id.clone(), cap);
        }
        if world.insert_level(entry.record).is_some() {
            bail!("level manifest contains duplicate level `{id}`");
        }
    }
    for (level, waves) in manifest.custom_waves {
        world.insert_custom_waves(level, waves);
    }
    world.set_loot_multipliers(manifest.loot);

    Ok(world)
}
