use raid_pulse_core::{
    BossFaction, BossSpawnEntry, Difficulty, LevelId, PulseConfig, RaidAdjuster, RaidAdjustment,
    ScheduleError, ScheduleState, SpawnKind, WaveGenerator,
};
use raid_pulse_engine::PulseEngine;
use raid_pulse_world::{query, LevelRecord, World, PLACEHOLDER_ZONE};

fn customs() -> LevelRecord {
    customs_lasting(20)
}

fn customs_lasting(minutes: u32) -> LevelRecord {
    LevelRecord::new(LevelId::new("bigmap"), minutes)
        .with_name("Customs")
        .with_spawn_zones([
            "ZoneDormitory",
            "ZoneGasStation",
            "ZoneOldAZS",
            "ZoneScavBase",
            "ZoneBrige",
            "ZoneCrossRoad",
            "ZoneCustoms",
            "ZoneFactoryCenter",
            "ZoneFactorySide",
            "ZoneTankSquare",
            "ZoneWade",
            "ZoneBlockPost",
            "ZoneSnipeFactory",
        ])
        .with_bot_max(40)
        .with_boss_spawns(vec![BossSpawnEntry::new(
            BossFaction::Other(String::from("bossBully")),
            3,
            Difficulty::Normal,
            "ZoneScavBase",
        )])
}

fn laboratory() -> LevelRecord {
    LevelRecord::new(LevelId::new("laboratory"), 35)
        .with_name("The Lab")
        .with_spawn_zones(["BotZoneFloor1", "BotZoneFloor2", "BotZoneGate1", "BotZoneGate2"])
        .with_bot_max(12)
}

fn world() -> World {
    let mut world = World::new();
    let _ = world.insert_level(customs());
    let _ = world.insert_level(laboratory());
    world
}

fn fixed_config() -> PulseConfig {
    PulseConfig {
        bot_count_multiplier_min: 1.0,
        bot_count_multiplier_max: 1.0,
        pmc_percentage: 30,
        assault_wave_count: 3,
        pmc_bot_difficulty: Difficulty::Impossible,
        ..PulseConfig::default()
    }
}

fn record<'a>(engine: &'a PulseEngine, id: &str) -> &'a LevelRecord {
    query::level(engine.world(), &LevelId::new(id)).expect("level present")
}

#[test]
fn full_regeneration_schedules_every_level() {
    let mut engine = PulseEngine::new(world(), fixed_config(), 42).expect("valid config");
    let summary = engine.regenerate_all_levels();
    assert_eq!(summary.regenerated.len(), 2);
    assert!(summary.failed.is_empty());

    let customs = record(&engine, "bigmap");
    assert_eq!(customs.state(), ScheduleState::Scheduled);
    assert_eq!(customs.bot_max(), 40);

    let mut triggers: Vec<u32> = customs
        .waves()
        .iter()
        .filter(|wave| wave.kind() == SpawnKind::Assault)
        .map(|wave| wave.window().min_seconds())
        .collect();
    triggers.dedup();
    assert_eq!(triggers, vec![60, 440, 820]);
    assert_eq!(
        customs
            .waves()
            .iter()
            .filter(|wave| wave.kind() == SpawnKind::Elite)
            .count(),
        1
    );

    assert_eq!(customs.boss_spawns()[0].faction().name(), "bossBully");
    let pmc_units: u32 = customs
        .boss_spawns()
        .iter()
        .filter(|spawn| spawn.faction().is_pmc())
        .map(BossSpawnEntry::squad_size)
        .sum();
    assert_eq!(pmc_units, 12);
}

#[test]
fn one_minute_raids_time_every_pmc_squad() {
    let mut world = World::new();
    let _ = world.insert_level(customs_lasting(1));
    let mut engine = PulseEngine::new(world, fixed_config(), 42).expect("valid config");
    engine
        .regenerate_level(&LevelId::new("bigmap"))
        .expect("short raid regenerates");

    let customs = record(&engine, "bigmap");
    assert!(customs
        .waves()
        .iter()
        .filter(|wave| wave.kind() == SpawnKind::Assault)
        .all(|wave| wave.window().min_seconds() == 60));
    let squads: Vec<&BossSpawnEntry> = customs
        .boss_spawns()
        .iter()
        .filter(|spawn| spawn.faction().is_pmc())
        .collect();
    assert!(squads.len() >= 3);
    for squad in squads {
        let seconds = squad.trigger_time().expect("no immediate squads");
        assert!((60..=180).contains(&seconds));
    }
}

#[test]
fn boss_only_levels_get_squads_but_no_waves() {
    let mut engine = PulseEngine::new(world(), fixed_config(), 42).expect("valid config");
    engine
        .regenerate_level(&LevelId::new("laboratory"))
        .expect("lab regenerates");

    let lab = record(&engine, "laboratory");
    assert!(lab.waves().is_empty());
    assert!(lab.pmc_boss_count() > 0);
    assert!(lab
        .boss_spawns()
        .iter()
        .all(|spawn| spawn.trigger_time().is_none()));
    assert!(lab.open_zones().iter().all(|zone| !zone.contains("Gate")));
    assert!(lab.open_zones().iter().any(|zone| zone == PLACEHOLDER_ZONE));
}

#[test]
fn same_seed_replays_identical_schedules() {
    let mut first = PulseEngine::new(world(), PulseConfig::default(), 7).expect("valid config");
    let mut second = PulseEngine::new(world(), PulseConfig::default(), 7).expect("valid config");
    let _ = first.regenerate_all_levels();
    let _ = second.regenerate_level(&LevelId::new("bigmap"));

    assert_eq!(record(&first, "bigmap"), record(&second, "bigmap"));
}

#[test]
fn regeneration_replaces_previous_schedule() {
    let mut engine = PulseEngine::new(world(), fixed_config(), 3).expect("valid config");
    engine
        .regenerate_level(&LevelId::new("bigmap"))
        .expect("first pass");
    let first = record(&engine, "bigmap").clone();
    engine
        .regenerate_level(&LevelId::new("bigmap"))
        .expect("second pass");
    let second = record(&engine, "bigmap");

    assert_eq!(first.waves(), second.waves());
    assert_eq!(first.boss_spawns(), second.boss_spawns());
    assert_eq!(
        query::custom_waves(engine.world(), &LevelId::new("bigmap")).map(|waves| waves.is_empty()),
        Some(true)
    );
}

#[test]
fn levels_resolve_by_display_name() {
    let mut engine = PulseEngine::new(world(), fixed_config(), 1).expect("valid config");
    engine
        .regenerate_level_by_name("Customs")
        .expect("name resolves");
    assert_eq!(record(&engine, "bigmap").state(), ScheduleState::Scheduled);
    assert_eq!(record(&engine, "laboratory").state(), ScheduleState::Uninitialized);

    assert_eq!(
        engine.regenerate_level_by_name("Terminal"),
        Err(ScheduleError::UnknownLevel(String::from("Terminal")))
    );
}

#[test]
fn sparse_levels_regenerate_alongside_others() {
    let mut world = world();
    let _ = world.insert_level(LevelRecord::new(LevelId::new("woods"), 40));
    let mut engine = PulseEngine::new(world, fixed_config(), 1).expect("valid config");

    let summary = engine.regenerate_all_levels();
    assert_eq!(summary.regenerated.len(), 3);
    assert!(summary.failed.is_empty());

    let woods = record(&engine, "woods");
    assert_eq!(woods.bot_max(), 0);
    assert_eq!(woods.pmc_boss_count(), 0);
    assert_eq!(woods.state(), ScheduleState::Scheduled);
    assert_eq!(woods.open_zones(), [PLACEHOLDER_ZONE]);

    assert_eq!(
        engine.regenerate_level(&LevelId::new("interchange")),
        Err(ScheduleError::UnknownLevel(String::from("interchange")))
    );
}

#[test]
fn invalid_configuration_is_rejected() {
    let config = PulseConfig {
        pmc_percentage: 150,
        ..PulseConfig::default()
    };
    assert!(PulseEngine::new(world(), config, 0).is_err());
}

#[test]
fn adjustments_halve_squads_on_each_pass() {
    let mut engine = PulseEngine::new(world(), fixed_config(), 11).expect("valid config");
    let level = LevelId::new("bigmap");
    engine.regenerate_level(&level).expect("regenerates");
    let initial = record(&engine, "bigmap").pmc_boss_count();

    let adjustment = RaidAdjustment {
        raid_duration_minutes: 15,
        dynamic_loot_percent: 100,
        static_loot_percent: 100,
        exit_changes: Vec::new(),
        simulated_raid_start_seconds: 0,
    };
    let first = engine
        .apply_adjustment(&level, &adjustment)
        .expect("first pass");
    assert_eq!(first.removed_boss_spawns, initial / 2);
    assert_eq!(first.remaining_boss_spawns, initial - initial / 2);

    let second = engine
        .apply_adjustment(&level, &adjustment)
        .expect("second pass");
    assert_eq!(second.removed_boss_spawns, first.remaining_boss_spawns / 2);

    let customs = record(&engine, "bigmap");
    assert_eq!(customs.state(), ScheduleState::Rebalanced { passes: 2 });
    assert_eq!(customs.escape_time_limit_minutes(), 15);
    assert_eq!(customs.boss_spawns()[0].faction().name(), "bossBully");
}

#[test]
fn adjusting_an_unscheduled_level_is_rejected() {
    let mut engine = PulseEngine::new(world(), fixed_config(), 11).expect("valid config");
    let level = LevelId::new("bigmap");
    let adjustment = RaidAdjustment {
        raid_duration_minutes: 15,
        dynamic_loot_percent: 100,
        static_loot_percent: 100,
        exit_changes: Vec::new(),
        simulated_raid_start_seconds: 0,
    };
    assert!(engine.apply_adjustment(&level, &adjustment).is_err());
    assert_eq!(record(&engine, "bigmap").escape_time_limit_minutes(), 20);
}
