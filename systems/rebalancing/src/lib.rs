#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rebalancing of an already scheduled level against a raid adjustment.

use raid_pulse_core::{
    BossSpawnEntry, Command, ExitRecord, LevelId, LevelSettings, LootTable, RaidAdjustment,
    RebalanceError, RebalanceReport, ScheduleState,
};

const FULL_LOOT_PERCENT: u32 = 100;

/// Read-only view of the level being rebalanced.
#[derive(Clone, Copy, Debug)]
pub struct LevelSnapshot<'a> {
    /// Level identifier.
    pub level: &'a LevelId,
    /// Exits of the level.
    pub exits: &'a [ExitRecord],
    /// Boss squads of the level in list order.
    pub boss_spawns: &'a [BossSpawnEntry],
    /// Host-provided settings.
    pub settings: LevelSettings,
    /// Lifecycle state of the level's schedule.
    pub state: ScheduleState,
}

/// Pure system that translates a [`RaidAdjustment`] into level mutations.
#[derive(Debug, Default)]
pub struct Rebalancing;

impl Rebalancing {
    /// Pushes the commands for one rebalance pass.
    ///
    /// On [`RebalanceError::UnknownExit`] the commands pushed before the
    /// offending exit stay in `out` and are expected to be applied; the pass
    /// stops there and the schedule state is not advanced.
    pub fn handle(
        &self,
        snapshot: LevelSnapshot<'_>,
        adjustment: &RaidAdjustment,
        out: &mut Vec<Command>,
    ) -> Result<RebalanceReport, RebalanceError> {
        let level = snapshot.level;
        if snapshot.state == ScheduleState::Uninitialized {
            return Err(RebalanceError::NotScheduled(level.clone()));
        }

        let loot = [
            (LootTable::Loose, adjustment.dynamic_loot_percent),
            (LootTable::Static, adjustment.static_loot_percent),
        ];
        for (table, percent) in loot {
            if percent < FULL_LOOT_PERCENT {
                out.push(Command::ScaleLootMultiplier {
                    level: level.clone(),
                    table,
                    percent,
                });
            }
        }

        out.push(Command::SetRaidDuration {
            level: level.clone(),
            minutes: adjustment.raid_duration_minutes,
        });

        for change in &adjustment.exit_changes {
            if !snapshot.exits.iter().any(|exit| exit.name() == change.name) {
                tracing::warn!(
                    level = %level,
                    exit = %change.name,
                    "unknown exit, aborting rebalance"
                );
                return Err(RebalanceError::UnknownExit {
                    level: level.clone(),
                    exit: change.name.clone(),
                });
            }
            out.push(Command::UpdateExit {
                level: level.clone(),
                change: change.clone(),
            });
        }

        let pmc_spawns = snapshot
            .boss_spawns
            .iter()
            .filter(|spawn| spawn.faction().is_pmc())
            .count();
        let mut report = RebalanceReport {
            removed_boss_spawns: 0,
            remaining_boss_spawns: pmc_spawns,
            waves_adjusted: snapshot.settings.adjust_waves,
        };

        if snapshot.settings.adjust_waves {
            if adjustment.simulated_raid_start_seconds > 0 {
                out.push(Command::TrimElapsedWaves {
                    level: level.clone(),
                    elapsed_seconds: adjustment.simulated_raid_start_seconds,
                });
            }

            let removed = pmc_spawns / 2;
            if removed > 0 {
                tracing::warn!(
                    level = %level,
                    removed,
                    remaining = pmc_spawns - removed,
                    "removing PMC squads"
                );
                out.push(Command::RemoveBossSpawns {
                    level: level.clone(),
                    count: removed,
                });
            }
            report.removed_boss_spawns = removed;
            report.remaining_boss_spawns = pmc_spawns - removed;
        }

        out.push(Command::SetScheduleState {
            level: level.clone(),
            state: snapshot.state.after_rebalance(),
        });

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use raid_pulse_core::{BossFaction, Difficulty, ExitChange};

    use super::*;

    fn adjustment() -> RaidAdjustment {
        RaidAdjustment {
            raid_duration_minutes: 25,
            dynamic_loot_percent: 80,
            static_loot_percent: 100,
            exit_changes: Vec::new(),
            simulated_raid_start_seconds: 0,
        }
    }

    fn snapshot<'a>(
        level: &'a LevelId,
        exits: &'a [ExitRecord],
        boss_spawns: &'a [BossSpawnEntry],
    ) -> LevelSnapshot<'a> {
        LevelSnapshot {
            level,
            exits,
            boss_spawns,
            settings: LevelSettings::default(),
            state: ScheduleState::Scheduled,
        }
    }

    #[test]
    fn uninitialized_levels_are_rejected() {
        let level = LevelId::new("woods");
        let mut out = Vec::new();
        let result = Rebalancing.handle(
            LevelSnapshot {
                state: ScheduleState::Uninitialized,
                ..snapshot(&level, &[], &[])
            },
            &adjustment(),
            &mut out,
        );
        assert_eq!(result, Err(RebalanceError::NotScheduled(level)));
        assert!(out.is_empty());
    }

    #[test]
    fn only_reduced_loot_is_scaled() {
        let level = LevelId::new("woods");
        let mut out = Vec::new();
        let _ = Rebalancing
            .handle(snapshot(&level, &[], &[]), &adjustment(), &mut out)
            .expect("pass succeeds");
        let scaled: Vec<LootTable> = out
            .iter()
            .filter_map(|command| match command {
                Command::ScaleLootMultiplier { table, .. } => Some(*table),
                _ => None,
            })
            .collect();
        assert_eq!(scaled, vec![LootTable::Loose]);
    }

    #[test]
    fn halves_pmc_squads_when_waves_are_adjusted() {
        let level = LevelId::new("woods");
        let spawns: Vec<BossSpawnEntry> = (0..5)
            .map(|_| BossSpawnEntry::new(BossFaction::Usec, 1, Difficulty::Normal, "ZoneA"))
            .collect();
        let mut out = Vec::new();
        let report = Rebalancing
            .handle(snapshot(&level, &[], &spawns), &adjustment(), &mut out)
            .expect("pass succeeds");
        assert_eq!(report.removed_boss_spawns, 2);
        assert_eq!(report.remaining_boss_spawns, 3);
        assert!(out.contains(&Command::RemoveBossSpawns {
            level: level.clone(),
            count: 2,
        }));
        assert_eq!(
            out.last(),
            Some(&Command::SetScheduleState {
                level,
                state: ScheduleState::Rebalanced { passes: 1 },
            })
        );
    }

    #[test]
    fn wave_adjustment_can_be_disabled() {
        let level = LevelId::new("woods");
        let spawns = vec![BossSpawnEntry::new(BossFaction::Bear, 1, Difficulty::Normal, "ZoneA"); 4];
        let mut out = Vec::new();
        let report = Rebalancing
            .handle(
                LevelSnapshot {
                    settings: LevelSettings {
                        adjust_waves: false,
                    },
                    ..snapshot(&level, &[], &spawns)
                },
                &RaidAdjustment {
                    simulated_raid_start_seconds: 300,
                    ..adjustment()
                },
                &mut out,
            )
            .expect("pass succeeds");
        assert!(!report.waves_adjusted);
        assert_eq!(report.removed_boss_spawns, 0);
        assert!(!out.iter().any(|command| matches!(
            command,
            Command::RemoveBossSpawns { .. } | Command::TrimElapsedWaves { .. }
        )));
    }

    #[test]
    fn unknown_exit_stops_the_pass() {
        let level = LevelId::new("woods");
        let exits = [ExitRecord::new("Outskirts", 100, 0, 0)];
        let change = |name: &str| ExitChange {
            name: name.to_owned(),
            chance: Some(50),
            ..ExitChange::default()
        };
        let mut out = Vec::new();
        let result = Rebalancing.handle(
            snapshot(&level, &exits, &[]),
            &RaidAdjustment {
                exit_changes: vec![change("Outskirts"), change("Bridge"), change("Outskirts")],
                ..adjustment()
            },
            &mut out,
        );

        assert_eq!(
            result,
            Err(RebalanceError::UnknownExit {
                level,
                exit: String::from("Bridge"),
            })
        );
        let exit_updates = out
            .iter()
            .filter(|command| matches!(command, Command::UpdateExit { .. }))
            .count();
        assert_eq!(exit_updates, 1);
        assert!(!out
            .iter()
            .any(|command| matches!(command, Command::SetScheduleState { .. })));
    }
}
