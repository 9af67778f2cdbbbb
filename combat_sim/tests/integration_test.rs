//! Integration test: Load roster -> Build encounter -> Run to completion
//!
//! These tests validate the full flow from TOML files to a decided encounter.

use combat_core::{
    config::{CombatConstants, RosterConfig},
    events::{CombatEventKind, CombatLog},
    scheduler::{CombatEncounter, CompletionReason, EncounterOutcome, RecordingOwner},
    source::{HealthQueryable, Roster},
    types::{CombatantId, Side},
};
use combat_sim::simulation::{BatchSummary, EncounterSimulation};
use std::path::Path;

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

fn skirmish_roster() -> Roster {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("rosters/skirmish.toml");
    RosterConfig::load(&path)
        .expect("Failed to load skirmish roster")
        .build_roster()
        .expect("Failed to build skirmish roster")
}

fn shipped_constants() -> CombatConstants {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../combat_core/config/combat.toml");
    CombatConstants::load(&path).expect("Failed to load combat constants")
}

#[test]
fn test_full_roster_to_outcome_flow() {
    separator("STEP 1: Load roster and constants");
    let roster = skirmish_roster();
    let constants = shipped_constants();
    for record in roster.records() {
        println!(
            "  {:<14} {:<6} {:>4.0} HP  weapon: {}",
            record.name,
            record.side.to_string(),
            record.max_health,
            record
                .loadout
                .weapon
                .as_ref()
                .or(record.loadout.natural_weapon.as_ref())
                .map(|w| w.name.as_str())
                .unwrap_or("fists")
        );
    }
    assert_eq!(roster.ids_on(Side::Ally).len(), 2);
    assert_eq!(roster.ids_on(Side::Enemy).len(), 3);

    separator("STEP 2: Run encounter");
    let sim = EncounterSimulation::run(roster, constants, 2024, 600.0);
    for event in sim.log.recent(12) {
        println!("  {}", event);
    }

    separator("STEP 3: Verify outcome");
    println!("  Outcome: {} after {:.1}s ({} ticks)", sim.outcome, sim.duration, sim.ticks);
    println!("  Actions: {}  Damage: {}", sim.stats.actions, sim.stats.total_damage);

    assert!(matches!(
        sim.outcome,
        EncounterOutcome::AlliesWon | EncounterOutcome::EnemiesWon
    ));

    let (winner, loser) = match sim.outcome {
        EncounterOutcome::AlliesWon => (Side::Ally, Side::Enemy),
        _ => (Side::Enemy, Side::Ally),
    };
    assert!(!sim.survivors(winner).is_empty());
    assert!(sim.survivors(loser).is_empty());

    let deaths = sim.log.by_kind(CombatEventKind::Death).len();
    assert_eq!(deaths as u32, sim.stats.deaths);
    assert_eq!(sim.log.by_kind(CombatEventKind::CombatStart).len(), 1);
    assert_eq!(sim.log.by_kind(CombatEventKind::CombatEnd).len(), 1);
    assert!(sim.stats.actions < 3000);

    separator("STEP 4: JSON summary");
    let json = serde_json::to_string_pretty(&sim).expect("Failed to serialize summary");
    println!("{}", json);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["seed"], 2024);
    assert_eq!(value["combatants"].as_array().unwrap().len(), 5);
}

#[test]
fn test_same_seed_replays_identically() {
    let first = EncounterSimulation::run(skirmish_roster(), CombatConstants::default(), 99, 600.0);
    let second = EncounterSimulation::run(skirmish_roster(), CombatConstants::default(), 99, 600.0);

    let first_log: Vec<String> = first.log.iter().map(|e| e.to_string()).collect();
    let second_log: Vec<String> = second.log.iter().map(|e| e.to_string()).collect();
    assert_eq!(first_log, second_log);
    assert_eq!(first.outcome, second.outcome);
}

#[test]
fn test_untouchable_duel_trips_failsafe() {
    let toml = r#"
[[combatants]]
id = "ghost_a"
name = "Ghost A"
side = "ally"
health = 10
stats = { agility = 1000 }

[[combatants]]
id = "ghost_b"
name = "Ghost B"
side = "enemy"
health = 10
stats = { agility = 1000 }
"#;
    let roster = RosterConfig::parse(toml).unwrap().build_roster().unwrap();
    let constants = CombatConstants::parse("[scheduler]\nfailsafe_action_limit = 50\n").unwrap();

    let sim = EncounterSimulation::run(roster, constants, 1, 10_000.0);

    assert_eq!(sim.outcome, EncounterOutcome::Failsafe);
    assert_eq!(sim.stats.actions, 50);
    assert_eq!(sim.stats.dodges, 50);
    assert_eq!(sim.survivors(Side::Ally).len(), 1);
    assert_eq!(sim.survivors(Side::Enemy).len(), 1);
}

#[test]
fn test_manual_tick_driving() {
    let roster = skirmish_roster();
    let mut log = CombatLog::new();
    let mut owner = RecordingOwner::default();

    let mut encounter = CombatEncounter::seeded(roster, CombatConstants::default(), 5);
    encounter.register_team(["knight", "archer"], ["bandit", "wolf_1", "wolf_2"]);
    encounter.start(0.0, &mut log);

    let mut now = 0.0;
    while owner.completions.is_empty() && now < 600.0 {
        let report = encounter.tick(now, &mut log, &mut owner);
        // Every ally outcome of a tick comes before every enemy outcome
        let sides: Vec<Side> = report
            .outcomes
            .iter()
            .filter_map(|o| match o {
                combat_core::ActionOutcome::Resolved { attacker, .. } => {
                    encounter.registry().side_of(attacker)
                }
                _ => None,
            })
            .collect();
        let first_enemy = sides.iter().position(|s| *s == Side::Enemy).unwrap_or(sides.len());
        assert!(sides[first_enemy..].iter().all(|s| *s == Side::Enemy));
        now += 0.25;
    }

    let reason = owner.completions[0];
    assert!(matches!(reason, CompletionReason::SideDefeated(_)));
    for dead in &owner.deaths {
        assert!(!encounter.provider().is_alive(dead));
    }

    assert!(encounter.stop());
    assert!(encounter.registry().is_empty());
    assert!(!encounter.stop());
    assert!(encounter.provider().contains(&CombatantId::from("knight")));
}

#[test]
fn test_batch_over_seeds() {
    let summary = BatchSummary::run(&skirmish_roster(), &CombatConstants::default(), 1, 10, 600.0);

    println!(
        "  Allies won {}/{} ({:.0}%), avg {:.1}s",
        summary.allies_won,
        summary.runs,
        summary.ally_win_rate(),
        summary.avg_duration
    );
    assert_eq!(summary.runs, 10);
    assert_eq!(summary.allies_won + summary.enemies_won, 10);
}
