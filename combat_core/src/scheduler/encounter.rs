//! CombatEncounter - Registry, action gauges and failsafe for one fight

use super::{
    ActionOutcome, CompletionReason, EncounterOutcome, EncounterOwner, EncounterStats,
    SchedulerState, SkipReason, TickReport,
};
use crate::combat::{resolve_attack_with_rng, select_target, select_weapon};
use crate::config::CombatConstants;
use crate::events::{CombatEvent, CombatEventKind, EventSink};
use crate::math::{action_interval, sanitize_attack_speed, AttackProfile, DefenseProfile, EquipmentPenalty};
use crate::registry::CombatantRegistry;
use crate::source::CombatantSource;
use crate::types::{CombatantId, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, trace, warn};

/// Everything looked up before the rolls of one action
struct PreparedAction {
    target: CombatantId,
    attacker_name: String,
    defender_name: String,
    attacker_hp: f64,
    defender_hp: f64,
    attack: AttackProfile,
    defense: DefenseProfile,
}

/// One encounter: the scheduler state machine plus the data it drives
///
/// Time is supplied by the caller, either directly through [`tick`] or through
/// [`advance`], which emulates a repeating timer armed at [`start`].
///
/// [`tick`]: CombatEncounter::tick
/// [`advance`]: CombatEncounter::advance
/// [`start`]: CombatEncounter::start
pub struct CombatEncounter<P, R = ChaCha8Rng> {
    provider: P,
    registry: CombatantRegistry,
    constants: CombatConstants,
    rng: R,
    state: SchedulerState,
    interval: f64,
    start_time: f64,
    now: f64,
    ticks_fired: u64,
    action_count: u32,
    stats: EncounterStats,
    outcome: Option<EncounterOutcome>,
}

impl<P: CombatantSource> CombatEncounter<P, ChaCha8Rng> {
    /// Encounter with an entropy-seeded RNG
    pub fn new(provider: P, constants: CombatConstants) -> Self {
        Self::with_rng(provider, constants, ChaCha8Rng::from_entropy())
    }

    /// Encounter whose rolls replay identically for the same seed
    pub fn seeded(provider: P, constants: CombatConstants, seed: u64) -> Self {
        Self::with_rng(provider, constants, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<P: CombatantSource, R: Rng> CombatEncounter<P, R> {
    pub fn with_rng(provider: P, constants: CombatConstants, rng: R) -> Self {
        let interval = constants.scheduler.effective_tick_interval();
        CombatEncounter {
            provider,
            registry: CombatantRegistry::new(),
            constants,
            rng,
            state: SchedulerState::Inactive,
            interval,
            start_time: 0.0,
            now: 0.0,
            ticks_fired: 0,
            action_count: 0,
            stats: EncounterStats::default(),
            outcome: None,
        }
    }

    // === Accessors ===

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    pub fn registry(&self) -> &CombatantRegistry {
        &self.registry
    }

    pub fn constants(&self) -> &CombatConstants {
        &self.constants
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SchedulerState::Active
    }

    /// Seconds between timer ticks
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Latest time the encounter has seen
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Resolved actions since the last start
    pub fn action_count(&self) -> u32 {
        self.action_count
    }

    pub fn stats(&self) -> &EncounterStats {
        &self.stats
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        self.outcome
    }

    /// When the emulated timer fires next, while active
    pub fn next_tick_time(&self) -> Option<f64> {
        self.is_active()
            .then(|| self.start_time + (self.ticks_fired + 1) as f64 * self.interval)
    }

    // === Registration ===

    pub fn register_ally(&mut self, id: impl Into<CombatantId>) -> bool {
        self.register(id.into(), Side::Ally)
    }

    pub fn register_enemy(&mut self, id: impl Into<CombatantId>) -> bool {
        self.register(id.into(), Side::Enemy)
    }

    fn register(&mut self, id: CombatantId, side: Side) -> bool {
        let added = self.registry.register(id.clone(), side);
        if added {
            info!(combatant = %id, %side, "Combatant joined encounter");
        }
        added
    }

    /// Register both teams; returns how many combatants were added
    pub fn register_team<A, E>(&mut self, allies: A, enemies: E) -> usize
    where
        A: IntoIterator,
        A::Item: Into<CombatantId>,
        E: IntoIterator,
        E::Item: Into<CombatantId>,
    {
        let mut added = 0;
        for id in allies {
            if self.register(id.into(), Side::Ally) {
                added += 1;
            }
        }
        for id in enemies {
            if self.register(id.into(), Side::Enemy) {
                added += 1;
            }
        }
        added
    }

    pub fn unregister(&mut self, id: &CombatantId) -> bool {
        let removed = self.registry.unregister(id);
        if removed {
            info!(combatant = %id, "Combatant left encounter");
        }
        removed
    }

    /// Drop every registration without touching the scheduler state
    pub fn clear(&mut self) {
        self.registry.clear();
    }

    // === Lifecycle ===

    /// Arm the scheduler at time `now`; no-op while already active
    pub fn start(&mut self, now: f64, sink: &mut impl EventSink) -> bool {
        if self.is_active() {
            debug!("Start ignored, encounter already active");
            return false;
        }

        self.state = SchedulerState::Active;
        self.action_count = 0;
        self.start_time = now;
        self.now = now;
        self.ticks_fired = 0;
        self.interval = self.constants.scheduler.effective_tick_interval();
        self.stats = EncounterStats::new(now);
        self.outcome = None;

        let allies = self.team_names(Side::Ally);
        let enemies = self.team_names(Side::Enemy);
        info!(
            allies = self.registry.side(Side::Ally).len(),
            enemies = self.registry.side(Side::Enemy).len(),
            interval = self.interval,
            "Encounter started"
        );
        sink.record(
            CombatEvent::new(CombatEventKind::CombatStart, now)
                .with_info(format!("{} vs {}", allies, enemies)),
        );
        true
    }

    /// Disarm the scheduler and discard every registration
    ///
    /// No-op while inactive.
    pub fn stop(&mut self) -> bool {
        if !self.is_active() {
            debug!("Stop ignored, encounter not active");
            return false;
        }

        let discarded = self.registry.len();
        self.state = SchedulerState::Inactive;
        self.registry.clear();
        self.stats.end_time.get_or_insert(self.now);
        self.outcome.get_or_insert(EncounterOutcome::Stopped);
        info!(discarded, actions = self.action_count, "Encounter stopped");
        true
    }

    /// Move the emulated timer forward, firing every tick that falls due
    pub fn advance(
        &mut self,
        delta: f64,
        sink: &mut impl EventSink,
        owner: &mut impl EncounterOwner,
    ) -> Vec<TickReport> {
        let mut reports = Vec::new();
        if !self.is_active() || !(delta.is_finite() && delta > 0.0) {
            return reports;
        }

        let target = self.now + delta;
        // Ticks sit on exact multiples of the interval while `now` accumulates deltas
        let tolerance = self.interval * 1e-9;
        while let Some(due) = self.next_tick_time() {
            if due > target + tolerance {
                break;
            }
            self.ticks_fired += 1;
            reports.push(self.tick(due, sink, owner));
        }

        if self.is_active() {
            self.now = self.now.max(target);
        }
        reports
    }

    /// Run one scheduler cycle at time `now`
    pub fn tick(
        &mut self,
        now: f64,
        sink: &mut impl EventSink,
        owner: &mut impl EncounterOwner,
    ) -> TickReport {
        let mut report = TickReport::new(now);
        if !self.is_active() {
            trace!(now, "Tick ignored, encounter not active");
            return report;
        }
        self.now = now;

        self.registry.cleanup_invalid(&self.provider);
        if self.registry.is_empty() {
            info!("No combatants registered, stopping encounter");
            self.stop();
            report.stopped = true;
            return report;
        }

        trace!(
            now,
            allies = self.registry.side(Side::Ally).len(),
            enemies = self.registry.side(Side::Enemy).len(),
            "Tick"
        );

        for side in [Side::Ally, Side::Enemy] {
            let due: Vec<CombatantId> = self
                .registry
                .side(side)
                .iter()
                .filter(|a| a.is_ready(now))
                .map(|a| a.combatant_id.clone())
                .collect();

            for id in due {
                let outcome = self.resolve_action(&id, side, now, sink, owner, &mut report);
                let resolved = matches!(outcome, ActionOutcome::Resolved { .. });
                report.outcomes.push(outcome);

                if resolved {
                    self.action_count += 1;
                    if self.action_count >= self.constants.scheduler.failsafe_action_limit {
                        self.trip_failsafe(now, sink, owner, &mut report);
                        return report;
                    }
                }
            }
        }

        self.check_defeat(now, sink, owner, &mut report);
        report
    }

    // === Resolution pipeline ===

    fn resolve_action(
        &mut self,
        id: &CombatantId,
        side: Side,
        now: f64,
        sink: &mut impl EventSink,
        owner: &mut impl EncounterOwner,
        report: &mut TickReport,
    ) -> ActionOutcome {
        let prepared = match self.prepare_action(id, side) {
            Ok(prepared) => prepared,
            Err(reason) => {
                match &reason {
                    SkipReason::Dead => trace!(combatant = %id, "Skipping dead combatant"),
                    SkipReason::NoTarget => debug!(combatant = %id, "No target available"),
                    _ => error!(combatant = %id, %reason, "Aborting action"),
                }
                return ActionOutcome::Skipped {
                    combatant: id.clone(),
                    reason,
                };
            }
        };

        let result = resolve_attack_with_rng(&prepared.attack, &prepared.defense, &mut self.rng);
        let defender_after = (prepared.defender_hp - f64::from(result.final_damage)).max(0.0);

        if result.final_damage > 0 {
            if let Err(err) = self.provider.set_current_health(&prepared.target, defender_after) {
                error!(combatant = %id, target = %prepared.target, %err, "Failed to apply damage");
                return ActionOutcome::Skipped {
                    combatant: id.clone(),
                    reason: err.into(),
                };
            }
        }

        self.stats.record(&result);
        debug!(
            attacker = %id,
            target = %prepared.target,
            weapon = %prepared.attack.weapon_name,
            damage = result.final_damage,
            "{}",
            result.summary()
        );

        sink.record(
            CombatEvent::for_action(now, &result)
                .with_participants(prepared.attacker_name.clone(), prepared.defender_name.clone())
                .with_weapon(prepared.attack.weapon_name.clone())
                .with_health(prepared.attacker_hp, prepared.defender_hp, defender_after),
        );

        if result.landed() && defender_after <= 0.0 {
            info!(attacker = %id, target = %prepared.target, "Combatant slain");
            self.stats.record_death();
            sink.record(
                CombatEvent::new(CombatEventKind::Death, now)
                    .with_participants(prepared.attacker_name, prepared.defender_name)
                    .with_weapon(prepared.attack.weapon_name.clone())
                    .with_health(prepared.attacker_hp, prepared.defender_hp, 0.0),
            );
            owner.on_combatant_death(&prepared.target);
            report.deaths.push(prepared.target.clone());
        }

        let speed = self.rearm_speed(id, prepared.attack.attack_speed);
        if let Some(action) = self.registry.find_mut(id) {
            action.target_id = Some(prepared.target.clone());
            action.attack_speed = speed;
            action.next_action_time = now + action_interval(speed);
        }

        ActionOutcome::Resolved {
            attacker: id.clone(),
            target: prepared.target,
            result,
        }
    }

    fn prepare_action(&self, id: &CombatantId, side: Side) -> Result<PreparedAction, SkipReason> {
        if !self.provider.contains(id) {
            return Err(SkipReason::InvalidCombatant);
        }
        if !self.provider.is_alive(id) {
            return Err(SkipReason::Dead);
        }
        let stats = self.provider.stats(id)?;

        let alive = self.registry.alive(side.opposite(), &self.provider);
        let target = select_target(&alive)
            .cloned()
            .ok_or(SkipReason::NoTarget)?;

        let weapon = select_weapon(&self.provider, id)?;
        let attack = AttackProfile::derive(&stats, &weapon, self.provider.natural_attack_power(id)?);

        let target_stats = self.provider.stats(&target)?;
        let shield = self.provider.shield(&target)?;
        let penalty = EquipmentPenalty::for_combatant(&self.provider, &target)?;
        let defense = DefenseProfile::derive(
            &target_stats,
            self.provider.armor_defense(&target)?,
            shield.as_ref(),
            penalty,
            self.constants.penalty.apply_to_defense,
        );

        Ok(PreparedAction {
            attacker_name: self.provider.display_name(id)?,
            defender_name: self.provider.display_name(&target)?,
            attacker_hp: self.provider.current_health(id)?,
            defender_hp: self.provider.current_health(&target)?,
            target,
            attack,
            defense,
        })
    }

    fn rearm_speed(&self, id: &CombatantId, computed: f64) -> f64 {
        let fallback = self.constants.scheduler.fallback_attack_speed;
        let speed = sanitize_attack_speed(computed, fallback);
        if !(computed.is_finite() && computed > 0.0) {
            warn!(combatant = %id, computed, fallback, "Invalid attack speed, using fallback");
        }
        speed
    }

    fn trip_failsafe(
        &mut self,
        now: f64,
        sink: &mut impl EventSink,
        owner: &mut impl EncounterOwner,
        report: &mut TickReport,
    ) {
        let actions = self.action_count;
        warn!(actions, "Failsafe action limit reached, forcing stop");

        self.outcome.get_or_insert(EncounterOutcome::Failsafe);
        self.stats.end_time = Some(now);
        sink.record(
            CombatEvent::new(CombatEventKind::CombatEnd, now)
                .with_info(format!("failsafe stop after {} actions", actions)),
        );

        self.stop();
        owner.request_combat_completion(CompletionReason::FailsafeTripped { actions });
        report.failsafe_tripped = true;
        report.stopped = true;
    }

    fn check_defeat(
        &mut self,
        now: f64,
        sink: &mut impl EventSink,
        owner: &mut impl EncounterOwner,
        report: &mut TickReport,
    ) {
        let defeated = [Side::Enemy, Side::Ally]
            .into_iter()
            .find(|&side| self.registry.all_dead(side, &self.provider));
        let Some(side) = defeated else {
            return;
        };

        report.defeated_side = Some(side);
        if self.outcome.is_none() {
            let outcome = EncounterOutcome::for_defeated(side);
            self.outcome = Some(outcome);
            self.stats.end_time = Some(now);
            info!(%outcome, actions = self.stats.actions, "Encounter decided");
            sink.record(CombatEvent::new(CombatEventKind::CombatEnd, now).with_info(format!(
                "{} after {} actions in {:.1}s",
                outcome,
                self.stats.actions,
                self.stats.duration(now)
            )));
        }
        owner.request_combat_completion(CompletionReason::SideDefeated(side));
    }

    fn team_names(&self, side: Side) -> String {
        self.registry
            .side(side)
            .iter()
            .map(|a| {
                self.provider
                    .display_name(&a.combatant_id)
                    .unwrap_or_else(|_| a.combatant_id.to_string())
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
