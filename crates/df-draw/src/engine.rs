//! Draw Engine — winner selection state machine
//!
//! Owns the roster, the prize queue, the remaining pool, and the draw
//! history; all mutation flows through its public operations so the pool
//! invariants hold at every step.

use std::collections::HashSet;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use df_core::{DrawError, DrawResult, Participant, ParticipantId, PrizeId, PrizeQueue, Roster};

use crate::record::{DrawRecord, PrizeAward};
use crate::scheduler::{CancelGuard, RollToken};
use crate::shuffle;
use crate::timing::{RollPlan, RollTimingConfig};

/// Engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DrawPhase {
    /// Waiting for a draw to start
    #[default]
    Idle,
    /// Rolling animation in progress
    Rolling,
    /// Winner picked, result on display
    ResultShown,
}

/// Draw settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawSettings {
    /// Allow a participant to win more than once
    pub allow_repeat: bool,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            allow_repeat: false,
        }
    }
}

/// Session statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawStats {
    pub total_draws: u64,
    pub prizes_awarded: u64,
    pub generic_awards: u64,
    pub resets: u64,
}

/// State captured at roll start, dropped when the roll ends or cancels
#[derive(Debug, Clone)]
struct ActiveRoll {
    token: RollToken,
    award: PrizeAward,
    consume_prize: bool,
    guard: CancelGuard,
}

/// Draw Engine
///
/// Three-phase state machine: `Idle -> Rolling -> ResultShown -> Idle`.
/// The winner is picked uniformly from the remaining pool at stop time,
/// independent of the display samples shown while rolling.
pub struct DrawEngine {
    /// Authoritative participant list
    roster: Roster,
    /// Prizes in award order
    prizes: PrizeQueue,
    /// Participants still eligible to be drawn
    remaining: Vec<Participant>,
    /// Completed draws, oldest first
    history: Vec<DrawRecord>,
    /// Repeat-allowed flag
    settings: DrawSettings,
    /// Current phase
    phase: DrawPhase,
    /// Roll timing configuration
    timing: RollTimingConfig,
    /// Random number generator
    rng: StdRng,
    /// Roll generation counter, bumped on every start/cancel
    generation: u64,
    /// In-flight roll state
    active_roll: Option<ActiveRoll>,
    /// Winner of the most recent draw
    current_winner: Option<Participant>,
    /// Session stats
    stats: DrawStats,
}

impl DrawEngine {
    /// Create an engine with an empty roster and default timing
    pub fn new() -> Self {
        Self::with_timing(RollTimingConfig::default())
    }

    /// Create with specific timing
    pub fn with_timing(timing: RollTimingConfig) -> Self {
        Self {
            roster: Roster::new(),
            prizes: PrizeQueue::new(),
            remaining: Vec::new(),
            history: Vec::new(),
            settings: DrawSettings::default(),
            phase: DrawPhase::Idle,
            timing,
            rng: StdRng::from_os_rng(),
            generation: 0,
            active_roll: None,
            current_winner: None,
            stats: DrawStats::default(),
        }
    }

    /// Create with an existing roster
    pub fn with_roster(roster: Roster) -> Self {
        let mut engine = Self::new();
        engine.roster = roster;
        engine.rebuild_remaining();
        engine
    }

    /// Seed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ROSTER OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Parse raw text and append participants. Empty input is a no-op.
    pub fn add_participants(&mut self, raw: &str) -> Vec<ParticipantId> {
        let ids = self.roster.add(raw);
        if !ids.is_empty() {
            self.roster_changed();
        }
        ids
    }

    /// Remove a participant by id
    pub fn remove_participant(&mut self, id: ParticipantId) -> bool {
        let removed = self.roster.remove(id);
        if removed {
            self.roster_changed();
        }
        removed
    }

    /// Clear the roster
    pub fn clear_roster(&mut self) {
        self.roster.clear();
        self.roster_changed();
    }

    /// Drop later participants sharing a name, keep the first of each
    pub fn remove_duplicate_names(&mut self) -> usize {
        let removed = self.roster.remove_duplicates_by_name();
        if removed > 0 {
            self.roster_changed();
        }
        removed
    }

    /// Load the built-in demo roster, replacing or appending
    pub fn load_demo_roster(&mut self, replace: bool) {
        let demo = Roster::demo();
        if replace {
            self.roster = demo;
        } else {
            self.roster.merge(demo);
        }
        self.roster_changed();
    }

    /// Any roster edit cancels an in-flight roll and, in no-repeat mode,
    /// wipes the history wholesale rather than diffing the pool.
    fn roster_changed(&mut self) {
        self.cancel_active_roll();
        if !self.settings.allow_repeat && !self.history.is_empty() {
            log::info!("draw: roster changed in no-repeat mode, clearing history");
            self.history.clear();
        }
        self.current_winner = None;
        self.phase = DrawPhase::Idle;
        self.rebuild_remaining();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PRIZE OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Parse raw text and append prizes. Empty input is a no-op.
    pub fn add_prizes(&mut self, raw: &str) -> Vec<PrizeId> {
        self.prizes.add(raw)
    }

    /// Remove a prize by id
    pub fn remove_prize(&mut self, id: PrizeId) -> bool {
        self.prizes.remove(id)
    }

    /// Move a prize one slot toward the front
    pub fn move_prize_up(&mut self, index: usize) -> bool {
        self.prizes.move_up(index)
    }

    /// Move a prize one slot toward the back
    pub fn move_prize_down(&mut self, index: usize) -> bool {
        self.prizes.move_down(index)
    }

    /// Clear the prize queue
    pub fn clear_prizes(&mut self) {
        self.prizes.clear();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DRAW STATE MACHINE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start a roll: `Idle -> Rolling`.
    ///
    /// Fails with `EmptyPool` when nobody remains. A second start while
    /// already rolling cancels the previous roll and begins a fresh one.
    /// The returned plan carries the tick schedule and the stop token.
    pub fn start_draw(&mut self) -> DrawResult<RollPlan> {
        if self.phase == DrawPhase::Rolling {
            self.cancel_active_roll();
        }
        if self.remaining.is_empty() {
            return Err(DrawError::EmptyPool);
        }

        self.generation += 1;
        let token = RollToken(self.generation);
        let award = match self.prizes.peek_next() {
            Some(prize) => PrizeAward::Prize(prize.clone()),
            None => PrizeAward::Generic,
        };
        let consume_prize = !self.prizes.is_empty();
        let plan = RollPlan::generate(token, &self.timing, &mut self.rng);

        self.active_roll = Some(ActiveRoll {
            token,
            award,
            consume_prize,
            guard: CancelGuard::new(),
        });
        self.current_winner = None;
        self.phase = DrawPhase::Rolling;
        log::info!(
            "draw: rolling for {:.0} ms over pool of {}",
            plan.duration_ms,
            self.remaining.len()
        );
        Ok(plan)
    }

    /// Uniform sample of the remaining pool for the rolling display.
    ///
    /// `None` outside the `Rolling` phase. The final winner is picked
    /// independently; the display never has to land on it.
    pub fn sample_display(&mut self) -> Option<&Participant> {
        if self.phase != DrawPhase::Rolling {
            return None;
        }
        shuffle::pick(&self.remaining, &mut self.rng)
    }

    /// Stop the roll and select the winner: `Rolling -> ResultShown`.
    ///
    /// Rejects stale tokens with `StaleRoll`, so a stop timer scheduled
    /// before a reset or roster edit can never mutate the new pool.
    pub fn finish_roll(&mut self, token: RollToken) -> DrawResult<DrawRecord> {
        let valid = self.phase == DrawPhase::Rolling
            && self.active_roll.as_ref().is_some_and(|r| r.token == token);
        if !valid {
            return Err(DrawError::StaleRoll);
        }
        let roll = self.active_roll.take().ok_or(DrawError::StaleRoll)?;
        roll.guard.cancel();

        let winner = shuffle::pick(&self.remaining, &mut self.rng)
            .cloned()
            .ok_or(DrawError::EmptyPool)?;

        if roll.consume_prize {
            self.prizes.consume_next();
        }
        if !self.settings.allow_repeat {
            self.remaining.retain(|p| p.id != winner.id);
        }

        let record = DrawRecord::new(winner.clone(), roll.award);
        self.history.push(record.clone());
        self.current_winner = Some(winner);

        self.stats.total_draws += 1;
        if record.award.is_generic() {
            self.stats.generic_awards += 1;
        } else {
            self.stats.prizes_awarded += 1;
        }

        self.phase = DrawPhase::ResultShown;
        log::info!(
            "draw: winner {} ({}), {} remaining",
            record.participant.name,
            record.award.label(),
            self.remaining.len()
        );
        Ok(record)
    }

    /// Dismiss the result: `ResultShown -> Idle`. No pool mutation.
    pub fn acknowledge_result(&mut self) {
        if self.phase == DrawPhase::ResultShown {
            self.phase = DrawPhase::Idle;
        }
    }

    /// Clear history and restore the full pool, from any phase.
    ///
    /// Confirmation is a presentation concern; the engine resets
    /// unconditionally.
    pub fn reset_history(&mut self) {
        self.cancel_active_roll();
        self.history.clear();
        self.current_winner = None;
        self.phase = DrawPhase::Idle;
        self.rebuild_remaining();
        self.stats.resets += 1;
        log::info!("draw: history reset, pool back to {}", self.remaining.len());
    }

    /// Flip the repeat-allowed flag and recompute the pool wholesale from
    /// the current roster and history. Rejected while rolling.
    pub fn set_allow_repeat(&mut self, allow: bool) -> DrawResult<()> {
        if self.phase == DrawPhase::Rolling {
            return Err(DrawError::RollInProgress);
        }
        if self.settings.allow_repeat != allow {
            self.settings.allow_repeat = allow;
            self.rebuild_remaining();
        }
        Ok(())
    }

    /// Invalidate the in-flight roll, if any, and its scheduled callbacks
    fn cancel_active_roll(&mut self) {
        if let Some(roll) = self.active_roll.take() {
            roll.guard.cancel();
            self.generation += 1;
            if self.phase == DrawPhase::Rolling {
                self.phase = DrawPhase::Idle;
            }
            log::debug!("draw: roll {:?} canceled", roll.token);
        }
    }

    /// Recompute `remaining` from roster and history.
    ///
    /// Repeats allowed: the full roster. Disallowed: roster minus everyone
    /// already in the history. Always wholesale, never incremental.
    fn rebuild_remaining(&mut self) {
        if self.settings.allow_repeat {
            self.remaining = self.roster.snapshot();
        } else {
            let drawn: HashSet<ParticipantId> =
                self.history.iter().map(|r| r.participant.id).collect();
            self.remaining = self
                .roster
                .iter()
                .filter(|p| !drawn.contains(&p.id))
                .cloned()
                .collect();
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Current phase
    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    /// Current settings
    pub fn settings(&self) -> DrawSettings {
        self.settings
    }

    /// The roster
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The prize queue
    pub fn prizes(&self) -> &PrizeQueue {
        &self.prizes
    }

    /// Participants still eligible to be drawn
    pub fn remaining(&self) -> &[Participant] {
        &self.remaining
    }

    /// Completed draws, oldest first
    pub fn history(&self) -> &[DrawRecord] {
        &self.history
    }

    /// Winner of the most recent draw, until reset or roster change
    pub fn current_winner(&self) -> Option<&Participant> {
        self.current_winner.as_ref()
    }

    /// Session stats
    pub fn stats(&self) -> &DrawStats {
        &self.stats
    }

    /// Current timing config
    pub fn timing(&self) -> &RollTimingConfig {
        &self.timing
    }

    /// Replace the timing config (applies from the next roll)
    pub fn set_timing(&mut self, timing: RollTimingConfig) {
        self.timing = timing;
    }

    /// Cancel flag for the in-flight roll, for host-owned timers
    pub fn roll_guard(&self) -> Option<CancelGuard> {
        self.active_roll.as_ref().map(|r| r.guard.clone())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Export settings as JSON
    pub fn export_settings(&self) -> String {
        serde_json::to_string_pretty(&self.settings).unwrap_or_default()
    }

    /// Import settings from JSON and recompute the pool. Rejected while
    /// rolling.
    pub fn import_settings(&mut self, json: &str) -> DrawResult<()> {
        if self.phase == DrawPhase::Rolling {
            return Err(DrawError::RollInProgress);
        }
        let settings: DrawSettings =
            serde_json::from_str(json).map_err(|e| DrawError::Serialization(e.to_string()))?;
        self.settings = settings;
        self.rebuild_remaining();
        Ok(())
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(names: &str) -> DrawEngine {
        let mut engine = DrawEngine::with_timing(RollTimingConfig::instant());
        engine.seed(4242);
        engine.add_participants(names);
        engine
    }

    fn draw_once(engine: &mut DrawEngine) -> DrawRecord {
        let plan = engine.start_draw().unwrap();
        let record = engine.finish_roll(plan.token).unwrap();
        engine.acknowledge_result();
        record
    }

    #[test]
    fn test_engine_creation() {
        let engine = DrawEngine::new();
        assert_eq!(engine.phase(), DrawPhase::Idle);
        assert_eq!(engine.stats().total_draws, 0);
        assert!(engine.remaining().is_empty());
    }

    #[test]
    fn test_empty_pool_rejects_start() {
        let mut engine = DrawEngine::new();
        assert!(matches!(engine.start_draw(), Err(DrawError::EmptyPool)));
        assert_eq!(engine.phase(), DrawPhase::Idle);
    }

    #[test]
    fn test_full_draw_cycle() {
        let mut engine = engine_with("Alice,Bob,Carol");

        let plan = engine.start_draw().unwrap();
        assert_eq!(engine.phase(), DrawPhase::Rolling);

        let record = engine.finish_roll(plan.token).unwrap();
        assert_eq!(engine.phase(), DrawPhase::ResultShown);
        assert_eq!(engine.current_winner().unwrap().id, record.participant.id);
        assert_eq!(engine.history().len(), 1);

        engine.acknowledge_result();
        assert_eq!(engine.phase(), DrawPhase::Idle);
        // Acknowledge never touches the pool
        assert_eq!(engine.remaining().len(), 2);
    }

    #[test]
    fn test_no_repeat_pool_shrinks_and_exhausts() {
        let mut engine = engine_with("A,B,C");

        for expected_remaining in [2, 1, 0] {
            draw_once(&mut engine);
            assert_eq!(engine.remaining().len(), expected_remaining);
        }

        // Nobody drawn twice
        let winners: std::collections::HashSet<_> =
            engine.history().iter().map(|r| r.participant.id).collect();
        assert_eq!(winners.len(), 3);

        // Fourth draw fails and leaves history untouched
        assert!(matches!(engine.start_draw(), Err(DrawError::EmptyPool)));
        assert_eq!(engine.history().len(), 3);
    }

    #[test]
    fn test_repeat_allowed_pool_stays_full() {
        let mut engine = engine_with("A,B,C");
        engine.set_allow_repeat(true).unwrap();

        for _ in 0..10 {
            draw_once(&mut engine);
            assert_eq!(engine.remaining().len(), 3);
        }
        assert_eq!(engine.history().len(), 10);
    }

    #[test]
    fn test_prize_sequencing() {
        let mut engine = engine_with("A,B,C");
        engine.add_prizes("Gold,Silver");

        let first = draw_once(&mut engine);
        assert_eq!(first.award.label(), "Gold");
        assert_eq!(engine.prizes().peek_next().unwrap().name, "Silver");

        let second = draw_once(&mut engine);
        assert_eq!(second.award.label(), "Silver");
        assert!(engine.prizes().is_empty());

        // Queue exhausted: third draw awards the generic sentinel
        let third = draw_once(&mut engine);
        assert!(third.award.is_generic());
        assert_eq!(engine.stats().prizes_awarded, 2);
        assert_eq!(engine.stats().generic_awards, 1);
    }

    #[test]
    fn test_toggle_repeat_recomputes_pool() {
        let mut engine = engine_with("A,B,C,D");
        draw_once(&mut engine);
        draw_once(&mut engine);
        assert_eq!(engine.remaining().len(), 2);

        engine.set_allow_repeat(true).unwrap();
        assert_eq!(engine.remaining().len(), 4);

        // Switching back re-subtracts the existing history
        engine.set_allow_repeat(false).unwrap();
        assert_eq!(engine.remaining().len(), 2);
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn test_toggle_rejected_while_rolling() {
        let mut engine = engine_with("A,B");
        engine.start_draw().unwrap();
        assert!(matches!(
            engine.set_allow_repeat(true),
            Err(DrawError::RollInProgress)
        ));
        assert_eq!(engine.phase(), DrawPhase::Rolling);
    }

    #[test]
    fn test_stale_token_after_reset() {
        let mut engine = engine_with("A,B,C");
        let plan = engine.start_draw().unwrap();

        engine.reset_history();
        assert_eq!(engine.phase(), DrawPhase::Idle);

        // The stop callback scheduled before the reset must not land
        assert!(matches!(
            engine.finish_roll(plan.token),
            Err(DrawError::StaleRoll)
        ));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_roster_change_cancels_roll_and_wipes_history() {
        let mut engine = engine_with("A,B,C");
        draw_once(&mut engine);
        assert_eq!(engine.history().len(), 1);

        let plan = engine.start_draw().unwrap();
        let guard = engine.roll_guard().unwrap();
        engine.add_participants("D");

        assert!(guard.is_canceled());
        assert_eq!(engine.phase(), DrawPhase::Idle);
        assert!(engine.history().is_empty());
        assert_eq!(engine.remaining().len(), 4);
        assert!(matches!(
            engine.finish_roll(plan.token),
            Err(DrawError::StaleRoll)
        ));
    }

    #[test]
    fn test_roster_change_keeps_history_when_repeats_allowed() {
        let mut engine = engine_with("A,B,C");
        engine.set_allow_repeat(true).unwrap();
        draw_once(&mut engine);

        engine.add_participants("D");
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.remaining().len(), 4);
    }

    #[test]
    fn test_second_start_invalidates_first_roll() {
        let mut engine = engine_with("A,B,C");
        let first = engine.start_draw().unwrap();
        let second = engine.start_draw().unwrap();

        assert_ne!(first.token, second.token);
        assert!(matches!(
            engine.finish_roll(first.token),
            Err(DrawError::StaleRoll)
        ));
        assert!(engine.finish_roll(second.token).is_ok());
    }

    #[test]
    fn test_sample_display_only_while_rolling() {
        let mut engine = engine_with("A,B,C");
        assert!(engine.sample_display().is_none());

        engine.start_draw().unwrap();
        for _ in 0..20 {
            assert!(engine.sample_display().is_some());
        }
    }

    #[test]
    fn test_remove_last_participant_empties_pool() {
        let mut engine = engine_with("A");
        let id = engine.roster().iter().next().unwrap().id;
        assert!(engine.remove_participant(id));
        assert!(engine.remaining().is_empty());
        assert!(matches!(engine.start_draw(), Err(DrawError::EmptyPool)));
    }

    #[test]
    fn test_remove_duplicates_routes_through_engine() {
        let mut engine = engine_with("A,B,A");
        assert_eq!(engine.remove_duplicate_names(), 1);
        assert_eq!(engine.remaining().len(), 2);
    }

    #[test]
    fn test_demo_roster_load() {
        let mut engine = DrawEngine::new();
        engine.load_demo_roster(true);
        assert_eq!(engine.roster().len(), 20);

        engine.load_demo_roster(false);
        assert_eq!(engine.roster().len(), 40);

        engine.load_demo_roster(true);
        assert_eq!(engine.roster().len(), 20);
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut engine = engine_with("A,B");
        engine.set_allow_repeat(true).unwrap();
        let json = engine.export_settings();

        let mut other = engine_with("X,Y,Z");
        other.import_settings(&json).unwrap();
        assert!(other.settings().allow_repeat);
    }

    #[test]
    fn test_history_is_chronological() {
        let mut engine = engine_with("A,B,C");
        let first = draw_once(&mut engine);
        let second = draw_once(&mut engine);
        assert_eq!(engine.history()[0].participant.id, first.participant.id);
        assert_eq!(engine.history()[1].participant.id, second.participant.id);
        assert!(engine.history()[0].drawn_at <= engine.history()[1].drawn_at);
    }

    #[test]
    fn test_reset_restores_pool_and_counts() {
        let mut engine = engine_with("A,B,C");
        draw_once(&mut engine);
        draw_once(&mut engine);

        engine.reset_history();
        assert!(engine.history().is_empty());
        assert!(engine.current_winner().is_none());
        assert_eq!(engine.remaining().len(), 3);
        assert_eq!(engine.stats().resets, 1);
        // Stats survive the reset
        assert_eq!(engine.stats().total_draws, 2);
    }
}
