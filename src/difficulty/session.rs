//! Per-round difficulty session
//!
//! Stateful wrapper over the pure curve/mechanic functions. One session is
//! owned by the active game round; the game loop reports the score after
//! each successful tap and reads pulse parameters once per frame/tap. No
//! I/O, no persistence, no rendering.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::curve::{reaction_window_analysis, speed_for_score, tolerance_for_score, ReactionWindow};
use super::mechanics::{
    pulse_start_radius, should_spawn_double_pulse, should_spawn_ghost_pulse, Mechanic,
};
use super::phase::{phase_for_score, DifficultyPhase};

/// Everything the renderer needs to spawn the next pulse.
///
/// Computed fresh on every request; the mechanic flags are independent
/// draws, so two snapshots at the same score may differ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PulseConfig {
    pub speed: f32,
    pub tolerance: f32,
    pub start_radius: f32,
    pub is_double: bool,
    pub is_ghost: bool,
}

/// Difficulty snapshot for the HUD.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DifficultyStats {
    pub score: u32,
    pub phase: &'static str,
    pub phase_icon: &'static str,
    pub phase_color: &'static str,
    pub speed: f32,
    pub tolerance: f32,
    pub reaction_time_ms: f32,
    pub is_human_playable: bool,
    pub active_features: &'static [&'static str],
}

/// Handle for unregistering a phase-change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u32);

type PhaseListener = Box<dyn FnMut(&'static DifficultyPhase, &'static DifficultyPhase)>;

/// Difficulty state for one game round.
///
/// Created (or [`reset`](Self::reset)) at round start, updated once per
/// successful tap, discarded at game over. Single-threaded by construction;
/// all methods run to completion without blocking.
pub struct DifficultySession {
    score: u32,
    phase: &'static DifficultyPhase,
    listeners: Vec<(ListenerId, PhaseListener)>,
    next_listener_id: u32,
    rng: Pcg32,
}

impl DifficultySession {
    /// Create a session with a seeded RNG for the mechanic draws.
    pub fn new(seed: u64) -> Self {
        Self {
            score: 0,
            phase: phase_for_score(0),
            listeners: Vec::new(),
            next_listener_id: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create a session seeded from the thread RNG.
    pub fn new_random() -> Self {
        Self::new(rand::rng().random())
    }

    /// Reset to round-start state. Listeners stay registered.
    pub fn reset(&mut self) {
        self.score = 0;
        self.phase = phase_for_score(0);
    }

    /// Report the player's new cumulative score.
    ///
    /// Recomputes the phase; if the phase changed, every registered
    /// listener is invoked with (old, new). A panicking listener is caught
    /// and logged so a HUD failure can never take down the scoring path.
    pub fn update_score(&mut self, score: u32) {
        let previous = self.phase;
        self.score = score;
        self.phase = phase_for_score(score);

        if previous.id != self.phase.id {
            let new = self.phase;
            for (id, listener) in &mut self.listeners {
                let result = catch_unwind(AssertUnwindSafe(|| listener(previous, new)));
                if result.is_err() {
                    log::error!(
                        "phase change listener {id:?} panicked ({} -> {})",
                        previous.name,
                        new.name
                    );
                }
            }
        }
    }

    /// Register a phase-change listener. Invoked synchronously from
    /// [`update_score`](Self::update_score).
    pub fn on_phase_change(
        &mut self,
        listener: impl FnMut(&'static DifficultyPhase, &'static DifficultyPhase) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a previously registered listener. Returns whether it was
    /// still registered.
    pub fn remove_phase_change(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Current cumulative score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Pulse expansion speed at the current score. Safe to call every frame.
    pub fn current_speed(&self) -> f32 {
        speed_for_score(self.score)
    }

    /// Timing tolerance at the current score. Safe to call every frame.
    pub fn current_tolerance(&self) -> f32 {
        tolerance_for_score(self.score)
    }

    /// Phase at the current score.
    pub fn current_phase(&self) -> &'static DifficultyPhase {
        self.phase
    }

    /// Whether a mechanic is unlocked at the current score.
    pub fn is_active(&self, mechanic: Mechanic) -> bool {
        mechanic.is_active(self.score)
    }

    /// Configuration for the upcoming pulse.
    ///
    /// The mechanic flags are decided at call time, never memoized.
    pub fn next_pulse_config(&mut self) -> PulseConfig {
        PulseConfig {
            speed: self.current_speed(),
            tolerance: self.current_tolerance(),
            start_radius: pulse_start_radius(self.score, &mut self.rng),
            is_double: should_spawn_double_pulse(self.score, &mut self.rng),
            is_ghost: should_spawn_ghost_pulse(self.score, &mut self.rng),
        }
    }

    /// Reaction window analysis at the current score.
    pub fn reaction_analysis(&self) -> ReactionWindow {
        reaction_window_analysis(self.score)
    }

    /// HUD-ready snapshot of the current difficulty state.
    pub fn stats(&self) -> DifficultyStats {
        let analysis = self.reaction_analysis();
        DifficultyStats {
            score: self.score,
            phase: self.phase.name,
            phase_icon: self.phase.icon,
            phase_color: self.phase.color,
            speed: self.current_speed(),
            tolerance: self.current_tolerance(),
            reaction_time_ms: analysis.total_reaction_time_ms,
            is_human_playable: analysis.is_human_playable,
            active_features: self.phase.features,
        }
    }
}

impl fmt::Debug for DifficultySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DifficultySession")
            .field("score", &self.score)
            .field("phase", &self.phase.id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::phase::PhaseId;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_reset_matches_score_zero() {
        let mut session = DifficultySession::new(1);
        session.update_score(250);
        session.reset();
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_speed(), speed_for_score(0));
        assert_eq!(session.current_tolerance(), tolerance_for_score(0));
        assert_eq!(session.current_phase().id, PhaseId::Learning);
    }

    #[test]
    fn test_phase_change_fires_once_per_crossing() {
        let mut session = DifficultySession::new(1);
        let changes: Rc<RefCell<Vec<(PhaseId, PhaseId)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        session.on_phase_change(move |old, new| {
            sink.borrow_mut().push((old.id, new.id));
        });

        // Crossing Learning -> Acceleration
        session.update_score(16);
        assert_eq!(
            changes.borrow().as_slice(),
            &[(PhaseId::Learning, PhaseId::Acceleration)]
        );

        // Same phase: no re-fire
        session.update_score(20);
        assert_eq!(changes.borrow().len(), 1);

        // Jumping several phases still fires exactly once
        session.update_score(181);
        assert_eq!(
            changes.borrow().last(),
            Some(&(PhaseId::Acceleration, PhaseId::Mastery))
        );
        assert_eq!(changes.borrow().len(), 2);
    }

    #[test]
    fn test_no_callback_within_same_phase() {
        let mut session = DifficultySession::new(1);
        let fired = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&fired);
        session.on_phase_change(move |_, _| *sink.borrow_mut() += 1);

        for score in 0..=15 {
            session.update_score(score);
        }
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_panicking_listener_does_not_poison_others() {
        let mut session = DifficultySession::new(1);
        let fired = Rc::new(RefCell::new(0u32));
        session.on_phase_change(|_, _| panic!("hud exploded"));
        let sink = Rc::clone(&fired);
        session.on_phase_change(move |_, _| *sink.borrow_mut() += 1);

        // Must not propagate, and the second listener must still run
        session.update_score(16);
        assert_eq!(*fired.borrow(), 1);
        assert_eq!(session.current_phase().id, PhaseId::Acceleration);
    }

    #[test]
    fn test_remove_phase_change() {
        let mut session = DifficultySession::new(1);
        let fired = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&fired);
        let id = session.on_phase_change(move |_, _| *sink.borrow_mut() += 1);

        assert!(session.remove_phase_change(id));
        assert!(!session.remove_phase_change(id));

        session.update_score(16);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_pulse_config_below_thresholds() {
        let mut session = DifficultySession::new(1);
        session.update_score(50);
        for _ in 0..100 {
            let config = session.next_pulse_config();
            assert!(!config.is_double);
            assert!(!config.is_ghost);
            assert_eq!(config.start_radius, 0.0);
            assert_eq!(config.speed, speed_for_score(50));
            assert_eq!(config.tolerance, tolerance_for_score(50));
        }
    }

    #[test]
    fn test_pulse_config_draws_are_independent() {
        let mut session = DifficultySession::new(7);
        session.update_score(200);
        // With all mechanics unlocked, 200 draws should produce at least one
        // triggered and one untriggered double pulse
        let configs: Vec<PulseConfig> = (0..200).map(|_| session.next_pulse_config()).collect();
        assert!(configs.iter().any(|c| c.is_double));
        assert!(configs.iter().any(|c| !c.is_double));
    }

    #[test]
    fn test_is_active_tracks_score() {
        let mut session = DifficultySession::new(1);
        session.update_score(90);
        assert!(!session.is_active(Mechanic::DoublePulse));
        session.update_score(91);
        assert!(session.is_active(Mechanic::DoublePulse));
        assert!(!session.is_active(Mechanic::GhostPulse));
        session.update_score(131);
        assert!(session.is_active(Mechanic::GhostPulse));
    }

    #[test]
    fn test_stats_snapshot() {
        let mut session = DifficultySession::new(1);
        session.update_score(100);
        let stats = session.stats();
        assert_eq!(stats.score, 100);
        assert_eq!(stats.phase, "Pattern Complexity");
        assert_eq!(stats.phase_icon, "cyclone");
        assert!(stats.is_human_playable);
        assert!(!stats.active_features.is_empty());
    }
}
