//! Pulse Tap - difficulty progression core
//!
//! The game asks the player to tap an expanding ring at the moment it
//! aligns with a fixed target radius. This crate owns the one genuinely
//! algorithmic part of that game: mapping the player's score to pulse
//! speed, timing tolerance, a named difficulty phase, and the unlockable
//! mechanics (double pulses, ghost pulses, fast starts).
//!
//! Core modules:
//! - `difficulty::params`: tunable curve constants and human reaction limits
//! - `difficulty::curve`: pure score-to-parameter functions
//! - `difficulty::phase`: the ordered phase table
//! - `difficulty::mechanics`: threshold gates and probabilistic triggers
//! - `difficulty::session`: per-round stateful wrapper with phase-change
//!   notifications
//!
//! The rendering loop, HUD, storage, and platform services are external
//! collaborators; nothing in this crate does I/O.

pub mod difficulty;

pub use difficulty::{
    curve_preview, is_mechanic_active, phase_for_score, reaction_window_analysis, speed_for_score,
    tolerance_for_score, CurvePoint, DifficultyParams, DifficultyPhase, DifficultySession,
    DifficultyStats, HumanLimits, ListenerId, Mechanic, PhaseId, PulseConfig, ReactionWindow,
    HUMAN_LIMITS, PARAMS, PHASES,
};
