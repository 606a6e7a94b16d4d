//! Difficulty progression module
//!
//! All difficulty logic lives here. This module must stay pure and
//! self-contained:
//! - Deterministic curves (score in, parameters out)
//! - Injected RNG only for mechanic draws
//! - No rendering, storage, or network dependencies
//!
//! The free functions are the stateless API for one-off lookups;
//! [`DifficultySession`] is the per-round stateful wrapper the game loop
//! drives.

pub mod curve;
pub mod mechanics;
pub mod params;
pub mod phase;
pub mod session;

pub use curve::{
    curve_preview, reaction_window_analysis, speed_for_score, tolerance_for_score, CurvePoint,
    ReactionWindow, REFERENCE_FRAME_MS,
};
pub use mechanics::{
    is_mechanic_active, pulse_start_radius, should_spawn_double_pulse, should_spawn_ghost_pulse,
    Mechanic,
};
pub use params::{DifficultyParams, HumanLimits, HUMAN_LIMITS, PARAMS};
pub use phase::{phase_for_score, DifficultyPhase, PhaseId, PHASES};
pub use session::{DifficultySession, DifficultyStats, ListenerId, PulseConfig};
