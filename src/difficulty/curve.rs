//! Score-to-parameter curve functions
//!
//! Pure, deterministic mappings from the player's score to pulse speed and
//! timing tolerance, plus the reaction-window fairness analysis used by the
//! diagnostic harness. No state, no I/O.

use serde::Serialize;

use super::params::{HUMAN_LIMITS, PARAMS};
use super::phase::phase_for_score;

/// Reference frame duration at 60 logical updates per second.
pub const REFERENCE_FRAME_MS: f32 = 16.67;

/// Pulse expansion speed for a given score, in pixels per frame.
///
/// Saturating exponential approach to the cap:
/// `initial + (max - initial) * (1 - e^(-score * steepness))`.
/// Speed rises quickly at low scores and asymptotically approaches, but
/// never exceeds, `max_speed`, so the pulse stays reactable no matter how
/// high the score climbs.
pub fn speed_for_score(score: u32) -> f32 {
    let speed = PARAMS.initial_speed
        + (PARAMS.max_speed - PARAMS.initial_speed)
            * (1.0 - (-(score as f32) * PARAMS.speed_curve_steepness).exp());

    // Hard cap against float drift
    speed.min(PARAMS.max_speed)
}

/// Timing tolerance (acceptance window half-width) for a given score,
/// in pixels.
///
/// Full tolerance through the speed phases, then a linear reduction down to
/// the minimum across the reduction window.
pub fn tolerance_for_score(score: u32) -> f32 {
    if score < PARAMS.tolerance_reduction_start {
        return PARAMS.initial_tolerance;
    }
    if score >= PARAMS.tolerance_reduction_end {
        return PARAMS.min_tolerance;
    }

    let progress = (score - PARAMS.tolerance_reduction_start) as f32
        / (PARAMS.tolerance_reduction_end - PARAMS.tolerance_reduction_start) as f32;
    let tolerance =
        PARAMS.initial_tolerance - (PARAMS.initial_tolerance - PARAMS.min_tolerance) * progress;

    tolerance.max(PARAMS.min_tolerance)
}

/// How much real-world time a player has to react at a given score.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReactionWindow {
    /// Visible acceptance window span (tolerance on both sides).
    pub window_pixels: f32,
    /// Frames the pulse spends inside the window, rounded to 0.1.
    pub frames_available: f32,
    /// Milliseconds of physical window, rounded to whole ms.
    pub ms_available: f32,
    /// Window plus fixed visual-processing and cognitive-decision delays,
    /// rounded to whole ms.
    pub total_reaction_time_ms: f32,
    /// True iff the total window meets the minimum human reaction time.
    pub is_human_playable: bool,
    /// Name of the phase at this score.
    pub phase_name: &'static str,
}

/// Analyze the reaction window for a given score.
///
/// Diagnostic only: consumed by the fairness harness and designer tooling,
/// never by the live game loop.
pub fn reaction_window_analysis(score: u32) -> ReactionWindow {
    let speed = speed_for_score(score);
    let tolerance = tolerance_for_score(score);

    let window_pixels = tolerance * 2.0;
    let frames_available = window_pixels / speed;
    let ms_available = frames_available * REFERENCE_FRAME_MS;
    let total_reaction_time_ms =
        ms_available + HUMAN_LIMITS.visual_processing_ms + HUMAN_LIMITS.cognitive_decision_ms;

    ReactionWindow {
        window_pixels,
        frames_available: (frames_available * 10.0).round() / 10.0,
        ms_available: ms_available.round(),
        total_reaction_time_ms: total_reaction_time_ms.round(),
        is_human_playable: total_reaction_time_ms >= HUMAN_LIMITS.min_reaction_time_ms,
        phase_name: phase_for_score(score).name,
    }
}

/// A single sample of the difficulty curve.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CurvePoint {
    pub score: u32,
    /// Speed rounded to 2 decimals.
    pub speed: f32,
    /// Tolerance rounded to 1 decimal.
    pub tolerance: f32,
    pub phase: &'static str,
    pub reaction_time_ms: f32,
    pub human_playable: bool,
}

/// Sample the curve from 0 to `max_score` at `step` intervals.
///
/// A `step` of 0 is treated as 1 to avoid an infinite loop.
pub fn curve_preview(max_score: u32, step: u32) -> Vec<CurvePoint> {
    let step = step.max(1);
    (0..=max_score)
        .step_by(step as usize)
        .map(|score| {
            let analysis = reaction_window_analysis(score);
            CurvePoint {
                score,
                speed: (speed_for_score(score) * 100.0).round() / 100.0,
                tolerance: (tolerance_for_score(score) * 10.0).round() / 10.0,
                phase: analysis.phase_name,
                reaction_time_ms: analysis.total_reaction_time_ms,
                human_playable: analysis.is_human_playable,
            }
        })
        .collect()
}
