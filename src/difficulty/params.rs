//! Tunable difficulty parameters and biological reaction-time limits
//!
//! All curve behavior is driven by the single process-wide [`PARAMS`]
//! constant. Speed creates stress (capped at human limits), precision
//! creates mastery (tolerance reduction), patterns create depth.

use serde::Serialize;

/// Biologically-grounded reaction time bounds, in milliseconds.
///
/// Used only for fairness analysis and the diagnostic harness. These never
/// feed back into the curve itself.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HumanLimits {
    /// Below ~100ms play becomes guess-based; skilled rhythm players
    /// manage 120-150ms.
    pub min_reaction_time_ms: f32,
    /// Average visual reaction time (200-250ms for most players).
    pub average_reaction_time_ms: f32,
    /// Visual processing delay.
    pub visual_processing_ms: f32,
    /// Cognitive decision delay.
    pub cognitive_decision_ms: f32,
    /// Motor response delay.
    pub motor_response_ms: f32,
}

/// Shipped human-limit constants.
pub const HUMAN_LIMITS: HumanLimits = HumanLimits {
    min_reaction_time_ms: 120.0,
    average_reaction_time_ms: 200.0,
    visual_processing_ms: 80.0,
    cognitive_decision_ms: 50.0,
    motor_response_ms: 60.0,
};

/// The tunable knobs of the difficulty curve.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DifficultyParams {
    // Speed
    /// Starting pulse expansion speed (pixels/frame).
    pub initial_speed: f32,
    /// Biological cap; allows a 150-180ms reaction window.
    pub max_speed: f32,
    /// Exponential growth factor (higher = faster approach to cap).
    pub speed_curve_steepness: f32,

    // Tolerance
    /// Starting timing window half-width (pixels).
    pub initial_tolerance: f32,
    /// Minimum playable tolerance (pixels).
    pub min_tolerance: f32,
    /// Score at which tolerance reduction begins.
    pub tolerance_reduction_start: u32,
    /// Score at which tolerance reaches minimum.
    pub tolerance_reduction_end: u32,

    // Pattern complexity
    pub double_pulse_start_score: u32,
    pub double_pulse_chance: f32,
    pub fast_start_pulse_chance: f32,
    /// Radius a fast-start pulse begins at instead of 0.
    pub fast_start_radius: f32,

    // Cognitive load
    pub ghost_pulse_start_score: u32,
    pub ghost_pulse_chance: f32,
    /// Streak length that triggers a distraction flash.
    pub distraction_flash_streak: u32,

    // Visual effects
    pub color_variation_start_score: u32,
    pub fake_pulse_chance: f32,
}

/// Shipped difficulty parameters. Values are load-bearing: the phase table
/// and the regression suite assume exactly these numbers.
pub const PARAMS: DifficultyParams = DifficultyParams {
    initial_speed: 1.5,
    max_speed: 4.5,
    speed_curve_steepness: 0.08,

    initial_tolerance: 20.0,
    min_tolerance: 10.0,
    tolerance_reduction_start: 36,
    tolerance_reduction_end: 180,

    double_pulse_start_score: 91,
    double_pulse_chance: 0.15,
    fast_start_pulse_chance: 0.2,
    fast_start_radius: 40.0,

    ghost_pulse_start_score: 131,
    ghost_pulse_chance: 0.1,
    distraction_flash_streak: 10,

    color_variation_start_score: 131,
    fake_pulse_chance: 0.08,
};

impl DifficultyParams {
    /// Check the structural invariants the curve functions rely on.
    ///
    /// Returns the first violated invariant, if any. The diagnostic binary
    /// runs this before reporting on the curve.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_speed <= self.initial_speed {
            return Err(format!(
                "max_speed ({}) must exceed initial_speed ({})",
                self.max_speed, self.initial_speed
            ));
        }
        if self.speed_curve_steepness <= 0.0 {
            return Err(format!(
                "speed_curve_steepness ({}) must be positive",
                self.speed_curve_steepness
            ));
        }
        if self.initial_tolerance <= self.min_tolerance {
            return Err(format!(
                "initial_tolerance ({}) must exceed min_tolerance ({})",
                self.initial_tolerance, self.min_tolerance
            ));
        }
        if self.tolerance_reduction_end <= self.tolerance_reduction_start {
            return Err(format!(
                "tolerance_reduction_end ({}) must exceed tolerance_reduction_start ({})",
                self.tolerance_reduction_end, self.tolerance_reduction_start
            ));
        }
        for (name, chance) in [
            ("double_pulse_chance", self.double_pulse_chance),
            ("fast_start_pulse_chance", self.fast_start_pulse_chance),
            ("ghost_pulse_chance", self.ghost_pulse_chance),
            ("fake_pulse_chance", self.fake_pulse_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(format!("{name} ({chance}) must be within [0, 1]"));
            }
        }
        Ok(())
    }
}
