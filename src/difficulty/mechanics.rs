//! Mechanic gating and probabilistic triggers
//!
//! Optional gameplay twists layered on top of the base speed/tolerance
//! curve. Each mechanic has a hard score threshold; past the threshold its
//! trigger is an independent uniform draw per invocation. Draws take the
//! RNG by argument so tests can inject a seeded generator. Below the
//! threshold no draw is consumed at all.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::params::PARAMS;

/// Optional gameplay twist unlocked past a score threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mechanic {
    /// Two concentric pulses in flight at once.
    DoublePulse,
    /// Pulse begins partway expanded, shortening the reaction window.
    FastStart,
    /// Decoy pulse that must not be tapped.
    GhostPulse,
    /// Screen flash on long streaks.
    Distraction,
    /// Pulse color no longer matches the target ring.
    ColorVariation,
}

impl Mechanic {
    /// Parse a mechanic from its wire/config name. Unknown names yield
    /// `None` rather than an error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DOUBLE_PULSE" => Some(Mechanic::DoublePulse),
            "FAST_START" => Some(Mechanic::FastStart),
            "GHOST_PULSE" => Some(Mechanic::GhostPulse),
            "DISTRACTION" => Some(Mechanic::Distraction),
            "COLOR_VARIATION" => Some(Mechanic::ColorVariation),
            _ => None,
        }
    }

    /// Score at which this mechanic unlocks.
    pub fn start_score(self) -> u32 {
        match self {
            Mechanic::DoublePulse | Mechanic::FastStart => PARAMS.double_pulse_start_score,
            Mechanic::GhostPulse | Mechanic::Distraction => PARAMS.ghost_pulse_start_score,
            Mechanic::ColorVariation => PARAMS.color_variation_start_score,
        }
    }

    /// Whether this mechanic is unlocked at `score`.
    pub fn is_active(self, score: u32) -> bool {
        score >= self.start_score()
    }
}

/// String-keyed activation check; unknown mechanic names are inactive.
pub fn is_mechanic_active(name: &str, score: u32) -> bool {
    Mechanic::from_name(name).is_some_and(|m| m.is_active(score))
}

/// Whether the next pulse should be a double pulse.
pub fn should_spawn_double_pulse(score: u32, rng: &mut impl Rng) -> bool {
    if !Mechanic::DoublePulse.is_active(score) {
        return false;
    }
    rng.random::<f32>() < PARAMS.double_pulse_chance
}

/// Starting radius for the next pulse.
///
/// 0 unless fast-start is unlocked and its draw triggers, in which case the
/// pulse begins partway expanded.
pub fn pulse_start_radius(score: u32, rng: &mut impl Rng) -> f32 {
    if !Mechanic::FastStart.is_active(score) {
        return 0.0;
    }
    if rng.random::<f32>() < PARAMS.fast_start_pulse_chance {
        PARAMS.fast_start_radius
    } else {
        0.0
    }
}

/// Whether to spawn a ghost pulse (a visual distraction that must not be
/// tapped) alongside the next real pulse.
pub fn should_spawn_ghost_pulse(score: u32, rng: &mut impl Rng) -> bool {
    if !Mechanic::GhostPulse.is_active(score) {
        return false;
    }
    rng.random::<f32>() < PARAMS.ghost_pulse_chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_gate_boundaries() {
        assert!(!is_mechanic_active("DOUBLE_PULSE", 90));
        assert!(is_mechanic_active("DOUBLE_PULSE", 91));
        assert!(!is_mechanic_active("FAST_START", 90));
        assert!(is_mechanic_active("FAST_START", 91));
        assert!(!is_mechanic_active("GHOST_PULSE", 130));
        assert!(is_mechanic_active("GHOST_PULSE", 131));
        assert!(!is_mechanic_active("DISTRACTION", 130));
        assert!(is_mechanic_active("DISTRACTION", 131));
        assert!(!is_mechanic_active("COLOR_VARIATION", 130));
        assert!(is_mechanic_active("COLOR_VARIATION", 131));
    }

    #[test]
    fn test_unknown_mechanic_is_inactive() {
        assert!(!is_mechanic_active("TRIPLE_PULSE", 100_000));
        assert!(!is_mechanic_active("", 100_000));
        assert_eq!(Mechanic::from_name("double_pulse"), None);
    }

    #[test]
    fn test_no_trigger_below_threshold() {
        let mut rng = Pcg32::seed_from_u64(42);
        for score in [0, 50, 90] {
            for _ in 0..100 {
                assert!(!should_spawn_double_pulse(score, &mut rng));
                assert_eq!(pulse_start_radius(score, &mut rng), 0.0);
            }
        }
        for score in [0, 91, 130] {
            for _ in 0..100 {
                assert!(!should_spawn_ghost_pulse(score, &mut rng));
            }
        }
    }

    #[test]
    fn test_no_draw_consumed_below_threshold() {
        // Gated-off calls must not advance the RNG
        let mut rng = Pcg32::seed_from_u64(7);
        let snapshot = rng.clone();
        should_spawn_double_pulse(90, &mut rng);
        pulse_start_radius(90, &mut rng);
        should_spawn_ghost_pulse(130, &mut rng);
        assert_eq!(rng, snapshot);
    }

    #[test]
    fn test_trigger_rates_above_threshold() {
        const DRAWS: u32 = 10_000;
        let mut rng = Pcg32::seed_from_u64(12345);

        let doubles = (0..DRAWS)
            .filter(|_| should_spawn_double_pulse(200, &mut rng))
            .count();
        let ghosts = (0..DRAWS)
            .filter(|_| should_spawn_ghost_pulse(200, &mut rng))
            .count();
        let fast_starts = (0..DRAWS)
            .filter(|_| pulse_start_radius(200, &mut rng) > 0.0)
            .count();

        // Loose bands around the configured 0.15 / 0.1 / 0.2 rates
        assert!((1000..2000).contains(&doubles), "double rate off: {doubles}");
        assert!((500..1500).contains(&ghosts), "ghost rate off: {ghosts}");
        assert!((1500..2500).contains(&fast_starts), "fast-start rate off: {fast_starts}");
    }

    #[test]
    fn test_fast_start_radius_value() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..1000 {
            let radius = pulse_start_radius(200, &mut rng);
            assert!(radius == 0.0 || radius == PARAMS.fast_start_radius);
        }
    }
}
