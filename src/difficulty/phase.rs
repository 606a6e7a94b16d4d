//! Named difficulty phases
//!
//! An ordered table of contiguous, non-overlapping score ranges. Every
//! non-negative score maps to exactly one phase; the last phase is
//! open-ended. Phases carry display metadata for the HUD (name, icon id,
//! color, feature badges). Gameplay logic consults mechanic thresholds
//! independently, never this table.

use serde::{Deserialize, Serialize};

/// Stable phase identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseId {
    Learning,
    Acceleration,
    Precision,
    TightWindow,
    Patterns,
    Cognitive,
    Mastery,
}

/// A named score-range bucket with display identity.
///
/// Icon and color are opaque string keys; resolving them to actual UI
/// assets is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyPhase {
    pub id: PhaseId,
    pub name: &'static str,
    pub min_score: u32,
    pub max_score: u32,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    /// HUD badge text only, not consumed by gameplay logic.
    pub features: &'static [&'static str],
}

impl DifficultyPhase {
    /// Whether this phase's score range contains `score`.
    pub fn contains(&self, score: u32) -> bool {
        score >= self.min_score && score <= self.max_score
    }
}

/// The phase table, ordered by ascending `min_score`.
pub static PHASES: [DifficultyPhase; 7] = [
    DifficultyPhase {
        id: PhaseId::Learning,
        name: "Learning",
        min_score: 0,
        max_score: 15,
        description: "Understanding timing mechanics",
        icon: "target",
        color: "#60a5fa",
        features: &["Pure timing practice", "Full tolerance", "Speed ramping up"],
    },
    DifficultyPhase {
        id: PhaseId::Acceleration,
        name: "Acceleration",
        min_score: 16,
        max_score: 35,
        description: "Speed challenge",
        icon: "bolt",
        color: "#34d399",
        features: &["Speed reaches maximum", "Full tolerance", "No gimmicks"],
    },
    DifficultyPhase {
        id: PhaseId::Precision,
        name: "Precision Era",
        min_score: 36,
        max_score: 60,
        description: "Accuracy over speed",
        icon: "tent",
        color: "#fbbf24",
        features: &["Speed locked", "Tolerance reducing", "Precision required"],
    },
    DifficultyPhase {
        id: PhaseId::TightWindow,
        name: "Tight Window",
        min_score: 61,
        max_score: 90,
        description: "Mastery-level accuracy",
        icon: "gem",
        color: "#a855f7",
        features: &["Speed locked", "Minimal tolerance", "Consistent excellence"],
    },
    DifficultyPhase {
        id: PhaseId::Patterns,
        name: "Pattern Complexity",
        min_score: 91,
        max_score: 130,
        description: "Rhythm variation",
        icon: "cyclone",
        color: "#ec4899",
        features: &["Double pulses", "Speed variation", "Mental challenge"],
    },
    DifficultyPhase {
        id: PhaseId::Cognitive,
        name: "Cognitive Load",
        min_score: 131,
        max_score: 180,
        description: "Focus and perception",
        icon: "brain",
        color: "#f97316",
        features: &["Ghost pulses", "Visual distractions", "Focus test"],
    },
    DifficultyPhase {
        id: PhaseId::Mastery,
        name: "Mastery Chaos",
        min_score: 181,
        max_score: u32::MAX,
        description: "Endurance and expertise",
        icon: "crown",
        color: "#fbbf24",
        features: &["All mechanics", "Maximum difficulty", "True mastery"],
    },
];

/// Get the difficulty phase for a given score.
///
/// Falls back to the last (highest) phase if no range matches. With the
/// shipped table that branch is unreachable since Mastery is open-ended,
/// so a miss indicates a misconfigured table and is logged.
pub fn phase_for_score(score: u32) -> &'static DifficultyPhase {
    PHASES.iter().find(|phase| phase.contains(score)).unwrap_or_else(|| {
        log::warn!("no phase covers score {score}; falling back to last phase");
        &PHASES[PHASES.len() - 1]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_ordered_and_contiguous() {
        for pair in PHASES.windows(2) {
            assert!(pair[0].min_score < pair[1].min_score);
            assert_eq!(pair[0].max_score + 1, pair[1].min_score);
        }
        assert_eq!(PHASES[0].min_score, 0);
        assert_eq!(PHASES[PHASES.len() - 1].max_score, u32::MAX);
    }

    #[test]
    fn test_every_score_maps_to_exactly_one_phase() {
        for score in 0..=1000u32 {
            let matching = PHASES.iter().filter(|p| p.contains(score)).count();
            assert_eq!(matching, 1, "score {score} matched {matching} phases");
        }
    }

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(phase_for_score(0).id, PhaseId::Learning);
        assert_eq!(phase_for_score(15).id, PhaseId::Learning);
        assert_eq!(phase_for_score(16).id, PhaseId::Acceleration);
        assert_eq!(phase_for_score(35).id, PhaseId::Acceleration);
        assert_eq!(phase_for_score(36).id, PhaseId::Precision);
        assert_eq!(phase_for_score(60).id, PhaseId::Precision);
        assert_eq!(phase_for_score(61).id, PhaseId::TightWindow);
        assert_eq!(phase_for_score(90).id, PhaseId::TightWindow);
        assert_eq!(phase_for_score(91).id, PhaseId::Patterns);
        assert_eq!(phase_for_score(130).id, PhaseId::Patterns);
        assert_eq!(phase_for_score(131).id, PhaseId::Cognitive);
        assert_eq!(phase_for_score(180).id, PhaseId::Cognitive);
        assert_eq!(phase_for_score(181).id, PhaseId::Mastery);
        assert_eq!(phase_for_score(u32::MAX).id, PhaseId::Mastery);
    }

    #[test]
    fn test_phase_contains_own_boundaries() {
        for phase in &PHASES {
            assert!(phase.contains(phase.min_score));
            assert!(phase.contains(phase.max_score));
        }
    }
}
