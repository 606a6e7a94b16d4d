//! Difficulty diagnostic harness
//!
//! Standalone fairness report for the difficulty curve: verifies the speed
//! cap, the tolerance floor, human-playable reaction windows at the
//! critical scores, phase transitions, and mechanic gate boundaries, then
//! prints the curve preview. Intended for balancing passes, not shipped to
//! players.
//!
//! Usage: `pulse-tap-diag [--max N] [--step N] [--json]`

use std::process::ExitCode;

use pulse_tap::difficulty::{
    curve_preview, is_mechanic_active, phase_for_score, reaction_window_analysis, speed_for_score,
    tolerance_for_score, HUMAN_LIMITS, PARAMS,
};

/// Scores sampled by the cap/floor checks.
const TEST_SCORES: [u32; 12] = [0, 10, 20, 30, 40, 50, 75, 100, 150, 200, 500, 1000];

/// Scores the fairness regression validates reaction windows at.
const CRITICAL_SCORES: [u32; 8] = [0, 35, 60, 90, 130, 180, 250, 500];

/// Scores on both sides of every phase boundary.
const PHASE_TRANSITION_SCORES: [u32; 13] = [0, 15, 16, 35, 36, 60, 61, 90, 91, 130, 131, 180, 181];

struct Options {
    max_score: u32,
    step: u32,
    json: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut opts = Options {
        max_score: 200,
        step: 10,
        json: false,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => opts.json = true,
            "--max" => {
                let value = args.next().ok_or("--max requires a value")?;
                opts.max_score = value.parse().map_err(|_| format!("bad --max value: {value}"))?;
            }
            "--step" => {
                let value = args.next().ok_or("--step requires a value")?;
                opts.step = value.parse().map_err(|_| format!("bad --step value: {value}"))?;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(opts)
}

fn main() -> ExitCode {
    env_logger::init();

    let opts = match parse_args() {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: pulse-tap-diag [--max N] [--step N] [--json]");
            return ExitCode::FAILURE;
        }
    };

    if opts.json {
        let preview = curve_preview(opts.max_score, opts.step);
        match serde_json::to_string_pretty(&preview) {
            Ok(json) => {
                println!("{json}");
                return ExitCode::SUCCESS;
            }
            Err(err) => {
                eprintln!("failed to serialize preview: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    println!("PULSE TAP - DIFFICULTY PROGRESSION REPORT");
    println!("=========================================\n");

    let mut all_passed = true;

    if let Err(err) = PARAMS.validate() {
        println!("PARAMS INVALID: {err}\n");
        all_passed = false;
    }

    // Speed cap
    println!("Speed cap ({} px/frame):", PARAMS.max_speed);
    for score in TEST_SCORES {
        let speed = speed_for_score(score);
        let passed = speed <= PARAMS.max_speed;
        all_passed &= passed;
        println!(
            "  [{}] score {score:>4}: {speed:.2} px/frame",
            if passed { "ok" } else { "FAIL" }
        );
    }

    // Tolerance floor
    println!("\nTolerance floor ({} px):", PARAMS.min_tolerance);
    for score in TEST_SCORES {
        let tolerance = tolerance_for_score(score);
        let passed = tolerance >= PARAMS.min_tolerance;
        all_passed &= passed;
        println!(
            "  [{}] score {score:>4}: {tolerance:.1} px",
            if passed { "ok" } else { "FAIL" }
        );
    }

    // Reaction windows
    println!(
        "\nReaction windows (min human: {}ms, average: {}ms):",
        HUMAN_LIMITS.min_reaction_time_ms, HUMAN_LIMITS.average_reaction_time_ms
    );
    for score in CRITICAL_SCORES {
        let analysis = reaction_window_analysis(score);
        all_passed &= analysis.is_human_playable;
        println!(
            "  [{}] score {score:>4}: {:>4}ms total | {}",
            if analysis.is_human_playable { "ok" } else { "FAIL" },
            analysis.total_reaction_time_ms,
            analysis.phase_name
        );
    }

    // Phase transitions
    println!("\nPhase transitions:");
    for score in PHASE_TRANSITION_SCORES {
        let phase = phase_for_score(score);
        println!(
            "  score {score:>4}: {:<18} | speed {:.2} | tolerance {:.1} px",
            phase.name,
            speed_for_score(score),
            tolerance_for_score(score)
        );
    }

    // Mechanic gate boundaries
    println!("\nMechanic gates:");
    let gate_checks = [
        ("DOUBLE_PULSE", 90, false),
        ("DOUBLE_PULSE", 91, true),
        ("FAST_START", 90, false),
        ("FAST_START", 91, true),
        ("GHOST_PULSE", 130, false),
        ("GHOST_PULSE", 131, true),
        ("COLOR_VARIATION", 131, true),
    ];
    for (name, score, expected) in gate_checks {
        let active = is_mechanic_active(name, score);
        let passed = active == expected;
        all_passed &= passed;
        println!(
            "  [{}] {name} at {score}: {}",
            if passed { "ok" } else { "FAIL" },
            if active { "active" } else { "inactive" }
        );
    }

    // Curve preview
    println!("\nCurve preview (0..={} step {}):", opts.max_score, opts.step);
    println!("  score | speed | tolerance | reaction | phase");
    for point in curve_preview(opts.max_score, opts.step) {
        println!(
            "  {:>5} | {:>5.2} | {:>9.1} | {:>6}ms | {}{}",
            point.score,
            point.speed,
            point.tolerance,
            point.reaction_time_ms,
            point.phase,
            if point.human_playable { "" } else { "  (UNPLAYABLE)" }
        );
    }

    if all_passed {
        println!("\nAll checks passed.");
        ExitCode::SUCCESS
    } else {
        println!("\nSome checks FAILED.");
        ExitCode::FAILURE
    }
}
