//! Reachability prediction: will one attacker enter the strike zone before
//! the parry commits, and does it come from a guardable side?
//!
//! # Decision ladder
//!
//! ```text
//! d = |attacker - defender| - half_extent
//!   d <= fail_distance            → Fail   (already hitting)
//!   d <= parry_range              → facing ? Success : Fail
//!   tta = d / max(speed, eps)
//!   tta < reaction_window         → Fail   (lands mid-animation)
//!   reach = d - speed * window
//!   reach <= parry_range          → facing ? Success : Fail
//!   otherwise                     → Miss   (will not arrive in time)
//! ```
//!
//! Facing: `dot(defender_forward, normalize(attacker - defender)) >= 0`.

use bevy::prelude::*;

use crate::components::Kinematics;
use crate::config::ParryConfig;

/// Per-attacker outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum Verdict {
    /// Attacker gets through (too close, too fast, or from behind)
    Fail,
    /// Attacker is parried
    Success,
    /// Attacker will not arrive during the parry (harmless swing)
    Miss,
}

/// Transient per-attacker result. Not persisted; the extra numbers exist for
/// diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReachabilityVerdict {
    pub verdict: Verdict,
    /// Corrected distance (half-extent already subtracted)
    pub distance: f32,
    /// Facing dot product (defender forward vs direction to attacker)
    pub facing_dot: f32,
    /// Only computed outside the guardable band
    pub time_to_arrival: Option<f32>,
    /// Distance left after the reaction window, outside the band only
    pub residual_distance: Option<f32>,
}

impl ReachabilityVerdict {
    fn new(verdict: Verdict, distance: f32, facing_dot: f32) -> Self {
        Self {
            verdict,
            distance,
            facing_dot,
            time_to_arrival: None,
            residual_distance: None,
        }
    }

    /// Attacker reached the guardable band and was parried.
    pub fn is_in_range(&self) -> bool {
        self.verdict == Verdict::Success
    }
}

/// Facing rule shared by the in-band and predicted-band checks.
fn facing_verdict(facing_dot: f32) -> Verdict {
    if facing_dot >= 0.0 {
        Verdict::Success
    } else {
        Verdict::Fail
    }
}

/// Predict how one attacker meets a parry started now.
///
/// Pure function: never panics, never produces NaN in its timing outputs.
/// Speed is clamped to `config.speed_epsilon` before dividing.
pub fn predict_reachability(
    defender_position: Vec3,
    defender_forward: Vec3,
    attacker: &Kinematics,
    half_extent: f32,
    config: &ParryConfig,
) -> ReachabilityVerdict {
    let offset = attacker.position - defender_position;
    let distance = offset.length() - half_extent.max(0.0);

    // Битые координаты: атакующий не может "долететь" — безопасный Miss
    if !distance.is_finite() {
        return ReachabilityVerdict::new(Verdict::Miss, distance, 0.0);
    }

    // 1. Already inside the hit radius
    if distance <= config.effective_fail_distance() {
        return ReachabilityVerdict::new(Verdict::Fail, distance, 0.0);
    }

    // 2. Front/back
    let facing_dot = defender_forward
        .normalize_or_zero()
        .dot(offset.normalize_or_zero());

    // 3. Guardable band
    if distance <= config.parry_range {
        return ReachabilityVerdict::new(facing_verdict(facing_dot), distance, facing_dot);
    }

    // 4. Outside the band: predict arrival
    let raw_speed = attacker.speed();
    let speed = if raw_speed.is_finite() {
        raw_speed.max(config.speed_epsilon)
    } else {
        config.speed_epsilon
    };

    let time_to_arrival = distance / speed;
    let mut result = ReachabilityVerdict::new(Verdict::Miss, distance, facing_dot);
    result.time_to_arrival = Some(time_to_arrival);

    if time_to_arrival < config.reaction_window {
        result.verdict = Verdict::Fail;
        return result;
    }

    let residual = distance - speed * config.reaction_window;
    result.residual_distance = Some(residual);

    if residual <= config.parry_range {
        result.verdict = facing_verdict(facing_dot);
    }

    result
}
