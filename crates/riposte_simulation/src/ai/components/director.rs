//! Attack director components (boss attack state machine + tuning).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Committed-attack variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AttackPattern {
    /// Telegraph → dash straight at the defender
    HorizontalSlash,
    /// Telegraph → blink to a ring point around the defender → settle → dash
    FlashDash,
}

impl AttackPattern {
    /// Readable telegraph cue (UI text / voice line key)
    pub fn cue(&self) -> &'static str {
        match self {
            AttackPattern::HorizontalSlash => "Horizontal Slash!",
            AttackPattern::FlashDash => "Flash Dash!",
        }
    }

    pub fn repositions(&self) -> bool {
        matches!(self, AttackPattern::FlashDash)
    }
}

/// Director FSM. Timers live inside the phase: replacing the phase cancels them.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub enum DirectorPhase {
    /// Close distance, face the defender, wait for attack cooldown
    Approach,

    /// Windup with readable cue
    Telegraph {
        pattern: AttackPattern,
        remaining: f32,
    },

    /// FlashDash only: blink out, then settle before the dash
    Reposition {
        pattern: AttackPattern,
        destination: Vec3,
        blink_remaining: f32,
        settle_remaining: f32,
    },

    /// Fixed-duration lerp start → end. Parryable only here.
    Committed {
        pattern: AttackPattern,
        start: Vec3,
        end: Vec3,
        elapsed: f32,
        duration: f32,
    },

    /// Parry-stunned or lingering after the swing
    Resolved { remaining: f32, parried: bool },

    /// Pause before re-entering Approach
    Recovery { remaining: f32 },
}

impl Default for DirectorPhase {
    fn default() -> Self {
        Self::Approach
    }
}

/// What a cancellation interrupted (systems turn it into events).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupted {
    Telegraph(AttackPattern),
    Reposition(AttackPattern),
    Committed(AttackPattern),
}

/// Attack director (one per melee attacker).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(AttackTuning)]
pub struct AttackDirector {
    pub phase: DirectorPhase,
    /// Shared attack cooldown; decrements only while not attacking
    pub attack_cooldown_remaining: f32,
}

impl AttackDirector {
    /// Telegraph, Reposition or Committed.
    pub fn is_attacking(&self) -> bool {
        matches!(
            self.phase,
            DirectorPhase::Telegraph { .. }
                | DirectorPhase::Reposition { .. }
                | DirectorPhase::Committed { .. }
        )
    }

    pub fn is_committed(&self) -> bool {
        matches!(self.phase, DirectorPhase::Committed { .. })
    }

    pub fn current_pattern(&self) -> Option<AttackPattern> {
        match self.phase {
            DirectorPhase::Telegraph { pattern, .. }
            | DirectorPhase::Reposition { pattern, .. }
            | DirectorPhase::Committed { pattern, .. } => Some(pattern),
            _ => None,
        }
    }

    /// Force Resolved. Returns what was in flight (None if not attacking).
    pub fn cancel(&mut self, remaining: f32, parried: bool) -> Option<Interrupted> {
        let interrupted = match self.phase {
            DirectorPhase::Telegraph { pattern, .. } => Some(Interrupted::Telegraph(pattern)),
            DirectorPhase::Reposition { pattern, .. } => Some(Interrupted::Reposition(pattern)),
            DirectorPhase::Committed { pattern, .. } => Some(Interrupted::Committed(pattern)),
            _ => None,
        };
        self.phase = DirectorPhase::Resolved { remaining, parried };
        interrupted
    }
}

/// Параметры атак босса
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AttackTuning {
    /// Дистанция, с которой начинается атака (метры)
    pub attack_range: f32,
    pub approach_speed: f32,
    /// Скорость поворота к цели (slerp factor per second)
    pub turn_speed: f32,
    /// Shared cooldown между атаками (секунды)
    pub attack_cooldown: f32,
    pub enabled_patterns: Vec<AttackPattern>,
    pub slash_telegraph: f32,
    pub flash_telegraph: f32,
    pub dash_duration: f32,
    pub blink_duration: f32,
    pub settle_duration: f32,
    /// FlashDash ring around the defender: radius ± jitter
    pub ring_radius: f32,
    pub ring_jitter: f32,
    /// Dash ends this far in front of the defender
    pub dash_standoff: f32,
    pub swing_linger: f32,
    pub recovery: f32,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            attack_range: 10.0,
            approach_speed: 5.0,
            turn_speed: 5.0,
            attack_cooldown: 5.0,
            enabled_patterns: vec![AttackPattern::HorizontalSlash, AttackPattern::FlashDash],
            slash_telegraph: 1.1,
            flash_telegraph: 0.9,
            dash_duration: 0.3,
            blink_duration: 0.1,
            settle_duration: 0.55,
            ring_radius: 5.0,
            ring_jitter: 2.0,
            dash_standoff: 2.0,
            swing_linger: 0.5,
            recovery: 0.5,
        }
    }
}

impl AttackTuning {
    pub fn telegraph_duration(&self, pattern: AttackPattern) -> f32 {
        match pattern {
            AttackPattern::HorizontalSlash => self.slash_telegraph,
            AttackPattern::FlashDash => self.flash_telegraph,
        }
    }

    /// Only one pattern enabled (tests, scripted encounters).
    pub fn only(pattern: AttackPattern) -> Self {
        Self {
            enabled_patterns: vec![pattern],
            ..Default::default()
        }
    }
}
