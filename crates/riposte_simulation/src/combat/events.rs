//! Parry events.
//!
//! Input edges come from the host's input layer; everything else is emitted
//! by the core for animation/VFX/camera collaborators. Consumers decide clip,
//! VFX and camera-pulse mapping.

use bevy::prelude::*;

use crate::combat::ParryOutcome;

// ============================================================================
// Input → core
// ============================================================================

/// Guard button went down.
#[derive(Event, Debug, Clone, Copy)]
pub struct GuardStarted {
    pub defender: Entity,
}

/// Guard button went up.
#[derive(Event, Debug, Clone, Copy)]
pub struct GuardEnded {
    pub defender: Entity,
}

/// Parry button pressed (edge). Ignored unless the defender is Armed.
#[derive(Event, Debug, Clone, Copy)]
pub struct ParryPressed {
    pub defender: Entity,
}

/// Counter button pressed (edge). Ignored unless a counter window is open.
#[derive(Event, Debug, Clone, Copy)]
pub struct CounterPressed {
    pub defender: Entity,
}

/// Defender hit by something outside parry arbitration (hit reaction).
#[derive(Event, Debug, Clone, Copy)]
pub struct DefenderHit {
    pub defender: Entity,
    pub source: Option<Entity>,
}

/// Attacker hit (counter, environment). Cancels its telegraph/dash.
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackerHit {
    pub attacker: Entity,
    pub source: Option<Entity>,
}

// ============================================================================
// Core → animation / VFX / camera
// ============================================================================

/// Defender entered Armed (guard pose on).
#[derive(Event, Debug, Clone, Copy)]
pub struct ParryArmed {
    pub defender: Entity,
}

/// Defender left Armed without parrying (guard pose off).
#[derive(Event, Debug, Clone, Copy)]
pub struct ParryDisarmed {
    pub defender: Entity,
}

/// One resolution finished.
#[derive(Event, Debug, Clone, Copy)]
pub struct ParryResolved {
    pub defender: Entity,
    pub outcome: ParryOutcome,
    pub any_attacker_in_range: bool,
    pub counter_eligible: bool,
}

/// Attacker parried: stunned and knocked back.
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackerStunned {
    pub attacker: Entity,
    pub parried_by: Entity,
    /// Impulse applied away from the defender
    pub knockback: Vec3,
    pub duration: f32,
}

/// Counter opportunity opened after a clean parry.
#[derive(Event, Debug, Clone, Copy)]
pub struct CounterWindowOpened {
    pub defender: Entity,
    pub attacker: Entity,
    pub duration: f32,
}

/// Counter opportunity closed unused.
#[derive(Event, Debug, Clone, Copy)]
pub struct CounterWindowClosed {
    pub defender: Entity,
}

/// Counter executed (sting toward the attacker).
#[derive(Event, Debug, Clone, Copy)]
pub struct CounterAttack {
    pub defender: Entity,
    pub attacker: Entity,
    /// Unit direction from defender to attacker
    pub direction: Vec3,
}
