//! AI Events — attack lifecycle для animation/VFX/UI
//!
//! Director шлёт их на входе/выходе из Telegraph и Committed.
//! Consumers решают сами: клипы, текстовый cue, звук.

use bevy::prelude::*;

use crate::ai::AttackPattern;

/// Windup начался (readable cue)
#[derive(Event, Debug, Clone)]
pub struct TelegraphStarted {
    pub attacker: Entity,
    pub pattern: AttackPattern,
    pub cue: &'static str,
}

/// Windup закончился (или был прерван хитом/парированием)
#[derive(Event, Debug, Clone)]
pub struct TelegraphEnded {
    pub attacker: Entity,
    pub pattern: AttackPattern,
    pub cancelled: bool,
}

/// Dash начался: атакующий parryable до CommittedEnded
#[derive(Event, Debug, Clone)]
pub struct CommittedStarted {
    pub attacker: Entity,
    pub pattern: AttackPattern,
    pub start: Vec3,
    pub end: Vec3,
}

/// Dash закончился (`interrupted` — парирование или хит)
#[derive(Event, Debug, Clone)]
pub struct CommittedEnded {
    pub attacker: Entity,
    pub pattern: AttackPattern,
    pub interrupted: bool,
}
