//! Damage events.
//!
//! The core decides *who* gets hurt; the health bookkeeping below is the
//! minimal consumer. Hosts with their own damage pipeline read `ApplyDamage`
//! and skip `apply_damage`.

use bevy::prelude::*;

/// Событие: нанести урон
///
/// Emitted on parry Fail (defender takes the attacker's damage) and on a
/// counter (attacker takes counter damage).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyDamage {
    pub source: Entity,
    pub target: Entity,
    pub amount: u32,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Деспавн не автоматический — хост решает (death animation, fade-out).
#[derive(Component, Debug)]
pub struct Dead;
