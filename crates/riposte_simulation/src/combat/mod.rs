//! Combat module: parry arbitration core.
//!
//! ECS ответственность:
//! - ParryState: Idle → Armed → Resolving → Cooldown (one per defender)
//! - Reachability prediction per attacker + arbitration (fail-contagion)
//! - Side effects: parry stun, knockback, counter window, damage
//!
//! Host ответственность (input layer, animation, VFX, camera):
//! - Шлёт GuardStarted / GuardEnded / ParryPressed / CounterPressed
//! - Читает ParryArmed / ParryResolved / AttackerStunned / CounterAttack / ...
//!
//! Вся резолюция синхронная: press → verdict → side effects в одном тике.

use bevy::prelude::*;

pub mod arbiter;
pub mod components;
pub mod damage;
pub mod events;
pub mod reachability;
pub mod registry;
pub mod systems;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod arbiter_tests;

// Re-export основных типов
pub use arbiter::{arbitrate, Arbitration};
pub use components::*;
pub use damage::{ApplyDamage, Dead, EntityDied};
pub use events::*;
pub use reachability::{predict_reachability, ReachabilityVerdict, Verdict};
pub use registry::AttackerRegistry;

use crate::config::ParryConfig;
use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует parry системы в FixedUpdate (60Hz).
///
/// Порядок выполнения:
/// 1. sample_kinematics — Transform/Velocity → Kinematics snapshot
/// 2. register/deregister_attackers — registry в синхроне с Attacker
/// 3. handle_defender_hits — hit reactions до guard input
/// 4. handle_guard_input — Idle ⇄ Armed
/// 5. resolve_parry_presses — broadcast → arbitrate → side effects
/// 6. handle_counter_presses — sting
/// 7. tick_parry_states / update_parry_stuns — таймеры
/// 8. apply_damage — Health bookkeeping
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParryConfig>()
            .init_resource::<AttackerRegistry>()
            .register_type::<ParryState>()
            .register_type::<Attacker>()
            .register_type::<ParryStun>()
            .register_type::<ParryConfig>();

        // Регистрация событий
        app.add_event::<GuardStarted>()
            .add_event::<GuardEnded>()
            .add_event::<ParryPressed>()
            .add_event::<CounterPressed>()
            .add_event::<DefenderHit>()
            .add_event::<AttackerHit>()
            .add_event::<ParryArmed>()
            .add_event::<ParryDisarmed>()
            .add_event::<ParryResolved>()
            .add_event::<AttackerStunned>()
            .add_event::<CounterWindowOpened>()
            .add_event::<CounterWindowClosed>()
            .add_event::<CounterAttack>()
            .add_event::<ApplyDamage>()
            .add_event::<EntityDied>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: snapshot кинематики + registry
                systems::sample_kinematics,
                registry::register_attackers,
                registry::deregister_attackers,
                // Фаза 2: input → parry state
                systems::handle_defender_hits,
                systems::handle_guard_input,
                systems::resolve_parry_presses,
                systems::handle_counter_presses,
                // Фаза 3: таймеры
                systems::tick_parry_states,
                systems::update_parry_stuns,
                // Фаза 4: урон
                systems::apply_damage,
            )
                .chain() // Последовательное выполнение
                .in_set(SimulationSet::Combat),
        );
    }
}
