//! AI module: attacker side of the duel
//!
//! - AttackDirector: boss FSM (Approach → Telegraph → [Reposition] → Committed → Resolved → Recovery)
//! - HomingProjectile: rockets, parryable пока не в стане
//!
//! AI только двигает Transform и выставляет IntendedMotion / is_parryable;
//! parry арбитраж живёт в combat.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::*;

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения (до combat, чтобы Kinematics видели свежий Transform):
/// 1. run_attack_directors — FSM боссов, dash lerp
/// 2. steer_homing_projectiles — полёт ракет, контактные попадания
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<AttackDirector>()
            .register_type::<AttackTuning>()
            .register_type::<HomingProjectile>();

        app.add_event::<TelegraphStarted>()
            .add_event::<TelegraphEnded>()
            .add_event::<CommittedStarted>()
            .add_event::<CommittedEnded>();

        app.add_systems(
            FixedUpdate,
            (systems::run_attack_directors, systems::steer_homing_projectiles)
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Attackers),
        );
    }
}
