//! Parry-stun timers.

use bevy::prelude::*;

use crate::combat::{Attacker, ParryStun};

/// System: tick parry stuns, remove expired.
///
/// Rockets become parryable again when the stun ends; the boss stays
/// unparryable until its director commits the next dash.
pub fn update_parry_stuns(
    mut query: Query<(Entity, &mut ParryStun, &mut Attacker)>,
    time: Res<Time<Fixed>>,
    mut commands: Commands,
) {
    let delta = time.delta_secs();

    for (entity, mut stun, mut attacker) in query.iter_mut() {
        stun.timer -= delta;

        if stun.is_stunned() {
            continue;
        }

        commands.entity(entity).remove::<ParryStun>();
        if attacker.parryable_after_stun() {
            attacker.is_parryable = true;
        }
        crate::logger::log(&format!("✅ ECS: Parry stun ended (attacker: {:?})", entity));
    }
}
