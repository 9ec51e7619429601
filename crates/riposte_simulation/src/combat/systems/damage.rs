//! Damage application (minimal Health consumer).

use bevy::prelude::*;

use crate::combat::{ApplyDamage, Dead, EntityDied};
use crate::components::Health;

/// Система: apply damage от ApplyDamage событий
///
/// 1. Читаем ApplyDamage события
/// 2. Применяем к Health (saturating)
/// 3. На нуле HP — маркер Dead + EntityDied
///
/// Мёртвые цели и entity без Health пропускаются.
pub fn apply_damage(
    mut damage_events: EventReader<ApplyDamage>,
    mut entity_died_events: EventWriter<EntityDied>,
    mut targets: Query<&mut Health, Without<Dead>>,
    mut commands: Commands,
) {
    for event in damage_events.read() {
        let Ok(mut health) = targets.get_mut(event.target) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        health.take_damage(event.amount);
        crate::logger::log(&format!(
            "💥 Damage dealt (source: {:?}, target: {:?}, amount: {}, HP: {}/{})",
            event.source, event.target, event.amount, health.current, health.max
        ));

        if !health.is_alive() {
            commands.entity(event.target).insert(Dead);
            entity_died_events.write(EntityDied {
                entity: event.target,
                killer: Some(event.source),
            });
            crate::logger::log_info(&format!("☠️ Entity died: {:?}", event.target));
        }
    }
}
