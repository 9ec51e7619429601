//! Homing projectile flight.

use bevy::prelude::*;

use crate::ai::HomingProjectile;
use crate::combat::{ApplyDamage, Attacker, AttackerHit, Dead, DefenderHit, ParryStun};
use crate::components::{Defender, IntendedMotion};

/// Система: rockets летят к цели
///
/// - ParryStun → knockback физикой (IntendedMotion = None), потом снова homing
/// - Контакт с defender'ом (долетает за тик) → ApplyDamage + DefenderHit, despawn
/// - AttackerHit (counter) → rocket уничтожен
/// - Цель пропала → зависает на месте
#[allow(clippy::too_many_arguments)]
pub fn steer_homing_projectiles(
    mut rockets: Query<
        (
            Entity,
            &HomingProjectile,
            &Attacker,
            &mut Transform,
            &mut IntendedMotion,
            Option<&ParryStun>,
        ),
        Without<Dead>,
    >,
    targets: Query<&Transform, (With<Defender>, Without<HomingProjectile>)>,
    mut hits: EventReader<AttackerHit>,
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut damage_events: EventWriter<ApplyDamage>,
    mut defender_hits: EventWriter<DefenderHit>,
) {
    let delta = time.delta_secs();
    let hit_attackers: Vec<Entity> = hits.read().map(|hit| hit.attacker).collect();

    for (entity, rocket, attacker, mut transform, mut motion, stun) in rockets.iter_mut() {
        if hit_attackers.contains(&entity) {
            commands.entity(entity).despawn();
            crate::logger::log(&format!("💨 AI: Rocket {:?} destroyed by counter", entity));
            continue;
        }

        if stun.is_some_and(|s| s.is_stunned()) {
            *motion = IntendedMotion::physics_driven();
            continue;
        }

        let Ok(target_transform) = targets.get(attacker.target) else {
            *motion = IntendedMotion::moving(Vec3::ZERO);
            continue;
        };

        let offset = target_transform.translation - transform.translation;
        let direction = offset.normalize_or_zero();
        let remaining = offset.length() - attacker.half_extent;
        let travel = rocket.speed * delta;

        // Долетает в этом тике → контакт
        if remaining <= travel {
            damage_events.write(ApplyDamage {
                source: entity,
                target: attacker.target,
                amount: attacker.damage,
            });
            defender_hits.write(DefenderHit {
                defender: attacker.target,
                source: Some(entity),
            });
            commands.entity(entity).despawn();
            crate::logger::log(&format!(
                "🚀 AI: Rocket {:?} hit defender {:?}",
                entity, attacker.target
            ));
            continue;
        }

        transform.translation += direction * travel;
        if direction != Vec3::ZERO {
            transform.look_to(direction, Vec3::Y);
        }
        *motion = IntendedMotion::moving(direction * rocket.speed);
    }
}
