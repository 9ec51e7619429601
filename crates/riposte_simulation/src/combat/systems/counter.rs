//! Counter attack (sting) after a clean parry.

use bevy::prelude::*;

use crate::combat::{ApplyDamage, AttackerHit, CounterAttack, CounterPressed, ParryState};
use crate::components::{Defender, Kinematics};
use crate::config::ParryConfig;

/// System: counter presses consume the open window.
///
/// Damage lands on press (no travel time). Attacker despawned while the
/// window was open → window closes silently, nothing is emitted.
pub fn handle_counter_presses(
    mut presses: EventReader<CounterPressed>,
    mut defenders: Query<(&mut ParryState, &Kinematics), With<Defender>>,
    targets: Query<&Kinematics, Without<Defender>>,
    config: Res<ParryConfig>,
    mut counter_events: EventWriter<CounterAttack>,
    mut damage_events: EventWriter<ApplyDamage>,
    mut hit_events: EventWriter<AttackerHit>,
) {
    for press in presses.read() {
        let defender = press.defender;
        let Ok((mut state, defender_kinematics)) = defenders.get_mut(defender) else {
            continue;
        };

        let Some(attacker) = state.try_counter(config.counter_recovery) else {
            continue;
        };

        let Ok(attacker_kinematics) = targets.get(attacker) else {
            crate::logger::log(&format!(
                "👻 ECS: Counter target gone (defender: {:?}, attacker: {:?})",
                defender, attacker
            ));
            continue;
        };

        let direction = (attacker_kinematics.position - defender_kinematics.position).normalize_or_zero();

        counter_events.write(CounterAttack {
            defender,
            attacker,
            direction,
        });
        damage_events.write(ApplyDamage {
            source: defender,
            target: attacker,
            amount: config.counter_damage,
        });
        hit_events.write(AttackerHit {
            attacker,
            source: Some(defender),
        });

        crate::logger::log_info(&format!(
            "⚔️ ECS: COUNTER (defender: {:?} → attacker: {:?}, damage: {})",
            defender, attacker, config.counter_damage
        ));
    }
}
