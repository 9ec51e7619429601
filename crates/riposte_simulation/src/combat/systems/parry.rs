//! Parry window systems: guard input, resolution, hit reactions, timers.

use bevy::prelude::*;
use bevy_rapier3d::prelude::ExternalImpulse;

use crate::combat::arbiter::arbitrate;
use crate::combat::{
    ApplyDamage, Attacker, AttackerRegistry, AttackerStunned, CounterWindowClosed,
    CounterWindowOpened, DefenderHit, GuardEnded, GuardStarted, ParryArmed, ParryDisarmed,
    ParryOutcome, ParryPressed, ParryResolved, ParryState, ParryStun,
};
use crate::components::{Defender, Kinematics};
use crate::config::ParryConfig;

/// System: guard input edges (Idle ⇄ Armed).
pub fn handle_guard_input(
    mut started: EventReader<GuardStarted>,
    mut ended: EventReader<GuardEnded>,
    mut defenders: Query<&mut ParryState, With<Defender>>,
    mut armed_events: EventWriter<ParryArmed>,
    mut disarmed_events: EventWriter<ParryDisarmed>,
) {
    for event in started.read() {
        let Ok(mut state) = defenders.get_mut(event.defender) else {
            continue;
        };
        if state.guard_start() {
            armed_events.write(ParryArmed {
                defender: event.defender,
            });
            crate::logger::log(&format!("🛡️ ECS: Guard up → Armed (defender: {:?})", event.defender));
        }
    }

    for event in ended.read() {
        let Ok(mut state) = defenders.get_mut(event.defender) else {
            continue;
        };
        if state.guard_end() {
            disarmed_events.write(ParryDisarmed {
                defender: event.defender,
            });
            crate::logger::log(&format!("🛡️ ECS: Guard down → Idle (defender: {:?})", event.defender));
        }
    }
}

/// System: resolve parry presses (Armed → Resolving → Cooldown in one call).
///
/// 1. Snapshot registry, every parryable attacker of this defender reports a verdict
/// 2. Arbiter folds verdicts (fail-contagion)
/// 3. Side effects in the same tick:
///    - Success: parried attackers get `ParryStun` + knockback `ExternalImpulse`,
///      counter window opens if a real attacker was in range
///    - Fail: every failing attacker applies its damage, defender takes a hit
///      reaction, spent rockets despawn
///
/// Presses while not Armed are dropped silently.
#[allow(clippy::too_many_arguments)]
pub fn resolve_parry_presses(
    mut presses: EventReader<ParryPressed>,
    mut defenders: Query<(&mut ParryState, &Kinematics), With<Defender>>,
    mut attackers: Query<(&mut Attacker, &Kinematics)>,
    registry: Res<AttackerRegistry>,
    config: Res<ParryConfig>,
    mut commands: Commands,
    mut resolved_events: EventWriter<ParryResolved>,
    mut stunned_events: EventWriter<AttackerStunned>,
    mut counter_events: EventWriter<CounterWindowOpened>,
    mut damage_events: EventWriter<ApplyDamage>,
) {
    for press in presses.read() {
        let defender = press.defender;
        let Ok((mut state, defender_kinematics)) = defenders.get_mut(defender) else {
            continue;
        };

        if !state.begin_resolution() {
            crate::logger::log(&format!(
                "⏱️ ECS: Parry press ignored (defender: {:?}, phase: {:?})",
                defender, state.phase
            ));
            continue;
        }
        let defender_kinematics = *defender_kinematics;

        // 1. Broadcast (snapshot — attacker пропал посреди broadcast'а → пропускаем)
        let mut reports = Vec::new();
        for entity in registry.snapshot() {
            let Ok((attacker, kinematics)) = attackers.get(entity) else {
                crate::logger::log(&format!("👻 ECS: Stale attacker skipped: {:?}", entity));
                continue;
            };
            if attacker.target != defender {
                continue;
            }
            let Some(verdict) = attacker.report_reachability(kinematics, &defender_kinematics, &config)
            else {
                continue;
            };

            crate::logger::log(&format!(
                "🎯 ECS: Reachability {:?} → {:?} (d: {:.2}, dot: {:.2}, tta: {:?}, residual: {:?})",
                entity,
                verdict.verdict,
                verdict.distance,
                verdict.facing_dot,
                verdict.time_to_arrival,
                verdict.residual_distance
            ));
            reports.push((entity, verdict));
        }

        // 2. Fold
        let result = arbitrate(reports, &config);
        state.finish_resolution(result.outcome, result.any_attacker_in_range, config.parry_cooldown);

        resolved_events.write(ParryResolved {
            defender,
            outcome: result.outcome,
            any_attacker_in_range: result.any_attacker_in_range,
            counter_eligible: result.is_counter_eligible(),
        });

        // 3. Side effects
        match result.outcome {
            ParryOutcome::Success => {
                for entity in result.parried_attackers() {
                    let Ok((mut attacker, kinematics)) = attackers.get_mut(entity) else {
                        continue;
                    };
                    attacker.is_parryable = false;
                    let knockback = attacker.knockback_from(kinematics.position, defender_kinematics.position);

                    commands.entity(entity).insert((
                        ParryStun::new(attacker.stun_duration, defender),
                        ExternalImpulse {
                            impulse: knockback,
                            ..Default::default()
                        },
                    ));
                    stunned_events.write(AttackerStunned {
                        attacker: entity,
                        parried_by: defender,
                        knockback,
                        duration: attacker.stun_duration,
                    });
                }

                if result.is_counter_eligible() {
                    if let Some(target) = result.parried_attackers().next() {
                        state.open_counter(target, config.counter_window);
                        counter_events.write(CounterWindowOpened {
                            defender,
                            attacker: target,
                            duration: config.counter_window,
                        });
                    }
                }

                crate::logger::log_info(&format!(
                    "💥 ECS: PARRY SUCCESS (defender: {:?}, parried: {}, in range: {})",
                    defender,
                    result.parried_attackers().count(),
                    result.any_attacker_in_range
                ));
            }
            ParryOutcome::Fail => {
                let mut hit = false;
                for entity in result.failed_attackers() {
                    let Ok((attacker, _)) = attackers.get(entity) else {
                        continue;
                    };
                    damage_events.write(ApplyDamage {
                        source: entity,
                        target: defender,
                        amount: attacker.damage,
                    });
                    if attacker.is_spent_on_hit() {
                        commands.entity(entity).despawn();
                    }
                    hit = true;
                }

                if hit {
                    state.absorb_failed_parry(config.hit_stun);
                }

                crate::logger::log_info(&format!(
                    "❌ ECS: PARRY FAIL (defender: {:?}, first failure: {:?}, withdrawn: {})",
                    defender,
                    result.first_failure(),
                    result.withdrawn_by_out_of_range
                ));
            }
            ParryOutcome::Pending => {}
        }
    }
}

/// System: external hit reactions on the defender (any state → Idle).
pub fn handle_defender_hits(
    mut hits: EventReader<DefenderHit>,
    mut defenders: Query<&mut ParryState, With<Defender>>,
    config: Res<ParryConfig>,
    mut disarmed_events: EventWriter<ParryDisarmed>,
) {
    for hit in hits.read() {
        let Ok(mut state) = defenders.get_mut(hit.defender) else {
            continue;
        };
        if state.take_hit(config.hit_stun) {
            disarmed_events.write(ParryDisarmed {
                defender: hit.defender,
            });
        }
        crate::logger::log(&format!(
            "🤕 ECS: Defender hit (defender: {:?}, source: {:?})",
            hit.defender, hit.source
        ));
    }
}

/// System: tick cooldown / hit-stun / counter timers.
pub fn tick_parry_states(
    mut defenders: Query<(Entity, &mut ParryState), With<Defender>>,
    time: Res<Time<Fixed>>,
    mut armed_events: EventWriter<ParryArmed>,
    mut counter_closed_events: EventWriter<CounterWindowClosed>,
) {
    let delta = time.delta_secs();

    for (defender, mut state) in defenders.iter_mut() {
        let tick = state.tick(delta);

        if tick.counter_expired.is_some() {
            counter_closed_events.write(CounterWindowClosed { defender });
            crate::logger::log(&format!("⏱️ ECS: Counter window closed (defender: {:?})", defender));
        }
        if tick.rearmed {
            armed_events.write(ParryArmed { defender });
        }
    }
}
