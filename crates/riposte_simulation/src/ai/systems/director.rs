//! Attack director system (Approach → Telegraph → [Reposition] → Committed → Resolved → Recovery).

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::ai::{
    AttackDirector, AttackPattern, AttackTuning, CommittedEnded, CommittedStarted, DirectorPhase,
    Interrupted, TelegraphEnded, TelegraphStarted,
};
use crate::combat::{Attacker, AttackerHit, Dead, ParryStun};
use crate::components::{Defender, IntendedMotion};
use crate::DeterministicRng;

/// Горизонтальное направление from → to (y игнорируется)
fn flat_direction(from: Vec3, to: Vec3) -> Vec3 {
    Vec3::new(to.x - from.x, 0.0, to.z - from.z).normalize_or_zero()
}

/// Плавный поворот к цели (slerp, turn_speed в 1/сек)
fn turn_toward(transform: &mut Transform, target: Vec3, turn_speed: f32, delta: f32) {
    let direction = flat_direction(transform.translation, target);
    if direction == Vec3::ZERO {
        return;
    }
    let desired = transform.looking_to(direction, Vec3::Y).rotation;
    transform.rotation = transform
        .rotation
        .slerp(desired, (turn_speed * delta).clamp(0.0, 1.0));
}

/// Случайная точка на кольце вокруг defender'а (FlashDash)
fn ring_point(rng: &mut DeterministicRng, center: Vec3, height: f32, tuning: &AttackTuning) -> Vec3 {
    let angle = rng.rng.gen_range(0.0..TAU);
    let jitter = if tuning.ring_jitter > 0.0 {
        rng.rng.gen_range(-tuning.ring_jitter..=tuning.ring_jitter)
    } else {
        0.0
    };
    let radius = (tuning.ring_radius + jitter).max(0.0);
    Vec3::new(
        center.x + angle.cos() * radius,
        height,
        center.z + angle.sin() * radius,
    )
}

/// Система: attack directors
///
/// 1. Cancellation: ParryStun → Resolved(parried), AttackerHit → Resolved(linger)
/// 2. Phase step (timers inside the phase)
/// 3. IntendedMotion — намеренная скорость (dash lerp, approach), sampled для prediction
///
/// Attacker parryable только в Committed.
#[allow(clippy::too_many_arguments)]
pub fn run_attack_directors(
    mut directors: Query<
        (
            Entity,
            &mut AttackDirector,
            &AttackTuning,
            &mut Attacker,
            &mut Transform,
            &mut IntendedMotion,
            Option<&ParryStun>,
        ),
        Without<Dead>,
    >,
    targets: Query<&Transform, (With<Defender>, Without<AttackDirector>)>,
    mut hits: EventReader<AttackerHit>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut telegraph_started: EventWriter<TelegraphStarted>,
    mut telegraph_ended: EventWriter<TelegraphEnded>,
    mut committed_started: EventWriter<CommittedStarted>,
    mut committed_ended: EventWriter<CommittedEnded>,
) {
    let delta = time.delta_secs();
    let hit_attackers: Vec<Entity> = hits.read().map(|hit| hit.attacker).collect();

    for (entity, mut director, tuning, mut attacker, mut transform, mut motion, stun) in
        directors.iter_mut()
    {
        // 1. Cancellation
        let stunned = stun.is_some_and(|s| s.is_stunned());
        let interrupted = if stunned {
            let remaining = stun.map(|s| s.timer).unwrap_or(0.0);
            director.cancel(remaining, true)
        } else if hit_attackers.contains(&entity) && director.is_attacking() {
            director.cancel(tuning.swing_linger, false)
        } else {
            None
        };

        if let Some(interrupted) = interrupted {
            attacker.is_parryable = false;
            match interrupted {
                Interrupted::Telegraph(pattern) => {
                    telegraph_ended.write(TelegraphEnded {
                        attacker: entity,
                        pattern,
                        cancelled: true,
                    });
                }
                Interrupted::Committed(pattern) => {
                    committed_ended.write(CommittedEnded {
                        attacker: entity,
                        pattern,
                        interrupted: true,
                    });
                }
                Interrupted::Reposition(_) => {}
            }
            crate::logger::log(&format!(
                "🚫 AI: {:?} attack interrupted ({:?}, stunned: {})",
                entity, interrupted, stunned
            ));
        }

        // Knockback — физика, не director
        if stunned {
            *motion = IntendedMotion::physics_driven();
            continue;
        }

        let Ok(target_transform) = targets.get(attacker.target) else {
            *motion = IntendedMotion::moving(Vec3::ZERO);
            continue;
        };
        let defender_position = target_transform.translation;

        // 2. Phase step
        let mut velocity = Vec3::ZERO;
        let phase = director.phase;
        match phase {
            DirectorPhase::Approach => {
                director.attack_cooldown_remaining = (director.attack_cooldown_remaining - delta).max(0.0);
                turn_toward(&mut transform, defender_position, tuning.turn_speed, delta);

                let direction = flat_direction(transform.translation, defender_position);
                let offset = defender_position - transform.translation;
                let distance = Vec3::new(offset.x, 0.0, offset.z).length();

                if distance > tuning.attack_range {
                    let step = (tuning.approach_speed * delta).min(distance - tuning.attack_range);
                    transform.translation += direction * step;
                    velocity = direction * tuning.approach_speed;
                } else if director.attack_cooldown_remaining <= 0.0 && !tuning.enabled_patterns.is_empty() {
                    let index = rng.rng.gen_range(0..tuning.enabled_patterns.len());
                    let pattern = tuning.enabled_patterns[index];

                    director.attack_cooldown_remaining = tuning.attack_cooldown;
                    director.phase = DirectorPhase::Telegraph {
                        pattern,
                        remaining: tuning.telegraph_duration(pattern),
                    };
                    telegraph_started.write(TelegraphStarted {
                        attacker: entity,
                        pattern,
                        cue: pattern.cue(),
                    });
                    crate::logger::log(&format!("📢 AI: {:?} telegraphs {}", entity, pattern.cue()));
                }
            }

            DirectorPhase::Telegraph { pattern, remaining } => {
                turn_toward(&mut transform, defender_position, tuning.turn_speed, delta);
                let remaining = remaining - delta;

                if remaining > 0.0 {
                    director.phase = DirectorPhase::Telegraph { pattern, remaining };
                } else {
                    telegraph_ended.write(TelegraphEnded {
                        attacker: entity,
                        pattern,
                        cancelled: false,
                    });

                    if pattern.repositions() {
                        let destination =
                            ring_point(&mut rng, defender_position, transform.translation.y, tuning);
                        director.phase = DirectorPhase::Reposition {
                            pattern,
                            destination,
                            blink_remaining: tuning.blink_duration,
                            settle_remaining: tuning.settle_duration,
                        };
                    } else {
                        director.phase = commit(
                            entity,
                            pattern,
                            &mut attacker,
                            &transform,
                            defender_position,
                            tuning,
                            &mut committed_started,
                        );
                        velocity = dash_velocity(&director.phase);
                    }
                }
            }

            DirectorPhase::Reposition {
                pattern,
                destination,
                blink_remaining,
                settle_remaining,
            } => {
                if blink_remaining > 0.0 {
                    let blink_remaining = blink_remaining - delta;
                    if blink_remaining <= 0.0 {
                        // Телепорт (blink), без скорости
                        transform.translation = destination;
                        crate::logger::log(&format!("✨ AI: {:?} blinked to {:?}", entity, destination));
                    }
                    director.phase = DirectorPhase::Reposition {
                        pattern,
                        destination,
                        blink_remaining,
                        settle_remaining,
                    };
                } else {
                    turn_toward(&mut transform, defender_position, tuning.turn_speed, delta);
                    let settle_remaining = settle_remaining - delta;

                    if settle_remaining > 0.0 {
                        director.phase = DirectorPhase::Reposition {
                            pattern,
                            destination,
                            blink_remaining,
                            settle_remaining,
                        };
                    } else {
                        director.phase = commit(
                            entity,
                            pattern,
                            &mut attacker,
                            &transform,
                            defender_position,
                            tuning,
                            &mut committed_started,
                        );
                        velocity = dash_velocity(&director.phase);
                    }
                }
            }

            DirectorPhase::Committed {
                pattern,
                start,
                end,
                elapsed,
                duration,
            } => {
                let elapsed = elapsed + delta;
                let t = (elapsed / duration).min(1.0);
                transform.translation = start.lerp(end, t);

                if t < 1.0 {
                    director.phase = DirectorPhase::Committed {
                        pattern,
                        start,
                        end,
                        elapsed,
                        duration,
                    };
                    velocity = (end - start) / duration;
                } else {
                    attacker.is_parryable = false;
                    director.phase = DirectorPhase::Resolved {
                        remaining: tuning.swing_linger,
                        parried: false,
                    };
                    committed_ended.write(CommittedEnded {
                        attacker: entity,
                        pattern,
                        interrupted: false,
                    });
                }
            }

            DirectorPhase::Resolved { remaining, parried } => {
                let remaining = remaining - delta;
                director.phase = if remaining > 0.0 {
                    DirectorPhase::Resolved { remaining, parried }
                } else {
                    DirectorPhase::Recovery {
                        remaining: tuning.recovery,
                    }
                };
            }

            DirectorPhase::Recovery { remaining } => {
                director.attack_cooldown_remaining = (director.attack_cooldown_remaining - delta).max(0.0);
                let remaining = remaining - delta;
                director.phase = if remaining > 0.0 {
                    DirectorPhase::Recovery { remaining }
                } else {
                    DirectorPhase::Approach
                };
            }
        }

        // 3. Intended motion
        *motion = IntendedMotion::moving(velocity);
    }
}

/// Committed: фиксированный lerp до точки перед defender'ом
fn commit(
    entity: Entity,
    pattern: AttackPattern,
    attacker: &mut Attacker,
    transform: &Transform,
    defender_position: Vec3,
    tuning: &AttackTuning,
    committed_started: &mut EventWriter<CommittedStarted>,
) -> DirectorPhase {
    let start = transform.translation;
    let approach = flat_direction(start, defender_position);
    let approach = if approach == Vec3::ZERO {
        transform.forward().as_vec3()
    } else {
        approach
    };
    let end = Vec3::new(
        defender_position.x - approach.x * tuning.dash_standoff,
        start.y,
        defender_position.z - approach.z * tuning.dash_standoff,
    );
    let duration = tuning.dash_duration.max(f32::EPSILON);

    attacker.is_parryable = true;
    committed_started.write(CommittedStarted {
        attacker: entity,
        pattern,
        start,
        end,
    });
    crate::logger::log(&format!(
        "⚔️ AI: {:?} committed {:?} ({:?} → {:?}, {:.2}s)",
        entity, pattern, start, end, duration
    ));

    DirectorPhase::Committed {
        pattern,
        start,
        end,
        elapsed: 0.0,
        duration,
    }
}

fn dash_velocity(phase: &DirectorPhase) -> Vec3 {
    match phase {
        DirectorPhase::Committed {
            start, end, duration, ..
        } => (*end - *start) / *duration,
        _ => Vec3::ZERO,
    }
}
