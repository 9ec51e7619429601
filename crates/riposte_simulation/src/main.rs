//! Headless дуэль RIPOSTE
//!
//! Boss + rocket против defender'а со скриптованным input'ом:
//! guard держится всё время, parry жмётся на каждом CommittedStarted босса,
//! counter — сразу как откроется окно.
//!
//! Usage: `riposte_simulation [seed] [config.ron]`

use bevy::prelude::*;
use riposte_simulation::ai::{CommittedStarted, TelegraphStarted};
use riposte_simulation::combat::{
    CounterPressed, CounterWindowOpened, GuardStarted, ParryPressed, ParryResolved,
};
use riposte_simulation::{
    boss_bundle, create_headless_app, defender_bundle, init_logger, log_error, log_info, rocket_bundle,
    set_log_level, AttackTuning, LogLevel, EntityDied, Defender, Health, ParryConfig,
};

/// Скриптованный input: что нажать на следующем тике
#[derive(Resource, Default)]
struct ScriptedInput {
    parry_next_tick: bool,
    counter_next_tick: bool,
}

/// Счётчики для итогового отчёта
#[derive(Resource, Default, Debug)]
struct DuelStats {
    telegraphs: u32,
    parries: u32,
    successes: u32,
    counters: u32,
    deaths: u32,
}

fn scripted_defender(
    mut input: ResMut<ScriptedInput>,
    defenders: Query<Entity, With<Defender>>,
    mut parry_events: EventWriter<ParryPressed>,
    mut counter_events: EventWriter<CounterPressed>,
) {
    let Ok(defender) = defenders.single() else {
        return;
    };
    if input.parry_next_tick {
        input.parry_next_tick = false;
        parry_events.write(ParryPressed { defender });
    }
    if input.counter_next_tick {
        input.counter_next_tick = false;
        counter_events.write(CounterPressed { defender });
    }
}

fn watch_duel(
    mut input: ResMut<ScriptedInput>,
    mut stats: ResMut<DuelStats>,
    mut telegraphs: EventReader<TelegraphStarted>,
    mut committed: EventReader<CommittedStarted>,
    mut resolved: EventReader<ParryResolved>,
    mut counter_windows: EventReader<CounterWindowOpened>,
    mut deaths: EventReader<EntityDied>,
) {
    for event in telegraphs.read() {
        stats.telegraphs += 1;
        log_info(&format!("📢 {} ({:?})", event.cue, event.attacker));
    }
    if committed.read().count() > 0 {
        input.parry_next_tick = true;
    }
    for event in resolved.read() {
        stats.parries += 1;
        if event.counter_eligible {
            stats.successes += 1;
        }
    }
    for _ in counter_windows.read() {
        input.counter_next_tick = true;
        stats.counters += 1;
    }
    for event in deaths.read() {
        stats.deaths += 1;
        log_info(&format!("☠️ {:?} died (killer: {:?})", event.entity, event.killer));
    }
}

fn main() {
    init_logger();
    set_log_level(LogLevel::Info);
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    println!("Starting RIPOSTE headless duel (seed: {})", seed);

    let config = match args.next() {
        Some(path) => match ParryConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Config error: {err}"));
                std::process::exit(1);
            }
        },
        None => ParryConfig::default(),
    };

    let mut app = create_headless_app(seed);
    app.insert_resource(config)
        .init_resource::<ScriptedInput>()
        .init_resource::<DuelStats>()
        .add_systems(FixedPreUpdate, scripted_defender)
        .add_systems(FixedPostUpdate, watch_duel);

    let world = app.world_mut();
    let defender = world
        .spawn(defender_bundle(Vec3::ZERO, Vec3::NEG_Z, 10))
        .id();
    world.spawn(boss_bundle(Vec3::new(0.0, 0.0, -20.0), defender, AttackTuning::default(), 5));
    world.spawn(rocket_bundle(Vec3::new(15.0, 0.0, -15.0), defender, Vec3::ZERO));
    world.send_event(GuardStarted { defender });

    // 60 секунд боя
    for tick in 0..3600 {
        app.update();

        if tick % 600 == 0 {
            let (hp, fraction) = app
                .world()
                .get::<Health>(defender)
                .map(|h| (h.current, h.fraction()))
                .unwrap_or((0, 0.0));
            println!("Tick {}: defender HP {} ({:.0}%)", tick, hp, fraction * 100.0);
        }
    }

    let stats = app.world().resource::<DuelStats>();
    println!("Duel complete: {:?}", stats);
}
