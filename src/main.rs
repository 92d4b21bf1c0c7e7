//! Slingshot headless runner
//!
//! Loads a level, fires one shot and reports how it went.
//!
//! Usage: `slingshot [level.json] [pull_x pull_y]`
//!
//! The pull is the slingshot drag offset from the anchor; the launch goes
//! the opposite way. Settings are read from `slingshot.json` if present.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use slingshot::level::{load_fallback_level, load_level_file};
    use slingshot::sim::{Game, GameEvent, TickInput, World, tick};
    use slingshot::{LevelRecords, Settings};

    /// Give up after a minute of simulated flight
    const MAX_TICKS: usize = 60 * 60;

    env_logger::init();
    log::info!("Slingshot (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = Settings::load_or_default("slingshot.json");
    let mut world = World::from_settings(&settings);

    let level = match args.next() {
        Some(path) => match load_level_file(&path, &mut world) {
            Ok(level) => level,
            Err(e) => {
                log::error!("{}", e);
                world.clear();
                load_fallback_level(&mut world, 1)
            }
        },
        None => load_fallback_level(&mut world, 1),
    };

    let pull = match (args.next(), args.next()) {
        (Some(x), Some(y)) => match (x.parse::<f32>(), y.parse::<f32>()) {
            (Ok(x), Ok(y)) => Vec2::new(x, y),
            _ => {
                log::warn!("Pull must be two numbers, using default");
                Vec2::new(-60.0, 60.0)
            }
        },
        _ => Vec2::new(-60.0, 60.0),
    };

    let mut game = Game::new(&settings);
    game.start_level(level.id.max(1), level.spawn());
    let anchor = game.slingshot.anchor;

    let inputs = [
        TickInput {
            press: Some(anchor),
            ..Default::default()
        },
        TickInput {
            press: Some(anchor),
            ..Default::default()
        },
        TickInput {
            drag: Some(anchor + pull),
            ..Default::default()
        },
        TickInput {
            release: true,
            ..Default::default()
        },
    ];

    let mut records = LevelRecords::new();
    let mut finished = false;
    for ticks in 0..MAX_TICKS {
        let input = inputs.get(ticks).cloned().unwrap_or_default();
        for event in tick(&mut game, &mut world, &input, settings.time_step) {
            match event {
                GameEvent::Launched { velocity } => {
                    println!("Launched from {:?} with velocity {:?}", game.spawn, velocity)
                }
                GameEvent::Won { level, attempts } => {
                    records.record(level, attempts);
                    println!("Reached the goal after {} ticks", ticks);
                    finished = true;
                }
                GameEvent::Lost(reason) => {
                    println!("Lost after {} ticks: {:?}", ticks, reason);
                    finished = true;
                }
                GameEvent::PhaseChanged(phase) => log::debug!("Phase: {:?}", phase),
            }
        }
        if finished {
            break;
        }
    }

    if !finished {
        println!("Shot still in flight after {} ticks", MAX_TICKS);
    }
    if let Some(agent) = world.agent() {
        println!(
            "Agent at ({:.1}, {:.1}), trail of {} points",
            agent.pos.x,
            agent.pos.y,
            agent.trail.len()
        );
    }
    if let Some(best) = records.best(game.level) {
        println!("Best for level {}: {} attempt(s)", game.level, best);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm; nothing to run here
}
