//! Headless demo driver
//!
//! Plays the host role the real presentation layer would: builds a map
//! grid, starts the world, drives the fixed-timestep loop with scripted
//! input, and logs the notification stream. Useful for watching a run in
//! a terminal and for profiling the simulation without a renderer.

use glam::Vec2;
use serde::Serialize;

use arena_survivors::consts::*;
use arena_survivors::sim::{
    Notification, Tile, TickInput, WeaponKind, World, WorldConfig, tick,
};

/// `#` is wall, anything else is open ground. A real host would feed the
/// core a grid from one of its map-file adapters.
const DEMO_MAP: &str = "\
############################
#..........................#
#..........................#
#..........................#
#..........................#
#..........##....##........#
#..........................#
#..........................#
#..........................#
#..........................#
#..........##....##........#
#..........................#
#..........................#
#..........................#
#..........................#
#..........................#
############################";

fn parse_map(text: &str) -> Vec<Vec<Tile>> {
    text.lines()
        .map(|line| {
            line.chars()
                .map(|c| if c == '#' { Tile::Wall } else { Tile::Open })
                .collect()
        })
        .collect()
}

/// End-of-run dump for scripts that wrap the demo.
#[derive(Debug, Serialize)]
struct RunSummary {
    seconds: f32,
    score: u64,
    level: u32,
    survived: bool,
}

fn main() {
    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let config = WorldConfig {
        seed,
        ..WorldConfig::default()
    };
    let mut world = World::new(parse_map(DEMO_MAP), config).expect("demo map is valid");
    log::info!("world ready, seed {}", seed);

    world.start_game();

    // Scripted pilot: circle the arena center, always firing at the
    // nearest hostile, cycling weapons every few seconds
    let run_seconds = 90.0;
    let steps = (run_seconds / SIM_DT) as u32;
    let center = world.map.pixel_size() * 0.5;
    let mut input = TickInput::default();
    let mut survived = true;

    'run: for step in 0..steps {
        let t = step as f32 * SIM_DT;

        input.move_dir = Vec2::new(t.cos(), t.sin());
        input.aim = world
            .mobs
            .iter()
            .filter(|mob| mob.alive && !mob.is_pickup())
            .min_by(|a, b| {
                let da = a.pos.distance_squared(world.player.pos);
                let db = b.pos.distance_squared(world.player.pos);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|mob| mob.pos)
            .unwrap_or(center);
        input.attack = true;
        input.select_weapon = match step % (10 * 60) {
            0 => Some(WeaponKind::Bow),
            200 => Some(WeaponKind::Sword),
            400 => Some(WeaponKind::Tnt),
            _ => None,
        };

        tick(&mut world, &input, SIM_DT);

        // Clear one-shot inputs after processing
        input.select_weapon = None;
        input.toggle_pause = false;

        for note in world.drain_events() {
            match note {
                Notification::Stats(update) => log::debug!("stats: {:?}", update),
                Notification::WeaponChange { name, .. } => log::info!("weapon: {}", name),
                Notification::PauseChanged { paused, user_paused } => {
                    log::info!("paused: {} (user: {})", paused, user_paused)
                }
                Notification::LevelUp { level, .. } => {
                    log::info!("reached level {}", level);
                    // Auto-pick a reward the way the overlay would
                    world.apply_upgrade(arena_survivors::sim::Upgrade::MaxHealth);
                    world.set_system_pause(
                        arena_survivors::sim::SystemPauseReason::LevelUp,
                        false,
                    );
                }
                Notification::PlayerDied => {
                    survived = false;
                    break 'run;
                }
            }
        }
    }

    let summary = RunSummary {
        seconds: world.time,
        score: world.score,
        level: world.player.level,
        survived,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("summary serialization failed: {}", err),
    }
}
