//! Arena Survivors - a top-down tile-arena combat simulation
//!
//! Core modules:
//! - `sim`: the simulation core (pause control, scheduling, actors, weapons,
//!   projectiles, damage resolution)
//!
//! Rendering, menus, HUD, map-file parsing, and the repair mini-game are
//! host concerns. The host talks to this crate through the narrow calls on
//! [`sim::World`] and consumes the [`sim::Notification`] queue it drains
//! once per frame.

pub mod sim;

pub use sim::{Notification, TickInput, World, WorldConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Tile edge length in world units
    pub const TILE_SIZE: f32 = 32.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 16.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    pub const PLAYER_ATTACK_DAMAGE: u32 = 30;
    /// Invulnerability window after the player takes a hit (seconds)
    pub const PLAYER_INVULN_DURATION: f32 = 0.5;
    /// Window during which a contact hit overrides player input (seconds)
    pub const PLAYER_KNOCKBACK_DURATION: f32 = 0.12;
    pub const PLAYER_KNOCKBACK_SPEED: f32 = 260.0;

    /// Hostile defaults
    pub const MOB_RADIUS: f32 = 14.0;
    pub const MOB_MAX_HEALTH: u32 = 100;
    pub const MOB_CONTACT_DAMAGE: u32 = 5;
    pub const ZOMBIE_SPEED: f32 = 60.0;
    pub const SPIDER_SPEED: f32 = 120.0;
    pub const SKELETON_SPEED: f32 = 40.0;
    pub const CREEPER_SPEED: f32 = 70.0;

    /// Skeleton kiting parameters
    pub const SKELETON_ATTACK_RANGE: f32 = 300.0;
    pub const SKELETON_KEEP_DISTANCE: f32 = 150.0;
    pub const SKELETON_SHOT_COOLDOWN: f32 = 1.0;

    /// Creeper detonation parameters
    pub const CREEPER_EXPLODE_RANGE: f32 = 100.0;
    pub const CREEPER_EXPLOSION_DAMAGE: u32 = 75;
    pub const CREEPER_EXPLOSION_RADIUS: f32 = 100.0;
    /// Half-period of one arming flash (seconds)
    pub const CREEPER_PULSE_INTERVAL: f32 = 0.1;
    /// Number of on/off flashes before detonation
    pub const CREEPER_PULSE_COUNT: u32 = 3;

    /// Experience orbs
    pub const XP_PICKUP_DISTANCE: f32 = 100.0;
    pub const XP_HOMING_SPEED: f32 = 480.0;
    pub const XP_COLLECT_RADIUS: f32 = 8.0;
    pub const XP_VALUE_MIN: u32 = 5;
    pub const XP_VALUE_MAX: u32 = 15;

    /// Bow
    pub const BOW_COOLDOWN: f32 = 0.5;
    pub const ARROW_SPEED: f32 = 600.0;
    pub const ARROW_LIFETIME: f32 = 1.5;
    pub const ARROW_RADIUS: f32 = 4.0;

    /// Sword
    pub const SWORD_COOLDOWN: f32 = 0.3;
    /// Distance of the swing zone ahead of the wielder
    pub const SWORD_REACH: f32 = 100.0;
    pub const SWORD_ZONE_HALF: f32 = 30.0;
    pub const SWORD_ZONE_LIFETIME: f32 = 0.15;

    /// TNT
    pub const TNT_COOLDOWN: f32 = 3.0;
    pub const TNT_DAMAGE: u32 = 50;
    pub const TNT_EXPLOSION_RADIUS: f32 = 100.0;
    pub const TNT_SPEED: f32 = 400.0;
    /// Hard ceiling on flight time before a charge self-detonates
    pub const TNT_MAX_LIFETIME: f32 = 5.0;

    /// Spawning and progression
    pub const MOB_SPAWN_INTERVAL: f32 = 1.5;
    pub const SCORE_PER_KILL: u64 = 10;
    /// Experience required per level = level * XP_PER_LEVEL
    pub const XP_PER_LEVEL: u32 = 5;
    pub const LEVEL_HEALTH_BONUS: u32 = 10;
    pub const LEVEL_DAMAGE_BONUS: u32 = 5;
    /// Health restored when the repair mini-game is won
    pub const MINI_GAME_REWARD_HP: u32 = 50;
}

/// Angle in radians from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
