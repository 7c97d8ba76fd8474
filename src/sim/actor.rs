//! Actors: the player and the hostile roster
//!
//! Hostile kinds are a tagged variant plus per-kind behavior parameters
//! instead of an inheritance tree. The behavior module drives every kind
//! through free functions over the uniform [`Mob`] record; construction is
//! centralized in the factory functions here.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::sched::TimerId;
use crate::sim::weapons::{Weapon, WeaponKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobId(pub u32);

/// The player. Reaching zero health is a terminal dead state; the record
/// is never removed from the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Where the weapon sprite points (presentation reads this)
    pub aim_angle: f32,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    /// Accumulated movement-speed upgrades
    pub speed_bonus: f32,
    pub attack_damage: u32,
    pub dead: bool,
    pub weapon: Weapon,
    /// Invulnerable until this simulation time
    pub invuln_until: f32,
    /// Input suppressed and the knockback impulse applied until this time
    pub knockback_until: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            aim_angle: 0.0,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            speed: PLAYER_SPEED,
            speed_bonus: 0.0,
            attack_damage: PLAYER_ATTACK_DAMAGE,
            dead: false,
            weapon: Weapon::new(WeaponKind::Bow),
            invuln_until: 0.0,
            knockback_until: 0.0,
            level: 1,
            xp: 0,
            xp_to_next_level: XP_PER_LEVEL,
        }
    }

    #[inline]
    pub fn effective_speed(&self) -> f32 {
        self.speed + self.speed_bonus
    }

    #[inline]
    pub fn is_invulnerable(&self, now: f32) -> bool {
        now < self.invuln_until
    }

    /// Add experience and resolve level-ups. Each level raises the
    /// threshold to `level * XP_PER_LEVEL`, grants the stat bonuses, and
    /// refills health. Returns how many levels were gained.
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        if self.dead {
            return 0;
        }
        self.xp += amount;
        let mut gained = 0;
        while self.xp >= self.xp_to_next_level {
            self.xp -= self.xp_to_next_level;
            self.level += 1;
            self.xp_to_next_level = self.level * XP_PER_LEVEL;
            self.max_health += LEVEL_HEALTH_BONUS;
            self.health = self.max_health;
            self.attack_damage += LEVEL_DAMAGE_BONUS;
            gained += 1;
        }
        gained
    }

    /// Heal up to max health. Dead players stay dead.
    pub fn heal(&mut self, amount: u32) {
        if self.dead {
            return;
        }
        self.health = (self.health + amount).min(self.max_health);
    }
}

/// Hostile kinds, plus the passive experience orb which shares the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MobKind {
    Zombie,
    Skeleton,
    Creeper,
    Spider,
    XpOrb,
}

/// The kinds the spawn policy cycles through.
pub const HOSTILE_KINDS: [MobKind; 4] = [
    MobKind::Zombie,
    MobKind::Skeleton,
    MobKind::Creeper,
    MobKind::Spider,
];

#[derive(Debug, Error)]
#[error("unknown hostile kind: {0:?}")]
pub struct UnknownMobKind(pub String);

impl MobKind {
    /// Factory lookup by collaborator-facing name. Orbs are internal and
    /// not spawnable by name.
    pub fn from_name(name: &str) -> Result<Self, UnknownMobKind> {
        match name.to_ascii_lowercase().as_str() {
            "zombie" => Ok(Self::Zombie),
            "skeleton" => Ok(Self::Skeleton),
            "creeper" => Ok(Self::Creeper),
            "spider" => Ok(Self::Spider),
            _ => Err(UnknownMobKind(name.to_string())),
        }
    }
}

/// Handles held while a detonator mob is arming; cancelled if it dies first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmingTimers {
    pub pulse: TimerId,
    pub detonate: TimerId,
}

/// Kind-specific behavior parameters and mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Always pursue the player (melee and fast chasers)
    Chase,
    /// Keep distance and shoot (ranged kiter)
    Kite {
        attack_range: f32,
        keep_distance: f32,
        shot_cooldown: f32,
        last_shot: f32,
    },
    /// Pursue, then arm and detonate near the target
    Detonate {
        explode_range: f32,
        damage: u32,
        radius: f32,
        arming: Option<ArmingTimers>,
    },
    /// Passive pickup that homes toward the player once in range
    Pickup {
        value: u32,
        pickup_distance: f32,
        homing: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    pub id: MobId,
    pub kind: MobKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Where the weapon sprite points (presentation reads this)
    pub aim_angle: f32,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    pub attack_damage: u32,
    pub alive: bool,
    /// Warning flash while arming (presentation reads this)
    pub flash: bool,
    pub weapon: Option<Weapon>,
    pub behavior: BehaviorState,
}

impl Mob {
    /// Build a hostile of the given kind - the factory the spawn policy
    /// and the host's spawn requests both go through.
    pub fn hostile(id: MobId, kind: MobKind, pos: Vec2) -> Self {
        let (speed, weapon, behavior) = match kind {
            MobKind::Zombie => (ZOMBIE_SPEED, None, BehaviorState::Chase),
            MobKind::Spider => (SPIDER_SPEED, None, BehaviorState::Chase),
            MobKind::Skeleton => (
                SKELETON_SPEED,
                Some(Weapon::new(WeaponKind::Bow)),
                BehaviorState::Kite {
                    attack_range: SKELETON_ATTACK_RANGE,
                    keep_distance: SKELETON_KEEP_DISTANCE,
                    shot_cooldown: SKELETON_SHOT_COOLDOWN,
                    last_shot: f32::NEG_INFINITY,
                },
            ),
            MobKind::Creeper => (
                CREEPER_SPEED,
                None,
                BehaviorState::Detonate {
                    explode_range: CREEPER_EXPLODE_RANGE,
                    damage: CREEPER_EXPLOSION_DAMAGE,
                    radius: CREEPER_EXPLOSION_RADIUS,
                    arming: None,
                },
            ),
            MobKind::XpOrb => return Self::xp_orb(id, pos, XP_VALUE_MIN),
        };
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            aim_angle: 0.0,
            health: MOB_MAX_HEALTH,
            max_health: MOB_MAX_HEALTH,
            speed,
            attack_damage: MOB_CONTACT_DAMAGE,
            alive: true,
            flash: false,
            weapon,
            behavior,
        }
    }

    /// Build an experience orb dropped at a death position.
    pub fn xp_orb(id: MobId, pos: Vec2, value: u32) -> Self {
        Self {
            id,
            kind: MobKind::XpOrb,
            pos,
            vel: Vec2::ZERO,
            aim_angle: 0.0,
            health: 1,
            max_health: 1,
            speed: XP_HOMING_SPEED,
            attack_damage: 0,
            alive: true,
            flash: false,
            weapon: None,
            behavior: BehaviorState::Pickup {
                value,
                pickup_distance: XP_PICKUP_DISTANCE,
                homing: false,
            },
        }
    }

    #[inline]
    pub fn is_pickup(&self) -> bool {
        matches!(self.kind, MobKind::XpOrb)
    }
}
