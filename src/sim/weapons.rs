//! Weapon strategies and the things they launch
//!
//! Three interchangeable attack behaviors share one cooldown discipline: a
//! per-instance last-fired timestamp compared against the simulation clock.
//! The bow and TNT spawn projectiles; the sword spawns a short-lived hit
//! zone a scheduler handle clears.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::actor::MobId;
use crate::sim::sched::{Scheduler, TimerAction, TimerId};
use crate::{angle_between, unit_from_angle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Bow,
    Sword,
    Tnt,
}

impl WeaponKind {
    pub fn cooldown(&self) -> f32 {
        match self {
            WeaponKind::Bow => BOW_COOLDOWN,
            WeaponKind::Sword => SWORD_COOLDOWN,
            WeaponKind::Tnt => TNT_COOLDOWN,
        }
    }

    /// Asset key the presentation layer uses for icons and sprites
    pub fn key(&self) -> &'static str {
        match self {
            WeaponKind::Bow => "bow",
            WeaponKind::Sword => "iron_sword",
            WeaponKind::Tnt => "tnt",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WeaponKind::Bow => "Bow",
            WeaponKind::Sword => "Sword",
            WeaponKind::Tnt => "TNT",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    last_fired: f32,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            last_fired: f32::NEG_INFINITY,
        }
    }

    /// Cooldown gate: stamps the clock and returns true if ready.
    fn try_fire(&mut self, now: f32) -> bool {
        if now - self.last_fired < self.kind.cooldown() {
            return false;
        }
        self.last_fired = now;
        true
    }
}

/// Who launched a projectile. An id, not a reference: a projectile never
/// extends its owner's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Mob(MobId),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub owner: Owner,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: u32,
    /// Present on lobbed charges; direct-hit projectiles carry none
    pub explosion_radius: Option<f32>,
    /// Remaining flight time in seconds
    pub ttl: f32,
    /// Neutralized projectiles no longer collide (death / mini-game entry)
    pub inert: bool,
}

/// Transient melee swing region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitZone {
    pub pos: Vec2,
    pub half_extent: f32,
    pub damage: u32,
    /// Targets this swing already hit; re-tested overlap never double-hits
    pub consumed: Vec<MobId>,
    pub clear_timer: TimerId,
}

impl HitZone {
    /// Square zone vs circle overlap.
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let half = Vec2::splat(self.half_extent);
        let closest = center.clamp(self.pos - half, self.pos + half);
        center.distance_squared(closest) <= radius * radius
    }
}

/// Ranged shot: a fast projectile carrying the shooter's current attack
/// damage. Silently ignored while on cooldown.
pub fn fire_bow(
    weapon: &mut Weapon,
    owner: Owner,
    origin: Vec2,
    aim: Vec2,
    damage: u32,
    now: f32,
    next_projectile_id: &mut u32,
    projectiles: &mut Vec<Projectile>,
) {
    if !weapon.try_fire(now) {
        return;
    }
    let angle = angle_between(origin, aim);
    let id = *next_projectile_id;
    *next_projectile_id += 1;
    projectiles.push(Projectile {
        id,
        owner,
        pos: origin,
        vel: unit_from_angle(angle) * ARROW_SPEED,
        damage,
        explosion_radius: None,
        ttl: ARROW_LIFETIME,
        inert: false,
    });
}

/// Melee swing: spawns a hit zone ahead of the wielder along the aim angle
/// and schedules its removal. Rejected while the previous swing's zone is
/// still alive (at most one per wielder) or while on cooldown.
pub fn swing_sword(
    weapon: &mut Weapon,
    origin: Vec2,
    aim: Vec2,
    damage: u32,
    now: f32,
    hit_zone: &mut Option<HitZone>,
    sched: &mut Scheduler,
) {
    if hit_zone.is_some() {
        return;
    }
    if !weapon.try_fire(now) {
        return;
    }
    let angle = angle_between(origin, aim);
    let clear_timer = sched.schedule(SWORD_ZONE_LIFETIME, false, TimerAction::ClearHitZone);
    *hit_zone = Some(HitZone {
        pos: origin + unit_from_angle(angle) * SWORD_REACH,
        half_extent: SWORD_ZONE_HALF,
        damage,
        consumed: Vec::new(),
        clear_timer,
    });
}

/// Lobbed charge: slower projectile carrying a damage payload and an
/// explosion radius, with a hard lifetime after which it self-detonates
/// even if it hit nothing.
pub fn throw_tnt(
    weapon: &mut Weapon,
    owner: Owner,
    origin: Vec2,
    aim: Vec2,
    now: f32,
    next_projectile_id: &mut u32,
    projectiles: &mut Vec<Projectile>,
) {
    if !weapon.try_fire(now) {
        return;
    }
    let angle = angle_between(origin, aim);
    let id = *next_projectile_id;
    *next_projectile_id += 1;
    projectiles.push(Projectile {
        id,
        owner,
        pos: origin,
        vel: unit_from_angle(angle) * TNT_SPEED,
        damage: TNT_DAMAGE,
        explosion_radius: Some(TNT_EXPLOSION_RADIUS),
        ttl: TNT_MAX_LIFETIME,
        inert: false,
    });
}
