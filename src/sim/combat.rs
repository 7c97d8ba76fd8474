//! Damage resolution
//!
//! The single source of truth for all damage. Direct hits and area bursts
//! both land here; nothing else in the crate mutates health. Area damage
//! falls off linearly with distance and is floored to whole points.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::actor::{Mob, Player};

/// One area-damage burst, queued during the tick and consumed exactly once
/// at the explosion-resolution phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionEvent {
    pub origin: Vec2,
    pub base_damage: u32,
    pub radius: f32,
}

/// What a damage application did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Target dead, invulnerable, or amount zero
    Ignored,
    Damaged,
    Died,
}

/// Linear falloff: `floor(base * (1 - d/radius))`, zero at and beyond the
/// radius (excluded, never negative).
pub fn effective_damage(base: u32, dist: f32, radius: f32) -> u32 {
    if radius <= 0.0 || dist > radius {
        return 0;
    }
    (base as f32 * (1.0 - dist / radius)).floor() as u32
}

/// Apply direct damage to the player. No-op while dead or inside the
/// invulnerability window. A landed hit opens a fresh window and, when the
/// attacker's position is known, knocks the player back.
pub fn damage_player(
    player: &mut Player,
    amount: u32,
    now: f32,
    attacker_pos: Option<Vec2>,
) -> HitOutcome {
    if player.dead || amount == 0 || player.is_invulnerable(now) {
        return HitOutcome::Ignored;
    }
    player.health = player.health.saturating_sub(amount);
    player.invuln_until = now + PLAYER_INVULN_DURATION;
    if let Some(from) = attacker_pos {
        let away = (player.pos - from).normalize_or_zero();
        player.vel = away * PLAYER_KNOCKBACK_SPEED;
        player.knockback_until = now + PLAYER_KNOCKBACK_DURATION;
    }
    if player.health == 0 {
        player.dead = true;
        return HitOutcome::Died;
    }
    HitOutcome::Damaged
}

/// Apply direct damage to a hostile. No-op on dead mobs; the caller removes
/// the record at the tick boundary.
pub fn damage_mob(mob: &mut Mob, amount: u32) -> HitOutcome {
    if !mob.alive || amount == 0 {
        return HitOutcome::Ignored;
    }
    mob.health = mob.health.saturating_sub(amount);
    if mob.health == 0 {
        mob.alive = false;
        return HitOutcome::Died;
    }
    HitOutcome::Damaged
}

/// Resolve one explosion against the player and every live hostile
/// independently. Pickups are not combatants and are skipped. This is the
/// only code path producing area damage; wall impacts, actor impacts, and
/// timeout detonations all queue an [`ExplosionEvent`] instead of applying
/// falloff themselves.
pub fn apply_explosion(event: &ExplosionEvent, player: &mut Player, mobs: &mut [Mob], now: f32) {
    let dist = player.pos.distance(event.origin);
    let damage = effective_damage(event.base_damage, dist, event.radius);
    if damage > 0 {
        damage_player(player, damage, now, None);
    }

    for mob in mobs.iter_mut() {
        if !mob.alive || mob.is_pickup() {
            continue;
        }
        let dist = mob.pos.distance(event.origin);
        let damage = effective_damage(event.base_damage, dist, event.radius);
        if damage > 0 {
            damage_mob(mob, damage);
        }
    }
}
