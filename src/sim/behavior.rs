//! Per-kind behavior state machines
//!
//! Free functions over the uniform [`Mob`] record; the kind parameters live
//! in [`BehaviorState`]. Every kind follows the same template - seek,
//! engage, kind-specific terminal or loop. None of this runs while the
//! world is paused: the tick driver skips the calls outright rather than
//! relying on guards here.

use glam::Vec2;

use crate::angle_between;
use crate::consts::*;
use crate::sim::actor::{ArmingTimers, BehaviorState, Mob, Player};
use crate::sim::map::TileMap;
use crate::sim::sched::{Scheduler, TimerAction};
use crate::sim::weapons::{self, Owner, Projectile};

/// Events behaviors hand back to the tick driver, applied at the tick
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorEvent {
    XpCollected { value: u32 },
}

/// Advance one mob by one tick: decide a velocity, maybe engage, and
/// integrate movement.
pub fn update_mob(
    mob: &mut Mob,
    player: &Player,
    map: &TileMap,
    flee_respects_walls: bool,
    now: f32,
    dt: f32,
    sched: &mut Scheduler,
    projectiles: &mut Vec<Projectile>,
    next_projectile_id: &mut u32,
    events: &mut Vec<BehaviorEvent>,
) {
    if !mob.alive {
        return;
    }

    // Whether this tick's movement collides with walls
    let mut clip_walls = true;

    match &mut mob.behavior {
        BehaviorState::Chase => {
            let dir = (player.pos - mob.pos).normalize_or_zero();
            mob.vel = dir * mob.speed;
            mob.aim_angle = angle_between(mob.pos, player.pos);
        }

        BehaviorState::Kite {
            attack_range,
            keep_distance,
            shot_cooldown,
            last_shot,
        } => {
            let dist = mob.pos.distance(player.pos);
            mob.aim_angle = angle_between(mob.pos, player.pos);

            if dist < *keep_distance {
                // Too close: flee directly away
                let away = (mob.pos - player.pos).normalize_or_zero();
                mob.vel = away * mob.speed;
                clip_walls = flee_respects_walls;
            } else if dist < *attack_range {
                // Hold position and fire on the kind's own cadence
                mob.vel = Vec2::ZERO;
                if now - *last_shot >= *shot_cooldown {
                    if let Some(weapon) = mob.weapon.as_mut() {
                        weapons::fire_bow(
                            weapon,
                            Owner::Mob(mob.id),
                            mob.pos,
                            player.pos,
                            mob.attack_damage,
                            now,
                            next_projectile_id,
                            projectiles,
                        );
                        *last_shot = now;
                    }
                }
            } else {
                let dir = (player.pos - mob.pos).normalize_or_zero();
                mob.vel = dir * mob.speed;
            }
        }

        BehaviorState::Detonate {
            explode_range,
            arming,
            ..
        } => {
            if arming.is_some() {
                // Arming is non-interruptible: hold position until the
                // scheduled detonation fires. Re-entering is a no-op.
                mob.vel = Vec2::ZERO;
            } else if mob.pos.distance(player.pos) < *explode_range {
                let pulse = sched.schedule(
                    CREEPER_PULSE_INTERVAL,
                    true,
                    TimerAction::DetonatorPulse(mob.id),
                );
                let fuse = CREEPER_PULSE_COUNT as f32 * CREEPER_PULSE_INTERVAL * 2.0;
                let detonate = sched.schedule(fuse, false, TimerAction::Detonate(mob.id));
                *arming = Some(ArmingTimers { pulse, detonate });
                mob.vel = Vec2::ZERO;
            } else {
                let dir = (player.pos - mob.pos).normalize_or_zero();
                mob.vel = dir * mob.speed;
                mob.aim_angle = angle_between(mob.pos, player.pos);
            }
        }

        BehaviorState::Pickup {
            value,
            pickup_distance,
            homing,
        } => {
            clip_walls = false;
            if player.dead {
                mob.vel = Vec2::ZERO;
                return;
            }
            let dist = mob.pos.distance(player.pos);
            if !*homing && dist <= *pickup_distance {
                *homing = true;
            }
            if !*homing {
                return;
            }
            if dist <= XP_COLLECT_RADIUS {
                events.push(BehaviorEvent::XpCollected { value: *value });
                // Cleared synchronously so a re-test can never double-collect;
                // the record leaves the list at the tick boundary
                mob.alive = false;
                mob.vel = Vec2::ZERO;
                return;
            }
            let dir = (player.pos - mob.pos).normalize_or_zero();
            // Clamp the step so the orb lands on the player instead of
            // orbiting it
            let speed = mob.speed.min(dist / dt.max(f32::EPSILON));
            mob.vel = dir * speed;
        }
    }

    if clip_walls {
        mob.pos = map.slide(mob.pos, mob.vel * dt, MOB_RADIUS);
    } else {
        mob.pos += mob.vel * dt;
    }
}
