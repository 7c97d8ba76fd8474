//! Fixed timestep simulation tick
//!
//! One call per host frame. Pause state is evaluated once at the top: a
//! frozen world accepts state-only input (pause toggle, weapon select) and
//! nothing else. While running, the phases are fixed: timers, player,
//! hostile behaviors, projectiles, the melee zone, contact damage,
//! explosions, then boundary mutations. Direct hits always resolve before
//! area hits, and collections are never mutated while being iterated.

use glam::Vec2;
use rand::Rng;

use crate::angle_between;
use crate::consts::*;
use crate::sim::actor::{BehaviorState, Mob, MobId};
use crate::sim::behavior::{self, BehaviorEvent};
use crate::sim::combat::{self, ExplosionEvent};
use crate::sim::pause::SystemPauseReason;
use crate::sim::sched::TimerAction;
use crate::sim::weapons::{self, Owner, WeaponKind};
use crate::sim::world::{Notification, StatsUpdate, World};

/// Input commands for a single tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement direction from the host's key state (normalized here)
    pub move_dir: Vec2,
    /// World-space aim point (mouse)
    pub aim: Vec2,
    /// Fire the equipped weapon at the aim point
    pub attack: bool,
    /// Toggle the user pause (one-shot)
    pub toggle_pause: bool,
    /// Weapon hotkey (one-shot)
    pub select_weapon: Option<WeaponKind>,
}

/// Advance the world by one fixed timestep.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    // State-only input lands even while frozen
    if input.toggle_pause {
        world.toggle_user_pause();
    }
    if let Some(kind) = input.select_weapon {
        world.select_weapon(kind);
    }

    // The pause gate: nothing below runs for a frozen world
    if world.pause.is_paused() {
        return;
    }

    world.time += dt;
    let now = world.time;
    let stats_before = stats_snapshot(world);

    // Timers first, so cleared zones and detonations precede movement
    let mut fired = Vec::new();
    world.sched.tick(dt, &mut fired);
    for action in fired {
        dispatch_timer(world, action);
    }

    update_player(world, input, dt);

    let mut behavior_events = Vec::new();
    run_behaviors(world, now, dt, &mut behavior_events);

    // Direct projectile hits resolve here, before any area hit
    update_projectiles(world, now, dt);

    // Melee zone: at most one hit per swing per target, ever
    if let Some(zone) = world.hit_zone.as_mut() {
        for mob in world.mobs.iter_mut() {
            if !mob.alive || mob.is_pickup() {
                continue;
            }
            if zone.consumed.contains(&mob.id) {
                continue;
            }
            if zone.overlaps_circle(mob.pos, MOB_RADIUS) {
                zone.consumed.push(mob.id);
                combat::damage_mob(mob, zone.damage);
            }
        }
    }

    // Contact damage, rate-limited by the player's invulnerability window
    if !world.player.dead {
        for mob in &world.mobs {
            if !mob.alive || mob.is_pickup() {
                continue;
            }
            if mob.pos.distance(world.player.pos) < MOB_RADIUS + PLAYER_RADIUS {
                combat::damage_player(&mut world.player, mob.attack_damage, now, Some(mob.pos));
            }
        }
    }

    // Area damage last: one resolver pass per queued event
    let explosions = std::mem::take(&mut world.pending_explosions);
    for event in &explosions {
        combat::apply_explosion(event, &mut world.player, &mut world.mobs, now);
        log::debug!(
            "explosion at ({:.0}, {:.0}) base {} radius {}",
            event.origin.x,
            event.origin.y,
            event.base_damage,
            event.radius
        );
    }

    finish_tick(world, behavior_events, now);

    let stats_after = stats_snapshot(world);
    if stats_after != stats_before {
        push_stats_diff(world, stats_before, stats_after);
    }
}

fn dispatch_timer(world: &mut World, action: TimerAction) {
    match action {
        TimerAction::ClearHitZone => {
            world.hit_zone = None;
        }
        TimerAction::DetonatorPulse(id) => {
            if let Some(mob) = world.mobs.iter_mut().find(|m| m.id == id && m.alive) {
                mob.flash = !mob.flash;
            }
        }
        TimerAction::Detonate(id) => detonate_mob(world, id),
        TimerAction::SpawnMob => world.spawn_random_mob(),
    }
}

/// An armed mob's fuse ran out: one explosion at its current position,
/// then the record is gone. Detonation leaves health intact, which is how
/// the boundary phase tells a self-destruct (no kill reward) from a kill.
fn detonate_mob(world: &mut World, id: MobId) {
    let Some(mob) = world.mobs.iter_mut().find(|m| m.id == id && m.alive) else {
        return;
    };
    let BehaviorState::Detonate {
        damage,
        radius,
        arming,
        ..
    } = &mut mob.behavior
    else {
        return;
    };
    let event = ExplosionEvent {
        origin: mob.pos,
        base_damage: *damage,
        radius: *radius,
    };
    let timers = arming.take();
    mob.flash = false;
    mob.alive = false;
    world.pending_explosions.push(event);
    if let Some(timers) = timers {
        world.sched.cancel(timers.pulse);
        world.sched.cancel(timers.detonate);
    }
}

fn update_player(world: &mut World, input: &TickInput, dt: f32) {
    if world.player.dead {
        return;
    }
    let now = world.time;

    // Knockback overrides input for its short window
    if now >= world.player.knockback_until {
        world.player.vel = input.move_dir.normalize_or_zero() * world.player.effective_speed();
    }
    world.player.pos = world
        .map
        .slide(world.player.pos, world.player.vel * dt, PLAYER_RADIUS);
    world.player.aim_angle = angle_between(world.player.pos, input.aim);

    if !input.attack {
        return;
    }
    let origin = world.player.pos;
    let damage = world.player.attack_damage;
    let World {
        player,
        projectiles,
        hit_zone,
        sched,
        next_projectile_id,
        ..
    } = world;
    match player.weapon.kind {
        WeaponKind::Bow => weapons::fire_bow(
            &mut player.weapon,
            Owner::Player,
            origin,
            input.aim,
            damage,
            now,
            next_projectile_id,
            projectiles,
        ),
        WeaponKind::Sword => weapons::swing_sword(
            &mut player.weapon,
            origin,
            input.aim,
            damage,
            now,
            hit_zone,
            sched,
        ),
        WeaponKind::Tnt => weapons::throw_tnt(
            &mut player.weapon,
            Owner::Player,
            origin,
            input.aim,
            now,
            next_projectile_id,
            projectiles,
        ),
    }
}

fn run_behaviors(world: &mut World, now: f32, dt: f32, events: &mut Vec<BehaviorEvent>) {
    let World {
        mobs,
        player,
        map,
        sched,
        projectiles,
        next_projectile_id,
        config,
        ..
    } = world;
    for mob in mobs.iter_mut() {
        behavior::update_mob(
            mob,
            player,
            map,
            config.flee_respects_walls,
            now,
            dt,
            sched,
            projectiles,
            next_projectile_id,
            events,
        );
    }
}

/// How one projectile's tick ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fate {
    Wall,
    HitMob(MobId),
    HitPlayer,
    Timeout,
}

/// Advance projectiles and resolve each spent one exactly once. A charge
/// with an explosion radius ends in the explosion queue whatever its fate,
/// so a simultaneous wall hit and lifetime expiry can never detonate twice.
fn update_projectiles(world: &mut World, now: f32, dt: f32) {
    let mut outcomes: Vec<(usize, Fate)> = Vec::new();
    {
        let World {
            projectiles,
            mobs,
            player,
            map,
            ..
        } = world;
        for (index, projectile) in projectiles.iter_mut().enumerate() {
            projectile.pos += projectile.vel * dt;
            projectile.ttl -= dt;

            if !projectile.inert {
                if map.blocked(projectile.pos, ARROW_RADIUS) {
                    outcomes.push((index, Fate::Wall));
                    continue;
                }
                let hit = match projectile.owner {
                    Owner::Player => mobs
                        .iter()
                        .find(|mob| {
                            mob.alive
                                && !mob.is_pickup()
                                && mob.pos.distance(projectile.pos) < MOB_RADIUS + ARROW_RADIUS
                        })
                        .map(|mob| Fate::HitMob(mob.id)),
                    Owner::Mob(_) => {
                        if !player.dead
                            && player.pos.distance(projectile.pos)
                                < PLAYER_RADIUS + ARROW_RADIUS
                        {
                            Some(Fate::HitPlayer)
                        } else {
                            None
                        }
                    }
                };
                if let Some(fate) = hit {
                    outcomes.push((index, fate));
                    continue;
                }
            }

            if projectile.ttl <= 0.0 {
                outcomes.push((index, Fate::Timeout));
            }
        }
    }

    let mut spent = vec![false; world.projectiles.len()];
    for (index, fate) in outcomes {
        spent[index] = true;
        let (pos, damage, explosion_radius) = {
            let projectile = &world.projectiles[index];
            (projectile.pos, projectile.damage, projectile.explosion_radius)
        };

        if let Some(radius) = explosion_radius {
            // Area projectiles never deal direct damage; every fate routes
            // through the single explosion path
            world.pending_explosions.push(ExplosionEvent {
                origin: pos,
                base_damage: damage,
                radius,
            });
            continue;
        }

        match fate {
            Fate::HitMob(id) => {
                if let Some(mob) = world.mobs.iter_mut().find(|m| m.id == id) {
                    combat::damage_mob(mob, damage);
                }
            }
            Fate::HitPlayer => {
                combat::damage_player(&mut world.player, damage, now, None);
            }
            Fate::Wall | Fate::Timeout => {}
        }
    }

    let mut index = 0;
    world.projectiles.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });
}

/// Boundary mutations: experience, rewards, removals, additions, and the
/// death transition. Collections change only here.
fn finish_tick(world: &mut World, behavior_events: Vec<BehaviorEvent>, now: f32) {
    for event in behavior_events {
        match event {
            BehaviorEvent::XpCollected { value } => {
                let gained = world.player.add_xp(value);
                if gained > 0 {
                    world.events.push(Notification::LevelUp {
                        level: world.player.level,
                        max_health: world.player.max_health,
                        attack_damage: world.player.attack_damage,
                    });
                    world.set_system_pause(SystemPauseReason::LevelUp, true);
                    log::info!("level up -> {}", world.player.level);
                }
            }
        }
    }

    // Cancel timers owned by dying mobs before their records go away
    {
        let World { mobs, sched, .. } = world;
        for mob in mobs.iter() {
            if mob.alive {
                continue;
            }
            if let BehaviorState::Detonate {
                arming: Some(timers),
                ..
            } = &mob.behavior
            {
                sched.cancel(timers.pulse);
                sched.cancel(timers.detonate);
            }
        }
    }

    // Kill rewards: damage kills drain health to zero; detonations and
    // collections leave it intact and drop nothing
    let mut kills = 0u64;
    let mut orb_positions = Vec::new();
    for mob in &world.mobs {
        if mob.alive || mob.is_pickup() {
            continue;
        }
        if mob.health == 0 {
            kills += 1;
            orb_positions.push(mob.pos);
            log::debug!("{:?} {:?} down", mob.kind, mob.id);
        }
    }
    world.score += kills * SCORE_PER_KILL;
    world.mobs.retain(|mob| mob.alive);
    for pos in orb_positions {
        let value = world.rng.random_range(XP_VALUE_MIN..=XP_VALUE_MAX);
        let id = world.alloc_mob_id();
        world.mobs.push(Mob::xp_orb(id, pos, value));
    }

    // Queued spawns join the world here, never mid-iteration
    let pending = std::mem::take(&mut world.pending_spawns);
    world.mobs.extend(pending);

    // Death transition, latched on the death reason so it runs once
    if world.player.dead && !world.pause.holds(SystemPauseReason::Death) {
        world.neutralize_in_flight();
        world.events.push(Notification::PlayerDied);
        world.set_system_pause(SystemPauseReason::Death, true);
        log::info!("player died at {:.1}s, score {}", now, world.score);
    }
}

type StatsSnapshot = (u64, u32, u32, u32, u32, u32);

fn stats_snapshot(world: &World) -> StatsSnapshot {
    (
        world.score,
        world.player.health,
        world.player.max_health,
        world.player.xp,
        world.player.level,
        world.player.xp_to_next_level,
    )
}

fn push_stats_diff(world: &mut World, before: StatsSnapshot, after: StatsSnapshot) {
    world.events.push(Notification::Stats(StatsUpdate {
        score: (after.0 != before.0).then_some(after.0),
        health: (after.1 != before.1).then_some(after.1),
        max_health: (after.2 != before.2).then_some(after.2),
        xp: (after.3 != before.3).then_some(after.3),
        level: (after.4 != before.4).then_some(after.4),
        xp_to_next_level: (after.5 != before.5).then_some(after.5),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::MobKind;
    use crate::sim::map::Tile;
    use crate::sim::weapons::Projectile;
    use crate::sim::world::WorldConfig;

    fn bordered_grid(w: usize, h: usize) -> Vec<Vec<Tile>> {
        (0..h)
            .map(|y| {
                (0..w)
                    .map(|x| {
                        if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                            Tile::Wall
                        } else {
                            Tile::Open
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Big arena, spawn timer effectively disabled for determinism
    fn started_world() -> World {
        let config = WorldConfig {
            spawn_interval: 10_000.0,
            ..WorldConfig::default()
        };
        let mut world = World::new(bordered_grid(30, 30), config).unwrap();
        world.start_game();
        world.drain_events();
        world
    }

    fn run(world: &mut World, input: &TickInput, seconds: f32) {
        let steps = (seconds / SIM_DT).ceil() as u32;
        for _ in 0..steps {
            tick(world, input, SIM_DT);
        }
    }

    #[test]
    fn test_paused_world_does_not_advance() {
        let config = WorldConfig::default();
        let mut world = World::new(bordered_grid(30, 30), config).unwrap();
        // Still behind the main menu
        let input = TickInput {
            attack: true,
            ..TickInput::default()
        };
        run(&mut world, &input, 0.5);
        assert_eq!(world.time, 0.0);
        assert!(world.projectiles.is_empty());
        assert!(world.mobs.is_empty());
    }

    #[test]
    fn test_user_pause_freezes_simulation() {
        let mut world = started_world();
        run(&mut world, &TickInput::default(), 0.1);
        let frozen_time = world.time;
        assert!(frozen_time > 0.0);

        let input = TickInput {
            toggle_pause: true,
            ..TickInput::default()
        };
        tick(&mut world, &input, SIM_DT);
        assert!(world.pause.user_paused());
        assert_eq!(world.time, frozen_time);

        run(&mut world, &TickInput::default(), 0.5);
        assert_eq!(world.time, frozen_time);
    }

    #[test]
    fn test_weapon_switch_accepted_while_paused() {
        let mut world = started_world();
        let input = TickInput {
            toggle_pause: true,
            ..TickInput::default()
        };
        tick(&mut world, &input, SIM_DT);
        world.drain_events();

        let input = TickInput {
            select_weapon: Some(WeaponKind::Tnt),
            ..TickInput::default()
        };
        tick(&mut world, &input, SIM_DT);

        assert_eq!(world.player.weapon.kind, WeaponKind::Tnt);
        assert!(world
            .drain_events()
            .iter()
            .any(|event| matches!(event, Notification::WeaponChange { key: "tnt", .. })));
        // ...but nothing simulated
        assert!(world.pause.is_paused());
    }

    #[test]
    fn test_tnt_timeout_detonates_exactly_once() {
        let mut world = started_world();
        let origin = world.player.pos + Vec2::new(250.0, 0.0);
        world.projectiles.push(Projectile {
            id: 900,
            owner: Owner::Player,
            pos: origin,
            vel: Vec2::ZERO,
            damage: 100,
            explosion_radius: Some(100.0),
            ttl: 0.05,
            inert: false,
        });
        let victim_id = world.alloc_mob_id();
        let mut victim = Mob::hostile(victim_id, MobKind::Zombie, origin + Vec2::new(0.0, 50.0));
        // Hold the victim still so the falloff distance stays known
        victim.speed = 0.0;
        world.mobs.push(victim);

        run(&mut world, &TickInput::default(), 0.2);

        assert!(world.projectiles.is_empty());
        let victim = world.mobs.iter().find(|m| m.id == victim_id).unwrap();
        let after_burst = victim.health;
        assert!(after_burst < MOB_MAX_HEALTH);
        assert!(victim.alive);

        // No second explosion ever arrives
        run(&mut world, &TickInput::default(), 1.0);
        let victim = world.mobs.iter().find(|m| m.id == victim_id).unwrap();
        assert_eq!(victim.health, after_burst);
    }

    #[test]
    fn test_tnt_wall_hit_routes_through_explosion() {
        let mut world = started_world();
        // Flying straight at the west border wall
        world.projectiles.push(Projectile {
            id: 900,
            owner: Owner::Player,
            pos: Vec2::new(2.5 * TILE_SIZE, world.player.pos.y),
            vel: Vec2::new(-TNT_SPEED, 0.0),
            damage: 50,
            explosion_radius: Some(100.0),
            ttl: TNT_MAX_LIFETIME,
            inert: false,
        });

        run(&mut world, &TickInput::default(), 0.5);
        assert!(world.projectiles.is_empty());
        // The queue drained within the same tick
        assert!(world.pending_explosions.is_empty());
    }

    #[test]
    fn test_arrow_wall_hit_is_silent() {
        let mut world = started_world();
        world.projectiles.push(Projectile {
            id: 900,
            owner: Owner::Player,
            pos: Vec2::new(2.5 * TILE_SIZE, world.player.pos.y),
            vel: Vec2::new(-ARROW_SPEED, 0.0),
            damage: 20,
            explosion_radius: None,
            ttl: ARROW_LIFETIME,
            inert: false,
        });
        let health_before = world.player.health;

        run(&mut world, &TickInput::default(), 0.3);
        assert!(world.projectiles.is_empty());
        assert_eq!(world.player.health, health_before);
    }

    #[test]
    fn test_melee_zone_hits_three_targets_once_each() {
        let mut world = started_world();
        world.select_weapon(WeaponKind::Sword);
        let center = world.player.pos;
        for (index, offset) in [
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 12.0),
            Vec2::new(100.0, -12.0),
        ]
        .iter()
        .enumerate()
        {
            let mut mob = Mob::hostile(MobId(100 + index as u32), MobKind::Zombie, center + *offset);
            mob.speed = 0.0;
            world.mobs.push(mob);
        }

        // One swing, then hold
        let swing = TickInput {
            attack: true,
            aim: center + Vec2::new(150.0, 0.0),
            ..TickInput::default()
        };
        tick(&mut world, &swing, SIM_DT);
        assert!(world.hit_zone.is_some());

        let expected = MOB_MAX_HEALTH - world.player.attack_damage;
        for mob in &world.mobs {
            assert_eq!(mob.health, expected);
        }

        // Overlap re-tested on later ticks while the zone lives: no
        // second hit on any target
        run(&mut world, &TickInput::default(), 0.1);
        for mob in &world.mobs {
            assert_eq!(mob.health, expected);
        }

        // The scheduler clears the zone after its lifetime
        run(&mut world, &TickInput::default(), 0.1);
        assert!(world.hit_zone.is_none());
    }

    #[test]
    fn test_skeleton_arrow_damages_player() {
        let mut world = started_world();
        let id = world.alloc_mob_id();
        world
            .mobs
            .push(Mob::hostile(id, MobKind::Skeleton, world.player.pos + Vec2::new(200.0, 0.0)));

        run(&mut world, &TickInput::default(), 0.6);

        assert_eq!(world.player.health, PLAYER_MAX_HEALTH - MOB_CONTACT_DAMAGE);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_creeper_detonation_sequence() {
        let mut world = started_world();
        let id = world.alloc_mob_id();
        world
            .mobs
            .push(Mob::hostile(id, MobKind::Creeper, world.player.pos + Vec2::new(50.0, 0.0)));

        // Arming starts on the first behavior tick; flashes follow
        run(&mut world, &TickInput::default(), 0.2);
        let creeper = world.mobs.iter().find(|m| m.id == id).unwrap();
        assert!(matches!(
            creeper.behavior,
            BehaviorState::Detonate { arming: Some(_), .. }
        ));
        assert_eq!(creeper.vel, Vec2::ZERO);

        // Fuse is six half-periods; well past it the creeper is gone and
        // the burst landed: floor(75 * (1 - 50/100)) = 37
        run(&mut world, &TickInput::default(), 0.6);
        assert!(world.mobs.iter().all(|m| m.id != id));
        assert_eq!(world.player.health, PLAYER_MAX_HEALTH - 37);
        // Self-destruction is not a kill: no score, no orb
        assert_eq!(world.score, 0);
        assert!(world.mobs.iter().all(|m| !m.is_pickup()));
        // Its pulse timer was cancelled with it (only the spawn timer lives)
        assert_eq!(world.sched.len(), 1);
    }

    #[test]
    fn test_killed_hostile_scores_and_drops_orb() {
        let mut world = started_world();
        let id = world.alloc_mob_id();
        let pos = world.player.pos + Vec2::new(120.0, 0.0);
        let mut mob = Mob::hostile(id, MobKind::Zombie, pos);
        mob.speed = 0.0;
        mob.health = 10;
        world.mobs.push(mob);

        // One bow shot kills it
        let input = TickInput {
            attack: true,
            aim: pos,
            ..TickInput::default()
        };
        run(&mut world, &input, 0.4);

        assert_eq!(world.score, SCORE_PER_KILL);
        let orb = world.mobs.iter().find(|m| m.is_pickup()).unwrap();
        assert_eq!(orb.pos, pos);
        if let BehaviorState::Pickup { value, .. } = orb.behavior {
            assert!((XP_VALUE_MIN..=XP_VALUE_MAX).contains(&value));
        } else {
            panic!("orb should carry a pickup state");
        }
    }

    #[test]
    fn test_level_up_freezes_world_and_notifies() {
        let mut world = started_world();
        let id = world.alloc_mob_id();
        world
            .mobs
            .push(Mob::xp_orb(id, world.player.pos + Vec2::new(50.0, 0.0), 10));

        run(&mut world, &TickInput::default(), 1.0);

        assert!(world.pause.holds(SystemPauseReason::LevelUp));
        assert_eq!(world.player.level, 2);
        let events = world.drain_events();
        assert!(events.iter().any(|event| matches!(
            event,
            Notification::LevelUp { level: 2, .. }
        )));
        assert!(world.mobs.is_empty());

        // The host applies a reward and clears the overlay
        world.apply_upgrade(crate::sim::world::Upgrade::AttackDamage);
        world.set_system_pause(SystemPauseReason::LevelUp, false);
        assert!(!world.pause.is_paused());
    }

    #[test]
    fn test_player_death_neutralizes_world() {
        let mut world = started_world();
        world.player.health = 1;
        let id = world.alloc_mob_id();
        world
            .mobs
            .push(Mob::hostile(id, MobKind::Zombie, world.player.pos + Vec2::new(20.0, 0.0)));

        run(&mut world, &TickInput::default(), 0.1);

        assert!(world.player.dead);
        assert!(world.pause.holds(SystemPauseReason::Death));
        assert!(world.pause.is_paused());
        let events = world.drain_events();
        assert!(events.contains(&Notification::PlayerDied));
        for mob in &world.mobs {
            assert_eq!(mob.vel, Vec2::ZERO);
        }

        // The world stays frozen afterwards
        let frozen_time = world.time;
        run(&mut world, &TickInput::default(), 0.5);
        assert_eq!(world.time, frozen_time);
    }

    #[test]
    fn test_spawn_timer_populates_world() {
        let config = WorldConfig {
            spawn_interval: 0.1,
            ..WorldConfig::default()
        };
        let mut world = World::new(bordered_grid(30, 30), config).unwrap();
        world.start_game();

        run(&mut world, &TickInput::default(), 1.0);
        assert!(!world.mobs.is_empty());
        // Spawns land on the open edge ring
        for mob in world.mobs.iter().filter(|m| !m.is_pickup()) {
            assert!(world.spawn_points.contains(&mob.pos) || mob.vel != Vec2::ZERO);
        }
    }

    #[test]
    fn test_stats_notification_carries_only_changes() {
        let mut world = started_world();
        let id = world.alloc_mob_id();
        let pos = world.player.pos + Vec2::new(120.0, 0.0);
        let mut mob = Mob::hostile(id, MobKind::Zombie, pos);
        mob.speed = 0.0;
        mob.health = 10;
        world.mobs.push(mob);

        let input = TickInput {
            attack: true,
            aim: pos,
            ..TickInput::default()
        };
        run(&mut world, &input, 0.4);

        let stats: Vec<_> = world
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                Notification::Stats(update) => Some(update),
                _ => None,
            })
            .collect();
        // The kill tick reports the score; untouched fields stay None
        assert!(stats
            .iter()
            .any(|update| update.score == Some(SCORE_PER_KILL) && update.health.is_none()));
    }
}
