//! The world aggregate and its external interface
//!
//! One `World` owns every collection, the pause controller, the scheduler,
//! and the seeded RNG; everything is constructed once and wired by
//! reference - no globals. The presentation layer drives it through the
//! narrow methods here and consumes the [`Notification`] queue; it never
//! reaches into gameplay state directly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::actor::{Mob, MobId, MobKind, Player, UnknownMobKind};
use crate::sim::combat::ExplosionEvent;
use crate::sim::map::{MapError, Tile, TileMap};
use crate::sim::pause::{PauseChange, PauseController, SystemPauseReason};
use crate::sim::sched::{Scheduler, TimerAction};
use crate::sim::weapons::{HitZone, Projectile, Weapon, WeaponKind};

/// Partial stat snapshot; only changed fields are `Some`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsUpdate {
    pub score: Option<u64>,
    pub health: Option<u32>,
    pub max_health: Option<u32>,
    pub xp: Option<u32>,
    pub level: Option<u32>,
    pub xp_to_next_level: Option<u32>,
}

/// Outbound events for the presentation layer, drained once per frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Notification {
    Stats(StatsUpdate),
    WeaponChange {
        key: &'static str,
        name: &'static str,
    },
    PauseChanged {
        paused: bool,
        user_paused: bool,
    },
    PlayerDied,
    LevelUp {
        level: u32,
        max_health: u32,
        attack_damage: u32,
    },
}

/// Level-up reward the host's overlay picks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Upgrade {
    /// Raise max health by 10-30 and heal by the same amount
    MaxHealth,
    /// Restore 10-50 health
    Heal,
    /// +5 attack damage
    AttackDamage,
    /// +20 movement speed
    MoveSpeed,
}

/// Host-tunable simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub seed: u64,
    /// Seconds between world-edge hostile spawns
    pub spawn_interval: f32,
    /// Whether fleeing hostiles collide with walls or may leave the arena
    pub flee_respects_walls: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            spawn_interval: MOB_SPAWN_INTERVAL,
            flee_respects_walls: true,
        }
    }
}

#[derive(Debug)]
pub struct World {
    /// Simulation clock in seconds; advances only while unpaused
    pub time: f32,
    pub map: TileMap,
    pub player: Player,
    pub mobs: Vec<Mob>,
    pub projectiles: Vec<Projectile>,
    /// The single live melee swing zone, if any
    pub hit_zone: Option<HitZone>,
    pub pause: PauseController,
    pub sched: Scheduler,
    pub score: u64,
    pub config: WorldConfig,
    pub(crate) spawn_points: Vec<Vec2>,
    pub(crate) rng: Pcg32,
    /// Actors queued for the next tick boundary
    pub(crate) pending_spawns: Vec<Mob>,
    /// Area bursts queued for the explosion-resolution phase
    pub(crate) pending_explosions: Vec<ExplosionEvent>,
    pub(crate) events: Vec<Notification>,
    pub(crate) next_mob_id: u32,
    pub(crate) next_projectile_id: u32,
}

impl World {
    /// Build a world from the map collaborator's grid. The world starts
    /// frozen behind the main-menu pause reason; `start_game` releases it.
    pub fn new(grid: Vec<Vec<Tile>>, config: WorldConfig) -> Result<Self, MapError> {
        let map = TileMap::new(grid)?;
        let spawn_points = map.edge_spawn_points();
        let player_pos = map.center_open_cell().ok_or(MapError::NoSpawnPoints)?;

        let mut world = Self {
            time: 0.0,
            player: Player::new(player_pos),
            mobs: Vec::new(),
            projectiles: Vec::new(),
            hit_zone: None,
            pause: PauseController::new(),
            sched: Scheduler::new(),
            score: 0,
            rng: Pcg32::seed_from_u64(config.seed),
            spawn_points,
            pending_spawns: Vec::new(),
            pending_explosions: Vec::new(),
            events: Vec::new(),
            next_mob_id: 1,
            next_projectile_id: 1,
            config,
            map,
        };

        let change = world.pause.set_system_pause(SystemPauseReason::MainMenu, true);
        world.apply_pause_change(change);
        world
            .sched
            .schedule(world.config.spawn_interval, true, TimerAction::SpawnMob);
        Ok(world)
    }

    /// The host's "game started" trigger: clears the main-menu reason and
    /// syncs the HUD.
    pub fn start_game(&mut self) {
        self.set_system_pause(SystemPauseReason::MainMenu, false);
        let kind = self.player.weapon.kind;
        self.events.push(Notification::WeaponChange {
            key: kind.key(),
            name: kind.display_name(),
        });
        self.push_full_stats();
        log::info!("game started");
    }

    pub fn set_user_pause(&mut self, paused: bool) {
        let change = self.pause.set_user_pause(paused);
        self.apply_pause_change(change);
    }

    pub fn toggle_user_pause(&mut self) {
        let change = self.pause.toggle_user_pause();
        self.apply_pause_change(change);
    }

    /// Add or remove a system pause reason on behalf of a collaborator.
    pub fn set_system_pause(&mut self, reason: SystemPauseReason, active: bool) {
        let change = self.pause.set_system_pause(reason, active);
        self.apply_pause_change(change);
    }

    /// Swap the equipped weapon. Accepted while paused (a state-only
    /// effect); ignored while dead or when the weapon is already equipped.
    pub fn select_weapon(&mut self, kind: WeaponKind) {
        if self.player.dead || self.player.weapon.kind == kind {
            return;
        }
        self.player.weapon = Weapon::new(kind);
        self.events.push(Notification::WeaponChange {
            key: kind.key(),
            name: kind.display_name(),
        });
    }

    /// Mini-game entry handshake: neutralize in-flight actors and hold the
    /// world behind the mini-game reason.
    pub fn begin_mini_game(&mut self) {
        self.neutralize_in_flight();
        self.set_system_pause(SystemPauseReason::MiniGame, true);
    }

    /// Mini-game exit handshake; a win restores health.
    pub fn end_mini_game(&mut self, won: bool) {
        if won && !self.player.dead {
            self.player.heal(MINI_GAME_REWARD_HP);
            self.events.push(Notification::Stats(StatsUpdate {
                health: Some(self.player.health),
                max_health: Some(self.player.max_health),
                ..StatsUpdate::default()
            }));
            log::info!("mini-game won, restored {} hp", MINI_GAME_REWARD_HP);
        }
        self.set_system_pause(SystemPauseReason::MiniGame, false);
    }

    /// Apply the reward picked on the level-up overlay. The host clears
    /// the level-up pause reason afterwards.
    pub fn apply_upgrade(&mut self, upgrade: Upgrade) {
        if self.player.dead {
            return;
        }
        match upgrade {
            Upgrade::MaxHealth => {
                let boost = self.rng.random_range(10..=30);
                self.player.max_health += boost;
                self.player.health = (self.player.health + boost).min(self.player.max_health);
                log::info!("upgrade: +{} max health", boost);
            }
            Upgrade::Heal => {
                let amount = self.rng.random_range(10..=50);
                self.player.heal(amount);
                log::info!("upgrade: healed {}", amount);
            }
            Upgrade::AttackDamage => {
                self.player.attack_damage += LEVEL_DAMAGE_BONUS;
                log::info!("upgrade: +{} attack damage", LEVEL_DAMAGE_BONUS);
            }
            Upgrade::MoveSpeed => {
                self.player.speed_bonus += 20.0;
                log::info!("upgrade: +20 move speed");
            }
        }
        self.push_full_stats();
    }

    /// Queue a hostile spawn from the host ("spawn at position"). The
    /// actor joins the world at the next tick boundary. Unknown kind names
    /// are a caller defect and fail loudly.
    pub fn request_spawn(&mut self, name: &str, pos: Vec2) -> Result<(), UnknownMobKind> {
        let kind = MobKind::from_name(name)?;
        let id = self.alloc_mob_id();
        self.pending_spawns.push(Mob::hostile(id, kind, pos));
        Ok(())
    }

    /// Drain the outbound notification queue.
    pub fn drain_events(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn alloc_mob_id(&mut self) -> MobId {
        let id = MobId(self.next_mob_id);
        self.next_mob_id += 1;
        id
    }

    /// Pick a random hostile kind and edge spawn point for the periodic
    /// spawn timer.
    pub(crate) fn spawn_random_mob(&mut self) {
        if self.player.dead || self.spawn_points.is_empty() {
            return;
        }
        let kind = crate::sim::actor::HOSTILE_KINDS
            [self.rng.random_range(0..crate::sim::actor::HOSTILE_KINDS.len())];
        let pos = self.spawn_points[self.rng.random_range(0..self.spawn_points.len())];
        let id = self.alloc_mob_id();
        self.pending_spawns.push(Mob::hostile(id, kind, pos));
        log::debug!("spawning {:?} at ({:.0}, {:.0})", kind, pos.x, pos.y);
    }

    /// Mirror a pause transition into the scheduler and the notification
    /// queue. Exactly one notification per transition.
    pub(crate) fn apply_pause_change(&mut self, change: Option<PauseChange>) {
        let Some(change) = change else { return };
        self.sched.set_paused(change.paused);
        self.events.push(Notification::PauseChanged {
            paused: change.paused,
            user_paused: change.user_paused,
        });
        log::debug!(
            "pause -> {} (user: {})",
            change.paused,
            change.user_paused
        );
    }

    /// Death and mini-game entry must stop the world harder than a pause:
    /// zero velocities and disable further projectile collision.
    pub(crate) fn neutralize_in_flight(&mut self) {
        self.player.vel = Vec2::ZERO;
        for mob in &mut self.mobs {
            mob.vel = Vec2::ZERO;
        }
        for projectile in &mut self.projectiles {
            projectile.vel = Vec2::ZERO;
            projectile.inert = true;
        }
    }

    pub(crate) fn push_full_stats(&mut self) {
        self.events.push(Notification::Stats(StatsUpdate {
            score: Some(self.score),
            health: Some(self.player.health),
            max_health: Some(self.player.max_health),
            xp: Some(self.player.xp),
            level: Some(self.player.level),
            xp_to_next_level: Some(self.player.xp_to_next_level),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn world() -> World {
        World::new(bordered_grid(20, 20), WorldConfig::default()).unwrap()
    }

    #[test]
    fn test_world_starts_frozen_at_main_menu() {
        let mut world = world();
        assert!(world.pause.is_paused());
        assert!(world.pause.holds(SystemPauseReason::MainMenu));
        // The spawn timer exists but is frozen with the world
        assert_eq!(world.sched.len(), 1);

        let events = world.drain_events();
        assert!(events.contains(&Notification::PauseChanged {
            paused: true,
            user_paused: false
        }));
    }

    #[test]
    fn test_start_game_releases_menu_pause() {
        let mut world = world();
        world.drain_events();
        world.start_game();

        assert!(!world.pause.is_paused());
        let events = world.drain_events();
        assert!(events.contains(&Notification::PauseChanged {
            paused: false,
            user_paused: false
        }));
        assert!(events.iter().any(|event| matches!(
            event,
            Notification::WeaponChange { key: "bow", .. }
        )));
        assert!(events.iter().any(|event| matches!(event, Notification::Stats(_))));
    }

    #[test]
    fn test_user_pause_rejected_under_system_reason() {
        let mut world = world();
        world.toggle_user_pause();
        assert!(!world.pause.user_paused());
    }

    #[test]
    fn test_scheduler_mirrors_every_transition() {
        let mut world = world();
        world.start_game();
        let id = world.sched.schedule(10.0, false, TimerAction::ClearHitZone);
        assert_eq!(world.sched.handle_paused(id), Some(false));

        world.toggle_user_pause();
        assert_eq!(world.sched.handle_paused(id), Some(true));

        world.toggle_user_pause();
        assert_eq!(world.sched.handle_paused(id), Some(false));

        world.set_system_pause(SystemPauseReason::MiniGame, true);
        assert_eq!(world.sched.handle_paused(id), Some(true));
    }

    #[test]
    fn test_mini_game_handshake_reward_clamped() {
        let mut world = world();
        world.start_game();
        world.player.health = 80;
        world.drain_events();

        world.begin_mini_game();
        assert!(world.pause.holds(SystemPauseReason::MiniGame));

        world.end_mini_game(true);
        assert!(!world.pause.is_paused());
        assert_eq!(world.player.health, world.player.max_health);

        let events = world.drain_events();
        assert!(events.iter().any(|event| matches!(
            event,
            Notification::Stats(StatsUpdate {
                health: Some(100),
                ..
            })
        )));
    }

    #[test]
    fn test_mini_game_loss_gives_no_reward() {
        let mut world = world();
        world.start_game();
        world.player.health = 80;

        world.begin_mini_game();
        world.end_mini_game(false);
        assert_eq!(world.player.health, 80);
        assert!(!world.pause.is_paused());
    }

    #[test]
    fn test_mini_game_neutralizes_projectiles() {
        let mut world = world();
        world.start_game();
        world.projectiles.push(Projectile {
            id: 900,
            owner: crate::sim::weapons::Owner::Player,
            pos: world.player.pos,
            vel: Vec2::new(100.0, 0.0),
            damage: 10,
            explosion_radius: None,
            ttl: 1.0,
            inert: false,
        });

        world.begin_mini_game();
        assert_eq!(world.projectiles[0].vel, Vec2::ZERO);
        assert!(world.projectiles[0].inert);
    }

    #[test]
    fn test_select_weapon_notifies_once() {
        let mut world = world();
        world.start_game();
        world.drain_events();

        world.select_weapon(WeaponKind::Sword);
        world.select_weapon(WeaponKind::Sword);

        let changes: Vec<_> = world
            .drain_events()
            .into_iter()
            .filter(|event| matches!(event, Notification::WeaponChange { .. }))
            .collect();
        assert_eq!(
            changes,
            vec![Notification::WeaponChange {
                key: "iron_sword",
                name: "Sword"
            }]
        );
    }

    #[test]
    fn test_select_weapon_ignored_while_dead() {
        let mut world = world();
        world.start_game();
        world.player.dead = true;
        world.drain_events();

        world.select_weapon(WeaponKind::Tnt);
        assert_eq!(world.player.weapon.kind, WeaponKind::Bow);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_request_spawn_unknown_kind_fails() {
        let mut world = world();
        assert!(world.request_spawn("enderman", Vec2::new(64.0, 64.0)).is_err());
        assert!(world.pending_spawns.is_empty());

        world.request_spawn("zombie", Vec2::new(64.0, 64.0)).unwrap();
        assert_eq!(world.pending_spawns.len(), 1);
    }

    #[test]
    fn test_upgrades_apply_decorator_effects() {
        let mut world = world();
        world.start_game();

        let damage = world.player.attack_damage;
        world.apply_upgrade(Upgrade::AttackDamage);
        assert_eq!(world.player.attack_damage, damage + LEVEL_DAMAGE_BONUS);

        world.apply_upgrade(Upgrade::MoveSpeed);
        assert_eq!(world.player.speed_bonus, 20.0);
        assert_eq!(world.player.effective_speed(), PLAYER_SPEED + 20.0);

        let max = world.player.max_health;
        world.apply_upgrade(Upgrade::MaxHealth);
        let boost = world.player.max_health - max;
        assert!((10..=30).contains(&boost));
        assert_eq!(world.player.health, world.player.max_health);
    }
}
