//! Simulation core
//!
//! All gameplay logic lives here. The module is single-threaded and
//! tick-driven:
//! - Fixed timestep only, one `tick` per host frame
//! - Seeded RNG only
//! - Pause state evaluated once at the top of each tick
//! - Collections mutated only at tick boundaries
//! - No rendering or platform dependencies

pub mod actor;
pub mod behavior;
pub mod combat;
pub mod map;
pub mod pause;
pub mod sched;
pub mod tick;
pub mod weapons;
pub mod world;

pub use actor::{BehaviorState, Mob, MobId, MobKind, Player, UnknownMobKind};
pub use combat::ExplosionEvent;
pub use map::{MapError, Tile, TileMap};
pub use pause::{PauseChange, PauseController, SystemPauseReason};
pub use sched::{Scheduler, TimerAction, TimerId};
pub use tick::{TickInput, tick};
pub use weapons::{HitZone, Owner, Projectile, Weapon, WeaponKind};
pub use world::{Notification, StatsUpdate, Upgrade, World, WorldConfig};
