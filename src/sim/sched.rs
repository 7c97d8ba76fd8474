//! Pause-aware timer registry
//!
//! Gameplay timers freeze with the world, so they never sit on the host's
//! own timer primitive. Each handle carries a paused flag mirrored from the
//! pause controller at creation and on every transition; a paused handle's
//! countdown does not advance. Timers carry a data payload the tick driver
//! dispatches on when they fire, instead of boxed callbacks.

use serde::{Deserialize, Serialize};

use crate::sim::actor::MobId;

/// Handle identifying a live timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerId(pub u32);

/// What a fired timer does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Remove the active melee hit zone
    ClearHitZone,
    /// Toggle an arming mob's warning flash
    DetonatorPulse(MobId),
    /// Detonate an armed mob at its current position
    Detonate(MobId),
    /// Periodic world-edge hostile spawn
    SpawnMob,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    id: TimerId,
    remaining: f32,
    interval: f32,
    repeat: bool,
    paused: bool,
    action: TimerAction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    timers: Vec<Timer>,
    paused: bool,
    next_id: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timer. The handle inherits the registry's mirrored pause
    /// flag, so timers created while the world is frozen start frozen.
    pub fn schedule(&mut self, delay: f32, repeat: bool, action: TimerAction) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            remaining: delay,
            interval: delay,
            repeat,
            paused: self.paused,
            action,
        });
        id
    }

    /// Cancel a live handle. Already-fired or unknown ids are a no-op, so
    /// owners can cancel unconditionally on destruction.
    pub fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|timer| timer.id != id);
    }

    /// Mirror a pause transition onto every live handle.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        for timer in &mut self.timers {
            timer.paused = paused;
        }
    }

    /// Advance unpaused handles by `dt`, appending fired actions in
    /// schedule order. One-shot handles self-remove on fire; repeating
    /// handles rearm at their interval.
    pub fn tick(&mut self, dt: f32, fired: &mut Vec<TimerAction>) {
        let mut index = 0;
        while index < self.timers.len() {
            let timer = &mut self.timers[index];
            if timer.paused {
                index += 1;
                continue;
            }
            timer.remaining -= dt;
            if timer.remaining > 0.0 {
                index += 1;
                continue;
            }
            fired.push(timer.action);
            if timer.repeat {
                timer.remaining += timer.interval;
                if timer.remaining <= 0.0 {
                    // Fire at most once per tick even after a long stall
                    timer.remaining = timer.interval;
                }
                index += 1;
            } else {
                self.timers.remove(index);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Whether the handle is still registered.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|timer| timer.id == id)
    }

    /// Paused flag of a live handle, `None` once fired or cancelled.
    pub fn handle_paused(&self, id: TimerId) -> Option<bool> {
        self.timers.iter().find(|timer| timer.id == id).map(|timer| timer.paused)
    }
}
