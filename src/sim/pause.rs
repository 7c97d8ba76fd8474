//! Pause control
//!
//! Two inputs merge into the single signal the rest of the simulation
//! consumes: an exclusive user-pause flag and a set of independently held
//! system reasons (main menu, death, level-up, the repair mini-game).
//! Reasons are additive: every reason must clear before the world can
//! resume, and the user cannot unpause a world the system holds frozen.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A named cause that holds the world frozen independently of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SystemPauseReason {
    MainMenu,
    Death,
    LevelUp,
    MiniGame,
}

/// One pause transition, forwarded to the presentation layer so it can tell
/// "player chose to pause" from "world frozen by an event".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseChange {
    /// The merged signal gameplay logic consumes
    pub paused: bool,
    /// The raw user flag
    pub user_paused: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PauseController {
    user_paused: bool,
    system_reasons: BTreeSet<SystemPauseReason>,
}

impl PauseController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective pause: user flag OR any held system reason.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.user_paused || !self.system_reasons.is_empty()
    }

    #[inline]
    pub fn user_paused(&self) -> bool {
        self.user_paused
    }

    /// Whether a specific system reason is currently held.
    pub fn holds(&self, reason: SystemPauseReason) -> bool {
        self.system_reasons.contains(&reason)
    }

    /// Set the user flag. Rejected while any system reason is held: system
    /// intent always wins. Returns the transition if the effective signal
    /// changed.
    pub fn set_user_pause(&mut self, paused: bool) -> Option<PauseChange> {
        if !self.system_reasons.is_empty() {
            return None;
        }
        if self.user_paused == paused {
            return None;
        }
        self.user_paused = paused;
        Some(self.change())
    }

    pub fn toggle_user_pause(&mut self) -> Option<PauseChange> {
        self.set_user_pause(!self.user_paused)
    }

    /// Add or remove a system reason. Idempotent: re-adding a held reason
    /// or removing one that was never added is a no-op.
    pub fn set_system_pause(
        &mut self,
        reason: SystemPauseReason,
        active: bool,
    ) -> Option<PauseChange> {
        let was_paused = self.is_paused();
        let modified = if active {
            self.system_reasons.insert(reason)
        } else {
            self.system_reasons.remove(&reason)
        };
        if !modified || self.is_paused() == was_paused {
            return None;
        }
        Some(self.change())
    }

    fn change(&self) -> PauseChange {
        PauseChange {
            paused: self.is_paused(),
            user_paused: self.user_paused,
        }
    }
}
