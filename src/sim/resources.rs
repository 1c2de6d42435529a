//! Ability cooldowns and the shot magazine

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Countdown gate for one special ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Ticks until the ability can be used again (0 = ready)
    remaining: u32,
    /// Value loaded on trigger
    duration: u32,
}

impl Cooldown {
    pub fn new(duration: u32) -> Self {
        Self {
            remaining: 0,
            duration,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    /// Arm the cooldown if it is ready. Returns false (and changes nothing)
    /// while it is still counting down.
    pub fn try_trigger(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.remaining = self.duration;
        true
    }

    /// One tick of countdown
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Remaining time in whole seconds at the given tick rate
    pub fn remaining_secs(&self, tick_rate_hz: u32) -> u32 {
        self.remaining / tick_rate_hz.max(1)
    }
}

/// The three independent ability cooldowns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cooldowns {
    pub area_blast: Cooldown,
    pub emp: Cooldown,
    pub invulnerability: Cooldown,
}

impl Default for Cooldowns {
    fn default() -> Self {
        Self {
            area_blast: Cooldown::new(AREA_BLAST_COOLDOWN),
            emp: Cooldown::new(EMP_COOLDOWN),
            invulnerability: Cooldown::new(INVULNERABILITY_COOLDOWN),
        }
    }
}

impl Cooldowns {
    pub fn tick(&mut self) {
        self.area_blast.tick();
        self.emp.tick();
        self.invulnerability.tick();
    }
}

/// Finite shot pool with a delayed full reload once empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ammunition {
    remaining: u32,
    capacity: u32,
    /// Ticks spent empty so far
    reload_ticks: u32,
    /// Ticks spent empty before the magazine refills
    reload_threshold: u32,
}

impl Default for Ammunition {
    fn default() -> Self {
        Self::new(AMMO_CAPACITY, AMMO_RELOAD_TICKS)
    }
}

impl Ammunition {
    pub fn new(capacity: u32, reload_threshold: u32) -> Self {
        Self {
            remaining: capacity,
            capacity,
            reload_ticks: 0,
            reload_threshold,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_reloading(&self) -> bool {
        self.remaining == 0
    }

    /// Reload progress in [0, 1] while empty, 0 otherwise
    pub fn reload_progress(&self) -> f32 {
        if !self.is_reloading() || self.reload_threshold == 0 {
            return 0.0;
        }
        self.reload_ticks as f32 / self.reload_threshold as f32
    }

    /// Take `shots` rounds at once. All-or-nothing: fails without touching
    /// the magazine if fewer than `shots` remain.
    pub fn try_consume(&mut self, shots: u32) -> bool {
        if shots == 0 || self.remaining < shots {
            return false;
        }
        self.remaining -= shots;
        true
    }

    /// Drop every remaining round (debug trigger)
    pub fn empty(&mut self) {
        self.remaining = 0;
    }

    /// Advance the reload counter. Returns true on the tick the magazine
    /// refills.
    pub fn tick(&mut self) -> bool {
        if self.remaining > 0 {
            self.reload_ticks = 0;
            return false;
        }
        self.reload_ticks += 1;
        if self.reload_ticks >= self.reload_threshold {
            self.remaining = self.capacity;
            self.reload_ticks = 0;
            return true;
        }
        false
    }
}
