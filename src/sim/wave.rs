//! Wave controller
//!
//! A wave is a difficulty epoch: population cap, spawn cadence and kill
//! target all derive from the wave index. A finished wave is replaced by a
//! fresh `Wave::new(index + 1)`, never mutated into the next one.

use serde::{Deserialize, Serialize};

use crate::consts::{WAVE_BASE_SPAWN_INTERVAL, WAVE_TITLE_TICKS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    /// 1-based wave index
    pub index: u32,
    /// Maximum enemies alive at once
    pub max_enemies: u32,
    /// Minimum ticks between spawns
    pub spawn_interval: f32,
    /// Kills needed to finish the wave
    pub kill_target: u32,
    /// Kills recorded so far
    pub kills: u32,
    /// Ticks since the last spawn
    pub ticks_since_spawn: u32,
    /// Ticks since this wave started
    pub age: u32,
}

impl Wave {
    pub fn new(index: u32) -> Self {
        let index = index.max(1);
        Self {
            index,
            max_enemies: max_enemies_for(index),
            spawn_interval: WAVE_BASE_SPAWN_INTERVAL / index as f32,
            kill_target: kill_target_for(index),
            kills: 0,
            ticks_since_spawn: 0,
            age: 0,
        }
    }

    /// Ask for permission to spawn an enemy. Grants (and restarts the
    /// cadence) iff the population is under the cap and enough ticks have
    /// passed since the last spawn.
    pub fn try_spawn(&mut self, enemy_count: usize) -> bool {
        if enemy_count < self.max_enemies as usize
            && self.ticks_since_spawn as f32 >= self.spawn_interval
        {
            self.ticks_since_spawn = 0;
            return true;
        }
        false
    }

    pub fn record_kill(&mut self) {
        self.kills += 1;
    }

    pub fn is_complete(&self) -> bool {
        self.kills >= self.kill_target
    }

    pub fn kills_remaining(&self) -> u32 {
        self.kill_target.saturating_sub(self.kills)
    }

    /// Whether the "WAVE n" banner is up
    pub fn show_title(&self) -> bool {
        self.age < WAVE_TITLE_TICKS
    }

    /// Per-tick bookkeeping
    pub fn advance(&mut self) {
        self.ticks_since_spawn += 1;
        self.age += 1;
    }

    /// The wave that supersedes this one
    pub fn next(&self) -> Self {
        Self::new(self.index + 1)
    }
}

pub fn max_enemies_for(index: u32) -> u32 {
    1 + 2 * index
}

pub fn kill_target_for(index: u32) -> u32 {
    10 * index
}
