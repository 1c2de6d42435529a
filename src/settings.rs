//! Runtime settings
//!
//! Loaded from an optional JSON file; every field falls back to its default
//! when missing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_VOLLEY_SIZE, EMP_FLASH_MS, GAME_OVER_PAUSE_MS, TICK_RATE_HZ};

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Run ===
    /// RNG seed; a fresh one is drawn when unset
    pub seed: Option<u64>,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
    /// Let the autopilot play
    pub idle_mode: bool,

    // === Gameplay ===
    /// Beams per volley (1 turns the volley into a single shot)
    pub volley_size: u32,

    // === Pacing ===
    /// Simulation rate
    pub tick_rate_hz: u32,
    /// Sleep at the real tick rate (off = run as fast as possible)
    pub realtime: bool,
    /// Loop stall while the EMP flash is shown
    pub emp_flash_ms: u64,
    /// Final frame hold before a lost run ends
    pub game_over_pause_ms: u64,

    // === Accessibility ===
    /// Skip the EMP flash stall
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_ticks: None,
            idle_mode: true,

            volley_size: DEFAULT_VOLLEY_SIZE,

            tick_rate_hz: TICK_RATE_HZ,
            realtime: false,
            emp_flash_ms: EMP_FLASH_MS,
            game_over_pause_ms: GAME_OVER_PAUSE_MS,

            reduced_motion: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::normalized)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values the loop can't run with
    pub fn normalized(mut self) -> Self {
        self.volley_size = self.volley_size.max(1);
        self.tick_rate_hz = self.tick_rate_hz.clamp(1, 1000);
        self
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate_hz.max(1)))
    }

    /// Effective EMP stall (respects reduced_motion)
    pub fn effective_emp_flash(&self) -> Duration {
        if self.reduced_motion {
            Duration::ZERO
        } else {
            Duration::from_millis(self.emp_flash_ms)
        }
    }

    pub fn game_over_pause(&self) -> Duration {
        Duration::from_millis(self.game_over_pause_ms)
    }
}
