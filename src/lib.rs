//! Wave Blaster - a wave-based 2D arcade shoot-em-up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, abilities)
//! - `platform`: Seam to the rendering/input engine (input, snapshots, pacing)
//! - `settings`: Runtime settings loaded from JSON

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICK_RATE_HZ: u32 = 50;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 1600.0;
    pub const PLAY_HEIGHT: f32 = 900.0;

    /// Player defaults
    pub const PLAYER_START: Vec2 = Vec2::new(900.0, 400.0);
    pub const PLAYER_SIZE: Vec2 = Vec2::new(96.0, 96.0);
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_BOOST_SPEED: f32 = 20.0;
    pub const PLAYER_LIFE: u32 = 3;

    /// Enemy bomb
    pub const PROJECTILE_SPEED: f32 = 6.0;
    pub const PROJECTILE_MIN_RADIUS: u32 = 10;
    pub const PROJECTILE_MAX_RADIUS: u32 = 50;
    /// Bomb palette (RGB), picked at random per bomb
    pub const PROJECTILE_PALETTE: [[u8; 3]; 6] = [
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [255, 255, 0],
        [255, 0, 255],
        [0, 255, 255],
    ];

    /// Player shot
    pub const BEAM_SPEED: f32 = 30.0;
    pub const BEAM_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    /// Volley fan spans -SPREAD..=+SPREAD degrees around the facing
    pub const VOLLEY_HALF_SPREAD_DEG: f32 = 50.0;
    pub const DEFAULT_VOLLEY_SIZE: u32 = 4;

    /// Enemy behaviour
    pub const ENEMY_SIZE: Vec2 = Vec2::new(80.0, 80.0);
    pub const ENEMY_APPROACH_SPEED: f32 = 6.0;
    pub const ENEMY_CREEP_SPEED: f32 = 1.0;
    pub const ENEMY_VERTICAL_DAMPING: f32 = 0.95;
    pub const ENEMY_VERTICAL_KICK: f32 = 10.0;
    /// Vertical velocity is re-rolled every this many age ticks while attacking
    pub const ENEMY_KICK_PERIOD: u32 = 100;
    pub const ENEMY_MAX_START_AGE: u32 = 30;
    pub const ENEMY_STOP_LINE_MIN: f32 = PLAY_WIDTH * 3.0 / 4.0;
    pub const ENEMY_STOP_LINE_MAX: f32 = PLAY_WIDTH - 50.0;
    pub const ENEMY_BOMB_INTERVAL_MIN: u32 = 50;
    pub const ENEMY_BOMB_INTERVAL_MAX: u32 = 300;

    /// Explosions (purely cosmetic)
    pub const EXPLOSION_SIZE: Vec2 = Vec2::new(100.0, 100.0);
    pub const EXPLOSION_SHORT_TICKS: u32 = 50;
    pub const EXPLOSION_LONG_TICKS: u32 = 100;
    /// Frame marker flips every this many ticks
    pub const EXPLOSION_FRAME_TICKS: u32 = 10;

    /// Special abilities
    pub const AREA_BLAST_LIFETIME: u32 = 400;
    pub const AREA_BLAST_COOLDOWN: u32 = 60 * TICK_RATE_HZ;
    pub const EMP_COOLDOWN: u32 = 15 * TICK_RATE_HZ;
    pub const EMP_FLASH_MS: u64 = 50;
    pub const INVULNERABILITY_DURATION: u32 = 500;
    pub const INVULNERABILITY_COOLDOWN: u32 = 60 * TICK_RATE_HZ;

    /// Ammunition
    pub const AMMO_CAPACITY: u32 = 20;
    pub const AMMO_RELOAD_TICKS: u32 = 100;

    /// Waves
    pub const WAVE_BASE_SPAWN_INTERVAL: f32 = 200.0;
    pub const WAVE_TITLE_TICKS: u32 = 60;

    /// Scoring
    pub const SCORE_PROJECTILE: u64 = 1;
    pub const SCORE_ENEMY: u64 = 10;
    pub const SCORE_ABSORBED_HIT: u64 = 1;

    /// Pause held on the final frame before the run ends
    pub const GAME_OVER_PAUSE_MS: u64 = 2000;
}

/// Unit heading for an angle in degrees, measured counter-clockwise on
/// screen (y grows downward, so positive angles point up).
#[inline]
pub fn heading_from_degrees(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), -radians.sin())
}

/// Screen angle in degrees of a (not necessarily unit) direction
#[inline]
pub fn degrees_of(direction: Vec2) -> f32 {
    (-direction.y).atan2(direction.x).to_degrees()
}
