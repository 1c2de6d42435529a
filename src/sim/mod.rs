//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entities;
pub mod geometry;
pub mod resources;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{CollisionReport, PlayerContact, resolve};
pub use entities::{
    AreaBlast, Beam, Body, Enemy, EnemyState, Explosion, Player, PlayerStatus, Projectile,
};
pub use geometry::Rect;
pub use resources::{Ammunition, Cooldown, Cooldowns};
pub use snapshot::FrameSnapshot;
pub use state::{GameEvent, GamePhase, GameState, PlayerMood};
pub use tick::{Action, HeldKeys, TickInput, tick};
pub use wave::Wave;
