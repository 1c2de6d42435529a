//! Entity kinds
//!
//! Each kind is its own struct carrying its own state. Moving kinds expose
//! an `advance` that reports whether the entity is still inside the play
//! area; timed kinds report whether they are still alive.

use glam::{IVec2, Vec2};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, direction_to, fully_in_bounds, in_bounds};
use crate::consts::*;
use crate::{degrees_of, heading_from_degrees};

/// Anything the collision resolver can test for overlap
pub trait Body {
    fn id(&self) -> u32;
    fn rect(&self) -> &Rect;
}

macro_rules! impl_body {
    ($($kind:ty),* $(,)?) => {
        $(impl Body for $kind {
            fn id(&self) -> u32 {
                self.id
            }

            fn rect(&self) -> &Rect {
                &self.rect
            }
        })*
    };
}

impl_body!(Projectile, Beam, Explosion, Enemy, AreaBlast);

/// Shared countdown rule for timed entities: lives `L` advances and is gone
/// on advance `L + 1`.
fn count_down(remaining: &mut u32) -> bool {
    match remaining.checked_sub(1) {
        Some(left) => {
            *remaining = left;
            true
        }
        None => false,
    }
}

/// Player status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Normal,
    Invulnerable { remaining: u32 },
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Last nonzero input direction (8-way, components in -1..=1)
    pub facing: IVec2,
    /// Current movement speed tier
    pub speed: f32,
    pub life: u32,
    pub status: PlayerStatus,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::new(PLAYER_START, PLAYER_SIZE),
            facing: IVec2::X,
            speed: PLAYER_SPEED,
            life: PLAYER_LIFE,
            status: PlayerStatus::Normal,
        }
    }
}

impl Player {
    /// Move by the summed input direction. The whole move is rolled back
    /// if it would leave the play area on either axis. Returns whether the
    /// player actually moved.
    pub fn step(&mut self, direction: IVec2, boosted: bool) -> bool {
        self.speed = if boosted {
            PLAYER_BOOST_SPEED
        } else {
            PLAYER_SPEED
        };
        if direction == IVec2::ZERO {
            return false;
        }
        let moved = self.rect.translated(direction.as_vec2() * self.speed);
        if !fully_in_bounds(&moved) {
            return false;
        }
        self.rect = moved;
        true
    }

    /// Update the facing; zero input keeps the previous facing
    pub fn set_facing(&mut self, direction: IVec2) {
        if direction != IVec2::ZERO {
            self.facing = direction.clamp(IVec2::NEG_ONE, IVec2::ONE);
        }
    }

    /// Screen angle of the facing, in degrees
    pub fn facing_degrees(&self) -> f32 {
        degrees_of(self.facing.as_vec2())
    }

    pub fn is_invulnerable(&self) -> bool {
        matches!(self.status, PlayerStatus::Invulnerable { .. })
    }

    pub fn make_invulnerable(&mut self, duration: u32) {
        self.status = PlayerStatus::Invulnerable {
            remaining: duration,
        };
    }

    pub fn tick_invulnerability(&mut self) {
        if let PlayerStatus::Invulnerable { mut remaining } = self.status {
            self.status = if count_down(&mut remaining) {
                PlayerStatus::Invulnerable { remaining }
            } else {
                PlayerStatus::Normal
            };
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }
}

/// Enemy bomb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
    /// Unit heading, fixed at creation
    pub velocity: Vec2,
    pub speed: f32,
    pub radius: u32,
    pub color: [u8; 3],
    /// Neutralized by EMP: still moves, can no longer hurt the player
    pub inert: bool,
}

impl Projectile {
    /// A bomb dropped from under `source`, aimed at where `target` is now
    pub fn aimed(id: u32, source: &Rect, target: &Rect, rng: &mut impl Rng) -> Self {
        let radius = rng.random_range(PROJECTILE_MIN_RADIUS..=PROJECTILE_MAX_RADIUS);
        let color = *PROJECTILE_PALETTE.choose(rng).unwrap_or(&PROJECTILE_PALETTE[0]);
        let velocity = direction_to(source, target).unwrap_or(Vec2::Y);
        let center = Vec2::new(source.center.x, source.center.y + source.size.y / 2.0);
        Self {
            id,
            rect: Rect::new(center, Vec2::splat(2.0 * radius as f32)),
            velocity,
            speed: PROJECTILE_SPEED,
            radius,
            color,
            inert: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.inert
    }

    /// EMP effect: half speed, harmless from now on
    pub fn neutralize(&mut self) {
        self.speed /= 2.0;
        self.inert = true;
    }

    /// Straight-line step; false once out of the play area
    pub fn advance(&mut self) -> bool {
        self.rect.translate(self.velocity * self.speed);
        fully_in_bounds(&self.rect)
    }
}

/// Player shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub id: u32,
    pub rect: Rect,
    pub velocity: Vec2,
    pub speed: f32,
    /// Screen angle of travel, degrees
    pub angle: f32,
}

impl Beam {
    /// A beam leaving `firer` along its facing turned by `offset` degrees
    pub fn new(id: u32, firer: &Player, offset: f32) -> Self {
        let angle = firer.facing_degrees() + offset;
        let velocity = heading_from_degrees(angle);
        let center = firer.rect.center + firer.rect.size * velocity;
        Self {
            id,
            rect: Rect::new(center, BEAM_SIZE).rotated_bounds(angle),
            velocity,
            speed: BEAM_SPEED,
            angle,
        }
    }

    pub fn advance(&mut self) -> bool {
        self.rect.translate(self.velocity * self.speed);
        fully_in_bounds(&self.rect)
    }
}

/// Angular offsets for an `n`-beam fan, evenly spaced across the spread.
/// `n < 2` has no fan and yields a single straight shot.
pub fn volley_offsets(n: u32) -> Vec<f32> {
    if n < 2 {
        return vec![0.0];
    }
    let step = 2.0 * VOLLEY_HALF_SPREAD_DEG / (n - 1) as f32;
    (0..n)
        .map(|i| -VOLLEY_HALF_SPREAD_DEG + i as f32 * step)
        .collect()
}

/// Fan of `n` beams from `firer`, ids allocated from `first_id` upward
pub fn volley(firer: &Player, n: u32, first_id: u32) -> Vec<Beam> {
    volley_offsets(n)
        .into_iter()
        .zip(first_id..)
        .map(|(offset, id)| Beam::new(id, firer, offset))
        .collect()
}

/// Cosmetic explosion marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub rect: Rect,
    pub remaining: u32,
}

impl Explosion {
    pub fn at(id: u32, center: Vec2, lifetime: u32) -> Self {
        Self {
            id,
            rect: Rect::new(center, EXPLOSION_SIZE),
            remaining: lifetime,
        }
    }

    /// Alternating visual frame
    pub fn flipped(&self) -> bool {
        (self.remaining / EXPLOSION_FRAME_TICKS) % 2 == 1
    }

    pub fn advance(&mut self) -> bool {
        count_down(&mut self.remaining)
    }
}

/// Enemy behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Flying in from the right toward its stop line
    Approaching,
    /// Creeping, oscillating and bombing
    Attacking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub velocity: Vec2,
    pub state: EnemyState,
    /// Horizontal position at which the approach ends
    pub stop_line: f32,
    /// Bomb cadence in global ticks; `None` once disabled by EMP
    pub bomb_interval: Option<u32>,
    pub age: u32,
}

impl Enemy {
    /// A fresh enemy at the right edge of the play area
    pub fn spawn(id: u32, rng: &mut impl Rng) -> Self {
        let half = ENEMY_SIZE / 2.0;
        let y = rng.random_range(half.y..=PLAY_HEIGHT - half.y);
        Self {
            id,
            rect: Rect::new(Vec2::new(PLAY_WIDTH - half.x, y), ENEMY_SIZE),
            velocity: Vec2::new(-ENEMY_APPROACH_SPEED, 0.0),
            state: EnemyState::Approaching,
            stop_line: rng.random_range(ENEMY_STOP_LINE_MIN..=ENEMY_STOP_LINE_MAX),
            bomb_interval: Some(
                rng.random_range(ENEMY_BOMB_INTERVAL_MIN..=ENEMY_BOMB_INTERVAL_MAX),
            ),
            age: rng.random_range(0..=ENEMY_MAX_START_AGE),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.bomb_interval.is_none()
    }

    /// EMP effect: never bombs again
    pub fn disable_bombs(&mut self) {
        self.bomb_interval = None;
    }

    /// Whether this enemy drops a bomb on global tick `tick`. The phase is
    /// shared: every enemy with the same interval fires on the same ticks.
    pub fn drops_bomb(&self, tick: u64) -> bool {
        match (self.state, self.bomb_interval) {
            (EnemyState::Attacking, Some(interval)) => tick % u64::from(interval) == 0,
            _ => false,
        }
    }

    /// One tick of behaviour and movement; false once out of the play area
    pub fn advance(&mut self, rng: &mut impl Rng) -> bool {
        self.age += 1;
        self.velocity.y *= ENEMY_VERTICAL_DAMPING;

        if self.state == EnemyState::Approaching && self.rect.center.x < self.stop_line {
            self.velocity.x = -ENEMY_CREEP_SPEED;
            self.state = EnemyState::Attacking;
        }

        if self.state == EnemyState::Attacking && self.age % ENEMY_KICK_PERIOD == 0 {
            self.velocity.y = if rng.random_bool(0.5) {
                ENEMY_VERTICAL_KICK
            } else {
                -ENEMY_VERTICAL_KICK
            };
        }

        let projected = self.rect.translated(Vec2::new(0.0, self.velocity.y));
        if !in_bounds(&projected).1 {
            self.velocity.y = -self.velocity.y;
        }

        self.rect.translate(self.velocity);
        fully_in_bounds(&self.rect)
    }
}

/// Full-field area effect that wipes out enemies and bombs while alive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaBlast {
    pub id: u32,
    pub rect: Rect,
    pub remaining: u32,
}

impl AreaBlast {
    pub fn new(id: u32, lifetime: u32) -> Self {
        Self {
            id,
            rect: Rect::play_area(),
            remaining: lifetime,
        }
    }

    pub fn advance(&mut self) -> bool {
        count_down(&mut self.remaining)
    }
}
