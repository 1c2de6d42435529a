//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`; nothing is
//! global. Randomness comes from the seeded generator stored here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{AreaBlast, Beam, Enemy, Explosion, Player, Projectile};
use super::resources::{Ammunition, Cooldowns};
use super::wave::Wave;
use crate::consts::DEFAULT_VOLLEY_SIZE;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Life exhausted; the final frame is shown before the run ends
    GameOver,
    /// Quit signal received
    Quit,
}

/// Cosmetic player reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerMood {
    #[default]
    Normal,
    /// Shot down an enemy this tick
    Cheer,
    /// Run lost
    Sad,
}

/// Things that happened during a tick, for the frontend and the runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted { index: u32 },
    EnemySpawned { id: u32 },
    BeamFired { id: u32 },
    VolleyFired { beams: u32 },
    AreaBlastTriggered,
    /// Frontend flashes the field; the loop blocks briefly
    EmpTriggered,
    InvulnerabilityTriggered,
    EnemyDestroyed { id: u32 },
    ProjectileDestroyed { id: u32 },
    PlayerHit { life: u32 },
    /// A hit soaked up by invulnerability
    HitAbsorbed,
    Reloaded,
    GameOver { score: u64, wave: u32 },
    Quit,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Global tick counter (shared bomb phase)
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub player: Player,
    pub mood: PlayerMood,
    /// Live entities, each kept in id order
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub beams: Vec<Beam>,
    pub explosions: Vec<Explosion>,
    pub area_blasts: Vec<AreaBlast>,
    pub wave: Wave,
    pub cooldowns: Cooldowns,
    pub ammo: Ammunition,
    /// Beams per volley
    pub volley_size: u32,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tick: 0,
            phase: GamePhase::Playing,
            score: 0,
            player: Player::default(),
            mood: PlayerMood::Normal,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            beams: Vec::new(),
            explosions: Vec::new(),
            area_blasts: Vec::new(),
            wave: Wave::new(1),
            cooldowns: Cooldowns::default(),
            ammo: Ammunition::default(),
            volley_size: DEFAULT_VOLLEY_SIZE,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn with_volley_size(mut self, volley_size: u32) -> Self {
        self.volley_size = volley_size.max(1);
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Allocate `count` consecutive IDs, returning the first
    pub fn reserve_entity_ids(&mut self, count: u32) -> u32 {
        let first = self.next_id;
        self.next_id += count;
        first
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Total live entities (excluding the player)
    pub fn entity_count(&self) -> usize {
        self.enemies.len()
            + self.projectiles.len()
            + self.beams.len()
            + self.explosions.len()
            + self.area_blasts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_run_defaults() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.life, PLAYER_LIFE);
        assert_eq!(state.wave.index, 1);
        assert_eq!(state.ammo.remaining(), AMMO_CAPACITY);
        assert!(state.cooldowns.area_blast.is_ready());
        assert!(state.cooldowns.emp.is_ready());
        assert!(state.cooldowns.invulnerability.is_ready());
        assert_eq!(state.entity_count(), 0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let first = state.reserve_entity_ids(4);
        let b = state.next_entity_id();
        assert_eq!(first, a + 1);
        assert_eq!(b, first + 4);
    }

    #[test]
    fn test_volley_size_floor() {
        let state = GameState::new(1).with_volley_size(0);
        assert_eq!(state.volley_size, 1);
    }
}
