//! Read-only frame snapshot handed to the presentation layer.
//!
//! Building a snapshot never touches the state; the frontend gets plain
//! serializable data and no access to the simulation itself.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::{GameEvent, GamePhase, GameState, PlayerMood};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub facing: IVec2,
    pub mood: PlayerMood,
    pub invulnerable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub rect: Rect,
    /// Grounded by EMP
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub rect: Rect,
    pub color: [u8; 3],
    pub inert: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamView {
    pub rect: Rect,
    /// Screen angle in degrees, for the sprite rotation
    pub angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub rect: Rect,
    pub flipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaBlastView {
    pub rect: Rect,
    pub remaining: u32,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub life: u32,
    pub wave: u32,
    pub kills_remaining: u32,
    pub show_wave_title: bool,
    /// Ticks until each ability is ready again
    pub area_blast_cooldown: u32,
    pub emp_cooldown: u32,
    pub invulnerability_cooldown: u32,
    /// The same waits in whole seconds at the loop's tick rate
    pub area_blast_secs: u32,
    pub emp_secs: u32,
    pub invulnerability_secs: u32,
    /// Ticks left on the current invulnerability burst
    pub invulnerable_ticks: u32,
    pub ammo: u32,
    pub ammo_capacity: u32,
    pub reload_progress: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub beams: Vec<BeamView>,
    pub explosions: Vec<ExplosionView>,
    pub area_blasts: Vec<AreaBlastView>,
    pub events: Vec<GameEvent>,
    pub hud: Hud,
}

impl FrameSnapshot {
    /// Snapshot `state` for a loop running at `tick_rate_hz`
    pub fn capture(state: &GameState, tick_rate_hz: u32) -> Self {
        Self {
            tick: state.tick,
            phase: state.phase,
            player: build_player(state),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    rect: e.rect,
                    disabled: e.is_disabled(),
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    rect: p.rect,
                    color: p.color,
                    inert: p.inert,
                })
                .collect(),
            beams: state
                .beams
                .iter()
                .map(|b| BeamView {
                    rect: b.rect,
                    angle: b.angle,
                })
                .collect(),
            explosions: state
                .explosions
                .iter()
                .map(|x| ExplosionView {
                    rect: x.rect,
                    flipped: x.flipped(),
                })
                .collect(),
            area_blasts: state
                .area_blasts
                .iter()
                .map(|a| AreaBlastView {
                    rect: a.rect,
                    remaining: a.remaining,
                })
                .collect(),
            events: state.events.clone(),
            hud: build_hud(state, tick_rate_hz),
        }
    }

    pub fn has_event(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }
}

fn build_player(state: &GameState) -> PlayerView {
    PlayerView {
        rect: state.player.rect,
        facing: state.player.facing,
        mood: state.mood,
        invulnerable: state.player.is_invulnerable(),
    }
}

fn build_hud(state: &GameState, tick_rate_hz: u32) -> Hud {
    let invulnerable_ticks = match state.player.status {
        super::entities::PlayerStatus::Invulnerable { remaining } => remaining,
        super::entities::PlayerStatus::Normal => 0,
    };
    let cooldowns = &state.cooldowns;
    Hud {
        score: state.score,
        life: state.player.life,
        wave: state.wave.index,
        kills_remaining: state.wave.kills_remaining(),
        show_wave_title: state.wave.show_title(),
        area_blast_cooldown: cooldowns.area_blast.remaining(),
        emp_cooldown: cooldowns.emp.remaining(),
        invulnerability_cooldown: cooldowns.invulnerability.remaining(),
        area_blast_secs: cooldowns.area_blast.remaining_secs(tick_rate_hz),
        emp_secs: cooldowns.emp.remaining_secs(tick_rate_hz),
        invulnerability_secs: cooldowns.invulnerability.remaining_secs(tick_rate_hz),
        invulnerable_ticks,
        ammo: state.ammo.remaining(),
        ammo_capacity: state.ammo.capacity(),
        reload_progress: state.ammo.reload_progress(),
    }
}
