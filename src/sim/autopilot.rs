//! Idle/demo mode
//!
//! A simple rule-based pilot that plays the game when nobody is at the
//! keyboard. It only reads the state, never the RNG, so demo runs stay
//! reproducible from the seed.

use glam::{IVec2, Vec2};

use super::state::GameState;
use super::tick::{Action, HeldKeys, TickInput};
use crate::consts::*;

/// Bombs closer than this trigger the invulnerability burst
const PANIC_DISTANCE: f32 = 180.0;
/// Bombs closer than this are dodged
const DODGE_DISTANCE: f32 = 140.0;
/// Active bombs on screen before the EMP is worth it
const EMP_BOMB_COUNT: usize = 4;
/// Where the pilot likes to hang back
const HOME_X: f32 = 300.0;
/// Ticks between single shots
const FIRE_PERIOD: u64 = 5;

/// Plan this tick's input. Actions already in `input` (a quit, say) are
/// kept ahead of the pilot's own.
pub fn drive(state: &GameState, input: &TickInput) -> TickInput {
    let mut planned = TickInput {
        held: HeldKeys::default(),
        pressed: input.pressed.clone(),
        idle_mode: false,
    };
    let player = &state.player;
    let here = player.rect.center;

    let nearest_bomb = state
        .projectiles
        .iter()
        .filter(|p| p.is_active())
        .map(|p| (p.rect.center, p.rect.center.distance(here)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    let active_bombs = state.projectiles.iter().filter(|p| p.is_active()).count();

    // Abilities first
    if let Some((_, distance)) = nearest_bomb
        && distance < PANIC_DISTANCE
        && !player.is_invulnerable()
        && state.cooldowns.invulnerability.is_ready()
    {
        planned.pressed.push(Action::Invulnerability);
    }
    if active_bombs >= EMP_BOMB_COUNT && state.cooldowns.emp.is_ready() {
        planned.pressed.push(Action::Emp);
    }
    if state.enemies.len() >= state.wave.max_enemies as usize
        && state.cooldowns.area_blast.is_ready()
    {
        planned.pressed.push(Action::AreaBlast);
    }

    // Dodge
    if let Some((bomb, distance)) = nearest_bomb
        && distance < DODGE_DISTANCE
        && !player.is_invulnerable()
    {
        planned.held = dodge(here, bomb);
        return planned;
    }

    // Hunt the nearest enemy, or fall back home
    let target = state
        .enemies
        .iter()
        .map(|e| e.rect.center)
        .min_by(|a, b| {
            a.distance(here)
                .partial_cmp(&b.distance(here))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match target {
        Some(enemy) if (enemy.y - here.y).abs() > PLAYER_SPEED => {
            planned.held.up = enemy.y < here.y;
            planned.held.down = enemy.y > here.y;
        }
        Some(_) if player.facing != IVec2::X => planned.held.right = true,
        Some(_) => {
            let volley = state.volley_size;
            if volley >= 2 && state.enemies.len() >= 2 && state.ammo.remaining() >= volley {
                planned.pressed.push(Action::Volley);
            } else if state.tick % FIRE_PERIOD == 0 {
                planned.pressed.push(Action::Fire);
            }
        }
        None if here.x > HOME_X => planned.held.left = true,
        None if player.facing != IVec2::X => planned.held.right = true,
        None => {}
    }

    planned
}

/// Boosted vertical step away from `bomb`, turning back at the edges
fn dodge(here: Vec2, bomb: Vec2) -> HeldKeys {
    let margin = PLAYER_SIZE.y / 2.0 + PLAYER_BOOST_SPEED;
    let mut go_down = bomb.y <= here.y;
    if go_down && here.y + margin > PLAY_HEIGHT {
        go_down = false;
    } else if !go_down && here.y - margin < 0.0 {
        go_down = true;
    }
    HeldKeys {
        up: !go_down,
        down: go_down,
        boost: true,
        ..Default::default()
    }
}
