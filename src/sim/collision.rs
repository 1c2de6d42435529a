//! Collision resolution
//!
//! Runs once per tick as a fixed sequence of passes over pairs of entity
//! kinds. Each pass removes what it destroys before the next pass starts,
//! so an entity takes part in at most one destroying collision per tick.

use glam::Vec2;

use super::entities::{Body, Explosion};
use super::state::{GameEvent, GamePhase, GameState, PlayerMood};
use crate::consts::*;

/// Outcome of the player-versus-bomb pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerContact {
    /// Hit while invulnerable
    Absorbed,
    /// Lost a life, still alive
    Hurt { life: u32 },
    /// Lost the last life
    Killed,
}

/// What one resolver run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub projectiles_blasted: u32,
    pub enemies_blasted: u32,
    pub enemies_shot: u32,
    pub projectiles_shot: u32,
    /// Bombs consumed by touching the player (inert ones included)
    pub projectiles_touched: u32,
    pub player: Option<PlayerContact>,
}

/// Ids of `items` overlapping at least one of `fields`
fn overlapping_any<A: Body, B: Body>(items: &[A], fields: &[B]) -> Vec<u32> {
    items
        .iter()
        .filter(|item| fields.iter().any(|f| item.rect().intersects(f.rect())))
        .map(Body::id)
        .collect()
}

/// Pair targets with shots. Each target in order consumes every shot that
/// overlaps it and has not been consumed yet. Returns (targets hit, shots used).
fn consume_pairs<A: Body, B: Body>(targets: &[A], shots: &[B]) -> (Vec<u32>, Vec<u32>) {
    let mut hit = Vec::new();
    let mut used: Vec<u32> = Vec::new();
    for target in targets {
        let overlapping: Vec<u32> = shots
            .iter()
            .filter(|s| !used.contains(&s.id()) && target.rect().intersects(s.rect()))
            .map(Body::id)
            .collect();
        if !overlapping.is_empty() {
            hit.push(target.id());
            used.extend(overlapping);
        }
    }
    (hit, used)
}

/// Centers of the entities whose ids are listed
fn centers_of<A: Body>(items: &[A], ids: &[u32]) -> Vec<Vec2> {
    items
        .iter()
        .filter(|item| ids.contains(&item.id()))
        .map(|item| item.rect().center)
        .collect()
}

fn spawn_explosions(state: &mut GameState, centers: Vec<Vec2>, lifetime: u32) {
    for center in centers {
        let id = state.next_entity_id();
        state.explosions.push(Explosion::at(id, center, lifetime));
    }
}

fn remove_enemies(state: &mut GameState, ids: &[u32]) {
    state.enemies.retain(|e| !ids.contains(&e.id));
    for &id in ids {
        state.emit(GameEvent::EnemyDestroyed { id });
    }
}

fn remove_projectiles(state: &mut GameState, ids: &[u32]) {
    state.projectiles.retain(|p| !ids.contains(&p.id));
    for &id in ids {
        state.emit(GameEvent::ProjectileDestroyed { id });
    }
}

/// Resolve every collision for this tick
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    // 1. Bombs caught in an area blast
    let blasted = overlapping_any(&state.projectiles, &state.area_blasts);
    let centers = centers_of(&state.projectiles, &blasted);
    remove_projectiles(state, &blasted);
    spawn_explosions(state, centers, EXPLOSION_SHORT_TICKS);
    report.projectiles_blasted = blasted.len() as u32;

    // 2. Enemies caught in an area blast
    let blasted = overlapping_any(&state.enemies, &state.area_blasts);
    let centers = centers_of(&state.enemies, &blasted);
    remove_enemies(state, &blasted);
    spawn_explosions(state, centers, EXPLOSION_SHORT_TICKS);
    for _ in &blasted {
        state.wave.record_kill();
    }
    report.enemies_blasted = blasted.len() as u32;

    // 3. Enemies shot down
    let (shot, used) = consume_pairs(&state.enemies, &state.beams);
    let centers = centers_of(&state.enemies, &shot);
    remove_enemies(state, &shot);
    state.beams.retain(|b| !used.contains(&b.id));
    spawn_explosions(state, centers, EXPLOSION_LONG_TICKS);
    for _ in &shot {
        state.score += SCORE_ENEMY;
        state.wave.record_kill();
    }
    report.enemies_shot = shot.len() as u32;

    // 4. Bombs shot down
    let (shot, used) = consume_pairs(&state.projectiles, &state.beams);
    let centers = centers_of(&state.projectiles, &shot);
    remove_projectiles(state, &shot);
    state.beams.retain(|b| !used.contains(&b.id));
    spawn_explosions(state, centers, EXPLOSION_SHORT_TICKS);
    state.score += SCORE_PROJECTILE * shot.len() as u64;
    report.projectiles_shot = shot.len() as u32;

    // 5. Bombs reaching the player. Every touching bomb is consumed; only
    //    active ones hurt, and at most once per tick.
    let player_rect = state.player.rect;
    let touching: Vec<(u32, bool)> = state
        .projectiles
        .iter()
        .filter(|p| p.rect.intersects(&player_rect))
        .map(|p| (p.id, p.is_active()))
        .collect();
    if touching.is_empty() {
        return report;
    }
    let ids: Vec<u32> = touching.iter().map(|&(id, _)| id).collect();
    remove_projectiles(state, &ids);
    report.projectiles_touched = ids.len() as u32;

    if touching.iter().any(|&(_, active)| active) {
        report.player = Some(hit_player(state));
    }

    report
}

fn hit_player(state: &mut GameState) -> PlayerContact {
    if state.player.is_invulnerable() {
        state.score += SCORE_ABSORBED_HIT;
        state.wave.record_kill();
        let center = state.player.rect.center;
        spawn_explosions(state, vec![center], EXPLOSION_LONG_TICKS);
        state.emit(GameEvent::HitAbsorbed);
        return PlayerContact::Absorbed;
    }

    state.player.life = state.player.life.saturating_sub(1);
    let life = state.player.life;
    state.emit(GameEvent::PlayerHit { life });
    if life > 0 {
        return PlayerContact::Hurt { life };
    }

    state.phase = GamePhase::GameOver;
    state.mood = PlayerMood::Sad;
    log::info!(
        "Game over: score {} on wave {} after {} ticks",
        state.score,
        state.wave.index,
        state.tick
    );
    let (score, wave) = (state.score, state.wave.index);
    state.emit(GameEvent::GameOver { score, wave });
    PlayerContact::Killed
}
