//! Fixed-rate simulation tick
//!
//! One call advances the game by exactly one frame: input, spawning,
//! movement, collisions, bookkeeping, wave transition.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::autopilot;
use super::collision;
use super::entities::{AreaBlast, Beam, Enemy, Projectile, volley};
use super::geometry::Rect;
use super::state::{GameEvent, GamePhase, GameState, PlayerMood};
use crate::consts::*;

/// Directional and modifier keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Speed boost
    pub boost: bool,
}

impl HeldKeys {
    /// Sum of the unit deltas of every held direction
    pub fn direction(&self) -> IVec2 {
        let mut dir = IVec2::ZERO;
        if self.up {
            dir.y -= 1;
        }
        if self.down {
            dir.y += 1;
        }
        if self.left {
            dir.x -= 1;
        }
        if self.right {
            dir.x += 1;
        }
        dir
    }
}

/// Edge-triggered actions pressed this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Single beam along the facing
    Fire,
    /// Fan of beams
    Volley,
    AreaBlast,
    Emp,
    Invulnerability,
    /// Debug: drop every remaining round
    EmptyAmmo,
    Quit,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub held: HeldKeys,
    /// Pressed this tick, in order
    pub pressed: Vec<Action>,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn pressing(action: Action) -> Self {
        Self {
            pressed: vec![action],
            ..Default::default()
        }
    }

    pub fn holding(held: HeldKeys) -> Self {
        Self {
            held,
            ..Default::default()
        }
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Finished runs don't advance
    if !state.is_running() {
        return;
    }

    state.events.clear();
    state.mood = PlayerMood::Normal;

    let planned;
    let input = if input.idle_mode {
        planned = autopilot::drive(state, input);
        &planned
    } else {
        input
    };

    // Discrete actions
    for &action in &input.pressed {
        match action {
            Action::Quit => {
                log::info!("Quit requested at tick {}", state.tick);
                state.phase = GamePhase::Quit;
                state.emit(GameEvent::Quit);
                return;
            }
            Action::Fire => {
                fire_single(state);
            }
            Action::Volley => {
                fire_volley(state);
            }
            Action::AreaBlast => {
                trigger_area_blast(state);
            }
            Action::Emp => {
                trigger_emp(state);
            }
            Action::Invulnerability => {
                trigger_invulnerability(state);
            }
            Action::EmptyAmmo => state.ammo.empty(),
        }
    }

    // Player movement
    let direction = input.held.direction();
    state.player.step(direction, input.held.boost);
    state.player.set_facing(direction);

    // Spawning
    spawn_enemies(state);
    drop_bombs(state);

    // Movement; anything leaving the play area is dropped here
    state.beams.retain_mut(Beam::advance);
    state.projectiles.retain_mut(Projectile::advance);
    let rng = &mut state.rng;
    state.enemies.retain_mut(|enemy| enemy.advance(&mut *rng));
    state.explosions.retain_mut(|explosion| explosion.advance());
    state.area_blasts.retain_mut(AreaBlast::advance);

    // Collisions
    let report = collision::resolve(state);
    if state.phase == GamePhase::GameOver {
        return;
    }
    if report.enemies_shot > 0 {
        state.mood = PlayerMood::Cheer;
    }

    // Bookkeeping
    state.cooldowns.tick();
    state.player.tick_invulnerability();
    if state.ammo.tick() {
        state.emit(GameEvent::Reloaded);
    }
    state.wave.advance();

    // Wave transition
    if state.wave.is_complete() {
        state.wave = state.wave.next();
        log::info!("Wave {} started at tick {}", state.wave.index, state.tick);
        let index = state.wave.index;
        state.emit(GameEvent::WaveStarted { index });
    }

    state.tick += 1;
}

fn spawn_enemies(state: &mut GameState) {
    if !state.wave.try_spawn(state.enemies.len()) {
        return;
    }
    let id = state.next_entity_id();
    let enemy = Enemy::spawn(id, &mut state.rng);
    state.enemies.push(enemy);
    state.emit(GameEvent::EnemySpawned { id });
}

fn drop_bombs(state: &mut GameState) {
    let tick = state.tick;
    let sources: Vec<Rect> = state
        .enemies
        .iter()
        .filter(|e| e.drops_bomb(tick))
        .map(|e| e.rect)
        .collect();
    let target = state.player.rect;
    for source in sources {
        let id = state.next_entity_id();
        let bomb = Projectile::aimed(id, &source, &target, &mut state.rng);
        state.projectiles.push(bomb);
    }
}

/// Fire one beam along the facing. Needs one round.
pub fn fire_single(state: &mut GameState) -> bool {
    if !state.ammo.try_consume(1) {
        return false;
    }
    let id = state.next_entity_id();
    state.beams.push(Beam::new(id, &state.player, 0.0));
    state.emit(GameEvent::BeamFired { id });
    true
}

/// Fire a fan of `volley_size` beams. All-or-nothing on ammunition; a
/// volley size below 2 is a single shot.
pub fn fire_volley(state: &mut GameState) -> bool {
    let size = state.volley_size;
    if size < 2 {
        return fire_single(state);
    }
    if !state.ammo.try_consume(size) {
        return false;
    }
    let first_id = state.reserve_entity_ids(size);
    let beams = volley(&state.player, size, first_id);
    state.beams.extend(beams);
    state.emit(GameEvent::VolleyFired { beams: size });
    true
}

pub fn trigger_area_blast(state: &mut GameState) -> bool {
    if !state.cooldowns.area_blast.try_trigger() {
        return false;
    }
    let id = state.next_entity_id();
    state.area_blasts.push(AreaBlast::new(id, AREA_BLAST_LIFETIME));
    log::debug!("Area blast at tick {}", state.tick);
    state.emit(GameEvent::AreaBlastTriggered);
    true
}

/// Neutralize every live bomb and permanently ground every live enemy
pub fn trigger_emp(state: &mut GameState) -> bool {
    if !state.cooldowns.emp.try_trigger() {
        return false;
    }
    for enemy in &mut state.enemies {
        enemy.disable_bombs();
    }
    for bomb in &mut state.projectiles {
        bomb.neutralize();
    }
    log::debug!(
        "EMP at tick {}: {} enemies, {} bombs",
        state.tick,
        state.enemies.len(),
        state.projectiles.len()
    );
    state.emit(GameEvent::EmpTriggered);
    true
}

pub fn trigger_invulnerability(state: &mut GameState) -> bool {
    if !state.cooldowns.invulnerability.try_trigger() {
        return false;
    }
    state.player.make_invulnerable(INVULNERABILITY_DURATION);
    log::debug!("Invulnerable at tick {}", state.tick);
    state.emit(GameEvent::InvulnerabilityTriggered);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::EnemyState;
    use crate::sim::geometry::fully_in_bounds;
    use glam::Vec2;
    use proptest::prelude::*;

    fn bomb_on_player(state: &mut GameState) {
        let id = state.next_entity_id();
        let center = state.player.rect.center;
        let source = Rect::new(center - Vec2::new(0.0, ENEMY_SIZE.y / 2.0), ENEMY_SIZE);
        let target = Rect::new(center + Vec2::new(0.0, 200.0), PLAYER_SIZE);
        let bomb = Projectile::aimed(id, &source, &target, &mut state.rng);
        state.projectiles.push(bomb);
    }

    fn attacking_enemy(state: &mut GameState, center: Vec2, interval: u32) -> u32 {
        let id = state.next_entity_id();
        let mut enemy = Enemy::spawn(id, &mut state.rng);
        enemy.rect.center = center;
        enemy.state = EnemyState::Attacking;
        enemy.velocity = Vec2::new(-ENEMY_CREEP_SPEED, 0.0);
        enemy.age = 1;
        enemy.bomb_interval = Some(interval);
        state.enemies.push(enemy);
        id
    }

    #[test]
    fn test_quit_stops_the_run() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::pressing(Action::Quit));
        assert_eq!(state.phase, GamePhase::Quit);
        assert_eq!(state.events, vec![GameEvent::Quit]);

        let before = state.tick;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.tick, before);
    }

    #[test]
    fn test_three_hits_end_the_run() {
        let mut state = GameState::new(5);

        bomb_on_player(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.life, 2);
        assert_eq!(state.phase, GamePhase::Playing);

        bomb_on_player(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.life, 1);
        assert_eq!(state.phase, GamePhase::Playing);

        bomb_on_player(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.life, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.mood, PlayerMood::Sad);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0, wave: 1 }));

        // Nothing moves after the end
        let frozen = state.tick;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.tick, frozen);
    }

    #[test]
    fn test_wave_advances_after_target_kills() {
        let mut state = GameState::new(9);
        for i in 0..10 {
            attacking_enemy(&mut state, Vec2::new(300.0 + 100.0 * i as f32, 150.0), 300);
        }
        state.tick = 1; // off every bomb phase
        tick(&mut state, &TickInput::pressing(Action::AreaBlast));

        assert!(state.enemies.is_empty());
        assert_eq!(state.wave.index, 2);
        assert_eq!(state.wave.max_enemies, 5);
        assert_eq!(state.wave.kill_target, 20);
        assert_eq!(state.wave.kills, 0);
        assert!(state.wave.show_title());
        assert!(state.events.contains(&GameEvent::WaveStarted { index: 2 }));
    }

    #[test]
    fn test_volley_needs_full_ammunition() {
        let mut state = GameState::new(3).with_volley_size(4);
        assert!(state.ammo.try_consume(AMMO_CAPACITY - 3));

        tick(&mut state, &TickInput::pressing(Action::Volley));
        assert!(state.beams.is_empty());
        assert_eq!(state.ammo.remaining(), 3);

        let mut state = GameState::new(3).with_volley_size(4);
        assert!(state.ammo.try_consume(AMMO_CAPACITY - 4));
        tick(&mut state, &TickInput::pressing(Action::Volley));
        assert_eq!(state.beams.len(), 4);
        // Empty now, so reloading
        assert_eq!(state.ammo.remaining(), 0);
        assert!(state.events.contains(&GameEvent::VolleyFired { beams: 4 }));
    }

    #[test]
    fn test_volley_fans_out() {
        let mut state = GameState::new(3).with_volley_size(3);
        tick(&mut state, &TickInput::pressing(Action::Volley));
        assert_eq!(state.ammo.remaining(), AMMO_CAPACITY - 3);
        let angles: Vec<f32> = state.beams.iter().map(|b| b.angle).collect();
        assert_eq!(angles.len(), 3);
        assert!((angles[0] + 50.0).abs() < 1e-3);
        assert!(angles[1].abs() < 1e-3);
        assert!((angles[2] - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_volley_of_one_is_single_shot() {
        let mut state = GameState::new(3).with_volley_size(1);
        tick(&mut state, &TickInput::pressing(Action::Volley));
        assert_eq!(state.beams.len(), 1);
        assert_eq!(state.ammo.remaining(), AMMO_CAPACITY - 1);
    }

    #[test]
    fn test_single_fire_uses_one_round() {
        let mut state = GameState::new(3);
        tick(&mut state, &TickInput::pressing(Action::Fire));
        assert_eq!(state.beams.len(), 1);
        assert_eq!(state.ammo.remaining(), AMMO_CAPACITY - 1);

        state.ammo.empty();
        tick(&mut state, &TickInput::pressing(Action::Fire));
        assert_eq!(state.beams.len(), 1);
    }

    #[test]
    fn test_fire_follows_last_movement() {
        let mut state = GameState::new(3);
        let up = HeldKeys {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &TickInput::holding(up));
        tick(&mut state, &TickInput::pressing(Action::Fire));
        let beam = &state.beams[0];
        assert!((beam.velocity - Vec2::new(0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_empty_ammo_reloads() {
        let mut state = GameState::new(3);
        tick(&mut state, &TickInput::pressing(Action::EmptyAmmo));
        assert_eq!(state.ammo.remaining(), 0);
        for _ in 1..AMMO_RELOAD_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.ammo.remaining(), AMMO_CAPACITY);
        assert!(state.events.contains(&GameEvent::Reloaded));
    }

    #[test]
    fn test_emp_neutralizes_bombs_and_grounds_enemies() {
        let mut state = GameState::new(11);
        attacking_enemy(&mut state, Vec2::new(1300.0, 200.0), 50);
        state.tick = 1;
        let id = state.next_entity_id();
        let source = Rect::new(Vec2::new(200.0, 100.0), ENEMY_SIZE);
        let bomb = Projectile::aimed(id, &source, &state.player.rect, &mut state.rng);
        state.projectiles.push(bomb);

        tick(&mut state, &TickInput::pressing(Action::Emp));
        assert!(state.events.contains(&GameEvent::EmpTriggered));
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.projectiles[0].inert);
        assert_eq!(state.projectiles[0].speed, PROJECTILE_SPEED / 2.0);
        assert!(state.enemies[0].is_disabled());
        assert_eq!(state.cooldowns.emp.remaining(), EMP_COOLDOWN - 1);

        // Inert bomb on the player does no harm
        state.projectiles[0].rect.center = state.player.rect.center;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.life, PLAYER_LIFE);
        assert!(state.projectiles.is_empty());

        // Grounded enemy stays quiet through its old bomb phase
        while state.tick % 50 != 0 {
            tick(&mut state, &TickInput::default());
        }
        tick(&mut state, &TickInput::default());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_ability_ignored_during_cooldown() {
        let mut state = GameState::new(2);
        tick(&mut state, &TickInput::pressing(Action::AreaBlast));
        assert_eq!(state.area_blasts.len(), 1);
        assert_eq!(state.cooldowns.area_blast.remaining(), AREA_BLAST_COOLDOWN - 1);

        tick(&mut state, &TickInput::pressing(Action::AreaBlast));
        assert_eq!(state.area_blasts.len(), 1);
        assert_eq!(state.cooldowns.area_blast.remaining(), AREA_BLAST_COOLDOWN - 2);
    }

    #[test]
    fn test_invulnerability_burst() {
        let mut state = GameState::new(2);
        tick(&mut state, &TickInput::pressing(Action::Invulnerability));
        assert!(state.player.is_invulnerable());

        bomb_on_player(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.life, PLAYER_LIFE);
        assert_eq!(state.score, SCORE_ABSORBED_HIT);
        assert!(state.events.contains(&GameEvent::HitAbsorbed));

        for _ in 0..INVULNERABILITY_DURATION {
            tick(&mut state, &TickInput::default());
        }
        assert!(!state.player.is_invulnerable());
    }

    #[test]
    fn test_area_blast_expires_after_lifetime_plus_one() {
        let mut state = GameState::new(4);
        let lifetime = 5;
        let id = state.next_entity_id();
        state.area_blasts.push(AreaBlast::new(id, lifetime));

        for _ in 0..lifetime {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.area_blasts.len(), 1);
        tick(&mut state, &TickInput::default());
        assert!(state.area_blasts.is_empty());
    }

    #[test]
    fn test_first_enemy_after_spawn_interval() {
        let mut state = GameState::new(8);
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.enemies.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_bomb_drops_on_global_phase() {
        let mut state = GameState::new(6);
        attacking_enemy(&mut state, Vec2::new(1300.0, 200.0), 50);
        state.tick = 48;

        tick(&mut state, &TickInput::default());
        assert!(state.projectiles.is_empty());
        tick(&mut state, &TickInput::default());
        assert!(state.projectiles.is_empty());
        // Global tick 50
        tick(&mut state, &TickInput::default());
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.projectiles[0].velocity.x < 0.0);
    }

    #[test]
    fn test_beam_leaving_field_is_removed_same_tick() {
        let mut state = GameState::new(2);
        state.player.rect.center.x = PLAY_WIDTH - PLAYER_SIZE.x / 2.0;
        tick(&mut state, &TickInput::pressing(Action::Fire));
        assert!(state.beams.is_empty());
        assert_eq!(state.ammo.remaining(), AMMO_CAPACITY - 1);
    }

    #[test]
    fn test_enemy_leaving_field_is_unmarked() {
        let mut state = GameState::new(12);
        let id = attacking_enemy(&mut state, Vec2::new(ENEMY_SIZE.x / 2.0 + 0.5, 450.0), 50);
        state.enemies[0].disable_bombs();
        state.tick = 1;

        tick(&mut state, &TickInput::default());
        assert!(state.enemies.is_empty());
        assert_eq!(state.wave.kills, 0);
        assert_eq!(state.score, 0);
        assert!(!state.events.contains(&GameEvent::EnemyDestroyed { id }));
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_shooting_an_enemy_cheers_for_one_tick() {
        let mut state = GameState::new(13);
        let y = state.player.rect.center.y;
        attacking_enemy(&mut state, Vec2::new(1060.0, y), 50);
        state.enemies[0].disable_bombs();
        state.tick = 1;

        tick(&mut state, &TickInput::pressing(Action::Fire));
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, SCORE_ENEMY);
        assert_eq!(state.mood, PlayerMood::Cheer);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.mood, PlayerMood::Normal);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..2000 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.tick, state2.tick);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player.life, state2.player.life);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.player.rect, state2.player.rect);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn prop_live_movers_stay_in_bounds(seed in any::<u64>()) {
            let mut state = GameState::new(seed);
            let input = TickInput { idle_mode: true, ..Default::default() };
            let mut last_wave = state.wave.index;
            for _ in 0..1500 {
                tick(&mut state, &input);
                if !state.is_running() {
                    break;
                }
                prop_assert!(state.beams.iter().all(|b| fully_in_bounds(&b.rect)));
                prop_assert!(state.projectiles.iter().all(|p| fully_in_bounds(&p.rect)));
                prop_assert!(state.enemies.iter().all(|e| fully_in_bounds(&e.rect)));
                prop_assert!(fully_in_bounds(&state.player.rect));
                prop_assert!(state.wave.index >= last_wave);
                prop_assert!(state.enemies.len() <= state.wave.max_enemies as usize);
                last_wave = state.wave.index;
            }
        }
    }
}
