//! Game session loop: poll, tick, present, pace.

use serde::{Deserialize, Serialize};

use super::{Frontend, Pacer};
use crate::Settings;
use crate::sim::{FrameSnapshot, GameEvent, GamePhase, GameState, tick};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    GameOver,
    Quit,
    TickLimit,
}

/// Final numbers of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub seed: u64,
    pub score: u64,
    pub life: u32,
    pub wave: u32,
    pub ticks: u64,
}

pub struct Session<F: Frontend, P: Pacer> {
    state: GameState,
    settings: Settings,
    frontend: F,
    pacer: P,
}

impl<F: Frontend, P: Pacer> Session<F, P> {
    pub fn new(settings: Settings, seed: u64, frontend: F, pacer: P) -> Self {
        let state = GameState::new(seed).with_volley_size(settings.volley_size);
        Self::with_state(state, settings, frontend, pacer)
    }

    /// Resume from an existing state
    pub fn with_state(state: GameState, settings: Settings, frontend: F, pacer: P) -> Self {
        Self {
            state,
            settings,
            frontend,
            pacer,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Run one iteration of the loop. Returns the outcome once the run is
    /// over.
    pub fn step(&mut self) -> Option<Outcome> {
        let mut input = self.frontend.poll_input(&self.state);
        if self.settings.idle_mode {
            input.idle_mode = true;
        }

        tick(&mut self.state, &input);
        let frame = FrameSnapshot::capture(&self.state, self.settings.tick_rate_hz);
        self.frontend.present(&frame);

        if frame.has_event(&GameEvent::EmpTriggered) {
            let flash = self.settings.effective_emp_flash();
            if !flash.is_zero() {
                self.pacer.pause(flash);
            }
        }

        match self.state.phase {
            GamePhase::GameOver => {
                // Hold the final frame
                self.pacer.pause(self.settings.game_over_pause());
                return Some(Outcome::GameOver);
            }
            GamePhase::Quit => return Some(Outcome::Quit),
            GamePhase::Playing => {}
        }

        if let Some(limit) = self.settings.max_ticks
            && self.state.tick >= limit
        {
            return Some(Outcome::TickLimit);
        }

        self.pacer.wait_for_next_tick();
        None
    }

    /// Loop until the run ends
    pub fn run(&mut self) -> RunSummary {
        log::info!(
            "Session start: seed {}, idle {}, volley {}",
            self.state.seed,
            self.settings.idle_mode,
            self.state.volley_size
        );
        let outcome = loop {
            if let Some(outcome) = self.step() {
                break outcome;
            }
        };
        let summary = self.summary(outcome);
        log::info!(
            "Session over ({:?}): score {}, wave {}, {} ticks",
            summary.outcome,
            summary.score,
            summary.wave,
            summary.ticks
        );
        summary
    }

    pub fn summary(&self, outcome: Outcome) -> RunSummary {
        RunSummary {
            outcome,
            seed: self.state.seed,
            score: self.state.score,
            life: self.state.player.life,
            wave: self.state.wave.index,
            ticks: self.state.tick,
        }
    }
}
