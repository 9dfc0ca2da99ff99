//! One game session: every piece of mutable game state plus its collaborators
//!
//! The front end feeds key changes and the current time in; the session runs
//! whichever timer the round sequencer has asked for. A reset is done by
//! dropping the session and building a new one.

use std::time::{Duration, Instant};

use super::input::{InputState, PaddleControl};
use super::physics;
use super::renderer::{draw_idle_frame, Renderer};
use super::scheduler::{Scheduler, TimerKind};
use super::scoreboard::Scoreboard;
use super::sequencer::{RoundPhase, RoundSequencer, TimerCommand};
use super::state::{GameState, Player};
use crate::config::TimingConfig;

pub struct Session<R: Renderer, S: Scoreboard> {
    state: GameState,
    input: InputState,
    sequencer: RoundSequencer,
    scheduler: Scheduler,
    renderer: R,
    scoreboard: S,
    ticks: u64,
}

impl<R: Renderer, S: Scoreboard> Session<R, S> {
    pub fn new(timing: &TimingConfig, mut renderer: R, scoreboard: S) -> Self {
        let state = GameState::new();
        draw_idle_frame(&mut renderer, &state);

        Self {
            state,
            input: InputState::default(),
            sequencer: RoundSequencer::new(),
            scheduler: Scheduler::new(
                Duration::from_millis(timing.tick_interval_ms.max(1)),
                Duration::from_millis(timing.countdown_interval_ms.max(1)),
            ),
            renderer,
            scoreboard,
            ticks: 0,
        }
    }

    /// Start trigger; inert once the match has been started
    pub fn start(&mut self, now: Instant) {
        let command = self.sequencer.start(&mut self.scoreboard);
        self.apply(command, now);
    }

    pub fn set_paddle_key(&mut self, control: PaddleControl, pressed: bool) {
        self.input.set(control, pressed);
    }

    /// Run every timer fire that is due by `now`; returns how many ran
    pub fn advance(&mut self, now: Instant) -> usize {
        let mut fired = 0;

        while let Some((kind, due)) = self.scheduler.poll(now) {
            fired += 1;
            let command = match kind {
                TimerKind::Tick => self.tick(),
                TimerKind::Countdown => self.sequencer.countdown_elapsed(
                    &mut self.state,
                    &mut self.renderer,
                    &mut self.scoreboard,
                ),
            };
            self.apply(command, due);
        }

        fired
    }

    fn tick(&mut self) -> TimerCommand {
        if !self.sequencer.is_playing() {
            return TimerCommand::Keep;
        }

        let events = physics::tick(&mut self.state, &self.input, &mut self.renderer);
        self.ticks += 1;

        match events.scored {
            Some(scorer) => self
                .sequencer
                .point_scored(scorer, &self.state, &mut self.scoreboard),
            None => TimerCommand::Keep,
        }
    }

    fn apply(&mut self, command: TimerCommand, at: Instant) {
        match command {
            TimerCommand::Keep => {}
            TimerCommand::Run(kind) => self.scheduler.start(kind, at),
            TimerCommand::Stop => self.scheduler.cancel(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn phase(&self) -> RoundPhase {
        self.sequencer.phase()
    }

    pub fn can_start(&self) -> bool {
        self.sequencer.can_start()
    }

    /// Player who scored last; after the match this is the winner
    pub fn recent_score(&self) -> Option<Player> {
        self.sequencer.recent_score()
    }

    /// Simulation steps run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// When the session next needs `advance`, if any timer is running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scoreboard(&self) -> &S {
        &self.scoreboard
    }
}
