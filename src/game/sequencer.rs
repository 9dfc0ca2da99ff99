//! Round Sequencer
//!
//! Owns the round phase: the pre-game countdown, the pause between points and
//! the end of the match. It never touches the clock; each transition returns a
//! [`TimerCommand`] that the caller applies to its scheduler.

use super::renderer::{draw_frame, Renderer};
use super::scheduler::TimerKind;
use super::scoreboard::{AnnouncementStyle, Scoreboard};
use super::state::{GameState, Player};

/// Countdown steps shown before the first serve
pub const START_COUNTDOWN: u8 = 6;
/// Countdown steps between points
pub const PAUSE_COUNTDOWN: u8 = 8;
/// Pause steps at or below this value show the numeric countdown
pub const PAUSE_DISPLAY_FROM: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Nothing started yet
    Idle,
    /// Pre-game countdown, steps left
    Countdown(u8),
    Playing,
    /// Between points, steps left
    Paused(u8),
    /// Terminal; only a reload leaves it
    MatchOver,
}

/// What the caller must do with its timer after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Leave the active timer alone
    Keep,
    /// Replace the active timer
    Run(TimerKind),
    /// Cancel the active timer
    Stop,
}

#[derive(Debug)]
pub struct RoundSequencer {
    phase: RoundPhase,
    recent_score: Option<Player>,
    start_armed: bool,
}

impl RoundSequencer {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Idle,
            recent_score: None,
            start_armed: true,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == RoundPhase::Playing
    }

    /// Whether the start trigger still does anything
    pub fn can_start(&self) -> bool {
        self.start_armed && self.phase == RoundPhase::Idle
    }

    /// The player who scored the most recent point
    pub fn recent_score(&self) -> Option<Player> {
        self.recent_score
    }

    /// Start trigger. Only acts once, from Idle.
    pub fn start(&mut self, scoreboard: &mut dyn Scoreboard) -> TimerCommand {
        if !self.can_start() {
            return TimerCommand::Keep;
        }

        self.phase = RoundPhase::Countdown(START_COUNTDOWN);
        scoreboard.set_announcement_style(AnnouncementStyle::Shown);
        tracing::info!("match countdown started");
        TimerCommand::Run(TimerKind::Countdown)
    }

    /// A point was scored during play; the score itself is already counted
    pub fn point_scored(
        &mut self,
        scorer: Player,
        state: &GameState,
        scoreboard: &mut dyn Scoreboard,
    ) -> TimerCommand {
        if self.phase != RoundPhase::Playing {
            return TimerCommand::Keep;
        }

        self.recent_score = Some(scorer);
        scoreboard.set_score(scorer, state.score.get(scorer));
        scoreboard.set_announcement_style(AnnouncementStyle::Shown);

        if state.score.is_match_point_reached() {
            self.phase = RoundPhase::MatchOver;
            scoreboard.set_announcement(&format!("Player {} wins!!!", scorer.number()));
            tracing::info!(
                winner = scorer.number(),
                one = state.score.one,
                two = state.score.two,
                "match over"
            );
            TimerCommand::Stop
        } else {
            self.phase = RoundPhase::Paused(PAUSE_COUNTDOWN);
            scoreboard.set_announcement(&format!("Player {} scores!", scorer.number()));
            tracing::info!(
                scorer = scorer.number(),
                one = state.score.one,
                two = state.score.two,
                "point scored"
            );
            TimerCommand::Run(TimerKind::Countdown)
        }
    }

    /// One countdown step elapsed
    pub fn countdown_elapsed(
        &mut self,
        state: &mut GameState,
        renderer: &mut dyn Renderer,
        scoreboard: &mut dyn Scoreboard,
    ) -> TimerCommand {
        match self.phase {
            RoundPhase::Countdown(n) => {
                draw_frame(renderer, state);
                let n = n.saturating_sub(1);
                scoreboard.set_announcement(&format!("Game starts in {}...", n));

                if n == 0 {
                    self.start_armed = false;
                    self.resume(scoreboard)
                } else {
                    self.phase = RoundPhase::Countdown(n);
                    TimerCommand::Keep
                }
            }
            RoundPhase::Paused(n) => {
                let n = n.saturating_sub(1);
                if let Some(server) = self.recent_score {
                    state.place_for_serve(server);
                }

                if n > 0 && n <= PAUSE_DISPLAY_FROM {
                    scoreboard.set_announcement(&format!("Next round in {}...", n));
                    draw_frame(renderer, state);
                }

                if n == 0 {
                    self.resume(scoreboard)
                } else {
                    self.phase = RoundPhase::Paused(n);
                    TimerCommand::Keep
                }
            }
            RoundPhase::Idle | RoundPhase::Playing | RoundPhase::MatchOver => {
                TimerCommand::Keep
            }
        }
    }

    fn resume(&mut self, scoreboard: &mut dyn Scoreboard) -> TimerCommand {
        scoreboard.set_announcement_style(AnnouncementStyle::Hidden);
        self.phase = RoundPhase::Playing;
        tracing::debug!("play resumed");
        TimerCommand::Run(TimerKind::Tick)
    }
}

impl Default for RoundSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::renderer::testing::RecordingRenderer;
    use crate::game::scoreboard::testing::RecordingScoreboard;
    use crate::game::state::Score;

    struct Fixture {
        seq: RoundSequencer,
        state: GameState,
        renderer: RecordingRenderer,
        board: RecordingScoreboard,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                seq: RoundSequencer::new(),
                state: GameState::new(),
                renderer: RecordingRenderer::default(),
                board: RecordingScoreboard::default(),
            }
        }

        fn step(&mut self) -> TimerCommand {
            self.seq
                .countdown_elapsed(&mut self.state, &mut self.renderer, &mut self.board)
        }

        fn playing() -> Self {
            let mut f = Self::new();
            f.seq.start(&mut f.board);
            while f.step() == TimerCommand::Keep {}
            f
        }

        fn score(&mut self, scorer: Player) -> TimerCommand {
            self.state.score.award(scorer);
            self.seq.point_scored(scorer, &self.state, &mut self.board)
        }
    }

    #[test]
    fn test_starts_idle() {
        let f = Fixture::new();
        assert_eq!(f.seq.phase(), RoundPhase::Idle);
        assert!(f.seq.can_start());
        assert!(!f.seq.is_playing());
    }

    #[test]
    fn test_start_countdown_sequence() {
        let mut f = Fixture::new();
        assert_eq!(
            f.seq.start(&mut f.board),
            TimerCommand::Run(TimerKind::Countdown)
        );
        assert_eq!(f.seq.phase(), RoundPhase::Countdown(6));
        assert_eq!(f.board.style, AnnouncementStyle::Shown);

        let mut steps = 0;
        let command = loop {
            steps += 1;
            let command = f.step();
            if steps == 3 {
                assert_eq!(f.board.announcement, "Game starts in 3...");
                assert_eq!(f.seq.phase(), RoundPhase::Countdown(3));
            }
            if command != TimerCommand::Keep {
                break command;
            }
        };

        assert_eq!(steps, 6);
        assert_eq!(command, TimerCommand::Run(TimerKind::Tick));
        assert_eq!(f.seq.phase(), RoundPhase::Playing);
        assert_eq!(f.board.style, AnnouncementStyle::Hidden);
        assert_eq!(f.renderer.frames(), 6);
        assert_eq!(
            f.board.history,
            vec![
                "Game starts in 5...",
                "Game starts in 4...",
                "Game starts in 3...",
                "Game starts in 2...",
                "Game starts in 1...",
                "Game starts in 0...",
            ]
        );
    }

    #[test]
    fn test_start_is_one_shot() {
        let mut f = Fixture::playing();
        assert!(!f.seq.can_start());
        assert_eq!(f.seq.start(&mut f.board), TimerCommand::Keep);
        assert_eq!(f.seq.phase(), RoundPhase::Playing);
    }

    #[test]
    fn test_start_ignored_during_countdown() {
        let mut f = Fixture::new();
        f.seq.start(&mut f.board);
        f.step();
        assert_eq!(f.seq.start(&mut f.board), TimerCommand::Keep);
        assert_eq!(f.seq.phase(), RoundPhase::Countdown(5));
    }

    #[test]
    fn test_point_pauses_round() {
        let mut f = Fixture::playing();
        assert_eq!(
            f.score(Player::Two),
            TimerCommand::Run(TimerKind::Countdown)
        );
        assert_eq!(f.seq.phase(), RoundPhase::Paused(8));
        assert_eq!(f.seq.recent_score(), Some(Player::Two));
        assert_eq!(f.board.scores, [0, 1]);
        assert_eq!(f.board.announcement, "Player 2 scores!");
        assert_eq!(f.board.style, AnnouncementStyle::Shown);
    }

    #[test]
    fn test_pause_round_countdown() {
        let mut f = Fixture::playing();
        f.score(Player::One);
        f.state.left_paddle.y = 0.0;
        f.state.right_paddle.y = 550.0;
        let frames_before = f.renderer.frames();

        // First three steps only reposition; the announcement stays up
        for n in [7, 6, 5] {
            assert_eq!(f.step(), TimerCommand::Keep);
            assert_eq!(f.seq.phase(), RoundPhase::Paused(n));
        }
        assert_eq!(f.board.announcement, "Next round in 5...");
        assert_eq!(f.renderer.frames(), frames_before + 1);
        assert_eq!(f.state.left_paddle.y, 180.0);
        assert_eq!(f.state.right_paddle.y, 180.0);

        for n in [4, 3, 2, 1] {
            assert_eq!(f.step(), TimerCommand::Keep);
            assert_eq!(f.board.announcement, format!("Next round in {}...", n));
        }

        assert_eq!(f.step(), TimerCommand::Run(TimerKind::Tick));
        assert_eq!(f.seq.phase(), RoundPhase::Playing);
        assert_eq!(f.board.style, AnnouncementStyle::Hidden);
        assert_eq!(f.state.left_paddle.y, 180.0);
        assert_eq!(f.state.right_paddle.y, 180.0);
        assert_eq!(
            (f.state.ball.x, f.state.ball.y, f.state.ball.dx, f.state.ball.dy),
            (160.0, 240.0, 5.0, 4.0)
        );
    }

    #[test]
    fn test_pause_counter_rearms() {
        let mut f = Fixture::playing();
        f.score(Player::Two);
        while f.step() == TimerCommand::Keep {}

        f.score(Player::Two);
        assert_eq!(f.seq.phase(), RoundPhase::Paused(8));

        let mut steps = 0;
        while f.step() == TimerCommand::Keep {
            steps += 1;
        }
        assert_eq!(steps + 1, 8);
        assert_eq!(
            (f.state.ball.x, f.state.ball.y, f.state.ball.dx, f.state.ball.dy),
            (480.0, 240.0, -5.0, -4.0)
        );
    }

    #[test]
    fn test_match_over_is_terminal() {
        let mut f = Fixture::playing();
        f.state.score = Score { one: 9, two: 0 };

        assert_eq!(f.score(Player::One), TimerCommand::Stop);
        assert_eq!(f.seq.phase(), RoundPhase::MatchOver);
        assert_eq!(f.board.scores, [10, 0]);
        assert_eq!(f.board.announcement, "Player 1 wins!!!");

        assert_eq!(f.step(), TimerCommand::Keep);
        assert_eq!(f.seq.start(&mut f.board), TimerCommand::Keep);
        assert_eq!(f.score(Player::Two), TimerCommand::Keep);
        assert_eq!(f.seq.phase(), RoundPhase::MatchOver);
    }

    #[test]
    fn test_points_ignored_outside_play() {
        let mut f = Fixture::new();
        assert_eq!(f.score(Player::One), TimerCommand::Keep);
        assert_eq!(f.seq.phase(), RoundPhase::Idle);
        assert_eq!(f.seq.recent_score(), None);
    }
}
