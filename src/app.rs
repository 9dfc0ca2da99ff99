use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::time::{Duration, Instant};

use crate::config::{Config, KeyBindings};
use crate::game::{HoldEmulator, InputAction, KeyMap, Session};
use crate::ui::{self, DisplayList, ScoreboardPanel, View};

pub type TerminalSession = Session<DisplayList, ScoreboardPanel>;

/// Whether the run loop keeps going after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The game as seen by the terminal: the current session plus input plumbing
pub struct App<'a> {
    config: &'a Config,
    keymap: KeyMap,
    session: TerminalSession,
    // Present only when the terminal cannot report key releases
    hold: Option<HoldEmulator>,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, keymap: KeyMap, releases_reported: bool) -> Self {
        let hold = (!releases_reported).then(|| hold_emulator(config));
        Self {
            config,
            keymap,
            session: new_session(config),
            hold,
        }
    }

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> Flow {
        let Some(action) = self.keymap.translate(key) else {
            return Flow::Continue;
        };

        match action {
            InputAction::Quit => return Flow::Quit,
            InputAction::Start => self.session.start(now),
            InputAction::Reset => self.reset(),
            InputAction::Paddle { control, pressed } => {
                if let Some(hold) = self.hold.as_mut() {
                    if pressed {
                        hold.on_press(control, now);
                    } else {
                        hold.on_release(control);
                    }
                }
                self.session.set_paddle_key(control, pressed);
            }
        }
        Flow::Continue
    }

    /// Expire emulated key holds and run due timers
    pub fn update(&mut self, now: Instant) {
        // Ticks before a synthesized release still see the key held
        if let Some(hold) = self.hold.as_mut() {
            while let Some(deadline) = hold.next_deadline().filter(|d| *d <= now) {
                self.session.advance(deadline);
                for control in hold.expire(deadline) {
                    self.session.set_paddle_key(control, false);
                }
            }
        }
        self.session.advance(now);
    }

    /// Earliest instant at which `update` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        let hold = self.hold.as_ref().and_then(HoldEmulator::next_deadline);
        match (self.session.next_deadline(), hold) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn reset(&mut self) {
        tracing::info!(phase = ?self.session.phase(), "reset requested, reloading session");
        self.session = new_session(self.config);
        if self.hold.is_some() {
            self.hold = Some(hold_emulator(self.config));
        }
    }
}

/// Run the game until the players quit
pub fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let frame_period = Duration::from_millis(1000 / app.config.display.target_fps.max(1));
    let controls_hint = controls_hint(&app.config.keybindings);
    let mut next_frame = Instant::now();

    loop {
        let now = Instant::now();
        if now >= next_frame {
            draw(terminal, app, &controls_hint)?;
            next_frame = now + frame_period;
        }

        let deadline = app.next_deadline().map_or(next_frame, |d| d.min(next_frame));
        let timeout = deadline.saturating_duration_since(Instant::now());

        // Drain every pending event before stepping the game
        if event::poll(timeout)? {
            loop {
                if let Event::Key(key) = event::read()? {
                    if app.handle_key(&key, Instant::now()) == Flow::Quit {
                        tracing::info!("quit requested");
                        return Ok(());
                    }
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        app.update(Instant::now());
    }
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &App, controls_hint: &str) -> Result<()> {
    let session = &app.session;
    let overlay = ui::phase_overlay(
        session.phase(),
        session.recent_score(),
        &app.config.keybindings,
    );

    terminal.draw(|f| {
        ui::render(
            f,
            &View {
                shapes: session.renderer().shapes(),
                scoreboard: session.scoreboard(),
                overlay: overlay.as_ref(),
                controls_hint,
                display: &app.config.display,
            },
        )
    })?;
    Ok(())
}

fn new_session(config: &Config) -> TerminalSession {
    tracing::debug!("new session");
    Session::new(&config.timing, DisplayList::new(), ScoreboardPanel::new())
}

fn hold_emulator(config: &Config) -> HoldEmulator {
    HoldEmulator::new(Duration::from_millis(config.input.hold_release_ms))
}

fn controls_hint(bindings: &KeyBindings) -> String {
    format!(
        "{}/{}: Left  {}/{}: Right  {}: Start  {}: Reset  {}: Quit",
        bindings.left_paddle_up,
        bindings.left_paddle_down,
        bindings.right_paddle_up,
        bindings.right_paddle_down,
        bindings.start,
        bindings.reset,
        bindings.quit
    )
}
