use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::config::KeyBindings;

/// One of the four paddle direction keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaddleControl {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl PaddleControl {
    pub const ALL: [PaddleControl; 4] = [
        PaddleControl::LeftUp,
        PaddleControl::LeftDown,
        PaddleControl::RightUp,
        PaddleControl::RightDown,
    ];

    fn index(self) -> usize {
        match self {
            PaddleControl::LeftUp => 0,
            PaddleControl::LeftDown => 1,
            PaddleControl::RightUp => 2,
            PaddleControl::RightDown => 3,
        }
    }
}

/// Currently held paddle keys. Read by every tick, never queued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

impl InputState {
    pub fn set(&mut self, control: PaddleControl, pressed: bool) {
        match control {
            PaddleControl::LeftUp => self.left_up = pressed,
            PaddleControl::LeftDown => self.left_down = pressed,
            PaddleControl::RightUp => self.right_up = pressed,
            PaddleControl::RightDown => self.right_down = pressed,
        }
    }

    pub fn is_pressed(&self, control: PaddleControl) -> bool {
        match control {
            PaddleControl::LeftUp => self.left_up,
            PaddleControl::LeftDown => self.left_down,
            PaddleControl::RightUp => self.right_up,
            PaddleControl::RightDown => self.right_down,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Paddle key went down (`pressed`) or up
    Paddle {
        control: PaddleControl,
        pressed: bool,
    },
    Start,
    Reset,
    Quit,
}

/// Resolved key bindings
#[derive(Clone, Debug)]
pub struct KeyMap {
    paddles: [(KeyCode, PaddleControl); 4],
    start: KeyCode,
    reset: KeyCode,
    quit: KeyCode,
}

impl KeyMap {
    pub fn from_bindings(bindings: &KeyBindings) -> Result<Self> {
        Ok(Self {
            paddles: [
                (resolve(&bindings.left_paddle_up)?, PaddleControl::LeftUp),
                (resolve(&bindings.left_paddle_down)?, PaddleControl::LeftDown),
                (resolve(&bindings.right_paddle_up)?, PaddleControl::RightUp),
                (resolve(&bindings.right_paddle_down)?, PaddleControl::RightDown),
            ],
            start: resolve(&bindings.start)?,
            reset: resolve(&bindings.reset)?,
            quit: resolve(&bindings.quit)?,
        })
    }

    /// Map a terminal key event to an action. Unbound keys yield `None`.
    pub fn translate(&self, key: &KeyEvent) -> Option<InputAction> {
        let code = normalize(key.code);
        let pressed = key.kind != KeyEventKind::Release;

        if let Some((_, control)) = self.paddles.iter().find(|(c, _)| *c == code) {
            return Some(InputAction::Paddle {
                control: *control,
                pressed,
            });
        }

        // Lifecycle keys act on the initial press only
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if code == KeyCode::Esc
            || code == self.quit
            || (code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            Some(InputAction::Quit)
        } else if code == self.start {
            Some(InputAction::Start)
        } else if code == self.reset {
            Some(InputAction::Reset)
        } else {
            None
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            paddles: [
                (KeyCode::Char('w'), PaddleControl::LeftUp),
                (KeyCode::Char('s'), PaddleControl::LeftDown),
                (KeyCode::Up, PaddleControl::RightUp),
                (KeyCode::Down, PaddleControl::RightDown),
            ],
            start: KeyCode::Char(' '),
            reset: KeyCode::Char('r'),
            quit: KeyCode::Char('q'),
        }
    }
}

/// Parse a key name from the config file ("W", "Up", "Space", ...)
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(normalize(KeyCode::Char(c)));
    }

    let code = match name.to_ascii_lowercase().as_str() {
        "up" | "arrowup" => KeyCode::Up,
        "down" | "arrowdown" => KeyCode::Down,
        "left" | "arrowleft" => KeyCode::Left,
        "right" | "arrowright" => KeyCode::Right,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        _ => return None,
    };
    Some(code)
}

fn resolve(name: &str) -> Result<KeyCode> {
    match parse_key_code(name) {
        Some(code) => Ok(code),
        None => bail!("unknown key name in key bindings: {:?}", name),
    }
}

// Letters match regardless of shift
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Synthesizes key releases for terminals that only report presses.
///
/// Every press or auto-repeat keeps the key held for `window`; once the
/// window lapses without a repeat the key counts as released.
#[derive(Debug)]
pub struct HoldEmulator {
    window: Duration,
    deadlines: [Option<Instant>; 4],
}

impl HoldEmulator {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadlines: [None; 4],
        }
    }

    pub fn on_press(&mut self, control: PaddleControl, now: Instant) {
        self.deadlines[control.index()] = Some(now + self.window);
    }

    pub fn on_release(&mut self, control: PaddleControl) {
        self.deadlines[control.index()] = None;
    }

    /// Controls whose hold window ran out by `now`; they are forgotten
    pub fn expire(&mut self, now: Instant) -> Vec<PaddleControl> {
        PaddleControl::ALL
            .into_iter()
            .filter(|control| {
                let slot = &mut self.deadlines[control.index()];
                match *slot {
                    Some(deadline) if deadline <= now => {
                        *slot = None;
                        true
                    }
                    _ => false,
                }
            })
            .collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.iter().flatten().min().copied()
    }
}
