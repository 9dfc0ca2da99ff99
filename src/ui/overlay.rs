// Overlay message system for displaying centered text on screen

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::KeyBindings;
use crate::game::{Player, RoundPhase};

/// A message to display as an overlay in the center of the playfield
#[derive(Debug, Clone)]
pub struct OverlayMessage {
    /// Lines of text to display
    pub lines: Vec<String>,
    /// Optional title for the overlay box
    pub title: Option<String>,
    /// Style preset for the overlay
    pub style: OverlayStyle,
}

/// Predefined styles for overlay messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayStyle {
    /// Informational message (white/gray)
    Info,
    /// Success message (green)
    Success,
}

impl OverlayMessage {
    /// Create an info-style message
    pub fn info(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Info,
        }
    }

    /// Create a success-style message
    pub fn success(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Success,
        }
    }

    /// Set the title for this message
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    fn border_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::Cyan,
            OverlayStyle::Success => Color::Green,
        }
    }

    fn text_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::White,
            OverlayStyle::Success => Color::LightGreen,
        }
    }
}

/// Render an overlay message in the center of `area`
pub fn render_overlay(frame: &mut Frame, message: &OverlayMessage, area: Rect) {
    let max_line_length = message
        .lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    // Add padding for borders and spacing
    let overlay_width = (max_line_length as u16 + 6).min(area.width.saturating_sub(4));
    let overlay_height = (message.lines.len() as u16 + 4).min(area.height.saturating_sub(2));
    if overlay_width < 3 || overlay_height < 3 {
        return;
    }

    let overlay_area = Rect {
        x: area.x + (area.width.saturating_sub(overlay_width)) / 2,
        y: area.y + (area.height.saturating_sub(overlay_height)) / 2,
        width: overlay_width,
        height: overlay_height,
    };

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(message.border_color()))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));

    if let Some(ref title) = message.title {
        block = block.title(format!(" {} ", title));
    }

    frame.render_widget(block, overlay_area);

    let inner_area = overlay_area.inner(ratatui::layout::Margin::new(2, 1));

    let text_lines: Vec<Line> = message
        .lines
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(message.text_color()),
            ))
        })
        .collect();

    let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);

    frame.render_widget(paragraph, inner_area);
}

/// Overlay for phases that wait on the players: before the start and after the match
pub fn phase_overlay(
    phase: RoundPhase,
    winner: Option<Player>,
    bindings: &KeyBindings,
) -> Option<OverlayMessage> {
    match phase {
        RoundPhase::Idle => Some(
            OverlayMessage::info(vec![
                format!("{} to start", bindings.start),
                String::new(),
                format!(
                    "Left: {}/{}   Right: {}/{}",
                    bindings.left_paddle_up,
                    bindings.left_paddle_down,
                    bindings.right_paddle_up,
                    bindings.right_paddle_down
                ),
            ])
            .with_title("PONG"),
        ),
        RoundPhase::MatchOver => {
            let headline = match winner {
                Some(player) => format!("PLAYER {} WINS", player.number()),
                None => "GAME OVER".to_string(),
            };
            Some(OverlayMessage::success(vec![
                headline,
                String::new(),
                format!("{} to Reset  |  {} to Quit", bindings.reset, bindings.quit),
            ]))
        }
        RoundPhase::Countdown(_) | RoundPhase::Playing | RoundPhase::Paused(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_only_while_waiting() {
        let bindings = KeyBindings::default();
        let idle = phase_overlay(RoundPhase::Idle, None, &bindings).unwrap();
        assert_eq!(idle.style, OverlayStyle::Info);
        assert_eq!(idle.lines[0], "Space to start");
        assert_eq!(idle.lines[2], "Left: W/S   Right: Up/Down");

        assert!(phase_overlay(RoundPhase::Playing, None, &bindings).is_none());
        assert!(phase_overlay(RoundPhase::Paused(3), Some(Player::One), &bindings).is_none());
        assert!(phase_overlay(RoundPhase::Countdown(2), None, &bindings).is_none());
    }

    #[test]
    fn test_match_over_names_winner() {
        let over = phase_overlay(
            RoundPhase::MatchOver,
            Some(Player::Two),
            &KeyBindings::default(),
        )
        .unwrap();
        assert_eq!(over.style, OverlayStyle::Success);
        assert_eq!(over.lines[0], "PLAYER 2 WINS");
        assert_eq!(over.lines[2], "R to Reset  |  Q to Quit");
    }
}
