// Header widgets: the two score labels and the announcer line

use crate::game::{AnnouncementStyle, Player, Scoreboard};

#[derive(Debug, Clone)]
pub struct ScoreboardPanel {
    scores: [u8; 2],
    announcement: String,
    style: AnnouncementStyle,
}

impl ScoreboardPanel {
    pub fn new() -> Self {
        Self {
            scores: [0, 0],
            announcement: String::new(),
            style: AnnouncementStyle::Hidden,
        }
    }

    pub fn score(&self, player: Player) -> u8 {
        self.scores[slot(player)]
    }

    /// Announcer text, or `None` while it is hidden
    pub fn visible_announcement(&self) -> Option<&str> {
        match self.style {
            AnnouncementStyle::Shown if !self.announcement.is_empty() => {
                Some(&self.announcement)
            }
            _ => None,
        }
    }
}

impl Default for ScoreboardPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard for ScoreboardPanel {
    fn set_score(&mut self, player: Player, value: u8) {
        self.scores[slot(player)] = value;
    }

    fn set_announcement(&mut self, text: &str) {
        self.announcement.clear();
        self.announcement.push_str(text);
    }

    fn set_announcement_style(&mut self, style: AnnouncementStyle) {
        self.style = style;
    }
}

fn slot(player: Player) -> usize {
    match player {
        Player::One => 0,
        Player::Two => 1,
    }
}
