// Score labels and announcer line shown next to the playfield

use super::state::Player;

/// Whether the announcer text is currently legible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementStyle {
    Shown,
    /// Text is kept but blends into the background
    Hidden,
}

/// Trait for the widgets that display scores and announcements
pub trait Scoreboard {
    fn set_score(&mut self, player: Player, value: u8);

    fn set_announcement(&mut self, text: &str);

    fn set_announcement_style(&mut self, style: AnnouncementStyle);
}
