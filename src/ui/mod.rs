pub mod braille;
pub mod display_list;
pub mod overlay;
pub mod render;
pub mod scoreboard;

pub use display_list::DisplayList;
pub use overlay::phase_overlay;
pub use render::{render, View};
pub use scoreboard::ScoreboardPanel;
