pub mod input;
pub mod physics;
pub mod renderer;
pub mod scheduler;
pub mod scoreboard;
pub mod sequencer;
pub mod session;
pub mod state;

pub use input::{HoldEmulator, InputAction, KeyMap};
pub use renderer::Renderer;
pub use scoreboard::{AnnouncementStyle, Scoreboard};
pub use sequencer::RoundPhase;
pub use session::Session;
pub use state::{Ball, Paddle, Player};
