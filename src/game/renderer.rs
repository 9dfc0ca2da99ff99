// Drawing collaborator for the simulation loop and the round sequencer

use super::state::{Ball, GameState, Paddle};

/// Trait for the surface the game draws its frames onto
///
/// The simulation never reads anything back from the renderer. Each frame is
/// a `clear()` followed by the individual draw calls.
pub trait Renderer {
    /// Wipe the whole playfield
    fn clear(&mut self);

    fn draw_ball(&mut self, ball: &Ball);

    fn draw_paddle(&mut self, paddle: &Paddle);

    /// Translucent stripe splitting the field in two halves
    fn draw_center_divider(&mut self);

    /// "P1" / "P2" markings on the field
    fn draw_labels(&mut self);
}

/// Draw the full frame for the current state, ball included
pub fn draw_frame<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState) {
    renderer.clear();
    renderer.draw_ball(&state.ball);
    renderer.draw_paddle(&state.left_paddle);
    renderer.draw_paddle(&state.right_paddle);
    renderer.draw_center_divider();
    renderer.draw_labels();
}

/// Draw the field without the ball (shown before the first start)
pub fn draw_idle_frame<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState) {
    renderer.clear();
    renderer.draw_paddle(&state.left_paddle);
    renderer.draw_paddle(&state.right_paddle);
    renderer.draw_center_divider();
    renderer.draw_labels();
}
