use super::input::InputState;
use super::renderer::{draw_frame, Renderer};
use super::state::{Ball, GameState, Paddle, Player};

// Vertical slack around a paddle inside which the ball still counts as a hit
const PADDLE_REACH: f32 = 10.0;

/// What happened during one tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsEvents {
    /// Set when the ball crossed a side wall; holds the player awarded the point
    pub scored: Option<Player>,
    pub wall_collision: bool,
    pub paddle_collision: bool,
}

/// Advance the simulation by one fixed step.
///
/// Draws the current state first, then resolves collisions against the
/// position the ball is about to move to, moves the ball and finally the
/// paddles. A score is counted here; pausing is up to the caller.
pub fn tick<R: Renderer + ?Sized>(
    state: &mut GameState,
    input: &InputState,
    renderer: &mut R,
) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();

    draw_frame(renderer, state);

    events.scored = check_goal(state);
    events.wall_collision = check_wall_collision(&mut state.ball, state.field_height);

    // Left paddle is checked first; both may act within the same tick
    let left_hit = check_paddle_collision(&mut state.ball, &state.left_paddle, Side::Left);
    let right_hit = check_paddle_collision(&mut state.ball, &state.right_paddle, Side::Right);
    events.paddle_collision = left_hit || right_hit;

    state.ball.x += state.ball.dx;
    state.ball.y += state.ball.dy;

    move_paddle(
        &mut state.left_paddle,
        input.left_up,
        input.left_down,
        state.field_height,
    );
    move_paddle(
        &mut state.right_paddle,
        input.right_up,
        input.right_down,
        state.field_height,
    );

    events
}

fn check_goal(state: &mut GameState) -> Option<Player> {
    let ball = &mut state.ball;
    let mut scorer = None;

    if ball.x + ball.dx < ball.radius {
        ball.dx = -ball.dx;
        scorer = Some(Player::Two);
    }
    if ball.x + ball.dx > state.field_width - ball.radius {
        ball.dx = -ball.dx;
        scorer = Some(Player::One);
    }

    if let Some(player) = scorer {
        state.score.award(player);
    }
    scorer
}

fn check_wall_collision(ball: &mut Ball, field_height: f32) -> bool {
    let next_y = ball.y + ball.dy;
    if next_y < ball.radius || next_y > field_height - ball.radius {
        ball.dy = -ball.dy;
        return true;
    }
    false
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

fn check_paddle_collision(ball: &mut Ball, paddle: &Paddle, side: Side) -> bool {
    let within_reach =
        ball.y > paddle.y - PADDLE_REACH && ball.y < paddle.y + paddle.h + PADDLE_REACH;

    // The ball must land exactly on the contact column. With integral steps a
    // paddle face that is not a multiple of the step away is never hit.
    let contact_x = match side {
        Side::Left => paddle.x + paddle.w + ball.radius,
        Side::Right => paddle.x - ball.radius,
    };

    if !within_reach || ball.x != contact_x {
        return false;
    }

    if ball.y <= paddle.y + paddle.h / 2.0 {
        ball.dy = -ball.dy.abs();
    } else {
        ball.dy = ball.dy.abs();
    }
    ball.dx = -ball.dx;
    true
}

fn move_paddle(paddle: &mut Paddle, up: bool, down: bool, field_height: f32) {
    if up {
        paddle.move_up();
    } else if down {
        paddle.move_down(field_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::renderer::testing::RecordingRenderer;
    use crate::game::state::{BALL_RADIUS, FIELD_HEIGHT, PADDLE_HEIGHT};

    fn run(state: &mut GameState, input: &InputState) -> PhysicsEvents {
        tick(state, input, &mut RecordingRenderer::default())
    }

    fn ball(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        Ball::new(x, y, dx, dy, BALL_RADIUS)
    }

    #[test]
    fn test_free_flight() {
        let mut state = GameState::new();
        let events = run(&mut state, &InputState::default());

        assert_eq!(events, PhysicsEvents::default());
        assert_eq!((state.ball.x, state.ball.y), (105.0, 244.0));
        assert_eq!((state.ball.dx, state.ball.dy), (5.0, 4.0));
    }

    #[test]
    fn test_draws_before_moving() {
        let mut state = GameState::new();
        let before = state.ball;
        let mut renderer = RecordingRenderer::default();
        tick(&mut state, &InputState::default(), &mut renderer);

        assert_eq!(renderer.frames(), 1);
        assert_eq!(renderer.last_ball(), Some(before));
    }

    #[test]
    fn test_bottom_wall_flips_dy() {
        let mut state = GameState::new();
        // Keep clear of the paddles' contact columns
        state.ball = ball(300.0, 623.0, 5.0, 4.0);

        let events = run(&mut state, &InputState::default());
        assert!(events.wall_collision);
        assert_eq!(state.ball.dy, -4.0);
        assert_eq!(state.ball.y, 619.0);
    }

    #[test]
    fn test_ball_stays_between_walls() {
        let mut state = GameState::new();
        state.ball = ball(300.0, 240.0, 0.0, 7.0);
        let input = InputState::default();

        for _ in 0..1000 {
            run(&mut state, &input);
            assert!(state.ball.y >= BALL_RADIUS);
            assert!(state.ball.y <= FIELD_HEIGHT - BALL_RADIUS);
        }
    }

    #[test]
    fn test_left_wall_scores_for_player_two() {
        let mut state = GameState::new();
        // No paddle contact: the left paddle is far away vertically
        state.left_paddle.y = 500.0;
        state.ball = ball(18.0, 240.0, -5.0, 4.0);

        let events = run(&mut state, &InputState::default());
        assert_eq!(events.scored, Some(Player::Two));
        assert_eq!(state.score.two, 1);
        assert_eq!(state.score.one, 0);
        assert_eq!(state.ball.dx, 5.0);
    }

    #[test]
    fn test_right_wall_scores_for_player_one() {
        let mut state = GameState::new();
        state.right_paddle.y = 500.0;
        state.ball = ball(622.0, 240.0, 5.0, 4.0);

        let events = run(&mut state, &InputState::default());
        assert_eq!(events.scored, Some(Player::One));
        assert_eq!(state.score.one, 1);
        assert_eq!(state.ball.dx, -5.0);
    }

    #[test]
    fn test_each_crossing_scores_once() {
        let mut state = GameState::new();
        state.left_paddle.y = 500.0;
        state.right_paddle.y = 500.0;
        state.ball = ball(20.0, 240.0, -5.0, 0.0);

        let mut goals = 0;
        for _ in 0..10 {
            if run(&mut state, &InputState::default()).scored.is_some() {
                goals += 1;
            }
        }
        assert_eq!(goals, 1);
        assert_eq!(state.score.two, 1);
    }

    #[test]
    fn test_left_paddle_upper_half_bounces_up() {
        let mut state = GameState::new();
        // Contact column for the left paddle is 0 + 20 + 15
        state.ball = ball(35.0, 200.0, -5.0, 4.0);

        let events = run(&mut state, &InputState::default());
        assert!(events.paddle_collision);
        assert_eq!(state.ball.dx, 5.0);
        assert_eq!(state.ball.dy, -4.0);
        assert_eq!((state.ball.x, state.ball.y), (40.0, 196.0));
    }

    #[test]
    fn test_left_paddle_lower_half_bounces_down() {
        let mut state = GameState::new();
        state.ball = ball(35.0, 260.0, -5.0, -4.0);

        let events = run(&mut state, &InputState::default());
        assert!(events.paddle_collision);
        assert_eq!(state.ball.dx, 5.0);
        assert_eq!(state.ball.dy, 4.0);
    }

    #[test]
    fn test_right_paddle_bounce() {
        let mut state = GameState::new();
        // Contact column for the right paddle is 620 - 15; reach extends 10 above
        state.ball = ball(605.0, 175.0, 5.0, 4.0);

        let events = run(&mut state, &InputState::default());
        assert!(events.paddle_collision);
        assert_eq!(state.ball.dx, -5.0);
        assert_eq!(state.ball.dy, -4.0);
    }

    #[test]
    fn test_paddle_reach_is_exclusive() {
        let mut state = GameState::new();
        // 180 - 10 is just outside the reach
        state.ball = ball(35.0, 170.0, -5.0, 4.0);

        let events = run(&mut state, &InputState::default());
        assert!(!events.paddle_collision);
        assert_eq!(state.ball.dx, -5.0);
    }

    #[test]
    fn test_off_column_ball_passes_through() {
        let mut state = GameState::new();
        // Steps of 5 from 37 land on 32, never on 35
        state.ball = ball(37.0, 200.0, -5.0, 0.0);

        let events = run(&mut state, &InputState::default());
        assert!(!events.paddle_collision);
        assert_eq!(state.ball.x, 32.0);
        assert_eq!(state.ball.dx, -5.0);
    }

    #[test]
    fn test_served_ball_meets_right_paddle() {
        let mut state = GameState::new();
        state.place_for_serve(Player::One);
        state.ball.dy = 0.0;
        let input = InputState::default();

        let mut hit = false;
        for _ in 0..100 {
            if run(&mut state, &input).paddle_collision {
                hit = true;
                break;
            }
        }
        assert!(hit);
        assert_eq!(state.ball.dx, -5.0);
        assert_eq!(state.score.one, 0);
    }

    #[test]
    fn test_paddles_follow_flags_and_clamp() {
        let mut state = GameState::new();
        let input = InputState {
            left_up: true,
            right_down: true,
            ..InputState::default()
        };

        for _ in 0..500 {
            state.ball = ball(300.0, 300.0, 0.0, 0.0);
            run(&mut state, &input);
            assert!(state.left_paddle.y >= 0.0);
            assert!(state.right_paddle.y <= FIELD_HEIGHT - PADDLE_HEIGHT);
        }
        assert_eq!(state.left_paddle.y, 0.0);
        assert_eq!(state.right_paddle.y, FIELD_HEIGHT - PADDLE_HEIGHT);
    }

    #[test]
    fn test_up_wins_over_down() {
        let mut state = GameState::new();
        let input = InputState {
            left_up: true,
            left_down: true,
            ..InputState::default()
        };
        run(&mut state, &input);
        assert_eq!(state.left_paddle.y, 175.0);
        assert_eq!(state.right_paddle.y, 180.0);
    }
}
