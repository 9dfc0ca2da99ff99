// Playfield geometry and the mutable simulation state
// All coordinates are playfield pixels, origin at the top-left corner

pub const FIELD_WIDTH: f32 = 640.0;
pub const FIELD_HEIGHT: f32 = 640.0;

pub const DIVIDER_X: f32 = 315.0;
pub const DIVIDER_WIDTH: f32 = 10.0;

pub const PADDLE_WIDTH: f32 = 20.0;
pub const PADDLE_HEIGHT: f32 = 90.0;
pub const PADDLE_SPEED: f32 = 5.0;
pub const PADDLE_START_Y: f32 = 180.0;

pub const BALL_RADIUS: f32 = 15.0;

pub const WINNING_SCORE: u8 = 10;

/// Player labels drawn on the field, with their baseline anchors
pub const LABELS: [(&str, f32, f32); 2] = [("P1", 25.0, 50.0), ("P2", 560.0, 50.0)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub radius: f32,
}

impl Ball {
    pub fn new(x: f32, y: f32, dx: f32, dy: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            dx,
            dy,
            radius,
        }
    }

    /// Ball as placed at page load, before the first serve
    pub fn opening() -> Self {
        Self::new(100.0, 240.0, 5.0, 4.0, BALL_RADIUS)
    }

    /// Put the ball on the serving side of the player who scored last
    pub fn serve(&mut self, server: Player) {
        let (x, dx, dy) = match server {
            Player::One => (160.0, 5.0, 4.0),
            Player::Two => (480.0, -5.0, -4.0),
        };
        self.x = x;
        self.y = 240.0;
        self.dx = dx;
        self.dy = dy;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub dy: f32,
}

impl Paddle {
    pub fn new(x: f32, y: f32, w: f32, h: f32, dy: f32) -> Self {
        Self { x, y, w, h, dy }
    }

    pub fn left() -> Self {
        Self::new(0.0, PADDLE_START_Y, PADDLE_WIDTH, PADDLE_HEIGHT, PADDLE_SPEED)
    }

    pub fn right() -> Self {
        Self::new(
            FIELD_WIDTH - PADDLE_WIDTH,
            PADDLE_START_Y,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
            PADDLE_SPEED,
        )
    }

    pub fn move_up(&mut self) {
        self.y = (self.y - self.dy).max(0.0);
    }

    pub fn move_down(&mut self, field_height: f32) {
        self.y = (self.y + self.dy).min(field_height - self.h);
    }

    pub fn recenter(&mut self) {
        self.y = PADDLE_START_Y;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Left paddle
    One,
    /// Right paddle
    Two,
}

impl Player {
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub one: u8,
    pub two: u8,
}

impl Score {
    /// Add a point and return the scorer's new total
    pub fn award(&mut self, player: Player) -> u8 {
        let slot = match player {
            Player::One => &mut self.one,
            Player::Two => &mut self.two,
        };
        *slot += 1;
        *slot
    }

    pub fn get(&self, player: Player) -> u8 {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    pub fn is_match_point_reached(&self) -> bool {
        self.one == WINNING_SCORE || self.two == WINNING_SCORE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub score: Score,
    pub field_width: f32,
    pub field_height: f32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            ball: Ball::opening(),
            left_paddle: Paddle::left(),
            right_paddle: Paddle::right(),
            score: Score::default(),
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
        }
    }

    /// Serve position for the next point: ball on the scorer's side, paddles centered
    pub fn place_for_serve(&mut self, server: Player) {
        self.ball.serve(server);
        self.left_paddle.recenter();
        self.right_paddle.recenter();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let state = GameState::new();
        assert_eq!(state.ball, Ball::new(100.0, 240.0, 5.0, 4.0, 15.0));
        assert_eq!(state.left_paddle.x, 0.0);
        assert_eq!(state.right_paddle.x, 620.0);
        assert_eq!(state.left_paddle.y, 180.0);
        assert_eq!(state.right_paddle.y, 180.0);
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_serve_positions() {
        let mut state = GameState::new();
        state.left_paddle.y = 0.0;
        state.right_paddle.y = 550.0;

        state.place_for_serve(Player::One);
        assert_eq!((state.ball.x, state.ball.y), (160.0, 240.0));
        assert_eq!((state.ball.dx, state.ball.dy), (5.0, 4.0));
        assert_eq!(state.left_paddle.y, 180.0);
        assert_eq!(state.right_paddle.y, 180.0);

        state.place_for_serve(Player::Two);
        assert_eq!((state.ball.x, state.ball.y), (480.0, 240.0));
        assert_eq!((state.ball.dx, state.ball.dy), (-5.0, -4.0));
        assert_eq!(state.ball.radius, BALL_RADIUS);
    }

    #[test]
    fn test_paddle_clamps() {
        let mut paddle = Paddle::left();
        for _ in 0..100 {
            paddle.move_up();
        }
        assert_eq!(paddle.y, 0.0);

        for _ in 0..200 {
            paddle.move_down(FIELD_HEIGHT);
        }
        assert_eq!(paddle.y, FIELD_HEIGHT - PADDLE_HEIGHT);
    }

    #[test]
    fn test_score_award_and_match_point() {
        let mut score = Score { one: 9, two: 3 };
        assert!(!score.is_match_point_reached());
        assert_eq!(score.award(Player::One), 10);
        assert_eq!(score.get(Player::Two), 3);
        assert!(score.is_match_point_reached());
    }
}
