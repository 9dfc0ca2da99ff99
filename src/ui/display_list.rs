// Records the game's draw calls in playfield coordinates; the terminal
// rasterizes the latest list on each redraw

use crate::game::state::{DIVIDER_WIDTH, DIVIDER_X, LABELS};
use crate::game::{Ball, Paddle, Renderer};

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Ball { x: f32, y: f32, radius: f32 },
    Paddle { x: f32, y: f32, w: f32, h: f32 },
    Divider { x: f32, w: f32 },
    Label { text: &'static str, x: f32, y: f32 },
}

#[derive(Debug, Default)]
pub struct DisplayList {
    shapes: Vec<Shape>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

impl Renderer for DisplayList {
    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn draw_ball(&mut self, ball: &Ball) {
        self.shapes.push(Shape::Ball {
            x: ball.x,
            y: ball.y,
            radius: ball.radius,
        });
    }

    fn draw_paddle(&mut self, paddle: &Paddle) {
        self.shapes.push(Shape::Paddle {
            x: paddle.x,
            y: paddle.y,
            w: paddle.w,
            h: paddle.h,
        });
    }

    fn draw_center_divider(&mut self) {
        self.shapes.push(Shape::Divider {
            x: DIVIDER_X,
            w: DIVIDER_WIDTH,
        });
    }

    fn draw_labels(&mut self) {
        for (text, x, y) in LABELS {
            self.shapes.push(Shape::Label { text, x, y });
        }
    }
}
