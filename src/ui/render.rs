use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::braille::BrailleCanvas;
use super::display_list::Shape;
use super::overlay::{render_overlay, OverlayMessage};
use super::scoreboard::ScoreboardPanel;
use crate::config::DisplayConfig;
use crate::game::state::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::game::Player;

// Layout: score line, announcer line, controls hint, then the bordered field
const UI_HEADER_ROWS: u16 = 3;

const BACKGROUND: Color = Color::Rgb(0, 0, 0);

/// Everything one redraw needs
pub struct View<'a> {
    pub shapes: &'a [Shape],
    pub scoreboard: &'a ScoreboardPanel,
    pub overlay: Option<&'a OverlayMessage>,
    pub controls_hint: &'a str,
    pub display: &'a DisplayConfig,
}

pub fn render(frame: &mut Frame, view: &View) {
    let area = frame.area();

    // Draw background (true black RGB, not terminal default)
    let bg = Block::default().style(Style::default().bg(BACKGROUND));
    frame.render_widget(bg, area);

    draw_header(frame, view, area);

    if area.height <= UI_HEADER_ROWS + 2 {
        return;
    }

    let field_area = Rect {
        x: area.x,
        y: area.y + UI_HEADER_ROWS,
        width: area.width,
        height: area.height - UI_HEADER_ROWS,
    };
    let border = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = border.inner(field_area);
    frame.render_widget(border, field_area);

    let geometry = FieldGeometry::fit(inner.width as usize, inner.height as usize);
    let canvas = rasterize(view.shapes, &geometry, inner, view.display);
    render_braille_canvas(frame, &canvas, inner);
    draw_labels(frame, view.shapes, &geometry, inner, view.display);

    if let Some(message) = view.overlay {
        render_overlay(frame, message, inner);
    }
}

/// Mapping from playfield units to Braille pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldGeometry {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl FieldGeometry {
    /// Largest square field that fits in a cell area, centered
    pub fn fit(width_cells: usize, height_cells: usize) -> Self {
        let pixel_w = (width_cells * 2) as f32;
        let pixel_h = (height_cells * 4) as f32;
        let scale = (pixel_w / FIELD_WIDTH).min(pixel_h / FIELD_HEIGHT);

        Self {
            scale,
            offset_x: ((pixel_w - FIELD_WIDTH * scale) / 2.0).floor(),
            offset_y: ((pixel_h - FIELD_HEIGHT * scale) / 2.0).floor(),
        }
    }

    pub fn to_pixel(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.offset_x + x * self.scale,
            self.offset_y + y * self.scale,
        )
    }

    fn length(&self, v: f32) -> usize {
        ((v * self.scale).round() as usize).max(1)
    }
}

/// Rasterize the display list onto a canvas covering `area`
pub fn rasterize(
    shapes: &[Shape],
    geometry: &FieldGeometry,
    area: Rect,
    display: &DisplayConfig,
) -> BrailleCanvas {
    let mut canvas = BrailleCanvas::new(area.width as usize, area.height as usize);

    // Divider first so the moving objects win shared cells
    for shape in shapes {
        if let Shape::Divider { x, w } = *shape {
            canvas.set_pen(rgb(display.divider_color));
            let (px, top) = geometry.to_pixel(x, 0.0);
            let (_, bottom) = geometry.to_pixel(x, FIELD_HEIGHT);
            let width = geometry.length(w);
            for py in (top as usize..bottom as usize).step_by(2) {
                canvas.fill_rect(px as usize, py, width, 1);
            }
        }
    }

    for shape in shapes {
        match *shape {
            Shape::Ball { x, y, radius } => {
                canvas.set_pen(rgb(display.ball_color));
                let (px, py) = geometry.to_pixel(x, y);
                canvas.fill_circle(px, py, radius * geometry.scale);
            }
            Shape::Paddle { x, y, w, h } => {
                canvas.set_pen(rgb(display.paddle_color));
                let (px, py) = geometry.to_pixel(x, y);
                canvas.fill_rect(
                    px as usize,
                    py as usize,
                    geometry.length(w),
                    geometry.length(h),
                );
            }
            Shape::Divider { .. } | Shape::Label { .. } => {}
        }
    }

    canvas
}

fn render_braille_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect) {
    let lines: Vec<Line> = (0..canvas.height())
        .map(|y| {
            // Merge runs of equally colored cells into one span
            let mut spans = Vec::new();
            let mut run = String::new();
            let mut run_color = None;

            for x in 0..canvas.width() {
                let color = canvas.color_at(x, y);
                if color != run_color && !run.is_empty() {
                    spans.push(styled_run(std::mem::take(&mut run), run_color));
                }
                run_color = color;
                run.push(canvas.to_char(x, y));
            }
            if !run.is_empty() {
                spans.push(styled_run(run, run_color));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn styled_run(text: String, color: Option<Color>) -> Span<'static> {
    Span::styled(text, Style::default().fg(color.unwrap_or(Color::White)))
}

fn draw_labels(
    frame: &mut Frame,
    shapes: &[Shape],
    geometry: &FieldGeometry,
    area: Rect,
    display: &DisplayConfig,
) {
    for shape in shapes {
        if let Shape::Label { text, x, y } = *shape {
            // Anchors are text baselines; place the cell row just above
            let (px, py) = geometry.to_pixel(x, y);
            let col = (px / 2.0) as u16;
            let row = ((py / 4.0) as u16).saturating_sub(1);
            if col >= area.width || row >= area.height {
                continue;
            }

            let label = Paragraph::new(text).style(
                Style::default()
                    .fg(rgb(display.label_color))
                    .add_modifier(Modifier::BOLD),
            );
            let label_area = Rect {
                x: area.x + col,
                y: area.y + row,
                width: (text.len() as u16).min(area.width - col),
                height: 1,
            };
            frame.render_widget(label, label_area);
        }
    }
}

fn draw_header(frame: &mut Frame, view: &View, area: Rect) {
    let board = view.scoreboard;
    let scores = Line::from(vec![
        Span::styled("Player 1: ", Style::default().fg(Color::Gray)),
        Span::styled(
            board.score(Player::One).to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("      "),
        Span::styled("Player 2: ", Style::default().fg(Color::Gray)),
        Span::styled(
            board.score(Player::Two).to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]);
    header_line(frame, Paragraph::new(scores), area, 0);

    if let Some(text) = board.visible_announcement() {
        let announcement = Paragraph::new(text.to_string()).style(
            Style::default()
                .fg(rgb(view.display.announcement_color))
                .add_modifier(Modifier::BOLD),
        );
        header_line(frame, announcement, area, 1);
    }

    if view.display.show_controls {
        let controls =
            Paragraph::new(view.controls_hint).style(Style::default().fg(Color::DarkGray));
        header_line(frame, controls, area, 2);
    }
}

fn header_line(frame: &mut Frame, paragraph: Paragraph, area: Rect, row: u16) {
    if row >= area.height {
        return;
    }
    let line_area = Rect {
        x: area.x,
        y: area.y + row,
        width: area.width,
        height: 1,
    };
    frame.render_widget(paragraph.alignment(Alignment::Center), line_area);
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}
