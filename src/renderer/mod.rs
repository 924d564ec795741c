//! Rendering
//!
//! The game only talks to a `Renderer`: set a color, fill rectangles and
//! circles, present. `Canvas` rasterizes off-screen, `TerminalRenderer`
//! puts a canvas on a true-color terminal.

pub mod canvas;
pub mod terminal;

pub use canvas::Canvas;
pub use terminal::TerminalRenderer;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::sim::GameState;

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
}

/// Brick colors, cycled by row
pub const BRICK_PALETTE: [Color; 5] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::ORANGE,
];

/// Brick color for a grid row
#[inline]
pub fn palette_color(row: usize) -> Color {
    BRICK_PALETTE[row % BRICK_PALETTE.len()]
}

/// Drawing primitives the game needs. Coordinates are arena pixels.
pub trait Renderer {
    /// Fill the whole frame with the current draw color
    fn clear(&mut self) -> Result<(), RenderError>;
    fn set_color(&mut self, color: Color) -> Result<(), RenderError>;
    /// Fill a rectangle with the current draw color
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<(), RenderError>;
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color)
    -> Result<(), RenderError>;
    /// Show the finished frame
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Draw one frame of the game.
///
/// A failing primitive is logged and skipped; the rest of the frame is still
/// drawn. Returns how many primitives failed.
pub fn draw_frame<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState) -> usize {
    let mut failures = 0;
    let mut check = |result: Result<(), RenderError>, what: &str| {
        if let Err(e) = result {
            log::warn!("Render error ({}): {}", what, e);
            failures += 1;
        }
    };

    check(renderer.set_color(Color::BLACK), "set color");
    check(renderer.clear(), "clear");

    let paddle = &state.paddle;
    check(renderer.set_color(Color::WHITE), "set color");
    check(
        renderer.fill_rect(paddle.pos.x, paddle.pos.y, paddle.size.x, paddle.size.y),
        "paddle",
    );

    let ball = &state.ball;
    check(
        renderer.fill_circle(ball.pos.x, ball.pos.y, ball.radius, Color::WHITE),
        "ball",
    );

    for (index, brick) in state.bricks.visible() {
        check(
            renderer.set_color(palette_color(state.bricks.row_of(index))),
            "set color",
        );
        check(
            renderer.fill_rect(brick.pos.x, brick.pos.y, brick.size.x, brick.size.y),
            "brick",
        );
    }

    check(renderer.present(), "present");

    failures
}
