//! True-color terminal backend
//!
//! Each character cell shows two vertically stacked canvas pixels using the
//! upper half block glyph: foreground is the top pixel, background the bottom.

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor,
};
use glam::Vec2;

use super::{Canvas, Color, Renderer};
use crate::error::RenderError;

const HALF_BLOCK: char = '\u{2580}';

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Renders into an off-screen canvas and writes it out on `present`
pub struct TerminalRenderer<W: Write> {
    out: W,
    canvas: Canvas,
    columns: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer filling `columns` x `rows` character cells
    pub fn new(out: W, columns: u16, rows: u16, arena: Vec2) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            out,
            canvas: Canvas::new(usize::from(columns), usize::from(rows) * 2, arena),
            columns,
            rows,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Give back the output handle
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self) -> std::io::Result<()> {
        let mut current: Option<(Color, Color)> = None;

        for row in 0..self.rows {
            queue!(self.out, MoveTo(0, row))?;
            let top_y = usize::from(row) * 2;
            for col in 0..usize::from(self.columns) {
                let top = self.canvas.pixel(col, top_y).unwrap_or(Color::BLACK);
                let bottom = self.canvas.pixel(col, top_y + 1).unwrap_or(Color::BLACK);

                // Only emit color changes
                if current != Some((top, bottom)) {
                    queue!(
                        self.out,
                        SetForegroundColor(term_color(top)),
                        SetBackgroundColor(term_color(bottom))
                    )?;
                    current = Some((top, bottom));
                }
                queue!(self.out, Print(HALF_BLOCK))?;
            }
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) -> Result<(), RenderError> {
        self.canvas.clear()
    }

    fn set_color(&mut self, color: Color) -> Result<(), RenderError> {
        self.canvas.set_color(color)
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<(), RenderError> {
        self.canvas.fill_rect(x, y, w, h)
    }

    fn fill_circle(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
    ) -> Result<(), RenderError> {
        self.canvas.fill_circle(cx, cy, radius, color)
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.write_frame()?;
        self.canvas.present()
    }
}
