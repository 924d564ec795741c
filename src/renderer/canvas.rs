//! Off-screen raster target
//!
//! Maps arena coordinates onto a fixed pixel grid. A pixel is covered by a
//! shape when its center lies inside the shape.

use glam::Vec2;

use super::{Color, Renderer};
use crate::error::RenderError;

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    /// Pixels per arena unit on each axis
    scale: Vec2,
    draw_color: Color,
    pixels: Vec<Color>,
    frames_presented: u64,
}

impl Canvas {
    /// A `width` x `height` pixel grid showing an arena of size `arena`
    pub fn new(width: usize, height: usize, arena: Vec2) -> Self {
        Self {
            width,
            height,
            scale: Vec2::new(width as f32 / arena.x, height as f32 / arena.y),
            draw_color: Color::BLACK,
            pixels: vec![Color::BLACK; width * height],
            frames_presented: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Count pixels of a given color
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Half-open pixel index range whose centers fall in `[lo, hi)` (pixel units)
    fn covered(lo: f32, hi: f32, limit: usize) -> std::ops::Range<usize> {
        let start = (lo - 0.5).ceil().clamp(0.0, limit as f32) as usize;
        let end = (hi - 0.5).ceil().clamp(0.0, limit as f32) as usize;
        start..end.max(start)
    }

    fn put(&mut self, x: usize, y: usize, color: Color) {
        self.pixels[y * self.width + x] = color;
    }
}

impl Renderer for Canvas {
    fn clear(&mut self) -> Result<(), RenderError> {
        let color = self.draw_color;
        self.pixels.fill(color);
        Ok(())
    }

    fn set_color(&mut self, color: Color) -> Result<(), RenderError> {
        self.draw_color = color;
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<(), RenderError> {
        let finite = x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite();
        if !finite || w < 0.0 || h < 0.0 {
            return Err(RenderError::InvalidGeometry("rectangle"));
        }

        let cols = Self::covered(x * self.scale.x, (x + w) * self.scale.x, self.width);
        let rows = Self::covered(y * self.scale.y, (y + h) * self.scale.y, self.height);
        let color = self.draw_color;
        for py in rows {
            for px in cols.clone() {
                self.put(px, py, color);
            }
        }
        Ok(())
    }

    fn fill_circle(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
    ) -> Result<(), RenderError> {
        if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) || radius < 0.0 {
            return Err(RenderError::InvalidGeometry("circle"));
        }

        let center = Vec2::new(cx, cy);
        let cols = Self::covered(
            (cx - radius) * self.scale.x,
            (cx + radius) * self.scale.x,
            self.width,
        );
        let rows = Self::covered(
            (cy - radius) * self.scale.y,
            (cy + radius) * self.scale.y,
            self.height,
        );
        for py in rows {
            for px in cols.clone() {
                let sample = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) / self.scale;
                if sample.distance_squared(center) <= radius * radius {
                    self.put(px, py, color);
                }
            }
        }

        // Small circles on coarse grids can miss every pixel center
        let px = (cx * self.scale.x).floor();
        let py = (cy * self.scale.y).floor();
        if px >= 0.0 && py >= 0.0 && (px as usize) < self.width && (py as usize) < self.height {
            self.put(px as usize, py as usize, color);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.frames_presented += 1;
        Ok(())
    }
}
