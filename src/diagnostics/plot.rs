//! Debug rendering hooks.
//!
//! The hull tracer, quadrilateral builder and annealer report what they are
//! doing through [`DebugPlot`]. Pass [`NoopPlot`] when no rendering is wanted;
//! results are identical either way.

use crate::image::BitGrid;
use crate::types::Vertex;
use image::{Rgb, RgbImage};

pub type Color = [u8; 3];

pub const GREEN: Color = [0, 255, 0];
pub const RED: Color = [255, 0, 0];
pub const YELLOW: Color = [255, 255, 0];

/// Receiver for diagnostic drawing calls.
pub trait DebugPlot {
    /// Mark a single point, drawn enlarged so it stays visible.
    fn plot_point(&mut self, p: Vertex, color: Color);

    fn plot_line(&mut self, from: Vertex, to: Vertex, color: Color);
}

/// Absent plotting collaborator.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPlot;

impl DebugPlot for NoopPlot {
    #[inline]
    fn plot_point(&mut self, _p: Vertex, _color: Color) {}

    #[inline]
    fn plot_line(&mut self, _from: Vertex, _to: Vertex, _color: Color) {}
}

/// Plots onto an RGB canvas seeded with a dimmed copy of the mask.
pub struct RgbPlot {
    canvas: RgbImage,
}

impl RgbPlot {
    pub fn from_mask(mask: &BitGrid) -> Self {
        let mut canvas = RgbImage::new(mask.width() as u32, mask.height() as u32);
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                let v = if mask.get(x, y) { 96u8 } else { 0u8 };
                canvas.put_pixel(x as u32, y as u32, Rgb([v, v, v]));
            }
        }
        Self { canvas }
    }

    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    pub fn into_canvas(self) -> RgbImage {
        self.canvas
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.canvas.width() as i64 || y >= self.canvas.height() as i64 {
            return;
        }
        self.canvas.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

impl DebugPlot for RgbPlot {
    fn plot_point(&mut self, p: Vertex, color: Color) {
        let (cx, cy) = (p.x.round() as i64, p.y.round() as i64);
        for dy in -1..=1 {
            for dx in -1..=1 {
                self.put(cx + dx, cy + dy, color);
            }
        }
    }

    fn plot_line(&mut self, from: Vertex, to: Vertex, color: Color) {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        if !steps.is_finite() {
            return;
        }
        let n = steps as i64;
        for i in 0..=n {
            let t = i as f64 / steps;
            let x = (from.x + dx * t).round() as i64;
            let y = (from.y + dy * t).round() as i64;
            self.put(x, y, color);
        }
    }
}
