//! Immediate-mode drawing surface handed to letterform routines.
//!
//! Routines never touch the raster backend directly. They describe shapes in
//! the cell's `-1..1` space through [`Surface`], which owns the "pending move"
//! flag so that a `line` after `begin` or after a closed shape starts a fresh
//! subpath instead of drawing a connector back to the last point.

use crate::constants::GLYPH_UNITS;
use crate::glyphs::GlyphSet;
use crate::math::TAU;
use glam::DAffine2;
use std::rc::Rc;

/// Raster backend contract. Angles are radians here; the turn-fraction
/// convention lives in [`Surface`].
pub trait Canvas {
    fn set_transform(&mut self, m: DAffine2);
    fn set_line_width(&mut self, width: f64);
    fn set_stroke_color(&mut self, css: &str);
    fn set_fill_color(&mut self, css: &str);
    /// Clear the whole backing store (device pixels, identity transform).
    fn clear(&mut self, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn arc(&mut self, x: f64, y: f64, r: f64, start: f64, end: f64, ccw: bool);
    fn stroke(&mut self);
    fn fill(&mut self);
}

/// Square ink-presence grid for one rasterized character, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Stencil {
    size: usize,
    ink: Vec<bool>,
}

impl Stencil {
    /// `ink` shorter than `size * size` is padded with blanks.
    pub fn new(size: usize, mut ink: Vec<bool>) -> Self {
        ink.resize(size * size, false);
        Self { size, ink }
    }

    pub fn blank(size: usize) -> Self {
        Self::new(size, Vec::new())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, col: usize, row: usize) -> bool {
        col < self.size && row < self.size && self.ink[row * self.size + col]
    }

    /// `(col, row)` of every inked pixel, row-major.
    pub fn inked(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.ink
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(i, _)| (i % size, i / size))
    }
}

/// Collaborator that rasterizes a character at `resolution × resolution`.
pub trait StencilSampler {
    fn sample(&mut self, ch: char, resolution: usize) -> Rc<Stencil>;
}

pub struct Surface<'a> {
    canvas: &'a mut dyn Canvas,
    glyphs: &'a GlyphSet,
    stencils: &'a mut dyn StencilSampler,
    pending_move: bool,
}

impl<'a> Surface<'a> {
    pub fn new(
        canvas: &'a mut dyn Canvas,
        glyphs: &'a GlyphSet,
        stencils: &'a mut dyn StencilSampler,
    ) -> Self {
        Self {
            canvas,
            glyphs,
            stencils,
            pending_move: true,
        }
    }

    /// Forget the current point; the next `line` moves instead of drawing.
    pub fn begin(&mut self) {
        self.pending_move = true;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.canvas.move_to(x, y);
        self.pending_move = false;
    }

    pub fn line(&mut self, x: f64, y: f64) {
        if self.pending_move {
            self.canvas.move_to(x, y);
        } else {
            self.canvas.line_to(x, y);
        }
        self.pending_move = false;
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.canvas.rect(x, y, w, h);
        self.pending_move = true;
    }

    pub fn circle(&mut self, x: f64, y: f64, r: f64) {
        self.arc(x, y, r, 0.0, 1.0, false);
    }

    /// `start` and `end` are fractions of a turn (`0..1 == 0..2π`).
    pub fn arc(&mut self, x: f64, y: f64, r: f64, start: f64, end: f64, ccw: bool) {
        let a0 = start * TAU;
        let a1 = end * TAU;
        self.canvas.move_to(x + r * a0.cos(), y + r * a0.sin());
        self.canvas.arc(x, y, r, a0, a1, ccw);
        self.pending_move = true;
    }

    /// Lay out `s` from the vector glyph set with its top-left at `(x, y)`.
    /// Each character is `size` tall and advances by `advance`; `\n` starts a
    /// new line `size` lower.
    pub fn text(&mut self, s: &str, x: f64, y: f64, size: f64, advance: f64) {
        let scale = size / GLYPH_UNITS;
        let glyphs = self.glyphs;
        let mut cx = x;
        let mut cy = y;
        for ch in s.chars() {
            if ch == '\n' {
                cx = x;
                cy += size;
                continue;
            }
            let glyph = glyphs.get_or_placeholder(ch);
            for path in glyph.paths() {
                self.begin();
                for p in path {
                    self.line(cx + p.x as f64 * scale, cy + p.y as f64 * scale);
                }
            }
            cx += advance;
        }
        self.pending_move = true;
    }

    /// Ink grid for `ch` at `resolution`, from the stencil collaborator.
    pub fn stencil(&mut self, ch: char, resolution: usize) -> Rc<Stencil> {
        self.stencils.sample(ch, resolution.max(1))
    }
}
