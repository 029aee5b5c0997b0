//! Grid geometry and the coordinate transforms shared by rendering and
//! hit-testing.
//!
//! The canvas is a 3 × 4 grid of square slots. Rows 0, 2 and 3 hold the nine
//! letter cells; row 1 holds the ampersand (column 0) and the kaoss pad, which
//! spans columns 1 and 2 plus the gap between them. A gap follows every slot,
//! and the gap under a letter cell is that cell's selector label strip.
//!
//! Every forward transform here maps a local space onto device pixels.
//! [`Layout::locate`] inverts the very same affine maps, so hit-testing can
//! only drift from rendering if these functions change.

use crate::config::Config;
use crate::constants::{AUX_ROW, CELL_COUNT, GRID_COLS, GRID_ROWS};
use crate::math::clamp;
use glam::{DAffine2, DVec2};

/// What a pointer position lands on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target {
    /// Inside a letter cell, in its `-1..1` space.
    Letter { cell: usize, local: DVec2 },
    /// Inside the label strip below a cell, as `0..1` fractions.
    Label { cell: usize, frac: DVec2 },
    /// Inside the kaoss pad, pad-normalized `-1..1`.
    Pad { pad: DVec2 },
    /// The auxiliary slot holding the ampersand.
    Ampersand { local: DVec2 },
    Outside,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Effective device pixel ratio after clamping.
    pub dpr: f64,
    /// Side of one slot in CSS pixels; always even.
    pub css_cell: f64,
    pub padding: f64,
    pub gap: f64,
    /// Side of one slot in device pixels.
    pub pix_w: f64,
    pub pix_hw: f64,
}

impl Layout {
    pub fn new(inner_width: f64, inner_height: f64, device_pixel_ratio: f64, config: &Config) -> Self {
        let dpr = clamp(device_pixel_ratio, 1.0, config.max_dpr.max(1.0));
        let dead_w = dead_width(config.padding, config.gap);
        let dead_h = dead_height(config.padding, config.gap);
        let fit = ((inner_width - dead_w) / GRID_COLS as f64)
            .min((inner_height - dead_h) / GRID_ROWS as f64);
        let mut css_cell = (fit / 2.0).floor() * 2.0;
        if css_cell.is_nan() || css_cell < 2.0 {
            css_cell = 2.0;
        }
        let pix_w = css_cell * dpr;
        Self {
            dpr,
            css_cell,
            padding: config.padding,
            gap: config.gap,
            pix_w,
            pix_hw: pix_w / 2.0,
        }
    }

    pub fn dead_width(&self) -> f64 {
        dead_width(self.padding, self.gap)
    }

    pub fn dead_height(&self) -> f64 {
        dead_height(self.padding, self.gap)
    }

    /// Backing store size in device pixels.
    pub fn backing_size(&self) -> DVec2 {
        DVec2::new(
            self.pix_w * GRID_COLS as f64 + self.dead_width() * self.dpr,
            self.pix_w * GRID_ROWS as f64 + self.dead_height() * self.dpr,
        )
    }

    /// Size the canvas element should occupy in CSS pixels.
    pub fn css_size(&self) -> DVec2 {
        self.backing_size() / self.dpr
    }

    pub fn to_device(&self, css: DVec2) -> DVec2 {
        css * self.dpr
    }

    /// Grid slot `(col, row)` of a letter cell.
    pub fn cell_slot(cell: usize) -> (usize, usize) {
        let col = cell % GRID_COLS;
        let row = match cell / GRID_COLS {
            0 => 0,
            band => band + 1, // skip the auxiliary row
        };
        (col, row)
    }

    pub fn slot_cell(col: usize, row: usize) -> Option<usize> {
        if col >= GRID_COLS || row >= GRID_ROWS || row == AUX_ROW {
            return None;
        }
        let band = if row == 0 { 0 } else { row - 1 };
        let cell = band * GRID_COLS + col;
        (cell < CELL_COUNT).then_some(cell)
    }

    /// Slot `-1..1` space onto device pixels.
    pub fn slot_transform(&self, col: usize, row: usize) -> DAffine2 {
        let slot = DVec2::new(col as f64, row as f64);
        DAffine2::from_translation(slot * self.pix_w)
            * DAffine2::from_translation(DVec2::splat(self.padding * self.dpr))
            * DAffine2::from_translation(slot * self.gap * self.dpr)
            * DAffine2::from_scale(DVec2::splat(self.pix_hw))
            * DAffine2::from_translation(DVec2::ONE)
    }

    pub fn cell_transform(&self, cell: usize) -> DAffine2 {
        let (col, row) = Self::cell_slot(cell);
        self.slot_transform(col, row)
    }

    /// Line width in slot space that strokes `px` device pixels wide.
    pub fn line_width(&self, px: f64) -> f64 {
        px / self.pix_hw
    }

    /// Label strip `0..1 × 0..1` below `cell` onto device pixels.
    pub fn label_transform(&self, cell: usize) -> DAffine2 {
        let bottom_left = self.cell_transform(cell).transform_point2(DVec2::new(-1.0, 1.0));
        DAffine2::from_translation(bottom_left)
            * DAffine2::from_scale(DVec2::new(self.pix_w, self.gap * self.dpr))
    }

    /// Kaoss pad `-1..1` space onto device pixels.
    pub fn pad_transform(&self) -> DAffine2 {
        let top_left = self
            .slot_transform(1, AUX_ROW)
            .transform_point2(DVec2::new(-1.0, -1.0));
        let size = self.pad_size();
        DAffine2::from_translation(top_left)
            * DAffine2::from_scale(size / 2.0)
            * DAffine2::from_translation(DVec2::ONE)
    }

    /// Pad extent in device pixels.
    pub fn pad_size(&self) -> DVec2 {
        DVec2::new(self.pix_w * 2.0 + self.gap * self.dpr, self.pix_w)
    }

    /// Classify a pointer position given in CSS pixels relative to the canvas.
    pub fn locate(&self, css: DVec2) -> Target {
        let dev = self.to_device(css);
        let pitch = self.css_cell + self.gap;
        let slot = ((css - DVec2::splat(self.padding)) / pitch).floor();
        if slot.x < 0.0 || slot.y < 0.0 || !slot.is_finite() {
            return Target::Outside;
        }
        let (col, row) = (slot.x as usize, slot.y as usize);
        if col >= GRID_COLS || row >= GRID_ROWS {
            return Target::Outside;
        }

        if row == AUX_ROW {
            let pad = self.pad_transform().inverse().transform_point2(dev);
            if within_unit(pad) {
                return Target::Pad { pad };
            }
            let local = self.slot_transform(col, row).inverse().transform_point2(dev);
            if col == 0 && within_unit(local) {
                return Target::Ampersand { local };
            }
            return Target::Outside;
        }

        let Some(cell) = Self::slot_cell(col, row) else {
            return Target::Outside;
        };
        let local = self.slot_transform(col, row).inverse().transform_point2(dev);
        if within_unit(local) {
            return Target::Letter { cell, local };
        }
        if local.x.abs() <= 1.0 && local.y > 1.0 {
            let frac = self.label_transform(cell).inverse().transform_point2(dev);
            if (0.0..=1.0).contains(&frac.y) {
                return Target::Label { cell, frac };
            }
        }
        Target::Outside
    }
}

fn dead_width(padding: f64, gap: f64) -> f64 {
    padding * 2.0 + gap * (GRID_COLS - 1) as f64
}

fn dead_height(padding: f64, gap: f64) -> f64 {
    padding * 2.0 + gap * GRID_ROWS as f64
}

#[inline]
fn within_unit(p: DVec2) -> bool {
    p.x.abs() <= 1.0 && p.y.abs() <= 1.0
}
