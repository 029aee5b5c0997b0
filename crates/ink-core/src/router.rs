//! Pointer gesture classification and drag routing.
//!
//! A gesture is classified once, on pointer-down. Until pointer-up or cancel
//! every move event is applied to that same target, recomputed from the
//! absolute pointer position; crossing another marker mid-drag never steals
//! the gesture.

use crate::config::Config;
use crate::layout::{Layout, Target};
use crate::routines::Registry;
use crate::state::AppState;
use glam::DVec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Drag {
    #[default]
    None,
    /// Dragging a cell's `(x, y)` inside the cell.
    Cell { cell: usize },
    /// Dragging a cell's `(q, r)` marker on the kaoss pad.
    Param { cell: usize },
    /// Scrubbing the shared phase.
    Timeline,
}

/// What a pointer-down did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Press {
    Drag(Drag),
    /// Selector click that moved `cell` to routine `index`.
    Select { cell: usize, index: usize },
    /// Selector click on the edit region; the editing cell is now `editing`.
    Edit { editing: Option<usize> },
    Ignored,
}

/// Horizontal timeline fraction in `[-0.5, 0.5]` from a pad-normalized x.
#[inline]
pub fn scrub_fraction(pad_x: f64) -> f64 {
    pad_x / 2.0
}

/// Phase under the scrubber for a pad-normalized x.
#[inline]
pub fn scrub_phase(pad_x: f64) -> f64 {
    0.5 + scrub_fraction(pad_x)
}

/// Whether a pad-normalized y falls in the scrubber strip at the pad's bottom.
#[inline]
pub fn in_timeline_strip(pad_y: f64, strip: f64) -> bool {
    pad_y >= 1.0 - 2.0 * strip
}

#[derive(Clone, Debug, Default)]
pub struct DragRouter {
    drag: Drag,
}

impl DragRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag(&self) -> Drag {
        self.drag
    }

    pub fn is_active(&self) -> bool {
        self.drag != Drag::None
    }

    pub fn is_scrubbing(&self) -> bool {
        self.drag == Drag::Timeline
    }

    /// Cell currently targeted by a cell or param drag.
    pub fn target_cell(&self) -> Option<usize> {
        match self.drag {
            Drag::Cell { cell } | Drag::Param { cell } => Some(cell),
            _ => None,
        }
    }

    /// Classify a new gesture at `css` (CSS pixels relative to the canvas).
    pub fn pointer_down(
        &mut self,
        css: DVec2,
        layout: &Layout,
        registry: &Registry,
        state: &mut AppState,
        config: &Config,
    ) -> Press {
        self.drag = Drag::None;
        let press = match layout.locate(css) {
            Target::Letter { cell, local } => {
                state.cells[cell].set_pointer(local.x, local.y);
                self.drag = Drag::Cell { cell };
                Press::Drag(self.drag)
            }
            Target::Label { cell, frac } => select(registry, state, cell, frac.x),
            Target::Pad { pad } if in_timeline_strip(pad.y, config.timeline_strip) => {
                state.phase.t = scrub_phase(pad.x);
                self.drag = Drag::Timeline;
                Press::Drag(self.drag)
            }
            Target::Pad { pad } => match state.cells.nearest_param(pad.x, pad.y) {
                Some((cell, dist)) if dist <= config.capture_radius => {
                    self.drag = Drag::Param { cell };
                    Press::Drag(self.drag)
                }
                _ => Press::Ignored,
            },
            Target::Ampersand { .. } | Target::Outside => Press::Ignored,
        };
        match press {
            Press::Drag(drag) => log::debug!("[drag] begin {:?}", drag),
            Press::Select { cell, index } => log::debug!("[select] cell {} -> routine {}", cell, index),
            Press::Edit { editing } => log::debug!("[select] editing {:?}", editing),
            Press::Ignored => {}
        }
        press
    }

    /// Apply the active gesture at the current pointer position.
    pub fn pointer_move(&mut self, css: DVec2, layout: &Layout, state: &mut AppState) {
        let dev = layout.to_device(css);
        match self.drag {
            Drag::None => {}
            Drag::Cell { cell } => {
                let local = layout.cell_transform(cell).inverse().transform_point2(dev);
                state.cells[cell].set_pointer(local.x, local.y);
            }
            Drag::Param { cell } => {
                let pad = layout.pad_transform().inverse().transform_point2(dev);
                state.cells[cell].set_params(pad.x, pad.y);
            }
            Drag::Timeline => {
                let pad = layout.pad_transform().inverse().transform_point2(dev);
                state.phase.t = scrub_phase(pad.x);
            }
        }
    }

    /// End the gesture. Safe to call at any time; pointer-cancel routes here too.
    pub fn pointer_up(&mut self) {
        if self.drag != Drag::None {
            log::debug!("[drag] end {:?}", self.drag);
        }
        self.drag = Drag::None;
    }
}

fn select(registry: &Registry, state: &mut AppState, cell: usize, frac_x: f64) -> Press {
    let delta = if frac_x < 1.0 / 3.0 {
        -1
    } else if frac_x < 2.0 / 3.0 {
        1
    } else {
        state.editing = match state.editing {
            Some(c) if c == cell => None,
            _ => Some(cell),
        };
        return Press::Edit {
            editing: state.editing,
        };
    };
    match state.cells.step_routine(registry, cell, delta) {
        Some(index) => Press::Select { cell, index },
        None => Press::Ignored,
    }
}
