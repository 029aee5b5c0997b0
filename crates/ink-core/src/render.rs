//! Drawing one frame: the nine letter cells and the fixed decorations around
//! them (ampersand, kaoss pad, selector labels, clock wave).
//!
//! Routines run inside [`guarded`]. Their panics are caught and kept off the
//! process panic hook; the message is logged once when a cell starts failing.

use crate::config::Config;
use crate::constants::*;
use crate::glyphs::GlyphSet;
use crate::layout::Layout;
use crate::math::*;
use crate::routines::Registry;
use crate::state::{AppState, CellState};
use crate::surface::{Canvas, StencilSampler, Surface};
use glam::{DAffine2, DVec2};
use instant::Instant;
use smallvec::SmallVec;
use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

// Marker half-diagonal range and letter height, device pixels per unit dpr.
const MARKER_PX: f64 = 20.0;
const MARKER_LETTER_PX: f64 = 9.0;

/// Everything a frame draws with, borrowed for the duration of the frame.
pub struct Frame<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub stencils: &'a mut dyn StencilSampler,
    pub glyphs: &'a GlyphSet,
    pub layout: &'a Layout,
    pub config: &'a Config,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// False when the frame was skipped because the host is hidden.
    pub rendered: bool,
    /// Cells whose rolling draw cost is over budget.
    pub over_budget: SmallVec<[usize; CELL_COUNT]>,
    /// Cells whose routine failed this frame.
    pub faulted: SmallVec<[usize; CELL_COUNT]>,
}

impl Frame<'_> {
    fn surface(&mut self) -> Surface<'_> {
        Surface::new(&mut *self.canvas, self.glyphs, &mut *self.stencils)
    }

    pub fn clear(&mut self) {
        let size = self.layout.backing_size();
        self.canvas.set_transform(DAffine2::IDENTITY);
        self.canvas.clear(size.x, size.y);
    }

    /// Draw every cell with its selected routine, recording per-cell cost.
    pub fn draw_cells(
        &mut self,
        registry: &Registry,
        state: &mut AppState,
        report: &mut FrameReport,
    ) {
        let t = state.phase.t;
        for (i, cell) in state.cells.iter_mut().enumerate() {
            let start = Instant::now();
            let outcome = self.draw_cell(registry, i, cell, t);
            let cost = cell.cost.add(start.elapsed().as_secs_f64() * 1000.0);

            match &outcome {
                Err(reason) => {
                    report.faulted.push(i);
                    if !cell.faulted {
                        log::warn!(
                            "[frame] routine {} on cell {} failed: {}",
                            cell.routine_index,
                            i,
                            reason
                        );
                    }
                }
                Ok(()) if cell.faulted => log::info!("[frame] cell {} recovered", i),
                Ok(()) => {}
            }
            cell.faulted = outcome.is_err();

            if cost > self.config.cost_budget_ms {
                report.over_budget.push(i);
                self.draw_cost(i, cost);
            }
        }
    }

    fn draw_cell(
        &mut self,
        registry: &Registry,
        i: usize,
        cell: &CellState,
        t: f64,
    ) -> std::result::Result<(), String> {
        let Some(routine) = registry.get(i, cell.routine_index) else {
            return Err(format!("no routine at index {}", cell.routine_index));
        };
        self.canvas.set_transform(self.layout.cell_transform(i));
        self.canvas.set_line_width(self.layout.line_width(self.config.stroke_px));
        self.canvas.set_stroke_color(INK);
        self.canvas.begin_path();
        let (q, r, x, y) = (cell.q, cell.r, cell.x, cell.y);
        let outcome = {
            let mut surface = self.surface();
            guarded(|| (routine.draw)(&mut surface, q, r, t, x, y))
        };
        self.canvas.stroke();

        // (x, y) handle
        self.canvas.set_fill_color(INK);
        self.canvas.begin_path();
        self.surface().circle(x, y, 0.03);
        self.canvas.fill();

        outcome
    }

    /// Cost shaming: the rounded average in the cell's top-right corner.
    fn draw_cost(&mut self, i: usize, cost: f64) {
        const SIZE: f64 = 0.16;
        const ADVANCE: f64 = 0.12;
        let label = format!("{:.0}", cost);
        let x = 0.98 - ADVANCE * label.len() as f64;
        self.canvas.set_transform(self.layout.cell_transform(i));
        self.canvas.set_line_width(self.layout.line_width(DECOR_STROKE_PX));
        self.canvas.set_stroke_color(WARN);
        self.canvas.begin_path();
        self.surface().text(&label, x, -0.98, SIZE, ADVANCE);
        self.canvas.stroke();
    }

    pub fn draw_ampersand(&mut self) {
        self.canvas.set_transform(self.layout.slot_transform(0, AUX_ROW));
        self.canvas.set_line_width(self.layout.line_width(DECOR_STROKE_PX));
        self.canvas.set_stroke_color(INK);
        self.canvas.begin_path();
        self.surface().text("&", -0.6, -0.8, 1.6, 0.0);
        self.canvas.stroke();
    }

    /// Pad outline, quarter grid, scrubber divider and one marker per cell.
    pub fn draw_pad(&mut self, state: &AppState, focus: Option<usize>) {
        let pad = self.layout.pad_transform();
        let dpr = self.layout.dpr;
        self.canvas.set_transform(DAffine2::IDENTITY);
        self.canvas.set_stroke_color(INK);
        self.canvas.set_fill_color(INK);

        self.canvas.set_line_width(DECOR_STROKE_PX * dpr);
        self.canvas.begin_path();
        let tl = pad.transform_point2(DVec2::new(-1.0, -1.0));
        let size = self.layout.pad_size();
        self.canvas.rect(tl.x, tl.y, size.x, size.y);
        self.canvas.stroke();

        self.canvas.set_line_width(0.5 * dpr);
        self.canvas.begin_path();
        for k in [-0.5, 0.0, 0.5] {
            self.segment(pad, DVec2::new(k, -1.0), DVec2::new(k, 1.0));
            self.segment(pad, DVec2::new(-1.0, k), DVec2::new(1.0, k));
        }
        let divider = 1.0 - 2.0 * self.config.timeline_strip;
        self.segment(pad, DVec2::new(-1.0, divider), DVec2::new(1.0, divider));
        self.canvas.stroke();

        let p = MARKER_PX * dpr;
        let letter = MARKER_LETTER_PX * dpr;
        let mut letters = CELL_LETTERS.chars();
        for (i, cell) in state.cells.iter().enumerate() {
            let c = pad.transform_point2(DVec2::new(cell.q, cell.r));
            let top = c.y - declip(cell.r, p / 2.0, p);
            let right = c.x + declip(cell.q, p / 2.0, p);
            let bottom = c.y + declip(cell.y, p / 2.0, p);
            let left = c.x - declip(cell.x, p / 2.0, p);
            self.canvas.begin_path();
            self.canvas.move_to(c.x, top);
            self.canvas.line_to(right, c.y);
            self.canvas.line_to(c.x, bottom);
            self.canvas.line_to(left, c.y);
            self.canvas.line_to(c.x, top);
            self.canvas.set_line_width(DECOR_STROKE_PX * dpr);
            let focused = focus == Some(i);
            if focused {
                self.canvas.fill();
            } else {
                self.canvas.stroke();
            }

            let Some(ch) = letters.next() else {
                continue;
            };
            let center = DVec2::new((left + right) / 2.0, (top + bottom) / 2.0);
            self.canvas.set_stroke_color(if focused { BACKDROP } else { INK });
            self.canvas.set_line_width(dpr);
            self.canvas.begin_path();
            let mut buf = [0u8; 4];
            self.surface().text(
                ch.encode_utf8(&mut buf),
                center.x - letter * 0.375,
                center.y - letter * 0.5,
                letter,
                0.0,
            );
            self.canvas.stroke();
            self.canvas.set_stroke_color(INK);
        }
    }

    /// `<` and `>` carets plus the routine name under every cell.
    pub fn draw_labels(&mut self, registry: &Registry, state: &AppState) {
        let layout = *self.layout;
        let size = layout.gap * layout.dpr * 0.6;
        let advance = size * 0.8;
        let third = layout.pix_w / 3.0;
        let top = (layout.gap * layout.dpr - size) / 2.0;
        self.canvas.set_stroke_color(INK);
        self.canvas.set_line_width(DECOR_STROKE_PX * layout.dpr);
        for (i, cell) in state.cells.iter().enumerate() {
            let origin = layout.label_transform(i).transform_point2(DVec2::ZERO);
            self.canvas.set_transform(DAffine2::from_translation(origin));
            self.canvas.begin_path();
            let caret = (third - advance) / 2.0;
            self.surface().text("<", caret, top, size, advance);
            self.surface().text(">", third + caret, top, size, advance);

            let name = registry
                .get(i, cell.routine_index)
                .map(|r| r.name)
                .unwrap_or("?");
            let fits = ((third / advance).floor() as usize).max(1);
            let label: String = name.chars().take(fits).collect();
            self.surface().text(&label, third * 2.0, top, size, advance);
            if state.editing == Some(i) {
                self.canvas.move_to(third * 2.0, top + size);
                self.canvas.line_to(layout.pix_w, top + size);
            }
            self.canvas.stroke();
        }
    }

    /// Traveling pulse along the scrubber: a sine whose stroke thickens near
    /// the current phase.
    pub fn draw_clock(&mut self, t: f64) {
        let pad = self.layout.pad_transform();
        let dpr = self.layout.dpr;
        let strip = self.config.timeline_strip;
        let mid = 1.0 - strip;
        let amp = strip * 0.6;
        let now = wrap(t);
        self.canvas.set_transform(DAffine2::IDENTITY);
        self.canvas.set_stroke_color(INK);

        let at = |f: f64| DVec2::new(denorm1(f), mid + (f * TAU * 6.0).sin() * amp);
        for i in 0..WAVE_SAMPLES {
            let f0 = i as f64 / WAVE_SAMPLES as f64;
            let f1 = (i + 1) as f64 / WAVE_SAMPLES as f64;
            let d = phase_distance(lerp(f0, f1, 0.5), now);
            let pulse = (1.0 - d / WAVE_SPREAD).max(0.0).powi(2);
            self.canvas.set_line_width((WAVE_BASE_PX + WAVE_PEAK_PX * pulse) * dpr);
            self.canvas.begin_path();
            self.segment(pad, at(f0), at(f1));
            self.canvas.stroke();
        }

        // playhead
        self.canvas.set_line_width(DECOR_STROKE_PX * dpr);
        self.canvas.begin_path();
        let x = denorm1(now);
        self.segment(pad, DVec2::new(x, 1.0 - 2.0 * strip), DVec2::new(x, 1.0));
        self.canvas.stroke();
    }

    fn segment(&mut self, m: DAffine2, a: DVec2, b: DVec2) {
        let a = m.transform_point2(a);
        let b = m.transform_point2(b);
        self.canvas.move_to(a.x, a.y);
        self.canvas.line_to(b.x, b.y);
    }
}

thread_local! {
    static QUIET: Cell<bool> = const { Cell::new(false) };
}

/// Run `f`, catching a panic without reporting it through the panic hook.
/// Other panics on this thread, and every panic on other threads, still
/// reach the previously installed hook.
fn guarded(f: impl FnOnce()) -> std::result::Result<(), String> {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !QUIET.with(Cell::get) {
                previous(info);
            }
        }));
    });

    QUIET.with(|q| q.set(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    QUIET.with(|q| q.set(false));
    outcome.map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
