//! The controller: sole owner of the engine's mutable state.
//!
//! A host creates one [`Controller`] at startup, forwards pointer and resize
//! events to it, and calls [`Controller::frame`] once per display refresh.
//! Event handlers and frames never interleave, so nothing here locks.

use crate::config::Config;
use crate::glyphs::GlyphSet;
use crate::layout::Layout;
use crate::render::{Frame, FrameReport};
use crate::router::{Drag, DragRouter, Press};
use crate::routines::Registry;
use crate::state::AppState;
use crate::surface::{Canvas, StencilSampler};
use glam::DVec2;

pub struct Controller {
    config: Config,
    registry: Registry,
    glyphs: GlyphSet,
    layout: Layout,
    state: AppState,
    router: DragRouter,
}

impl Controller {
    pub fn new(config: Config, registry: Registry, glyphs: GlyphSet, layout: Layout) -> Self {
        let state = AppState::new(&registry, config.cycle_secs, config.cost_samples);
        log::info!(
            "[layout] cell={}css dpr={} backing={}x{}",
            layout.css_cell,
            layout.dpr,
            layout.backing_size().x,
            layout.backing_size().y
        );
        Self {
            config,
            registry,
            glyphs,
            layout,
            state,
            router: DragRouter::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn drag(&self) -> Drag {
        self.router.drag()
    }

    pub fn is_dragging(&self) -> bool {
        self.router.is_active()
    }

    /// Recompute grid geometry from the window's inner size and pixel ratio.
    pub fn resize(&mut self, inner_width: f64, inner_height: f64, device_pixel_ratio: f64) -> Layout {
        let layout = Layout::new(inner_width, inner_height, device_pixel_ratio, &self.config);
        if layout != self.layout {
            log::debug!(
                "[layout] cell={}css dpr={} backing={}x{}",
                layout.css_cell,
                layout.dpr,
                layout.backing_size().x,
                layout.backing_size().y
            );
        }
        self.layout = layout;
        layout
    }

    pub fn pointer_down(&mut self, css: DVec2) -> Press {
        self.router.pointer_down(
            css,
            &self.layout,
            &self.registry,
            &mut self.state,
            &self.config,
        )
    }

    pub fn pointer_move(&mut self, css: DVec2) {
        self.router.pointer_move(css, &self.layout, &mut self.state);
    }

    pub fn pointer_up(&mut self) {
        self.router.pointer_up();
    }

    pub fn pointer_cancel(&mut self) {
        self.router.pointer_up();
    }

    /// Render one frame. Skipped entirely while the host is hidden; the
    /// phase only advances with the clock when no scrub is in progress.
    pub fn frame(
        &mut self,
        canvas: &mut dyn Canvas,
        stencils: &mut dyn StencilSampler,
        dt_secs: f64,
        visible: bool,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        if !visible {
            return report;
        }
        if !self.router.is_scrubbing() {
            self.state.phase.advance(dt_secs);
        }

        let focus = self.router.target_cell().or(self.state.editing);
        let mut frame = Frame {
            canvas,
            stencils,
            glyphs: &self.glyphs,
            layout: &self.layout,
            config: &self.config,
        };
        frame.clear();
        frame.draw_cells(&self.registry, &mut self.state, &mut report);
        frame.draw_ampersand();
        frame.draw_pad(&self.state, focus);
        frame.draw_labels(&self.registry, &self.state);
        frame.draw_clock(self.state.phase.t);
        report.rendered = true;
        report
    }
}
