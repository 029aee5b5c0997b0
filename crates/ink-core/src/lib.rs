//! Parametric letterform engine.
//!
//! Nine cells each draw a letter with a small routine driven by `(q, r, x, y)`
//! and a shared phase `t`. A kaoss pad sets `(q, r)`, dragging inside a cell
//! sets `(x, y)`, and a strip at the bottom of the pad scrubs `t`. This crate
//! is platform-free; a frontend supplies a [`Canvas`] and a [`StencilSampler`].

pub mod app;
pub mod averager;
pub mod config;
pub mod constants;
pub mod error;
pub mod glyphs;
pub mod layout;
pub mod letterforms;
pub mod math;
pub mod render;
pub mod router;
pub mod routines;
pub mod state;
pub mod surface;

pub use app::Controller;
pub use averager::Averager;
pub use config::Config;
pub use error::{InkError, Result};
pub use glyphs::{Glyph, GlyphSet};
pub use layout::{Layout, Target};
pub use render::FrameReport;
pub use router::{Drag, DragRouter, Press};
pub use routines::{DrawFn, Registry, Routine};
pub use state::{AppState, CellState, Cells, Phase};
pub use surface::{Canvas, Stencil, StencilSampler, Surface};
