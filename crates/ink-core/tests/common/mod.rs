// Test doubles shared by the integration tests.
#![allow(dead_code)]

use glam::{DAffine2, DVec2};
use ink_core::{Canvas, Config, Controller, GlyphSet, Layout, Registry, Stencil, StencilSampler};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Transform(DAffine2),
    LineWidth(f64),
    Stroke(String),
    FillColor(String),
    Clear(f64, f64),
    BeginPath,
    Move(f64, f64),
    Line(f64, f64),
    Rect(f64, f64, f64, f64),
    Arc(f64, f64, f64, f64, f64, bool),
    StrokePath,
    FillPath,
}

/// Canvas that records every call.
#[derive(Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path construction calls only.
    pub fn path_ops(&self) -> Vec<Op> {
        self.ops
            .iter()
            .filter(|op| {
                matches!(
                    op,
                    Op::Move(..) | Op::Line(..) | Op::Rect(..) | Op::Arc(..)
                )
            })
            .cloned()
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Every coordinate passed to a path call.
    pub fn points(&self) -> Vec<DVec2> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                Op::Move(x, y) | Op::Line(x, y) => Some(DVec2::new(x, y)),
                Op::Rect(x, y, ..) | Op::Arc(x, y, ..) => Some(DVec2::new(x, y)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for Recorder {
    fn set_transform(&mut self, m: DAffine2) {
        self.ops.push(Op::Transform(m));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }
    fn set_stroke_color(&mut self, css: &str) {
        self.ops.push(Op::Stroke(css.to_string()));
    }
    fn set_fill_color(&mut self, css: &str) {
        self.ops.push(Op::FillColor(css.to_string()));
    }
    fn clear(&mut self, width: f64, height: f64) {
        self.ops.push(Op::Clear(width, height));
    }
    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::Move(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::Line(x, y));
    }
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::Rect(x, y, w, h));
    }
    fn arc(&mut self, x: f64, y: f64, r: f64, start: f64, end: f64, ccw: bool) {
        self.ops.push(Op::Arc(x, y, r, start, end, ccw));
    }
    fn stroke(&mut self) {
        self.ops.push(Op::StrokePath);
    }
    fn fill(&mut self) {
        self.ops.push(Op::FillPath);
    }
}

/// Stencil with ink on a diagonal band, plus a log of requests.
#[derive(Default)]
pub struct FakeStencil {
    pub requests: Vec<(char, usize)>,
}

impl StencilSampler for FakeStencil {
    fn sample(&mut self, ch: char, resolution: usize) -> Rc<Stencil> {
        self.requests.push((ch, resolution));
        let ink = (0..resolution * resolution)
            .map(|i| {
                let (col, row) = (i % resolution, i / resolution);
                col.abs_diff(row) <= 1
            })
            .collect();
        Rc::new(Stencil::new(resolution, ink))
    }
}

pub fn glyphs() -> GlyphSet {
    GlyphSet::bundled().expect("bundled glyphs parse")
}

pub const WIDTH: f64 = 1280.0;
pub const HEIGHT: f64 = 1024.0;

pub fn controller_with(config: Config, registry: Registry, dpr: f64) -> Controller {
    let layout = Layout::new(WIDTH, HEIGHT, dpr, &config);
    Controller::new(config, registry, glyphs(), layout)
}

pub fn controller() -> Controller {
    controller_with(Config::default(), Registry::default(), 2.0)
}

/// CSS position of a pad-normalized point.
pub fn pad_css(layout: &Layout, pad: DVec2) -> DVec2 {
    layout.pad_transform().transform_point2(pad) / layout.dpr
}

/// CSS position of a point in `cell`'s `-1..1` space.
pub fn cell_css(layout: &Layout, cell: usize, local: DVec2) -> DVec2 {
    layout.cell_transform(cell).transform_point2(local) / layout.dpr
}

/// CSS position of a point in `cell`'s label strip.
pub fn label_css(layout: &Layout, cell: usize, frac: DVec2) -> DVec2 {
    layout.label_transform(cell).transform_point2(frac) / layout.dpr
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
