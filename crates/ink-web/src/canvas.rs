use glam::DAffine2;
use ink_core::constants::BACKDROP;
use ink_core::Canvas;
use web_sys as web;

/// [`Canvas`] backed by a browser 2D context.
pub struct Canvas2d {
    ctx: web::CanvasRenderingContext2d,
}

impl Canvas2d {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Self { ctx }
    }
}

impl Canvas for Canvas2d {
    fn set_transform(&mut self, m: DAffine2) {
        let x = m.matrix2.x_axis;
        let y = m.matrix2.y_axis;
        let _ = self
            .ctx
            .set_transform(x.x, x.y, y.x, y.y, m.translation.x, m.translation.y);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_stroke_color(&mut self, css: &str) {
        self.ctx.set_stroke_style_str(css);
    }

    fn set_fill_color(&mut self, css: &str) {
        self.ctx.set_fill_style_str(css);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        self.ctx.set_fill_style_str(BACKDROP);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.rect(x, y, w, h);
    }

    fn arc(&mut self, x: f64, y: f64, r: f64, start: f64, end: f64, ccw: bool) {
        // negative radii throw
        let r = if r.is_finite() { r.abs() } else { 0.0 };
        let _ = self.ctx.arc_with_anticlockwise(x, y, r, start, end, ccw);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }
}
