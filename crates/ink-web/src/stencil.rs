//! Stencil sampler: rasterizes one character on a scratch canvas and keeps the
//! thresholded ink grid per `(char, resolution)`.

use fnv::FnvHashMap;
use ink_core::{Stencil, StencilSampler};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const INK_THRESHOLD: u8 = 128;

pub struct StencilCache {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    cache: FnvHashMap<(char, usize), Rc<Stencil>>,
}

impl StencilCache {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let ctx = crate::dom::context_2d(&canvas)?;
        Ok(Self {
            canvas,
            ctx,
            cache: FnvHashMap::default(),
        })
    }

    fn rasterize(&self, ch: char, n: usize) -> Option<Stencil> {
        let side = n as f64;
        self.canvas.set_width(n as u32);
        self.canvas.set_height(n as u32);
        let ctx = &self.ctx;
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok()?;
        ctx.clear_rect(0.0, 0.0, side, side);
        ctx.set_fill_style_str("#fff");
        ctx.set_font(&format!("{}px sans-serif", side * font_scale(ch)));
        ctx.set_text_align("center");
        ctx.set_text_baseline("alphabetic");
        ctx.fill_text(&ch.to_string(), side / 2.0, side).ok()?;

        let data = ctx.get_image_data(0.0, 0.0, side, side).ok()?.data();
        let px: &[[u8; 4]] = bytemuck::try_cast_slice(&data.0).ok()?;
        let ink = px.iter().map(|p| p[0] >= INK_THRESHOLD).collect();
        Some(Stencil::new(n, ink))
    }
}

/// Capitals are drawn larger so they fill the square.
fn font_scale(ch: char) -> f64 {
    if ch.is_uppercase() {
        1.3
    } else {
        1.0
    }
}

impl StencilSampler for StencilCache {
    fn sample(&mut self, ch: char, resolution: usize) -> Rc<Stencil> {
        let key = (ch, resolution.max(1));
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }
        let stencil = match self.rasterize(key.0, key.1) {
            Some(s) => s,
            None => {
                log::warn!("[stencil] could not rasterize {:?} at {}", ch, key.1);
                Stencil::blank(key.1)
            }
        };
        log::trace!("[stencil] cached {:?} at {}", ch, key.1);
        let stencil = Rc::new(stencil);
        self.cache.insert(key, stencil.clone());
        stencil
    }
}
