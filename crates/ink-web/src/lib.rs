#![cfg(target_arch = "wasm32")]
//! Browser front-end: draws the letterform grid on a Canvas2D context.

mod canvas;
mod dom;
mod events;
mod frame;
mod input;
mod settings;
mod stencil;

use ink_core::{Controller, GlyphSet, Layout, Registry};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // narrowed once the canvas attributes are read
    console_log::init_with_level(log::Level::Trace).ok();
    log::set_max_level(log::LevelFilter::Info);
    log::info!("ink-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::canvas_by_id(&document, settings::CANVAS_ID)?;
    let settings = settings::from_attributes(|name| canvas.get_attribute(name));
    log::set_max_level(settings.log_level.to_level_filter());

    let ctx = dom::context_2d(&canvas)?;
    let glyphs = GlyphSet::bundled()?;
    log::debug!("[glyphs] {} glyphs loaded", glyphs.len());

    let inner = dom::inner_size(&window);
    let layout = Layout::new(inner.x, inner.y, window.device_pixel_ratio(), &settings.config);
    dom::apply_layout(&canvas, &layout);

    let controller = Rc::new(RefCell::new(Controller::new(
        settings.config,
        Registry::default(),
        glyphs,
        layout,
    )));
    events::attach(&window, &canvas, controller.clone());

    let frame_ctx = frame::FrameContext {
        controller,
        canvas: canvas::Canvas2d::new(ctx),
        stencils: stencil::StencilCache::new(&document)?,
        document,
        last_instant: Instant::now(),
    };
    frame::start_loop(Rc::new(RefCell::new(frame_ctx)));
    Ok(())
}
