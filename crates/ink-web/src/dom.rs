use glam::DVec2;
use ink_core::Layout;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Window inner size in CSS pixels; zero when the browser will not say.
#[inline]
pub fn inner_size(window: &web::Window) -> DVec2 {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    DVec2::new(read(window.inner_width()), read(window.inner_height()))
}

/// Size the backing store in device pixels and the element in CSS pixels.
pub fn apply_layout(canvas: &web::HtmlCanvasElement, layout: &Layout) {
    let backing = layout.backing_size();
    canvas.set_width((backing.x as u32).max(1));
    canvas.set_height((backing.y as u32).max(1));
    let css = layout.css_size();
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", css.x));
    let _ = style.set_property("height", &format!("{}px", css.y));
    // drags must not scroll the page on touch screens
    let _ = style.set_property("touch-action", "none");
}
