use crate::canvas::Canvas2d;
use crate::stencil::StencilCache;
use ink_core::Controller;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub controller: Rc<RefCell<Controller>>,
    pub canvas: Canvas2d,
    pub stencils: StencilCache,
    pub document: web::Document,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let visible = !self.document.hidden();
        let report = self.controller.borrow_mut().frame(
            &mut self.canvas,
            &mut self.stencils,
            dt.as_secs_f64(),
            visible,
        );
        if !report.over_budget.is_empty() {
            log::trace!("[frame] over budget: {:?}", report.over_budget);
        }
    }
}

/// Drive [`FrameContext::frame`] from `requestAnimationFrame`. Hidden frames
/// still reschedule so drawing resumes when the page is shown again.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
