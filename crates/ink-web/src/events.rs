//! DOM listeners that feed the controller.
//!
//! `pointermove` is only listened to on the window while a drag is live. It
//! is attached on a press that starts a drag and detached on every
//! `pointerup`/`pointercancel`; detaching an absent listener is a no-op.

use crate::dom;
use crate::input;
use ink_core::{Controller, Press};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type PointerListener = Closure<dyn FnMut(web::PointerEvent)>;

pub fn attach(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    controller: Rc<RefCell<Controller>>,
) {
    let on_move: Rc<PointerListener> = {
        let canvas = canvas.clone();
        let controller = controller.clone();
        Rc::new(Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut c = controller.borrow_mut();
            let css = input::pointer_css(&ev, &canvas, c.layout().css_size());
            c.pointer_move(css);
        }) as Box<dyn FnMut(web::PointerEvent)>))
    };

    // press
    {
        let window_c = window.clone();
        let canvas_c = canvas.clone();
        let controller = controller.clone();
        let on_move = on_move.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if !input::is_primary_press(ev.button()) {
                return;
            }
            let press = {
                let mut c = controller.borrow_mut();
                let css = input::pointer_css(&ev, &canvas_c, c.layout().css_size());
                c.pointer_down(css)
            };
            if let Press::Drag(_) = press {
                ev.prevent_default();
                let _ = canvas_c.set_pointer_capture(ev.pointer_id());
                let _ = window_c.add_event_listener_with_callback(
                    "pointermove",
                    (*on_move).as_ref().unchecked_ref(),
                );
            }
        }) as Box<dyn FnMut(web::PointerEvent)>);
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // release
    for (name, cancel) in [("pointerup", false), ("pointercancel", true)] {
        let window_c = window.clone();
        let controller = controller.clone();
        let on_move = on_move.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            {
                let mut c = controller.borrow_mut();
                if cancel {
                    c.pointer_cancel();
                } else {
                    c.pointer_up();
                }
            }
            let _ = window_c.remove_event_listener_with_callback(
                "pointermove",
                (*on_move).as_ref().unchecked_ref(),
            );
        }) as Box<dyn FnMut(web::PointerEvent)>);
        let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // resize
    {
        let window_c = window.clone();
        let canvas_c = canvas.clone();
        let closure = Closure::wrap(Box::new(move || {
            let inner = dom::inner_size(&window_c);
            let layout =
                controller
                    .borrow_mut()
                    .resize(inner.x, inner.y, window_c.device_pixel_ratio());
            dom::apply_layout(&canvas_c, &layout);
        }) as Box<dyn FnMut()>);
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
