use glam::DVec2;
use web_sys as web;

/// Map a client-space point into the canvas' CSS pixel space.
///
/// `origin` and `shown` are the element's bounding rect; `css_size` is the
/// size the layout asked for. The two differ when the page is zoomed or the
/// element is scaled by a stylesheet.
#[inline]
pub fn css_position(client: DVec2, origin: DVec2, shown: DVec2, css_size: DVec2) -> DVec2 {
    let rel = client - origin;
    if shown.x > 0.0 && shown.y > 0.0 {
        rel * css_size / shown
    } else {
        rel
    }
}

/// Only the primary button starts a gesture. Touch and pen contacts report 0.
#[inline]
pub fn is_primary_press(button: i16) -> bool {
    button == 0
}

#[inline]
pub fn pointer_css(
    ev: &web::PointerEvent,
    canvas: &web::HtmlCanvasElement,
    css_size: DVec2,
) -> DVec2 {
    let rect = canvas.get_bounding_client_rect();
    css_position(
        DVec2::new(ev.client_x() as f64, ev.client_y() as f64),
        DVec2::new(rect.left(), rect.top()),
        DVec2::new(rect.width(), rect.height()),
        css_size,
    )
}
