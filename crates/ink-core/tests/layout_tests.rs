mod common;

use common::{cell_css, label_css, pad_css};
use glam::DVec2;
use ink_core::constants::{AUX_ROW, CELL_COUNT};
use ink_core::{Config, Layout, Target};

fn layout(w: f64, h: f64, dpr: f64) -> Layout {
    Layout::new(w, h, dpr, &Config::default())
}

#[test]
fn cell_width_is_even_and_fits_the_window() {
    let config = Config::default();
    for (w, h) in [(1280.0, 1024.0), (1001.0, 700.0), (390.0, 844.0), (2560.0, 1440.0)] {
        let l = layout(w, h, 1.0);
        assert_eq!(l.css_cell % 2.0, 0.0);
        let dead_w = config.padding * 2.0 + config.gap * 2.0;
        let dead_h = config.padding * 2.0 + config.gap * 4.0;
        let expected = (((w - dead_w) / 3.0).min((h - dead_h) / 4.0) / 2.0).floor() * 2.0;
        assert_eq!(l.css_cell, expected);
        let css = l.css_size();
        assert!(css.x <= w + 1e-9 && css.y <= h + 1e-9);
    }
}

#[test]
fn tiny_window_still_has_a_cell() {
    let l = layout(10.0, 10.0, 1.0);
    assert_eq!(l.css_cell, 2.0);
}

#[test]
fn device_pixel_ratio_is_clamped() {
    assert_eq!(layout(1280.0, 1024.0, 3.0).dpr, 2.0);
    assert_eq!(layout(1280.0, 1024.0, 0.5).dpr, 1.0);
    assert_eq!(layout(1280.0, 1024.0, 1.5).dpr, 1.5);
}

#[test]
fn backing_store_matches_grid_formula() {
    let l = layout(1280.0, 1024.0, 2.0);
    let size = l.backing_size();
    assert_eq!(l.pix_w, l.css_cell * 2.0);
    assert_eq!(size.x, l.pix_w * 3.0 + l.dead_width() * 2.0);
    assert_eq!(size.y, l.pix_w * 4.0 + l.dead_height() * 2.0);
}

#[test]
fn cells_skip_the_auxiliary_row() {
    let slots: Vec<_> = (0..CELL_COUNT).map(Layout::cell_slot).collect();
    assert_eq!(
        slots,
        vec![(0, 0), (1, 0), (2, 0), (0, 2), (1, 2), (2, 2), (0, 3), (1, 3), (2, 3)]
    );
    for cell in 0..CELL_COUNT {
        let (col, row) = Layout::cell_slot(cell);
        assert_eq!(Layout::slot_cell(col, row), Some(cell));
    }
    assert_eq!(Layout::slot_cell(0, AUX_ROW), None);
    assert_eq!(Layout::slot_cell(3, 0), None);
}

#[test]
fn locate_inverts_the_cell_transform() {
    for dpr in [1.0, 1.5, 2.0] {
        let l = layout(1280.0, 1024.0, dpr);
        for cell in 0..CELL_COUNT {
            for local in [
                DVec2::new(0.0, 0.0),
                DVec2::new(-0.9, 0.3),
                DVec2::new(0.75, -0.95),
                DVec2::new(0.999, 0.999),
            ] {
                let css = cell_css(&l, cell, local);
                match l.locate(css) {
                    Target::Letter { cell: c, local: back } => {
                        assert_eq!(c, cell);
                        assert!((back - local).length() < 1e-9, "{:?} vs {:?}", back, local);
                    }
                    other => panic!("cell {} local {:?} located as {:?}", cell, local, other),
                }
            }
        }
    }
}

#[test]
fn cell_center_maps_to_slot_center() {
    let l = layout(1280.0, 1024.0, 2.0);
    let (col, row) = Layout::cell_slot(4);
    let center = l.cell_transform(4).transform_point2(DVec2::ZERO);
    let expected = DVec2::new(
        (l.padding + col as f64 * (l.css_cell + l.gap) + l.css_cell / 2.0) * l.dpr,
        (l.padding + row as f64 * (l.css_cell + l.gap) + l.css_cell / 2.0) * l.dpr,
    );
    assert!((center - expected).length() < 1e-9);
}

#[test]
fn line_width_is_constant_in_device_pixels() {
    let small = layout(640.0, 600.0, 1.0);
    let big = layout(2560.0, 2000.0, 2.0);
    for l in [small, big] {
        let w = l.line_width(4.0);
        let m = l.cell_transform(0);
        let a = m.transform_point2(DVec2::ZERO);
        let b = m.transform_point2(DVec2::new(w, 0.0));
        assert!(((b - a).length() - 4.0).abs() < 1e-9);
    }
}

#[test]
fn label_strip_sits_below_its_cell() {
    let l = layout(1280.0, 1024.0, 2.0);
    for cell in 0..CELL_COUNT {
        let frac = DVec2::new(0.1, 0.5);
        match l.locate(label_css(&l, cell, frac)) {
            Target::Label { cell: c, frac: back } => {
                assert_eq!(c, cell);
                assert!((back - frac).length() < 1e-9);
            }
            other => panic!("label of {} located as {:?}", cell, other),
        }
    }
}

#[test]
fn pad_round_trips_and_spans_two_slots() {
    let l = layout(1280.0, 1024.0, 2.0);
    for pad in [DVec2::ZERO, DVec2::new(-0.95, 0.9), DVec2::new(0.5, -0.5), DVec2::new(0.0, 0.99)] {
        match l.locate(pad_css(&l, pad)) {
            Target::Pad { pad: back } => assert!((back - pad).length() < 1e-9),
            other => panic!("pad {:?} located as {:?}", pad, other),
        }
    }
    let size = l.pad_size();
    assert_eq!(size.x, l.pix_w * 2.0 + l.gap * l.dpr);
    assert_eq!(size.y, l.pix_w);
}

#[test]
fn ampersand_slot_and_margins() {
    let l = layout(1280.0, 1024.0, 2.0);
    let amp = l.slot_transform(0, AUX_ROW).transform_point2(DVec2::ZERO) / l.dpr;
    assert!(matches!(l.locate(amp), Target::Ampersand { .. }));
    assert_eq!(l.locate(DVec2::new(2.0, 2.0)), Target::Outside);
    assert_eq!(l.locate(DVec2::new(-5.0, 100.0)), Target::Outside);
    let far = l.css_size() + DVec2::splat(50.0);
    assert_eq!(l.locate(far), Target::Outside);
    // horizontal gap between cells 0 and 1
    let between = (cell_css(&l, 0, DVec2::new(1.0, 0.0)) + cell_css(&l, 1, DVec2::new(-1.0, 0.0))) / 2.0;
    assert_eq!(l.locate(between), Target::Outside);
}
