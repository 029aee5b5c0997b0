mod common;

use common::{approx, controller, controller_with, pad_css, FakeStencil, Op, Recorder};
use glam::{DAffine2, DVec2};
use ink_core::constants::{BACKDROP, CELL_COUNT, INK, WAVE_BASE_PX, WAVE_PEAK_PX, WAVE_SAMPLES, WARN};
use ink_core::{Config, Registry, Routine, Surface};

fn line(s: &mut Surface<'_>, _: f64, _: f64, _: f64, _: f64, _: f64) {
    s.line(-1.0, 0.0);
    s.line(1.0, 0.0);
}

fn broken(_: &mut Surface<'_>, _: f64, _: f64, _: f64, _: f64, _: f64) {
    panic!("routine blew up");
}

fn registry_with_fault(cell: usize) -> Registry {
    let mut lists = vec![vec![Routine::new("LINE", line)]; CELL_COUNT];
    lists[cell] = vec![Routine::new("BROKEN", broken)];
    Registry::new(lists).unwrap()
}

#[test]
fn hidden_frame_draws_nothing() {
    let mut c = controller();
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    let report = c.frame(&mut canvas, &mut stencils, 1.0, false);
    assert!(!report.rendered);
    assert!(canvas.ops.is_empty());
    assert_eq!(c.state().phase.t, 0.0);
}

#[test]
fn visible_frame_advances_phase_and_starts_with_clear() {
    let mut c = controller();
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    let report = c.frame(&mut canvas, &mut stencils, 2.0, true);
    assert!(report.rendered);
    assert!(approx(c.state().phase.t, 2.0 / c.config().cycle_secs));

    let size = c.layout().backing_size();
    assert_eq!(canvas.ops[0], Op::Transform(DAffine2::IDENTITY));
    assert_eq!(canvas.ops[1], Op::Clear(size.x, size.y));
}

#[test]
fn every_cell_is_drawn_in_its_own_transform() {
    let mut c = controller();
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    c.frame(&mut canvas, &mut stencils, 0.016, true);
    for cell in 0..CELL_COUNT {
        let m = c.layout().cell_transform(cell);
        assert!(canvas.ops.contains(&Op::Transform(m)), "cell {} not drawn", cell);
    }
    assert!(canvas.ops.contains(&Op::Stroke(INK.to_string())));
}

#[test]
fn bad_dt_does_not_move_the_clock() {
    let mut c = controller();
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    for dt in [-1.0, f64::NAN, f64::INFINITY, 0.0] {
        c.frame(&mut canvas, &mut stencils, dt, true);
    }
    assert_eq!(c.state().phase.t, 0.0);
}

#[test]
fn scrubbing_holds_the_phase() {
    let mut c = controller();
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    c.pointer_down(pad_css(c.layout(), DVec2::new(0.0, 0.95)));
    assert!(approx(c.state().phase.t, 0.5));
    for _ in 0..5 {
        c.frame(&mut canvas, &mut stencils, 0.5, true);
    }
    assert!(approx(c.state().phase.t, 0.5));

    c.pointer_up();
    c.frame(&mut canvas, &mut stencils, 0.5, true);
    assert!(c.state().phase.t > 0.5);
}

#[test]
fn phase_keeps_growing_past_one_loop() {
    let mut c = controller();
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    let cycle = c.config().cycle_secs;
    c.frame(&mut canvas, &mut stencils, cycle * 2.5, true);
    assert!(approx(c.state().phase.t, 2.5));
    assert!(approx(c.state().phase.cyclic(), 0.5));
}

#[test]
fn failing_routine_is_isolated() {
    let mut c = controller_with(Config::default(), registry_with_fault(3), 1.0);
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    let report = c.frame(&mut canvas, &mut stencils, 0.016, true);

    assert!(report.rendered);
    assert_eq!(report.faulted.as_slice(), &[3]);
    assert!(c.state().cells[3].faulted);
    assert!(!c.state().cells[0].faulted);

    // the eight healthy cells each drew their line
    let lines = canvas.count(|op| *op == Op::Line(1.0, 0.0));
    assert_eq!(lines, CELL_COUNT - 1);

    // and the frame stays usable afterwards
    let report = c.frame(&mut canvas, &mut stencils, 0.016, true);
    assert_eq!(report.faulted.as_slice(), &[3]);
}

#[test]
fn over_budget_cells_show_their_cost() {
    let config = Config {
        cost_budget_ms: -1.0,
        ..Config::default()
    };
    let mut c = controller_with(config, Registry::default(), 2.0);
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    let report = c.frame(&mut canvas, &mut stencils, 0.016, true);
    assert_eq!(report.over_budget.len(), CELL_COUNT);
    assert!(canvas.ops.contains(&Op::Stroke(WARN.to_string())));
}

#[test]
fn cheap_cells_show_no_cost() {
    let config = Config {
        cost_budget_ms: f64::INFINITY,
        ..Config::default()
    };
    let mut c = controller_with(config, Registry::default(), 2.0);
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    let report = c.frame(&mut canvas, &mut stencils, 0.016, true);
    assert!(report.over_budget.is_empty());
    assert!(!canvas.ops.contains(&Op::Stroke(WARN.to_string())));
}

#[test]
fn cost_window_is_bounded() {
    let mut c = controller();
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    for _ in 0..25 {
        canvas.ops.clear();
        c.frame(&mut canvas, &mut stencils, 0.016, true);
    }
    let limit = c.config().cost_samples;
    for cell in c.state().cells.iter() {
        assert_eq!(cell.cost.len(), limit);
        assert!(cell.cost.result() >= 0.0);
    }
}

#[test]
fn focused_marker_is_filled() {
    let mut c = controller();
    let mut stencils = FakeStencil::default();
    let fills = |c: &mut ink_core::Controller, stencils: &mut FakeStencil| {
        let mut canvas = Recorder::new();
        c.frame(&mut canvas, stencils, 0.0, true);
        canvas.count(|op| *op == Op::FillPath)
    };
    let idle = fills(&mut c, &mut stencils);
    let marker = DVec2::new(c.state().cells[0].q, c.state().cells[0].r);
    c.pointer_down(pad_css(c.layout(), marker));
    let focused = fills(&mut c, &mut stencils);
    assert_eq!(focused, idle + 1);
}

#[test]
fn stencil_cells_ask_for_their_resolution() {
    let mut c = controller();
    // cell 1 defaults to its last routine, the N stencil
    assert_eq!(c.registry().get(1, c.state().cells[1].routine_index).map(|r| r.name), Some("STENCIL"));
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    c.frame(&mut canvas, &mut stencils, 0.016, true);
    assert!(stencils.requests.iter().any(|(ch, _)| *ch == 'N'));
    assert!(stencils.requests.iter().any(|(ch, _)| *ch == 'k'));
}

#[test]
fn each_marker_carries_its_letter() {
    let mut c = controller();
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    c.frame(&mut canvas, &mut stencils, 0.0, true);

    // with x = y = 0 a marker is centred on (q, r); its glyph stays well
    // inside the diamond, whose corners lie further out
    let dpr = c.layout().dpr;
    let pad = c.layout().pad_transform();
    for (i, cell) in c.state().cells.iter().enumerate() {
        let center = pad.transform_point2(DVec2::new(cell.q, cell.r));
        let near = canvas.count(|op| match *op {
            Op::Line(x, y) => DVec2::new(x, y).distance(center) < 5.0 * dpr,
            _ => false,
        });
        assert!(near > 0, "no letter on marker {}", i);
    }
    assert!(!canvas.ops.contains(&Op::Stroke(BACKDROP.to_string())));
}

#[test]
fn filled_marker_letter_uses_backdrop() {
    let mut c = controller();
    let marker = DVec2::new(c.state().cells[3].q, c.state().cells[3].r);
    c.pointer_down(pad_css(c.layout(), marker));
    let mut canvas = Recorder::new();
    let mut stencils = FakeStencil::default();
    c.frame(&mut canvas, &mut stencils, 0.0, true);
    assert!(canvas.ops.contains(&Op::Stroke(BACKDROP.to_string())));
}

fn wave_widths(canvas: &Recorder) -> Vec<f64> {
    let widths: Vec<f64> = canvas
        .ops
        .iter()
        .filter_map(|op| match *op {
            Op::LineWidth(w) => Some(w),
            _ => None,
        })
        .collect();
    // the clock is drawn last: one width per wave segment, then the playhead
    let end = widths.len() - 1;
    widths[end - WAVE_SAMPLES..end].to_vec()
}

#[test]
fn clock_pulse_peaks_at_the_current_phase() {
    for loops in [0.0, 3.0] {
        let mut c = controller();
        let dpr = c.layout().dpr;
        c.state_mut().phase.t = loops + 0.5 + 0.5 / WAVE_SAMPLES as f64;
        let mut canvas = Recorder::new();
        let mut stencils = FakeStencil::default();
        c.frame(&mut canvas, &mut stencils, 0.0, true);

        let widths = wave_widths(&canvas);
        let (widest, max) = widths
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, w)| if w > best.1 { (i, w) } else { best });
        assert_eq!(widest, WAVE_SAMPLES / 2);
        assert!(approx(max, (WAVE_BASE_PX + WAVE_PEAK_PX) * dpr), "{}", max);
        // far from the phase only the base width remains
        assert!(approx(widths[0], WAVE_BASE_PX * dpr));
        // and the pulse tapers on both sides
        assert!(widths[widest - 1] < max && widths[widest + 1] < max);
        assert!(approx(widths[widest - 1], widths[widest + 1]));
    }
}

#[test]
fn editing_label_is_underlined() {
    let draw = |editing: Option<usize>| {
        let mut c = controller();
        c.state_mut().editing = editing;
        let mut canvas = Recorder::new();
        let mut stencils = FakeStencil::default();
        c.frame(&mut canvas, &mut stencils, 0.0, true);
        (*c.layout(), canvas)
    };

    let (l, idle) = draw(None);
    let size = l.gap * l.dpr * 0.6;
    let top = (l.gap * l.dpr - size) / 2.0;
    let underline = Op::Line(l.pix_w, top + size);
    assert!(!idle.ops.contains(&underline));

    let (l, edited) = draw(Some(4));
    let at = edited
        .ops
        .iter()
        .position(|op| *op == underline)
        .expect("underline drawn");
    let origin = l.label_transform(4).transform_point2(DVec2::ZERO);
    let transform = edited.ops[..at]
        .iter()
        .rev()
        .find(|op| matches!(op, Op::Transform(_)));
    assert_eq!(transform, Some(&Op::Transform(DAffine2::from_translation(origin))));
    assert_eq!(edited.ops[at - 1], Op::Move(l.pix_w / 3.0 * 2.0, top + size));
    assert_eq!(edited.count(|op| *op == underline), 1);
}
