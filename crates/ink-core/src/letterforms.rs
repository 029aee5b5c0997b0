//! The drawing routines behind each letter.
//!
//! Every routine follows [`crate::routines::DrawFn`]: pure in `(q, r, t, x, y)`,
//! drawing into the `-1..1` square. Inputs are clamped where they feed loop
//! counts so a wild value can never stall the frame.

use crate::math::*;
use crate::surface::Surface;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Upper bound on polyline samples for sweep-style routines.
const MAX_SAMPLES: usize = 4096;

/// Integer count from a `-1..1` control mapped onto `[lo, hi]`.
#[inline]
fn count(v: f64, lo: f64, hi: f64) -> usize {
    let n = declip(clamp1(v), lo, hi).round();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}

pub fn bar(s: &mut Surface<'_>, q: f64, r: f64, t: f64, x: f64, _y: f64) {
    let serif = declip(clamp1(q), 0.0, 0.5);
    let h = 0.8 - (t * TAU).sin().abs() * 0.1 * declip01(clamp1(r));
    let foot = clamp1(x) * 0.3;
    s.begin();
    s.line(0.0, -h);
    s.line(foot, h);
    if serif > 0.01 {
        s.begin();
        s.line(-serif, -h);
        s.line(serif, -h);
        s.begin();
        s.line(foot - serif, h);
        s.line(foot + serif, h);
    }
}

pub fn catenoid(s: &mut Surface<'_>, q: f64, r: f64, t: f64, x: f64, y: f64) {
    let u_count = (36.0 + (clamp1(x) * 16.0).round() * 2.0) as usize; // around the lathe
    let v_count = (10.0 + clamp1(y) * 5.0).round() as usize; // along the curve
    let rad = 0.1; // shift the curve off the y axis
    let a = clamp1(r) + 1.2;
    let tilt = clamp1(q) * 0.2 + 0.2;
    let roll = (t * TAU).sin().powi(7) * 0.03;

    let mut points = Vec::with_capacity(u_count * (v_count + 1));
    let (mut xmin, mut xmax, mut ymin, mut ymax) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
    for u in 0..u_count {
        for v in 0..=v_count {
            // catenary in the xy plane
            let py = denorm1(v as f64 / v_count as f64);
            let px = rad + a * (py / a).cosh() - a;

            // lathe around y
            let uf = TAU * (u as f64 / u_count as f64 - 0.25);
            let x1 = px * uf.cos();
            let z1 = px * uf.sin();

            // tilt around x
            let y1 = py * tilt.cos() - z1 * tilt.sin();

            // roll around z
            let x2 = x1 * roll.cos() - y1 * roll.sin();
            let y2 = x1 * roll.sin() + y1 * roll.cos();

            xmin = xmin.min(x2);
            xmax = xmax.max(x2);
            ymin = ymin.min(y2);
            ymax = ymax.max(y2);
            points.push(DVec2::new(x2, y2));
        }
    }
    if !(xmax > xmin && ymax > ymin) {
        return;
    }
    for p in &mut points {
        p.x = renorm(p.x, xmin, xmax, -1.0, 1.0, false);
        p.y = renorm(p.y, ymin, ymax, -1.0, 1.0, false);
    }

    let stride = v_count + 1;
    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + stride) % n];
        s.move_to(a.x, a.y);
        s.line(b.x, b.y);
        if (i + 1) % stride != 0 {
            let b = points[i + 1];
            s.move_to(a.x, a.y);
            s.line(b.x, b.y);
        }
    }
}

pub fn zigzag_n(s: &mut Surface<'_>, q: f64, r: f64, t: f64, x: f64, y: f64) {
    let legs = count(q, 1.0, 7.0).max(1) * 2 + 1; // odd, so it ends top-right
    let lean = clamp1(r) * 0.3;
    let sway = (t * TAU).sin() * 0.1 * clamp1(x);
    let squash = 0.8 - clamp1(y).abs() * 0.2;
    s.begin();
    for i in 0..=legs {
        let f = denorm1(i as f64 / legs as f64);
        let py = if i % 2 == 0 { squash } else { -squash };
        s.line(f * 0.8 + sway, py + lean * f);
    }
}

pub fn stencil_n(s: &mut Surface<'_>, q: f64, _r: f64, _t: f64, x: f64, y: f64) {
    let n = denorm(declip01(clamp1(q)).powi(4), 3.0, 100.0).round() as usize;
    let stencil = s.stencil('N', n);
    let size = stencil.size() as f64;
    let dx = clamp1(x) * 0.2 + 0.1;
    let dy = clamp1(y) * 0.2 + 0.1;
    for (col, row) in stencil.inked() {
        let px = renorm(col as f64, 0.0, size, -1.0, 1.0, false);
        let py = renorm(row as f64, 0.0, size, -1.0, 1.0, false);
        s.move_to(px, py);
        s.line(px + dx, py + dy);
    }
}

pub fn orbit(s: &mut Surface<'_>, q: f64, r: f64, t: f64, x: f64, _y: f64) {
    let phase = t * TAU;
    s.circle(
        phase.cos() * clamp1(q) * 0.6,
        phase.sin() * clamp1(r) * 0.6,
        declip(clamp1(x), 0.05, 0.4),
    );
}

pub fn strokes_k(s: &mut Surface<'_>, q: f64, r: f64, t: f64, _x: f64, y: f64) {
    let reach = declip(clamp1(q), 0.2, 0.8);
    let kick = (t * TAU).sin() * 0.1 * clamp1(r);
    let joint = clamp1(y) * 0.4;
    s.begin();
    s.line(-0.5, -0.8);
    s.line(-0.5, 0.8);
    s.begin();
    s.line(reach, -0.8 + kick);
    s.line(-0.5, joint);
    s.line(reach, 0.8 - kick);
}

pub fn stencil_k(s: &mut Surface<'_>, q: f64, r: f64, t: f64, _x: f64, _y: f64) {
    let radius = (declip(clamp1(r), 0.01, 0.1) + (t * TAU * 2.0).sin() * 0.01).max(0.0);
    let n = count(q, 5.0, 30.0);
    let stencil = s.stencil('k', n);
    let size = stencil.size() as f64;
    for (col, row) in stencil.inked() {
        s.circle(
            renorm(col as f64, 0.0, size, -1.0, 1.0, false),
            renorm(row as f64, 0.0, size, -1.0, 1.0, false),
            radius,
        );
    }
}

pub fn sine_s(s: &mut Surface<'_>, q: f64, r: f64, t: f64, x: f64, _y: f64) {
    const SAMPLES: usize = 64;
    let turns = declip(clamp1(q), 0.5, 1.5);
    let amp = declip(clamp1(r), 0.3, 0.9);
    let phase = t * TAU;
    s.begin();
    for i in 0..=SAMPLES {
        let f = i as f64 / SAMPLES as f64;
        let sway = (phase + f * PI).sin() * 0.1 * clamp1(x);
        s.line(-amp * (TAU * turns * f).sin() + sway, denorm1(f) * 0.85);
    }
}

pub fn noise_s(s: &mut Surface<'_>, q: f64, r: f64, t: f64, x: f64, y: f64) {
    let n = count(q, 8.0, 32.0).max(1);
    let density = declip(clamp1(r), 0.2, 0.9);
    let width = declip(clamp1(x), 0.15, 0.45);
    let bulge = declip(clamp1(y), 0.4, 0.8);
    // reseed per animation frame so the same inputs always give the same marks
    let frame = (wrap(t) * 48.0).floor() as u64;
    let mut rng = StdRng::seed_from_u64(frame ^ ((n as u64) << 32));
    let pitch = 2.0 / n as f64;
    for row in 0..n {
        let v = -1.0 + (row as f64 + 0.5) * pitch;
        let spine = bulge * (v * PI).sin();
        for col in 0..n {
            let u = -1.0 + (col as f64 + 0.5) * pitch;
            let on = rng.gen::<f64>() < density;
            if on && (u - spine).abs() < width {
                s.rect(u - pitch * 0.4, v - pitch * 0.4, pitch * 0.8, pitch * 0.8);
            }
        }
    }
}

pub fn zigzag_w(s: &mut Surface<'_>, q: f64, r: f64, t: f64, _x: f64, _y: f64) {
    let spread = declip(clamp1(q), 0.6, 1.0);
    let mid = declip(clamp1(r), 0.4, -0.6) + (t * TAU).sin() * 0.1;
    s.begin();
    for (px, py) in [(-0.8, -0.8), (-0.4, 0.8), (0.0, mid), (0.4, 0.8), (0.8, -0.8)] {
        s.line(px * spread, py);
    }
}

pub fn doubleyou(s: &mut Surface<'_>, q: f64, r: f64, t: f64, _x: f64, _y: f64) {
    const STEP: f64 = 0.01;
    let tt = denorm1(modulo(t + 1.5, 1.0));
    let tt = tt.signum() * tt.abs().powi(4); // squished toward the ends
    let big_r = declip(clamp1(r), 0.2, 2.0);
    let lo = declip(tt, 1.0, -2.0) * big_r;
    let hi = declip(tt, 2.0, -1.0) * big_r;
    let span = (hi - lo) / STEP;
    let samples = if span.is_finite() && span > 0.0 {
        // rounded so noise in lo and hi cannot change the count between loops
        (span.round() as usize + 1).min(MAX_SAMPLES)
    } else {
        0
    };
    let curve = |px: f64| -(px * TAU * 2.0 / big_r).cos() * 0.8 + 0.2;

    s.begin();
    for i in 0..samples {
        let px = lo + i as f64 * STEP;
        s.line(px, curve(px));
    }

    let echo = declip(clamp1(q), 0.05, 1.0);
    let mut j = 0.0;
    while j < 1.0 {
        s.begin();
        for i in 0..samples {
            let px = lo + i as f64 * STEP;
            let frac = renorm(px, lo, hi, 0.0, 1.0, false);
            s.line(px, curve(px) - declip01((TAU * frac + PI).cos()) * 0.4 * j);
        }
        j += echo;
    }
}

pub fn tee(s: &mut Surface<'_>, q: f64, r: f64, t: f64, x: f64, _y: f64) {
    let half = declip(clamp1(q), 0.3, 0.9);
    let droop = clamp1(r) * 0.3 * (t * TAU).sin();
    s.begin();
    s.line(-half, -0.8 + droop);
    s.line(0.0, -0.8);
    s.line(half, -0.8 + droop);
    s.begin();
    s.line(0.0, -0.8);
    s.line(clamp1(x) * 0.4, 0.8);
}

pub fn arc_c(s: &mut Surface<'_>, q: f64, r: f64, t: f64, x: f64, y: f64) {
    let gap = declip(clamp1(q), 0.05, 0.35);
    let spin = (t * TAU).sin() * clamp1(r) * 0.05;
    let radius = declip(clamp1(y), 0.5, 0.85);
    // opening faces right
    s.arc(
        clamp1(x) * 0.1,
        0.0,
        radius,
        gap / 2.0 + spin,
        1.0 - gap / 2.0 + spin,
        false,
    );
}

pub fn ladder_h(s: &mut Surface<'_>, q: f64, r: f64, t: f64, _x: f64, y: f64) {
    let rungs = count(q, 1.0, 6.0).max(1);
    // whole loops per cycle so the rungs repeat with the phase
    let speed = count(r, 0.0, 3.0) as f64;
    let tilt = clamp1(y) * 0.2;
    s.begin();
    s.line(-0.6, -0.8);
    s.line(-0.6, 0.8);
    s.begin();
    s.line(0.6, -0.8);
    s.line(0.6, 0.8);
    for k in 0..rungs {
        let f = wrap((k as f64 + 0.5) / rungs as f64 + t * speed);
        let py = denorm(f, -0.7, 0.7);
        s.begin();
        s.line(-0.6, py - tilt);
        s.line(0.6, py + tilt);
    }
}

pub fn cross(s: &mut Surface<'_>, q: f64, r: f64, _t: f64, _x: f64, _y: f64) {
    let (sn, cs) = (clamp1(r) * PI * 0.5).sin_cos();
    let d = declip(clamp1(q), 0.2, 0.85);
    let rot = |px: f64, py: f64| (px * cs - py * sn, px * sn + py * cs);
    for ((ax, ay), (bx, by)) in [((-d, -d), (d, d)), ((d, -d), (-d, d))] {
        let (ax, ay) = rot(ax, ay);
        let (bx, by) = rot(bx, by);
        s.move_to(ax, ay);
        s.line(bx, by);
    }
}
