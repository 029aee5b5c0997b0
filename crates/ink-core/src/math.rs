//! Range remapping helpers.
//!
//! Everything here composes losslessly: the layout's inverse mapping relies on
//! `renorm` undoing the forward placement exactly, so keep these as plain
//! algebra with no hidden clamping.

pub use std::f64::consts::{PI, TAU};

/// Restrict `v` to `[lo, hi]`. Unlike `f64::clamp` this never panics.
#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// `clamp` over the default `[-1, 1]` range.
#[inline]
pub fn clamp1(v: f64) -> f64 {
    clamp(v, -1.0, 1.0)
}

/// Map `[lo, hi]` onto `[0, 1]`. `lo == hi` is the caller's problem.
#[inline]
pub fn norm(n: f64, lo: f64, hi: f64) -> f64 {
    (n - lo) / (hi - lo)
}

#[inline]
pub fn norm1(n: f64) -> f64 {
    norm(n, -1.0, 1.0)
}

/// Map `[0, 1]` onto `[lo, hi]`.
#[inline]
pub fn denorm(n: f64, lo: f64, hi: f64) -> f64 {
    n * (hi - lo) + lo
}

#[inline]
pub fn denorm1(n: f64) -> f64 {
    denorm(n, -1.0, 1.0)
}

/// Map `[lo, hi]` onto `[to_lo, to_hi]`, optionally clamping the normalized
/// intermediate to `[0, 1]` first.
#[inline]
pub fn renorm(v: f64, lo: f64, hi: f64, to_lo: f64, to_hi: f64, do_clamp: bool) -> f64 {
    let mut n = norm(v, lo, hi);
    if do_clamp {
        n = clamp(n, 0.0, 1.0);
    }
    denorm(n, to_lo, to_hi)
}

/// Treat `n` as a signal in `[-1, 1]` and map it onto `[lo, hi]`.
#[inline]
pub fn declip(n: f64, lo: f64, hi: f64) -> f64 {
    denorm(norm1(n), lo, hi)
}

#[inline]
pub fn declip01(n: f64) -> f64 {
    declip(n, 0.0, 1.0)
}

/// True modulo: the result has the sign of `m`.
#[inline]
pub fn modulo(v: f64, m: f64) -> f64 {
    ((v % m) + m) % m
}

/// Wrap a phase into `[0, 1)`.
#[inline]
pub fn wrap(v: f64) -> f64 {
    modulo(v, 1.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, f: f64) -> f64 {
    a + (b - a) * f
}

/// Shortest distance between two phases on the unit circle.
#[inline]
pub fn phase_distance(a: f64, b: f64) -> f64 {
    let d = modulo(a - b, 1.0);
    d.min(1.0 - d)
}
