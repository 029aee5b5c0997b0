// Shared layout and interaction tuning constants used by the core and the web frontend.

// Grid shape
pub const CELL_COUNT: usize = 9;
pub const GRID_COLS: usize = 3;
pub const GRID_ROWS: usize = 4;
pub const AUX_ROW: usize = 1; // row holding the ampersand and the kaoss pad

// Animation
pub const CYCLE_SECS: f64 = 8.0; // seconds per animation loop
pub const MAX_DPR: f64 = 2.0; // cap the device pixel ratio so we don't burn too much time

// Layout (CSS pixels)
pub const PADDING: f64 = 16.0; // around the whole grid
pub const GAP: f64 = 28.0; // between slots; also the height of a selector label strip

// Interaction
pub const CAPTURE_RADIUS: f64 = 0.3; // pad-normalized radius for grabbing a (q, r) marker
// Fraction of the pad height reserved for the scrubber. The strip's pad-space
// height (2 * TIMELINE_STRIP) must stay below CAPTURE_RADIUS so a marker at
// r = 1 can still be grabbed from just above the strip.
pub const TIMELINE_STRIP: f64 = 0.1;

// Letters drawn on the pad markers, one per cell.
pub const CELL_LETTERS: &str = "INKSWITCH";

// Cost accounting
pub const COST_BUDGET_MS: f64 = 3.0;
pub const COST_SAMPLES: usize = 10;

// Strokes (device pixels)
pub const STROKE_PX: f64 = 4.0;
pub const DECOR_STROKE_PX: f64 = 1.5;

// Clock wave
pub const WAVE_SAMPLES: usize = 96;
pub const WAVE_BASE_PX: f64 = 1.0;
pub const WAVE_PEAK_PX: f64 = 6.0;
pub const WAVE_SPREAD: f64 = 0.12; // phase distance over which the pulse fades out

// Vector glyph design grid
pub const GLYPH_UNITS: f64 = 800.0;

// Palette
pub const INK: &str = "#fff";
pub const WARN: &str = "#f33";
pub const BACKDROP: &str = "#000";
