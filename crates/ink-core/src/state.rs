//! Per-cell parameter state and the shared animation phase.

use crate::averager::Averager;
use crate::constants::CELL_COUNT;
use crate::math::{clamp1, renorm, wrap};
use crate::routines::Registry;

#[derive(Clone, Debug)]
pub struct CellState {
    /// Index into this cell's routine list; only the selector changes it.
    pub routine_index: usize,
    pub q: f64,
    pub r: f64,
    pub x: f64,
    pub y: f64,
    /// Rolling draw cost in milliseconds.
    pub cost: Averager,
    /// The routine failed on the last frame it ran.
    pub faulted: bool,
}

impl CellState {
    pub fn new(index: usize, routine_count: usize, cost_samples: usize) -> Self {
        Self {
            routine_index: routine_count.saturating_sub(1),
            q: renorm(index as f64, -1.0, CELL_COUNT as f64, -1.0, 1.0, false),
            r: 0.0,
            x: 0.0,
            y: 0.0,
            cost: Averager::new(cost_samples),
            faulted: false,
        }
    }

    pub fn set_params(&mut self, q: f64, r: f64) {
        self.q = clamp1(q);
        self.r = clamp1(r);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.x = clamp1(x);
        self.y = clamp1(y);
    }
}

/// All nine cells, created once and mutated in place.
#[derive(Clone, Debug)]
pub struct Cells {
    cells: Vec<CellState>,
}

impl Cells {
    pub fn new(registry: &Registry, cost_samples: usize) -> Self {
        let cells = (0..CELL_COUNT)
            .map(|i| CellState::new(i, registry.count(i), cost_samples))
            .collect();
        Self { cells }
    }

    pub fn get(&self, cell: usize) -> Option<&CellState> {
        self.cells.get(cell)
    }

    pub fn get_mut(&mut self, cell: usize) -> Option<&mut CellState> {
        self.cells.get_mut(cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellState> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CellState> {
        self.cells.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Move `cell`'s routine selection by `delta`, wrapping.
    pub fn step_routine(&mut self, registry: &Registry, cell: usize, delta: isize) -> Option<usize> {
        let state = self.cells.get_mut(cell)?;
        state.routine_index = registry.step(cell, state.routine_index, delta);
        Some(state.routine_index)
    }

    /// Closest `(q, r)` marker to `(q, r)`; ties go to the lower index.
    pub fn nearest_param(&self, q: f64, r: f64) -> Option<(usize, f64)> {
        let mut best = None::<(usize, f64)>;
        for (i, c) in self.cells.iter().enumerate() {
            let dist = (q - c.q).hypot(r - c.r);
            match best {
                Some((_, bd)) if dist >= bd => {}
                _ => best = Some((i, dist)),
            }
        }
        best
    }
}

impl std::ops::Index<usize> for Cells {
    type Output = CellState;

    fn index(&self, cell: usize) -> &CellState {
        &self.cells[cell]
    }
}

impl std::ops::IndexMut<usize> for Cells {
    fn index_mut(&mut self, cell: usize) -> &mut CellState {
        &mut self.cells[cell]
    }
}

/// Shared animation clock, measured in loops. Not wrapped: read it through
/// [`Phase::cyclic`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phase {
    pub t: f64,
    pub cycle_secs: f64,
}

impl Phase {
    pub fn new(cycle_secs: f64) -> Self {
        Self { t: 0.0, cycle_secs }
    }

    pub fn advance(&mut self, dt_secs: f64) {
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.t += dt_secs / self.cycle_secs;
        }
    }

    pub fn cyclic(&self) -> f64 {
        wrap(self.t)
    }
}

/// Everything the router and renderer mutate, owned by the controller.
#[derive(Clone, Debug)]
pub struct AppState {
    pub cells: Cells,
    pub phase: Phase,
    /// Cell whose label was clicked in its edit region; UI only.
    pub editing: Option<usize>,
}

impl AppState {
    pub fn new(registry: &Registry, cycle_secs: f64, cost_samples: usize) -> Self {
        Self {
            cells: Cells::new(registry, cost_samples),
            phase: Phase::new(cycle_secs),
            editing: None,
        }
    }
}
