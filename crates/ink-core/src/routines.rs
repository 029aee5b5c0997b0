//! Routine registry: which drawing routines each cell can cycle through.

use crate::constants::CELL_COUNT;
use crate::error::{InkError, Result};
use crate::letterforms::*;
use crate::surface::Surface;

/// `(surface, q, r, t, x, y)`. Shapes are described in the cell's `-1..1`
/// square. Routines keep no state between calls.
pub type DrawFn = fn(&mut Surface<'_>, f64, f64, f64, f64, f64);

#[derive(Clone, Copy)]
pub struct Routine {
    pub name: &'static str,
    pub draw: DrawFn,
}

impl Routine {
    pub const fn new(name: &'static str, draw: DrawFn) -> Self {
        Self { name, draw }
    }
}

impl std::fmt::Debug for Routine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Routine").field(&self.name).finish()
    }
}

/// Fixed `cell -> ordered routines` table. Selection is always by index so a
/// stored `routine_index` keeps its meaning.
#[derive(Clone, Debug)]
pub struct Registry {
    cells: Vec<Vec<Routine>>,
}

impl Registry {
    pub fn new(cells: Vec<Vec<Routine>>) -> Result<Self> {
        if cells.len() != CELL_COUNT {
            return Err(InkError::RoutineListCount {
                expected: CELL_COUNT,
                got: cells.len(),
            });
        }
        if let Some(cell) = cells.iter().position(|list| list.is_empty()) {
            return Err(InkError::EmptyRoutineList { cell });
        }
        Ok(Self { cells })
    }

    /// The "INKSWITCH" set.
    pub fn letterforms() -> Self {
        Self {
            cells: vec![
                vec![Routine::new("BAR", bar), Routine::new("CATENOID", catenoid)],
                vec![Routine::new("ZIGZAG", zigzag_n), Routine::new("STENCIL", stencil_n)],
                vec![
                    Routine::new("ORBIT", orbit),
                    Routine::new("STROKES", strokes_k),
                    Routine::new("STENCIL", stencil_k),
                ],
                vec![Routine::new("SINE", sine_s), Routine::new("NOISE", noise_s)],
                vec![Routine::new("ZIGZAG", zigzag_w), Routine::new("DOUBLEYOU", doubleyou)],
                vec![Routine::new("CATENOID", catenoid), Routine::new("BAR", bar)],
                vec![Routine::new("TEE", tee)],
                vec![Routine::new("ARC", arc_c), Routine::new("ORBIT", orbit)],
                vec![Routine::new("LADDER", ladder_h), Routine::new("CROSS", cross)],
            ],
        }
    }

    pub fn routines(&self, cell: usize) -> &[Routine] {
        self.cells.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, cell: usize) -> usize {
        self.routines(cell).len()
    }

    pub fn get(&self, cell: usize, index: usize) -> Option<&Routine> {
        self.routines(cell).get(index)
    }

    /// `index + delta`, wrapped into the cell's routine list.
    pub fn step(&self, cell: usize, index: usize, delta: isize) -> usize {
        let len = self.count(cell) as isize;
        if len == 0 {
            return 0;
        }
        (index as isize + delta).rem_euclid(len) as usize
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::letterforms()
    }
}
