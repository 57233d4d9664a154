//! Straight-line descent for dense cells.

use super::System;
use crate::cells::cell::Cell;
use crate::util::clock::Clock;
use crate::util::grid::Grid;
use crate::util::vectors::IjVector;

/// Drops every [`Cell::Gravity`] one row per frame into empty space or
/// liquid. Falling through liquid displaces it upward by the swap,
/// modeling a density override. No scratch state.
#[derive(Debug, Default)]
pub struct GravitySystem;

impl System for GravitySystem {
    fn setup(&mut self, _grid: &Grid<Cell>) {}

    fn update(&mut self, grid: &mut Grid<Cell>, pos: IjVector, _clock: Clock) {
        if !matches!(grid.get(pos), Some(Cell::Gravity)) {
            return;
        }
        let below = pos.below();
        if grid.get(below).is_some_and(Cell::is_displaceable) {
            grid.swap(pos, below);
        }
    }

    fn close(&mut self, _grid: &mut Grid<Cell>) {}
}
