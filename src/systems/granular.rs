//! Fall-and-slide movement for granular material.

use super::System;
use crate::cells::cell::Cell;
use crate::util::clock::Clock;
use crate::util::grid::Grid;
use crate::util::vectors::IjVector;

/// Moves [`Cell::Granular`] cells one step per frame: straight down into
/// empty space or liquid, otherwise diagonally down along an empty
/// column side.
///
/// The slide direction alternates with frame parity (down-left on even
/// frames, down-right on odd) so a fixed preference cannot introduce a
/// permanent drift; piles come out symmetric over repeated drops. A
/// cell's own parity flag is stamped after every evaluation, which
/// guarantees at most one movement per frame even if traversal revisits
/// the location it was swapped into.
#[derive(Debug, Default)]
pub struct GranularSystem;

impl System for GranularSystem {
    fn setup(&mut self, _grid: &Grid<Cell>) {}

    fn update(&mut self, grid: &mut Grid<Cell>, pos: IjVector, clock: Clock) {
        let parity = clock.even_frame();
        match grid.get(pos) {
            Some(Cell::Granular { even_frame }) if *even_frame != parity => {}
            _ => return,
        }

        let empty_at = |grid: &Grid<Cell>, pos: IjVector| {
            grid.get(pos).is_some_and(Cell::is_empty)
        };

        let destination = if grid.get(pos.below()).is_some_and(Cell::is_displaceable) {
            Some(pos.below())
        } else if parity && empty_at(grid, pos.left()) && empty_at(grid, pos.below_left()) {
            Some(pos.below_left())
        } else if !parity && empty_at(grid, pos.right()) && empty_at(grid, pos.below_right()) {
            Some(pos.below_right())
        } else {
            None
        };

        // Stamp the parity before moving so the flag travels with the cell.
        if let Some(Cell::Granular { even_frame }) = grid.get_mut(pos) {
            *even_frame = parity;
        }
        if let Some(destination) = destination {
            grid.swap(pos, destination);
        }
    }

    fn close(&mut self, _grid: &mut Grid<Cell>) {}
}
