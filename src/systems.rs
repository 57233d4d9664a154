//! The per-frame update systems.
//!
//! Each system implements the same three-phase contract over the grid:
//! `setup` allocates per-frame scratch, `update` applies the local rule
//! for one cell, `close` commits anything the update phase deferred. The
//! driver runs the phases in lockstep across all systems once per frame.

pub mod granular;
pub mod gravity;
pub mod liquid;

use crate::cells::cell::Cell;
use crate::util::clock::Clock;
use crate::util::grid::Grid;
use crate::util::vectors::IjVector;

/// A per-cell simulation rule over the grid.
///
/// Systems never own cells; all reads and writes go through the grid's
/// bounds-checked accessors, so a rule at the grid edge simply sees
/// "no cell" and cannot move there.
pub trait System {
    /// Called once at the start of each frame, before any `update`
    fn setup(&mut self, grid: &Grid<Cell>);
    /// Called once per cell per frame, in grid traversal order.
    /// A system receiving a cell variant it has no rule for does nothing.
    fn update(&mut self, grid: &mut Grid<Cell>, pos: IjVector, clock: Clock);
    /// Called once at the end of each frame, after every `update`
    fn close(&mut self, grid: &mut Grid<Cell>);
}
