//! The liquid flow system: a stable, locally conservative flow
//! approximation with compression and settling.

use super::System;
use crate::cells::cell::Cell;
use crate::cells::liquid::{FlowDirection, LiquidCell};
use crate::util::clock::Clock;
use crate::util::grid::Grid;
use crate::util::vectors::IjVector;

/// Nominal full level of a liquid cell
pub const LIQUID_MAX: f32 = 1.0;
/// Amounts below this count as no liquid at all and are snapped to zero
pub const LIQUID_MIN: f32 = 0.005;
/// How far a column may exceed the nominal level before overflowing upward
pub const COMPRESSION_MAX: f32 = 0.25;
/// Smallest downward flow eligible for speed scaling
pub const FLOW_MIN: f32 = 0.005;
/// Largest amount a single flow may move
pub const FLOW_MAX: f32 = 4.0;
/// Scale applied to flows between already-wet cells
pub const FLOW_SPEED: f32 = 1.0;
/// Frames without net flow before a cell settles
pub const SETTLE_THRESHOLD: u32 = 10;

/// The level the lower cell of a vertical pair holds at equilibrium.
///
/// Up to a combined amount of `LIQUID_MAX` the lower cell absorbs
/// everything; between that and a doubly-full compressed pair the level
/// rises linearly, weighted by `COMPRESSION_MAX`; beyond it the pair
/// splits the excess evenly.
fn vertical_flow_value(remaining: f32, destination: f32) -> f32 {
    let sum = remaining + destination;
    if sum <= LIQUID_MAX {
        LIQUID_MAX
    } else if sum < 2.0 * LIQUID_MAX + COMPRESSION_MAX {
        (LIQUID_MAX * LIQUID_MAX + sum * COMPRESSION_MAX) / (LIQUID_MAX + COMPRESSION_MAX)
    } else {
        (sum + COMPRESSION_MAX) / 2.0
    }
}

/// Moves liquid between neighboring cells once per frame, in fixed
/// priority order: down, left, right, up.
///
/// Flows computed during `update` are recorded in a per-frame diff
/// buffer, not applied; `close` commits them all at once. Every cell's
/// update therefore reads a consistent pre-frame state and traversal
/// order cannot bias the relaxation.
#[derive(Debug)]
pub struct LiquidSystem {
    diffs: Grid<f32>,
}

impl Default for LiquidSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl LiquidSystem {
    pub fn new() -> Self {
        Self {
            diffs: Grid::new_fill(0, 0, 0.0),
        }
    }

    fn add_diff(&mut self, pos: IjVector, delta: f32) {
        if let Some(diff) = self.diffs.get_mut(pos) {
            *diff += delta;
        }
    }

    /// The target's current amount, if liquid may flow there. An empty
    /// target is converted in place to a same-kind blank so the commit
    /// phase has a cell to fill.
    fn flow_target(grid: &mut Grid<Cell>, pos: IjVector, blank: &LiquidCell) -> Option<f32> {
        match grid.get(pos)? {
            Cell::Liquid(cell) => Some(cell.amount),
            Cell::Empty => {
                grid.set(pos, Cell::Liquid(blank.clone()));
                Some(0.0)
            }
            _ => None,
        }
    }

    /// Clamp a candidate flow and, if any liquid actually moves, record
    /// the matched pair of deltas, mark the source's flow direction and
    /// disturb the destination. Returns the source's remaining liquid.
    fn commit_flow(
        &mut self,
        grid: &mut Grid<Cell>,
        from: IjVector,
        to: IjVector,
        direction: FlowDirection,
        flow: f32,
        remaining: f32,
    ) -> f32 {
        let flow = flow.max(0.0).min(FLOW_MAX.min(remaining));
        if flow <= 0.0 {
            return remaining;
        }
        self.add_diff(from, -flow);
        self.add_diff(to, flow);
        if let Some(cell) = grid.get_mut(from).and_then(Cell::as_liquid_mut) {
            cell.flow.mark(direction);
        }
        if let Some(cell) = grid.get_mut(to).and_then(Cell::as_liquid_mut) {
            cell.set_settled(false);
        }
        remaining - flow
    }

    fn unsettle_neighbors(grid: &mut Grid<Cell>, pos: IjVector) {
        for neighbor in [pos.above(), pos.right(), pos.below(), pos.left()] {
            if let Some(cell) = grid.get_mut(neighbor).and_then(Cell::as_liquid_mut) {
                cell.set_settled(false);
            }
        }
    }
}

impl System for LiquidSystem {
    fn setup(&mut self, grid: &Grid<Cell>) {
        self.diffs = Grid::new_fill(grid.width(), grid.height(), 0.0);
    }

    fn update(&mut self, grid: &mut Grid<Cell>, pos: IjVector, _clock: Clock) {
        let (blank, start_value) = match grid.get_mut(pos) {
            Some(Cell::Liquid(cell)) => {
                cell.flow.reset();
                if cell.amount < LIQUID_MIN {
                    // Evaporate negligible residue.
                    cell.amount = 0.0;
                    return;
                }
                if cell.settled() {
                    return;
                }
                (cell.blank_copy(), cell.amount)
            }
            _ => return,
        };
        let mut remaining = start_value;

        // Down: pull the pair towards the compression equilibrium.
        let below = pos.below();
        if let Some(target) = Self::flow_target(grid, below, &blank) {
            let mut flow = vertical_flow_value(remaining, target) - target;
            if target > 0.0 && flow > FLOW_MIN {
                flow *= FLOW_SPEED;
            }
            remaining = self.commit_flow(grid, pos, below, FlowDirection::Bottom, flow, remaining);
        }
        if remaining < LIQUID_MIN {
            self.add_diff(pos, -remaining);
            return;
        }

        // Left: move a quarter of the level difference.
        let left = pos.left();
        if let Some(target) = Self::flow_target(grid, left, &blank) {
            let mut flow = (remaining - target) / 4.0;
            if flow > LIQUID_MIN {
                flow *= FLOW_SPEED;
            }
            remaining = self.commit_flow(grid, pos, left, FlowDirection::Left, flow, remaining);
        }
        if remaining < LIQUID_MIN {
            self.add_diff(pos, -remaining);
            return;
        }

        // Right: a third of the difference, evening out the left-first bias.
        let right = pos.right();
        if let Some(target) = Self::flow_target(grid, right, &blank) {
            let mut flow = (remaining - target) / 3.0;
            if flow > LIQUID_MIN {
                flow *= FLOW_SPEED;
            }
            remaining = self.commit_flow(grid, pos, right, FlowDirection::Right, flow, remaining);
        }
        if remaining < LIQUID_MIN {
            self.add_diff(pos, -remaining);
            return;
        }

        // Up: only what compression pushes past the equilibrium level.
        let above = pos.above();
        if let Some(target) = Self::flow_target(grid, above, &blank) {
            let mut flow = remaining - vertical_flow_value(remaining, target);
            if flow > LIQUID_MIN {
                flow *= FLOW_SPEED;
            }
            remaining = self.commit_flow(grid, pos, above, FlowDirection::Top, flow, remaining);
        }
        if remaining < LIQUID_MIN {
            self.add_diff(pos, -remaining);
            return;
        }

        if remaining == start_value {
            // No net flow this frame; freeze after enough quiet frames.
            if let Some(cell) = grid.get_mut(pos).and_then(Cell::as_liquid_mut) {
                if cell.tick_settle_count() >= SETTLE_THRESHOLD {
                    cell.flow.reset();
                    cell.set_settled(true);
                }
            }
        } else {
            // A changed cell can disturb previously settled neighbors.
            Self::unsettle_neighbors(grid, pos);
        }
    }

    fn close(&mut self, grid: &mut Grid<Cell>) {
        // Single bottom-up pass: a cell's lower neighbor is already
        // committed when read, its upper neighbor is not.
        for pos in grid.positions() {
            let diff = self.diffs.get(pos).copied().unwrap_or(0.0);
            match grid.get_mut(pos) {
                Some(Cell::Liquid(cell)) => {
                    cell.amount += diff;
                    if cell.amount < LIQUID_MIN {
                        cell.amount = 0.0;
                        cell.set_settled(false);
                    }
                    cell.size = cell.amount.min(1.0);
                }
                _ => continue,
            }
            // A cell draining into an undersaturated one below renders
            // empty; a cell fed from above renders full. Both avoid
            // flicker during fast vertical transfer.
            let bottom_undersaturated = grid
                .get(pos.below())
                .and_then(Cell::as_liquid)
                .is_some_and(|below| below.amount <= 0.99);
            let top_pouring = grid
                .get(pos.above())
                .and_then(Cell::as_liquid)
                .is_some_and(|above| {
                    above.amount > 0.05 || above.flow.get(FlowDirection::Bottom)
                });
            if let Some(cell) = grid.get_mut(pos).and_then(Cell::as_liquid_mut) {
                if bottom_undersaturated {
                    cell.size = 0.0;
                }
                if top_pouring {
                    cell.size = 1.0;
                }
            }
        }
    }
}
