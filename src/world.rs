//! The world driver: owns the grid and the system pipeline, advances one
//! frame at a time, and exposes the paint/query surface the input and
//! render layers work through.

use std::time::Duration;

use crate::cells::cell::{Cell, CellType};
use crate::systems::granular::GranularSystem;
use crate::systems::gravity::GravitySystem;
use crate::systems::liquid::LiquidSystem;
use crate::systems::System;
use crate::util::clock::Clock;
use crate::util::grid::Grid;
use crate::util::vectors::IjVector;

/// Run the three-phase pipeline once over the grid.
///
/// Per frame: `setup` on every system, then for every cell in traversal
/// order `update` on every system in sequence, then `close` on every
/// system. The clock is threaded through explicitly so callers control
/// frame parity; the engine holds no ambient state.
pub fn advance_frame(grid: &mut Grid<Cell>, systems: &mut [Box<dyn System>], clock: Clock) {
    for system in systems.iter_mut() {
        system.setup(grid);
    }
    for pos in grid.positions() {
        for system in systems.iter_mut() {
            system.update(grid, pos, clock);
        }
    }
    for system in systems.iter_mut() {
        system.close(grid);
    }
}

/// A sand-box world: one grid, one clock, the fixed
/// gravity → granular → liquid pipeline.
pub struct World {
    grid: Grid<Cell>,
    systems: Vec<Box<dyn System>>,
    clock: Clock,
}

impl World {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: Grid::new_empty(width, height),
            systems: vec![
                Box::new(GravitySystem),
                Box::new(GranularSystem),
                Box::new(LiquidSystem::new()),
            ],
            clock: Clock::new(),
        }
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Advance the simulation by one frame
    pub fn advance_frame(&mut self, delta: Duration) {
        self.clock.update(delta);
        advance_frame(&mut self.grid, &mut self.systems, self.clock);
    }

    /// Paint a fresh cell of the given type. No-op outside the grid.
    pub fn place(&mut self, pos: IjVector, cell_type: CellType) {
        self.grid.set(pos, cell_type.create(self.clock));
    }

    /// The cell at the given position, or `None` outside the grid
    pub fn cell(&self, pos: IjVector) -> Option<&Cell> {
        self.grid.get(pos)
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Total liquid amount across the grid
    pub fn total_liquid(&self) -> f32 {
        self.grid
            .iter()
            .filter_map(Cell::as_liquid)
            .map(|cell| cell.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::systems::liquid::{COMPRESSION_MAX, LIQUID_MAX, LIQUID_MIN};

    const FRAME: Duration = Duration::from_millis(16);

    fn frame_step(world: &mut World) {
        world.advance_frame(FRAME);
    }

    mod gravity {
        use super::*;

        /// A lone falling cell over an empty grid descends exactly one
        /// row per frame.
        #[test]
        fn test_reaches_the_floor_in_exactly_five_frames() {
            let mut world = World::new(5, 10);
            world.place(IjVector::new(5, 2), CellType::Stone);

            for expected_row in (1..=5).rev() {
                assert_eq!(
                    world.cell(IjVector::new(expected_row, 2)),
                    Some(&Cell::Gravity),
                    "before falling from row {expected_row}"
                );
                frame_step(&mut world);
            }
            assert_eq!(world.cell(IjVector::new(0, 2)), Some(&Cell::Gravity));

            // And it stays put.
            frame_step(&mut world);
            assert_eq!(world.cell(IjVector::new(0, 2)), Some(&Cell::Gravity));
        }
    }

    mod granular {
        use super::*;

        /// A single grain dropped onto a flat solid floor comes to rest
        /// directly on the floor, with no sideways drift.
        #[test]
        fn test_single_grain_lands_straight_down() {
            let mut world = World::new(7, 8);
            for j in 0..7 {
                world.place(IjVector::new(0, j), CellType::Wall);
            }
            world.place(IjVector::new(6, 3), CellType::Sand);

            for _ in 0..20 {
                frame_step(&mut world);
            }
            assert_eq!(
                world.cell(IjVector::new(1, 3)).map(Cell::cell_type),
                Some(CellType::Sand)
            );
            // Nothing drifted into the neighboring columns.
            assert!(world.cell(IjVector::new(1, 2)).unwrap().is_empty());
            assert!(world.cell(IjVector::new(1, 4)).unwrap().is_empty());
        }

        /// Grains keep piling instead of stacking into a single column.
        #[test]
        fn test_three_grains_form_a_pile() {
            let mut world = World::new(7, 8);
            for j in 0..7 {
                world.place(IjVector::new(0, j), CellType::Wall);
            }
            for _ in 0..3 {
                world.place(IjVector::new(6, 3), CellType::Sand);
                for _ in 0..10 {
                    frame_step(&mut world);
                }
            }
            let resting: Vec<IjVector> = world
                .grid()
                .positions()
                .filter(|&pos| {
                    world.cell(pos).map(Cell::cell_type) == Some(CellType::Sand)
                })
                .collect();
            assert_eq!(resting.len(), 3);
            // All three grains sit in the two rows above the floor.
            assert!(resting.iter().all(|pos| pos.i <= 2));
        }
    }

    mod liquid {
        use super::*;

        /// In a closed box the total amount never grows, and shrinks at
        /// most by the per-cell evaporation bound each frame.
        #[test]
        fn test_conservation_is_bounded_in_a_closed_box() {
            let mut rng = StdRng::seed_from_u64(42);
            let mut world = World::new(12, 12);
            for j in 0..12 {
                world.place(IjVector::new(0, j), CellType::Wall);
                world.place(IjVector::new(11, j), CellType::Wall);
            }
            for i in 0..12 {
                world.place(IjVector::new(i, 0), CellType::Wall);
                world.place(IjVector::new(i, 11), CellType::Wall);
            }
            let mut liquid_cells = 0;
            for i in 1..11 {
                for j in 1..11 {
                    if rng.gen_bool(0.4) {
                        world.place(IjVector::new(i, j), CellType::Water);
                        liquid_cells += 1;
                    }
                }
            }
            assert!(liquid_cells > 0);

            let mut total = world.total_liquid();
            for _ in 0..50 {
                frame_step(&mut world);
                let next = world.total_liquid();
                // Blank copies can raise the liquid cell count, but the
                // 10x10 interior bounds it.
                let leak_bound = 100.0 * LIQUID_MIN;
                assert!(next <= total + 1e-3, "liquid appeared from nowhere");
                assert!(next >= total - leak_bound, "leaked more than the bound");
                total = next;
                for pos in world.grid().positions() {
                    if let Some(cell) = world.cell(pos).and_then(Cell::as_liquid) {
                        assert!(cell.amount >= 0.0, "negative amount at {pos:?}");
                    }
                }
            }
        }

        /// A column of water poured into a walled basin flattens out and
        /// every cell ends at most slightly compressed.
        #[test]
        fn test_pool_flattens_below_compression_ceiling() {
            let mut world = World::new(8, 8);
            for j in 0..8 {
                world.place(IjVector::new(0, j), CellType::Wall);
            }
            for i in 0..8 {
                world.place(IjVector::new(i, 0), CellType::Wall);
                world.place(IjVector::new(i, 7), CellType::Wall);
            }
            for i in 1..5 {
                world.place(IjVector::new(i, 4), CellType::Water);
            }

            for _ in 0..200 {
                frame_step(&mut world);
            }
            for pos in world.grid().positions() {
                if let Some(cell) = world.cell(pos).and_then(Cell::as_liquid) {
                    assert!(
                        cell.amount <= LIQUID_MAX + COMPRESSION_MAX + 1e-3,
                        "over-compressed cell at {pos:?}: {}",
                        cell.amount
                    );
                }
            }
        }

        /// Dense material dropped into a settled pool sinks to the floor
        /// and displaces the liquid upward.
        #[test]
        fn test_falling_stone_displaces_a_settled_pool() {
            let mut world = World::new(3, 6);
            for j in 0..3 {
                world.place(IjVector::new(0, j), CellType::Wall);
            }
            for i in 0..3 {
                world.place(IjVector::new(i, 0), CellType::Wall);
                world.place(IjVector::new(i, 2), CellType::Wall);
            }
            world.place(IjVector::new(1, 1), CellType::Water);
            for _ in 0..20 {
                frame_step(&mut world);
            }
            assert!(world
                .cell(IjVector::new(1, 1))
                .and_then(Cell::as_liquid)
                .is_some_and(|cell| cell.settled()));

            world.place(IjVector::new(5, 1), CellType::Stone);
            for _ in 0..10 {
                frame_step(&mut world);
            }
            // The stone sank to the floor, displacing the water upward.
            assert_eq!(world.cell(IjVector::new(1, 1)), Some(&Cell::Gravity));
            assert!(world
                .cell(IjVector::new(2, 1))
                .and_then(Cell::as_liquid)
                .is_some_and(|cell| cell.amount > 0.5));
        }
    }

    mod driver {
        use super::*;

        #[test]
        fn test_place_and_query() {
            let mut world = World::new(4, 4);
            world.place(IjVector::new(2, 2), CellType::Sand);
            assert_eq!(
                world.cell(IjVector::new(2, 2)).map(Cell::cell_type),
                Some(CellType::Sand)
            );
            // Out-of-bounds painting is a silent no-op.
            world.place(IjVector::new(9, 9), CellType::Sand);
            assert!(world.cell(IjVector::new(9, 9)).is_none());
        }

        #[test]
        fn test_clear_resets_to_empty() {
            let mut world = World::new(4, 4);
            world.place(IjVector::new(1, 1), CellType::Water);
            world.place(IjVector::new(2, 2), CellType::Wall);
            world.clear();
            assert!(world.grid().iter().all(Cell::is_empty));
            assert_eq!(world.total_liquid(), 0.0);
        }

        #[test]
        fn test_clock_advances_with_frames() {
            let mut world = World::new(2, 2);
            assert_eq!(world.clock().get_current_frame(), 0);
            frame_step(&mut world);
            frame_step(&mut world);
            assert_eq!(world.clock().get_current_frame(), 2);
        }
    }
}
