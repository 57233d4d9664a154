//! The closed cell taxonomy and the paint-facing cell type enum.

use strum_macros::{Display, EnumIter};

use super::liquid::{LiquidCell, LiquidKind};
use crate::util::clock::Clock;

/// What occupies one grid location.
///
/// A closed sum type so the systems can match exhaustively; a system that
/// meets a variant it has no rule for simply leaves it alone.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Cell {
    /// Nothing here
    #[default]
    Empty,
    /// Static and immovable; blocks all fall and flow rules
    Solid,
    /// Falls straight down one cell per frame, through liquid
    Gravity,
    /// Falls and slides diagonally, piling like sand.
    /// The parity flag guarantees at most one movement evaluation per
    /// frame even when traversal revisits a swapped-into location.
    Granular { even_frame: bool },
    /// Flowing fluid
    Liquid(LiquidCell),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_liquid(&self) -> bool {
        matches!(self, Cell::Liquid(_))
    }

    /// Whether a falling cell may drop into this one (empty space, or
    /// liquid it displaces upward by the swap)
    pub fn is_displaceable(&self) -> bool {
        matches!(self, Cell::Empty | Cell::Liquid(_))
    }

    pub fn as_liquid(&self) -> Option<&LiquidCell> {
        match self {
            Cell::Liquid(cell) => Some(cell),
            _ => None,
        }
    }

    pub fn as_liquid_mut(&mut self) -> Option<&mut LiquidCell> {
        match self {
            Cell::Liquid(cell) => Some(cell),
            _ => None,
        }
    }

    /// The paint-facing type of this cell
    pub fn cell_type(&self) -> CellType {
        match self {
            Cell::Empty => CellType::Empty,
            Cell::Solid => CellType::Wall,
            Cell::Gravity => CellType::Stone,
            Cell::Granular { .. } => CellType::Sand,
            Cell::Liquid(cell) => match cell.kind() {
                LiquidKind::Water => CellType::Water,
                LiquidKind::Oil => CellType::Oil,
            },
        }
    }
}

/// The flat list of paintable cell types, for the input layer's picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum CellType {
    Empty,
    /// Immovable solid
    Wall,
    /// Dense rock: falls straight down, sinks through liquid
    Stone,
    Sand,
    Water,
    Oil,
}

impl CellType {
    /// Build a fresh cell of this type.
    ///
    /// Sand is stamped with the current frame parity so a cell painted
    /// mid-frame is not moved in the same frame it appeared; liquids are
    /// painted full.
    pub fn create(self, clock: Clock) -> Cell {
        match self {
            CellType::Empty => Cell::Empty,
            CellType::Wall => Cell::Solid,
            CellType::Stone => Cell::Gravity,
            CellType::Sand => Cell::Granular {
                even_frame: clock.even_frame(),
            },
            CellType::Water => Cell::Liquid(LiquidCell::new(LiquidKind::Water, 1.0)),
            CellType::Oil => Cell::Liquid(LiquidCell::new(LiquidKind::Oil, 1.0)),
        }
    }
}
