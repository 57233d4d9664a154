//! Shared grid, coordinate and clock types.

pub mod clock;
pub mod grid;
pub mod vectors;
