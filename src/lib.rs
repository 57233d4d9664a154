//! Discrete falling-material simulation on a 2-D cell grid.
//!
//! The engine advances a grid of cells one frame at a time through three
//! systems applied in a fixed order: gravity (straight fall), granular
//! (fall and slide, sand-like piling) and liquid (a conservative flow
//! model with compression and settling). Rendering, input and frame
//! pacing are the caller's job; the crate exposes [`world::World`] for
//! painting cells and stepping the simulation.

pub mod cells;
pub mod systems;
pub mod util;
pub mod world;
