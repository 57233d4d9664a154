//! A simple 2d grid type backed by the ndarray crate.
//!
//! All coordinate-taking methods accept signed [`IjVector`]s and treat
//! out-of-range coordinates as defined behavior: getters answer `None`
//! and mutators are silent no-ops. Per-cell rules at the grid edges
//! therefore need no boundary branching.
#![warn(missing_docs)]

use itertools::iproduct;

use super::vectors::IjVector;

/// A simple 2d grid type
#[derive(Clone, Debug)]
pub struct Grid<T>(ndarray::Array2<T>);

/* =================
 * Initialization
 * ================= */
impl<T> Grid<T> {
    /// Create a new grid filled with one value
    pub fn new_fill(width: usize, height: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self(ndarray::Array2::from_elem((height, width), value))
    }
    /// Create a new grid with the given width and height, filled with default values
    pub fn new_empty(width: usize, height: usize) -> Self
    where
        T: Default,
    {
        Self(ndarray::Array2::from_shape_simple_fn(
            (height, width),
            Default::default,
        ))
    }
}

/* ======================================
 * Simple Getters
 * Access basic attributes of the struct
 * ====================================== */
impl<T> Grid<T> {
    /// Get the width of the grid
    pub fn width(&self) -> usize {
        self.0.shape()[1]
    }
    /// Get the height of the grid
    pub fn height(&self) -> usize {
        self.0.shape()[0]
    }
    /// Get the total number of cells in the grid
    pub fn total_size(&self) -> usize {
        self.0.len()
    }
}

/* ======================================
 * Position Based Accessors
 * ====================================== */
impl<T> Grid<T> {
    /// Whether the coordinate addresses a cell of this grid
    pub fn in_bounds(&self, pos: IjVector) -> bool {
        pos.i >= 0 && pos.j >= 0 && (pos.i as usize) < self.height() && (pos.j as usize) < self.width()
    }
    /// Translate a signed coordinate into an ndarray index, if in bounds
    fn index_of(&self, pos: IjVector) -> Option<[usize; 2]> {
        if self.in_bounds(pos) {
            Some([pos.i as usize, pos.j as usize])
        } else {
            None
        }
    }
    /// Gets the value at the given coordinate, or `None` if out of bounds
    pub fn get(&self, pos: IjVector) -> Option<&T> {
        self.index_of(pos).map(|idx| &self.0[idx])
    }
    /// Gets the value at the given coordinate mutably, or `None` if out of bounds
    pub fn get_mut(&mut self, pos: IjVector) -> Option<&mut T> {
        self.index_of(pos).map(|idx| &mut self.0[idx])
    }
    /// Sets the value at the given coordinate, overwriting the old value.
    /// No-op if the coordinate is out of bounds.
    pub fn set(&mut self, pos: IjVector, value: T) {
        if let Some(idx) = self.index_of(pos) {
            self.0[idx] = value;
        }
    }
    /// Exchanges the values at the two coordinates.
    /// No-op unless both coordinates are in bounds.
    pub fn swap(&mut self, a: IjVector, b: IjVector) {
        if let (Some(idx_a), Some(idx_b)) = (self.index_of(a), self.index_of(b)) {
            self.0.swap(idx_a, idx_b);
        }
    }
    /// Resets every cell to the default value
    pub fn clear(&mut self)
    where
        T: Default,
    {
        self.0.map_inplace(|cell| *cell = T::default());
    }
}

/* ======================================
 * Iteration
 * ====================================== */
impl<T> Grid<T> {
    /// Every in-bounds coordinate in traversal order: rows ascending from
    /// the bottom row, columns ascending within a row.
    ///
    /// The iterator owns its ranges, so it can be held across mutation of
    /// the grid it was created from (the systems rely on this).
    pub fn positions(&self) -> impl Iterator<Item = IjVector> + 'static {
        let (height, width) = (self.height() as i64, self.width() as i64);
        iproduct!(0..height, 0..width).map(|(i, j)| IjVector::new(i, j))
    }

    /// Iterate over the cells in traversal order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}
