//! Grid coordinate type.

/// A signed grid coordinate.
/// i is the row axis, 0 at the logical bottom of the grid,
///   gravity pulls towards decreasing i
/// j is the column axis, 0 at the left edge
///
/// Coordinates are signed so neighbor arithmetic at the grid edges never
/// needs a branch; the grid accessors answer "no cell" for anything
/// out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IjVector {
    pub i: i64,
    pub j: i64,
}

impl IjVector {
    pub const fn new(i: i64, j: i64) -> Self {
        Self { i, j }
    }

    /// The cell directly below (towards the grid bottom).
    pub const fn below(&self) -> Self {
        Self::new(self.i - 1, self.j)
    }
    /// The cell directly above.
    pub const fn above(&self) -> Self {
        Self::new(self.i + 1, self.j)
    }
    pub const fn left(&self) -> Self {
        Self::new(self.i, self.j - 1)
    }
    pub const fn right(&self) -> Self {
        Self::new(self.i, self.j + 1)
    }
    pub const fn below_left(&self) -> Self {
        Self::new(self.i - 1, self.j - 1)
    }
    pub const fn below_right(&self) -> Self {
        Self::new(self.i - 1, self.j + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors() {
        let pos = IjVector::new(3, 5);
        assert_eq!(pos.below(), IjVector::new(2, 5));
        assert_eq!(pos.above(), IjVector::new(4, 5));
        assert_eq!(pos.left(), IjVector::new(3, 4));
        assert_eq!(pos.right(), IjVector::new(3, 6));
        assert_eq!(pos.below_left(), IjVector::new(2, 4));
        assert_eq!(pos.below_right(), IjVector::new(2, 6));
    }

    #[test]
    fn test_neighbors_go_negative_at_the_origin() {
        let origin = IjVector::new(0, 0);
        assert_eq!(origin.below(), IjVector::new(-1, 0));
        assert_eq!(origin.left(), IjVector::new(0, -1));
    }
}
