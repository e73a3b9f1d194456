use crate::input::Direction;

/// Grid position in terminal cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring location one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
        }
    }
}

/// Grid dimensions, border ring included.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the cell at the centre of the grid.
    #[must_use]
    pub fn center(self) -> Location {
        Location::new(i32::from(self.width / 2), i32::from(self.height / 2))
    }

    /// Returns true when `location` is strictly inside the border ring.
    ///
    /// Anything on the outermost row/column or beyond is not traversable.
    #[must_use]
    pub fn is_interior(self, location: Location) -> bool {
        location.x > 0
            && location.y > 0
            && location.x < i32::from(self.width) - 1
            && location.y < i32::from(self.height) - 1
    }

    /// Returns true when the grid has no interior cell at all.
    #[must_use]
    pub fn has_no_interior(self) -> bool {
        self.width < 3 || self.height < 3
    }
}
