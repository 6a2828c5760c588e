//! Rows, columns, and 3×3 boxes.

use crate::position::Position;

/// A Sudoku house (row, column, or 3×3 box).
///
/// Houses are the units over which the uniqueness constraint applies: every
/// digit occurs at most once per house. The 20 peers of a cell are exactly
/// the other members of its three houses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum House {
    /// A row identified by its y coordinate (0-8).
    Row {
        /// Row index (0-8).
        y: u8,
    },
    /// A column identified by its x coordinate (0-8).
    Column {
        /// Column index (0-8).
        x: u8,
    },
    /// A 3×3 box identified by its index (0-8, left to right, top to bottom).
    Box {
        /// Box index (0-8).
        index: u8,
    },
}

impl House {
    /// Array containing all rows (0-8).
    pub const ROWS: [Self; 9] = {
        let mut rows = [Self::Row { y: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            rows[i] = Self::Row { y: i as u8 };
            i += 1;
        }
        rows
    };

    /// Array containing all columns (0-8).
    pub const COLUMNS: [Self; 9] = {
        let mut columns = [Self::Column { x: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            columns[i] = Self::Column { x: i as u8 };
            i += 1;
        }
        columns
    };

    /// Array containing all boxes (0-8).
    pub const BOXES: [Self; 9] = {
        let mut boxes = [Self::Box { index: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            boxes[i] = Self::Box { index: i as u8 };
            i += 1;
        }
        boxes
    };

    /// Array containing all houses in row, column, box order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row { y: 0 }; 27];
        let mut i = 0;
        while i < 9 {
            all[i] = Self::ROWS[i];
            all[i + 9] = Self::COLUMNS[i];
            all[i + 18] = Self::BOXES[i];
            i += 1;
        }
        all
    };

    /// Converts a cell index within the house (0-8) into an absolute
    /// [`Position`].
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in the range 0-8.
    #[must_use]
    #[inline]
    pub const fn position_from_cell_index(self, i: u8) -> Position {
        assert!(i < 9);
        match self {
            House::Row { y } => Position::new(i, y),
            House::Column { x } => Position::new(x, i),
            House::Box { index } => Position::from_box(index, i),
        }
    }

    /// Returns an iterator over the nine positions of this house.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..9).map(move |i| self.position_from_cell_index(i))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_constant_tables() {
        assert_eq!(House::ROWS[3], House::Row { y: 3 });
        assert_eq!(House::COLUMNS[5], House::Column { x: 5 });
        assert_eq!(House::BOXES[8], House::Box { index: 8 });
        assert_eq!(House::ALL.len(), 27);
        assert_eq!(House::ALL[0], House::Row { y: 0 });
        assert_eq!(House::ALL[9], House::Column { x: 0 });
        assert_eq!(House::ALL[18], House::Box { index: 0 });
    }

    #[test]
    fn test_positions_are_distinct() {
        for house in House::ALL {
            let positions: HashSet<_> = house.positions().collect();
            assert_eq!(positions.len(), 9, "{house:?}");
        }
    }

    #[test]
    fn test_row_and_column_positions() {
        let row: Vec<_> = House::Row { y: 4 }.positions().collect();
        assert!(row.iter().all(|pos| pos.y() == 4));

        let column: Vec<_> = House::Column { x: 7 }.positions().collect();
        assert!(column.iter().all(|pos| pos.x() == 7));
    }

    #[test]
    fn test_box_positions() {
        let positions: Vec<_> = House::Box { index: 4 }.positions().collect();
        assert!(
            positions
                .iter()
                .all(|pos| (3..6).contains(&pos.x()) && (3..6).contains(&pos.y()))
        );
    }

    #[test]
    fn test_every_position_has_three_houses() {
        // Each position must appear in exactly one row, one column, one box.
        for pos in Position::all() {
            let containing = House::ALL
                .iter()
                .filter(|house| house.positions().any(|p| p == pos))
                .count();
            assert_eq!(containing, 3, "{pos}");
        }
    }
}
