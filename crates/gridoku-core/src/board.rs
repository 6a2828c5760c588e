//! The 9×9 board with incremental candidate tracking.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{digit::Digit, digit_set::DigitSet, house::House, position::Position};

/// A 9×9 Sudoku board.
///
/// Each cell holds either a digit or nothing. Alongside the cells, the board
/// keeps one used-digit mask per row, column, and box, so that the candidate
/// set of any empty cell is a constant-time query: the complement of the
/// union of the three masks covering that cell.
///
/// In a consistent state no two cells of the same row, column, or box hold
/// equal digits. [`Board::place`] preserves consistency by construction;
/// boards parsed from text may be inconsistent and are screened with
/// [`Board::is_consistent`] before solving.
///
/// # Examples
///
/// ```
/// use gridoku_core::{Board, Digit, DigitSet, Position};
///
/// let mut board = Board::new();
/// board.place(Position::new(0, 0), Digit::D5)?;
///
/// // The filled cell has no candidates; its peers have lost digit 5.
/// assert_eq!(board.candidates(Position::new(0, 0)), DigitSet::EMPTY);
/// assert!(!board.candidates(Position::new(8, 0)).contains(Digit::D5));
/// assert!(board.candidates(Position::new(8, 8)).contains(Digit::D5));
/// # Ok::<(), gridoku_core::PlaceError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Digit>; 81],
    rows: [DigitSet; 9],
    columns: [DigitSet; 9],
    boxes: [DigitSet; 9],
    filled: u8,
}

/// Error returned by [`Board::place`] when a placement would violate the
/// board's constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    /// The target cell already holds a digit.
    #[display("cell {position} already holds {digit}")]
    Occupied {
        /// The target cell.
        position: Position,
        /// The digit it already holds.
        digit: Digit,
    },
    /// The digit already occurs in the cell's row, column, or box.
    #[display("digit {digit} conflicts with a peer of {position}")]
    Conflict {
        /// The target cell.
        position: Position,
        /// The rejected digit.
        digit: Digit,
    },
}

impl Board {
    /// Creates an empty board with all candidates available everywhere.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [None; 81],
            rows: [DigitSet::EMPTY; 9],
            columns: [DigitSet::EMPTY; 9],
            boxes: [DigitSet::EMPTY; 9],
            filled: 0,
        }
    }

    /// Returns the digit at a position, or `None` for an empty cell.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[pos.cell_index()]
    }

    /// Places a digit in an empty cell.
    ///
    /// The used-digit masks of the cell's row, column, and box are updated,
    /// so subsequent [`Board::candidates`] queries reflect the placement.
    ///
    /// # Errors
    ///
    /// - [`PlaceError::Occupied`] if the cell already holds a digit.
    /// - [`PlaceError::Conflict`] if the digit already occurs among the
    ///   cell's peers.
    pub fn place(&mut self, pos: Position, digit: Digit) -> Result<(), PlaceError> {
        if let Some(held) = self.get(pos) {
            return Err(PlaceError::Occupied {
                position: pos,
                digit: held,
            });
        }
        if self.used_around(pos).contains(digit) {
            return Err(PlaceError::Conflict {
                position: pos,
                digit,
            });
        }
        self.write(pos, digit);
        Ok(())
    }

    /// Reverts a cell to empty, returning the digit it held.
    ///
    /// The candidate state of the cell's peers is restored exactly; clearing
    /// an already-empty cell is a no-op.
    pub fn clear(&mut self, pos: Position) -> Option<Digit> {
        let digit = self.cells[pos.cell_index()].take()?;
        self.filled -= 1;
        self.rebuild_mask(House::Row { y: pos.y() });
        self.rebuild_mask(House::Column { x: pos.x() });
        self.rebuild_mask(House::Box {
            index: pos.box_index(),
        });
        Some(digit)
    }

    /// Returns the candidate set for a position.
    ///
    /// For an empty cell this is {1..9} minus the digits held by its row,
    /// column, and box peers; for a filled cell it is the empty set. The
    /// query has no side effects and is idempotent.
    #[must_use]
    pub fn candidates(&self, pos: Position) -> DigitSet {
        if self.get(pos).is_some() {
            DigitSet::EMPTY
        } else {
            !self.used_around(pos)
        }
    }

    /// Returns `true` if no empty cells remain.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.filled == 81
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        usize::from(81 - self.filled)
    }

    /// Returns `true` if no two cells of any row, column, or box hold equal
    /// digits.
    ///
    /// Used to reject puzzles with duplicate givens before solving begins;
    /// boards mutated only through [`Board::place`] stay consistent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        for house in House::ALL {
            let mut seen = DigitSet::EMPTY;
            for pos in house.positions() {
                if let Some(digit) = self.get(pos) {
                    if seen.contains(digit) {
                        return false;
                    }
                    seen.insert(digit);
                }
            }
        }
        true
    }

    /// Returns an iterator over the empty positions in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> {
        Position::all().filter(|pos| self.get(*pos).is_none())
    }

    /// Stores a digit without constraint checks.
    ///
    /// Used by the parser, which must be able to represent inconsistent
    /// givens for [`Board::is_consistent`] to report on. The masks are sets,
    /// so duplicate digits in a house degrade candidate queries but never
    /// corrupt them.
    pub(crate) fn write(&mut self, pos: Position, digit: Digit) {
        debug_assert!(self.get(pos).is_none());
        self.cells[pos.cell_index()] = Some(digit);
        self.filled += 1;
        self.rows[usize::from(pos.y())].insert(digit);
        self.columns[usize::from(pos.x())].insert(digit);
        self.boxes[usize::from(pos.box_index())].insert(digit);
    }

    fn used_around(&self, pos: Position) -> DigitSet {
        self.rows[usize::from(pos.y())]
            | self.columns[usize::from(pos.x())]
            | self.boxes[usize::from(pos.box_index())]
    }

    fn rebuild_mask(&mut self, house: House) {
        let mask = house
            .positions()
            .filter_map(|pos| self.get(pos))
            .collect::<DigitSet>();
        match house {
            House::Row { y } => self.rows[usize::from(y)] = mask,
            House::Column { x } => self.columns[usize::from(x)] = mask,
            House::Box { index } => self.boxes[usize::from(index)] = mask,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({self})")
    }
}

/// Error returned when puzzle text cannot be parsed into a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// The text did not contain exactly 81 cells.
    #[display("expected 81 cells, found {found}")]
    WrongCellCount {
        /// Number of cells found.
        found: usize,
    },
    /// The text contained a character that is not a digit, a placeholder,
    /// or ignorable decoration.
    #[display("invalid character {character:?} in grid text")]
    InvalidCharacter {
        /// The offending character.
        character: char,
    },
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses puzzle text into a board.
    ///
    /// Digits 1-9 are givens; `.`, `_`, and `0` are empty cells. Whitespace
    /// and the `-`/`|` ruling of decorated grids are ignored, so both the
    /// compact 81-character form and pretty-printed grids parse. Exactly 81
    /// cells are required.
    ///
    /// Parsing validates shape, not consistency: a board with duplicate
    /// givens parses successfully and is reported by
    /// [`Board::is_consistent`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut count = 0_usize;
        for character in s.chars() {
            if character.is_whitespace() || matches!(character, '-' | '|') {
                continue;
            }
            let cell = match character.to_digit(10) {
                Some(0) => None,
                #[expect(clippy::cast_possible_truncation)]
                Some(value) => Some(Digit::from_value(value as u8)),
                None if matches!(character, '.' | '_') => None,
                None => return Err(ParseBoardError::InvalidCharacter { character }),
            };
            if count < 81 {
                if let Some(digit) = cell {
                    #[expect(clippy::cast_possible_truncation)]
                    let pos = Position::new((count % 9) as u8, (count / 9) as u8);
                    board.write(pos, digit);
                }
            }
            count += 1;
        }
        if count != 81 {
            return Err(ParseBoardError::WrongCellCount { found: count });
        }
        Ok(board)
    }
}

impl Display for Board {
    /// Renders the compact 81-character form: digits for filled cells, `.`
    /// for empty ones, in row-major order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in Position::all() {
            match self.get(pos) {
                Some(digit) => write!(f, "{digit}")?,
                None => f.write_str(".")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_board_has_all_candidates() {
        let board = Board::new();
        for pos in Position::all() {
            assert_eq!(board.candidates(pos), DigitSet::FULL);
        }
        assert!(!board.is_complete());
        assert_eq!(board.empty_count(), 81);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_place_updates_peer_candidates() {
        let mut board = Board::new();
        board.place(Position::new(4, 4), Digit::D5).unwrap();

        // Same row, same column, same box
        assert!(!board.candidates(Position::new(0, 4)).contains(Digit::D5));
        assert!(!board.candidates(Position::new(4, 8)).contains(Digit::D5));
        assert!(!board.candidates(Position::new(3, 3)).contains(Digit::D5));
        // Unrelated cell keeps the candidate
        assert!(board.candidates(Position::new(0, 0)).contains(Digit::D5));
        // Other digits survive in peers
        assert!(board.candidates(Position::new(0, 4)).contains(Digit::D1));
    }

    #[test]
    fn test_place_rejects_occupied_cell() {
        let mut board = Board::new();
        let pos = Position::new(2, 3);
        board.place(pos, Digit::D1).unwrap();

        assert_eq!(
            board.place(pos, Digit::D2),
            Err(PlaceError::Occupied {
                position: pos,
                digit: Digit::D1,
            })
        );
    }

    #[test]
    fn test_place_rejects_peer_conflict() {
        let mut board = Board::new();
        board.place(Position::new(0, 0), Digit::D7).unwrap();

        // Row peer
        assert_eq!(
            board.place(Position::new(8, 0), Digit::D7),
            Err(PlaceError::Conflict {
                position: Position::new(8, 0),
                digit: Digit::D7,
            })
        );
        // Column peer
        assert!(board.place(Position::new(0, 8), Digit::D7).is_err());
        // Box peer
        assert!(board.place(Position::new(1, 1), Digit::D7).is_err());
        // A different digit in the same row is fine
        assert!(board.place(Position::new(8, 0), Digit::D8).is_ok());
    }

    #[test]
    fn test_clear_restores_candidates() {
        let mut board = Board::new();
        let pos = Position::new(4, 4);
        board.place(pos, Digit::D5).unwrap();
        assert_eq!(board.clear(pos), Some(Digit::D5));

        assert_eq!(board.candidates(pos), DigitSet::FULL);
        assert!(board.candidates(Position::new(0, 4)).contains(Digit::D5));
        assert_eq!(board.empty_count(), 81);

        // Clearing an empty cell is a no-op
        assert_eq!(board.clear(pos), None);
    }

    #[test]
    fn test_clear_keeps_other_placements() {
        let mut board = Board::new();
        board.place(Position::new(0, 0), Digit::D1).unwrap();
        board.place(Position::new(8, 0), Digit::D2).unwrap();
        board.clear(Position::new(0, 0));

        // Digit 2 is still excluded from row 0 by the remaining placement.
        assert!(!board.candidates(Position::new(4, 0)).contains(Digit::D2));
        assert!(board.candidates(Position::new(4, 0)).contains(Digit::D1));
    }

    #[test]
    fn test_candidates_empty_for_filled_cell() {
        let mut board = Board::new();
        let pos = Position::new(6, 2);
        board.place(pos, Digit::D9).unwrap();
        assert_eq!(board.candidates(pos), DigitSet::EMPTY);
    }

    #[test]
    fn test_candidates_idempotent() {
        let mut board = Board::new();
        board.place(Position::new(3, 3), Digit::D4).unwrap();
        let pos = Position::new(3, 4);
        assert_eq!(board.candidates(pos), board.candidates(pos));
    }

    #[test]
    fn test_is_consistent_detects_duplicate_givens() {
        // Two 5s in row 0
        let board: Board = "5...5....\
                            .........\
                            .........\
                            .........\
                            .........\
                            .........\
                            .........\
                            .........\
                            ........."
            .parse()
            .unwrap();
        assert!(!board.is_consistent());
    }

    #[test]
    fn test_is_consistent_detects_duplicates_in_column_and_box() {
        let mut in_column = Board::new();
        in_column.write(Position::new(3, 0), Digit::D6);
        in_column.write(Position::new(3, 8), Digit::D6);
        assert!(!in_column.is_consistent());

        let mut in_box = Board::new();
        in_box.write(Position::new(0, 0), Digit::D6);
        in_box.write(Position::new(2, 2), Digit::D6);
        assert!(!in_box.is_consistent());
    }

    #[test]
    fn test_parse_compact_form() {
        let text =
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
        let board: Board = text.parse().unwrap();
        assert_eq!(board.get(Position::new(0, 0)), Some(Digit::D5));
        assert_eq!(board.get(Position::new(1, 0)), Some(Digit::D3));
        assert_eq!(board.get(Position::new(2, 0)), None);
        assert_eq!(board.get(Position::new(4, 1)), Some(Digit::D9));
        assert_eq!(board.empty_count(), 81 - 30);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_parse_decorated_form() {
        let decorated = "
            -------------------------
            | 5 3 _ | _ 7 _ | _ _ _ |
            | 6 _ _ | 1 9 5 | _ _ _ |
            | _ 9 8 | _ _ _ | _ 6 _ |
            -------------------------
            | 8 _ _ | _ 6 _ | _ _ 3 |
            | 4 _ _ | 8 _ 3 | _ _ 1 |
            | 7 _ _ | _ 2 _ | _ _ 6 |
            -------------------------
            | _ 6 _ | _ _ _ | 2 8 _ |
            | _ _ _ | 4 1 9 | _ _ 5 |
            | _ _ _ | _ 8 _ | _ 7 9 |
            -------------------------
        ";
        let compact =
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
        let board: Board = decorated.parse().unwrap();
        assert_eq!(board, compact.parse().unwrap());
    }

    #[test]
    fn test_parse_rejects_wrong_cell_count() {
        assert_eq!(
            "123".parse::<Board>(),
            Err(ParseBoardError::WrongCellCount { found: 3 })
        );
        let too_many = ".".repeat(82);
        assert_eq!(
            too_many.parse::<Board>(),
            Err(ParseBoardError::WrongCellCount { found: 82 })
        );
    }

    #[test]
    fn test_parse_rejects_invalid_character() {
        let text = "x".repeat(81);
        assert_eq!(
            text.parse::<Board>(),
            Err(ParseBoardError::InvalidCharacter { character: 'x' })
        );
    }

    #[test]
    fn test_display_round_trip() {
        let text =
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
        let board: Board = text.parse().unwrap();
        let rendered = board.to_string();
        assert_eq!(rendered.len(), 81);
        assert_eq!(rendered.parse::<Board>().unwrap(), board);
        assert_eq!(rendered, text.replace('0', "."));
    }

    /// Reference definition of the candidate set: {1..9} minus the digits
    /// held by the cell's 20 peers, computed without the incremental masks.
    fn peer_union_candidates(board: &Board, pos: Position) -> DigitSet {
        let mut used = DigitSet::EMPTY;
        for house in [
            House::Row { y: pos.y() },
            House::Column { x: pos.x() },
            House::Box {
                index: pos.box_index(),
            },
        ] {
            for peer in house.positions() {
                if peer == pos {
                    continue;
                }
                if let Some(digit) = board.get(peer) {
                    used.insert(digit);
                }
            }
        }
        !used
    }

    proptest! {
        /// After any sequence of placements and clears, the incremental
        /// candidate masks agree with the peer-union definition.
        #[test]
        fn prop_candidates_match_peer_union(
            ops in prop::collection::vec((0_u8..9, 0_u8..9, 1_u8..=9, prop::bool::ANY), 0..120),
        ) {
            let mut board = Board::new();
            for (x, y, value, clear) in ops {
                let pos = Position::new(x, y);
                if clear {
                    board.clear(pos);
                } else {
                    let _ = board.place(pos, Digit::from_value(value));
                }
            }
            prop_assert!(board.is_consistent());
            for pos in Position::all() {
                if board.get(pos).is_none() {
                    prop_assert_eq!(board.candidates(pos), peer_union_candidates(&board, pos));
                } else {
                    prop_assert_eq!(board.candidates(pos), DigitSet::EMPTY);
                }
            }
        }

        /// Display output always parses back to an equal board.
        #[test]
        fn prop_display_parse_round_trip(
            ops in prop::collection::vec((0_u8..9, 0_u8..9, 1_u8..=9), 0..60),
        ) {
            let mut board = Board::new();
            for (x, y, value) in ops {
                let _ = board.place(Position::new(x, y), Digit::from_value(value));
            }
            let reparsed: Board = board.to_string().parse().unwrap();
            prop_assert_eq!(reparsed, board);
        }
    }
}
