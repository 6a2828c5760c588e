//! Core grid model for the gridoku Sudoku solver.
//!
//! This crate provides the data structures shared by the solving engine and
//! the command-line front end:
//!
//! - [`Digit`]: type-safe representation of Sudoku digits 1-9
//! - [`Position`]: board coordinates with box arithmetic
//! - [`DigitSet`]: a candidate set of digits, backed by a 9-bit mask
//! - [`House`]: rows, columns, and 3×3 boxes
//! - [`Board`]: the 9×9 board with incremental candidate tracking
//!
//! # Examples
//!
//! ```
//! use gridoku_core::{Board, Digit, Position};
//!
//! let mut board = Board::new();
//! board.place(Position::new(4, 4), Digit::D5)?;
//!
//! // 5 is no longer a candidate anywhere in row 4, column 4, or the
//! // center box.
//! assert!(!board.candidates(Position::new(4, 0)).contains(Digit::D5));
//! # Ok::<(), gridoku_core::PlaceError>(())
//! ```

pub mod board;
pub mod digit;
pub mod digit_set;
pub mod house;
pub mod position;

pub use self::{
    board::{Board, ParseBoardError, PlaceError},
    digit::Digit,
    digit_set::DigitSet,
    house::House,
    position::Position,
};

/// Error returned when a raw value falls outside its Sudoku domain.
///
/// This is produced by the fallible conversions ([`Digit::try_from`] and
/// [`Position::try_new`]) used at the input-validation boundary. Trusted
/// in-crate call sites use the panicking constructors instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum OutOfRangeError {
    /// A digit value outside 1-9.
    #[display("digit value {value} is out of range 1-9")]
    Digit {
        /// The rejected value.
        value: u8,
    },
    /// A coordinate outside 0-8.
    #[display("coordinate {value} is out of range 0-8")]
    Coordinate {
        /// The rejected value.
        value: u8,
    },
}
