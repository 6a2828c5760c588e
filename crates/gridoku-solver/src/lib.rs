//! Solving engine for gridoku.
//!
//! The engine combines two phases:
//!
//! 1. **Constraint propagation** — naked and hidden singles applied to a
//!    fixed point. Order of application does not affect the fixed point
//!    reached.
//! 2. **Backtracking search** — when propagation stalls, the engine
//!    branches on the empty cell with the fewest candidates
//!    (minimum-remaining-values), trying candidates in ascending order.
//!
//! Both phases are deterministic, so identical inputs always produce
//! identical outcomes. Uniqueness detection and cooperative cancellation are
//! available through [`BacktrackSolver`]'s builder methods.
//!
//! # Examples
//!
//! ```
//! use gridoku_core::Board;
//! use gridoku_solver::{BacktrackSolver, Outcome};
//!
//! let board: Board = "
//!     53_ _7_ ___
//!     6__ 195 ___
//!     _98 ___ _6_
//!     8__ _6_ __3
//!     4__ 8_3 __1
//!     7__ _2_ __6
//!     _6_ ___ 28_
//!     ___ 419 __5
//!     ___ _8_ _79
//! "
//! .parse()?;
//!
//! match BacktrackSolver::new().solve(board)? {
//!     Outcome::Solved(solution) => assert!(solution.is_complete()),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use gridoku_core::Board;

pub use self::{
    cancel::CancelToken,
    search::{BacktrackSolver, SearchStats},
};

mod cancel;
mod propagate;
mod search;

/// The terminal result of a solve.
///
/// `Unsolvable` and `MultipleSolutions` are valid outcomes, not errors: a
/// contradictory puzzle legitimately has no completion, and an
/// under-constrained one has many. Only malformed input
/// ([`SolverError::Inconsistent`]) is reported as an error, before any
/// search step runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The puzzle has a completion; for a unique-solution puzzle this is
    /// the canonical (deterministically first) one.
    Solved(Board),
    /// No completion satisfies the constraints.
    Unsolvable,
    /// At least two distinct completions exist. Only produced when
    /// uniqueness checking is enabled.
    MultipleSolutions,
    /// The cancellation token tripped before the search finished.
    Cancelled,
}

impl Outcome {
    /// Returns the solved board, if this outcome carries one.
    #[must_use]
    pub fn solution(&self) -> Option<&Board> {
        match self {
            Outcome::Solved(board) => Some(board),
            _ => None,
        }
    }
}

/// Error returned when a solve cannot start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolverError {
    /// The input board has duplicate givens in a row, column, or box.
    ///
    /// Distinct from [`Outcome::Unsolvable`]: an inconsistent board is
    /// rejected before solving begins and never searched.
    #[display("the board contains conflicting givens")]
    Inconsistent,
}
