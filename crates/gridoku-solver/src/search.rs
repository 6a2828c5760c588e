//! Backtracking search with the minimum-remaining-values heuristic.

use gridoku_core::{Board, Position};
use log::{debug, trace};

use crate::{
    CancelToken, Outcome, SolverError,
    propagate::{self, Propagation},
};

/// Statistics collected during a solve.
///
/// # Examples
///
/// ```
/// use gridoku_core::Board;
/// use gridoku_solver::BacktrackSolver;
///
/// let board: Board = "
///     12345678_
///     _________
///     _________
///     _________
///     _________
///     _________
///     _________
///     _________
///     _________
/// "
/// .parse()?;
///
/// let (_outcome, stats) = BacktrackSolver::new().solve_with_stats(board)?;
/// assert!(stats.naked_singles() >= 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub(crate) naked_singles: usize,
    pub(crate) hidden_singles: usize,
    pub(crate) guesses: usize,
    pub(crate) backtracks: usize,
    pub(crate) max_depth: usize,
}

impl SearchStats {
    /// Returns the number of cells filled by the naked-single rule.
    #[must_use]
    pub fn naked_singles(&self) -> usize {
        self.naked_singles
    }

    /// Returns the number of cells filled by the hidden-single rule.
    #[must_use]
    pub fn hidden_singles(&self) -> usize {
        self.hidden_singles
    }

    /// Returns the number of speculative placements tried by the search.
    #[must_use]
    pub fn guesses(&self) -> usize {
        self.guesses
    }

    /// Returns the number of abandoned branches.
    #[must_use]
    pub fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Returns the deepest guess nesting reached, bounded by the number of
    /// empty cells.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns `true` if the solve needed guessing beyond propagation.
    #[must_use]
    pub fn guessed(&self) -> bool {
        self.guesses > 0
    }
}

/// A deterministic backtracking Sudoku solver.
///
/// The solver runs constraint propagation to a fixed point, then branches on
/// the empty cell with the fewest candidates, ties broken by lowest
/// (row, column) in row-major order, trying candidates in ascending order.
/// Each branch operates on its own copy of the board, so abandoning a branch
/// restores the prior candidate state exactly.
///
/// Given identical inputs the solver always explores the same tree, so
/// outcomes are reproducible.
///
/// # Examples
///
/// ```
/// use gridoku_core::Board;
/// use gridoku_solver::{BacktrackSolver, Outcome};
///
/// // The empty board is wildly under-constrained.
/// let solver = BacktrackSolver::new().check_uniqueness(true);
/// let outcome = solver.solve(Board::new())?;
/// assert_eq!(outcome, Outcome::MultipleSolutions);
/// # Ok::<(), gridoku_solver::SolverError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BacktrackSolver {
    check_uniqueness: bool,
    cancel: CancelToken,
}

impl BacktrackSolver {
    /// Creates a solver that returns the first solution found and never
    /// cancels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables uniqueness checking.
    ///
    /// With uniqueness checking the search continues past the first
    /// solution and reports [`Outcome::MultipleSolutions`] as soon as a
    /// second distinct one is found.
    #[must_use]
    pub fn check_uniqueness(mut self, enabled: bool) -> Self {
        self.check_uniqueness = enabled;
        self
    }

    /// Attaches a cancellation token, polled at the top of every search
    /// step.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Solves the board.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the board has duplicate
    /// givens; the search is never entered for such input.
    pub fn solve(&self, board: Board) -> Result<Outcome, SolverError> {
        self.solve_with_stats(board).map(|(outcome, _)| outcome)
    }

    /// Solves the board and reports search statistics.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the board has duplicate
    /// givens; the search is never entered for such input.
    pub fn solve_with_stats(&self, board: Board) -> Result<(Outcome, SearchStats), SolverError> {
        if !board.is_consistent() {
            return Err(SolverError::Inconsistent);
        }
        debug!(
            "solving: {} empty cells, uniqueness={}",
            board.empty_count(),
            self.check_uniqueness
        );

        let mut search = Search {
            cancel: &self.cancel,
            limit: if self.check_uniqueness { 2 } else { 1 },
            found: 0,
            first: None,
            stats: SearchStats::default(),
        };
        let flow = search.explore(board, 0);

        let outcome = match flow {
            Flow::Cancelled => Outcome::Cancelled,
            Flow::Done | Flow::Exhausted => match (search.found, search.first.take()) {
                (0, _) => Outcome::Unsolvable,
                (1, Some(solution)) => Outcome::Solved(solution),
                _ => Outcome::MultipleSolutions,
            },
        };
        debug!(
            "finished: {} solution(s), {} guesses, {} backtracks",
            search.found, search.stats.guesses, search.stats.backtracks
        );
        Ok((outcome, search.stats))
    }
}

/// Control flow of one search branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Enough solutions have been found; unwind the whole search.
    Done,
    /// This branch yielded nothing further; the caller tries its next
    /// candidate.
    Exhausted,
    /// The cancellation token tripped; unwind the whole search.
    Cancelled,
}

struct Search<'t> {
    cancel: &'t CancelToken,
    limit: usize,
    found: usize,
    first: Option<Board>,
    stats: SearchStats,
}

impl Search<'_> {
    fn explore(&mut self, mut board: Board, depth: usize) -> Flow {
        if self.cancel.is_cancelled() {
            return Flow::Cancelled;
        }
        self.stats.max_depth = self.stats.max_depth.max(depth);

        match propagate::run(&mut board, &mut self.stats) {
            Propagation::Contradiction => return Flow::Exhausted,
            Propagation::Solved => return self.record_solution(board),
            Propagation::Stalled => {}
        }

        let Some(pos) = most_constrained(&board) else {
            return Flow::Exhausted;
        };
        let candidates = board.candidates(pos);
        trace!("depth {depth}: branching on {pos}, candidates {candidates:?}");
        for digit in candidates {
            let mut branch = board.clone();
            if branch.place(pos, digit).is_err() {
                continue;
            }
            self.stats.guesses += 1;
            match self.explore(branch, depth + 1) {
                Flow::Exhausted => self.stats.backtracks += 1,
                flow => return flow,
            }
        }
        Flow::Exhausted
    }

    fn record_solution(&mut self, board: Board) -> Flow {
        self.found += 1;
        if self.first.is_none() {
            self.first = Some(board);
        }
        if self.found >= self.limit {
            Flow::Done
        } else {
            Flow::Exhausted
        }
    }
}

/// Returns the empty cell with the fewest candidates, ties broken by
/// row-major order. `None` on a complete board.
fn most_constrained(board: &Board) -> Option<Position> {
    let mut best: Option<(Position, usize)> = None;
    for pos in board.empty_positions() {
        let len = board.candidates(pos).len();
        if best.is_none_or(|(_, n)| len < n) {
            best = Some((pos, len));
            // After propagation stalls no empty cell has fewer than two
            // candidates, so two cannot be beaten.
            if len <= 2 {
                break;
            }
        }
    }
    best.map(|(pos, _)| pos)
}
