//! Constraint propagation: naked and hidden singles, run to a fixed point.

use gridoku_core::{Board, DigitSet, House, Position};
use tinyvec::ArrayVec;

use crate::SearchStats;

/// Result of running propagation to its fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Propagation {
    /// Every cell is filled; the board is a solution.
    Solved,
    /// No single fires, but empty cells remain; the search must branch.
    Stalled,
    /// Some cell or digit has nowhere to go; the current assignment is
    /// unsatisfiable and the enclosing branch must be abandoned.
    Contradiction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Progress,
    NoChange,
    Contradiction,
}

/// Applies naked and hidden singles until neither makes progress.
///
/// The fixed point reached is independent of scanning order; only the work
/// done to reach it varies.
pub(crate) fn run(board: &mut Board, stats: &mut SearchStats) -> Propagation {
    loop {
        if board.is_complete() {
            return Propagation::Solved;
        }
        match naked_singles(board, stats) {
            Sweep::Contradiction => return Propagation::Contradiction,
            Sweep::Progress => continue,
            Sweep::NoChange => {}
        }
        match hidden_singles(board, stats) {
            Sweep::Contradiction => return Propagation::Contradiction,
            Sweep::Progress => {}
            Sweep::NoChange => return Propagation::Stalled,
        }
    }
}

/// Places every cell whose candidate set has exactly one member.
///
/// A cell with an empty candidate set is a contradiction.
fn naked_singles(board: &mut Board, stats: &mut SearchStats) -> Sweep {
    let mut progress = false;
    for pos in Position::all() {
        if board.get(pos).is_some() {
            continue;
        }
        let candidates = board.candidates(pos);
        if candidates.is_empty() {
            return Sweep::Contradiction;
        }
        if let Some(digit) = candidates.as_single() {
            if board.place(pos, digit).is_err() {
                return Sweep::Contradiction;
            }
            stats.naked_singles += 1;
            progress = true;
        }
    }
    if progress { Sweep::Progress } else { Sweep::NoChange }
}

/// Places every digit that has exactly one admitting cell in some house.
///
/// A digit missing from a house with no admitting cell is a contradiction.
fn hidden_singles(board: &mut Board, stats: &mut SearchStats) -> Sweep {
    let mut progress = false;
    for house in House::ALL {
        let mut placed = DigitSet::EMPTY;
        for pos in house.positions() {
            if let Some(digit) = board.get(pos) {
                placed.insert(digit);
            }
        }
        for digit in !placed {
            let mut spots: ArrayVec<[Position; 9]> = ArrayVec::new();
            for pos in house.positions() {
                if board.candidates(pos).contains(digit) {
                    spots.push(pos);
                }
            }
            match spots.as_slice() {
                [] => return Sweep::Contradiction,
                &[spot] => {
                    if board.place(spot, digit).is_err() {
                        return Sweep::Contradiction;
                    }
                    placed.insert(digit);
                    stats.hidden_singles += 1;
                    progress = true;
                }
                _ => {}
            }
        }
    }
    if progress { Sweep::Progress } else { Sweep::NoChange }
}
