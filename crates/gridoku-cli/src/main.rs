//! Command-line front end for the gridoku Sudoku solver.
//!
//! Reads a puzzle from a file or an inline string, hands it to the solving
//! engine, and renders the result. Exit codes: 0 solved, 1 no solution,
//! 2 invalid input, 3 timed out or cancelled, 4 multiple solutions.

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use clap::Parser;
use gridoku_core::{Board, Position};
use gridoku_solver::{BacktrackSolver, CancelToken, Outcome};
use log::info;

/// 9x9 Sudoku solver.
///
/// Puzzles are plain text: digits 1-9 for givens; '.', '_', or '0' for empty
/// cells. Whitespace and the -/| ruling of decorated grids are ignored.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path of the puzzle text file to solve.
    #[arg(value_name = "FILE", required_unless_present = "grid")]
    file: Option<PathBuf>,

    /// Solve an inline puzzle string instead of a file.
    #[arg(short, long, value_name = "GRID", conflicts_with = "file")]
    grid: Option<String>,

    /// Also check whether the solution is unique.
    #[arg(short, long)]
    unique: bool,

    /// Give up after this many seconds.
    #[arg(short, long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Append the solution to a file.
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,
}

const EXIT_UNSOLVABLE: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_CANCELLED: u8 = 3;
const EXIT_MULTIPLE_SOLUTIONS: u8 = 4;

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    run(&Args::parse())
}

fn run(args: &Args) -> ExitCode {
    let text = match read_puzzle(args) {
        Ok(text) => text,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    };
    let board: Board = match text.parse() {
        Ok(board) => board,
        Err(err) => {
            eprintln!("invalid puzzle: {err}");
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    };
    info!("parsed puzzle with {} givens", 81 - board.empty_count());

    let mut solver = BacktrackSolver::new().check_uniqueness(args.unique);
    if let Some(seconds) = args.timeout {
        solver = solver.with_cancel_token(CancelToken::with_timeout(Duration::from_secs(seconds)));
    }

    let outcome = match solver.solve(board) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("invalid puzzle: {err}");
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    };
    match outcome {
        Outcome::Solved(solution) => {
            print!("{}", render(&solution));
            if let Some(path) = &args.out {
                if let Err(err) = append_solution(path, &solution) {
                    eprintln!("cannot write {}: {err}", path.display());
                    return ExitCode::from(EXIT_INVALID_INPUT);
                }
            }
            ExitCode::SUCCESS
        }
        Outcome::Unsolvable => {
            println!("no solution exists");
            ExitCode::from(EXIT_UNSOLVABLE)
        }
        Outcome::MultipleSolutions => {
            println!("multiple solutions exist");
            ExitCode::from(EXIT_MULTIPLE_SOLUTIONS)
        }
        Outcome::Cancelled => {
            println!("gave up: time limit reached");
            ExitCode::from(EXIT_CANCELLED)
        }
    }
}

fn read_puzzle(args: &Args) -> Result<String, String> {
    match (&args.grid, &args.file) {
        (Some(grid), _) => Ok(grid.clone()),
        (None, Some(path)) => fs::read_to_string(path)
            .map_err(|err| format!("cannot read {}: {err}", path.display())),
        (None, None) => Err("no puzzle given".to_owned()),
    }
}

const RULE: &str = "-------------------------";

/// Renders a board with box ruling, one digit per column.
fn render(board: &Board) -> String {
    let mut out = String::new();
    for y in 0..9 {
        if y % 3 == 0 {
            out.push_str(RULE);
            out.push('\n');
        }
        for x in 0..9 {
            if x % 3 == 0 {
                out.push_str("| ");
            }
            match board.get(Position::new(x, y)) {
                Some(digit) => out.push(char::from(b'0' + digit.value())),
                None => out.push('.'),
            }
            out.push(' ');
        }
        out.push_str("|\n");
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

fn append_solution(path: &Path, board: &Board) -> io::Result<()> {
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(render(board).as_bytes())?;
    file.write_all(b"\n")
}
