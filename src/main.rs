use std::io::{self, Read};
use std::process::ExitCode;

use meander::Board;

fn main() -> ExitCode {
    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        eprintln!("failed to read stdin: {err}");
        return ExitCode::FAILURE;
    }

    let board = match Board::parse(&input) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("bad puzzle: {err}");
            return ExitCode::FAILURE;
        }
    };

    match board.solve() {
        Some(solution) => {
            print!("{solution}");
            ExitCode::SUCCESS
        }
        None => {
            println!("No unique spanning solution.");
            ExitCode::FAILURE
        }
    }
}
