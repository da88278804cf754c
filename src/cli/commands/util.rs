//! Shared utilities for CLI commands.

use std::fs;
use std::path::Path;
use std::process;

use gameboard::board::{Board, League};
use gameboard::evaluate::MaterialCount;
use gameboard::game::{Computer, Participant};
use gameboard::search::{AlphaBetaPruning, ProbabilisticAlphaBetaPruning, ProbabilisticConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub(crate) const DEFAULT_SETUP: &str = include_str!("../../../demos/skirmish.txt");

/// Reads and parses the setup, or the built-in one when no path is given.
/// Exits the process on failure.
pub(crate) fn load_board(setup: Option<&Path>) -> Board {
    let text = match setup {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("Failed to read {}: {}", path.display(), err);
                process::exit(1);
            }
        },
        None => DEFAULT_SETUP.to_string(),
    };

    match text.parse::<Board>() {
        Ok(board) => board,
        Err(err) => {
            eprintln!("Invalid setup: {}", err);
            process::exit(1);
        }
    }
}

/// Builds a computer player for `league`. With `randomness` the player
/// searches probabilistically, seeded from `seed` when given.
pub(crate) fn computer(
    league: League,
    depth: u8,
    randomness: Option<ProbabilisticConfig>,
    seed: Option<u64>,
) -> Box<dyn Participant> {
    let utility = MaterialCount::new(league);
    let randomness = match randomness {
        Some(randomness) => randomness,
        None => return Box::new(Computer::new(AlphaBetaPruning::new(depth, utility))),
    };

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    match ProbabilisticAlphaBetaPruning::new(depth, utility, rng).with_randomness(randomness) {
        Ok(search) => Box::new(Computer::new(search)),
        Err(err) => {
            eprintln!("Invalid randomness: {}", err);
            process::exit(1);
        }
    }
}
