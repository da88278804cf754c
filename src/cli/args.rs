//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{best_move::BestMoveArgs, watch::WatchArgs};

#[derive(StructOpt)]
#[structopt(
    name = "gameboard",
    about = "A rule-agnostic board game engine driven by move templates"
)]
pub enum Gameboard {
    #[structopt(
        name = "watch",
        about = "Watch the computer play against itself at the given `--depth` (default: 3). The position is read from a setup file given with `--setup` (default: a built-in skirmish). With `--probabilistic` both sides search with randomized alpha-beta pruning."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "best-move",
        about = "Search the best move for the league to move in the position given with `--setup` (default: a built-in skirmish) and print it with the search statistics."
    )]
    BestMove(BestMoveArgs),
}

impl crate::cli::commands::Command for Gameboard {
    fn execute(self) {
        match self {
            Self::Watch(cmd) => cmd.execute(),
            Self::BestMove(cmd) => cmd.execute(),
        }
    }
}
