//! Best move command - search the best move from a position.

use std::path::PathBuf;

use gameboard::board::League;
use gameboard::evaluate::MaterialCount;
use gameboard::search::{AdversarySearch, AlphaBetaPruning};
use structopt::StructOpt;

use super::util::load_board;
use super::Command;

#[derive(StructOpt)]
pub struct BestMoveArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(long = "setup", parse(from_os_str))]
    pub setup: Option<PathBuf>,
    #[structopt(long = "turn", help = "League to move, overriding the setup")]
    pub turn: Option<League>,
}

impl Command for BestMoveArgs {
    fn execute(self) {
        let mut board = load_board(self.setup.as_deref());
        if let Some(turn) = self.turn {
            board.set_turn(turn);
        }

        let mut search = AlphaBetaPruning::new(self.depth, MaterialCount::new(board.turn()));
        match search.solve(&board) {
            Ok(Some(choice)) => {
                println!("{}", choice);
                let stats = search.stats();
                println!(
                    "{} nodes, {} cutoffs, {} evaluations in {:?}",
                    stats.nodes(),
                    stats.cutoffs(),
                    stats.evaluations(),
                    stats.last_duration().unwrap_or_default()
                );
            }
            Ok(None) => eprintln!("{} has no valid move in the given position.", board.turn()),
            Err(err) => eprintln!("Failed to calculate best move: {}", err),
        }
    }
}
