//! Watch command - watch the computer play against itself.

use std::path::PathBuf;
use std::time::Duration;

use gameboard::board::League;
use gameboard::game::{Game, TurnReport};
use gameboard::search::ProbabilisticConfig;
use structopt::StructOpt;

use super::util::{computer, load_board};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(long = "setup", parse(from_os_str))]
    pub setup: Option<PathBuf>,
    #[structopt(long = "max-turns", default_value = "100")]
    pub max_turns: usize,
    #[structopt(long = "probabilistic")]
    pub probabilistic: bool,
    #[structopt(long = "seed", help = "Seed for the probabilistic search")]
    pub seed: Option<u64>,
    #[structopt(long = "improve", default_value = "1.0")]
    pub improve_probability: f64,
    #[structopt(long = "fluctuate", default_value = "0.0")]
    pub fluctuate_probability: f64,
    #[structopt(
        long = "threshold",
        default_value = "0.0",
        allow_hyphen_values = true,
        help = "Non-positive utility distance within which a move may be taken by fluctuation"
    )]
    pub fluctuate_threshold: f64,
    #[structopt(
        long = "delay",
        default_value = "0",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
}

impl WatchArgs {
    fn randomness(&self) -> Option<ProbabilisticConfig> {
        if !self.probabilistic {
            return None;
        }
        Some(ProbabilisticConfig {
            improve_probability: self.improve_probability,
            fluctuate_probability: self.fluctuate_probability,
            fluctuate_threshold: self.fluctuate_threshold,
        })
    }
}

impl Command for WatchArgs {
    fn execute(self) {
        let board = load_board(self.setup.as_deref());
        let players = board.players();
        let mut game = Game::new(board);
        for n in 1..=players {
            let seed = self.seed.map(|seed| seed.wrapping_add(u64::from(n)));
            game.join(
                League::Player(n),
                computer(League::Player(n), self.depth, self.randomness(), seed),
            );
        }

        println!("{}\n", game.board());
        while game.turns() < self.max_turns {
            match game.play_turn() {
                Ok(TurnReport::Moved(choice)) => {
                    println!("{}: {}", game.turns(), choice);
                    println!("{}\n", game.board());
                }
                Ok(TurnReport::NoMoves(league)) => {
                    println!("{} cannot move", league);
                    return;
                }
                Ok(TurnReport::Over(outcome)) => {
                    println!("{}", outcome);
                    return;
                }
                Err(err) => {
                    eprintln!("Game aborted: {}", err);
                    std::process::exit(1);
                }
            }
            std::thread::sleep(Duration::from_millis(self.delay_ms));
        }
        println!("Stopped after {} turns", self.max_turns);
    }
}
