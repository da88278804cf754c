mod cli;

use structopt::StructOpt;

use cli::commands::Command;
use cli::Gameboard;

fn main() {
    env_logger::init();
    #[cfg(feature = "instrumentation")]
    gameboard::instrumentation::init_tracing();

    Gameboard::from_args().execute();
}
