//! Adversary search over boards.
//!
//! Every strategy implements [`AdversarySearch`]: given the authoritative
//! board it returns the [`Choice`] it would play for the league to move. The
//! search never touches that board; each explored move lives on its own clone
//! inside the choice that produced it.
//!
//! The pieces a game plugs in are the [`Utility`] that scores boards beyond
//! the horizon, the root [`Preference`] and, optionally, a faster
//! [`Expander`] than [`Board::expand`](crate::board::Board::expand).

mod alpha_beta;
mod choice;
mod config;
mod minimax;
mod probabilistic;
mod stats;
mod traits;

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::board::BoardError;

pub use alpha_beta::AlphaBetaPruning;
pub use choice::Choice;
pub use config::{ConfigError, ProbabilisticConfig, SearchConfig};
pub use minimax::Minimax;
pub use probabilistic::ProbabilisticAlphaBetaPruning;
pub use stats::SearchStats;
pub use traits::{AdversarySearch, BoardExpander, Expander, Preference, StrictlyGreater, Utility};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("failed to expand a board: {0}")]
    Board(#[from] BoardError),
}
