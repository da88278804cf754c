//! The seams of the search: what it evaluates, how it breaks ties at the root,
//! and where successors come from.

use crate::board::{Board, BoardError};

use super::{Choice, SearchError, SearchStats};

/// Scores a board from the point of view of the player searching.
/// Higher is better for the maximizer.
pub trait Utility {
    fn utility(&self, board: &Board) -> f64;
}

impl<F> Utility for F
where
    F: Fn(&Board) -> f64,
{
    fn utility(&self, board: &Board) -> f64 {
        self(board)
    }
}

/// Decides at the root whether `candidate` replaces the current `best`.
/// Inner nodes never consult it; they compare raw values.
pub trait Preference {
    fn prefers(&mut self, candidate: &Choice, best: &Choice) -> bool;

    /// Whether `prefers` must see the exact value of every root child. Only a
    /// preference that never takes a tie can make do with upper bounds for
    /// children that cannot beat the current best.
    fn needs_exact_values(&self) -> bool {
        true
    }
}

impl<F> Preference for F
where
    F: FnMut(&Choice, &Choice) -> bool,
{
    fn prefers(&mut self, candidate: &Choice, best: &Choice) -> bool {
        self(candidate, best)
    }
}

/// The first choice with the highest utility wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrictlyGreater;

impl Preference for StrictlyGreater {
    fn prefers(&mut self, candidate: &Choice, best: &Choice) -> bool {
        candidate.utility() > best.utility()
    }

    fn needs_exact_values(&self) -> bool {
        false
    }
}

/// Produces the successors of a board. Games with a faster move generator
/// than [`Board::expand`] plug it in here.
pub trait Expander {
    fn expand(&mut self, board: &Board) -> Result<Vec<Choice>, BoardError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BoardExpander;

impl Expander for BoardExpander {
    fn expand(&mut self, board: &Board) -> Result<Vec<Choice>, BoardError> {
        board.expand()
    }
}

/// A strategy that picks a move for the league to move.
pub trait AdversarySearch {
    /// The best choice for the side to move, or `None` when it has no move.
    fn solve(&mut self, board: &Board) -> Result<Option<Choice>, SearchError>;

    /// Statistics of the most recent `solve`.
    fn stats(&self) -> &SearchStats;
}
