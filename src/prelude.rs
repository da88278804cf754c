//! Common types re-exported for convenience.

pub use crate::board::{Board, BoardEvent, Direction, FigureKind, League, Outcome, Position};
pub use crate::evaluate::MaterialCount;
pub use crate::figure::{Figure, MoveTemplate};
pub use crate::game::{Computer, Game, Participant};
pub use crate::rules::{OpposingBeats, Permissive, Rules};
pub use crate::search::{
    AdversarySearch, AlphaBetaPruning, Choice, ProbabilisticAlphaBetaPruning, Utility,
};
pub use crate::setup::parse_setup;
