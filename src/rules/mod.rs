//! The rules hook: everything a concrete game decides that the board does not.
//!
//! The board only knows geometry. Whether a geometrically valid move is
//! allowed, what happens to a figure that gets beaten, and when a turn or a
//! game ends are all answered here.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::board::{Board, League, Outcome, Position};
use crate::figure::{Figure, MoveTemplate};

/// What happens to the figure standing on the destination of a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Disposition {
    /// The beaten figure leaves the board.
    Discard,
    /// The beaten figure takes the mover's old cell.
    SwapBack,
}

/// What a committed move means for the turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnEnd {
    /// The same league moves again.
    Continue,
    NextTurn,
    GameOver(Outcome),
}

pub trait Rules: Send + Sync + fmt::Debug {
    /// Extra legality for a move whose path is geometrically valid.
    /// Returning false cancels the move.
    fn moving(
        &self,
        _board: &Board,
        _figure: &Figure,
        _template: &MoveTemplate,
        _destination: Position,
    ) -> bool {
        true
    }

    /// Called before the mover swaps into an occupied destination.
    fn beaten(&self, _board: &Board, _mover: &Figure, _occupant: &Figure) -> Disposition {
        Disposition::SwapBack
    }

    /// Called after a move has been committed; `figure` is the mover at its
    /// new position.
    fn moved(&self, _board: &Board, _figure: &Figure) -> TurnEnd {
        TurnEnd::NextTurn
    }
}

/// Allows every geometrically valid move. Beaten figures swap back and the
/// turn passes after every move.
#[derive(Clone, Copy, Debug, Default)]
pub struct Permissive;

impl Rules for Permissive {}

/// Beats only figures of an opposing player and discards them. A league is
/// the winner by elimination once no other league has a movable figure.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpposingBeats;

impl Rules for OpposingBeats {
    fn moving(
        &self,
        board: &Board,
        figure: &Figure,
        _template: &MoveTemplate,
        destination: Position,
    ) -> bool {
        if destination == figure.position() {
            return true;
        }
        match board.figure(destination).filter(|occupant| !occupant.is_empty()) {
            None => true,
            Some(occupant) => match occupant.league() {
                League::Player(_) => occupant.league() != figure.league(),
                League::Nobody => false,
            },
        }
    }

    fn beaten(&self, _board: &Board, _mover: &Figure, _occupant: &Figure) -> Disposition {
        Disposition::Discard
    }

    fn moved(&self, board: &Board, _figure: &Figure) -> TurnEnd {
        let remaining: FxHashSet<League> = board
            .figures()
            .filter(|figure| figure.can_move())
            .map(Figure::league)
            .collect();

        match remaining.len() {
            0 => TurnEnd::GameOver(Outcome::Draw),
            1 if board.players() > 1 => match remaining.into_iter().next() {
                Some(winner) => TurnEnd::GameOver(Outcome::WonByElimination(winner)),
                None => TurnEnd::NextTurn,
            },
            _ => TurnEnd::NextTurn,
        }
    }
}
