use std::fmt;

use crate::figure::MoveTemplate;

use super::{FigureKind, League, Position};

/// How a game ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Won(League),
    /// The winner is the last league with movable figures left.
    WonByElimination(League),
    Draw,
}

impl Outcome {
    pub fn winner(&self) -> Option<League> {
        match self {
            Outcome::Won(league) | Outcome::WonByElimination(league) => Some(*league),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won(league) => write!(f, "{} wins", league),
            Outcome::WonByElimination(league) => write!(f, "{} wins by elimination", league),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum StateChange {
    EndOfTurn { next: League },
    EndOfGame(Outcome),
}

/// Changes a board reports to whoever drains its event queue.
/// The board records these but never acts on them.
#[derive(Clone, PartialEq, Debug)]
pub enum BoardEvent {
    FigurePlaced {
        position: Position,
        league: League,
        kind: FigureKind,
    },
    FigureRemoved {
        position: Position,
        league: League,
        kind: FigureKind,
    },
    MovePerformed {
        source: Position,
        destination: Position,
        template: MoveTemplate,
    },
    StateChanged(StateChange),
}
