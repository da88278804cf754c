//! Drives a game turn by turn over the authoritative board.
//!
//! Each league is played by a [`Participant`] that is asked once per turn for
//! the choice it wants to make. The game then commits that choice by
//! replaying its template on the real board; the board inside the choice is
//! only a hypothesis and is thrown away.

use log::{info, warn};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::board::{Board, BoardError, League, Outcome, Position};
use crate::search::{AdversarySearch, Choice, SearchError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("nobody plays for {league}")]
    NoParticipant { league: League },
    #[error("choice expected to reach {expected} but the board reached {actual:?}")]
    Diverged {
        expected: Position,
        actual: Option<Position>,
    },
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Anyone who can pick a move: a search, or something outside the core
/// that waits for a person.
pub trait Participant {
    fn choose(&mut self, board: &Board) -> Result<Option<Choice>, GameError>;
}

/// A participant that lets an [`AdversarySearch`] decide.
pub struct Computer<S> {
    search: S,
}

impl<S: AdversarySearch> Computer<S> {
    pub fn new(search: S) -> Self {
        Self { search }
    }

    pub fn search(&self) -> &S {
        &self.search
    }
}

impl<S: AdversarySearch> Participant for Computer<S> {
    fn choose(&mut self, board: &Board) -> Result<Option<Choice>, GameError> {
        Ok(self.search.solve(board)?)
    }
}

#[derive(Clone, Debug)]
pub enum TurnReport {
    Moved(Choice),
    /// The league to move had nothing to play.
    NoMoves(League),
    Over(Outcome),
}

pub struct Game {
    board: Board,
    participants: FxHashMap<League, Box<dyn Participant>>,
    turns: usize,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            participants: FxHashMap::default(),
            turns: 0,
        }
    }

    pub fn join(&mut self, league: League, participant: Box<dyn Participant>) -> &mut Self {
        self.participants.insert(league, participant);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Asks the league to move for its choice and commits it.
    pub fn play_turn(&mut self) -> Result<TurnReport, GameError> {
        if let Some(outcome) = self.board.outcome() {
            return Ok(TurnReport::Over(outcome));
        }

        let league = self.board.turn();
        let participant = self
            .participants
            .get_mut(&league)
            .ok_or(GameError::NoParticipant { league })?;
        let choice = match participant.choose(&self.board)? {
            Some(choice) => choice,
            None => {
                info!("{} has no move", league);
                return Ok(TurnReport::NoMoves(league));
            }
        };

        let reached = self.board.make_move(choice.source(), choice.template())?;
        if reached != Some(choice.destination()) {
            warn!(
                "{} from {} reached {:?} instead of {}",
                choice.template(),
                choice.source(),
                reached,
                choice.destination()
            );
            return Err(GameError::Diverged {
                expected: choice.destination(),
                actual: reached,
            });
        }

        self.turns += 1;
        info!("turn {}: {} plays {}", self.turns, league, choice);
        Ok(TurnReport::Moved(choice))
    }

    /// Plays until the game ends, someone cannot move, or `max_turns` turns
    /// have been played. Returns the outcome if the game ended.
    pub fn play(&mut self, max_turns: usize) -> Result<Option<Outcome>, GameError> {
        while self.turns < max_turns {
            match self.play_turn()? {
                TurnReport::Moved(_) => {}
                TurnReport::NoMoves(_) => break,
                TurnReport::Over(outcome) => return Ok(Some(outcome)),
            }
        }
        Ok(self.board.outcome())
    }
}
