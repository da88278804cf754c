//! Figures and the moves they can make.

pub mod path;
pub mod template;


use std::sync::Arc;

use log::debug;
use smallvec::SmallVec;
use thiserror::Error;

use crate::board::{Board, Direction, FigureKind, League, Position};

pub use path::PathError;
pub use template::{MoveTemplate, StepCode, TemplateError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FigureError {
    #[error("figure at {position} can never move")]
    Immovable { position: Position },
    #[error("template {template:?} is not a legal move for the figure at {position}")]
    IllegalTemplate { template: String, position: Position },
    #[error("figure claims {position} but the board holds something else there")]
    NotOnBoard { position: Position },
    #[error(transparent)]
    Path(#[from] PathError),
}

/// A template that currently leads somewhere, with the cell it leads to.
#[derive(Clone, Debug, PartialEq)]
pub struct PossibleMove {
    pub template: MoveTemplate,
    pub destination: Position,
}

pub type PossibleMoves = SmallVec<[PossibleMove; 8]>;

/// A figure on a board. The board owns its figures by value; the figure's
/// stored position always agrees with the cell holding it.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    league: League,
    kind: FigureKind,
    position: Position,
    facing: Direction,
    moves: Arc<[MoveTemplate]>,
}

impl Figure {
    pub fn new(
        league: League,
        kind: FigureKind,
        facing: Direction,
        moves: impl Into<Arc<[MoveTemplate]>>,
    ) -> Self {
        Self {
            league,
            kind,
            position: Position::default(),
            facing,
            moves: moves.into(),
        }
    }

    /// A placeholder figure that occupies nothing and never moves.
    pub fn empty() -> Self {
        Self::new(
            League::Nobody,
            FigureKind::EMPTY,
            Direction::North,
            Vec::<MoveTemplate>::new(),
        )
    }

    /// An immovable figure that blocks cells but belongs to nobody.
    pub fn obstacle(kind: FigureKind) -> Self {
        Self::new(League::Nobody, kind, Direction::North, Vec::<MoveTemplate>::new())
    }

    pub fn league(&self) -> League {
        self.league
    }

    pub fn kind(&self) -> FigureKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn moves(&self) -> &[MoveTemplate] {
        &self.moves
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    pub fn can_move(&self) -> bool {
        !self.league.is_nobody() && !self.is_empty()
    }

    pub fn is_legal(&self, template: &MoveTemplate) -> bool {
        self.moves.iter().any(|legal| legal == template)
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn set_facing(&mut self, facing: Direction) {
        self.facing = facing;
    }

    /// Every legal template that currently reaches a destination on `board`,
    /// in template order.
    pub fn possible_moves(&self, board: &Board) -> Result<PossibleMoves, FigureError> {
        self.ensure_movable(board)?;

        let mut reachable = PossibleMoves::new();
        for template in self.moves.iter() {
            if let Some(destination) =
                path::destination(board, self.position, self.facing, template)?
            {
                reachable.push(PossibleMove {
                    template: template.clone(),
                    destination,
                });
            }
        }
        Ok(reachable)
    }

    /// Checks whether `template` can be performed right now and returns its
    /// destination. The board's rules get the final word through
    /// [`Rules::moving`](crate::rules::Rules::moving); a veto yields `Ok(None)`
    /// just like a blocked path.
    pub fn move_figure(
        &self,
        board: &Board,
        template: &MoveTemplate,
    ) -> Result<Option<Position>, FigureError> {
        self.ensure_movable(board)?;
        if !self.is_legal(template) {
            return Err(FigureError::IllegalTemplate {
                template: template.code(),
                position: self.position,
            });
        }

        let destination = match path::destination(board, self.position, self.facing, template)? {
            Some(destination) => destination,
            None => return Ok(None),
        };

        if !board.rules().moving(board, self, template, destination) {
            debug!(
                "rules vetoed {} from {} to {}",
                template, self.position, destination
            );
            return Ok(None);
        }
        Ok(Some(destination))
    }

    fn ensure_movable(&self, board: &Board) -> Result<(), FigureError> {
        if !self.can_move() {
            return Err(FigureError::Immovable {
                position: self.position,
            });
        }
        if board.figure(self.position) != Some(self) {
            return Err(FigureError::NotOnBoard {
                position: self.position,
            });
        }
        Ok(())
    }
}
