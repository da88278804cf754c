use thiserror::Error;

use crate::figure::FigureError;

use super::{Outcome, Position};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u16, height: u16 },
    #[error("position {position} is outside the board")]
    OutOfRange { position: Position },
    #[error("there is no figure at {position}")]
    NoFigure { position: Position },
    #[error("figure in cell {cell} believes it stands on {claimed}")]
    MisplacedFigure { cell: Position, claimed: Position },
    #[error("the game is already over: {outcome}")]
    GameOver { outcome: Outcome },
    #[error(transparent)]
    Figure(#[from] FigureError),
}
