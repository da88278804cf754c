//! Walks a move template over a board to find where it ends.
//!
//! This is the single source of truth for move geometry: enumerating a
//! figure's possible moves and committing one of them both go through
//! [`destination`].

use thiserror::Error;

use crate::board::{Board, Direction, Position};

use super::template::{MoveTemplate, StepCode};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("teleport steps are not implemented (template {template:?})")]
    TeleportUnsupported { template: String },
    #[error("slope in template {template:?} is not followed by two plain steps")]
    MalformedSlope { template: String },
}

/// Returns the cell the template leads to from `origin`, or `None` when the
/// path leaves the board or is blocked.
///
/// The figure standing on `origin` is considered lifted while the cursor
/// walks, so a template may pass over or return to its own starting cell.
pub fn destination(
    board: &Board,
    origin: Position,
    facing: Direction,
    template: &MoveTemplate,
) -> Result<Option<Position>, PathError> {
    let mut cursor = origin;
    let mut jumping = false;
    let mut beating = false;
    let mut steps = template.steps().iter();

    while let Some(step) = steps.next() {
        let target = match step {
            StepCode::Jump => {
                jumping = true;
                continue;
            }
            StepCode::Beat => {
                beating = true;
                continue;
            }
            StepCode::Teleport => {
                return Err(PathError::TeleportUnsupported {
                    template: template.code(),
                })
            }
            StepCode::Step(direction) => cursor.step(direction.rotate(facing)),
            StepCode::Slope => {
                let (first, second) = match (steps.next(), steps.next()) {
                    (Some(StepCode::Step(first)), Some(StepCode::Step(second))) => {
                        (*first, *second)
                    }
                    _ => {
                        return Err(PathError::MalformedSlope {
                            template: template.code(),
                        })
                    }
                };
                cursor.step(first.rotate(facing)).step(second.rotate(facing))
            }
        };

        if !admits(board, origin, target, jumping, beating) {
            return Ok(None);
        }
        cursor = target;
        jumping = false;
        beating = false;
    }

    Ok(Some(cursor))
}

/// Whether the cursor may land on `target` for one positional step.
fn admits(board: &Board, origin: Position, target: Position, jumping: bool, beating: bool) -> bool {
    if !board.in_range(target) {
        return false;
    }
    if jumping {
        return true;
    }
    let occupant = board
        .figure(target)
        .filter(|figure| target != origin && !figure.is_empty());
    match occupant {
        Some(_) => beating,
        None => !beating,
    }
}
