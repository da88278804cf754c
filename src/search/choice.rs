use std::cmp::Ordering;
use std::fmt;

use crate::board::{Board, Position};
use crate::figure::{Figure, MoveTemplate};

/// One candidate move: the template played from `source`, the private board
/// it produced, and the utility the search assigned to it.
///
/// Replaying `template` for the figure on `source` in the predecessor board
/// reaches `destination`.
#[derive(Clone, Debug)]
pub struct Choice {
    state: Board,
    source: Position,
    destination: Position,
    template: MoveTemplate,
    utility: f64,
}

impl Choice {
    /// The utility starts at zero until a search evaluates the choice.
    pub fn new(state: Board, source: Position, destination: Position, template: MoveTemplate) -> Self {
        Self {
            state,
            source,
            destination,
            template,
            utility: 0.0,
        }
    }

    pub fn state(&self) -> &Board {
        &self.state
    }

    pub fn into_state(self) -> Board {
        self.state
    }

    pub fn source(&self) -> Position {
        self.source
    }

    pub fn destination(&self) -> Position {
        self.destination
    }

    pub fn template(&self) -> &MoveTemplate {
        &self.template
    }

    /// The figure that moved, as it stands in the resulting state.
    pub fn figure(&self) -> Option<&Figure> {
        self.state.figure(self.destination)
    }

    pub fn utility(&self) -> f64 {
        self.utility
    }

    pub fn set_utility(&mut self, utility: f64) {
        self.utility = utility;
    }

    pub fn cmp_utility(&self, other: &Choice) -> Ordering {
        self.utility.total_cmp(&other.utility)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(figure) = self.figure() {
            write!(f, "{} ", figure.kind())?;
        }
        write!(
            f,
            "{} -{}-> {} [{:.2}]",
            self.source, self.template, self.destination, self.utility
        )
    }
}
