//! Stock utility: material balance from one league's point of view.

use rustc_hash::FxHashMap;

use crate::board::{Board, FigureKind, League};
use crate::search::Utility;

// Far above any material sum, so a decided game always outweighs material.
pub const DECISIVE: f64 = 1000.0;

/// Sums the values of the movable figures of `perspective` and subtracts the
/// values of everybody else's. Kinds without an explicit value count as 1.
#[derive(Clone, Debug)]
pub struct MaterialCount {
    perspective: League,
    values: FxHashMap<FigureKind, f64>,
    default_value: f64,
}

impl MaterialCount {
    pub fn new(perspective: League) -> Self {
        Self {
            perspective,
            values: FxHashMap::default(),
            default_value: 1.0,
        }
    }

    pub fn with_value(mut self, kind: FigureKind, value: f64) -> Self {
        self.values.insert(kind, value);
        self
    }

    pub fn perspective(&self) -> League {
        self.perspective
    }

    pub fn value_of(&self, kind: FigureKind) -> f64 {
        self.values.get(&kind).copied().unwrap_or(self.default_value)
    }
}

impl Utility for MaterialCount {
    fn utility(&self, board: &Board) -> f64 {
        if let Some(outcome) = board.outcome() {
            return match outcome.winner() {
                Some(winner) if winner == self.perspective => DECISIVE,
                Some(_) => -DECISIVE,
                None => 0.0,
            };
        }

        board
            .figures()
            .filter(|figure| figure.can_move())
            .map(|figure| {
                let value = self.value_of(figure.kind());
                if figure.league() == self.perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}
