//! Unpruned full-width minimax. Same depth semantics as
//! [`AlphaBetaPruning`](super::AlphaBetaPruning); visits every node, so it is
//! mostly useful as a reference to check pruning against.

use std::time::Instant;

use log::debug;

use crate::board::Board;

use super::{
    AdversarySearch, BoardExpander, Choice, Expander, SearchConfig, SearchError, SearchStats,
    Utility,
};

pub struct Minimax<U, E = BoardExpander> {
    config: SearchConfig,
    utility: U,
    expander: E,
    stats: SearchStats,
}

impl<U: Utility> Minimax<U> {
    pub fn new(max_depth: u8, utility: U) -> Self {
        Self {
            config: SearchConfig::new(max_depth),
            utility,
            expander: BoardExpander,
            stats: SearchStats::default(),
        }
    }
}

impl<U, E> Minimax<U, E> {
    pub fn with_expander<X: Expander>(self, expander: X) -> Minimax<U, X> {
        Minimax {
            config: self.config,
            utility: self.utility,
            expander,
            stats: self.stats,
        }
    }
}

impl<U: Utility, E: Expander> Minimax<U, E> {
    fn value(&mut self, board: &Board, depth: u32) -> Result<f64, SearchError> {
        self.stats.nodes += 1;
        if depth > u32::from(self.config.max_depth) {
            return Ok(self.evaluate(board));
        }

        let successors = self.expander.expand(board)?;
        if successors.is_empty() {
            return Ok(self.evaluate(board));
        }

        let maximizing = depth % 2 == 0;
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for choice in successors.iter() {
            let value = self.value(choice.state(), depth + 1)?;
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        Ok(best)
    }

    fn evaluate(&mut self, board: &Board) -> f64 {
        self.stats.evaluations += 1;
        self.utility.utility(board)
    }
}

impl<U: Utility, E: Expander> AdversarySearch for Minimax<U, E> {
    fn solve(&mut self, board: &Board) -> Result<Option<Choice>, SearchError> {
        let start = Instant::now();
        self.stats.reset();
        self.stats.nodes += 1;

        let mut best: Option<Choice> = None;
        for mut choice in self.expander.expand(board)? {
            let value = self.value(choice.state(), 1)?;
            choice.set_utility(value);
            if best.as_ref().map_or(true, |current| value > current.utility()) {
                best = Some(choice);
            }
        }

        self.stats
            .record_result(best.as_ref().map(Choice::utility), start.elapsed());
        debug!(
            "minimax depth {}: {} nodes, {} evaluations",
            self.config.max_depth,
            self.stats.nodes(),
            self.stats.evaluations()
        );
        Ok(best)
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
