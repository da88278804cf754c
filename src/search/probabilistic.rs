//! Alpha-beta search that trades strict optimality for variety.
//!
//! Two things change relative to [`AlphaBetaPruning`](super::AlphaBetaPruning):
//! the successors of every node are shuffled before they are searched, and the
//! root takes a candidate over the current best only by chance:
//!
//! - a strictly better candidate wins a draw against `improve_probability`;
//! - a candidate whose value lies within the magnitude of the non-positive
//!   `fluctuate_threshold` of the best wins a draw against
//!   `fluctuate_probability`.
//!
//! When every draw fails the earlier candidate stays. A probability of zero
//! still draws and only accepts on an exact zero. The random source is
//! always supplied by the caller, so a seeded generator reproduces a game.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::{Board, BoardError};

use super::alpha_beta::{Policy, Pruner};
use super::{
    AdversarySearch, BoardExpander, Choice, ConfigError, Expander, ProbabilisticConfig,
    SearchConfig, SearchError, SearchStats, Utility,
};

struct Randomized<'a, R: ?Sized, E> {
    rng: &'a mut R,
    expander: &'a mut E,
    randomness: &'a ProbabilisticConfig,
}

impl<'a, R: Rng + ?Sized, E> Randomized<'a, R, E> {
    /// Draws uniformly from `[0, 1)` and accepts at or below `probability`.
    /// Every call consumes one value from the generator.
    fn draw(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() <= probability
    }
}

impl<'a, R: Rng + ?Sized, E: Expander> Policy for Randomized<'a, R, E> {
    fn successors(&mut self, board: &Board) -> Result<Vec<Choice>, BoardError> {
        let mut successors = self.expander.expand(board)?;
        successors.shuffle(&mut *self.rng);
        Ok(successors)
    }

    fn prefers(&mut self, candidate: &Choice, best: &Choice) -> bool {
        let (value, current) = (candidate.utility(), best.utility());
        if value > current && self.draw(self.randomness.improve_probability) {
            return true;
        }
        (value - current).abs() <= -self.randomness.fluctuate_threshold
            && self.draw(self.randomness.fluctuate_probability)
    }
}

pub struct ProbabilisticAlphaBetaPruning<U, R, E = BoardExpander> {
    config: SearchConfig,
    randomness: ProbabilisticConfig,
    utility: U,
    rng: R,
    expander: E,
    stats: SearchStats,
    cancel: Option<Arc<AtomicBool>>,
}

impl<U: Utility, R: Rng> ProbabilisticAlphaBetaPruning<U, R> {
    /// A search that only shuffles successor order; the root still takes
    /// strictly better choices and never fluctuates.
    pub fn new(max_depth: u8, utility: U, rng: R) -> Self {
        Self {
            config: SearchConfig::new(max_depth),
            randomness: ProbabilisticConfig::default(),
            utility,
            rng,
            expander: BoardExpander,
            stats: SearchStats::default(),
            cancel: None,
        }
    }
}

impl<U, R, E> ProbabilisticAlphaBetaPruning<U, R, E> {
    pub fn with_randomness(mut self, randomness: ProbabilisticConfig) -> Result<Self, ConfigError> {
        randomness.validate()?;
        self.randomness = randomness;
        Ok(self)
    }

    pub fn with_expander<X: Expander>(self, expander: X) -> ProbabilisticAlphaBetaPruning<U, R, X> {
        ProbabilisticAlphaBetaPruning {
            config: self.config,
            randomness: self.randomness,
            utility: self.utility,
            rng: self.rng,
            expander,
            stats: self.stats,
            cancel: self.cancel,
        }
    }

    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn randomness(&self) -> &ProbabilisticConfig {
        &self.randomness
    }

    pub fn max_depth(&self) -> u8 {
        self.config.max_depth
    }
}

impl<U: Utility, R: Rng, E: Expander> AdversarySearch for ProbabilisticAlphaBetaPruning<U, R, E> {
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn solve(&mut self, board: &Board) -> Result<Option<Choice>, SearchError> {
        let start = Instant::now();
        self.stats.reset();

        let mut policy = Randomized {
            rng: &mut self.rng,
            expander: &mut self.expander,
            randomness: &self.randomness,
        };
        let mut pruner = Pruner {
            max_depth: u32::from(self.config.max_depth),
            utility: &self.utility,
            policy: &mut policy,
            stats: &mut self.stats,
            cancel: self.cancel.as_deref(),
        };
        // Root children get the full window: the random preference compares
        // their values, and those must be exact.
        let best = pruner.root(board, false)?;

        self.stats
            .record_result(best.as_ref().map(Choice::utility), start.elapsed());
        debug!(
            "probabilistic alpha-beta depth {}: {} nodes, {} cutoffs, best {:?}",
            self.config.max_depth,
            self.stats.nodes(),
            self.stats.cutoffs(),
            best.as_ref().map(|choice| choice.to_string())
        );
        Ok(best)
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::board::{Direction, FigureKind, League, Position};
    use crate::figure::{Figure, MoveTemplate};

    fn valued(utility: f64) -> Choice {
        let mut board = Board::new(2, 1).unwrap();
        let template = MoveTemplate::parse("e").unwrap();
        let figure = Figure::new(
            League::Player(1),
            FigureKind('F'),
            Direction::North,
            vec![template.clone()],
        );
        board.place(Position::new(0, 0), figure).unwrap();
        let mut choice = Choice::new(board, Position::new(0, 0), Position::new(1, 0), template);
        choice.set_utility(utility);
        choice
    }

    fn accepted(randomness: ProbabilisticConfig, candidate: f64, best: f64) -> usize {
        let mut rng = StdRng::seed_from_u64(11);
        let mut expander = BoardExpander;
        let mut policy = Randomized {
            rng: &mut rng,
            expander: &mut expander,
            randomness: &randomness,
        };
        let (candidate, best) = (valued(candidate), valued(best));
        (0..200)
            .filter(|_| policy.prefers(&candidate, &best))
            .count()
    }

    #[test]
    fn test_certain_improvement_always_taken() {
        let randomness = ProbabilisticConfig {
            improve_probability: 1.0,
            fluctuate_probability: 0.0,
            fluctuate_threshold: 0.0,
        };
        assert_eq!(accepted(randomness, 5.0, 1.0), 200);
        assert_eq!(accepted(randomness, 1.0, 5.0), 0);
    }

    #[test]
    fn test_zero_probability_never_taken() {
        let randomness = ProbabilisticConfig {
            improve_probability: 0.0,
            fluctuate_probability: 0.0,
            fluctuate_threshold: -10.0,
        };
        assert_eq!(accepted(randomness, 5.0, 1.0), 0);
        assert_eq!(accepted(randomness, 1.0, 1.0), 0);
    }

    #[test]
    fn test_fluctuation_stays_within_threshold() {
        let randomness = ProbabilisticConfig {
            improve_probability: 0.0,
            fluctuate_probability: 1.0,
            fluctuate_threshold: -1.0,
        };
        assert_eq!(accepted(randomness, 0.5, 1.0), 200);
        assert_eq!(accepted(randomness, 1.0, 1.0), 200);
        assert_eq!(accepted(randomness, 1.5, 1.0), 200);
        assert_eq!(accepted(randomness, -1.0, 1.0), 0);
        assert_eq!(accepted(randomness, 3.0, 1.0), 0);
    }

    #[test]
    fn test_partial_improvement_is_a_coin() {
        let randomness = ProbabilisticConfig {
            improve_probability: 0.5,
            fluctuate_probability: 0.0,
            fluctuate_threshold: 0.0,
        };
        let taken = accepted(randomness, 5.0, 1.0);
        assert!(taken > 50 && taken < 150, "taken {} of 200", taken);
    }
}
