//! Minimax with alpha-beta pruning.
//!
//! # Core Algorithm
//!
//! The root is a maximizer at depth 0; below it max and min nodes alternate by
//! depth parity. A node deeper than `max_depth`, or one without successors, is
//! scored by the utility function. Every other node searches its children
//! inside the window `[alpha, beta]`: a max node raises `alpha` to the best
//! value seen and returns `beta` as soon as `alpha >= beta`, a min node lowers
//! `beta` and returns `alpha` as soon as `beta <= alpha`. Children that fall
//! outside the window cannot change the decision, so the root value is the
//! same as plain minimax while far fewer nodes are visited.
//!
//! Alternation follows depth only. A rules set that lets a league move twice
//! in a row is still searched as if the turn had passed.
//!
//! # Root
//! The root keeps the successor itself, not just its value. Whether a child
//! replaces the current best is up to the [`Preference`]; the default keeps
//! the first child with the highest value. Only that default lets the root
//! narrow its window: any other preference sees the exact value of every
//! child.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, trace};
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::{Board, BoardError};

use super::{
    AdversarySearch, BoardExpander, Choice, Expander, Preference, SearchConfig, SearchError,
    SearchStats, StrictlyGreater, Utility,
};

/// Successor generation and root tie-breaking for one search.
pub(crate) trait Policy {
    fn successors(&mut self, board: &Board) -> Result<Vec<Choice>, BoardError>;
    fn prefers(&mut self, candidate: &Choice, best: &Choice) -> bool;
}

/// The recursion shared by the deterministic and the probabilistic search.
pub(crate) struct Pruner<'a, U: ?Sized, P: ?Sized> {
    pub(crate) max_depth: u32,
    pub(crate) utility: &'a U,
    pub(crate) policy: &'a mut P,
    pub(crate) stats: &'a mut SearchStats,
    pub(crate) cancel: Option<&'a AtomicBool>,
}

impl<'a, U, P> Pruner<'a, U, P>
where
    U: Utility + ?Sized,
    P: Policy + ?Sized,
{
    /// Searches every successor of `board` and keeps the preferred one.
    ///
    /// With `narrow_window` the running best value bounds later children, so
    /// their reported utility may only be an upper bound. Such a child can at
    /// most tie the current best and is never offered to the preference.
    /// Without it every child is searched in the full window and reports its
    /// exact value.
    pub(crate) fn root(
        &mut self,
        board: &Board,
        narrow_window: bool,
    ) -> Result<Option<Choice>, SearchError> {
        self.stats.nodes += 1;
        let successors = self.policy.successors(board)?;

        let mut alpha = f64::NEG_INFINITY;
        let mut best: Option<Choice> = None;
        for mut choice in successors {
            let floor = if narrow_window {
                alpha
            } else {
                f64::NEG_INFINITY
            };
            let value = self.min_value(choice.state(), 1, floor, f64::INFINITY)?;
            choice.set_utility(value);
            if value > alpha {
                alpha = value;
            }

            let replace = match &best {
                None => true,
                Some(_) if narrow_window && value <= floor => {
                    trace!("root skips bounded {}", choice);
                    false
                }
                Some(current) => self.policy.prefers(&choice, current),
            };
            if replace {
                trace!("root prefers {}", choice);
                best = Some(choice);
            }
        }

        Ok(best)
    }

    fn max_value(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: f64,
        beta: f64,
    ) -> Result<f64, SearchError> {
        self.stats.nodes += 1;
        if depth > self.max_depth || self.cancelled() {
            return Ok(self.evaluate(board));
        }

        let successors = self.policy.successors(board)?;
        if successors.is_empty() {
            return Ok(self.evaluate(board));
        }

        for choice in successors.iter() {
            flag_repeated_turn(board, choice);
            let value = self.min_value(choice.state(), depth + 1, alpha, beta)?;
            if value > alpha {
                alpha = value;
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                return Ok(beta);
            }
        }

        Ok(alpha)
    }

    fn min_value(
        &mut self,
        board: &Board,
        depth: u32,
        alpha: f64,
        mut beta: f64,
    ) -> Result<f64, SearchError> {
        self.stats.nodes += 1;
        if depth > self.max_depth || self.cancelled() {
            return Ok(self.evaluate(board));
        }

        let successors = self.policy.successors(board)?;
        if successors.is_empty() {
            return Ok(self.evaluate(board));
        }

        for choice in successors.iter() {
            flag_repeated_turn(board, choice);
            let value = self.max_value(choice.state(), depth + 1, alpha, beta)?;
            if value < beta {
                beta = value;
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                return Ok(alpha);
            }
        }

        Ok(beta)
    }

    fn evaluate(&mut self, board: &Board) -> f64 {
        self.stats.evaluations += 1;
        self.utility.utility(board)
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}

fn flag_repeated_turn(board: &Board, choice: &Choice) {
    if !choice.state().is_over() && choice.state().turn() == board.turn() {
        trace!(
            "{} moves again after {}, searched as an opponent ply",
            board.turn(),
            choice
        );
    }
}

struct Plain<'a, P, E> {
    preference: &'a mut P,
    expander: &'a mut E,
}

impl<'a, P: Preference, E: Expander> Policy for Plain<'a, P, E> {
    fn successors(&mut self, board: &Board) -> Result<Vec<Choice>, BoardError> {
        self.expander.expand(board)
    }

    fn prefers(&mut self, candidate: &Choice, best: &Choice) -> bool {
        self.preference.prefers(candidate, best)
    }
}

/// Deterministic alpha-beta search over board clones.
pub struct AlphaBetaPruning<U, P = StrictlyGreater, E = BoardExpander> {
    config: SearchConfig,
    utility: U,
    preference: P,
    expander: E,
    stats: SearchStats,
    cancel: Option<Arc<AtomicBool>>,
}

impl<U: Utility> AlphaBetaPruning<U> {
    pub fn new(max_depth: u8, utility: U) -> Self {
        Self::with_config(SearchConfig::new(max_depth), utility)
    }

    pub fn with_config(config: SearchConfig, utility: U) -> Self {
        Self {
            config,
            utility,
            preference: StrictlyGreater,
            expander: BoardExpander,
            stats: SearchStats::default(),
            cancel: None,
        }
    }
}

impl<U, P, E> AlphaBetaPruning<U, P, E> {
    pub fn with_preference<Q: Preference>(self, preference: Q) -> AlphaBetaPruning<U, Q, E> {
        AlphaBetaPruning {
            config: self.config,
            utility: self.utility,
            preference,
            expander: self.expander,
            stats: self.stats,
            cancel: self.cancel,
        }
    }

    pub fn with_expander<X: Expander>(self, expander: X) -> AlphaBetaPruning<U, P, X> {
        AlphaBetaPruning {
            config: self.config,
            utility: self.utility,
            preference: self.preference,
            expander,
            stats: self.stats,
            cancel: self.cancel,
        }
    }

    /// Polls `flag` on entry to every node. Once it is set, the remaining
    /// nodes are scored statically and the search returns early.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn max_depth(&self) -> u8 {
        self.config.max_depth
    }

    pub fn set_max_depth(&mut self, max_depth: u8) {
        self.config.max_depth = max_depth;
    }

    pub fn utility(&self) -> &U {
        &self.utility
    }
}

impl<U: Utility, P: Preference, E: Expander> AdversarySearch for AlphaBetaPruning<U, P, E> {
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn solve(&mut self, board: &Board) -> Result<Option<Choice>, SearchError> {
        let start = Instant::now();
        self.stats.reset();

        let narrow_window = !self.preference.needs_exact_values();
        let mut policy = Plain {
            preference: &mut self.preference,
            expander: &mut self.expander,
        };
        let mut pruner = Pruner {
            max_depth: u32::from(self.config.max_depth),
            utility: &self.utility,
            policy: &mut policy,
            stats: &mut self.stats,
            cancel: self.cancel.as_deref(),
        };
        let best = pruner.root(board, narrow_window)?;

        self.stats
            .record_result(best.as_ref().map(Choice::utility), start.elapsed());
        debug!(
            "alpha-beta depth {}: {} nodes, {} cutoffs, {} evaluations, best {:?}",
            self.config.max_depth,
            self.stats.nodes(),
            self.stats.cutoffs(),
            self.stats.evaluations(),
            best.as_ref().map(|choice| choice.to_string())
        );
        Ok(best)
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
