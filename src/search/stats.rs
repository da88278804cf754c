use std::time::Duration;

/// Statistics collected during search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchStats {
    pub(crate) nodes: usize,
    pub(crate) cutoffs: usize,
    pub(crate) evaluations: usize,
    last_utility: Option<f64>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    /// Nodes entered, the root included.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn cutoffs(&self) -> usize {
        self.cutoffs
    }

    /// Boards scored by the utility function.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn last_utility(&self) -> Option<f64> {
        self.last_utility
    }

    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn record_result(&mut self, utility: Option<f64>, duration: Duration) {
        self.last_utility = utility;
        self.last_duration = Some(duration);
    }
}
