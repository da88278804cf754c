use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must lie within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("fluctuate threshold must not be positive, got {value}")]
    PositiveThreshold { value: f64 },
}

/// Search configuration parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Plies expanded below the root before boards are evaluated statically.
    /// Zero still looks one ply ahead.
    pub max_depth: u8,
}

impl SearchConfig {
    pub fn new(max_depth: u8) -> Self {
        Self { max_depth }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

/// How far the probabilistic search strays from the strictly best move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbabilisticConfig {
    /// Chance of taking a strictly better root choice.
    pub improve_probability: f64,
    /// Chance of taking a root choice within the threshold of the best one.
    pub fluctuate_probability: f64,
    /// Non-positive tolerance; its magnitude is how far from the best value a
    /// choice may be and still be taken by fluctuation.
    pub fluctuate_threshold: f64,
}

impl ProbabilisticConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &(name, value) in [
            ("improve probability", self.improve_probability),
            ("fluctuate probability", self.fluctuate_probability),
        ]
        .iter()
        {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        if !(self.fluctuate_threshold <= 0.0) {
            return Err(ConfigError::PositiveThreshold {
                value: self.fluctuate_threshold,
            });
        }
        Ok(())
    }
}

impl Default for ProbabilisticConfig {
    fn default() -> Self {
        Self {
            improve_probability: 1.0,
            fluctuate_probability: 0.0,
            fluctuate_threshold: 0.0,
        }
    }
}
