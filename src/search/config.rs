//! Local-search configuration.

use crate::error::{LocalSearchError, Result};

/// How a move is picked from one element's neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStrategy {
    /// Commit the first move with positive gain.
    #[default]
    FirstImprovement,

    /// Scan the whole neighborhood and commit the move with the largest
    /// positive gain.
    BestImprovement,
}

/// Configuration for a local-search run.
///
/// # Examples
///
/// ```
/// use u_localsearch::search::{SearchConfig, SearchStrategy};
///
/// let config = SearchConfig::default()
///     .with_strategy(SearchStrategy::BestImprovement)
///     .with_max_iterations(1000);
/// assert_eq!(config.max_iterations, 1000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Move-selection strategy.
    pub strategy: SearchStrategy,
    /// Maximum number of `search()` calls. 0 = until a local optimum.
    pub max_iterations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::FirstImprovement,
            max_iterations: 0,
        }
    }
}

impl SearchConfig {
    /// Sets the move-selection strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the iteration cap (0 = unbounded).
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Whether `iterations` has reached the cap.
    pub(crate) fn exhausted(&self, iterations: usize) -> bool {
        self.max_iterations > 0 && iterations >= self.max_iterations
    }
}

/// Checks that a cap is not zero when the caller requires a bounded run.
pub(crate) fn require_bounded(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(LocalSearchError::InvalidConfig(format!(
            "{name} must be positive"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.strategy, SearchStrategy::FirstImprovement);
        assert_eq!(config.max_iterations, 0);
    }

    #[test]
    fn test_exhausted() {
        let unbounded = SearchConfig::default();
        assert!(!unbounded.exhausted(1_000_000));

        let capped = SearchConfig::default().with_max_iterations(3);
        assert!(!capped.exhausted(2));
        assert!(capped.exhausted(3));
    }

    #[test]
    fn test_require_bounded() {
        assert!(require_bounded("tenure", 3).is_ok());
        let err = require_bounded("tenure", 0).unwrap_err();
        assert_eq!(
            err,
            LocalSearchError::InvalidConfig("tenure must be positive".into())
        );
    }
}
