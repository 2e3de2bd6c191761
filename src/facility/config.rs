//! Facility-location search configuration.

use super::components::MoveSet;
use crate::error::{LocalSearchError, Result};
use crate::search::{SearchConfig, SearchStrategy};

/// Configuration for [`FacilityLocationRunner`](super::FacilityLocationRunner).
///
/// # Examples
///
/// ```
/// use u_localsearch::facility::{FacilityLocationConfig, MoveSet};
/// use u_localsearch::search::SearchStrategy;
///
/// let config = FacilityLocationConfig::default()
///     .with_strategy(SearchStrategy::BestImprovement)
///     .with_moves(MoveSet::ALL)
///     .with_max_passes(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacilityLocationConfig {
    /// Move selection within one facility's neighborhood.
    pub strategy: SearchStrategy,

    /// Maximum number of search passes. 0 = until a local optimum.
    pub max_passes: usize,

    /// Update kinds to generate.
    pub moves: MoveSet,
}

impl Default for FacilityLocationConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::FirstImprovement,
            max_passes: 0,
            moves: MoveSet::ALL,
        }
    }
}

impl FacilityLocationConfig {
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    pub fn with_moves(mut self, moves: MoveSet) -> Self {
        self.moves = moves;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.moves.add || self.moves.remove || self.moves.swap) {
            return Err(LocalSearchError::InvalidConfig(
                "at least one move kind must be enabled".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn search_config(&self) -> SearchConfig {
        SearchConfig::default()
            .with_strategy(self.strategy)
            .with_max_iterations(self.max_passes)
    }
}
