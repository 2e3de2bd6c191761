//! k-median search configuration.

use crate::facility::{FacilityLocationConfig, MoveSet};
use crate::search::SearchStrategy;

/// Configuration for [`KMedianRunner`](super::KMedianRunner).
///
/// # Examples
///
/// ```
/// use u_localsearch::k_median::KMedianConfig;
/// use u_localsearch::search::SearchStrategy;
///
/// let config = KMedianConfig::default()
///     .with_strategy(SearchStrategy::BestImprovement)
///     .with_max_passes(100);
/// assert_eq!(config.max_passes, 100);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KMedianConfig {
    /// Move selection within one median's swap neighborhood.
    pub strategy: SearchStrategy,

    /// Maximum number of search passes. 0 = until a local optimum.
    pub max_passes: usize,
}

impl KMedianConfig {
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    /// The equivalent facility-location configuration: swaps only.
    pub(crate) fn facility_config(&self) -> FacilityLocationConfig {
        FacilityLocationConfig::default()
            .with_strategy(self.strategy)
            .with_max_passes(self.max_passes)
            .with_moves(MoveSet::SWAP_ONLY)
    }
}
