//! 2-opt configuration and search loop.

use super::cycle::Cycle;
use super::two_opt::{TwoOptCommit, TwoOptGain, TwoOptNeighborhood};
use crate::metric::Metric;
use crate::search::{Gain, LocalSearch, SearchConfig, SearchStrategy};

/// Configuration for [`TwoOptRunner`].
///
/// # Examples
///
/// ```
/// use u_localsearch::search::SearchStrategy;
/// use u_localsearch::tsp::TwoOptConfig;
///
/// let config = TwoOptConfig::default()
///     .with_strategy(SearchStrategy::BestImprovement)
///     .with_max_iterations(10_000);
/// assert_eq!(config.max_iterations, 10_000);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptConfig {
    /// Move selection within the 2-opt neighborhood.
    pub strategy: SearchStrategy,

    /// Maximum number of neighborhood scans. 0 = until 2-optimal.
    pub max_iterations: usize,
}

impl TwoOptConfig {
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    fn search_config(&self) -> SearchConfig {
        SearchConfig::default()
            .with_strategy(self.strategy)
            .with_max_iterations(self.max_iterations)
    }
}

/// Result of a 2-opt run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptResult<D> {
    /// Tour length at the end of the run.
    pub length: D,

    /// Number of neighborhood scans.
    pub iterations: usize,

    /// Number of committed 2-opt moves.
    pub improvements: usize,

    /// Whether the tour is 2-optimal.
    pub converged: bool,

    /// Tour length after every committed move, starting with the initial
    /// length.
    pub length_history: Vec<D>,
}

/// Improves a tour with 2-opt moves until no move shortens it.
pub struct TwoOptRunner;

impl TwoOptRunner {
    /// Runs 2-opt on `cycle` in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_localsearch::metric::EuclideanMetric;
    /// use u_localsearch::tsp::{Cycle, TwoOptConfig, TwoOptRunner};
    ///
    /// let metric = EuclideanMetric::new(vec![(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
    /// let mut tour = Cycle::new(vec![0, 1, 2, 3]);
    /// let result = TwoOptRunner::run(&mut tour, &metric, &TwoOptConfig::default());
    /// assert!((result.length - 4.0).abs() < 1e-9);
    /// ```
    pub fn run<V, M>(
        cycle: &mut Cycle<V>,
        metric: &M,
        config: &TwoOptConfig,
    ) -> TwoOptResult<M::Distance>
    where
        M: Metric<V>,
    {
        let mut engine = LocalSearch::new(TwoOptNeighborhood, TwoOptGain::new(metric), TwoOptCommit)
            .with_config(config.search_config());

        let mut length_history = vec![cycle.length(metric)];
        let mut iterations = 0usize;
        let mut converged = false;

        while config.max_iterations == 0 || iterations < config.max_iterations {
            iterations += 1;
            if !engine.search_single(cycle) {
                converged = true;
                break;
            }
            length_history.push(cycle.length(metric));
        }

        let length = cycle.length(metric);
        log::debug!(
            "2-opt finished after {iterations} scans: length {:.6}, converged: {converged}",
            length.to_f64()
        );

        TwoOptResult {
            length,
            iterations,
            improvements: length_history.len() - 1,
            converged,
            length_history,
        }
    }
}
