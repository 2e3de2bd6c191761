//! k-median swap search.

use std::collections::BTreeSet;

use super::config::KMedianConfig;
use crate::error::{LocalSearchError, Result};
use crate::facility::{FacilityLocationRunner, FacilityLocationSolution, FacilitySolutionAdapter};
use crate::metric::{Distance, Metric, Vertex};
use crate::search::Gain;

/// Result of a k-median search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KMedianResult<V, D> {
    /// Final medians, ascending. Always as many as the initial ones.
    pub medians: Vec<V>,

    /// Sum of client distances to their nearest median.
    pub cost: D,

    /// Number of search passes made.
    pub passes: usize,

    /// Number of committed swaps.
    pub swaps: usize,

    /// Whether the run ended at a swap-local optimum.
    pub converged: bool,

    /// Cost after every committed swap, starting with the initial cost.
    pub cost_history: Vec<D>,
}

/// Runs single-swap local search for k-median.
///
/// k-median is facility location with zero opening costs and a fixed
/// number of open facilities; the search only swaps a median for a
/// candidate, so `k` never changes.
pub struct KMedianRunner;

impl KMedianRunner {
    /// Improves `medians` by swapping them with `candidates`.
    ///
    /// Candidates that are already medians are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LocalSearchError::NoMedians`] if `medians` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_localsearch::k_median::{KMedianConfig, KMedianRunner};
    ///
    /// let line = |a: &i64, b: &i64| (a - b).abs();
    /// let clients = [0, 1, 2, 10, 11, 12];
    /// let result =
    ///     KMedianRunner::run([0, 2], clients, clients, &line, &KMedianConfig::default()).unwrap();
    /// assert_eq!(result.medians, vec![1, 11]);
    /// assert_eq!(result.cost, 4);
    /// ```
    pub fn run<V, M, I, C, L>(
        medians: I,
        candidates: C,
        clients: L,
        metric: &M,
        config: &KMedianConfig,
    ) -> Result<KMedianResult<V, M::Distance>>
    where
        V: Vertex,
        M: Metric<V>,
        I: IntoIterator<Item = V>,
        C: IntoIterator<Item = V>,
        L: IntoIterator<Item = V>,
    {
        let medians: BTreeSet<V> = medians.into_iter().collect();
        if medians.is_empty() {
            return Err(LocalSearchError::NoMedians);
        }
        let candidates: BTreeSet<V> = candidates
            .into_iter()
            .filter(|c| !medians.contains(c))
            .collect();
        let k = medians.len();

        let solution = FacilityLocationSolution::new(
            medians,
            candidates,
            clients,
            metric,
            |_: &V| M::Distance::zero(),
            // Never charged: swaps keep at least one median open.
            M::Distance::zero(),
        )?;
        let mut adapter = FacilitySolutionAdapter::new(solution);

        let result = FacilityLocationRunner::run(&mut adapter, &config.facility_config())?;
        log::debug!(
            "k-median (k = {k}) finished after {} swaps, cost {:.6}",
            result.improvements,
            result.cost.to_f64()
        );

        Ok(KMedianResult {
            medians: result.chosen,
            cost: result.cost,
            passes: result.passes,
            swaps: result.improvements,
            converged: result.converged,
            cost_history: result.cost_history,
        })
    }
}
