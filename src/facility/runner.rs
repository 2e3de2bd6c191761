//! Facility-location search loop.

use super::adapter::{Facility, FacilitySolutionAdapter};
use super::components::{FacilityCommit, FacilityGain, FacilityNeighborhood};
use super::config::FacilityLocationConfig;
use super::update::Update;
use crate::error::Result;
use crate::metric::{Metric, Vertex};
use crate::search::{Gain, GainEvaluator, LocalSearch};

/// Result of a facility-location search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacilityLocationResult<V, D> {
    /// Open facilities at the end of the run, ascending.
    pub chosen: Vec<V>,

    /// Objective value at the end of the run.
    pub cost: D,

    /// Number of search passes made.
    pub passes: usize,

    /// Number of committed updates.
    pub improvements: usize,

    /// Whether the run ended at a local optimum rather than the pass cap.
    pub converged: bool,

    /// Objective after every committed update, starting with the initial
    /// value.
    pub cost_history: Vec<D>,
}

/// Runs local search on a facility-location solution.
pub struct FacilityLocationRunner;

impl FacilityLocationRunner {
    /// Runs plain descent: updates are accepted when they lower the
    /// objective.
    pub fn run<V, M, C>(
        adapter: &mut FacilitySolutionAdapter<'_, V, M, C>,
        config: &FacilityLocationConfig,
    ) -> Result<FacilityLocationResult<V, M::Distance>>
    where
        V: Vertex,
        M: Metric<V>,
        C: Fn(&V) -> M::Distance,
    {
        Self::run_with_gain(adapter, config, FacilityGain)
    }

    /// Runs the search with a custom gain evaluator, typically a
    /// [`decorators`](crate::decorators) wrapper around [`FacilityGain`].
    pub fn run_with_gain<'m, V, M, C, G>(
        adapter: &mut FacilitySolutionAdapter<'m, V, M, C>,
        config: &FacilityLocationConfig,
        gain: G,
    ) -> Result<FacilityLocationResult<V, M::Distance>>
    where
        V: Vertex,
        M: Metric<V>,
        C: Fn(&V) -> M::Distance,
        G: GainEvaluator<FacilitySolutionAdapter<'m, V, M, C>, Facility<V>, Update<V>>,
    {
        config.validate()?;

        let mut engine = LocalSearch::new(
            FacilityNeighborhood::new(config.moves),
            gain,
            FacilityCommit,
        )
        .with_config(config.search_config());

        let mut cost_history = vec![adapter.solution().total_cost()];
        let mut passes = 0usize;
        let mut improvements = 0usize;
        let mut converged = false;

        while config.max_passes == 0 || passes < config.max_passes {
            passes += 1;
            if !engine.search(adapter) {
                converged = true;
                break;
            }
            improvements += 1;
            let cost = adapter.solution().total_cost();
            log::debug!("pass {passes}: cost {:.6}", cost.to_f64());
            cost_history.push(cost);
        }

        let solution = adapter.solution();
        let cost = solution.total_cost();
        log::debug!(
            "facility location finished after {passes} passes: {} open, cost {:.6}, converged: {converged}",
            solution.chosen_facilities().len(),
            cost.to_f64()
        );

        Ok(FacilityLocationResult {
            chosen: solution.chosen_facilities().iter().cloned().collect(),
            cost,
            passes,
            improvements,
            converged,
            cost_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{FacilityLocationSolution, MoveSet};
    use crate::metric::MatrixMetric;
    use crate::search::SearchStrategy;

    /// Three clusters of three points each, Manhattan distances.
    fn clustered() -> MatrixMetric<f64> {
        let points = [
            (0.0, 0.0),
            (1.0, 0.0),
            (0.0, 1.0),
            (50.0, 50.0),
            (51.0, 50.0),
            (50.0, 51.0),
            (100.0, 0.0),
            (101.0, 0.0),
            (100.0, 1.0),
        ];
        MatrixMetric::from_fn(points.len(), |i, j| {
            let (a, b): ((f64, f64), (f64, f64)) = (points[i], points[j]);
            (a.0 - b.0).abs() + (a.1 - b.1).abs()
        })
    }

    #[test]
    fn test_cost_history_is_decreasing() {
        let metric = clustered();
        let solution = FacilityLocationSolution::new(
            [0],
            1..9,
            0..9,
            &metric,
            |_: &usize| 10.0,
            1e9,
        )
        .unwrap();
        let mut adapter = FacilitySolutionAdapter::new(solution);

        let result =
            FacilityLocationRunner::run(&mut adapter, &FacilityLocationConfig::default()).unwrap();

        assert!(result.converged);
        assert_eq!(result.cost_history.len(), result.improvements + 1);
        for pair in result.cost_history.windows(2) {
            assert!(pair[1] < pair[0], "cost must strictly decrease: {pair:?}");
        }
        assert_eq!(result.chosen.len(), 3, "one facility per cluster");
        assert!((result.cost - adapter.solution().total_cost()).abs() < 1e-9);
    }

    #[test]
    fn test_pass_cap() {
        let metric = clustered();
        let solution =
            FacilityLocationSolution::new([0], 1..9, 0..9, &metric, |_: &usize| 10.0, 1e9)
                .unwrap();
        let mut adapter = FacilitySolutionAdapter::new(solution);

        let config = FacilityLocationConfig::default().with_max_passes(1);
        let result = FacilityLocationRunner::run(&mut adapter, &config).unwrap();
        assert_eq!(result.passes, 1);
        assert_eq!(result.improvements, 1);
        assert!(!result.converged);
    }

    #[test]
    fn test_best_improvement_swap_only_keeps_count() {
        let metric = clustered();
        let solution =
            FacilityLocationSolution::new([0, 1, 2], 3..9, 0..9, &metric, |_: &usize| 0.0, 1e9)
                .unwrap();
        let mut adapter = FacilitySolutionAdapter::new(solution);

        let config = FacilityLocationConfig::default()
            .with_strategy(SearchStrategy::BestImprovement)
            .with_moves(MoveSet::SWAP_ONLY);
        let result = FacilityLocationRunner::run(&mut adapter, &config).unwrap();

        assert!(result.converged);
        assert_eq!(result.chosen.len(), 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let metric = clustered();
        let solution =
            FacilityLocationSolution::new([0], 1..9, 0..9, &metric, |_: &usize| 1.0, 1e9)
                .unwrap();
        let mut adapter = FacilitySolutionAdapter::new(solution);
        let config = FacilityLocationConfig::default().with_moves(MoveSet {
            add: false,
            remove: false,
            swap: false,
        });
        assert!(FacilityLocationRunner::run(&mut adapter, &config).is_err());
    }
}
