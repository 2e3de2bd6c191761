//! Local-search execution engine.
//!
//! # Algorithm (one `search()` call, multi-solution variant)
//!
//! 1. Visit solution elements in index order
//! 2. For each element, ask the neighborhood getter for candidate moves
//! 3. Score each move with the gain evaluator
//!    - first improvement: commit the first move with positive gain
//!    - best improvement: commit the move with the largest positive gain
//! 4. Return `true` as soon as one move has been committed, `false` if
//!    no element has an improving move (local optimum)
//!
//! The stop condition is consulted after every non-improving move and can
//! cut the scan of the current element short.
//!
//! The single-solution variant treats the whole solution as one element
//! (`()`), so steps 1 and 4 collapse to a single neighborhood.

use super::config::{SearchConfig, SearchStrategy};
use super::types::{
    Committer, ElementSolution, Gain, GainEvaluator, NeighborhoodGetter, NeverStop, StopCondition,
};

/// Result of a [`LocalSearch::run`] loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Number of `search()` calls made.
    pub iterations: usize,
    /// Number of committed moves.
    pub improvements: usize,
    /// Whether the loop ended because no improving move was left.
    pub converged: bool,
}

/// Generic local-search engine.
///
/// Owns the four search components and the configuration; the solution is
/// borrowed per call, so one engine can drive several solutions in turn.
///
/// # Examples
///
/// ```
/// use u_localsearch::search::{LocalSearch, SearchConfig};
///
/// // Walk an integer towards zero, one step at a time.
/// let mut engine = LocalSearch::new(
///     |x: &i64, _: &()| vec![*x - 1, *x + 1],
///     |x: &i64, _: &(), y: &i64| x.abs() - y.abs(),
///     |x: &mut i64, _: &(), y: &i64| {
///         *x = *y;
///         true
///     },
/// );
///
/// let mut x = 5;
/// let result = engine.run_single(&mut x);
/// assert_eq!(x, 0);
/// assert!(result.converged);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch<N, G, C, St = NeverStop> {
    getter: N,
    gain: G,
    committer: C,
    stop: St,
    config: SearchConfig,
}

impl<N, G, C> LocalSearch<N, G, C, NeverStop> {
    /// Creates an engine with the default configuration and no stop
    /// condition.
    pub fn new(getter: N, gain: G, committer: C) -> Self {
        Self {
            getter,
            gain,
            committer,
            stop: NeverStop,
            config: SearchConfig::default(),
        }
    }
}

impl<N, G, C, St> LocalSearch<N, G, C, St> {
    /// Replaces the configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the move-selection strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Installs a stop condition.
    pub fn with_stop_condition<St2>(self, stop: St2) -> LocalSearch<N, G, C, St2> {
        LocalSearch {
            getter: self.getter,
            gain: self.gain,
            committer: self.committer,
            stop,
            config: self.config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The gain evaluator, e.g. to inspect a decorator's state.
    pub fn gain_evaluator(&self) -> &G {
        &self.gain
    }

    /// Mutable access to the gain evaluator.
    pub fn gain_evaluator_mut(&mut self) -> &mut G {
        &mut self.gain
    }

    /// One pass over all solution elements (multi-solution variant).
    ///
    /// Returns `true` if a move was committed. The pass stops at the first
    /// element for which a move is committed.
    pub fn search<S>(&mut self, solution: &mut S) -> bool
    where
        S: ElementSolution,
        N: NeighborhoodGetter<S, S::Element>,
        G: GainEvaluator<S, S::Element, N::Move>,
        C: Committer<S, S::Element, N::Move>,
        St: StopCondition<S, S::Element, N::Move>,
    {
        for index in 0..solution.element_count() {
            // Cloned so the committer may flip the live element in place.
            let element = solution.element(index).clone();
            log::trace!("scanning neighborhood of element {index}");
            if self.improve(solution, &element) {
                return true;
            }
        }
        false
    }

    /// One neighborhood scan over the whole solution (single-solution
    /// variant).
    pub fn search_single<S>(&mut self, solution: &mut S) -> bool
    where
        N: NeighborhoodGetter<S, ()>,
        G: GainEvaluator<S, (), N::Move>,
        C: Committer<S, (), N::Move>,
        St: StopCondition<S, (), N::Move>,
    {
        self.improve(solution, &())
    }

    /// Calls [`search`](Self::search) until it returns `false` or the
    /// iteration cap is hit.
    pub fn run<S>(&mut self, solution: &mut S) -> SearchResult
    where
        S: ElementSolution,
        N: NeighborhoodGetter<S, S::Element>,
        G: GainEvaluator<S, S::Element, N::Move>,
        C: Committer<S, S::Element, N::Move>,
        St: StopCondition<S, S::Element, N::Move>,
    {
        self.drive(|engine| engine.search(solution))
    }

    /// Calls [`search_single`](Self::search_single) until it returns
    /// `false` or the iteration cap is hit.
    pub fn run_single<S>(&mut self, solution: &mut S) -> SearchResult
    where
        N: NeighborhoodGetter<S, ()>,
        G: GainEvaluator<S, (), N::Move>,
        C: Committer<S, (), N::Move>,
        St: StopCondition<S, (), N::Move>,
    {
        self.drive(|engine| engine.search_single(solution))
    }

    fn drive<F>(&mut self, mut step: F) -> SearchResult
    where
        F: FnMut(&mut Self) -> bool,
    {
        let mut result = SearchResult::default();
        while !self.config.exhausted(result.iterations) {
            result.iterations += 1;
            if step(self) {
                result.improvements += 1;
            } else {
                result.converged = true;
                break;
            }
        }
        log::debug!(
            "local search finished after {} iterations ({} improvements, converged: {})",
            result.iterations,
            result.improvements,
            result.converged
        );
        result
    }

    /// Scans one element's neighborhood and commits at most one move.
    fn improve<S, E>(&mut self, solution: &mut S, element: &E) -> bool
    where
        N: NeighborhoodGetter<S, E>,
        G: GainEvaluator<S, E, N::Move>,
        C: Committer<S, E, N::Move>,
        St: StopCondition<S, E, N::Move>,
    {
        let moves = self.getter.neighborhood(solution, element);
        self.stop.reset();

        let chosen = match self.config.strategy {
            SearchStrategy::FirstImprovement => {
                let mut chosen = None;
                for mv in moves {
                    let gain = self.gain.gain(solution, element, &mv);
                    if gain.is_improvement() {
                        chosen = Some((gain, mv));
                        break;
                    }
                    if self.stop.should_stop(solution, element, &mv) {
                        break;
                    }
                }
                chosen
            }
            SearchStrategy::BestImprovement => {
                let mut best: Option<(G::Gain, N::Move)> = None;
                for mv in moves {
                    let gain = self.gain.gain(solution, element, &mv);
                    if gain.is_improvement() {
                        if best.as_ref().is_none_or(|(b, _)| gain > *b) {
                            best = Some((gain, mv));
                        }
                    } else if self.stop.should_stop(solution, element, &mv) {
                        break;
                    }
                }
                best
            }
        };

        let Some((gain, mv)) = chosen else {
            return false;
        };

        if self.committer.commit(solution, element, &mv) {
            log::trace!("committed move with gain {:.6}", gain.to_f64());
            self.gain.on_commit(solution, element, &mv);
            true
        } else {
            log::warn!(
                "committer rejected a move with gain {:.6}; treating it as not committed",
                gain.to_f64()
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MaxNonImproving;

    /// Bits that the search should switch off; gain = 1 per cleared bit.
    struct Bits {
        bits: Vec<bool>,
    }

    impl ElementSolution for Bits {
        type Element = usize;

        fn element_count(&self) -> usize {
            self.bits.len()
        }

        fn element(&self, index: usize) -> &usize {
            // Elements are their own indices.
            &INDICES[index]
        }
    }

    static INDICES: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

    fn flip_getter(_: &Bits, e: &usize) -> Vec<usize> {
        vec![*e]
    }

    fn flip_gain(s: &Bits, _: &usize, m: &usize) -> i32 {
        if s.bits[*m] {
            1
        } else {
            -1
        }
    }

    fn flip_commit(s: &mut Bits, _: &usize, m: &usize) -> bool {
        s.bits[*m] = !s.bits[*m];
        true
    }

    #[test]
    fn test_first_improvement_commits_once_per_search() {
        let mut bits = Bits {
            bits: vec![false, true, false, true],
        };
        let mut engine = LocalSearch::new(flip_getter, flip_gain, flip_commit);

        assert!(engine.search(&mut bits));
        assert_eq!(bits.bits, vec![false, false, false, true]);

        assert!(engine.search(&mut bits));
        assert_eq!(bits.bits, vec![false, false, false, false]);

        assert!(!engine.search(&mut bits), "no improving move left");
    }

    #[test]
    fn test_run_counts_improvements() {
        let mut bits = Bits {
            bits: vec![true, true, false, true, true],
        };
        let mut engine = LocalSearch::new(flip_getter, flip_gain, flip_commit);
        let result = engine.run(&mut bits);

        assert!(bits.bits.iter().all(|b| !b));
        assert_eq!(result.improvements, 4);
        assert_eq!(result.iterations, 5);
        assert!(result.converged);
    }

    #[test]
    fn test_iteration_cap() {
        let mut bits = Bits {
            bits: vec![true; 6],
        };
        let mut engine = LocalSearch::new(flip_getter, flip_gain, flip_commit)
            .with_config(SearchConfig::default().with_max_iterations(2));
        let result = engine.run(&mut bits);

        assert_eq!(result.iterations, 2);
        assert_eq!(result.improvements, 2);
        assert!(!result.converged);
        assert_eq!(bits.bits.iter().filter(|b| **b).count(), 4);
    }

    #[test]
    fn test_best_improvement_picks_argmax() {
        // Move to any value in [0, 10]; gain is the decrease of |x - 7|.
        let mut engine = LocalSearch::new(
            |_: &i32, _: &()| (0..=10).collect::<Vec<i32>>(),
            |x: &i32, _: &(), y: &i32| (x - 7).abs() - (y - 7).abs(),
            |x: &mut i32, _: &(), y: &i32| {
                *x = *y;
                true
            },
        )
        .with_strategy(SearchStrategy::BestImprovement);

        let mut x = 0;
        assert!(engine.search_single(&mut x));
        assert_eq!(x, 7, "best improvement jumps straight to the optimum");
        assert!(!engine.search_single(&mut x));
    }

    #[test]
    fn test_first_improvement_takes_first_positive() {
        let mut engine = LocalSearch::new(
            |_: &i32, _: &()| (0..=10).collect::<Vec<i32>>(),
            |x: &i32, _: &(), y: &i32| (x - 7).abs() - (y - 7).abs(),
            |x: &mut i32, _: &(), y: &i32| {
                *x = *y;
                true
            },
        );

        let mut x = 0;
        assert!(engine.search_single(&mut x));
        assert_eq!(x, 1);
    }

    #[test]
    fn test_empty_neighborhood_is_local_optimum() {
        let mut engine = LocalSearch::new(
            |_: &i32, _: &()| Vec::<i32>::new(),
            |_: &i32, _: &(), _: &i32| 1.0,
            |_: &mut i32, _: &(), _: &i32| true,
        );
        let mut x = 3;
        let result = engine.run_single(&mut x);
        assert!(result.converged);
        assert_eq!(result.improvements, 0);
        assert_eq!(x, 3);
    }

    #[test]
    fn test_stop_condition_cuts_scan() {
        // The only improving move is last; stopping after two
        // non-improving moves hides it.
        let mut engine = LocalSearch::new(
            |_: &i32, _: &()| vec![1, 2, 3, 4],
            |_: &i32, _: &(), m: &i32| if *m == 4 { 1 } else { -1 },
            |x: &mut i32, _: &(), m: &i32| {
                *x = *m;
                true
            },
        )
        .with_stop_condition(MaxNonImproving::new(2));

        let mut x = 0;
        assert!(!engine.search_single(&mut x));
        assert_eq!(x, 0);
    }

    #[test]
    fn test_stop_budget_is_per_element() {
        struct Moves {
            per_element: Vec<Vec<i32>>,
            committed: Option<i32>,
        }

        impl ElementSolution for Moves {
            type Element = usize;

            fn element_count(&self) -> usize {
                self.per_element.len()
            }

            fn element(&self, index: usize) -> &usize {
                &INDICES[index]
            }
        }

        // Element 0 only has a worsening move; element 1 has one before
        // its improving move, within a budget of two.
        let mut moves = Moves {
            per_element: vec![vec![-1], vec![-1, 5]],
            committed: None,
        };
        let mut engine = LocalSearch::new(
            |s: &Moves, e: &usize| s.per_element[*e].clone(),
            |_: &Moves, _: &usize, m: &i32| *m,
            |s: &mut Moves, _: &usize, m: &i32| {
                s.committed = Some(*m);
                true
            },
        )
        .with_stop_condition(MaxNonImproving::new(2));

        assert!(engine.search(&mut moves), "budget must not carry over between elements");
        assert_eq!(moves.committed, Some(5));
    }

    #[test]
    fn test_rejected_commit_is_not_an_improvement() {
        let mut engine = LocalSearch::new(
            |_: &i32, _: &()| vec![1],
            |_: &i32, _: &(), _: &i32| 1,
            |_: &mut i32, _: &(), _: &i32| false,
        );
        let mut x = 0;
        assert!(!engine.search_single(&mut x));
    }

    #[test]
    fn test_on_commit_hook_called() {
        struct Counting {
            commits: usize,
        }

        impl GainEvaluator<i32, (), i32> for Counting {
            type Gain = i32;

            fn gain(&mut self, x: &i32, _: &(), m: &i32) -> i32 {
                x - m
            }

            fn on_commit(&mut self, _: &i32, _: &(), _: &i32) {
                self.commits += 1;
            }
        }

        let mut engine = LocalSearch::new(
            |x: &i32, _: &()| if *x > 0 { vec![*x - 1] } else { vec![] },
            Counting { commits: 0 },
            |x: &mut i32, _: &(), m: &i32| {
                *x = *m;
                true
            },
        );
        let mut x = 4;
        engine.run_single(&mut x);
        assert_eq!(engine.gain_evaluator().commits, 4);
    }
}
