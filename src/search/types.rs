//! Component traits for the generic local-search engine.
//!
//! A search is assembled from four components, each of which may be a
//! struct implementing the trait or a plain closure:
//!
//! | Component              | Closure shape                          |
//! |------------------------|----------------------------------------|
//! | [`NeighborhoodGetter`] | `FnMut(&S, &E) -> Vec<M>`              |
//! | [`GainEvaluator`]      | `FnMut(&S, &E, &M) -> G`               |
//! | [`Committer`]          | `FnMut(&mut S, &E, &M) -> bool`        |
//! | [`StopCondition`]      | `FnMut(&S, &E, &M) -> bool`            |
//!
//! `S` is the solution, `E` the solution element the neighborhood is
//! centered on (`()` for the single-solution variant) and `M` the move.

use std::fmt::Debug;

/// Numeric type of a move's gain.
///
/// **Positive gain means improvement.** Zero or negative gains are
/// rejected by the engine.
pub trait Gain: Copy + PartialOrd + Default + Debug + Send + Sync + 'static {
    /// Converts the gain to `f64` for logging and acceptance rules.
    fn to_f64(self) -> f64;

    /// Whether this gain is strictly positive.
    #[inline]
    fn is_improvement(self) -> bool {
        self > Self::default()
    }
}

impl Gain for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl Gain for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Gain for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Gain for i32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A solution viewed as an ordered collection of elements.
///
/// The multi-solution engine variant visits elements in index order and
/// builds one neighborhood per element. Implementations must keep element
/// indices stable while a search runs: committing a move may mutate an
/// element in place but must not reorder or reallocate the collection.
pub trait ElementSolution {
    /// The solution element type.
    type Element: Clone;

    /// Number of elements.
    fn element_count(&self) -> usize;

    /// Element at `index`.
    fn element(&self, index: usize) -> &Self::Element;
}

/// Enumerates candidate moves around one solution element.
///
/// Must be repeatable: the engine may call it once per element per pass,
/// in no particular global order.
pub trait NeighborhoodGetter<S, E> {
    /// The move type.
    type Move;

    /// Returns the candidate moves, in the order they should be tried.
    fn neighborhood(&mut self, solution: &S, element: &E) -> Vec<Self::Move>;
}

impl<S, E, M, F> NeighborhoodGetter<S, E> for F
where
    F: FnMut(&S, &E) -> Vec<M>,
{
    type Move = M;

    fn neighborhood(&mut self, solution: &S, element: &E) -> Vec<M> {
        self(solution, element)
    }
}

/// Scores a candidate move.
///
/// Must not mutate the permanent solution; committing is the
/// [`Committer`]'s job.
pub trait GainEvaluator<S, E, M> {
    /// The gain type.
    type Gain: Gain;

    /// Returns the gain of applying `mv` to `solution`.
    fn gain(&mut self, solution: &S, element: &E, mv: &M) -> Self::Gain;

    /// Called after `mv` has been committed.
    ///
    /// Stateful evaluators (tabu lists, annealing temperatures) hook in
    /// here. The default implementation is a no-op.
    fn on_commit(&mut self, _solution: &S, _element: &E, _mv: &M) {}
}

impl<S, E, M, G, F> GainEvaluator<S, E, M> for F
where
    F: FnMut(&S, &E, &M) -> G,
    G: Gain,
{
    type Gain = G;

    fn gain(&mut self, solution: &S, element: &E, mv: &M) -> G {
        self(solution, element, mv)
    }
}

/// Permanently applies a move.
///
/// The only place where the solution is mutated. Returns whether the move
/// was applied; the solution invariants must hold either way.
pub trait Committer<S, E, M> {
    fn commit(&mut self, solution: &mut S, element: &E, mv: &M) -> bool;
}

impl<S, E, M, F> Committer<S, E, M> for F
where
    F: FnMut(&mut S, &E, &M) -> bool,
{
    fn commit(&mut self, solution: &mut S, element: &E, mv: &M) -> bool {
        self(solution, element, mv)
    }
}

/// Advisory early exit from a neighborhood scan.
///
/// Consulted after every non-improving move. Returning `true` stops the
/// scan of the current element only; the pass continues with the next
/// element.
pub trait StopCondition<S, E, M> {
    fn should_stop(&mut self, solution: &S, element: &E, mv: &M) -> bool;

    /// Called before each neighborhood scan. Stateful conditions clear
    /// their per-scan budget here. The default implementation is a no-op.
    fn reset(&mut self) {}
}

impl<S, E, M, F> StopCondition<S, E, M> for F
where
    F: FnMut(&S, &E, &M) -> bool,
{
    fn should_stop(&mut self, solution: &S, element: &E, mv: &M) -> bool {
        self(solution, element, mv)
    }
}

/// Stop condition that never stops.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl<S, E, M> StopCondition<S, E, M> for NeverStop {
    #[inline]
    fn should_stop(&mut self, _solution: &S, _element: &E, _mv: &M) -> bool {
        false
    }
}

/// Stops a scan once `limit` non-improving moves have been seen in it.
#[derive(Debug, Clone)]
pub struct MaxNonImproving {
    limit: usize,
    seen: usize,
}

impl MaxNonImproving {
    pub fn new(limit: usize) -> Self {
        Self { limit, seen: 0 }
    }
}

impl<S, E, M> StopCondition<S, E, M> for MaxNonImproving {
    fn should_stop(&mut self, _solution: &S, _element: &E, _mv: &M) -> bool {
        self.seen += 1;
        self.seen >= self.limit
    }

    fn reset(&mut self) {
        self.seen = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_sign_convention() {
        assert!(1.0f64.is_improvement());
        assert!(!0.0f64.is_improvement());
        assert!(!(-3.5f64).is_improvement());
        assert!(2i64.is_improvement());
        assert!(!0i32.is_improvement());
    }

    #[test]
    fn test_closure_components() {
        let mut getter = |s: &i32, _: &()| vec![*s - 1, *s + 1];
        let mut gain = |s: &i32, _: &(), m: &i32| (s.abs() - m.abs()) as i64;
        let mut commit = |s: &mut i32, _: &(), m: &i32| {
            *s = *m;
            true
        };

        let mut x = 3;
        let moves = getter.neighborhood(&x, &());
        assert_eq!(moves, vec![2, 4]);
        assert_eq!(gain.gain(&x, &(), &moves[0]), 1);
        assert!(commit.commit(&mut x, &(), &moves[0]));
        assert_eq!(x, 2);
    }

    #[test]
    fn test_max_non_improving_budget_per_scan() {
        let mut stop = MaxNonImproving::new(2);
        let check = |stop: &mut MaxNonImproving| {
            StopCondition::<(), (), ()>::should_stop(stop, &(), &(), &())
        };
        assert!(!check(&mut stop));
        assert!(check(&mut stop));
        assert!(check(&mut stop), "stays exhausted until the next scan");

        StopCondition::<(), (), ()>::reset(&mut stop);
        assert!(!check(&mut stop));
    }
}
