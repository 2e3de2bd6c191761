//! Generic local search.
//!
//! The engine is generic over the solution and four pluggable components:
//! a [`NeighborhoodGetter`] that enumerates candidate moves, a
//! [`GainEvaluator`] that scores them, a [`Committer`] that applies the
//! chosen move, and an advisory [`StopCondition`]. Moves are accepted when
//! their gain is strictly positive.
//!
//! Two variants share the same components:
//!
//! - **multi-solution** ([`LocalSearch::search`]): the solution is an
//!   [`ElementSolution`] and one neighborhood is built per element;
//! - **single-solution** ([`LocalSearch::search_single`]): one
//!   neighborhood for the whole solution.
//!
//! The engine is single-threaded and synchronous. Independent searches on
//! independent solutions can be run side by side with
//! [`multistart`](crate::multistart).
//!
//! # References
//!
//! - Aarts, E. & Lenstra, J. K. (1997), *Local Search in Combinatorial
//!   Optimization*
//! - Arya, V. et al. (2004), "Local search heuristics for k-median and
//!   facility location problems", *SIAM J. Computing* 33(3), 544-562.

mod config;
mod engine;
mod types;

pub use config::{SearchConfig, SearchStrategy};
pub(crate) use config::require_bounded;
pub use engine::{LocalSearch, SearchResult};
pub use types::{
    Committer, ElementSolution, Gain, GainEvaluator, MaxNonImproving, NeighborhoodGetter,
    NeverStop, StopCondition,
};
