//! Generic local search with incremental facility-location maintenance.
//!
//! - **Search engine** ([`search`]): a local-search loop generic over the
//!   solution type and four pluggable components (neighborhood getter,
//!   gain evaluator, committer, stop condition), with first- and
//!   best-improvement strategies and multi-/single-solution variants.
//! - **Voronoi partition** ([`voronoi`]): the nearest-generator assignment
//!   of clients under an arbitrary metric, updated incrementally when a
//!   generator is opened or closed.
//! - **Facility location** ([`facility`]): add/remove/swap local search
//!   for uncapacitated facility location on top of the partition.
//! - **k-median** ([`k_median`]): single-swap search with zero opening
//!   costs.
//! - **2-opt** ([`tsp`]): the single-solution variant on a tour.
//! - **Decorators** ([`decorators`]): simulated-annealing and tabu gain
//!   wrappers that turn descent into a metaheuristic.
//! - **Multistart** ([`multistart`]): independent searches, in parallel
//!   with the `parallel` feature.
//!
//! # Architecture
//!
//! The engine knows nothing about facilities: it only asks for moves,
//! gains and commits. Problem modules supply those components and a
//! runner that wires them into the engine and reports a result.

pub mod decorators;
pub mod error;
pub mod facility;
pub mod k_median;
pub mod metric;
pub mod multistart;
pub mod search;
pub mod tsp;
pub mod voronoi;

pub use error::{LocalSearchError, Result};
