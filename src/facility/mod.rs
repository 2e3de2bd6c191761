//! Uncapacitated facility location.
//!
//! Given a facility universe, a set of clients and a metric, choose a
//! subset of facilities to open so that opening costs plus the distance of
//! every client to its nearest open facility is minimal.
//!
//! - [`FacilityLocationSolution`]: the solution state, with checked
//!   add/remove/swap operations and pure "what if" cost queries
//! - [`FacilitySolutionAdapter`]: the fixed element list the multi-solution
//!   search engine iterates
//! - [`FacilityNeighborhood`], [`FacilityGain`], [`FacilityCommit`]: the
//!   search components
//! - [`FacilityLocationRunner`]: ties it all together
//!
//! # Examples
//!
//! ```
//! use u_localsearch::facility::{
//!     FacilityLocationConfig, FacilityLocationRunner, FacilityLocationSolution,
//!     FacilitySolutionAdapter,
//! };
//!
//! let line = |a: &i64, b: &i64| (a - b).abs();
//! let solution =
//!     FacilityLocationSolution::new([0], [50, 100], [0, 1, 49, 51, 99, 100], &line, |_: &i64| 5, 1_000)
//!         .unwrap();
//! let mut adapter = FacilitySolutionAdapter::new(solution);
//!
//! let result = FacilityLocationRunner::run(&mut adapter, &FacilityLocationConfig::default()).unwrap();
//! assert_eq!(result.chosen, vec![0, 50, 100]);
//! ```
//!
//! # References
//!
//! - Arya, V. et al. (2004), "Local search heuristics for k-median and
//!   facility location problems"
//! - Korupolu, M., Plaxton, C. G. & Rajaraman, R. (2000), "Analysis of a
//!   local search heuristic for facility location problems"

mod adapter;
mod components;
mod config;
mod runner;
mod solution;
mod update;

pub use adapter::{Facility, FacilitySolutionAdapter};
pub use components::{FacilityCommit, FacilityGain, FacilityNeighborhood, MoveSet};
pub use config::FacilityLocationConfig;
pub use runner::{FacilityLocationResult, FacilityLocationRunner};
pub use solution::FacilityLocationSolution;
pub use update::Update;
