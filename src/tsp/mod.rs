//! 2-opt for the traveling salesman problem.
//!
//! A worked example of the single-solution search variant: the whole tour
//! is one neighborhood, scored by the length change of exchanging two
//! edges.

mod cycle;
mod runner;
mod two_opt;

pub use cycle::Cycle;
pub use runner::{TwoOptConfig, TwoOptResult, TwoOptRunner};
pub use two_opt::{TwoOptCommit, TwoOptGain, TwoOptMove, TwoOptNeighborhood};
