//! Gain decorators that turn plain descent into a metaheuristic.
//!
//! A decorator wraps any [`GainEvaluator`](crate::search::GainEvaluator)
//! and rewrites the gains the engine sees, so the engine itself stays a
//! strictly-improving local search:
//!
//! - [`AnnealingGain`]: Metropolis acceptance of worsening moves with a
//!   cooling schedule
//! - [`TabuGain`]: short-term memory forbidding moves that touch recently
//!   changed attributes
//!
//! Both update their state in
//! [`on_commit`](crate::search::GainEvaluator::on_commit) and compose by
//! nesting. Put the tabu list inside the annealing rule so that tabu moves
//! are rejected outright:
//!
//! ```
//! use u_localsearch::decorators::{AnnealingConfig, AnnealingGain, TabuConfig, TabuGain};
//!
//! let gain = |x: &i64, _: &(), y: &i64| x.abs() - y.abs();
//! let tabu = TabuGain::new(gain, |_: &(), y: &i64| vec![*y], TabuConfig::default()).unwrap();
//! let gain = AnnealingGain::new(tabu, AnnealingConfig::default().with_seed(1)).unwrap();
//! assert!(!gain.is_frozen());
//! ```
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Glover, F. (1989), "Tabu Search, Part I"

mod annealing;
mod tabu;

pub use annealing::{AnnealingConfig, AnnealingGain, CoolingSchedule};
pub use tabu::{TabuConfig, TabuGain};
