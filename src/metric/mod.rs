//! Metrics over vertex identifiers.
//!
//! A metric is the only view the rest of the crate has of the underlying
//! space: a total, symmetric function from two vertices to a [`Distance`].
//! Closures `Fn(&V, &V) -> D` implement [`Metric`] directly; dense
//! [`MatrixMetric`] and planar [`EuclideanMetric`] cover the common
//! integer-indexed cases.

mod matrix;
mod types;

pub use matrix::{EuclideanMetric, MatrixMetric};
pub use types::{Distance, Metric, Vertex};
