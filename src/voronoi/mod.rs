//! Voronoi partition over a metric.
//!
//! Maintains, for a mutable set of *generators* (open facilities) and a
//! fixed set of *vertices* (clients), the assignment of every vertex to
//! its nearest generator together with the total assigned distance.
//! Opening or closing a generator updates only the affected vertices and
//! reports the cost delta; pure `*_delta` queries compute the same deltas
//! without touching the partition, which is what tentative move
//! evaluation uses.
//!
//! The metric need not be Euclidean nor satisfy the triangle inequality.

mod partition;

pub use partition::{GeneratorVertices, Voronoi};
