//! Hamiltonian cycle stored as a vertex sequence.

use crate::metric::{Distance, Metric};

/// A closed tour visiting every vertex once.
///
/// The tour is `vertices[0] -> vertices[1] -> ... -> vertices[n-1] ->
/// vertices[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cycle<V> {
    vertices: Vec<V>,
}

impl<V> Cycle<V> {
    pub fn new(vertices: Vec<V>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in tour order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Vertex at tour position `i`, wrapping around.
    pub fn at(&self, i: usize) -> &V {
        &self.vertices[i % self.vertices.len()]
    }

    /// Edges of the tour, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Total length of the tour under `metric`.
    pub fn length<M: Metric<V>>(&self, metric: &M) -> M::Distance {
        self.edges()
            .fold(M::Distance::zero(), |acc, (a, b)| acc + metric.distance(a, b))
    }

    /// Reverses the tour segment between positions `i` and `j`, inclusive.
    pub fn reverse(&mut self, i: usize, j: usize) {
        self.vertices[i..=j].reverse();
    }

    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }
}

impl<V> From<Vec<V>> for Cycle<V> {
    fn from(vertices: Vec<V>) -> Self {
        Self::new(vertices)
    }
}
