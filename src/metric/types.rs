//! Core traits for distances and metrics.

use std::fmt::Debug;
use std::ops::{Add, Neg, Sub};

use crate::search::Gain;

/// Numeric type produced by a [`Metric`].
///
/// Distances must be totally ordered in practice (no NaN), cheaply
/// copyable, and closed under `+`, `-` and negation so that signed cost
/// deltas can be expressed in the same type.
///
/// Built-in implementations exist for `f64`, `f32`, `i64` and `i32`.
pub trait Distance:
    Gain + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self {
        Self::default()
    }
}

impl Distance for f64 {}
impl Distance for f32 {}
impl Distance for i64 {}
impl Distance for i32 {}

/// A symmetric distance function over vertex identifiers.
///
/// The metric is consumed, never mutated, and may be called arbitrarily
/// many times. Nothing here requires the triangle inequality.
///
/// Any `Fn(&V, &V) -> D` closure is a metric:
///
/// ```
/// use u_localsearch::metric::Metric;
///
/// let line = |a: &i32, b: &i32| (a - b).abs();
/// assert_eq!(line.distance(&2, &7), 5);
/// ```
pub trait Metric<V> {
    /// The distance type.
    type Distance: Distance;

    /// Returns the distance between `a` and `b`.
    fn distance(&self, a: &V, b: &V) -> Self::Distance;
}

impl<V, D, F> Metric<V> for F
where
    F: Fn(&V, &V) -> D,
    D: Distance,
{
    type Distance = D;

    fn distance(&self, a: &V, b: &V) -> D {
        self(a, b)
    }
}

/// Marker for vertex identifiers: comparable, hashable, cloneable.
///
/// `Ord` fixes the tie-break between equidistant generators (the lowest
/// vertex wins).
pub trait Vertex: Clone + Eq + Ord + std::hash::Hash + Debug {}

impl<T> Vertex for T where T: Clone + Eq + Ord + std::hash::Hash + Debug {}
