//! Dense metrics over integer vertex ids.

use super::types::{Distance, Metric};

/// A full distance matrix over vertices `0..dim`, stored row-major.
///
/// # Examples
///
/// ```
/// use u_localsearch::metric::{MatrixMetric, Metric};
///
/// let m = MatrixMetric::from_rows(vec![
///     vec![0.0, 2.0],
///     vec![2.0, 0.0],
/// ]);
/// assert_eq!(m.distance(&0, &1), 2.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixMetric<D> {
    dim: usize,
    data: Vec<D>,
}

impl<D: Distance> MatrixMetric<D> {
    /// Builds the matrix from rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square matrix.
    pub fn from_rows(rows: Vec<Vec<D>>) -> Self {
        let dim = rows.len();
        assert!(
            rows.iter().all(|r| r.len() == dim),
            "distance matrix must be square"
        );
        Self {
            dim,
            data: rows.into_iter().flatten().collect(),
        }
    }

    /// Builds a `dim x dim` matrix by evaluating `f` on every ordered pair.
    pub fn from_fn<F>(dim: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> D,
    {
        let mut data = Vec::with_capacity(dim * dim);
        for i in 0..dim {
            for j in 0..dim {
                data.push(f(i, j));
            }
        }
        Self { dim, data }
    }

    /// Number of vertices covered by the matrix.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Whether `d(i, j) == d(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.dim).all(|i| {
            (i + 1..self.dim).all(|j| self.data[i * self.dim + j] == self.data[j * self.dim + i])
        })
    }
}

impl<D: Distance> Metric<usize> for MatrixMetric<D> {
    type Distance = D;

    #[inline]
    fn distance(&self, a: &usize, b: &usize) -> D {
        self.data[a * self.dim + b]
    }
}

/// Euclidean distances between points in the plane, indexed by position.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuclideanMetric {
    points: Vec<(f64, f64)>,
}

impl EuclideanMetric {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Metric<usize> for EuclideanMetric {
    type Distance = f64;

    #[inline]
    fn distance(&self, a: &usize, b: &usize) -> f64 {
        let (ax, ay) = self.points[*a];
        let (bx, by) = self.points[*b];
        (ax - bx).hypot(ay - by)
    }
}
