//! Incrementally maintained nearest-generator assignment.

use std::collections::{btree_set, BTreeMap, BTreeSet, HashMap};
use std::fmt;

use crate::metric::{Distance, Metric, Vertex};

/// Voronoi partition of a fixed vertex set by a mutable generator set.
///
/// Every vertex is assigned to its nearest generator under the metric.
/// Among equidistant generators the lowest one (by `Ord`) wins, both when
/// a generator is added and when a removed generator's vertices are
/// reassigned, so the assignment only depends on the generator set and
/// never on the order of mutations.
///
/// While no generator is open every vertex costs `cost_of_no_generator`.
///
/// Adding or removing a generator returns the signed change of the total
/// assigned distance (negative = improvement). An addition costs
/// `O(|vertices|)` metric evaluations, a removal
/// `O(|orphaned vertices| * |generators|)`. No spatial index is used.
///
/// # Examples
///
/// ```
/// use u_localsearch::voronoi::Voronoi;
///
/// let line = |a: &i64, b: &i64| (a - b).abs();
/// let mut voronoi = Voronoi::new([0], [0, 4, 10], &line, 1_000);
/// assert_eq!(voronoi.cost(), 14);
///
/// let delta = voronoi.add_generator(10);
/// assert_eq!(delta, -10);
/// assert_eq!(voronoi.generator_of(&4), Some(&0));
/// ```
pub struct Voronoi<'m, V, M>
where
    V: Vertex,
    M: Metric<V>,
{
    metric: &'m M,
    generators: BTreeSet<V>,
    vertices: Vec<V>,
    vertex_index: HashMap<V, usize>,
    /// Assigned generator and its distance, parallel to `vertices`.
    assignment: Vec<Option<(V, M::Distance)>>,
    /// Generator -> indices of the vertices assigned to it. Only
    /// generators with at least one vertex have an entry.
    by_generator: BTreeMap<V, BTreeSet<usize>>,
    cost_of_no_generator: M::Distance,
    cost: M::Distance,
}

impl<'m, V, M> Voronoi<'m, V, M>
where
    V: Vertex,
    M: Metric<V>,
{
    /// Builds the partition for an initial generator set.
    ///
    /// Duplicate vertices are ignored; the first occurrence fixes the
    /// vertex order.
    pub fn new<G, I>(
        generators: G,
        vertices: I,
        metric: &'m M,
        cost_of_no_generator: M::Distance,
    ) -> Self
    where
        G: IntoIterator<Item = V>,
        I: IntoIterator<Item = V>,
    {
        let mut vertex_index = HashMap::new();
        let mut unique = Vec::new();
        for v in vertices {
            if !vertex_index.contains_key(&v) {
                vertex_index.insert(v.clone(), unique.len());
                unique.push(v);
            }
        }

        let n = unique.len();
        let mut voronoi = Self {
            metric,
            generators: generators.into_iter().collect(),
            vertices: unique,
            vertex_index,
            assignment: vec![None; n],
            by_generator: BTreeMap::new(),
            cost_of_no_generator,
            cost: M::Distance::zero(),
        };

        for idx in 0..n {
            if let Some((g, d)) = voronoi.nearest_excluding(&voronoi.vertices[idx], None) {
                voronoi.assign(idx, g, d);
            }
        }
        voronoi.cost = voronoi.recompute_cost();
        voronoi
    }

    /// The currently open generators, in ascending order.
    pub fn generators(&self) -> &BTreeSet<V> {
        &self.generators
    }

    /// The vertex universe, in construction order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// The metric the partition is built on.
    pub fn metric(&self) -> &'m M {
        self.metric
    }

    /// Cost charged per vertex while no generator is open.
    pub fn cost_of_no_generator(&self) -> M::Distance {
        self.cost_of_no_generator
    }

    /// Vertices currently assigned to `generator` (empty if it has none or
    /// is not open).
    pub fn vertices_for_generator(&self, generator: &V) -> GeneratorVertices<'_, V> {
        GeneratorVertices {
            vertices: &self.vertices,
            indices: self.by_generator.get(generator).map(|set| set.iter()),
        }
    }

    /// The generator `vertex` is assigned to, if any generator is open and
    /// `vertex` belongs to the partition.
    pub fn generator_of(&self, vertex: &V) -> Option<&V> {
        let idx = *self.vertex_index.get(vertex)?;
        self.assignment[idx].as_ref().map(|(g, _)| g)
    }

    /// Distance from `vertex` to its assigned generator.
    pub fn distance_to_generator(&self, vertex: &V) -> Option<M::Distance> {
        let idx = *self.vertex_index.get(vertex)?;
        self.assignment[idx].as_ref().map(|&(_, d)| d)
    }

    /// Total assigned distance, or `cost_of_no_generator` per vertex while
    /// no generator is open. Maintained incrementally.
    pub fn cost(&self) -> M::Distance {
        self.cost
    }

    /// Recomputes the total cost from the stored assignment.
    pub fn recompute_cost(&self) -> M::Distance {
        self.assignment
            .iter()
            .fold(M::Distance::zero(), |acc, slot| match slot {
                Some((_, d)) => acc + *d,
                None => acc + self.cost_of_no_generator,
            })
    }

    /// Opens `generator` and reassigns every vertex it is now nearest to.
    ///
    /// Returns the change of the total cost.
    ///
    /// # Panics
    ///
    /// Panics if `generator` is already open.
    pub fn add_generator(&mut self, generator: V) -> M::Distance {
        assert!(
            !self.generators.contains(&generator),
            "called `Voronoi::add_generator` with an open generator {generator:?}"
        );

        let was_empty = self.generators.is_empty();
        let mut delta = M::Distance::zero();

        for idx in 0..self.vertices.len() {
            let d = self.metric.distance(&self.vertices[idx], &generator);
            let improves = match &self.assignment[idx] {
                None => {
                    delta = delta + (d - self.cost_of_no_generator);
                    true
                }
                Some((g, old)) if is_closer(d, &generator, *old, g) => {
                    delta = delta + (d - *old);
                    true
                }
                Some(_) => false,
            };
            if improves {
                self.assign(idx, generator.clone(), d);
            }
        }

        self.generators.insert(generator);
        self.cost = if was_empty {
            self.recompute_cost()
        } else {
            self.cost + delta
        };
        delta
    }

    /// Closes `generator` and moves its vertices to their nearest remaining
    /// generator.
    ///
    /// Returns the change of the total cost. Closing the last generator
    /// charges `cost_of_no_generator` to every vertex.
    ///
    /// # Panics
    ///
    /// Panics if `generator` is not open.
    pub fn remove_generator(&mut self, generator: &V) -> M::Distance {
        assert!(
            self.generators.remove(generator),
            "called `Voronoi::remove_generator` with a closed generator {generator:?}"
        );

        let mut delta = M::Distance::zero();
        let orphans = self.by_generator.remove(generator).unwrap_or_default();

        for idx in orphans {
            let old = match &self.assignment[idx] {
                Some((_, d)) => *d,
                None => continue,
            };
            match self.nearest_excluding(&self.vertices[idx], None) {
                Some((g, d)) => {
                    delta = delta + (d - old);
                    self.assign(idx, g, d);
                }
                None => {
                    delta = delta + (self.cost_of_no_generator - old);
                    self.assignment[idx] = None;
                }
            }
        }

        self.cost = if self.generators.is_empty() {
            self.recompute_cost()
        } else {
            self.cost + delta
        };
        delta
    }

    /// Cost change [`add_generator`](Self::add_generator) would report,
    /// computed without mutating the partition.
    ///
    /// # Panics
    ///
    /// Panics if `generator` is already open.
    pub fn add_generator_delta(&self, generator: &V) -> M::Distance {
        assert!(
            !self.generators.contains(generator),
            "called `Voronoi::add_generator_delta` with an open generator {generator:?}"
        );

        let mut delta = M::Distance::zero();
        for (idx, v) in self.vertices.iter().enumerate() {
            let d = self.metric.distance(v, generator);
            match &self.assignment[idx] {
                None => delta = delta + (d - self.cost_of_no_generator),
                Some((g, old)) if is_closer(d, generator, *old, g) => delta = delta + (d - *old),
                Some(_) => {}
            }
        }
        delta
    }

    /// Cost change [`remove_generator`](Self::remove_generator) would
    /// report, computed without mutating the partition.
    ///
    /// # Panics
    ///
    /// Panics if `generator` is not open.
    pub fn remove_generator_delta(&self, generator: &V) -> M::Distance {
        assert!(
            self.generators.contains(generator),
            "called `Voronoi::remove_generator_delta` with a closed generator {generator:?}"
        );

        let mut delta = M::Distance::zero();
        for &idx in self.by_generator.get(generator).into_iter().flatten() {
            let Some((_, old)) = &self.assignment[idx] else {
                continue;
            };
            let new = self
                .nearest_excluding(&self.vertices[idx], Some(generator))
                .map_or(self.cost_of_no_generator, |(_, d)| d);
            delta = delta + (new - *old);
        }
        delta
    }

    /// Cost change of opening `to` and then closing `from`, computed
    /// without mutating the partition.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not open or `to` is already open.
    pub fn swap_generator_delta(&self, from: &V, to: &V) -> M::Distance {
        assert!(
            self.generators.contains(from),
            "called `Voronoi::swap_generator_delta` with a closed generator {from:?}"
        );
        assert!(
            !self.generators.contains(to),
            "called `Voronoi::swap_generator_delta` with an open generator {to:?}"
        );

        let mut delta = M::Distance::zero();
        for (idx, v) in self.vertices.iter().enumerate() {
            let Some((g, old)) = &self.assignment[idx] else {
                continue;
            };
            let d_to = self.metric.distance(v, to);
            if g == from {
                let new = match self.nearest_excluding(v, Some(from)) {
                    Some((h, d_h)) if !is_closer(d_to, to, d_h, &h) => d_h,
                    _ => d_to,
                };
                delta = delta + (new - *old);
            } else if is_closer(d_to, to, *old, g) {
                delta = delta + (d_to - *old);
            }
        }
        delta
    }

    /// Nearest open generator to `vertex`, skipping `excluded`.
    ///
    /// Generators are scanned in ascending order and only a strictly
    /// smaller distance replaces the incumbent, so ties go to the lowest
    /// generator.
    fn nearest_excluding(&self, vertex: &V, excluded: Option<&V>) -> Option<(V, M::Distance)> {
        let mut best: Option<(&V, M::Distance)> = None;
        for g in &self.generators {
            if excluded == Some(g) {
                continue;
            }
            let d = self.metric.distance(vertex, g);
            if best.is_none_or(|(_, b)| d < b) {
                best = Some((g, d));
            }
        }
        best.map(|(g, d)| (g.clone(), d))
    }

    fn assign(&mut self, idx: usize, generator: V, distance: M::Distance) {
        if let Some((old, _)) = &self.assignment[idx] {
            if let Some(set) = self.by_generator.get_mut(old) {
                set.remove(&idx);
                if set.is_empty() {
                    self.by_generator.remove(old);
                }
            }
        }
        self.by_generator
            .entry(generator.clone())
            .or_default()
            .insert(idx);
        self.assignment[idx] = Some((generator, distance));
    }
}

/// Iterator over the vertices assigned to one generator, in vertex order.
#[derive(Debug, Clone)]
pub struct GeneratorVertices<'a, V> {
    vertices: &'a [V],
    indices: Option<btree_set::Iter<'a, usize>>,
}

impl<'a, V> Iterator for GeneratorVertices<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let idx = self.indices.as_mut()?.next()?;
        Some(&self.vertices[*idx])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices
            .as_ref()
            .map_or((0, Some(0)), |it| it.size_hint())
    }
}

/// Whether a candidate at distance `d_new` beats the incumbent, with the
/// lower generator winning ties.
#[inline]
fn is_closer<V: Ord, D: Distance>(d_new: D, g_new: &V, d_old: D, g_old: &V) -> bool {
    d_new < d_old || (d_new == d_old && g_new < g_old)
}

impl<V, M> Clone for Voronoi<'_, V, M>
where
    V: Vertex,
    M: Metric<V>,
{
    fn clone(&self) -> Self {
        Self {
            metric: self.metric,
            generators: self.generators.clone(),
            vertices: self.vertices.clone(),
            vertex_index: self.vertex_index.clone(),
            assignment: self.assignment.clone(),
            by_generator: self.by_generator.clone(),
            cost_of_no_generator: self.cost_of_no_generator,
            cost: self.cost,
        }
    }
}

impl<V, M> fmt::Debug for Voronoi<'_, V, M>
where
    V: Vertex,
    M: Metric<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Voronoi")
            .field("generators", &self.generators)
            .field("vertices", &self.vertices.len())
            .field("cost", &self.cost)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(a: &i64, b: &i64) -> i64 {
        (a - b).abs()
    }

    const NO_GEN: i64 = 1_000;

    /// Brute-force nearest generator with lowest-id tie-break.
    fn brute_force<M: Metric<i64, Distance = i64>>(voronoi: &Voronoi<'_, i64, M>) {
        for v in voronoi.vertices() {
            let expected = voronoi
                .generators()
                .iter()
                .min_by_key(|g| (voronoi.metric().distance(v, *g), **g));
            assert_eq!(
                voronoi.generator_of(v),
                expected,
                "vertex {v} assigned to the wrong generator"
            );
        }
        assert_eq!(voronoi.cost(), voronoi.recompute_cost());
    }

    #[test]
    fn test_initial_assignment() {
        let metric = line;
        let voronoi = Voronoi::new([0, 10], [1, 4, 6, 9, 10], &metric, NO_GEN);

        assert_eq!(voronoi.generator_of(&1), Some(&0));
        assert_eq!(voronoi.generator_of(&4), Some(&0));
        assert_eq!(voronoi.generator_of(&6), Some(&10));
        assert_eq!(voronoi.cost(), 1 + 4 + 4 + 1);
        brute_force(&voronoi);
    }

    #[test]
    fn test_no_generator_sentinel() {
        let metric = line;
        let mut voronoi = Voronoi::new([], [1, 2, 3], &metric, NO_GEN);
        assert_eq!(voronoi.cost(), 3 * NO_GEN);
        assert_eq!(voronoi.generator_of(&1), None);

        let delta = voronoi.add_generator(2);
        assert_eq!(delta, (1 + 0 + 1) - 3 * NO_GEN);
        assert_eq!(voronoi.cost(), 2);

        let delta = voronoi.remove_generator(&2);
        assert_eq!(delta, 3 * NO_GEN - 2);
        assert_eq!(voronoi.cost(), 3 * NO_GEN);
        assert!(voronoi.generators().is_empty());
        assert_eq!(voronoi.distance_to_generator(&3), None);
    }

    #[test]
    fn test_add_returns_delta() {
        let metric = line;
        let mut voronoi = Voronoi::new([0], [0, 3, 7, 8], &metric, NO_GEN);
        let before = voronoi.cost();

        let delta = voronoi.add_generator(8);
        assert_eq!(delta, voronoi.cost() - before);
        assert_eq!(voronoi.generator_of(&7), Some(&8));
        assert_eq!(voronoi.generator_of(&3), Some(&0));
        brute_force(&voronoi);
    }

    #[test]
    fn test_remove_reassigns_orphans() {
        let metric = line;
        let mut voronoi = Voronoi::new([0, 5, 10], [1, 4, 6, 9], &metric, NO_GEN);
        let before = voronoi.cost();

        let delta = voronoi.remove_generator(&5);
        assert_eq!(delta, voronoi.cost() - before);
        assert_eq!(voronoi.generator_of(&4), Some(&0));
        assert_eq!(voronoi.generator_of(&6), Some(&10));
        assert_eq!(voronoi.vertices_for_generator(&5).count(), 0);
        brute_force(&voronoi);
    }

    #[test]
    fn test_tie_goes_to_lowest_generator() {
        let metric = line;
        // Vertex 5 is equidistant from 3 and 7.
        let mut voronoi = Voronoi::new([7], [5], &metric, NO_GEN);
        assert_eq!(voronoi.generator_of(&5), Some(&7));

        let delta = voronoi.add_generator(3);
        assert_eq!(delta, 0);
        assert_eq!(voronoi.generator_of(&5), Some(&3));

        // Adding a higher generator at the same distance keeps the lower.
        voronoi.remove_generator(&7);
        let delta = voronoi.add_generator(7);
        assert_eq!(delta, 0);
        assert_eq!(voronoi.generator_of(&5), Some(&3));
    }

    #[test]
    fn test_vertices_for_generator() {
        let metric = line;
        let voronoi = Voronoi::new([0, 10], [1, 2, 8, 9, 3], &metric, NO_GEN);
        let mut near_zero: Vec<i64> = voronoi.vertices_for_generator(&0).copied().collect();
        near_zero.sort();
        assert_eq!(near_zero, vec![1, 2, 3]);
        assert_eq!(voronoi.vertices_for_generator(&42).count(), 0);
    }

    #[test]
    fn test_duplicate_vertices_ignored() {
        let metric = line;
        let voronoi = Voronoi::new([0], [2, 2, 3], &metric, NO_GEN);
        assert_eq!(voronoi.vertices(), &[2, 3]);
        assert_eq!(voronoi.cost(), 5);
    }

    #[test]
    fn test_pure_deltas_match_mutations() {
        let metric = line;
        let base = Voronoi::new([0, 12], [1, 3, 5, 7, 9, 11, 13], &metric, NO_GEN);

        let mut added = base.clone();
        assert_eq!(base.add_generator_delta(&6), added.add_generator(6));

        let mut removed = base.clone();
        assert_eq!(base.remove_generator_delta(&12), removed.remove_generator(&12));

        let mut swapped = base.clone();
        let expected = swapped.add_generator(6) + swapped.remove_generator(&0);
        assert_eq!(base.swap_generator_delta(&0, &6), expected);

        // The original is untouched by the queries.
        assert_eq!(base.generators().len(), 2);
        brute_force(&base);
    }

    #[test]
    fn test_swap_delta_single_generator() {
        let metric = line;
        let base = Voronoi::new([0], [1, 2, 3], &metric, NO_GEN);
        let mut swapped = base.clone();
        let expected = swapped.add_generator(2) + swapped.remove_generator(&0);
        assert_eq!(base.swap_generator_delta(&0, &2), expected);
        assert_eq!(swapped.cost(), 2);
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let metric = line;
        let mut voronoi = Voronoi::new([0, 20], [2, 8, 11, 15, 19], &metric, NO_GEN);
        let before: Vec<Option<i64>> = voronoi
            .vertices()
            .iter()
            .map(|v| voronoi.generator_of(v).copied())
            .collect();

        let total = voronoi.add_generator(10) + voronoi.remove_generator(&10);
        assert_eq!(total, 0);

        let after: Vec<Option<i64>> = voronoi
            .vertices()
            .iter()
            .map(|v| voronoi.generator_of(v).copied())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_float_infinite_sentinel() {
        let metric = |a: &i64, b: &i64| (a - b).abs() as f64;
        let mut voronoi = Voronoi::new([], [0, 1], &metric, f64::INFINITY);
        assert!(voronoi.cost().is_infinite());

        let delta = voronoi.add_generator(0);
        assert_eq!(delta, f64::NEG_INFINITY);
        assert!((voronoi.cost() - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "open generator")]
    fn test_add_open_generator_panics() {
        let metric = line;
        let mut voronoi = Voronoi::new([1], [1, 2], &metric, NO_GEN);
        voronoi.add_generator(1);
    }

    #[test]
    #[should_panic(expected = "closed generator")]
    fn test_remove_closed_generator_panics() {
        let metric = line;
        let mut voronoi = Voronoi::new([1], [1, 2], &metric, NO_GEN);
        voronoi.remove_generator(&2);
    }
}
