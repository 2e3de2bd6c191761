//! Facility-location solution: a Voronoi partition plus opening costs.

use std::collections::BTreeSet;
use std::fmt;

use super::update::Update;
use crate::error::{LocalSearchError, Result};
use crate::metric::{Distance, Metric, Vertex};
use crate::voronoi::Voronoi;

/// A facility-location solution.
///
/// Chosen facilities are the generators of the wrapped [`Voronoi`]
/// partition; unchosen facilities are the closed candidates. The two sets
/// are disjoint and together form the facility universe.
///
/// The objective is the sum of the opening costs of the chosen facilities
/// plus the Voronoi cost of serving every client from its nearest chosen
/// facility.
///
/// # Examples
///
/// ```
/// use u_localsearch::facility::FacilityLocationSolution;
///
/// let line = |a: &i64, b: &i64| (a - b).abs();
/// let mut solution = FacilityLocationSolution::new(
///     [0],
///     [10],
///     [0, 2, 9, 11],
///     &line,
///     |_: &i64| 3,
///     1_000,
/// )
/// .unwrap();
///
/// assert_eq!(solution.total_cost(), 3 + (0 + 2 + 9 + 11));
/// let delta = solution.add_facility(&10).unwrap();
/// // Clients 9 and 11 move to the new facility.
/// assert_eq!(delta, 3 - 8 - 10);
/// ```
pub struct FacilityLocationSolution<'m, V, M, C>
where
    V: Vertex,
    M: Metric<V>,
{
    voronoi: Voronoi<'m, V, M>,
    unchosen: BTreeSet<V>,
    facility_cost: C,
}

impl<'m, V, M, C> FacilityLocationSolution<'m, V, M, C>
where
    V: Vertex,
    M: Metric<V>,
    C: Fn(&V) -> M::Distance,
{
    /// Builds a solution from the chosen and unchosen facility sets.
    ///
    /// # Errors
    ///
    /// Returns [`LocalSearchError::OverlappingFacilities`] if a facility is
    /// listed as both chosen and unchosen.
    pub fn new<F, U, I>(
        chosen: F,
        unchosen: U,
        clients: I,
        metric: &'m M,
        facility_cost: C,
        cost_of_no_facility: M::Distance,
    ) -> Result<Self>
    where
        F: IntoIterator<Item = V>,
        U: IntoIterator<Item = V>,
        I: IntoIterator<Item = V>,
    {
        let chosen: BTreeSet<V> = chosen.into_iter().collect();
        let unchosen: BTreeSet<V> = unchosen.into_iter().collect();
        if let Some(both) = chosen.intersection(&unchosen).next() {
            return Err(LocalSearchError::OverlappingFacilities(format!("{both:?}")));
        }

        Ok(Self {
            voronoi: Voronoi::new(chosen, clients, metric, cost_of_no_facility),
            unchosen,
            facility_cost,
        })
    }

    /// Open facilities, in ascending order.
    pub fn chosen_facilities(&self) -> &BTreeSet<V> {
        self.voronoi.generators()
    }

    /// Closed candidate facilities, in ascending order.
    pub fn unchosen_facilities(&self) -> &BTreeSet<V> {
        &self.unchosen
    }

    /// Whether `facility` is currently open.
    pub fn is_chosen(&self, facility: &V) -> bool {
        self.voronoi.generators().contains(facility)
    }

    /// The underlying client assignment.
    pub fn voronoi(&self) -> &Voronoi<'m, V, M> {
        &self.voronoi
    }

    /// Opening cost of `facility`.
    pub fn facility_cost(&self, facility: &V) -> M::Distance {
        (self.facility_cost)(facility)
    }

    /// Sum of the opening costs of the chosen facilities.
    pub fn opening_cost(&self) -> M::Distance {
        self.chosen_facilities()
            .iter()
            .fold(M::Distance::zero(), |acc, f| acc + self.facility_cost(f))
    }

    /// Objective value: opening costs plus service cost.
    pub fn total_cost(&self) -> M::Distance {
        self.opening_cost() + self.voronoi.cost()
    }

    /// Opens `facility` and returns the change of the objective.
    ///
    /// # Errors
    ///
    /// Fails without touching the solution if `facility` is already chosen
    /// or not part of the facility universe.
    pub fn add_facility(&mut self, facility: &V) -> Result<M::Distance> {
        self.check_unchosen(facility)?;
        self.unchosen.remove(facility);
        let delta = self.voronoi.add_generator(facility.clone());
        Ok(self.facility_cost(facility) + delta)
    }

    /// Closes `facility` and returns the change of the objective.
    ///
    /// # Errors
    ///
    /// Fails without touching the solution if `facility` is not chosen.
    pub fn remove_facility(&mut self, facility: &V) -> Result<M::Distance> {
        self.check_chosen(facility)?;
        self.unchosen.insert(facility.clone());
        let delta = self.voronoi.remove_generator(facility);
        Ok(-self.facility_cost(facility) + delta)
    }

    /// Applies `update` and returns the change of the objective.
    ///
    /// A swap opens `to` before closing `from`, so the last open facility
    /// can be swapped without passing through the empty state. All
    /// preconditions are checked before anything is mutated.
    pub fn apply(&mut self, update: &Update<V>) -> Result<M::Distance> {
        match update {
            Update::Add(f) => self.add_facility(f),
            Update::Remove(f) => self.remove_facility(f),
            Update::Swap { from, to } => {
                self.check_chosen(from)?;
                self.check_unchosen(to)?;
                let opened = self.add_facility(to)?;
                let closed = self.remove_facility(from)?;
                Ok(opened + closed)
            }
        }
    }

    /// Change of the objective [`add_facility`](Self::add_facility) would
    /// report, without mutating the solution.
    pub fn would_add_cost(&self, facility: &V) -> Result<M::Distance> {
        self.check_unchosen(facility)?;
        Ok(self.facility_cost(facility) + self.voronoi.add_generator_delta(facility))
    }

    /// Change of the objective [`remove_facility`](Self::remove_facility)
    /// would report, without mutating the solution.
    pub fn would_remove_cost(&self, facility: &V) -> Result<M::Distance> {
        self.check_chosen(facility)?;
        Ok(-self.facility_cost(facility) + self.voronoi.remove_generator_delta(facility))
    }

    /// Change of the objective a swap would report, without mutating the
    /// solution.
    pub fn would_swap_cost(&self, from: &V, to: &V) -> Result<M::Distance> {
        self.check_chosen(from)?;
        self.check_unchosen(to)?;
        Ok(self.facility_cost(to) - self.facility_cost(from)
            + self.voronoi.swap_generator_delta(from, to))
    }

    /// Change of the objective [`apply`](Self::apply) would report.
    pub fn would_apply(&self, update: &Update<V>) -> Result<M::Distance> {
        match update {
            Update::Add(f) => self.would_add_cost(f),
            Update::Remove(f) => self.would_remove_cost(f),
            Update::Swap { from, to } => self.would_swap_cost(from, to),
        }
    }

    fn check_unchosen(&self, facility: &V) -> Result<()> {
        if self.unchosen.contains(facility) {
            Ok(())
        } else if self.is_chosen(facility) {
            Err(LocalSearchError::FacilityAlreadyChosen(format!("{facility:?}")))
        } else {
            Err(LocalSearchError::UnknownFacility(format!("{facility:?}")))
        }
    }

    fn check_chosen(&self, facility: &V) -> Result<()> {
        if self.is_chosen(facility) {
            Ok(())
        } else if self.unchosen.contains(facility) {
            Err(LocalSearchError::FacilityNotChosen(format!("{facility:?}")))
        } else {
            Err(LocalSearchError::UnknownFacility(format!("{facility:?}")))
        }
    }
}

impl<V, M, C> Clone for FacilityLocationSolution<'_, V, M, C>
where
    V: Vertex,
    M: Metric<V>,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            voronoi: self.voronoi.clone(),
            unchosen: self.unchosen.clone(),
            facility_cost: self.facility_cost.clone(),
        }
    }
}

impl<V, M, C> fmt::Debug for FacilityLocationSolution<'_, V, M, C>
where
    V: Vertex,
    M: Metric<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacilityLocationSolution")
            .field("chosen", self.voronoi.generators())
            .field("unchosen", &self.unchosen)
            .field("service_cost", &self.voronoi.cost())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(a: &i64, b: &i64) -> i64 {
        (a - b).abs()
    }

    fn unit_cost(_: &i64) -> i64 {
        5
    }

    type Solution<'m> = FacilityLocationSolution<'m, i64, fn(&i64, &i64) -> i64, fn(&i64) -> i64>;

    fn sample(metric: &fn(&i64, &i64) -> i64) -> Solution<'_> {
        FacilityLocationSolution::new(
            [0],
            [10, 20],
            [0, 1, 9, 11, 19, 21],
            metric,
            unit_cost as fn(&i64) -> i64,
            1_000,
        )
        .unwrap()
    }

    #[test]
    fn test_overlap_rejected() {
        let metric = line as fn(&i64, &i64) -> i64;
        let err = FacilityLocationSolution::new(
            [1, 2],
            [2, 3],
            [1, 2, 3],
            &metric,
            unit_cost as fn(&i64) -> i64,
            1_000,
        )
        .unwrap_err();
        assert_eq!(err, LocalSearchError::OverlappingFacilities("2".into()));
    }

    #[test]
    fn test_add_and_remove_deltas() {
        let metric = line as fn(&i64, &i64) -> i64;
        let mut solution = sample(&metric);
        let before = solution.total_cost();

        let delta = solution.add_facility(&20).unwrap();
        assert_eq!(solution.total_cost() - before, delta);
        assert!(solution.is_chosen(&20));
        assert!(!solution.unchosen_facilities().contains(&20));

        let before = solution.total_cost();
        let delta = solution.remove_facility(&0).unwrap();
        assert_eq!(solution.total_cost() - before, delta);
        assert!(solution.unchosen_facilities().contains(&0));
    }

    #[test]
    fn test_precondition_errors() {
        let metric = line as fn(&i64, &i64) -> i64;
        let mut solution = sample(&metric);

        assert_eq!(
            solution.add_facility(&0),
            Err(LocalSearchError::FacilityAlreadyChosen("0".into()))
        );
        assert_eq!(
            solution.remove_facility(&10),
            Err(LocalSearchError::FacilityNotChosen("10".into()))
        );
        assert_eq!(
            solution.add_facility(&99),
            Err(LocalSearchError::UnknownFacility("99".into()))
        );
        assert_eq!(
            solution.apply(&Update::Swap { from: 0, to: 0 }),
            Err(LocalSearchError::FacilityAlreadyChosen("0".into()))
        );
        // Nothing changed.
        assert_eq!(solution.chosen_facilities().len(), 1);
        assert_eq!(solution.unchosen_facilities().len(), 2);
    }

    #[test]
    fn test_would_cost_matches_apply() {
        let metric = line as fn(&i64, &i64) -> i64;
        let solution = sample(&metric);

        for update in [
            Update::Add(10),
            Update::Add(20),
            Update::Remove(0),
            Update::Swap { from: 0, to: 10 },
            Update::Swap { from: 0, to: 20 },
        ] {
            let mut copy = solution.clone();
            let applied = copy.apply(&update).unwrap();
            assert_eq!(
                solution.would_apply(&update).unwrap(),
                applied,
                "pure delta differs for {update:?}"
            );
        }
    }

    #[test]
    fn test_swap_equals_add_then_remove() {
        let metric = line as fn(&i64, &i64) -> i64;
        let solution = sample(&metric);

        let mut copy = solution.clone();
        let expected = copy.add_facility(&20).unwrap() + copy.remove_facility(&0).unwrap();
        assert_eq!(solution.would_swap_cost(&0, &20).unwrap(), expected);
    }

    #[test]
    fn test_partition_invariant_after_updates() {
        let metric = line as fn(&i64, &i64) -> i64;
        let mut solution = sample(&metric);

        solution.apply(&Update::Add(10)).unwrap();
        solution.apply(&Update::Swap { from: 0, to: 20 }).unwrap();
        solution.apply(&Update::Remove(10)).unwrap();

        let chosen = solution.chosen_facilities();
        let unchosen = solution.unchosen_facilities();
        assert!(chosen.is_disjoint(unchosen));
        let universe: BTreeSet<i64> = chosen.union(unchosen).copied().collect();
        assert_eq!(universe, BTreeSet::from([0, 10, 20]));
    }

    #[test]
    fn test_opening_cost() {
        let metric = line as fn(&i64, &i64) -> i64;
        let mut solution = sample(&metric);
        assert_eq!(solution.opening_cost(), 5);
        solution.add_facility(&10).unwrap();
        assert_eq!(solution.opening_cost(), 10);
    }
}
