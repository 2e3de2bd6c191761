//! Element view of a facility-location solution for the search engine.

use std::collections::{BTreeSet, HashMap};

use super::solution::FacilityLocationSolution;
use super::update::Update;
use crate::error::{LocalSearchError, Result};
use crate::metric::{Metric, Vertex};
use crate::search::ElementSolution;

/// One facility of the universe together with its open/closed flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facility<V> {
    vertex: V,
    is_chosen: bool,
}

impl<V> Facility<V> {
    pub fn vertex(&self) -> &V {
        &self.vertex
    }

    pub fn is_chosen(&self) -> bool {
        self.is_chosen
    }
}

/// Presents a [`FacilityLocationSolution`] as a fixed, ordered list of
/// [`Facility`] elements.
///
/// The list holds every facility of the universe: the initially chosen
/// ones first, then the initially unchosen ones, each group in ascending
/// order. Its length and order never change; adding or removing a
/// facility only flips the `is_chosen` flag of the matching element, so
/// element indices stay valid while the engine iterates.
///
/// The adapter also keeps its own copy of the unchosen set, which swap
/// neighborhoods enumerate.
pub struct FacilitySolutionAdapter<'m, V, M, C>
where
    V: Vertex,
    M: Metric<V>,
{
    solution: FacilityLocationSolution<'m, V, M, C>,
    facilities: Vec<Facility<V>>,
    index: HashMap<V, usize>,
    unchosen_copy: BTreeSet<V>,
}

impl<'m, V, M, C> FacilitySolutionAdapter<'m, V, M, C>
where
    V: Vertex,
    M: Metric<V>,
    C: Fn(&V) -> M::Distance,
{
    /// Wraps `solution`, taking ownership of it.
    pub fn new(solution: FacilityLocationSolution<'m, V, M, C>) -> Self {
        let chosen = solution.chosen_facilities().iter().map(|v| Facility {
            vertex: v.clone(),
            is_chosen: true,
        });
        let unchosen = solution.unchosen_facilities().iter().map(|v| Facility {
            vertex: v.clone(),
            is_chosen: false,
        });
        let facilities: Vec<Facility<V>> = chosen.chain(unchosen).collect();
        let index = facilities
            .iter()
            .enumerate()
            .map(|(i, f)| (f.vertex.clone(), i))
            .collect();
        let unchosen_copy = solution.unchosen_facilities().clone();

        Self {
            solution,
            facilities,
            index,
            unchosen_copy,
        }
    }

    /// Opens `facility` and returns the change of the objective.
    pub fn add_facility(&mut self, facility: &V) -> Result<M::Distance> {
        let delta = self.solution.add_facility(facility)?;
        self.set_chosen(facility, true)?;
        self.unchosen_copy.remove(facility);
        Ok(delta)
    }

    /// Closes `facility` and returns the change of the objective.
    pub fn remove_facility(&mut self, facility: &V) -> Result<M::Distance> {
        let delta = self.solution.remove_facility(facility)?;
        self.set_chosen(facility, false)?;
        self.unchosen_copy.insert(facility.clone());
        Ok(delta)
    }

    /// Applies `update` and returns the change of the objective.
    pub fn apply(&mut self, update: &Update<V>) -> Result<M::Distance> {
        let delta = self.solution.apply(update)?;
        if let Some(opened) = update.opened() {
            self.set_chosen(opened, true)?;
            self.unchosen_copy.remove(opened);
        }
        if let Some(closed) = update.closed() {
            self.set_chosen(closed, false)?;
            self.unchosen_copy.insert(closed.clone());
        }
        Ok(delta)
    }

    /// The element for `facility`, if it belongs to the universe.
    pub fn get_facility(&self, facility: &V) -> Option<&Facility<V>> {
        self.index.get(facility).map(|&i| &self.facilities[i])
    }

    /// All elements, in element order.
    pub fn facilities(&self) -> &[Facility<V>] {
        &self.facilities
    }

    /// The adapter's copy of the unchosen set.
    pub fn unchosen_copy(&self) -> &BTreeSet<V> {
        &self.unchosen_copy
    }

    /// The wrapped solution.
    pub fn solution(&self) -> &FacilityLocationSolution<'m, V, M, C> {
        &self.solution
    }

    /// Unwraps the solution.
    pub fn into_solution(self) -> FacilityLocationSolution<'m, V, M, C> {
        self.solution
    }

    fn set_chosen(&mut self, facility: &V, chosen: bool) -> Result<()> {
        let &i = self
            .index
            .get(facility)
            .ok_or_else(|| LocalSearchError::UnknownFacility(format!("{facility:?}")))?;
        self.facilities[i].is_chosen = chosen;
        Ok(())
    }
}

impl<V, M, C> ElementSolution for FacilitySolutionAdapter<'_, V, M, C>
where
    V: Vertex,
    M: Metric<V>,
{
    type Element = Facility<V>;

    fn element_count(&self) -> usize {
        self.facilities.len()
    }

    fn element(&self, index: usize) -> &Facility<V> {
        &self.facilities[index]
    }
}

impl<V, M, C> Clone for FacilitySolutionAdapter<'_, V, M, C>
where
    V: Vertex,
    M: Metric<V>,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            solution: self.solution.clone(),
            facilities: self.facilities.clone(),
            index: self.index.clone(),
            unchosen_copy: self.unchosen_copy.clone(),
        }
    }
}

impl<V, M, C> std::fmt::Debug for FacilitySolutionAdapter<'_, V, M, C>
where
    V: Vertex,
    M: Metric<V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacilitySolutionAdapter")
            .field("solution", &self.solution)
            .field("facilities", &self.facilities)
            .finish()
    }
}
