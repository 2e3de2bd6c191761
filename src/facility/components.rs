//! Search components for facility location: neighborhood, gain, commit.

use super::adapter::{Facility, FacilitySolutionAdapter};
use super::update::Update;
use crate::metric::{Distance, Metric, Vertex};
use crate::search::{Committer, Gain, GainEvaluator, NeighborhoodGetter};

/// Which update kinds the facility neighborhood generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveSet {
    pub add: bool,
    pub remove: bool,
    pub swap: bool,
}

impl MoveSet {
    /// Add, remove and swap.
    pub const ALL: Self = Self {
        add: true,
        remove: true,
        swap: true,
    };

    /// Swaps only; keeps the number of open facilities fixed.
    pub const SWAP_ONLY: Self = Self {
        add: false,
        remove: false,
        swap: true,
    };
}

impl Default for MoveSet {
    fn default() -> Self {
        Self::ALL
    }
}

/// Neighborhood of one facility element.
///
/// A chosen facility yields `Remove(f)` followed by `Swap { from: f, to }`
/// for every unchosen `to` in ascending order; an unchosen facility yields
/// `Add(f)`. Kinds disabled in the [`MoveSet`] are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacilityNeighborhood {
    moves: MoveSet,
}

impl FacilityNeighborhood {
    pub fn new(moves: MoveSet) -> Self {
        Self { moves }
    }
}

impl<V, M, C> NeighborhoodGetter<FacilitySolutionAdapter<'_, V, M, C>, Facility<V>>
    for FacilityNeighborhood
where
    V: Vertex,
    M: Metric<V>,
    C: Fn(&V) -> M::Distance,
{
    type Move = Update<V>;

    fn neighborhood(
        &mut self,
        solution: &FacilitySolutionAdapter<'_, V, M, C>,
        element: &Facility<V>,
    ) -> Vec<Update<V>> {
        let f = element.vertex();
        if !element.is_chosen() {
            return if self.moves.add {
                vec![Update::Add(f.clone())]
            } else {
                Vec::new()
            };
        }

        let mut moves = Vec::new();
        if self.moves.remove {
            moves.push(Update::Remove(f.clone()));
        }
        if self.moves.swap {
            moves.extend(solution.unchosen_copy().iter().map(|to| Update::Swap {
                from: f.clone(),
                to: to.clone(),
            }));
        }
        moves
    }
}

/// Gain of an update: the decrease of the objective it would cause.
///
/// Evaluated with the solution's pure delta queries, so scoring never
/// touches the solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacilityGain;

impl<V, M, C> GainEvaluator<FacilitySolutionAdapter<'_, V, M, C>, Facility<V>, Update<V>>
    for FacilityGain
where
    V: Vertex,
    M: Metric<V>,
    C: Fn(&V) -> M::Distance,
{
    type Gain = M::Distance;

    fn gain(
        &mut self,
        solution: &FacilitySolutionAdapter<'_, V, M, C>,
        _element: &Facility<V>,
        mv: &Update<V>,
    ) -> M::Distance {
        match solution.solution().would_apply(mv) {
            Ok(delta) => -delta,
            Err(err) => {
                log::warn!("cannot score {mv:?}: {err}");
                M::Distance::zero()
            }
        }
    }
}

/// Applies an update through the adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacilityCommit;

impl<V, M, C> Committer<FacilitySolutionAdapter<'_, V, M, C>, Facility<V>, Update<V>>
    for FacilityCommit
where
    V: Vertex,
    M: Metric<V>,
    C: Fn(&V) -> M::Distance,
{
    fn commit(
        &mut self,
        solution: &mut FacilitySolutionAdapter<'_, V, M, C>,
        _element: &Facility<V>,
        mv: &Update<V>,
    ) -> bool {
        match solution.apply(mv) {
            Ok(delta) => {
                log::trace!("applied {mv:?}, cost change {:.6}", delta.to_f64());
                true
            }
            Err(err) => {
                log::warn!("cannot apply {mv:?}: {err}");
                false
            }
        }
    }
}
