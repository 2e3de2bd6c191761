//! 2-opt neighborhood on a [`Cycle`].

use super::cycle::Cycle;
use crate::metric::Metric;
use crate::search::{Committer, GainEvaluator, NeighborhoodGetter};

/// Replace edges `(v[i], v[i+1])` and `(v[j], v[j+1])` with
/// `(v[i], v[j])` and `(v[i+1], v[j+1])`, where `i + 2 <= j` and
/// position `n` wraps to `0`.
///
/// Applying the move reverses the segment `i+1..=j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptMove {
    pub i: usize,
    pub j: usize,
}

/// Enumerates every 2-opt move of a cycle.
///
/// Pairs of adjacent edges are skipped since exchanging them leaves the
/// tour unchanged. Tours with fewer than four vertices have no moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOptNeighborhood;

impl<V> NeighborhoodGetter<Cycle<V>, ()> for TwoOptNeighborhood {
    type Move = TwoOptMove;

    fn neighborhood(&mut self, cycle: &Cycle<V>, _: &()) -> Vec<TwoOptMove> {
        let n = cycle.len();
        let mut moves = Vec::new();
        for i in 0..n.saturating_sub(2) {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                moves.push(TwoOptMove { i, j });
            }
        }
        moves
    }
}

/// Length decrease of a 2-opt move.
#[derive(Debug, Clone, Copy)]
pub struct TwoOptGain<'m, M> {
    metric: &'m M,
}

impl<'m, M> TwoOptGain<'m, M> {
    pub fn new(metric: &'m M) -> Self {
        Self { metric }
    }
}

impl<V, M> GainEvaluator<Cycle<V>, (), TwoOptMove> for TwoOptGain<'_, M>
where
    M: Metric<V>,
{
    type Gain = M::Distance;

    fn gain(&mut self, cycle: &Cycle<V>, _: &(), mv: &TwoOptMove) -> M::Distance {
        let a = cycle.at(mv.i);
        let b = cycle.at(mv.i + 1);
        let c = cycle.at(mv.j);
        let d = cycle.at(mv.j + 1);
        let m = self.metric;
        m.distance(a, b) + m.distance(c, d) - m.distance(a, c) - m.distance(b, d)
    }
}

/// Applies a 2-opt move by reversing the inner segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOptCommit;

impl<V> Committer<Cycle<V>, (), TwoOptMove> for TwoOptCommit {
    fn commit(&mut self, cycle: &mut Cycle<V>, _: &(), mv: &TwoOptMove) -> bool {
        if mv.i + 1 > mv.j || mv.j >= cycle.len() {
            return false;
        }
        cycle.reverse(mv.i + 1, mv.j);
        true
    }
}
