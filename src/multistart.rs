//! Independent searches from several starting points.
//!
//! With the `parallel` feature the starts are distributed over the rayon
//! thread pool; otherwise they run one after another. Each search owns its
//! solution, so nothing is shared between them.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs `search` once per start and returns the results in start order.
///
/// # Examples
///
/// ```
/// use u_localsearch::multistart;
///
/// let squares = multistart::run_all(vec![1, 2, 3], |x| x * x);
/// assert_eq!(squares, vec![1, 4, 9]);
/// ```
pub fn run_all<S, R, F>(starts: Vec<S>, search: F) -> Vec<R>
where
    S: Send,
    R: Send,
    F: Fn(S) -> R + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        starts.into_par_iter().map(search).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        starts.into_iter().map(search).collect()
    }
}

/// Runs `search` once per start and keeps the result with the lowest
/// `cost`. Ties go to the earliest start.
///
/// Returns `None` if `starts` is empty.
pub fn best_of<S, R, F, K>(starts: Vec<S>, search: F, cost: K) -> Option<R>
where
    S: Send,
    R: Send,
    F: Fn(S) -> R + Sync + Send,
    K: Fn(&R) -> f64,
{
    let results = run_all(starts, search);
    log::debug!("multistart finished {} searches", results.len());
    results
        .into_iter()
        .reduce(|best, r| if cost(&r) < cost(&best) { r } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k_median::{KMedianConfig, KMedianRunner};

    #[test]
    fn test_run_all_keeps_order() {
        let out = run_all((0..50).collect(), |x: u64| x * 2);
        assert_eq!(out, (0..50).map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_best_of_empty() {
        assert!(best_of(Vec::<i32>::new(), |x| x, |x| *x as f64).is_none());
    }

    #[test]
    fn test_best_of_ties_keep_first() {
        let best = best_of(vec![(1, 'a'), (0, 'b'), (0, 'c')], |s| s, |r| r.0 as f64);
        assert_eq!(best, Some((0, 'b')));
    }

    #[test]
    fn test_k_median_restarts() {
        let line = |a: &i64, b: &i64| (a - b).abs();
        let clients: Vec<i64> = vec![0, 1, 2, 20, 21, 22, 40, 41, 42];
        let starts = vec![vec![0, 1, 2], vec![20, 21, 22], vec![0, 20, 40]];

        let best = best_of(
            starts,
            |medians| {
                KMedianRunner::run(
                    medians,
                    clients.clone(),
                    clients.clone(),
                    &line,
                    &KMedianConfig::default(),
                )
            },
            |r| r.as_ref().map_or(f64::INFINITY, |r| r.cost as f64),
        )
        .unwrap()
        .unwrap();

        assert_eq!(best.medians, vec![1, 21, 41]);
        assert_eq!(best.cost, 6);
    }
}
