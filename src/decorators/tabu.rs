//! Tabu list as a gain decorator.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::error::Result;
use crate::search::{require_bounded, Gain, GainEvaluator};

/// Configuration for [`TabuGain`].
///
/// # Examples
///
/// ```
/// use u_localsearch::decorators::TabuConfig;
///
/// let config = TabuConfig::default().with_tenure(5).with_aspiration(false);
/// assert_eq!(config.tenure, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// How many recent move attributes stay tabu.
    pub tenure: usize,
    /// Whether a tabu move may still be taken when it strictly improves
    /// the objective.
    pub aspiration: bool,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            tenure: 7,
            aspiration: true,
        }
    }
}

impl TabuConfig {
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }

    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        require_bounded("tenure", self.tenure)
    }
}

/// Forbids moves that touch recently changed solution attributes.
///
/// `attributes` maps a move to the attributes it changes (for facility
/// location: the facilities it opens or closes). Committed moves push
/// their attributes onto a FIFO list holding at most `tenure` entries; a
/// move touching any listed attribute is tabu and scores
/// `f64::NEG_INFINITY`, unless aspiration is enabled and its wrapped gain
/// is strictly positive.
///
/// Tabu moves are never improving, so with plain descent the decorator
/// only matters with aspiration disabled. It is meant to sit inside an
/// acceptance rule that admits worsening moves, such as
/// [`AnnealingGain`](super::AnnealingGain), where it stops the search from
/// undoing a move it has just made.
#[derive(Debug, Clone)]
pub struct TabuGain<G, F, K> {
    inner: G,
    attributes: F,
    config: TabuConfig,
    queue: VecDeque<K>,
    counts: HashMap<K, usize>,
}

impl<G, F, K> TabuGain<G, F, K>
where
    K: Eq + Hash + Clone,
{
    /// Wraps `inner`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](crate::LocalSearchError::InvalidConfig)
    /// if the tenure is zero.
    pub fn new<E, M>(inner: G, attributes: F, config: TabuConfig) -> Result<Self>
    where
        F: FnMut(&E, &M) -> Vec<K>,
    {
        config.validate()?;
        Ok(Self {
            inner,
            attributes,
            queue: VecDeque::with_capacity(config.tenure),
            counts: HashMap::new(),
            config,
        })
    }

    /// Whether `attribute` is currently tabu.
    pub fn is_tabu(&self, attribute: &K) -> bool {
        self.counts.contains_key(attribute)
    }

    /// Attributes currently held, oldest first.
    pub fn tabu_list(&self) -> impl Iterator<Item = &K> {
        self.queue.iter()
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    fn push(&mut self, attribute: K) {
        if self.queue.len() >= self.config.tenure {
            if let Some(old) = self.queue.pop_front() {
                if let Some(n) = self.counts.get_mut(&old) {
                    *n -= 1;
                    if *n == 0 {
                        self.counts.remove(&old);
                    }
                }
            }
        }
        *self.counts.entry(attribute.clone()).or_insert(0) += 1;
        self.queue.push_back(attribute);
    }
}

impl<S, E, M, G, F, K> GainEvaluator<S, E, M> for TabuGain<G, F, K>
where
    G: GainEvaluator<S, E, M>,
    F: FnMut(&E, &M) -> Vec<K>,
    K: Eq + Hash + Clone,
{
    type Gain = f64;

    fn gain(&mut self, solution: &S, element: &E, mv: &M) -> f64 {
        let gain = self.inner.gain(solution, element, mv).to_f64();
        let tabu = (self.attributes)(element, mv)
            .iter()
            .any(|a| self.counts.contains_key(a));
        if tabu && !(self.config.aspiration && gain > 0.0) {
            f64::NEG_INFINITY
        } else {
            gain
        }
    }

    fn on_commit(&mut self, solution: &S, element: &E, mv: &M) {
        self.inner.on_commit(solution, element, mv);
        for attribute in (self.attributes)(element, mv) {
            self.push(attribute);
        }
    }
}
