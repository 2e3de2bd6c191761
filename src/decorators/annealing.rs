//! Simulated-annealing acceptance as a gain decorator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{LocalSearchError, Result};
use crate::search::{require_bounded, Gain, GainEvaluator};

/// Cooling schedule for temperature reduction.
///
/// The temperature is lowered once per committed move.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_k = T_0 - k * (T_0 - T_min) / steps`.
    Linear {
        /// Number of commits until `T_min` is reached.
        steps: usize,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    LundyMees {
        /// Cooling parameter.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

/// Configuration for [`AnnealingGain`].
///
/// # Examples
///
/// ```
/// use u_localsearch::decorators::{AnnealingConfig, CoolingSchedule};
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(50.0)
///     .with_min_temperature(0.01)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.9 })
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingConfig {
    /// Initial temperature. Higher values accept more worsening moves.
    pub initial_temperature: f64,

    /// Below this temperature no worsening move is accepted.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 1e-6,
            cooling: CoolingSchedule::default(),
            seed: None,
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.initial_temperature <= 0.0 {
            return Err(invalid("initial_temperature must be positive".into()));
        }
        if self.min_temperature <= 0.0 {
            return Err(invalid("min_temperature must be positive".into()));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(invalid(
                "min_temperature must be less than initial_temperature".into(),
            ));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(invalid(format!(
                        "geometric alpha must be in (0, 1), got {alpha}"
                    )));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta <= 0.0 {
                    return Err(invalid(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
            }
            CoolingSchedule::Linear { steps } => require_bounded("linear steps", steps)?,
        }
        Ok(())
    }
}

fn invalid(msg: String) -> LocalSearchError {
    LocalSearchError::InvalidConfig(msg)
}

/// Wraps a gain evaluator with the Metropolis acceptance rule.
///
/// Improving moves keep their gain. A non-improving move with gain
/// `g <= 0` is accepted with probability `exp(g / T)`; an accepted move is
/// reported with gain `f64::MIN_POSITIVE`, so the engine commits it but
/// prefers any real improvement under best improvement. Every commit
/// lowers `T` by the cooling schedule. Once `T` reaches the minimum
/// temperature the decorator is transparent and the search settles into
/// the nearest local optimum.
///
/// # Examples
///
/// ```
/// use u_localsearch::decorators::{AnnealingConfig, AnnealingGain};
/// use u_localsearch::search::LocalSearch;
///
/// let gain = |x: &i64, _: &(), y: &i64| (x * x - y * y) as f64;
/// let annealing = AnnealingGain::new(gain, AnnealingConfig::default().with_seed(7)).unwrap();
/// let mut engine = LocalSearch::new(
///     |x: &i64, _: &()| vec![x - 1, x + 1],
///     annealing,
///     |x: &mut i64, _: &(), y: &i64| {
///         *x = *y;
///         true
///     },
/// );
///
/// let mut x = 6;
/// let result = engine.run_single(&mut x);
/// assert!(result.converged);
/// assert_eq!(x, 0);
/// ```
#[derive(Debug, Clone)]
pub struct AnnealingGain<G> {
    inner: G,
    config: AnnealingConfig,
    temperature: f64,
    step: usize,
    scored_acceptances: usize,
    rng: StdRng,
}

impl<G> AnnealingGain<G> {
    /// Wraps `inner`.
    ///
    /// # Errors
    ///
    /// Returns [`LocalSearchError::InvalidConfig`] if `config` does not
    /// validate.
    pub fn new(inner: G, config: AnnealingConfig) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Ok(Self {
            inner,
            temperature: config.initial_temperature,
            config,
            step: 0,
            scored_acceptances: 0,
            rng,
        })
    }

    /// Current temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Whether the temperature has reached the minimum.
    pub fn is_frozen(&self) -> bool {
        self.temperature <= self.config.min_temperature
    }

    /// Number of non-improving moves the acceptance rule let through while
    /// scoring. Under best improvement a later, larger gain can win the
    /// scan, so this counts scored moves, not commits.
    pub fn scored_acceptances(&self) -> usize {
        self.scored_acceptances
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<S, E, M, G> GainEvaluator<S, E, M> for AnnealingGain<G>
where
    G: GainEvaluator<S, E, M>,
{
    type Gain = f64;

    fn gain(&mut self, solution: &S, element: &E, mv: &M) -> f64 {
        let gain = self.inner.gain(solution, element, mv).to_f64();
        if gain > 0.0 || self.is_frozen() {
            return gain;
        }

        // Metropolis acceptance criterion
        let probability = (gain / self.temperature).exp();
        if self.rng.random_range(0.0..1.0) < probability {
            self.scored_acceptances += 1;
            f64::MIN_POSITIVE
        } else {
            gain
        }
    }

    fn on_commit(&mut self, solution: &S, element: &E, mv: &M) {
        self.inner.on_commit(solution, element, mv);
        self.temperature = cool(self.temperature, &self.config, self.step);
        self.step += 1;
        if self.is_frozen() {
            log::trace!("annealing frozen after {} commits", self.step);
        }
    }
}

/// Apply the cooling schedule to compute the next temperature.
fn cool(temperature: f64, config: &AnnealingConfig, step: usize) -> f64 {
    let next = match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,

        CoolingSchedule::Linear { steps } => {
            config.initial_temperature
                - (step + 1) as f64 * (config.initial_temperature - config.min_temperature)
                    / steps as f64
        }

        CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
    };
    next.max(config.min_temperature)
}
