//! Random variate generation
//!
//! The [`VariateGenerator`] turns uniform draws from a [`UniformSource`] into
//! samples of the configured distribution families. Several families are
//! approximations (a continuous surrogate for Poisson, Irwin–Hall sums for
//! Normal and Gamma) and are reproduced exactly as such.

use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{DistributionFamily, NormalScaling};

/// Floor applied to every service time so no service has zero duration
pub const MIN_SERVICE_TIME: f64 = 0.01;

/// Number of uniforms summed by the Irwin–Hall approximations
const IRWIN_HALL_TERMS: usize = 12;

/// Source of uniform draws in the open interval (0, 1)
pub trait UniformSource {
    /// Next uniform draw, never exactly 0 or 1
    fn next_uniform(&mut self) -> f64;
}

impl<T: UniformSource + ?Sized> UniformSource for &mut T {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Uniform source backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Deterministic source for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Source seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn next_uniform(&mut self) -> f64 {
        self.rng.sample(Open01)
    }
}

/// Uniform source that replays a fixed list of draws, cycling when exhausted
///
/// Draws are clamped into the open unit interval so `ln(U)` stays finite.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    draws: Vec<f64>,
    consumed: usize,
}

impl ReplaySource {
    /// Create a replay source; `None` if `draws` is empty
    pub fn new(draws: impl Into<Vec<f64>>) -> Option<Self> {
        let draws: Vec<f64> = draws.into();
        if draws.is_empty() {
            return None;
        }
        let draws = draws
            .into_iter()
            .map(|u| u.clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON))
            .collect();
        Some(Self { draws, consumed: 0 })
    }

    /// Total number of draws handed out so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl UniformSource for ReplaySource {
    fn next_uniform(&mut self) -> f64 {
        let value = self.draws[self.consumed % self.draws.len()];
        self.consumed += 1;
        value
    }
}

/// A distribution family with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSpec {
    /// Distribution family
    pub family: DistributionFamily,
    /// Mean parameter
    pub mean: f64,
    /// Variance parameter (read only by Normal under [`NormalScaling::StdDev`])
    pub variance: f64,
}

impl DistributionSpec {
    /// Spec with unit variance
    pub fn new(family: DistributionFamily, mean: f64) -> Self {
        Self { family, mean, variance: 1.0 }
    }

    /// Set the variance
    pub fn with_variance(mut self, variance: f64) -> Self {
        self.variance = variance;
        self
    }
}

/// Produces samples for named distribution families
#[derive(Debug)]
pub struct VariateGenerator<S = RngSource> {
    source: S,
    normal_scaling: NormalScaling,
    warned_unrecognized: bool,
}

impl<S: UniformSource> VariateGenerator<S> {
    /// Create a generator that owns `source`
    pub fn new(source: S) -> Self {
        Self { source, normal_scaling: NormalScaling::Literal, warned_unrecognized: false }
    }

    /// Choose how Normal samples apply the variance
    pub fn with_normal_scaling(mut self, normal_scaling: NormalScaling) -> Self {
        self.normal_scaling = normal_scaling;
        self
    }

    /// Current Normal scaling policy
    pub fn normal_scaling(&self) -> NormalScaling {
        self.normal_scaling
    }

    /// Borrow the entropy source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Give back the entropy source
    pub fn into_source(self) -> S {
        self.source
    }

    /// One bare uniform draw
    pub fn draw_uniform(&mut self) -> f64 {
        self.source.next_uniform()
    }

    /// Draw one sample of `spec`, clamped at 0
    ///
    /// Unrecognized families return 0 without consuming any draw.
    pub fn sample(&mut self, spec: &DistributionSpec) -> f64 {
        if spec.family.draws_per_sample() == 0 {
            return self.sample_with_first_draw(spec, 0.0);
        }
        let first = self.draw_uniform();
        self.sample_with_first_draw(spec, first)
    }

    /// Evaluate `spec` using `first` as its first uniform draw
    ///
    /// Irwin–Hall families take their remaining eleven draws from the source.
    pub fn sample_with_first_draw(&mut self, spec: &DistributionSpec, first: f64) -> f64 {
        let value = match &spec.family {
            DistributionFamily::Exponential => -spec.mean * first.ln(),
            DistributionFamily::Poisson => -first.ln() / spec.mean,
            DistributionFamily::Uniform => first * spec.mean * 2.0,
            DistributionFamily::RawUniform => first,
            DistributionFamily::Normal => {
                let deviate = self.irwin_hall_sum(first) - 6.0;
                match self.normal_scaling {
                    NormalScaling::Literal => spec.mean + deviate,
                    NormalScaling::StdDev => spec.mean + spec.variance.sqrt() * deviate,
                }
            }
            DistributionFamily::Gamma => spec.mean * self.irwin_hall_sum(first),
            DistributionFamily::Unrecognized(name) => {
                if !self.warned_unrecognized {
                    warn!(distribution = %name, "Unrecognized distribution, sampling 0");
                    self.warned_unrecognized = true;
                }
                0.0
            }
        };

        // Only the Normal approximation can dip below zero
        value.max(0.0)
    }

    /// Service-time sample for `spec` seeded by `first`, floored at [`MIN_SERVICE_TIME`]
    pub fn sample_service(&mut self, spec: &DistributionSpec, first: f64) -> f64 {
        self.sample_with_first_draw(spec, first).max(MIN_SERVICE_TIME)
    }

    fn irwin_hall_sum(&mut self, first: f64) -> f64 {
        first + (1..IRWIN_HALL_TERMS).map(|_| self.draw_uniform()).sum::<f64>()
    }
}

impl VariateGenerator<RngSource> {
    /// Generator over a seeded `StdRng`, or an entropy-seeded one when `seed` is `None`
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(RngSource::seeded(seed)),
            None => Self::new(RngSource::from_entropy()),
        }
    }
}
