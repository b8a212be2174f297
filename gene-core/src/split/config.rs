//! Parameter handling for the connectivity-preserving edge splitter.

use crate::{Result, error::GeneError};

const DEFAULT_TEST_FRACTION: f64 = 0.1;
const DEFAULT_VALIDATION_FRACTION: f64 = 0.05;
const DEFAULT_NEGATIVE_RATIO: usize = 10;
const DEFAULT_ATTEMPTS_PER_NEGATIVE: u64 = 1_000;
const MIN_ATTEMPT_BUDGET: u64 = 10_000;

/// Configuration for [`split_edges`](super::split_edges).
#[derive(Clone, Debug, PartialEq)]
pub struct SplitConfig {
    test_fraction: f64,
    validation_fraction: f64,
    test_negative_ratio: usize,
    train_negative_ratio: usize,
    preserve_connectivity: bool,
    rng_seed: u64,
    attempts_per_negative: u64,
}

impl SplitConfig {
    /// Creates a configuration holding out the given fractions of edges.
    ///
    /// # Errors
    /// Returns [`GeneError::InvalidConfiguration`] when a fraction is
    /// non-finite or outside `[0, 1]`, or when the fractions sum past one.
    ///
    /// # Examples
    /// ```
    /// use gene_core::SplitConfig;
    ///
    /// let config = SplitConfig::new(0.2, 0.1)?.with_rng_seed(7);
    /// assert_eq!(config.test_fraction(), 0.2);
    /// assert!(SplitConfig::new(0.8, 0.4).is_err());
    /// # Ok::<(), gene_core::GeneError>(())
    /// ```
    pub fn new(test_fraction: f64, validation_fraction: f64) -> Result<Self> {
        validate_fraction("test_fraction", test_fraction)?;
        validate_fraction("validation_fraction", validation_fraction)?;
        if test_fraction + validation_fraction > 1.0 {
            return Err(GeneError::InvalidConfiguration {
                reason: format!(
                    "test_fraction ({test_fraction}) + validation_fraction \
                     ({validation_fraction}) must not exceed 1"
                ),
            });
        }
        Ok(Self {
            test_fraction,
            validation_fraction,
            ..Self::default()
        })
    }

    /// Sets how many test negatives are drawn per test positive.
    #[must_use]
    pub fn with_test_negative_ratio(mut self, ratio: usize) -> Self {
        self.test_negative_ratio = ratio;
        self
    }

    /// Sets how many train negatives are drawn per train positive.
    #[must_use]
    pub fn with_train_negative_ratio(mut self, ratio: usize) -> Self {
        self.train_negative_ratio = ratio;
        self
    }

    /// Enables or disables the connectivity guard.
    #[must_use]
    pub fn with_preserve_connectivity(mut self, preserve: bool) -> Self {
        self.preserve_connectivity = preserve;
        self
    }

    /// Seeds the shuffle and negative sampling RNG.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Sets the rejection-sampling draws allowed per requested negative.
    /// Each sampling phase receives at least a fixed floor of attempts.
    #[must_use]
    pub fn with_attempts_per_negative(mut self, attempts: u64) -> Self {
        self.attempts_per_negative = attempts.max(1);
        self
    }

    /// Fraction of edges held out for testing.
    #[must_use]
    #[rustfmt::skip]
    pub const fn test_fraction(&self) -> f64 { self.test_fraction }

    /// Fraction of edges held out for validation.
    #[must_use]
    #[rustfmt::skip]
    pub const fn validation_fraction(&self) -> f64 { self.validation_fraction }

    /// Test negatives drawn per test positive.
    #[must_use]
    #[rustfmt::skip]
    pub const fn test_negative_ratio(&self) -> usize { self.test_negative_ratio }

    /// Train negatives drawn per train positive.
    #[must_use]
    #[rustfmt::skip]
    pub const fn train_negative_ratio(&self) -> usize { self.train_negative_ratio }

    /// Whether removals that disconnect the graph are rejected.
    #[must_use]
    #[rustfmt::skip]
    pub const fn preserve_connectivity(&self) -> bool { self.preserve_connectivity }

    /// Seed for the split RNG.
    #[must_use]
    #[rustfmt::skip]
    pub const fn rng_seed(&self) -> u64 { self.rng_seed }

    pub(crate) fn attempt_budget(&self, requested: usize) -> u64 {
        let requested = u64::try_from(requested).unwrap_or(u64::MAX);
        requested
            .saturating_mul(self.attempts_per_negative)
            .max(MIN_ATTEMPT_BUDGET)
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
            validation_fraction: DEFAULT_VALIDATION_FRACTION,
            test_negative_ratio: DEFAULT_NEGATIVE_RATIO,
            train_negative_ratio: DEFAULT_NEGATIVE_RATIO,
            preserve_connectivity: true,
            rng_seed: 0x5EED_CAFE,
            attempts_per_negative: DEFAULT_ATTEMPTS_PER_NEGATIVE,
        }
    }
}

fn validate_fraction(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GeneError::InvalidConfiguration {
            reason: format!("{name} must be a finite value in [0, 1], got {value}"),
        })
    }
}
