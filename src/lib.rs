//! # E-polynomials of AGL(1) representation varieties by point counting
//!
//! For a closed orientable surface of genus g, this library computes the
//! E-polynomial of Hom(π₁(Σ_g), AGL₁(ℂ)) by the arithmetic method.
//!
//! ## Pipeline
//!
//! 1. **Tuples**: enumerate α ∈ (F_q \ {-1})^{2g} and β ∈ F_q^{2g}
//! 2. **Counting**: n(q) = #{(α, β) : Σ α_i β_i = 0}
//! 3. **Sampling**: repeat for q = 2, 3, 4, 5, 7, 8, 9, ...
//! 4. **Interpolation**: exact rational Lagrange fit through (q, n(q))
//!
//! The degree of the result is bounded by 4g - 1, so 4g samples suffice.
//!
//! ## Usage Example
//!
//! ```no_run
//! use surface_epoly::{polynomial_for_genus, DegreeEstimator};
//!
//! let poly = polynomial_for_genus(1, DegreeEstimator::Standard)?;
//! assert_eq!(poly.to_string(), "q^3 - q^2");
//! # Ok::<(), surface_epoly::EPolyError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules, leaves first
pub mod field;         // GF(q) arithmetic and prime-power sieve
pub mod tuples;        // Alpha/beta parameter tuples
pub mod counting;      // Bilinear point counter
pub mod sampling;      // Prime-power sample collection
pub mod interpolation; // Exact rational reconstruction
/// Python bindings for exposing the pipeline to external runtimes.
#[cfg(feature = "python-bindings")]
pub mod python_bindings;

// Re-exports for convenience
pub use counting::{count_points, Milestone, NoProgress, PointCounter, ProgressObserver, TracingProgress};
pub use field::{FieldElement, FieldError, GaloisField};
pub use interpolation::{interpolate, lagrange_interpolate, EPolynomial, InterpolationError};
pub use sampling::{collect_samples, Sample, SampleCollector, SampleSet};
pub use tuples::{generate_alpha, generate_beta, generate_tuples, generate_tuples_for_order, TupleSet};

use thiserror::Error;
use tracing::{info, info_span, warn};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EPolyError>;

/// Errors that can occur while computing E-polynomials
#[derive(Error, Debug)]
pub enum EPolyError {
    /// Genus outside the supported domain (g ≥ 1)
    #[error("genus must be at least 1, got {0}")]
    InvalidGenus(u32),

    /// Field construction or element lookup failed
    #[error("field error: {0}")]
    Field(#[from] FieldError),

    /// Interpolation input was invalid
    #[error("interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Enumeration would exceed the configured or addressable size
    #[error("resource limit exceeded for {what}: {requested} requested")]
    ResourceExhausted {
        /// What was being built
        what: &'static str,
        /// Requested size in items
        requested: u128,
    },

    /// Field-order scan hit its cutoff before collecting enough samples
    #[error("genus {genus}: found {found} of {requested} prime-power field orders up to {cutoff}")]
    FieldSearchExhausted {
        /// Genus being sampled
        genus: u32,
        /// Samples requested
        requested: usize,
        /// Samples found below the cutoff
        found: usize,
        /// Largest field order scanned
        cutoff: u64,
    },

    /// Held-out sample disagrees with the fitted polynomial
    #[error(
        "degree bound {degree_bound} too low for genus {genus}: \
         fit predicts {predicted} at q = {field_order}, counted {counted}"
    )]
    DegreeBoundTooLow {
        /// Genus being fitted
        genus: u32,
        /// Degree bound that was used
        degree_bound: usize,
        /// Field order of the held-out sample
        field_order: u64,
        /// Counted value at that order
        counted: u64,
        /// Value the fitted polynomial predicts there
        predicted: String,
    },
}

/// Degree bound for the E-polynomial of a given genus.
///
/// A bound below the true degree yields a polynomial that fits the samples
/// but is wrong. Enable [`SweepConfig::verify`] to detect this.
#[derive(Debug, Clone, Copy, Default)]
pub enum DegreeEstimator {
    /// 4g - 1
    #[default]
    Standard,
    /// Same bound for every genus
    Fixed(usize),
    /// Caller-supplied bound
    Custom(fn(u32) -> usize),
}

impl DegreeEstimator {
    /// Degree bound for `genus`.
    pub fn degree_bound(&self, genus: u32) -> usize {
        match self {
            Self::Standard => (4 * genus as usize).saturating_sub(1),
            Self::Fixed(degree) => *degree,
            Self::Custom(estimate) => estimate(genus),
        }
    }
}

/// Configuration for a sweep over genera
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Largest genus computed (genera 1..=max_genus)
    pub max_genus: u32,

    /// Degree bound per genus
    pub degree_estimator: DegreeEstimator,

    /// Collect one extra sample and check the fit against it
    pub verify: bool,

    /// Cutoff for the field-order scan
    pub max_field_order: u64,

    /// Count each field order on the rayon pool
    pub parallel: bool,
}

impl SweepConfig {
    /// Defaults for genera 1..=max_genus: standard estimator, no verification,
    /// sequential counting.
    pub fn for_max_genus(max_genus: u32) -> Self {
        Self {
            max_genus,
            degree_estimator: DegreeEstimator::Standard,
            verify: false,
            max_field_order: sampling::DEFAULT_MAX_FIELD_ORDER,
            parallel: false,
        }
    }

    /// Use `estimator` for degree bounds.
    pub fn with_degree_estimator(mut self, estimator: DegreeEstimator) -> Self {
        self.degree_estimator = estimator;
        self
    }

    /// Toggle held-out sample verification.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Toggle parallel counting.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the field-order scan cutoff.
    pub fn with_max_field_order(mut self, max_field_order: u64) -> Self {
        self.max_field_order = max_field_order;
        self
    }
}

/// Everything computed for one genus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenusResult {
    /// Genus
    pub genus: u32,
    /// Degree bound the fit used
    pub degree_bound: usize,
    /// The degree_bound + 1 samples interpolated
    pub samples: SampleSet,
    /// Held-out sample the fit was checked against, if verification ran
    pub check_sample: Option<Sample>,
    /// Reconstructed E-polynomial
    pub polynomial: EPolynomial,
}

/// Results indexed by genus; index 0 is always empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EPolynomialTable {
    entries: Vec<Option<GenusResult>>,
}

impl EPolynomialTable {
    /// Largest genus in the table.
    pub fn max_genus(&self) -> u32 {
        (self.entries.len() - 1) as u32
    }

    /// Result for `genus`, if computed.
    pub fn get(&self, genus: u32) -> Option<&GenusResult> {
        self.entries.get(genus as usize).and_then(Option::as_ref)
    }

    /// E-polynomial for `genus`, if computed.
    pub fn polynomial(&self, genus: u32) -> Option<&EPolynomial> {
        self.get(genus).map(|r| &r.polynomial)
    }

    /// Raw genus-indexed entries, starting with the genus-0 placeholder.
    pub fn entries(&self) -> &[Option<GenusResult>] {
        &self.entries
    }

    /// Computed results in increasing genus.
    pub fn iter(&self) -> impl Iterator<Item = &GenusResult> + '_ {
        self.entries.iter().flatten()
    }
}

/// Genus-indexed orchestrator
///
/// Runs tuples → counts → samples → interpolation for each genus in turn.
/// Nothing is shared between genera.
pub struct GenusSweep<'a> {
    config: SweepConfig,
    observer: &'a dyn ProgressObserver,
}

impl std::fmt::Debug for GenusSweep<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenusSweep")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GenusSweep<'static> {
    /// Create a sweep without progress reporting.
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            observer: &NoProgress,
        }
    }
}

impl<'a> GenusSweep<'a> {
    /// Report counting milestones to `observer`.
    pub fn with_observer<'b>(self, observer: &'b dyn ProgressObserver) -> GenusSweep<'b> {
        GenusSweep {
            config: self.config,
            observer,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Compute every genus from 1 to `max_genus`.
    pub fn run(&self) -> Result<EPolynomialTable> {
        let mut entries = Vec::with_capacity(self.config.max_genus as usize + 1);
        entries.push(None);
        for genus in 1..=self.config.max_genus {
            entries.push(Some(self.solve_genus(genus)?));
        }
        Ok(EPolynomialTable { entries })
    }

    /// Compute a single genus.
    pub fn solve_genus(&self, genus: u32) -> Result<GenusResult> {
        if genus == 0 {
            return Err(EPolyError::InvalidGenus(0));
        }

        let _span = info_span!("genus", genus).entered();
        let degree_bound = self.config.degree_estimator.degree_bound(genus);
        let needed = degree_bound
            .checked_add(1 + usize::from(self.config.verify))
            .ok_or(EPolyError::ResourceExhausted {
                what: "sample set",
                requested: degree_bound as u128 + 2,
            })?;

        let collected = SampleCollector::new(genus)
            .with_max_field_order(self.config.max_field_order)
            .parallel(self.config.parallel)
            .with_observer(self.observer)
            .collect(needed)?;

        let (samples, check_sample) = if self.config.verify {
            collected.split_last()
        } else {
            (collected, None)
        };

        let polynomial = interpolate(samples.samples())?;

        if let Some(check) = check_sample {
            if !polynomial.agrees_with(&check) {
                let predicted = polynomial.evaluate_at(check.field_order).to_string();
                warn!(q = check.field_order, %predicted, counted = check.count, "held-out sample disagrees");
                return Err(EPolyError::DegreeBoundTooLow {
                    genus,
                    degree_bound,
                    field_order: check.field_order,
                    counted: check.count,
                    predicted,
                });
            }
        }

        info!(%polynomial, "E-polynomial");
        Ok(GenusResult {
            genus,
            degree_bound,
            samples,
            check_sample,
            polynomial,
        })
    }
}

/// E-polynomial for one genus with default sampling settings.
pub fn polynomial_for_genus(genus: u32, estimator: DegreeEstimator) -> Result<EPolynomial> {
    let config = SweepConfig::for_max_genus(genus).with_degree_estimator(estimator);
    GenusSweep::new(config)
        .solve_genus(genus)
        .map(|result| result.polynomial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_degree_bound() {
        assert_eq!(DegreeEstimator::Standard.degree_bound(1), 3);
        assert_eq!(DegreeEstimator::Standard.degree_bound(3), 11);
        assert_eq!(DegreeEstimator::Fixed(5).degree_bound(9), 5);
        assert_eq!(DegreeEstimator::Custom(|g| g as usize).degree_bound(4), 4);
    }

    #[test]
    fn test_genus_one_polynomial() {
        let poly = polynomial_for_genus(1, DegreeEstimator::Standard).unwrap();
        assert_eq!(poly, EPolynomial::from_integers(&[0, 0, -1, 1]));
    }

    #[test]
    fn test_genus_zero_rejected() {
        assert!(matches!(
            polynomial_for_genus(0, DegreeEstimator::Standard),
            Err(EPolyError::InvalidGenus(0))
        ));
    }

    #[test]
    fn test_empty_sweep_has_placeholder() {
        let sweep = GenusSweep::new(SweepConfig::for_max_genus(0));
        assert_eq!(sweep.config().max_genus, 0);
        let table = sweep.run().unwrap();
        assert_eq!(table.max_genus(), 0);
        assert!(table.get(0).is_none());
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_entries_indexed_by_genus() {
        let table = GenusSweep::new(SweepConfig::for_max_genus(1)).run().unwrap();
        let entries = table.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_none());
        assert_eq!(entries[1].as_ref().map(|r| r.genus), Some(1));
    }

    #[test]
    fn test_oversized_degree_bound_is_an_error() {
        assert!(matches!(
            polynomial_for_genus(1, DegreeEstimator::Fixed(usize::MAX)),
            Err(EPolyError::ResourceExhausted { what: "sample set", .. })
        ));

        let config = SweepConfig::for_max_genus(1)
            .with_degree_estimator(DegreeEstimator::Custom(|_| usize::MAX - 1))
            .with_verification(true);
        assert!(matches!(
            GenusSweep::new(config).solve_genus(1),
            Err(EPolyError::ResourceExhausted { .. })
        ));

        assert!(matches!(
            polynomial_for_genus(1, DegreeEstimator::Fixed(1 << 40)),
            Err(EPolyError::FieldSearchExhausted { .. })
        ));
    }

    #[test]
    fn test_verification_catches_low_bound() {
        let config = SweepConfig::for_max_genus(1)
            .with_degree_estimator(DegreeEstimator::Fixed(1))
            .with_verification(true);
        let err = GenusSweep::new(config).solve_genus(1).unwrap_err();
        // line through (2, 4), (3, 18) predicts 32 at q = 4; the count is 48
        match err {
            EPolyError::DegreeBoundTooLow {
                field_order,
                counted,
                predicted,
                ..
            } => {
                assert_eq!(field_order, 4);
                assert_eq!(counted, 48);
                assert_eq!(predicted, "32");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
