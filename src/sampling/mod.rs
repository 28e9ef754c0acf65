//! Sample collection over increasing field orders
//!
//! Field orders are visited as 2, 3, 4, 5, 7, 8, 9, ... so the q values of a
//! sample set are strictly increasing prime powers.

use tracing::{info, info_span};

use crate::counting::{NoProgress, PointCounter, ProgressObserver};
use crate::field::{GaloisField, PrimePowerSieve, MAX_FIELD_ORDER};
use crate::{EPolyError, Result};

/// Default upper cutoff for the field-order scan.
pub const DEFAULT_MAX_FIELD_ORDER: u64 = 1 << 16;

/// Exact point count at one field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Sample {
    /// Field order q
    pub field_order: u64,
    /// Number of solutions over GF(q)
    pub count: u64,
}

impl Sample {
    /// Pair a field order with its count.
    pub fn new(field_order: u64, count: u64) -> Self {
        Self { field_order, count }
    }
}

/// Samples for one genus, ordered by increasing field order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SampleSet {
    genus: u32,
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Genus the counts belong to.
    pub fn genus(&self) -> u32 {
        self.genus
    }

    /// Samples in increasing field order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples were requested.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Field orders in sample order.
    pub fn field_orders(&self) -> impl Iterator<Item = u64> + '_ {
        self.samples.iter().map(|s| s.field_order)
    }

    /// Detach the largest-q sample, e.g. to hold it out for verification.
    pub fn split_last(mut self) -> (Self, Option<Sample>) {
        let last = self.samples.pop();
        (self, last)
    }
}

/// Drives the point counter across prime-power field orders.
pub struct SampleCollector<'a> {
    genus: u32,
    max_field_order: u64,
    parallel: bool,
    observer: &'a dyn ProgressObserver,
}

impl std::fmt::Debug for SampleCollector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleCollector")
            .field("genus", &self.genus)
            .field("max_field_order", &self.max_field_order)
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl<'a> SampleCollector<'a> {
    /// Sequential collector with the default cutoff.
    pub fn new(genus: u32) -> Self {
        Self {
            genus,
            max_field_order: DEFAULT_MAX_FIELD_ORDER,
            parallel: false,
            observer: &NoProgress,
        }
    }

    /// Stop scanning past `max_field_order` (capped at the field table limit).
    pub fn with_max_field_order(mut self, max_field_order: u64) -> Self {
        self.max_field_order = max_field_order.min(MAX_FIELD_ORDER);
        self
    }

    /// Count each field order in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Forward counting milestones to `observer`.
    pub fn with_observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Collect exactly `sample_count` samples at the smallest prime powers.
    pub fn collect(&self, sample_count: usize) -> Result<SampleSet> {
        if self.genus == 0 {
            return Err(EPolyError::InvalidGenus(0));
        }

        let _span = info_span!("collect_samples", genus = self.genus, sample_count).entered();
        let sieve = PrimePowerSieve::up_to(self.max_field_order);

        // fail before counting anything if the cutoff cannot supply enough orders
        let available = sieve.iter().take(sample_count).count();
        if available < sample_count {
            return Err(EPolyError::FieldSearchExhausted {
                genus: self.genus,
                requested: sample_count,
                found: available,
                cutoff: self.max_field_order,
            });
        }

        let mut samples = Vec::with_capacity(available);
        for q in sieve.iter().take(sample_count) {
            let field = GaloisField::new(q)?;
            let count = PointCounter::new(&field, self.genus)
                .parallel(self.parallel)
                .with_observer(self.observer)
                .count()?;
            info!(genus = self.genus, q, count, "sample");
            samples.push(Sample::new(q, count));
        }

        Ok(SampleSet {
            genus: self.genus,
            samples,
        })
    }
}

/// Collect `sample_count` samples for `genus` with default settings.
pub fn collect_samples(genus: u32, sample_count: usize) -> Result<SampleSet> {
    SampleCollector::new(genus).collect(sample_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genus_one_field_orders() {
        let set = collect_samples(1, 4).unwrap();
        assert_eq!(set.genus(), 1);
        assert_eq!(set.field_orders().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
        assert_eq!(set.samples()[0], Sample::new(2, 4));
    }

    #[test]
    fn test_empty_request() {
        assert!(collect_samples(1, 0).unwrap().is_empty());
    }

    #[test]
    fn test_cutoff_reached() {
        let result = SampleCollector::new(1).with_max_field_order(5).collect(5);
        assert!(matches!(
            result,
            Err(EPolyError::FieldSearchExhausted {
                requested: 5,
                found: 4,
                cutoff: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_unreachable_sample_count_fails_fast() {
        let result = SampleCollector::new(1).with_max_field_order(5).collect(usize::MAX);
        assert!(matches!(
            result,
            Err(EPolyError::FieldSearchExhausted {
                requested: usize::MAX,
                found: 4,
                ..
            })
        ));
        assert!(matches!(
            collect_samples(1, 1 << 40),
            Err(EPolyError::FieldSearchExhausted {
                cutoff: DEFAULT_MAX_FIELD_ORDER,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_genus_zero() {
        assert!(matches!(collect_samples(0, 2), Err(EPolyError::InvalidGenus(0))));
    }

    #[test]
    fn test_split_last() {
        let (fit, held_out) = collect_samples(1, 3).unwrap().split_last();
        assert_eq!(fit.len(), 2);
        assert_eq!(held_out, Some(Sample::new(4, 48)));
    }
}
