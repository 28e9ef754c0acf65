//! Point counting over GF(q)
//!
//! n(g, q) = #{(α, β) : α ∈ (F_q \ {-1})^{2g}, β ∈ F_q^{2g}, Σ α_i β_i = 0}
//!
//! Brute force over all pairs: O((q-1)^{2g} q^{2g} g) field operations.
//! The alpha set can be split into disjoint slices counted independently
//! and summed.

mod progress;

pub use progress::{Milestone, NoProgress, ProgressObserver, TracingProgress};

use rayon::prelude::*;
use tracing::{debug, info_span};

use crate::field::{FieldElement, GaloisField};
use crate::tuples::{generate_alpha, generate_beta, TupleSet};
use crate::{EPolyError, Result};
use progress::ProgressTracker;

/// Upper bound on (alpha, beta) pairs examined by one count.
pub const DEFAULT_MAX_PAIRS: u128 = 1 << 40;

/// Configurable point counter for one genus over one field.
pub struct PointCounter<'a> {
    field: &'a GaloisField,
    genus: u32,
    parallel: bool,
    max_pairs: u128,
    observer: &'a dyn ProgressObserver,
}

impl std::fmt::Debug for PointCounter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointCounter")
            .field("field_order", &self.field.order())
            .field("genus", &self.genus)
            .field("parallel", &self.parallel)
            .field("max_pairs", &self.max_pairs)
            .finish()
    }
}

impl<'a> PointCounter<'a> {
    /// Sequential counter with no progress reporting.
    pub fn new(field: &'a GaloisField, genus: u32) -> Self {
        Self {
            field,
            genus,
            parallel: false,
            max_pairs: DEFAULT_MAX_PAIRS,
            observer: &NoProgress,
        }
    }

    /// Spread alpha tuples over the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Refuse counts that would examine more than `max_pairs` pairs.
    pub fn with_max_pairs(mut self, max_pairs: u128) -> Self {
        self.max_pairs = max_pairs;
        self
    }

    /// Report milestones to `observer`.
    pub fn with_observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Exact number of solutions.
    pub fn count(&self) -> Result<u64> {
        if self.genus == 0 {
            return Err(EPolyError::InvalidGenus(0));
        }

        let q = self.field.order() as u64;
        let _span = info_span!("count_points", genus = self.genus, q).entered();

        let length = 2 * self.genus as usize;
        let alphas = generate_alpha(length, self.field)?;
        let betas = generate_beta(length, self.field)?;

        let pairs = alphas.len() as u128 * betas.len() as u128;
        if pairs > self.max_pairs {
            return Err(EPolyError::ResourceExhausted {
                what: "alpha/beta pairs",
                requested: pairs,
            });
        }
        debug!(alphas = alphas.len(), betas = betas.len(), "enumerating pairs");

        let tracker = ProgressTracker::new(self.observer, alphas.len(), self.genus, q);
        let solutions_for = |alpha: &[FieldElement]| {
            let n = orthogonal_count(self.field, alpha, &betas);
            tracker.tick();
            n
        };

        let count: u64 = if self.parallel {
            (0..alphas.len())
                .into_par_iter()
                .map(|i| solutions_for(alphas.row(i)))
                .sum()
        } else {
            alphas.iter().map(solutions_for).sum()
        };

        debug!(count, "counted");
        Ok(count)
    }
}

/// Number of betas with Σ α_i β_i = 0.
fn orthogonal_count(field: &GaloisField, alpha: &[FieldElement], betas: &TupleSet) -> u64 {
    betas
        .iter()
        .filter(|beta| field.is_zero(field.dot(alpha, beta)))
        .count() as u64
}

/// Count solutions for `genus` over GF(`field_order`).
///
/// Genus 0 and non prime-power orders are rejected.
pub fn count_points(genus: u32, field_order: u64) -> Result<u64> {
    if genus == 0 {
        return Err(EPolyError::InvalidGenus(0));
    }
    let field = GaloisField::new(field_order)?;
    PointCounter::new(&field, genus).count()
}
