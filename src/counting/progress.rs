//! Progress observation for long counts
//!
//! Counting is a pure function; observers only watch it. Milestones fire as
//! the processed share of the alpha set crosses each 10% step.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::info;

/// Progress report for one (genus, field order) count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    /// Genus being counted
    pub genus: u32,
    /// Field order being counted
    pub field_order: u64,
    /// Completed share of the alpha set, a multiple of 10
    pub percent: u8,
}

/// Receives milestones; may be called from worker threads.
pub trait ProgressObserver: Sync {
    /// Called once per milestone reached.
    fn on_milestone(&self, milestone: Milestone);
}

impl<F> ProgressObserver for F
where
    F: Fn(Milestone) + Sync,
{
    fn on_milestone(&self, milestone: Milestone) {
        self(milestone)
    }
}

/// Discards all milestones.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_milestone(&self, _milestone: Milestone) {}
}

/// Logs milestones at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn on_milestone(&self, milestone: Milestone) {
        info!(
            genus = milestone.genus,
            q = milestone.field_order,
            "{}% of alpha tuples processed",
            milestone.percent
        );
    }
}

/// Shared completion counter feeding an observer.
pub(crate) struct ProgressTracker<'a> {
    observer: &'a dyn ProgressObserver,
    done: AtomicUsize,
    total: usize,
    genus: u32,
    field_order: u64,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(
        observer: &'a dyn ProgressObserver,
        total: usize,
        genus: u32,
        field_order: u64,
    ) -> Self {
        Self {
            observer,
            done: AtomicUsize::new(0),
            total,
            genus,
            field_order,
        }
    }

    /// Record one finished unit. Each 10% step is crossed by exactly one tick.
    pub(crate) fn tick(&self) {
        let before = self.done.fetch_add(1, Ordering::Relaxed);
        let decile_before = before * 10 / self.total;
        let decile_after = (before + 1) * 10 / self.total;
        if decile_after > decile_before {
            self.observer.on_milestone(Milestone {
                genus: self.genus,
                field_order: self.field_order,
                percent: (decile_after * 10) as u8,
            });
        }
    }
}
