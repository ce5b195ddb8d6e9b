//! Failure counters used as guards for dynamic transitions.
//!
//! A counter is owned by a lifecycle definition and shared with the
//! closures of its transition table, so all operations take `&self`.

use std::sync::atomic::{AtomicU32, Ordering};

/// Bounded, resettable occurrence counter with a threshold predicate.
///
/// Counting is one-based: the Nth failure, where N equals the threshold,
/// is the one that trips [`FailureCounter::failed_too_many_times`].
///
/// # Example
///
/// ```rust
/// use nodewatch::core::FailureCounter;
///
/// let counter = FailureCounter::one_based(3);
/// counter.increment();
/// counter.increment();
/// assert!(!counter.failed_too_many_times());
///
/// counter.increment();
/// assert!(counter.failed_too_many_times());
///
/// counter.reset();
/// assert_eq!(counter.count(), 0);
/// ```
#[derive(Debug)]
pub struct FailureCounter {
    count: AtomicU32,
    threshold: u32,
}

impl FailureCounter {
    /// Create a counter that trips once `threshold` failures were counted.
    ///
    /// `threshold` must be at least 1. A zero threshold would report the
    /// counter as tripped before any failure; callers validate thresholds
    /// up front, as [`LifecycleConfig::validate`] does.
    ///
    /// [`LifecycleConfig::validate`]: crate::lifecycle::LifecycleConfig::validate
    pub fn one_based(threshold: u32) -> Self {
        debug_assert!(threshold >= 1, "failure threshold must be at least 1");
        Self {
            count: AtomicU32::new(0),
            threshold,
        }
    }

    /// Count one more failure. There is no upper cap.
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    /// `true` once the count reached the threshold (pure read).
    pub fn failed_too_many_times(&self) -> bool {
        self.count() >= self.threshold
    }

    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_counter_starts_at_zero() {
        let counter = FailureCounter::one_based(5);
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.threshold(), 5);
        assert!(!counter.failed_too_many_times());
    }

    #[test]
    fn threshold_trips_on_nth_failure() {
        let counter = FailureCounter::one_based(3);

        counter.increment();
        counter.increment();
        assert!(!counter.failed_too_many_times());

        counter.increment();
        assert!(counter.failed_too_many_times());
    }

    #[test]
    fn increment_is_not_capped() {
        let counter = FailureCounter::one_based(1);
        for _ in 0..10 {
            counter.increment();
        }
        assert_eq!(counter.count(), 10);
        assert!(counter.failed_too_many_times());
    }

    #[test]
    fn reset_zeroes_the_count() {
        let counter = FailureCounter::one_based(2);
        counter.increment();
        counter.increment();
        assert!(counter.failed_too_many_times());

        counter.reset();
        assert_eq!(counter.count(), 0);
        assert!(!counter.failed_too_many_times());
    }

    #[test]
    fn threshold_of_one_trips_on_first_failure() {
        let counter = FailureCounter::one_based(1);
        assert!(!counter.failed_too_many_times());

        counter.increment();
        assert!(counter.failed_too_many_times());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "failure threshold must be at least 1")]
    fn zero_threshold_is_rejected() {
        let _ = FailureCounter::one_based(0);
    }

    #[test]
    fn failed_too_many_times_is_a_pure_read() {
        let counter = FailureCounter::one_based(2);
        counter.increment();

        let first = counter.failed_too_many_times();
        let second = counter.failed_too_many_times();

        assert_eq!(first, second);
        assert_eq!(counter.count(), 1);
    }
}
