use crate::math::stats::StatsHelper;
use std::collections::VecDeque;

// An evicted square this many times larger than what remains forces an immediate rebuild.
const RESYNC_RATIO: f64 = 16.0;

/// Fixed-capacity FIFO of recent values with running moments and extrema.
///
/// Mean and deviation come from the running sum and sum of squares, so reads
/// are O(1). Minimum and maximum are tracked with monotonic deques, which makes
/// `push` amortized O(1). The running sums are rebuilt from the buffer once per
/// `capacity` evictions to keep subtraction drift bounded, and right away when
/// an evicted value dominated the sum of squares.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    values: VecDeque<f64>,
    capacity: usize,
    sum: f64,
    sum_sq: f64,
    evictions: usize,
    // Non-increasing from front to back.
    max_candidates: VecDeque<f64>,
    // Non-decreasing from front to back.
    min_candidates: VecDeque<f64>,
}

impl RollingWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
            sum_sq: 0.0,
            evictions: 0,
            max_candidates: VecDeque::with_capacity(capacity),
            min_candidates: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends `value`, returning the evicted oldest value once the window is full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.values.len() == self.capacity {
            self.values.pop_front()
        } else {
            None
        };

        let mut stale = false;
        if let Some(old) = evicted {
            let square = old * old;
            self.sum -= old;
            self.sum_sq -= square;
            stale = !self.sum_sq.is_finite() || square > RESYNC_RATIO * self.sum_sq.max(0.0);
            if self.max_candidates.front() == Some(&old) {
                self.max_candidates.pop_front();
            }
            if self.min_candidates.front() == Some(&old) {
                self.min_candidates.pop_front();
            }
        }

        self.values.push_back(value);
        self.sum += value;
        self.sum_sq += value * value;

        while self.max_candidates.back().is_some_and(|&v| v < value) {
            self.max_candidates.pop_back();
        }
        self.max_candidates.push_back(value);
        while self.min_candidates.back().is_some_and(|&v| v > value) {
            self.min_candidates.pop_back();
        }
        self.min_candidates.push_back(value);

        if evicted.is_some() {
            self.evictions += 1;
            if stale || self.evictions >= self.capacity {
                self.resync();
            }
        }

        evicted
    }

    fn resync(&mut self) {
        let (sum, sum_sq) = StatsHelper::sum_and_squares(&self.values);
        self.sum = sum;
        self.sum_sq = sum_sq;
        self.evictions = 0;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn mean(&self) -> Option<f64> {
        StatsHelper::moments(self.len(), self.sum, self.sum_sq).map(|(mean, _)| mean)
    }

    /// Population standard deviation of the current contents.
    pub fn std(&self) -> Option<f64> {
        StatsHelper::moments(self.len(), self.sum, self.sum_sq).map(|(_, std)| std)
    }

    pub fn min(&self) -> Option<f64> {
        self.min_candidates.front().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.max_candidates.front().copied()
    }

    /// Current contents, oldest first.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.max_candidates.clear();
        self.min_candidates.clear();
        self.sum = 0.0;
        self.sum_sq = 0.0;
        self.evictions = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn window_evicts_oldest_once_full() {
        let mut window = RollingWindow::with_capacity(3);
        assert_eq!(window.push(1.0), None);
        assert_eq!(window.push(2.0), None);
        assert_eq!(window.push(3.0), None);
        assert_eq!(window.push(4.0), Some(1.0));

        assert_eq!(window.values().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
        assert_eq!(window.mean(), Some(3.0));
        assert!((window.std().unwrap() - 0.816_496_580_927_726).abs() < 1e-9);
    }

    #[test]
    fn empty_window_reports_nothing() {
        let window = RollingWindow::with_capacity(4);
        assert!(window.is_empty());
        assert_eq!(window.mean(), None);
        assert_eq!(window.std(), None);
        assert_eq!(window.min(), None);
        assert_eq!(window.max(), None);
    }

    #[test]
    fn extrema_follow_evictions() {
        let mut window = RollingWindow::with_capacity(3);
        for value in [5.0, 1.0, 5.0, 2.0, 3.0] {
            window.push(value);
        }
        // contents: [5.0, 2.0, 3.0]
        assert_eq!(window.max(), Some(5.0));
        assert_eq!(window.min(), Some(2.0));
        window.push(4.0);
        // contents: [2.0, 3.0, 4.0]
        assert_eq!(window.max(), Some(4.0));
        assert_eq!(window.min(), Some(2.0));
    }

    #[test]
    fn randomized_moments_match_direct_computation() {
        let mut rng = StdRng::seed_from_u64(7);
        for capacity in [1, 2, 5, 17, 100] {
            let mut window = RollingWindow::with_capacity(capacity);
            let mut history = Vec::new();
            for _ in 0..(capacity * 7 + 3) {
                let value = rng.gen_range(-4.0..4.0);
                window.push(value);
                history.push(value);

                let start = history.len().saturating_sub(capacity);
                let expected = &history[start..];
                assert!(window.len() <= capacity);
                assert_eq!(window.values().collect::<Vec<_>>(), expected);

                let mean = StatsHelper::mean(expected).unwrap();
                let std = StatsHelper::population_std(expected).unwrap();
                assert!((window.mean().unwrap() - mean).abs() < 1e-9);
                assert!((window.std().unwrap() - std).abs() < 1e-6);

                let min = expected.iter().copied().fold(f64::INFINITY, f64::min);
                let max = expected.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                assert_eq!(window.min(), Some(min));
                assert_eq!(window.max(), Some(max));
            }
        }
    }

    #[test]
    fn large_outlier_leaves_no_trace_after_eviction() {
        for outlier in [1e200, -1e150, 1e8] {
            let mut window = RollingWindow::with_capacity(3);
            for value in [outlier, 1.0, 2.0, 3.0] {
                window.push(value);
            }
            assert_eq!(window.values().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
            assert!((window.mean().unwrap() - 2.0).abs() < 1e-12);
            assert!((window.std().unwrap() - 0.816_496_580_927_726).abs() < 1e-9);

            window.push(4.0);
            assert!((window.mean().unwrap() - 3.0).abs() < 1e-12);
            assert!((window.std().unwrap() - 0.816_496_580_927_726).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_capacity_holds_one_value() {
        let mut window = RollingWindow::with_capacity(0);
        assert_eq!(window.capacity(), 1);
        window.push(2.0);
        assert_eq!(window.push(5.0), Some(2.0));
        assert_eq!(window.mean(), Some(5.0));
        assert_eq!(window.std(), Some(0.0));
    }

    #[test]
    fn clear_resets_moments() {
        let mut window = RollingWindow::with_capacity(2);
        window.push(1.0);
        window.push(2.0);
        window.clear();
        assert_eq!(window.len(), 0);
        assert_eq!(window.mean(), None);
        window.push(6.0);
        assert_eq!(window.mean(), Some(6.0));
        assert_eq!(window.max(), Some(6.0));
    }
}
