/// Equal-width histogram over `[min, max]`; out-of-range values clamp into the edge bins.
#[derive(Debug, Clone)]
pub struct Histogram {
    counts: Vec<u64>,
    total: u64,
    min: f64,
    max: f64,
    bin_width: f64,
}

impl Histogram {
    pub fn new(bins: usize, min: f64, max: f64) -> Self {
        let bins = bins.max(1);
        Self {
            counts: vec![0; bins],
            total: 0,
            min,
            max,
            bin_width: (max - min) / bins as f64,
        }
    }

    /// Bin index for `value`: `clamp(floor((value - min) / width), 0, bins - 1)`.
    pub fn bin_index(&self, value: f64) -> usize {
        let last = self.counts.len() - 1;
        let raw = ((value - self.min) / self.bin_width).floor();
        if raw.is_nan() || raw <= 0.0 {
            0
        } else if raw >= last as f64 {
            last
        } else {
            raw as usize
        }
    }

    pub fn record(&mut self, value: f64) -> usize {
        let index = self.bin_index(value);
        self.counts[index] += 1;
        self.total += 1;
        index
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn range(&self) -> [f64; 2] {
        [self.min, self.max]
    }

    pub fn bin_centers(&self) -> Vec<f64> {
        (0..self.counts.len())
            .map(|i| self.min + (i as f64 + 0.5) * self.bin_width)
            .collect()
    }

    /// Share of `total` per bin, in percent; all zero when empty.
    pub fn percentages(&self) -> Vec<f64> {
        if self.total == 0 {
            return vec![0.0; self.counts.len()];
        }
        let total = self.total as f64;
        self.counts
            .iter()
            .map(|&count| count as f64 / total * 100.0)
            .collect()
    }

    pub fn clear(&mut self) {
        self.counts.iter_mut().for_each(|count| *count = 0);
        self.total = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_land_in_expected_bins() {
        let mut histogram = Histogram::new(6, -3.0, 3.0);
        assert_eq!(histogram.record(2.5), 5);
        assert_eq!(histogram.record(-3.0), 0);
        assert_eq!(histogram.record(0.0), 3);
        assert_eq!(histogram.record(-0.5), 2);
        assert_eq!(histogram.counts(), &[1, 0, 1, 1, 0, 1]);
        assert_eq!(histogram.total(), 4);
    }

    #[test]
    fn out_of_range_values_clamp_to_edges() {
        let mut histogram = Histogram::new(6, -3.0, 3.0);
        assert_eq!(histogram.record(10.0), 5);
        assert_eq!(histogram.record(3.0), 5);
        assert_eq!(histogram.record(-1e9), 0);
        assert_eq!(histogram.counts().iter().sum::<u64>(), histogram.total());
    }

    #[test]
    fn percentages_are_zero_when_empty() {
        let histogram = Histogram::new(4, 0.0, 1.0);
        assert_eq!(histogram.percentages(), vec![0.0; 4]);
    }

    #[test]
    fn centers_and_percentages_describe_distribution() {
        let mut histogram = Histogram::new(2, 0.0, 2.0);
        histogram.record(0.5);
        histogram.record(1.5);
        histogram.record(1.7);
        histogram.record(1.9);
        assert_eq!(histogram.bin_centers(), vec![0.5, 1.5]);
        assert_eq!(histogram.percentages(), vec![25.0, 75.0]);

        histogram.clear();
        assert_eq!(histogram.total(), 0);
        assert_eq!(histogram.counts(), &[0, 0]);
    }
}
