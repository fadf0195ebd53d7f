pub struct StatsHelper;

impl StatsHelper {
    /// Sum and sum of squares in a single pass.
    pub fn sum_and_squares<'a, I>(values: I) -> (f64, f64)
    where
        I: IntoIterator<Item = &'a f64>,
    {
        values
            .into_iter()
            .fold((0.0, 0.0), |(sum, sum_sq), &v| (sum + v, sum_sq + v * v))
    }

    pub fn mean(samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }

    /// Population standard deviation (divides by `n`).
    pub fn population_std(samples: &[f64]) -> Option<f64> {
        let mean = Self::mean(samples)?;
        let variance =
            samples.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / samples.len() as f64;
        Some(variance.sqrt())
    }

    /// Mean and population std recovered from running moments.
    pub fn moments(count: usize, sum: f64, sum_sq: f64) -> Option<(f64, f64)> {
        if count == 0 {
            return None;
        }
        let n = count as f64;
        let mean = sum / n;
        let variance = (sum_sq / n - mean * mean).max(0.0);
        Some((mean, variance.sqrt()))
    }
}
