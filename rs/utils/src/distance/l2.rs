pub struct L2DistanceCalculator {}

impl L2DistanceCalculator {
    /// Compute the Euclidean distance between two vectors of the same dimension.
    pub fn calculate(a: &[f64], b: &[f64]) -> f64 {
        Self::calculate_squared(a, b).sqrt()
    }

    /// Sum of squared component differences, without the final square root.
    pub fn calculate_squared(a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y).powi(2))
            .sum::<f64>()
    }
}
