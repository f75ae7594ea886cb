use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Generate a random vector with a given dimension
pub fn generate_random_vector(dimension: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let mut vector = vec![];
    for _ in 0..dimension {
        vector.push(rng.gen::<f64>());
    }
    vector
}

/// Generate `num_points` points scattered around `centers`, round-robin over the centers.
/// Each coordinate is offset by a value in `[-spread, spread)`. Deterministic for a given seed.
pub fn generate_blobs(
    centers: &[Vec<f64>],
    num_points: usize,
    spread: f64,
    seed: u64,
) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_points)
        .map(|i| {
            centers[i % centers.len()]
                .iter()
                .map(|&c| {
                    if spread > 0.0 {
                        c + rng.gen_range(-spread..spread)
                    } else {
                        c
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_blobs() {
        let centers = vec![vec![0.0, 0.0], vec![100.0, 100.0]];
        let points = generate_blobs(&centers, 10, 1.0, 7);
        assert_eq!(points.len(), 10);
        for (i, point) in points.iter().enumerate() {
            let center = &centers[i % 2];
            assert_eq!(point.len(), 2);
            for (x, c) in point.iter().zip(center.iter()) {
                assert!((x - c).abs() < 1.0);
            }
        }
        assert_eq!(points, generate_blobs(&centers, 10, 1.0, 7));
    }
}
