use serde::{Deserialize, Serialize};

/// Face encoding vector (typically 512-dimensional).
///
/// Produced by the external encoder model; opaque to the matching logic
/// except for distance computation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    values: Vec<f32>,
}

impl Encoding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Compute Euclidean distance between two encodings.
    ///
    /// Lower = more similar. This is the metric the external encoder's
    /// space is calibrated for; the match tolerance is expressed in it.
    pub fn euclidean_distance(&self, other: &Encoding) -> f32 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f32>()
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_identical() {
        let a = Encoding::new(vec![1.0, 2.0, 3.0]);
        let b = Encoding::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(a.euclidean_distance(&b), 0.0);
    }

    #[test]
    fn test_distance_unit_axes() {
        let a = Encoding::new(vec![1.0, 0.0]);
        let b = Encoding::new(vec![0.0, 1.0]);
        assert!((a.euclidean_distance(&b) - std::f32::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Encoding::new(vec![0.5, -1.5, 2.0]);
        let b = Encoding::new(vec![-0.5, 0.5, 1.0]);
        assert_eq!(a.euclidean_distance(&b), b.euclidean_distance(&a));
    }

    #[test]
    fn test_serde_round_trip() {
        let a = Encoding::new(vec![0.25, -0.75]);
        let json = serde_json::to_string(&a).unwrap();
        let back: Encoding = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
