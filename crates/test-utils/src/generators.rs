//! Test data generators for synthetic direction/frequency sets.
//!
//! These generators create predictable, verifiable patterns that can be
//! used across the test suite.

/// Creates `n` evenly spaced directions starting at north.
///
/// # Example
///
/// ```
/// use test_utils::uniform_bins;
///
/// let bins = uniform_bins(4);
/// assert_eq!(bins, vec![0.0, 90.0, 180.0, 270.0]);
/// ```
pub fn uniform_bins(n: usize) -> Vec<f64> {
    let step = 360.0 / n.max(1) as f64;
    (0..n).map(|i| i as f64 * step).collect()
}

/// Creates a single-peaked frequency distribution over `bins`, highest at
/// `peak_deg` and falling off with angular distance. Frequencies sum to 1.
///
/// # Example
///
/// ```
/// use test_utils::{uniform_bins, unimodal_frequencies};
///
/// let bins = uniform_bins(8);
/// let freq = unimodal_frequencies(&bins, 90.0);
/// let sum: f64 = freq.iter().sum();
/// assert!((sum - 1.0).abs() < 1e-9);
/// ```
pub fn unimodal_frequencies(bins: &[f64], peak_deg: f64) -> Vec<f64> {
    let weights: Vec<f64> = bins
        .iter()
        .map(|&b| {
            let mut diff = (b - peak_deg).rem_euclid(360.0);
            if diff > 180.0 {
                diff = 360.0 - diff;
            }
            // 1.0 at the peak, 0.1 directly opposite
            1.0 - 0.9 * diff / 180.0
        })
        .collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return vec![0.0; bins.len()];
    }
    weights.into_iter().map(|w| w / total).collect()
}

/// Simple deterministic pseudo-random frequencies, normalized to sum to 1.
pub fn pseudo_random_frequencies(n: usize, seed: u32) -> Vec<f64> {
    let mut state = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
    let raw: Vec<f64> = (0..n)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            ((state >> 16) & 0x7fff) as f64 / 32767.0 + 0.01
        })
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|v| v / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_bins_sixteen() {
        let bins = uniform_bins(16);
        assert_eq!(bins.len(), 16);
        assert_eq!(bins[1], 22.5);
        assert_eq!(bins[15], 337.5);
    }

    #[test]
    fn test_unimodal_peak_position() {
        let bins = uniform_bins(8);
        let freq = unimodal_frequencies(&bins, 90.0);
        let peak = freq
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(bins[peak], 90.0);
    }

    #[test]
    fn test_pseudo_random_is_reproducible() {
        let a = pseudo_random_frequencies(12, 7);
        let b = pseudo_random_frequencies(12, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| v > 0.0));
        let sum: f64 = a.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
