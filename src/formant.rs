//! Formant resolution from an LPC model
//!
//! The poles of the all-pole LPC model are the roots of its polynomial. A
//! pole `z` strictly inside the unit circle with positive angle describes a
//! resonance at `atan2(im, re) * fs / 2π` Hz; the lowest ones are the
//! formants F1, F2, F3, ...
//!
//! The algorithm:
//! 1. Find all complex roots of the LPC polynomial (none if the eigenvalue
//!    iteration does not converge)
//! 2. Keep the stable poles (`|z| < 1`)
//! 3. Convert pole angles to frequencies, dropping non-positive ones
//!    (each conjugate pair contributes its upper-half-plane member)
//! 4. Sort ascending and keep the first N, padding with "absent"

use std::f64::consts::PI;

use tracing::debug;

use crate::utils::lpc::LpcModel;
use crate::utils::roots::polynomial_roots;
use crate::{check_sample_rate, Result, VowelError};

/// A resonance of the LPC model (frequency and bandwidth)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormantCandidate {
    /// Frequency in Hz
    pub frequency: f64,
    /// Bandwidth in Hz, `-ln|z| * fs / π`
    pub bandwidth: f64,
}

/// Fixed-length list of formant frequencies in ascending order
///
/// Each entry is `Some(hz)` for a detected resonance or `None` when fewer
/// resonances than requested were found. The length never changes after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FormantSet {
    values: Vec<Option<f64>>,
}

impl FormantSet {
    /// A set of `n_formants` absent values
    pub fn absent(n_formants: usize) -> Self {
        Self {
            values: vec![None; n_formants],
        }
    }

    /// Build a set of exactly `n_formants` from measured frequencies
    ///
    /// The frequencies are sorted ascending, then truncated or padded with
    /// `None`.
    pub fn from_frequencies(frequencies: &[f64], n_formants: usize) -> Self {
        let mut sorted = frequencies.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let values = (0..n_formants).map(|i| sorted.get(i).copied()).collect();
        Self { values }
    }

    /// Get a specific formant (1-indexed: F1, F2, F3, ...)
    ///
    /// Returns `None` for an absent formant and for numbers outside
    /// `1..=len()`.
    pub fn get(&self, formant_number: usize) -> Option<f64> {
        if formant_number == 0 {
            return None;
        }
        self.values.get(formant_number - 1).copied().flatten()
    }

    /// First formant
    pub fn f1(&self) -> Option<f64> {
        self.get(1)
    }

    /// Second formant
    pub fn f2(&self) -> Option<f64> {
        self.get(2)
    }

    /// Third formant
    pub fn f3(&self) -> Option<f64> {
        self.get(3)
    }

    /// All entries, F1 first
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of entries (detected or not)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of detected formants
    pub fn num_detected(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// True when no formant at all was detected
    pub fn is_all_absent(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

/// Resolve the lowest `n_formants` formant frequencies of an LPC model
///
/// # Arguments
/// * `model` - LPC model from [`lpc_autocorrelation`](crate::lpc_autocorrelation)
/// * `sample_rate` - Sample rate of the analyzed signal in Hz
/// * `n_formants` - Number of formants to report
///
/// # Returns
/// A [`FormantSet`] of exactly `n_formants` entries. Finding no qualifying
/// pole is not an error: the set is then all-absent.
///
/// # Errors
/// `InvalidConfiguration` when `n_formants` is 0 or the sample rate is not
/// positive and finite.
pub fn resolve_formants(model: &LpcModel, sample_rate: f64, n_formants: usize) -> Result<FormantSet> {
    if n_formants == 0 {
        return Err(VowelError::InvalidConfiguration(
            "number of formants must be at least 1".to_string(),
        ));
    }

    let frequencies: Vec<f64> = resolve_formant_candidates(model, sample_rate)?
        .into_iter()
        .map(|c| c.frequency)
        .collect();

    Ok(FormantSet::from_frequencies(&frequencies, n_formants))
}

/// Every stable, positive-frequency pole of an LPC model, sorted by frequency
///
/// A degenerate model has no resonances and yields an empty list.
///
/// # Errors
/// `InvalidConfiguration` when the sample rate is not positive and finite.
pub fn resolve_formant_candidates(model: &LpcModel, sample_rate: f64) -> Result<Vec<FormantCandidate>> {
    check_sample_rate(sample_rate)?;

    if model.is_degenerate() {
        return Ok(Vec::new());
    }

    // LPC coefficients run from the highest power down; roots want ascending
    let ascending: Vec<f64> = model.coefficients().iter().rev().copied().collect();
    let Some(roots) = polynomial_roots(&ascending) else {
        debug!(order = model.order(), "pole search did not converge, no formants");
        return Ok(Vec::new());
    };

    let mut candidates: Vec<FormantCandidate> = roots
        .iter()
        .filter(|z| z.norm() < 1.0)
        .filter_map(|z| {
            let frequency = z.im.atan2(z.re) * sample_rate / (2.0 * PI);
            if frequency.is_nan() || frequency <= 0.0 {
                return None;
            }
            let magnitude = z.norm();
            let bandwidth = if magnitude > 0.0 {
                -magnitude.ln() * sample_rate / PI
            } else {
                sample_rate / 2.0
            };
            Some(FormantCandidate {
                frequency,
                bandwidth,
            })
        })
        .collect();

    candidates.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::lpc::{lpc_autocorrelation, DegenerateReason};
    use approx::assert_relative_eq;

    /// Samples of an all-pole filter with resonances at the given frequencies,
    /// excited by a unit impulse train
    fn synthesize_resonances(freqs: &[f64], radius: f64, sample_rate: f64, n: usize) -> Vec<f64> {
        // Build A(z) as a product of second-order sections
        let mut a = vec![1.0];
        for &f in freqs {
            let theta = 2.0 * PI * f / sample_rate;
            let section = [1.0, -2.0 * radius * theta.cos(), radius * radius];
            let mut next = vec![0.0; a.len() + 2];
            for (i, &ai) in a.iter().enumerate() {
                for (j, &sj) in section.iter().enumerate() {
                    next[i + j] += ai * sj;
                }
            }
            a = next;
        }

        let period = (sample_rate / 120.0) as usize;
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut v = if i % period == 0 { 1.0 } else { 0.0 };
            for k in 1..a.len() {
                if i >= k {
                    v -= a[k] * y[i - k];
                }
            }
            y[i] = v;
        }
        y
    }

    #[test]
    fn test_formant_set_accessors() {
        let set = FormantSet::from_frequencies(&[500.0, 1500.0], 3);

        assert_eq!(set.len(), 3);
        assert_eq!(set.f1(), Some(500.0));
        assert_eq!(set.f2(), Some(1500.0));
        assert_eq!(set.f3(), None);
        assert_eq!(set.get(0), None);
        assert_eq!(set.get(4), None);
        assert_eq!(set.num_detected(), 2);
        assert!(!set.is_all_absent());
    }

    #[test]
    fn test_formant_set_sorts_and_truncates() {
        let set = FormantSet::from_frequencies(&[2500.0, 300.0, 3500.0, 900.0], 2);
        assert_eq!(set.values(), &[Some(300.0), Some(900.0)]);
    }

    #[test]
    fn test_resolve_known_resonances() {
        let sample_rate = 10000.0;
        let samples = synthesize_resonances(&[700.0, 1200.0, 2600.0], 0.97, sample_rate, 4000);

        let model = lpc_autocorrelation(&samples, 6).unwrap();
        let formants = resolve_formants(&model, sample_rate, 3).unwrap();

        assert_relative_eq!(formants.f1().unwrap(), 700.0, epsilon = 60.0);
        assert_relative_eq!(formants.f2().unwrap(), 1200.0, epsilon = 60.0);
        assert_relative_eq!(formants.f3().unwrap(), 2600.0, epsilon = 100.0);
    }

    #[test]
    fn test_candidates_are_sorted_and_stable() {
        let sample_rate = 10000.0;
        let samples = synthesize_resonances(&[700.0, 1200.0, 2600.0], 0.97, sample_rate, 4000);
        let model = lpc_autocorrelation(&samples, 6).unwrap();

        let candidates = resolve_formant_candidates(&model, sample_rate).unwrap();

        assert!(!candidates.is_empty());
        for pair in candidates.windows(2) {
            assert!(pair[0].frequency <= pair[1].frequency);
        }
        for c in &candidates {
            assert!(c.frequency > 0.0 && c.frequency <= sample_rate / 2.0);
            assert!(c.bandwidth > 0.0);
        }
    }

    #[test]
    fn test_degenerate_model_has_no_formants() {
        let model = LpcModel::degenerate(12, DegenerateReason::Singular { step: 0 });
        let formants = resolve_formants(&model, 22050.0, 3).unwrap();

        assert_eq!(formants, FormantSet::absent(3));
        assert!(formants.is_all_absent());
    }

    #[test]
    fn test_uncorrelated_lags_resolve_to_absent() {
        // A single sample has no correlation beyond lag 0: the fit is
        // "solved" with all-zero predictor, so every pole sits at the origin
        let model = lpc_autocorrelation(&[0.5], 12).unwrap();
        assert_eq!(model.fit(), crate::LpcFit::Solved);

        let formants = resolve_formants(&model, 22050.0, 3).unwrap();
        assert_eq!(formants, FormantSet::absent(3));
    }

    #[test]
    fn test_short_and_impulsive_signals_at_every_order() {
        let mut impulse = vec![0.0; 5000];
        impulse[2500] = 1.0;
        let signals: [&[f64]; 4] = [&[0.5], &[0.3, -0.2], &[0.1, 0.4, -0.3], &impulse];

        for signal in signals {
            for order in 3..=12 {
                let model = lpc_autocorrelation(signal, order).unwrap();
                let formants = resolve_formants(&model, 22050.0, 3).unwrap();
                assert_eq!(formants.len(), 3, "len {} order {}", signal.len(), order);
            }
        }

        let model = lpc_autocorrelation(&impulse, 12).unwrap();
        assert!(resolve_formants(&model, 22050.0, 3).unwrap().is_all_absent());
    }

    #[test]
    fn test_resolve_invalid_configuration() {
        let model = LpcModel::degenerate(4, DegenerateReason::NonFinite);
        assert!(resolve_formants(&model, 22050.0, 0).is_err());
        assert!(resolve_formants(&model, 0.0, 3).is_err());
        assert!(resolve_formant_candidates(&model, f64::NAN).is_err());
    }
}
