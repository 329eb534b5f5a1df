//! Stable vowel segment selection
//!
//! A recording of a sustained vowel usually contains some silence and the
//! onset/offset of phonation around the steady part. The steady part is taken
//! to be the loudest stretch: a fixed-length window is slid across the signal
//! and the window with the largest energy (sum of squared samples) is kept.
//!
//! Tie-break: when several windows share the maximum energy, the one that
//! starts earliest wins. Windows are scanned left to right and a later window
//! replaces the current best only when its energy is strictly greater.
//!
//! The window ending exactly at the last sample is scanned too, so an input
//! exactly one window long is returned whole instead of a centered window.

use tracing::trace;

use crate::{check_sample_rate, Result, Sound, VowelError};

/// Select the highest-energy window of `segment_duration` seconds
///
/// # Arguments
/// * `samples` - Mono recording
/// * `sample_rate` - Sample rate in Hz
/// * `segment_duration` - Window length in seconds
///
/// # Returns
/// A Sound of `min(round(segment_duration * sample_rate), samples.len())`
/// samples. The window hop is a quarter of the window length. When no full
/// window fits, the centered window clamped to the signal is returned, which
/// is the whole signal whenever it is shorter than the window.
///
/// # Errors
/// `InvalidConfiguration` for a non-positive sample rate or duration, or a
/// duration shorter than one sample.
pub fn select_stable_segment(
    samples: &[f64],
    sample_rate: f64,
    segment_duration: f64,
) -> Result<Sound> {
    check_sample_rate(sample_rate)?;
    if !(segment_duration.is_finite() && segment_duration > 0.0) {
        return Err(VowelError::InvalidConfiguration(format!(
            "segment duration must be positive and finite, got {}",
            segment_duration
        )));
    }

    let segment_samples = (segment_duration * sample_rate).round() as usize;
    if segment_samples == 0 {
        return Err(VowelError::InvalidConfiguration(format!(
            "segment duration {} s is shorter than one sample at {} Hz",
            segment_duration, sample_rate
        )));
    }

    let (start, end) = match loudest_window(samples, segment_samples) {
        Some(start) => (start, start + segment_samples),
        None => centered_window(samples.len(), segment_samples),
    };

    trace!(
        start,
        end,
        num_samples = samples.len(),
        segment_samples,
        "selected stable segment"
    );

    Ok(Sound::from_samples(&samples[start..end], sample_rate))
}

/// Start index of the highest-energy full window, earliest on ties
fn loudest_window(samples: &[f64], segment_samples: usize) -> Option<usize> {
    if samples.len() < segment_samples {
        return None;
    }

    let hop = (segment_samples / 4).max(1);
    let last_start = samples.len() - segment_samples;

    let mut best: Option<(usize, f64)> = None;
    for start in (0..=last_start).step_by(hop) {
        let energy = window_energy(&samples[start..start + segment_samples]);
        match best {
            Some((_, best_energy)) if energy <= best_energy => {}
            _ => best = Some((start, energy)),
        }
    }

    best.map(|(start, _)| start)
}

/// Sum of squared amplitudes
fn window_energy(window: &[f64]) -> f64 {
    window.iter().map(|s| s * s).sum()
}

/// Window of `segment_samples` centered on the signal, clipped to `[0, len]`
fn centered_window(len: usize, segment_samples: usize) -> (usize, usize) {
    let mid = len / 2;
    let start = mid.saturating_sub(segment_samples / 2);
    let end = (start + segment_samples).min(len);
    (start, end)
}

impl Sound {
    /// Select the highest-energy window of this sound
    ///
    /// See [`select_stable_segment`].
    pub fn stable_segment(&self, segment_duration: f64) -> Result<Sound> {
        select_stable_segment(self.samples(), self.sample_rate(), segment_duration)
    }
}
