//! Sound type for audio data representation and conditioning
//!
//! The Sound type is the fundamental data structure of the pipeline: a mono
//! sequence of samples with its sample rate. Decoding audio files and
//! capturing from a microphone are left to the caller; a Sound is always
//! built from samples that are already mono floating point.
//!
//! Every operation returns a new Sound and leaves the original untouched.

use std::f64::consts::PI;

/// Default pre-emphasis coefficient for voiced speech
pub const DEFAULT_PRE_EMPHASIS: f64 = 0.97;

/// Frame length used by [`Sound::trim_silence`]
const TRIM_FRAME_LENGTH: usize = 2048;
/// Hop between frames used by [`Sound::trim_silence`]
const TRIM_HOP_LENGTH: usize = 512;

/// Audio samples with associated sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    /// Audio samples (mono, normally in [-1, 1])
    samples: Vec<f64>,
    /// Sample rate in Hz
    sample_rate: f64,
}

impl Sound {
    /// Create a Sound from raw samples
    ///
    /// # Arguments
    /// * `samples` - Audio samples (will be cloned)
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Example
    /// ```
    /// use vowelspace_core::Sound;
    ///
    /// let samples = vec![0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5];
    /// let sound = Sound::from_samples(&samples, 22050.0);
    /// assert_eq!(sound.sample_rate(), 22050.0);
    /// ```
    pub fn from_samples(samples: &[f64], sample_rate: f64) -> Self {
        Self {
            samples: samples.to_vec(),
            sample_rate,
        }
    }

    /// Create a Sound from owned samples (avoids cloning)
    pub fn from_samples_owned(samples: Vec<f64>, sample_rate: f64) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Create a pure tone
    ///
    /// # Arguments
    /// * `frequency` - Tone frequency in Hz
    /// * `duration` - Duration in seconds
    /// * `sample_rate` - Sample rate in Hz
    /// * `amplitude` - Peak amplitude
    /// * `phase` - Initial phase in radians
    pub fn create_tone(
        frequency: f64,
        duration: f64,
        sample_rate: f64,
        amplitude: f64,
        phase: f64,
    ) -> Sound {
        let n_samples = (duration * sample_rate).round() as usize;
        let omega = 2.0 * PI * frequency / sample_rate;

        let samples: Vec<f64> = (0..n_samples)
            .map(|i| amplitude * (omega * i as f64 + phase).sin())
            .collect();

        Sound {
            samples,
            sample_rate,
        }
    }

    /// Create silence
    pub fn create_silence(duration: f64, sample_rate: f64) -> Sound {
        let n_samples = (duration * sample_rate).round() as usize;
        Sound {
            samples: vec![0.0; n_samples],
            sample_rate,
        }
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Audio samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Whether the sound holds no samples at all
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Root-mean-square amplitude (0 for an empty sound)
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.samples.iter().map(|s| s * s).sum();
        (sum_sq / self.samples.len() as f64).sqrt()
    }

    /// Peak absolute amplitude
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |acc: f64, s| acc.max(s.abs()))
    }

    /// Apply the first-order pre-emphasis filter `y[n] = x[n] - c * x[n-1]`
    ///
    /// See [`pre_emphasize`].
    pub fn pre_emphasis(&self, coefficient: f64) -> Sound {
        Sound {
            samples: pre_emphasize(&self.samples, coefficient),
            sample_rate: self.sample_rate,
        }
    }

    /// Scale so that the peak absolute amplitude is 1
    ///
    /// A silent sound is returned unchanged.
    pub fn normalize(&self) -> Sound {
        let peak = self.peak();
        if peak <= f64::MIN_POSITIVE {
            return self.clone();
        }
        Sound {
            samples: self.samples.iter().map(|s| s / peak).collect(),
            sample_rate: self.sample_rate,
        }
    }

    /// Zero every sample whose magnitude is below `threshold`
    ///
    /// A crude noise gate: low-level background hiss between phonations is
    /// removed while the vowel itself passes through unchanged.
    pub fn gate_noise(&self, threshold: f64) -> Sound {
        Sound {
            samples: self
                .samples
                .iter()
                .map(|&s| if s.abs() < threshold { 0.0 } else { s })
                .collect(),
            sample_rate: self.sample_rate,
        }
    }

    /// Remove leading and trailing silence
    ///
    /// The signal is cut into centered frames of 2048 samples with a hop of
    /// 512. A frame is silent when its RMS lies more than `top_db` below the
    /// loudest frame. Everything before the first and after the last
    /// non-silent frame is dropped. An all-silent sound trims to empty.
    pub fn trim_silence(&self, top_db: f64) -> Sound {
        let n = self.samples.len();
        if n == 0 {
            return self.clone();
        }

        let frame_rms = self.frame_rms(TRIM_FRAME_LENGTH, TRIM_HOP_LENGTH);
        let max_rms = frame_rms.iter().cloned().fold(0.0, f64::max);
        if max_rms <= 0.0 {
            return Sound {
                samples: Vec::new(),
                sample_rate: self.sample_rate,
            };
        }

        let loud = |rms: &f64| *rms > 0.0 && 20.0 * (rms / max_rms).log10() > -top_db;
        let first = frame_rms.iter().position(loud);
        let last = frame_rms.iter().rposition(loud);

        match (first, last) {
            (Some(first), Some(last)) => {
                let start = (first * TRIM_HOP_LENGTH).min(n);
                let end = ((last + 1) * TRIM_HOP_LENGTH).min(n).max(start);
                Sound {
                    samples: self.samples[start..end].to_vec(),
                    sample_rate: self.sample_rate,
                }
            }
            _ => Sound {
                samples: Vec::new(),
                sample_rate: self.sample_rate,
            },
        }
    }

    /// RMS of centered, zero-padded frames; frame `i` is centered on sample `i * hop`
    fn frame_rms(&self, frame_length: usize, hop: usize) -> Vec<f64> {
        let n = self.samples.len();
        let half = frame_length / 2;
        let num_frames = 1 + n / hop;

        (0..num_frames)
            .map(|i| {
                let center = i * hop;
                let lo = center.saturating_sub(half);
                let hi = (center + half).min(n);
                let sum_sq: f64 = if lo < hi {
                    self.samples[lo..hi].iter().map(|s| s * s).sum()
                } else {
                    0.0
                };
                (sum_sq / frame_length as f64).sqrt()
            })
            .collect()
    }
}

/// Apply the first-order pre-emphasis filter to a slice of samples
///
/// `y[0] = x[0]` and `y[n] = x[n] - coefficient * x[n-1]`. Boosts the high
/// end of the spectrum to compensate for the roll-off of voiced speech.
/// The input is not modified; an empty slice gives an empty vector.
pub fn pre_emphasize(samples: &[f64], coefficient: f64) -> Vec<f64> {
    let mut filtered = Vec::with_capacity(samples.len());
    if let Some(&first) = samples.first() {
        filtered.push(first);
    }
    filtered.extend(samples.windows(2).map(|w| w[1] - coefficient * w[0]));
    filtered
}

/// Pre-emphasis coefficient for a corner frequency
///
/// `exp(-2π * from_frequency / sample_rate)`. At 22050 Hz a corner of about
/// 107 Hz gives the conventional 0.97.
pub fn pre_emphasis_coefficient_for(from_frequency: f64, sample_rate: f64) -> f64 {
    (-2.0 * PI * from_frequency / sample_rate).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sound_from_samples() {
        let samples = vec![0.0, 0.5, 1.0, 0.5, 0.0];
        let sound = Sound::from_samples(&samples, 1000.0);

        assert_eq!(sound.num_samples(), 5);
        assert_eq!(sound.sample_rate(), 1000.0);
        assert_relative_eq!(sound.duration(), 0.005, epsilon = 1e-12);
    }

    #[test]
    fn test_create_tone() {
        let sound = Sound::create_tone(440.0, 0.1, 44100.0, 1.0, 0.0);

        assert_eq!(sound.num_samples(), 4410);
        assert_relative_eq!(sound.peak(), 1.0, epsilon = 0.01);
        // RMS of a unit sine is 1/sqrt(2)
        assert_relative_eq!(sound.rms(), std::f64::consts::FRAC_1_SQRT_2, epsilon = 0.01);
    }

    #[test]
    fn test_pre_emphasize() {
        let filtered = pre_emphasize(&[1.0, 2.0, 3.0], 0.97);

        assert_eq!(filtered.len(), 3);
        assert_relative_eq!(filtered[0], 1.0);
        assert_relative_eq!(filtered[1], 2.0 - 0.97, epsilon = 1e-12);
        assert_relative_eq!(filtered[2], 3.0 - 0.97 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pre_emphasize_edges() {
        assert!(pre_emphasize(&[], 0.97).is_empty());
        assert_eq!(pre_emphasize(&[0.25], 0.97), vec![0.25]);
    }

    #[test]
    fn test_pre_emphasis_leaves_input_untouched() {
        let sound = Sound::from_samples(&[0.5, 0.5, 0.5], 8000.0);
        let emphasized = sound.pre_emphasis(DEFAULT_PRE_EMPHASIS);

        assert_eq!(sound.samples(), &[0.5, 0.5, 0.5]);
        assert_relative_eq!(emphasized.samples()[1], 0.5 * 0.03, epsilon = 1e-12);
        assert_eq!(emphasized.sample_rate(), 8000.0);
    }

    #[test]
    fn test_pre_emphasis_coefficient_for() {
        let c = pre_emphasis_coefficient_for(107.0, 22050.0);
        assert_relative_eq!(c, 0.97, epsilon = 1e-3);
        assert_relative_eq!(pre_emphasis_coefficient_for(0.0, 16000.0), 1.0);
    }

    #[test]
    fn test_normalize() {
        let sound = Sound::from_samples(&[0.1, -0.4, 0.2], 8000.0);
        let normalized = sound.normalize();

        assert_relative_eq!(normalized.peak(), 1.0);
        assert_relative_eq!(normalized.samples()[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(normalized.samples()[1], -1.0);

        let silent = Sound::create_silence(0.01, 8000.0);
        assert_eq!(silent.normalize(), silent);
    }

    #[test]
    fn test_gate_noise() {
        let sound = Sound::from_samples(&[0.005, -0.5, -0.009, 0.02], 8000.0);
        let gated = sound.gate_noise(0.01);

        assert_eq!(gated.samples(), &[0.0, -0.5, 0.0, 0.02]);
    }

    #[test]
    fn test_trim_silence() {
        let sample_rate = 16000.0;
        let mut samples = vec![0.0; 8000];
        samples.extend(Sound::create_tone(300.0, 0.5, sample_rate, 0.8, 0.0).samples());
        samples.extend(vec![0.0; 8000]);
        let sound = Sound::from_samples_owned(samples, sample_rate);

        let trimmed = sound.trim_silence(20.0);

        // Frame granularity leaves at most a frame of padding on each side
        assert!(trimmed.num_samples() >= 8000);
        assert!(trimmed.num_samples() <= 8000 + 2 * TRIM_FRAME_LENGTH);
        assert!(trimmed.num_samples() < sound.num_samples());
    }

    #[test]
    fn test_trim_silence_all_silent() {
        let silent = Sound::create_silence(0.2, 16000.0);
        assert!(silent.trim_silence(20.0).is_empty());

        let empty = Sound::from_samples(&[], 16000.0);
        assert!(empty.trim_silence(20.0).is_empty());
    }
}
