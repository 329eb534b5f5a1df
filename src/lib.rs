//! vowelspace-core: LPC formant estimation and vowel accuracy scoring
//!
//! This library turns a short mono recording of a sustained vowel into formant
//! frequency estimates (F1, F2, F3, ...) and scores them against target values.
//! Every analysis function is a pure computation on its inputs: nothing is
//! cached or shared between calls, so recordings can be analyzed concurrently.
//!
//! # Pipeline
//!
//! 1. [`select_stable_segment`] - highest-energy window of the recording
//! 2. [`pre_emphasize`] - first-order high-pass to flatten spectral tilt
//! 3. [`lpc_autocorrelation`] - all-pole model from the Yule-Walker equations
//! 4. [`resolve_formants`] - polynomial roots mapped to formant frequencies
//! 5. [`score_accuracy`] - Euclidean distance to a target (F1, F2) pair
//!
//! [`analyze_vowel`] runs steps 1-4 with a single [`AnalysisConfig`].
//!
//! # Core Types
//!
//! - [`Sound`] - Audio samples with sample rate
//! - [`LpcModel`] - LPC polynomial coefficients, tagged with how they were obtained
//! - [`FormantSet`] - Fixed-length list of optional formant frequencies
//! - [`AccuracyResult`] - Score and distance against a target vowel
//! - [`VowelSession`] - Caller-owned collection of recorded vowels

pub mod accuracy;
pub mod config;
pub mod formant;
pub mod pipeline;
pub mod segment;
pub mod session;
pub mod sound;
pub mod vowels;

pub mod utils;

// Re-export main types at crate root
pub use accuracy::{score_accuracy, score_formants, AccuracyResult, Feedback, DEFAULT_MAX_DISTANCE};
pub use config::AnalysisConfig;
pub use formant::{resolve_formant_candidates, resolve_formants, FormantSet};
pub use pipeline::{analyze_vowel, VowelAnalysis};
pub use segment::select_stable_segment;
pub use session::{RecordedVowel, VowelSession};
pub use sound::{pre_emphasis_coefficient_for, pre_emphasize, Sound, DEFAULT_PRE_EMPHASIS};
pub use utils::lpc::{lpc_autocorrelation, DegenerateReason, LpcFit, LpcModel};
pub use vowels::{Language, VowelTarget};

use thiserror::Error;

/// Errors that can occur in vowelspace-core operations
///
/// Poor audio (silence, clipping, recordings that are too short) is never an
/// error: it shows up as absent formants. Only misuse of the API is reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VowelError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, VowelError>;

/// Reject a sample rate that is not a positive finite number
pub(crate) fn check_sample_rate(sample_rate: f64) -> Result<()> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(VowelError::InvalidConfiguration(format!(
            "sample rate must be positive and finite, got {}",
            sample_rate
        )))
    }
}
