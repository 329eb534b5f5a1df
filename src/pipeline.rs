//! End-to-end vowel analysis
//!
//! Runs the stages in order on one recording:
//! 1. Select the stable (highest-energy) segment
//! 2. Pre-emphasize it
//! 3. Fit an LPC model
//! 4. Resolve the formants
//!
//! Scoring against a target is a separate, optional step.

use tracing::debug;

use crate::accuracy::{score_formants, AccuracyResult};
use crate::config::AnalysisConfig;
use crate::formant::{resolve_formants, FormantSet};
use crate::segment::select_stable_segment;
use crate::utils::lpc::{lpc_autocorrelation, LpcModel};
use crate::vowels::VowelTarget;
use crate::{check_sample_rate, Result, Sound, VowelError};

/// Result of analyzing one recorded vowel
#[derive(Debug, Clone, PartialEq)]
pub struct VowelAnalysis {
    /// Number of samples in the selected segment
    segment_samples: usize,
    lpc: LpcModel,
    formants: FormantSet,
}

impl VowelAnalysis {
    /// Formants F1..Fn
    pub fn formants(&self) -> &FormantSet {
        &self.formants
    }

    /// LPC model fitted to the pre-emphasized segment
    pub fn lpc_model(&self) -> &LpcModel {
        &self.lpc
    }

    /// Length of the analyzed segment in samples
    pub fn segment_samples(&self) -> usize {
        self.segment_samples
    }

    /// Score F1/F2 against a target; `None` when either was not detected
    pub fn score_against(&self, target: &VowelTarget, max_distance: f64) -> Option<AccuracyResult> {
        score_formants(&self.formants, target, max_distance)
    }
}

/// Analyze a recording of a sustained vowel
///
/// # Arguments
/// * `sound` - Mono recording
/// * `config` - Analysis settings
///
/// # Errors
/// `InvalidConfiguration` for an invalid config, an invalid sample rate or
/// an empty recording. Silent or otherwise unusable audio is not an error:
/// the returned formants are then absent.
pub fn analyze_vowel(sound: &Sound, config: &AnalysisConfig) -> Result<VowelAnalysis> {
    config.validate()?;
    check_sample_rate(sound.sample_rate())?;
    if sound.is_empty() {
        return Err(VowelError::InvalidConfiguration(
            "cannot analyze an empty recording".to_string(),
        ));
    }

    let segment = select_stable_segment(sound.samples(), sound.sample_rate(), config.segment_duration)?;
    let emphasized = segment.pre_emphasis(config.pre_emphasis);
    let lpc = lpc_autocorrelation(emphasized.samples(), config.lpc_order)?;
    let formants = resolve_formants(&lpc, sound.sample_rate(), config.n_formants)?;

    debug!(
        segment_samples = segment.num_samples(),
        degenerate = lpc.is_degenerate(),
        detected = formants.num_detected(),
        f1 = ?formants.f1(),
        f2 = ?formants.f2(),
        "analyzed vowel"
    );

    Ok(VowelAnalysis {
        segment_samples: segment.num_samples(),
        lpc,
        formants,
    })
}

impl Sound {
    /// Analyze this sound as a sustained vowel
    ///
    /// See [`analyze_vowel`].
    pub fn analyze_vowel(&self, config: &AnalysisConfig) -> Result<VowelAnalysis> {
        analyze_vowel(self, config)
    }
}
