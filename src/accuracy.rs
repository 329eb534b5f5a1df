//! Vowel accuracy scoring
//!
//! A measured vowel is compared with a target by the Euclidean distance
//! between their (F1, F2) points. The distance maps linearly onto a score:
//! 100 at distance 0, dropping to 0 at `max_distance` and staying there.

use serde::{Deserialize, Serialize};

use crate::formant::FormantSet;
use crate::vowels::VowelTarget;

/// Default distance (Hz) at which the score reaches 0
pub const DEFAULT_MAX_DISTANCE: f64 = 1000.0;

/// Closeness of a measured vowel to its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyResult {
    /// Score in [0, 100]; 100 is a perfect match
    pub score: f64,
    /// Euclidean distance in the (F1, F2) plane, Hz
    pub distance: f64,
}

impl AccuracyResult {
    /// Feedback band for this score
    pub fn feedback(&self) -> Feedback {
        Feedback::from_score(self.score)
    }
}

/// Coarse grading of an accuracy score for practice feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// Score of at least 90
    Excellent,
    /// Score of at least 75
    Good,
    /// Score of at least 60
    KeepPracticing,
    /// Anything lower
    TryAgain,
}

impl Feedback {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Feedback::Excellent
        } else if score >= 75.0 {
            Feedback::Good
        } else if score >= 60.0 {
            Feedback::KeepPracticing
        } else {
            Feedback::TryAgain
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Feedback::Excellent => "Excellent!",
            Feedback::Good => "Good!",
            Feedback::KeepPracticing => "Keep practicing!",
            Feedback::TryAgain => "Try again!",
        }
    }
}

/// Score measured F1/F2 against target F1/F2
///
/// `distance = sqrt((f1 - target_f1)^2 + (f2 - target_f2)^2)` and
/// `score = max(0, 100 - distance / max_distance * 100)`.
///
/// `max_distance` must be positive and finite; [`AnalysisConfig::validate`]
/// enforces this for configured values. Debug builds assert it.
///
/// [`AnalysisConfig::validate`]: crate::AnalysisConfig::validate
///
/// # Example
/// ```
/// use vowelspace_core::score_accuracy;
///
/// let result = score_accuracy(280.0, 2250.0, 280.0, 2250.0, 1000.0);
/// assert_eq!(result.score, 100.0);
/// assert_eq!(result.distance, 0.0);
/// ```
pub fn score_accuracy(
    f1: f64,
    f2: f64,
    target_f1: f64,
    target_f2: f64,
    max_distance: f64,
) -> AccuracyResult {
    debug_assert!(
        max_distance.is_finite() && max_distance > 0.0,
        "max_distance must be positive and finite, got {}",
        max_distance
    );
    let distance = (f1 - target_f1).hypot(f2 - target_f2);
    let score = (100.0 - distance / max_distance * 100.0).max(0.0);
    AccuracyResult { score, distance }
}

/// Score a FormantSet against a reference vowel
///
/// Returns `None` when F1 or F2 was not detected.
pub fn score_formants(
    formants: &FormantSet,
    target: &VowelTarget,
    max_distance: f64,
) -> Option<AccuracyResult> {
    let f1 = formants.f1()?;
    let f2 = formants.f2()?;
    Some(score_accuracy(f1, f2, target.f1, target.f2, max_distance))
}
