//! Analysis configuration
//!
//! All settings have defaults matching common practice for adult speech at
//! 16-44.1 kHz. The struct deserializes from partial documents: missing
//! fields take their default.

use serde::{Deserialize, Serialize};

use crate::accuracy::DEFAULT_MAX_DISTANCE;
use crate::sound::DEFAULT_PRE_EMPHASIS;
use crate::{Result, VowelError};

/// Settings for one formant analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Length of the stable-segment window in seconds
    pub segment_duration: f64,
    /// LPC prediction order (number of poles)
    pub lpc_order: usize,
    /// Pre-emphasis coefficient in [0, 1)
    pub pre_emphasis: f64,
    /// Number of formants to report
    pub n_formants: usize,
    /// Distance in Hz at which the accuracy score reaches 0
    pub max_distance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            segment_duration: 0.3,
            lpc_order: 12,
            pre_emphasis: DEFAULT_PRE_EMPHASIS,
            n_formants: 3,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

impl AnalysisConfig {
    /// Set the segment window length in seconds
    pub fn with_segment_duration(mut self, seconds: f64) -> Self {
        self.segment_duration = seconds;
        self
    }

    /// Set the LPC order
    pub fn with_lpc_order(mut self, order: usize) -> Self {
        self.lpc_order = order;
        self
    }

    /// Set the pre-emphasis coefficient
    pub fn with_pre_emphasis(mut self, coefficient: f64) -> Self {
        self.pre_emphasis = coefficient;
        self
    }

    /// Set the number of formants to report
    pub fn with_n_formants(mut self, n_formants: usize) -> Self {
        self.n_formants = n_formants;
        self
    }

    /// Set the scoring normalization distance
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Check every setting
    ///
    /// # Errors
    /// `InvalidConfiguration` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.segment_duration.is_finite() && self.segment_duration > 0.0) {
            return Err(invalid("segment_duration", self.segment_duration));
        }
        if self.lpc_order == 0 {
            return Err(invalid("lpc_order", self.lpc_order));
        }
        if !(self.pre_emphasis.is_finite() && (0.0..1.0).contains(&self.pre_emphasis)) {
            return Err(invalid("pre_emphasis", self.pre_emphasis));
        }
        if self.n_formants == 0 {
            return Err(invalid("n_formants", self.n_formants));
        }
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(invalid("max_distance", self.max_distance));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl std::fmt::Display) -> VowelError {
    VowelError::InvalidConfiguration(format!("{} has invalid value {}", field, value))
}
