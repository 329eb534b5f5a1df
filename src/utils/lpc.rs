//! Linear Predictive Coding (LPC) utilities
//!
//! This module estimates an all-pole model of a signal with the
//! autocorrelation method: the Yule-Walker equations `R a = r` are built from
//! the signal's autocorrelation and solved with the Levinson-Durbin
//! recursion, which exploits the symmetric Toeplitz structure of `R`.
//!
//! The resulting polynomial is
//! `A(z) = 1 - a[0] z^-1 - a[1] z^-2 - ... - a[p-1] z^-p`,
//! stored as the coefficient vector `[1, -a[0], ..., -a[p-1]]`.

use thiserror::Error;
use tracing::{debug, warn};

use crate::{Result, VowelError};

/// Why the Yule-Walker system could not be solved
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DegenerateReason {
    /// The prediction error vanished before `order` steps: the Toeplitz
    /// matrix is singular. Happens for silence and for segments too short
    /// to carry `order` independent lags.
    #[error("singular autocorrelation matrix at step {step} of the recursion")]
    Singular { step: usize },

    /// NaN or infinity in the autocorrelation or the recursion
    #[error("non-finite value in the autocorrelation or prediction coefficients")]
    NonFinite,
}

/// How an [`LpcModel`] was obtained
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LpcFit {
    /// The Yule-Walker system was solved
    Solved,
    /// The system could not be solved; the model is `[1, 0, ..., 0]`
    Degenerate(DegenerateReason),
}

/// All-pole model produced by [`lpc_autocorrelation`]
#[derive(Debug, Clone, PartialEq)]
pub struct LpcModel {
    /// `order + 1` coefficients, the first is always 1.0
    coefficients: Vec<f64>,
    /// Residual prediction error power (unnormalized)
    prediction_error: f64,
    fit: LpcFit,
}

impl LpcModel {
    /// The model used when no resonance structure could be estimated
    pub fn degenerate(order: usize, reason: DegenerateReason) -> Self {
        let mut coefficients = vec![0.0; order + 1];
        coefficients[0] = 1.0;
        Self {
            coefficients,
            prediction_error: 0.0,
            fit: LpcFit::Degenerate(reason),
        }
    }

    /// Polynomial coefficients `[1, c1, ..., cp]`
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Prediction order `p`
    pub fn order(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Residual prediction error power (0 for a degenerate model)
    pub fn prediction_error(&self) -> f64 {
        self.prediction_error
    }

    pub fn fit(&self) -> LpcFit {
        self.fit
    }

    /// Whether this is the `[1, 0, ..., 0]` fallback
    pub fn is_degenerate(&self) -> bool {
        matches!(self.fit, LpcFit::Degenerate(_))
    }
}

/// Compute the LPC model of `samples` with the autocorrelation method
///
/// # Arguments
/// * `samples` - Input signal (usually a pre-emphasized vowel segment)
/// * `order` - Number of poles
///
/// # Returns
/// An [`LpcModel`] with `order + 1` coefficients. When the Yule-Walker
/// system is singular or not finite, the degenerate model `[1, 0, ..., 0]`
/// is returned instead; [`LpcModel::fit`] tells the two cases apart.
///
/// # Errors
/// `InvalidConfiguration` when `order` is 0 or `samples` is empty.
pub fn lpc_autocorrelation(samples: &[f64], order: usize) -> Result<LpcModel> {
    if order == 0 {
        return Err(VowelError::InvalidConfiguration(
            "LPC order must be at least 1".to_string(),
        ));
    }
    if samples.is_empty() {
        return Err(VowelError::InvalidConfiguration(
            "cannot compute LPC of an empty signal".to_string(),
        ));
    }

    let r = autocorrelation(samples, order);

    match levinson_durbin(&r, order) {
        Ok((a, prediction_error)) => {
            let mut coefficients = Vec::with_capacity(order + 1);
            coefficients.push(1.0);
            coefficients.extend(a.iter().map(|&ai| -ai));
            Ok(LpcModel {
                coefficients,
                prediction_error,
                fit: LpcFit::Solved,
            })
        }
        Err(reason @ DegenerateReason::Singular { .. }) => {
            debug!(%reason, order, num_samples = samples.len(), "LPC fell back to flat model");
            Ok(LpcModel::degenerate(order, reason))
        }
        Err(reason @ DegenerateReason::NonFinite) => {
            warn!(%reason, order, num_samples = samples.len(), "LPC fell back to flat model");
            Ok(LpcModel::degenerate(order, reason))
        }
    }
}

/// Autocorrelation `r[k] = Σ x[n] x[n+k]` for lags `0..=max_lag`
///
/// These are the non-negative lags of the full two-sided correlation.
/// Lags at or beyond the signal length are 0.
pub fn autocorrelation(samples: &[f64], max_lag: usize) -> Vec<f64> {
    let n = samples.len();
    (0..=max_lag)
        .map(|lag| {
            if lag >= n {
                return 0.0;
            }
            samples[..n - lag]
                .iter()
                .zip(&samples[lag..])
                .map(|(x, y)| x * y)
                .sum()
        })
        .collect()
}

/// Solve the Yule-Walker equations with the Levinson-Durbin recursion
///
/// The system matrix is the symmetric Toeplitz matrix with first column
/// `r[0..order]` and the right-hand side is `r[1..=order]`.
///
/// # Returns
/// The predictor `a` (length `order`) and the final prediction error, or the
/// reason the system has no usable solution. A pivot (prediction error) at or
/// below `r[0] * f64::EPSILON` counts as singular.
pub fn levinson_durbin(
    r: &[f64],
    order: usize,
) -> std::result::Result<(Vec<f64>, f64), DegenerateReason> {
    if r.len() <= order {
        return Err(DegenerateReason::Singular { step: r.len() });
    }
    if r[..=order].iter().any(|v| !v.is_finite()) {
        return Err(DegenerateReason::NonFinite);
    }

    let tolerance = r[0].abs() * f64::EPSILON;
    let mut a = vec![0.0; order];
    let mut previous = vec![0.0; order];
    let mut error = r[0];

    for i in 0..order {
        if error <= tolerance {
            return Err(DegenerateReason::Singular { step: i });
        }

        let mut acc = r[i + 1];
        for j in 0..i {
            acc -= previous[j] * r[i - j];
        }
        let k = acc / error;

        a[i] = k;
        for j in 0..i {
            a[j] = previous[j] - k * previous[i - 1 - j];
        }
        error *= 1.0 - k * k;

        if !k.is_finite() || !error.is_finite() {
            return Err(DegenerateReason::NonFinite);
        }
        previous[..=i].copy_from_slice(&a[..=i]);
    }

    Ok((a, error))
}
