//! Numerical building blocks for formant analysis
//!
//! This module contains the low-level routines used by the analysis
//! pipeline: the autocorrelation LPC estimator and polynomial root finding.

pub mod lpc;
pub mod roots;

pub use lpc::{autocorrelation, levinson_durbin, lpc_autocorrelation, LpcModel};
pub use roots::polynomial_roots;
