// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use thiserror::Error;

/// Errors surfaced by filter design, filter engines, detectors and the AGC.
///
/// All of them are reported synchronously and never retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DspError {
    /// Missing or non-positive parameter, or a cutoff at/above Nyquist.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A synthesized pole maps outside the allowed stability radius.
    #[error("unstable filter: pole magnitude {magnitude:.3} exceeds maximum allowed {limit:.3}")]
    UnstableFilter { magnitude: f64, limit: f64 },

    /// Coefficient normalization divided by a numerically zero sum.
    #[error("degenerate normalization: gain sum {0:e} is too small")]
    DegenerateNormalization(f64),

    /// `process` called on an engine that was never configured.
    #[error("filter not configured")]
    Unconfigured,

    /// The factory does not know how to build the requested kind.
    #[error("unknown filter type: {0}")]
    UnknownKind(String),
}

pub type DspResult<T> = Result<T, DspError>;

impl DspError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        DspError::InvalidConfig(msg.into())
    }
}
