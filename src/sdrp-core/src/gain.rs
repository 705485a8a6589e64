// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use serde::{Deserialize, Serialize};

/// Peak level every detector normalizes its output to.
pub const DETECTOR_PEAK: f64 = 0.7;

/// Gain telemetry reported by detectors and the AGC.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainMetrics {
    /// Linear gain applied to the output.
    pub current_gain: f64,
    /// `20 * log10(current_gain)`.
    pub compression_db: f64,
    /// `1 / current_gain`.
    pub gain_reduction: f64,
}

impl GainMetrics {
    /// Derive the full record from a linear gain.
    ///
    /// Uses the library `log10`; a non-positive gain saturates to
    /// `f64::MAX` reduction and `f64::MIN` dB instead of producing NaN.
    pub fn from_gain(gain: f64) -> Self {
        if gain > 0.0 {
            Self {
                current_gain: gain,
                compression_db: 20.0 * gain.log10(),
                gain_reduction: 1.0 / gain,
            }
        } else {
            Self {
                current_gain: gain,
                compression_db: f64::MIN,
                gain_reduction: f64::MAX,
            }
        }
    }
}

impl Default for GainMetrics {
    fn default() -> Self {
        Self::from_gain(1.0)
    }
}

/// Scale `output` so its peak magnitude becomes [`DETECTOR_PEAK`].
///
/// `peak` is the largest magnitude already present in `output`; a silent
/// block keeps unity gain.
pub(crate) fn normalize_to_peak(output: &mut [f64], peak: f64) -> GainMetrics {
    let gain = if peak > 0.0 { DETECTOR_PEAK / peak } else { 1.0 };
    for sample in output.iter_mut() {
        *sample *= gain;
    }
    GainMetrics::from_gain(gain)
}
