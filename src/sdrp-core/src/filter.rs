// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Filter design and the stateful filter engines built on it.

mod butterworth;
pub mod design;
mod factory;
mod fir;
mod median;
mod moving_average;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DspError, DspResult};
use crate::stats;

pub use butterworth::ButterworthFilter;
pub use design::{ButterworthCoeffs, FirKind, Window, MAX_BUTTERWORTH_ORDER};
pub use factory::{FilterFactory, FilterConstructor};
pub use fir::{apply_fir, FirFilter};
pub use median::MedianFilter;
pub use moving_average::MovingAverageFilter;

/// Largest moving-average or median window accepted.
pub const MAX_WINDOW_SIZE: usize = 1 << 20;

/// Executable filter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    MovingAverage,
    Median,
    Butterworth,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [
        FilterKind::MovingAverage,
        FilterKind::Median,
        FilterKind::Butterworth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::MovingAverage => "moving_average",
            FilterKind::Median => "median",
            FilterKind::Butterworth => "butterworth",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = DspError;

    /// Case and punctuation are ignored: `Moving-Average`, `moving_average`
    /// and `movingaverage` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "movingaverage" | "ma" => Ok(FilterKind::MovingAverage),
            "median" => Ok(FilterKind::Median),
            "butterworth" | "bw" => Ok(FilterKind::Butterworth),
            _ => Err(DspError::UnknownKind(s.to_string())),
        }
    }
}

fn normalize_name(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Tagged filter configuration. Which optional fields matter depends on `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub kind: FilterKind,
    /// Window length for moving-average and median.
    pub window_size: Option<usize>,
    /// Butterworth cutoff in Hz.
    pub cutoff_hz: Option<f64>,
    /// Butterworth order.
    pub order: Option<usize>,
    /// Butterworth sample rate in Hz.
    pub sample_rate: Option<f64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            kind: FilterKind::MovingAverage,
            window_size: None,
            cutoff_hz: None,
            order: None,
            sample_rate: None,
        }
    }
}

impl FilterConfig {
    pub fn moving_average(window_size: usize) -> Self {
        Self {
            kind: FilterKind::MovingAverage,
            window_size: Some(window_size),
            ..Self::default()
        }
    }

    pub fn median(window_size: usize) -> Self {
        Self {
            kind: FilterKind::Median,
            window_size: Some(window_size),
            ..Self::default()
        }
    }

    pub fn butterworth(order: usize, cutoff_hz: f64, sample_rate: f64) -> Self {
        Self {
            kind: FilterKind::Butterworth,
            order: Some(order),
            cutoff_hz: Some(cutoff_hz),
            sample_rate: Some(sample_rate),
            ..Self::default()
        }
    }

    /// Same parameters, different tag.
    pub fn with_kind(&self, kind: FilterKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    /// Check the fields `self.kind` needs.
    pub fn validate(&self) -> DspResult<()> {
        self.validate_for(self.kind)
    }

    /// Check the fields `kind` needs, ignoring `self.kind`.
    pub fn validate_for(&self, kind: FilterKind) -> DspResult<()> {
        match kind {
            FilterKind::MovingAverage | FilterKind::Median => {
                self.require_window_size()?;
            }
            FilterKind::Butterworth => {
                self.require_butterworth()?;
            }
        }
        Ok(())
    }

    pub(crate) fn require_window_size(&self) -> DspResult<usize> {
        match self.window_size {
            Some(0) => Err(DspError::invalid("window size must be positive")),
            Some(size) if size > MAX_WINDOW_SIZE => Err(DspError::InvalidConfig(format!(
                "window size {size} exceeds maximum {MAX_WINDOW_SIZE}"
            ))),
            Some(size) => Ok(size),
            None => Err(DspError::invalid("window size is required")),
        }
    }

    /// Returns `(order, cutoff_hz, sample_rate)` once all are present,
    /// positive, finite and below Nyquist.
    pub(crate) fn require_butterworth(&self) -> DspResult<(usize, f64, f64)> {
        let order = match self.order {
            Some(0) => return Err(DspError::invalid("filter order must be positive")),
            Some(order) if order > MAX_BUTTERWORTH_ORDER => {
                return Err(DspError::InvalidConfig(format!(
                    "filter order {order} exceeds maximum {MAX_BUTTERWORTH_ORDER}"
                )))
            }
            Some(order) => order,
            None => return Err(DspError::invalid("filter order is required")),
        };
        let cutoff = self
            .cutoff_hz
            .ok_or_else(|| DspError::invalid("cutoff frequency is required"))?;
        design::check_positive(cutoff, "cutoff frequency")?;
        let sample_rate = self
            .sample_rate
            .ok_or_else(|| DspError::invalid("sample rate is required"))?;
        design::check_positive(sample_rate, "sample rate")?;
        let nyquist = sample_rate / 2.0;
        if cutoff >= nyquist {
            return Err(DspError::InvalidConfig(format!(
                "cutoff frequency ({cutoff} Hz) must be below Nyquist frequency ({nyquist} Hz)"
            )));
        }
        Ok((order, cutoff, sample_rate))
    }
}

/// Whole-call summary of the last `process` invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterStats {
    pub input_samples: usize,
    pub output_samples: usize,
    pub input_mean: f64,
    pub output_mean: f64,
    pub input_std_dev: f64,
    pub output_std_dev: f64,
    /// `1 - output_std_dev / input_std_dev`.
    pub noise_reduction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_median: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_median: Option<f64>,
    /// `output_median - input_median`, median filter only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_shift: Option<f64>,
}

impl FilterStats {
    pub fn compute(input: &[f64], output: &[f64]) -> Self {
        let input_std_dev = stats::std_dev(input);
        let output_std_dev = stats::std_dev(output);
        if input_std_dev == 0.0 && input.len() > 1 {
            warn!("input has no spread; noise reduction reported as 0");
        }
        Self {
            input_samples: input.len(),
            output_samples: output.len(),
            input_mean: stats::mean(input),
            output_mean: stats::mean(output),
            input_std_dev,
            output_std_dev,
            noise_reduction: stats::noise_reduction(input_std_dev, output_std_dev),
            input_median: None,
            output_median: None,
            median_shift: None,
        }
    }

    /// [`FilterStats::compute`] plus the median fields.
    pub fn compute_with_median(input: &[f64], output: &[f64]) -> Self {
        let input_median = stats::median(input);
        let output_median = stats::median(output);
        Self {
            input_median: Some(input_median),
            output_median: Some(output_median),
            median_shift: Some(output_median - input_median),
            ..Self::compute(input, output)
        }
    }
}

/// Common contract of the executable filters.
///
/// An engine starts unconfigured; `process` fails with
/// [`DspError::Unconfigured`] until `configure` succeeds. A failed
/// `configure` leaves the previous state untouched.
pub trait Filter: Send {
    fn kind(&self) -> FilterKind;

    fn configure(&mut self, config: &FilterConfig) -> DspResult<()>;

    fn process(&mut self, samples: &[f64]) -> DspResult<Vec<f64>>;

    fn stats(&self) -> FilterStats;

    /// Effective configuration, `None` while unconfigured.
    fn config(&self) -> Option<&FilterConfig>;

    fn is_configured(&self) -> bool {
        self.config().is_some()
    }
}
