// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use tracing::debug;

use super::{Filter, FilterConfig, FilterKind, FilterStats};
use crate::error::{DspError, DspResult};
use crate::stats::middle_of_sorted;

/// Sliding-window median for impulse noise.
///
/// Even window sizes are bumped to the next odd size. Windows are clipped at
/// the block edges, so the first and last outputs use fewer samples.
#[derive(Debug, Clone, Default)]
pub struct MedianFilter {
    config: Option<FilterConfig>,
    /// Scratch space reused between calls, never longer than the window
    /// or the block.
    scratch: Vec<f64>,
    stats: FilterStats,
}

impl MedianFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window_size(&self) -> Option<usize> {
        self.config.as_ref().and_then(|config| config.window_size)
    }
}

impl Filter for MedianFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Median
    }

    fn configure(&mut self, config: &FilterConfig) -> DspResult<()> {
        let requested = config.require_window_size()?;
        let window = if requested % 2 == 0 {
            requested + 1
        } else {
            requested
        };
        self.config = Some(FilterConfig::median(window));
        self.scratch.clear();
        self.stats = FilterStats::default();
        debug!("median configured: window={} (requested {})", window, requested);
        Ok(())
    }

    fn process(&mut self, samples: &[f64]) -> DspResult<Vec<f64>> {
        let size = self.window_size().ok_or(DspError::Unconfigured)?;
        let half = size / 2;
        let n = samples.len();
        self.scratch.resize(size.min(n), 0.0);

        let mut output = Vec::with_capacity(n);
        for i in 0..n {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            let window = &mut self.scratch[..end - start];
            window.copy_from_slice(&samples[start..end]);
            window.sort_by(f64::total_cmp);
            output.push(middle_of_sorted(window));
        }

        self.stats = FilterStats::compute_with_median(samples, &output);
        Ok(output)
    }

    fn stats(&self) -> FilterStats {
        self.stats.clone()
    }

    fn config(&self) -> Option<&FilterConfig> {
        self.config.as_ref()
    }
}
