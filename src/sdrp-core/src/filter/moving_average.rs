// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use tracing::debug;

use super::{Filter, FilterConfig, FilterKind, FilterStats};
use crate::error::{DspError, DspResult};

#[derive(Debug, Clone)]
struct State {
    config: FilterConfig,
    buffer: Vec<f64>,
    sum: f64,
    pos: usize,
}

/// Boxcar average over a circular buffer with a running sum.
///
/// The buffer starts zeroed, so the first `window - 1` outputs average over
/// a partially filled window. History carries over between `process` calls.
#[derive(Debug, Clone, Default)]
pub struct MovingAverageFilter {
    state: Option<State>,
    stats: FilterStats,
}

impl MovingAverageFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window_size(&self) -> Option<usize> {
        self.state.as_ref().map(|state| state.buffer.len())
    }
}

impl Filter for MovingAverageFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::MovingAverage
    }

    fn configure(&mut self, config: &FilterConfig) -> DspResult<()> {
        let window = config.require_window_size()?;
        self.state = Some(State {
            config: FilterConfig::moving_average(window),
            buffer: vec![0.0; window],
            sum: 0.0,
            pos: 0,
        });
        self.stats = FilterStats::default();
        debug!("moving average configured: window={}", window);
        Ok(())
    }

    fn process(&mut self, samples: &[f64]) -> DspResult<Vec<f64>> {
        let state = self.state.as_mut().ok_or(DspError::Unconfigured)?;
        let window = state.buffer.len();
        let scale = 1.0 / window as f64;

        let output: Vec<f64> = samples
            .iter()
            .map(|&sample| {
                state.sum -= state.buffer[state.pos];
                state.buffer[state.pos] = sample;
                state.sum += sample;
                state.pos = (state.pos + 1) % window;
                state.sum * scale
            })
            .collect();

        self.stats = FilterStats::compute(samples, &output);
        Ok(output)
    }

    fn stats(&self) -> FilterStats {
        self.stats.clone()
    }

    fn config(&self) -> Option<&FilterConfig> {
        self.state.as_ref().map(|state| &state.config)
    }
}
