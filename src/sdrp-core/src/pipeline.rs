// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! One-way chain: filter, then detector, then AGC. Each stage is optional.

use tracing::debug;

use crate::agc::Agc;
use crate::demod::Demodulator;
use crate::error::DspResult;
use crate::filter::{Filter, FilterStats};
use crate::gain::GainMetrics;
use crate::signal::Signal;

/// Result of [`Pipeline::run`]; per-stage telemetry is `None` when the stage
/// is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub signal: Signal,
    pub filter_stats: Option<FilterStats>,
    pub demod_metrics: Option<GainMetrics>,
    pub agc_metrics: Option<GainMetrics>,
}

#[derive(Default)]
pub struct Pipeline {
    filter: Option<Box<dyn Filter>>,
    demodulator: Option<Demodulator>,
    agc: Option<Agc>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Box<dyn Filter>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_demodulator(mut self, demodulator: Demodulator) -> Self {
        self.demodulator = Some(demodulator);
        self
    }

    pub fn with_agc(mut self, agc: Agc) -> Self {
        self.agc = Some(agc);
        self
    }

    pub fn agc(&self) -> Option<&Agc> {
        self.agc.as_ref()
    }

    /// Run `input` through the configured stages. The first failing stage
    /// aborts the run; stateful stages keep their state for the next call.
    pub fn run(&mut self, input: &Signal) -> DspResult<PipelineOutput> {
        let sample_rate = input.sample_rate;
        let mut samples = input.samples.clone();

        let filter_stats = match self.filter.as_mut() {
            Some(filter) => {
                samples = filter.process(&samples)?;
                debug!("pipeline: {} filter -> {} samples", filter.kind(), samples.len());
                Some(filter.stats())
            }
            None => None,
        };

        let demod_metrics = match self.demodulator {
            Some(demodulator) => {
                let (out, metrics) = demodulator.demodulate(&samples);
                debug!(
                    "pipeline: {:?} detector gain {:.4} ({:.2} dB)",
                    demodulator, metrics.current_gain, metrics.compression_db
                );
                samples = out;
                Some(metrics)
            }
            None => None,
        };

        let agc_metrics = match self.agc.as_mut() {
            Some(agc) => {
                samples = agc.process(&samples, sample_rate)?;
                Some(agc.metrics())
            }
            None => None,
        };

        Ok(PipelineOutput {
            signal: Signal::new(samples, sample_rate),
            filter_stats,
            demod_metrics,
            agc_metrics,
        })
    }
}
