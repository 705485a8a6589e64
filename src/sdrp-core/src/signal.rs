// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::f64::consts::PI;

use crate::demod::hilbert::{hilbert_transform, DEFAULT_HILBERT_TAPS};
use crate::filter::apply_fir;
use crate::modulate::{Modulation, Sideband};

/// Message tone of generated test signals, relative to the carrier.
const TEST_MESSAGE_RATIO: f64 = 10.0;

/// A block of real samples with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub samples: Vec<f64>,
    pub sample_rate: f64,
}

impl Signal {
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// `sin(2 pi f t)` for `floor(duration_s * sample_rate)` samples.
    pub fn carrier(freq_hz: f64, duration_s: f64, sample_rate: f64) -> Self {
        let len = (duration_s * sample_rate).max(0.0).floor() as usize;
        Self::new(tone(freq_hz, len, sample_rate), sample_rate)
    }

    /// Test signal as the `generate` command produces it: a carrier at
    /// `freq_hz` and a message tone at `freq_hz / 10`, combined with the
    /// simplified modulator for `modulation`.
    pub fn test_signal(
        modulation: Modulation,
        freq_hz: f64,
        duration_s: f64,
        sample_rate: f64,
    ) -> Self {
        let carrier = Self::carrier(freq_hz, duration_s, sample_rate);
        let message = tone(
            freq_hz / TEST_MESSAGE_RATIO,
            carrier.len(),
            sample_rate,
        );
        Self::new(modulation.modulate(&carrier.samples, &message), sample_rate)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate <= 0.0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate
    }

    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |peak, &s| peak.max(s.abs()))
    }

    /// Scale so the peak magnitude is 1. Silent signals are left alone.
    pub fn normalize(mut self) -> Self {
        let peak = self.peak();
        if peak > 0.0 {
            for sample in self.samples.iter_mut() {
                *sample /= peak;
            }
        }
        self
    }

    pub fn scale(mut self, factor: f64) -> Self {
        for sample in self.samples.iter_mut() {
            *sample *= factor;
        }
        self
    }

    /// One-shot FIR convolution from zero state.
    pub fn filter(self, coeffs: &[f64]) -> Self {
        Self::new(apply_fir(&self.samples, coeffs), self.sample_rate)
    }

    /// Double-sideband AM: `sin(2 pi f t) * (1 + depth * m)`.
    pub fn apply_am(self, freq_hz: f64, depth: f64) -> Self {
        let carrier = tone(freq_hz, self.samples.len(), self.sample_rate);
        let samples = self
            .samples
            .iter()
            .zip(carrier)
            .map(|(&m, c)| c * (1.0 + depth * m))
            .collect();
        Self::new(samples, self.sample_rate)
    }

    /// Phase-continuous FM around `freq_hz` with `deviation_hz` per unit of message.
    pub fn apply_fm(self, freq_hz: f64, deviation_hz: f64) -> Self {
        let mut phase = 0.0;
        let step = 2.0 * PI / self.sample_rate;
        let samples = self
            .samples
            .iter()
            .map(|&m| {
                phase += step * (freq_hz + deviation_hz * m);
                phase.sin()
            })
            .collect();
        Self::new(samples, self.sample_rate)
    }

    /// Phasing-method SSB using an FIR Hilbert transformer.
    pub fn apply_ssb(self, freq_hz: f64, sideband: Sideband) -> Self {
        let quadrature = hilbert_transform(&self.samples, DEFAULT_HILBERT_TAPS);
        let omega = 2.0 * PI * freq_hz / self.sample_rate;
        let samples = self
            .samples
            .iter()
            .zip(quadrature)
            .enumerate()
            .map(|(n, (&m, h))| {
                let phase = omega * n as f64;
                let carrier = phase.sin();
                let carrier_quadrature = -phase.cos();
                match sideband {
                    Sideband::Upper => m * carrier - h * carrier_quadrature,
                    Sideband::Lower => m * carrier + h * carrier_quadrature,
                }
            })
            .collect();
        Self::new(samples, self.sample_rate)
    }
}

fn tone(freq_hz: f64, len: usize, sample_rate: f64) -> Vec<f64> {
    (0..len)
        .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate).sin())
        .collect()
}
