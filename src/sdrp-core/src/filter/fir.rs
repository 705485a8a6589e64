// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use crate::error::{DspError, DspResult};

/// Direct-form FIR with a history ring that survives between blocks, so a
/// long signal can be fed in arbitrary chunks.
#[derive(Debug, Clone)]
pub struct FirFilter {
    coeffs: Vec<f64>,
    history: Vec<f64>,
    pos: usize,
}

impl FirFilter {
    pub fn new(coeffs: Vec<f64>) -> DspResult<Self> {
        if coeffs.is_empty() {
            return Err(DspError::invalid("FIR filter must have at least 1 tap"));
        }
        let history = vec![0.0; coeffs.len()];
        Ok(Self {
            coeffs,
            history,
            pos: 0,
        })
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn reset(&mut self) {
        self.history.fill(0.0);
        self.pos = 0;
    }

    pub fn process_sample(&mut self, sample: f64) -> f64 {
        let n = self.history.len();
        self.history[self.pos] = sample;
        let mut acc = 0.0;
        for (k, &coeff) in self.coeffs.iter().enumerate() {
            acc += coeff * self.history[(self.pos + n - k) % n];
        }
        self.pos = (self.pos + 1) % n;
        acc
    }

    pub fn process(&mut self, samples: &[f64]) -> Vec<f64> {
        samples.iter().map(|&s| self.process_sample(s)).collect()
    }
}

/// One-shot convolution from zero state; output length equals input length.
pub fn apply_fir(samples: &[f64], coeffs: &[f64]) -> Vec<f64> {
    (0..samples.len())
        .map(|i| {
            coeffs
                .iter()
                .take(i + 1)
                .enumerate()
                .map(|(j, &coeff)| coeff * samples[i - j])
                .sum()
        })
        .collect()
}
