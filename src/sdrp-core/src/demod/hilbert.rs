// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! FIR Hilbert transformer and the coherent single-sideband detector built on
//! it. This is an alternate SSB model: signals produced by
//! [`Signal::apply_ssb`](crate::signal::Signal::apply_ssb) are recovered here,
//! whereas the combinatorial [`Demodulator::Usb`](super::Demodulator::Usb) /
//! [`Demodulator::Lsb`](super::Demodulator::Lsb) detectors pair with the
//! simplified modulators.

use std::f64::consts::PI;

use tracing::debug;

use super::normalize_output;
use crate::error::{DspError, DspResult};
use crate::filter::design::{check_positive, MAX_FIR_TAPS};
use crate::filter::Window;
use crate::gain::GainMetrics;

/// Tap count used when callers do not pick one.
pub const DEFAULT_HILBERT_TAPS: usize = 127;

/// Odd-length Hamming-windowed Hilbert kernel.
///
/// Tap `k` samples from the centre is `2 / (pi k)` for odd `k` and zero
/// otherwise. Even counts are bumped to the next odd count.
pub fn hilbert_taps(num_taps: usize) -> Vec<f64> {
    let n = if num_taps % 2 == 0 {
        num_taps + 1
    } else {
        num_taps
    };
    let mid = (n / 2) as isize;
    (0..n)
        .map(|i| {
            let k = i as isize - mid;
            if k % 2 == 0 {
                0.0
            } else {
                2.0 / (PI * k as f64) * Window::Hamming.weight(i, n)
            }
        })
        .collect()
}

/// Zero-phase Hilbert transform of a block: `H{cos} = sin`.
///
/// Samples outside the block count as zero, so the first and last
/// `num_taps / 2` outputs are attenuated.
pub fn hilbert_transform(samples: &[f64], num_taps: usize) -> Vec<f64> {
    let taps = hilbert_taps(num_taps);
    let mid = taps.len() / 2;
    let len = samples.len();
    (0..len)
        .map(|n| {
            let mut acc = 0.0;
            for (i, &tap) in taps.iter().enumerate() {
                if tap == 0.0 {
                    continue;
                }
                // y[n] = sum_i h[i] x[n + mid - i]
                let idx = n + mid;
                if idx < i {
                    continue;
                }
                let j = idx - i;
                if j < len {
                    acc += tap * samples[j];
                }
            }
            acc
        })
        .collect()
}

/// Coherent detector for phasing-method SSB signals on a known carrier.
///
/// Computes `s sin(wt) - H{s} cos(wt)`, which recovers the message of both
/// sidebands, then applies the detector peak normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CoherentSsbDetector {
    carrier_hz: f64,
    sample_rate: f64,
    taps: usize,
}

impl CoherentSsbDetector {
    pub fn new(carrier_hz: f64, sample_rate: f64, taps: usize) -> DspResult<Self> {
        check_positive(sample_rate, "sample rate")?;
        if carrier_hz.is_nan() || carrier_hz <= 0.0 || carrier_hz >= sample_rate / 2.0 {
            return Err(DspError::InvalidConfig(format!(
                "carrier frequency ({carrier_hz} Hz) must be between 0 and Nyquist ({} Hz)",
                sample_rate / 2.0
            )));
        }
        if !(3..=MAX_FIR_TAPS).contains(&taps) {
            return Err(DspError::InvalidConfig(format!(
                "Hilbert transformer needs 3 to {MAX_FIR_TAPS} taps, got {taps}"
            )));
        }
        Ok(Self {
            carrier_hz,
            sample_rate,
            taps,
        })
    }

    pub fn carrier_hz(&self) -> f64 {
        self.carrier_hz
    }

    pub fn demodulate(&self, samples: &[f64]) -> (Vec<f64>, GainMetrics) {
        let quadrature = hilbert_transform(samples, self.taps);
        let omega = 2.0 * PI * self.carrier_hz / self.sample_rate;
        let mut output: Vec<f64> = samples
            .iter()
            .zip(quadrature.iter())
            .enumerate()
            .map(|(n, (&s, &q))| {
                let phase = omega * n as f64;
                s * phase.sin() - q * phase.cos()
            })
            .collect();
        let metrics = normalize_output(&mut output);
        debug!(
            "coherent ssb: {} samples, gain {:.4}",
            output.len(),
            metrics.current_gain
        );
        (output, metrics)
    }
}
