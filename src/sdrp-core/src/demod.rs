// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Real-sample detectors. Every detector is a pure function of its input and
//! normalizes its output peak to [`DETECTOR_PEAK`](crate::gain::DETECTOR_PEAK).

mod am;
mod fm;
pub mod hilbert;
mod ssb;

use serde::{Deserialize, Serialize};

use crate::gain::{normalize_to_peak, GainMetrics};
use crate::modulate::Modulation;

use self::am::demod_am;
use self::fm::demod_fm;
use self::ssb::{demod_lsb, demod_usb};

pub use self::hilbert::{hilbert_taps, hilbert_transform, CoherentSsbDetector};

/// Detector selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Demodulator {
    /// Full-wave rectifier.
    Am,
    /// Absolute first difference; output is one sample shorter than input.
    Fm,
    /// `|x[i] + x[i-1]|`.
    Usb,
    /// `|x[i] - x[i+1]|`.
    Lsb,
}

impl Demodulator {
    /// Construct the detector matching a [`Modulation`].
    pub fn for_modulation(modulation: Modulation) -> Self {
        match modulation {
            Modulation::Am => Self::Am,
            Modulation::Fm => Self::Fm,
            Modulation::Usb => Self::Usb,
            Modulation::Lsb => Self::Lsb,
        }
    }

    /// Detect `samples` and normalize the result to the detector peak.
    ///
    /// Returns the scaled output and the gain that was applied.
    pub fn demodulate(&self, samples: &[f64]) -> (Vec<f64>, GainMetrics) {
        let mut output = match self {
            Self::Am => demod_am(samples),
            Self::Fm => demod_fm(samples),
            Self::Usb => demod_usb(samples),
            Self::Lsb => demod_lsb(samples),
        };
        let metrics = normalize_output(&mut output);
        (output, metrics)
    }
}

pub(crate) fn normalize_output(output: &mut [f64]) -> GainMetrics {
    let peak = output.iter().fold(0.0_f64, |peak, &s| peak.max(s.abs()));
    normalize_to_peak(output, peak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gain::DETECTOR_PEAK;

    fn assert_approx_eq(a: f64, b: f64, tol: f64, label: &str) {
        assert!(
            (a - b).abs() <= tol,
            "{}: expected {} ≈ {} (tol {})",
            label,
            a,
            b,
            tol
        );
    }

    const ALL: [Demodulator; 4] = [
        Demodulator::Am,
        Demodulator::Fm,
        Demodulator::Usb,
        Demodulator::Lsb,
    ];

    fn test_input(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (i as f64 * 0.37).sin() * (1.0 + 0.5 * (i as f64 * 0.05).cos()))
            .collect()
    }

    #[test]
    fn test_am_scenario() {
        let input = [0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5, 0.0];
        let (out, metrics) = Demodulator::Am.demodulate(&input);
        assert_eq!(out.len(), 8);
        assert!(out.iter().all(|&s| s >= 0.0));
        let peak = out.iter().cloned().fold(0.0, f64::max);
        assert_approx_eq(peak, 0.7, 1e-12, "AM peak");
        assert_approx_eq(metrics.current_gain, 0.7, 1e-12, "AM gain");
    }

    #[test]
    fn test_output_lengths() {
        for len in [0usize, 1, 2, 17, 256] {
            let input = test_input(len);
            for demod in ALL {
                let (out, _) = demod.demodulate(&input);
                let expected = match demod {
                    Demodulator::Fm => len.saturating_sub(1),
                    _ => len,
                };
                assert_eq!(out.len(), expected, "{demod:?} on {len} samples");
            }
        }
    }

    #[test]
    fn test_gain_metrics_consistent() {
        let input = test_input(128);
        for demod in ALL {
            let (out, m) = demod.demodulate(&input);
            assert!(m.current_gain > 0.0, "{demod:?} gain positive");
            assert_approx_eq(
                m.compression_db,
                20.0 * m.current_gain.log10(),
                1e-9,
                &format!("{demod:?} dB"),
            );
            assert_approx_eq(m.gain_reduction, 1.0 / m.current_gain, 1e-12, "reduction");
            let peak = out.iter().fold(0.0_f64, |p, &s| p.max(s.abs()));
            assert_approx_eq(peak, DETECTOR_PEAK, 1e-12, &format!("{demod:?} peak"));
        }
    }

    #[test]
    fn test_silence_keeps_unity_gain() {
        for demod in ALL {
            let (out, m) = demod.demodulate(&[0.0; 16]);
            assert!(out.iter().all(|&s| s == 0.0));
            assert_eq!(m.current_gain, 1.0);
            assert_eq!(m.compression_db, 0.0);
        }
    }

    #[test]
    fn test_fm_short_input_is_empty() {
        let (out, m) = Demodulator::Fm.demodulate(&[0.3]);
        assert!(out.is_empty());
        assert_eq!(m.current_gain, 1.0);
    }

    #[test]
    fn test_for_modulation() {
        assert_eq!(Demodulator::for_modulation(Modulation::Am), Demodulator::Am);
        assert_eq!(Demodulator::for_modulation(Modulation::Fm), Demodulator::Fm);
        assert_eq!(Demodulator::for_modulation(Modulation::Usb), Demodulator::Usb);
        assert_eq!(Demodulator::for_modulation(Modulation::Lsb), Demodulator::Lsb);
    }

    #[test]
    fn test_demodulation_is_pure() {
        let input = test_input(64);
        for demod in ALL {
            assert_eq!(demod.demodulate(&input), demod.demodulate(&input));
        }
    }
}
