// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Pure coefficient synthesis: windowed-sinc FIR and bilinear Butterworth.

use std::f64::consts::PI;

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::error::{DspError, DspResult};

/// Largest digital pole magnitude accepted from the Butterworth design.
pub const MAX_POLE_RADIUS: f64 = 0.99;
/// Below this the numerator sum cannot be normalized.
const MIN_GAIN_SUM: f64 = 1e-10;
/// Second band edge of band-pass/band-stop designs, relative to the cutoff.
const BAND_EDGE_RATIO: f64 = 1.5;
/// Longest FIR kernel `design_fir` will synthesize.
pub const MAX_FIR_TAPS: usize = 1 << 20;
/// Highest Butterworth order accepted. Orders this high already put the
/// first pole past `MAX_POLE_RADIUS` for any cutoff.
pub const MAX_BUTTERWORTH_ORDER: usize = 32;

/// Rejects zero, negative, NaN and infinite values.
pub(crate) fn check_positive(value: f64, what: &str) -> DspResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DspError::InvalidConfig(format!(
            "{what} must be positive and finite, got {value}"
        )))
    }
}

/// FIR response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirKind {
    LowPass,
    HighPass,
    BandPass,
    BandStop,
}

/// Tapering window applied to the ideal impulse response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    Rectangular,
    Hamming,
    Hanning,
    Blackman,
}

impl Window {
    /// Weight of tap `i` in an `num_taps`-long window.
    pub fn weight(self, i: usize, num_taps: usize) -> f64 {
        if num_taps <= 1 {
            return 1.0;
        }
        let x = i as f64 / (num_taps - 1) as f64;
        match self {
            Window::Rectangular => 1.0,
            Window::Hamming => 0.54 - 0.46 * (2.0 * PI * x).cos(),
            Window::Hanning => 0.5 * (1.0 - (2.0 * PI * x).cos()),
            Window::Blackman => {
                0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
            }
        }
    }
}

fn sinc_tap(fc: f64, n: f64) -> f64 {
    if n == 0.0 {
        2.0 * fc
    } else {
        (2.0 * PI * fc * n).sin() / (PI * n)
    }
}

/// Windowed-sinc FIR design.
///
/// `cutoff_hz` may equal `sample_rate / 2` (an all-pass low-pass) but not
/// exceed it. Band-pass and band-stop use a second edge at `1.5 * cutoff_hz`
/// and replace the windowed low-pass taps with the plain two-edge response.
pub fn design_fir(
    kind: FirKind,
    cutoff_hz: f64,
    sample_rate: f64,
    num_taps: usize,
    window: Window,
) -> DspResult<Vec<f64>> {
    if num_taps == 0 {
        return Err(DspError::invalid("FIR filter must have at least 1 tap"));
    }
    if num_taps > MAX_FIR_TAPS {
        return Err(DspError::InvalidConfig(format!(
            "FIR filter length {num_taps} exceeds {MAX_FIR_TAPS} taps"
        )));
    }
    check_positive(sample_rate, "sample rate")?;
    check_positive(cutoff_hz, "cutoff frequency")?;
    if cutoff_hz > sample_rate / 2.0 {
        return Err(DspError::InvalidConfig(format!(
            "cutoff frequency ({cutoff_hz} Hz) exceeds Nyquist frequency ({} Hz)",
            sample_rate / 2.0
        )));
    }

    let fc = cutoff_hz / sample_rate;
    let center = (num_taps - 1) as f64 / 2.0;

    let mut coeffs: Vec<f64> = (0..num_taps)
        .map(|i| sinc_tap(fc, i as f64 - center) * window.weight(i, num_taps))
        .collect();

    let fc2 = cutoff_hz * BAND_EDGE_RATIO / sample_rate;
    match kind {
        FirKind::LowPass => {}
        FirKind::HighPass => {
            for coeff in coeffs.iter_mut() {
                *coeff = -*coeff;
            }
            // Even lengths have no true centre tap; use the lower neighbour.
            coeffs[center as usize] += 1.0;
        }
        FirKind::BandPass => {
            for (i, coeff) in coeffs.iter_mut().enumerate() {
                let n = i as f64 - center;
                *coeff = if n == 0.0 {
                    2.0 * (fc2 - fc)
                } else {
                    ((2.0 * PI * fc2 * n).sin() - (2.0 * PI * fc * n).sin()) / (PI * n)
                };
            }
        }
        FirKind::BandStop => {
            for (i, coeff) in coeffs.iter_mut().enumerate() {
                let n = i as f64 - center;
                *coeff = if n == 0.0 {
                    1.0 - 2.0 * (fc2 - fc)
                } else {
                    ((2.0 * PI * fc * n).sin() - (2.0 * PI * fc2 * n).sin()) / (PI * n)
                };
            }
        }
    }

    Ok(coeffs)
}

/// Returns the `10 * factor + 1` tap count of the rate-change kernel.
fn rate_change_taps(factor: usize, sample_rate: f64) -> DspResult<usize> {
    if factor == 0 {
        return Err(DspError::invalid("rate change factor must be positive"));
    }
    check_positive(sample_rate, "sample rate")?;
    factor
        .checked_mul(10)
        .and_then(|taps| taps.checked_add(1))
        .ok_or_else(|| DspError::InvalidConfig(format!("rate change factor {factor} is too large")))
}

/// Anti-alias low-pass for decimating by `factor`.
pub fn decimation_filter(factor: usize, sample_rate: f64) -> DspResult<Vec<f64>> {
    let num_taps = rate_change_taps(factor, sample_rate)?;
    design_fir(
        FirKind::LowPass,
        sample_rate / (2.0 * factor as f64),
        sample_rate,
        num_taps,
        Window::Hamming,
    )
}

/// Image-rejection low-pass for interpolating by `factor`, scaled by `factor`
/// to restore the amplitude lost to zero-stuffing.
pub fn interpolation_filter(factor: usize, sample_rate: f64) -> DspResult<Vec<f64>> {
    let mut coeffs = decimation_filter(factor, sample_rate)?;
    let scale = factor as f64;
    for coeff in coeffs.iter_mut() {
        *coeff *= scale;
    }
    Ok(coeffs)
}

/// Keep every `factor`-th sample.
pub fn decimate(samples: &[f64], factor: usize) -> DspResult<Vec<f64>> {
    if factor == 0 {
        return Err(DspError::invalid("decimation factor must be positive"));
    }
    Ok(samples
        .iter()
        .step_by(factor)
        .take(samples.len() / factor)
        .copied()
        .collect())
}

/// Insert `factor - 1` zeros after every sample.
pub fn interpolate(samples: &[f64], factor: usize) -> DspResult<Vec<f64>> {
    if factor == 0 {
        return Err(DspError::invalid("interpolation factor must be positive"));
    }
    let len = samples.len().checked_mul(factor).ok_or_else(|| {
        DspError::InvalidConfig(format!(
            "interpolating {} samples by {factor} overflows",
            samples.len()
        ))
    })?;
    let mut out = vec![0.0; len];
    for (i, &sample) in samples.iter().enumerate() {
        out[i * factor] = sample;
    }
    Ok(out)
}

/// Recursive (`a`) and feed-forward (`b`) Butterworth coefficients, both
/// `order + 1` long with `a[0] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ButterworthCoeffs {
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub sample_rate: f64,
}

impl ButterworthCoeffs {
    /// Bilinear-transform design of an `order`-pole low-pass.
    ///
    /// Each digital pole contributes a real first-order factor to both
    /// polynomials; `b` is then scaled so its taps sum to one.
    pub fn design(order: usize, cutoff_hz: f64, sample_rate: f64) -> DspResult<Self> {
        if order == 0 {
            return Err(DspError::invalid("filter order must be positive"));
        }
        if order > MAX_BUTTERWORTH_ORDER {
            return Err(DspError::InvalidConfig(format!(
                "filter order {order} exceeds maximum {MAX_BUTTERWORTH_ORDER}"
            )));
        }
        check_positive(cutoff_hz, "cutoff frequency")?;
        check_positive(sample_rate, "sample rate")?;
        let nyquist = sample_rate / 2.0;
        if cutoff_hz >= nyquist {
            return Err(DspError::InvalidConfig(format!(
                "cutoff frequency ({cutoff_hz} Hz) must be below Nyquist frequency ({nyquist} Hz)"
            )));
        }

        let warped = 2.0 * sample_rate * (PI * cutoff_hz / sample_rate).tan();
        let two_fs = Complex::new(2.0 * sample_rate, 0.0);
        let one = Complex::new(1.0, 0.0);

        let mut a = vec![0.0; order + 1];
        let mut b = vec![0.0; order + 1];
        a[0] = 1.0;
        b[0] = 1.0;

        for k in 0..order {
            let theta = PI * (2 * k + 1) as f64 / (2 * order) as f64;
            let pole = Complex::new(-theta.sin(), theta.cos()) * warped;
            let z = (one + pole / two_fs) / (one - pole / two_fs);

            let magnitude = z.norm();
            if magnitude.is_nan() || magnitude > MAX_POLE_RADIUS {
                return Err(DspError::UnstableFilter {
                    magnitude,
                    limit: MAX_POLE_RADIUS,
                });
            }

            for i in (1..=order).rev() {
                a[i] += z.re * a[i - 1];
                b[i] += z.re * b[i - 1];
            }
        }

        let gain: f64 = b.iter().sum();
        if gain.is_nan() || gain.abs() < MIN_GAIN_SUM {
            return Err(DspError::DegenerateNormalization(gain));
        }
        for coeff in b.iter_mut() {
            *coeff /= gain;
        }

        Ok(Self { a, b, sample_rate })
    }

    pub fn order(&self) -> usize {
        self.a.len().saturating_sub(1)
    }

    /// Magnitude of `B(z) / A(z)` on the unit circle at each frequency in Hz.
    ///
    /// Both polynomials are evaluated in ascending powers of `z`.
    pub fn frequency_response(&self, frequencies: &[f64]) -> DspResult<Vec<f64>> {
        frequencies
            .iter()
            .map(|&freq| {
                let omega = 2.0 * PI * freq / self.sample_rate;
                let z = Complex::from_polar(1.0, omega);
                let mut num = Complex::new(self.b[0], 0.0);
                let mut den = Complex::new(self.a[0], 0.0);
                let mut z_pow = Complex::new(1.0, 0.0);
                for n in 1..self.b.len() {
                    z_pow *= z;
                    num += z_pow * self.b[n];
                    den += z_pow * self.a[n];
                }
                if den.norm().is_nan() || den.norm() < MIN_GAIN_SUM {
                    return Err(DspError::DegenerateNormalization(den.norm()));
                }
                Ok((num / den).norm())
            })
            .collect()
    }
}
