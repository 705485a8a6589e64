// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

/// USB detector: `|x[i] + x[i-1]|` with `x[-1] = 0`.
pub(super) fn demod_usb(samples: &[f64]) -> Vec<f64> {
    let mut prev = 0.0;
    samples
        .iter()
        .map(|&s| {
            let value = (s + prev).abs();
            prev = s;
            value
        })
        .collect()
}

/// LSB detector: `|x[i] - x[i+1]|` with `x[n] = 0`.
pub(super) fn demod_lsb(samples: &[f64]) -> Vec<f64> {
    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let next = samples.get(i + 1).copied().unwrap_or(0.0);
            (s - next).abs()
        })
        .collect()
}
