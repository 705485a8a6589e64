// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Summary statistics over a sample block.

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample standard deviation (divisor `n - 1`); `0.0` below two samples.
pub fn std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let mean = mean(data);
    let sum_squares: f64 = data
        .iter()
        .map(|&value| {
            let diff = value - mean;
            diff * diff
        })
        .sum();
    (sum_squares / (data.len() - 1) as f64).sqrt()
}

/// Median without touching the input; `0.0` for an empty slice.
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    middle_of_sorted(&sorted)
}

/// Middle element of an already sorted, non-empty slice (mean of the middle
/// pair for even lengths).
pub(crate) fn middle_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// `1 - out_std / in_std`, or `0.0` when the input has no spread.
pub fn noise_reduction(input_std_dev: f64, output_std_dev: f64) -> f64 {
    if input_std_dev == 0.0 {
        return 0.0;
    }
    1.0 - output_std_dev / input_std_dev
}
