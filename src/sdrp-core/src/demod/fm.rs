// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

/// FM slope detector: magnitude of the first difference.
///
/// Output has `len - 1` samples, empty for one sample or fewer.
pub(super) fn demod_fm(samples: &[f64]) -> Vec<f64> {
    samples.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
}
