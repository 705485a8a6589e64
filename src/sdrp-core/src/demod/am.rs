// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

/// AM envelope detector: full-wave rectification.
pub(super) fn demod_am(samples: &[f64]) -> Vec<f64> {
    samples.iter().map(|s| s.abs()).collect()
}

#[cfg(test)]
mod tests {
    use super::demod_am;

    #[test]
    fn test_am_rectifies() {
        assert_eq!(
            demod_am(&[0.5, -1.0, 0.0, -0.25]),
            vec![0.5, 1.0, 0.0, 0.25]
        );
    }

    #[test]
    fn test_am_envelope_of_modulated_carrier() {
        // Carrier at a quarter of the rate with a slow envelope.
        let input: Vec<f64> = (0..400)
            .map(|n| {
                let env = 1.0 + 0.5 * (n as f64 * 0.01).sin();
                env * (std::f64::consts::FRAC_PI_2 * n as f64 + 0.3).sin()
            })
            .collect();
        let out = demod_am(&input);
        assert_eq!(out.len(), 400);
        assert!(out.iter().all(|&v| (0.0..=1.5).contains(&v)));
    }
}
