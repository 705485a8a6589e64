// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use tracing::debug;

use super::design::ButterworthCoeffs;
use super::{Filter, FilterConfig, FilterKind, FilterStats};
use crate::error::{DspError, DspResult};

#[derive(Debug, Clone)]
struct State {
    config: FilterConfig,
    coeffs: ButterworthCoeffs,
    /// `x[0]` is the newest input.
    x: Vec<f64>,
    /// `y[0]` is the newest output.
    y: Vec<f64>,
}

/// Recursive Butterworth low-pass.
///
/// Input and output histories are as long as the coefficient vectors and
/// persist across `process` calls for streaming continuation.
#[derive(Debug, Clone, Default)]
pub struct ButterworthFilter {
    state: Option<State>,
    stats: FilterStats,
}

impl ButterworthFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coeffs(&self) -> Option<&ButterworthCoeffs> {
        self.state.as_ref().map(|state| &state.coeffs)
    }

    /// Magnitude response of the configured design at each frequency in Hz.
    pub fn frequency_response(&self, frequencies: &[f64]) -> DspResult<Vec<f64>> {
        self.coeffs()
            .ok_or(DspError::Unconfigured)?
            .frequency_response(frequencies)
    }

    pub fn reset(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.x.fill(0.0);
            state.y.fill(0.0);
        }
    }
}

impl Filter for ButterworthFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Butterworth
    }

    fn configure(&mut self, config: &FilterConfig) -> DspResult<()> {
        let (order, cutoff_hz, sample_rate) = config.require_butterworth()?;
        let coeffs = ButterworthCoeffs::design(order, cutoff_hz, sample_rate)?;
        debug!(
            "butterworth configured: order={} cutoff={} Hz rate={} Hz b={:?} a={:?}",
            order, cutoff_hz, sample_rate, coeffs.b, coeffs.a
        );
        self.state = Some(State {
            config: FilterConfig::butterworth(order, cutoff_hz, sample_rate),
            x: vec![0.0; coeffs.b.len()],
            y: vec![0.0; coeffs.a.len()],
            coeffs,
        });
        self.stats = FilterStats::default();
        Ok(())
    }

    fn process(&mut self, samples: &[f64]) -> DspResult<Vec<f64>> {
        let state = self.state.as_mut().ok_or(DspError::Unconfigured)?;
        let State { coeffs, x, y, .. } = state;

        let mut output = Vec::with_capacity(samples.len());
        for &sample in samples {
            x.rotate_right(1);
            x[0] = sample;

            let feed_forward: f64 = coeffs.b.iter().zip(x.iter()).map(|(b, x)| b * x).sum();
            let feedback: f64 = coeffs.a[1..]
                .iter()
                .zip(y.iter())
                .map(|(a, y)| a * y)
                .sum();
            let value = (feed_forward - feedback) / coeffs.a[0];

            y.rotate_right(1);
            y[0] = value;
            output.push(value);
        }

        self.stats = FilterStats::compute(samples, &output);
        Ok(output)
    }

    fn stats(&self) -> FilterStats {
        self.stats.clone()
    }

    fn config(&self) -> Option<&FilterConfig> {
        self.state.as_ref().map(|state| &state.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn configured(order: usize, cutoff: f64, rate: f64) -> ButterworthFilter {
        let mut filter = ButterworthFilter::new();
        filter
            .configure(&FilterConfig::butterworth(order, cutoff, rate))
            .expect("configure");
        filter
    }

    // Test 1: order 4 at 1 kHz / 44.1 kHz configures with unity numerator sum
    #[test]
    fn test_configure_order4_1khz() {
        let filter = configured(4, 1000.0, 44100.0);
        let coeffs = filter.coeffs().expect("coeffs");
        assert_eq!(coeffs.b.len(), 5);
        assert_eq!(coeffs.a.len(), 5);
        assert_approx_eq(coeffs.b.iter().sum(), 1.0, 1e-9, "sum b");
    }

    // Test 2: cutoff above Nyquist fails and leaves the filter unconfigured
    #[test]
    fn test_above_nyquist_rejected() {
        let mut filter = ButterworthFilter::new();
        let err = filter
            .configure(&FilterConfig::butterworth(4, 30000.0, 44100.0))
            .expect_err("nyquist");
        assert!(matches!(err, DspError::InvalidConfig(_)));
        assert!(!filter.is_configured());
        assert_eq!(filter.process(&[1.0]), Err(DspError::Unconfigured));
    }

    #[test]
    fn test_non_finite_and_oversized_parameters_rejected() {
        let mut filter = ButterworthFilter::new();
        for config in [
            FilterConfig::butterworth(2, 1000.0, f64::INFINITY),
            FilterConfig::butterworth(2, 1000.0, f64::NAN),
            FilterConfig::butterworth(2, f64::NAN, 44100.0),
            FilterConfig::butterworth(2, f64::NEG_INFINITY, 44100.0),
            FilterConfig::butterworth(usize::MAX, 1000.0, 44100.0),
        ] {
            assert!(
                matches!(filter.configure(&config), Err(DspError::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
        assert!(!filter.is_configured());
        assert_eq!(filter.process(&[1.0, 0.5]), Err(DspError::Unconfigured));
    }

    // Test 3: failed reconfigure keeps the previous design
    #[test]
    fn test_failed_reconfigure_is_atomic() {
        let mut filter = configured(2, 1000.0, 44100.0);
        let before = filter.coeffs().cloned();
        assert!(matches!(
            filter.configure(&FilterConfig::butterworth(4, 100.0, 44100.0)),
            Err(DspError::UnstableFilter { .. })
        ));
        assert_eq!(filter.coeffs().cloned(), before);
        assert_eq!(filter.config().and_then(|c| c.order), Some(2));
    }

    // Test 4: streaming in chunks matches a single block
    #[test]
    fn test_history_persists_across_calls() {
        let input: Vec<f64> = (0..200)
            .map(|i| (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 44100.0).sin())
            .collect();
        let mut whole = configured(3, 2000.0, 44100.0);
        let mut split = configured(3, 2000.0, 44100.0);
        let expected = whole.process(&input).expect("whole");
        let mut got = split.process(&input[..77]).expect("first");
        got.extend(split.process(&input[77..]).expect("second"));
        for (idx, (&g, &e)) in got.iter().zip(expected.iter()).enumerate() {
            assert_approx_eq(g, e, 1e-12, &format!("sample {idx}"));
        }
    }

    // Test 5: output stays bounded on a bounded input
    #[test]
    fn test_output_is_finite() {
        let mut filter = configured(4, 1000.0, 44100.0);
        let input: Vec<f64> = (0..4410)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let out = filter.process(&input).expect("process");
        assert_eq!(out.len(), input.len());
        assert!(out.iter().all(|v| v.is_finite()));
        let stats = filter.stats();
        assert_eq!(stats.input_samples, 4410);
        assert!(stats.median_shift.is_none());
    }

    #[test]
    fn test_reset_and_frequency_response() {
        let mut filter = ButterworthFilter::new();
        assert_eq!(
            filter.frequency_response(&[100.0]),
            Err(DspError::Unconfigured)
        );
        let mut filter2 = configured(2, 1000.0, 44100.0);
        let first = filter2.process(&[1.0, 0.5]).expect("first");
        filter2.reset();
        let again = filter2.process(&[1.0, 0.5]).expect("again");
        assert_eq!(first, again);
        assert_eq!(filter2.frequency_response(&[0.0, 1000.0]).expect("resp").len(), 2);
        filter.reset();
    }
}
