// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DspError, DspResult};
use crate::gain::GainMetrics;

/// AGC parameters. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgcConfig {
    /// Time constant used while the gain rises toward a quieter signal.
    pub attack_time: f64,
    /// Time constant used while the gain falls on a louder signal.
    pub release_time: f64,
    /// Output magnitude the follower aims for.
    pub target: f64,
    pub min_gain: f64,
    pub max_gain: f64,
}

impl Default for AgcConfig {
    fn default() -> Self {
        Self {
            attack_time: 0.01,
            release_time: 0.1,
            target: 0.5,
            min_gain: 0.1,
            max_gain: 10.0,
        }
    }
}

impl AgcConfig {
    pub fn validate(&self) -> DspResult<()> {
        check_time("attack time", self.attack_time)?;
        check_time("release time", self.release_time)?;
        check_target(self.target)?;
        check_limits(self.min_gain, self.max_gain)
    }
}

fn check_time(name: &str, value: f64) -> DspResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(DspError::InvalidConfig(format!("{name} must be positive, got {value}")))
    }
}

fn check_target(target: f64) -> DspResult<()> {
    if target > 0.0 && target.is_finite() {
        Ok(())
    } else {
        Err(DspError::InvalidConfig(format!("target must be positive, got {target}")))
    }
}

fn check_limits(min_gain: f64, max_gain: f64) -> DspResult<()> {
    if min_gain.is_nan() || min_gain <= 0.0 || !max_gain.is_finite() {
        return Err(DspError::InvalidConfig(format!(
            "gain limits must be positive and finite, got [{min_gain}, {max_gain}]"
        )));
    }
    if min_gain > max_gain {
        return Err(DspError::InvalidConfig(format!(
            "min gain {min_gain} exceeds max gain {max_gain}"
        )));
    }
    Ok(())
}

/// Per-sample envelope follower.
///
/// The gain moves toward `target / |x|` with the attack coefficient when it
/// has to rise and the release coefficient when it has to fall, and is kept
/// within `[min_gain, max_gain]`. Zero-magnitude samples leave the gain
/// unchanged. The gain persists across `process` calls.
#[derive(Debug, Clone)]
pub struct Agc {
    config: AgcConfig,
    gain: f64,
}

impl Agc {
    pub fn new(config: AgcConfig) -> DspResult<Self> {
        config.validate()?;
        Ok(Self { config, gain: 1.0 })
    }

    pub fn config(&self) -> &AgcConfig {
        &self.config
    }

    pub fn process(&mut self, samples: &[f64], sample_rate: f64) -> DspResult<Vec<f64>> {
        if sample_rate.is_nan() || sample_rate <= 0.0 {
            return Err(DspError::InvalidConfig(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }
        let attack = (-1.0 / (sample_rate * self.config.attack_time)).exp();
        let release = (-1.0 / (sample_rate * self.config.release_time)).exp();

        let output = samples
            .iter()
            .map(|&sample| {
                let magnitude = sample.abs();
                if magnitude > 0.0 {
                    let desired = self.config.target / magnitude;
                    let coeff = if desired > self.gain { attack } else { release };
                    self.gain = (coeff * self.gain + (1.0 - coeff) * desired)
                        .clamp(self.config.min_gain, self.config.max_gain);
                }
                sample * self.gain
            })
            .collect();
        Ok(output)
    }

    /// Restore unity gain.
    pub fn reset(&mut self) {
        self.gain = 1.0;
    }

    pub fn current_gain(&self) -> f64 {
        self.gain
    }

    pub fn gain_reduction(&self) -> f64 {
        self.metrics().gain_reduction
    }

    pub fn compression_db(&self) -> f64 {
        self.metrics().compression_db
    }

    pub fn metrics(&self) -> GainMetrics {
        GainMetrics::from_gain(self.gain)
    }

    pub fn set_target(&mut self, target: f64) -> DspResult<()> {
        check_target(target)?;
        self.config.target = target;
        Ok(())
    }

    pub fn set_attack_time(&mut self, attack_time: f64) -> DspResult<()> {
        check_time("attack time", attack_time)?;
        self.config.attack_time = attack_time;
        Ok(())
    }

    pub fn set_release_time(&mut self, release_time: f64) -> DspResult<()> {
        check_time("release time", release_time)?;
        self.config.release_time = release_time;
        Ok(())
    }

    /// Replace the gain window and pull the current gain inside it.
    pub fn set_gain_limits(&mut self, min_gain: f64, max_gain: f64) -> DspResult<()> {
        check_limits(min_gain, max_gain)?;
        self.config.min_gain = min_gain;
        self.config.max_gain = max_gain;
        self.gain = self.gain.clamp(min_gain, max_gain);
        debug!("agc gain limits set to [{}, {}]", min_gain, max_gain);
        Ok(())
    }
}
