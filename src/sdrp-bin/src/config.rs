// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Configuration file support for sdrparser.
//!
//! Config is loaded from the `[sdrparser]` section of `sdrparser.toml`.
//! Default search order:
//! 1. Path specified via `--config` CLI argument
//! 2. `./sdrparser.toml`
//! 3. `~/.config/sdrparser/sdrparser.toml`
//! 4. `/etc/sdrparser/sdrparser.toml`
//!
//! Command-line flags always override values from the file.

use serde::{Deserialize, Serialize};
use sdrp_app::ConfigFile;
use sdrp_core::{AgcConfig, FilterConfig, FilterKind, Modulation};

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Defaults for the `generate` command
    pub generate: GenerateConfig,
    /// Defaults for the `filter` command
    pub filter: FilterConfig,
    /// Gain control applied by `demod --agc`
    pub agc: AgcConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

/// Test signal generation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Output sample rate (Hz)
    pub sample_rate: u32,
    /// Carrier frequency (Hz)
    pub freq_hz: f64,
    /// Signal length (seconds)
    pub duration_s: f64,
    /// Modulation scheme
    pub modulation: Modulation,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            freq_hz: 440.0,
            duration_s: 5.0,
            modulation: Modulation::Am,
        }
    }
}

impl AppConfig {
    /// Validate the configuration and return an error string on failure.
    pub fn validate(&self) -> Result<(), String> {
        validate_log_level(self.general.log_level.as_deref())?;

        if self.generate.sample_rate == 0 {
            return Err("[generate].sample_rate must be > 0".to_string());
        }
        if self.generate.freq_hz <= 0.0 {
            return Err("[generate].freq_hz must be > 0".to_string());
        }
        if self.generate.duration_s <= 0.0 {
            return Err("[generate].duration_s must be > 0".to_string());
        }

        if self.filter.window_size == Some(0) {
            return Err("[filter].window_size must be > 0".to_string());
        }
        if self.filter.order == Some(0) {
            return Err("[filter].order must be > 0".to_string());
        }
        if matches!(self.filter.cutoff_hz, Some(c) if c <= 0.0) {
            return Err("[filter].cutoff_hz must be > 0".to_string());
        }
        if matches!(self.filter.sample_rate, Some(r) if r <= 0.0) {
            return Err("[filter].sample_rate must be > 0".to_string());
        }

        self.agc.validate().map_err(|e| format!("[agc]: {e}"))?;
        Ok(())
    }

    /// Example `sdrparser.toml` content.
    pub fn example_toml() -> String {
        #[derive(Serialize)]
        struct Wrapper {
            sdrparser: AppConfig,
        }
        let example = AppConfig {
            general: GeneralConfig {
                log_level: Some("info".to_string()),
            },
            generate: GenerateConfig::default(),
            filter: FilterConfig {
                kind: FilterKind::Butterworth,
                window_size: Some(5),
                cutoff_hz: Some(1000.0),
                order: Some(4),
                sample_rate: None,
            },
            agc: AgcConfig::default(),
        };
        toml::to_string_pretty(&Wrapper { sdrparser: example }).unwrap_or_default()
    }
}

fn validate_log_level(level: Option<&str>) -> Result<(), String> {
    if let Some(level) = level {
        match level.trim().to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "[general].log_level '{}' is invalid (expected one of: trace, debug, info, warn, error)",
                    level
                ))
            }
        }
    }
    Ok(())
}

impl ConfigFile for AppConfig {
    fn section_key() -> &'static str {
        "sdrparser"
    }
}
