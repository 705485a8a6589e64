// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Simplified test-signal modulators.
//!
//! These combine a carrier and a message sample-for-sample and are not
//! physical models: FM reuses the carrier as an envelope and SSB mixes with
//! the sample index as phase. The matching detectors in [`crate::demod`]
//! expect exactly this arithmetic. Physical AM/FM/SSB synthesis lives on
//! [`Signal`](crate::signal::Signal).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::demod::Demodulator;
use crate::error::DspError;

/// Modulation scheme shared by the generator and the detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modulation {
    Am,
    Fm,
    Usb,
    Lsb,
}

impl Modulation {
    pub const ALL: [Modulation; 4] = [
        Modulation::Am,
        Modulation::Fm,
        Modulation::Usb,
        Modulation::Lsb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Modulation::Am => "am",
            Modulation::Fm => "fm",
            Modulation::Usb => "usb",
            Modulation::Lsb => "lsb",
        }
    }

    pub fn demodulator(self) -> Demodulator {
        Demodulator::for_modulation(self)
    }

    /// Combine `carrier` and `message`; output length is the shorter of the two.
    pub fn modulate(self, carrier: &[f64], message: &[f64]) -> Vec<f64> {
        match self {
            Modulation::Am => am_modulate(carrier, message),
            Modulation::Fm => fm_modulate(carrier, message),
            Modulation::Usb => usb_modulate(carrier, message),
            Modulation::Lsb => lsb_modulate(carrier, message),
        }
    }
}

impl fmt::Display for Modulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modulation {
    type Err = DspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "am" => Ok(Modulation::Am),
            "fm" => Ok(Modulation::Fm),
            "usb" => Ok(Modulation::Usb),
            "lsb" => Ok(Modulation::Lsb),
            _ => Err(DspError::InvalidConfig(format!(
                "unknown modulation '{s}' (expected am, fm, usb or lsb)"
            ))),
        }
    }
}

/// Which sideband a single-sideband signal carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sideband {
    Upper,
    Lower,
}

/// `carrier * (1 + message)`.
pub fn am_modulate(carrier: &[f64], message: &[f64]) -> Vec<f64> {
    carrier
        .iter()
        .zip(message)
        .map(|(&c, &m)| c * (1.0 + m))
        .collect()
}

/// Running phase accumulates raw message values; output `carrier * sin(phase)`.
pub fn fm_modulate(carrier: &[f64], message: &[f64]) -> Vec<f64> {
    let mut phase = 0.0;
    carrier
        .iter()
        .zip(message)
        .map(|(&c, &m)| {
            phase += m;
            c * phase.sin()
        })
        .collect()
}

/// `carrier * message * cos(i)` with `i` the sample index.
pub fn usb_modulate(carrier: &[f64], message: &[f64]) -> Vec<f64> {
    carrier
        .iter()
        .zip(message)
        .enumerate()
        .map(|(i, (&c, &m))| c * m * (i as f64).cos())
        .collect()
}

/// `carrier * message * sin(i)` with `i` the sample index.
pub fn lsb_modulate(carrier: &[f64], message: &[f64]) -> Vec<f64> {
    carrier
        .iter()
        .zip(message)
        .enumerate()
        .map(|(i, (&c, &m))| c * m * (i as f64).sin())
        .collect()
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

    #[test]
    fn test_parse_and_display() {
        for modulation in Modulation::ALL {
            assert_eq!(modulation.to_string().parse::<Modulation>(), Ok(modulation));
        }
        assert_eq!(" USB ".parse::<Modulation>(), Ok(Modulation::Usb));
        assert!(matches!(
            "ssb".parse::<Modulation>(),
            Err(DspError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_am_modulate() {
        let out = am_modulate(&[1.0, 0.5, -1.0], &[0.0, 1.0, -0.5]);
        assert_eq!(out, vec![1.0, 1.0, -0.5]);
    }

    #[test]
    fn test_fm_modulate_accumulates_phase() {
        let carrier = [1.0, 1.0, 2.0];
        let message = [0.5, 0.5, 0.5];
        let out = fm_modulate(&carrier, &message);
        assert_approx_eq(out[0], 0.5_f64.sin(), 1e-15, "sample 0");
        assert_approx_eq(out[1], 1.0_f64.sin(), 1e-15, "sample 1");
        assert_approx_eq(out[2], 2.0 * 1.5_f64.sin(), 1e-15, "sample 2");
    }

    #[test]
    fn test_ssb_modulate_uses_index_phase() {
        let carrier = [1.0; 4];
        let message = [2.0; 4];
        let usb = usb_modulate(&carrier, &message);
        let lsb = lsb_modulate(&carrier, &message);
        for i in 0..4 {
            assert_approx_eq(usb[i], 2.0 * (i as f64).cos(), 1e-15, &format!("usb {i}"));
            assert_approx_eq(lsb[i], 2.0 * (i as f64).sin(), 1e-15, &format!("lsb {i}"));
        }
    }

    #[test]
    fn test_modulate_uses_shorter_length() {
        for modulation in Modulation::ALL {
            assert_eq!(modulation.modulate(&[1.0; 5], &[0.1; 3]).len(), 3);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Modulation::Lsb).expect("serialize");
        assert_eq!(json, "\"lsb\"");
        assert_eq!(Modulation::Fm.demodulator(), Demodulator::Fm);
    }
}
