// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Sample-domain signal processing core: filter design and execution,
//! AM/FM/SSB detection, modulation and automatic gain control.
//!
//! Every engine works on plain `f64` sample slices paired with a sample rate.
//! Nothing in this crate performs I/O.

pub mod agc;
pub mod demod;
pub mod error;
pub mod filter;
pub mod gain;
pub mod modulate;
pub mod pipeline;
pub mod signal;
pub mod stats;

pub use agc::{Agc, AgcConfig};
pub use demod::{CoherentSsbDetector, Demodulator};
pub use error::{DspError, DspResult};
pub use filter::{
    Filter, FilterConfig, FilterFactory, FilterKind, FilterStats, FirFilter,
};
pub use gain::GainMetrics;
pub use modulate::{Modulation, Sideband};
pub use pipeline::{Pipeline, PipelineOutput};
pub use signal::Signal;
