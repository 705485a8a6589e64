// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Plumbing shared by the `sdrparser` front end: TOML configuration,
//! logging setup and WAV sample I/O.

pub mod config;
pub mod logging;
pub mod wav;

pub use config::{ConfigError, ConfigFile};
pub use logging::init_logging;
pub use wav::{read_wav, write_wav, WavError};
