// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Mono WAV source and sink.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use thiserror::Error;
use tracing::debug;

/// Full-scale value used when writing 16-bit PCM.
const PCM16_FULL_SCALE: f64 = 32767.0;

#[derive(Debug, Error)]
pub enum WavError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("unsupported WAV format: {0}")]
    Unsupported(String),
}

/// Read a mono WAV file into samples nominally in `[-1, 1]`.
///
/// Integer PCM of any depth up to 32 bits is divided by its positive full
/// scale (`32767` for 16-bit); 32-bit float is taken as is.
pub fn read_wav(path: &Path) -> Result<(Vec<f64>, u32), WavError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(WavError::Unsupported(format!(
            "{} channels (only mono is supported)",
            spec.channels
        )));
    }

    let samples = match spec.sample_format {
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(WavError::Unsupported(format!(
                    "{}-bit integer PCM",
                    spec.bits_per_sample
                )));
            }
            let full_scale = ((1_i64 << (spec.bits_per_sample - 1)) - 1).max(1) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / full_scale))
                .collect::<Result<Vec<_>, _>>()?
        }
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(WavError::Unsupported(format!(
                    "{}-bit float",
                    spec.bits_per_sample
                )));
            }
            reader
                .samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    debug!(
        "read {} samples at {} Hz from {}",
        samples.len(),
        spec.sample_rate,
        path.display()
    );
    Ok((samples, spec.sample_rate))
}

/// Write samples as mono 16-bit PCM, clamping to `[-1, 1]`.
pub fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) -> Result<(), WavError> {
    if sample_rate == 0 {
        return Err(WavError::Unsupported("sample rate 0".to_string()));
    }
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample((sample.clamp(-1.0, 1.0) * PCM16_FULL_SCALE) as i16)?;
    }
    writer.finalize()?;
    debug!(
        "wrote {} samples at {} Hz to {}",
        samples.len(),
        sample_rate,
        path.display()
    );
    Ok(())
}
