// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

mod config;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{error, info};

use sdrp_app::{init_logging, read_wav, write_wav, ConfigFile};
use sdrp_core::{
    Agc, FilterConfig, FilterFactory, FilterKind, FilterStats, GainMetrics, Modulation, Pipeline,
    Signal,
};

use config::AppConfig;

pub type DynResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

const PKG_DESCRIPTION: &str = concat!(env!("CARGO_PKG_NAME"), " - ", env!("CARGO_PKG_DESCRIPTION"));
const DEFAULT_WINDOW_SIZE: usize = 5;
const DEFAULT_CUTOFF_HZ: f64 = 1000.0;
const DEFAULT_ORDER: usize = 4;

#[derive(Debug, Parser)]
#[command(
    name = "sdrparser",
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = PKG_DESCRIPTION,
)]
struct Cli {
    /// Path to configuration file
    #[arg(long = "config", short = 'C', value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Print example configuration and exit
    #[arg(long = "print-config", global = true)]
    print_config: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a modulated test signal
    Generate(GenerateArgs),
    /// Demodulate a signal
    Demod(DemodArgs),
    /// Apply a noise-reduction filter
    Filter(FilterArgs),
}

#[derive(Debug, clap::Args)]
struct GenerateArgs {
    /// Output WAV file
    #[arg(short = 'o', long = "output", default_value = "signal.wav")]
    output: PathBuf,
    /// Carrier frequency in Hz
    #[arg(short = 'f', long = "freq")]
    freq: Option<f64>,
    /// Duration in seconds
    #[arg(short = 'd', long = "duration")]
    duration: Option<f64>,
    /// Modulation type (am, fm, usb, lsb)
    #[arg(short = 'm', long = "mod")]
    modulation: Option<Modulation>,
}

#[derive(Debug, clap::Args)]
struct DemodArgs {
    /// Input WAV file
    #[arg(short = 'i', long = "input")]
    input: PathBuf,
    /// Output WAV file
    #[arg(short = 'o', long = "output", default_value = "audio.wav")]
    output: PathBuf,
    /// Demodulation type (am, fm, usb, lsb)
    #[arg(short = 't', long = "type", default_value = "am")]
    kind: Modulation,
    /// Run automatic gain control after detection
    #[arg(long = "agc")]
    agc: bool,
}

#[derive(Debug, clap::Args)]
struct FilterArgs {
    /// Input WAV file
    #[arg(short = 'i', long = "input")]
    input: PathBuf,
    /// Output WAV file (defaults to <input>_<type>.wav)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
    /// Filter type (moving_average, median, butterworth)
    #[arg(short = 't', long = "type")]
    kind: Option<FilterKind>,
    /// Window size for moving average/median
    #[arg(short = 'w', long = "window")]
    window: Option<usize>,
    /// Cutoff frequency for Butterworth (Hz)
    #[arg(short = 'c', long = "cutoff")]
    cutoff: Option<f64>,
    /// Order for Butterworth
    #[arg(short = 'n', long = "order")]
    order: Option<usize>,
    /// Sample rate in Hz (defaults to the input file's rate)
    #[arg(short = 'r', long = "rate")]
    rate: Option<f64>,
    /// Input amplitude scaling factor
    #[arg(short = 'a', long = "amplitude", default_value_t = 1.0)]
    amplitude: f64,
    /// Normalize the output to unit peak
    #[arg(short = 'N', long = "normalize")]
    normalize: bool,
    /// Print filter statistics as JSON
    #[arg(long = "json")]
    json: bool,
}

/// Merge CLI flags over the `[filter]` section; the input file's rate is
/// the last resort for the sample rate.
fn resolve_filter_config(args: &FilterArgs, cfg: &FilterConfig, file_rate: f64) -> FilterConfig {
    FilterConfig {
        kind: args.kind.unwrap_or(cfg.kind),
        window_size: args
            .window
            .or(cfg.window_size)
            .or(Some(DEFAULT_WINDOW_SIZE)),
        cutoff_hz: args.cutoff.or(cfg.cutoff_hz).or(Some(DEFAULT_CUTOFF_HZ)),
        order: args.order.or(cfg.order).or(Some(DEFAULT_ORDER)),
        sample_rate: args.rate.or(cfg.sample_rate).or(Some(file_rate)),
    }
}

fn default_output_path(input: &Path, kind: FilterKind) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_{kind}.wav"))
}

fn wav_rate(rate: f64) -> DynResult<u32> {
    if !(1.0..=u32::MAX as f64).contains(&rate) {
        return Err(format!("Sample rate {rate} cannot be written to WAV").into());
    }
    Ok(rate.round() as u32)
}

fn log_gain(stage: &str, metrics: &GainMetrics) {
    info!(
        "{}: gain {:.4}, compression {:.2} dB, gain reduction {:.4}",
        stage, metrics.current_gain, metrics.compression_db, metrics.gain_reduction
    );
}

fn run_generate(args: &GenerateArgs, cfg: &AppConfig) -> DynResult<()> {
    let freq = args.freq.unwrap_or(cfg.generate.freq_hz);
    let duration = args.duration.unwrap_or(cfg.generate.duration_s);
    let modulation = args.modulation.unwrap_or(cfg.generate.modulation);
    let rate = cfg.generate.sample_rate;
    if freq <= 0.0 || duration <= 0.0 {
        return Err("Frequency and duration must be > 0".into());
    }

    let signal = Signal::test_signal(modulation, freq, duration, f64::from(rate));
    write_wav(&args.output, &signal.samples, rate)?;
    info!(
        "Generated {} signal: {} Hz, {:.2} s, {} samples -> {}",
        modulation,
        freq,
        signal.duration(),
        signal.len(),
        args.output.display()
    );
    Ok(())
}

fn run_demod(args: &DemodArgs, cfg: &AppConfig) -> DynResult<()> {
    let (samples, rate) = read_wav(&args.input)
        .map_err(|e| format!("Failed to read {}: {}", args.input.display(), e))?;

    let mut pipeline = Pipeline::new().with_demodulator(args.kind.demodulator());
    if args.agc {
        pipeline = pipeline.with_agc(Agc::new(cfg.agc.clone())?);
    }
    let output = pipeline.run(&Signal::new(samples, f64::from(rate)))?;

    if let Some(metrics) = output.demod_metrics.as_ref() {
        log_gain(args.kind.as_str(), metrics);
    }
    if let Some(metrics) = output.agc_metrics.as_ref() {
        log_gain("agc", metrics);
    }

    write_wav(&args.output, &output.signal.samples, rate)?;
    info!(
        "Demodulated {} -> {} ({} samples)",
        args.input.display(),
        args.output.display(),
        output.signal.len()
    );
    Ok(())
}

fn run_filter(args: &FilterArgs, cfg: &AppConfig) -> DynResult<FilterStats> {
    let (samples, file_rate) = read_wav(&args.input)
        .map_err(|e| format!("Failed to read {}: {}", args.input.display(), e))?;

    let filter_config = resolve_filter_config(args, &cfg.filter, f64::from(file_rate));
    let kind = filter_config.kind;
    let rate = filter_config.sample_rate.unwrap_or(f64::from(file_rate));
    let filter = FilterFactory::new()
        .create(kind, &filter_config)
        .map_err(|e| format!("Failed to configure {} filter: {}", kind, e))?;

    let input = Signal::new(samples, rate).scale(args.amplitude);
    let output = Pipeline::new().with_filter(filter).run(&input)?;
    let stats = output.filter_stats.unwrap_or_default();
    let signal = if args.normalize {
        output.signal.normalize()
    } else {
        output.signal
    };

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, kind));
    write_wav(&output_path, &signal.samples, wav_rate(rate)?)?;

    info!(
        "Filtered {} -> {} using {} filter (noise reduction {:.3})",
        args.input.display(),
        output_path.display(),
        kind,
        stats.noise_reduction
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    Ok(stats)
}

fn main() -> DynResult<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", AppConfig::example_toml());
        return Ok(());
    }

    let (cfg, config_path) = if let Some(ref path) = cli.config {
        let cfg = AppConfig::load_from_file(path)?;
        (cfg, Some(path.clone()))
    } else {
        AppConfig::load_from_default_paths()?
    };
    cfg.validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    init_logging(cfg.general.log_level.as_deref());

    if let Some(ref path) = config_path {
        info!("Loaded configuration from {}", path.display());
    }

    let result = match cli.command {
        Some(Command::Generate(ref args)) => run_generate(args, &cfg),
        Some(Command::Demod(ref args)) => run_demod(args, &cfg),
        Some(Command::Filter(ref args)) => run_filter(args, &cfg).map(|_| ()),
        None => Err("No command given (expected generate, demod or filter; see --help)".into()),
    };
    if let Err(ref e) = result {
        error!("{}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse")
    }

    fn filter_args(cli: Cli) -> FilterArgs {
        match cli.command {
            Some(Command::Filter(args)) => args,
            other => panic!("expected filter command, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_defaults() {
        match parse(&["sdrparser", "generate"]).command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.output, PathBuf::from("signal.wav"));
                assert!(args.freq.is_none());
                assert!(args.modulation.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_types() {
        match parse(&["sdrparser", "demod", "-i", "in.wav", "-t", "lsb", "--agc"]).command {
            Some(Command::Demod(args)) => {
                assert_eq!(args.kind, Modulation::Lsb);
                assert!(args.agc);
                assert_eq!(args.output, PathBuf::from("audio.wav"));
            }
            other => panic!("unexpected {other:?}"),
        }
        let args = filter_args(parse(&[
            "sdrparser", "filter", "-i", "in.wav", "-t", "Moving-Average", "-w", "9", "-N",
        ]));
        assert_eq!(args.kind, Some(FilterKind::MovingAverage));
        assert_eq!(args.window, Some(9));
        assert!(args.normalize);
        assert!(Cli::try_parse_from(["sdrparser", "demod", "-i", "x.wav", "-t", "dsb"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["sdrparser", "generate", "-C", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(parse(&["sdrparser", "--print-config"]).print_config);
    }

    #[test]
    fn test_resolve_filter_config_precedence() {
        let args = filter_args(parse(&[
            "sdrparser", "filter", "-i", "in.wav", "-t", "butterworth", "-c", "2000",
        ]));
        let file_cfg = FilterConfig {
            order: Some(2),
            ..FilterConfig::default()
        };
        let resolved = resolve_filter_config(&args, &file_cfg, 44100.0);
        assert_eq!(resolved.kind, FilterKind::Butterworth);
        assert_eq!(resolved.cutoff_hz, Some(2000.0));
        assert_eq!(resolved.order, Some(2));
        assert_eq!(resolved.window_size, Some(DEFAULT_WINDOW_SIZE));
        assert_eq!(resolved.sample_rate, Some(44100.0));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/tmp/rx/capture.wav"), FilterKind::Median),
            PathBuf::from("/tmp/rx/capture_median.wav")
        );
        assert_eq!(
            default_output_path(Path::new("signal.wav"), FilterKind::MovingAverage),
            PathBuf::from("signal_moving_average.wav")
        );
    }

    #[test]
    fn test_wav_rate() {
        assert_eq!(wav_rate(44100.0).expect("rate"), 44100);
        assert!(wav_rate(0.0).is_err());
        assert!(wav_rate(f64::NAN).is_err());
    }

    #[test]
    fn test_generate_filter_demod_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let signal_path = dir.path().join("signal.wav");
        let cfg = AppConfig::default();

        let generate = GenerateArgs {
            output: signal_path.clone(),
            freq: Some(1000.0),
            duration: Some(0.1),
            modulation: Some(Modulation::Am),
        };
        run_generate(&generate, &cfg).expect("generate");
        let (samples, rate) = read_wav(&signal_path).expect("read generated");
        assert_eq!(rate, 44_100);
        assert_eq!(samples.len(), 4410);

        let filter = filter_args(parse(&[
            "sdrparser",
            "filter",
            "-i",
            signal_path.to_str().expect("utf8 path"),
            "-t",
            "butterworth",
            "-n",
            "2",
            "-c",
            "2000",
            "-N",
        ]));
        let stats = run_filter(&filter, &cfg).expect("filter");
        assert_eq!(stats.input_samples, 4410);
        let filtered_path = dir.path().join("signal_butterworth.wav");
        let (filtered, _) = read_wav(&filtered_path).expect("read filtered");
        assert_eq!(filtered.len(), 4410);

        let demod = DemodArgs {
            input: filtered_path,
            output: dir.path().join("audio.wav"),
            kind: Modulation::Fm,
            agc: true,
        };
        run_demod(&demod, &cfg).expect("demod");
        let (audio, _) = read_wav(&demod.output).expect("read audio");
        assert_eq!(audio.len(), 4409);
    }

    #[test]
    fn test_filter_rejects_above_nyquist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("in.wav");
        write_wav(&path, &[0.0, 0.1, 0.2], 8000).expect("write");
        let args = filter_args(parse(&[
            "sdrparser",
            "filter",
            "-i",
            path.to_str().expect("utf8 path"),
            "-t",
            "butterworth",
            "-c",
            "5000",
        ]));
        let err = run_filter(&args, &AppConfig::default()).expect_err("nyquist");
        assert!(err.to_string().contains("butterworth"), "{err}");
    }
}
