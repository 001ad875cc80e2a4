use clap::{CommandFactory, Parser};
use imgconv::batch::{BatchError, batch_convert};
use imgconv::config::ConvertConfig;
use imgconv::convert::{ConvertError, ConvertEvent, convert_file};
use imgconv::imaging::{
    RequestedFormat, RustBackend, TargetFormat, is_supported_input, probe,
    supported_input_extensions,
};
use imgconv::output;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{self, Sender};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "imgconv")]
#[command(about = "Convert JPEG and PNG images to JPEG, PNG, WebP or AVIF")]
#[command(long_about = "\
Convert JPEG and PNG images to JPEG, PNG, WebP or AVIF

Usage:
  imgconv [options] <input> <output> <format>
  imgconv --batch [options] <input_dir> <format>

Formats (any case): webp, avif, jpeg, jpg, png

Inputs are recognized by content, so a mislabeled file still decodes.
In batch mode only .jpg, .jpeg and .png entries directly inside the
input directory are converted; subdirectories are not visited.

Note: webp and avif outputs contain JPEG data. No encoder for those
formats is built in; a warning is printed whenever this happens.")]
#[command(after_help = "\
Examples:
  imgconv input.jpg output.webp webp
  imgconv -q 75 input.png output.jpg jpeg
  imgconv --batch images/ webp
  imgconv --batch -o converted/ images/ webp")]
#[command(version)]
struct Cli {
    /// Quality for lossy formats (1-100)
    #[arg(short, long, default_value_t = 85, allow_negative_numbers = true,
          value_parser = clap::value_parser!(i64).range(1..=100))]
    quality: i64,

    /// Batch convert all images in a directory
    #[arg(short, long)]
    batch: bool,

    /// Output directory for batch conversion [default: <input_dir>/converted]
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print the result as JSON on stdout (warnings still go to stderr)
    #[arg(long)]
    json: bool,

    /// <input> <output> <format>, or <input_dir> <format> with --batch
    #[arg(value_name = "ARGS")]
    args: Vec<OsString>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Validation(String),
    #[error("Conversion failed: {0}")]
    Convert(#[from] ConvertError),
    #[error("Batch conversion failed: {0}")]
    Batch(#[from] BatchError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("progress printer stopped unexpectedly")]
    Printer,
}

/// Rewrite single-dash long flags (`-batch`, `-version`, `-help`) to the
/// double-dash spelling clap expects. Arguments after `--` are untouched.
fn normalize_legacy_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            match arg.to_str() {
                Some("-batch") => "--batch".into(),
                Some("-version") => "--version".into(),
                Some("-help") => "--help".into(),
                _ => arg,
            }
        })
        .collect()
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_legacy_flags(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Help and version are "errors" to clap but successful runs to us
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, CliError::Usage(_)) {
                let _ = Cli::command().print_help();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = ConvertConfig::with_quality(cli.quality);
    let backend = RustBackend::new();

    if cli.batch {
        run_batch(&cli, &backend, &config)
    } else {
        run_single(&cli, &backend, &config)
    }
}

fn parse_format(token: &OsStr) -> Result<RequestedFormat, CliError> {
    token
        .to_str()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| {
            CliError::Validation(format!(
                "Unsupported format '{}'. Supported: {}",
                token.to_string_lossy(),
                TargetFormat::TOKENS.join(", ")
            ))
        })
}

fn run_single(cli: &Cli, backend: &RustBackend, config: &ConvertConfig) -> Result<(), CliError> {
    let [input, output_path, format, ..] = cli.args.as_slice() else {
        return Err(CliError::Usage(
            "Single file mode requires input file, output file, and format".to_string(),
        ));
    };
    let input = Path::new(input);
    let output_path = Path::new(output_path);

    if !input.exists() {
        return Err(CliError::Validation(format!(
            "Input file '{}' doesn't exist",
            input.display()
        )));
    }
    if !is_supported_input(input) {
        return Err(CliError::Validation(format!(
            "Input file '{}' is not a supported image format ({})",
            input.display(),
            supported_input_extensions().join(", ")
        )));
    }
    let format = parse_format(format)?.target();

    if !cli.json {
        // Informational only; the conversion reports its own decode errors
        if let Ok(info) = probe(backend, input) {
            println!("{}", output::format_probe(input, &info));
        }
        println!(
            "{}",
            output::format_single_start(input, output_path, format, config.quality.value())
        );
    }

    let result = with_event_printer(event_printer(0, cli.json), |tx| {
        convert_file(backend, input, output_path, format, config, Some(tx))
    })??;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::print_converted(&result);
    }
    Ok(())
}

fn run_batch(cli: &Cli, backend: &RustBackend, config: &ConvertConfig) -> Result<(), CliError> {
    let [input_dir, format, ..] = cli.args.as_slice() else {
        return Err(CliError::Usage(
            "Batch mode requires input directory and format".to_string(),
        ));
    };
    let input_dir = Path::new(input_dir);

    if !input_dir.is_dir() {
        return Err(CliError::Validation(format!(
            "Input path '{}' is not a directory or doesn't exist",
            input_dir.display()
        )));
    }
    let format = parse_format(format)?;

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| input_dir.join("converted"));

    let summary = with_event_printer(event_printer(1, cli.json), |tx| {
        batch_convert(backend, input_dir, &output_dir, &format, config, Some(tx))
    })??;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        output::print_batch_summary(&summary);
    }
    Ok(())
}

/// Event printer for the terminal. With `quiet`, only warnings are printed.
fn event_printer(depth: usize, quiet: bool) -> impl Fn(&ConvertEvent) + Send + 'static {
    move |event| {
        if !quiet || output::is_warning(event) {
            output::print_convert_event(event, depth);
        }
    }
}

/// Run `f` with an event sender whose events are handed to `print` as they
/// arrive.
///
/// Conversion stays on the calling thread; only printing happens on the
/// second one. The printer is joined before returning so every event is on
/// screen before the final result, and a printer panic (stdout closed
/// mid-run, say) surfaces as [`CliError::Printer`].
fn with_event_printer<T>(
    print: impl Fn(&ConvertEvent) + Send + 'static,
    f: impl FnOnce(&Sender<ConvertEvent>) -> T,
) -> Result<T, CliError> {
    let (tx, rx) = mpsc::channel::<ConvertEvent>();
    let printer = std::thread::spawn(move || {
        for event in rx {
            print(&event);
        }
    });
    let result = f(&tx);
    drop(tx);
    printer.join().map_err(|_| CliError::Printer)?;
    Ok(result)
}
