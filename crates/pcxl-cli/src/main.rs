use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose;
use clap::{Args, Parser, Subcommand};
use glob::glob;
use pcxl_core::{DecodeResult, Decoder, UplinkInput};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("PCXL_BUILD_COMMIT"),
    ", ",
    env!("PCXL_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "pcxl")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for Terabee PC-L-XL LoRaWAN uplinks.",
    long_about = None,
    after_help = "Examples:\n  pcxl decode --port 1 --hex 000000050000000303\n  pcxl decode --port 2 --bytes 255,2,255\n  pcxl batch uplinks.json -o results.json\n  pcxl commands"
)]
struct Cli {
    /// Log filter (e.g. warn, debug, pcxl_core=trace)
    #[arg(long, global = true, env = "PCXL_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a single uplink and print the result envelope as JSON.
    Decode {
        /// LoRaWAN FPort the uplink arrived on (1-255)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..))]
        port: u8,

        #[command(flatten)]
        payload: PayloadArgs,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Exit with a non-zero code if the uplink could not be decoded
        #[arg(long)]
        strict: bool,
    },
    /// Decode a JSON array of uplinks ({"bytes": [...], "fPort": n}).
    #[command(
        after_help = "Examples:\n  pcxl batch uplinks.json -o results.json\n  pcxl batch 'captures/*.json' extra.json --stdout --pretty"
    )]
    Batch {
        /// JSON files holding arrays of uplinks; globs are expanded and the
        /// batches decoded in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output path for the JSON array of results
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON results to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any uplink could not be decoded
        #[arg(long)]
        strict: bool,
    },
    /// List the registered commands.
    Commands,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct PayloadArgs {
    /// Payload as hexadecimal (e.g. ff02ff)
    #[arg(long)]
    hex: Option<String>,

    /// Payload as base64, as network servers forward FRMPayload
    #[arg(long)]
    base64: Option<String>,

    /// Payload as comma-separated byte values (e.g. 255,2,255)
    #[arg(long, value_delimiter = ',')]
    bytes: Option<Vec<u8>>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = Decoder::pc_l_xl()
        .context("failed to build command registry")
        .map_err(CliError::from)
        .and_then(|decoder| run(&decoder, cli.command));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(decoder: &Decoder, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Decode {
            port,
            payload,
            pretty,
            strict,
        } => cmd_decode(decoder, port, payload, pretty, strict),
        Commands::Batch {
            inputs,
            report,
            stdout,
            pretty,
            compact,
            quiet,
            strict,
        } => cmd_batch(decoder, &inputs, report, stdout, pretty, compact, quiet, strict),
        Commands::Commands => {
            cmd_commands(decoder);
            Ok(())
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_decode(
    decoder: &Decoder,
    port: u8,
    payload: PayloadArgs,
    pretty: bool,
    strict: bool,
) -> Result<(), CliError> {
    let bytes = payload_bytes(payload)?;
    debug!(port, len = bytes.len(), "decoding uplink");
    let result = decoder.decode(&UplinkInput::new(port, bytes));
    let json = serialize_json(&result, pretty, false)?;
    println!("{}", json);

    if strict && !result.is_ok() {
        return Err(CliError::new(
            format!("uplink not decoded: {}", result.errors.join("; ")),
            Some("check the port and payload bytes".to_string()),
        ));
    }
    Ok(())
}

fn payload_bytes(payload: PayloadArgs) -> Result<Vec<u8>, CliError> {
    if let Some(text) = payload.hex {
        let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        return hex::decode(&cleaned).map_err(|err| {
            CliError::new(
                format!("invalid hex payload '{}'", text),
                Some(format!("decode error: {}", err)),
            )
        });
    }
    if let Some(b64) = payload.base64 {
        return general_purpose::STANDARD.decode(b64.trim()).map_err(|err| {
            CliError::new(
                format!("invalid base64 payload '{}'", b64),
                Some(format!("decode error: {}", err)),
            )
        });
    }
    payload.bytes.ok_or_else(|| {
        CliError::new(
            "missing payload",
            Some("use --hex, --base64 or --bytes".to_string()),
        )
    })
}

#[allow(clippy::too_many_arguments)]
fn cmd_batch(
    decoder: &Decoder,
    inputs: &[PathBuf],
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
) -> Result<(), CliError> {
    let files = expand_inputs(inputs)?;
    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };
    if let Some(report_path) = report.as_ref() {
        ensure_report_is_not_input(report_path, &files)?;
    }

    let mut uplinks = Vec::new();
    for file in &files {
        let batch = read_uplinks(file)?;
        debug!(count = batch.len(), input = %file.display(), "loaded uplinks");
        uplinks.extend(batch);
    }
    info!(count = uplinks.len(), files = files.len(), "decoding batch");

    let results: Vec<DecodeResult> = uplinks.iter().map(|uplink| decoder.decode(uplink)).collect();
    let failed = results.iter().filter(|result| !result.is_ok()).count();
    let json = serialize_json(&results, pretty, compact)?;

    match report {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write results: {}", report.display()))?;
            if !quiet {
                eprintln!(
                    "OK: {} uplinks decoded -> {}",
                    results.len(),
                    report.display()
                );
            }
        }
    }

    if strict && failed > 0 {
        return Err(CliError::new(
            format!("{} of {} uplinks not decoded", failed, results.len()),
            Some("inspect the \"errors\" entries of the results".to_string()),
        ));
    }
    Ok(())
}

fn cmd_commands(decoder: &Decoder) {
    println!("{:>4} {:>3} {:>4}  {:<28} parser", "port", "id", "key", "name");
    for (key, command) in decoder.registry().iter() {
        println!(
            "{:>4} {:>3} {:>4}  {:<28} {}",
            key.port(),
            key.command_id(),
            key,
            command.name,
            command.parser.map(|parser| parser.name()).unwrap_or("-")
        );
    }
}

fn serialize_json<T: serde::Serialize>(
    value: &T,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

/// Expands every glob argument; literal paths pass through as given.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for input in inputs {
        let pattern = input.to_string_lossy();
        if !is_glob_pattern(&pattern) {
            files.push(input.clone());
            continue;
        }
        let invalid = |detail: String| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", detail)),
            )
        };
        let mut matched = glob(&pattern)
            .map_err(|err| invalid(err.msg.to_string()))?
            .map(|entry| entry.map_err(|err| invalid(err.to_string())))
            .filter(|entry| entry.as_ref().map_or(true, |path| path.is_file()))
            .collect::<Result<Vec<_>, _>>()?;
        if matched.is_empty() {
            return Err(CliError::new(
                format!("no files match pattern '{}'", pattern),
                Some("check the path or quote the pattern".to_string()),
            ));
        }
        matched.sort();
        files.append(&mut matched);
    }
    Ok(files)
}

fn read_uplinks(file: &Path) -> Result<Vec<UplinkInput>, CliError> {
    let hint = || Some("expected a .json file holding an array of uplinks".to_string());
    if !file.is_file() {
        return Err(CliError::new(
            format!("input file not found: {}", file.display()),
            hint(),
        ));
    }
    let is_json = file
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(CliError::new(
            format!("unsupported input format '{}'", file.display()),
            hint(),
        ));
    }
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read input file: {}", file.display()))?;
    serde_json::from_str(&raw).map_err(|err| {
        CliError::new(
            format!("invalid uplink list in {}: {}", file.display(), err),
            Some("expected a JSON array of {\"bytes\": [...], \"fPort\": n}".to_string()),
        )
    })
}

fn ensure_report_is_not_input(report: &Path, files: &[PathBuf]) -> Result<(), CliError> {
    let Some(name) = report.file_name() else {
        return Err(CliError::new(
            format!("invalid report path: {}", report.display()),
            Some("pass a file path to -o/--report".to_string()),
        ));
    };
    let dir = match report.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A missing output directory is created later and cannot hold an input.
    let Ok(dir) = fs::canonicalize(dir) else {
        return Ok(());
    };
    let target = dir.join(name);
    for file in files {
        if fs::canonicalize(file).is_ok_and(|input| input == target) {
            return Err(CliError::new(
                format!("report path must differ from input: {}", report.display()),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(())
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
