//! pdf2txt: extract text from pdf files, one at a time or a whole directory tree.
//!
//! - `pdf2txt extract <file.pdf> <dest>`
//! - `pdf2txt extract-all <dir> <dest> [--recurse] [--halt-on-fail]`

mod progress;

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::HumanBytes;

use pdf2txt_core::batch::{BatchReport, BatchRunner};
use pdf2txt_core::builder::{build_jobs, BuildOptions};
use pdf2txt_core::job::JobBatch;
use pdf2txt_core::options::ExtractOptions;
use pdf2txt_input_pdf::LopdfExtractor;
use pdf2txt_utils::fs::file_size_msg;

const APP_NAME: &str = "pdf2txt-rs";

#[derive(Parser)]
#[command(name = "pdf2txt", version, about = "Extract text from pdf files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Hide the progress bar
    #[arg(long, global = true)]
    no_progress: bool,

    /// Dump effective merged config as TOML and exit
    #[arg(long, global = true)]
    dump_config: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a single pdf file
    Extract {
        /// Source pdf file
        path_in: PathBuf,

        /// Destination directory (or .txt file) for the text
        path_out: PathBuf,

        /// File name for the output if different from the default
        #[arg(long)]
        file_name: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(long)]
        overwrite: bool,

        /// Suppress task status messages
        #[arg(long)]
        suppress_status_msgs: bool,
    },

    /// Extract every pdf in a directory, naming outputs after their inputs.
    ///
    /// With --recurse the sub directory structure is reproduced in the
    /// output directory. The .pdf suffix is replaced with .txt.
    ExtractAll {
        /// Source directory for files ending in .pdf, case insensitive
        path_in: PathBuf,

        /// Destination directory for text files
        path_out: PathBuf,

        /// Overwrite existing output files
        #[arg(long)]
        overwrite: bool,

        /// Also extract text from sub directories of PATH_IN
        #[arg(long)]
        recurse: bool,

        /// Stop at the first file that fails
        #[arg(long)]
        halt_on_fail: bool,

        /// Suppress task status messages
        #[arg(long)]
        suppress_status_msgs: bool,
    },
}

/// Per-invocation state handed to the command runners.
struct CliContext {
    start: Instant,
    verbosity: u8,
}

impl CliContext {
    fn new(verbosity: u8) -> Self {
        Self {
            start: Instant::now(),
            verbosity,
        }
    }
}

/// Load config from global and project-local TOML files.
/// Later files override earlier ones. Missing files are silently ignored.
fn load_config() -> ExtractOptions {
    let mut paths = Vec::new();
    // 1. Global config: ~/.config/pdf2txt-rs/config.toml
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_NAME).join("config.toml"));
    }
    // 2. Project-local config: ./.pdf2txt-rs.toml
    paths.push(PathBuf::from(format!(".{}.toml", APP_NAME)));

    let mut opts = ExtractOptions::default();
    for path in paths {
        let Ok(contents) = std::fs::read_to_string(&path) else {
            continue;
        };
        match toml::from_str::<ExtractOptions>(&contents) {
            Ok(parsed) => {
                log::debug!("Loaded config from {}", path.display());
                opts = parsed;
            }
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
            }
        }
    }
    opts
}

/// Apply global CLI flags on top of config-loaded options.
fn apply_cli_overrides(opts: &mut ExtractOptions, cli: &Cli) {
    if cli.no_progress {
        opts.progress = false;
    }
}

const LOG_TARGETS: [&str; 4] = ["pdf2txt", "pdf2txt_core", "pdf2txt_input_pdf", "pdf2txt_utils"];

fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Default log filter, limited to this workspace's crates. `RUST_LOG`
/// replaces it.
fn log_filter(verbosity: u8) -> String {
    let level = log_level(verbosity);
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(cli.verbose)),
    )
    .init();

    let ctx = CliContext::new(cli.verbose);
    log::debug!("Verbosity: {}", ctx.verbosity);

    let mut opts = load_config();
    apply_cli_overrides(&mut opts, &cli);

    // Handle --dump-config
    if cli.dump_config {
        match toml::to_string_pretty(&opts) {
            Ok(s) => {
                println!("{}", s);
                process::exit(0);
            }
            Err(e) => {
                eprintln!("Error serializing config: {}", e);
                process::exit(1);
            }
        }
    }

    let result = match &cli.command {
        Some(Commands::Extract {
            path_in,
            path_out,
            file_name,
            overwrite,
            suppress_status_msgs,
        }) => {
            opts.overwrite |= *overwrite;
            opts.suppress_status_msgs |= *suppress_status_msgs;
            run_extract(&ctx, &opts, path_in, path_out, file_name.clone())
        }
        Some(Commands::ExtractAll {
            path_in,
            path_out,
            overwrite,
            recurse,
            halt_on_fail,
            suppress_status_msgs,
        }) => {
            opts.overwrite |= *overwrite;
            opts.recurse |= *recurse;
            opts.halt_on_fail |= *halt_on_fail;
            opts.suppress_status_msgs |= *suppress_status_msgs;
            run_extract_all(&ctx, &opts, path_in, path_out)
        }
        None => {
            eprintln!("Usage: pdf2txt extract <PATH_IN> <PATH_OUT> [options]");
            eprintln!("   or: pdf2txt extract-all <PATH_IN> <PATH_OUT> [options]");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Extract a single file. A one-job batch has nothing to continue with, so
/// its failure always fails the command.
fn run_extract(
    ctx: &CliContext,
    opts: &ExtractOptions,
    path_in: &Path,
    path_out: &Path,
    file_name: Option<PathBuf>,
) -> Result<()> {
    if path_in.is_dir() {
        bail!("PATH_IN: {} is not a file.", path_in.display());
    }

    let build_opts = BuildOptions {
        recurse: false,
        overwrite: opts.overwrite,
        halt_on_fail: true,
        file_name,
    };
    let batch = build_jobs(path_in, path_out, &build_opts)
        .with_context(|| format!("Cannot extract {}", path_in.display()))?;

    run_batch(ctx, opts, &batch)
}

fn run_extract_all(
    ctx: &CliContext,
    opts: &ExtractOptions,
    path_in: &Path,
    path_out: &Path,
) -> Result<()> {
    if path_in.is_file() {
        bail!("PATH_IN: {} is not a directory.", path_in.display());
    }

    let build_opts = BuildOptions {
        recurse: opts.recurse,
        overwrite: opts.overwrite,
        halt_on_fail: opts.halt_on_fail,
        file_name: None,
    };
    let batch = build_jobs(path_in, path_out, &build_opts)
        .with_context(|| format!("Cannot extract from {}", path_in.display()))?;

    run_batch(ctx, opts, &batch)
}

fn run_batch(ctx: &CliContext, opts: &ExtractOptions, batch: &JobBatch) -> Result<()> {
    for (job, _) in batch.iter() {
        match file_size_msg(job.input_path()) {
            Ok(msg) => log::debug!("Queued {} -> {}", msg, job.output_path().display()),
            Err(e) => log::debug!("Queued {} ({})", job, e),
        }
    }

    let bar = progress::create_bar(batch.total_size(), batch.len(), opts.progress);

    let mut runner = BatchRunner::new(Box::new(LopdfExtractor));
    runner.set_layout_params(opts.layout.clone());
    runner.set_progress_reporter(progress::reporter(bar.clone()));

    let result = runner.run(batch);
    if result.is_ok() {
        bar.finish();
    } else {
        bar.abandon();
    }
    let report = result?;

    if !opts.suppress_status_msgs {
        println!("{}", summary(&report));
        task_complete(ctx);
    }
    Ok(())
}

fn summary(report: &BatchReport) -> String {
    let mut out = format!(
        "Extracted {} of {} files, {} failed ({} processed).",
        report.succeeded,
        report.attempted,
        report.failed(),
        HumanBytes(report.bytes_processed)
    );
    for input in report.failed_inputs() {
        out.push_str(&format!("\n  failed: {}", input.display()));
    }
    out
}

/// Print how long the command took.
fn task_complete(ctx: &CliContext) {
    let elapsed = ctx.start.elapsed().as_secs_f64();
    println!("\nTask completed in {:9.6} seconds.", elapsed);
}
