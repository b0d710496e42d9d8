//! CLI tool for running probing experiments over a word list

use std::{fs, path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use mimalloc::MiMalloc;
use probe_lab::{
    compare, report, run, source, Error, HashKind, LabConfig, ProbeStrategy, StatRange,
};
use tracing::{error, info, warn};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

macro_rules! die {
    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};
}

fn init_tracing(quiet: bool, verbose: u8) {
    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Bridge log crate macros to tracing (the library logs through log::*)
    if tracing_log::LogTracer::init().is_err() {
        die!("INTERNAL ERROR: setting log tracer failed");
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("PROBE_LAB_LOG")
        .from_env_lossy();

    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info);
    }));
}

/// Inserts keys from a word list into a fixed-size hash table and reports
/// probe statistics
#[derive(Parser, Debug)]
#[command(name = "probe-lab")]
struct Args {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Word list, one candidate key per line ("-" reads stdin)
    input: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Hash function: custom, burris or xxh3
    #[arg(long, default_value_t = HashKind::Custom)]
    hash: HashKind,

    /// Probing strategy: linear or random
    #[arg(long, default_value_t = ProbeStrategy::Linear)]
    probing: ProbeStrategy,

    /// Number of slots in the table
    #[arg(long, default_value_t = 100)]
    size: usize,

    /// Maximum number of keys to read
    #[arg(long, default_value_t = 75)]
    limit: usize,

    /// Key length; shorter lines are skipped, longer ones truncated
    #[arg(long, default_value_t = 16)]
    key_len: usize,

    /// Starting seed of the random probe generator
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Insertion order block to summarize (repeatable, replaces the defaults)
    #[arg(long = "range", value_name = "START:COUNT[:LABEL]")]
    ranges: Vec<StatRange>,

    /// Run every hash function and probing strategy and print a summary
    #[arg(long)]
    compare: bool,

    /// Fail unless the report matches this file
    #[arg(long, value_name = "FILE")]
    expect: Option<PathBuf>,
}

fn execute(args: &Args) -> probe_lab::Result<()> {
    let config = LabConfig::default()
        .size(args.size)
        .hash(args.hash)
        .strategy(args.probing)
        .seed(args.seed)
        .limit(args.limit)
        .key_len(args.key_len)
        .ranges(args.ranges.clone());

    let keys = source::read_keys(&args.input, config.key_len, config.limit)?;
    if keys.len() < config.limit {
        warn!(
            "Only {} of {} keys found in {}",
            keys.len(),
            config.limit,
            args.input.display()
        );
    }

    let report = if args.compare {
        report::render_comparison(&compare(&config, &keys)?)
    } else {
        let outcome = run(&config, &keys)?;
        report::render_report(&outcome.table, &config.ranges)
    };

    if let Some(path) = &args.expect {
        let expected = fs::read_to_string(path)?;
        if expected != report {
            error!("Report differs from {}", path.display());
            return Err(Error::BaselineMismatch);
        }
        info!("Report matches {}", path.display());
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &report)?;
            info!("Wrote report to {}", path.display());
        }
        None => print!("{report}"),
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.quiet, args.verbose);

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
