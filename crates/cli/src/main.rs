//! Trace-driven pipeline simulator CLI.
//!
//! This binary wires the simulator core to the outside world. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then command-line overrides.
//! 2. **Trace input:** Opens a binary trace file as the instruction feed.
//! 3. **Reporting:** Runs to completion and prints statistics as text or JSON.

use std::path::PathBuf;
use std::{fs, process};

use clap::{ArgAction, Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use superpipe_core::config::{BranchPredictor, Config};
use superpipe_core::trace::TraceReader;
use superpipe_core::{SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "superpipe",
    author,
    version,
    about = "Cycle-accurate in-order superscalar pipeline simulator",
    long_about = "Replay a binary instruction trace through a configurable in-order pipeline.\n\nExamples:\n  superpipe -t gcc.trace\n  superpipe -t gcc.trace --width 4 --mem-fwd --exe-fwd --bpred gshare\n  superpipe -t gcc.trace --config wide.json --json"
)]
struct Cli {
    /// Binary trace file to replay.
    #[arg(short, long)]
    trace: PathBuf,

    /// JSON configuration file; command-line flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pipeline width (lanes per stage).
    #[arg(short, long)]
    width: Option<usize>,

    /// Enable forwarding from the Execute and Memory stages.
    #[arg(long)]
    mem_fwd: bool,

    /// Enable forwarding from the Decode stage.
    #[arg(long)]
    exe_fwd: bool,

    /// Branch predictor policy.
    #[arg(long, value_enum)]
    bpred: Option<BpredArg>,

    /// Stop with an error after this many cycles.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Dump the latch array every cycle (needs `-vv` or `RUST_LOG=trace`).
    #[arg(long)]
    trace_pipeline: bool,

    /// Print statistics as JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BpredArg {
    /// No predictor.
    None,
    /// Oracle placeholder (predicts taken).
    Perfect,
    /// Always predict taken.
    AlwaysTaken,
    /// Global history predictor.
    Gshare,
}

impl From<BpredArg> for BranchPredictor {
    fn from(arg: BpredArg) -> Self {
        match arg {
            BpredArg::None => Self::None,
            BpredArg::Perfect => Self::Perfect,
            BpredArg::AlwaysTaken => Self::AlwaysTaken,
            BpredArg::Gshare => Self::GShare,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{e}");
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs a `fmt` subscriber; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the configuration from defaults, the optional JSON file and flags.
fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    if let Some(width) = cli.width {
        config.pipeline.width = width;
    }
    config.pipeline.mem_forwarding |= cli.mem_fwd;
    config.pipeline.exe_forwarding |= cli.exe_fwd;
    if let Some(bpred) = cli.bpred {
        config.pipeline.branch_predictor = bpred.into();
    }
    if cli.max_cycles.is_some() {
        config.general.max_cycles = cli.max_cycles;
    }
    config.general.trace_pipeline |= cli.trace_pipeline;

    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(cli)?;
    let feed = TraceReader::open(&cli.trace).map_err(SimError::from)?;

    info!(trace = %cli.trace.display(), width = config.pipeline.width, "starting simulation");
    if !cli.json {
        println!("** PIPELINE IS {} WIDE **", config.pipeline.width);
    }

    let mut sim = Simulator::new(&config, feed)?;
    let stats = sim.run()?;

    if cli.json {
        println!("{}", stats.to_json()?);
    } else {
        stats.print();
    }
    Ok(())
}
