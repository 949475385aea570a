//! `lvpsim`: a standalone host harness for `lvp-core`.
//!
//! Replays a synthetic JSON trace of loads and stores through an `LvpUnit`
//! in program order and prints the accumulated statistics surface. This is
//! a stand-in "host" for demonstration and integration testing — it
//! implements none of the pipeline, fetch, or memory-model logic the core
//! treats as an external collaborator.

use std::path::PathBuf;
use std::{fs, process};

use clap::Parser;
use lvp_core::{LoadInstruction, LvpConfig, LvpUnit, StoreInstruction};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "lvpsim",
    author,
    version,
    about = "Load value prediction subsystem trace replayer",
    long_about = "Replays a JSON trace of loads and stores through an LvpUnit \
                  in program order and prints the prediction statistics surface.\n\n\
                  Example:\n  lvpsim --trace trace.json\n  lvpsim --trace trace.json --config config.json"
)]
struct Cli {
    /// Path to a JSON trace file (array of trace events, program order).
    #[arg(short, long)]
    trace: PathBuf,

    /// Path to a JSON config file. Falls back to `LvpConfig::default()`
    /// when omitted, and to per-field defaults for any key the file omits.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// One entry of the synthetic instruction trace, in program order.
///
/// The `kind` tag discriminates a load (dispatched at `predict`, verified at
/// `update` once `value` is known) from a store (invalidates the CVU once
/// its effective address is known).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TraceEvent {
    /// A load: predicted at dispatch, verified at writeback against `value`.
    Load {
        pc: u64,
        #[serde(default)]
        tid: u32,
        seq_num: u64,
        addr: u64,
        size: u32,
        value: u64,
        #[serde(default)]
        squashed: bool,
    },
    /// A store: its effective address invalidates any overlapping CVU entry.
    Store {
        pc: u64,
        #[serde(default)]
        tid: u32,
        addr: u64,
        size: u32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => load_config(&path),
        None => LvpConfig::default(),
    };

    let mut unit = LvpUnit::new(&config).unwrap_or_else(|err| {
        eprintln!("Error: invalid configuration: {err}");
        process::exit(1);
    });

    let trace = load_trace(&cli.trace);

    println!("[*] Replaying {} trace events from {}", trace.len(), cli.trace.display());

    for event in &trace {
        replay(&mut unit, event);
    }

    unit.stats().print();
}

fn replay(unit: &mut LvpUnit, event: &TraceEvent) {
    match *event {
        TraceEvent::Load {
            pc,
            tid,
            seq_num,
            addr,
            size,
            value,
            squashed,
        } => {
            let mut inst = LoadInstruction::new(pc, tid.into(), seq_num);
            inst.eff_addr = Some(addr);
            inst.eff_size = Some(size);
            let predictable = unit.predict(&mut inst);
            info!(pc, seq_num, predictable, "predict");

            inst.mem_value = Some(value);
            unit.update(&inst, squashed);
        }
        TraceEvent::Store { pc, tid, addr, size } => {
            let store = StoreInstruction::new(pc, tid.into(), addr, size);
            let killed = unit.cvu_invalidate(&store);
            info!(pc, addr, size, killed, "cvu_invalidate");
        }
    }
}

fn load_trace(path: &PathBuf) -> Vec<TraceEvent> {
    let text = fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Error reading trace {}: {err}", path.display());
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|err| {
        eprintln!("Error parsing trace {}: {err}", path.display());
        process::exit(1);
    })
}

fn load_config(path: &PathBuf) -> LvpConfig {
    let text = fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Error reading config {}: {err}", path.display());
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|err| {
        eprintln!("Error parsing config {}: {err}", path.display());
        process::exit(1);
    })
}
