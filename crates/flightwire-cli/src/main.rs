//! Flightwire ingest CLI — reads ACARS JSONL, dispatches every message
//! through the parser registry, and emits structured records.

use std::collections::BTreeMap;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

use flightwire_parsers::default_registry;
use flightwire_tracker::{extract, FlightTracker, MemoryStore, ReferenceStore};

mod ingest;

/// Decoder logs nest large objects; lines this long must still fit.
const LINE_BUFFER: usize = 64 * 1024 * 1024;

/// Flightwire ACARS extraction toolkit.
#[derive(Parser, Debug)]
#[command(name = "flightwire", about = "ACARS message extraction pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a JSONL message stream and emit structured results.
    Extract(ExtractArgs),
}

#[derive(clap::Args, Debug)]
struct ExtractArgs {
    /// Input path; `-` reads stdin.
    #[arg(long, default_value = "-")]
    input: String,

    /// Output path; `-` writes stdout.
    #[arg(long, default_value = "-")]
    output: String,

    /// Pretty-print the emitted JSON.
    #[arg(long)]
    pretty: bool,

    /// Emit messages that matched no parser too.
    #[arg(long)]
    all: bool,

    /// Print counters to stderr when done.
    #[arg(long)]
    stats: bool,
}

#[derive(Default)]
struct Stats {
    lines: u64,
    skipped: u64,
    emitted: u64,
    matched: u64,
    parsed_kinds: BTreeMap<String, u64>,
}

impl Stats {
    fn report(&self) {
        eprintln!(
            "lines={} skipped={} emitted={} matched={}",
            self.lines, self.skipped, self.emitted, self.matched
        );
        for (kind, count) in &self.parsed_kinds {
            eprintln!("  {kind}: {count}");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Extract(args) => run_extract(args).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("flightwire: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run_extract(args: ExtractArgs) -> Result<()> {
    let mut registry = default_registry();
    let tracker = FlightTracker::new(MemoryStore::new());
    let mut stats = Stats::default();
    let mut next_id: u64 = 0;

    let reader: Box<dyn tokio::io::AsyncRead + Unpin> = if args.input == "-" {
        Box::new(tokio::io::stdin())
    } else {
        Box::new(
            tokio::fs::File::open(&args.input)
                .await
                .with_context(|| format!("opening {}", args.input))?,
        )
    };
    let mut writer: Box<dyn tokio::io::AsyncWrite + Unpin> = if args.output == "-" {
        Box::new(tokio::io::stdout())
    } else {
        Box::new(
            tokio::fs::File::create(&args.output)
                .await
                .with_context(|| format!("creating {}", args.output))?,
        )
    };

    let mut lines = BufReader::with_capacity(LINE_BUFFER, reader).lines();
    while let Some(line) = lines.next_line().await.context("reading input")? {
        stats.lines += 1;
        if line.trim().is_empty() {
            continue;
        }
        let messages = match ingest::decode_line(&line) {
            Ok(messages) if messages.is_empty() => {
                stats.skipped += 1;
                continue;
            }
            Ok(messages) => messages,
            Err(err) => {
                warn!(line = stats.lines, error = %err, "unparseable line");
                stats.skipped += 1;
                continue;
            }
        };

        for mut msg in messages {
            next_id += 1;
            msg.id = next_id;

            let results = registry.dispatch(&msg);
            if !results.is_empty() {
                stats.matched += 1;
            }
            for result in &results {
                *stats
                    .parsed_kinds
                    .entry(result.kind().to_string())
                    .or_default() += 1;
            }

            let extraction = extract(&msg, &results);
            let now = msg.timestamp.unwrap_or_else(chrono::Utc::now);
            let state = tracker.update_flight(&extraction.flight, now);
            for waypoint in &extraction.waypoints {
                tracker.store().upsert_waypoint(waypoint);
            }
            if let Some(atis) = &extraction.atis {
                tracker.store().upsert_atis(atis);
            }

            if results.is_empty() && !args.all {
                continue;
            }
            let record = json!({
                "message_id": msg.id,
                "label": msg.label,
                "results": results,
                "flight": state,
            });
            let mut encoded = if args.pretty {
                serde_json::to_string_pretty(&record).context("encoding record")?
            } else {
                serde_json::to_string(&record).context("encoding record")?
            };
            encoded.push('\n');
            writer
                .write_all(encoded.as_bytes())
                .await
                .context("writing output")?;
            stats.emitted += 1;
        }
    }
    writer.flush().await.context("flushing output")?;

    if args.stats {
        stats.report();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn extract_defaults_to_stdio() {
        let cli = Cli::parse_from(["flightwire", "extract"]);
        let Command::Extract(args) = cli.command;
        assert_eq!(args.input, "-");
        assert_eq!(args.output, "-");
        assert!(!args.pretty);
        assert!(!args.all);
    }
}
