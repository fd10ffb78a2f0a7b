use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fib_text_analysis::analysis::{self, fibonacci_prefix, Analysis};
use fib_text_analysis::{handler, report, store, Settings};
use num_bigint::BigUint;

#[derive(Parser)]
#[command(name = "text_analysis", about = "Fibonacci number and word-frequency analysis of free text")]
struct Cli {
    /// Settings file (default: text_analysis.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze text and save the report and word counts
    Analyze {
        /// Text to analyze (default: read stdin)
        text: Option<String>,
        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Print the analysis without uploading anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Read a JSON request ({"body": "..."}) from stdin and print the JSON response
    Handle,
    /// Print the Fibonacci prefix for a bound
    Fib { bound: BigUint },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { text, file, dry_run } => {
            let text = match (text, file) {
                (Some(t), _) => t,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {:?}", path))?,
                (None, None) => read_stdin()?,
            };
            let result = analysis::analyze(&text)?;
            print_analysis(&result);

            if dry_run {
                return Ok(());
            }
            let settings = Settings::load(cli.config.as_deref())?;
            let store = store::connect(&settings)?;
            let artifacts = report::persist(store.as_ref(), &result, &settings.key_prefix)?;
            println!("\nSaved to bucket {}:", store.bucket());
            println!("  {}", artifacts.report_key);
            println!("  {}", artifacts.words_key);
        }
        Commands::Handle => {
            let raw = read_stdin()?;
            let request: handler::Request =
                serde_json::from_str(&raw).context("Failed to parse request JSON")?;
            let settings = Settings::load(cli.config.as_deref())?;
            let response = handler::handle(&request, &settings);
            println!("{}", serde_json::to_string(&response)?);
        }
        Commands::Fib { bound } => {
            let seq = fibonacci_prefix(&bound);
            let terms: Vec<String> = seq.iter().map(BigUint::to_string).collect();
            println!("{}", terms.join(", "));
        }
    }

    tracing::debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "done");
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

fn print_analysis(a: &Analysis) {
    if a.rows.is_empty() {
        println!("No numbers found.");
    } else {
        println!(
            "{:>20} | {:>20} | {:>20}",
            "previous", "observed", "next"
        );
        println!("{}", "-".repeat(66));
        for r in &a.rows {
            println!(
                "{:>20} | {:>20} | {:>20}",
                opt(r.previous.as_ref()),
                r.observed,
                opt(r.next.as_ref())
            );
        }
    }

    if a.words.is_empty() {
        println!("\nNo words found.");
        return;
    }
    println!("\n--- Words ---");
    let mut words: Vec<_> = a.words.iter().collect();
    words.sort_by(|x, y| y.1.cmp(x.1).then_with(|| x.0.cmp(y.0)));
    for (word, count) in words {
        println!("  {:<24} {}", word, count);
    }
}

fn opt(v: Option<&BigUint>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "-".into())
}
