//! AlgoTrace CLI - run a sorting algorithm and print its recorded trace
//!
//! Usage:
//!     algotrace 5 4 3 2 1
//!     algotrace --reversed 10 --algorithm selection
//!     algotrace --sorted 8 --summary-only
//!     algotrace --reversed 6 --json --verify --replay-check

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use algotrace_core::{
    BubbleSort, CompletedSort, ReplayEngine, SelectionSort, SortRun, SortStrategy, TraceVerifier,
};

#[derive(Parser, Debug)]
#[command(name = "algotrace")]
#[command(about = "Run a sorting algorithm and print its recorded trace")]
#[command(version)]
struct Args {
    /// Elements to sort (e.g. `algotrace 5 4 3 2 1`)
    values: Vec<i64>,

    /// Use the reversed permutation N..1 as input
    #[arg(long, value_name = "N", conflicts_with_all = ["sorted", "values"])]
    reversed: Option<usize>,

    /// Use the already-sorted permutation 1..N as input
    #[arg(long, value_name = "N", conflicts_with = "values")]
    sorted: Option<usize>,

    /// Algorithm to run
    #[arg(short, long, value_enum, default_value = "bubble")]
    algorithm: Algorithm,

    /// Output as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Print only the summary, not the event log
    #[arg(long)]
    summary_only: bool,

    /// Check the trace invariants after the run
    #[arg(long)]
    verify: bool,

    /// Replay the trace against the input and check it reproduces the result
    #[arg(long)]
    replay_check: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Adjacent-pair bubble sort
    Bubble,
    /// Running-minimum selection sort
    Selection,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algotrace_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    tracing::info!("algotrace v{}", env!("CARGO_PKG_VERSION"));

    let input = resolve_input(&args);

    match args.algorithm {
        Algorithm::Bubble => report(BubbleSort, &input, &args),
        Algorithm::Selection => report(SelectionSort, &input, &args),
    }
}

fn resolve_input(args: &Args) -> Vec<i64> {
    if let Some(n) = args.reversed {
        return (1..=n as i64).rev().collect();
    }
    if let Some(n) = args.sorted {
        return (1..=n as i64).collect();
    }
    if args.values.is_empty() {
        eprintln!("Error: no input. Pass values, or use --reversed N / --sorted N.");
        std::process::exit(1);
    }
    args.values.clone()
}

fn report<S: SortStrategy<i64>>(strategy: S, input: &[i64], args: &Args) {
    let completed = match SortRun::new(strategy, input).and_then(|run| run.run()) {
        Ok(completed) => completed,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if args.verify {
        let verification = TraceVerifier::verify(completed.trace());
        if !verification.is_valid {
            eprintln!(
                "Error: trace failed verification: {}",
                verification
                    .message
                    .unwrap_or_else(|| "unknown fault".to_string())
            );
            std::process::exit(1);
        }
        eprintln!("verified: {} events uphold the trace invariants", verification.event_count);
    }

    if args.replay_check {
        match ReplayEngine::new().replay(completed.trace(), input) {
            Ok(outcome) if outcome.buffer == completed.sorted() => {
                eprintln!("replay: reproduced the sorted buffer from {} events", outcome.stats.total_events);
            }
            Ok(_) => {
                eprintln!("Error: replay did not reproduce the sorted buffer");
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: replay failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    if args.json {
        output_json(&completed, args.summary_only);
    } else {
        output_text(&completed, args.summary_only);
    }
}

fn output_text<S: SortStrategy<i64>>(completed: &CompletedSort<S, i64>, summary_only: bool) {
    if !summary_only {
        for event in completed.trace() {
            println!("{}", event);
        }
        println!();
    }
    println!("{}", completed.summary());
    println!("before: {:?}", completed.before());
    println!("after:  {:?}", completed.sorted());
}

fn output_json<S: SortStrategy<i64>>(completed: &CompletedSort<S, i64>, summary_only: bool) {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        summary: algotrace_core::SortSummary,
        before: &'a [i64],
        after: &'a [i64],
        #[serde(skip_serializing_if = "Option::is_none")]
        events: Option<&'a [algotrace_core::Event<i64>]>,
    }

    let output = JsonOutput {
        summary: completed.summary(),
        before: completed.before(),
        after: completed.sorted(),
        events: if summary_only {
            None
        } else {
            Some(completed.trace().events())
        },
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
