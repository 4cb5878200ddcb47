//! pathtrace CLI - record and replay shortest-path runs
//!
//! Loads a graph from JSON, runs Dijkstra or Bellman-Ford through the
//! recorder in `pathtrace-core`, and lets you inspect the trace step by step.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod graph_file;
mod output;

use commands::*;
use config::PathtraceConfig;
use output::{OutputConfig, OutputFormat};

/// Step-by-step recorder for Dijkstra and Bellman-Ford.
#[derive(Parser)]
#[command(name = "pathtrace")]
#[command(author, version)]
#[command(about = "Step-by-step recorder for Dijkstra and Bellman-Ford")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  pathtrace run graph.json --source A               Distances and paths from A
  pathtrace run graph.json -s A -e bf --steps       Every Bellman-Ford step
  pathtrace step graph.json -s A --at 3             Inspect step 3
  pathtrace replay graph.json -s A                  Walk through the run interactively")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Compact output: blank table borders, minified JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Wrap tables to this width instead of the terminal width
    #[arg(long, global = true)]
    width: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a run and print its outcome
    Run {
        #[command(flatten)]
        record: RecordArgs,

        /// Also list every recorded step
        #[arg(long)]
        steps: bool,
    },

    /// Show a single recorded step
    Step {
        #[command(flatten)]
        record: RecordArgs,

        /// Zero-based step index (default: the last step)
        #[arg(short, long)]
        at: Option<usize>,
    },

    /// Walk through a recorded run, one command per line on stdin
    Replay {
        #[command(flatten)]
        record: RecordArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: completions::Shell,

        /// Show installation instructions instead of generating completions
        #[arg(long)]
        instructions: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .pathtracerc.toml
    let config = PathtraceConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    // Color: config override > TTY detection
    let mut output = OutputConfig::auto_detect_with_color_override(format, config.use_color());
    output.compact = cli.compact || config.compact();
    // An explicit width always wraps, even when stdout is not a terminal.
    if let Some(width) = cli.width.or(config.width()) {
        output.width = Some(width);
        output.no_truncate = false;
    }
    colored::control::set_override(output.use_colors());

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Run { record, steps } => run::run(&record, steps, &config, output),
        Commands::Step { record, at } => step::run(&record, at, &config, output),
        Commands::Replay { record } => replay::run(&record, &config, output),
        Commands::Completions {
            shell,
            instructions,
        } => {
            if instructions {
                for line in completions::instructions(shell) {
                    println!("{}", line);
                }
            } else {
                let mut cmd = Cli::command();
                completions::generate_completions_with_cmd(shell, &mut cmd);
            }
            Ok(())
        }
    }
}
