//! Stepwise command-line player.
//!
//! Lists the shipped visualizers, dumps their traces and plays them back one
//! frame per line. Logs go to stderr so dumps can be piped.

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use stepwise_cli::{CliError, Format, HELP, Terminal, write_listing, write_trace};
use stepwise_playback::{PlaybackConfig, Runtime, Speed};
use stepwise_trace::Visualizer;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "stepwise")]
#[command(about = "Record and replay sorting and graph algorithms step by step")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available visualizers
    List,

    /// Write a visualizer's full trace to stdout
    Dump {
        /// Visualizer name, e.g. merge-sort
        algorithm: Visualizer,

        /// Output encoding
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Play a visualizer interactively, one command per line on stdin
    Play {
        /// Visualizer name, e.g. bfs
        algorithm: Visualizer,

        /// Autoplay speed (slow, medium, fast)
        #[arg(long, default_value_t = Speed::Medium)]
        speed: Speed,

        /// Start playing immediately
        #[arg(long)]
        autoplay: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    match args.command {
        Command::List => write_listing(io::stdout().lock()),
        Command::Dump { algorithm, format } => {
            let trace = algorithm.build()?;
            tracing::debug!(trace = trace.name(), frames = trace.len(), ?format, "dumping trace");
            write_trace(&trace, format, io::stdout().lock())
        },
        Command::Play { algorithm, speed, autoplay } => {
            writeln!(io::stderr(), "{HELP}")?;
            tracing::info!(%algorithm, %speed, autoplay, "starting playback");

            let terminal = Terminal::new(BufReader::new(tokio::io::stdin()), io::stdout());
            let config = PlaybackConfig::default().with_initial_speed(speed);
            Runtime::new(terminal, algorithm, config)?.with_autoplay(autoplay).run().await?;
            Ok(())
        },
    }
}
