//! CLI entry point for duke.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use config::Config;
use duke_store::FileStore;
use session::Session;

mod config;
mod session;
mod ui;

/// Keep track of todos, deadlines and events from the terminal.
#[derive(Parser, Debug)]
#[command(
    name = "duke",
    version,
    about = "duke: a line-driven task tracker for todos, deadlines and events"
)]
struct Cli {
    /// Configuration file (defaults to `<config dir>/duke/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Task data file, overriding the configured one.
    #[arg(long)]
    data_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let Cli { config, data_file } = Cli::parse();
    install_tracing();

    let config = Config::load(config.as_deref())?;
    let data_file = match data_file {
        Some(path) => path,
        None => config.data_file()?,
    };
    info!(path = %data_file.display(), "Using data file");

    let mut session = Session::start(FileStore::new(data_file))?;
    session.run(io::stdin().lock(), io::stdout().lock(), config.greeting)
}

fn install_tracing() {
    // Defaults to WARN unless RUST_LOG is set. Stdout carries the conversation.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_without_flags() {
        let cli = Cli::parse_from(["duke"]);
        assert!(cli.config.is_none());
        assert!(cli.data_file.is_none());
    }

    #[test]
    fn parse_path_flags() {
        let cli = Cli::parse_from([
            "duke",
            "--config",
            "/etc/duke.toml",
            "--data-file",
            "./tasks.txt",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/duke.toml")));
        assert_eq!(cli.data_file, Some(PathBuf::from("./tasks.txt")));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["duke", "--verbose"]).is_err());
    }
}
