//! CLI entrypoint for LearnLoop
//!
//! Serves the question form over HTTP by default, or answers questions on the command line.

mod cli;
mod config;
mod logging;
mod page;
mod repl;
mod server;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::{AppConfig, ConfigOverrides};
use learnloop_tutor::Tutor;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let overrides = match &cli.command {
        Some(Command::Serve { host, port }) => ConfigOverrides { host: host.clone(), port: *port },
        _ => ConfigOverrides::default(),
    };
    let config = AppConfig::load(cli.config.as_deref(), overrides)?;
    info!(?config, "loaded configuration");

    let tutor = Tutor::new(config.tutor());
    match cli.command {
        None | Some(Command::Serve { .. }) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start the async runtime")?;
            runtime.block_on(server::serve(&config))?;
        },
        Some(Command::Ask { question, level, concise }) => {
            println!("{}", repl::answer(&tutor, &question, level, !concise));
        },
        Some(Command::Repl { level, concise }) => {
            repl::run(&tutor, level, !concise)?;
        },
    }

    Ok(())
}
