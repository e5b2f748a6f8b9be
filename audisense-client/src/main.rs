//! audisense-client - Terminal client for the AudiSense hearing test API
//!
//! Runs one subcommand, or an interactive shell when none is given. Logs go
//! to stderr; stdout carries only the rendered views.

use std::io::Write;

use anyhow::{bail, Context, Result};
use audisense_client::cli::{execute, resolve_client_config, Args, Command};
use audisense_client::shell::{Shell, ShellOutcome};
use audisense_client::{HearingTestClient, HearingTestsPresenter, HttpDataGateway};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_client_config(&args)?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting AudiSense client (audisense-client) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let gateway = HttpDataGateway::new(&config.api).context("Failed to build HTTP client")?;
    let mut presenter = HearingTestsPresenter::new(HearingTestClient::new(gateway));

    match args.command.unwrap_or(Command::Interactive) {
        Command::Interactive => run_shell(Shell::new(presenter)).await,
        command => {
            let output = execute(&mut presenter, command).await;
            print!("{}", output.text);
            if !output.success {
                bail!("Command did not complete");
            }
            Ok(())
        }
    }
}

async fn run_shell(mut shell: Shell<HttpDataGateway>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut draw = |frame: &str| print!("{}", frame);

    let screen = shell.start(&mut draw).await;
    print!("{}", screen);

    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to write output")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        match shell.execute(&line, &mut draw).await {
            ShellOutcome::Continue(text) => print!("{}", text),
            ShellOutcome::Quit => break,
        }
    }

    info!("Client shutdown complete");
    Ok(())
}
