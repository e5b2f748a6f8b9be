//! Command-line surface of the terminal client

use std::path::PathBuf;

use anyhow::{Context, Result};
use audisense_common::config::{
    load_toml_config, resolve_config_path, ClientConfig, CLIENT_CONFIG_FILE,
};
use audisense_common::time::parse_iso8601;
use audisense_common::HearingTestId;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::gateway::DataGateway;
use crate::presentation::{FormAction, HearingTestsPresenter};
use crate::render::{render_detail, render_form, render_list};

/// Command-line arguments for audisense-client
#[derive(Parser, Debug)]
#[command(name = "audisense-client")]
#[command(about = "Terminal client for the AudiSense hearing test API")]
#[command(version)]
pub struct Args {
    /// API base URL
    #[arg(long, env = "AUDISENSE_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "AUDISENSE_API_TIMEOUT")]
    pub timeout: Option<u64>,

    /// TOML config file (defaults to <config dir>/audisense/audisense-client.toml)
    #[arg(short, long, env = "AUDISENSE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List hearing tests, newest first
    List,
    /// Show one hearing test
    Show { id: HearingTestId },
    /// Record a new hearing test
    Create {
        #[arg(long)]
        tester: String,
        /// ISO-8601 date-time; defaults to now
        #[arg(long, value_parser = parse_date)]
        date: Option<DateTime<Utc>>,
        #[arg(long)]
        result: String,
    },
    /// Change fields of an existing hearing test
    Edit {
        id: HearingTestId,
        #[arg(long)]
        tester: Option<String>,
        #[arg(long, value_parser = parse_date)]
        date: Option<DateTime<Utc>>,
        #[arg(long)]
        result: Option<String>,
    },
    /// Delete a hearing test
    Delete { id: HearingTestId },
    /// Line-oriented shell (the default)
    Interactive,
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_iso8601(raw).map_err(|e| format!("'{}' is not an ISO-8601 date-time: {}", raw, e))
}

/// Merge the TOML file with CLI/ENV overrides and validate the result
pub fn resolve_client_config(args: &Args) -> Result<ClientConfig> {
    let config_path = resolve_config_path(args.config.as_deref(), CLIENT_CONFIG_FILE);
    let mut config: ClientConfig =
        load_toml_config(config_path.as_deref()).context("Failed to load client configuration")?;

    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.api.timeout_seconds = timeout;
    }
    config
        .api
        .validate()
        .context("Invalid API settings")?;
    Ok(config)
}

/// Text to print and whether the command achieved what was asked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn new(text: String, success: bool) -> Self {
        Self { text, success }
    }
}

/// Run one non-interactive command against the presenter
///
/// `Interactive` is handled by the caller and reported here as a no-op.
pub async fn execute<G: DataGateway>(
    presenter: &mut HearingTestsPresenter<G>,
    command: Command,
) -> CommandOutput {
    match command {
        Command::List => {
            let loaded = presenter.show_list().await;
            let mut text = render_list(presenter.items(), presenter.now());
            text.push_str(&format!("Status: {}\n", presenter.status()));
            CommandOutput::new(text, loaded)
        }
        Command::Show { id } => match presenter.client().get(id).await {
            Some(view) => CommandOutput::new(render_detail(&view), true),
            None => CommandOutput::new(format!("Hearing test {} not found\n", id), false),
        },
        Command::Create {
            tester,
            date,
            result,
        } => {
            presenter.begin_create();
            let form = presenter.form_mut();
            form.tester_name = tester;
            if let Some(date) = date {
                form.date_conducted = date;
            }
            form.result = result;
            save(presenter).await
        }
        Command::Edit {
            id,
            tester,
            date,
            result,
        } => {
            if !presenter.show_list().await || !presenter.begin_edit(id) {
                return status_output(presenter, false);
            }
            let form = presenter.form_mut();
            if let Some(tester) = tester {
                form.tester_name = tester;
            }
            if let Some(date) = date {
                form.date_conducted = date;
            }
            if let Some(result) = result {
                form.result = result;
            }
            save(presenter).await
        }
        Command::Delete { id } => {
            if !presenter.show_list().await {
                return status_output(presenter, false);
            }
            let deleted = presenter.delete(id).await;
            status_output(presenter, deleted)
        }
        Command::Interactive => CommandOutput::new(String::new(), true),
    }
}

async fn save<G: DataGateway>(presenter: &mut HearingTestsPresenter<G>) -> CommandOutput {
    let form = render_form(presenter.form());
    if presenter.submit(FormAction::Save).await {
        status_output(presenter, true)
    } else {
        let status = format!("{}Status: {}\n", form, presenter.status());
        CommandOutput::new(status, false)
    }
}

fn status_output<G: DataGateway>(
    presenter: &HearingTestsPresenter<G>,
    success: bool,
) -> CommandOutput {
    CommandOutput::new(format!("Status: {}\n", presenter.status()), success)
}
