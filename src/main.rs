mod cli;
mod config;
mod credentials;
mod error;
mod notify;
mod poller;
mod practicum;
mod scheduler;
mod ui;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::BotConfig;
use credentials::Credentials;
use notify::{Notifier, TelegramChannel};
use poller::PollState;
use practicum::PracticumClient;
use scheduler::{PollSettings, Scheduler};
use ui::Console;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Secrets and RUST_LOG may come from .env, so load it before anything reads the environment.
    let dotenv = dotenvy::dotenv();
    init_tracing(cli.verbose);
    if let Err(e) = dotenv
        && !e.not_found()
    {
        warn!(error = %e, "Failed to load .env file");
    }

    let config = BotConfig::load(cli.config.as_deref())?;
    let credentials = Credentials::from_env();

    match cli.resolved_command() {
        Command::Check => {
            let ok = Console::default().print_check(&config, &credentials);
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::Run { from_date } => {
            let scheduler = build_scheduler(&config, require(credentials)?)?;
            let mut state = PollState::new(from_date.unwrap_or_else(now));
            scheduler.run(&mut state, shutdown_signal()).await;
            info!("Bot stopped");
            Ok(ExitCode::SUCCESS)
        }
        Command::Once { from_date } => {
            let scheduler = build_scheduler(&config, require(credentials)?)?;
            let mut state = PollState::new(from_date.unwrap_or_else(now));
            let report = scheduler.run_cycle(&mut state).await;
            Console::default().print_report(&report);
            Ok(if report.outcome.is_failure() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "homework_bot=debug,info"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Missing credentials are the only startup failure that stops the process.
fn require(
    credentials: Result<Credentials, error::MissingCredentials>,
) -> Result<Credentials, error::MissingCredentials> {
    credentials.inspect_err(|e| error!(missing = ?e.missing, "{e}"))
}

fn build_scheduler(
    config: &BotConfig,
    credentials: Credentials,
) -> Result<Scheduler<PracticumClient, TelegramChannel>> {
    let source = PracticumClient::new(
        credentials.practicum_token,
        config.endpoint.clone(),
        config.request_timeout(),
    )
    .context("failed to build Practicum HTTP client")?;
    let channel = TelegramChannel::new(
        credentials.telegram_token,
        config.telegram_api_url.clone(),
        config.request_timeout(),
    )
    .context("failed to build Telegram HTTP client")?;

    Ok(Scheduler::new(
        source,
        Notifier::new(channel, credentials.chat_id),
        PollSettings::from(config),
    ))
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the loop just runs until the process is killed.
        error!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
