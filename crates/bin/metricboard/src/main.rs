//! # metricboard: terminal dashboard client
//!
//! Composition root that wires the adapters into the controllers and runs
//! one command.
//!
//! ## Responsibilities
//! - Parse CLI args and load configuration (file, env vars)
//! - Initialize logging
//! - Construct the HTTP transport and the token store (adapters)
//! - Construct the API client and controllers, injecting adapters via port traits
//! - Print the resulting view and map failures to a non-zero exit
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod cli;
mod config;
mod error;
mod output;

use std::io::{self, Write};

use clap::Parser;
use metricboard_adapter_http_reqwest::ReqwestTransport;
use metricboard_adapter_token_file::FileTokenStore;
use metricboard_app::api_client::ApiClient;
use metricboard_app::config::ClientConfig;
use metricboard_app::controllers::{AuthController, AuthState, DashboardController};
use metricboard_app::view::UserView;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, MetricsArgs};
use crate::config::Config;
use crate::error::CliError;
use crate::output::TerminalRenderer;

type Api = ApiClient<ReqwestTransport, FileTokenStore>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(io::stderr)
        .init();

    // Adapters
    let transport = ReqwestTransport::with_timeout(config.timeout())?;
    let tokens = FileTokenStore::new(config.token_path());
    let client_config = config.client_config();
    let api = ApiClient::new(client_config.api_base_url.clone(), transport, tokens);
    tracing::debug!(base_url = api.base_url(), "api client ready");

    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Login { username, password } => {
            login(&api, &username, &password, &mut stdout).await?;
        }
        Command::Logout => {
            AuthController::new(api, TerminalRenderer).logout()?;
            writeln!(stdout, "Signed out")?;
        }
        Command::Whoami => {
            let user = api.current_user().await?;
            output::print_user(&mut stdout, &UserView::from(&user))?;
        }
        Command::Summary => {
            let summary = api.metrics_summary().await?;
            output::print_summary(&mut stdout, &summary, client_config.locale)?;
        }
        Command::Metrics(args) => {
            metrics(api, &client_config, args, &mut stdout).await?;
        }
        Command::Status => {
            let health = api.health().await?;
            output::print_health(&mut stdout, api.base_url(), &health)?;
        }
    }

    Ok(())
}

async fn login(
    api: &Api,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let auth = AuthController::new(api.clone(), TerminalRenderer);
    match auth.login(username, password).await {
        AuthState::LoggedIn => {
            writeln!(out, "Signed in as {}", username.trim())?;
            Ok(())
        }
        AuthState::LoggedOut(form) => Err(CliError::Login(
            form.message.unwrap_or_else(|| "Login failed".to_string()),
        )),
    }
}

async fn metrics(
    api: Api,
    client_config: &ClientConfig,
    args: MetricsArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let auth = AuthController::new(api.clone(), TerminalRenderer);
    if !auth.initialize().is_logged_in() {
        return Err(CliError::NotSignedIn);
    }

    let dashboard = DashboardController::new(api, TerminalRenderer, client_config);
    dashboard.set_date_filter(args.date);
    dashboard.set_sort_column(args.sort_by);
    dashboard.set_sort_order(args.order);
    dashboard.load_initial_data().await;

    if args.page > 1 && dashboard.state().error_message().is_none() {
        dashboard.go_to_page(args.page).await;
    }

    let state = dashboard.state();
    if let Some(message) = state.error_message() {
        return Err(CliError::Fetch(message.to_string()));
    }
    output::print_dashboard(out, &state)?;
    Ok(())
}
