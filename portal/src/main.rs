//! `gorodok` entry point: load settings, open the local store, run one
//! action and print the resulting view.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use portal::PortalSettings;
use portal::domain::PortalService;
use portal::inbound::cli::{Cli, PortalController, TerminalNotifier, execute, render};
use portal::outbound::storage::LocalStorageStore;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let settings = PortalSettings::load_from_iter([OsString::from("gorodok")])
        .map_err(|err| eyre!("failed to load portal settings: {err}"))?
        .with_data_dir(cli.data_dir.clone());
    init_tracing(settings.json_logs);

    let data_dir = settings.data_dir();
    let store = LocalStorageStore::open(&data_dir)
        .wrap_err_with(|| format!("failed to open data directory {}", data_dir.display()))?;
    info!(path = %data_dir.display(), "portal store opened");

    let notifier = Arc::new(TerminalNotifier::new(io::stdout()));
    let service = PortalService::load(Arc::new(store), notifier)
        .wrap_err("failed to load portal state")?;
    let mut controller = PortalController::new(service);

    let outcome = execute(&mut controller, cli.command.unwrap_or_default());
    let view = render(&controller).wrap_err("failed to render view")?;
    println!();
    print!("{view}");

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(error) = result {
        warn!(%error, "tracing init failed");
    }
}
