mod api;
mod cli_messages;
mod commands;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod export;
mod form;
mod logging;
mod models;
mod pretty;
mod session;
mod stats;
mod ui;
mod workers;

use crate::api::ApiClient;
use crate::config::{Config, ConfigUpdate, get_config_path};
use crate::environment::Environment;
use crate::export::ExportDate;
use crate::form::RideForm;
use crate::logging::{LOG_FILE_NAME, LogSink};
use crate::session::{SessionOptions, run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Base URL of the ride API. Overrides TRANSFLOW_API_URL and the config file.
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the live dashboard
    Start {
        /// Print refreshes to stdout instead of drawing the dashboard
        #[arg(long, default_value_t = false)]
        headless: bool,

        /// Driver whose balance is tracked
        #[arg(long, value_name = "NAME")]
        driver: Option<String>,

        /// Refresh period in milliseconds
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,

        /// Disable the dashboard background color
        #[arg(long, default_value_t = false)]
        no_background_color: bool,

        /// Directory the [E] export key writes to
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,

        /// Date column of exports: today, blank or YYYY-MM-DD
        #[arg(long, value_name = "DATE", default_value = "today")]
        export_date: ExportDate,
    },
    /// Print the rides once
    List {
        /// Only rides paid with this method
        #[arg(long, value_name = "METHOD")]
        payment: Option<String>,
    },
    /// Print a driver's balance
    Balance {
        #[arg(long, value_name = "NAME")]
        driver: String,
    },
    /// Register a new ride
    Create {
        #[arg(long)]
        passenger: String,
        #[arg(long)]
        driver: String,
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        /// Fare in reais, `12.50` or `12,50`
        #[arg(long, allow_hyphen_values = true)]
        fare: String,
    },
    /// Write the rides to a CSV file
    Export {
        /// Output directory
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Date column: today, blank or YYYY-MM-DD
        #[arg(long, value_name = "DATE", default_value = "today")]
        date: ExportDate,
    },
    /// Save defaults to ~/.transflow/config.json (uses the global --api-url too, empty to clear)
    Configure {
        /// Driver tracked by default, empty to clear
        #[arg(long, value_name = "NAME")]
        driver: Option<String>,

        /// Refresh period in milliseconds
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,

        /// Request timeout in seconds, 0 to disable
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
    },
}

/// Reads the config file and picks the backend for every subcommand that talks to it.
fn load_backend(
    config_path: &Path,
    cli_url: Option<&str>,
) -> Result<(Config, Environment), Box<dyn Error>> {
    let config = Config::load_or_default(config_path).inspect_err(|e| {
        print_cmd_error!("Could not read config", "{}: {}", config_path.display(), e)
    })?;
    let environment = Environment::resolve(cli_url, config.api_url.as_deref())?;
    log::info!("Using ride API at {}", environment.api_url());
    Ok((config, environment))
}

fn current_dir_or_dot() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = get_config_path()?;

    // The dashboard owns the terminal.
    let sink = match &args.command {
        Command::Start { headless: false, .. } => {
            LogSink::File(config_path.with_file_name(LOG_FILE_NAME))
        }
        _ => LogSink::Stderr,
    };
    if let Err(e) = logging::init(sink) {
        print_cmd_warn!("Logging disabled", "{}", e);
    }

    let cli_url = args.api_url.as_deref();
    match args.command {
        Command::Start {
            headless,
            driver,
            interval_ms,
            no_background_color,
            export_dir,
            export_date,
        } => {
            let (config, environment) = load_backend(&config_path, cli_url)?;
            let poll_interval = interval_ms
                .map(|ms| Duration::from_millis(ms.max(100)))
                .unwrap_or_else(|| config.poll_interval());
            let options = SessionOptions {
                poll_interval,
                request_timeout: config.request_timeout(),
                balance_driver: driver
                    .or(config.balance_driver.clone())
                    .filter(|name| !name.trim().is_empty()),
                export_dir: export_dir.unwrap_or_else(current_dir_or_dot),
                export_date,
            };
            let session = setup_session(environment, options)?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, !no_background_color).await
            }
        }
        Command::List { payment } => {
            let (config, environment) = load_backend(&config_path, cli_url)?;
            let api = ApiClient::with_timeout(environment, config.request_timeout())?;
            commands::list(&api, payment.as_deref()).await
        }
        Command::Balance { driver } => {
            let (config, environment) = load_backend(&config_path, cli_url)?;
            let api = ApiClient::with_timeout(environment, config.request_timeout())?;
            commands::balance(&api, &driver).await
        }
        Command::Create {
            passenger,
            driver,
            origin,
            destination,
            fare,
        } => {
            let (config, environment) = load_backend(&config_path, cli_url)?;
            let form = RideForm {
                passenger_name: passenger,
                driver_name: driver,
                origin,
                destination,
                fare,
            };
            let api = ApiClient::with_timeout(environment, config.request_timeout())?;
            commands::create(&api, &form).await
        }
        Command::Export { output, date } => {
            let (config, environment) = load_backend(&config_path, cli_url)?;
            let api = ApiClient::with_timeout(environment, config.request_timeout())?;
            let dir = output.unwrap_or_else(current_dir_or_dot);
            commands::export(&api, &dir, date).await.map(|_| ())
        }
        Command::Configure {
            driver,
            interval_ms,
            timeout_secs,
        } => {
            let update = ConfigUpdate {
                api_url: args.api_url.clone(),
                balance_driver: driver,
                poll_interval_ms: interval_ms,
                request_timeout_secs: timeout_secs,
            };
            commands::configure(&config_path, update).map(|_| ())
        }
    }
}
