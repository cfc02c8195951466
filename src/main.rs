use actix_web::{web, App, HttpServer};
use clap::{value_parser, Arg, ArgAction, Command};
use log::info;
use std::fs::OpenOptions;
use std::io;

use reefd::handlers::configure;
use reefd::models::{AppState, DEFAULT_MAX_TOLERANCE};
use reefd::services::catalog::{Catalog, GroupQuotas};
use reefd::services::sampler::TYPES_PER_SELECTION;
use reefd::services::selector::DEFAULT_MAX_TRIES;

// Function to initialize logging
fn init_logging(log_file: Option<&String>) -> io::Result<()> {
    if let Some(file) = log_file {
        let log_output = OpenOptions::new().create(true).append(true).open(file)?;

        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(log_output)))
            .init();
    } else {
        env_logger::init();
    }
    Ok(())
}

fn cli() -> Command {
    Command::new("reefd")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Ron Straight <straightre@gmail.com>")
        .about("Balanced tile selection service for Shallow Sea")
        .arg(
            Arg::new("listen-host")
                .long("listen-host")
                .num_args(1)
                .default_value("0.0.0.0:5000")
                .help("Specify the listen address (e.g., 0.0.0.0:5000)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .num_args(1)
                .help("Specify a log file path (if omitted, logs to stderr)"),
        )
        .arg(
            Arg::new("max-tries")
                .long("max-tries")
                .num_args(1)
                .value_parser(value_parser!(usize))
                .default_value("5000")
                .help("Draws to attempt before settling for an unbalanced selection"),
        )
        .arg(
            Arg::new("max-tolerance")
                .long("max-tolerance")
                .num_args(1)
                .value_parser(value_parser!(usize))
                .default_value("5")
                .help("Largest tolerance a request may ask for"),
        )
        .arg(
            Arg::new("shared-rng")
                .long("shared-rng")
                .action(ArgAction::SetTrue)
                .help("Serve unseeded requests from the shared thread generator instead of a fresh seed"),
        )
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let matches = cli().get_matches();

    let listen_host = matches
        .get_one::<String>("listen-host")
        .cloned()
        .unwrap_or_else(|| "0.0.0.0:5000".to_string());
    let log_file = matches.get_one::<String>("log-file");
    let max_tries = matches
        .get_one::<usize>("max-tries")
        .copied()
        .unwrap_or(DEFAULT_MAX_TRIES)
        .max(1);
    let max_tolerance = matches
        .get_one::<usize>("max-tolerance")
        .copied()
        .unwrap_or(DEFAULT_MAX_TOLERANCE);
    let shared_rng = matches.get_flag("shared-rng");

    init_logging(log_file)?;

    let quotas = GroupQuotas::standard();
    for (name, catalog) in [("base", Catalog::base()), ("expansion", Catalog::expansion())] {
        info!("Loaded {} catalog with {} tile types", name, catalog.len());
    }
    info!(
        "Quotas draw {} types (anchor group {}) trimmed to {}, up to {} tries",
        quotas.total(),
        quotas.anchor(),
        TYPES_PER_SELECTION,
        max_tries
    );

    let state = AppState {
        quotas,
        max_tries,
        max_tolerance,
        shared_rng,
    };
    let shared_state = web::Data::new(state);

    info!("Listening on {}", listen_host);
    HttpServer::new(move || {
        App::new()
            .app_data(shared_state.clone())
            .configure(configure)
    })
    .bind(&listen_host)?
    .run()
    .await
}
