use crate::cli::database_migration::ensure_migration_state;
use crate::cli_error::CliError;
use crate::data_store::{get_booking_store_from_env, get_trivia_store_from_env};
use crate::setup::{get_listen_address_from_env, get_listen_port_from_env, get_time_zone_from_env};
use crate::Application;
use actix_web::middleware::from_fn;
use actix_web::{middleware, web, App, HttpServer};
use log::info;
use std::sync::Arc;

mod api;
mod http_error_logging;
mod ui;
mod util;

/// Run the server-rendered booking site until the process is terminated
pub fn serve_booking() -> Result<(), CliError> {
    ensure_migration_state(Application::Booking)?;
    let state = BookingAppState::new()?;
    let listen_address = (get_listen_address_from_env()?, get_listen_port_from_env()?);
    info!(
        "Serving booking site on {}:{}",
        listen_address.0, listen_address.1
    );
    actix_web::rt::System::new()
        .block_on(
            HttpServer::new(move || {
                App::new()
                    .configure(ui::configure_app)
                    .app_data(web::Data::new(state.clone()))
                    .wrap(from_fn(http_error_logging::error_logging_middleware))
                    .wrap(middleware::Compress::default())
            })
            .bind(listen_address)
            .map_err(CliError::BindError)?
            .run(),
        )
        .map_err(CliError::ServerError)
}

/// Run the trivia JSON API until the process is terminated
pub fn serve_trivia() -> Result<(), CliError> {
    ensure_migration_state(Application::Trivia)?;
    let state = TriviaAppState::new()?;
    let listen_address = (get_listen_address_from_env()?, get_listen_port_from_env()?);
    info!(
        "Serving trivia API on {}:{}",
        listen_address.0, listen_address.1
    );
    actix_web::rt::System::new()
        .block_on(
            HttpServer::new(move || {
                App::new()
                    .configure(api::configure_app)
                    .app_data(web::Data::new(state.clone()))
                    .wrap(api::cors_headers())
                    .wrap(from_fn(http_error_logging::error_logging_middleware))
            })
            .bind(listen_address)
            .map_err(CliError::BindError)?
            .run(),
        )
        .map_err(CliError::ServerError)
}

#[derive(Clone)]
pub struct BookingAppState {
    store: Arc<dyn crate::data_store::BookingStore>,
    /// Time zone for displaying show times and interpreting the times entered in forms
    time_zone: chrono_tz::Tz,
}

impl BookingAppState {
    pub fn new() -> Result<Self, CliError> {
        Ok(Self {
            store: Arc::new(get_booking_store_from_env()?),
            time_zone: get_time_zone_from_env()?,
        })
    }
}

#[derive(Clone)]
pub struct TriviaAppState {
    store: Arc<dyn crate::data_store::TriviaStore>,
}

impl TriviaAppState {
    pub fn new() -> Result<Self, CliError> {
        Ok(Self {
            store: Arc::new(get_trivia_store_from_env()?),
        })
    }
}
