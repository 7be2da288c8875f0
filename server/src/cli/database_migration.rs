//! This module uses the embedded Diesel migration data to provide functions for checking the
//! database migration status and migrating the database schema to the current state.
//!
//! Both applications have their own database and thus their own set of migrations. The functions
//! provided here are meant to be used directly from the command line interface implementation.
use crate::cli_error::CliError;
use crate::setup::get_database_url_from_env;
use crate::Application;
use diesel::migration::Migration;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::fmt::{Debug, Display, Formatter};

const BOOKING_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/booking");
const TRIVIA_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/trivia");

/// Migrate the database schema of the given application to the latest known migration for the
/// current application version.
///
/// The database connection URL is taken from the environment variable, using
/// [get_database_url_from_env]. Information about the migration process is printed to stdout.
pub fn run_migrations(
    application: Application,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let mut connection = diesel::pg::PgConnection::establish(&get_database_url_from_env()?)?;
    let mut connection =
        diesel_migrations::HarnessWithOutput::new(&mut connection, std::io::stdout());
    match application {
        Application::Booking => connection.run_pending_migrations(BOOKING_MIGRATIONS)?,
        Application::Trivia => connection.run_pending_migrations(TRIVIA_MIGRATIONS)?,
    };

    Ok(())
}

#[derive(Debug)]
pub struct MigrationsStateOutdatedError {
    pub missing_migrations: Vec<String>,
}

impl Display for MigrationsStateOutdatedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Database needs to be migrated. Pending migrations: {}",
            self.missing_migrations.join(", ")
        ))
    }
}

impl std::error::Error for MigrationsStateOutdatedError {}

/// Check if the database schema of the given application has been migrated to the latest known
/// migration. If not, return an error, describing the missing migrations.
///
/// The database connection URL is taken from the environment variable, using
/// [get_database_url_from_env].
pub fn check_migration_state(
    application: Application,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let mut connection = diesel::pg::PgConnection::establish(&get_database_url_from_env()?)?;
    let pending_migrations = match application {
        Application::Booking => connection.pending_migrations(BOOKING_MIGRATIONS)?,
        Application::Trivia => connection.pending_migrations(TRIVIA_MIGRATIONS)?,
    };
    if !pending_migrations.is_empty() {
        return Err(Box::new(MigrationsStateOutdatedError {
            missing_migrations: pending_migrations
                .iter()
                .map(|m| m.name().to_string())
                .collect(),
        }));
    }
    Ok(())
}

/// Like [check_migration_state], but translate the result into a [CliError], for refusing to
/// start the web server on an outdated database schema.
pub fn ensure_migration_state(application: Application) -> Result<(), CliError> {
    check_migration_state(application).map_err(
        |e| match e.downcast::<MigrationsStateOutdatedError>() {
            Ok(e) => CliError::DatabaseMigrationRequired {
                missing_migrations: e.missing_migrations,
            },
            Err(e) => CliError::CouldNotConnectToDatabase(e.to_string()),
        },
    )
}
