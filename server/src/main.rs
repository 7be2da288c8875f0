use clap::ArgAction;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use fyyur_trivia_server::cli::database_migration;
use fyyur_trivia_server::cli_error::CliError;
use fyyur_trivia_server::Application;
use log::{error, warn};

fn main() {
    let args = CliArgs::parse();
    let dotenv_result = dotenv();

    let env = env_logger::Env::new().filter_or(
        "RUST_LOG",
        match args.global_opts.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    );
    env_logger::Builder::from_env(env).init();
    if let Err(e) = dotenv_result {
        warn!("Could not read .env file: {}", e);
    }

    let result = match args.command {
        Command::Serve { application } => match application {
            Application::Booking => fyyur_trivia_server::web::serve_booking(),
            Application::Trivia => fyyur_trivia_server::web::serve_trivia(),
        },
        Command::MigrateDatabase { application } => {
            database_migration::run_migrations(application)
                .map_err(|e| CliError::DatabaseMigrationError(e.to_string()))
        }
    };
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

/// Fyyur booking site and trivia API server
#[derive(Debug, Parser)]
#[clap(name = "fyyur-trivia", version)]
pub struct CliArgs {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve one of the web applications
    Serve {
        /// The application to serve
        #[clap(value_enum)]
        application: Application,
    },
    /// Apply pending database schema migrations of one of the applications
    MigrateDatabase {
        /// The application whose database shall be migrated
        #[clap(value_enum)]
        application: Application,
    },
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Verbosity level (can be specified multiple times)
    #[clap(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,
}
