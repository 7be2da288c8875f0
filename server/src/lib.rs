mod data_store;

pub mod cli;
pub mod cli_error;
mod setup;
pub mod web;

/// The two independently deployed web applications of this crate. Each of them uses its own
/// database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Application {
    /// The Fyyur venue/artist/show booking site
    Booking,
    /// The trivia question JSON API
    Trivia,
}
