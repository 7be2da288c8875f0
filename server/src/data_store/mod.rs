//! The backend part of the backend: the database interface
//!
//! The entry points to this module are the functions [get_booking_store_from_env] and
//! [get_trivia_store_from_env], which return an object implementing the [BookingStore] or the
//! [TriviaStore] trait, respectively. These objects can be shared between threads in a global
//! application state and be used to create facade instances ([BookingStoreFacade],
//! [TriviaStoreFacade]) for interaction with the database. The facades provide a CRUD-like
//! interface, using the data models from the [models] module.
//!
//! The primary implementation ([postgres::PgDataStore]) wraps a PostgreSQL connection pool and
//! implements both store traits. Its facade objects ([postgres::PgDataStoreFacade]) hold one
//! pooled connection each, which is returned to the pool when the facade is dropped. They use the
//! Diesel query DSL for implementing the database interaction.
//!
//! There is also a mock implementation for unittests.

use crate::cli_error::CliError;
use crate::setup;
use std::fmt::Debug;

pub mod models;
mod postgres;
mod schema;

/// Get a [BookingStore] instance, according the "DATABASE_URL" environment variable.
///
/// The DATABASE_URL must be a PosgreSQL connection url, following the schema
/// "postgres://{user}:{password}@{host}/{database}".
pub fn get_booking_store_from_env() -> Result<impl BookingStore, CliError> {
    Ok(postgres::PgDataStore::new(&setup::get_database_url_from_env()?)?)
}

/// Get a [TriviaStore] instance, according the "DATABASE_URL" environment variable.
///
/// See [get_booking_store_from_env].
pub fn get_trivia_store_from_env() -> Result<impl TriviaStore, CliError> {
    Ok(postgres::PgDataStore::new(&setup::get_database_url_from_env()?)?)
}

pub type VenueId = i32;
pub type ArtistId = i32;
pub type ShowId = i32;
pub type CategoryId = i32;
pub type QuestionId = i32;

pub trait BookingStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn BookingStoreFacade + 'a>, StoreError>;
}

pub trait TriviaStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn TriviaStoreFacade + 'a>, StoreError>;
}

pub trait BookingStoreFacade {
    /// Get all venues, ordered by (state, city, name)
    fn get_venues(&mut self) -> Result<Vec<models::Venue>, StoreError>;
    /// Get all venues whose name contains the given term (case-insensitive), ordered by name
    ///
    /// An empty search term matches all venues.
    fn search_venues(&mut self, search_term: &str) -> Result<Vec<models::Venue>, StoreError>;
    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::Venue, StoreError>;
    fn create_venue(&mut self, venue: models::NewVenue) -> Result<VenueId, StoreError>;
    /// Replace all fields of the existing venue with the given id
    ///
    /// Returns `Err(StoreError::NotExisting)` if there is no such venue.
    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::NewVenue,
    ) -> Result<(), StoreError>;
    /// Delete the venue with the given id
    ///
    /// Venues which are still referenced by shows are not deleted. In this case,
    /// `Err(StoreError::InvalidInputData)` is returned.
    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError>;

    /// Get all artists, ordered by name
    fn get_artists(&mut self) -> Result<Vec<models::Artist>, StoreError>;
    /// Get all artists whose name contains the given term (case-insensitive), ordered by name
    fn search_artists(&mut self, search_term: &str) -> Result<Vec<models::Artist>, StoreError>;
    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::Artist, StoreError>;
    fn create_artist(&mut self, artist: models::NewArtist) -> Result<ArtistId, StoreError>;
    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::NewArtist,
    ) -> Result<(), StoreError>;
    /// Delete the artist with the given id. Same semantics as [Self::delete_venue].
    fn delete_artist(&mut self, artist_id: ArtistId) -> Result<(), StoreError>;

    /// Get a filtered list of shows with their artists' and venues' display data
    ///
    /// Shows are returned in chronological order, i.e. sorted by (start_time, id)
    fn get_shows(&mut self, filter: ShowFilter) -> Result<Vec<models::FullShow>, StoreError>;
    /// Create a new show
    ///
    /// Fails with `StoreError::InvalidInputData` if the referenced artist or venue does not exist.
    fn create_show(&mut self, show: models::NewShow) -> Result<ShowId, StoreError>;
}

pub trait TriviaStoreFacade {
    /// Get all categories, ordered by id
    fn get_categories(&mut self) -> Result<Vec<models::Category>, StoreError>;
    fn get_category(&mut self, category_id: CategoryId) -> Result<models::Category, StoreError>;

    /// Get a filtered list of questions, ordered by id
    fn get_questions(
        &mut self,
        filter: QuestionFilter,
    ) -> Result<Vec<models::Question>, StoreError>;
    /// Create a new question
    ///
    /// Fails with `StoreError::InvalidInputData` if the category does not exist or the difficulty
    /// is out of range.
    fn create_question(&mut self, question: models::NewQuestion)
        -> Result<QuestionId, StoreError>;
    /// Delete a question and return all remaining questions (ordered by id) within the same
    /// transaction
    ///
    /// Fails with `StoreError::NotExisting` if there is no question with the given id. In case of
    /// any error, nothing is deleted.
    fn delete_question(
        &mut self,
        question_id: QuestionId,
    ) -> Result<Vec<models::Question>, StoreError>;
}

/// Filter options for retrieving shows from the store via [BookingStoreFacade::get_shows]
///
/// Can be constructed through the [ShowFilterBuilder]
#[derive(Default, Debug, Clone)]
pub struct ShowFilter {
    /// Filter for shows taking place at the given venue
    pub venue: Option<VenueId>,
    /// Filter for shows of the given artist
    pub artist: Option<ArtistId>,
    /// Filter for shows starting strictly after the given point in time
    pub after: Option<chrono::DateTime<chrono::Utc>>,
}

impl ShowFilter {
    /// Checks if a given show matches the filter
    ///
    /// Usually, filtering should be done by the database. This function can be used for separate
    /// checks of individual shows in software.
    pub fn matches(&self, show: &models::Show) -> bool {
        if let Some(venue) = self.venue {
            if show.venue_id != venue {
                return false;
            }
        }
        if let Some(artist) = self.artist {
            if show.artist_id != artist {
                return false;
            }
        }
        if let Some(after) = self.after {
            if show.start_time <= after {
                return false;
            }
        }
        true
    }
}

/// Builder for constructing [ShowFilter] objects
#[derive(Default)]
pub struct ShowFilterBuilder {
    result: ShowFilter,
}

impl ShowFilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add filter to only include shows at the given venue
    pub fn at_venue(mut self, venue_id: VenueId) -> Self {
        self.result.venue = Some(venue_id);
        self
    }

    /// Add filter to only include shows of the given artist
    pub fn of_artist(mut self, artist_id: ArtistId) -> Self {
        self.result.artist = Some(artist_id);
        self
    }

    /// Add filter to only include shows that start after the given point in time
    pub fn after(mut self, after: chrono::DateTime<chrono::Utc>) -> Self {
        self.result.after = Some(after);
        self
    }

    pub fn build(self) -> ShowFilter {
        self.result
    }
}

/// Filter options for retrieving questions via [TriviaStoreFacade::get_questions]
#[derive(Default, Debug, Clone)]
pub struct QuestionFilter {
    /// Filter for questions of the given category
    pub category: Option<CategoryId>,
    /// Filter for questions whose text contains the given term (case-insensitive). An empty
    /// term matches all questions.
    pub search_term: Option<String>,
}

impl QuestionFilter {
    /// Checks if a given question matches the filter, in software
    pub fn matches(&self, question: &models::Question) -> bool {
        if let Some(category) = self.category {
            if question.category != category {
                return false;
            }
        }
        if let Some(term) = &self.search_term {
            if !question
                .question
                .to_lowercase()
                .contains(&term.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Builder for constructing [QuestionFilter] objects
#[derive(Default)]
pub struct QuestionFilterBuilder {
    result: QuestionFilter,
}

impl QuestionFilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.result.category = Some(category_id);
        self
    }

    pub fn containing(mut self, search_term: &str) -> Self {
        self.result.search_term = Some(search_term.to_owned());
        self
    }

    pub fn build(self) -> QuestionFilter {
        self.result
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// Connection the database failed. See string description for details.
    ConnectionError(String),
    /// The query could not be executed because of some error not covered by the other members (see
    /// string description)
    QueryError(diesel::result::Error),
    /// Database transaction could not be commited due to a conflicting concurrent transaction
    TransactionConflict,
    /// The requested entity does not exist
    NotExisting,
    /// The entity could not be created because it already exists.
    ConflictEntityExists,
    /// The provided data is invalid, i.e. it does not match the expected ranges or violates a
    /// SQL constraint. See string description for details.
    InvalidInputData(String),
    /// Some data queried from the database could not be deserialized. See string description for
    /// details.
    InvalidDataInDatabase(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::NotFound => Self::NotExisting,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => Self::ConflictEntityExists,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::SerializationFailure,
                _,
            ) => Self::TransactionConflict,
            diesel::result::Error::DatabaseError(
                e @ diesel::result::DatabaseErrorKind::ForeignKeyViolation
                | e @ diesel::result::DatabaseErrorKind::CheckViolation,
                info,
            ) => Self::InvalidInputData(
                info.constraint_name()
                    .and_then(postgres::description_for_postgres_constraint)
                    .map(|description| description.to_owned())
                    .unwrap_or_else(|| format!("{:?}: {}", e, info.message())),
            ),
            diesel::result::Error::SerializationError(e) => Self::InvalidInputData(e.to_string()),
            diesel::result::Error::DeserializationError(e) => {
                Self::InvalidDataInDatabase(e.to_string())
            }
            _ => Self::QueryError(error),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(error: r2d2::Error) -> Self {
        Self::ConnectionError(error.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Error connecting to database: {}", e),
            Self::QueryError(e) => write!(f, "Error while executing database query: {}", e),
            Self::TransactionConflict => f.write_str("Database transaction could not be commited due to a conflicting concurrent transaction"),
            Self::NotExisting => f.write_str("Database record does not exist."),
            Self::ConflictEntityExists => f.write_str("Database record exists already."),
            Self::InvalidInputData(e) => {
                write!(f, "Data to be stored in database is not valid: {}", e)
            }
            StoreError::InvalidDataInDatabase(e) => {
                write!(f, "Data queried from database could not be deserialized: {}", e)
            }
        }
    }
}

impl std::error::Error for StoreError {}
