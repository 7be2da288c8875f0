use super::{
    models, schema, ArtistId, BookingStore, BookingStoreFacade, CategoryId, QuestionFilter,
    QuestionId, ShowFilter, ShowId, StoreError, TriviaStore, TriviaStoreFacade, VenueId,
};
use diesel::dsl::exists;
use diesel::expression::AsExpression;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;

#[derive(Clone)]
pub struct PgDataStore {
    pool: diesel::r2d2::Pool<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStore {
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        let connection_manager = diesel::r2d2::ConnectionManager::<PgConnection>::new(database_url);
        Ok(Self {
            pool: diesel::r2d2::Pool::builder()
                .test_on_check_out(true)
                .min_idle(Some(2))
                .build(connection_manager)?,
        })
    }
}

impl BookingStore for PgDataStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn BookingStoreFacade + 'a>, StoreError> {
        Ok(Box::new(PgDataStoreFacade::with_pooled_connection(
            self.pool.get()?,
        )))
    }
}

impl TriviaStore for PgDataStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn TriviaStoreFacade + 'a>, StoreError> {
        Ok(Box::new(PgDataStoreFacade::with_pooled_connection(
            self.pool.get()?,
        )))
    }
}

pub struct PgDataStoreFacade {
    connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStoreFacade {
    pub fn with_pooled_connection(
        connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
    ) -> Self {
        Self { connection }
    }
}

impl BookingStoreFacade for PgDataStoreFacade {
    fn get_venues(&mut self) -> Result<Vec<models::Venue>, StoreError> {
        use schema::venues::dsl::*;

        venues
            .order_by((state.asc(), city.asc(), name.asc(), id.asc()))
            .select(models::Venue::as_select())
            .load::<models::Venue>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn search_venues(&mut self, search_term: &str) -> Result<Vec<models::Venue>, StoreError> {
        use schema::venues::dsl::*;

        venues
            .filter(name.ilike(substring_pattern(search_term)))
            .order_by((name.asc(), id.asc()))
            .select(models::Venue::as_select())
            .load::<models::Venue>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::Venue, StoreError> {
        use schema::venues::dsl::*;

        venues
            .filter(id.eq(venue_id))
            .select(models::Venue::as_select())
            .first::<models::Venue>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_venue(&mut self, venue: models::NewVenue) -> Result<VenueId, StoreError> {
        use schema::venues::dsl::*;

        Ok(diesel::insert_into(venues)
            .values(&venue)
            .returning(id)
            .get_result::<VenueId>(&mut self.connection)?)
    }

    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::NewVenue,
    ) -> Result<(), StoreError> {
        use schema::venues::dsl::*;

        let result = diesel::update(venues)
            .filter(id.eq(venue_id))
            .set(&venue)
            .execute(&mut self.connection)?;
        if result == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError> {
        use schema::venues::dsl::*;

        self.connection.transaction(|connection| {
            let has_shows = diesel::select(exists(
                schema::shows::table.filter(schema::shows::venue_id.eq(venue_id)),
            ))
            .get_result::<bool>(connection)?;
            if has_shows {
                return Err(StoreError::InvalidInputData(
                    "Venue still has shows and cannot be deleted.".to_owned(),
                ));
            }
            let count = diesel::delete(venues.filter(id.eq(venue_id))).execute(connection)?;
            if count == 0 {
                return Err(StoreError::NotExisting);
            }
            Ok(())
        })
    }

    fn get_artists(&mut self) -> Result<Vec<models::Artist>, StoreError> {
        use schema::artists::dsl::*;

        artists
            .order_by((name.asc(), id.asc()))
            .select(models::Artist::as_select())
            .load::<models::Artist>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn search_artists(&mut self, search_term: &str) -> Result<Vec<models::Artist>, StoreError> {
        use schema::artists::dsl::*;

        artists
            .filter(name.ilike(substring_pattern(search_term)))
            .order_by((name.asc(), id.asc()))
            .select(models::Artist::as_select())
            .load::<models::Artist>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::Artist, StoreError> {
        use schema::artists::dsl::*;

        artists
            .filter(id.eq(artist_id))
            .select(models::Artist::as_select())
            .first::<models::Artist>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_artist(&mut self, artist: models::NewArtist) -> Result<ArtistId, StoreError> {
        use schema::artists::dsl::*;

        Ok(diesel::insert_into(artists)
            .values(&artist)
            .returning(id)
            .get_result::<ArtistId>(&mut self.connection)?)
    }

    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::NewArtist,
    ) -> Result<(), StoreError> {
        use schema::artists::dsl::*;

        let result = diesel::update(artists)
            .filter(id.eq(artist_id))
            .set(&artist)
            .execute(&mut self.connection)?;
        if result == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn delete_artist(&mut self, artist_id: ArtistId) -> Result<(), StoreError> {
        use schema::artists::dsl::*;

        self.connection.transaction(|connection| {
            let has_shows = diesel::select(exists(
                schema::shows::table.filter(schema::shows::artist_id.eq(artist_id)),
            ))
            .get_result::<bool>(connection)?;
            if has_shows {
                return Err(StoreError::InvalidInputData(
                    "Artist still has shows and cannot be deleted.".to_owned(),
                ));
            }
            let count = diesel::delete(artists.filter(id.eq(artist_id))).execute(connection)?;
            if count == 0 {
                return Err(StoreError::NotExisting);
            }
            Ok(())
        })
    }

    fn get_shows(&mut self, filter: ShowFilter) -> Result<Vec<models::FullShow>, StoreError> {
        use schema::{artists, shows, venues};

        self.connection.transaction(|connection| {
            let the_shows = shows::table
                .filter(show_filter_to_sql(filter))
                .order_by((shows::start_time.asc(), shows::id.asc()))
                .select(models::Show::as_select())
                .load::<models::Show>(connection)?;

            let mut display_data: HashMap<ShowId, ShowDisplayData> = shows::table
                .inner_join(artists::table)
                .inner_join(venues::table)
                .filter(shows::id.eq_any(the_shows.iter().map(|s| s.id).collect::<Vec<_>>()))
                .select((
                    shows::id,
                    artists::name,
                    artists::image_link,
                    venues::name,
                    venues::image_link,
                ))
                .load::<(ShowId, String, Option<String>, String, Option<String>)>(connection)?
                .into_iter()
                .map(|(show_id, artist_name, artist_image, venue_name, venue_image)| {
                    (show_id, (artist_name, artist_image, venue_name, venue_image))
                })
                .collect();

            the_shows
                .into_iter()
                .map(|show| {
                    let (artist_name, artist_image_link, venue_name, venue_image_link) =
                        display_data.remove(&show.id).ok_or_else(|| {
                            StoreError::InvalidDataInDatabase(format!(
                                "Show {} references a missing artist or venue",
                                show.id
                            ))
                        })?;
                    Ok(models::FullShow {
                        show,
                        artist_name,
                        artist_image_link,
                        venue_name,
                        venue_image_link,
                    })
                })
                .collect()
        })
    }

    fn create_show(&mut self, show: models::NewShow) -> Result<ShowId, StoreError> {
        use schema::shows::dsl::*;

        Ok(diesel::insert_into(shows)
            .values(&show)
            .returning(id)
            .get_result::<ShowId>(&mut self.connection)?)
    }
}

impl TriviaStoreFacade for PgDataStoreFacade {
    fn get_categories(&mut self) -> Result<Vec<models::Category>, StoreError> {
        use schema::categories::dsl::*;

        categories
            .order_by(id.asc())
            .select(models::Category::as_select())
            .load::<models::Category>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_category(&mut self, category_id: CategoryId) -> Result<models::Category, StoreError> {
        use schema::categories::dsl::*;

        categories
            .filter(id.eq(category_id))
            .select(models::Category::as_select())
            .first::<models::Category>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_questions(
        &mut self,
        filter: QuestionFilter,
    ) -> Result<Vec<models::Question>, StoreError> {
        use schema::questions::dsl::*;

        questions
            .filter(question_filter_to_sql(filter))
            .order_by(id.asc())
            .select(models::Question::as_select())
            .load::<models::Question>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_question(
        &mut self,
        new_question: models::NewQuestion,
    ) -> Result<QuestionId, StoreError> {
        use schema::questions::dsl::*;

        Ok(diesel::insert_into(questions)
            .values(&new_question)
            .returning(id)
            .get_result::<QuestionId>(&mut self.connection)?)
    }

    fn delete_question(
        &mut self,
        question_id: QuestionId,
    ) -> Result<Vec<models::Question>, StoreError> {
        use schema::questions::dsl::*;

        self.connection.transaction(|connection| {
            let count = diesel::delete(questions.filter(id.eq(question_id))).execute(connection)?;
            if count == 0 {
                return Err(StoreError::NotExisting);
            }
            Ok(questions
                .order_by(id.asc())
                .select(models::Question::as_select())
                .load::<models::Question>(connection)?)
        })
    }
}

/// Name and image link of the artist, followed by name and image link of the venue of a show
type ShowDisplayData = (String, Option<String>, String, Option<String>);

type BoxedBoolExpression<'a, Table> =
    Box<dyn BoxableExpression<Table, diesel::pg::Pg, SqlType = diesel::sql_types::Bool> + 'a>;

fn show_filter_to_sql<'a>(filter: ShowFilter) -> BoxedBoolExpression<'a, schema::shows::table> {
    use schema::shows::dsl::*;

    let mut expression: BoxedBoolExpression<'a, schema::shows::table> =
        Box::new(diesel::dsl::sql::<diesel::sql_types::Bool>("TRUE"));
    if let Some(the_venue) = filter.venue {
        expression = Box::new(expression.as_expression().and(venue_id.eq(the_venue)));
    }
    if let Some(the_artist) = filter.artist {
        expression = Box::new(expression.as_expression().and(artist_id.eq(the_artist)));
    }
    if let Some(after) = filter.after {
        expression = Box::new(expression.as_expression().and(start_time.gt(after)));
    }
    expression
}

fn question_filter_to_sql<'a>(
    filter: QuestionFilter,
) -> BoxedBoolExpression<'a, schema::questions::table> {
    use schema::questions::dsl::*;

    let mut expression: BoxedBoolExpression<'a, schema::questions::table> =
        Box::new(diesel::dsl::sql::<diesel::sql_types::Bool>("TRUE"));
    if let Some(the_category) = filter.category {
        expression = Box::new(expression.as_expression().and(category.eq(the_category)));
    }
    if let Some(term) = filter.search_term {
        expression = Box::new(
            expression
                .as_expression()
                .and(question.ilike(substring_pattern(&term))),
        );
    }
    expression
}

/// Build an (I)LIKE pattern matching any string containing the given term literally
///
/// Postgres uses the backslash as default escape character in LIKE patterns.
fn substring_pattern(term: &str) -> String {
    let mut result = String::with_capacity(term.len() + 2);
    result.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            result.push('\\');
        }
        result.push(c);
    }
    result.push('%');
    result
}

/// Get a human-readable description of the consistency expectation that is checked by a specific
/// constraint in our Postgres database schemas by the constraint's name.
///
/// These are visible to the user when creating entities inconsistently via the web forms or the
/// JSON API.
///
/// Returns None, when no human-readable description is present of the given constraint name. This
/// may be the case when we don't expect this constraint to be violated by a user interaction.
pub fn description_for_postgres_constraint(constraint_name: &str) -> Option<&'static str> {
    match constraint_name {
        "shows_artist_id_fkey" => Some("Show's artist must reference an existing artist and artists with shows cannot be deleted."),
        "shows_venue_id_fkey" => Some("Show's venue must reference an existing venue and venues with shows cannot be deleted."),
        "questions_category_fkey" => Some("Question's category must reference an existing category."),
        "questions_difficulty_range" => Some("Question's difficulty must be between 1 and 5."),
        _ => None,
    }
}
