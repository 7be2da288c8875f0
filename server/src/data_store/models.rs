use crate::data_store::{ArtistId, CategoryId, QuestionId, ShowId, VenueId};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name=super::schema::venues)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Data of a venue to be created or to replace all fields of an existing venue
#[derive(Clone, Debug, Insertable, AsChangeset)]
#[diesel(table_name=super::schema::venues)]
#[diesel(treat_none_as_null = true)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl NewVenue {
    pub fn into_venue(self, id: VenueId) -> Venue {
        Venue {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            genres: self.genres,
            facebook_link: self.facebook_link,
            website: self.website,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name=super::schema::artists)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Data of an artist to be created or to replace all fields of an existing artist
#[derive(Clone, Debug, Insertable, AsChangeset)]
#[diesel(table_name=super::schema::artists)]
#[diesel(treat_none_as_null = true)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl NewArtist {
    pub fn into_artist(self, id: ArtistId) -> Artist {
        Artist {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: self.image_link,
            genres: self.genres,
            facebook_link: self.facebook_link,
            website: self.website,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name=super::schema::shows)]
#[diesel(belongs_to(Artist))]
#[diesel(belongs_to(Venue))]
pub struct Show {
    pub id: ShowId,
    pub artist_id: ArtistId,
    pub venue_id: VenueId,
    pub start_time: DateTime<Utc>,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name=super::schema::shows)]
pub struct NewShow {
    pub artist_id: ArtistId,
    pub venue_id: VenueId,
    pub start_time: DateTime<Utc>,
}

/// A show together with the display data of the artist and the venue it refers to
#[derive(Clone, Debug)]
pub struct FullShow {
    pub show: Show,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
}

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name=super::schema::categories)]
pub struct Category {
    pub id: CategoryId,
    #[diesel(column_name = type_)]
    pub category_type: String,
}

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name=super::schema::questions)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}

impl From<Question> for fyyur_trivia_api_types::Question {
    fn from(value: Question) -> Self {
        Self {
            id: value.id,
            question: value.question,
            answer: value.answer,
            category: value.category,
            difficulty: value.difficulty,
        }
    }
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name=super::schema::questions)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}
