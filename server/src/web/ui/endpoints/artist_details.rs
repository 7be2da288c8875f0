use crate::data_store::models::{Artist, FullShow};
use crate::data_store::{ArtistId, ShowFilterBuilder, VenueId};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::time_calculation::{format_show_time, split_past_upcoming};
use crate::web::BookingAppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/artists/{artist_id:\\d+}")]
pub async fn artist_details(
    path: web::Path<ArtistId>,
    state: web::Data<BookingAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let time_zone = state.time_zone;
    let (artist, shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_artist(artist_id)?,
            store.get_shows(ShowFilterBuilder::new().of_artist(artist_id).build())?,
        ))
    })
    .await??;

    let (past_shows, upcoming_shows) = split_past_upcoming(shows, &chrono::Utc::now());
    let to_entry = |show: &FullShow| VenueShowEntry {
        venue_id: show.show.venue_id,
        venue_name: show.venue_name.clone(),
        venue_image_link: show.venue_image_link.clone(),
        start_time: format_show_time(&show.show.start_time, &time_zone),
    };

    let tmpl = ArtistDetailsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &artist.name,
        },
        artist: &artist,
        past_shows: past_shows.iter().map(to_entry).collect(),
        upcoming_shows: upcoming_shows.iter().map(to_entry).collect(),
    };
    Ok(Html::new(tmpl.render()?))
}

/// A show of the artist, as listed on the artist's page
struct VenueShowEntry {
    venue_id: VenueId,
    venue_name: String,
    venue_image_link: Option<String>,
    start_time: String,
}

#[derive(Template)]
#[template(path = "artist_details.html")]
struct ArtistDetailsTemplate<'a> {
    base: BaseTemplateContext<'a>,
    artist: &'a Artist,
    past_shows: Vec<VenueShowEntry>,
    upcoming_shows: Vec<VenueShowEntry>,
}
