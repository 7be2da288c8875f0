use crate::data_store::models::{FullShow, Venue};
use crate::data_store::{ArtistId, ShowFilterBuilder, VenueId};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::time_calculation::{format_show_time, split_past_upcoming};
use crate::web::BookingAppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/venues/{venue_id:\\d+}")]
pub async fn venue_details(
    path: web::Path<VenueId>,
    state: web::Data<BookingAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let time_zone = state.time_zone;
    let (venue, shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_venue(venue_id)?,
            store.get_shows(ShowFilterBuilder::new().at_venue(venue_id).build())?,
        ))
    })
    .await??;

    let (past_shows, upcoming_shows) = split_past_upcoming(shows, &chrono::Utc::now());
    let to_entry = |show: &FullShow| ArtistShowEntry {
        artist_id: show.show.artist_id,
        artist_name: show.artist_name.clone(),
        artist_image_link: show.artist_image_link.clone(),
        start_time: format_show_time(&show.show.start_time, &time_zone),
    };

    let tmpl = VenueDetailsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &venue.name,
        },
        venue: &venue,
        past_shows: past_shows.iter().map(to_entry).collect(),
        upcoming_shows: upcoming_shows.iter().map(to_entry).collect(),
    };
    Ok(Html::new(tmpl.render()?))
}

/// A show at the venue, as listed on the venue's page
struct ArtistShowEntry {
    artist_id: ArtistId,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: String,
}

#[derive(Template)]
#[template(path = "venue_details.html")]
struct VenueDetailsTemplate<'a> {
    base: BaseTemplateContext<'a>,
    venue: &'a Venue,
    past_shows: Vec<ArtistShowEntry>,
    upcoming_shows: Vec<ArtistShowEntry>,
}
