use crate::data_store::{ArtistId, ShowFilter, VenueId};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::time_calculation::format_show_time;
use crate::web::BookingAppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/shows")]
pub async fn shows_list(
    state: web::Data<BookingAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let time_zone = state.time_zone;
    let shows = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_shows(ShowFilter::default())?)
    })
    .await??;

    let entries: Vec<ShowListEntry> = shows
        .into_iter()
        .map(|show| ShowListEntry {
            venue_id: show.show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: format_show_time(&show.show.start_time, &time_zone),
        })
        .collect();

    let tmpl = ShowsListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Shows",
        },
        shows: &entries,
    };
    Ok(Html::new(tmpl.render()?))
}

struct ShowListEntry {
    venue_id: VenueId,
    venue_name: String,
    artist_id: ArtistId,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: String,
}

#[derive(Template)]
#[template(path = "shows.html")]
struct ShowsListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    shows: &'a Vec<ShowListEntry>,
}
