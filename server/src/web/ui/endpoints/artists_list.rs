use crate::data_store::models::Artist;
use crate::data_store::{ArtistId, ShowFilterBuilder};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::BookingAppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;
use std::collections::HashMap;

#[get("/artists")]
pub async fn artists_list(
    state: web::Data<BookingAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let now = chrono::Utc::now();
    let (artists, upcoming_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_artists()?,
            store.get_shows(ShowFilterBuilder::new().after(now).build())?,
        ))
    })
    .await??;

    let mut show_counts: HashMap<ArtistId, usize> = HashMap::new();
    for show in upcoming_shows.iter() {
        *show_counts.entry(show.show.artist_id).or_default() += 1;
    }
    let entries: Vec<ArtistListEntry> = artists
        .into_iter()
        .map(|artist| ArtistListEntry {
            num_upcoming_shows: show_counts.get(&artist.id).copied().unwrap_or(0),
            artist,
        })
        .collect();

    let tmpl = ArtistsListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Artists",
        },
        artists: &entries,
    };
    Ok(Html::new(tmpl.render()?))
}

struct ArtistListEntry {
    artist: Artist,
    num_upcoming_shows: usize,
}

#[derive(Template)]
#[template(path = "artists.html")]
struct ArtistsListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    artists: &'a Vec<ArtistListEntry>,
}
