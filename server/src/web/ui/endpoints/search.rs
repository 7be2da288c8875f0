use crate::data_store::ShowFilterBuilder;
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::BookingAppState;
use actix_web::web::{Form, Html};
use actix_web::{post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SearchFormData {
    #[serde(default)]
    search_term: String,
}

#[post("/venues/search")]
pub async fn search_venues(
    state: web::Data<BookingAppState>,
    data: Form<SearchFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let search_term = data.into_inner().search_term;
    let term = search_term.clone();
    let now = chrono::Utc::now();
    let results = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        let venues = store.search_venues(&term)?;
        let upcoming_shows = store.get_shows(ShowFilterBuilder::new().after(now).build())?;
        Ok(venues
            .into_iter()
            .map(|venue| SearchResult {
                num_upcoming_shows: upcoming_shows
                    .iter()
                    .filter(|s| s.show.venue_id == venue.id)
                    .count(),
                url: format!("/venues/{}", venue.id),
                name: venue.name,
            })
            .collect::<Vec<_>>())
    })
    .await??;

    render_search_results(&req, "Venues", &search_term, &results)
}

#[post("/artists/search")]
pub async fn search_artists(
    state: web::Data<BookingAppState>,
    data: Form<SearchFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let search_term = data.into_inner().search_term;
    let term = search_term.clone();
    let now = chrono::Utc::now();
    let results = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        let artists = store.search_artists(&term)?;
        let upcoming_shows = store.get_shows(ShowFilterBuilder::new().after(now).build())?;
        Ok(artists
            .into_iter()
            .map(|artist| SearchResult {
                num_upcoming_shows: upcoming_shows
                    .iter()
                    .filter(|s| s.show.artist_id == artist.id)
                    .count(),
                url: format!("/artists/{}", artist.id),
                name: artist.name,
            })
            .collect::<Vec<_>>())
    })
    .await??;

    render_search_results(&req, "Artists", &search_term, &results)
}

fn render_search_results(
    req: &HttpRequest,
    kind: &str,
    search_term: &str,
    results: &Vec<SearchResult>,
) -> Result<Html, AppError> {
    let tmpl = SearchResultsTemplate {
        base: BaseTemplateContext {
            request: req,
            page_title: "Search",
        },
        kind,
        search_term,
        results,
    };
    Ok(Html::new(tmpl.render()?))
}

struct SearchResult {
    name: String,
    url: String,
    num_upcoming_shows: usize,
}

#[derive(Template)]
#[template(path = "search_results.html")]
struct SearchResultsTemplate<'a> {
    base: BaseTemplateContext<'a>,
    kind: &'a str,
    search_term: &'a str,
    results: &'a Vec<SearchResult>,
}
