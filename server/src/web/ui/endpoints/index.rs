use crate::data_store::models::{Artist, Venue};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::BookingAppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

/// Number of recently listed venues and artists shown on the home page
const RECENTLY_LISTED_COUNT: usize = 10;

#[get("/")]
pub async fn index(
    state: web::Data<BookingAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let (mut venues, mut artists) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((store.get_venues()?, store.get_artists()?))
    })
    .await??;

    // Ids are assigned in ascending order, so the highest ids were listed most recently
    venues.sort_by(|a, b| b.id.cmp(&a.id));
    venues.truncate(RECENTLY_LISTED_COUNT);
    artists.sort_by(|a, b| b.id.cmp(&a.id));
    artists.truncate(RECENTLY_LISTED_COUNT);

    let tmpl = IndexTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Home",
        },
        recent_venues: &venues,
        recent_artists: &artists,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    base: BaseTemplateContext<'a>,
    recent_venues: &'a Vec<Venue>,
    recent_artists: &'a Vec<Artist>,
}
