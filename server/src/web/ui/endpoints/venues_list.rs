use crate::data_store::models::{FullShow, Venue};
use crate::data_store::{ShowFilterBuilder, VenueId};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::BookingAppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;
use std::collections::HashMap;

#[get("/venues")]
pub async fn venues_list(
    state: web::Data<BookingAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let now = chrono::Utc::now();
    let (venues, upcoming_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_venues()?,
            store.get_shows(ShowFilterBuilder::new().after(now).build())?,
        ))
    })
    .await??;

    let areas = group_venues_by_area(venues, &upcoming_shows);

    let tmpl = VenuesListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Venues",
        },
        areas: &areas,
    };
    Ok(Html::new(tmpl.render()?))
}

/// All venues of one city
struct Area {
    city: String,
    state: String,
    venues: Vec<VenueListEntry>,
}

struct VenueListEntry {
    venue: Venue,
    num_upcoming_shows: usize,
}

/// Group the venues by (city, state), keeping the order of the first occurrence of each area and
/// the order of the venues within each area.
fn group_venues_by_area(venues: Vec<Venue>, upcoming_shows: &[FullShow]) -> Vec<Area> {
    let mut show_counts: HashMap<VenueId, usize> = HashMap::new();
    for show in upcoming_shows {
        *show_counts.entry(show.show.venue_id).or_default() += 1;
    }

    let mut areas: Vec<Area> = Vec::new();
    for venue in venues {
        let entry = VenueListEntry {
            num_upcoming_shows: show_counts.get(&venue.id).copied().unwrap_or(0),
            venue,
        };
        match areas
            .iter_mut()
            .find(|a| a.city == entry.venue.city && a.state == entry.venue.state)
        {
            Some(area) => area.venues.push(entry),
            None => areas.push(Area {
                city: entry.venue.city.clone(),
                state: entry.venue.state.clone(),
                venues: vec![entry],
            }),
        }
    }
    areas
}

#[derive(Template)]
#[template(path = "venues.html")]
struct VenuesListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    areas: &'a Vec<Area>,
}
