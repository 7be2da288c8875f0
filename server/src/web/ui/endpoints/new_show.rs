use crate::data_store::models::{Artist, NewShow, Venue};
use crate::data_store::{ShowId, StoreError};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::form_values::FormValue;
use crate::web::ui::sub_templates::form_inputs::{
    FormFieldTemplate, InputConfiguration, InputType, SelectEntry, SelectTemplate,
};
use crate::web::ui::util;
use crate::web::ui::validation::{DateTimeLocal, Int32FromList};
use crate::web::BookingAppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;
use std::borrow::Cow;

#[get("/shows/create")]
pub async fn new_show_form(
    state: web::Data<BookingAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let time_zone = state.time_zone;
    let (artists, venues) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((store.get_artists()?, store.get_venues()?))
    })
    .await??;

    let form_data = ShowFormData::default();
    let tmpl = NewShowFormTemplate::new(&req, &form_data, &artists, &venues, &time_zone);
    Ok(Html::new(tmpl.render()?))
}

#[post("/shows/create")]
pub async fn new_show(
    state: web::Data<BookingAppState>,
    data: Form<ShowFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let time_zone = state.time_zone;
    let store = state.store.clone();
    let (artists, venues) = web::block(move || -> Result<_, AppError> {
        let mut store = store.get_facade()?;
        Ok((store.get_artists()?, store.get_venues()?))
    })
    .await??;

    let mut form_data = data.into_inner();
    let show = form_data.validate(
        &artists.iter().map(|a| a.id).collect(),
        &venues.iter().map(|v| v.id).collect(),
        &time_zone,
    );

    let result: util::FormSubmitResult<ShowId> = if let Some(show) = show {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.create_show(show)
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = NewShowFormTemplate::new(&req, &form_data, &artists, &venues, &time_zone);
    util::create_edit_form_response(
        result,
        tmpl,
        "Show",
        true,
        |_show_id| req.url_for_static("shows_list"),
        &req,
    )
}

#[derive(Deserialize, Default)]
pub struct ShowFormData {
    artist_id: FormValue<Int32FromList>,
    venue_id: FormValue<Int32FromList>,
    start_time: FormValue<DateTimeLocal>,
}

impl ShowFormData {
    fn validate(
        &mut self,
        artist_ids: &Vec<i32>,
        venue_ids: &Vec<i32>,
        time_zone: &chrono_tz::Tz,
    ) -> Option<NewShow> {
        let artist_id = self.artist_id.validate_with(artist_ids);
        let venue_id = self.venue_id.validate_with(venue_ids);
        let start_time = self.start_time.validate_with(time_zone);

        Some(NewShow {
            artist_id: artist_id?.into_inner(),
            venue_id: venue_id?.into_inner(),
            start_time: start_time?.to_utc(),
        })
    }
}

#[derive(Template)]
#[template(path = "new_show_form.html")]
struct NewShowFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a ShowFormData,
    artist_entries: Vec<SelectEntry<'a>>,
    venue_entries: Vec<SelectEntry<'a>>,
    start_time_info: String,
}

impl<'a> NewShowFormTemplate<'a> {
    fn new(
        req: &'a HttpRequest,
        form_data: &'a ShowFormData,
        artists: &'a [Artist],
        venues: &'a [Venue],
        time_zone: &chrono_tz::Tz,
    ) -> Self {
        Self {
            base: BaseTemplateContext {
                request: req,
                page_title: "List a new show",
            },
            form_data,
            artist_entries: artists
                .iter()
                .map(|a| SelectEntry {
                    value: Cow::Owned(a.id.to_string()),
                    text: Cow::Borrowed(a.name.as_str()),
                })
                .collect(),
            venue_entries: venues
                .iter()
                .map(|v| SelectEntry {
                    value: Cow::Owned(v.id.to_string()),
                    text: Cow::Owned(format!("{} ({}, {})", v.name, v.city, v.state)),
                })
                .collect(),
            start_time_info: format!("Local time in {}", time_zone.name()),
        }
    }
}
