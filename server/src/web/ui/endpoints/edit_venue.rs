use crate::data_store::models::{NewVenue, Venue};
use crate::data_store::{StoreError, VenueId};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::form_values::{BoolFormValue, FormValue};
use crate::web::ui::sub_templates::form_inputs::{
    CheckboxTemplate, FormFieldTemplate, InputConfiguration, InputType, SelectEntry,
    SelectTemplate,
};
use crate::web::ui::validation::{
    Description, GenreList, HttpUrl, MaybeEmpty, NonEmptyString, PhoneNumber, UsState, GENRES,
    US_STATES,
};
use crate::web::ui::util;
use crate::web::BookingAppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;
use std::borrow::Cow;

#[get("/venues/create")]
pub async fn new_venue_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = VenueFormData::default();
    let tmpl = EditVenueFormTemplate::new(&req, &form_data, None);
    Ok(Html::new(tmpl.render()?))
}

#[post("/venues/create")]
pub async fn new_venue(
    state: web::Data<BookingAppState>,
    data: Form<VenueFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let venue = form_data.validate();

    let result: util::FormSubmitResult<VenueId> = if let Some(venue) = venue {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.create_venue(venue)
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditVenueFormTemplate::new(&req, &form_data, None);
    util::create_edit_form_response(
        result,
        tmpl,
        &format!("Venue {}", form_data.name.string_value()),
        true,
        |venue_id| req.url_for("venue_details", [venue_id.to_string()]),
        &req,
    )
}

#[get("/venues/{venue_id:\\d+}/edit")]
pub async fn edit_venue_form(
    path: web::Path<VenueId>,
    state: web::Data<BookingAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let venue = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_venue(venue_id)?)
    })
    .await??;

    let form_data: VenueFormData = venue.into();
    let tmpl = EditVenueFormTemplate::new(&req, &form_data, Some(venue_id));
    Ok(Html::new(tmpl.render()?))
}

#[post("/venues/{venue_id:\\d+}/edit")]
pub async fn edit_venue(
    path: web::Path<VenueId>,
    state: web::Data<BookingAppState>,
    data: Form<VenueFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let store = state.store.clone();
    web::block(move || -> Result<_, AppError> {
        let mut store = store.get_facade()?;
        Ok(store.get_venue(venue_id)?)
    })
    .await??;

    let mut form_data = data.into_inner();
    let venue = form_data.validate();

    let result: util::FormSubmitResult<VenueId> = if let Some(venue) = venue {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.update_venue(venue_id, venue)?;
            Ok(venue_id)
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditVenueFormTemplate::new(&req, &form_data, Some(venue_id));
    util::create_edit_form_response(
        result,
        tmpl,
        &format!("Venue {}", form_data.name.string_value()),
        false,
        |venue_id| req.url_for("venue_details", [venue_id.to_string()]),
        &req,
    )
}

#[derive(Deserialize, Default)]
pub struct VenueFormData {
    name: FormValue<NonEmptyString>,
    city: FormValue<NonEmptyString>,
    state: FormValue<UsState>,
    address: FormValue<NonEmptyString>,
    #[serde(default)]
    phone: FormValue<MaybeEmpty<PhoneNumber>>,
    #[serde(default)]
    image_link: FormValue<MaybeEmpty<HttpUrl>>,
    genres: FormValue<GenreList>,
    #[serde(default)]
    facebook_link: FormValue<MaybeEmpty<HttpUrl>>,
    #[serde(default)]
    website_link: FormValue<MaybeEmpty<HttpUrl>>,
    #[serde(default)]
    seeking_talent: BoolFormValue,
    #[serde(default)]
    seeking_description: FormValue<MaybeEmpty<Description>>,
}

impl VenueFormData {
    /// Validate all fields, such that every invalid field gets its error message, and build the
    /// venue data if all of them are valid.
    fn validate(&mut self) -> Option<NewVenue> {
        let name = self.name.validate();
        let city = self.city.validate();
        let state = self.state.validate();
        let address = self.address.validate();
        let phone = self.phone.validate();
        let image_link = self.image_link.validate();
        let genres = self.genres.validate();
        let facebook_link = self.facebook_link.validate();
        let website = self.website_link.validate();
        let seeking_description = self.seeking_description.validate();

        Some(NewVenue {
            name: name?.into_inner(),
            city: city?.into_inner(),
            state: state?.into_inner(),
            address: address?.into_inner(),
            phone: phone?.into_inner().map(PhoneNumber::into_inner),
            image_link: image_link?.into_inner().map(HttpUrl::into_inner),
            genres: genres?.into_inner(),
            facebook_link: facebook_link?.into_inner().map(HttpUrl::into_inner),
            website: website?.into_inner().map(HttpUrl::into_inner),
            seeking_talent: self.seeking_talent.get_value(),
            seeking_description: seeking_description?
                .into_inner()
                .map(Description::into_inner),
        })
    }
}

impl From<Venue> for VenueFormData {
    fn from(value: Venue) -> Self {
        Self {
            name: NonEmptyString(value.name).into(),
            city: NonEmptyString(value.city).into(),
            state: UsState(value.state).into(),
            address: NonEmptyString(value.address).into(),
            phone: MaybeEmpty(value.phone.map(PhoneNumber)).into(),
            image_link: MaybeEmpty(value.image_link.map(HttpUrl)).into(),
            genres: GenreList(value.genres).into(),
            facebook_link: MaybeEmpty(value.facebook_link.map(HttpUrl)).into(),
            website_link: MaybeEmpty(value.website.map(HttpUrl)).into(),
            seeking_talent: value.seeking_talent.into(),
            seeking_description: MaybeEmpty(value.seeking_description.map(Description))
                .into(),
        }
    }
}

#[derive(Template)]
#[template(path = "edit_venue_form.html")]
struct EditVenueFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a VenueFormData,
    venue_id: Option<VenueId>,
    state_entries: Vec<SelectEntry<'static>>,
    genres_info: String,
}

impl<'a> EditVenueFormTemplate<'a> {
    fn new(req: &'a HttpRequest, form_data: &'a VenueFormData, venue_id: Option<VenueId>) -> Self {
        Self {
            base: BaseTemplateContext {
                request: req,
                page_title: if venue_id.is_some() {
                    "Edit venue"
                } else {
                    "List a new venue"
                },
            },
            form_data,
            venue_id,
            state_entries: state_select_entries(),
            genres_info: genres_info(),
        }
    }

    fn post_url(&self) -> String {
        match self.venue_id {
            Some(id) => format!("/venues/{}/edit", id),
            None => "/venues/create".to_owned(),
        }
    }
}

/// Entries of the select input for choosing a US state
pub fn state_select_entries() -> Vec<SelectEntry<'static>> {
    US_STATES
        .iter()
        .map(|s| SelectEntry {
            value: Cow::Borrowed(*s),
            text: Cow::Borrowed(*s),
        })
        .collect()
}

/// Help text for the genres input, listing the known genres
pub fn genres_info() -> String {
    format!("Comma-separated list of: {}", GENRES.join(", "))
}
