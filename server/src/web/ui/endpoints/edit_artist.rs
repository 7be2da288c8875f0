use crate::data_store::models::{Artist, NewArtist};
use crate::data_store::{ArtistId, StoreError};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::endpoints::edit_venue::{genres_info, state_select_entries};
use crate::web::ui::error::AppError;
use crate::web::ui::form_values::{BoolFormValue, FormValue};
use crate::web::ui::sub_templates::form_inputs::{
    CheckboxTemplate, FormFieldTemplate, InputConfiguration, InputType, SelectEntry,
    SelectTemplate,
};
use crate::web::ui::util;
use crate::web::ui::validation::{
    Description, GenreList, HttpUrl, MaybeEmpty, NonEmptyString, PhoneNumber, UsState,
};
use crate::web::BookingAppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;

#[get("/artists/create")]
pub async fn new_artist_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = ArtistFormData::default();
    let tmpl = EditArtistFormTemplate::new(&req, &form_data, None);
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/create")]
pub async fn new_artist(
    state: web::Data<BookingAppState>,
    data: Form<ArtistFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let artist = form_data.validate();

    let result: util::FormSubmitResult<ArtistId> = if let Some(artist) = artist {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.create_artist(artist)
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditArtistFormTemplate::new(&req, &form_data, None);
    util::create_edit_form_response(
        result,
        tmpl,
        &format!("Artist {}", form_data.name.string_value()),
        true,
        |artist_id| req.url_for("artist_details", [artist_id.to_string()]),
        &req,
    )
}

#[get("/artists/{artist_id:\\d+}/edit")]
pub async fn edit_artist_form(
    path: web::Path<ArtistId>,
    state: web::Data<BookingAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let artist = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_artist(artist_id)?)
    })
    .await??;

    let form_data: ArtistFormData = artist.into();
    let tmpl = EditArtistFormTemplate::new(&req, &form_data, Some(artist_id));
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/{artist_id:\\d+}/edit")]
pub async fn edit_artist(
    path: web::Path<ArtistId>,
    state: web::Data<BookingAppState>,
    data: Form<ArtistFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let store = state.store.clone();
    web::block(move || -> Result<_, AppError> {
        let mut store = store.get_facade()?;
        Ok(store.get_artist(artist_id)?)
    })
    .await??;

    let mut form_data = data.into_inner();
    let artist = form_data.validate();

    let result: util::FormSubmitResult<ArtistId> = if let Some(artist) = artist {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.update_artist(artist_id, artist)?;
            Ok(artist_id)
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditArtistFormTemplate::new(&req, &form_data, Some(artist_id));
    util::create_edit_form_response(
        result,
        tmpl,
        &format!("Artist {}", form_data.name.string_value()),
        false,
        |artist_id| req.url_for("artist_details", [artist_id.to_string()]),
        &req,
    )
}

#[derive(Deserialize, Default)]
pub struct ArtistFormData {
    name: FormValue<NonEmptyString>,
    city: FormValue<NonEmptyString>,
    state: FormValue<UsState>,
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
    seeking_venue: BoolFormValue,
    #[serde(default)]
    seeking_description: FormValue<MaybeEmpty<Description>>,
}

impl ArtistFormData {
    fn validate(&mut self) -> Option<NewArtist> {
        let name = self.name.validate();
        let city = self.city.validate();
        let state = self.state.validate();
        let phone = self.phone.validate();
        let image_link = self.image_link.validate();
        let genres = self.genres.validate();
        let facebook_link = self.facebook_link.validate();
        let website = self.website_link.validate();
        let seeking_description = self.seeking_description.validate();

        Some(NewArtist {
            name: name?.into_inner(),
            city: city?.into_inner(),
            state: state?.into_inner(),
            phone: phone?.into_inner().map(PhoneNumber::into_inner),
            image_link: image_link?.into_inner().map(HttpUrl::into_inner),
            genres: genres?.into_inner(),
            facebook_link: facebook_link?.into_inner().map(HttpUrl::into_inner),
            website: website?.into_inner().map(HttpUrl::into_inner),
            seeking_venue: self.seeking_venue.get_value(),
            seeking_description: seeking_description?
                .into_inner()
                .map(Description::into_inner),
        })
    }
}

impl From<Artist> for ArtistFormData {
    fn from(value: Artist) -> Self {
        Self {
            name: NonEmptyString(value.name).into(),
            city: NonEmptyString(value.city).into(),
            state: UsState(value.state).into(),
            phone: MaybeEmpty(value.phone.map(PhoneNumber)).into(),
            image_link: MaybeEmpty(value.image_link.map(HttpUrl)).into(),
            genres: GenreList(value.genres).into(),
            facebook_link: MaybeEmpty(value.facebook_link.map(HttpUrl)).into(),
            website_link: MaybeEmpty(value.website.map(HttpUrl)).into(),
            seeking_venue: value.seeking_venue.into(),
            seeking_description: MaybeEmpty(value.seeking_description.map(Description))
                .into(),
        }
    }
}

#[derive(Template)]
#[template(path = "edit_artist_form.html")]
struct EditArtistFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a ArtistFormData,
    artist_id: Option<ArtistId>,
    state_entries: Vec<SelectEntry<'static>>,
    genres_info: String,
}

impl<'a> EditArtistFormTemplate<'a> {
    fn new(
        req: &'a HttpRequest,
        form_data: &'a ArtistFormData,
        artist_id: Option<ArtistId>,
    ) -> Self {
        Self {
            base: BaseTemplateContext {
                request: req,
                page_title: if artist_id.is_some() {
                    "Edit artist"
                } else {
                    "List a new artist"
                },
            },
            form_data,
            artist_id,
            state_entries: state_select_entries(),
            genres_info: genres_info(),
        }
    }

    fn post_url(&self) -> String {
        match self.artist_id {
            Some(id) => format!("/artists/{}/edit", id),
            None => "/artists/create".to_owned(),
        }
    }
}
