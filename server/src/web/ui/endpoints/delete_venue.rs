use crate::data_store::{StoreError, VenueId};
use crate::web::ui::error::AppError;
use crate::web::ui::flash::{FlashMessage, FlashesInterface};
use crate::web::BookingAppState;
use actix_web::{delete, web, HttpRequest, Responder};
use log::warn;
use serde::Serialize;

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Delete a venue, answering with a JSON success flag for the page's delete button
///
/// The outcome is also reported to the user as a flash message on the next page.
#[delete("/venues/{venue_id:\\d+}")]
pub async fn delete_venue(
    path: web::Path<VenueId>,
    state: web::Data<BookingAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let result = web::block(move || -> Result<_, StoreError> {
        let mut store = state.store.get_facade()?;
        let venue = store.get_venue(venue_id)?;
        store.delete_venue(venue_id)?;
        Ok(venue.name)
    })
    .await?;

    Ok(web::Json(delete_response(result, "Venue", &req)))
}

/// Report the result of deleting a venue or artist via a flash message and create the JSON body
pub fn delete_response(
    result: Result<String, StoreError>,
    name_of_thing: &str,
    req: &HttpRequest,
) -> DeleteResponse {
    match result {
        Ok(name) => {
            req.add_flash_message(FlashMessage::success(format!(
                "{} {} was successfully deleted.",
                name_of_thing, name
            )));
            DeleteResponse { success: true }
        }
        Err(e) => {
            warn!("Deleting {} failed: {}", name_of_thing, e);
            let message = match e {
                StoreError::NotExisting => format!("{} does not exist.", name_of_thing),
                e => format!("{} could not be deleted: {}", name_of_thing, AppError::from(e)),
            };
            req.add_flash_message(FlashMessage::error(message));
            DeleteResponse { success: false }
        }
    }
}
