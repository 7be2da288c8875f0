use crate::data_store::{ArtistId, StoreError};
use crate::web::ui::endpoints::delete_venue::delete_response;
use crate::web::ui::error::AppError;
use crate::web::BookingAppState;
use actix_web::{delete, web, HttpRequest, Responder};

#[delete("/artists/{artist_id:\\d+}")]
pub async fn delete_artist(
    path: web::Path<ArtistId>,
    state: web::Data<BookingAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let result = web::block(move || -> Result<_, StoreError> {
        let mut store = state.store.get_facade()?;
        let artist = store.get_artist(artist_id)?;
        store.delete_artist(artist_id)?;
        Ok(artist.name)
    })
    .await?;

    Ok(web::Json(delete_response(result, "Artist", &req)))
}
