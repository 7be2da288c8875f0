use crate::data_store::StoreError;
use crate::web::ui::error::AppError;
use crate::web::ui::flash::{FlashMessage, FlashType, FlashesInterface};
use actix_web::error::UrlGenerationError;
use actix_web::http::header::ContentType;
use actix_web::web::Redirect;
use actix_web::{Either, HttpRequest, HttpResponse, ResponseError};
use askama::Template;

/// Outcome of submitting a create/edit form, carrying the id of the stored entity on success
///
/// Used to delegate creating the appropriate response to [create_edit_form_response()].
pub enum FormSubmitResult<T> {
    Success(T),
    ValidationError,
    TransactionConflict,
    StoreError(AppError),
}

impl<T> From<Result<T, StoreError>> for FormSubmitResult<T> {
    fn from(value: Result<T, StoreError>) -> Self {
        match value {
            Ok(id) => FormSubmitResult::Success(id),
            Err(StoreError::TransactionConflict) => FormSubmitResult::TransactionConflict,
            Err(e) => FormSubmitResult::StoreError(e.into()),
        }
    }
}

/// Generate the HTTP response for a submitted create/edit form.
///
/// On success, a flash message is added and the client is redirected to the URL generated by
/// `success_redirect` from the stored entity's id. Otherwise, the form template `tmpl` is rendered
/// again (including the flash message describing the problem), with an appropriate error status.
pub fn create_edit_form_response<T>(
    result: FormSubmitResult<T>,
    tmpl: impl Template,
    name_of_thing: &str,
    is_new_entity: bool,
    success_redirect: impl FnOnce(T) -> Result<url::Url, UrlGenerationError>,
    request: &HttpRequest,
) -> Result<Either<Redirect, HttpResponse>, AppError> {
    let (status, message) = match result {
        FormSubmitResult::Success(id) => {
            request.add_flash_message(FlashMessage::success(if is_new_entity {
                format!("{} was successfully listed!", name_of_thing)
            } else {
                format!("{} was successfully updated!", name_of_thing)
            }));
            return Ok(Either::Left(
                Redirect::to(success_redirect(id)?.to_string()).see_other(),
            ));
        }
        FormSubmitResult::ValidationError => (
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
            "The entered data is invalid. Please check the marked fields.".to_owned(),
        ),
        FormSubmitResult::TransactionConflict => (
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
            "Could not save due to concurrent database access. Please submit the form again."
                .to_owned(),
        ),
        FormSubmitResult::StoreError(e) => (
            e.status_code(),
            format!("An error occurred. {} could not be saved: {}", name_of_thing, e),
        ),
    };
    request.add_flash_message(FlashMessage {
        flash_type: FlashType::Error,
        message,
    });
    Ok(Either::Right(
        HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(tmpl.render()?),
    ))
}
