use crate::web::api::APIError;
use crate::web::ui::error::AppError;
use log::{error, warn};

/// Middleware for logging all error responses of the wrapped services
///
/// Client errors (not found, invalid data, ...) are logged as warnings, internal and database
/// errors as errors.
pub async fn error_logging_middleware<B: actix_web::body::MessageBody>(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<B>,
) -> Result<actix_web::dev::ServiceResponse<B>, actix_web::Error> {
    let response = next.call(req).await?;

    if let Some(error) = response.response().error() {
        if let Some(app_error) = error.as_error::<AppError>() {
            match app_error {
                AppError::PageNotFound | AppError::EntityNotFound => {
                    warn!(
                        "HTTP {} page not found at <{}>",
                        response.response().status(),
                        response.request().uri()
                    );
                }
                AppError::InvalidData(e) => {
                    warn!(
                        "HTTP {} invalid data at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
                AppError::TransactionConflict => {}
                AppError::DatabaseConnectionError(e) => {
                    error!(
                        "HTTP {} database connection error: {}",
                        response.response().status(),
                        e
                    );
                }
                AppError::InternalError(e) => {
                    error!(
                        "HTTP {} internal server error at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
            }
        } else if let Some(api_error) = error.as_error::<APIError>() {
            match api_error {
                APIError::NotExisting | APIError::MethodNotAllowed => {
                    warn!(
                        "HTTP {} {} <{}>",
                        response.response().status(),
                        response.request().method(),
                        response.request().uri(),
                    );
                }
                APIError::Unprocessable(e) | APIError::BadRequest(e) => {
                    warn!(
                        "HTTP {} invalid request data at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
                APIError::InvalidJson(e) => {
                    warn!(
                        "HTTP {} invalid JSON at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
                APIError::TransactionConflict => {}
                APIError::InternalError(e) => {
                    error!(
                        "HTTP {} internal server error at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
            }
        } else {
            error!(
                "HTTP {} unexpected error at <{}>: {:?}",
                response.response().status(),
                response.request().uri(),
                error
            );
        }
    }
    Ok(response)
}
