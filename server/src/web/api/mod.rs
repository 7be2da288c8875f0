//! The trivia JSON API
//!
//! All endpoints are registered as explicit resources, such that requests with a method not
//! handled by the resource are answered with a JSON `405` error and requests to unknown paths with
//! a JSON `404` error, instead of actix-web's default plain responses.

use std::fmt::Display;

mod endpoints_category;
mod endpoints_question;
mod endpoints_quiz;
#[cfg(test)]
mod tests;

use crate::data_store::StoreError;
use actix_web::error::JsonPayloadError;
use actix_web::http::Method;
use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    middleware, web, HttpResponse,
};
use fyyur_trivia_api_types::ErrorResponse;

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    let json_config =
        web::JsonConfig::default().error_handler(|err, _req| APIError::InvalidJson(err).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| APIError::BadRequest(err.to_string()).into());
    let path_config = web::PathConfig::default().error_handler(|_err, _req| APIError::NotExisting.into());
    cfg.app_data(json_config)
        .app_data(query_config)
        .app_data(path_config)
        .service(
            api_resource("/categories")
                .route(web::get().to(endpoints_category::list_categories)),
        )
        .service(
            api_resource("/categories/{category_id:\\d+}/questions")
                .route(web::get().to(endpoints_category::list_category_questions)),
        )
        .service(
            api_resource("/questions")
                .route(web::get().to(endpoints_question::list_questions))
                .route(web::post().to(endpoints_question::search_or_create_question)),
        )
        .service(
            api_resource("/questions/{question_id:\\d+}")
                .route(web::delete().to(endpoints_question::delete_question)),
        )
        .service(api_resource("/quizzes").route(web::post().to(endpoints_quiz::play_quiz)))
        .default_service(web::to(not_found_handler));
}

/// Create a resource for the given path which answers CORS preflight requests and responds to all
/// other unhandled methods with [APIError::MethodNotAllowed].
fn api_resource(path: &str) -> actix_web::Resource {
    web::resource(path)
        .route(web::method(Method::OPTIONS).to(cors_preflight_handler))
        .default_service(web::to(method_not_allowed_handler))
}

/// Middleware for adding the CORS headers to every response of the API, allowing the trivia
/// frontend to be served from a different origin.
pub fn cors_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
        .add((
            "Access-Control-Allow-Methods",
            "GET, POST, PATCH, DELETE, OPTIONS",
        ))
}

async fn cors_preflight_handler() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn method_not_allowed_handler() -> Result<HttpResponse, APIError> {
    Err(APIError::MethodNotAllowed)
}

async fn not_found_handler() -> Result<HttpResponse, APIError> {
    Err(APIError::NotExisting)
}

#[derive(Debug)]
pub enum APIError {
    NotExisting,
    Unprocessable(String),
    MethodNotAllowed,
    BadRequest(String),
    InvalidJson(JsonPayloadError),
    TransactionConflict,
    InternalError(String),
}

impl Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotExisting => f.write_str("resource not found")?,
            Self::Unprocessable(e) => {
                write!(f, "unprocessable: {}", e)?;
            }
            Self::MethodNotAllowed => f.write_str("method not allowed")?,
            Self::BadRequest(e) => {
                write!(f, "bad request: {}", e)?;
            }
            Self::InvalidJson(e) => {
                write!(f, "invalid JSON request data: {}", e)?;
            }
            Self::TransactionConflict => {
                f.write_str("concurrent database transaction conflict, please retry request")?;
            }
            Self::InternalError(s) => {
                f.write_str("internal error: ")?;
                f.write_str(s)?;
            }
        };
        Ok(())
    }
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(ErrorResponse {
                success: false,
                error: self.status_code().as_u16(),
                message: self.to_string(),
            })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotExisting => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidJson(e) => match e {
                JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                JsonPayloadError::Deserialize(json_error) if json_error.is_data() => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                _ => StatusCode::BAD_REQUEST,
            },
            Self::TransactionConflict => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ConnectionError(error) => {
                Self::InternalError(format!("Could not connect to database: {}", error))
            }
            StoreError::QueryError(diesel_error) => Self::InternalError(format!(
                "Error while executing database query: {}",
                diesel_error
            )),
            StoreError::TransactionConflict => Self::TransactionConflict,
            StoreError::NotExisting => Self::NotExisting,
            StoreError::ConflictEntityExists => {
                Self::Unprocessable("Element already exists".to_owned())
            }
            StoreError::InvalidInputData(e) => Self::Unprocessable(e),
            StoreError::InvalidDataInDatabase(e) => Self::InternalError(format!(
                "Data queried from database could not be deserialized: {}",
                e
            )),
        }
    }
}

impl From<actix_web::error::BlockingError> for APIError {
    fn from(_e: actix_web::error::BlockingError) -> Self {
        APIError::InternalError(
            "Could not get thread from thread pool for synchronous database operation.".to_owned(),
        )
    }
}
