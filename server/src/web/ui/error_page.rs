//! Nice-looking error pages for errors returned from the ui handler functions.
//!
//! An actix-web middleware replaces the original HTTP response in the case of an error. In
//! contrast to rendering the error page in our [actix_web::ResponseError] implementation, this
//! gives us access to the HTTP request, e.g. for generating URLs to static files.
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use actix_web::body::EitherBody;
use actix_web::web::Html;
use actix_web::{HttpRequest, HttpResponse, Responder, ResponseError};
use askama::Template;

/// An actix-web middleware for generating nice error pages
///
/// When the endpoint handler returned an error, the existing HTTP response is replaced with an
/// error page rendered from the "error.html" template, which extends "base.html". If rendering
/// fails, we fall back to a plain text representation of the error.
///
/// For [AppError]s, the page shows a message specific to the kind of error. For any other error,
/// its string representation is shown.
pub async fn error_page_middleware<B: actix_web::body::MessageBody>(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<B>,
) -> Result<actix_web::dev::ServiceResponse<EitherBody<B, String>>, actix_web::Error> {
    let response = next.call(req).await?;

    let (req, res) = response.into_parts();
    let error_page = res.error().map(|error| match error.as_error::<AppError>() {
        Some(app_error) => generate_error_page(app_error, &user_message(app_error), &req),
        None => generate_error_page(error.as_response_error(), &error.to_string(), &req),
    });
    match error_page {
        Some(page) => Ok(actix_web::dev::ServiceResponse::new(
            req,
            page.map_body(|_, body| EitherBody::right(body)),
        )),
        None => Ok(actix_web::dev::ServiceResponse::new(
            req,
            res.map_body(|_, body| EitherBody::left(body)),
        )),
    }
}

/// Headline and explanation shown to the user for the given [AppError]
fn user_message(error: &AppError) -> String {
    match error {
        AppError::PageNotFound => "The requested page does not exist.".to_owned(),
        AppError::EntityNotFound => {
            "The requested venue, artist or show does not exist (anymore).".to_owned()
        }
        AppError::InvalidData(e) => format!("The submitted data is invalid: {}", e),
        AppError::TransactionConflict => {
            "The database is busy with a conflicting change. Please try again.".to_owned()
        }
        AppError::DatabaseConnectionError(_) => {
            "The database is currently not reachable. Please try again later.".to_owned()
        }
        AppError::InternalError(_) => "Something went wrong on our side.".to_owned(),
    }
}

fn generate_error_page(
    error: &dyn ResponseError,
    message: &str,
    http_request: &HttpRequest,
) -> HttpResponse<String> {
    let status = error.status_code();
    let tmpl = ErrorTemplate {
        base: BaseTemplateContext {
            request: http_request,
            page_title: "Error",
        },
        status_code: status.as_u16(),
        status_reason: status.canonical_reason().unwrap_or("Error"),
        message,
        url: http_request.full_url().to_string(),
        timestamp: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    };
    render_template_or_show_error_as_string(tmpl, error, http_request)
}

/// Try to render the given [askama::Template] as an HTML error page for the given error.
///
/// In case of an error while rendering the template, return a plain text HTTP response with the
/// error's string representation.
fn render_template_or_show_error_as_string(
    tmpl: impl Template,
    error: &dyn ResponseError,
    req: &HttpRequest,
) -> HttpResponse<String> {
    match tmpl.render() {
        Ok(body) => (Html::new(body), error.status_code()).respond_to(req),
        Err(err) => (
            format!(
                "Error: {}\n(Could not render nice error page: {})",
                error, err
            ),
            error.status_code(),
        )
            .respond_to(req),
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    base: BaseTemplateContext<'a>,
    status_code: u16,
    status_reason: &'a str,
    message: &'a str,
    url: String,
    timestamp: String,
}
