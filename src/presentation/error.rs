// SiteError -> HTTP response mapping
use crate::domain::error::SiteError;
use crate::infrastructure::config::ServerSettings;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;

/// Log the detail, replace it with a generic message unless debug mode
/// is on, and pick a status code per failure class.
pub fn error_response(server: &ServerSettings, error: &SiteError) -> Response {
    let time = Utc::now().to_rfc3339();
    tracing::error!("{time} - Error: {error}");

    let status = match error {
        SiteError::Unavailable(_) => StatusCode::BAD_GATEWAY,
        SiteError::InvalidDimensions => StatusCode::BAD_REQUEST,
        SiteError::QueryFailed(_) | SiteError::MalformedRow(_) | SiteError::Render(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let message = match error {
        // Static and safe to show, caused by the caller.
        SiteError::InvalidDimensions => error.to_string(),
        _ if server.debug => error.to_string(),
        _ => format!(
            "There was an internal server error, please report this to {}.",
            server.contact
        ),
    };

    (status, Json(json!({ "time": time, "error": message }))).into_response()
}
