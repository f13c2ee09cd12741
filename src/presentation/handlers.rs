// HTTP request handlers
use crate::application::chart_service::ChartOutcome;
use crate::domain::error::SiteError;
use crate::infrastructure::chart_svg::render_chart;
use crate::infrastructure::message_svg::render_message;
use crate::presentation::app_state::AppState;
use crate::presentation::error::error_response;
use crate::presentation::pages;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

/// Largest accepted caller-supplied dimension. Dimensions are bounded
/// to 16-bit values so a stray query cannot request a giant canvas.
const MAX_DIMENSION: i64 = 32767;

pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn robots() -> &'static str {
    "User-agent: *\nDisallow: /status\nDisallow: /status-*.svg\nDisallow: /load-*.svg\n"
}

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    html_response(
        StatusCode::OK,
        pages::index_html(&state.config.server.contact),
        "max-age=600",
    )
}

pub async fn status_dashboard(State(state): State<Arc<AppState>>) -> Response {
    match state.status_service.status_report().await {
        Ok(report) => html_response(StatusCode::OK, pages::status_html(&report), "max-age=60"),
        Err(error) => error_response(&state.config.server, &error),
    }
}

pub async fn not_found() -> Response {
    html_response(StatusCode::NOT_FOUND, pages::not_found_html(), "max-age=600")
}

#[derive(Deserialize)]
pub struct DimensionQuery {
    pub w: Option<i64>,
    pub h: Option<i64>,
}

/// Heart rate chart with caller-supplied dimensions. Invalid dimensions
/// are rejected before any backend call is made.
pub async fn heart_rate_query_svg(
    State(state): State<Arc<AppState>>,
    Query(dimensions): Query<DimensionQuery>,
) -> Response {
    let width = dimensions.w.unwrap_or(800);
    let height = dimensions.h.unwrap_or(450);
    if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
        return error_response(&state.config.server, &SiteError::InvalidDimensions);
    }
    heart_rate_svg(state, width as u32, height as u32).await
}

pub async fn heart_rate_svg(state: Arc<AppState>, width: u32, height: u32) -> Response {
    let outcome = state.chart_service.heart_rate_chart(width, height).await;
    chart_response(&state, outcome, width)
}

pub async fn load_svg(state: Arc<AppState>, host: String, width: u32, height: u32) -> Response {
    let outcome = state.chart_service.load_chart(&host, width, height).await;
    chart_response(&state, outcome, width)
}

fn chart_response(
    state: &AppState,
    outcome: Result<ChartOutcome, SiteError>,
    width: u32,
) -> Response {
    match outcome {
        Ok(ChartOutcome::Ready(spec)) => match render_chart(&spec) {
            // Chart data is stable for a while, the placeholder is not:
            // it flips back to a chart as soon as enough data arrives.
            Ok(svg) => svg_response(svg, "max-age=600"),
            Err(error) => error_response(&state.config.server, &error),
        },
        Ok(ChartOutcome::Insufficient { message }) => {
            svg_response(render_message(&message, width), "no-store")
        }
        Err(error) => error_response(&state.config.server, &error),
    }
}

fn svg_response(svg: String, cache_control: &str) -> Response {
    match Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/svg+xml")
        .header(header::CACHE_CONTROL, cache_control)
        .header(header::LAST_MODIFIED, http_date())
        .body(Body::from(svg))
    {
        Ok(response) => response,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

fn html_response(status: StatusCode, html: String, cache_control: &str) -> Response {
    match Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CACHE_CONTROL, cache_control)
        .header(header::LAST_MODIFIED, http_date())
        .body(Body::from(html))
    {
        Ok(response) => response,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

fn http_date() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
