// Route table, with the fixed-dimension SVG routes generated from tables
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    health_check, heart_rate_query_svg, heart_rate_svg, index, load_svg, not_found, robots,
    status_dashboard,
};
use axum::extract::State;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// Fixed heart rate chart sizes served as /status-{w}x{h}.svg.
pub const BPM_DIMENSIONS: [(u32, u32); 5] =
    [(1120, 610), (800, 450), (600, 350), (440, 250), (380, 220)];

/// Fixed load chart sizes served per node as /load-{node}-{w}x{h}.svg.
pub const LOAD_DIMENSIONS: [(u32, u32); 12] = [
    (1120, 200),
    (1020, 200),
    (920, 200),
    (820, 200),
    (720, 200),
    (620, 200),
    (520, 200),
    (440, 200),
    (750, 200),
    (600, 200),
    (380, 200),
    (200, 115),
];

pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(index))
        .route("/status", get(status_dashboard))
        .route("/status.svg", get(heart_rate_query_svg))
        .route("/healthz", get(health_check))
        .route("/robots.txt", get(robots));

    for (width, height) in BPM_DIMENSIONS {
        router = router.route(
            &format!("/status-{width}x{height}.svg"),
            get(move |State(state): State<Arc<AppState>>| heart_rate_svg(state, width, height)),
        );
    }

    for node in &state.config.nodes {
        for (width, height) in LOAD_DIMENSIONS {
            let host = node.host.clone();
            router = router.route(
                &format!("/load-{}-{width}x{height}.svg", node.name),
                get(move |State(state): State<Arc<AppState>>| {
                    let host = host.clone();
                    async move { load_svg(state, host, width, height).await }
                }),
            );
        }
    }

    let gzip = state.config.server.gzip;
    let router = router
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if gzip {
        router.layer(CompressionLayer::new())
    } else {
        router
    }
}
