// End-to-end suite: a stub InfluxDB speaking the InfluxQL JSON wire
// format on an ephemeral port, the real router on another, driven by
// reqwest.
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{Value, json};

use homelab_status::application::chart_service::ChartService;
use homelab_status::application::status_service::StatusService;
use homelab_status::infrastructure::config::{
    NodeConfig, ServiceConfig, SiteConfig,
};
use homelab_status::infrastructure::influx_gateway::InfluxGateway;
use homelab_status::presentation::app_state::AppState;
use homelab_status::presentation::router::build_router;

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Stub backend answering every query with the same payload, counting hits.
async fn stub_influx(payload: Value) -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/query",
        get(move || {
            let payload = payload.clone();
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(payload)
            }
        }),
    );
    (serve(router).await, hits)
}

/// Stub backend dispatching on the measurement named in the query.
async fn stub_influx_by_measurement(responses: HashMap<&'static str, Value>) -> SocketAddr {
    let router = Router::new().route(
        "/query",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let responses = responses.clone();
            async move {
                let command = params.get("q").cloned().unwrap_or_default();
                let payload = responses
                    .iter()
                    .find(|(measurement, _)| command.contains(&format!("FROM {measurement}")))
                    .map(|(_, payload)| payload.clone())
                    .unwrap_or_else(|| json!({ "results": [{ "statement_id": 0 }] }));
                Json(payload)
            }
        }),
    );
    serve(router).await
}

fn test_config(influx_address: &str, debug: bool) -> SiteConfig {
    let mut config = SiteConfig::default();
    config.server.debug = debug;
    config.influx.address = influx_address.to_string();
    config.influx.bpm_host = "Max Mustermann".to_string();
    config.nodes = vec![NodeConfig {
        name: "atlas".to_string(),
        host: "atlas".to_string(),
        services: vec![ServiceConfig {
            name: "Media".to_string(),
            server: "https://media.example.org".to_string(),
        }],
        upstream_interface: None,
        upstream_max_rate: 50_000_000.0,
    }];
    config
}

async fn spawn_app(config: SiteConfig) -> SocketAddr {
    let gateway = Arc::new(InfluxGateway::new(&config.influx));
    let chart_service = ChartService::new(gateway.clone(), config.influx.clone());
    let status_service =
        StatusService::new(gateway, config.influx.clone(), config.nodes.clone());
    let state = Arc::new(AppState {
        config,
        chart_service,
        status_service,
    });
    serve(build_router(state)).await
}

/// 11 rows over the last ~50 minutes, truncating average 76.
fn recent_bpm_payload() -> Value {
    let now = Utc::now().timestamp();
    let values = [
        85.0,
        78.25,
        73.0,
        71.8,
        84.1666666666667,
        68.5,
        73.8,
        70.8,
        78.3333333333333,
        74.25,
        82.6666666666667,
    ];
    let rows: Vec<Value> = values
        .iter()
        .enumerate()
        .map(|(i, value)| json!([now - (50 - 5 * i as i64) * 60, value]))
        .collect();
    json!({
        "results": [{
            "statement_id": 0,
            "series": [{
                "name": "bpm",
                "columns": ["time", "mean"],
                "values": rows
            }]
        }]
    })
}

#[tokio::test]
async fn scenario_a_recent_heart_rate_renders_an_ok_chart() {
    let (influx, _) = stub_influx(recent_bpm_payload()).await;
    let app = spawn_app(test_config(&format!("http://{influx}"), false)).await;

    let response = reqwest::get(format!("http://{app}/status.svg")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "image/svg+xml"
    );
    assert_eq!(
        response.headers()["cache-control"].to_str().unwrap(),
        "max-age=600"
    );

    let body = response.text().await.unwrap();
    assert!(body.trim_start().starts_with("<svg"));
    assert!(body.trim_end().ends_with("</svg>"));
    // Average 76 bpm in the last hour classifies ok.
    let upper = body.to_ascii_uppercase();
    assert!(upper.contains("4E9A06"));
    assert!(!upper.contains("CC0000"));
}

#[tokio::test]
async fn fixed_dimension_routes_serve_the_same_chart() {
    let (influx, _) = stub_influx(recent_bpm_payload()).await;
    let app = spawn_app(test_config(&format!("http://{influx}"), false)).await;

    for (width, height) in homelab_status::presentation::router::BPM_DIMENSIONS {
        let response = reqwest::get(format!("http://{app}/status-{width}x{height}.svg"))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body = response.text().await.unwrap();
        assert!(body.trim_start().starts_with("<svg"));
        assert!(body.trim_end().ends_with("</svg>"));
    }
}

#[tokio::test]
async fn scenario_b_single_row_yields_a_non_cacheable_placeholder() {
    let payload = json!({
        "results": [{
            "statement_id": 0,
            "series": [{
                "name": "bpm",
                "columns": ["time", "mean"],
                "values": [[1537845000, 76.0]]
            }]
        }]
    });
    let (influx, _) = stub_influx(payload).await;
    let app = spawn_app(test_config(&format!("http://{influx}"), false)).await;

    let response = reqwest::get(format!("http://{app}/status.svg")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "image/svg+xml"
    );
    assert_eq!(
        response.headers()["cache-control"].to_str().unwrap(),
        "no-store"
    );
    let body = response.text().await.unwrap();
    assert!(body.contains("Not enough data"));
}

#[tokio::test]
async fn scenario_c_empty_results_fail_the_status_page() {
    let (influx, _) = stub_influx(json!({ "results": [] })).await;

    // Without debug mode the body carries the contact, not the detail.
    let app = spawn_app(test_config(&format!("http://{influx}"), false)).await;
    let response = reqwest::get(format!("http://{app}/status")).await.unwrap();
    assert_eq!(response.status(), 500);
    let body = response.text().await.unwrap();
    assert!(body.contains("webmaster@example.org"));
    assert!(!body.contains("empty result"));

    // With debug mode the detail is shown.
    let app = spawn_app(test_config(&format!("http://{influx}"), true)).await;
    let response = reqwest::get(format!("http://{app}/status")).await.unwrap();
    assert_eq!(response.status(), 500);
    assert!(response.text().await.unwrap().contains("empty result"));
}

#[tokio::test]
async fn scenario_d_high_load_shows_error_styled_cells() {
    let now = Utc::now().timestamp();
    let influx = stub_influx_by_measurement(HashMap::from([
        (
            "system",
            json!({
                "results": [{
                    "statement_id": 0,
                    "series": [{
                        "name": "system",
                        "columns": ["time", "last", "last_1", "last_2"],
                        "values": [[now, 8.0, 8.0, 8.0]]
                    }]
                }]
            }),
        ),
        (
            "http_response",
            json!({
                "results": [{
                    "statement_id": 0,
                    "series": [{
                        "name": "http_response",
                        "columns": ["time", "last", "last_1"],
                        "values": [[now, 0.05, 0.0]]
                    }]
                }]
            }),
        ),
    ]))
    .await;
    let app = spawn_app(test_config(&format!("http://{influx}"), false)).await;

    let response = reqwest::get(format!("http://{app}/status")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["cache-control"].to_str().unwrap(),
        "max-age=60"
    );
    assert!(response.headers().contains_key("last-modified"));

    let body = response.text().await.unwrap();
    assert!(body.contains("class=\"error\">8.00<"));
    assert!(body.contains("Online. 0.05s latency."));
}

#[tokio::test]
async fn auth_rejection_and_unreachable_backend_share_an_error_class() {
    let unauthorized = Router::new().route("/query", get(|| async { StatusCode::UNAUTHORIZED }));
    let influx = serve(unauthorized).await;
    let app = spawn_app(test_config(&format!("http://{influx}"), false)).await;
    let auth_response = reqwest::get(format!("http://{app}/status.svg")).await.unwrap();

    let app = spawn_app(test_config("http://127.0.0.1:1", false)).await;
    let transport_response = reqwest::get(format!("http://{app}/status.svg")).await.unwrap();

    assert_eq!(auth_response.status(), 502);
    assert_eq!(transport_response.status(), auth_response.status());
}

#[tokio::test]
async fn invalid_dimensions_are_rejected_without_a_backend_call() {
    let (influx, hits) = stub_influx(recent_bpm_payload()).await;
    let app = spawn_app(test_config(&format!("http://{influx}"), false)).await;

    for query in ["w=0", "h=0", "w=-20", "h=40000", "w=abc"] {
        let response = reqwest::get(format!("http://{app}/status.svg?{query}"))
            .await
            .unwrap();
        assert_eq!(response.status(), 400, "query {query}");
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn static_endpoints() {
    let (influx, _) = stub_influx(json!({ "results": [] })).await;
    let app = spawn_app(test_config(&format!("http://{influx}"), false)).await;

    let response = reqwest::get(format!("http://{app}/")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("webmaster@example.org"));

    let response = reqwest::get(format!("http://{app}/healthz")).await.unwrap();
    assert_eq!(response.text().await.unwrap(), "ok");

    let response = reqwest::get(format!("http://{app}/robots.txt")).await.unwrap();
    let body = response.text().await.unwrap();
    assert!(body.contains("User-agent"));
    assert!(body.contains("Disallow: /status"));

    let response = reqwest::get(format!("http://{app}/not-existing-sub-page"))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert!(response.text().await.unwrap().contains("not found"));
}
