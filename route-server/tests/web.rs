//! HTTP-level tests against an offline server (fixed stations, great-circle graph).

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use route_server::directions::{DirectionsClient, DirectionsConfig};
use route_server::domain::Station;
use route_server::matrix::{MatrixClient, MatrixConfig};
use route_server::search::{MAX_RESTARTS, SearchConfig};
use route_server::stations::FixedStations;
use route_server::web::{AppState, create_router};
use serde_json::{Value, json};
use tower::util::ServiceExt;

fn stations() -> Vec<Station> {
    vec![
        Station::new("S1", Some("Ben Thanh".into()), 10.7725, 106.6980),
        Station::new("S2", None, 10.7760, 106.7010),
        Station::new("S3", None, 10.7800, 106.6950),
        Station::new("S4", None, 10.7900, 106.7100),
        Station::new("S5", Some("Terminus".into()), 10.8000, 106.7200),
        Station::new("FAR", None, 11.5000, 107.5000),
    ]
}

fn state() -> AppState {
    AppState::new(FixedStations::new(stations()), SearchConfig::default())
}

fn app() -> Router {
    create_router(state())
}

/// Nothing listens on the discard port, so every upstream call fails fast.
const DEAD_URL: &str = "http://127.0.0.1:9";

fn app_with_dead_upstreams(with_directions: bool) -> Router {
    let matrix = MatrixClient::new(MatrixConfig::new("test-key").with_base_url(DEAD_URL)).unwrap();
    let mut state = state().with_matrix(matrix);
    if with_directions {
        let directions =
            DirectionsClient::new(DirectionsConfig::new("test-key").with_base_url(DEAD_URL))
                .unwrap();
        state = state.with_directions(directions);
    }
    create_router(state)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_raw(body: String) -> (StatusCode, Value) {
    post_raw_to(app(), body).await
}

async fn post_raw_to(app: Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/live")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_live(body: Value) -> (StatusCode, Value) {
    post_raw(body.to_string()).await
}

/// Start at S1, goal at S5, with any extra fields merged in.
fn live_request(extra: Value) -> Value {
    let mut body = json!({
        "start_lat": 10.7725,
        "start_lng": 106.6980,
        "goal_lat": 10.8000,
        "goal_lng": 106.7200,
    });
    if let (Some(base), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    body
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["has_key"], false);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_stations_within_radius() {
    let (status, body) = get("/stations?lat=10.7725&lng=106.698&radius=1000").await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["S1", "S2", "S3"]);
    assert_eq!(body[0]["name"], "Ben Thanh");
}

#[tokio::test]
async fn test_stations_default_radius() {
    let (status, body) = get("/stations?lat=10.7725&lng=106.698").await;
    assert_eq!(status, StatusCode::OK);
    // S5 is about 3.9 km away
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_stations_invalid_coordinate() {
    let (status, body) = get("/stations?lat=95&lng=106.698").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_live_default_a_star() {
    let (status, body) = post_live(live_request(json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["algorithm"], "a_star");
    assert_eq!(body["weight"], "distance");
    assert_eq!(body["found"], true);
    assert_eq!(body["start_node"], "S1");
    assert_eq!(body["goal_node"], "S5");
    assert_eq!(body["path_ids"], json!(["S1", "S5"]));
    assert!(body["cost"].as_f64().unwrap() > 3000.0);
    assert!(body["expanded"].as_u64().unwrap() >= 2);

    // Merged stations from both ends, FAR excluded
    let nodes = body["nodes"].as_object().unwrap();
    assert_eq!(nodes.len(), 5);
    assert_eq!(nodes["S5"]["name"], "Terminus");

    let geometry = &body["path_geojson"]["geometry"];
    assert_eq!(geometry["type"], "LineString");
    assert_eq!(
        geometry["coordinates"],
        json!([[106.6980, 10.7725], [106.7200, 10.8000]])
    );
    assert_eq!(body["path_geojson"]["properties"]["algorithm"], "a_star");

    let bench = body["bench"].as_object().unwrap();
    assert_eq!(bench.len(), 1);
    assert!(bench.contains_key("a_star"));
    assert!(body.get("attempts").is_none());
    assert!(body.get("directions").is_none());
}

#[tokio::test]
async fn test_live_hill_climbing() {
    let (status, body) = post_live(live_request(json!({
        "algorithm": "hill_climbing",
        "restarts": 3,
        "seed": 42,
    })))
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["algorithm"], "hill_climbing");
    assert_eq!(body["found"], true);
    assert_eq!(body["path_ids"], json!(["S1", "S5"]));
    assert_eq!(body["attempts"].as_array().unwrap().len(), 3);
    assert_eq!(body["attempts"][0]["restart"], 0);
    assert_eq!(body["attempts"][0]["reached_goal"], true);
}

#[tokio::test]
async fn test_live_both_prefers_a_star() {
    let (status, body) = post_live(live_request(json!({
        "algorithm": "both",
        "seed": 1,
    })))
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["algorithm"], "a_star");
    let bench = body["bench"].as_object().unwrap();
    assert_eq!(bench.len(), 2);

    let a_star = bench["a_star"]["cost"].as_f64().unwrap();
    let hill = bench["hill_climbing"]["cost"].as_f64().unwrap();
    assert!(hill >= a_star - 1e-9);
    assert_eq!(body["cost"].as_f64().unwrap(), a_star);
}

#[tokio::test]
async fn test_live_duration_weight() {
    let (_, by_distance) = post_live(live_request(json!({}))).await;
    let (status, by_time) = post_live(live_request(json!({
        "weight": "time",
        "speed_mps": 10.0,
    })))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_time["weight"], "duration");

    let metres = by_distance["cost"].as_f64().unwrap();
    let seconds = by_time["cost"].as_f64().unwrap();
    assert!((seconds * 10.0 - metres).abs() < 1e-6);
}

#[tokio::test]
async fn test_live_directions_without_client() {
    let (status, body) = post_live(live_request(json!({ "with_directions": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("directions").is_none());
}

#[tokio::test]
async fn test_live_invalid_algorithm() {
    let (status, body) = post_live(live_request(json!({ "algorithm": "dijkstra" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "algorithm must be 'hill_climbing', 'a_star', or 'both'"
    );
}

#[tokio::test]
async fn test_live_invalid_weight() {
    let (status, _) = post_live(live_request(json!({ "weight": "furlongs" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_live_invalid_parameters() {
    let (status, _) = post_live(live_request(json!({ "restarts": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_live(live_request(json!({ "max_steps": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_live(live_request(json!({ "speed_mps": -1.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_live(live_request(json!({ "start_lat": 91.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_live_oversized_search_rejected() {
    let (status, body) = post_live(live_request(json!({
        "algorithm": "hill_climbing",
        "restarts": 1_000_000_000_000u64,
    })))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("restarts"));

    let (status, _) = post_live(live_request(json!({
        "algorithm": "hill_climbing",
        "restarts": MAX_RESTARTS + 1,
    })))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_live(live_request(json!({
        "algorithm": "hill_climbing",
        "max_steps": 1_000_000_000_000u64,
    })))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("max_steps"));
}

#[tokio::test]
async fn test_live_matrix_failure_falls_back() {
    let app = app_with_dead_upstreams(false);
    let (status, body) = post_raw_to(app, live_request(json!({})).to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], true);
    assert_eq!(body["path_ids"], json!(["S1", "S5"]));
    assert!(body.get("directions").is_none());
}

#[tokio::test]
async fn test_live_directions_failure_omits_polyline() {
    let app = app_with_dead_upstreams(true);
    let request = live_request(json!({ "with_directions": true }));
    let (status, body) = post_raw_to(app, request.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], true);
    assert_eq!(body["path_ids"], json!(["S1", "S5"]));
    assert!(body.get("directions").is_none());
}

#[tokio::test]
async fn test_live_malformed_json() {
    let (status, body) = post_raw("{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));

    // Missing required coordinates
    let (status, _) = post_live(json!({ "start_lat": 10.0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_live_not_enough_stations() {
    let (status, body) = post_live(json!({
        "start_lat": 0.0,
        "start_lng": 0.0,
        "goal_lat": 0.01,
        "goal_lng": 0.01,
    }))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not enough stations found");

    // A single station near both ends is still not enough
    let (status, _) = post_live(json!({
        "start_lat": 11.5,
        "start_lng": 107.5,
        "goal_lat": 11.501,
        "goal_lng": 107.501,
    }))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn bundled_station_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/stations.json");
    let fixed = FixedStations::from_file(path).unwrap();
    assert_eq!(fixed.len(), 10);
}
