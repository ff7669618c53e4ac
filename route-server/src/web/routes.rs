//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::{Coordinate, DomainError, NodeId, Station, merge_stations};
use crate::geo::nearest;
use crate::graph::{Graph, GraphError, Positions, offline_graph};
use crate::search::{RouteQuery, SearchConfig, SearchError, compare};
use crate::stations::StationError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(stations))
        .route("/live", post(live))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
        has_key: state.has_key(),
    })
}

/// Stations near a point.
async fn stations(
    State(state): State<AppState>,
    Query(req): Query<StationsQuery>,
) -> Result<Json<Vec<Station>>, AppError> {
    let center = Coordinate::parse(req.lat, req.lng)?;
    let stations = state.stations.nearby(center, req.radius).await?;
    Ok(Json(stations))
}

/// Plan a route between two points.
async fn live(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: LiveRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid /live request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let choice = req.algorithm_choice()?;
    let config = req.search_config(&state.search)?;
    let start = Coordinate::parse(req.start_lat, req.start_lng)?;
    let goal = Coordinate::parse(req.goal_lat, req.goal_lng)?;

    // Collect stations around start and goal
    let (near_start, near_goal) = tokio::join!(
        nearby_or_empty(&state, start, req.radius),
        nearby_or_empty(&state, goal, req.radius),
    );
    let stations = merge_stations([near_start, near_goal]);
    if stations.len() < 2 {
        return Err(AppError::NotFound {
            message: "Not enough stations found".to_string(),
        });
    }

    let graph = build_graph(&state, &stations, &config).await?;
    let positions = Positions::from_stations(&stations);

    let start_id = anchor(&positions, start)?;
    let goal_id = anchor(&positions, goal)?;
    info!(
        stations = stations.len(),
        edges = graph.edge_count(),
        start = %start_id,
        goal = %goal_id,
        algorithm = %req.algorithm,
        "planning route"
    );

    // Search is CPU-bound; keep it off the async workers
    let mode = config.mode;
    let search_positions = positions.clone();
    let comparison = tokio::task::spawn_blocking(move || {
        let query = RouteQuery {
            graph: &graph,
            positions: &search_positions,
            start: &start_id,
            goal: &goal_id,
        };
        compare(&query, choice, &config, None)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("search task failed: {e}"),
    })??;

    let mut response = LiveResponse::build(&stations, &positions, &comparison, mode);

    if req.with_directions {
        if let Some(client) = &state.directions {
            let coords = positions.project(&response.path_ids);
            match client.route(&coords).await {
                Ok(route) => response.directions = route,
                Err(e) => warn!(error = %e, "directions lookup failed, omitting polyline"),
            }
        }
    }

    Ok(Json(response).into_response())
}

/// Nearby stations, treating a collaborator failure as none found.
async fn nearby_or_empty(state: &AppState, center: Coordinate, radius_m: u32) -> Vec<Station> {
    match state.stations.nearby(center, radius_m).await {
        Ok(stations) => stations,
        Err(e) => {
            warn!(
                lat = center.lat,
                lng = center.lng,
                error = %e,
                "station lookup failed, using empty"
            );
            Vec::new()
        }
    }
}

/// Build the route graph, preferring the Distance Matrix when configured.
async fn build_graph(
    state: &AppState,
    stations: &[Station],
    config: &SearchConfig,
) -> Result<Graph, AppError> {
    if let Some(matrix) = &state.matrix {
        match matrix.build_graph(stations, config.mode).await {
            Ok(graph) => return Ok(graph),
            Err(e) => warn!(error = %e, "distance matrix failed, falling back to offline graph"),
        }
    }
    Ok(offline_graph(stations, config.mode, config.speed_mps)?)
}

/// Station nearest to `target`.
fn anchor(positions: &Positions, target: Coordinate) -> Result<NodeId, AppError> {
    nearest(positions.iter(), target)
        .cloned()
        .ok_or_else(|| AppError::NotFound {
            message: "No station found to anchor start/goal".to_string(),
        })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<StationError> for AppError {
    fn from(e: StationError) -> Self {
        AppError::Internal {
            message: format!("stations error: {e}"),
        }
    }
}

impl From<GraphError> for AppError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
            SearchError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
