use route_server::cache::{CacheConfig, CachedPlacesClient};
use route_server::config::AppConfig;
use route_server::directions::DirectionsClient;
use route_server::matrix::MatrixClient;
use route_server::search::SearchConfig;
use route_server::stations::{FixedStations, PlacesClient, StationSource};
use route_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env is fine; real environment variables take precedence
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Station source: a fixture file wins over the live API
    let stations: StationSource = match (&config.stations_file, config.places_config()) {
        (Some(path), _) => {
            let fixed = FixedStations::from_file(path).expect("Failed to load stations file");
            info!(path = %path.display(), count = fixed.len(), "using fixed stations");
            fixed.into()
        }
        (None, Some(places_config)) => {
            let client = PlacesClient::new(places_config).expect("Failed to create Places client");
            CachedPlacesClient::new(client, &CacheConfig::default()).into()
        }
        (None, None) => {
            warn!("GOOGLE_MAPS_API_KEY and ROUTE_STATIONS_FILE not set; no stations will be found");
            FixedStations::default().into()
        }
    };

    let mut state = AppState::new(stations, SearchConfig::default());

    if config.has_api_key() {
        if let Some(matrix_config) = config.matrix_config() {
            let client = MatrixClient::new(matrix_config).expect("Failed to create Matrix client");
            state = state.with_matrix(client);
        }
        if let Some(directions_config) = config.directions_config() {
            let client = DirectionsClient::new(directions_config)
                .expect("Failed to create Directions client");
            state = state.with_directions(client);
        }
    } else {
        info!("no API key; graphs are built from great-circle distances");
    }

    let app = create_router(state);

    let addr = config.bind_addr;
    info!("Bus route planner listening on http://{addr}");
    info!("  GET  /health    - Health check");
    info!("  GET  /stations  - Stations near a point");
    info!("  POST /live      - Plan a route");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
